use std::sync::Arc;

use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::database::models::{NewWare, Ware, WareChanges};
use crate::database::WareRepository;
use crate::filter::{SortParams, WareFilter};
use crate::services::error::ServiceResult;
use crate::services::listing::{self, ListScope};
use crate::services::rules;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateWare {
    /// Defaults to the acting user.
    #[serde(default)]
    pub user_id: Option<Uuid>,
    pub name: String,
    pub brand: String,
    #[serde(default)]
    pub description: Option<String>,
    pub weight_per_unit: f64,
    #[serde(default)]
    pub weight_unit: Option<String>,
    pub total_quantity: f64,
    pub available_quantity: f64,
    #[serde(default)]
    pub quantity_unit: Option<String>,
    pub location: String,
}

/// Partial ware edit. The available quantity is owned by deposit and
/// withdraw events and cannot be set here.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WareUpdate {
    pub name: Option<String>,
    pub brand: Option<String>,
    pub description: Option<String>,
    pub weight_per_unit: Option<f64>,
    pub weight_unit: Option<String>,
    pub total_quantity: Option<f64>,
    pub quantity_unit: Option<String>,
    pub location: Option<String>,
}

impl WareUpdate {
    fn merge_into(self, mut changes: WareChanges) -> WareChanges {
        if let Some(name) = self.name {
            changes.name = name;
        }
        if let Some(brand) = self.brand {
            changes.brand = brand;
        }
        if let Some(location) = self.location {
            changes.location = location;
        }
        if let Some(weight) = self.weight_per_unit {
            changes.weight_per_unit = weight;
        }
        if let Some(total) = self.total_quantity {
            changes.total_quantity = total;
        }
        changes.description = self.description.or(changes.description);
        changes.weight_unit = self.weight_unit.or(changes.weight_unit);
        changes.quantity_unit = self.quantity_unit.or(changes.quantity_unit);
        changes
    }
}

#[derive(Clone)]
pub struct WareService {
    wares: Arc<dyn WareRepository>,
}

impl WareService {
    pub fn new(wares: Arc<dyn WareRepository>) -> Self {
        Self { wares }
    }

    async fn existing(&self, id: Uuid) -> ServiceResult<Ware> {
        rules::require_found(self.wares.find_by_id(id).await?)
    }

    /// Beyond the name check, the store's constraints decide.
    pub async fn create(&self, request: CreateWare, acting_user: Uuid) -> ServiceResult<Uuid> {
        rules::ensure_named::<Ware>(&request.name)?;

        let id = self
            .wares
            .insert(NewWare {
                user_id: request.user_id.unwrap_or(acting_user),
                name: request.name,
                brand: request.brand,
                description: request.description,
                weight_per_unit: request.weight_per_unit,
                weight_unit: request.weight_unit,
                total_quantity: request.total_quantity,
                available_quantity: request.available_quantity,
                quantity_unit: request.quantity_unit,
                location: request.location,
            })
            .await?;

        info!(ware_id = %id, "ware created");
        Ok(id)
    }

    pub async fn get(&self, id: Uuid) -> ServiceResult<Ware> {
        self.existing(id).await
    }

    pub async fn list_by_user(&self, user_id: Uuid, sort: &SortParams) -> ServiceResult<Vec<Ware>> {
        let wares = self.wares.find(&WareFilter::by_user(user_id)).await?;
        listing::sorted_or_not_found(wares, ListScope::User, sort)
    }

    pub async fn list(&self, filter: &WareFilter, sort: &SortParams) -> ServiceResult<Vec<Ware>> {
        let wares = self.wares.find(filter).await?;
        listing::sorted_or_not_found(wares, ListScope::Filters, sort)
    }

    pub async fn update(&self, id: Uuid, update: WareUpdate) -> ServiceResult<Uuid> {
        let ware = self.existing(id).await?;
        if let Some(name) = &update.name {
            rules::ensure_named::<Ware>(name)?;
        }

        let changes = update.merge_into(WareChanges::from_current(&ware));
        self.wares.update(id, changes).await?;

        info!(ware_id = %id, "ware updated");
        Ok(id)
    }

    /// Also removes every deposit and withdraw recorded against the ware.
    pub async fn delete(&self, id: Uuid) -> ServiceResult<Uuid> {
        self.existing(id).await?;
        self.wares.delete(id).await?;

        info!(ware_id = %id, "ware deleted");
        Ok(id)
    }
}
