use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

use super::Resource;
use crate::filter::{SortKey, Sortable};

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Ware {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub brand: String,
    pub description: Option<String>,
    pub weight_per_unit: f64,
    pub weight_unit: Option<String>,
    pub total_quantity: f64,
    /// Maintained by the store from deposit and withdraw events.
    pub available_quantity: f64,
    pub quantity_unit: Option<String>,
    pub location: String,
    pub created_at: DateTime<Utc>,
}

impl Resource for Ware {
    const NAME: &'static str = "ware";
    const PLURAL: &'static str = "wares";
}

impl Sortable for Ware {
    const SORT_LABELS: &'static [&'static str] = &["name", "brand", "quantity", "timestamp"];

    fn sort_key(&self, label: &str) -> Option<SortKey> {
        match label {
            "name" => Some(SortKey::Text(self.name.clone())),
            "brand" => Some(SortKey::Text(self.brand.clone())),
            "quantity" => Some(SortKey::Number(self.available_quantity)),
            "timestamp" => Some(SortKey::Time(self.created_at)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewWare {
    pub user_id: Uuid,
    pub name: String,
    pub brand: String,
    pub description: Option<String>,
    pub weight_per_unit: f64,
    pub weight_unit: Option<String>,
    pub total_quantity: f64,
    pub available_quantity: f64,
    pub quantity_unit: Option<String>,
    pub location: String,
}

/// Full replacement values for the fields a client may edit.
#[derive(Debug, Clone)]
pub struct WareChanges {
    pub name: String,
    pub brand: String,
    pub description: Option<String>,
    pub weight_per_unit: f64,
    pub weight_unit: Option<String>,
    pub total_quantity: f64,
    pub quantity_unit: Option<String>,
    pub location: String,
}

impl WareChanges {
    /// Starting point for a merge: every field keeps its current value.
    pub fn from_current(ware: &Ware) -> Self {
        Self {
            name: ware.name.clone(),
            brand: ware.brand.clone(),
            description: ware.description.clone(),
            weight_per_unit: ware.weight_per_unit,
            weight_unit: ware.weight_unit.clone(),
            total_quantity: ware.total_quantity,
            quantity_unit: ware.quantity_unit.clone(),
            location: ware.location.clone(),
        }
    }
}
