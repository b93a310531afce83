//! Deposit and withdraw orchestration, written once over [`Movement`].

use std::marker::PhantomData;
use std::sync::Arc;

use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::database::models::{Movement, NewMovement};
use crate::database::MovementRepository;
use crate::filter::{MovementFilter, SortParams};
use crate::services::error::ServiceResult;
use crate::services::listing::{self, ListScope};
use crate::services::rules;

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMovement {
    /// Defaults to the acting user.
    #[serde(default)]
    pub user_id: Option<Uuid>,
    pub ware_id: Uuid,
    pub quantity: f64,
}

pub struct MovementService<M: Movement> {
    movements: Arc<dyn MovementRepository<M>>,
    _kind: PhantomData<fn() -> M>,
}

impl<M: Movement> Clone for MovementService<M> {
    fn clone(&self) -> Self {
        Self {
            movements: Arc::clone(&self.movements),
            _kind: PhantomData,
        }
    }
}

impl<M: Movement> MovementService<M> {
    pub fn new(movements: Arc<dyn MovementRepository<M>>) -> Self {
        Self {
            movements,
            _kind: PhantomData,
        }
    }

    /// The ware's available quantity is adjusted by the store as part of the
    /// same write; nothing here touches it.
    pub async fn create(&self, request: CreateMovement, acting_user: Uuid) -> ServiceResult<Uuid> {
        let movement = NewMovement {
            user_id: request.user_id.unwrap_or(acting_user),
            ware_id: request.ware_id,
            quantity: request.quantity,
        };
        let id = self.movements.insert(movement).await?;

        info!(kind = M::NAME, id = %id, ware_id = %movement.ware_id, "movement recorded");
        Ok(id)
    }

    pub async fn get(&self, id: Uuid) -> ServiceResult<M> {
        rules::require_found(self.movements.find_by_id(id).await?)
    }

    pub async fn list_by_user(&self, user_id: Uuid, sort: &SortParams) -> ServiceResult<Vec<M>> {
        let movements = self.movements.find(&MovementFilter::by_user(user_id)).await?;
        listing::sorted_or_not_found(movements, ListScope::User, sort)
    }

    pub async fn list_by_ware(&self, ware_id: Uuid, sort: &SortParams) -> ServiceResult<Vec<M>> {
        let movements = self.movements.find(&MovementFilter::by_ware(ware_id)).await?;
        listing::sorted_or_not_found(movements, ListScope::Ware, sort)
    }

    pub async fn list(&self, filter: &MovementFilter, sort: &SortParams) -> ServiceResult<Vec<M>> {
        let movements = self.movements.find(filter).await?;
        listing::sorted_or_not_found(movements, ListScope::Filters, sort)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::{Deposit, NewUser, NewWare, Withdraw};
    use crate::database::{MemoryStore, UserRepository, WareRepository};
    use crate::services::error::ServiceError;

    struct Fixture {
        store: MemoryStore,
        deposits: MovementService<Deposit>,
        withdraws: MovementService<Withdraw>,
        user: Uuid,
        ware: Uuid,
    }

    async fn fixture(available: f64) -> Fixture {
        let store = MemoryStore::new();
        let user = UserRepository::insert(
            &store,
            NewUser {
                name: "Ada".into(),
                password_hash: "hash".into(),
                email: "ada@example.com".into(),
                profile_picture_url: None,
            },
        )
        .await
        .unwrap();
        let ware = WareRepository::insert(
            &store,
            NewWare {
                user_id: user,
                name: "Bolts".into(),
                brand: "Acme".into(),
                description: None,
                weight_per_unit: 0.1,
                weight_unit: None,
                total_quantity: 1000.0,
                available_quantity: available,
                quantity_unit: None,
                location: "A1".into(),
            },
        )
        .await
        .unwrap();

        Fixture {
            deposits: MovementService::new(Arc::new(store.clone())),
            withdraws: MovementService::new(Arc::new(store.clone())),
            store,
            user,
            ware,
        }
    }

    fn movement(ware_id: Uuid, quantity: f64) -> CreateMovement {
        CreateMovement { user_id: None, ware_id, quantity }
    }

    async fn available(fixture: &Fixture) -> f64 {
        WareRepository::find_by_id(&fixture.store, fixture.ware)
            .await
            .unwrap()
            .unwrap()
            .available_quantity
    }

    #[tokio::test]
    async fn deposit_raises_available_quantity() {
        let f = fixture(0.0).await;
        let id = f.deposits.create(movement(f.ware, 500.0), f.user).await.unwrap();

        assert_eq!(available(&f).await, 500.0);
        let deposit = f.deposits.get(id).await.unwrap();
        assert_eq!(deposit.user_id, f.user);
        assert_eq!(deposit.quantity, 500.0);
    }

    #[tokio::test]
    async fn overdrawing_withdraw_is_forbidden_and_changes_nothing() {
        let f = fixture(10.0).await;
        let err = f.withdraws.create(movement(f.ware, 11.0), f.user).await.unwrap_err();

        assert!(matches!(err, ServiceError::Forbidden(_)));
        assert_eq!(available(&f).await, 10.0);
        assert!(f.withdraws.list_by_ware(f.ware, &SortParams::default()).await.is_err());
    }

    #[tokio::test]
    async fn deposit_and_withdraw_ids_do_not_cross() {
        let f = fixture(0.0).await;
        let id = f.deposits.create(movement(f.ware, 5.0), f.user).await.unwrap();

        let err = f.withdraws.get(id).await.unwrap_err();
        assert_eq!(err.to_string(), "There is no withdraw with such ID");
    }

    #[tokio::test]
    async fn lists_sort_numerically_by_quantity() {
        let f = fixture(0.0).await;
        for quantity in [500.0, 50.0, 590.0] {
            f.deposits.create(movement(f.ware, quantity), f.user).await.unwrap();
        }

        let sorted = f.deposits.list_by_ware(f.ware, &SortParams::new("quantity", "asc")).await.unwrap();
        let quantities: Vec<f64> = sorted.iter().map(|d| d.quantity).collect();
        assert_eq!(quantities, vec![50.0, 500.0, 590.0]);

        let err = f.deposits.list_by_user(f.user, &SortParams::new("quantity", "up")).await.unwrap_err();
        assert!(matches!(&err, ServiceError::BadRequest(m) if m == "Order should be: [asc, desc]"));
    }

    #[tokio::test]
    async fn empty_lists_name_their_scope() {
        let f = fixture(0.0).await;
        let sort = SortParams::default();

        let err = f.deposits.list_by_user(f.user, &sort).await.unwrap_err();
        assert_eq!(err.to_string(), "There are no deposits for such user");

        let err = f.withdraws.list_by_ware(f.ware, &sort).await.unwrap_err();
        assert_eq!(err.to_string(), "There are no withdraws for such ware");

        let filter = MovementFilter { user_id: Some(f.user), ware_id: Some(f.ware) };
        let err = f.withdraws.list(&filter, &sort).await.unwrap_err();
        assert_eq!(err.to_string(), "There are no withdraws for such filters");
    }
}
