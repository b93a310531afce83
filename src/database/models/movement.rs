//! Deposit and withdraw events.
//!
//! Both are append-only records of a quantity change against one ware and
//! share every field, so the listing/sorting pipeline and the repository port
//! are written once over [`Movement`].

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{postgres::PgRow, FromRow};
use uuid::Uuid;

use super::Resource;
use crate::filter::{SortKey, Sortable};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovementKind {
    Deposit,
    Withdraw,
}

impl MovementKind {
    pub fn table(self) -> &'static str {
        match self {
            MovementKind::Deposit => "deposits",
            MovementKind::Withdraw => "withdraws",
        }
    }
}

pub trait Movement:
    Resource + Sortable + Serialize + Clone + Send + Sync + Unpin + for<'r> FromRow<'r, PgRow> + 'static
{
    const KIND: MovementKind;

    fn from_parts(id: Uuid, new: NewMovement, created_at: DateTime<Utc>) -> Self;

    fn user_id(&self) -> Uuid;
    fn ware_id(&self) -> Uuid;
    fn quantity(&self) -> f64;
    fn created_at(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NewMovement {
    pub user_id: Uuid,
    pub ware_id: Uuid,
    pub quantity: f64,
}

const MOVEMENT_SORT_LABELS: &[&str] = &["userId", "wareId", "quantity", "timestamp"];

fn movement_sort_key<M: Movement>(movement: &M, label: &str) -> Option<SortKey> {
    match label {
        "userId" => Some(SortKey::Id(movement.user_id())),
        "wareId" => Some(SortKey::Id(movement.ware_id())),
        "quantity" => Some(SortKey::Number(movement.quantity())),
        "timestamp" => Some(SortKey::Time(movement.created_at())),
        _ => None,
    }
}

macro_rules! movement_entity {
    ($(#[$doc:meta])* $name:ident, $kind:expr, $singular:literal, $plural:literal) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
        #[serde(rename_all = "camelCase")]
        pub struct $name {
            pub id: Uuid,
            pub user_id: Uuid,
            pub ware_id: Uuid,
            pub quantity: f64,
            pub created_at: DateTime<Utc>,
        }

        impl Resource for $name {
            const NAME: &'static str = $singular;
            const PLURAL: &'static str = $plural;
        }

        impl Sortable for $name {
            const SORT_LABELS: &'static [&'static str] = MOVEMENT_SORT_LABELS;

            fn sort_key(&self, label: &str) -> Option<SortKey> {
                movement_sort_key(self, label)
            }
        }

        impl Movement for $name {
            const KIND: MovementKind = $kind;

            fn from_parts(id: Uuid, new: NewMovement, created_at: DateTime<Utc>) -> Self {
                Self {
                    id,
                    user_id: new.user_id,
                    ware_id: new.ware_id,
                    quantity: new.quantity,
                    created_at,
                }
            }

            fn user_id(&self) -> Uuid { self.user_id }
            fn ware_id(&self) -> Uuid { self.ware_id }
            fn quantity(&self) -> f64 { self.quantity }
            fn created_at(&self) -> DateTime<Utc> { self.created_at }
        }
    };
}

movement_entity!(
    /// Increases the available quantity of a ware.
    Deposit, MovementKind::Deposit, "deposit", "deposits"
);

movement_entity!(
    /// Decreases the available quantity of a ware.
    Withdraw, MovementKind::Withdraw, "withdraw", "withdraws"
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::FilterOrder;

    fn deposit(quantity: f64) -> Deposit {
        Deposit::from_parts(
            Uuid::new_v4(),
            NewMovement { user_id: Uuid::new_v4(), ware_id: Uuid::new_v4(), quantity },
            Utc::now(),
        )
    }

    #[test]
    fn deposits_sort_by_quantity() {
        let deposits = vec![deposit(500.0), deposit(50.0), deposit(590.0)];
        let sorted = FilterOrder::sort(deposits, "quantity", "asc").unwrap();
        let quantities: Vec<f64> = sorted.iter().map(|d| d.quantity).collect();
        assert_eq!(quantities, vec![50.0, 500.0, 590.0]);
    }

    #[test]
    fn movement_labels_are_reported_in_error() {
        let err = FilterOrder::sort(vec![deposit(1.0)], "name", "asc").unwrap_err();
        assert_eq!(err.to_string(), "Sorting should be: [userId, wareId, quantity, timestamp]");
    }

    #[test]
    fn serializes_camel_case() {
        let value = serde_json::to_value(deposit(3.5)).unwrap();
        assert!(value.get("userId").is_some());
        assert!(value.get("wareId").is_some());
        assert!(value.get("createdAt").is_some());
        assert_eq!(value["quantity"], 3.5);
    }
}
