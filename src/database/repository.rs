//! Persistence port.
//!
//! Thin, logic-free access to the four tables. Filtering by optional fields
//! happens here; ordering does not (see [`crate::filter::FilterOrder`]).

use async_trait::async_trait;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::{Movement, NewMovement, NewUser, NewWare, User, UserChanges, Ware, WareChanges};
use crate::filter::{MovementFilter, WareFilter};

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn insert(&self, user: NewUser) -> Result<Uuid, DatabaseError>;

    /// Returned users carry their password hash.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DatabaseError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError>;

    async fn update(&self, id: Uuid, changes: UserChanges) -> Result<(), DatabaseError>;

    async fn update_password(&self, id: Uuid, password_hash: String) -> Result<(), DatabaseError>;

    async fn delete(&self, id: Uuid) -> Result<(), DatabaseError>;
}

#[async_trait]
pub trait WareRepository: Send + Sync {
    async fn insert(&self, ware: NewWare) -> Result<Uuid, DatabaseError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Ware>, DatabaseError>;

    /// Rows matching every set field of `filter`, in creation order.
    async fn find(&self, filter: &WareFilter) -> Result<Vec<Ware>, DatabaseError>;

    async fn update(&self, id: Uuid, changes: WareChanges) -> Result<(), DatabaseError>;

    async fn delete(&self, id: Uuid) -> Result<(), DatabaseError>;
}

/// Shared by deposits and withdraws. There is no update or delete: movements
/// are append-only.
#[async_trait]
pub trait MovementRepository<M: Movement>: Send + Sync {
    /// Also adjusts the ware's available quantity, atomically with the insert.
    async fn insert(&self, movement: NewMovement) -> Result<Uuid, DatabaseError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<M>, DatabaseError>;

    /// Rows matching every set field of `filter`, in creation order.
    async fn find(&self, filter: &MovementFilter) -> Result<Vec<M>, DatabaseError>;
}
