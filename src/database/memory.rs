//! In-process store implementing every repository port.
//!
//! Mirrors the Postgres schema closely enough to stand in for it: unique
//! emails, foreign keys with cascading deletes, `quantity > 0` on movements,
//! `available_quantity >= 0` on wares, and the stock triggers. All writes run
//! under one write lock, so a movement insert and its stock adjustment are
//! atomic.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::{
    Movement, MovementKind, NewMovement, NewUser, NewWare, User, UserChanges, Ware, WareChanges,
};
use crate::database::repository::{MovementRepository, UserRepository, WareRepository};
use crate::filter::{MovementFilter, WareFilter};

#[derive(Debug, Clone)]
struct MovementRow {
    kind: MovementKind,
    id: Uuid,
    movement: NewMovement,
    created_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
struct Tables {
    users: Vec<User>,
    wares: Vec<Ware>,
    movements: Vec<MovementRow>,
}

impl Tables {
    fn email_taken(&self, email: &str, except: Option<Uuid>) -> bool {
        self.users
            .iter()
            .any(|u| u.email == email && Some(u.id) != except)
    }

    fn user_exists(&self, id: Uuid) -> bool {
        self.users.iter().any(|u| u.id == id)
    }

    fn ware_mut(&mut self, id: Uuid) -> Option<&mut Ware> {
        self.wares.iter_mut().find(|w| w.id == id)
    }
}

#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn constraint(name: &str) -> DatabaseError {
    DatabaseError::Constraint(name.to_string())
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn insert(&self, user: NewUser) -> Result<Uuid, DatabaseError> {
        let mut tables = self.tables.write().await;
        if tables.email_taken(&user.email, None) {
            return Err(constraint("users_email_key"));
        }

        let id = Uuid::new_v4();
        tables.users.push(User {
            id,
            name: user.name,
            password_hash: Some(user.password_hash),
            email: user.email,
            profile_picture_url: user.profile_picture_url,
        });
        Ok(id)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.email == email).cloned())
    }

    async fn update(&self, id: Uuid, changes: UserChanges) -> Result<(), DatabaseError> {
        let mut tables = self.tables.write().await;
        if tables.email_taken(&changes.email, Some(id)) {
            return Err(constraint("users_email_key"));
        }

        if let Some(user) = tables.users.iter_mut().find(|u| u.id == id) {
            user.name = changes.name;
            user.email = changes.email;
            user.profile_picture_url = changes.profile_picture_url;
        }
        Ok(())
    }

    async fn update_password(&self, id: Uuid, password_hash: String) -> Result<(), DatabaseError> {
        let mut tables = self.tables.write().await;
        if let Some(user) = tables.users.iter_mut().find(|u| u.id == id) {
            user.password_hash = Some(password_hash);
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), DatabaseError> {
        let mut tables = self.tables.write().await;
        tables.users.retain(|u| u.id != id);

        let owned: Vec<Uuid> = tables.wares.iter().filter(|w| w.user_id == id).map(|w| w.id).collect();
        tables.wares.retain(|w| w.user_id != id);
        tables
            .movements
            .retain(|m| m.movement.user_id != id && !owned.contains(&m.movement.ware_id));
        Ok(())
    }
}

#[async_trait]
impl WareRepository for MemoryStore {
    async fn insert(&self, ware: NewWare) -> Result<Uuid, DatabaseError> {
        let mut tables = self.tables.write().await;
        if !tables.user_exists(ware.user_id) {
            return Err(constraint("wares_user_id_fkey"));
        }
        if ware.available_quantity < 0.0 {
            return Err(constraint("wares_available_quantity_check"));
        }

        let id = Uuid::new_v4();
        tables.wares.push(Ware {
            id,
            user_id: ware.user_id,
            name: ware.name,
            brand: ware.brand,
            description: ware.description,
            weight_per_unit: ware.weight_per_unit,
            weight_unit: ware.weight_unit,
            total_quantity: ware.total_quantity,
            available_quantity: ware.available_quantity,
            quantity_unit: ware.quantity_unit,
            location: ware.location,
            created_at: Utc::now(),
        });
        Ok(id)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Ware>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables.wares.iter().find(|w| w.id == id).cloned())
    }

    async fn find(&self, filter: &WareFilter) -> Result<Vec<Ware>, DatabaseError> {
        let tables = self.tables.read().await;
        let wares = tables
            .wares
            .iter()
            .filter(|w| filter.user_id.map_or(true, |id| w.user_id == id))
            .filter(|w| filter.name.as_ref().map_or(true, |name| &w.name == name))
            .filter(|w| filter.brand.as_ref().map_or(true, |brand| &w.brand == brand))
            .cloned()
            .collect();
        Ok(wares)
    }

    async fn update(&self, id: Uuid, changes: WareChanges) -> Result<(), DatabaseError> {
        let mut tables = self.tables.write().await;
        if let Some(ware) = tables.ware_mut(id) {
            ware.name = changes.name;
            ware.brand = changes.brand;
            ware.description = changes.description;
            ware.weight_per_unit = changes.weight_per_unit;
            ware.weight_unit = changes.weight_unit;
            ware.total_quantity = changes.total_quantity;
            ware.quantity_unit = changes.quantity_unit;
            ware.location = changes.location;
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), DatabaseError> {
        let mut tables = self.tables.write().await;
        tables.wares.retain(|w| w.id != id);
        tables.movements.retain(|m| m.movement.ware_id != id);
        Ok(())
    }
}

#[async_trait]
impl<M: Movement> MovementRepository<M> for MemoryStore {
    async fn insert(&self, movement: NewMovement) -> Result<Uuid, DatabaseError> {
        let table = M::KIND.table();
        let mut tables = self.tables.write().await;

        if !tables.user_exists(movement.user_id) {
            return Err(constraint(&format!("{table}_user_id_fkey")));
        }
        // NaN fails this comparison as well.
        if !(movement.quantity > 0.0) {
            return Err(constraint(&format!("{table}_quantity_check")));
        }

        let ware = tables
            .ware_mut(movement.ware_id)
            .ok_or_else(|| constraint(&format!("{table}_ware_id_fkey")))?;

        // Stock trigger.
        let available = match M::KIND {
            MovementKind::Deposit => ware.available_quantity + movement.quantity,
            MovementKind::Withdraw => ware.available_quantity - movement.quantity,
        };
        if available < 0.0 {
            return Err(constraint("wares_available_quantity_check"));
        }
        ware.available_quantity = available;

        let id = Uuid::new_v4();
        tables.movements.push(MovementRow {
            kind: M::KIND,
            id,
            movement,
            created_at: Utc::now(),
        });
        Ok(id)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<M>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables
            .movements
            .iter()
            .find(|row| row.kind == M::KIND && row.id == id)
            .map(|row| M::from_parts(row.id, row.movement, row.created_at)))
    }

    async fn find(&self, filter: &MovementFilter) -> Result<Vec<M>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables
            .movements
            .iter()
            .filter(|row| row.kind == M::KIND)
            .filter(|row| filter.user_id.map_or(true, |id| row.movement.user_id == id))
            .filter(|row| filter.ware_id.map_or(true, |id| row.movement.ware_id == id))
            .map(|row| M::from_parts(row.id, row.movement, row.created_at))
            .collect())
    }
}
