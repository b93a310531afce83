use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::{Movement, NewMovement, NewUser, NewWare, User, UserChanges, Ware, WareChanges};
use crate::database::repository::{MovementRepository, UserRepository, WareRepository};
use crate::filter::{MovementFilter, WareFilter};

const USER_COLUMNS: &str = "id, name, password_hash, email, profile_picture_url";

const WARE_COLUMNS: &str = "id, user_id, name, brand, description, weight_per_unit, weight_unit, \
     total_quantity, available_quantity, quantity_unit, location, created_at";

const MOVEMENT_COLUMNS: &str = "id, user_id, ware_id, quantity, created_at";

/// Postgres implementation of every repository port.
///
/// `wares.available_quantity` is maintained by the triggers installed in
/// `migrations/`, so movement inserts here are plain inserts.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl UserRepository for PgStore {
    async fn insert(&self, user: NewUser) -> Result<Uuid, DatabaseError> {
        let id = Uuid::new_v4();
        sqlx::query(
            "INSERT INTO users (id, name, password_hash, email, profile_picture_url)
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(id)
        .bind(&user.name)
        .bind(&user.password_hash)
        .bind(&user.email)
        .bind(&user.profile_picture_url)
        .execute(&self.pool)
        .await?;

        Ok(id)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DatabaseError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1");
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    async fn update(&self, id: Uuid, changes: UserChanges) -> Result<(), DatabaseError> {
        sqlx::query("UPDATE users SET name = $2, email = $3, profile_picture_url = $4 WHERE id = $1")
            .bind(id)
            .bind(&changes.name)
            .bind(&changes.email)
            .bind(&changes.profile_picture_url)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn update_password(&self, id: Uuid, password_hash: String) -> Result<(), DatabaseError> {
        sqlx::query("UPDATE users SET password_hash = $2 WHERE id = $1")
            .bind(id)
            .bind(password_hash)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), DatabaseError> {
        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

#[async_trait]
impl WareRepository for PgStore {
    async fn insert(&self, ware: NewWare) -> Result<Uuid, DatabaseError> {
        let id = Uuid::new_v4();
        sqlx::query(
            "INSERT INTO wares (id, user_id, name, brand, description, weight_per_unit, weight_unit,
                                total_quantity, available_quantity, quantity_unit, location)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)",
        )
        .bind(id)
        .bind(ware.user_id)
        .bind(&ware.name)
        .bind(&ware.brand)
        .bind(&ware.description)
        .bind(ware.weight_per_unit)
        .bind(&ware.weight_unit)
        .bind(ware.total_quantity)
        .bind(ware.available_quantity)
        .bind(&ware.quantity_unit)
        .bind(&ware.location)
        .execute(&self.pool)
        .await?;

        Ok(id)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Ware>, DatabaseError> {
        let sql = format!("SELECT {WARE_COLUMNS} FROM wares WHERE id = $1");
        let ware = sqlx::query_as::<_, Ware>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(ware)
    }

    async fn find(&self, filter: &WareFilter) -> Result<Vec<Ware>, DatabaseError> {
        let mut query = QueryBuilder::<Postgres>::new(format!("SELECT {WARE_COLUMNS} FROM wares WHERE TRUE"));
        if let Some(user_id) = filter.user_id {
            query.push(" AND user_id = ").push_bind(user_id);
        }
        if let Some(name) = &filter.name {
            query.push(" AND name = ").push_bind(name.clone());
        }
        if let Some(brand) = &filter.brand {
            query.push(" AND brand = ").push_bind(brand.clone());
        }
        query.push(" ORDER BY created_at, id");

        let wares = query.build_query_as::<Ware>().fetch_all(&self.pool).await?;
        Ok(wares)
    }

    async fn update(&self, id: Uuid, changes: WareChanges) -> Result<(), DatabaseError> {
        sqlx::query(
            "UPDATE wares SET name = $2, brand = $3, description = $4, weight_per_unit = $5,
                              weight_unit = $6, total_quantity = $7, quantity_unit = $8, location = $9
             WHERE id = $1",
        )
        .bind(id)
        .bind(&changes.name)
        .bind(&changes.brand)
        .bind(&changes.description)
        .bind(changes.weight_per_unit)
        .bind(&changes.weight_unit)
        .bind(changes.total_quantity)
        .bind(&changes.quantity_unit)
        .bind(&changes.location)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), DatabaseError> {
        sqlx::query("DELETE FROM wares WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

#[async_trait]
impl<M: Movement> MovementRepository<M> for PgStore {
    async fn insert(&self, movement: NewMovement) -> Result<Uuid, DatabaseError> {
        let id = Uuid::new_v4();
        let sql = format!(
            "INSERT INTO {} (id, user_id, ware_id, quantity) VALUES ($1, $2, $3, $4)",
            M::KIND.table()
        );
        sqlx::query(&sql)
            .bind(id)
            .bind(movement.user_id)
            .bind(movement.ware_id)
            .bind(movement.quantity)
            .execute(&self.pool)
            .await?;

        Ok(id)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<M>, DatabaseError> {
        let sql = format!("SELECT {MOVEMENT_COLUMNS} FROM {} WHERE id = $1", M::KIND.table());
        let movement = sqlx::query_as::<_, M>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(movement)
    }

    async fn find(&self, filter: &MovementFilter) -> Result<Vec<M>, DatabaseError> {
        let mut query = QueryBuilder::<Postgres>::new(format!(
            "SELECT {MOVEMENT_COLUMNS} FROM {} WHERE TRUE",
            M::KIND.table()
        ));
        if let Some(user_id) = filter.user_id {
            query.push(" AND user_id = ").push_bind(user_id);
        }
        if let Some(ware_id) = filter.ware_id {
            query.push(" AND ware_id = ").push_bind(ware_id);
        }
        query.push(" ORDER BY created_at, id");

        let movements = query.build_query_as::<M>().fetch_all(&self.pool).await?;
        Ok(movements)
    }
}
