pub mod manager;
pub mod repository;
pub mod postgres;
pub mod memory;
pub mod models;

pub use manager::{DatabaseError, DatabaseManager};
pub use memory::MemoryStore;
pub use postgres::PgStore;
pub use repository::{MovementRepository, UserRepository, WareRepository};
