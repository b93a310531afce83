pub mod user;
pub mod ware;
pub mod movement;

pub use user::{NewUser, User, UserChanges};
pub use ware::{NewWare, Ware, WareChanges};
pub use movement::{Deposit, Movement, MovementKind, NewMovement, Withdraw};

/// Naming used in client-facing messages about an entity type.
pub trait Resource {
    /// Singular, lowercase: `"ware"`.
    const NAME: &'static str;
    /// Plural, lowercase: `"wares"`.
    const PLURAL: &'static str;
}
