//! Use-case orchestrators.
//!
//! One method per external action. Each runs its precondition chain from
//! [`rules`], calls the repository port, and for list actions hands the
//! result to [`listing`].

pub mod error;
pub mod listing;
pub mod movement_service;
pub mod rules;
pub mod user_service;
pub mod ware_service;

pub use error::{ServiceError, ServiceResult, CONSTRAINT_MESSAGE};
pub use listing::ListScope;
pub use movement_service::{CreateMovement, MovementService};
pub use user_service::{Credentials, PasswordChange, ProfileUpdate, Session, SignUp, UserService};
pub use ware_service::{CreateWare, WareService, WareUpdate};
