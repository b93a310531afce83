pub mod password;
pub mod token;

pub use password::{Argon2PasswordHasher, PasswordError, PasswordHasher};
pub use token::{Claims, JwtError, TokenIssuer};
