//! Preconditions shared by the orchestrators.
//!
//! Each check produces the exact client-facing message for its failure, so
//! handlers never compose messages themselves.

use uuid::Uuid;

use crate::auth::PasswordHasher;
use crate::database::models::{Resource, User};
use crate::services::error::{ServiceError, ServiceResult};

pub const MIN_PASSWORD_LENGTH: usize = 8;

pub const EMAIL_IN_USE: &str = "Email already in use by another user.";
pub const PASSWORD_TOO_SHORT: &str = "Password must have more than 8 characters.";
pub const INVALID_PASSWORD: &str = "Invalid password.";
pub const UNKNOWN_EMAIL: &str = "There is no user with such email";

fn capitalized(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `"There is no ware with such ID"`
pub fn not_found<T: Resource>() -> ServiceError {
    ServiceError::not_found(format!("There is no {} with such ID", T::NAME))
}

pub fn require_found<T: Resource>(record: Option<T>) -> ServiceResult<T> {
    record.ok_or_else(not_found::<T>)
}

/// Whitespace-only names count as missing.
pub fn ensure_named<T: Resource>(name: &str) -> ServiceResult<()> {
    if name.trim().is_empty() {
        return Err(ServiceError::conflict(format!("{} must have a name.", capitalized(T::NAME))));
    }
    Ok(())
}

/// Length is counted in characters, not bytes.
pub fn ensure_password_length(password: &str) -> ServiceResult<()> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(ServiceError::conflict(PASSWORD_TOO_SHORT));
    }
    Ok(())
}

/// `holder` is whoever currently owns the email, if anyone. Ownership by
/// `requester` is allowed.
pub fn ensure_email_available(holder: Option<&User>, requester: Option<Uuid>) -> ServiceResult<()> {
    match holder {
        Some(user) if Some(user.id) != requester => Err(ServiceError::conflict(EMAIL_IN_USE)),
        _ => Ok(()),
    }
}

/// Checks a submitted password against the user's stored hash. An empty
/// submission never matches.
pub async fn verify_password(hasher: &dyn PasswordHasher, user: &User, submitted: &str) -> ServiceResult<()> {
    if submitted.is_empty() {
        return Err(ServiceError::unauthorized(INVALID_PASSWORD));
    }

    let Some(hash) = user.password_hash.as_deref() else {
        return Err(ServiceError::unauthorized(INVALID_PASSWORD));
    };

    if hasher.verify(submitted, hash).await? {
        Ok(())
    } else {
        tracing::warn!(user_id = %user.id, "password mismatch");
        Err(ServiceError::unauthorized(INVALID_PASSWORD))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::Ware;

    fn user(id: Uuid) -> User {
        User {
            id,
            name: "Ada".into(),
            password_hash: None,
            email: "ada@example.com".into(),
            profile_picture_url: None,
        }
    }

    #[test]
    fn not_found_names_the_entity() {
        assert_eq!(not_found::<Ware>().to_string(), "There is no ware with such ID");
        assert_eq!(not_found::<User>().to_string(), "There is no user with such ID");
    }

    #[test]
    fn blank_names_are_conflicts() {
        let err = ensure_named::<Ware>("   ").unwrap_err();
        assert!(matches!(&err, ServiceError::Conflict(m) if m == "Ware must have a name."));
        let err = ensure_named::<User>("").unwrap_err();
        assert_eq!(err.to_string(), "User must have a name.");
        assert!(ensure_named::<User>("Ada").is_ok());
    }

    #[test]
    fn password_length_counts_characters() {
        assert!(ensure_password_length("1234567").is_err());
        assert!(ensure_password_length("12345678").is_ok());
        // seven characters, fourteen bytes
        assert!(ensure_password_length("ééééééé").is_err());
    }

    #[test]
    fn email_owned_by_requester_is_available() {
        let me = Uuid::new_v4();
        let holder = user(me);
        assert!(ensure_email_available(Some(&holder), Some(me)).is_ok());
        assert!(ensure_email_available(Some(&holder), Some(Uuid::new_v4())).is_err());
        assert!(ensure_email_available(Some(&holder), None).is_err());
        assert!(ensure_email_available(None, None).is_ok());
    }
}
