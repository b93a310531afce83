use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

use super::Resource;

/// A user account. `password_hash` is only populated between the store and
/// the orchestrators and is stripped with [`User::redacted`] before output.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "password", skip_serializing_if = "Option::is_none")]
    pub password_hash: Option<String>,
    pub email: String,
    pub profile_picture_url: Option<String>,
}

impl User {
    pub fn redacted(mut self) -> Self {
        self.password_hash = None;
        self
    }
}

impl Resource for User {
    const NAME: &'static str = "user";
    const PLURAL: &'static str = "users";
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub password_hash: String,
    pub email: String,
    pub profile_picture_url: Option<String>,
}

/// Full replacement values for the mutable profile fields.
#[derive(Debug, Clone)]
pub struct UserChanges {
    pub name: String,
    pub email: String,
    pub profile_picture_url: Option<String>,
}
