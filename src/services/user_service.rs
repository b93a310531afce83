//! Account orchestration: sign-up, login, profile and password changes.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::auth::{PasswordHasher, TokenIssuer};
use crate::database::models::{NewUser, User, UserChanges};
use crate::database::{DatabaseError, UserRepository};
use crate::services::error::{ServiceError, ServiceResult};
use crate::services::rules::{self, EMAIL_IN_USE, UNKNOWN_EMAIL};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUp {
    pub user_name: String,
    pub password: String,
    pub email: String,
    #[serde(default)]
    pub profile_picture_url: Option<String>,
}

/// Profile edit. Omitted fields keep their stored value; `password` is the
/// current password and is always required.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub profile_picture_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordChange {
    #[serde(default)]
    pub password: String,
    pub new_password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Credentials {
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub token: String,
    pub user_id: Uuid,
    pub expires_in: u64,
}

#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: TokenIssuer,
}

/// Only one unique constraint exists on users, so a constraint failure on a
/// user write is a lost race on the email.
fn email_race(err: DatabaseError) -> ServiceError {
    match err {
        DatabaseError::Constraint(_) => ServiceError::conflict(EMAIL_IN_USE),
        other => other.into(),
    }
}

impl UserService {
    pub fn new(users: Arc<dyn UserRepository>, hasher: Arc<dyn PasswordHasher>, tokens: TokenIssuer) -> Self {
        Self { users, hasher, tokens }
    }

    async fn existing(&self, id: Uuid) -> ServiceResult<User> {
        rules::require_found(self.users.find_by_id(id).await?)
    }

    pub async fn sign_up(&self, request: SignUp) -> ServiceResult<Uuid> {
        let holder = self.users.find_by_email(&request.email).await?;
        rules::ensure_email_available(holder.as_ref(), None)?;
        rules::ensure_named::<User>(&request.user_name)?;
        rules::ensure_password_length(&request.password)?;

        let password_hash = self.hasher.hash(&request.password).await?;
        let id = self
            .users
            .insert(NewUser {
                name: request.user_name,
                password_hash,
                email: request.email,
                profile_picture_url: request.profile_picture_url,
            })
            .await
            .map_err(email_race)?;

        info!(user_id = %id, "user created");
        Ok(id)
    }

    pub async fn login(&self, credentials: Credentials) -> ServiceResult<Session> {
        let user = self
            .users
            .find_by_email(&credentials.email)
            .await?
            .ok_or_else(|| ServiceError::not_found(UNKNOWN_EMAIL))?;

        rules::verify_password(self.hasher.as_ref(), &user, &credentials.password).await?;

        let token = self.tokens.issue(user.id)?;
        info!(user_id = %user.id, "session issued");

        Ok(Session {
            token,
            user_id: user.id,
            expires_in: self.tokens.expires_in(),
        })
    }

    /// The returned user never carries its password hash.
    pub async fn get(&self, id: Uuid) -> ServiceResult<User> {
        Ok(self.existing(id).await?.redacted())
    }

    pub async fn update(&self, id: Uuid, update: ProfileUpdate) -> ServiceResult<Uuid> {
        let user = self.existing(id).await?;

        if let Some(email) = &update.email {
            let holder = self.users.find_by_email(email).await?;
            rules::ensure_email_available(holder.as_ref(), Some(id))?;
        }
        if let Some(name) = &update.user_name {
            rules::ensure_named::<User>(name)?;
        }
        rules::verify_password(self.hasher.as_ref(), &user, &update.password).await?;

        let changes = UserChanges {
            name: update.user_name.unwrap_or(user.name),
            email: update.email.unwrap_or(user.email),
            profile_picture_url: update.profile_picture_url.or(user.profile_picture_url),
        };
        self.users.update(id, changes).await.map_err(email_race)?;

        info!(user_id = %id, "user updated");
        Ok(id)
    }

    pub async fn update_password(&self, id: Uuid, change: PasswordChange) -> ServiceResult<Uuid> {
        let user = self.existing(id).await?;
        rules::verify_password(self.hasher.as_ref(), &user, &change.password).await?;
        rules::ensure_password_length(&change.new_password)?;

        let password_hash = self.hasher.hash(&change.new_password).await?;
        self.users.update_password(id, password_hash).await?;

        info!(user_id = %id, "password changed");
        Ok(id)
    }

    /// Removes the user together with their wares and movements.
    pub async fn delete(&self, id: Uuid, password: &str) -> ServiceResult<Uuid> {
        let user = self.existing(id).await?;
        rules::verify_password(self.hasher.as_ref(), &user, password).await?;

        self.users.delete(id).await?;

        info!(user_id = %id, "user deleted");
        Ok(id)
    }
}
