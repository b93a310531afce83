use axum::{
    extract::{rejection::JsonRejection, rejection::QueryRejection, Query, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use super::UserIdQuery;
use crate::database::models::User;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::{Credentials, PasswordChange, ProfileUpdate, Session, SignUp, UserService};

#[derive(Debug, Deserialize)]
pub struct DeleteUserBody {
    #[serde(default)]
    pub password: String,
}

/// POST /api/createUser
pub async fn create_user(
    State(users): State<UserService>,
    body: Result<Json<SignUp>, JsonRejection>,
) -> ApiResult<Uuid> {
    let Json(request) = body?;
    let id = users.sign_up(request).await?;
    Ok(ApiResponse::created(id))
}

/// POST /api/login
pub async fn login(
    State(users): State<UserService>,
    body: Result<Json<Credentials>, JsonRejection>,
) -> ApiResult<Session> {
    let Json(credentials) = body?;
    let session = users.login(credentials).await?;
    Ok(ApiResponse::success(session))
}

/// GET /api/user?userId=
pub async fn get_user(
    State(users): State<UserService>,
    query: Result<Query<UserIdQuery>, QueryRejection>,
) -> ApiResult<User> {
    let Query(UserIdQuery { user_id }) = query?;
    let user = users.get(user_id).await?;
    Ok(ApiResponse::success(user))
}

/// PUT /api/updateUser?userId=
pub async fn update_user(
    State(users): State<UserService>,
    query: Result<Query<UserIdQuery>, QueryRejection>,
    body: Result<Json<ProfileUpdate>, JsonRejection>,
) -> ApiResult<Uuid> {
    let Query(UserIdQuery { user_id }) = query?;
    let Json(update) = body?;
    let id = users.update(user_id, update).await?;
    Ok(ApiResponse::success(id))
}

/// PUT /api/updatePassword?userId=
pub async fn update_password(
    State(users): State<UserService>,
    query: Result<Query<UserIdQuery>, QueryRejection>,
    body: Result<Json<PasswordChange>, JsonRejection>,
) -> ApiResult<Uuid> {
    let Query(UserIdQuery { user_id }) = query?;
    let Json(change) = body?;
    let id = users.update_password(user_id, change).await?;
    Ok(ApiResponse::success(id))
}

/// DELETE /api/deleteUser?userId=
pub async fn delete_user(
    State(users): State<UserService>,
    query: Result<Query<UserIdQuery>, QueryRejection>,
    body: Result<Json<DeleteUserBody>, JsonRejection>,
) -> ApiResult<Uuid> {
    let Query(UserIdQuery { user_id }) = query?;
    let Json(DeleteUserBody { password }) = body?;
    let id = users.delete(user_id, &password).await?;
    Ok(ApiResponse::success(id))
}
