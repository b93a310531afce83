//! Deposit and withdraw handlers, instantiated per kind in the router
//! (`movements::create::<Deposit>`).

use axum::{
    extract::{rejection::JsonRejection, rejection::QueryRejection, FromRef, Query, State},
    Extension, Json,
};
use serde::Deserialize;
use uuid::Uuid;

use super::{IdQuery, UserIdQuery, WareIdQuery};
use crate::app::AppState;
use crate::database::models::Movement;
use crate::filter::{MovementFilter, SortParams};
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::services::{CreateMovement, MovementService};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovementListQuery {
    pub user_id: Option<Uuid>,
    pub ware_id: Option<Uuid>,
}

/// POST /api/createDeposit, /api/createWithdraw
pub async fn create<M>(
    State(service): State<MovementService<M>>,
    Extension(auth): Extension<AuthUser>,
    body: Result<Json<CreateMovement>, JsonRejection>,
) -> ApiResult<Uuid>
where
    M: Movement,
    MovementService<M>: FromRef<AppState>,
{
    let Json(request) = body?;
    let id = service.create(request, auth.user_id).await?;
    Ok(ApiResponse::created(id))
}

/// GET /api/deposit?id=, /api/withdraw?id=
pub async fn get<M>(
    State(service): State<MovementService<M>>,
    query: Result<Query<IdQuery>, QueryRejection>,
) -> ApiResult<M>
where
    M: Movement,
    MovementService<M>: FromRef<AppState>,
{
    let Query(IdQuery { id }) = query?;
    Ok(ApiResponse::success(service.get(id).await?))
}

/// GET /api/depositsCreatedByUser?userId=, /api/withdrawsCreatedByUser?userId=
pub async fn by_user<M>(
    State(service): State<MovementService<M>>,
    query: Result<Query<UserIdQuery>, QueryRejection>,
    sort: Result<Query<SortParams>, QueryRejection>,
) -> ApiResult<Vec<M>>
where
    M: Movement,
    MovementService<M>: FromRef<AppState>,
{
    let Query(UserIdQuery { user_id }) = query?;
    let Query(sort) = sort?;
    Ok(ApiResponse::success(service.list_by_user(user_id, &sort).await?))
}

/// GET /api/depositsByWareId?wareId=, /api/withdrawsByWareId?wareId=
pub async fn by_ware<M>(
    State(service): State<MovementService<M>>,
    query: Result<Query<WareIdQuery>, QueryRejection>,
    sort: Result<Query<SortParams>, QueryRejection>,
) -> ApiResult<Vec<M>>
where
    M: Movement,
    MovementService<M>: FromRef<AppState>,
{
    let Query(WareIdQuery { ware_id }) = query?;
    let Query(sort) = sort?;
    Ok(ApiResponse::success(service.list_by_ware(ware_id, &sort).await?))
}

/// GET /api/deposits?userId=&wareId=, /api/withdraws?userId=&wareId=
pub async fn list<M>(
    State(service): State<MovementService<M>>,
    query: Result<Query<MovementListQuery>, QueryRejection>,
    sort: Result<Query<SortParams>, QueryRejection>,
) -> ApiResult<Vec<M>>
where
    M: Movement,
    MovementService<M>: FromRef<AppState>,
{
    let Query(MovementListQuery { user_id, ware_id }) = query?;
    let Query(sort) = sort?;
    let filter = MovementFilter { user_id, ware_id };
    Ok(ApiResponse::success(service.list(&filter, &sort).await?))
}
