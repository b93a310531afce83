use axum::{
    extract::{rejection::JsonRejection, rejection::QueryRejection, Query, State},
    Extension, Json,
};
use serde::Deserialize;
use uuid::Uuid;

use super::{IdQuery, UserIdQuery};
use crate::database::models::Ware;
use crate::filter::{SortParams, WareFilter};
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::services::{CreateWare, WareService, WareUpdate};

/// `GET /api/wares` filters; every field is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WareListQuery {
    pub user_id: Option<Uuid>,
    pub name: Option<String>,
    pub brand: Option<String>,
}

impl From<WareListQuery> for WareFilter {
    fn from(query: WareListQuery) -> Self {
        WareFilter {
            user_id: query.user_id,
            name: query.name,
            brand: query.brand,
        }
    }
}

/// POST /api/createWare
pub async fn create_ware(
    State(wares): State<WareService>,
    Extension(auth): Extension<AuthUser>,
    body: Result<Json<CreateWare>, JsonRejection>,
) -> ApiResult<Uuid> {
    let Json(request) = body?;
    let id = wares.create(request, auth.user_id).await?;
    Ok(ApiResponse::created(id))
}

/// GET /api/ware?id=
pub async fn get_ware(
    State(wares): State<WareService>,
    query: Result<Query<IdQuery>, QueryRejection>,
) -> ApiResult<Ware> {
    let Query(IdQuery { id }) = query?;
    Ok(ApiResponse::success(wares.get(id).await?))
}

/// GET /api/waresCreatedByUser?userId=&sortBy=&order=
pub async fn wares_by_user(
    State(wares): State<WareService>,
    query: Result<Query<UserIdQuery>, QueryRejection>,
    sort: Result<Query<SortParams>, QueryRejection>,
) -> ApiResult<Vec<Ware>> {
    let Query(UserIdQuery { user_id }) = query?;
    let Query(sort) = sort?;
    Ok(ApiResponse::success(wares.list_by_user(user_id, &sort).await?))
}

/// GET /api/wares?userId=&name=&brand=&sortBy=&order=
pub async fn list_wares(
    State(wares): State<WareService>,
    query: Result<Query<WareListQuery>, QueryRejection>,
    sort: Result<Query<SortParams>, QueryRejection>,
) -> ApiResult<Vec<Ware>> {
    let Query(query) = query?;
    let Query(sort) = sort?;
    let filter = WareFilter::from(query);
    Ok(ApiResponse::success(wares.list(&filter, &sort).await?))
}

/// PUT /api/updateWare?id=
pub async fn update_ware(
    State(wares): State<WareService>,
    query: Result<Query<IdQuery>, QueryRejection>,
    body: Result<Json<WareUpdate>, JsonRejection>,
) -> ApiResult<Uuid> {
    let Query(IdQuery { id }) = query?;
    let Json(update) = body?;
    Ok(ApiResponse::success(wares.update(id, update).await?))
}

/// DELETE /api/deleteWare?id=
pub async fn delete_ware(
    State(wares): State<WareService>,
    query: Result<Query<IdQuery>, QueryRejection>,
) -> ApiResult<Uuid> {
    let Query(IdQuery { id }) = query?;
    Ok(ApiResponse::success(wares.delete(id).await?))
}
