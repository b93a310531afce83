//! HTTP handlers. Each one extracts its inputs, calls one service method and
//! wraps the outcome; rejections from the JSON and query extractors become
//! 400 responses.

pub mod movements;
pub mod system;
pub mod users;
pub mod wares;

use serde::Deserialize;
use uuid::Uuid;

/// `?id=`
#[derive(Debug, Deserialize)]
pub struct IdQuery {
    pub id: Uuid,
}

/// `?userId=`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserIdQuery {
    pub user_id: Uuid,
}

/// `?wareId=`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WareIdQuery {
    pub ware_id: Uuid,
}
