use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};
use sqlx::PgPool;

use crate::database::DatabaseManager;

/// GET /
pub async fn root() -> Json<Value> {
    Json(json!({
        "name": "Warehouse API",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Warehouse inventory backend: users, wares, deposits and withdraws",
        "endpoints": {
            "public": ["/", "/health", "/api/createUser", "/api/login"],
            "users": "/api/user, /api/updateUser, /api/updatePassword, /api/deleteUser",
            "wares": "/api/createWare, /api/ware, /api/wares, /api/waresCreatedByUser, /api/updateWare, /api/deleteWare",
            "deposits": "/api/createDeposit, /api/deposit, /api/deposits, /api/depositsCreatedByUser, /api/depositsByWareId",
            "withdraws": "/api/createWithdraw, /api/withdraw, /api/withdraws, /api/withdrawsCreatedByUser, /api/withdrawsByWareId",
        }
    }))
}

/// GET /health - reports whether the store is reachable.
pub async fn health(State(pool): State<Option<PgPool>>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    let Some(pool) = pool else {
        return (
            StatusCode::OK,
            Json(json!({ "status": "ok", "timestamp": now, "database": "memory" })),
        );
    };

    match DatabaseManager::health_check(&pool).await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({ "status": "ok", "timestamp": now, "database": "ok" })),
        ),
        Err(e) => {
            tracing::warn!(error = %e, "health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "status": "degraded", "timestamp": now, "database": "unavailable" })),
            )
        }
    }
}
