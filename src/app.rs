//! Composition root: builds services over a store and wires the router.

use std::sync::Arc;

use axum::{
    extract::{DefaultBodyLimit, FromRef},
    http::HeaderValue,
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use sqlx::PgPool;
use thiserror::Error;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::auth::{Argon2PasswordHasher, JwtError, PasswordError, PasswordHasher, TokenIssuer};
use crate::config::{AppConfig, SecurityConfig};
use crate::database::models::{Deposit, Withdraw};
use crate::database::{MemoryStore, MovementRepository, PgStore, UserRepository, WareRepository};
use crate::handlers::{movements, system, users, wares};
use crate::middleware::jwt_auth_middleware;
use crate::services::{MovementService, UserService, WareService};

#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Password(#[from] PasswordError),

    #[error(transparent)]
    Jwt(#[from] JwtError),
}

/// Where the repositories live.
#[derive(Clone)]
pub enum Backend {
    Postgres(PgStore),
    Memory(MemoryStore),
}

#[derive(Clone)]
pub struct AppState {
    pub users: UserService,
    pub wares: WareService,
    pub deposits: MovementService<Deposit>,
    pub withdraws: MovementService<Withdraw>,
    pub tokens: TokenIssuer,
    /// `None` for the in-memory backend.
    pub pool: Option<PgPool>,
}

impl AppState {
    pub fn new(config: &AppConfig, backend: Backend) -> Result<Self, StartupError> {
        let hasher: Arc<dyn PasswordHasher> = Arc::new(Argon2PasswordHasher::from_config(&config.security)?);
        let tokens = TokenIssuer::from_config(&config.security)?;

        let state = match backend {
            Backend::Postgres(store) => {
                let pool = store.pool().clone();
                Self::over(store, hasher, tokens, Some(pool))
            }
            Backend::Memory(store) => Self::over(store, hasher, tokens, None),
        };
        Ok(state)
    }

    fn over<S>(store: S, hasher: Arc<dyn PasswordHasher>, tokens: TokenIssuer, pool: Option<PgPool>) -> Self
    where
        S: UserRepository
            + WareRepository
            + MovementRepository<Deposit>
            + MovementRepository<Withdraw>
            + Clone
            + 'static,
    {
        Self {
            users: UserService::new(Arc::new(store.clone()), hasher, tokens.clone()),
            wares: WareService::new(Arc::new(store.clone())),
            deposits: MovementService::new(Arc::new(store.clone())),
            withdraws: MovementService::new(Arc::new(store)),
            tokens,
            pool,
        }
    }
}

impl FromRef<AppState> for UserService {
    fn from_ref(state: &AppState) -> Self {
        state.users.clone()
    }
}

impl FromRef<AppState> for WareService {
    fn from_ref(state: &AppState) -> Self {
        state.wares.clone()
    }
}

impl FromRef<AppState> for MovementService<Deposit> {
    fn from_ref(state: &AppState) -> Self {
        state.deposits.clone()
    }
}

impl FromRef<AppState> for MovementService<Withdraw> {
    fn from_ref(state: &AppState) -> Self {
        state.withdraws.clone()
    }
}

impl FromRef<AppState> for TokenIssuer {
    fn from_ref(state: &AppState) -> Self {
        state.tokens.clone()
    }
}

impl FromRef<AppState> for Option<PgPool> {
    fn from_ref(state: &AppState) -> Self {
        state.pool.clone()
    }
}

pub fn router(state: AppState, config: &AppConfig) -> Router {
    let app = Router::new()
        // Public
        .route("/", get(system::root))
        .route("/health", get(system::health))
        .route("/api/createUser", post(users::create_user))
        .route("/api/login", post(users::login))
        // Protected API
        .merge(protected_routes(state.clone()))
        .layer(
            ServiceBuilder::new()
                .layer(DefaultBodyLimit::max(config.api.max_request_size_bytes))
                .layer(TimeoutLayer::new(config.request_timeout())),
        );

    let app = if config.security.enable_cors {
        app.layer(cors_layer(&config.security))
    } else {
        app
    };

    let app = if config.api.enable_request_logging {
        app.layer(TraceLayer::new_for_http())
    } else {
        app
    };

    app.with_state(state)
}

fn protected_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .merge(user_routes())
        .merge(ware_routes())
        .merge(deposit_routes())
        .merge(withdraw_routes())
        .route_layer(middleware::from_fn_with_state(state, jwt_auth_middleware))
}

fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/api/user", get(users::get_user))
        .route("/api/updateUser", put(users::update_user))
        .route("/api/updatePassword", put(users::update_password))
        .route("/api/deleteUser", delete(users::delete_user))
}

fn ware_routes() -> Router<AppState> {
    Router::new()
        .route("/api/createWare", post(wares::create_ware))
        .route("/api/ware", get(wares::get_ware))
        .route("/api/waresCreatedByUser", get(wares::wares_by_user))
        .route("/api/wares", get(wares::list_wares))
        .route("/api/updateWare", put(wares::update_ware))
        .route("/api/deleteWare", delete(wares::delete_ware))
}

fn deposit_routes() -> Router<AppState> {
    Router::new()
        .route("/api/createDeposit", post(movements::create::<Deposit>))
        .route("/api/deposit", get(movements::get::<Deposit>))
        .route("/api/depositsCreatedByUser", get(movements::by_user::<Deposit>))
        .route("/api/depositsByWareId", get(movements::by_ware::<Deposit>))
        .route("/api/deposits", get(movements::list::<Deposit>))
}

fn withdraw_routes() -> Router<AppState> {
    Router::new()
        .route("/api/createWithdraw", post(movements::create::<Withdraw>))
        .route("/api/withdraw", get(movements::get::<Withdraw>))
        .route("/api/withdrawsCreatedByUser", get(movements::by_user::<Withdraw>))
        .route("/api/withdrawsByWareId", get(movements::by_ware::<Withdraw>))
        .route("/api/withdraws", get(movements::list::<Withdraw>))
}

fn cors_layer(security: &SecurityConfig) -> CorsLayer {
    if security.cors_origins.iter().any(|origin| origin == "*") {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(tower_http::cors::Any)
        .allow_headers(tower_http::cors::Any)
}
