#![allow(dead_code)]

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::{header, Client, StatusCode};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use uuid::Uuid;

use warehouse_api::app::{self, AppState, Backend};
use warehouse_api::config::{AppConfig, Environment};
use warehouse_api::database::{DatabaseManager, MemoryStore, PgStore};

pub const PASSWORD: &str = "password123";

/// Router served in-process over an in-memory or Postgres store.
pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    pub client: Client,
}

impl TestServer {
    /// Serves a fresh, empty in-memory store.
    pub async fn spawn() -> Result<Self> {
        let config = Self::config()?;
        Self::serve(config, Backend::Memory(MemoryStore::new())).await
    }

    /// Serves the database named by `DATABASE_URL` after migrating it, or
    /// returns `None` when the variable is unset. The database is shared
    /// between tests, so callers must use [`unique_email`] for their users.
    pub async fn spawn_postgres() -> Result<Option<Self>> {
        let Ok(url) = std::env::var("DATABASE_URL") else {
            eprintln!("DATABASE_URL not set, skipping Postgres-backed test");
            return Ok(None);
        };

        let mut config = Self::config()?;
        config.database.url = Some(url);
        config.database.max_connections = 5;

        let pool = DatabaseManager::connect(&config.database).await?;
        DatabaseManager::migrate(&pool).await?;
        let server = Self::serve(config, Backend::Postgres(PgStore::new(pool))).await?;
        Ok(Some(server))
    }

    fn config() -> Result<AppConfig> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;

        let mut config = AppConfig::for_environment(Environment::Development);
        config.server.host = "127.0.0.1".to_string();
        config.server.port = port;
        config.security.jwt_secret = "integration-test-secret".to_string();
        config.security.argon2_memory_kib = 1024;
        config.security.argon2_iterations = 1;
        config.api.enable_request_logging = false;
        Ok(config)
    }

    async fn serve(config: AppConfig, backend: Backend) -> Result<Self> {
        let port = config.server.port;
        let base_url = format!("http://127.0.0.1:{}", port);

        let state = AppState::new(&config, backend)?;
        let router = app::router(state, &config);
        let listener = TcpListener::bind(config.bind_addr()).await?;
        tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });

        let server = Self { port, base_url, client: Client::new() };
        server.wait_ready(Duration::from_secs(5)).await?;
        Ok(server)
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let deadline = Instant::now() + timeout;
        while Instant::now() < deadline {
            if let Ok(resp) = self.client.get(self.url("/health")).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Creates a user and returns its id.
    pub async fn sign_up(&self, email: &str) -> Result<String> {
        let res = self
            .client
            .post(self.url("/api/createUser"))
            .json(&json!({ "userName": "Ada", "password": PASSWORD, "email": email }))
            .send()
            .await?;
        anyhow::ensure!(res.status() == StatusCode::CREATED, "sign-up failed: {}", res.status());
        Ok(res.json::<String>().await?)
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<String> {
        let res = self
            .client
            .post(self.url("/api/login"))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;
        anyhow::ensure!(res.status() == StatusCode::OK, "login failed: {}", res.status());
        let body: Value = res.json().await?;
        body["token"]
            .as_str()
            .map(str::to_string)
            .context("login response has no token")
    }

    /// Signs up a fresh user and returns `(user_id, client sending its bearer token)`.
    pub async fn authorized_user(&self, email: &str) -> Result<(String, Client)> {
        let user_id = self.sign_up(email).await?;
        let token = self.login(email, PASSWORD).await?;

        let mut headers = header::HeaderMap::new();
        headers.insert(header::AUTHORIZATION, format!("Bearer {token}").parse()?);
        let client = Client::builder().default_headers(headers).build()?;
        Ok((user_id, client))
    }

    pub async fn create_ware(&self, client: &Client, name: &str, available: f64) -> Result<String> {
        let res = client
            .post(self.url("/api/createWare"))
            .json(&json!({
                "name": name,
                "brand": "Acme",
                "weightPerUnit": 0.5,
                "weightUnit": "kg",
                "totalQuantity": 1000.0,
                "availableQuantity": available,
                "location": "A1"
            }))
            .send()
            .await?;
        anyhow::ensure!(res.status() == StatusCode::CREATED, "createWare failed: {}", res.status());
        Ok(res.json::<String>().await?)
    }
}

/// Address no other test run will have registered.
pub fn unique_email(prefix: &str) -> String {
    format!("{prefix}-{}@example.com", Uuid::new_v4().simple())
}
