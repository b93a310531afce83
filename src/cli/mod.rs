use clap::{Parser, Subcommand};
use tracing::info;

use crate::app::{self, AppState, Backend};
use crate::config::AppConfig;
use crate::database::{DatabaseManager, MemoryStore, PgStore};

#[derive(Parser)]
#[command(name = "warehouse-api")]
#[command(about = "Warehouse inventory REST backend")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Run the HTTP server")]
    Serve {
        #[arg(long, help = "Port to listen on (overrides SERVER_PORT)")]
        port: Option<u16>,

        #[arg(long, help = "Keep all data in process memory instead of Postgres")]
        in_memory: bool,
    },

    #[command(about = "Apply database migrations to DATABASE_URL and exit")]
    Migrate,
}

pub async fn run(cli: Cli, mut config: AppConfig) -> anyhow::Result<()> {
    match cli.command {
        Commands::Serve { port, in_memory } => {
            if let Some(port) = port {
                config.server.port = port;
            }
            serve(config, in_memory).await
        }
        Commands::Migrate => {
            let pool = DatabaseManager::connect(&config.database).await?;
            DatabaseManager::migrate(&pool).await?;
            Ok(())
        }
    }
}

async fn serve(config: AppConfig, in_memory: bool) -> anyhow::Result<()> {
    let backend = if in_memory {
        info!("Using the in-memory store; data is lost on exit");
        Backend::Memory(MemoryStore::new())
    } else {
        let pool = DatabaseManager::connect(&config.database).await?;
        if config.database.run_migrations {
            DatabaseManager::migrate(&pool).await?;
        }
        Backend::Postgres(PgStore::new(pool))
    };

    let state = AppState::new(&config, backend)?;
    let router = app::router(state, &config);

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!("Warehouse API listening on http://{}", bind_addr);

    axum::serve(listener, router).await?;
    Ok(())
}
