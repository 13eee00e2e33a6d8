//! `pets-service` CLI entry-point.
//!
//! Available sub-commands:
//! - `serve`    — start the API server.
//! - `migrate`  — run pending database migrations.

use std::sync::Arc;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use api::{AppState, ServerConfig};
use db::{MemoryStore, PgStore};
use service::PetService;

#[derive(Parser)]
#[command(name = "pets-service", about = "CRUD service for pet records", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

/// Which store backend to run against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum StoreKind {
    Postgres,
    /// Non-durable; data is lost on exit.
    Memory,
}

#[derive(Subcommand)]
enum Command {
    /// Start the REST API server.
    Serve {
        #[arg(long, env = "PETS_BIND", default_value = "0.0.0.0:8080")]
        bind: String,
        #[arg(long, env = "PETS_STORE", value_enum, default_value_t = StoreKind::Postgres)]
        store: StoreKind,
        #[arg(long, env = "DATABASE_URL")]
        database_url: Option<String>,
        #[arg(long, default_value_t = 10)]
        max_connections: u32,
        /// Run migrations before serving (postgres only).
        #[arg(long)]
        migrate: bool,
        /// Allowed CORS origin; repeat for several.
        #[arg(long = "cors-origin", env = "PETS_CORS_ORIGINS", value_delimiter = ',')]
        cors_origins: Vec<String>,
    },
    /// Run pending database migrations.
    Migrate {
        #[arg(long, env = "DATABASE_URL")]
        database_url: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve {
            bind,
            store,
            database_url,
            max_connections,
            migrate,
            cors_origins,
        } => {
            let service = match store {
                StoreKind::Postgres => {
                    let Some(database_url) = database_url else {
                        bail!("--database-url (or DATABASE_URL) is required with --store postgres");
                    };
                    let pg = PgStore::connect(&database_url, max_connections)
                        .await
                        .context("failed to connect to database")?;
                    if migrate {
                        pg.migrate().await.context("migration failed")?;
                    }
                    let pg = Arc::new(pg);
                    PetService::new(pg.clone(), pg)
                }
                StoreKind::Memory => {
                    if migrate {
                        warn!("--migrate has no effect with the memory store");
                    }
                    let memory = Arc::new(MemoryStore::new());
                    PetService::new(memory.clone(), memory)
                }
            };

            let config = ServerConfig {
                cors_origins,
                ..ServerConfig::with_bind(bind)
            };
            info!("Starting API server on {} ({:?} store)", config.bind, store);
            api::serve(&config, AppState::new(service))
                .await
                .context("server error")?;
        }
        Command::Migrate { database_url } => {
            info!("Running migrations");
            PgStore::connect(&database_url, 2)
                .await
                .context("failed to connect to database")?
                .migrate()
                .await
                .context("migration failed")?;
            info!("Migrations applied successfully");
        }
    }

    Ok(())
}
