use std::sync::Arc;

use anyhow::Result;
use sqlx::migrate::Migrator;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod cart;
mod config;
mod error;
mod extract;
mod models;
mod repositories;
mod routes;
mod state;
mod validation;

use common::database::{DatabaseConfig, health_check, init_pool, run_migrations};

use crate::{
    config::AppConfig,
    repositories::{PgCartItemRepository, PgProductRepository, PgUserRepository},
    state::AppState,
};

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load()?;

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .init();

    info!("Starting shopping cart service");

    // Initialize database connection pool
    let db_config = DatabaseConfig::from_env()?;
    let pool = init_pool(&db_config).await?;

    // Check database connectivity
    if health_check(&pool).await? {
        info!("Database connection successful");
    } else {
        anyhow::bail!("Failed to connect to database");
    }

    if config.run_migrations {
        run_migrations(&pool, &MIGRATOR).await?;
    }

    // Initialize repositories
    let app_state = AppState::new(
        Arc::new(PgUserRepository::new(pool.clone())),
        Arc::new(PgProductRepository::new(pool.clone())),
        Arc::new(PgCartItemRepository::new(pool)),
    );

    // Start the web server
    let app = routes::create_router(app_state);

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    info!("Shopping cart service listening on {}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shopping cart service stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
