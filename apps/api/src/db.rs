use std::time::Duration;

use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

use crate::config::Config;

/// Creates the PostgreSQL pool backing the snapshot source, applying the
/// bundled schema first when `RUN_MIGRATIONS=true`.
pub async fn create_pool(config: &Config) -> Result<PgPool> {
    info!(
        "Connecting to PostgreSQL (max {} connections)...",
        config.db_max_connections
    );

    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(5))
        .connect(&config.database_url)
        .await
        .context("Failed to connect to PostgreSQL")?;

    if config.run_migrations {
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .context("Failed to apply database migrations")?;
        info!("Database migrations applied");
    }

    info!("PostgreSQL connection pool established");
    Ok(pool)
}
