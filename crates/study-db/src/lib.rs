//! # Study DB
//!
//! PostgreSQL pool initialization and the embedded schema migrator.
//!
//! # Example
//!
//! ```ignore
//! use study_config::DatabaseConfig;
//! use study_db::{init_db_pool, run_migrations};
//!
//! #[tokio::main]
//! async fn main() {
//!     let pool = init_db_pool(&DatabaseConfig::from_env()).await;
//!     run_migrations(&pool).await.expect("migrations failed");
//! }
//! ```

use sqlx::migrate::{MigrateError, Migrator};
use sqlx::postgres::PgPoolOptions;
use study_config::DatabaseConfig;

pub use sqlx::PgPool;

/// Schema migrations under the workspace `migrations/` directory.
pub static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

/// Initializes a PostgreSQL connection pool.
///
/// # Panics
///
/// Panics if the connection to the database cannot be established.
pub async fn init_db_pool(config: &DatabaseConfig) -> PgPool {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.url)
        .await
        .expect("Failed to connect to database")
}

pub async fn run_migrations(pool: &PgPool) -> Result<(), MigrateError> {
    MIGRATOR.run(pool).await?;
    tracing::info!("Database migrations applied");
    Ok(())
}
