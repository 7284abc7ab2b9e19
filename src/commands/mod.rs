//! Commands module - CLI command implementations.
//!
//! Each command is implemented in its own module for separation of concerns.

pub mod bootstrap_admin;
pub mod migrate;
pub mod serve;

use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::infra::Database;

/// Connect to the configured store, failing when none is configured.
async fn connect(config: &Config, run_migrations: bool) -> AppResult<Database> {
    let url = config
        .database_url
        .as_deref()
        .ok_or_else(|| AppError::configuration("DATABASE_URL not configured"))?;

    let db = if run_migrations {
        Database::connect(url).await
    } else {
        Database::connect_without_migrations(url).await
    };

    db.map_err(|e| AppError::internal(format!("Database connection failed: {}", e)))
}
