//! # Database Store
//!
//! Connection pool creation and the migration binding.

// region: --- Modules
pub mod migrate;
// endregion: --- Modules

// region: --- Re-exports
pub use migrate::{Migrate, MigrationStatus};
// endregion: --- Re-exports

// region: --- Types and Functions
use std::path::Path;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use tracing::info;

use crate::error::{AppError, Result};

/// Type alias for SQLite connection pool.
pub type DbPool = SqlitePool;

const MAX_CONNECTIONS: u32 = 5;

/// Create a new SQLite connection pool for `database_url`.
///
/// The parent directory of a file-backed database is created when missing,
/// and the database file itself is created on first connect.
pub async fn create_pool(database_url: &str) -> Result<DbPool> {
    if database_url.is_empty() {
        return Err(AppError::Config(
            "No database URL configured (set DATABASE_URL)".to_string(),
        ));
    }

    let options = database_url
        .parse::<SqliteConnectOptions>()
        .map_err(|e| AppError::Config(format!("Invalid database URL '{database_url}': {e}")))?
        .create_if_missing(true);

    if let Some(db_path) = database_file(&options) {
        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            if !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    AppError::Database(format!("Cannot create {}: {e}", parent.display()))
                })?;
                info!("Created database directory: {:?}", parent);
            }
        }
    }

    info!("Connecting to database (max_connections={})", MAX_CONNECTIONS);
    let pool = SqlitePoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .connect_with(options)
        .await?;

    Ok(pool)
}

/// File backing the database, `None` for in-memory databases.
///
/// sqlx names in-memory databases with a `file:` URI.
fn database_file(options: &SqliteConnectOptions) -> Option<&Path> {
    let path = options.get_filename();
    let name = path.to_string_lossy();

    if name.is_empty() || name == ":memory:" || name.starts_with("file:") {
        return None;
    }
    Some(path)
}
// endregion: --- Types and Functions

// endregion: --- Tests
