//! # Schema Migrations
//!
//! [`Migrate`] binds a migrations directory to the application. Nothing is
//! read from disk until [`Migrate::upgrade`] or [`Migrate::status`] runs, so
//! an application can be built before its migrations directory exists.
//!
//! Files follow the sqlx naming scheme: `<VERSION>_<DESCRIPTION>.sql`.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use sqlx::migrate::{Migrate as MigrateDatabase, Migrator};
use tracing::info;

use super::DbPool;
use crate::error::{AppError, Result};

/// One known migration and whether the database has applied it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MigrationStatus {
    pub version: i64,
    pub description: String,
    pub applied: bool,
}

/// Migration binding for one application.
#[derive(Clone, Debug)]
pub struct Migrate {
    directory: PathBuf,
}

impl Migrate {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Apply every pending migration and return how many were applied.
    pub async fn upgrade(&self, pool: &DbPool) -> Result<usize> {
        let migrator = self.load().await?;
        let applied = applied_versions(pool).await?;

        let pending = migrator
            .iter()
            .filter(|m| m.migration_type.is_up_migration() && !applied.contains(&m.version))
            .count();

        info!(
            "Running database migrations from: {} ({} pending)",
            self.directory.display(),
            pending
        );
        migrator.run(pool).await?;
        info!("Migrations complete");

        Ok(pending)
    }

    /// List every migration in the directory with its applied state.
    pub async fn status(&self, pool: &DbPool) -> Result<Vec<MigrationStatus>> {
        let migrator = self.load().await?;
        let applied = applied_versions(pool).await?;

        Ok(migrator
            .iter()
            .filter(|m| m.migration_type.is_up_migration())
            .map(|m| MigrationStatus {
                version: m.version,
                description: m.description.to_string(),
                applied: applied.contains(&m.version),
            })
            .collect())
    }

    async fn load(&self) -> Result<Migrator> {
        if !self.directory.is_dir() {
            return Err(AppError::Migration(format!(
                "Migrations directory not found: {}",
                self.directory.display()
            )));
        }
        Ok(Migrator::new(self.directory.as_path()).await?)
    }
}

async fn applied_versions(pool: &DbPool) -> Result<HashSet<i64>> {
    let mut conn = pool.acquire().await?;
    conn.ensure_migrations_table().await?;

    Ok(conn
        .list_applied_migrations()
        .await?
        .into_iter()
        .map(|m| m.version)
        .collect())
}

// region: --- Tests
#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::store::create_pool;

    struct Scratch {
        root: PathBuf,
    }

    impl Scratch {
        fn new() -> Self {
            let root = std::env::temp_dir().join(format!("lib-core-migrate-{}", uuid::Uuid::new_v4()));
            std::fs::create_dir_all(root.join("migrations")).expect("scratch dir");
            Self { root }
        }

        fn migrations(&self) -> PathBuf {
            self.root.join("migrations")
        }

        fn write_migration(&self, file_name: &str, sql: &str) {
            std::fs::write(self.migrations().join(file_name), sql).expect("write migration");
        }

        async fn pool(&self) -> DbPool {
            let url = format!("sqlite:{}", self.root.join("test.db").display());
            create_pool(&url).await.expect("test pool")
        }
    }

    impl Drop for Scratch {
        fn drop(&mut self) {
            let _ = std::fs::remove_dir_all(&self.root);
        }
    }

    #[tokio::test]
    async fn test_upgrade_applies_pending_once() {
        let scratch = Scratch::new();
        scratch.write_migration(
            "20240101000000_create_notes.sql",
            "CREATE TABLE notes (id INTEGER PRIMARY KEY, body TEXT NOT NULL);",
        );
        let pool = scratch.pool().await;
        let migrate = Migrate::new(scratch.migrations());

        assert_eq!(migrate.upgrade(&pool).await.unwrap(), 1);
        assert_eq!(migrate.upgrade(&pool).await.unwrap(), 0);

        sqlx::query("INSERT INTO notes (body) VALUES ('hello')")
            .execute(&pool)
            .await
            .expect("table created by migration");
    }

    #[tokio::test]
    async fn test_status_reports_applied_state() {
        let scratch = Scratch::new();
        scratch.write_migration("20240101000000_first.sql", "CREATE TABLE a (id INTEGER);");
        let pool = scratch.pool().await;
        let migrate = Migrate::new(scratch.migrations());

        let before = migrate.status(&pool).await.unwrap();
        assert_eq!(
            before,
            vec![MigrationStatus {
                version: 20240101000000,
                description: "first".to_string(),
                applied: false,
            }]
        );

        migrate.upgrade(&pool).await.unwrap();
        scratch.write_migration("20240201000000_second.sql", "CREATE TABLE b (id INTEGER);");

        let after = migrate.status(&pool).await.unwrap();
        assert_eq!(after.len(), 2);
        assert!(after[0].applied);
        assert!(!after[1].applied);
    }

    #[tokio::test]
    async fn test_empty_directory_has_nothing_to_apply() {
        let scratch = Scratch::new();
        let pool = scratch.pool().await;
        let migrate = Migrate::new(scratch.migrations());

        assert_eq!(migrate.upgrade(&pool).await.unwrap(), 0);
        assert!(migrate.status(&pool).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_directory_is_a_migration_error() {
        let scratch = Scratch::new();
        let pool = scratch.pool().await;
        let migrate = Migrate::new(scratch.root.join("does-not-exist"));

        let err = migrate.upgrade(&pool).await.unwrap_err();
        assert!(matches!(err, AppError::Migration(_)));
    }
}
// endregion: --- Tests
