//! # Core Library
//!
//! Configuration, error type, database store and migration binding.

pub mod config;
pub mod error;
pub mod model;

// Re-export commonly used types
pub use config::{Config, Environment};
pub use error::{AppError, ErrorDetail, Result};
pub use model::store::{create_pool, DbPool, Migrate, MigrationStatus};
