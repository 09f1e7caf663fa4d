//! # Utilities Library
//!
//! Shared helpers for reading environment variables.

pub mod envs;

// Re-export commonly used functions
pub use envs::get_env_non_empty;
