//! # Environment Variables
//!
//! Utilities for reading environment variables.
//!
//! Unset and empty variables are treated the same: `SECRET_KEY=` in a `.env`
//! file falls back to the default just like a missing key.

use std::env;

/// Get an environment variable, treating an empty value as missing.
pub fn get_env_non_empty(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.is_empty())
}

// endregion: --- Tests
