//! # Application Configuration
//!
//! Selects a configuration profile by name and fills it from environment
//! variables.
//!
//! ## Profiles
//!
//! | Name          | Debug | Database URL                          |
//! |---------------|-------|---------------------------------------|
//! | `development` | true  | `DATABASE_URL` or `sqlite:dev.db`     |
//! | `production`  | false | `DATABASE_URL` or empty               |
//! | `default`     | alias for `development`                       |
//!
//! Selection never validates the result. A production profile without
//! `DATABASE_URL` carries an empty connection string; [`Config::warnings`]
//! reports it and the database binding fails later when the pool is created.
//!
//! ## Example
//!
//! ```rust,no_run
//! use lib_core::config::Config;
//!
//! let config = Config::from_name("production")?;
//! assert!(!config.debug);
//! # Ok::<(), lib_core::AppError>(())
//! ```

use std::fmt;
use std::str::FromStr;

use axum::Router;
use tracing::debug;

use crate::error::{AppError, Result};

/// Secret key used when `SECRET_KEY` is unset or empty.
pub const DEFAULT_SECRET_KEY: &str = "dev-secret-key-change-me";

/// Database used by the development profile when `DATABASE_URL` is unset.
pub const DEV_DATABASE_URL: &str = "sqlite:dev.db";

/// Migrations directory used when `MIGRATIONS_DIR` is unset.
pub const DEFAULT_MIGRATIONS_DIR: &str = "migrations";

/// Variables consulted, in order, for the configuration name.
///
/// `FLASK_ENV` decides; `APP_ENV` is only read when it is unset.
pub const CONFIG_NAME_VARS: &[&str] = &["FLASK_ENV", "APP_ENV"];

/// Configuration name used when none is given.
pub const DEFAULT_CONFIG_NAME: &str = "development";

// region: --- Environment
/// A named configuration profile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Production => "production",
        }
    }

    /// Whether the profile runs in debug mode.
    pub fn debug(&self) -> bool {
        matches!(self, Environment::Development)
    }

    /// Database URL used when `DATABASE_URL` is not provided.
    fn fallback_database_url(&self) -> &'static str {
        match self {
            Environment::Development => DEV_DATABASE_URL,
            Environment::Production => "",
        }
    }
}

impl FromStr for Environment {
    type Err = AppError;

    fn from_str(name: &str) -> Result<Self> {
        match name {
            "development" | "default" => Ok(Environment::Development),
            "production" => Ok(Environment::Production),
            other => Err(AppError::Config(format!(
                "Unknown configuration name '{other}' (expected development, production or default)"
            ))),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
// endregion: --- Environment

// region: --- Config
/// Application configuration for one profile.
#[derive(Clone, Debug)]
pub struct Config {
    /// Profile this configuration was built from
    pub environment: Environment,

    /// Secret used for signing; falls back to [`DEFAULT_SECRET_KEY`]
    pub secret_key: String,

    /// Debug mode (verbose logging)
    pub debug: bool,

    /// SQLite connection URL, possibly empty in production
    pub database_url: String,

    /// Directory holding `<VERSION>_<DESCRIPTION>.sql` migration files
    pub migrations_dir: String,
}

impl Config {
    /// Select a profile by name and fill it from the process environment.
    pub fn from_name(name: &str) -> Result<Self> {
        let environment = name.parse::<Environment>()?;
        Ok(Self::for_environment(environment))
    }

    /// Select the profile named by `FLASK_ENV` (or `APP_ENV`), defaulting to
    /// `development`.
    pub fn from_env() -> Result<Self> {
        Self::from_env_lookup(lib_utils::get_env_non_empty)
    }

    /// Like [`Config::from_env`], reading both the profile name and its
    /// values through `lookup`.
    pub fn from_env_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = name_from_lookup(&lookup).parse::<Environment>()?;
        Ok(Self::from_lookup(environment, lookup))
    }

    /// Build a profile from the process environment.
    pub fn for_environment(environment: Environment) -> Self {
        Self::from_lookup(environment, lib_utils::get_env_non_empty)
    }

    /// Build a profile reading variables through `lookup`.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(environment: Environment, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|value| !value.is_empty());

        Self {
            environment,
            secret_key: get("SECRET_KEY").unwrap_or_else(|| DEFAULT_SECRET_KEY.to_string()),
            debug: environment.debug(),
            database_url: get("DATABASE_URL")
                .unwrap_or_else(|| environment.fallback_database_url().to_string()),
            migrations_dir: get("MIGRATIONS_DIR")
                .unwrap_or_else(|| DEFAULT_MIGRATIONS_DIR.to_string()),
        }
    }

    /// Per-profile application setup, run by the factory before state is
    /// attached. Both profiles currently leave the router untouched.
    pub fn init_app<S>(&self, router: Router<S>) -> Router<S>
    where
        S: Clone + Send + Sync + 'static,
    {
        debug!(environment = %self.environment, "init_app");
        match self.environment {
            Environment::Development => router,
            Environment::Production => router,
        }
    }

    /// Human-readable problems with this configuration.
    ///
    /// Nothing here is enforced; callers log the messages at startup.
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if self.environment == Environment::Production {
            if self.database_url.is_empty() {
                warnings.push(
                    "DATABASE_URL not set for production -- database binding will fail".to_string(),
                );
            }
            if self.secret_key == DEFAULT_SECRET_KEY {
                warnings.push("SECRET_KEY not set for production -- using the development key".to_string());
            }
        }

        warnings
    }
}
// endregion: --- Config

/// Configuration name from the environment, or [`DEFAULT_CONFIG_NAME`].
pub fn name_from_env() -> String {
    name_from_lookup(lib_utils::get_env_non_empty)
}

/// Configuration name read through `lookup`; empty values count as unset.
pub fn name_from_lookup<F>(lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    CONFIG_NAME_VARS
        .iter()
        .find_map(|name| lookup(name).filter(|value| !value.is_empty()))
        .unwrap_or_else(|| DEFAULT_CONFIG_NAME.to_string())
}

// region: --- Tests
#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_development_is_debug() {
        let config = Config::from_lookup(Environment::Development, lookup_from(&[]));
        assert!(config.debug);
        assert_eq!(config.environment, Environment::Development);
    }

    #[test]
    fn test_production_is_not_debug() {
        let config = Config::from_lookup(Environment::Production, lookup_from(&[]));
        assert!(!config.debug);
    }

    #[test]
    fn test_name_selection() {
        assert_eq!("development".parse::<Environment>().unwrap(), Environment::Development);
        assert_eq!("default".parse::<Environment>().unwrap(), Environment::Development);
        assert_eq!("production".parse::<Environment>().unwrap(), Environment::Production);
    }

    #[test]
    fn test_unknown_name_is_rejected() {
        let err = "staging".parse::<Environment>().unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
        assert!(err.to_string().contains("staging"));

        // Matching is exact
        assert!("Production".parse::<Environment>().is_err());
    }

    #[test]
    fn test_from_name_by_profile() {
        assert!(Config::from_name("development").unwrap().debug);
        assert!(Config::from_name("default").unwrap().debug);
        assert!(!Config::from_name("production").unwrap().debug);
        assert!(Config::from_name("testing").is_err());
    }

    #[test]
    fn test_defaults_without_environment() {
        let dev = Config::from_lookup(Environment::Development, lookup_from(&[]));
        assert_eq!(dev.secret_key, DEFAULT_SECRET_KEY);
        assert_eq!(dev.database_url, DEV_DATABASE_URL);
        assert_eq!(dev.migrations_dir, DEFAULT_MIGRATIONS_DIR);
        assert!(dev.warnings().is_empty());
    }

    #[test]
    fn test_environment_values_override_defaults() {
        let lookup = lookup_from(&[
            ("SECRET_KEY", "s3cret"),
            ("DATABASE_URL", "sqlite:data/app.db"),
            ("MIGRATIONS_DIR", "db/migrations"),
        ]);
        let config = Config::from_lookup(Environment::Production, lookup);

        assert_eq!(config.secret_key, "s3cret");
        assert_eq!(config.database_url, "sqlite:data/app.db");
        assert_eq!(config.migrations_dir, "db/migrations");
        assert!(config.warnings().is_empty());
    }

    #[test]
    fn test_empty_values_fall_back() {
        let lookup = lookup_from(&[("SECRET_KEY", ""), ("DATABASE_URL", "")]);
        let config = Config::from_lookup(Environment::Development, lookup);

        assert_eq!(config.secret_key, DEFAULT_SECRET_KEY);
        assert_eq!(config.database_url, DEV_DATABASE_URL);
    }

    #[test]
    fn test_production_without_database_url_is_selected_with_warning() {
        let config = Config::from_lookup(Environment::Production, lookup_from(&[]));

        assert_eq!(config.database_url, "");
        let warnings = config.warnings();
        assert_eq!(warnings.len(), 2);
        assert!(warnings[0].contains("DATABASE_URL"));
        assert!(warnings[1].contains("SECRET_KEY"));
    }

    #[test]
    fn test_name_defaults_to_development() {
        assert_eq!(name_from_lookup(lookup_from(&[])), "development");
        assert_eq!(name_from_lookup(lookup_from(&[("FLASK_ENV", "")])), "development");
    }

    #[test]
    fn test_flask_env_selects_profile() {
        let config = Config::from_env_lookup(lookup_from(&[("FLASK_ENV", "production")])).unwrap();
        assert_eq!(config.environment, Environment::Production);
        assert!(!config.debug);

        let config = Config::from_env_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.environment, Environment::Development);
        assert!(config.debug);
    }

    #[test]
    fn test_flask_env_wins_over_app_env() {
        let lookup = lookup_from(&[("FLASK_ENV", "development"), ("APP_ENV", "production")]);
        assert_eq!(name_from_lookup(&lookup), "development");

        let lookup = lookup_from(&[("APP_ENV", "production")]);
        assert_eq!(name_from_lookup(&lookup), "production");
    }

    #[test]
    fn test_env_lookup_rejects_unknown_name() {
        let result = Config::from_env_lookup(lookup_from(&[("FLASK_ENV", "staging")]));
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[tokio::test]
    async fn test_init_app_keeps_routes() {
        use axum::body::Body;
        use axum::http::{Request, StatusCode};
        use tower::ServiceExt;

        for environment in [Environment::Development, Environment::Production] {
            let config = Config::from_lookup(environment, lookup_from(&[]));
            let router: Router = Router::new().route("/", axum::routing::get(|| async { "ok" }));

            let response = config
                .init_app(router)
                .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);
        }
    }
}
// endregion: --- Tests
