//! # Server Setup
//!
//! The application factory ([`create_app`]) and the HTTP server loop
//! ([`start_server`]).
//!
//! The factory selects a configuration, binds the database pool and the
//! migration tool, registers the `main`, `auth` and `generator` blueprints and
//! returns the ready router together with its state. Any failure along the way
//! is returned to the caller.

// region: --- Imports
use std::sync::Arc;

use axum::{extract::State, http::Uri, routing::get, Json, Router};
use lib_core::{create_pool, AppError, Config, DbPool, Migrate, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::blueprint::{register_blueprint, UrlMap};
use crate::handlers;
use crate::middleware::{log_requests, map_res, stamp_req, RequestStamp};
// endregion: --- Imports

// region: --- AppState
/// Application state shared across all routes.
#[derive(Clone)]
pub struct AppState {
    pub db: DbPool,
    pub config: Config,
    pub migrate: Migrate,
    pub urls: Arc<UrlMap>,
}

impl axum::extract::FromRef<AppState> for DbPool {
    fn from_ref(state: &AppState) -> Self {
        state.db.clone()
    }
}

impl axum::extract::FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}

impl axum::extract::FromRef<AppState> for Arc<UrlMap> {
    fn from_ref(state: &AppState) -> Self {
        state.urls.clone()
    }
}
// endregion: --- AppState

// region: --- Application Factory
/// A ready-to-serve application.
pub struct App {
    pub router: Router,
    pub state: AppState,
}

/// Build the application for `config_name`.
///
/// `None` reads the name from `FLASK_ENV` (or `APP_ENV`), defaulting to
/// `development`.
///
/// # Errors
///
/// - the configuration name is unknown
/// - the database URL is empty or the database cannot be opened
pub async fn create_app(config_name: Option<&str>) -> Result<App> {
    let config = match config_name {
        Some(name) => Config::from_name(name)?,
        None => Config::from_env()?,
    };
    create_app_with_config(config).await
}

/// Build the application from an already selected configuration.
pub async fn create_app_with_config(config: Config) -> Result<App> {
    info!(
        environment = %config.environment,
        debug = config.debug,
        "Creating application"
    );
    for warning in config.warnings() {
        warn!("{}", warning);
    }

    let db = create_pool(&config.database_url).await?;
    let migrate = Migrate::new(&config.migrations_dir);

    info!("[ROUTE SETUP] Registering blueprints...");
    let mut urls = UrlMap::default();
    let router = Router::new();
    let router = register_blueprint(router, handlers::main::blueprint(), None, &mut urls);
    let router = register_blueprint(router, handlers::auth::blueprint(), Some("/auth"), &mut urls);
    let router = register_blueprint(
        router,
        handlers::generator::blueprint(),
        Some("/generator"),
        &mut urls,
    );
    let router = config.init_app(router);

    let state = AppState {
        db,
        config,
        migrate,
        urls: Arc::new(urls),
    };

    let router = router
        .route("/health", get(health))
        .fallback(not_found)
        .with_state(state.clone());

    Ok(App {
        router: apply_layers(router),
        state,
    })
}

/// Error pages, request logging, tracing spans and request IDs, outermost last.
fn apply_layers(router: Router) -> Router {
    router
        .layer(axum::middleware::from_fn(map_res))
        .layer(axum::middleware::from_fn(log_requests))
        .layer(
            tower_http::trace::TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    let request_id = request
                        .extensions()
                        .get::<RequestStamp>()
                        .map(|s| s.id.clone())
                        .unwrap_or_else(|| "unknown".to_string());
                    tracing::info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = %request.method(),
                        uri = %request.uri(),
                        version = ?request.version(),
                    )
                })
                .on_failure(
                    |error: tower_http::classify::ServerErrorsFailureClass,
                     latency: std::time::Duration,
                     _span: &tracing::Span| {
                        tracing::error!(
                            error = ?error,
                            latency_ms = latency.as_millis(),
                            "[HTTP FAILURE] Error: {:?}, Latency: {}ms",
                            error,
                            latency.as_millis()
                        );
                    },
                ),
        )
        .layer(axum::middleware::from_fn(stamp_req))
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub environment: String,
}

async fn health(State(config): State<Config>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        environment: config.environment.to_string(),
    })
}

async fn not_found(uri: Uri) -> AppError {
    info!("[404 HANDLER] Unmatched route: {}", uri.path());
    AppError::NotFound(format!("No route for {}", uri.path()))
}
// endregion: --- Application Factory

// region: --- Server
/// Server configuration.
pub struct ServerConfig {
    /// Bind address (e.g., "127.0.0.1:5000")
    pub bind_address: String,
    /// Configuration name; `None` reads `FLASK_ENV`
    pub config_name: Option<String>,
    /// Apply pending migrations before accepting requests
    pub run_migrations: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:5000".to_string(),
            config_name: None,
            run_migrations: true,
        }
    }
}

/// Build the application and serve it until SIGINT/SIGTERM.
///
/// Installs the global tracing subscriber, so call it at most once per
/// process.
pub async fn start_server(server: ServerConfig) -> anyhow::Result<()> {
    let config = match server.config_name.as_deref() {
        Some(name) => Config::from_name(name)?,
        None => Config::from_env()?,
    };
    crate::log::init_tracing(config.debug)?;

    info!(" GENWEB SERVER STARTING ({})", config.environment);

    let app = create_app_with_config(config).await?;

    if server.run_migrations {
        let applied = app.state.migrate.upgrade(&app.state.db).await?;
        info!(" Applied {} migration(s)", applied);
    }

    let listener = tokio::net::TcpListener::bind(&server.bind_address).await?;

    info!(" SERVER READY: http://{}", server.bind_address);
    log_server_info(&app.state.urls);

    axum::serve(listener, app.router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    app.state.db.close().await;
    info!("Shutdown complete");
    Ok(())
}

/// Log every registered endpoint.
fn log_server_info(urls: &UrlMap) {
    info!("ROUTES:");
    for (endpoint, path) in urls.iter() {
        info!("   • GET  {:<16} ({})", path, endpoint);
    }
    info!("   • GET  /health");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received SIGINT, shutting down..."),
        _ = terminate => info!("Received SIGTERM, shutting down..."),
    }
}
// endregion: --- Server

// endregion: --- Tests
