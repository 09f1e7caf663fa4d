//! # Blueprints
//!
//! Named route groups and the URL map used for reverse lookups.
//!
//! A [`Blueprint`] collects routes under endpoint names. Registering it with
//! [`register_blueprint`] mounts its router (merged at the root or nested under
//! a prefix) and records every endpoint's public path in a [`UrlMap`] as
//! `"<blueprint>.<endpoint>"`.
//!
//! ```rust,ignore
//! let mut urls = UrlMap::default();
//! let app = register_blueprint(Router::new(), auth::blueprint(), Some("/auth"), &mut urls);
//! assert_eq!(urls.url_for("auth.login"), Some("/auth/login"));
//! ```

use std::collections::BTreeMap;

use axum::response::Redirect;
use axum::routing::{get, MethodRouter};
use axum::Router;
use lib_core::{AppError, Result};
use tracing::debug;

// region: --- Blueprint
/// A named group of routes.
pub struct Blueprint<S> {
    name: &'static str,
    router: Router<S>,
    endpoints: Vec<(&'static str, &'static str)>,
}

impl<S> Blueprint<S>
where
    S: Clone + Send + Sync + 'static,
{
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            router: Router::new(),
            endpoints: Vec::new(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Add a route under `endpoint`, with `path` relative to the blueprint.
    pub fn route(mut self, endpoint: &'static str, path: &'static str, method_router: MethodRouter<S>) -> Self {
        self.router = self.router.route(path, method_router);
        self.endpoints.push((endpoint, path));
        self
    }
}
// endregion: --- Blueprint

// region: --- UrlMap
/// Endpoint name to public path.
#[derive(Clone, Debug, Default)]
pub struct UrlMap {
    endpoints: BTreeMap<String, String>,
}

impl UrlMap {
    pub fn insert(&mut self, endpoint: impl Into<String>, path: impl Into<String>) {
        self.endpoints.insert(endpoint.into(), path.into());
    }

    /// Public path for `endpoint` (e.g. `"main.index"`).
    pub fn url_for(&self, endpoint: &str) -> Option<&str> {
        self.endpoints.get(endpoint).map(String::as_str)
    }

    /// Like [`UrlMap::url_for`], failing with an internal error when missing.
    pub fn require(&self, endpoint: &str) -> Result<&str> {
        self.url_for(endpoint)
            .ok_or_else(|| AppError::Internal(format!("No URL registered for endpoint '{endpoint}'")))
    }

    /// All endpoints in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.endpoints.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }
}
// endregion: --- UrlMap

// region: --- Registration
/// Mount `blueprint` on `app` and record its endpoints in `urls`.
///
/// `None` or `"/"` merges the routes at the root; any other prefix nests them.
/// A nested blueprint's `/` route is served at the bare prefix, and the
/// trailing-slash form redirects there.
pub fn register_blueprint<S>(
    app: Router<S>,
    blueprint: Blueprint<S>,
    url_prefix: Option<&str>,
    urls: &mut UrlMap,
) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    let prefix = url_prefix.map(|p| p.trim_end_matches('/')).unwrap_or_default();

    for (endpoint, path) in &blueprint.endpoints {
        let full_path = join_path(prefix, path);
        debug!("[ROUTE SETUP] {}.{} -> {}", blueprint.name, endpoint, full_path);
        urls.insert(format!("{}.{}", blueprint.name, endpoint), full_path);
    }

    if prefix.is_empty() {
        return app.merge(blueprint.router);
    }

    let has_index = blueprint.endpoints.iter().any(|(_, path)| *path == "/");
    let app = app.nest(prefix, blueprint.router);
    if !has_index {
        return app;
    }

    // `<prefix>/` answers with a permanent redirect to `<prefix>`
    let target = prefix.to_string();
    app.route(
        &format!("{prefix}/"),
        get(move || async move { Redirect::permanent(&target) }),
    )
}

/// Public path of `path` nested under `prefix`; a nested `/` is the prefix itself.
fn join_path(prefix: &str, path: &str) -> String {
    match (prefix.is_empty(), path) {
        (true, _) => path.to_string(),
        (false, "/") => prefix.to_string(),
        (false, _) => format!("{prefix}{path}"),
    }
}
// endregion: --- Registration

// endregion: --- Tests
