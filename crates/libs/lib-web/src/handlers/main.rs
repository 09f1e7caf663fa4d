//! # Main Handlers
//!
//! The site root.

use std::sync::Arc;

use askama::Template;
use axum::{extract::State, routing::get};
use lib_core::Result;
use tracing::{debug, instrument};

use crate::blueprint::{Blueprint, UrlMap};
use crate::server::AppState;
use crate::templates::HtmlTemplate;

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub generator_url: String,
    pub login_url: String,
    pub register_url: String,
}

/// `GET /` - home page.
#[instrument(skip_all)]
pub async fn index(State(urls): State<Arc<UrlMap>>) -> Result<HtmlTemplate<IndexTemplate>> {
    debug!("[INDEX] rendering home page");

    Ok(HtmlTemplate(IndexTemplate {
        generator_url: urls.require("generator.index")?.to_string(),
        login_url: urls.require("auth.login")?.to_string(),
        register_url: urls.require("auth.register")?.to_string(),
    }))
}

pub fn blueprint() -> Blueprint<AppState> {
    Blueprint::new("main").route("index", "/", get(index))
}

#[cfg(test)]
mod tests {
    use crate::test_support::{body_string, send_get, test_app};
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_index_links_to_route_groups() {
        let app = test_app().await;

        let response = send_get(&app.router, "/").await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_string(response).await;
        assert!(body.contains("<title>Home</title>"));
        assert!(body.contains(r#"href="/generator""#));
        assert!(body.contains(r#"href="/auth/login""#));
        assert!(body.contains(r#"href="/auth/register""#));
    }
}
