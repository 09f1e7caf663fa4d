//! # Generator Handlers
//!
//! Placeholder route group mounted at `/generator`.

use std::sync::Arc;

use askama::Template;
use axum::{extract::State, routing::get};
use lib_core::Result;
use tracing::{debug, instrument};

use crate::blueprint::{Blueprint, UrlMap};
use crate::server::AppState;
use crate::templates::HtmlTemplate;

#[derive(Template)]
#[template(path = "generator/index.html")]
pub struct GeneratorTemplate {
    pub index_url: String,
}

/// `GET /generator` - generator page.
#[instrument(skip_all)]
pub async fn index(State(urls): State<Arc<UrlMap>>) -> Result<HtmlTemplate<GeneratorTemplate>> {
    debug!("[GENERATOR] rendering generator page");

    Ok(HtmlTemplate(GeneratorTemplate {
        index_url: urls.require("main.index")?.to_string(),
    }))
}

pub fn blueprint() -> Blueprint<AppState> {
    Blueprint::new("generator").route("index", "/", get(index))
}

#[cfg(test)]
mod tests {
    use crate::test_support::{body_string, send_get, test_app};
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_generator_index_renders() {
        let app = test_app().await;

        let response = send_get(&app.router, "/generator").await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_string(response).await;
        assert!(body.contains(r#"<section id="generator">"#));
        assert!(body.contains(r#"href="/""#));
    }

    #[tokio::test]
    async fn test_generator_trailing_slash_redirects() {
        let app = test_app().await;

        let response = send_get(&app.router, "/generator/").await;
        assert_eq!(response.status(), StatusCode::PERMANENT_REDIRECT);
        assert_eq!(response.headers().get("location").unwrap(), "/generator");
    }

    #[tokio::test]
    async fn test_generator_registered_under_prefix() {
        let app = test_app().await;
        assert_eq!(app.state.urls.url_for("generator.index"), Some("/generator"));
    }
}
