//! # Response Mapping Middleware
//!
//! Turns error responses into HTML error pages.
//!
//! [`AppError`](lib_core::AppError) responses leave the core library as plain
//! text tagged with an [`ErrorDetail`]. This middleware renders the detail
//! into `error.html`, keeping the status code and every other header.

use askama::Template;
use axum::{
    extract::Request,
    http::header,
    middleware::Next,
    response::{IntoResponse, Response},
};
use lib_core::ErrorDetail;
use tracing::debug;

use crate::templates::HtmlTemplate;

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub code: u16,
    pub reason: String,
    pub message: String,
}

/// Response mapping middleware.
pub async fn map_res(req: Request, next: Next) -> Response {
    let res = next.run(req).await;

    let Some(detail) = res.extensions().get::<ErrorDetail>().cloned() else {
        return res;
    };

    let (mut parts, _body) = res.into_parts();
    debug!("[RES MAP] rendering error page for {}", parts.status);

    let page = HtmlTemplate(ErrorTemplate {
        code: parts.status.as_u16(),
        reason: parts.status.canonical_reason().unwrap_or("Error").to_string(),
        message: detail.message,
    })
    .into_response();

    // Render failures come back as plain-text error responses
    if page.extensions().get::<ErrorDetail>().is_some() {
        return page;
    }

    let (page_parts, body) = page.into_parts();
    parts.headers.remove(header::CONTENT_LENGTH);
    if let Some(content_type) = page_parts.headers.get(header::CONTENT_TYPE) {
        parts.headers.insert(header::CONTENT_TYPE, content_type.clone());
    }

    Response::from_parts(parts, body)
}
