//! # HTML Templates
//!
//! askama templates live in `templates/` at the crate root and are compiled
//! into the binary. Handlers return [`HtmlTemplate`] to render one as a
//! response.

use askama::Template;
use axum::response::{Html, IntoResponse, Response};
use lib_core::AppError;

/// Renders the wrapped template as `text/html`; failures become a 500 page.
pub struct HtmlTemplate<T>(pub T);

impl<T> IntoResponse for HtmlTemplate<T>
where
    T: Template,
{
    fn into_response(self) -> Response {
        match self.0.render() {
            Ok(html) => Html(html).into_response(),
            Err(err) => AppError::Template(err.to_string()).into_response(),
        }
    }
}
