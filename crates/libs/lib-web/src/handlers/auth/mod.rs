//! # Authentication Handlers
//!
//! Placeholder account pages mounted at `/auth`.
//!
//! None of these handlers touch credentials or sessions: login and register
//! only render their forms, logout only redirects home.
//!
//! ## Example
//!
//! ```rust,ignore
//! use lib_web::{register_blueprint, UrlMap};
//! use lib_web::handlers::auth;
//!
//! let mut urls = UrlMap::default();
//! let app = register_blueprint(Router::new(), auth::blueprint(), Some("/auth"), &mut urls);
//! ```

use std::sync::Arc;

use askama::Template;
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
};
use lib_core::Result;
use tracing::{debug, info, instrument};

use crate::blueprint::{Blueprint, UrlMap};
use crate::server::AppState;
use crate::templates::HtmlTemplate;

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub index_url: String,
    pub register_url: String,
}

#[derive(Template)]
#[template(path = "register.html")]
pub struct RegisterTemplate {
    pub index_url: String,
    pub login_url: String,
}

/// Login page.
///
/// **Route**: `GET /auth/login`
#[instrument(skip_all)]
pub async fn login(State(urls): State<Arc<UrlMap>>) -> Result<HtmlTemplate<LoginTemplate>> {
    debug!("[LOGIN] rendering login form");

    Ok(HtmlTemplate(LoginTemplate {
        index_url: urls.require("main.index")?.to_string(),
        register_url: urls.require("auth.register")?.to_string(),
    }))
}

/// Registration page.
///
/// **Route**: `GET /auth/register`
#[instrument(skip_all)]
pub async fn register(State(urls): State<Arc<UrlMap>>) -> Result<HtmlTemplate<RegisterTemplate>> {
    debug!("[REGISTER] rendering registration form");

    Ok(HtmlTemplate(RegisterTemplate {
        index_url: urls.require("main.index")?.to_string(),
        login_url: urls.require("auth.login")?.to_string(),
    }))
}

/// Logout: `302 Found` to the home page. There is no session to end.
///
/// **Route**: `GET /auth/logout`
#[instrument(skip_all)]
pub async fn logout(State(urls): State<Arc<UrlMap>>) -> Result<Response> {
    let target = urls.require("main.index")?;
    info!("[LOGOUT] redirecting to {}", target);

    Ok((StatusCode::FOUND, [(header::LOCATION, target.to_string())]).into_response())
}

pub fn blueprint() -> Blueprint<AppState> {
    Blueprint::new("auth")
        .route("login", "/login", get(login))
        .route("register", "/register", get(register))
        .route("logout", "/logout", get(logout))
}
