//! # Web Library
//!
//! Application factory, route groups (blueprints), handlers, templates,
//! middleware and the HTTP server loop.

pub mod blueprint;
pub mod handlers;
pub mod log;
pub mod middleware;
pub mod server;
pub mod templates;

#[cfg(test)]
pub(crate) mod test_support;

pub use blueprint::{register_blueprint, Blueprint, UrlMap};
pub use server::{create_app, create_app_with_config, start_server, App, AppState, ServerConfig};
