//! # HTTP Request Handlers
//!
//! Handlers grouped by blueprint. Each module exposes a `blueprint()` that the
//! application factory registers under its prefix.
//!
//! ## Handler Modules
//!
//! - **[`main`]**: site root
//!   - `GET /` - Home page (`main.index`)
//!
//! - **[`auth`]**: placeholder account pages, no credential processing
//!   - `GET /auth/login` - Login form (`auth.login`)
//!   - `GET /auth/register` - Registration form (`auth.register`)
//!   - `GET /auth/logout` - Redirect to `main.index` (`auth.logout`)
//!
//! - **[`generator`]**: placeholder
//!   - `GET /generator` - Generator page (`generator.index`)
//!
//! Handlers resolve links through the [`UrlMap`](crate::UrlMap) in state
//! rather than hard-coding paths.

pub mod auth;
pub mod generator;
pub mod main;
