//! # Model Layer
//!
//! No entities are defined yet; this layer only owns the database store and
//! the migration binding.

pub mod store;
