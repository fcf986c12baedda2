//! Middleware for the storage API.

pub mod cors;

pub use cors::create_cors_layer;
