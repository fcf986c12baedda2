//! Web API module for aart.
//!
//! This module exposes world storage over HTTP: JSON listing and upload
//! endpoints under `/worlds` and `/pictures`, and raw file serving under
//! `/files/worlds`.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod server;

pub use error::ApiError;
pub use router::create_router;
pub use server::WebServer;
