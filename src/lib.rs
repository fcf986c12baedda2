//! aart - world storage service
//!
//! An HTTP file store organised as worlds: directories of uploaded files,
//! each with a nested `pictures` collection.

pub mod config;
pub mod error;
pub mod logging;
pub mod web;
pub mod world;

pub use config::Config;
pub use error::{AartError, Result};
pub use web::WebServer;
pub use world::{Collection, WorldStorage, PICTURES_DIRECTORY_NAME};
