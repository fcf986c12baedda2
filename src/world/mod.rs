//! World storage module.
//!
//! A world is a directory under the storage root holding arbitrary uploaded
//! files plus a fixed `pictures` subdirectory. There is no metadata beyond
//! the filesystem entries themselves.

pub mod naming;
mod storage;

pub use naming::{extension_from_content_type, validate_component, DEFAULT_EXTENSION};
pub use storage::{Collection, WorldStorage};

/// Name of the pictures subdirectory inside each world.
pub const PICTURES_DIRECTORY_NAME: &str = "pictures";
