//! API handlers for the storage service.
//!
//! Handlers stay thin: they extract the request, run the blocking
//! [`WorldStorage`] call on the blocking pool and shape the response.

pub mod picture;
pub mod world;

pub use picture::*;
pub use world::*;

use axum::{
    body::Bytes,
    extract::rejection::BytesRejection,
    http::{header::CONTENT_TYPE, HeaderMap, StatusCode},
};

use crate::web::error::ApiError;
use crate::world::{extension_from_content_type, WorldStorage};
use crate::AartError;

/// Application state shared by all handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// World storage rooted at the configured worlds directory.
    pub storage: WorldStorage,
}

impl AppState {
    /// Create a new application state.
    pub fn new(storage: WorldStorage) -> Self {
        Self { storage }
    }
}

/// Run a blocking storage operation off the async executor.
pub(crate) async fn run_blocking<T, F>(f: F) -> Result<T, ApiError>
where
    F: FnOnce() -> crate::Result<T> + Send + 'static,
    T: Send + 'static,
{
    let result = tokio::task::spawn_blocking(f)
        .await
        .map_err(AartError::from)?;
    Ok(result?)
}

/// Extension for an auto-named upload, taken from the `Content-Type` header.
pub(crate) fn upload_extension(headers: &HeaderMap) -> Result<String, ApiError> {
    let content_type = headers
        .get(CONTENT_TYPE)
        .map(|v| {
            v.to_str()
                .map_err(|_| ApiError::bad_request("Content-Type is not valid ASCII"))
        })
        .transpose()?;

    Ok(extension_from_content_type(content_type)?)
}

/// Unwrap a buffered request body, mapping extractor failures to API errors.
pub(crate) fn upload_body(body: Result<Bytes, BytesRejection>) -> Result<Bytes, ApiError> {
    body.map_err(|rejection| {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::payload_too_large("Upload exceeds the configured size limit")
        } else {
            tracing::warn!("Failed to read request body: {}", rejection.body_text());
            ApiError::bad_request("Failed to read request body")
        }
    })
}
