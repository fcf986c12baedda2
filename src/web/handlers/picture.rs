//! Picture handlers.
//!
//! Pictures live in the `pictures` subdirectory of a world and follow the
//! same naming rules as world files.

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, Path, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use std::sync::Arc;

use super::{run_blocking, upload_body, upload_extension, AppState};
use crate::web::error::ApiError;
use crate::world::Collection;

/// GET /pictures/:world_name - List the pictures of a world.
pub async fn list_pictures(
    State(state): State<Arc<AppState>>,
    Path(world_name): Path<String>,
) -> Result<Json<Vec<String>>, ApiError> {
    let storage = state.storage.clone();
    let files =
        run_blocking(move || storage.list_files(&world_name, Collection::Pictures)).await?;
    Ok(Json(files))
}

/// DELETE /pictures/:world_name - Delete all pictures of a world.
pub async fn delete_pictures(
    State(state): State<Arc<AppState>>,
    Path(world_name): Path<String>,
) -> Result<StatusCode, ApiError> {
    let storage = state.storage.clone();
    let world = world_name.clone();
    if run_blocking(move || storage.delete_pictures(&world)).await? {
        tracing::info!(world = %world_name, "Deleted pictures");
    }
    Ok(StatusCode::OK)
}

/// POST /pictures/:world_name - Add the request body as an auto-named picture.
pub async fn upload_picture(
    State(state): State<Arc<AppState>>,
    Path(world_name): Path<String>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Result<StatusCode, ApiError> {
    let extension = upload_extension(&headers)?;
    let body = upload_body(body)?;

    let storage = state.storage.clone();
    run_blocking(move || {
        storage.add_file(&world_name, Collection::Pictures, &body, &extension)
    })
    .await?;
    Ok(StatusCode::OK)
}

/// POST /pictures/:world_name/:file_name - Store a picture under an exact name.
pub async fn put_picture(
    State(state): State<Arc<AppState>>,
    Path((world_name, file_name)): Path<(String, String)>,
    body: Result<Bytes, BytesRejection>,
) -> Result<StatusCode, ApiError> {
    let body = upload_body(body)?;

    let storage = state.storage.clone();
    run_blocking(move || {
        storage.put_file(&world_name, Collection::Pictures, &file_name, &body)
    })
    .await?;
    Ok(StatusCode::OK)
}

/// DELETE /pictures/:world_name/:file_name - Delete a single picture.
pub async fn delete_picture(
    State(state): State<Arc<AppState>>,
    Path((world_name, file_name)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    let storage = state.storage.clone();
    run_blocking(move || {
        storage.delete_file(&world_name, Collection::Pictures, &file_name)
    })
    .await?;
    Ok(StatusCode::OK)
}
