//! World handlers.

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

/// GET /worlds - List all world names.
pub async fn list_worlds(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<String>>, ApiError> {
    let storage = state.storage.clone();
    let worlds = run_blocking(move || storage.list_worlds()).await?;
    Ok(Json(worlds))
}

/// POST /worlds - Create a world holding the request body as its first file.
///
/// Responds with the generated world name as a JSON string.
pub async fn create_world(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<String>, ApiError> {
    let extension = upload_extension(&headers)?;
    let body = upload_body(body)?;

    let storage = state.storage.clone();
    let name = run_blocking(move || storage.create_world(&body, &extension)).await?;
    Ok(Json(name))
}

/// GET /worlds/:name - List the files in a world.
pub async fn list_world_files(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<Vec<String>>, ApiError> {
    let storage = state.storage.clone();
    let files = run_blocking(move || storage.list_files(&name, Collection::World)).await?;
    Ok(Json(files))
}

/// DELETE /worlds/:name - Delete a world and everything in it.
pub async fn delete_world(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<StatusCode, ApiError> {
    let storage = state.storage.clone();
    let world = name.clone();
    if run_blocking(move || storage.delete_world(&world)).await? {
        tracing::info!(world = %name, "Deleted world");
    }
    Ok(StatusCode::OK)
}

/// POST /worlds/:name - Add the request body as an auto-named file.
pub async fn upload_world_file(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Result<StatusCode, ApiError> {
    let extension = upload_extension(&headers)?;
    let body = upload_body(body)?;

    let storage = state.storage.clone();
    run_blocking(move || storage.add_file(&name, Collection::World, &body, &extension)).await?;
    Ok(StatusCode::OK)
}

/// POST /worlds/:name/:file_name - Store the request body under an exact name.
pub async fn put_world_file(
    State(state): State<Arc<AppState>>,
    Path((name, file_name)): Path<(String, String)>,
    body: Result<Bytes, BytesRejection>,
) -> Result<StatusCode, ApiError> {
    let body = upload_body(body)?;

    let storage = state.storage.clone();
    run_blocking(move || storage.put_file(&name, Collection::World, &file_name, &body)).await?;
    Ok(StatusCode::OK)
}

/// DELETE /worlds/:name/:file_name - Delete a single world file.
pub async fn delete_world_file(
    State(state): State<Arc<AppState>>,
    Path((name, file_name)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    let storage = state.storage.clone();
    run_blocking(move || storage.delete_file(&name, Collection::World, &file_name)).await?;
    Ok(StatusCode::OK)
}
