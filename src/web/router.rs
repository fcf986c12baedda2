//! Router configuration for the storage API.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::path::Path;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use super::handlers::{
    create_world, delete_picture, delete_pictures, delete_world, delete_world_file,
    list_pictures, list_world_files, list_worlds, put_picture, put_world_file, upload_picture,
    upload_world_file, AppState,
};
use super::middleware::create_cors_layer;
use crate::config::{StorageConfig, WebConfig};

/// Create the main router.
///
/// JSON listing and upload routes live under `/worlds` and `/pictures`; the
/// same directory tree is served as raw bytes under `/files/worlds` when
/// `web.serve_files` is enabled.
pub fn create_router(
    app_state: Arc<AppState>,
    web_config: &WebConfig,
    storage_config: &StorageConfig,
) -> Router {
    let body_limit = match storage_config.max_upload_bytes() {
        Some(limit) => DefaultBodyLimit::max(limit),
        None => DefaultBodyLimit::disable(),
    };

    let world_routes = Router::new()
        .route("/worlds", get(list_worlds).post(create_world))
        .route(
            "/worlds/:name",
            get(list_world_files)
                .post(upload_world_file)
                .delete(delete_world),
        )
        .route(
            "/worlds/:name/:file_name",
            post(put_world_file).delete(delete_world_file),
        );

    let picture_routes = Router::new()
        .route(
            "/pictures/:world_name",
            get(list_pictures)
                .post(upload_picture)
                .delete(delete_pictures),
        )
        .route(
            "/pictures/:world_name/:file_name",
            post(put_picture).delete(delete_picture),
        );

    let root = app_state.storage.root().to_path_buf();

    let mut router = Router::new()
        .merge(world_routes)
        .merge(picture_routes)
        .layer(body_limit)
        .with_state(app_state)
        .merge(create_health_router());

    if web_config.serve_files {
        router = router.merge(create_files_router(&root));
    }

    router.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(create_cors_layer(&web_config.cors_origins)),
    )
}

/// Create a router serving raw world files from `root` under `/files/worlds`.
pub fn create_files_router(root: &Path) -> Router {
    Router::new().nest_service("/files/worlds", ServeDir::new(root))
}

/// Create a health check router.
pub fn create_health_router() -> Router {
    Router::new().route("/health", get(health_check))
}

/// Health check handler.
async fn health_check() -> &'static str {
    "OK"
}
