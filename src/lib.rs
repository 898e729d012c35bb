//! Backend and client for a small media gallery backed by an
//! S3-compatible object store.
//!
//! The server never proxies file bytes. It mints short-lived presigned
//! URLs and callers move data straight to the store, so the API stays
//! light no matter how large the uploads get.
//!
//! Every endpoint is unauthenticated: any caller can list, upload and
//! delete anything in the bucket. That matches the deployment this was
//! built for (a trusted LAN) but is a known gap for anything public.
//! Put an authenticating proxy in front or add middleware before
//! exposing it.

pub mod api;
pub mod client;
pub mod config;
pub mod infrastructure;
pub mod models;
pub mod services;
pub mod utils;

use crate::config::StorageConfig;
use crate::services::storage::StorageService;
use axum::{
    Router,
    middleware::from_fn,
    routing::{delete, get, post},
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        api::handlers::presign::create_presigned_url,
        api::handlers::files::list_files,
        api::handlers::files::delete_file,
        api::handlers::health::health_check,
    ),
    components(
        schemas(
            models::PresignRequest,
            models::PresignResponse,
            models::FileEntry,
            models::ListFilesResponse,
            models::DeleteResponse,
            api::handlers::health::HealthResponse,
        )
    ),
    tags(
        (name = "files", description = "Presigned upload, listing and deletion"),
        (name = "system", description = "Service health")
    )
)]
pub struct ApiDoc;

#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<dyn StorageService>,
    pub config: StorageConfig,
}

pub fn create_app(state: AppState) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/health", get(api::handlers::health::health_check))
        .route(
            "/presigned-url",
            post(api::handlers::presign::create_presigned_url),
        )
        .route("/files", get(api::handlers::files::list_files))
        // Wildcard route because keys contain slashes; axum decodes the
        // percent-escaped path before the handler sees it.
        .route("/files/*key", delete(api::handlers::files::delete_file))
        .layer(from_fn(api::middleware::request_id::request_id_middleware))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
                .expose_headers(Any),
        )
        .with_state(state)
}
