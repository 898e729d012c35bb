use crate::AppState;
use crate::api::error::AppError;
use crate::models::{DeleteResponse, FileEntry, ListFilesResponse};
use crate::utils::media_type;
use axum::{
    Json,
    extract::{Path, State},
};
use chrono::Utc;
use futures::future::try_join_all;

/// Every minted key lives under this prefix; listings never look outside it.
pub const UPLOADS_PREFIX: &str = "uploads/";

#[utoipa::path(
    get,
    path = "/files",
    responses(
        (status = 200, description = "All stored files with read URLs", body = ListFilesResponse),
        (status = 500, description = "Object store unavailable")
    ),
    tag = "files"
)]
pub async fn list_files(
    State(state): State<AppState>,
) -> Result<Json<ListFilesResponse>, AppError> {
    let objects = state
        .storage
        .list_objects(UPLOADS_PREFIX)
        .await
        .map_err(|e| AppError::Storage("Failed to list files", e))?;

    // Each object needs its own read URL. Sign them concurrently; a file
    // without a working URL is useless, so one signing failure fails the
    // whole request.
    let files = try_join_all(objects.into_iter().map(|object| {
        let storage = state.storage.clone();
        async move {
            let url = storage.presign_read(&object.key).await?;
            let file_name = object
                .key
                .strip_prefix(UPLOADS_PREFIX)
                .unwrap_or(&object.key)
                .to_string();
            let is_image = media_type::is_image(&file_name);
            Ok::<_, anyhow::Error>(FileEntry {
                key: object.key,
                file_name,
                size: object.size,
                last_modified: object.last_modified.unwrap_or_else(Utc::now),
                url,
                is_image,
            })
        }
    }))
    .await
    .map_err(|e| AppError::Storage("Failed to list files", e))?;

    Ok(Json(ListFilesResponse { files }))
}

#[utoipa::path(
    delete,
    path = "/files/{key}",
    params(
        ("key" = String, Path, description = "Full object key, URL-encoded by the caller")
    ),
    responses(
        (status = 200, description = "File deleted (or was already gone)", body = DeleteResponse),
        (status = 500, description = "Object store unavailable")
    ),
    tag = "files"
)]
pub async fn delete_file(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<DeleteResponse>, AppError> {
    state
        .storage
        .delete_object(&key)
        .await
        .map_err(|e| AppError::Storage("Failed to delete file", e))?;

    tracing::info!("🗑️  Deleted {}", key);

    Ok(Json(DeleteResponse {
        success: true,
        message: "File deleted successfully".to_string(),
    }))
}
