use crate::AppState;
use crate::api::error::AppError;
use crate::api::handlers::files::UPLOADS_PREFIX;
use crate::models::{PresignRequest, PresignResponse};
use axum::{Json, extract::State};
use chrono::Utc;
use validator::Validate;

#[utoipa::path(
    post,
    path = "/presigned-url",
    request_body = PresignRequest,
    responses(
        (status = 200, description = "Single-use upload URL", body = PresignResponse),
        (status = 400, description = "Missing fileName or fileType"),
        (status = 500, description = "Signing failed")
    ),
    tag = "files"
)]
pub async fn create_presigned_url(
    State(state): State<AppState>,
    Json(req): Json<PresignRequest>,
) -> Result<Json<PresignResponse>, AppError> {
    req.validate()
        .map_err(|_| AppError::BadRequest("fileName and fileType are required".to_string()))?;

    // Millisecond timestamp prefix keeps repeated filenames from
    // colliding. The object itself only exists once the caller PUTs.
    let key = format!(
        "{}{}-{}",
        UPLOADS_PREFIX,
        Utc::now().timestamp_millis(),
        req.file_name
    );

    let presigned_url = state
        .storage
        .presign_upload(&key, &req.file_type)
        .await
        .map_err(|e| AppError::Storage("Failed to generate presigned URL", e))?;

    tracing::info!("📤 Issued upload URL for {}", key);

    Ok(Json(PresignResponse {
        presigned_url,
        key,
        bucket: state.config.bucket.clone(),
    }))
}
