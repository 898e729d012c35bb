use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Body of `POST /presigned-url`. Both fields default to empty when
/// absent so a missing field fails the same length rule as an empty one.
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PresignRequest {
    #[serde(default)]
    #[validate(length(min = 1))]
    pub file_name: String,

    #[serde(default)]
    #[validate(length(min = 1))]
    pub file_type: String,
}

/// A minted upload grant: PUT the raw bytes to `presigned_url` before it
/// expires and the object appears under `key`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PresignResponse {
    pub presigned_url: String,
    pub key: String,
    pub bucket: String,
}

/// One stored object as the gallery sees it. `url` is a read-signed URL
/// and must not be cached past its expiry window.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FileEntry {
    pub key: String,
    pub file_name: String,
    pub size: i64,
    pub last_modified: DateTime<Utc>,
    pub url: String,
    pub is_image: bool,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ListFilesResponse {
    pub files: Vec<FileEntry>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeleteResponse {
    pub success: bool,
    pub message: String,
}
