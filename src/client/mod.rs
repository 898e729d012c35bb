//! HTTP client for the media backend.
//!
//! Wraps the three API calls and drives the whole upload lifecycle:
//! request an upload URL, PUT the bytes straight to the object store,
//! and publish [`UploadState`] transitions on a per-upload channel.

pub mod progress;
pub mod state;

use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use reqwest::StatusCode;
use reqwest::header;
use serde::Deserialize;
use thiserror::Error;
use tokio::io::AsyncRead;
use tokio::sync::mpsc;

use crate::models::{DeleteResponse, FileEntry, ListFilesResponse, PresignRequest, PresignResponse};
use progress::progress_stream;
pub use state::{UploadProgress, UploadState};

#[derive(Debug, Error)]
pub enum ClientError {
    /// Rejected before or by the backend's input checks.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The backend answered, but the object store behind it did not.
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    /// The request never completed (connect, TLS, decode).
    #[error("Transport failure: {0}")]
    Transport(#[from] reqwest::Error),
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Clone)]
pub struct MediaClient {
    http: reqwest::Client,
    base_url: String,
}

impl MediaClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    /// Asks the backend to mint an upload URL for `file_name`.
    pub async fn request_upload_url(
        &self,
        file_name: &str,
        file_type: &str,
    ) -> Result<PresignResponse, ClientError> {
        if file_name.is_empty() || file_type.is_empty() {
            return Err(ClientError::InvalidInput(
                "fileName and fileType are required".to_string(),
            ));
        }

        let request = PresignRequest {
            file_name: file_name.to_string(),
            file_type: file_type.to_string(),
        };
        let response = self
            .http
            .post(format!("{}/presigned-url", self.base_url))
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }
        Ok(response.json().await?)
    }

    /// Runs one upload end to end and returns its terminal state.
    ///
    /// Every transition is also sent on `events`, registered by the
    /// caller before any transfer starts. A dropped receiver only stops
    /// the reporting, never the upload.
    pub async fn upload_media<R>(
        &self,
        file_name: &str,
        content_type: &str,
        reader: R,
        total: u64,
        events: &mpsc::UnboundedSender<UploadState>,
    ) -> UploadState
    where
        R: AsyncRead + Send + Unpin + 'static,
    {
        let _ = events.send(UploadState::Requesting);

        let grant = match self.request_upload_url(file_name, content_type).await {
            Ok(grant) => grant,
            Err(e) => return Self::fail(events, e.to_string()),
        };

        let progress_events = events.clone();
        let body = progress_stream(reader, total, move |progress| {
            let _ = progress_events.send(UploadState::Uploading(progress));
        });

        // The store checks Content-Length against the signed grant, so it
        // is set explicitly instead of letting the stream imply chunked
        // transfer encoding.
        let result = self
            .http
            .put(&grant.presigned_url)
            .header(header::CONTENT_TYPE, content_type)
            .header(header::CONTENT_LENGTH, total)
            .body(reqwest::Body::wrap_stream(body))
            .send()
            .await;

        match result {
            Ok(response) if response.status().is_success() => {
                if total == 0 {
                    // Nothing flowed through the stream, so the terminal
                    // 100% report happens here.
                    let _ = events.send(UploadState::Uploading(UploadProgress::new(0, 0)));
                }
                let state = UploadState::Succeeded { key: grant.key };
                let _ = events.send(state.clone());
                state
            }
            Ok(response) => Self::fail(
                events,
                format!("Upload rejected with status {}", response.status()),
            ),
            Err(e) => Self::fail(events, ClientError::Transport(e).to_string()),
        }
    }

    /// Fetches all stored files, newest first.
    pub async fn list_files(&self) -> Result<Vec<FileEntry>, ClientError> {
        let response = self
            .http
            .get(format!("{}/files", self.base_url))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }

        let body: ListFilesResponse = response.json().await?;
        let mut files = body.files;
        // The backend gives no ordering guarantee.
        files.sort_by(|a, b| b.last_modified.cmp(&a.last_modified));
        Ok(files)
    }

    /// Deletes `key`. Succeeds even when the object is already gone.
    pub async fn delete_file(&self, key: &str) -> Result<DeleteResponse, ClientError> {
        let escaped = utf8_percent_encode(key, NON_ALPHANUMERIC).to_string();
        let response = self
            .http
            .delete(format!("{}/files/{}", self.base_url, escaped))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }
        Ok(response.json().await?)
    }

    fn fail(events: &mpsc::UnboundedSender<UploadState>, message: String) -> UploadState {
        let state = UploadState::Failed { message };
        let _ = events.send(state.clone());
        state
    }

    async fn error_from_response(response: reqwest::Response) -> ClientError {
        let status = response.status();
        let message = match response.json::<ErrorBody>().await {
            Ok(body) => body.error,
            Err(_) => format!("Unexpected status {}", status),
        };
        if status == StatusCode::BAD_REQUEST {
            ClientError::InvalidInput(message)
        } else {
            ClientError::StorageUnavailable(message)
        }
    }
}
