/// Cumulative transfer progress for one upload.
///
/// `percentage` only ever grows while an upload is running, since
/// `loaded` accumulates against a fixed `total`, and it reaches exactly
/// 100 when the last byte is handed to the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadProgress {
    pub loaded: u64,
    pub total: u64,
    pub percentage: u8,
}

impl UploadProgress {
    pub fn new(loaded: u64, total: u64) -> Self {
        // Zero-byte uploads have nothing to transfer, which counts as done.
        let percentage = if total == 0 {
            100
        } else {
            ((loaded as f64 / total as f64) * 100.0).round() as u8
        };
        Self {
            loaded,
            total,
            percentage,
        }
    }
}

/// Lifecycle of a single upload, from file selection to a terminal
/// outcome. Every transition is published on the upload's event channel
/// so observers can render progress without polling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadState {
    /// Nothing in flight yet.
    Idle,
    /// Asking the backend for an upload URL.
    Requesting,
    /// PUT in progress against the object store.
    Uploading(UploadProgress),
    /// The object now exists under `key`.
    Succeeded { key: String },
    /// Terminal failure. `message` is what an observer should display.
    Failed { message: String },
}

impl UploadState {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            UploadState::Succeeded { .. } | UploadState::Failed { .. }
        )
    }
}
