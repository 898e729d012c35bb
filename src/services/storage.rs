use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use aws_sdk_s3::Client;
use aws_sdk_s3::presigning::PresigningConfig;

/// Lifetime of a minted upload URL. Kept short so a leaked URL goes
/// stale before it is worth abusing.
pub const UPLOAD_URL_EXPIRY_SECS: u64 = 300;
/// Lifetime of the read URLs attached to listings.
pub const READ_URL_EXPIRY_SECS: u64 = 3600;

pub struct ObjectSummary {
    pub key: String,
    pub size: i64,
    pub last_modified: Option<chrono::DateTime<chrono::Utc>>,
}

#[async_trait]
pub trait StorageService: Send + Sync {
    /// Mints a URL that grants a single PUT of `content_type` bytes to `key`.
    async fn presign_upload(&self, key: &str, content_type: &str) -> Result<String>;
    /// Mints a URL that grants GETs of `key` until it expires.
    async fn presign_read(&self, key: &str) -> Result<String>;
    async fn list_objects(&self, prefix: &str) -> Result<Vec<ObjectSummary>>;
    async fn delete_object(&self, key: &str) -> Result<()>;
}

pub struct S3StorageService {
    client: Client,
    bucket: String,
}

impl S3StorageService {
    pub fn new(client: Client, bucket: String) -> Self {
        Self { client, bucket }
    }
}

#[async_trait]
impl StorageService for S3StorageService {
    async fn presign_upload(&self, key: &str, content_type: &str) -> Result<String> {
        let presigned = self
            .client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(content_type)
            .presigned(PresigningConfig::expires_in(Duration::from_secs(
                UPLOAD_URL_EXPIRY_SECS,
            ))?)
            .await?;
        Ok(presigned.uri().to_string())
    }

    async fn presign_read(&self, key: &str) -> Result<String> {
        let presigned = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .presigned(PresigningConfig::expires_in(Duration::from_secs(
                READ_URL_EXPIRY_SECS,
            ))?)
            .await?;
        Ok(presigned.uri().to_string())
    }

    async fn list_objects(&self, prefix: &str) -> Result<Vec<ObjectSummary>> {
        let mut objects = Vec::new();
        let mut continuation_token = None;

        loop {
            let res = self
                .client
                .list_objects_v2()
                .bucket(&self.bucket)
                .prefix(prefix)
                .set_continuation_token(continuation_token)
                .send()
                .await?;

            if let Some(contents) = res.contents {
                for object in contents {
                    if let Some(key) = object.key {
                        let last_modified = object.last_modified.map(|d| {
                            chrono::DateTime::from_timestamp(d.secs(), d.subsec_nanos())
                                .unwrap_or_default()
                        });
                        objects.push(ObjectSummary {
                            key,
                            size: object.size.unwrap_or(0),
                            last_modified,
                        });
                    }
                }
            }

            if res.is_truncated.unwrap_or(false) {
                continuation_token = res.next_continuation_token;
            } else {
                break;
            }
        }

        Ok(objects)
    }

    async fn delete_object(&self, key: &str) -> Result<()> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await?;
        Ok(())
    }
}
