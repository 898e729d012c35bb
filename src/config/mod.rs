use anyhow::{Context, Result};
use std::env;

/// Object-storage and listener configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Storage region (e.g. "us-east-1")
    pub region: String,

    /// Access credential pair for the signing identity
    pub access_key_id: String,
    pub secret_access_key: String,

    /// Bucket holding the uploaded media
    pub bucket: String,

    /// S3-compatible endpoint override (MinIO etc). Path-style
    /// addressing is enabled whenever this is set.
    pub endpoint_url: Option<String>,

    /// API listen port (default: 3000)
    pub port: u16,
}

impl StorageConfig {
    /// Load configuration from environment variables. Region, the
    /// credential pair and the bucket are required; startup fails
    /// without them.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            region: required("AWS_REGION")?,
            access_key_id: required("AWS_ACCESS_KEY_ID")?,
            secret_access_key: required("AWS_SECRET_ACCESS_KEY")?,
            bucket: required("S3_BUCKET_NAME")?,
            endpoint_url: env::var("S3_ENDPOINT_URL").ok(),
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
        })
    }
}

fn required(name: &str) -> Result<String> {
    env::var(name).with_context(|| format!("{} must be set", name))
}

#[cfg(test)]
mod tests {
    use super::*;

    // Env vars are process-global, so the required/optional cases run in
    // one test to keep them off each other's toes.
    #[test]
    fn from_env_reads_required_and_optional_settings() {
        unsafe {
            env::set_var("AWS_REGION", "ap-southeast-1");
            env::set_var("AWS_ACCESS_KEY_ID", "test-key");
            env::set_var("AWS_SECRET_ACCESS_KEY", "test-secret");
            env::set_var("S3_BUCKET_NAME", "media");
            env::remove_var("S3_ENDPOINT_URL");
            env::remove_var("PORT");
        }

        let config = StorageConfig::from_env().unwrap();
        assert_eq!(config.region, "ap-southeast-1");
        assert_eq!(config.bucket, "media");
        assert_eq!(config.endpoint_url, None);
        assert_eq!(config.port, 3000);

        unsafe {
            env::set_var("PORT", "8080");
            env::set_var("S3_ENDPOINT_URL", "http://127.0.0.1:9000");
        }
        let config = StorageConfig::from_env().unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(
            config.endpoint_url.as_deref(),
            Some("http://127.0.0.1:9000")
        );

        unsafe { env::remove_var("S3_BUCKET_NAME") };
        let err = StorageConfig::from_env().unwrap_err();
        assert!(err.to_string().contains("S3_BUCKET_NAME"));
    }
}
