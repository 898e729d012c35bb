use crate::config::StorageConfig;
use crate::services::storage::S3StorageService;
use aws_sdk_s3::config::Region;
use std::sync::Arc;
use tracing::info;

pub async fn setup_storage(config: &StorageConfig) -> Arc<S3StorageService> {
    match &config.endpoint_url {
        Some(endpoint) => info!("☁️  S3 Storage: {} (Bucket: {})", endpoint, config.bucket),
        None => info!(
            "☁️  S3 Storage: region {} (Bucket: {})",
            config.region, config.bucket
        ),
    }

    let mut loader = aws_config::from_env()
        .region(Region::new(config.region.clone()))
        .credentials_provider(aws_sdk_s3::config::Credentials::new(
            config.access_key_id.clone(),
            config.secret_access_key.clone(),
            None,
            None,
            "static",
        ));

    // A custom endpoint means MinIO or another self-hosted store, which
    // wants path-style addressing instead of virtual-hosted buckets.
    if let Some(endpoint) = &config.endpoint_url {
        loader = loader.endpoint_url(endpoint);
    }
    let aws_config = loader.load().await;

    let s3_config = aws_sdk_s3::config::Builder::from(&aws_config)
        .force_path_style(config.endpoint_url.is_some())
        .build();

    let s3_client = aws_sdk_s3::Client::from_conf(s3_config);

    // Probe the bucket up front so a misconfigured store shows up in the
    // logs at startup rather than on the first upload.
    match s3_client.head_bucket().bucket(&config.bucket).send().await {
        Ok(_) => info!("✅ Bucket '{}' is ready", config.bucket),
        Err(_) => {
            info!("🪣 Bucket '{}' not found, creating...", config.bucket);
            if let Err(e) = s3_client
                .create_bucket()
                .bucket(&config.bucket)
                .send()
                .await
            {
                tracing::error!("❌ Failed to create bucket '{}': {}", config.bucket, e);
            } else {
                info!("✅ Bucket '{}' created successfully", config.bucket);
            }
        }
    }

    Arc::new(S3StorageService::new(s3_client, config.bucket.clone()))
}
