use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client as S3Client;
use std::sync::Arc;
use uuid::Uuid;

use crate::config::storage::StorageSettings;
use crate::errors::ApiError;

/// Object storage for league, team and player images over an S3-compatible
/// backend (MinIO in development).
#[derive(Clone)]
pub struct StorageService {
    client: Arc<S3Client>,
    bucket_name: String,
}

impl StorageService {
    pub async fn new(settings: &StorageSettings) -> Result<Self, ApiError> {
        let service = Self {
            client: Arc::new(settings.create_s3_client()),
            bucket_name: settings.bucket_name.clone(),
        };
        service.init_bucket().await?;
        Ok(service)
    }

    async fn init_bucket(&self) -> Result<(), ApiError> {
        let exists = self
            .client
            .head_bucket()
            .bucket(&self.bucket_name)
            .send()
            .await
            .is_ok();
        if !exists {
            tracing::info!("Creating storage bucket {}", self.bucket_name);
            self.client
                .create_bucket()
                .bucket(&self.bucket_name)
                .send()
                .await
                .map_err(|e| {
                    ApiError::Invariant(format!("failed to create storage bucket: {}", e))
                })?;
        }
        Ok(())
    }

    /// Store image bytes under a namespaced key and return that key.
    pub async fn upload_image(
        &self,
        namespace: &str,
        owner_id: Uuid,
        file_name: &str,
        content_type: &str,
        data: Vec<u8>,
    ) -> Result<String, ApiError> {
        let object_key = format!("{}/{}/{}", namespace, owner_id, file_name);
        tracing::info!(
            "Uploading {} bytes to storage as {}",
            data.len(),
            object_key
        );

        self.client
            .put_object()
            .bucket(&self.bucket_name)
            .key(&object_key)
            .body(ByteStream::from(data))
            .content_type(content_type)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Image upload failed for {}: {}", object_key, e);
                ApiError::Invariant(format!("image upload failed: {}", e))
            })?;

        Ok(object_key)
    }

    pub async fn remove_image(&self, object_key: &str) -> Result<(), ApiError> {
        self.client
            .delete_object()
            .bucket(&self.bucket_name)
            .key(object_key)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Image delete failed for {}: {}", object_key, e);
                ApiError::Invariant(format!("image delete failed: {}", e))
            })?;
        Ok(())
    }

    /// Fetch image bytes and their content type.
    pub async fn download_image(&self, object_key: &str) -> Result<(Vec<u8>, String), ApiError> {
        let response = self
            .client
            .get_object()
            .bucket(&self.bucket_name)
            .key(object_key)
            .send()
            .await
            .map_err(|_| ApiError::NotFound("image"))?;

        let content_type = response
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let data = response
            .body
            .collect()
            .await
            .map_err(|e| ApiError::Invariant(format!("image read failed: {}", e)))?
            .into_bytes()
            .to_vec();
        Ok((data, content_type))
    }

    /// Public URL served through the image download endpoint.
    pub fn image_url(&self, object_key: &str) -> String {
        format!("/api/images/{}", object_key)
    }
}
