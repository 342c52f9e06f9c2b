use aws_config::Region;
use aws_sdk_s3::config::{Builder as S3ConfigBuilder, Credentials, SharedCredentialsProvider};
use aws_sdk_s3::Client as S3Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

/// S3-compatible object storage settings (MinIO in development).
#[derive(Debug, Deserialize, Clone)]
pub struct StorageSettings {
    pub endpoint: String,
    pub access_key: SecretString,
    pub secret_key: SecretString,
    pub bucket_name: String,
    pub region: String,
}

impl StorageSettings {
    pub fn create_s3_client(&self) -> S3Client {
        let creds = Credentials::new(
            self.access_key.expose_secret(),
            self.secret_key.expose_secret(),
            None,
            None,
            "matchday-storage",
        );

        let config = S3ConfigBuilder::new()
            .endpoint_url(&self.endpoint)
            .credentials_provider(SharedCredentialsProvider::new(creds))
            .region(Region::new(self.region.clone()))
            // Path-style addressing is required by MinIO.
            .force_path_style(true)
            .behavior_version_latest()
            .build();

        S3Client::from_conf(config)
    }
}
