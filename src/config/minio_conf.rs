use serde::{Deserialize, Serialize};
use std::env;

use crate::config::{env_or, require_env, ConfigError};

/// Settings for the publication blob store (uploaded documents, cover
/// images, profile images).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MinioConfig {
    pub endpoint: String,
    pub access_key: String,
    pub secret_key: String,
    pub bucket_name: String,
    /// Base URL prepended to generated public download links
    pub links_prefix: String,
    pub region: Option<String>,
    pub secure: bool,
}

impl MinioConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(MinioConfig {
            endpoint: require_env("MINIO_ENDPOINT")?,
            access_key: require_env("MINIO_ACCESS_KEY")?,
            secret_key: require_env("MINIO_SECRET_KEY")?,
            bucket_name: require_env("MINIO_BUCKET_NAME")?,
            links_prefix: env::var("MINIO_LINKS_PREFIX")
                .unwrap_or_else(|_| "http://127.0.0.1:9000".to_string()),
            region: env::var("MINIO_REGION")
                .ok()
                .or_else(|| Some("us-east-1".to_string())),
            secure: env_or("MINIO_SECURE", false)?,
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.endpoint.is_empty() {
            return Err(ConfigError::ValidationError(
                "Endpoint cannot be empty".to_string(),
            ));
        }
        if self.access_key.is_empty() || self.secret_key.is_empty() {
            return Err(ConfigError::ValidationError(
                "Credentials cannot be empty".to_string(),
            ));
        }
        if self.bucket_name.is_empty() {
            return Err(ConfigError::ValidationError(
                "Bucket name cannot be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Full endpoint URL including scheme
    pub fn get_endpoint_url(&self) -> String {
        let scheme = if self.secure { "https" } else { "http" };
        format!("{}://{}", scheme, self.endpoint)
    }
}
