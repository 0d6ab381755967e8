use async_trait::async_trait;
use bytes::Bytes;
use minio::s3::args::{
    BucketExistsArgs, GetObjectArgs, MakeBucketArgs, PutObjectArgs, RemoveObjectArgs,
};
use minio::s3::client::{Client, ClientBuilder};
use minio::s3::creds::StaticProvider;
use minio::s3::http::BaseUrl;
use std::io::Cursor;
use tracing::{debug, error, instrument};

use crate::config::MinioConfig;

#[derive(Debug, thiserror::Error)]
pub enum MinioError {
    #[error("blob storage config: {0}")]
    ConfigError(String),
    #[error("blob storage connection: {0}")]
    ConnectionError(String),
    #[error("blob storage arguments: {0}")]
    InvalidArguments(String),
    #[error("blob storage operation: {0}")]
    OperationError(String),
}

/// Blob store seam used by the submission and profile services. Covers
/// uploads, deletes, and public download-link construction.
#[async_trait]
pub trait BlobStorage: Send + Sync {
    async fn put_object(
        &self,
        object_name: &str,
        data: Vec<u8>,
        content_type: Option<&str>,
    ) -> Result<(), MinioError>;
    async fn remove_object(&self, object_name: &str) -> Result<(), MinioError>;
    /// Public download link for an object (direct link, not presigned)
    fn download_link(&self, object_name: &str) -> String;
}

#[derive(Debug, Clone)]
pub struct MinioService {
    client: Client,
    pub config: MinioConfig,
}

impl MinioService {
    #[instrument(skip(config), fields(endpoint = %config.endpoint, bucket = %config.bucket_name))]
    pub async fn new(config: MinioConfig) -> Result<Self, MinioError> {
        config
            .validate()
            .map_err(|e| MinioError::ConfigError(e.to_string()))?;

        let base_url: BaseUrl = config
            .get_endpoint_url()
            .parse()
            .map_err(|e| MinioError::ConnectionError(format!("bad endpoint: {e}")))?;
        let credentials = StaticProvider::new(&config.access_key, &config.secret_key, None);
        let client = ClientBuilder::new(base_url)
            .provider(Some(Box::new(credentials)))
            .build()
            .map_err(|e| MinioError::ConnectionError(e.to_string()))?;

        let service = Self { client, config };
        service.ensure_bucket().await?;
        debug!("blob storage ready");
        Ok(service)
    }

    /// Creates the configured bucket on first startup
    async fn ensure_bucket(&self) -> Result<(), MinioError> {
        let bucket = &self.config.bucket_name;
        let exists_args =
            BucketExistsArgs::new(bucket).map_err(|e| MinioError::InvalidArguments(e.to_string()))?;
        let exists = self
            .client
            .bucket_exists(&exists_args)
            .await
            .map_err(|e| MinioError::OperationError(e.to_string()))?;

        if !exists {
            debug!(%bucket, "creating bucket");
            let make_args = MakeBucketArgs::new(bucket)
                .map_err(|e| MinioError::InvalidArguments(e.to_string()))?;
            self.client
                .make_bucket(&make_args)
                .await
                .map_err(|e| MinioError::OperationError(e.to_string()))?;
        }
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn get_object(&self, object_name: &str) -> Result<Bytes, MinioError> {
        let args = GetObjectArgs::new(&self.config.bucket_name, object_name)
            .map_err(|e| MinioError::InvalidArguments(e.to_string()))?;
        let response = self
            .client
            .get_object(&args)
            .await
            .map_err(|e| MinioError::OperationError(e.to_string()))?;
        response
            .bytes()
            .await
            .map_err(|e| MinioError::OperationError(e.to_string()))
    }
}

#[async_trait]
impl BlobStorage for MinioService {
    /// The client's put path blocks on a sync reader, so the whole upload
    /// runs on the blocking pool.
    #[instrument(skip(self, data), fields(object = %object_name, bytes = data.len()))]
    async fn put_object(
        &self,
        object_name: &str,
        data: Vec<u8>,
        content_type: Option<&str>,
    ) -> Result<(), MinioError> {
        let bucket = self.config.bucket_name.clone();
        let object = object_name.to_string();
        let client = self.client.clone();
        let content_type = content_type.map(str::to_string);

        tokio::task::spawn_blocking(move || {
            let size = data.len();
            let mut reader = Cursor::new(data);
            let mut args = PutObjectArgs::new(&bucket, &object, &mut reader, Some(size), None)
                .map_err(|e| MinioError::InvalidArguments(e.to_string()))?;
            if let Some(ref ct) = content_type {
                args.content_type = ct;
            }
            futures::executor::block_on(client.put_object(&mut args))
                .map_err(|e| MinioError::OperationError(e.to_string()))?;
            Ok(())
        })
        .await
        .map_err(|e| {
            error!("blocking upload task failed: {e}");
            MinioError::OperationError(e.to_string())
        })?
    }

    #[instrument(skip(self))]
    async fn remove_object(&self, object_name: &str) -> Result<(), MinioError> {
        let args = RemoveObjectArgs::new(&self.config.bucket_name, object_name)
            .map_err(|e| MinioError::InvalidArguments(e.to_string()))?;
        self.client
            .remove_object(&args)
            .await
            .map_err(|e| MinioError::OperationError(e.to_string()))?;
        debug!(object = %object_name, "object removed");
        Ok(())
    }

    fn download_link(&self, object_name: &str) -> String {
        format!(
            "{}/{}/{}",
            self.config.links_prefix.trim_end_matches('/'),
            self.config.bucket_name,
            object_name
        )
    }
}
