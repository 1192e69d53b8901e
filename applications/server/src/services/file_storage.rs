/// File storage service - cover images on local disk or an S3-compatible
/// object store
///
/// The variant is fixed from configuration at startup; handlers only see
/// the uniform store/resolve/delete surface. Stored objects are addressed
/// by an opaque key (`covers/YYYY/MM/<millis>.<ext>`) which is what the
/// database records.
use crate::{
    config::{S3Settings, StorageKind, StorageSettings},
    error::{ApiError, Result},
};
use aws_sdk_s3::{presigning::PresigningConfig, primitives::ByteStream};
use chrono::{Datelike, Utc};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs;

pub enum FileStorage {
    Local(LocalStore),
    S3(S3Store),
}

impl FileStorage {
    /// Build the store selected by configuration
    pub async fn from_config(settings: &StorageSettings) -> Result<Self> {
        match settings.kind {
            StorageKind::Local => Ok(Self::Local(LocalStore::new(settings.upload_dir.clone()).await?)),
            StorageKind::S3 => Ok(Self::S3(S3Store::from_settings(&settings.s3).await)),
        }
    }

    /// Persist file bytes and return the storage key to record
    pub async fn store(&self, data: &[u8], filename: &str, content_type: &str) -> Result<String> {
        let key = cover_key(filename);
        match self {
            Self::Local(store) => store.write(&key, data).await?,
            Self::S3(store) => store.put(&key, data, content_type).await?,
        }
        Ok(key)
    }

    /// Resolve a storage key to a client-usable URL
    pub async fn resolve_url(&self, key: &str) -> Result<String> {
        match self {
            Self::Local(_) => Ok(format!("/uploads/{key}")),
            Self::S3(store) => store.presigned_url(key).await,
        }
    }

    /// Remove a stored object; removing an absent object is not an error
    pub async fn delete(&self, key: &str) -> Result<()> {
        match self {
            Self::Local(store) => store.remove(key).await,
            Self::S3(store) => store.remove(key).await,
        }
    }

    /// The directory to expose under `/uploads`; only the local variant
    /// serves files itself
    pub fn local_uploads_dir(&self) -> Option<&Path> {
        match self {
            Self::Local(store) => Some(&store.base_dir),
            Self::S3(_) => None,
        }
    }
}

/// Date-bucketed key with a millisecond timestamp name, preserving the
/// upload's file extension
fn cover_key(filename: &str) -> String {
    let now = Utc::now();
    let extension = Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("bin");

    format!(
        "covers/{}/{:02}/{}.{}",
        now.year(),
        now.month(),
        now.timestamp_millis(),
        extension
    )
}

pub struct LocalStore {
    base_dir: PathBuf,
}

impl LocalStore {
    async fn new(base_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&base_dir).await?;
        Ok(Self { base_dir })
    }

    async fn write(&self, key: &str, data: &[u8]) -> Result<()> {
        let path = self.base_dir.join(key);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        fs::write(&path, data).await?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let path = self.base_dir.join(key);
        if path.exists() {
            fs::remove_file(&path).await?;
        }
        Ok(())
    }
}

pub struct S3Store {
    client: aws_sdk_s3::Client,
    bucket: String,
    url_expiry: Duration,
}

impl S3Store {
    async fn from_settings(settings: &S3Settings) -> Self {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_config::Region::new(settings.region.clone()));

        if let (Some(access_key), Some(secret_key)) = (&settings.access_key, &settings.secret_key)
        {
            loader = loader.credentials_provider(aws_sdk_s3::config::Credentials::new(
                access_key,
                secret_key,
                None,
                None,
                "openmusic-config",
            ));
        }

        let sdk_config = loader.load().await;
        let mut builder = aws_sdk_s3::config::Builder::from(&sdk_config);

        // MinIO and other S3-compatible stores need a fixed endpoint and
        // path-style requests
        if let Some(endpoint) = &settings.endpoint {
            builder = builder.endpoint_url(endpoint).force_path_style(true);
        }

        Self {
            client: aws_sdk_s3::Client::from_conf(builder.build()),
            bucket: settings.bucket.clone(),
            url_expiry: Duration::from_secs(settings.url_expiry_secs),
        }
    }

    async fn put(&self, key: &str, data: &[u8], content_type: &str) -> Result<()> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(data.to_vec()))
            .content_type(content_type)
            .send()
            .await
            .map_err(|e| ApiError::Storage(e.to_string()))?;

        Ok(())
    }

    async fn presigned_url(&self, key: &str) -> Result<String> {
        let presigning = PresigningConfig::expires_in(self.url_expiry)
            .map_err(|e| ApiError::Storage(e.to_string()))?;

        let request = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .presigned(presigning)
            .await
            .map_err(|e| ApiError::Storage(e.to_string()))?;

        Ok(request.uri().to_string())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| ApiError::Storage(e.to_string()))?;

        Ok(())
    }
}
