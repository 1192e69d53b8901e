/// Server configuration
use crate::error::{ApiError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_server")]
    pub server: ServerSettings,

    #[serde(default = "default_database")]
    pub database: DatabaseSettings,

    #[serde(default = "default_redis")]
    pub redis: RedisSettings,

    #[serde(default = "default_rabbitmq")]
    pub rabbitmq: RabbitMqSettings,

    #[serde(default = "default_storage")]
    pub storage: StorageSettings,

    pub auth: AuthSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseSettings {
    #[serde(default = "default_database_url")]
    pub url: String,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RedisSettings {
    #[serde(default = "default_redis_url")]
    pub url: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RabbitMqSettings {
    #[serde(default = "default_rabbitmq_url")]
    pub url: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageSettings {
    /// Which file store serves cover uploads
    #[serde(default = "default_storage_kind")]
    pub kind: StorageKind,

    /// Base directory of the local store
    #[serde(default = "default_upload_dir")]
    pub upload_dir: PathBuf,

    #[serde(default = "default_s3")]
    pub s3: S3Settings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageKind {
    Local,
    S3,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct S3Settings {
    #[serde(default)]
    pub bucket: String,

    #[serde(default = "default_s3_region")]
    pub region: String,

    /// Custom endpoint for S3-compatible stores (MinIO); requests use
    /// path-style addressing when set
    #[serde(default)]
    pub endpoint: Option<String>,

    #[serde(default)]
    pub access_key: Option<String>,

    #[serde(default)]
    pub secret_key: Option<String>,

    /// Presigned GET expiry in seconds
    #[serde(default = "default_s3_url_expiry")]
    pub url_expiry_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthSettings {
    pub access_token_key: String,

    pub refresh_token_key: String,

    /// Access-token lifetime in seconds
    #[serde(default = "default_access_token_age")]
    pub access_token_age_secs: u64,

    /// Refresh-token lifetime in seconds
    #[serde(default = "default_refresh_token_age")]
    pub refresh_token_age_secs: u64,
}

impl ServerConfig {
    /// Load configuration from file and environment
    pub fn load() -> Result<Self> {
        let mut settings = config::Config::builder();

        // Load from config file if it exists
        let config_path = PathBuf::from("config.toml");
        if config_path.exists() {
            settings = settings.add_source(config::File::from(config_path));
        }

        // Override with environment variables
        // (OPENMUSIC__AUTH__ACCESS_TOKEN_KEY=… etc.)
        settings = settings.add_source(
            config::Environment::with_prefix("OPENMUSIC")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| ApiError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| ApiError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.auth.access_token_key.is_empty() || self.auth.refresh_token_key.is_empty() {
            return Err(ApiError::Config(
                "JWT keys are required (set OPENMUSIC__AUTH__ACCESS_TOKEN_KEY \
                 and OPENMUSIC__AUTH__REFRESH_TOKEN_KEY)"
                    .to_string(),
            ));
        }

        if self.storage.kind == StorageKind::S3 && self.storage.s3.bucket.is_empty() {
            return Err(ApiError::Config(
                "S3 storage requires a bucket name (set OPENMUSIC__STORAGE__S3__BUCKET)"
                    .to_string(),
            ));
        }

        Ok(())
    }
}

// Default values
fn default_server() -> ServerSettings {
    ServerSettings {
        host: default_host(),
        port: default_port(),
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_database() -> DatabaseSettings {
    DatabaseSettings {
        url: default_database_url(),
        max_connections: default_max_connections(),
    }
}

fn default_database_url() -> String {
    "postgres://localhost/openmusic".to_string()
}

fn default_max_connections() -> u32 {
    5
}

fn default_redis() -> RedisSettings {
    RedisSettings {
        url: default_redis_url(),
    }
}

fn default_redis_url() -> String {
    "redis://127.0.0.1:6379".to_string()
}

fn default_rabbitmq() -> RabbitMqSettings {
    RabbitMqSettings {
        url: default_rabbitmq_url(),
    }
}

fn default_rabbitmq_url() -> String {
    "amqp://127.0.0.1:5672/%2f".to_string()
}

fn default_storage() -> StorageSettings {
    StorageSettings {
        kind: default_storage_kind(),
        upload_dir: default_upload_dir(),
        s3: default_s3(),
    }
}

fn default_storage_kind() -> StorageKind {
    StorageKind::Local
}

fn default_upload_dir() -> PathBuf {
    PathBuf::from("./uploads")
}

fn default_s3() -> S3Settings {
    S3Settings {
        bucket: String::new(),
        region: default_s3_region(),
        endpoint: None,
        access_key: None,
        secret_key: None,
        url_expiry_secs: default_s3_url_expiry(),
    }
}

fn default_s3_region() -> String {
    "us-east-1".to_string()
}

fn default_s3_url_expiry() -> u64 {
    3600
}

fn default_access_token_age() -> u64 {
    1800
}

fn default_refresh_token_age() -> u64 {
    60 * 60 * 24 * 7
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_config() -> ServerConfig {
        ServerConfig {
            server: default_server(),
            database: default_database(),
            redis: default_redis(),
            rabbitmq: default_rabbitmq(),
            storage: default_storage(),
            auth: AuthSettings {
                access_token_key: "access".to_string(),
                refresh_token_key: "refresh".to_string(),
                access_token_age_secs: default_access_token_age(),
                refresh_token_age_secs: default_refresh_token_age(),
            },
        }
    }

    #[test]
    fn defaults_validate() {
        assert!(minimal_config().validate().is_ok());
    }

    #[test]
    fn missing_jwt_keys_are_rejected() {
        let mut config = minimal_config();
        config.auth.access_token_key.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn s3_storage_requires_a_bucket() {
        let mut config = minimal_config();
        config.storage.kind = StorageKind::S3;
        assert!(config.validate().is_err());

        config.storage.s3.bucket = "covers".to_string();
        assert!(config.validate().is_ok());
    }
}
