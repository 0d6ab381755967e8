pub mod admin_user_conf;
pub mod app_conf;
pub mod email_conf;
pub mod jwt_conf;
pub mod minio_conf;
pub mod mongo_conf;

pub use email_conf::EmailConfig;
pub use jwt_conf::JwtConfig;
pub use minio_conf::MinioConfig;
pub use mongo_conf::MongoConfig;

use std::env;
use std::str::FromStr;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Environment variable not found: {0}")]
    EnvVarNotFound(String),

    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

/// Required environment variable; absence is a config error.
pub(crate) fn require_env(name: &str) -> Result<String, ConfigError> {
    env::var(name).map_err(|_| ConfigError::EnvVarNotFound(name.to_string()))
}

/// Optional environment variable parsed into `T`, falling back to `default`
/// when unset. A set-but-unparsable value is an error, not a silent default.
pub(crate) fn env_or<T: FromStr>(name: &str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|_| ConfigError::InvalidValue(format!("{name}: {raw:?}"))),
        Err(_) => Ok(default),
    }
}
