use serde::{Deserialize, Serialize};
use std::env;
use tracing::debug;

use crate::config::{env_or, require_env, ConfigError};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MongoConfig {
    pub uri: String,
    pub database: String,
    pub username: Option<String>,
    pub password: Option<String>,
    pub pool_size: u32,
    pub connection_timeout_secs: u64,
}

impl MongoConfig {
    /// Reads `MONGO_URI` and `MONGO_DATABASE` (required), optional
    /// credentials, and pool tuning with defaults of 10 connections and a
    /// 5 second connect timeout.
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = MongoConfig {
            uri: require_env("MONGO_URI")?,
            database: require_env("MONGO_DATABASE")?,
            username: env::var("MONGO_USERNAME").ok(),
            password: env::var("MONGO_PASSWORD").ok(),
            pool_size: env_or("MONGO_POOL_SIZE", 10)?,
            connection_timeout_secs: env_or("MONGO_CONNECTION_TIMEOUT", 5)?,
        };
        debug!(database = %config.database, "mongo config loaded");
        Ok(config)
    }
}
