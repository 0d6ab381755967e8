use std::env;

pub struct AppConfig {
    pub host: String,
    pub port: u16,
}

impl AppConfig {
    /// Bind address, defaulting to localhost:8080
    pub fn from_env() -> Self {
        AppConfig {
            host: env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: crate::config::env_or("APP_PORT", 8080).unwrap_or(8080),
        }
    }
}
