use tracing::warn;

use crate::config::{env_or, require_env, ConfigError};

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub jwt_secret: String,
    /// Access token lifetime in minutes
    pub access_token_expiration: i64,
    /// Refresh token lifetime in minutes
    pub refresh_token_expiration: i64,
}

impl JwtConfig {
    /// Reads `JWT_SECRET` (required, at least 32 chars) and the two expiry
    /// knobs, defaulting to 60 minutes for access and a week for refresh.
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = JwtConfig {
            jwt_secret: require_env("JWT_SECRET")?,
            access_token_expiration: env_or("JWT_ACCESS_TOKEN_EXPIRY", 60)?,
            refresh_token_expiration: env_or("JWT_REFRESH_TOKEN_EXPIRY", 10080)?,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt_secret.len() < 32 {
            return Err(ConfigError::ValidationError(
                "JWT secret must be at least 32 characters long".to_string(),
            ));
        }
        if self.access_token_expiration <= 0 || self.refresh_token_expiration <= 0 {
            return Err(ConfigError::ValidationError(
                "Token expirations must be greater than 0".to_string(),
            ));
        }
        if self.access_token_expiration >= self.refresh_token_expiration {
            warn!("access tokens outlive refresh tokens; check the expiry settings");
        }
        Ok(())
    }
}

/// Defaults mirror the portal policy: 1 hour access tokens, 7 day refresh
/// tokens. Used by tests.
impl Default for JwtConfig {
    fn default() -> Self {
        JwtConfig {
            jwt_secret: "test_secret_key_for_jwt_testing_should_be_long_enough_for_security"
                .to_string(),
            access_token_expiration: 60,
            refresh_token_expiration: 10080,
        }
    }
}
