//! Application settings loaded from environment variables.

use std::env;

use super::constants::{
    DEFAULT_ASSET_FOLDER, DEFAULT_DATABASE_URL, DEFAULT_REDIS_URL, DEFAULT_SERVER_HOST,
    DEFAULT_SERVER_PORT, MIN_JWT_SECRET_LENGTH,
};

/// Application configuration
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub redis_url: String,
    jwt_secret: String,
    pub server_host: String,
    pub server_port: u16,
    pub asset_host_url: String,
    pub asset_host_key: String,
    asset_host_secret: String,
    pub asset_folder: String,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"[REDACTED]")
            .field("redis_url", &"[REDACTED]")
            .field("jwt_secret", &"[REDACTED]")
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .field("asset_host_url", &self.asset_host_url)
            .field("asset_host_key", &"[REDACTED]")
            .field("asset_host_secret", &"[REDACTED]")
            .field("asset_folder", &self.asset_folder)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Panics
    /// Panics if JWT_SECRET is not set or is too short (security requirement).
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let jwt_secret = env::var("JWT_SECRET").unwrap_or_else(|_| {
            if cfg!(debug_assertions) {
                // Development mode: use default but warn
                tracing::warn!("JWT_SECRET not set, using insecure default for development");
                "dev-secret-key-minimum-32-chars!!".to_string()
            } else {
                // Production mode: panic
                panic!("JWT_SECRET environment variable must be set in production");
            }
        });

        // Validate JWT secret length
        if jwt_secret.len() < MIN_JWT_SECRET_LENGTH {
            panic!(
                "JWT_SECRET must be at least {} characters long",
                MIN_JWT_SECRET_LENGTH
            );
        }

        Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            redis_url: env::var("REDIS_URL").unwrap_or_else(|_| DEFAULT_REDIS_URL.to_string()),
            jwt_secret,
            server_host: env::var("SERVER_HOST")
                .unwrap_or_else(|_| DEFAULT_SERVER_HOST.to_string()),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_SERVER_PORT),
            asset_host_url: env::var("ASSET_HOST_URL").unwrap_or_default(),
            asset_host_key: env::var("ASSET_HOST_KEY").unwrap_or_default(),
            asset_host_secret: env::var("ASSET_HOST_SECRET").unwrap_or_default(),
            asset_folder: env::var("ASSET_FOLDER")
                .unwrap_or_else(|_| DEFAULT_ASSET_FOLDER.to_string()),
        }
    }

    /// Get the shared secret used to derive the token signing keys.
    pub fn jwt_secret(&self) -> &str {
        &self.jwt_secret
    }

    /// Get the asset host API secret.
    pub fn asset_host_secret(&self) -> &str {
        &self.asset_host_secret
    }

    /// Get the full server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}
