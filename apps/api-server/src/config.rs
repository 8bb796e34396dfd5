//! Application configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use quill_infra::{DatabaseConfig, JwtConfig};

/// Where uploads go and how they are post-processed.
#[derive(Debug, Clone)]
pub struct UploadConfig {
    pub dir: PathBuf,
    pub resize_width: u32,
    pub max_bytes: usize,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("./uploads"),
            resize_width: 800,
            max_bytes: 10 * 1024 * 1024,
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: Option<DatabaseConfig>,
    pub upload: UploadConfig,
    pub thumbnail_base_url: String,
    pub jwt: JwtConfig,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let database = env::var("DATABASE_URL").ok().map(|url| DatabaseConfig {
            url,
            max_connections: parse_var("DB_MAX_CONNECTIONS", 100),
            min_connections: parse_var("DB_MIN_CONNECTIONS", 10),
        });

        let defaults = UploadConfig::default();
        let upload = UploadConfig {
            dir: env::var("UPLOAD_DIR").map(PathBuf::from).unwrap_or(defaults.dir),
            resize_width: parse_var("UPLOAD_RESIZE_WIDTH", defaults.resize_width),
            max_bytes: parse_var("UPLOAD_MAX_BYTES", defaults.max_bytes),
        };

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: parse_var("PORT", 8080),
            database,
            upload,
            thumbnail_base_url: env::var("THUMBNAIL_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:8080/uploads/defaults".to_string()),
            jwt: JwtConfig::from_env(),
        }
    }
}

/// Parse `name` or fall back to `default`, warning on unparsable values.
fn parse_var<T: FromStr>(name: &str, default: T) -> T {
    match env::var(name) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            tracing::warn!(variable = name, value = %raw, "Ignoring unparsable setting");
            default
        }),
        Err(_) => default,
    }
}
