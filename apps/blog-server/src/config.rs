//! Application configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

use blog_infra::database::DatabaseConfig;

/// Default database name, created by the server on first write.
pub const DEFAULT_DATABASE_NAME: &str = "restful_blog_app";

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Directory served verbatim at the site root.
    pub static_dir: PathBuf,
    pub database: Option<DatabaseConfig>,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let database = env::var("DATABASE_URL").ok().map(|url| DatabaseConfig {
            url,
            database_name: env::var("DATABASE_NAME")
                .unwrap_or_else(|_| DEFAULT_DATABASE_NAME.to_string()),
            max_connections: parse_var("DB_MAX_CONNECTIONS").unwrap_or(10),
            min_connections: parse_var("DB_MIN_CONNECTIONS").unwrap_or(1),
        });

        Self {
            // `IP` is what hosted Node-style environments export.
            host: env::var("IP")
                .or_else(|_| env::var("HOST"))
                .unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: parse_var("PORT").unwrap_or(8080),
            static_dir: env::var("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("public")),
            database,
        }
    }
}

fn parse_var<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|s| s.parse().ok())
}
