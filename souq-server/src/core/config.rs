//! Server configuration
//!
//! All settings come from environment variables with development-friendly
//! defaults:
//!
//! | variable | default | meaning |
//! |----------|---------|---------|
//! | HTTP_PORT | 3000 | HTTP API port |
//! | DATABASE_PATH | souq.db | SQLite database file |
//! | BUSINESS_TIMEZONE | Africa/Cairo | quota calendar timezone |
//! | ENVIRONMENT | development | development \| staging \| production |
//! | LOG_DIR | (stdout) | daily-rolling log directory |

use chrono_tz::Tz;

use crate::auth::JwtConfig;

#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP API port
    pub http_port: u16,
    /// SQLite database file path
    pub database_path: String,
    /// Timezone that quota calendar months are computed in
    pub business_timezone: Tz,
    /// JWT verification configuration
    pub jwt: JwtConfig,
    /// Run environment: development | staging | production
    pub environment: String,
    /// Optional directory for rolling file logs
    pub log_dir: Option<String>,
}

impl Config {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset.
    pub fn from_env() -> Self {
        let business_timezone = std::env::var("BUSINESS_TIMEZONE")
            .ok()
            .and_then(|tz| {
                tz.parse::<Tz>()
                    .map_err(|_| tracing::warn!("Unknown BUSINESS_TIMEZONE '{tz}', using default"))
                    .ok()
            })
            .unwrap_or(chrono_tz::Africa::Cairo);

        Self {
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            database_path: std::env::var("DATABASE_PATH").unwrap_or_else(|_| "souq.db".into()),
            business_timezone,
            jwt: JwtConfig::default(),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            log_dir: std::env::var("LOG_DIR").ok(),
        }
    }

    /// Override the database path (used by tests)
    pub fn with_database_path(mut self, path: impl Into<String>) -> Self {
        self.database_path = path.into();
        self
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
