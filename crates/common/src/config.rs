//! Application configuration.

use serde::Deserialize;
use std::path::Path;

/// Prefix for environment variable overrides, e.g. `HOOKS__LOGGING__JSON=true`.
const ENV_PREFIX: &str = "HOOKS";

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Inbound webhook decoding configuration.
    #[serde(default)]
    pub incoming_webhooks: IncomingWebhookConfig,
    /// Database configuration, absent when nothing is persisted.
    #[serde(default)]
    pub database: Option<DatabaseConfig>,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// `tracing-subscriber` filter directive, overridden by `RUST_LOG`.
    #[serde(default = "default_log_filter")]
    pub filter: String,
    /// Emit JSON lines instead of human readable output.
    #[serde(default)]
    pub json: bool,
}

/// Inbound webhook decoding configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct IncomingWebhookConfig {
    /// Retry a failed decode after escaping raw control characters that
    /// appear inside JSON string literals.
    #[serde(default = "default_true")]
    pub repair_control_chars: bool,
}

/// Database connection configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// `PostgreSQL` connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
            json: false,
        }
    }
}

impl Default for IncomingWebhookConfig {
    fn default() -> Self {
        Self {
            repair_control_chars: true,
        }
    }
}

fn default_log_filter() -> String {
    "hooks=info,hookcheck=info".to_string()
}

const fn default_max_connections() -> u32 {
    100
}

const fn default_min_connections() -> u32 {
    5
}

const fn default_true() -> bool {
    true
}

impl Config {
    /// Load configuration from files and environment variables.
    ///
    /// Configuration is loaded in the following order:
    /// 1. `.env` (if present, via `dotenvy`)
    /// 2. `config/default.toml`
    /// 3. `config/{environment}.toml` (based on `HOOKS_ENV`)
    /// 4. Environment variables with `HOOKS__` prefix
    pub fn load() -> Result<Self, config::ConfigError> {
        // A missing .env file is the common case.
        let _ = dotenvy::dotenv();

        let env = std::env::var("HOOKS_ENV").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Load configuration from a specific file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::from(path.as_ref()))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn from_toml(source: &str) -> Config {
        config::Config::builder()
            .add_source(config::File::from_str(source, config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_empty_source_uses_defaults() {
        let config = from_toml("");
        assert_eq!(config.logging.filter, "hooks=info,hookcheck=info");
        assert!(!config.logging.json);
        assert!(config.incoming_webhooks.repair_control_chars);
        assert!(config.database.is_none());
    }

    #[test]
    fn test_sections_override_defaults() {
        let config = from_toml(
            r#"
            [logging]
            filter = "hooks=debug"
            json = true

            [incoming_webhooks]
            repair_control_chars = false

            [database]
            url = "postgres://localhost/hooks"
            "#,
        );
        assert_eq!(config.logging.filter, "hooks=debug");
        assert!(config.logging.json);
        assert!(!config.incoming_webhooks.repair_control_chars);

        let database = config.database.unwrap();
        assert_eq!(database.url, "postgres://localhost/hooks");
        assert_eq!(database.max_connections, 100);
        assert_eq!(database.min_connections, 5);
    }
}
