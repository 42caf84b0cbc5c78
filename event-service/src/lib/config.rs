use std::env;
use std::time::Duration;

use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

/// Secret shipped in `config/development.toml` for local runs.
pub const DEVELOPMENT_JWT_SECRET: &str = "development-only-jwt-secret-do-not-deploy";

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseDriver {
    Postgres,
    Sqlite,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub driver: DatabaseDriver,
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_query_timeout_secs")]
    pub query_timeout_secs: u64,
}

impl DatabaseConfig {
    pub fn query_timeout(&self) -> Duration {
        Duration::from_secs(self.query_timeout_secs)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    #[serde(default = "default_expiration_hours")]
    pub expiration_hours: i64,
}

fn default_max_connections() -> u32 {
    5
}

fn default_query_timeout_secs() -> u64 {
    3
}

fn default_expiration_hours() -> i64 {
    72
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (DATABASE__URL, JWT__SECRET, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        Self::load_from(&run_mode, Environment::default().separator("__"))
    }

    /// Layer the config files for `run_mode` under the given environment source.
    pub fn load_from(run_mode: &str, environment: Environment) -> Result<Self, ConfigError> {
        let configuration = ConfigBuilder::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on environment-specific configuration
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Layer on environment variables (with __ as separator)
            // Example: JWT__SECRET=... overrides jwt.secret
            .add_source(environment)
            .build()?;

        let config: Config = configuration.try_deserialize()?;
        config.validate(run_mode)?;

        Ok(config)
    }

    /// Reject configurations that must never start.
    ///
    /// The signing secret is mandatory, and the development fallback is
    /// refused outside local runs.
    pub fn validate(&self, run_mode: &str) -> Result<(), ConfigError> {
        if self.jwt.secret.trim().is_empty() {
            return Err(ConfigError::Message(
                "jwt.secret must be set (JWT__SECRET)".to_string(),
            ));
        }

        if run_mode == "production" && self.jwt.secret == DEVELOPMENT_JWT_SECRET {
            return Err(ConfigError::Message(
                "the development jwt.secret cannot be used in production".to_string(),
            ));
        }

        if self.jwt.expiration_hours <= 0 {
            return Err(ConfigError::Message(
                "jwt.expiration_hours must be positive".to_string(),
            ));
        }

        if self.jwt.secret == DEVELOPMENT_JWT_SECRET {
            tracing::warn!(run_mode, "Using the development JWT secret");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use config::Map;

    use super::*;

    fn environment(vars: &[(&str, &str)]) -> Environment {
        let source: Map<String, String> = vars
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();

        Environment::default().separator("__").source(Some(source))
    }

    fn config_with_secret(secret: &str) -> Config {
        Config {
            database: DatabaseConfig {
                driver: DatabaseDriver::Sqlite,
                url: "sqlite::memory:".to_string(),
                max_connections: 1,
                query_timeout_secs: 3,
            },
            server: ServerConfig { http_port: 8080 },
            jwt: JwtConfig {
                secret: secret.to_string(),
                expiration_hours: 72,
            },
        }
    }

    #[test]
    fn test_validate_rejects_empty_secret() {
        let config = config_with_secret("   ");
        assert!(config.validate("development").is_err());
    }

    #[test]
    fn test_validate_rejects_development_secret_in_production() {
        let config = config_with_secret(DEVELOPMENT_JWT_SECRET);

        assert!(config.validate("development").is_ok());
        assert!(config.validate("production").is_err());
    }

    #[test]
    fn test_validate_accepts_configured_secret() {
        let config = config_with_secret("a-real-secret-loaded-from-the-environment");
        assert!(config.validate("production").is_ok());
    }

    #[test]
    fn test_query_timeout() {
        let config = config_with_secret("secret");
        assert_eq!(config.database.query_timeout(), Duration::from_secs(3));
    }

    #[test]
    fn test_driver_deserializes_lowercase() {
        let driver: DatabaseDriver = serde_json::from_str("\"postgres\"").unwrap();
        assert_eq!(driver, DatabaseDriver::Postgres);
    }

    #[test]
    fn test_production_takes_secret_from_environment() {
        let config = Config::load_from(
            "production",
            environment(&[
                ("JWT__SECRET", "a-real-production-secret-value"),
                ("DATABASE__URL", "postgres://app:app@db:5432/events"),
                ("JWT__EXPIRATION_HOURS", "12"),
            ]),
        )
        .unwrap();

        assert_eq!(config.jwt.secret, "a-real-production-secret-value");
        assert_eq!(config.jwt.expiration_hours, 12);
        assert_eq!(config.database.url, "postgres://app:app@db:5432/events");
        assert_eq!(config.database.driver, DatabaseDriver::Postgres);
    }

    #[test]
    fn test_production_without_secret_refuses_to_start() {
        let result = Config::load_from("production", environment(&[]));
        assert!(result.is_err());
    }
}
