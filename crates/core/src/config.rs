use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;
use std::path::Path;

const ENV_PREFIX: &str = "CAPTURE_INFO";
const MAX_TOKEN_EXPIRY_SECONDS: i64 = 10 * 365 * 24 * 60 * 60;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub auth: AuthConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    /// HMAC secret used to sign and verify bearer tokens. No default: a missing
    /// secret must stop the process from starting.
    pub jwt_secret: String,
    #[serde(default = "default_token_expiry")]
    pub token_expiry_seconds: i64,
    #[serde(default = "default_issuer")]
    pub issuer: String,
    /// When set, revoked tokens are dropped from memory once they expire.
    #[serde(default)]
    pub revocation_sweep_seconds: Option<u64>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_filter")]
    pub filter: String,
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
            json: false,
        }
    }
}

fn default_token_expiry() -> i64 {
    3 * 60 * 60 // 3 hours
}

fn default_issuer() -> String {
    "capture-info".to_string()
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl AppConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(File::from(path.as_ref()))
            .build()?;

        let app_config: Self = config.try_deserialize()?;
        app_config.validate()?;
        Ok(app_config)
    }

    /// Load configuration from an in-memory TOML document
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(File::from_str(contents, FileFormat::Toml))
            .build()?;

        let app_config: Self = config.try_deserialize()?;
        app_config.validate()?;
        Ok(app_config)
    }

    /// Load configuration with environment variable overrides
    /// Environment variables are prefixed with CAPTURE_INFO_ and nested with `__`
    /// Example: CAPTURE_INFO_AUTH__JWT_SECRET, CAPTURE_INFO_SERVER__PORT
    ///
    /// Returns the config and a list of environment variable overrides
    pub fn load_with_env() -> Result<(Self, Vec<String>), ConfigError> {
        let config = Config::builder()
            .add_source(File::with_name("capture-info").required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let env_vars = [
            ("CAPTURE_INFO_AUTH__JWT_SECRET", "auth.jwt_secret"),
            ("CAPTURE_INFO_AUTH__TOKEN_EXPIRY_SECONDS", "auth.token_expiry_seconds"),
            ("CAPTURE_INFO_AUTH__ISSUER", "auth.issuer"),
            ("CAPTURE_INFO_AUTH__REVOCATION_SWEEP_SECONDS", "auth.revocation_sweep_seconds"),
            ("CAPTURE_INFO_SERVER__HOST", "server.host"),
            ("CAPTURE_INFO_SERVER__PORT", "server.port"),
            ("CAPTURE_INFO_LOGGING__FILTER", "logging.filter"),
            ("CAPTURE_INFO_LOGGING__JSON", "logging.json"),
        ];

        let overrides = env_vars
            .into_iter()
            .filter(|(env_var, _)| std::env::var(env_var).is_ok())
            .map(|(_, config_key)| config_key.to_string())
            .collect();

        let app_config: Self = config.try_deserialize()?;
        app_config.validate()?;
        Ok((app_config, overrides))
    }

    /// Reject settings the server cannot safely start with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.auth.jwt_secret.trim().is_empty() {
            return Err(ConfigError::Message(
                "auth.jwt_secret must not be empty".to_string(),
            ));
        }
        if !(1..=MAX_TOKEN_EXPIRY_SECONDS).contains(&self.auth.token_expiry_seconds) {
            return Err(ConfigError::Message(format!(
                "auth.token_expiry_seconds must be between 1 and {MAX_TOKEN_EXPIRY_SECONDS}"
            )));
        }
        if self.auth.issuer.trim().is_empty() {
            return Err(ConfigError::Message("auth.issuer must not be empty".to_string()));
        }
        if self.auth.revocation_sweep_seconds == Some(0) {
            return Err(ConfigError::Message(
                "auth.revocation_sweep_seconds must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        assert_eq!(default_token_expiry(), 10_800);
        assert_eq!(default_issuer(), "capture-info");
        assert_eq!(default_host(), "0.0.0.0");
        assert_eq!(default_port(), 8080);
        assert_eq!(default_log_filter(), "info");
    }

    #[test]
    fn test_minimal_config_fills_defaults() {
        let config = AppConfig::from_toml_str(
            r#"
            [auth]
            jwt_secret = "a-very-long-test-secret"
            "#,
        )
        .unwrap();

        assert_eq!(config.auth.token_expiry_seconds, 10_800);
        assert_eq!(config.auth.issuer, "capture-info");
        assert_eq!(config.auth.revocation_sweep_seconds, None);
        assert_eq!(config.bind_address(), "0.0.0.0:8080");
        assert!(!config.logging.json);
    }

    #[test]
    fn test_full_config() {
        let config = AppConfig::from_toml_str(
            r#"
            [auth]
            jwt_secret = "secret"
            token_expiry_seconds = 600
            issuer = "otorael"
            revocation_sweep_seconds = 30

            [server]
            host = "127.0.0.1"
            port = 9000

            [logging]
            filter = "debug"
            json = true
            "#,
        )
        .unwrap();

        assert_eq!(config.auth.token_expiry_seconds, 600);
        assert_eq!(config.auth.issuer, "otorael");
        assert_eq!(config.auth.revocation_sweep_seconds, Some(30));
        assert_eq!(config.bind_address(), "127.0.0.1:9000");
        assert_eq!(config.logging.filter, "debug");
        assert!(config.logging.json);
    }

    #[test]
    fn test_missing_secret_is_rejected() {
        let result = AppConfig::from_toml_str(
            r#"
            [server]
            port = 9000
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_blank_secret_is_rejected() {
        let result = AppConfig::from_toml_str(
            r#"
            [auth]
            jwt_secret = "   "
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_non_positive_expiry_is_rejected() {
        let result = AppConfig::from_toml_str(
            r#"
            [auth]
            jwt_secret = "secret"
            token_expiry_seconds = 0
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_huge_expiry_is_rejected() {
        let result = AppConfig::from_toml_str(
            r#"
            [auth]
            jwt_secret = "secret"
            token_expiry_seconds = 10000000000000
            "#,
        );
        assert!(result.is_err());

        let ten_years = AppConfig::from_toml_str(&format!(
            "[auth]\njwt_secret = \"secret\"\ntoken_expiry_seconds = {MAX_TOKEN_EXPIRY_SECONDS}\n"
        ));
        assert!(ten_years.is_ok());
    }
}
