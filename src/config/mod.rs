//! Configuration loading and management

use serde::{Deserialize, Serialize};

/// Errors raised while loading configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Environment variable '{0}' is not set")]
    MissingEnv(String),

    #[error("Invalid database URL: {0}")]
    InvalidUrl(String),
}

/// HTTP server settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to bind, e.g. "127.0.0.1:3000"
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

/// Relational store settings
///
/// The connection string itself never lives in the config file: only the
/// name of the environment variable holding it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_url_env")]
    pub url_env: String,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Refuse unencrypted connections
    #[serde(default = "default_require_tls")]
    pub require_tls: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url_env: default_url_env(),
            max_connections: default_max_connections(),
            require_tls: default_require_tls(),
        }
    }
}

impl DatabaseConfig {
    /// Read the connection string from the configured environment variable
    pub fn connection_url(&self) -> Result<String, ConfigError> {
        match std::env::var(&self.url_env) {
            Ok(url) if !url.trim().is_empty() => Ok(url),
            _ => Err(ConfigError::MissingEnv(self.url_env.clone())),
        }
    }

    /// Connection options for the configured URL
    ///
    /// With `require_tls`, a missing, "disable", "allow" or "prefer" SSL mode
    /// is raised to `require`; "require" and the verifying modes are kept.
    /// The mode is read from the URL (`sslmode` or `ssl-mode`), then from
    /// `PGSSLMODE`.
    #[cfg(feature = "postgres")]
    pub fn connect_options(&self) -> Result<sqlx::postgres::PgConnectOptions, ConfigError> {
        use sqlx::postgres::{PgConnectOptions, PgSslMode};
        use std::str::FromStr;

        let url = self.connection_url()?;
        let options =
            PgConnectOptions::from_str(&url).map_err(|e| ConfigError::InvalidUrl(e.to_string()))?;

        if !self.require_tls {
            return Ok(options);
        }

        let requested = requested_ssl_mode(&url, std::env::var("PGSSLMODE").ok())?;
        match requested {
            Some(PgSslMode::Require | PgSslMode::VerifyCa | PgSslMode::VerifyFull) => Ok(options),
            _ => Ok(options.ssl_mode(PgSslMode::Require)),
        }
    }

    /// Open a connection pool
    #[cfg(feature = "postgres")]
    pub async fn connect(&self) -> anyhow::Result<sqlx::PgPool> {
        let options = self.connect_options()?;
        let pool = sqlx::postgres::PgPoolOptions::new()
            .max_connections(self.max_connections)
            .connect_with(options)
            .await?;
        Ok(pool)
    }
}

/// SSL mode named by the URL query, falling back to `env` (`PGSSLMODE`)
#[cfg(feature = "postgres")]
fn requested_ssl_mode(
    url: &str,
    env: Option<String>,
) -> Result<Option<sqlx::postgres::PgSslMode>, ConfigError> {
    let from_url = url
        .split_once('?')
        .map(|(_, query)| query)
        .into_iter()
        .flat_map(|query| query.split('&'))
        .filter_map(|pair| pair.split_once('='))
        .filter(|(key, _)| matches!(*key, "sslmode" | "ssl-mode"))
        .map(|(_, value)| value.to_string())
        .last();

    match from_url.or(env) {
        Some(mode) => mode
            .parse::<sqlx::postgres::PgSslMode>()
            .map(Some)
            .map_err(|_| ConfigError::InvalidUrl(format!("unknown sslmode '{}'", mode))),
        None => Ok(None),
    }
}

/// Complete application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub database: DatabaseConfig,
}

impl AppConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_string(),
            source,
        })?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config)
    }
}

fn default_bind() -> String {
    "127.0.0.1:3000".to_string()
}

fn default_url_env() -> String {
    "POSTGRES_URL".to_string()
}

fn default_max_connections() -> u32 {
    5
}

fn default_require_tls() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.server.bind, "127.0.0.1:3000");
        assert_eq!(config.database.url_env, "POSTGRES_URL");
        assert_eq!(config.database.max_connections, 5);
        assert!(config.database.require_tls);
    }

    #[test]
    fn test_partial_yaml_falls_back_to_defaults() {
        let config = AppConfig::from_yaml_str(
            r#"
database:
  url_env: INVOICES_DB_URL
"#,
        )
        .unwrap();

        assert_eq!(config.database.url_env, "INVOICES_DB_URL");
        assert_eq!(config.database.max_connections, 5);
        assert_eq!(config.server, ServerConfig::default());
    }

    #[test]
    fn test_yaml_serialization() {
        let config = AppConfig::default();
        let yaml = serde_yaml::to_string(&config).unwrap();

        let parsed = AppConfig::from_yaml_str(&yaml).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_invalid_yaml() {
        let err = AppConfig::from_yaml_str("server: [not, a, map]").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_env_var() {
        let database = DatabaseConfig {
            url_env: "INVOICE_ACTIONS_TEST_UNSET_URL".to_string(),
            ..DatabaseConfig::default()
        };
        let err = database.connection_url().unwrap_err();
        assert!(err.to_string().contains("INVOICE_ACTIONS_TEST_UNSET_URL"));
    }

    #[cfg(feature = "postgres")]
    #[test]
    fn test_connect_options_force_tls() {
        // SAFETY: the variable name is unique to this test
        unsafe {
            std::env::set_var(
                "INVOICE_ACTIONS_TEST_TLS_URL",
                "postgres://user:pw@db.example.com/invoices?sslmode=disable",
            );
        }
        let database = DatabaseConfig {
            url_env: "INVOICE_ACTIONS_TEST_TLS_URL".to_string(),
            ..DatabaseConfig::default()
        };

        let options = database.connect_options().unwrap();
        assert!(format!("{:?}", options).contains("ssl_mode: Require"));
    }

    #[cfg(feature = "postgres")]
    #[test]
    fn test_connect_options_keep_verifying_mode() {
        // SAFETY: the variable name is unique to this test
        unsafe {
            std::env::set_var(
                "INVOICE_ACTIONS_TEST_VERIFY_URL",
                "postgres://user:pw@db.example.com/invoices?ssl-mode=verify-full",
            );
        }
        let database = DatabaseConfig {
            url_env: "INVOICE_ACTIONS_TEST_VERIFY_URL".to_string(),
            ..DatabaseConfig::default()
        };

        let options = database.connect_options().unwrap();
        assert!(format!("{:?}", options).contains("ssl_mode: VerifyFull"));
    }

    #[cfg(feature = "postgres")]
    #[test]
    fn test_requested_ssl_mode() {
        use sqlx::postgres::PgSslMode;

        let mode = |url: &str, env: Option<&str>| {
            requested_ssl_mode(url, env.map(str::to_string)).unwrap()
        };

        assert!(matches!(
            mode("postgres://h/db?sslmode=verify-ca", None),
            Some(PgSslMode::VerifyCa)
        ));
        assert!(matches!(
            mode("postgres://h/db?application_name=x&ssl-mode=verify-full", None),
            Some(PgSslMode::VerifyFull)
        ));
        assert!(matches!(
            mode("postgres://h/db", Some("verify-full")),
            Some(PgSslMode::VerifyFull)
        ));
        assert!(matches!(
            mode("postgres://h/db?sslmode=prefer", Some("verify-full")),
            Some(PgSslMode::Prefer)
        ));
        assert!(mode("postgres://h/db", None).is_none());
        assert!(requested_ssl_mode("postgres://h/db?sslmode=bogus", None).is_err());
    }
}
