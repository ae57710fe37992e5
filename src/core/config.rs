use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    pub auth: AuthConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    #[serde(default = "default_num_threads")]
    pub num_threads: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_wal_path")]
    pub wal_path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            wal_path: default_wal_path(),
        }
    }
}

/// All secrets are injected here; nothing is compiled in.
/// The admin login bypass only exists when both admin fields are configured.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    pub jwt_secret: String,
    #[serde(default = "default_token_ttl")]
    pub token_ttl_seconds: i64,
    pub admin_email: Option<String>,
    pub admin_password: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
    #[serde(default = "default_console")]
    pub console: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            console: default_console(),
        }
    }
}

// Default value functions
fn default_num_threads() -> usize {
    num_cpus::get()
}

fn default_wal_path() -> PathBuf {
    PathBuf::from("records.wal")
}

fn default_token_ttl() -> i64 {
    3600 // 1 hour
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

fn default_console() -> bool {
    false
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .context(format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content).context("Failed to parse config file")?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        // Validate server config
        if self.server.port == 0 {
            bail!("Server port must be greater than 0");
        }

        if self.server.num_threads == 0 {
            bail!("num_threads must be greater than 0");
        }

        // Validate auth config
        if self.auth.jwt_secret.is_empty() {
            bail!("jwt_secret must not be empty");
        }

        if self.auth.token_ttl_seconds <= 0 {
            bail!("token_ttl_seconds must be greater than 0");
        }

        match (&self.auth.admin_email, &self.auth.admin_password) {
            (Some(email), Some(password)) => {
                if email.is_empty() || password.is_empty() {
                    bail!("admin_email and admin_password must not be empty when set");
                }
            }
            (None, None) => {}
            _ => bail!("admin_email and admin_password must be set together"),
        }

        // Validate logging config
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            bail!(
                "Invalid log level '{}'. Must be one of: trace, debug, info, warn, error",
                self.logging.level
            );
        }

        let valid_formats = ["json", "console"];
        if !valid_formats.contains(&self.logging.format.as_str()) {
            bail!(
                "Invalid log format '{}'. Must be one of: json, console",
                self.logging.format
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn valid_config() -> Config {
        Config {
            server: ServerConfig {
                port: 5000,
                num_threads: 4,
            },
            storage: StorageConfig::default(),
            auth: AuthConfig {
                jwt_secret: "test-secret-key".to_string(),
                token_ttl_seconds: 3600,
                admin_email: Some("admin@example.edu".to_string()),
                admin_password: Some("admin123".to_string()),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                format: "console".to_string(),
                console: true,
            },
        }
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn test_zero_port_rejected() {
        let mut config = valid_config();
        config.server.port = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_jwt_secret_rejected() {
        let mut config = valid_config();
        config.auth.jwt_secret = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_admin_credentials_must_be_paired() {
        let mut config = valid_config();
        config.auth.admin_password = None;
        assert!(config.validate().is_err());

        config.auth.admin_email = None;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_log_level_rejected() {
        let mut config = valid_config();
        config.logging.level = "loud".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_file_with_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[server]
port = 5000

[auth]
jwt_secret = "file-secret"

[logging]
level = "debug"
format = "console"
"#
        )
        .unwrap();

        let config = Config::from_file(&file.path().to_path_buf()).unwrap();

        assert_eq!(config.server.port, 5000);
        assert!(config.server.num_threads > 0);
        assert_eq!(config.storage.wal_path, PathBuf::from("records.wal"));
        assert_eq!(config.auth.token_ttl_seconds, 3600);
        assert!(config.auth.admin_email.is_none());
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_from_file_missing_secret_fails() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[server]
port = 5000

[auth]
jwt_secret = ""
"#
        )
        .unwrap();

        assert!(Config::from_file(&file.path().to_path_buf()).is_err());
    }
}
