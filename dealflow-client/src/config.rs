//! Configuration loading for the Dealflow client.
//!
//! All fields are required. No defaults.

use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientConfig {
    /// Base URL of the record-storage service, e.g. `https://records.example.com`.
    pub api_base_url: String,
    /// Project identifier sent with every request.
    pub project_id: String,
    /// Public API key for the project.
    pub public_key: String,
    /// Per-request timeout. The transport enforces nothing else; there is
    /// no retry and no cancellation beyond this.
    pub request_timeout_ms: u64,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing configuration file path (use --config or DEALFLOW_CONFIG)")]
    MissingConfigPath,
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid config value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

impl ClientConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let path = config_path_from_args().or_else(config_path_from_env);
        let path = path.ok_or(ConfigError::MissingConfigPath)?;
        let config = Self::from_path(&path)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: ClientConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_base_url.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "api_base_url",
                reason: "must not be empty".to_string(),
            });
        }
        if self.project_id.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "project_id",
                reason: "must not be empty".to_string(),
            });
        }
        if self.public_key.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "public_key",
                reason: "must not be empty".to_string(),
            });
        }
        if self.request_timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "request_timeout_ms",
                reason: "must be > 0".to_string(),
            });
        }
        Ok(())
    }
}

fn config_path_from_args() -> Option<PathBuf> {
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--config" {
            return args.next().map(PathBuf::from);
        }
        if let Some(path) = arg.strip_prefix("--config=") {
            return Some(PathBuf::from(path));
        }
    }
    None
}

fn config_path_from_env() -> Option<PathBuf> {
    std::env::var_os("DEALFLOW_CONFIG").map(PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    const VALID: &str = r#"
api_base_url = "https://records.example.com"
project_id = "proj_123"
public_key = "pk_abc"
request_timeout_ms = 5000
"#;

    #[test]
    fn test_valid_config_parses_and_validates() {
        let file = write_config(VALID);
        let config = ClientConfig::from_path(file.path()).unwrap();
        config.validate().unwrap();
        assert_eq!(config.api_base_url, "https://records.example.com");
        assert_eq!(config.request_timeout_ms, 5000);
    }

    #[test]
    fn test_missing_field_is_parse_error() {
        let file = write_config("api_base_url = \"https://x.example\"\n");
        assert!(matches!(
            ClientConfig::from_path(file.path()),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let file = write_config(&format!("{}\nextra = true\n", VALID));
        assert!(matches!(
            ClientConfig::from_path(file.path()),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let file = write_config(&VALID.replace("5000", "0"));
        let config = ClientConfig::from_path(file.path()).unwrap();
        let err = config.validate().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                field: "request_timeout_ms",
                ..
            }
        ));
    }

    #[test]
    fn test_blank_project_id_rejected() {
        let file = write_config(&VALID.replace("proj_123", "  "));
        let config = ClientConfig::from_path(file.path()).unwrap();
        assert!(config.validate().is_err());
    }
}
