//! Configuration loading from disk and environment overrides.

use std::fs;
use std::net::SocketAddr;
use std::path::Path;

use crate::config::schema::AppConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Validation(Vec<ValidationError>),
    /// The listener address or a port override could not be interpreted.
    Address(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
            ConfigError::Address(msg) => write!(f, "Address error: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: AppConfig = toml::from_str(&content).map_err(ConfigError::Parse)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Apply listener-port overrides to a loaded configuration.
///
/// Precedence: `--port` flag, then the `PORT` environment variable, then the
/// value from the config file.
pub fn apply_overrides(config: &mut AppConfig, port_flag: Option<u16>) -> Result<(), ConfigError> {
    let env_port = match std::env::var("PORT") {
        Ok(raw) => Some(
            raw.parse::<u16>()
                .map_err(|_| ConfigError::Address(format!("invalid PORT value: {}", raw)))?,
        ),
        Err(_) => None,
    };

    let Some(port) = port_flag.or(env_port) else {
        return Ok(());
    };

    let mut addr: SocketAddr = config
        .listener
        .bind_address
        .parse()
        .map_err(|_| {
            ConfigError::Address(format!(
                "invalid bind address: {}",
                config.listener.bind_address
            ))
        })?;
    addr.set_port(port);
    config.listener.bind_address = addr.to_string();
    Ok(())
}
