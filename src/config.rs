//! Application-level configuration loading: default member role and batch size limits.

use std::{env, fs, io::ErrorKind, path::PathBuf};

use serde::Deserialize;
use tracing::{info, warn};

/// Default location on disk where the server looks for the JSON configuration.
const DEFAULT_CONFIG_PATH: &str = "config/app.json";
/// Environment variable that overrides [`DEFAULT_CONFIG_PATH`].
const CONFIG_PATH_ENV: &str = "SCOREBOARD_CONFIG_PATH";
const DEFAULT_MEMBER_ROLE: &str = "player";
const DEFAULT_MAX_BATCH_SIZE: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Immutable runtime configuration shared across the application.
pub struct AppConfig {
    default_member_role: String,
    max_batch_size: usize,
}

impl AppConfig {
    /// Load the application configuration from disk, falling back to built-in defaults.
    pub fn load() -> Self {
        let path = resolve_config_path();
        match fs::read_to_string(&path) {
            Ok(contents) => match Self::from_json(&contents) {
                Ok(app_config) => {
                    info!(
                        path = %path.display(),
                        default_member_role = %app_config.default_member_role,
                        max_batch_size = app_config.max_batch_size,
                        "loaded application config"
                    );
                    app_config
                }
                Err(err) => {
                    warn!(
                        path = %path.display(),
                        error = %err,
                        "failed to parse config; falling back to defaults"
                    );
                    Self::default()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    path = %path.display(),
                    "config file not found; using built-in defaults"
                );
                Self::default()
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to read config; falling back to defaults"
                );
                Self::default()
            }
        }
    }

    /// Parse a JSON document; missing keys take their default value.
    pub fn from_json(contents: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<RawConfig>(contents).map(Into::into)
    }

    /// Override the batch size limit.
    pub fn with_max_batch_size(mut self, max_batch_size: usize) -> Self {
        self.max_batch_size = max_batch_size.max(1);
        self
    }

    /// Role given to members created without one.
    pub fn default_member_role(&self) -> &str {
        &self.default_member_role
    }

    /// Largest number of entries accepted by a batch create request.
    pub fn max_batch_size(&self) -> usize {
        self.max_batch_size
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_member_role: DEFAULT_MEMBER_ROLE.into(),
            max_batch_size: DEFAULT_MAX_BATCH_SIZE,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
/// JSON representation of the configuration file located at [`DEFAULT_CONFIG_PATH`].
struct RawConfig {
    #[serde(default)]
    default_member_role: Option<String>,
    #[serde(default)]
    max_batch_size: Option<usize>,
}

impl From<RawConfig> for AppConfig {
    fn from(value: RawConfig) -> Self {
        let default_member_role = value
            .default_member_role
            .map(|role| role.trim().to_owned())
            .filter(|role| !role.is_empty())
            .unwrap_or_else(|| DEFAULT_MEMBER_ROLE.into());
        let max_batch_size = value
            .max_batch_size
            .filter(|size| *size > 0)
            .unwrap_or(DEFAULT_MAX_BATCH_SIZE);

        Self {
            default_member_role,
            max_batch_size,
        }
    }
}

/// Resolve the configuration path taking the environment override into account.
fn resolve_config_path() -> PathBuf {
    env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .filter(|path| !path.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}
