use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Context, Result};

pub mod validator;

pub const DEFAULT_API_ROOT: &str = "https://min-api.cryptocompare.com/data/";
pub const DEFAULT_DATABASE_PATH: &str = "gainz.db";
pub const DEFAULT_CURRENCY: &str = "USD";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// The historical endpoint rejects a `tsyms` list longer than 30 characters.
pub const HISTORICAL_SYMBOLS_MAX_LENGTH: usize = 30;

/// Runtime settings. Every field is optional in the JSON file and falls back
/// to the builtin default.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub api_root: String,
    pub database_path: PathBuf,
    pub default_currency: String,
    pub request_timeout_secs: u64,
    pub historical_batch_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Config {
    pub fn builtin() -> Self {
        Config {
            api_root: DEFAULT_API_ROOT.to_string(),
            database_path: PathBuf::from(DEFAULT_DATABASE_PATH),
            default_currency: DEFAULT_CURRENCY.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            historical_batch_limit: HISTORICAL_SYMBOLS_MAX_LENGTH,
        }
    }

    /// Read a JSON config file and validate the result.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_json(&content).map_err(|err| {
            AppError::config(format!("invalid config file {}: {err}", path.display()))
        })
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(content)?;
        validator::validate_config(&config)?;
        Ok(config)
    }

    /// Builtin defaults, or the given file when one is supplied.
    pub fn resolve(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::builtin()),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn with_database_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.database_path = path.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config = Config::from_json(r#"{ "request_timeout_secs": 3 }"#).expect("config");

        assert_eq!(config.request_timeout(), Duration::from_secs(3));
        assert_eq!(config.api_root, DEFAULT_API_ROOT);
        assert_eq!(config.historical_batch_limit, HISTORICAL_SYMBOLS_MAX_LENGTH);
    }

    #[test]
    fn rejects_invalid_values() {
        let err = Config::from_json(r#"{ "request_timeout_secs": 0 }"#)
            .expect_err("zero timeout should be rejected");
        assert!(
            err.to_string().contains("request_timeout_secs"),
            "unexpected error message: {err}"
        );
    }

    #[test]
    fn overrides_database_path() {
        let config = Config::builtin().with_database_path("/tmp/other.db");
        assert_eq!(config.database_path, PathBuf::from("/tmp/other.db"));
    }
}
