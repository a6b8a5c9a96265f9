//! Client configuration.
//!
//! Read from `config.json` in the platform config directory when present, then
//! overridden by environment variables:
//!
//! | Variable                       | Default                  |
//! |--------------------------------|--------------------------|
//! | `CARGO_TRACKER_API_URL`        | `http://localhost:8080/` |
//! | `CARGO_TRACKER_QUERY_ORDERING` | `latest-request`         |

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::controllers::ResponseOrdering;

const APP_QUALIFIER: &str = "com";
const APP_ORG: &str = "CargoTracker";
const APP_NAME: &str = "CargoTracker";

pub const DEFAULT_API_URL: &str = "http://localhost:8080/";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Registry root; `cargos` and `locations` hang off it.
    pub api_base_url: String,
    pub query_ordering: ResponseOrdering,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            query_ordering: ResponseOrdering::default(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serde(#[from] serde_json::Error),
}

impl AppConfig {
    /// File (if any) plus environment overrides. Never fails; problems with
    /// the file are logged and the defaults used instead.
    pub fn load() -> Self {
        let mut config = match config_file() {
            Some(path) if path.exists() => match Self::from_file(&path) {
                Ok(config) => {
                    tracing::info!(path = %path.display(), "loaded config");
                    config
                }
                Err(err) => {
                    tracing::warn!(path = %path.display(), %err, "ignoring config file");
                    Self::default()
                }
            },
            _ => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok());
        config
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let data = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&data)?)
    }

    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup("CARGO_TRACKER_API_URL").filter(|v| !v.trim().is_empty()) {
            self.api_base_url = url.trim().to_string();
        }
        if let Some(raw) = lookup("CARGO_TRACKER_QUERY_ORDERING") {
            match serde_json::from_value(serde_json::Value::String(raw.trim().to_string())) {
                Ok(ordering) => self.query_ordering = ordering,
                Err(_) => tracing::warn!(value = %raw, "unknown query ordering, keeping {:?}", self.query_ordering),
            }
        }
    }

    /// The base URL with a trailing slash so collections append to it.
    pub fn api_base(&self) -> Result<Url, url::ParseError> {
        let raw = self.api_base_url.trim();
        if raw.ends_with('/') {
            Url::parse(raw)
        } else {
            Url::parse(&format!("{raw}/"))
        }
    }
}

fn config_file() -> Option<PathBuf> {
    ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME)
        .map(|dirs| dirs.config_dir().join("config.json"))
}
