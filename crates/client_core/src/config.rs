use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::error::ConfigError;

pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8000/predict";
pub const CONFIG_FILE_NAME: &str = "predictor.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    pub endpoint: String,
    pub request_timeout_secs: Option<u64>,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            request_timeout_secs: None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    endpoint: Option<String>,
    request_timeout_secs: Option<u64>,
}

impl ClientSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidEndpoint {
            endpoint: self.endpoint.clone(),
            reason,
        };
        let url = Url::parse(self.endpoint.trim()).map_err(|err| invalid(err.to_string()))?;
        match url.scheme() {
            "http" | "https" => Ok(()),
            other => Err(invalid(format!("unsupported scheme '{other}'"))),
        }
    }

    /// Overlays values from a `predictor.toml` document.
    pub fn apply_file(&mut self, path: &Path, raw: &str) -> Result<(), ConfigError> {
        let file_cfg: FileSettings = toml::from_str(raw).map_err(|source| ConfigError::File {
            path: path.display().to_string(),
            source,
        })?;
        if let Some(endpoint) = file_cfg.endpoint {
            self.endpoint = endpoint;
        }
        if let Some(secs) = file_cfg.request_timeout_secs {
            self.request_timeout_secs = Some(secs);
        }
        Ok(())
    }

    /// Overlays environment values; `APP__*` names win over `PREDICTOR_*`.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        for name in ["PREDICTOR_ENDPOINT", "APP__ENDPOINT"] {
            if let Some(v) = lookup(name).filter(|v| !v.trim().is_empty()) {
                self.endpoint = v;
            }
        }
        for name in ["PREDICTOR_TIMEOUT_SECS", "APP__TIMEOUT_SECS"] {
            if let Some(parsed) = lookup(name).and_then(|v| v.trim().parse::<u64>().ok()) {
                self.request_timeout_secs = Some(parsed);
            }
        }
    }

    /// Overlays command-line flags.
    pub fn apply_overrides(&mut self, endpoint: Option<String>, timeout_secs: Option<u64>) {
        if let Some(endpoint) = endpoint {
            self.endpoint = endpoint;
        }
        if timeout_secs.is_some() {
            self.request_timeout_secs = timeout_secs;
        }
    }
}

/// `./predictor.toml` if present, else the per-user config location.
pub fn config_file_path() -> Option<PathBuf> {
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.exists() {
        return Some(local);
    }
    dirs::config_dir()
        .map(|base| base.join("habits_predictor").join(CONFIG_FILE_NAME))
        .filter(|path| path.exists())
}

/// Defaults, then config file, then environment.
pub fn load_settings() -> Result<ClientSettings, ConfigError> {
    let mut settings = ClientSettings::default();

    if let Some(path) = config_file_path() {
        if let Ok(raw) = fs::read_to_string(&path) {
            debug!(path = %path.display(), "loading client config file");
            settings.apply_file(&path, &raw)?;
        }
    }

    settings.apply_env(|name| std::env::var(name).ok());
    Ok(settings)
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
