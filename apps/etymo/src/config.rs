use std::{fs, io, path::Path, time::Duration};

use lookup_core::{ControllerOptions, ProbeOptions, DEFAULT_API_BASE_URL};
use serde::Deserialize;
use thiserror::Error;
use tracing::warn;

pub const CONFIG_FILE: &str = "etymo.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_base_url: String,
    pub lookup_timeout_ms: u64,
    pub probe_addr: String,
    pub probe_interval_ms: u64,
    pub cancel_superseded: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.into(),
            lookup_timeout_ms: 10_000,
            probe_addr: "api.dictionaryapi.dev:443".into(),
            probe_interval_ms: 5_000,
            cancel_superseded: true,
        }
    }
}

impl Settings {
    pub fn controller_options(&self) -> ControllerOptions {
        ControllerOptions {
            lookup_timeout: Duration::from_millis(self.lookup_timeout_ms),
            cancel_superseded: self.cancel_superseded,
        }
    }

    pub fn probe_options(&self) -> ProbeOptions {
        ProbeOptions {
            addr: self.probe_addr.clone(),
            interval: Duration::from_millis(self.probe_interval_ms),
            ..ProbeOptions::default()
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    api_base_url: Option<String>,
    lookup_timeout_ms: Option<u64>,
    probe_addr: Option<String>,
    probe_interval_ms: Option<u64>,
    cancel_superseded: Option<bool>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read { path: String, source: io::Error },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
}

pub fn load_settings() -> Settings {
    load_settings_from(Path::new(CONFIG_FILE), |key| std::env::var(key).ok())
}

/// Defaults, then the config file, then environment overrides.
pub fn load_settings_from(path: &Path, env: impl Fn(&str) -> Option<String>) -> Settings {
    let mut settings = Settings::default();

    match read_file_config(path) {
        Ok(Some(file_cfg)) => apply_file_config(&mut settings, file_cfg),
        Ok(None) => {}
        Err(error) => warn!(%error, "ignoring config file"),
    }

    if let Some(v) = env("ETYMO_API_BASE_URL") {
        settings.api_base_url = v;
    }
    if let Some(v) = env("APP__API_BASE_URL") {
        settings.api_base_url = v;
    }
    if let Some(v) = env("APP__LOOKUP_TIMEOUT_MS").and_then(|v| parse_millis(&v)) {
        settings.lookup_timeout_ms = v;
    }
    if let Some(v) = env("APP__PROBE_ADDR") {
        settings.probe_addr = v;
    }
    if let Some(v) = env("APP__PROBE_INTERVAL_MS").and_then(|v| parse_millis(&v)) {
        settings.probe_interval_ms = v;
    }
    if let Some(v) = env("APP__CANCEL_SUPERSEDED").and_then(|v| v.parse().ok()) {
        settings.cancel_superseded = v;
    }

    settings
}

/// Durations of zero are ignored like unparseable values.
pub fn nonzero_millis(ms: u64) -> Option<u64> {
    (ms > 0).then_some(ms)
}

fn parse_millis(raw: &str) -> Option<u64> {
    raw.trim().parse().ok().and_then(nonzero_millis)
}

fn read_file_config(path: &Path) -> Result<Option<FileConfig>, ConfigError> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(source) if source.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.display().to_string(),
                source,
            })
        }
    };
    toml::from_str(&raw)
        .map(Some)
        .map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
}

fn apply_file_config(settings: &mut Settings, file_cfg: FileConfig) {
    if let Some(v) = file_cfg.api_base_url {
        settings.api_base_url = v;
    }
    if let Some(v) = file_cfg.lookup_timeout_ms.and_then(nonzero_millis) {
        settings.lookup_timeout_ms = v;
    }
    if let Some(v) = file_cfg.probe_addr {
        settings.probe_addr = v;
    }
    if let Some(v) = file_cfg.probe_interval_ms.and_then(nonzero_millis) {
        settings.probe_interval_ms = v;
    }
    if let Some(v) = file_cfg.cancel_superseded {
        settings.cancel_superseded = v;
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
