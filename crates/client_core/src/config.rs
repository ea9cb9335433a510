use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Context;
use serde::Deserialize;
use tracing::{info, warn};

pub const DEFAULT_CONFIG_FILE: &str = "taximeter.toml";
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 2000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub server_url: String,
    pub poll_interval_ms: u64,
    pub request_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:5000".into(),
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            request_timeout_secs: 10,
        }
    }
}

impl Settings {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    fn apply_file(&mut self, file_cfg: FileSettings) {
        if let Some(v) = file_cfg.server_url {
            self.server_url = v;
        }
        if let Some(v) = file_cfg.poll_interval_ms {
            self.poll_interval_ms = v;
        }
        if let Some(v) = file_cfg.request_timeout_secs {
            self.request_timeout_secs = v;
        }
    }

    fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("TAXIMETER_SERVER_URL") {
            self.server_url = v;
        }
        if let Some(v) = lookup("TAXIMETER_POLL_INTERVAL_MS") {
            match v.trim().parse::<u64>() {
                Ok(parsed) => self.poll_interval_ms = parsed,
                Err(_) => warn!(value = %v, "ignoring invalid TAXIMETER_POLL_INTERVAL_MS"),
            }
        }
        if let Some(v) = lookup("TAXIMETER_REQUEST_TIMEOUT_SECS") {
            match v.trim().parse::<u64>() {
                Ok(parsed) => self.request_timeout_secs = parsed,
                Err(_) => warn!(value = %v, "ignoring invalid TAXIMETER_REQUEST_TIMEOUT_SECS"),
            }
        }
    }

    fn normalized(mut self) -> Self {
        if self.poll_interval_ms == 0 {
            warn!("poll interval of 0 ms is not allowed; using default");
            self.poll_interval_ms = DEFAULT_POLL_INTERVAL_MS;
        }
        self.server_url = self.server_url.trim().trim_end_matches('/').to_string();
        if self.server_url.is_empty() {
            self.server_url = Settings::default().server_url;
        }
        self
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    server_url: Option<String>,
    poll_interval_ms: Option<u64>,
    request_timeout_secs: Option<u64>,
}

/// Defaults, then `taximeter.toml` (or `$TAXIMETER_CONFIG`), then `TAXIMETER_*` variables.
pub fn load_settings() -> Settings {
    let path = std::env::var("TAXIMETER_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_FILE));
    load_settings_from(&path, |key| std::env::var(key).ok())
}

pub fn load_settings_from<F>(path: &Path, lookup: F) -> Settings
where
    F: Fn(&str) -> Option<String>,
{
    let mut settings = Settings::default();

    if path.exists() {
        match read_settings_file(path) {
            Ok(file_cfg) => {
                info!(path = %path.display(), "loaded client settings file");
                settings.apply_file(file_cfg);
            }
            Err(err) => warn!("{err:#}; falling back to defaults"),
        }
    }

    settings.apply_env(lookup);
    settings.normalized()
}

fn read_settings_file(path: &Path) -> anyhow::Result<FileSettings> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read '{}'", path.display()))?;
    toml::from_str(&raw).with_context(|| format!("failed to parse '{}'", path.display()))
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
