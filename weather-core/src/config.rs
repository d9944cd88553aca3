use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

use crate::model::DEFAULT_DATE_FORMAT;

/// Environment variable that overrides `backend_url`.
pub const BACKEND_URL_ENV: &str = "WEATHER_BACKEND_URL";

/// Prefix used when no backend URL is configured.
pub const FALLBACK_BASE_PATH: &str = "/api";

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// backend_url = "http://localhost:5000"
/// origin = "http://localhost"
/// date_format = "%-m/%-d/%Y"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Base address of the forecast backend. `None` means "use `/api`".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backend_url: Option<String>,

    /// Host that path-only bases (like `/api`) are resolved against.
    #[serde(default = "default_origin")]
    pub origin: String,

    /// strftime pattern for list dates.
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

fn default_origin() -> String {
    "http://localhost".to_string()
}

fn default_date_format() -> String {
    DEFAULT_DATE_FORMAT.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend_url: None,
            origin: default_origin(),
            date_format: default_date_format(),
        }
    }
}

impl Config {
    /// Load config from disk, or return the default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-task", "weather-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Apply `WEATHER_BACKEND_URL` from the process environment.
    pub fn with_env_overrides(self) -> Self {
        self.with_backend_override(std::env::var(BACKEND_URL_ENV).ok())
    }

    /// Replace `backend_url` with `value` when it is set and not blank.
    pub fn with_backend_override(mut self, value: Option<String>) -> Self {
        if let Some(url) = value.and_then(non_blank) {
            self.backend_url = Some(url);
        }
        self
    }

    pub fn set_backend_url(&mut self, url: Option<String>) {
        self.backend_url = url.and_then(non_blank);
    }

    /// The configured backend URL, ignoring blank values.
    pub fn configured_backend(&self) -> Option<&str> {
        self.backend_url
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// Absolute base URL, without trailing slash, that endpoints are appended to.
    pub fn resolved_base(&self) -> String {
        let base = self
            .configured_backend()
            .unwrap_or(FALLBACK_BASE_PATH)
            .trim_end_matches('/');

        if base.starts_with('/') || base.is_empty() {
            format!("{}{}", self.origin.trim_end_matches('/'), base)
        } else {
            base.to_string()
        }
    }
}

fn non_blank(s: String) -> Option<String> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
