use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use showlink_api::{Credentials, HttpTransport};

use crate::error::CoreError;

const DEFAULT_CONFIG: &str = include_str!("../../../config/default.toml");

pub const API_KEY_ENV: &str = "SHOWLINK_API_KEY";
pub const ACCESS_TOKEN_ENV: &str = "SHOWLINK_ACCESS_TOKEN";

/// Top-level application configuration.
///
/// A section missing from a user file falls back to its built-in default.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub mutation: MutationConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    pub api_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    pub base_url: String,
    pub list_base_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MutationConfig {
    pub max_concurrency: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub filter: String,
}

impl AppConfig {
    /// Load the user config file, falling back to built-in defaults, then
    /// apply environment overrides.
    pub fn load() -> Result<Self, CoreError> {
        Self::load_from(&Self::config_path())
    }

    /// Like [`AppConfig::load`] with an explicit file path.
    pub fn load_from(path: &Path) -> Result<Self, CoreError> {
        let mut config: Self = if path.exists() {
            let content =
                std::fs::read_to_string(path).map_err(|e| CoreError::Config(e.to_string()))?;
            toml::from_str(&content).map_err(|e| CoreError::Config(e.to_string()))?
        } else {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            toml::from_str(DEFAULT_CONFIG).map_err(|e| CoreError::Config(e.to_string()))?
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Overlay credentials found through `lookup`. Empty values are ignored.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(key) = lookup(API_KEY_ENV).filter(|v| !v.is_empty()) {
            self.catalog.api_key = key;
        }
        if let Some(token) = lookup(ACCESS_TOKEN_ENV).filter(|v| !v.is_empty()) {
            self.catalog.access_token = Some(token);
        }
    }

    /// Save current config to `path`.
    pub fn save_to(&self, path: &Path) -> Result<(), CoreError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| CoreError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Path to user config file (XDG on Linux, AppData on Windows).
    pub fn config_path() -> PathBuf {
        ProjectDirs::from("", "", "showlink")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }

    /// Check everything a catalog call needs.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.catalog.api_key.trim().is_empty() {
            return Err(CoreError::Config(format!(
                "catalog.api_key is empty (set it in the config file or {API_KEY_ENV})"
            )));
        }
        for (name, value) in [
            ("catalog.base_url", &self.catalog.base_url),
            ("catalog.list_base_url", &self.catalog.list_base_url),
        ] {
            url::Url::parse(value).map_err(|e| CoreError::Config(format!("{name}: {e}")))?;
        }
        if self.mutation.max_concurrency == 0 {
            return Err(CoreError::Config(
                "mutation.max_concurrency must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Build the HTTP transport from the catalog section.
    pub fn transport(&self) -> Result<HttpTransport, CoreError> {
        self.validate()?;
        let credentials = Credentials {
            api_key: self.catalog.api_key.clone(),
            access_token: self.catalog.access_token.clone(),
        };
        Ok(HttpTransport::new(
            credentials,
            &self.catalog.base_url,
            &self.catalog.list_base_url,
        )?)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG).expect("built-in default config is valid TOML")
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        AppConfig::default().catalog
    }
}

impl Default for MutationConfig {
    fn default() -> Self {
        AppConfig::default().mutation
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        AppConfig::default().logging
    }
}
