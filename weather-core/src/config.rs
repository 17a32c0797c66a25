use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

/// Documented public endpoint for current conditions.
pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5/weather";

/// Environment variable overriding the stored API credential.
pub const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";

/// Environment variable overriding the provider endpoint.
pub const BASE_URL_ENV: &str = "OPENWEATHER_BASE_URL";

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// ```
///
/// Both fields are optional in the file; resolution (see
/// [`Config::resolve`]) decides whether enough is present to run.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Provider API credential. Never has a baked-in default.
    pub api_key: Option<String>,

    /// Provider endpoint override; rarely set outside of tests.
    pub base_url: Option<String>,
}

/// Fully-resolved settings the OpenWeather client is built from.
#[derive(Debug, Clone)]
pub struct ProviderSettings {
    pub api_key: String,
    pub base_url: String,
}

impl Config {
    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
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
        let dirs = ProjectDirs::from("dev", "weather-lookup", "weather-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn set_api_key(&mut self, api_key: String) {
        self.api_key = Some(api_key);
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Resolve settings from this config plus the process environment.
    ///
    /// Fails fast when no credential is available from either source.
    pub fn resolve(&self) -> Result<ProviderSettings> {
        let env_key = std::env::var(API_KEY_ENV).ok().filter(|v| !v.trim().is_empty());
        let env_base = std::env::var(BASE_URL_ENV).ok().filter(|v| !v.trim().is_empty());

        self.resolve_with(env_key, env_base)
    }

    /// Pure resolution step: environment values win over the stored file.
    pub fn resolve_with(
        &self,
        env_api_key: Option<String>,
        env_base_url: Option<String>,
    ) -> Result<ProviderSettings> {
        let api_key = env_api_key.or_else(|| self.api_key.clone()).ok_or_else(|| {
            anyhow!(
                "No API key configured.\n\
                 Hint: run `weather configure` or set the {API_KEY_ENV} environment variable."
            )
        })?;

        let base_url = env_base_url
            .or_else(|| self.base_url.clone())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Ok(ProviderSettings { api_key, base_url })
    }
}
