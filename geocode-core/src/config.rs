use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    env, fs, io,
    path::{Path, PathBuf},
};

use crate::endpoint::{DEFAULT_BASE_URL, EndpointBuilder};

/// Environment variable that overrides the stored API key.
pub const API_KEY_ENV: &str = "API_KEY";

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// base_url = "http://api.openweathermap.org/geo/1.0"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// OpenWeather API key.
    pub api_key: Option<String>,

    /// Geocoding API base URL; the public OpenWeather endpoint when absent.
    pub base_url: Option<String>,
}

impl Config {
    /// Load the geocode config from its platform location.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    /// Read a config file; a file that does not exist yet means "not configured".
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to read geocode config: {}", path.display()));
            }
        };

        toml::from_str(&contents)
            .with_context(|| format!("Invalid geocode config in {}", path.display()))
    }

    /// Persist to the platform location and return where it was written.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create {}", dir.display()))?;
        }

        let text = toml::to_string_pretty(self).context("Failed to encode geocode config")?;
        fs::write(path, text)
            .with_context(|| format!("Failed to write geocode config: {}", path.display()))
    }

    /// `config.toml` under the platform config dir for `geocode-cli`.
    pub fn config_file_path() -> Result<PathBuf> {
        ProjectDirs::from("dev", "geocode", "geocode-cli")
            .map(|dirs| dirs.config_dir().join("config.toml"))
            .ok_or_else(|| anyhow!("Could not determine where to keep the geocode config"))
    }

    pub fn set_api_key(&mut self, api_key: String) {
        self.api_key = Some(api_key);
    }

    /// Store a base URL; empty input resets to the default endpoint.
    pub fn set_base_url(&mut self, base_url: &str) {
        let trimmed = base_url.trim();
        self.base_url = (!trimmed.is_empty() && trimmed != DEFAULT_BASE_URL).then(|| trimmed.to_string());
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    /// API key from `API_KEY` if set, otherwise the stored one.
    pub fn api_key(&self) -> Result<String> {
        resolve_api_key(env::var(API_KEY_ENV).ok(), self.api_key.as_deref())
    }

    /// Endpoint builder for the configured base URL and key.
    pub fn endpoint_builder(&self) -> Result<EndpointBuilder> {
        EndpointBuilder::new(self.base_url(), self.api_key()?)
    }
}

fn resolve_api_key(from_env: Option<String>, stored: Option<&str>) -> Result<String> {
    from_env
        .filter(|k| !k.trim().is_empty())
        .or_else(|| stored.filter(|k| !k.trim().is_empty()).map(str::to_string))
        .ok_or_else(|| {
            anyhow!(
                "No API key configured.\n\
                 Hint: run `geocode configure` or set the {API_KEY_ENV} environment variable."
            )
        })
}
