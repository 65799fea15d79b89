use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::model::Coordinates;

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org";
pub const DEFAULT_LANG: &str = "pt_br";
pub const DEFAULT_LOCATION_LOOKUP_URL: &str = "http://ip-api.com";

/// Environment variable that overrides the API key stored on disk.
pub const API_KEY_ENV: &str = "CLIMA_API_KEY";

/// How the device position is obtained at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LocationMode {
    /// Approximate position from the public IP address.
    #[default]
    Ip,
    /// Coordinates written in the config file.
    Fixed,
    /// Never resolve a position; the user has to search.
    Disabled,
}

impl LocationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            LocationMode::Ip => "ip",
            LocationMode::Fixed => "fixed",
            LocationMode::Disabled => "disabled",
        }
    }

    pub const fn all() -> &'static [LocationMode] {
        &[LocationMode::Ip, LocationMode::Fixed, LocationMode::Disabled]
    }
}

impl std::fmt::Display for LocationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LocationConfig {
    #[serde(default)]
    pub mode: LocationMode,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Base URL of the IP geolocation service.
    pub lookup_url: Option<String>,
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// lang = "pt_br"
///
/// [location]
/// mode = "fixed"
/// latitude = -22.9068
/// longitude = -43.1729
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub lang: Option<String>,
    #[serde(default)]
    pub location: LocationConfig,
}

impl Config {
    /// Returns the API key, treating an empty string as unset.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().map(str::trim).filter(|k| !k.is_empty())
    }

    pub fn set_api_key(&mut self, api_key: String) {
        self.api_key = Some(api_key);
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    pub fn lang(&self) -> &str {
        self.lang.as_deref().unwrap_or(DEFAULT_LANG)
    }

    pub fn location_lookup_url(&self) -> &str {
        self.location
            .lookup_url
            .as_deref()
            .unwrap_or(DEFAULT_LOCATION_LOOKUP_URL)
    }

    /// Coordinates configured for `LocationMode::Fixed`, if both are present.
    pub fn fixed_coordinates(&self) -> Option<Coordinates> {
        match (self.location.latitude, self.location.longitude) {
            (Some(lat), Some(lon)) => Some(Coordinates::new(lat, lon)),
            _ => None,
        }
    }

    pub fn set_fixed_location(&mut self, coords: Coordinates) {
        self.location.mode = LocationMode::Fixed;
        self.location.latitude = Some(coords.latitude);
        self.location.longitude = Some(coords.longitude);
    }

    /// Apply overrides from the process environment.
    pub fn apply_env(&mut self) {
        self.apply_api_key_override(std::env::var(API_KEY_ENV).ok());
    }

    pub fn apply_api_key_override(&mut self, value: Option<String>) {
        if let Some(key) = value.filter(|k| !k.trim().is_empty()) {
            self.api_key = Some(key);
        }
    }

    /// Load config from `path`, or return an empty default if it doesn't exist yet.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    /// Save config to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "clima", "clima")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_nothing_is_set() {
        let cfg = Config::default();

        assert_eq!(cfg.api_key(), None);
        assert_eq!(cfg.base_url(), DEFAULT_BASE_URL);
        assert_eq!(cfg.lang(), "pt_br");
        assert_eq!(cfg.location.mode, LocationMode::Ip);
        assert!(cfg.fixed_coordinates().is_none());
    }

    #[test]
    fn blank_api_key_counts_as_missing() {
        let mut cfg = Config::default();
        cfg.set_api_key("   ".into());
        assert_eq!(cfg.api_key(), None);

        cfg.set_api_key("KEY".into());
        assert_eq!(cfg.api_key(), Some("KEY"));
    }

    #[test]
    fn env_override_replaces_file_key() {
        let mut cfg = Config::default();
        cfg.set_api_key("FROM_FILE".into());

        cfg.apply_api_key_override(Some("FROM_ENV".into()));
        assert_eq!(cfg.api_key(), Some("FROM_ENV"));
    }

    #[test]
    fn empty_env_override_is_ignored() {
        let mut cfg = Config::default();
        cfg.set_api_key("FROM_FILE".into());

        cfg.apply_api_key_override(Some(String::new()));
        cfg.apply_api_key_override(None);
        assert_eq!(cfg.api_key(), Some("FROM_FILE"));
    }

    #[test]
    fn parses_fixed_location_from_toml() {
        let cfg: Config = toml::from_str(
            r#"
            api_key = "abc"
            lang = "en"

            [location]
            mode = "fixed"
            latitude = -22.9068
            longitude = -43.1729
            "#,
        )
        .expect("valid toml");

        assert_eq!(cfg.lang(), "en");
        assert_eq!(cfg.location.mode, LocationMode::Fixed);
        assert_eq!(
            cfg.fixed_coordinates(),
            Some(Coordinates::new(-22.9068, -43.1729))
        );
    }

    #[test]
    fn set_fixed_location_switches_mode() {
        let mut cfg = Config::default();
        cfg.set_fixed_location(Coordinates::new(1.5, 2.5));

        assert_eq!(cfg.location.mode, LocationMode::Fixed);
        assert_eq!(cfg.fixed_coordinates(), Some(Coordinates::new(1.5, 2.5)));
    }
}
