//! Single configuration surface for geography, prompts, model ids and tiles.
//!
//! Defaults reproduce the Pakur deployment. An optional JSON file
//! (`pakurfast.json` in the working directory, or the path in
//! `PAKURFAST_CONFIG`) overrides any subset of fields.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::GeoPoint;
use crate::seed::PAKUR_CENTER;

pub const CONFIG_FILE_NAME: &str = "pakurfast.json";
pub const CONFIG_PATH_ENV: &str = "PAKURFAST_CONFIG";
/// Checked first; `API_KEY` is accepted as a fallback.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";
pub const API_KEY_FALLBACK_ENV: &str = "API_KEY";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to read current directory: {0}")]
    CurrentDir(#[source] std::io::Error),
}

/// Model identifiers per request purpose.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ModelIds {
    pub discovery: String,
    pub logistics: String,
    pub zones: String,
}

impl Default for ModelIds {
    fn default() -> Self {
        Self {
            discovery: "gemini-2.5-flash".to_string(),
            logistics: "gemini-3-flash-preview".to_string(),
            zones: "gemini-3-pro-preview".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DashboardConfig {
    pub city: String,
    pub region: String,
    pub map_center: GeoPoint,
    pub map_zoom: u8,
    /// Location hint handed to the maps-grounding tool.
    pub discovery_bias: GeoPoint,
    pub discovery_query: String,
    /// Neighbourhoods the discovery prompt asks the model to focus on.
    pub focus_areas: Vec<String>,
    pub api_base_url: String,
    pub models: ModelIds,
    pub request_timeout_secs: u64,
    pub max_zone_suggestions: usize,
    pub tile_url_template: String,
    pub tile_attribution: String,
    pub export_dir: PathBuf,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            city: "Pakur".to_string(),
            region: "Jharkhand".to_string(),
            map_center: PAKUR_CENTER,
            map_zoom: 14,
            discovery_bias: GeoPoint::new(24.7861, 87.8512),
            discovery_query: "Daily Need Shops, Kirana, Pharmacies, and Wholesale Markets"
                .to_string(),
            focus_areas: vec![
                "Harindanga".to_string(),
                "Railway Colony".to_string(),
                "Main Market".to_string(),
            ],
            api_base_url: "https://generativelanguage.googleapis.com".to_string(),
            models: ModelIds::default(),
            request_timeout_secs: 30,
            max_zone_suggestions: 3,
            tile_url_template: "https://tile.openstreetmap.org/{z}/{x}/{y}.png".to_string(),
            tile_attribution: "© OpenStreetMap contributors".to_string(),
            export_dir: PathBuf::from("."),
        }
    }
}

impl DashboardConfig {
    /// Where the config file is looked up: `PAKURFAST_CONFIG`, else the
    /// working directory.
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
            if !path.trim().is_empty() {
                return Ok(PathBuf::from(path));
            }
        }
        let cwd = std::env::current_dir().map_err(ConfigError::CurrentDir)?;
        Ok(cwd.join(CONFIG_FILE_NAME))
    }

    /// Loads `path`; a missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::default())
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Start-up entry point: problems are logged and the defaults are used.
    pub fn load_or_default() -> Self {
        let loaded = Self::default_path().and_then(|path| Self::load(&path));
        match loaded {
            Ok(config) => config,
            Err(error) => {
                tracing::warn!(%error, "falling back to default configuration");
                Self::default()
            }
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    /// API credential from the environment, if any.
    pub fn api_key_from_env() -> Option<String> {
        [API_KEY_ENV, API_KEY_FALLBACK_ENV]
            .iter()
            .filter_map(|name| std::env::var(name).ok())
            .map(|value| value.trim().to_string())
            .find(|value| !value.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = DashboardConfig::load(&dir.path().join(CONFIG_FILE_NAME)).unwrap();
        assert_eq!(config, DashboardConfig::default());
    }

    #[test]
    fn partial_file_overrides_only_named_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(
            &path,
            r#"{"city":"Dumka","models":{"logistics":"gemini-2.5-flash"},"request_timeout_secs":5}"#,
        )
        .unwrap();

        let config = DashboardConfig::load(&path).unwrap();
        assert_eq!(config.city, "Dumka");
        assert_eq!(config.models.logistics, "gemini-2.5-flash");
        assert_eq!(config.models.zones, ModelIds::default().zones);
        assert_eq!(config.request_timeout(), Duration::from_secs(5));
        assert_eq!(config.map_center, PAKUR_CENTER);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, r#"{"citty":"Pakur"}"#).unwrap();
        assert!(matches!(
            DashboardConfig::load(&path),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn zero_timeout_is_clamped() {
        let config = DashboardConfig {
            request_timeout_secs: 0,
            ..DashboardConfig::default()
        };
        assert_eq!(config.request_timeout(), Duration::from_secs(1));
    }
}
