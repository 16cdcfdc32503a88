//! Runtime settings for the `kubepizza` binary.
//!
//! Settings come from an optional YAML file named by `KUBEPIZZA_CONFIG`;
//! every field has a default, so an empty file is valid.
//!
//! # Example YAML
//!
//! ```yaml
//! catalog: /etc/kubepizza/catalog.yaml
//! send_delay_ms: 250
//! log_level: info
//! ```

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Duration;

use kubepizza_catalog::Catalog;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Names the settings file.
pub const CONFIG_ENV: &str = "KUBEPIZZA_CONFIG";
/// Overrides [`Settings::send_delay_ms`].
pub const SEND_DELAY_ENV: &str = "KUBEPIZZA_SEND_DELAY_MS";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Catalog file (`.yaml`, `.yml` or `.json`); the built-in catalog
    /// when unset.
    pub catalog: Option<PathBuf>,
    /// How long `order create` pretends to send the order.
    pub send_delay_ms: u64,
    /// Log filter used when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            catalog: None,
            send_delay_ms: 600,
            log_level: "warn".to_string(),
        }
    }
}

impl Settings {
    /// Reads a settings file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, String> {
        let path = path.as_ref();
        let file = File::open(path)
            .map_err(|err| format!("Failed to open settings '{}': {err}", path.display()))?;
        serde_yaml::from_reader(BufReader::new(file))
            .map_err(|err| format!("Failed to parse settings '{}': {err}", path.display()))
    }

    /// Settings for this process, from the environment.
    pub fn from_env() -> Result<Self, String> {
        let config = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
        let delay = std::env::var(SEND_DELAY_ENV).ok();
        Self::resolve(config.as_deref(), delay.as_deref())
    }

    /// Loads `config` when given, then applies a send-delay override.
    pub fn resolve(config: Option<&Path>, send_delay_ms: Option<&str>) -> Result<Self, String> {
        let mut settings = match config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        if let Some(raw) = send_delay_ms {
            settings.send_delay_ms = raw
                .trim()
                .parse()
                .map_err(|_| format!("{SEND_DELAY_ENV} must be a whole number of milliseconds, got '{raw}'"))?;
        }
        Ok(settings)
    }

    pub fn send_delay(&self) -> Duration {
        Duration::from_millis(self.send_delay_ms)
    }

    /// The configured catalog, or the built-in one.
    pub fn load_catalog(&self) -> Result<Catalog, String> {
        match &self.catalog {
            Some(path) => {
                let catalog = Catalog::load(path)
                    .map_err(|err| format!("Failed to load catalog '{}': {err}", path.display()))?;
                info!(path = %path.display(), pizzas = catalog.pizzas().len(), "loaded catalog file");
                Ok(catalog)
            }
            None => Ok(Catalog::builtin()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_defaults_without_file() {
        let settings = Settings::resolve(None, None).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.send_delay(), Duration::from_millis(600));
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.yaml");
        fs::write(&path, "log_level: debug\n").unwrap();

        let settings = Settings::resolve(Some(&path), None).unwrap();
        assert_eq!(settings.log_level, "debug");
        assert_eq!(settings.send_delay_ms, 600);
        assert!(settings.catalog.is_none());
    }

    #[test]
    fn test_delay_override() {
        let settings = Settings::resolve(None, Some(" 0 ")).unwrap();
        assert_eq!(settings.send_delay_ms, 0);

        let err = Settings::resolve(None, Some("soon")).unwrap_err();
        assert!(err.contains(SEND_DELAY_ENV));
    }

    #[test]
    fn test_catalog_path_is_loaded() {
        let dir = TempDir::new().unwrap();
        let catalog = dir.path().join("catalog.json");
        fs::write(
            &catalog,
            r#"{"pizzas": [{"name": "bianca"}], "toppings": ["garlic"]}"#,
        )
        .unwrap();
        let settings = Settings {
            catalog: Some(catalog),
            ..Settings::default()
        };
        assert_eq!(settings.load_catalog().unwrap().pizzas(), ["bianca"]);

        let missing = Settings {
            catalog: Some(dir.path().join("nope.yaml")),
            ..Settings::default()
        };
        assert!(missing.load_catalog().unwrap_err().contains("nope.yaml"));
    }

    #[test]
    fn test_missing_settings_file_is_an_error() {
        let err = Settings::load("/definitely/not/here.yaml").unwrap_err();
        assert!(err.starts_with("Failed to open settings"));
    }
}
