use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

pub const DEFAULT_DATABASE: &str = "(default)";
pub const DEFAULT_COLLECTION: &str = "weather";

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// project_id = "my-weather-project"
/// api_key = "AIza..."
/// database = "(default)"
/// collection = "weather"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Firebase project hosting the weather collection.
    pub project_id: Option<String>,

    /// Optional API key appended to every store request.
    pub api_key: Option<String>,

    /// Firestore database id; virtually always "(default)".
    #[serde(default = "default_database")]
    pub database: String,

    /// Collection queried for weather records.
    #[serde(default = "default_collection")]
    pub collection: String,
}

fn default_database() -> String {
    DEFAULT_DATABASE.to_string()
}

fn default_collection() -> String {
    DEFAULT_COLLECTION.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            project_id: None,
            api_key: None,
            database: default_database(),
            collection: default_collection(),
        }
    }
}

impl Config {
    /// Project id, or an error pointing the user at `clima configure`.
    pub fn require_project_id(&self) -> Result<&str> {
        self.project_id.as_deref().ok_or_else(|| {
            anyhow!(
                "No Firebase project configured.\n\
                 Hint: run `clima configure` and enter your project id first."
            )
        })
    }

    pub fn is_configured(&self) -> bool {
        self.project_id.is_some()
    }

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
        let dirs = ProjectDirs::from("dev", "clima", "clima-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_project_id_errors_when_not_set() {
        let cfg = Config::default();
        let err = cfg.require_project_id().unwrap_err();

        assert!(err.to_string().contains("No Firebase project configured"));
        assert!(err.to_string().contains("Hint: run `clima configure`"));
    }

    #[test]
    fn defaults_target_the_weather_collection() {
        let cfg = Config::default();

        assert!(!cfg.is_configured());
        assert_eq!(cfg.database, "(default)");
        assert_eq!(cfg.collection, "weather");
    }

    #[test]
    fn minimal_toml_fills_in_defaults() {
        let cfg: Config = toml::from_str(r#"project_id = "demo-project""#)
            .expect("minimal config must parse");

        assert_eq!(cfg.require_project_id().unwrap(), "demo-project");
        assert_eq!(cfg.api_key, None);
        assert_eq!(cfg.database, "(default)");
        assert_eq!(cfg.collection, "weather");
    }

    #[test]
    fn toml_roundtrip_preserves_every_field() {
        let cfg = Config {
            project_id: Some("demo-project".to_string()),
            api_key: Some("AIzaTEST".to_string()),
            database: "(default)".to_string(),
            collection: "leituras".to_string(),
        };

        let serialized = toml::to_string_pretty(&cfg).expect("serialize");
        let parsed: Config = toml::from_str(&serialized).expect("parse back");

        assert_eq!(parsed.project_id.as_deref(), Some("demo-project"));
        assert_eq!(parsed.api_key.as_deref(), Some("AIzaTEST"));
        assert_eq!(parsed.collection, "leituras");
    }
}
