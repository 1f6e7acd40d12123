//! Global calgrid configuration.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::{CalGridError, CalGridResult};
use crate::event::Category;
use crate::persistence::FileGateway;

static DEFAULT_DATA_DIR: &str = "~/.local/share/calgrid";
static ENV_PREFIX: &str = "CALGRID";

fn default_data_dir() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_DIR)
}

fn is_default_data_dir(p: &PathBuf) -> bool {
    *p == default_data_dir()
}

fn is_default_category(c: &Category) -> bool {
    *c == Category::default()
}

/// Configuration at ~/.config/calgrid/config.toml
///
/// Every key can also be set through a `CALGRID_` environment variable,
/// e.g. `CALGRID_DATA_DIR`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CalGridConfig {
    /// Directory holding the stored events
    #[serde(default = "default_data_dir", skip_serializing_if = "is_default_data_dir")]
    pub data_dir: PathBuf,

    /// Category given to new events when none is chosen
    #[serde(default, skip_serializing_if = "is_default_category")]
    pub default_category: Category,
}

impl Default for CalGridConfig {
    fn default() -> Self {
        CalGridConfig {
            data_dir: default_data_dir(),
            default_category: Category::default(),
        }
    }
}

impl CalGridConfig {
    pub fn config_path() -> CalGridResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| CalGridError::Config("Could not determine config directory".into()))?
            .join("calgrid");

        Ok(config_dir.join("config.toml"))
    }

    /// Load the config, writing a commented default file on first run.
    pub fn load() -> CalGridResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    /// Load from `path` (which may be missing) plus the environment.
    pub fn load_from(path: &Path) -> CalGridResult<Self> {
        Self::load_with_env(path, Environment::with_prefix(ENV_PREFIX))
    }

    /// Environment values win over the file.
    fn load_with_env(path: &Path, env: Environment) -> CalGridResult<Self> {
        Config::builder()
            .add_source(File::from(path.to_path_buf()).required(false))
            .add_source(env)
            .build()
            .map_err(|e| CalGridError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| CalGridError::Config(e.to_string()))
    }

    /// Write this config to `path`, omitting default values.
    pub fn save_to(&self, path: &Path) -> CalGridResult<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| CalGridError::Config(e.to_string()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)
            .map_err(|e| CalGridError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> CalGridResult<()> {
        let contents = format!(
            "\
# calgrid configuration

# Where your events are stored:
# data_dir = \"{}\"

# Category for new events (meeting, task, reminder, personal, other):
# default_category = \"other\"
",
            DEFAULT_DATA_DIR
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                CalGridError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| CalGridError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    /// Data directory with `~` expanded.
    pub fn data_path(&self) -> PathBuf {
        let full_path_str = shellexpand::tilde(&self.data_dir.to_string_lossy()).into_owned();

        PathBuf::from(full_path_str)
    }

    /// Gateway storing events in the data directory.
    pub fn gateway(&self) -> FileGateway {
        FileGateway::new(self.data_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_file_parses_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("calgrid/config.toml");

        CalGridConfig::create_default_config(&path).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("# data_dir"));

        let parsed: CalGridConfig = toml::from_str(&content).unwrap();
        assert_eq!(parsed, CalGridConfig::default());
    }

    #[test]
    fn test_save_then_parse() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let config = CalGridConfig {
            data_dir: PathBuf::from("/srv/calendar"),
            default_category: Category::Meeting,
        };

        config.save_to(&path).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("default_category = \"meeting\""));

        let parsed: CalGridConfig = toml::from_str(&content).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "data_dir = \"/tmp/events\"\ndefault_category = \"task\"\n").unwrap();

        let config = CalGridConfig::load_from(&path).unwrap();

        assert_eq!(config.data_path(), PathBuf::from("/tmp/events"));
        assert_eq!(config.default_category, Category::Task);
    }

    #[test]
    fn test_environment_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "data_dir = \"/tmp/events\"\ndefault_category = \"task\"\n").unwrap();

        let mut vars = config::Map::new();
        vars.insert("CALGRID_DATA_DIR".to_string(), "/srv/override".to_string());
        let env = Environment::with_prefix(ENV_PREFIX).source(Some(vars));

        let config = CalGridConfig::load_with_env(&path, env).unwrap();

        assert_eq!(config.data_dir, PathBuf::from("/srv/override"));
        assert_eq!(config.default_category, Category::Task);
    }

    #[test]
    fn test_load_from_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = CalGridConfig::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.default_category, Category::Other);
    }

    #[test]
    fn test_defaults_are_not_written() {
        let content = toml::to_string_pretty(&CalGridConfig::default()).unwrap();
        assert!(content.trim().is_empty());
    }

    #[test]
    fn test_gateway_lives_in_data_dir() {
        let config = CalGridConfig::default();
        assert!(config.gateway().path().ends_with("calgrid/calendarEvents.json"));
    }
}
