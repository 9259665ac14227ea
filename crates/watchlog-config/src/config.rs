use crate::paths::PathManager;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub stats: StatsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Locations of the two CSV files. Unset paths resolve under the data directory.
#[derive(Debug, Default, Clone, Serialize, Deserialize, PartialEq)]
pub struct StorageConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub watch_log: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub normalized_import: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StatsConfig {
    #[serde(default = "default_top_k")]
    pub top_k: usize,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    /// Daily-rotated log file; logs go to stderr when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

fn default_top_k() -> usize {
    5
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            top_k: default_top_k(),
        }
    }
}

impl Config {
    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load the config file if present, otherwise defaults
    pub fn load_or_default(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load_from_file(path)
            .map_err(|e| anyhow::anyhow!("Failed to load config from {}: {}", path.display(), e))
    }

    pub fn save_to_file(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self, paths: &PathManager) -> anyhow::Result<()> {
        if self.stats.top_k == 0 {
            return Err(anyhow::anyhow!("stats.top_k must be greater than zero"));
        }

        if self.watch_log_path(paths) == self.normalized_import_path(paths) {
            return Err(anyhow::anyhow!(
                "storage.watch_log and storage.normalized_import must be different files"
            ));
        }

        Ok(())
    }

    pub fn watch_log_path(&self, paths: &PathManager) -> PathBuf {
        self.storage
            .watch_log
            .clone()
            .unwrap_or_else(|| paths.watch_log_file())
    }

    pub fn normalized_import_path(&self, paths: &PathManager) -> PathBuf {
        self.storage
            .normalized_import
            .clone()
            .unwrap_or_else(|| paths.normalized_import_file())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_config_load_and_save() {
        let file = NamedTempFile::new().unwrap();
        let config = Config {
            storage: StorageConfig {
                watch_log: Some(PathBuf::from("/tmp/log.csv")),
                normalized_import: None,
            },
            stats: StatsConfig { top_k: 10 },
            logging: LoggingConfig::default(),
        };

        config.save_to_file(file.path()).unwrap();

        let loaded = Config::load_from_file(file.path()).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.stats.top_k, 5);
        assert!(config.storage.watch_log.is_none());
        assert!(config.logging.file.is_none());
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = Config::load_or_default(Path::new("/nonexistent/watchlog/config.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_paths_resolve_under_data_dir() {
        let paths = PathManager::from_base("/home/user/.config/watchlog");
        let config = Config::default();
        assert_eq!(config.watch_log_path(&paths), paths.watch_log_file());
        assert_eq!(config.normalized_import_path(&paths), paths.normalized_import_file());
    }

    #[test]
    fn test_config_validate() {
        let paths = PathManager::from_base("/srv/watchlog");
        let mut config = Config::default();
        assert!(config.validate(&paths).is_ok());

        config.stats.top_k = 0;
        assert!(config.validate(&paths).is_err());

        config.stats.top_k = 5;
        config.storage.normalized_import = Some(paths.watch_log_file());
        assert!(config.validate(&paths).is_err());
    }
}
