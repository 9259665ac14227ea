use anyhow::Result;
use std::path::{Path, PathBuf};

/// Base directory override from `WATCHLOG_HOME`, if set
pub fn base_path_override() -> Option<PathBuf> {
    std::env::var_os("WATCHLOG_HOME").map(PathBuf::from)
}

pub struct PathManager {
    config_dir: PathBuf,
    data_dir: PathBuf,
    log_dir: PathBuf,
}

impl PathManager {
    pub fn new() -> Result<Self> {
        let base_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?
            .join("watchlog");

        Ok(Self::from_base(base_dir))
    }

    /// Config at the base level, data and logs in subdirectories
    pub fn from_base(base: impl Into<PathBuf>) -> Self {
        let base = base.into();
        Self {
            config_dir: base.clone(),
            data_dir: base.join("data"),
            log_dir: base.join("logs"),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }

    pub fn watch_log_file(&self) -> PathBuf {
        self.data_dir.join("watch_log.csv")
    }

    /// Single slot: every import overwrites this file
    pub fn normalized_import_file(&self) -> PathBuf {
        self.data_dir.join("simplified_import.csv")
    }

    pub fn log_file(&self) -> PathBuf {
        self.log_dir.join("watchlog.log")
    }

    pub fn ensure_directories(&self) -> Result<()> {
        std::fs::create_dir_all(&self.config_dir)?;
        std::fs::create_dir_all(&self.data_dir)?;
        std::fs::create_dir_all(&self.log_dir)?;
        Ok(())
    }
}

impl Default for PathManager {
    fn default() -> Self {
        if let Some(base) = base_path_override() {
            return Self::from_base(base);
        }

        // Platform-specific paths (e.g., ~/.config/watchlog on Linux), falling
        // back to the working directory when no config dir is known
        Self::new().unwrap_or_else(|_| Self::from_base(".watchlog"))
    }
}
