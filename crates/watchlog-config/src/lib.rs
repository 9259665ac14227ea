pub mod config;
pub mod paths;

pub use config::{Config, LoggingConfig, StatsConfig, StorageConfig};
pub use paths::{base_path_override, PathManager};
