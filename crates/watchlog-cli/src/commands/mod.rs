use crate::output::Output;
use color_eyre::Result;
use std::path::PathBuf;
use watchlog_config::{Config, PathManager};
use watchlog_core::{ImportSession, Importer, RecordStore, TrackerError};

pub mod add;
pub mod chart;
pub mod config;
pub mod import;
pub mod log;
pub mod menu;
pub mod prompts;
pub mod render;
pub mod stats;

/// Resolved paths and configuration shared by every command
pub struct AppContext {
    pub paths: PathManager,
    pub config_file: PathBuf,
    pub config: Config,
}

impl AppContext {
    pub fn load(config_override: Option<PathBuf>) -> Result<Self> {
        let paths = PathManager::default();
        let config_file = config_override.unwrap_or_else(|| paths.config_file());
        let config = Config::load_or_default(&config_file)
            .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;
        config
            .validate(&paths)
            .map_err(|e| color_eyre::eyre::eyre!("Invalid config {}: {}", config_file.display(), e))?;

        Ok(Self {
            paths,
            config_file,
            config,
        })
    }

    pub fn store(&self) -> RecordStore {
        RecordStore::new(self.config.watch_log_path(&self.paths))
    }

    pub fn importer(&self) -> Importer {
        Importer::new(self.config.normalized_import_path(&self.paths))
    }

    /// Fresh session, or one over an earlier normalized file
    pub fn session(&self, normalized: Option<PathBuf>) -> watchlog_core::Result<ImportSession> {
        match normalized {
            Some(path) => ImportSession::adopt(path),
            None => Ok(ImportSession::new(self.importer())),
        }
    }
}

/// User-facing text for each failure kind
pub fn describe(err: &TrackerError) -> String {
    match err {
        TrackerError::Validation { field, reason } => format!("Invalid input: {} {}", field, reason),
        TrackerError::NotFound(path) => format!("No data found at {}", path.display()),
        TrackerError::EmptyData => "No entries available yet.".to_string(),
        TrackerError::NotReady => {
            "Please import an export first (watchlog import <FILE>, or --normalized <PATH>)".to_string()
        }
        other => other.to_string(),
    }
}

/// Show a failure without ending an interactive session
pub fn show(err: &TrackerError, output: &Output) {
    if err.is_informational() {
        output.warn(describe(err));
    } else {
        output.error(describe(err));
    }
}

/// One-shot commands: informational kinds are a warning and a clean exit,
/// the rest fail the command.
pub fn settle<T>(result: watchlog_core::Result<T>, output: &Output) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(err) if err.is_informational() => {
            tracing::debug!(error = %err, "Nothing to show");
            output.warn(describe(&err));
            Ok(None)
        }
        Err(err) => {
            tracing::debug!(error = ?err, "Command failed");
            Err(color_eyre::eyre::eyre!(describe(&err)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_kinds() {
        let err = TrackerError::Validation {
            field: "Rating",
            reason: "'great' is not a number".to_string(),
        };
        assert_eq!(describe(&err), "Invalid input: Rating 'great' is not a number");
        assert_eq!(describe(&TrackerError::EmptyData), "No entries available yet.");
        assert!(describe(&TrackerError::NotReady).contains("import"));
    }

    #[test]
    fn test_settle_informational_is_ok() {
        let output = Output::new(crate::output::OutputFormat::Human, true);
        let settled: Option<()> = settle(Err(TrackerError::EmptyData), &output).unwrap();
        assert!(settled.is_none());

        let failed = settle::<()>(Err(TrackerError::InvalidSchema("no rows".to_string())), &output);
        assert!(failed.is_err());
    }
}
