use std::path::PathBuf;
use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Every failure the store, importer and statistics can report.
/// All kinds are recoverable: they end the triggering operation only.
#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    #[error("no data found at {}", .0.display())]
    NotFound(PathBuf),

    #[error("no entries available yet")]
    EmptyData,

    #[error("no import yet: upload and simplify an export first")]
    NotReady,

    #[error("invalid or empty import: {0}")]
    InvalidSchema(String),

    #[error("could not load {}: {source}", path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: BoxError,
    },

    #[error("could not write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Csv(#[from] csv::Error),
}

impl TrackerError {
    pub(crate) fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field,
            reason: reason.into(),
        }
    }

    pub(crate) fn load(path: impl Into<PathBuf>, source: impl Into<BoxError>) -> Self {
        Self::Load {
            path: path.into(),
            source: source.into(),
        }
    }

    pub(crate) fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }

    /// Kinds that mean "nothing to show yet" rather than a failure
    pub fn is_informational(&self) -> bool {
        matches!(self, Self::NotFound(_) | Self::EmptyData | Self::NotReady)
    }
}

pub type Result<T> = std::result::Result<T, TrackerError>;
