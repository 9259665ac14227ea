pub mod dates;
pub mod error;
pub mod import;
pub mod stats;
pub mod store;
pub mod tally;

pub use error::{Result, TrackerError};
pub use import::{ImportReport, ImportSession, Importer};
pub use stats::{imported_overview, manual_stats, top_titles};
pub use store::RecordStore;
pub use tally::Tally;
