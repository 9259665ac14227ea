pub mod entry;
pub mod imported;
pub mod stats;

pub use entry::{format_rating, EntryForm, WatchEntry, WATCH_LOG_COLUMNS};
pub use imported::{ImportedEvent, NORMALIZED_COLUMNS, UNKNOWN};
pub use stats::{ImportedOverview, ManualStats, TitleCount};
