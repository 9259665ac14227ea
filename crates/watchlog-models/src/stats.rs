use serde::{Deserialize, Serialize};

/// Aggregate summary over the manual watch log
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ManualStats {
    pub total_entries: usize,
    pub total_minutes: u64,
    pub average_minutes: f64,
    pub average_rating: f64,
    pub top_genre: Option<String>, // None when every genre cell is empty
}

/// Overview of a normalized streaming-service import
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ImportedOverview {
    pub total_entries: usize, // All rows, including ones with unparsable dates
    pub dated_entries: usize, // Rows whose date_added parsed
    pub top_title: Option<String>,
    pub top_month: Option<String>, // Full month name, e.g. "September"
    pub top_year: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TitleCount {
    pub title: String,
    pub count: usize,
}

impl TitleCount {
    pub fn new(title: impl Into<String>, count: usize) -> Self {
        Self { title: title.into(), count }
    }
}
