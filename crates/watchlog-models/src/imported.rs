use serde::Serialize;

/// Header of the normalized import CSV, in column order
pub const NORMALIZED_COLUMNS: [&str; 5] = ["title", "start time", "device", "duration", "date_added"];

/// Fill value for columns the source export did not provide
pub const UNKNOWN: &str = "Unknown";

/// One row of the normalized import. All fields are passthrough text;
/// month and year are derived from `date_added` at statistics time.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ImportedEvent {
    pub title: String,
    #[serde(rename = "start time")]
    pub start_time: String,
    pub device: String,
    pub duration: String,
    pub date_added: String,
}

impl ImportedEvent {
    pub fn to_record(&self) -> [&str; 5] {
        [
            &self.title,
            &self.start_time,
            &self.device,
            &self.duration,
            &self.date_added,
        ]
    }
}
