use chrono::Local;
use serde::{Deserialize, Serialize};

/// Header of the watch log CSV, in column order
pub const WATCH_LOG_COLUMNS: [&str; 5] = [
    "Title",
    "Genre",
    "Watch Time (mins)",
    "Date Watched",
    "Rating",
];

/// One manually logged viewing event, as stored in the watch log
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WatchEntry {
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Genre")]
    pub genre: String,
    #[serde(rename = "Watch Time (mins)")]
    pub watch_time_minutes: u32,
    #[serde(rename = "Date Watched")]
    pub date_watched: String, // Free text, conventionally YYYY-MM-DD
    #[serde(rename = "Rating")]
    pub rating: f64, // Conventionally 1-5, not enforced
}

/// Raw form submission before validation. Every field is untrusted text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryForm {
    pub title: String,
    pub genre: String,
    pub watch_time: String,
    pub date_watched: String,
    pub rating: String,
}

impl EntryForm {
    /// Empty form with the date pre-filled to today, like the entry form default
    pub fn today() -> Self {
        Self {
            date_watched: Local::now().date_naive().format("%Y-%m-%d").to_string(),
            ..Self::default()
        }
    }
}

impl WatchEntry {
    /// Row as written to the watch log, in `WATCH_LOG_COLUMNS` order
    pub fn to_record(&self) -> [String; 5] {
        [
            self.title.clone(),
            self.genre.clone(),
            self.watch_time_minutes.to_string(),
            self.date_watched.clone(),
            format_rating(self.rating),
        ]
    }
}

/// Ratings always carry a fractional part on disk ("4.0", not "4")
pub fn format_rating(rating: f64) -> String {
    if rating.fract() == 0.0 {
        format!("{:.1}", rating)
    } else {
        rating.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_rating_keeps_decimal_point() {
        assert_eq!(format_rating(4.0), "4.0");
        assert_eq!(format_rating(3.5), "3.5");
        assert_eq!(format_rating(2.25), "2.25");
    }

    #[test]
    fn test_to_record_matches_header_order() {
        let entry = WatchEntry {
            title: "Dark".to_string(),
            genre: "Thriller".to_string(),
            watch_time_minutes: 55,
            date_watched: "2024-03-01".to_string(),
            rating: 4.0,
        };
        assert_eq!(entry.to_record(), ["Dark", "Thriller", "55", "2024-03-01", "4.0"]);
    }

    #[test]
    fn test_today_prefills_date_only() {
        let form = EntryForm::today();
        assert!(form.title.is_empty());
        assert!(chrono::NaiveDate::parse_from_str(&form.date_watched, "%Y-%m-%d").is_ok());
    }

    #[test]
    fn test_watch_entry_json_uses_log_headers() {
        let entry = WatchEntry {
            title: "Dark".to_string(),
            genre: "Thriller".to_string(),
            watch_time_minutes: 55,
            date_watched: "2024-03-01".to_string(),
            rating: 5.0,
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["Watch Time (mins)"], 55);
        assert_eq!(json["Rating"], 5.0);
    }
}
