use crate::dates::parse_export_date;
use crate::error::{Result, TrackerError};
use crate::store::RecordStore;
use crate::tally::Tally;
use chrono::Datelike;
use csv::{ReaderBuilder, StringRecord};
use std::path::Path;
use tracing::debug;
use watchlog_models::{ImportedOverview, ManualStats, TitleCount};

/// Counts, sums, means and most common genre over the manual watch log
pub fn manual_stats(store: &RecordStore) -> Result<ManualStats> {
    let entries = store.read_all()?;
    if entries.is_empty() {
        return Err(TrackerError::EmptyData);
    }

    let total_entries = entries.len();
    let total_minutes: u64 = entries.iter().map(|e| u64::from(e.watch_time_minutes)).sum();
    let rating_sum: f64 = entries.iter().map(|e| e.rating).sum();

    let genres: Tally<&str> = entries
        .iter()
        .map(|e| e.genre.as_str())
        .filter(|g| !g.is_empty())
        .collect();

    Ok(ManualStats {
        total_entries,
        total_minutes,
        average_minutes: total_minutes as f64 / total_entries as f64,
        average_rating: rating_sum / total_entries as f64,
        top_genre: genres.mode().map(|g| g.to_string()),
    })
}

/// Totals plus most watched title, month and year of a normalized import.
///
/// Rows whose `date_added` does not parse still count toward the total and
/// the title; they are left out of the month and year only.
pub fn imported_overview(path: &Path) -> Result<ImportedOverview> {
    let table = NormalizedTable::load(path, &["title", "date_added"])?;
    let title_col = table.column("title")?;
    let date_col = table.column("date_added")?;

    let mut titles = Tally::new();
    let mut months = Tally::new();
    let mut years = Tally::new();
    let mut dated_entries = 0;

    for row in &table.rows {
        let title = row.get(title_col).unwrap_or_default();
        if !title.is_empty() {
            titles.add(title);
        }

        if let Some(date) = parse_export_date(row.get(date_col).unwrap_or_default()) {
            dated_entries += 1;
            months.add(date.format("%B").to_string());
            years.add(date.year());
        }
    }

    debug!(
        rows = table.rows.len(),
        dated = dated_entries,
        distinct_titles = titles.len(),
        "Computed import overview"
    );

    Ok(ImportedOverview {
        total_entries: table.rows.len(),
        dated_entries,
        top_title: titles.mode().map(|t| t.to_string()),
        top_month: months.mode().cloned(),
        top_year: years.mode().copied(),
    })
}

/// Top `k` titles by number of rows, most watched first. Equal counts keep
/// the order in which the titles first appear.
pub fn top_titles(path: &Path, k: usize) -> Result<Vec<TitleCount>> {
    let table = NormalizedTable::load(path, &["title"])?;
    let title_col = table.column("title")?;

    let titles: Tally<&str> = table
        .rows
        .iter()
        .map(|row| row.get(title_col).unwrap_or_default())
        .filter(|t| !t.is_empty())
        .collect();

    Ok(titles
        .ranked()
        .into_iter()
        .take(k)
        .map(|(title, count)| TitleCount::new(title, count))
        .collect())
}

/// A normalized import read by header name, so adopted or hand-edited files
/// with reordered columns still work
struct NormalizedTable {
    headers: Vec<String>,
    rows: Vec<StringRecord>,
}

impl NormalizedTable {
    fn load(path: &Path, required: &[&str]) -> Result<Self> {
        if !path.exists() {
            return Err(TrackerError::NotFound(path.to_path_buf()));
        }

        let mut reader = ReaderBuilder::new()
            .from_path(path)
            .map_err(|e| TrackerError::load(path, e))?;
        let headers: Vec<String> = reader
            .headers()
            .map_err(|e| TrackerError::load(path, e))?
            .iter()
            .map(|h| h.trim().to_lowercase())
            .collect();

        for column in required {
            if !headers.iter().any(|h| h == column) {
                return Err(TrackerError::InvalidSchema(format!("missing column '{}'", column)));
            }
        }

        let rows = reader
            .records()
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| TrackerError::load(path, e))?;
        if rows.is_empty() {
            return Err(TrackerError::InvalidSchema("no rows".to_string()));
        }

        Ok(Self { headers, rows })
    }

    fn column(&self, name: &str) -> Result<usize> {
        self.headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| TrackerError::InvalidSchema(format!("missing column '{}'", name)))
    }
}
