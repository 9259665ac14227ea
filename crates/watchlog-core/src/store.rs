use crate::error::{Result, TrackerError};
use csv::{ReaderBuilder, Trim, WriterBuilder};
use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use watchlog_models::{EntryForm, WatchEntry, WATCH_LOG_COLUMNS};

/// Append-only CSV table of manually logged watch events
#[derive(Debug, Clone)]
pub struct RecordStore {
    path: PathBuf,
}

impl RecordStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Validate a form submission and append it as one row.
    ///
    /// Nothing is written unless every field validates. The file (and its
    /// parent directories) is created with the header on first use.
    pub fn append(&self, form: &EntryForm) -> Result<WatchEntry> {
        let entry = validate(form)?;
        self.append_entry(&entry)?;
        info!(
            title = %entry.title,
            genre = %entry.genre,
            minutes = entry.watch_time_minutes,
            path = %self.path.display(),
            "Saved watch log entry"
        );
        Ok(entry)
    }

    /// Write one already-validated row. Opens in append mode, so prior rows
    /// are never read back or rewritten.
    pub fn append_entry(&self, entry: &WatchEntry) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| TrackerError::write(parent, e))?;
        }

        let mut file = OpenOptions::new()
            .read(true)
            .append(true)
            .create(true)
            .open(&self.path)
            .map_err(|e| TrackerError::write(&self.path, e))?;

        let len = file
            .metadata()
            .map_err(|e| TrackerError::write(&self.path, e))?
            .len();

        if len > 0 && !ends_with_newline(&mut file).map_err(|e| TrackerError::write(&self.path, e))? {
            // hand-edited file without a trailing newline
            file.write_all(b"\n")
                .map_err(|e| TrackerError::write(&self.path, e))?;
        }

        let mut writer = WriterBuilder::new().has_headers(false).from_writer(file);
        if len == 0 {
            debug!(path = %self.path.display(), "Creating watch log with header");
            writer.write_record(WATCH_LOG_COLUMNS)?;
        }
        writer.write_record(entry.to_record())?;
        writer
            .flush()
            .map_err(|e| TrackerError::write(&self.path, e))?;

        Ok(())
    }

    /// All rows in file order
    pub fn read_all(&self) -> Result<Vec<WatchEntry>> {
        if !self.path.exists() {
            return Err(TrackerError::NotFound(self.path.clone()));
        }

        let mut reader = ReaderBuilder::new()
            .trim(Trim::All)
            .from_path(&self.path)
            .map_err(|e| TrackerError::load(&self.path, e))?;

        let entries = reader
            .deserialize::<WatchEntry>()
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| TrackerError::load(&self.path, e))?;

        debug!(count = entries.len(), path = %self.path.display(), "Read watch log");
        Ok(entries)
    }
}

fn ends_with_newline(file: &mut File) -> std::io::Result<bool> {
    let mut last = [0u8; 1];
    file.seek(SeekFrom::End(-1))?;
    file.read_exact(&mut last)?;
    Ok(last[0] == b'\n')
}

/// Turn a raw form into a typed entry. Presence of every field is checked
/// before any field is parsed.
pub fn validate(form: &EntryForm) -> Result<WatchEntry> {
    let fields = [
        (WATCH_LOG_COLUMNS[0], form.title.trim()),
        (WATCH_LOG_COLUMNS[1], form.genre.trim()),
        (WATCH_LOG_COLUMNS[2], form.watch_time.trim()),
        (WATCH_LOG_COLUMNS[3], form.date_watched.trim()),
        (WATCH_LOG_COLUMNS[4], form.rating.trim()),
    ];
    if let Some((field, _)) = fields.iter().find(|(_, value)| value.is_empty()) {
        return Err(TrackerError::validation(*field, "is required"));
    }
    let [(_, title), (_, genre), (_, watch_time), (_, date_watched), (_, rating)] = fields;

    let watch_time_minutes = watch_time.parse::<u32>().map_err(|_| {
        TrackerError::validation(
            WATCH_LOG_COLUMNS[2],
            format!("'{}' is not a whole number of minutes", watch_time),
        )
    })?;

    let rating = rating
        .parse::<f64>()
        .ok()
        .filter(|r| r.is_finite())
        .ok_or_else(|| {
            TrackerError::validation(WATCH_LOG_COLUMNS[4], format!("'{}' is not a number", rating))
        })?;

    Ok(WatchEntry {
        title: title.to_string(),
        genre: genre.to_string(),
        watch_time_minutes,
        date_watched: date_watched.to_string(),
        rating,
    })
}
