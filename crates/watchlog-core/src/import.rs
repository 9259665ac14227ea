use crate::error::{Result, TrackerError};
use crate::stats;
use csv::{ReaderBuilder, WriterBuilder};
use serde::Serialize;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use watchlog_models::{ImportedEvent, ImportedOverview, TitleCount, NORMALIZED_COLUMNS, UNKNOWN};

/// Outcome of one import: where the normalized file went and which target
/// columns came from the source versus the "Unknown" fill.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ImportReport {
    pub output: PathBuf,
    pub rows: usize,
    pub matched: Vec<&'static str>,
    pub filled: Vec<&'static str>,
}

/// Maps an arbitrary export CSV onto the fixed five-column schema
#[derive(Debug, Clone)]
pub struct Importer {
    output: PathBuf,
}

impl Importer {
    pub fn new(output: impl Into<PathBuf>) -> Self {
        Self {
            output: output.into(),
        }
    }

    pub fn output(&self) -> &Path {
        &self.output
    }

    /// Normalize `source` into the output file, replacing any earlier import.
    ///
    /// The source is parsed completely before the output is opened, so a
    /// source that fails to load leaves the previous output untouched.
    pub fn import_and_normalize(&self, source: &Path) -> Result<ImportReport> {
        let (events, matched, filled) = read_source(source)?;

        self.write_normalized(&events)?;

        if matched.is_empty() {
            warn!(
                source = %source.display(),
                "No recognised columns in export; every normalized column is '{}'",
                UNKNOWN
            );
        }
        info!(
            source = %source.display(),
            output = %self.output.display(),
            rows = events.len(),
            matched = ?matched,
            filled = ?filled,
            "Normalized export"
        );

        Ok(ImportReport {
            output: self.output.clone(),
            rows: events.len(),
            matched,
            filled,
        })
    }

    fn write_normalized(&self, events: &[ImportedEvent]) -> Result<()> {
        if let Some(parent) = self.output.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| TrackerError::write(parent, e))?;
        }

        let file = File::create(&self.output).map_err(|e| TrackerError::write(&self.output, e))?;
        let mut writer = WriterBuilder::new().has_headers(false).from_writer(file);
        writer.write_record(NORMALIZED_COLUMNS)?;
        for event in events {
            writer.write_record(event.to_record())?;
        }
        writer
            .flush()
            .map_err(|e| TrackerError::write(&self.output, e))?;
        Ok(())
    }
}

type SourceTable = (Vec<ImportedEvent>, Vec<&'static str>, Vec<&'static str>);

fn read_source(source: &Path) -> Result<SourceTable> {
    let mut reader = ReaderBuilder::new()
        .from_path(source)
        .map_err(|e| TrackerError::load(source, e))?;

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| TrackerError::load(source, e))?
        .iter()
        .map(normalize_header)
        .collect();

    if headers.iter().all(|h| h.is_empty()) {
        return Err(TrackerError::load(source, "file has no header row"));
    }
    debug!(columns = ?headers, "Export columns after normalization");

    // First source column wins when two normalize to the same name
    let positions: Vec<Option<usize>> = NORMALIZED_COLUMNS
        .iter()
        .map(|target| headers.iter().position(|h| h == target))
        .collect();

    let (matched, filled): (Vec<_>, Vec<_>) = NORMALIZED_COLUMNS
        .iter()
        .zip(&positions)
        .partition(|(_, position)| position.is_some());
    let matched: Vec<&'static str> = matched.into_iter().map(|(name, _)| *name).collect();
    let filled: Vec<&'static str> = filled.into_iter().map(|(name, _)| *name).collect();

    let mut events = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| TrackerError::load(source, e))?;
        let cell = |slot: usize| -> String {
            match positions[slot] {
                Some(i) => record.get(i).unwrap_or_default().to_string(),
                None => UNKNOWN.to_string(),
            }
        };
        events.push(ImportedEvent {
            title: cell(0),
            start_time: cell(1),
            device: cell(2),
            duration: cell(3),
            date_added: cell(4),
        });
    }

    Ok((events, matched, filled))
}

fn normalize_header(header: &str) -> String {
    header.trim_start_matches('\u{feff}').trim().to_lowercase()
}

/// Explicit replacement for a process-wide "last import" path.
///
/// Starts with no import; a successful [`ImportSession::import`] makes the
/// imported statistics available. A failed import keeps whatever state the
/// session already had. There is no reset: drop the session instead.
#[derive(Debug, Clone)]
pub struct ImportSession {
    importer: Importer,
    current: Option<PathBuf>,
}

impl ImportSession {
    pub fn new(importer: Importer) -> Self {
        Self {
            importer,
            current: None,
        }
    }

    /// Session over a normalized file produced by an earlier run
    pub fn adopt(normalized: impl Into<PathBuf>) -> Result<Self> {
        let normalized = normalized.into();
        if !normalized.exists() {
            return Err(TrackerError::NotFound(normalized));
        }
        debug!(path = %normalized.display(), "Adopted existing normalized import");
        Ok(Self {
            importer: Importer::new(normalized.clone()),
            current: Some(normalized),
        })
    }

    pub fn import(&mut self, source: &Path) -> Result<ImportReport> {
        let report = self.importer.import_and_normalize(source)?;
        self.current = Some(report.output.clone());
        Ok(report)
    }

    pub fn is_ready(&self) -> bool {
        self.current.is_some()
    }

    pub fn normalized_path(&self) -> Result<&Path> {
        self.current.as_deref().ok_or(TrackerError::NotReady)
    }

    pub fn overview(&self) -> Result<ImportedOverview> {
        stats::imported_overview(self.normalized_path()?)
    }

    pub fn top_titles(&self, k: usize) -> Result<Vec<TitleCount>> {
        stats::top_titles(self.normalized_path()?, k)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    fn source_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    fn read_rows(path: &Path) -> Vec<Vec<String>> {
        let mut reader = ReaderBuilder::new().has_headers(false).from_path(path).unwrap();
        reader
            .records()
            .map(|r| r.unwrap().iter().map(str::to_string).collect())
            .collect()
    }

    #[test]
    fn test_import_fills_missing_columns_with_unknown() {
        let dir = TempDir::new().unwrap();
        let importer = Importer::new(dir.path().join("simplified.csv"));
        let source = source_csv(
            " Title ,START TIME  ,Profile Name\nStranger Things: Chapter One,2023-01-02 20:00:00,Sam\nWednesday,2023-01-03 21:15:00,Alex\n",
        );

        let report = importer.import_and_normalize(source.path()).unwrap();

        assert_eq!(report.rows, 2);
        assert_eq!(report.matched, vec!["title", "start time"]);
        assert_eq!(report.filled, vec!["device", "duration", "date_added"]);
        assert_eq!(
            read_rows(&report.output),
            vec![
                vec!["title", "start time", "device", "duration", "date_added"],
                vec!["Stranger Things: Chapter One", "2023-01-02 20:00:00", "Unknown", "Unknown", "Unknown"],
                vec!["Wednesday", "2023-01-03 21:15:00", "Unknown", "Unknown", "Unknown"],
            ]
        );
    }

    #[test]
    fn test_import_reorders_columns_and_keeps_empty_cells() {
        let dir = TempDir::new().unwrap();
        let importer = Importer::new(dir.path().join("simplified.csv"));
        let source = source_csv(
            "Date_Added,Duration,Device,Title,Start Time\n\"September 25, 2021\",00:45:10,Smart TV,Ozark,\n",
        );

        let report = importer.import_and_normalize(source.path()).unwrap();

        assert!(report.filled.is_empty());
        assert_eq!(
            read_rows(&report.output)[1],
            vec!["Ozark", "", "Smart TV", "00:45:10", "September 25, 2021"]
        );
    }

    #[test]
    fn test_import_first_duplicate_column_wins() {
        let dir = TempDir::new().unwrap();
        let importer = Importer::new(dir.path().join("simplified.csv"));
        let source = source_csv("title,TITLE\nfirst,second\n");

        let report = importer.import_and_normalize(source.path()).unwrap();
        assert_eq!(read_rows(&report.output)[1][0], "first");
    }

    #[test]
    fn test_import_is_idempotent_and_overwrites() {
        let dir = TempDir::new().unwrap();
        let importer = Importer::new(dir.path().join("simplified.csv"));
        let first = source_csv("Title\nA\nB\nC\n");
        let second = source_csv("Title\nZ\n");

        importer.import_and_normalize(first.path()).unwrap();
        let once = std::fs::read(importer.output()).unwrap();
        importer.import_and_normalize(first.path()).unwrap();
        assert_eq!(std::fs::read(importer.output()).unwrap(), once);

        importer.import_and_normalize(second.path()).unwrap();
        assert_eq!(read_rows(importer.output()).len(), 2);
    }

    #[test]
    fn test_failed_import_leaves_previous_output() {
        let dir = TempDir::new().unwrap();
        let importer = Importer::new(dir.path().join("simplified.csv"));
        let good = source_csv("Title\nA\n");
        importer.import_and_normalize(good.path()).unwrap();
        let before = std::fs::read(importer.output()).unwrap();

        let ragged = source_csv("Title,Device\nA,TV\nB,TV,extra\n");
        let err = importer.import_and_normalize(ragged.path()).unwrap_err();
        assert!(matches!(err, TrackerError::Load { .. }));

        let missing = dir.path().join("nope.csv");
        let err = importer.import_and_normalize(&missing).unwrap_err();
        assert!(matches!(err, TrackerError::Load { .. }));

        assert_eq!(std::fs::read(importer.output()).unwrap(), before);
    }

    #[test]
    fn test_import_empty_file_is_load_error() {
        let dir = TempDir::new().unwrap();
        let importer = Importer::new(dir.path().join("simplified.csv"));
        let empty = source_csv("");

        let err = importer.import_and_normalize(empty.path()).unwrap_err();
        assert!(matches!(err, TrackerError::Load { .. }));
        assert!(!importer.output().exists());
    }

    #[test]
    fn test_import_strips_byte_order_mark() {
        let dir = TempDir::new().unwrap();
        let importer = Importer::new(dir.path().join("simplified.csv"));
        let source = source_csv("\u{feff}Title,Date\nOzark,2023-01-01\n");

        let report = importer.import_and_normalize(source.path()).unwrap();
        assert_eq!(report.matched, vec!["title"]);
    }

    #[test]
    fn test_session_not_ready_before_import() {
        let dir = TempDir::new().unwrap();
        let session = ImportSession::new(Importer::new(dir.path().join("simplified.csv")));

        assert!(!session.is_ready());
        assert!(matches!(session.overview(), Err(TrackerError::NotReady)));
        assert!(matches!(session.top_titles(5), Err(TrackerError::NotReady)));
    }

    #[test]
    fn test_session_ready_after_import() {
        let dir = TempDir::new().unwrap();
        let mut session = ImportSession::new(Importer::new(dir.path().join("simplified.csv")));
        let source = source_csv("Title,Date_Added\nA,2022-03-01\nB,2022-04-01\nA,2023-03-05\n");

        session.import(source.path()).unwrap();

        assert!(session.is_ready());
        let top = session.top_titles(5).unwrap();
        assert_eq!(top[0], TitleCount::new("A", 2));
        assert_eq!(session.overview().unwrap().total_entries, 3);
    }

    #[test]
    fn test_session_failed_import_keeps_state() {
        let dir = TempDir::new().unwrap();
        let mut session = ImportSession::new(Importer::new(dir.path().join("simplified.csv")));

        assert!(session.import(&dir.path().join("missing.csv")).is_err());
        assert!(!session.is_ready());

        let source = source_csv("Title\nA\n");
        session.import(source.path()).unwrap();
        assert!(session.import(&dir.path().join("missing.csv")).is_err());
        assert!(session.is_ready());
    }

    #[test]
    fn test_adopt_requires_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("simplified.csv");
        assert!(matches!(ImportSession::adopt(&path), Err(TrackerError::NotFound(_))));

        std::fs::write(&path, "title,start time,device,duration,date_added\nA,x,y,z,2020-01-01\n").unwrap();
        let session = ImportSession::adopt(&path).unwrap();
        assert!(session.is_ready());
        assert_eq!(session.normalized_path().unwrap(), path.as_path());
    }
}
