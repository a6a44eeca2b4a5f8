//! Durable record store backed by a JSON-lines file.

use crate::core::MatchRecord;
use crate::error::{ForecastError, Result};
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Append-only store of match records.
///
/// Each record is one JSON line. Inserts are flushed immediately so a
/// record is either fully written or absent. The store does not
/// deduplicate; callers guard bulk re-ingest with [`MatchStore::has_any`].
#[derive(Debug)]
pub struct MatchStore {
    path: PathBuf,
}

impl MatchStore {
    /// Open a store at `path`. The file is created lazily on first
    /// insert; a missing file simply means an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one record durably.
    pub fn insert(&self, record: &MatchRecord) -> Result<()> {
        let line = serde_json::to_string(record)
            .map_err(|e| ForecastError::Storage(format!("record encode failed: {e}")))?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{line}")?;
        file.flush()?;
        Ok(())
    }

    /// Append many records through a single file handle.
    pub fn insert_all(&self, records: &[MatchRecord]) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        for record in records {
            let line = serde_json::to_string(record)
                .map_err(|e| ForecastError::Storage(format!("record encode failed: {e}")))?;
            writeln!(file, "{line}")?;
        }
        file.flush()?;
        debug!(count = records.len(), path = %self.path.display(), "stored records");
        Ok(())
    }

    /// Whether the store holds at least one record.
    pub fn has_any(&self) -> Result<bool> {
        match File::open(&self.path) {
            Ok(file) => {
                let mut reader = BufReader::new(file);
                let mut line = String::new();
                Ok(reader.read_line(&mut line)? > 0)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// All records in insertion order.
    pub fn list_all(&self) -> Result<Vec<MatchRecord>> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        let reader = BufReader::new(file);
        let mut records = Vec::new();
        for line in reader.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let record: MatchRecord = serde_json::from_str(&line)
                .map_err(|e| ForecastError::Storage(format!("record decode failed: {e}")))?;
            records.push(record);
        }
        debug!(count = records.len(), "loaded records");
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(day: u32) -> MatchRecord {
        MatchRecord::new(
            NaiveDate::from_ymd_opt(2020, 8, day).unwrap(),
            "TeamA",
            "TeamB",
            2,
            1,
        )
    }

    #[test]
    fn missing_file_is_an_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = MatchStore::open(dir.path().join("matches.jsonl"));
        assert!(!store.has_any().unwrap());
        assert!(store.list_all().unwrap().is_empty());
    }

    #[test]
    fn insert_then_list_roundtrips_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let store = MatchStore::open(dir.path().join("matches.jsonl"));

        store.insert(&record(15)).unwrap();
        store.insert(&record(16)).unwrap();

        assert!(store.has_any().unwrap());
        let records = store.list_all().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0], record(15));
        assert_eq!(records[1], record(16));
    }

    #[test]
    fn insert_all_appends_in_bulk() {
        let dir = tempfile::tempdir().unwrap();
        let store = MatchStore::open(dir.path().join("matches.jsonl"));

        store.insert_all(&[record(1), record(2), record(3)]).unwrap();
        assert_eq!(store.list_all().unwrap().len(), 3);
    }

    #[test]
    fn corrupt_line_surfaces_as_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("matches.jsonl");
        std::fs::write(&path, "not json\n").unwrap();

        let store = MatchStore::open(&path);
        assert!(matches!(
            store.list_all(),
            Err(ForecastError::Storage(_))
        ));
    }
}
