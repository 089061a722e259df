//! Audit trail for survey items that matched no category pattern.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tempfile::NamedTempFile;
use tracing::warn;

use super::classifier::normalize_text;

/// One curated-later question that scoring could not place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnmappedQuestion {
    pub question_text: String,
    pub occurrence_count: u64,
    pub last_seen: DateTime<Utc>,
}

impl UnmappedQuestion {
    fn first_seen(question_text: String, seen_at: DateTime<Utc>) -> Self {
        Self {
            question_text,
            occurrence_count: 1,
            last_seen: seen_at,
        }
    }

    fn observe(&mut self, seen_at: DateTime<Utc>) {
        self.occurrence_count += 1;
        if seen_at > self.last_seen {
            self.last_seen = seen_at;
        }
    }
}

/// Insert-or-increment store for unmapped questions. Implementations must be
/// safe to call from concurrent scoring requests.
pub trait UnmappedQuestionLog: Send + Sync {
    fn record(&self, question_text: &str, seen_at: DateTime<Utc>) -> Result<(), AuditError>;
    /// Records every unmapped item of one submission. Durable logs override
    /// this to touch storage once per batch.
    fn record_batch(
        &self,
        question_texts: &[String],
        seen_at: DateTime<Utc>,
    ) -> Result<(), AuditError> {
        question_texts
            .iter()
            .try_for_each(|question_text| self.record(question_text, seen_at))
    }
    /// Entries ordered by question text.
    fn entries(&self) -> Result<Vec<UnmappedQuestion>, AuditError>;
}

#[derive(Debug, thiserror::Error)]
pub enum AuditError {
    #[error("audit log unavailable: {0}")]
    Unavailable(String),
    #[error("failed to access audit file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid audit file: {0}")]
    Csv(#[from] csv::Error),
}

fn upsert(
    entries: &mut BTreeMap<String, UnmappedQuestion>,
    question_text: &str,
    seen_at: DateTime<Utc>,
) {
    let key = normalize_text(question_text);
    match entries.get_mut(&key) {
        Some(existing) => existing.observe(seen_at),
        None => {
            entries.insert(key.clone(), UnmappedQuestion::first_seen(key, seen_at));
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct InMemoryUnmappedLog {
    entries: Arc<Mutex<BTreeMap<String, UnmappedQuestion>>>,
}

impl InMemoryUnmappedLog {
    pub fn new() -> Self {
        Self::default()
    }
}

impl UnmappedQuestionLog for InMemoryUnmappedLog {
    fn record(&self, question_text: &str, seen_at: DateTime<Utc>) -> Result<(), AuditError> {
        let mut guard = self
            .entries
            .lock()
            .map_err(|_| AuditError::Unavailable("unmapped log mutex poisoned".to_string()))?;
        upsert(&mut guard, question_text, seen_at);
        Ok(())
    }

    fn record_batch(
        &self,
        question_texts: &[String],
        seen_at: DateTime<Utc>,
    ) -> Result<(), AuditError> {
        let mut guard = self
            .entries
            .lock()
            .map_err(|_| AuditError::Unavailable("unmapped log mutex poisoned".to_string()))?;
        for question_text in question_texts {
            upsert(&mut guard, question_text, seen_at);
        }
        Ok(())
    }

    fn entries(&self) -> Result<Vec<UnmappedQuestion>, AuditError> {
        let guard = self
            .entries
            .lock()
            .map_err(|_| AuditError::Unavailable("unmapped log mutex poisoned".to_string()))?;
        Ok(guard.values().cloned().collect())
    }
}

/// Durable audit trail kept as `question_text,occurrence_count,last_seen`.
/// Writers are serialized; each batch rewrites the file once.
#[derive(Debug)]
pub struct CsvUnmappedLog {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl CsvUnmappedLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, UnmappedQuestion>, AuditError> {
        let mut entries = BTreeMap::new();
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(entries),
            Err(err) => return Err(err.into()),
        };

        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(file);
        for record in reader.deserialize::<UnmappedQuestion>() {
            let entry = record?;
            entries.insert(entry.question_text.clone(), entry);
        }
        Ok(entries)
    }

    /// Writes a sibling temp file and renames it over the log, so readers
    /// never observe a half-written trail.
    fn write_all(&self, entries: &BTreeMap<String, UnmappedQuestion>) -> Result<(), AuditError> {
        let mut staged = NamedTempFile::new_in(self.parent_dir())?;
        {
            let mut writer = csv::Writer::from_writer(staged.as_file_mut());
            for entry in entries.values() {
                writer.serialize(entry)?;
            }
            writer.flush()?;
        }
        staged.as_file().sync_all()?;
        staged
            .persist(&self.path)
            .map_err(|err| AuditError::Io(err.error))?;
        Ok(())
    }

    fn parent_dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }

    /// Loads the trail for an update. An unreadable trail is moved aside to
    /// `<name>.corrupt` so later submissions keep being recorded.
    fn load_for_update(&self) -> Result<BTreeMap<String, UnmappedQuestion>, AuditError> {
        match self.read_all() {
            Err(AuditError::Csv(err)) if !err.is_io_error() => {
                let quarantine = self.quarantine_path();
                warn!(
                    path = %self.path.display(),
                    quarantine = %quarantine.display(),
                    error = %err,
                    "unmapped question log is malformed; starting a fresh trail"
                );
                fs::rename(&self.path, &quarantine)?;
                Ok(BTreeMap::new())
            }
            other => other,
        }
    }

    pub fn quarantine_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_default();
        name.push(".corrupt");
        self.path.with_file_name(name)
    }
}

impl UnmappedQuestionLog for CsvUnmappedLog {
    fn record(&self, question_text: &str, seen_at: DateTime<Utc>) -> Result<(), AuditError> {
        self.record_batch(&[question_text.to_string()], seen_at)
    }

    fn record_batch(
        &self,
        question_texts: &[String],
        seen_at: DateTime<Utc>,
    ) -> Result<(), AuditError> {
        if question_texts.is_empty() {
            return Ok(());
        }
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| AuditError::Unavailable("unmapped log mutex poisoned".to_string()))?;
        let mut entries = self.load_for_update()?;
        for question_text in question_texts {
            upsert(&mut entries, question_text, seen_at);
        }
        self.write_all(&entries)
    }

    fn entries(&self) -> Result<Vec<UnmappedQuestion>, AuditError> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| AuditError::Unavailable("unmapped log mutex poisoned".to_string()))?;
        Ok(self.read_all()?.into_values().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 2, hour, 0, 0)
            .single()
            .expect("valid timestamp")
    }

    #[test]
    fn in_memory_log_increments_existing_entries() {
        let log = InMemoryUnmappedLog::new();
        log.record("부탁하는 사람들 때문에 가끔 짜증이 날 때도 있다", at(9))
            .expect("recorded");
        log.record("부탁하는 사람들 때문에  가끔 짜증이 날 때도 있다", at(11))
            .expect("recorded");
        log.record("다른 친구가 잘 되는 것이 부러웠던 적이 있다", at(10))
            .expect("recorded");

        let entries = log.entries().expect("entries readable");
        assert_eq!(entries.len(), 2);
        let repeated = entries
            .iter()
            .find(|entry| entry.question_text.starts_with("부탁하는"))
            .expect("repeated entry present");
        assert_eq!(repeated.occurrence_count, 2);
        assert_eq!(repeated.last_seen, at(11));
    }

    #[test]
    fn last_seen_never_moves_backwards() {
        let log = InMemoryUnmappedLog::new();
        log.record("문항", at(12)).expect("recorded");
        log.record("문항", at(8)).expect("recorded");
        let entries = log.entries().expect("entries readable");
        assert_eq!(entries[0].occurrence_count, 2);
        assert_eq!(entries[0].last_seen, at(12));
    }

    #[test]
    fn csv_log_persists_across_instances() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("unmapped.csv");

        let log = CsvUnmappedLog::new(&path);
        log.record("어른이 하는 말이 맞다는 것을 알면서도 반항하고 싶었던 적이 있다", at(9))
            .expect("recorded");
        log.record("어른이 하는 말이 맞다는 것을 알면서도 반항하고 싶었던 적이 있다", at(10))
            .expect("recorded");

        let reopened = CsvUnmappedLog::new(&path);
        let entries = reopened.entries().expect("entries readable");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].occurrence_count, 2);
        assert_eq!(entries[0].last_seen, at(10));
    }

    #[test]
    fn csv_log_starts_empty_when_file_is_missing() {
        let dir = tempfile::tempdir().expect("temp dir");
        let log = CsvUnmappedLog::new(dir.path().join("absent.csv"));
        assert!(log.entries().expect("missing file tolerated").is_empty());
    }

    #[test]
    fn csv_log_moves_a_malformed_trail_aside() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("unmapped.csv");
        std::fs::write(
            &path,
            "question_text,occurrence_count,last_seen\n다른 친구가 잘 되는 것이,3",
        )
        .expect("seed truncated trail");

        let log = CsvUnmappedLog::new(&path);
        assert!(matches!(log.entries(), Err(AuditError::Csv(_))));

        log.record("문항", at(9)).expect("recorded after quarantine");
        log.record("문항", at(10)).expect("recorded again");

        let entries = log.entries().expect("fresh trail readable");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].occurrence_count, 2);
        let quarantined = std::fs::read_to_string(log.quarantine_path()).expect("kept aside");
        assert!(quarantined.contains("다른 친구가"));
    }

    #[test]
    fn csv_log_batch_rewrites_once_and_leaves_no_temp_files() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("unmapped.csv");
        let log = CsvUnmappedLog::new(&path);

        log.record_batch(
            &["첫 문항".to_string(), "둘째 문항".to_string(), "첫  문항".to_string()],
            at(9),
        )
        .expect("batch recorded");

        let entries = log.entries().expect("entries readable");
        assert_eq!(entries.len(), 2);
        let first = entries
            .iter()
            .find(|entry| entry.question_text == "첫 문항")
            .expect("normalized entry");
        assert_eq!(first.occurrence_count, 2);

        let files: Vec<_> = std::fs::read_dir(dir.path())
            .expect("list dir")
            .filter_map(Result::ok)
            .collect();
        assert_eq!(files.len(), 1);
    }

    #[test]
    fn concurrent_writers_do_not_panic() {
        let log = Arc::new(InMemoryUnmappedLog::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let log = Arc::clone(&log);
                std::thread::spawn(move || {
                    for _ in 0..25 {
                        log.record("같은 문항", Utc::now()).expect("recorded");
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().expect("writer thread finished");
        }
        let entries = log.entries().expect("entries readable");
        assert_eq!(entries[0].occurrence_count, 200);
    }
}
