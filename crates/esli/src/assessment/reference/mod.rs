//! Reference Data Store: per-level population statistics, the global
//! T-score → percentile table, and the question pattern snapshot.

mod parser;

use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, HashMap};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, info};

use super::classifier::QuestionCategoryMap;
use super::domain::{Category, SchoolLevel, UnknownSchoolLevel};
use parser::{parse_rows, PatternRow, PercentileRow, StandardRow};

pub const STANDARDS_FILE: &str = "standards.csv";
pub const PERCENTILES_FILE: &str = "percentiles.csv";
pub const QUESTION_MAP_FILE: &str = "question_map.csv";

/// Population mean and standard deviation of one category's raw score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferenceStandard {
    pub level: SchoolLevel,
    pub category: Category,
    pub mean: f64,
    pub std: f64,
}

impl ReferenceStandard {
    pub fn new(
        level: SchoolLevel,
        category: Category,
        mean: f64,
        std: f64,
    ) -> Result<Self, ReferenceDataError> {
        if !mean.is_finite() || !std.is_finite() || std <= 0.0 {
            return Err(ReferenceDataError::InvalidStandard {
                level,
                category,
                mean,
                std,
            });
        }
        Ok(Self {
            level,
            category,
            mean,
            std,
        })
    }
}

/// Sparse T-score → percentile lookup shared by every school level.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PercentileTable {
    entries: BTreeMap<i32, u8>,
}

impl PercentileTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, t_score: i32, percentile: i32) -> Result<(), ReferenceDataError> {
        let value = u8::try_from(percentile)
            .ok()
            .filter(|value| *value <= 100)
            .ok_or(ReferenceDataError::InvalidPercentile {
                t_score,
                percentile,
            })?;
        if self.entries.insert(t_score, value).is_some() {
            return Err(ReferenceDataError::DuplicatePercentile(t_score));
        }
        Ok(())
    }

    pub fn get(&self, t_score: i32) -> Option<u8> {
        self.entries.get(&t_score).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Immutable reference bundle used for one or many scoring runs.
#[derive(Debug, Clone)]
pub struct ReferenceSnapshot {
    standards: HashMap<(SchoolLevel, Category), ReferenceStandard>,
    percentiles: PercentileTable,
    questions: QuestionCategoryMap,
    loaded_at: DateTime<Utc>,
}

impl ReferenceSnapshot {
    pub fn builder() -> ReferenceSnapshotBuilder {
        ReferenceSnapshotBuilder::default()
    }

    pub fn standard(&self, level: SchoolLevel, category: Category) -> Option<&ReferenceStandard> {
        self.standards.get(&(level, category))
    }

    /// True when at least one reference row exists for `level`.
    pub fn has_level(&self, level: SchoolLevel) -> bool {
        self.standards.keys().any(|(row_level, _)| *row_level == level)
    }

    pub fn levels(&self) -> Vec<SchoolLevel> {
        SchoolLevel::ordered()
            .into_iter()
            .filter(|level| self.has_level(*level))
            .collect()
    }

    /// Required categories that have no reference row for `level`.
    pub fn missing_categories(&self, level: SchoolLevel) -> Vec<Category> {
        Category::ordered()
            .into_iter()
            .filter(|category| self.standard(level, *category).is_none())
            .collect()
    }

    pub fn percentiles(&self) -> &PercentileTable {
        &self.percentiles
    }

    pub fn questions(&self) -> &QuestionCategoryMap {
        &self.questions
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    /// Builds a snapshot from the three CSV tables. Without a pattern table,
    /// or when it declares no keywords, the built-in keyword list applies.
    pub fn from_readers<S, P, Q>(
        standards: S,
        percentiles: P,
        questions: Option<Q>,
    ) -> Result<Self, ReferenceDataError>
    where
        S: Read,
        P: Read,
        Q: Read,
    {
        let mut builder = Self::builder();

        let rows: Vec<StandardRow> =
            parse_rows(standards).map_err(|source| ReferenceDataError::Csv {
                table: STANDARDS_FILE,
                source,
            })?;
        for row in rows {
            let level = row.level.parse::<SchoolLevel>()?;
            let category = parse_category(&row.category)?;
            builder.insert_standard(level, category, row.mean, row.std)?;
        }

        let rows: Vec<PercentileRow> =
            parse_rows(percentiles).map_err(|source| ReferenceDataError::Csv {
                table: PERCENTILES_FILE,
                source,
            })?;
        for row in rows {
            builder.insert_percentile(row.t_score, row.percentile)?;
        }

        let mut map = QuestionCategoryMap::new();
        if let Some(reader) = questions {
            let rows: Vec<PatternRow> =
                parse_rows(reader).map_err(|source| ReferenceDataError::Csv {
                    table: QUESTION_MAP_FILE,
                    source,
                })?;
            for row in rows {
                let category = parse_category(&row.category)?;
                map.push(row.kind, &row.pattern, category);
            }
        }
        if !map.has_keywords() {
            map.extend_default_keywords();
        }

        Ok(builder.questions(map).build())
    }

    /// Loads `standards.csv`, `percentiles.csv`, and (optionally)
    /// `question_map.csv` from `dir`.
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self, ReferenceDataError> {
        let dir = dir.as_ref();
        let standards = open(dir.join(STANDARDS_FILE))?;
        let percentiles = open(dir.join(PERCENTILES_FILE))?;

        let questions_path = dir.join(QUESTION_MAP_FILE);
        let questions = if questions_path.exists() {
            Some(open(questions_path)?)
        } else {
            debug!(dir = %dir.display(), "no question map file; using built-in keywords");
            None
        };

        Self::from_readers(standards, percentiles, questions)
    }
}

fn open(path: PathBuf) -> Result<File, ReferenceDataError> {
    File::open(&path).map_err(|source| ReferenceDataError::Io { path, source })
}

fn parse_category(raw: &str) -> Result<Category, ReferenceDataError> {
    Category::from_label(raw).ok_or_else(|| ReferenceDataError::UnknownCategory(raw.to_string()))
}

#[derive(Debug, Default)]
pub struct ReferenceSnapshotBuilder {
    standards: HashMap<(SchoolLevel, Category), ReferenceStandard>,
    percentiles: PercentileTable,
    questions: QuestionCategoryMap,
}

impl ReferenceSnapshotBuilder {
    pub fn insert_standard(
        &mut self,
        level: SchoolLevel,
        category: Category,
        mean: f64,
        std: f64,
    ) -> Result<&mut Self, ReferenceDataError> {
        let standard = ReferenceStandard::new(level, category, mean, std)?;
        if self.standards.insert((level, category), standard).is_some() {
            return Err(ReferenceDataError::DuplicateStandard { level, category });
        }
        Ok(self)
    }

    pub fn insert_percentile(
        &mut self,
        t_score: i32,
        percentile: i32,
    ) -> Result<&mut Self, ReferenceDataError> {
        self.percentiles.insert(t_score, percentile)?;
        Ok(self)
    }

    pub fn standard(
        mut self,
        level: SchoolLevel,
        category: Category,
        mean: f64,
        std: f64,
    ) -> Result<Self, ReferenceDataError> {
        self.insert_standard(level, category, mean, std)?;
        Ok(self)
    }

    pub fn percentile(mut self, t_score: i32, percentile: i32) -> Result<Self, ReferenceDataError> {
        self.insert_percentile(t_score, percentile)?;
        Ok(self)
    }

    pub fn questions(mut self, questions: QuestionCategoryMap) -> Self {
        self.questions = questions;
        self
    }

    pub fn build(self) -> ReferenceSnapshot {
        ReferenceSnapshot {
            standards: self.standards,
            percentiles: self.percentiles,
            questions: self.questions,
            loaded_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone)]
enum ReferenceSource {
    Directory(PathBuf),
    Fixed,
}

/// Owns the reference snapshot lifecycle: loaded lazily on first use,
/// replaced wholesale on `refresh`. Scoring runs hold an `Arc` to the
/// snapshot they started with.
#[derive(Debug)]
pub struct ReferenceStore {
    source: ReferenceSource,
    current: RwLock<Option<Arc<ReferenceSnapshot>>>,
}

impl ReferenceStore {
    pub fn from_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            source: ReferenceSource::Directory(dir.into()),
            current: RwLock::new(None),
        }
    }

    /// Store pinned to an in-memory snapshot; `refresh` keeps it.
    pub fn preloaded(snapshot: ReferenceSnapshot) -> Self {
        Self {
            source: ReferenceSource::Fixed,
            current: RwLock::new(Some(Arc::new(snapshot))),
        }
    }

    pub fn snapshot(&self) -> Result<Arc<ReferenceSnapshot>, ReferenceDataError> {
        if let Some(snapshot) = self
            .current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
        {
            return Ok(Arc::clone(snapshot));
        }

        // Concurrent first callers may each load; the first one stored wins.
        let loaded = Arc::new(self.load()?);
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        Ok(Arc::clone(guard.get_or_insert(loaded)))
    }

    pub fn refresh(&self) -> Result<Arc<ReferenceSnapshot>, ReferenceDataError> {
        if let ReferenceSource::Fixed = self.source {
            return self.snapshot();
        }
        let loaded = Arc::new(self.load()?);
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        *guard = Some(Arc::clone(&loaded));
        Ok(loaded)
    }

    fn load(&self) -> Result<ReferenceSnapshot, ReferenceDataError> {
        match &self.source {
            ReferenceSource::Directory(dir) => {
                let snapshot = ReferenceSnapshot::from_dir(dir)?;
                info!(
                    dir = %dir.display(),
                    levels = ?snapshot.levels(),
                    percentiles = snapshot.percentiles().len(),
                    exact_patterns = snapshot.questions().exact_patterns().len(),
                    "reference data loaded"
                );
                Ok(snapshot)
            }
            ReferenceSource::Fixed => Err(ReferenceDataError::NotLoaded),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ReferenceDataError {
    #[error("failed to read reference file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid reference CSV in {table}: {source}")]
    Csv {
        table: &'static str,
        #[source]
        source: csv::Error,
    },
    #[error("unknown category '{0}' in reference data")]
    UnknownCategory(String),
    #[error(transparent)]
    UnknownLevel(#[from] UnknownSchoolLevel),
    #[error("standard for {level}/{category} needs a finite mean and std > 0 (mean {mean}, std {std})")]
    InvalidStandard {
        level: SchoolLevel,
        category: Category,
        mean: f64,
        std: f64,
    },
    #[error("duplicate standard for {level}/{category}")]
    DuplicateStandard {
        level: SchoolLevel,
        category: Category,
    },
    #[error("percentile {percentile} for T={t_score} is outside 0-100")]
    InvalidPercentile { t_score: i32, percentile: i32 },
    #[error("duplicate percentile entry for T={0}")]
    DuplicatePercentile(i32),
    #[error("reference data has not been loaded")]
    NotLoaded,
}

#[cfg(test)]
mod tests {
    use super::*;

    const STANDARDS: &str = "level,category,mean,std\n초등,목표세우기,75,10\n중등,목표세우기,70,12\n";
    const PERCENTILES: &str = "t_score,percentile\n100,50\n115,84\n";

    #[test]
    fn loads_snapshot_from_readers() {
        let snapshot = ReferenceSnapshot::from_readers(
            STANDARDS.as_bytes(),
            PERCENTILES.as_bytes(),
            Some("pattern,category,match\n공부할 때는 학습 목표를 꼭 확인한다,목표세우기,exact\n".as_bytes()),
        )
        .expect("snapshot loads");

        let standard = snapshot
            .standard(SchoolLevel::Elementary, Category::GoalSetting)
            .expect("row present");
        assert_eq!(standard.mean, 75.0);
        assert_eq!(snapshot.levels(), vec![SchoolLevel::Elementary, SchoolLevel::Middle]);
        assert_eq!(snapshot.percentiles().get(115), Some(84));
        assert_eq!(snapshot.questions().exact_patterns().len(), 1);
        assert!(snapshot.questions().has_keywords(), "default keywords added");
    }

    #[test]
    fn declared_keywords_replace_the_default_list() {
        let snapshot = ReferenceSnapshot::from_readers(
            STANDARDS.as_bytes(),
            PERCENTILES.as_bytes(),
            Some("pattern,category,match\n목표,목표세우기,keyword\n".as_bytes()),
        )
        .expect("snapshot loads");
        assert_eq!(snapshot.questions().keywords().len(), 1);
    }

    #[test]
    fn rejects_non_positive_std() {
        let err = ReferenceSnapshot::from_readers(
            "level,category,mean,std\n초등,목표세우기,75,0\n".as_bytes(),
            PERCENTILES.as_bytes(),
            None::<&[u8]>,
        )
        .expect_err("std = 0 rejected");
        assert!(matches!(err, ReferenceDataError::InvalidStandard { .. }));
    }

    #[test]
    fn rejects_unknown_category_and_level() {
        let err = ReferenceSnapshot::from_readers(
            "level,category,mean,std\n초등,독서습관,75,10\n".as_bytes(),
            PERCENTILES.as_bytes(),
            None::<&[u8]>,
        )
        .expect_err("unknown category rejected");
        assert!(matches!(err, ReferenceDataError::UnknownCategory(name) if name == "독서습관"));

        let err = ReferenceSnapshot::from_readers(
            "level,category,mean,std\n대학,목표세우기,75,10\n".as_bytes(),
            PERCENTILES.as_bytes(),
            None::<&[u8]>,
        )
        .expect_err("unknown level rejected");
        assert!(matches!(err, ReferenceDataError::UnknownLevel(_)));
    }

    #[test]
    fn rejects_duplicate_standards_and_bad_percentiles() {
        let err = ReferenceSnapshot::builder()
            .standard(SchoolLevel::High, Category::Computer, 40.0, 9.0)
            .and_then(|builder| builder.standard(SchoolLevel::High, Category::Computer, 41.0, 9.0))
            .expect_err("duplicate rejected");
        assert!(matches!(err, ReferenceDataError::DuplicateStandard { .. }));

        let mut table = PercentileTable::new();
        assert!(matches!(
            table.insert(120, 101),
            Err(ReferenceDataError::InvalidPercentile { .. })
        ));
        assert!(matches!(
            table.insert(120, -1),
            Err(ReferenceDataError::InvalidPercentile { .. })
        ));
    }

    #[test]
    fn store_loads_lazily_once_and_refreshes() {
        let dir = tempfile::tempdir().expect("temp dir");
        std::fs::write(dir.path().join(STANDARDS_FILE), STANDARDS).expect("write standards");
        std::fs::write(dir.path().join(PERCENTILES_FILE), PERCENTILES).expect("write percentiles");

        let store = ReferenceStore::from_dir(dir.path());
        let first = store.snapshot().expect("lazy load");
        let second = store.snapshot().expect("cached");
        assert!(Arc::ptr_eq(&first, &second));

        std::fs::write(
            dir.path().join(STANDARDS_FILE),
            "level,category,mean,std\n고등,목표세우기,68,9\n",
        )
        .expect("rewrite standards");
        let refreshed = store.refresh().expect("refresh");
        assert!(!Arc::ptr_eq(&first, &refreshed));
        assert_eq!(refreshed.levels(), vec![SchoolLevel::High]);
        assert!(first.has_level(SchoolLevel::Elementary), "old snapshot untouched");
    }

    #[test]
    fn store_reports_missing_directory() {
        let store = ReferenceStore::from_dir("/nonexistent/esli-reference");
        assert!(matches!(store.snapshot(), Err(ReferenceDataError::Io { .. })));
    }
}
