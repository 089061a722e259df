use esli::assessment::{
    AssessmentId, AssessmentRecord, AssessmentRepository, AssessmentService, CsvUnmappedLog,
    InMemoryUnmappedLog, ReferenceStore, RepositoryError, SchoolLevel, UnmappedQuestionLog,
};
use esli::config::AssessmentConfig;
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) references: Arc<ReferenceStore>,
}

/// Insertion-ordered store; scored assessments live for the process lifetime.
#[derive(Default, Clone)]
pub(crate) struct InMemoryAssessmentRepository {
    records: Arc<Mutex<Vec<AssessmentRecord>>>,
}

impl InMemoryAssessmentRepository {
    fn lock(&self) -> Result<MutexGuard<'_, Vec<AssessmentRecord>>, RepositoryError> {
        self.records
            .lock()
            .map_err(|_| RepositoryError::Unavailable("repository mutex poisoned".to_string()))
    }
}

impl AssessmentRepository for InMemoryAssessmentRepository {
    fn insert(&self, record: AssessmentRecord) -> Result<AssessmentRecord, RepositoryError> {
        let mut guard = self.lock()?;
        if guard.iter().any(|existing| existing.id == record.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.push(record.clone());
        Ok(record)
    }

    fn fetch(&self, id: &AssessmentId) -> Result<Option<AssessmentRecord>, RepositoryError> {
        let guard = self.lock()?;
        Ok(guard.iter().find(|record| &record.id == id).cloned())
    }

    fn recent(&self, limit: usize) -> Result<Vec<AssessmentRecord>, RepositoryError> {
        let guard = self.lock()?;
        Ok(guard.iter().rev().take(limit).cloned().collect())
    }
}

pub(crate) fn unmapped_log(config: &AssessmentConfig) -> Arc<dyn UnmappedQuestionLog> {
    match &config.unmapped_log {
        Some(path) => Arc::new(CsvUnmappedLog::new(path.clone())),
        None => Arc::new(InMemoryUnmappedLog::new()),
    }
}

pub(crate) fn reference_store(
    config: &AssessmentConfig,
    override_dir: Option<PathBuf>,
) -> Arc<ReferenceStore> {
    let dir = override_dir.unwrap_or_else(|| config.reference_dir.clone());
    Arc::new(ReferenceStore::from_dir(dir))
}

pub(crate) fn assessment_service(
    config: &AssessmentConfig,
    references: Arc<ReferenceStore>,
) -> AssessmentService<InMemoryAssessmentRepository> {
    AssessmentService::new(
        references,
        Arc::new(InMemoryAssessmentRepository::default()),
        config.default_level,
    )
    .with_audit(unmapped_log(config))
}

pub(crate) fn parse_level(raw: &str) -> Result<SchoolLevel, String> {
    raw.parse::<SchoolLevel>().map_err(|err| err.to_string())
}
