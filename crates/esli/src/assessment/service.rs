use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use super::audit::{AuditError, UnmappedQuestion, UnmappedQuestionLog};
use super::domain::SchoolLevel;
use super::reference::{ReferenceDataError, ReferenceSnapshot, ReferenceStore};
use super::repository::{
    AssessmentId, AssessmentRecord, AssessmentRepository, AssessmentSubmission, RepositoryError,
};
use super::scoring::{AssessmentScorer, ScoringError};

/// Service composing the reference store, scorer, repository, and audit log.
pub struct AssessmentService<R> {
    references: Arc<ReferenceStore>,
    repository: Arc<R>,
    audit: Option<Arc<dyn UnmappedQuestionLog>>,
    default_level: SchoolLevel,
}

static ASSESSMENT_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_assessment_id() -> AssessmentId {
    let id = ASSESSMENT_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    AssessmentId(format!("esli-{id:06}"))
}

impl<R> AssessmentService<R>
where
    R: AssessmentRepository + 'static,
{
    pub fn new(
        references: Arc<ReferenceStore>,
        repository: Arc<R>,
        default_level: SchoolLevel,
    ) -> Self {
        Self {
            references,
            repository,
            audit: None,
            default_level,
        }
    }

    pub fn with_audit(mut self, audit: Arc<dyn UnmappedQuestionLog>) -> Self {
        self.audit = Some(audit);
        self
    }

    pub fn default_level(&self) -> SchoolLevel {
        self.default_level
    }

    /// Score a submission against the current reference snapshot and store it.
    pub fn submit(
        &self,
        submission: AssessmentSubmission,
    ) -> Result<AssessmentRecord, AssessmentServiceError> {
        let student_name = submission.student_name.trim();
        if student_name.is_empty() {
            return Err(SubmissionError::BlankStudentName.into());
        }
        let level = submission.school_level.unwrap_or(self.default_level);

        let mut scorer = AssessmentScorer::new(self.references.snapshot()?);
        if let Some(audit) = &self.audit {
            scorer = scorer.with_audit(Arc::clone(audit));
        }
        let report = scorer.score(&submission.responses, level)?;

        let record = AssessmentRecord {
            id: next_assessment_id(),
            student_name: student_name.to_string(),
            school_level: level,
            submitted_at: Utc::now(),
            responses: submission.responses,
            report,
        };

        let stored = self.repository.insert(record)?;
        info!(assessment_id = %stored.id, %level, "assessment stored");
        Ok(stored)
    }

    pub fn get(&self, id: &AssessmentId) -> Result<AssessmentRecord, AssessmentServiceError> {
        let record = self
            .repository
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    pub fn recent(&self, limit: usize) -> Result<Vec<AssessmentRecord>, AssessmentServiceError> {
        Ok(self.repository.recent(limit)?)
    }

    /// Audit entries awaiting curation; empty when no log is attached.
    pub fn unmapped_questions(&self) -> Result<Vec<UnmappedQuestion>, AssessmentServiceError> {
        match &self.audit {
            Some(audit) => Ok(audit.entries()?),
            None => Ok(Vec::new()),
        }
    }

    pub fn refresh_references(&self) -> Result<Arc<ReferenceSnapshot>, AssessmentServiceError> {
        Ok(self.references.refresh()?)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmissionError {
    #[error("student name must not be blank")]
    BlankStudentName,
}

#[derive(Debug, thiserror::Error)]
pub enum AssessmentServiceError {
    #[error(transparent)]
    InvalidSubmission(#[from] SubmissionError),
    #[error(transparent)]
    Reference(#[from] ReferenceDataError),
    #[error(transparent)]
    Scoring(#[from] ScoringError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Audit(#[from] AuditError),
}
