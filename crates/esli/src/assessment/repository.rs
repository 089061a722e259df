use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::classification::{Level, MotivationType};
use super::domain::{RawResponseSet, SchoolLevel};
use super::report::ReportContext;
use super::scoring::{CategoryScores, ScoreReport};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssessmentId(pub String);

impl fmt::Display for AssessmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Inbound payload: one student's completed survey.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentSubmission {
    pub student_name: String,
    /// Falls back to the service's configured level when omitted.
    #[serde(default)]
    pub school_level: Option<SchoolLevel>,
    #[serde(default)]
    pub responses: RawResponseSet,
}

/// Stored assessment: the submission plus its scored report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentRecord {
    pub id: AssessmentId,
    pub student_name: String,
    pub school_level: SchoolLevel,
    pub submitted_at: DateTime<Utc>,
    pub responses: RawResponseSet,
    pub report: ScoreReport,
}

impl AssessmentRecord {
    pub fn report_context(&self) -> ReportContext {
        ReportContext::new(&self.student_name, &self.report)
    }

    pub fn view(&self) -> AssessmentView {
        let classification = &self.report.classification;
        AssessmentView {
            assessment_id: self.id.clone(),
            student_name: self.student_name.clone(),
            school_level: self.school_level,
            submitted_at: self.submitted_at,
            motivation_type: classification.motivation.kind,
            motivation_label: classification.motivation.kind.label(),
            strategy_level: classification.strategy.strategy_level,
            skill_level: classification.strategy.skill_level,
            psychological_hindrance: classification.hindrance.flags.psychological,
            behavioral_hindrance: classification.hindrance.flags.behavioral,
            scores: self.report.scores.clone(),
            unmapped_questions: self.report.unmapped_questions.len(),
            report_markdown: self.report_context().to_markdown(),
        }
    }
}

/// Storage abstraction so the service can be exercised in isolation.
pub trait AssessmentRepository: Send + Sync {
    fn insert(&self, record: AssessmentRecord) -> Result<AssessmentRecord, RepositoryError>;
    fn fetch(&self, id: &AssessmentId) -> Result<Option<AssessmentRecord>, RepositoryError>;
    /// Most recent submissions first.
    fn recent(&self, limit: usize) -> Result<Vec<AssessmentRecord>, RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// API representation of a scored assessment.
#[derive(Debug, Clone, Serialize)]
pub struct AssessmentView {
    pub assessment_id: AssessmentId,
    pub student_name: String,
    pub school_level: SchoolLevel,
    pub submitted_at: DateTime<Utc>,
    pub motivation_type: MotivationType,
    pub motivation_label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strategy_level: Option<Level>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skill_level: Option<Level>,
    pub psychological_hindrance: bool,
    pub behavioral_hindrance: bool,
    pub scores: CategoryScores,
    pub unmapped_questions: usize,
    pub report_markdown: String,
}
