//! Student learning-profile assessment: item classification, scoring against
//! reference populations, rule-based classification, and the service layer
//! that stores scored submissions.

pub mod audit;
pub mod classification;
pub mod classifier;
pub mod domain;
pub mod reference;
pub mod report;
pub mod repository;
pub mod router;
pub mod scoring;
pub mod service;
pub mod survey;

#[cfg(test)]
mod tests;

pub use audit::{
    AuditError, CsvUnmappedLog, InMemoryUnmappedLog, UnmappedQuestion, UnmappedQuestionLog,
};
pub use classification::{
    classify, ClassificationResult, HindranceAnalysis, HindranceFlags, Level, MotivationAnalysis,
    MotivationType, StrategyAnalysis,
};
pub use classifier::{MatchKind, QuestionCategoryMap, Resolution};
pub use domain::{
    Category, CategoryGroup, RawResponseSet, ResponseError, ResponseOption, ResponseValue,
    SchoolLevel, UnknownSchoolLevel,
};
pub use reference::{
    PercentileTable, ReferenceDataError, ReferenceSnapshot, ReferenceSnapshotBuilder,
    ReferenceStandard, ReferenceStore,
};
pub use report::{ReportContext, ScoreRow, ScoreTable};
pub use repository::{
    AssessmentId, AssessmentRecord, AssessmentRepository, AssessmentSubmission, AssessmentView,
    RepositoryError,
};
pub use router::assessment_router;
pub use scoring::{
    AssessmentScorer, CategoryScore, CategoryScores, PercentileStatus, ScoreReport, ScoreSource,
    ScoringError,
};
pub use service::{AssessmentService, AssessmentServiceError, SubmissionError};
pub use survey::{SurveyCatalog, SurveyPart, SurveySection};
