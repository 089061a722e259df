use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::http::StatusCode;
use axum::response::Response;
use chrono::{DateTime, Utc};

use crate::assessment::audit::{AuditError, UnmappedQuestion, UnmappedQuestionLog};
use crate::assessment::classifier::QuestionCategoryMap;
use crate::assessment::domain::{Category, RawResponseSet, ResponseValue, SchoolLevel};
use crate::assessment::reference::{ReferenceSnapshot, ReferenceStore};
use crate::assessment::repository::{
    AssessmentId, AssessmentRecord, AssessmentRepository, AssessmentSubmission, RepositoryError,
};
use crate::assessment::scoring::{
    CategoryScore, CategoryScores, PercentileStatus, ScoreSource,
};
use crate::assessment::service::AssessmentService;

pub(super) const GOAL_QUESTIONS: [&str; 4] = [
    "어떤 일을 하기 전에 항상 목표세워 시작한다",
    "공부할 때는 학습 목표를 꼭 확인한다",
    "특별히 되고 싶은 직업이나 장래 희망이 없다",
    "흥미 있는 대학 학과나 직업에 대해 이것 저것 찾아본 적이 있다",
];

/// Contains the keyword "목표" but is curated as a self-achievement item.
pub(super) const ACHIEVEMENT_QUESTION: &str = "내가 정한 목표를 하나씩 성취하는 것이 뿌듯해서";

pub(super) const UNMAPPED_QUESTION: &str = "한 번도 다른 사람에게 거짓말을 해본 적이 없다";

/// Elementary-level fixture: every category at mean 75, std 10, plus the
/// curated patterns above and the built-in keyword list.
pub(super) fn reference_snapshot() -> ReferenceSnapshot {
    let mut builder = ReferenceSnapshot::builder();
    for category in Category::ordered() {
        builder
            .insert_standard(SchoolLevel::Elementary, category, 75.0, 10.0)
            .expect("valid standard");
    }
    for (t_score, percentile) in [(85, 16), (100, 50), (115, 84), (128, 97)] {
        builder
            .insert_percentile(t_score, percentile)
            .expect("valid percentile");
    }

    let mut questions = QuestionCategoryMap::with_default_keywords();
    for question in GOAL_QUESTIONS {
        questions.push_exact(question, Category::GoalSetting);
    }
    questions.push_exact(ACHIEVEMENT_QUESTION, Category::SelfAchievement);

    builder.questions(questions).build()
}

pub(super) fn reference_store() -> Arc<ReferenceStore> {
    Arc::new(ReferenceStore::preloaded(reference_snapshot()))
}

pub(super) fn responses(items: &[(&str, i64)]) -> RawResponseSet {
    items
        .iter()
        .map(|(question, value)| {
            (
                question.to_string(),
                ResponseValue::new(*value).expect("valid response value"),
            )
        })
        .collect()
}

pub(super) fn goal_responses() -> RawResponseSet {
    responses(&[
        (GOAL_QUESTIONS[0], 4),
        (GOAL_QUESTIONS[1], 4),
        (GOAL_QUESTIONS[2], 3),
        (GOAL_QUESTIONS[3], 4),
    ])
}

/// Full score set at T=100 with the given overrides.
pub(super) fn scores_with(overrides: &[(Category, i32)]) -> CategoryScores {
    Category::ordered()
        .into_iter()
        .map(|category| {
            let t_score = overrides
                .iter()
                .find(|(overridden, _)| *overridden == category)
                .map(|(_, t_score)| *t_score)
                .unwrap_or(100);
            score(category, t_score)
        })
        .collect()
}

pub(super) fn scores_without(missing: &[Category], overrides: &[(Category, i32)]) -> CategoryScores {
    scores_with(overrides)
        .iter()
        .filter(|score| !missing.contains(&score.category))
        .cloned()
        .collect()
}

fn score(category: Category, t_score: i32) -> CategoryScore {
    CategoryScore {
        category,
        raw_score: 75.0,
        t_score,
        percentile: 50,
        percentile_status: PercentileStatus::Table,
        source: ScoreSource::Observed,
    }
}

pub(super) fn submission(name: &str) -> AssessmentSubmission {
    AssessmentSubmission {
        student_name: name.to_string(),
        school_level: Some(SchoolLevel::Elementary),
        responses: goal_responses(),
    }
}

pub(super) fn build_service() -> (
    AssessmentService<MemoryRepository>,
    Arc<MemoryRepository>,
    Arc<RecordingLog>,
) {
    let repository = Arc::new(MemoryRepository::default());
    let audit = Arc::new(RecordingLog::default());
    let service = AssessmentService::new(
        reference_store(),
        repository.clone(),
        SchoolLevel::Elementary,
    )
    .with_audit(audit.clone());
    (service, repository, audit)
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) records: Arc<Mutex<HashMap<AssessmentId, AssessmentRecord>>>,
}

impl AssessmentRepository for MemoryRepository {
    fn insert(&self, record: AssessmentRecord) -> Result<AssessmentRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn fetch(&self, id: &AssessmentId) -> Result<Option<AssessmentRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn recent(&self, limit: usize) -> Result<Vec<AssessmentRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        let mut records: Vec<_> = guard.values().cloned().collect();
        records.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));
        records.truncate(limit);
        Ok(records)
    }
}

pub(super) struct ConflictRepository;

impl AssessmentRepository for ConflictRepository {
    fn insert(&self, _record: AssessmentRecord) -> Result<AssessmentRecord, RepositoryError> {
        Err(RepositoryError::Conflict)
    }

    fn fetch(&self, _id: &AssessmentId) -> Result<Option<AssessmentRecord>, RepositoryError> {
        Ok(None)
    }

    fn recent(&self, _limit: usize) -> Result<Vec<AssessmentRecord>, RepositoryError> {
        Ok(Vec::new())
    }
}

pub(super) struct UnavailableRepository;

impl AssessmentRepository for UnavailableRepository {
    fn insert(&self, _record: AssessmentRecord) -> Result<AssessmentRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn fetch(&self, _id: &AssessmentId) -> Result<Option<AssessmentRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn recent(&self, _limit: usize) -> Result<Vec<AssessmentRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }
}

/// Audit log that remembers every recorded text, in order, and the size of
/// each batch it was handed.
#[derive(Default)]
pub(super) struct RecordingLog {
    calls: Mutex<Vec<String>>,
    batches: Mutex<Vec<usize>>,
}

impl RecordingLog {
    pub(super) fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("log mutex poisoned").clone()
    }

    pub(super) fn batches(&self) -> Vec<usize> {
        self.batches.lock().expect("log mutex poisoned").clone()
    }
}

impl UnmappedQuestionLog for RecordingLog {
    fn record(&self, question_text: &str, _seen_at: DateTime<Utc>) -> Result<(), AuditError> {
        self.calls
            .lock()
            .expect("log mutex poisoned")
            .push(question_text.to_string());
        Ok(())
    }

    fn record_batch(
        &self,
        question_texts: &[String],
        _seen_at: DateTime<Utc>,
    ) -> Result<(), AuditError> {
        self.batches
            .lock()
            .expect("log mutex poisoned")
            .push(question_texts.len());
        self.calls
            .lock()
            .expect("log mutex poisoned")
            .extend(question_texts.iter().cloned());
        Ok(())
    }

    fn entries(&self) -> Result<Vec<UnmappedQuestion>, AuditError> {
        let now = Utc::now();
        Ok(self
            .calls()
            .into_iter()
            .map(|question_text| UnmappedQuestion {
                question_text,
                occurrence_count: 1,
                last_seen: now,
            })
            .collect())
    }
}

/// Audit log whose store is always down.
pub(super) struct FailingLog;

impl UnmappedQuestionLog for FailingLog {
    fn record(&self, _question_text: &str, _seen_at: DateTime<Utc>) -> Result<(), AuditError> {
        Err(AuditError::Unavailable("audit store offline".to_string()))
    }

    fn entries(&self) -> Result<Vec<UnmappedQuestion>, AuditError> {
        Err(AuditError::Unavailable("audit store offline".to_string()))
    }
}

pub(super) async fn response_json(response: Response) -> (StatusCode, serde_json::Value) {
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    let value = serde_json::from_slice(&bytes).expect("json body");
    (status, value)
}
