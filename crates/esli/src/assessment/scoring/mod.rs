//! Scoring pipeline: classify items, aggregate raw scores, fill defaults and
//! composites, standardize, then derive the rule-based classification.

mod aggregate;
mod resolve;
mod standardize;

pub use aggregate::RAW_SCALE;
pub use standardize::{percentile, t_score, PercentileStatus, T_SCORE_CEILING, T_SCORE_FLOOR};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info, info_span, warn};

use super::audit::UnmappedQuestionLog;
use super::classification::{classify, ClassificationResult};
use super::domain::{Category, RawResponseSet, SchoolLevel};
use super::reference::ReferenceSnapshot;
use aggregate::RawScoreBuilder;
use resolve::resolve_scores;

/// How a category's score entered the final set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreSource {
    Observed,
    /// No item resolved to the category; neutral reference-mean entry.
    Defaulted,
    /// Composite averaged from its constituents.
    Derived,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryScore {
    pub category: Category,
    pub raw_score: f64,
    pub t_score: i32,
    pub percentile: u8,
    pub percentile_status: PercentileStatus,
    pub source: ScoreSource,
}

/// Final score set keyed by category, iterated in report order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryScores(BTreeMap<Category, CategoryScore>);

impl CategoryScores {
    pub fn get(&self, category: Category) -> Option<&CategoryScore> {
        self.0.get(&category)
    }

    pub fn t_score(&self, category: Category) -> Option<i32> {
        self.get(category).map(|score| score.t_score)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CategoryScore> {
        self.0.values()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Required categories absent from the set.
    pub fn missing(&self) -> Vec<Category> {
        Category::ordered()
            .into_iter()
            .filter(|category| !self.0.contains_key(category))
            .collect()
    }
}

impl From<BTreeMap<Category, CategoryScore>> for CategoryScores {
    fn from(scores: BTreeMap<Category, CategoryScore>) -> Self {
        Self(scores)
    }
}

impl FromIterator<CategoryScore> for CategoryScores {
    fn from_iter<I: IntoIterator<Item = CategoryScore>>(iter: I) -> Self {
        Self(iter.into_iter().map(|score| (score.category, score)).collect())
    }
}

/// Outcome of one scoring invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreReport {
    pub level: SchoolLevel,
    pub scores: CategoryScores,
    pub classification: ClassificationResult,
    /// Item texts that matched no pattern, ordered by text.
    pub unmapped_questions: Vec<String>,
    pub mapped_items: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScoringError {
    #[error("no reference rows loaded for school level {0}")]
    MissingReferenceLevel(SchoolLevel),
}

/// Runs the pipeline against one immutable reference snapshot.
#[derive(Clone)]
pub struct AssessmentScorer {
    snapshot: Arc<ReferenceSnapshot>,
    audit: Option<Arc<dyn UnmappedQuestionLog>>,
}

impl AssessmentScorer {
    pub fn new(snapshot: Arc<ReferenceSnapshot>) -> Self {
        Self {
            snapshot,
            audit: None,
        }
    }

    pub fn with_audit(mut self, audit: Arc<dyn UnmappedQuestionLog>) -> Self {
        self.audit = Some(audit);
        self
    }

    pub fn snapshot(&self) -> &ReferenceSnapshot {
        &self.snapshot
    }

    pub fn score(
        &self,
        responses: &RawResponseSet,
        level: SchoolLevel,
    ) -> Result<ScoreReport, ScoringError> {
        let span = info_span!("score_assessment", %level, items = responses.len());
        let _entered = span.enter();

        if !self.snapshot.has_level(level) {
            return Err(ScoringError::MissingReferenceLevel(level));
        }

        let questions = self.snapshot.questions();
        let mut builder = RawScoreBuilder::default();
        let mut unmapped_questions = Vec::new();
        let mut mapped_items = 0;

        for (question, value) in responses.iter() {
            match questions.resolve(question).category() {
                Some(category) => {
                    builder.push(category, value);
                    mapped_items += 1;
                }
                None => {
                    debug!(question, "question matched no category pattern");
                    unmapped_questions.push(question.to_string());
                }
            }
        }

        let scores = resolve_scores(builder.finish(), level, &self.snapshot);
        let classification = classify(&scores);
        self.record_unmapped(&unmapped_questions);

        info!(
            mapped_items,
            unmapped = unmapped_questions.len(),
            categories = scores.len(),
            motivation = classification.motivation.kind.label(),
            "assessment scored"
        );

        Ok(ScoreReport {
            level,
            scores,
            classification,
            unmapped_questions,
            mapped_items,
        })
    }

    fn record_unmapped(&self, questions: &[String]) {
        let Some(audit) = &self.audit else {
            return;
        };
        if questions.is_empty() {
            return;
        }
        if let Err(err) = audit.record_batch(questions, Utc::now()) {
            warn!(error = %err, count = questions.len(), "failed to record unmapped questions");
        }
    }
}

impl std::fmt::Debug for AssessmentScorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssessmentScorer")
            .field("levels", &self.snapshot.levels())
            .field("audit", &self.audit.is_some())
            .finish()
    }
}
