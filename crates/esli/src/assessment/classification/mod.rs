mod hindrance;
mod motivation;
mod strategy;

pub use hindrance::{HindranceAnalysis, HindranceFlags};
pub use motivation::{MotivationAnalysis, MotivationType};
pub use strategy::{
    Level, StrategyAnalysis, FOCUSED_COACHING_TITLE, GENERIC_ANALYSIS, GENERIC_COACHING_TITLE,
};

use serde::{Deserialize, Serialize};

use super::domain::Category;
use super::scoring::CategoryScores;

/// T-scores above this are "high".
pub const HIGH_THRESHOLD: i32 = 114;
/// T-scores below this are "low"; protective categories breach under it.
pub const LOW_THRESHOLD: i32 = 86;
/// Motivation cascade's "moderate" cut, strictly greater than.
pub const MODERATE_MOTIVATION_THRESHOLD: i32 = 85;

/// Discrete labels that parameterize the report narrative. A pure function
/// of the final score set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub motivation: MotivationAnalysis,
    pub strategy: StrategyAnalysis,
    pub hindrance: HindranceAnalysis,
}

pub fn classify(scores: &CategoryScores) -> ClassificationResult {
    let motivation = MotivationType::from_t_scores(
        scores.t_score(Category::SelfAchievement),
        scores.t_score(Category::SocialRelation),
        scores.t_score(Category::DirectReward),
    );
    let strategy = StrategyAnalysis::from_t_scores(
        scores.t_score(Category::LearningStrategy),
        scores.t_score(Category::LearningSkill),
    );

    ClassificationResult {
        motivation: motivation.into(),
        strategy,
        hindrance: HindranceAnalysis::from_scores(scores),
    }
}
