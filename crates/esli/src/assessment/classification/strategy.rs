use serde::{Deserialize, Serialize};

use super::{HIGH_THRESHOLD, LOW_THRESHOLD};

pub const FOCUSED_COACHING_TITLE: &str =
    "생각하는 힘은 좋지만, 체계적인 학습 관리와 효율적인 공부법이 필요해요.";
pub const GENERIC_COACHING_TITLE: &str = "맞춤형 코칭이 필요합니다.";
pub const GENERIC_ANALYSIS: &str =
    "학습 전략과 기술 종합 점수를 모두 산출하지 못해 일반적인 수준으로 안내합니다.";

/// Three-way bucket of a composite T-score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    High,
    Mid,
    Low,
}

impl Level {
    pub fn from_t_score(t_score: i32) -> Self {
        if t_score > HIGH_THRESHOLD {
            Self::High
        } else if t_score >= LOW_THRESHOLD {
            Self::Mid
        } else {
            Self::Low
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::High => "상",
            Self::Mid => "중",
            Self::Low => "하",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyAnalysis {
    pub strategy_level: Option<Level>,
    pub skill_level: Option<Level>,
    pub analysis: String,
    pub coaching_title: String,
}

impl StrategyAnalysis {
    pub fn from_t_scores(strategy: Option<i32>, skill: Option<i32>) -> Self {
        let strategy_level = strategy.map(Level::from_t_score);
        let skill_level = skill.map(Level::from_t_score);

        let (analysis, coaching_title) = match (strategy_level, skill_level) {
            (Some(strategy), Some(skill)) => {
                (analysis_sentence(strategy, skill), coaching_title(strategy, skill))
            }
            _ => (GENERIC_ANALYSIS, GENERIC_COACHING_TITLE),
        };

        Self {
            strategy_level,
            skill_level,
            analysis: analysis.to_string(),
            coaching_title: coaching_title.to_string(),
        }
    }
}

fn analysis_sentence(strategy: Level, skill: Level) -> &'static str {
    use Level::*;
    match (strategy, skill) {
        (High, High) => "학습 전략과 기술이 모두 뛰어난 상태입니다.",
        (High, Mid) => "학습 전략 부분은 뛰어나지만, 학습 기술 부분은 일반적인 수준입니다.",
        (High, Low) => "학습 전략 부분은 뛰어나지만, 학습 기술 부분이 취약합니다.",
        (Mid, High) => "학습 기술 부분은 뛰어나지만, 학습 전략 부분은 일반적인 수준입니다.",
        (Mid, Mid) => "학습 전략과 기술 부분 모두 일반적인 수준입니다.",
        (Mid, Low) => "학습 전략 부분은 일반적인 반면, 학습 기술 부분이 취약합니다.",
        (Low, High) => "학습 기술 부분은 뛰어나지만, 학습 전략 부분이 취약합니다.",
        (Low, Mid) => "학습 기술 부분은 일반적인 반면, 학습 전략 부분이 취약합니다.",
        (Low, Low) => "학습 전략과 기술이 모두 취약한 상태입니다.",
    }
}

fn coaching_title(strategy: Level, skill: Level) -> &'static str {
    match (strategy, skill) {
        (Level::Low, Level::Mid) => FOCUSED_COACHING_TITLE,
        _ => GENERIC_COACHING_TITLE,
    }
}
