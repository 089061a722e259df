use serde::{Deserialize, Serialize};

use super::super::domain::Category;
use super::super::scoring::CategoryScores;
use super::{HIGH_THRESHOLD, LOW_THRESHOLD};

/// Direction in which a category's T-score signals risk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Breach {
    /// Risk-increasing category: breached when T > threshold.
    Above(i32),
    /// Protective category: breached when T < threshold.
    Below(i32),
}

impl Breach {
    fn is_breached(self, t_score: i32) -> bool {
        match self {
            Breach::Above(threshold) => t_score > threshold,
            Breach::Below(threshold) => t_score < threshold,
        }
    }
}

const PSYCHOLOGICAL_RULES: [(Category, Breach); 5] = [
    (Category::StressSensitivity, Breach::Above(HIGH_THRESHOLD)),
    (Category::LearningEfficacy, Breach::Below(LOW_THRESHOLD)),
    (Category::Friendship, Breach::Below(LOW_THRESHOLD)),
    (Category::HomeEnvironment, Breach::Below(LOW_THRESHOLD)),
    (Category::SchoolEnvironment, Breach::Below(LOW_THRESHOLD)),
];

const BEHAVIORAL_RULES: [(Category, Breach); 5] = [
    (Category::SleepControl, Breach::Below(LOW_THRESHOLD)),
    (Category::Concentration, Breach::Below(LOW_THRESHOLD)),
    (Category::Television, Breach::Above(HIGH_THRESHOLD)),
    (Category::Computer, Breach::Above(HIGH_THRESHOLD)),
    (Category::SmartDevice, Breach::Above(HIGH_THRESHOLD)),
];

fn breached(scores: &CategoryScores, rules: &[(Category, Breach)]) -> Vec<Category> {
    rules
        .iter()
        .filter(|(category, breach)| {
            scores
                .t_score(*category)
                .is_some_and(|t_score| breach.is_breached(t_score))
        })
        .map(|(category, _)| *category)
        .collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HindranceFlags {
    pub psychological: bool,
    pub behavioral: bool,
}

impl HindranceFlags {
    pub fn narrative(self) -> (&'static str, &'static str) {
        match (self.psychological, self.behavioral) {
            (false, false) => (
                "학습을 방해하는 심리적, 행동적 요인 모두 특별히 나쁜 영역 없이 긍정적인 상태를 보이고 있습니다.",
                "공부에 집중할 수 있는 좋은 마음과 행동 습관을 가지고 있어요.",
            ),
            (true, false) => (
                "학습 방해 부분에서는 심리적 부분에서 좋지 않은 영향을 받고 있는 것 같습니다.",
                "심리적 안정감을 찾기 위한 노력이 필요합니다.",
            ),
            (false, true) => (
                "학습 방해 부분에서는 행동적 부분에서 좋지 않은 영향을 받고 있는 것 같습니다.",
                "학습 습관을 개선하기 위한 노력이 필요합니다.",
            ),
            (true, true) => (
                "학습 방해 부분에서는 심리적 부분과 행동적 부분 모두 좋지 않은 영향을 받고 있는 것 같습니다.",
                "심리적, 행동적 측면 모두 개선이 필요합니다.",
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HindranceAnalysis {
    pub flags: HindranceFlags,
    /// Categories whose threshold was breached, in rule order.
    pub breached: Vec<Category>,
    pub analysis: String,
    pub coaching_title: String,
}

impl HindranceAnalysis {
    pub fn from_scores(scores: &CategoryScores) -> Self {
        let psychological = breached(scores, &PSYCHOLOGICAL_RULES);
        let behavioral = breached(scores, &BEHAVIORAL_RULES);
        let flags = HindranceFlags {
            psychological: !psychological.is_empty(),
            behavioral: !behavioral.is_empty(),
        };
        let (analysis, coaching_title) = flags.narrative();

        Self {
            flags,
            breached: psychological.into_iter().chain(behavioral).collect(),
            analysis: analysis.to_string(),
            coaching_title: coaching_title.to_string(),
        }
    }
}
