use serde::{Deserialize, Serialize};

use super::{HIGH_THRESHOLD, MODERATE_MOTIVATION_THRESHOLD};

/// Motivation profile, checked as a priority cascade in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MotivationType {
    SelfDirected,
    SociallyExpected,
    StatusQuo,
    CrowdDriven,
    OtherDirected,
    Unmotivated,
}

impl MotivationType {
    /// First matching branch wins; absent scores never meet a threshold.
    pub fn from_t_scores(
        self_achievement: Option<i32>,
        social_relation: Option<i32>,
        direct_reward: Option<i32>,
    ) -> Self {
        let above = |score: Option<i32>, threshold: i32| score.is_some_and(|t| t > threshold);

        if above(self_achievement, HIGH_THRESHOLD) {
            Self::SelfDirected
        } else if above(social_relation, HIGH_THRESHOLD) {
            Self::SociallyExpected
        } else if above(self_achievement, MODERATE_MOTIVATION_THRESHOLD) {
            Self::StatusQuo
        } else if above(social_relation, MODERATE_MOTIVATION_THRESHOLD) {
            Self::CrowdDriven
        } else if above(direct_reward, HIGH_THRESHOLD) {
            Self::OtherDirected
        } else {
            Self::Unmotivated
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::SelfDirected => "자기 주도적 학습형",
            Self::SociallyExpected => "사회 기대적 학습형",
            Self::StatusQuo => "현상 유지적 학습형",
            Self::CrowdDriven => "군중 심리적 학습형",
            Self::OtherDirected => "타인 주도적 학습형",
            Self::Unmotivated => "학습 동기 부재형",
        }
    }

    pub fn summary(self) -> String {
        format!("{}에 가장 가까운 특성을 보이고 있습니다.", self.label())
    }

    pub const fn reason(self) -> &'static str {
        match self {
            Self::SelfDirected => "자신이 원하는 이상이나 직업 등, 자신이 관심 있는 분야의 호기심을 충족시키기 위해 공부를 합니다.",
            Self::SociallyExpected => "다른 사람에게 좋은 모습을 보여주어야 한다는 생각에 공부를 합니다.",
            Self::StatusQuo => "막연히 지금보다 나은 사람이 되거나 나의 미래를 준비하기 위해 공부하고자 생각합니다.",
            Self::CrowdDriven => "다른 친구들이 모두 공부를 할 때 자신도 공부 하지 않으면 뒤쳐질 것이란 생각으로 공부를 하는 학생들입니다.",
            Self::OtherDirected => "용돈이나 선물처럼 누가 약속한 물질적인 보상을 얻기 위해 공부하거나, 공부를 하지 않아서 혼이 나는 것을 피하기 위한 목적으로 공부를 합니다.",
            Self::Unmotivated => "공부를 하는 이유가 그 어떤 것을 통해서도 생기지 않는 경우입니다.",
        }
    }

    pub const fn coaching(self) -> &'static str {
        match self {
            Self::SelfDirected => "학습에 대한 호기심을 꾸준히 가질 수 있도록, 학생이 스스로 찾고 노력하는 것을 자주 격려하고 지지해 주시기 바랍니다.",
            Self::SociallyExpected => "자신이 타인의 기대에 부응하고 있다고 느끼도록 해주시기 바랍니다.",
            Self::StatusQuo => "적극적으로 학생이 원하는 것을 찾을 수 있도록 도와주는 것이 필요합니다.",
            Self::CrowdDriven => "자신이 어떤 사람이고 무엇을 좋아하는지 탐색하면서, 자기 자신을 믿을 수 있도록 끊임없이 칭찬과 격려를 해주는 것이 필요합니다.",
            Self::OtherDirected => "학생이 공부를 하는 것을 인정해주고 칭찬하여 꼭 눈에 보이는 보상이 아니더라도 공부를 통해 만족감을 얻을 수 있도록 해주는 것이 좋습니다.",
            Self::Unmotivated => "학생이 좋아하는 것이 무엇인지 찾아보고, 좋아하는 것과 공부가 연결될 수 있는 고리를 찾아보시기 바랍니다.",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MotivationAnalysis {
    pub kind: MotivationType,
    pub summary: String,
    pub reason: String,
    pub coaching: String,
}

impl From<MotivationType> for MotivationAnalysis {
    fn from(kind: MotivationType) -> Self {
        Self {
            kind,
            summary: kind.summary(),
            reason: kind.reason().to_string(),
            coaching: kind.coaching().to_string(),
        }
    }
}
