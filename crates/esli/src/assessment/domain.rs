use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use super::classifier::normalize_text;

/// Reference population segment used to select mean/std rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchoolLevel {
    #[serde(alias = "초등")]
    Elementary,
    #[serde(alias = "중등")]
    Middle,
    #[serde(alias = "고등")]
    High,
}

impl SchoolLevel {
    pub const fn ordered() -> [Self; 3] {
        [Self::Elementary, Self::Middle, Self::High]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Elementary => "초등",
            Self::Middle => "중등",
            Self::High => "고등",
        }
    }
}

impl fmt::Display for SchoolLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown school level '{0}'")]
pub struct UnknownSchoolLevel(pub String);

impl FromStr for SchoolLevel {
    type Err = UnknownSchoolLevel;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        match trimmed {
            "초등" => return Ok(Self::Elementary),
            "중등" => return Ok(Self::Middle),
            "고등" => return Ok(Self::High),
            _ => {}
        }
        match trimmed.to_ascii_lowercase().as_str() {
            "elementary" => Ok(Self::Elementary),
            "middle" => Ok(Self::Middle),
            "high" => Ok(Self::High),
            _ => Err(UnknownSchoolLevel(trimmed.to_string())),
        }
    }
}

/// Report section a category belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryGroup {
    Motivation,
    Strategy,
    Skill,
    PsychologicalHindrance,
    BehavioralHindrance,
}

impl CategoryGroup {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::Motivation,
            Self::Strategy,
            Self::Skill,
            Self::PsychologicalHindrance,
            Self::BehavioralHindrance,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Motivation => "학습 동기",
            Self::Strategy => "학습 전략",
            Self::Skill => "학습 기술",
            Self::PsychologicalHindrance => "학습 방해 (심리)",
            Self::BehavioralHindrance => "학습 방해 (행동)",
        }
    }
}

/// Psychometric assessment dimension. Declaration order is report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    DirectReward,
    SocialRelation,
    SelfAchievement,
    GoalSetting,
    Planning,
    Executing,
    Reflecting,
    LearningStrategy,
    Understanding,
    Thinking,
    Organizing,
    Memorizing,
    ProblemSolving,
    LearningSkill,
    StressSensitivity,
    LearningEfficacy,
    Friendship,
    HomeEnvironment,
    SchoolEnvironment,
    SleepControl,
    Concentration,
    Television,
    Computer,
    SmartDevice,
}

const STRATEGY_CONSTITUENTS: [Category; 4] = [
    Category::GoalSetting,
    Category::Planning,
    Category::Executing,
    Category::Reflecting,
];

const SKILL_CONSTITUENTS: [Category; 5] = [
    Category::Understanding,
    Category::Thinking,
    Category::Organizing,
    Category::Memorizing,
    Category::ProblemSolving,
];

impl Category {
    /// Every category a finished score set must contain.
    pub const fn ordered() -> [Self; 24] {
        [
            Self::DirectReward,
            Self::SocialRelation,
            Self::SelfAchievement,
            Self::GoalSetting,
            Self::Planning,
            Self::Executing,
            Self::Reflecting,
            Self::LearningStrategy,
            Self::Understanding,
            Self::Thinking,
            Self::Organizing,
            Self::Memorizing,
            Self::ProblemSolving,
            Self::LearningSkill,
            Self::StressSensitivity,
            Self::LearningEfficacy,
            Self::Friendship,
            Self::HomeEnvironment,
            Self::SchoolEnvironment,
            Self::SleepControl,
            Self::Concentration,
            Self::Television,
            Self::Computer,
            Self::SmartDevice,
        ]
    }

    pub const fn composites() -> [Self; 2] {
        [Self::LearningStrategy, Self::LearningSkill]
    }

    /// Canonical name used by reference tables and the pattern map.
    pub const fn label(self) -> &'static str {
        match self {
            Self::DirectReward => "직접적 보상처벌",
            Self::SocialRelation => "사회적 관계",
            Self::SelfAchievement => "자기성취",
            Self::GoalSetting => "목표세우기",
            Self::Planning => "계획하기",
            Self::Executing => "실천하기",
            Self::Reflecting => "돌아보기",
            Self::LearningStrategy => "학습전략",
            Self::Understanding => "이해하기",
            Self::Thinking => "사고하기",
            Self::Organizing => "정리하기",
            Self::Memorizing => "암기하기",
            Self::ProblemSolving => "문제풀기",
            Self::LearningSkill => "학습기술",
            Self::StressSensitivity => "스트레스민감성",
            Self::LearningEfficacy => "학습효능감",
            Self::Friendship => "친구관계",
            Self::HomeEnvironment => "가정환경",
            Self::SchoolEnvironment => "학교환경",
            Self::SleepControl => "수면조절",
            Self::Concentration => "학습집중력",
            Self::Television => "TV프로그램",
            Self::Computer => "컴퓨터",
            Self::SmartDevice => "스마트기기",
        }
    }

    pub fn from_label(value: &str) -> Option<Self> {
        let trimmed = value.trim();
        Self::ordered()
            .into_iter()
            .find(|category| category.label() == trimmed)
    }

    pub const fn group(self) -> CategoryGroup {
        match self {
            Self::DirectReward | Self::SocialRelation | Self::SelfAchievement => {
                CategoryGroup::Motivation
            }
            Self::GoalSetting
            | Self::Planning
            | Self::Executing
            | Self::Reflecting
            | Self::LearningStrategy => CategoryGroup::Strategy,
            Self::Understanding
            | Self::Thinking
            | Self::Organizing
            | Self::Memorizing
            | Self::ProblemSolving
            | Self::LearningSkill => CategoryGroup::Skill,
            Self::StressSensitivity
            | Self::LearningEfficacy
            | Self::Friendship
            | Self::HomeEnvironment
            | Self::SchoolEnvironment => CategoryGroup::PsychologicalHindrance,
            Self::SleepControl
            | Self::Concentration
            | Self::Television
            | Self::Computer
            | Self::SmartDevice => CategoryGroup::BehavioralHindrance,
        }
    }

    pub const fn is_composite(self) -> bool {
        matches!(self, Self::LearningStrategy | Self::LearningSkill)
    }

    /// Sub-categories averaged into a composite; empty for simple categories.
    pub fn constituents(self) -> &'static [Category] {
        match self {
            Self::LearningStrategy => &STRATEGY_CONSTITUENTS,
            Self::LearningSkill => &SKILL_CONSTITUENTS,
            _ => &[],
        }
    }

    /// Short name used in the score table ("목표세우기" → "목표", composites → "종합").
    pub fn display_name(self) -> String {
        if self.is_composite() {
            return "종합".to_string();
        }
        self.label().replace("세우기", "").replace("하기", "")
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Category::from_label(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown category '{raw}'")))
    }
}

/// One answer on the 4-point ordinal scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct ResponseValue(u8);

impl ResponseValue {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 4;

    pub fn new(value: i64) -> Result<Self, ResponseError> {
        if (i64::from(Self::MIN)..=i64::from(Self::MAX)).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(ResponseError::OutOfRange(value))
        }
    }

    pub const fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for ResponseValue {
    type Error = ResponseError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ResponseValue> for u8 {
    fn from(value: ResponseValue) -> Self {
        value.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResponseError {
    #[error("response value {0} is outside the 1-4 scale")]
    OutOfRange(i64),
    #[error("unknown answer label '{0}'")]
    UnknownOption(String),
}

/// Answer choices as presented on the survey.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseOption {
    No,
    SomewhatNo,
    SomewhatYes,
    Yes,
}

impl ResponseOption {
    pub const fn ordered() -> [Self; 4] {
        [Self::No, Self::SomewhatNo, Self::SomewhatYes, Self::Yes]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::No => "아니다",
            Self::SomewhatNo => "조금 아니다",
            Self::SomewhatYes => "조금 그렇다",
            Self::Yes => "그렇다",
        }
    }

    pub const fn value(self) -> ResponseValue {
        match self {
            Self::No => ResponseValue(1),
            Self::SomewhatNo => ResponseValue(2),
            Self::SomewhatYes => ResponseValue(3),
            Self::Yes => ResponseValue(4),
        }
    }
}

impl FromStr for ResponseOption {
    type Err = ResponseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        Self::ordered()
            .into_iter()
            .find(|option| option.label() == trimmed)
            .ok_or_else(|| ResponseError::UnknownOption(trimmed.to_string()))
    }
}

/// Question text → answer for one submitted survey. Keys are stored
/// normalized (invisible marks stripped, whitespace collapsed), so two
/// spellings of one item count as a single answer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    from = "BTreeMap<String, ResponseValue>",
    into = "BTreeMap<String, ResponseValue>"
)]
pub struct RawResponseSet {
    responses: BTreeMap<String, ResponseValue>,
}

impl RawResponseSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces any earlier answer to the same normalized question.
    pub fn insert(&mut self, question: impl Into<String>, value: ResponseValue) {
        self.responses.insert(normalize_text(&question.into()), value);
    }

    pub fn len(&self) -> usize {
        self.responses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.responses.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, ResponseValue)> {
        self.responses
            .iter()
            .map(|(question, value)| (question.as_str(), *value))
    }
}

impl From<BTreeMap<String, ResponseValue>> for RawResponseSet {
    fn from(responses: BTreeMap<String, ResponseValue>) -> Self {
        responses.into_iter().collect()
    }
}

impl From<RawResponseSet> for BTreeMap<String, ResponseValue> {
    fn from(set: RawResponseSet) -> Self {
        set.responses
    }
}

impl<S: Into<String>> FromIterator<(S, ResponseValue)> for RawResponseSet {
    fn from_iter<I: IntoIterator<Item = (S, ResponseValue)>>(iter: I) -> Self {
        let mut set = Self::new();
        for (question, value) in iter {
            set.insert(question, value);
        }
        set
    }
}
