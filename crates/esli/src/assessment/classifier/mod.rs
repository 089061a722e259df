//! Resolves free-text survey items to assessment categories.
//!
//! Exact patterns are consulted first; when none matches, the ordered keyword
//! list is scanned and the first keyword contained in the question wins.

mod normalizer;

pub(crate) use normalizer::normalize_text;

use super::domain::Category;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// How a pattern row is matched against question text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    #[default]
    Exact,
    Keyword,
}

/// Outcome of classifying one question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Exact(Category),
    Keyword(Category),
    Unmapped,
}

impl Resolution {
    pub fn category(self) -> Option<Category> {
        match self {
            Resolution::Exact(category) | Resolution::Keyword(category) => Some(category),
            Resolution::Unmapped => None,
        }
    }
}

/// Keyword priority list used when a pattern table declares no keywords.
/// Order is significant: the first keyword found in a question wins.
const DEFAULT_KEYWORDS: &[(&str, Category)] = &[
    ("목표", Category::GoalSetting),
    ("계획", Category::Planning),
    ("실천", Category::Executing),
    ("돌아보", Category::Reflecting),
    ("이해", Category::Understanding),
    ("사고", Category::Thinking),
    ("정리", Category::Organizing),
    ("암기", Category::Memorizing),
    ("문제", Category::ProblemSolving),
    ("스트레스", Category::StressSensitivity),
    ("효능", Category::LearningEfficacy),
    ("친구", Category::Friendship),
    ("가정", Category::HomeEnvironment),
    ("학교", Category::SchoolEnvironment),
    ("수면", Category::SleepControl),
    ("집중", Category::Concentration),
    ("TV", Category::Television),
    ("컴퓨터", Category::Computer),
    ("스마트", Category::SmartDevice),
    ("보상", Category::DirectReward),
    ("관계", Category::SocialRelation),
    ("성취", Category::SelfAchievement),
];

/// Curated question → category snapshot. Read-only for the duration of a
/// scoring run.
#[derive(Debug, Clone, Default)]
pub struct QuestionCategoryMap {
    exact: HashMap<String, Category>,
    exact_order: Vec<(String, Category)>,
    keywords: Vec<(String, Category)>,
}

impl QuestionCategoryMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty exact table with the built-in keyword priority list.
    pub fn with_default_keywords() -> Self {
        let mut map = Self::new();
        map.extend_default_keywords();
        map
    }

    pub fn default_keywords() -> &'static [(&'static str, Category)] {
        DEFAULT_KEYWORDS
    }

    pub(crate) fn extend_default_keywords(&mut self) {
        for (keyword, category) in DEFAULT_KEYWORDS {
            self.push_keyword(*keyword, *category);
        }
    }

    /// Registers an exact pattern. When the same pattern is pushed twice the
    /// first registration stays authoritative and `false` is returned.
    pub fn push_exact(&mut self, pattern: impl AsRef<str>, category: Category) -> bool {
        let normalized = normalize_text(pattern.as_ref());
        if normalized.is_empty() || self.exact.contains_key(&normalized) {
            return false;
        }
        self.exact.insert(normalized.clone(), category);
        self.exact_order.push((normalized, category));
        true
    }

    /// Appends a keyword at the lowest priority.
    pub fn push_keyword(&mut self, keyword: impl AsRef<str>, category: Category) {
        let normalized = normalize_text(keyword.as_ref());
        if normalized.is_empty() {
            return;
        }
        self.keywords.push((normalized, category));
    }

    pub fn push(&mut self, kind: MatchKind, pattern: impl AsRef<str>, category: Category) {
        match kind {
            MatchKind::Exact => {
                self.push_exact(pattern, category);
            }
            MatchKind::Keyword => self.push_keyword(pattern, category),
        }
    }

    pub fn exact_patterns(&self) -> &[(String, Category)] {
        &self.exact_order
    }

    pub fn keywords(&self) -> &[(String, Category)] {
        &self.keywords
    }

    pub fn has_keywords(&self) -> bool {
        !self.keywords.is_empty()
    }

    pub fn resolve(&self, question: &str) -> Resolution {
        let normalized = normalize_text(question);

        if let Some(category) = self.exact.get(&normalized) {
            return Resolution::Exact(*category);
        }

        self.keywords
            .iter()
            .find(|(keyword, _)| normalized.contains(keyword.as_str()))
            .map(|(_, category)| Resolution::Keyword(*category))
            .unwrap_or(Resolution::Unmapped)
    }
}
