//! Score table and prompt context handed to the external narrative generator.

use serde::Serialize;
use std::fmt::Write as _;

use super::classification::{ClassificationResult, HIGH_THRESHOLD, LOW_THRESHOLD};
use super::domain::{Category, CategoryGroup, SchoolLevel};
use super::scoring::{CategoryScore, CategoryScores, ScoreReport};

#[derive(Debug, Clone, Serialize)]
pub struct ScoreRow {
    pub group: CategoryGroup,
    pub group_label: &'static str,
    pub category: Category,
    pub display_name: String,
    pub raw_score: f64,
    pub t_score: i32,
    pub percentile: u8,
}

/// Rows in report order; categories absent from the score set are skipped.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScoreTable {
    pub rows: Vec<ScoreRow>,
}

impl ScoreTable {
    pub fn from_scores(scores: &CategoryScores) -> Self {
        let rows = Category::ordered()
            .into_iter()
            .filter_map(|category| {
                scores.get(category).map(|score| ScoreRow {
                    group: category.group(),
                    group_label: category.group().label(),
                    category,
                    display_name: category.display_name(),
                    raw_score: score.raw_score,
                    t_score: score.t_score,
                    percentile: score.percentile,
                })
            })
            .collect();
        Self { rows }
    }

    pub fn rows_in(&self, group: CategoryGroup) -> impl Iterator<Item = &ScoreRow> {
        self.rows.iter().filter(move |row| row.group == group)
    }

    pub fn to_markdown(&self) -> String {
        let mut out = String::from("| 구분 | 영역 | 원점수 | 표준점수(T) | 백분위(%) |\n");
        out.push_str("| :--- | :--- | :--- | :--- | :--- |\n");
        for row in &self.rows {
            let _ = writeln!(
                out,
                "| **{}** | {} | {} | {} | {} |",
                row.group_label,
                row.display_name,
                format_raw(row.raw_score),
                row.t_score,
                row.percentile
            );
        }
        out
    }
}

fn format_raw(raw: f64) -> String {
    let formatted = format!("{raw:.2}");
    let trimmed = formatted.trim_end_matches('0');
    match trimmed.strip_suffix('.') {
        Some(whole) => format!("{whole}.0"),
        None => trimmed.to_string(),
    }
}

/// Everything a narrative generator needs to build its prompts.
#[derive(Debug, Clone, Serialize)]
pub struct ReportContext {
    pub student_name: String,
    pub level: SchoolLevel,
    pub table: ScoreTable,
    pub classification: ClassificationResult,
    /// Strategy and skill sub-categories above the high cut.
    pub strengths: Vec<Category>,
    /// Strategy and skill sub-categories below the low cut.
    pub weaknesses: Vec<Category>,
}

impl ReportContext {
    pub fn new(student_name: impl Into<String>, report: &ScoreReport) -> Self {
        let study_method = |score: &&CategoryScore| {
            matches!(
                score.category.group(),
                CategoryGroup::Strategy | CategoryGroup::Skill
            ) && !score.category.is_composite()
        };
        let strengths = report
            .scores
            .iter()
            .filter(study_method)
            .filter(|score| score.t_score > HIGH_THRESHOLD)
            .map(|score| score.category)
            .collect();
        let weaknesses = report
            .scores
            .iter()
            .filter(study_method)
            .filter(|score| score.t_score < LOW_THRESHOLD)
            .map(|score| score.category)
            .collect();

        Self {
            student_name: student_name.into(),
            level: report.level,
            table: ScoreTable::from_scores(&report.scores),
            classification: report.classification.clone(),
            strengths,
            weaknesses,
        }
    }

    /// Rule-based report body: score summary plus the canned analysis texts.
    pub fn to_markdown(&self) -> String {
        let motivation = &self.classification.motivation;
        let strategy = &self.classification.strategy;
        let hindrance = &self.classification.hindrance;

        let mut out = String::new();
        let _ = writeln!(
            out,
            "# {} 학생 학습 성향 분석 종합 보고서 ({})\n",
            self.student_name, self.level
        );
        out.push_str("## Ⅰ. 검사 결과 요약\n\n");
        out.push_str(&self.table.to_markdown());
        out.push_str("\n## Ⅱ. 학습 성향 종합 분석\n\n");

        let _ = writeln!(out, "### 1. 학습 동기: {}\n", motivation.kind.label());
        let _ = writeln!(out, "{} {}\n", motivation.summary, motivation.reason);
        let _ = writeln!(out, "> {}\n", motivation.coaching);

        out.push_str("### 2. 학습 전략/기술\n\n");
        let _ = writeln!(out, "{}\n", strategy.analysis);
        if !self.strengths.is_empty() {
            let _ = writeln!(out, "- 강점 항목: {}", join_labels(&self.strengths));
        }
        if !self.weaknesses.is_empty() {
            let _ = writeln!(out, "- 약점 항목: {}", join_labels(&self.weaknesses));
        }
        let _ = writeln!(out, "\n> {}\n", strategy.coaching_title);

        out.push_str("### 3. 학습 방해 요인\n\n");
        let _ = writeln!(out, "{}\n", hindrance.analysis);
        let _ = writeln!(out, "> {}", hindrance.coaching_title);
        out
    }
}

fn join_labels(categories: &[Category]) -> String {
    categories
        .iter()
        .map(|category| category.label())
        .collect::<Vec<_>>()
        .join(", ")
}
