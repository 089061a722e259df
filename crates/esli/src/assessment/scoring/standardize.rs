use serde::{Deserialize, Serialize};

use super::super::reference::{PercentileTable, ReferenceStandard};

pub const T_SCORE_MEAN: f64 = 100.0;
pub const T_SCORE_SCALE: f64 = 15.0;
/// Lowest T-score the percentile table is consulted for.
pub const T_SCORE_FLOOR: i32 = 0;
/// Highest T-score the percentile table is consulted for.
pub const T_SCORE_CEILING: i32 = 200;
pub const CEILING_PERCENTILE: u8 = 99;

/// Where a reported percentile came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PercentileStatus {
    Table,
    BelowRange,
    AboveRange,
    /// In range but absent from the sparse table; reported as 0.
    Unavailable,
}

/// Linear T-score transform, rounded half to even.
pub fn t_score(raw_score: f64, standard: &ReferenceStandard) -> i32 {
    let scaled = T_SCORE_MEAN + T_SCORE_SCALE * (raw_score - standard.mean) / standard.std;
    scaled.round_ties_even() as i32
}

pub fn percentile(table: &PercentileTable, t_score: i32) -> (u8, PercentileStatus) {
    if t_score < T_SCORE_FLOOR {
        return (0, PercentileStatus::BelowRange);
    }
    if t_score > T_SCORE_CEILING {
        return (CEILING_PERCENTILE, PercentileStatus::AboveRange);
    }
    match table.get(t_score) {
        Some(value) => (value, PercentileStatus::Table),
        None => (0, PercentileStatus::Unavailable),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::domain::{Category, SchoolLevel};

    fn standard(mean: f64, std: f64) -> ReferenceStandard {
        ReferenceStandard::new(SchoolLevel::Elementary, Category::GoalSetting, mean, std)
            .expect("valid standard")
    }

    #[test]
    fn raw_equal_to_mean_is_exactly_one_hundred() {
        for (mean, std) in [(75.0, 10.0), (61.3, 7.77), (0.5, 0.01)] {
            assert_eq!(t_score(mean, &standard(mean, std)), 100);
        }
    }

    #[test]
    fn goal_setting_scenario_rounds_to_128() {
        assert_eq!(t_score(93.75, &standard(75.0, 10.0)), 128);
    }

    #[test]
    fn halves_round_to_even() {
        // 100 + 15 * 0.5 / 15 = 100.5
        assert_eq!(t_score(50.5, &standard(50.0, 15.0)), 100);
        // 100 + 15 * 1.5 / 15 = 101.5
        assert_eq!(t_score(51.5, &standard(50.0, 15.0)), 102);
    }

    #[test]
    fn percentile_clamps_outside_table_domain() {
        let mut table = PercentileTable::new();
        table.insert(100, 50).expect("insert");

        assert_eq!(percentile(&table, -5), (0, PercentileStatus::BelowRange));
        assert_eq!(percentile(&table, 250), (99, PercentileStatus::AboveRange));
        assert_eq!(percentile(&table, 100), (50, PercentileStatus::Table));
        assert_eq!(percentile(&table, 101), (0, PercentileStatus::Unavailable));
    }
}
