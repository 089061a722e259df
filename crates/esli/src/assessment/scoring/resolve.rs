use std::collections::BTreeMap;

use tracing::{debug, warn};

use super::super::domain::{Category, SchoolLevel};
use super::super::reference::ReferenceSnapshot;
use super::standardize::{percentile, t_score};
use super::{CategoryScore, CategoryScores, ScoreSource};

/// Standardizes observed raw scores, fills neutral defaults for absent simple
/// categories, then derives composites from observed constituents only. A
/// composite with no observed constituent falls back to its own reference
/// mean, so an empty response set stays neutral (T = 100) everywhere.
pub(crate) fn resolve_scores(
    observed: BTreeMap<Category, f64>,
    level: SchoolLevel,
    snapshot: &ReferenceSnapshot,
) -> CategoryScores {
    let mut scores = BTreeMap::new();

    for (category, raw_score) in observed {
        match standardize(category, raw_score, level, snapshot, ScoreSource::Observed) {
            Some(score) => {
                scores.insert(category, score);
            }
            None => warn!(
                %level,
                %category,
                "observed category has no reference row; dropped"
            ),
        }
    }

    for category in Category::ordered() {
        if category.is_composite() || scores.contains_key(&category) {
            continue;
        }
        if let Some(score) = default_score(category, level, snapshot) {
            scores.insert(category, score);
        }
    }

    for composite in Category::composites() {
        if scores.contains_key(&composite) {
            continue;
        }
        let raws: Vec<f64> = composite
            .constituents()
            .iter()
            .filter_map(|constituent| scores.get(constituent))
            .filter(|score| score.source == ScoreSource::Observed)
            .map(|score| score.raw_score)
            .collect();

        let resolved = if raws.is_empty() {
            default_score(composite, level, snapshot)
        } else {
            let raw_score = raws.iter().sum::<f64>() / raws.len() as f64;
            let derived =
                standardize(composite, raw_score, level, snapshot, ScoreSource::Derived);
            if derived.is_none() {
                warn!(%level, %composite, "composite has no reference row; left absent");
            }
            derived
        };
        if let Some(score) = resolved {
            scores.insert(composite, score);
        }
    }

    CategoryScores::from(scores)
}

fn default_score(
    category: Category,
    level: SchoolLevel,
    snapshot: &ReferenceSnapshot,
) -> Option<CategoryScore> {
    let Some(standard) = snapshot.standard(level, category) else {
        warn!(%level, %category, "required category has no reference row; left absent");
        return None;
    };
    debug!(%category, "category defaulted to reference mean");
    standardize(category, standard.mean, level, snapshot, ScoreSource::Defaulted)
}

fn standardize(
    category: Category,
    raw_score: f64,
    level: SchoolLevel,
    snapshot: &ReferenceSnapshot,
    source: ScoreSource,
) -> Option<CategoryScore> {
    let standard = snapshot.standard(level, category)?;
    let t_score = t_score(raw_score, standard);
    let (percentile, percentile_status) = percentile(snapshot.percentiles(), t_score);
    Some(CategoryScore {
        category,
        raw_score,
        t_score,
        percentile,
        percentile_status,
        source,
    })
}
