use std::collections::BTreeMap;

use super::super::domain::{Category, ResponseValue};

/// Multiplier mapping the 1–4 response mean onto the reference raw-score scale.
pub const RAW_SCALE: f64 = 25.0;

/// Per-invocation accumulator; responses for unmapped items never reach it.
#[derive(Debug, Default)]
pub(crate) struct RawScoreBuilder {
    buckets: BTreeMap<Category, (u32, usize)>,
}

impl RawScoreBuilder {
    pub fn push(&mut self, category: Category, value: ResponseValue) {
        let (sum, count) = self.buckets.entry(category).or_insert((0, 0));
        *sum += u32::from(value.get());
        *count += 1;
    }

    /// Raw score = mean response × 25 for every category with at least one item.
    pub fn finish(self) -> BTreeMap<Category, f64> {
        self.buckets
            .into_iter()
            .filter(|(_, (_, count))| *count > 0)
            .map(|(category, (sum, count))| {
                (category, f64::from(sum) / count as f64 * RAW_SCALE)
            })
            .collect()
    }
}
