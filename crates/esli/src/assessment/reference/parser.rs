use serde::{Deserialize, Deserializer};
use std::io::Read;

use super::super::classifier::MatchKind;

#[derive(Debug, Deserialize)]
pub(crate) struct StandardRow {
    pub(crate) level: String,
    pub(crate) category: String,
    pub(crate) mean: f64,
    pub(crate) std: f64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PercentileRow {
    pub(crate) t_score: i32,
    pub(crate) percentile: i32,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PatternRow {
    pub(crate) pattern: String,
    pub(crate) category: String,
    #[serde(rename = "match", default, deserialize_with = "match_kind_or_exact")]
    pub(crate) kind: MatchKind,
}

fn match_kind_or_exact<'de, D>(deserializer: D) -> Result<MatchKind, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    match opt.as_deref().map(str::trim) {
        None | Some("") => Ok(MatchKind::Exact),
        Some(value) if value.eq_ignore_ascii_case("exact") => Ok(MatchKind::Exact),
        Some(value) if value.eq_ignore_ascii_case("keyword") => Ok(MatchKind::Keyword),
        Some(other) => Err(serde::de::Error::custom(format!(
            "match must be 'exact' or 'keyword', got '{other}'"
        ))),
    }
}

pub(crate) fn parse_rows<R, T>(reader: R) -> Result<Vec<T>, csv::Error>
where
    R: Read,
    T: for<'de> Deserialize<'de>,
{
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut rows = Vec::new();

    for record in csv_reader.deserialize::<T>() {
        rows.push(record?);
    }

    Ok(rows)
}
