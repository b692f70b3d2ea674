use chrono::{Datelike, Duration, NaiveDate};
use rustc_hash::FxHashMap;
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::core::constants::display;
use crate::core::types::Record;

/// A grouping dimension: a calendar bucket of the occurrence date, or a
/// categorical field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Dimension {
    /// ISO week, labelled by its Monday
    Week,
    /// Calendar month, labelled `YYYY-MM`
    Month,
    /// Exact value of a named field
    Field(String),
}

impl Dimension {
    pub fn field(name: impl Into<String>) -> Self {
        Dimension::Field(name.into())
    }

    pub fn name(&self) -> &str {
        match self {
            Dimension::Week => "week",
            Dimension::Month => "month",
            Dimension::Field(name) => name,
        }
    }

    fn key_of(&self, record: &Record) -> GroupKey {
        match self {
            Dimension::Week => record
                .date
                .map(|date| GroupKey::Week(week_start(date)))
                .unwrap_or(GroupKey::Missing),
            Dimension::Month => record
                .date
                .map(|date| GroupKey::Month {
                    year: date.year(),
                    month: date.month(),
                })
                .unwrap_or(GroupKey::Missing),
            Dimension::Field(name) => record
                .get(name)
                .map(|value| GroupKey::Value(value.to_string()))
                .unwrap_or(GroupKey::Missing),
        }
    }
}

impl FromStr for Dimension {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim() {
            "week" => Dimension::Week,
            "month" => Dimension::Month,
            other => Dimension::field(other),
        })
    }
}

/// Monday of the ISO week containing `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

/// One component of a group's key.
///
/// Keys of one dimension are always the same variant or `Missing`; the
/// derived ordering sorts buckets chronologically, values lexically, and
/// `Missing` after everything else.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GroupKey {
    Week(NaiveDate),
    Month { year: i32, month: u32 },
    Value(String),
    Missing,
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupKey::Week(monday) => write!(f, "{}", monday.format("%Y-%m-%d")),
            GroupKey::Month { year, month } => write!(f, "{year:04}-{month:02}"),
            GroupKey::Value(value) => f.write_str(value),
            GroupKey::Missing => f.write_str(display::MISSING_LABEL),
        }
    }
}

impl Serialize for GroupKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One or two grouping dimensions, primary first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeySpec {
    primary: Dimension,
    secondary: Option<Dimension>,
}

impl KeySpec {
    pub fn single(dimension: Dimension) -> Self {
        Self {
            primary: dimension,
            secondary: None,
        }
    }

    pub fn pair(primary: Dimension, secondary: Dimension) -> Self {
        Self {
            primary,
            secondary: Some(secondary),
        }
    }

    pub fn dimensions(&self) -> impl Iterator<Item = &Dimension> {
        std::iter::once(&self.primary).chain(self.secondary.as_ref())
    }

    fn key_of(&self, record: &Record) -> Vec<GroupKey> {
        self.dimensions().map(|d| d.key_of(record)).collect()
    }
}

impl From<Dimension> for KeySpec {
    fn from(dimension: Dimension) -> Self {
        KeySpec::single(dimension)
    }
}

/// One group of an [`AggregateView`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AggregateRow {
    pub keys: Vec<GroupKey>,
    pub count: usize,
}

/// Grouped counts over a record set, with the names of the grouping
/// dimensions in key order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AggregateView {
    pub dimensions: Vec<String>,
    pub rows: Vec<AggregateRow>,
}

impl AggregateView {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Sum of all group counts
    pub fn total(&self) -> usize {
        self.rows.iter().map(|row| row.count).sum()
    }

    /// Largest single group count, 0 for an empty view
    pub fn max_count(&self) -> usize {
        self.rows.iter().map(|row| row.count).max().unwrap_or(0)
    }
}

/// Count records per group of `key_spec`.
///
/// Only groups with at least one record appear. Rows are sorted by primary
/// key, then secondary key, ascending. Every record lands in exactly one
/// group (a missing value forms its own group), so the counts always sum to
/// `records.len()`.
pub fn aggregate_by(records: &[Record], key_spec: &KeySpec) -> AggregateView {
    let mut counts: FxHashMap<Vec<GroupKey>, usize> = FxHashMap::default();
    for record in records {
        *counts.entry(key_spec.key_of(record)).or_insert(0) += 1;
    }

    let mut rows: Vec<AggregateRow> = counts
        .into_iter()
        .map(|(keys, count)| AggregateRow { keys, count })
        .collect();
    rows.sort_unstable_by(|a, b| a.keys.cmp(&b.keys));

    AggregateView {
        dimensions: key_spec.dimensions().map(|d| d.name().to_string()).collect(),
        rows,
    }
}

/// The `n` largest groups of `dimension`, largest first.
///
/// Only records with a value take part: the `(missing)` group is never
/// ranked. Equal counts are ordered by ascending key so the result is
/// deterministic. Fewer than `n` groups are returned as they are, without
/// padding.
pub fn top_n(records: &[Record], dimension: &Dimension, n: usize) -> AggregateView {
    let mut view = aggregate_by(records, &KeySpec::single(dimension.clone()));
    view.rows.retain(|row| !row.keys.contains(&GroupKey::Missing));
    view.rows
        .sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.keys.cmp(&b.keys)));
    view.rows.truncate(n);
    view
}
