use chrono::{Duration, NaiveDate};
use log::warn;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

use crate::core::constants::filters;
use crate::core::types::{DateExtent, Record};

/// A categorical selector value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum Selection {
    /// The "All" sentinel: no constraint on this field
    All,
    /// The field must equal this value exactly
    Exactly(String),
}

impl Selection {
    /// Interpret raw selector text, mapping the sentinel to [`Selection::All`].
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if value == filters::ALL {
            Selection::All
        } else {
            Selection::Exactly(value.to_string())
        }
    }

    /// Like [`Selection::parse`], but a value outside `choices` becomes `All`.
    ///
    /// Used for selectors whose options are a fixed list, where a stale or
    /// mistyped default should show everything rather than nothing.
    pub fn from_choices(value: &str, choices: &[&str]) -> Self {
        let value = value.trim();
        if choices.contains(&value) {
            Self::parse(value)
        } else {
            warn!("Selection '{value}' is not one of the offered choices, using {}", filters::ALL);
            Selection::All
        }
    }

    /// Whether a record's field value satisfies this selection.
    /// A missing value only satisfies `All`.
    pub fn matches(&self, value: Option<&str>) -> bool {
        match self {
            Selection::All => true,
            Selection::Exactly(expected) => value == Some(expected.as_str()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Selection::All => filters::ALL,
            Selection::Exactly(value) => value,
        }
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The full set of active user constraints for one filtering pass.
///
/// Absent date bounds are unbounded. Constraints are keyed by field name, so
/// setting the same field twice keeps the last selection and evaluation
/// order never matters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterCriteria {
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    selections: BTreeMap<String, Selection>,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_start_date(mut self, start: Option<NaiveDate>) -> Self {
        self.start_date = start;
        self
    }

    pub fn with_end_date(mut self, end: Option<NaiveDate>) -> Self {
        self.end_date = end;
        self
    }

    pub fn with_date_range(self, start: NaiveDate, end: NaiveDate) -> Self {
        self.with_start_date(Some(start)).with_end_date(Some(end))
    }

    pub fn with_selection(mut self, field: impl Into<String>, selection: Selection) -> Self {
        self.selections.insert(field.into(), selection);
        self
    }

    /// Shorthand for `with_selection(field, Selection::parse(value))`.
    pub fn with_field(self, field: impl Into<String>, value: &str) -> Self {
        self.with_selection(field, Selection::parse(value))
    }

    pub fn start_date(&self) -> Option<NaiveDate> {
        self.start_date
    }

    pub fn end_date(&self) -> Option<NaiveDate> {
        self.end_date
    }

    pub fn selection(&self, field: &str) -> Option<&Selection> {
        self.selections.get(field)
    }

    pub fn selections(&self) -> impl Iterator<Item = (&str, &Selection)> {
        self.selections.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Constraints other than the "All" sentinel.
    pub fn active_selections(&self) -> impl Iterator<Item = (&str, &str)> {
        self.selections.iter().filter_map(|(field, selection)| match selection {
            Selection::All => None,
            Selection::Exactly(value) => Some((field.as_str(), value.as_str())),
        })
    }

    pub fn has_date_bounds(&self) -> bool {
        self.start_date.is_some() || self.end_date.is_some()
    }

    /// Whether a record passes the date range and every active selection.
    pub fn matches(&self, record: &Record) -> bool {
        self.matches_date(record.date)
            && self
                .selections
                .iter()
                .all(|(field, selection)| selection.matches(record.get(field)))
    }

    fn matches_date(&self, date: Option<NaiveDate>) -> bool {
        if !self.has_date_bounds() {
            return true;
        }
        let Some(date) = date else {
            return false;
        };
        self.start_date.is_none_or(|start| start <= date)
            && self.end_date.is_none_or(|end| date <= end)
    }
}

/// How missing or unparseable date bounds are filled in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateRangePolicy {
    /// The last N days up to and including today
    TrailingDays(u32),
    /// The first and last dates present in the loaded data
    DataExtent,
}

impl DateRangePolicy {
    /// Default `(start, end)` bounds. `DataExtent` over undated data is unbounded.
    pub fn default_bounds(
        &self,
        today: NaiveDate,
        extent: Option<DateExtent>,
    ) -> (Option<NaiveDate>, Option<NaiveDate>) {
        match self {
            DateRangePolicy::TrailingDays(days) => {
                (Some(today - Duration::days(i64::from(*days))), Some(today))
            }
            DateRangePolicy::DataExtent => match extent {
                Some(extent) => (Some(extent.start), Some(extent.end)),
                None => (None, None),
            },
        }
    }
}

/// A date bound that could not be parsed and was replaced by the default
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterParseError {
    pub bound: &'static str,
    pub value: String,
}

impl fmt::Display for FilterParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} date '{}' is not a valid YYYY-MM-DD date",
            self.bound, self.value
        )
    }
}

impl std::error::Error for FilterParseError {}

/// Raw, unvalidated selector state as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CriteriaInput {
    pub start: Option<String>,
    pub end: Option<String>,
    /// `(field, value)` pairs; later pairs win for the same field
    pub selections: Vec<(String, String)>,
}

/// Criteria built from [`CriteriaInput`], with the parse failure that was
/// recovered from, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedCriteria {
    pub criteria: FilterCriteria,
    pub recovered: Option<FilterParseError>,
}

impl CriteriaInput {
    pub fn with_start(mut self, start: impl Into<String>) -> Self {
        self.start = Some(start.into());
        self
    }

    pub fn with_end(mut self, end: impl Into<String>) -> Self {
        self.end = Some(end.into());
        self
    }

    pub fn with_selection(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.selections.push((field.into(), value.into()));
        self
    }

    /// Turn raw input into criteria. Never fails.
    ///
    /// A bound left empty takes the policy default. If any given bound fails
    /// to parse, both bounds take the policy default.
    pub fn resolve(
        &self,
        policy: DateRangePolicy,
        today: NaiveDate,
        extent: Option<DateExtent>,
    ) -> ResolvedCriteria {
        let (default_start, default_end) = policy.default_bounds(today, extent);

        let parsed = parse_bound("start", self.start.as_deref()).and_then(|start| {
            parse_bound("end", self.end.as_deref()).map(|end| (start, end))
        });

        let (start, end, recovered) = match parsed {
            Ok((start, end)) => (start.or(default_start), end.or(default_end), None),
            Err(error) => {
                warn!("{error}, falling back to the default date range");
                (default_start, default_end, Some(error))
            }
        };

        let criteria = self.selections.iter().fold(
            FilterCriteria::new()
                .with_start_date(start)
                .with_end_date(end),
            |criteria, (field, value)| criteria.with_field(field.trim(), value),
        );

        ResolvedCriteria {
            criteria,
            recovered,
        }
    }
}

fn parse_bound(
    bound: &'static str,
    value: Option<&str>,
) -> Result<Option<NaiveDate>, FilterParseError> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(value) => NaiveDate::parse_from_str(value, filters::DATE_FORMAT)
            .map(Some)
            .map_err(|_| FilterParseError {
                bound,
                value: value.to_string(),
            }),
    }
}
