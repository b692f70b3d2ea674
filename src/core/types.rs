use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Serialize;
use std::collections::BTreeMap;

/// One row of an insight or interaction dataset.
///
/// The parsed occurrence date is kept alongside the raw cell values so that
/// filtering works on real dates while export reproduces the input verbatim.
/// Empty cells are never stored: a field that is absent here is "missing".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    /// Calendar date of the interaction, if the date cell parsed
    pub date: Option<NaiveDate>,
    /// Raw cell values keyed by column name
    fields: BTreeMap<String, String>,
}

impl Record {
    /// Create a record with no field values.
    pub fn new(date: Option<NaiveDate>) -> Self {
        Self {
            date,
            fields: BTreeMap::new(),
        }
    }

    /// Builder-style variant of [`Record::set_field`].
    ///
    /// # Examples
    /// ```
    /// use trendscope::core::Record;
    ///
    /// let record = Record::new(None)
    ///     .with_field("country", "France")
    ///     .with_field("topic", "");
    /// assert_eq!(record.get("country"), Some("France"));
    /// assert_eq!(record.get("topic"), None);
    /// ```
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_field(name, value);
        self
    }

    /// Store a cell value. Blank values are treated as missing and dropped.
    pub fn set_field(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let value = value.into();
        if value.trim().is_empty() {
            return;
        }
        self.fields.insert(name.into(), value);
    }

    /// Value of a field, or `None` when the cell was empty or the column absent.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// Iterate over the populated fields in column-name order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Inclusive calendar range covered by a set of records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateExtent {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateExtent {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Smallest range containing every dated record, `None` if no record has a date.
    pub fn of(records: &[Record]) -> Option<Self> {
        let mut dates = records.iter().filter_map(|r| r.date);
        let first = dates.next()?;
        let (start, end) = dates.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d)));
        Some(Self { start, end })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Number of calendar days in the range, counting both ends.
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

/// Parse a date cell, keeping only the calendar date.
///
/// Accepts `YYYY-MM-DD`, `YYYY-MM-DD HH:MM:SS`, `YYYY-MM-DDTHH:MM:SS`
/// (optionally with fractional seconds) and RFC 3339 timestamps.
pub fn parse_date_cell(cell: &str) -> Option<NaiveDate> {
    let cell = cell.trim();
    if cell.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(cell, "%Y-%m-%d") {
        return Some(date);
    }

    for format in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(cell, format) {
            return Some(datetime.date());
        }
    }

    DateTime::parse_from_rfc3339(cell)
        .ok()
        .map(|datetime| datetime.date_naive())
}
