//! Dataset loading
//!
//! This module reads delimited-text datasets into immutable [`Dataset`]
//! values, knows the column schema of each [`DatasetVariant`], and applies
//! the per-variant fallback when the input file is unusable.

pub mod csv;
pub mod loader;
pub mod synthetic;
pub mod variant;

use log::warn;
use std::collections::HashSet;

use crate::core::error::{Result, TrendscopeError};
use crate::core::types::{DateExtent, Record, parse_date_cell};

// Re-export commonly used items
pub use loader::{DataSource, LoadOptions, LoadOutcome, load_dataset, load_or_fallback};
pub use variant::{DatasetVariant, LoadFallback};

/// An immutable, loaded record set together with its column layout.
///
/// The column order is the order of the input header and is what export
/// reproduces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataset {
    columns: Vec<String>,
    date_column: String,
    records: Vec<Record>,
}

impl Dataset {
    pub fn new(columns: Vec<String>, date_column: impl Into<String>, records: Vec<Record>) -> Self {
        Self {
            columns,
            date_column: date_column.into(),
            records,
        }
    }

    /// A dataset with the variant's schema and no rows.
    pub fn empty(variant: DatasetVariant) -> Self {
        Self::new(
            variant.columns().iter().map(|c| c.to_string()).collect(),
            variant.date_column(),
            Vec::new(),
        )
    }

    /// Parse delimited text whose first row is the header.
    ///
    /// The variant's date column must be present; other schema columns are
    /// optional and extra columns are carried through untouched. A repeated
    /// header name gets a `.1`, `.2`, ... suffix. A short row reads its
    /// missing trailing cells as missing values; a row with more fields than
    /// the header rejects the whole file.
    pub fn from_delimited(text: &str, variant: DatasetVariant, delimiter: char) -> Result<Self> {
        let mut rows = csv::parse_rows(text, delimiter)?.into_iter();

        let header = rows
            .next()
            .ok_or_else(|| TrendscopeError::DataLoad("dataset has no header row".to_string()))?;
        let columns = unique_columns(header.iter().map(|c| c.trim()));

        let date_column = variant.date_column();
        let date_index = columns
            .iter()
            .position(|c| c == date_column)
            .ok_or_else(|| {
                TrendscopeError::DataLoad(format!(
                    "required column '{date_column}' is missing (found: {})",
                    columns.join(", ")
                ))
            })?;

        let mut records = Vec::with_capacity(rows.len());
        for (index, row) in rows.enumerate() {
            if row.len() > columns.len() {
                return Err(TrendscopeError::DataLoad(format!(
                    "record {} has {} fields, header has {}",
                    index + 1,
                    row.len(),
                    columns.len()
                )));
            }

            let date = row.get(date_index).and_then(|cell| parse_date_cell(cell));
            let mut record = Record::new(date);
            for (name, value) in columns.iter().zip(row) {
                record.set_field(name.as_str(), value);
            }
            records.push(record);
        }

        Ok(Self::new(columns, date_column, records))
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn date_column(&self) -> &str {
        &self.date_column
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Date range covered by the dated records, if any.
    pub fn extent(&self) -> Option<DateExtent> {
        DateExtent::of(&self.records)
    }

    /// Records whose date cell was present but unparseable or absent.
    pub fn undated_count(&self) -> usize {
        self.records.iter().filter(|r| r.date.is_none()).count()
    }
}

/// Header names with repeats made unique: the second `name` becomes
/// `name.1`, the third `name.2`, skipping suffixes already taken.
fn unique_columns<'a>(names: impl Iterator<Item = &'a str>) -> Vec<String> {
    let names: Vec<&str> = names.collect();
    let mut taken: HashSet<String> = names.iter().map(|n| n.to_string()).collect();
    let mut seen: HashSet<&str> = HashSet::new();
    let mut columns = Vec::with_capacity(names.len());

    for name in names {
        if seen.insert(name) {
            columns.push(name.to_string());
            continue;
        }
        let mut suffix = 1;
        let renamed = loop {
            let candidate = format!("{name}.{suffix}");
            if !taken.contains(&candidate) {
                break candidate;
            }
            suffix += 1;
        };
        warn!("Duplicate column '{name}' renamed to '{renamed}'");
        taken.insert(renamed.clone());
        columns.push(renamed);
    }
    columns
}
