//! Filter-aggregate pipeline
//!
//! Turns a raw record set and a [`FilterCriteria`] into the filtered subset
//! and the grouped-count views a dashboard consumes. Every function here is
//! pure: inputs are borrowed, never mutated, and empty input yields empty
//! output.

pub mod aggregate;
pub mod criteria;
pub mod filter;
pub mod sample;

// Re-export commonly used items
pub use aggregate::{AggregateRow, AggregateView, Dimension, GroupKey, KeySpec, aggregate_by, top_n};
pub use criteria::{
    CriteriaInput, DateRangePolicy, FilterCriteria, FilterParseError, ResolvedCriteria, Selection,
};
pub use filter::{filter, filter_iter};
pub use sample::{sample, sample_with};
