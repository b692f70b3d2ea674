//! # trendscope
//!
//! Filter-aggregate pipeline behind the insight and field-interaction
//! dashboards: load a delimited dataset, narrow it with date and
//! categorical criteria, and reduce the result to grouped counts, top-N
//! rankings and record samples.
//!
//! ## Module Organization
//!
//! - [`core`] - Error type, shared constants and the record model
//! - [`data`] - Dataset parsing, per-variant schemas and load fallbacks
//! - [`pipeline`] - Filtering, aggregation, top-N and sampling
//! - [`events`] - Fire-and-forget notifications to a hosting page
//! - [`reporting`] - Dashboard snapshots, CSV export and logging
//! - [`config`] - TOML configuration and CLI merging
//! - [`ui`] - Command-line interface and output rendering

pub mod config;
pub mod core;
pub mod data;
pub mod events;
pub mod pipeline;
pub mod reporting;
pub mod ui;

// Re-export commonly used types
pub use crate::config::{CliConfig, Config};
pub use crate::core::{DateExtent, Record, Result, TrendscopeError};
pub use crate::data::{Dataset, DatasetVariant, LoadOutcome, load_or_fallback};
pub use crate::events::{EventSink, OutboundEvent};
pub use crate::pipeline::{
    AggregateView, Dimension, FilterCriteria, KeySpec, Selection, aggregate_by, filter, sample,
    top_n,
};
pub use crate::reporting::{DashboardPlan, DashboardSnapshot, build_snapshot};
