//! Dashboard assembly and reporting
//!
//! This module turns a loaded dataset and filter criteria into a
//! renderable snapshot, exports filtered records, and handles structured
//! logging for the application.

pub mod dashboard;
pub mod export;
pub mod logging;

// Re-export commonly used items
pub use dashboard::{DashboardPlan, DashboardSnapshot, NamedView, ViewKind, ViewSpec, build_snapshot};
pub use export::{export_csv, write_csv};
