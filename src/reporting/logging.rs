use crate::config::Config;
use crate::data::{DataSource, LoadOutcome};
use crate::events::OutboundEvent;
use crate::pipeline::{AggregateView, FilterCriteria};
use log::{debug, error, info, warn};

/// Initialize the logger with appropriate level based on verbosity.
///
/// `RUST_LOG` refines the level unless output is quiet.
pub fn init_logger(verbose: bool, quiet: bool) {
    let env_filters = std::env::var("RUST_LOG").ok();
    let mut builder = logger_builder(verbose, quiet, env_filters.as_deref());

    match builder.try_init() {
        Ok(()) => debug!("Logger initialized"),
        Err(_) => debug!("Logger already initialized, keeping existing settings"),
    }
}

/// Logger settings: the verbosity level first, then any `RUST_LOG`-style
/// directives on top of it.
pub fn logger_builder(verbose: bool, quiet: bool, env_filters: Option<&str>) -> env_logger::Builder {
    let level = if quiet {
        log::LevelFilter::Off
    } else if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn // Load failures and recovered filter input still surface
    };

    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(level)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false);

    if let Some(filters) = env_filters.filter(|_| !quiet) {
        builder.parse_filters(filters);
    }
    builder
}

/// Log configuration information
pub fn log_config_info(config: &Config) {
    let variant = config.variant.as_deref().unwrap_or("insights");
    let window = config.default_window_days.unwrap_or_default();
    let seed = config.seed.unwrap_or_default();

    info!(
        "Configuration: variant={variant}, window={window}d, sample={}, top={}",
        config.sample_size(),
        config.top_n()
    );
    info!(
        "Input: path={}, delimiter={:?}, seed={seed}",
        config.data_path.as_deref().unwrap_or("<none>"),
        config.delimiter()
    );
}

/// Log where the records came from
pub fn log_load_outcome(outcome: &LoadOutcome) {
    match &outcome.source {
        DataSource::File(path) => info!(
            "Loaded {} record(s) from {} ({} without a usable date)",
            outcome.dataset.len(),
            path.display(),
            outcome.dataset.undated_count()
        ),
        DataSource::Synthetic { seed } => warn!(
            "Using {} synthetic record(s) generated with seed {seed}",
            outcome.dataset.len()
        ),
        DataSource::Empty => warn!("Continuing with an empty dataset"),
    }
}

/// Log the resolved filter criteria
pub fn log_criteria(criteria: &FilterCriteria) {
    let bound = |date: Option<chrono::NaiveDate>| {
        date.map_or_else(|| "..".to_string(), |d| d.to_string())
    };
    info!(
        "Date range: {} to {}",
        bound(criteria.start_date()),
        bound(criteria.end_date())
    );
    for (field, selection) in criteria.selections() {
        debug!("  {field} = {selection}");
    }
}

/// Log how many records survived filtering
pub fn log_filter_result(total: usize, kept: usize) {
    if kept == 0 && total > 0 {
        warn!("No records match the current filters ({total} loaded)");
    } else {
        info!("Filtered {kept}/{total} record(s)");
    }
}

/// Log a computed view for debugging
pub fn log_view(title: &str, view: &AggregateView) {
    debug!(
        "View '{title}': {} group(s) over [{}], {} record(s)",
        view.len(),
        view.dimensions.join(", "),
        view.total()
    );
}

/// Log an event handed to the sink
pub fn log_event(event: &OutboundEvent) {
    debug!("Sending {} event", event.event_type());
}

/// Log error information
pub fn log_error(message: &str, source: Option<&dyn std::error::Error>) {
    match source {
        Some(err) => error!("{message}: {err}"),
        None => error!("{message}"),
    }
}

/// Log warning information
pub fn log_warning(message: &str) {
    warn!("{message}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Dataset, DatasetVariant};
    use crate::pipeline::{Dimension, aggregate_by};
    use std::io;
    use std::path::PathBuf;

    #[test]
    fn test_logger_initialization_is_repeatable() {
        // Only the first call installs a logger; later calls must not panic
        init_logger(true, false);
        init_logger(false, true);
        init_logger(true, true);
        init_logger(false, false);
    }

    #[test]
    fn test_logger_builder_levels() {
        assert_eq!(logger_builder(false, false, None).build().filter(), log::LevelFilter::Warn);
        assert_eq!(logger_builder(true, false, None).build().filter(), log::LevelFilter::Debug);
        assert_eq!(logger_builder(true, true, None).build().filter(), log::LevelFilter::Off);
    }

    #[test]
    fn test_logger_builder_env_filters_override_default() {
        let logger = logger_builder(false, false, Some("debug")).build();
        assert_eq!(logger.filter(), log::LevelFilter::Debug);

        let logger = logger_builder(true, false, Some("error")).build();
        assert_eq!(logger.filter(), log::LevelFilter::Error);

        // Quiet wins over the environment
        let logger = logger_builder(false, true, Some("debug")).build();
        assert_eq!(logger.filter(), log::LevelFilter::Off);
    }

    #[test]
    fn test_log_config_info() {
        log_config_info(&Config::default());
        log_config_info(&Config {
            variant: None,
            data_path: Some("insights.csv".to_string()),
            delimiter: Some(';'),
            ..Default::default()
        });
    }

    #[test]
    fn test_log_load_outcome_all_sources() {
        for source in [
            DataSource::File(PathBuf::from("insights.csv")),
            DataSource::Synthetic { seed: 42 },
            DataSource::Empty,
        ] {
            log_load_outcome(&LoadOutcome {
                dataset: Dataset::empty(DatasetVariant::Insights),
                source,
                warning: None,
            });
        }
    }

    #[test]
    fn test_log_criteria_and_results() {
        let criteria = FilterCriteria::new()
            .with_start_date(chrono::NaiveDate::from_ymd_opt(2024, 1, 1))
            .with_field("topic", "Safety");
        log_criteria(&criteria);
        log_criteria(&FilterCriteria::new());

        log_filter_result(10, 4);
        log_filter_result(10, 0);
        log_filter_result(0, 0);
    }

    #[test]
    fn test_log_view_and_event() {
        let view = aggregate_by(&[], &Dimension::Month.into());
        log_view("Monthly interactions by type", &view);
        log_event(&OutboundEvent::ExportRequest {
            format: "csv".to_string(),
        });
    }

    #[test]
    fn test_log_error_with_source() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        log_error("Failed to export", Some(&io_error));
        log_error("Simple error", None);
        log_warning("Placeholder data in use");
    }
}
