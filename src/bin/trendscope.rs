use chrono::{Duration, Local, NaiveDate};
use clap::Parser;
use trendscope::config::{CliConfig, Config};
use trendscope::core::constants::{filters, output_formats};
use trendscope::core::types::DateExtent;
use trendscope::data::variant::insight_columns;
use trendscope::data::{DatasetVariant, LoadOutcome, load_or_fallback};
use trendscope::events::{EventSink, FilterPayload, NullSink, OutboundEvent, open_sink};
use trendscope::pipeline::{CriteriaInput, FilterCriteria, Selection};
use trendscope::reporting::logging;
use trendscope::reporting::{DashboardPlan, DashboardSnapshot, build_snapshot, export_csv};
use trendscope::ui::completion::print_completions;
use trendscope::ui::output::display_snapshot;
use trendscope::ui::{Cli, Commands, cli_to_config};

fn main() {
    let cli = Cli::parse();

    // Handle completion commands first
    if let Some(exit_code) = handle_completion_commands(&cli) {
        std::process::exit(exit_code);
    }

    match run_trendscope_logic(&cli) {
        Ok(exit_code) => std::process::exit(exit_code),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

/// Handle completion commands and return exit code if a completion command was processed
pub fn handle_completion_commands(cli: &Cli) -> Option<i32> {
    match cli.command {
        Some(Commands::CompletionGenerate { shell }) => {
            print_completions(shell);
            Some(0)
        }
        None => None,
    }
}

/// Main dashboard logic extracted from main() for testing
pub fn run_trendscope_logic(cli: &Cli) -> Result<i32, Box<dyn std::error::Error>> {
    let cli_config = cli_to_config(cli)?;

    // Load and merge configuration
    let config = load_and_merge_config(&cli_config)?;

    // Setup logging and output settings
    let output_settings = setup_output_settings(&cli_config, &config);
    logging::init_logger(output_settings.verbose, output_settings.quiet);
    logging::log_config_info(&config);

    let variant = config.dataset_variant()?;
    let today = Local::now().date_naive();
    let input = criteria_input(&cli_config);
    let policy = variant.default_range_policy(config.default_window_days);

    // Placeholder data is spread over the range the user is about to look at
    let provisional = input.resolve(policy, today, None).criteria;
    let window = placeholder_window(&provisional, today, config.default_window_days);

    let data_path = config.data_path();
    let outcome = load_or_fallback(data_path.as_deref(), variant, &config.load_options(window));
    logging::log_load_outcome(&outcome);

    // Resolve again now that the data extent is known
    let resolved = input.resolve(policy, today, outcome.dataset.extent());
    let criteria = apply_topic(resolved.criteria, cli_config.topic.as_deref(), variant);
    logging::log_criteria(&criteria);

    let notice = build_notice(&outcome, resolved.recovered.as_ref().map(ToString::to_string));

    let plan = DashboardPlan::for_variant(variant, config.top_n(), config.sample_size());
    let snapshot = build_snapshot(
        &outcome.dataset,
        &criteria,
        &plan,
        variant,
        &mut rand::thread_rng(),
    )
    .with_notice(notice);
    logging::log_filter_result(snapshot.total_records, snapshot.filtered_records);

    display_snapshot(
        &snapshot,
        &output_settings.output_format,
        &mut std::io::stdout().lock(),
    )?;

    // Export the filtered records if requested
    if let Some(ref export_path) = config.export_path {
        export_csv(
            export_path,
            outcome.dataset.columns(),
            &snapshot.records,
            config.delimiter(),
        )
        .inspect_err(|e| logging::log_error("Could not export records", Some(e)))?;

        if output_settings.should_show_status() {
            eprintln!(
                "Exported {} record(s) to {export_path}",
                snapshot.records.len()
            );
        }
    }

    // Notify the host page, if one is listening
    let mut sink = open_event_sink(&config, variant);
    for event in host_events(&cli_config, &config, &snapshot, &criteria) {
        logging::log_event(&event);
        sink.emit(&event);
    }

    Ok(0)
}

/// Load configuration from file or standard locations and merge with CLI config
pub fn load_and_merge_config(
    cli_config: &CliConfig,
) -> Result<Config, Box<dyn std::error::Error>> {
    let mut config = if cli_config.no_config {
        Config::default()
    } else if let Some(ref config_file) = cli_config.config_file {
        Config::load_from_file(config_file).inspect_err(|e| {
            logging::log_error(
                &format!("Could not load config file '{config_file}'"),
                Some(e),
            );
        })?
    } else {
        Config::load_from_standard_locations()
    };

    // Merge CLI arguments with configuration (CLI takes precedence)
    config.merge_with_cli(cli_config);
    config.validate()?;
    Ok(config)
}

/// Settings for output formatting and display
pub struct OutputSettings {
    pub quiet: bool,
    pub verbose: bool,
    pub output_format: String,
}

impl OutputSettings {
    /// Status lines go to stderr and only in text mode
    pub fn should_show_status(&self) -> bool {
        !self.quiet && self.output_format == output_formats::TEXT
    }
}

/// Setup output settings based on CLI and config
pub fn setup_output_settings(cli_config: &CliConfig, config: &Config) -> OutputSettings {
    OutputSettings {
        quiet: cli_config.quiet,
        verbose: config.verbose.unwrap_or(false),
        output_format: config.output_format().to_string(),
    }
}

/// Raw selector state from the command line
pub fn criteria_input(cli_config: &CliConfig) -> CriteriaInput {
    CriteriaInput {
        start: cli_config.start.clone(),
        end: cli_config.end.clone(),
        selections: cli_config.filters.clone(),
    }
}

/// Apply the `--topic` shorthand. Only the insights dashboard has topics;
/// a value outside the offered list shows all topics.
pub fn apply_topic(
    criteria: FilterCriteria,
    topic: Option<&str>,
    variant: DatasetVariant,
) -> FilterCriteria {
    match topic {
        Some(topic) if variant == DatasetVariant::Insights => criteria.with_selection(
            insight_columns::TOPIC,
            Selection::from_choices(topic, &filters::TOPICS),
        ),
        Some(topic) => {
            logging::log_warning(&format!(
                "Ignoring topic '{topic}': the {variant} dataset has no topics"
            ));
            criteria
        }
        None => criteria,
    }
}

/// Calendar window for placeholder records: the requested bounds, with
/// missing ends filled from the trailing window ending today.
pub fn placeholder_window(
    criteria: &FilterCriteria,
    today: NaiveDate,
    window_days: Option<u32>,
) -> DateExtent {
    let days = window_days.unwrap_or(trendscope::core::constants::defaults::WINDOW_DAYS);
    let end = criteria.end_date().unwrap_or(today);
    let start = criteria
        .start_date()
        .unwrap_or_else(|| end - Duration::days(i64::from(days)));
    DateExtent::new(start, end)
}

/// Combine the load fallback warning and a recovered date parse failure
pub fn build_notice(outcome: &LoadOutcome, recovered: Option<String>) -> Option<String> {
    let recovered = recovered.map(|e| format!("{e}; showing the default date range."));
    match (outcome.warning.clone(), recovered) {
        (Some(warning), Some(recovered)) => Some(format!("{warning} {recovered}")),
        (warning, recovered) => warning.or(recovered),
    }
}

/// The event sink for this run. Sink failures never stop the dashboard.
pub fn open_event_sink(config: &Config, variant: DatasetVariant) -> Box<dyn EventSink> {
    let Some(ref target) = config.events_path else {
        return Box::new(NullSink);
    };

    if !variant.emits_events() {
        logging::log_warning(&format!(
            "The {variant} dashboard does not send host events; ignoring '{target}'"
        ));
        return Box::new(NullSink);
    }

    match open_sink(target) {
        Ok(sink) => sink,
        Err(e) => {
            logging::log_error(&format!("Could not open event sink '{target}'"), Some(&e));
            Box::new(NullSink)
        }
    }
}

/// Events describing this run, in the order the host would see them
pub fn host_events(
    cli_config: &CliConfig,
    config: &Config,
    snapshot: &DashboardSnapshot,
    criteria: &FilterCriteria,
) -> Vec<OutboundEvent> {
    if !snapshot.variant.emits_events() {
        return Vec::new();
    }

    let payload = FilterPayload::from_criteria(criteria, insight_columns::TOPIC);
    let mut events = vec![OutboundEvent::FilterChanged(payload.clone())];

    if cli_config.create_collection {
        events.push(OutboundEvent::CreateCollection { filters: payload });
    }
    if config.export_path.is_some() {
        events.push(OutboundEvent::ExportRequest {
            format: "csv".to_string(),
        });
    }
    if let Some(ref url) = cli_config.share_url {
        events.push(OutboundEvent::ShareRequest { url: url.clone() });
    }

    events
}
