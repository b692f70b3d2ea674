// Command-line interface definitions and parsing for trendscope

use crate::config::CliConfig;
use crate::core::constants::{limits, output_formats, variants};
use crate::core::error::{Result, TrendscopeError};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Dataset file (delimited text with a header row)
    pub dataset: Option<String>,

    // Dataset
    /// Dataset shape (default: insights)
    #[arg(long, value_name = "VARIANT", value_parser = variants::ALL, help_heading = "Dataset")]
    pub variant: Option<String>,

    /// Seed for placeholder data when the dataset cannot be loaded (default: 42)
    #[arg(long, value_name = "SEED", help_heading = "Dataset")]
    pub seed: Option<u64>,

    // Filters
    /// First day to include, YYYY-MM-DD
    #[arg(long, value_name = "DATE", help_heading = "Filters")]
    pub start: Option<String>,

    /// Last day to include, YYYY-MM-DD
    #[arg(long, value_name = "DATE", help_heading = "Filters")]
    pub end: Option<String>,

    /// Keep records whose FIELD equals VALUE ("All" for no constraint)
    #[arg(long = "filter", value_name = "FIELD=VALUE", help_heading = "Filters")]
    pub filters: Vec<String>,

    /// Insight topic (Safety, Efficacy, Market Access, ...)
    #[arg(long, value_name = "TOPIC", help_heading = "Filters")]
    pub topic: Option<String>,

    // Views
    /// Records shown in the text sample (default: 5)
    #[arg(long, value_name = "COUNT", help_heading = "Views")]
    pub sample: Option<usize>,

    /// Entities shown in top-N views (default: 10)
    #[arg(long, value_name = "COUNT", help_heading = "Views")]
    pub top: Option<usize>,

    // Output & Verbosity
    /// Suppress warnings and status messages
    #[arg(short = 'q', long, help_heading = "Output & Verbosity")]
    pub quiet: bool,

    /// Enable verbose logging
    #[arg(short = 'v', long, help_heading = "Output & Verbosity")]
    pub verbose: bool,

    /// Output format
    #[arg(long, value_name = "FORMAT", value_parser = output_formats::ALL, help_heading = "Output & Verbosity")]
    pub format: Option<String>,

    /// Write the filtered records as CSV
    #[arg(long, value_name = "PATH", help_heading = "Output & Verbosity")]
    pub export: Option<String>,

    // Host Events
    /// Send events as JSON lines to a file, or "-" for stdout
    #[arg(long, value_name = "PATH", help_heading = "Host Events")]
    pub events: Option<String>,

    /// Ask the host to create a collection from the current filters
    #[arg(long, help_heading = "Host Events")]
    pub create_collection: bool,

    /// Ask the host to share this URL
    #[arg(long, value_name = "URL", help_heading = "Host Events")]
    pub share: Option<String>,

    // Configuration
    /// Use specific config file
    #[arg(long, value_name = "FILE", help_heading = "Configuration")]
    pub config: Option<String>,

    /// Ignore config files
    #[arg(long, help_heading = "Configuration")]
    pub no_config: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate shell completions
    #[command(name = "completion-generate", arg_required_else_help = true)]
    CompletionGenerate {
        /// The shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Split a `FIELD=VALUE` filter argument.
pub fn parse_filter_arg(arg: &str) -> Result<(String, String)> {
    let (field, value) = arg.split_once('=').ok_or_else(|| {
        TrendscopeError::InvalidArgument(format!(
            "Filter '{arg}' must have the form FIELD=VALUE."
        ))
    })?;

    let field = field.trim();
    if field.is_empty() {
        return Err(TrendscopeError::InvalidArgument(format!(
            "Filter '{arg}' has an empty field name."
        )));
    }

    Ok((field.to_string(), value.trim().to_string()))
}

/// Convert derive-based CLI arguments to a CliConfig structure
pub fn cli_to_config(cli: &Cli) -> Result<CliConfig> {
    let mut cli_config = CliConfig {
        data_path: cli.dataset.clone(),
        variant: cli.variant.clone(),
        ..Default::default()
    };

    // Filters
    cli_config.start = cli.start.clone();
    cli_config.end = cli.end.clone();
    cli_config.filters = cli
        .filters
        .iter()
        .map(|arg| parse_filter_arg(arg))
        .collect::<Result<_>>()?;
    cli_config.topic = cli.topic.clone();

    // Views
    if let Some(sample) = cli.sample {
        if sample > limits::MAX_SAMPLE_SIZE {
            return Err(TrendscopeError::InvalidArgument(format!(
                "Sample size of {sample} is too large. Expected at most {}.",
                limits::MAX_SAMPLE_SIZE
            )));
        }
        cli_config.sample_size = Some(sample);
    }
    if let Some(top) = cli.top {
        if top == 0 {
            return Err(TrendscopeError::InvalidArgument(
                "Top-N cannot be 0. Expected a positive integer.".to_string(),
            ));
        }
        cli_config.top_n = Some(top);
    }
    cli_config.seed = cli.seed;

    // Output & format
    cli_config.quiet = cli.quiet;
    cli_config.verbose = cli.verbose;
    cli_config.output_format = cli.format.clone();
    cli_config.export_path = cli.export.clone();

    // Host events
    cli_config.events_path = cli.events.clone();
    cli_config.create_collection = cli.create_collection;
    cli_config.share_url = cli.share.clone();

    // Configuration
    cli_config.config_file = cli.config.clone();
    cli_config.no_config = cli.no_config;

    Ok(cli_config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        let mut full = vec!["trendscope"];
        full.extend_from_slice(args);
        Cli::try_parse_from(full).unwrap()
    }

    #[test]
    fn test_cli_minimal() -> Result<()> {
        let cli = parse(&["insights.csv"]);
        let config = cli_to_config(&cli)?;

        assert_eq!(config.data_path, Some("insights.csv".to_string()));
        assert_eq!(config.variant, None);
        assert_eq!(config.output_format, None);
        assert!(config.filters.is_empty());
        assert!(!config.create_collection);
        Ok(())
    }

    #[test]
    fn test_cli_all_options() -> Result<()> {
        let cli = parse(&[
            "data.csv",
            "--variant",
            "interactions",
            "--start",
            "2024-01-01",
            "--end",
            "2024-03-31",
            "--filter",
            "country=France",
            "--filter",
            "interaction_type = Call",
            "--sample",
            "3",
            "--top",
            "5",
            "--seed",
            "7",
            "--format",
            "json",
            "--export",
            "out.csv",
            "--events",
            "-",
            "--create-collection",
            "--share",
            "https://dash.example/view",
            "--no-config",
            "-v",
        ]);
        let config = cli_to_config(&cli)?;

        assert_eq!(config.variant, Some("interactions".to_string()));
        assert_eq!(config.start, Some("2024-01-01".to_string()));
        assert_eq!(config.end, Some("2024-03-31".to_string()));
        assert_eq!(
            config.filters,
            vec![
                ("country".to_string(), "France".to_string()),
                ("interaction_type".to_string(), "Call".to_string()),
            ]
        );
        assert_eq!(config.sample_size, Some(3));
        assert_eq!(config.top_n, Some(5));
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.output_format, Some("json".to_string()));
        assert_eq!(config.export_path, Some("out.csv".to_string()));
        assert_eq!(config.events_path, Some("-".to_string()));
        assert!(config.create_collection);
        assert_eq!(config.share_url, Some("https://dash.example/view".to_string()));
        assert!(config.no_config);
        assert!(config.verbose);
        Ok(())
    }

    #[test]
    fn test_cli_rejects_unknown_variant_and_format() {
        assert!(Cli::try_parse_from(["trendscope", "--variant", "surveys"]).is_err());
        assert!(Cli::try_parse_from(["trendscope", "--format", "xml"]).is_err());
    }

    #[test]
    fn test_cli_completion_subcommand() {
        let cli = parse(&["completion-generate", "bash"]);
        assert!(matches!(
            cli.command,
            Some(Commands::CompletionGenerate {
                shell: clap_complete::Shell::Bash
            })
        ));
    }

    #[test]
    fn test_parse_filter_arg() {
        assert_eq!(
            parse_filter_arg("topic=Market Access").unwrap(),
            ("topic".to_string(), "Market Access".to_string())
        );
        // Only the first '=' splits
        assert_eq!(
            parse_filter_arg("text=a=b").unwrap(),
            ("text".to_string(), "a=b".to_string())
        );
        assert_eq!(
            parse_filter_arg("country=").unwrap(),
            ("country".to_string(), String::new())
        );
        assert!(parse_filter_arg("country").is_err());
        assert!(parse_filter_arg("=France").is_err());
    }

    #[test]
    fn test_cli_invalid_view_sizes() {
        let cli = parse(&["--top", "0"]);
        assert!(cli_to_config(&cli).is_err());

        let cli = parse(&["--sample", "100000"]);
        assert!(cli_to_config(&cli).is_err());
    }

    #[test]
    fn test_cli_unknown_topic_is_kept_for_resolution() -> Result<()> {
        let cli = parse(&["--topic", "Pricing"]);
        let config = cli_to_config(&cli)?;
        assert_eq!(config.topic, Some("Pricing".to_string()));
        Ok(())
    }
}
