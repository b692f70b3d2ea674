/// Application-wide constants to avoid magic values throughout the codebase.
///
/// This module centralizes the literal values shared between the pipeline,
/// the loaders, the configuration layer and the CLI.
/// Output format constants
pub mod output_formats {
    /// Text output format - colorful output with one section per view
    pub const TEXT: &str = "text";
    /// JSON output format - structured output for automation
    pub const JSON: &str = "json";
    /// Minimal output format - tab-separated rows without colors
    pub const MINIMAL: &str = "minimal";

    /// Default output format
    pub const DEFAULT: &str = TEXT;

    /// All valid output formats
    pub const ALL: [&str; 3] = [TEXT, JSON, MINIMAL];
}

/// Dataset variant identifiers
pub mod variants {
    /// Insight dataset (created_at, region, country, stage, topic)
    pub const INSIGHTS: &str = "insights";
    /// Interaction dataset (date, region, country, interaction_type, ...)
    pub const INTERACTIONS: &str = "interactions";

    /// Default variant
    pub const DEFAULT: &str = INSIGHTS;

    /// All valid variants
    pub const ALL: [&str; 2] = [INSIGHTS, INTERACTIONS];
}

/// Filter constants
pub mod filters {
    /// Categorical selection meaning "no constraint on this field"
    pub const ALL: &str = "All";

    /// Date format used for filter bounds and event payloads
    pub const DATE_FORMAT: &str = "%Y-%m-%d";

    /// Topic choices offered by the insights dashboard
    pub const TOPICS: [&str; 7] = [
        "Safety",
        "Efficacy",
        "Market Access",
        "Competitive Landscape",
        "Unmet Need",
        "Treatment Patterns",
        ALL,
    ];
}

/// Default configuration values
pub mod defaults {
    /// Trailing window used by the insights variant when no dates are given
    pub const WINDOW_DAYS: u32 = 90;
    /// Number of records drawn for the text sample viewer
    pub const SAMPLE_SIZE: usize = 5;
    /// Number of entities kept by top-N views
    pub const TOP_N: usize = 10;
    /// Seed for the synthetic placeholder dataset
    pub const SEED: u64 = 42;
    /// Rows generated for the synthetic placeholder dataset
    pub const SYNTHETIC_ROWS: usize = 100;
    /// Field delimiter for input and export
    pub const DELIMITER: char = ',';
    /// Config file name searched in standard locations
    pub const CONFIG_FILE_NAME: &str = ".trendscope.toml";
}

/// Validation limits for configuration values
pub mod limits {
    /// Largest accepted trailing window in days (10 years)
    pub const MAX_WINDOW_DAYS: u32 = 3650;
    /// Largest accepted sample size
    pub const MAX_SAMPLE_SIZE: usize = 1000;
    /// Largest accepted top-N
    pub const MAX_TOP_N: usize = 1000;
    /// Largest accepted synthetic dataset size
    pub const MAX_SYNTHETIC_ROWS: usize = 100_000;
}

/// Display and formatting constants
pub mod display {
    /// Label for a group whose key value is missing
    pub const MISSING_LABEL: &str = "(missing)";
    /// Emoji for views with data
    pub const CHART_EMOJI: &str = "📊";
    /// Emoji for warnings (fallback data, empty results)
    pub const WARNING_EMOJI: &str = "⚠️";
    /// Emoji for the text sample section
    pub const SAMPLE_EMOJI: &str = "📝";
    /// Width of the widest bar in text output
    pub const BAR_WIDTH: usize = 30;
    /// Minimal-output marker for a view with no rows
    pub const NO_DATA_LABEL: &str = "no data";
    /// Minimal-output prefix of the notice line
    pub const NOTICE_LABEL: &str = "notice";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_formats_constants() {
        assert_eq!(output_formats::TEXT, "text");
        assert_eq!(output_formats::JSON, "json");
        assert_eq!(output_formats::MINIMAL, "minimal");
        assert_eq!(output_formats::DEFAULT, "text");
        assert_eq!(output_formats::ALL.len(), 3);
    }

    #[test]
    fn test_variant_constants() {
        assert_eq!(variants::DEFAULT, variants::INSIGHTS);
        assert!(variants::ALL.contains(&"interactions"));
    }

    #[test]
    fn test_topics_end_with_sentinel() {
        assert_eq!(filters::TOPICS.last(), Some(&filters::ALL));
        assert_eq!(filters::TOPICS.len(), 7);
    }

    #[test]
    fn test_default_constants() {
        assert_eq!(defaults::WINDOW_DAYS, 90);
        assert_eq!(defaults::SYNTHETIC_ROWS, 100);
        assert!(defaults::SAMPLE_SIZE <= limits::MAX_SAMPLE_SIZE);
        assert!(defaults::TOP_N <= limits::MAX_TOP_N);
    }
}
