use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::constants::{defaults, variants};
use crate::core::error::TrendscopeError;
use crate::pipeline::DateRangePolicy;

/// Column names of the insights dataset
pub mod insight_columns {
    pub const ID: &str = "id";
    pub const CREATED_AT: &str = "created_at";
    pub const REGION: &str = "region";
    pub const COUNTRY: &str = "country";
    pub const STAGE: &str = "stage";
    pub const TOPIC: &str = "topic";

    pub const ALL: [&str; 6] = [ID, CREATED_AT, REGION, COUNTRY, STAGE, TOPIC];
}

/// Column names of the interactions dataset
pub mod interaction_columns {
    pub const DATE: &str = "date";
    pub const REGION: &str = "region";
    pub const COUNTRY: &str = "country";
    pub const INTERACTION_TYPE: &str = "interaction_type";
    pub const STAKEHOLDER_TYPE: &str = "stakeholder_type";
    pub const STAKEHOLDER_NAMES: &str = "stakeholder_names";
    pub const MSL_NAMES: &str = "msl_names";
    pub const TEXT: &str = "text";

    pub const ALL: [&str; 8] = [
        DATE,
        REGION,
        COUNTRY,
        INTERACTION_TYPE,
        STAKEHOLDER_TYPE,
        STAKEHOLDER_NAMES,
        MSL_NAMES,
        TEXT,
    ];
}

/// What to do when the dataset file cannot be loaded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadFallback {
    /// Substitute a seeded placeholder dataset and warn
    Synthetic,
    /// Continue with no records and report an error
    Empty,
}

/// The two dataset shapes the dashboards understand.
///
/// Each variant fixes its column schema, which column carries the
/// occurrence date, how missing date bounds default, and what happens when
/// the input file is unusable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatasetVariant {
    #[default]
    Insights,
    Interactions,
}

impl DatasetVariant {
    pub fn name(&self) -> &'static str {
        match self {
            DatasetVariant::Insights => variants::INSIGHTS,
            DatasetVariant::Interactions => variants::INTERACTIONS,
        }
    }

    /// Dashboard title shown above the views
    pub fn title(&self) -> &'static str {
        match self {
            DatasetVariant::Insights => "Insight Trends Dashboard",
            DatasetVariant::Interactions => "Field Interaction Dashboard",
        }
    }

    pub fn columns(&self) -> &'static [&'static str] {
        match self {
            DatasetVariant::Insights => &insight_columns::ALL,
            DatasetVariant::Interactions => &interaction_columns::ALL,
        }
    }

    pub fn date_column(&self) -> &'static str {
        match self {
            DatasetVariant::Insights => insight_columns::CREATED_AT,
            DatasetVariant::Interactions => interaction_columns::DATE,
        }
    }

    /// Default date bounds applied when the caller gives none or gives garbage
    pub fn default_range_policy(&self, window_days: Option<u32>) -> DateRangePolicy {
        match self {
            DatasetVariant::Insights => {
                DateRangePolicy::TrailingDays(window_days.unwrap_or(defaults::WINDOW_DAYS))
            }
            DatasetVariant::Interactions => DateRangePolicy::DataExtent,
        }
    }

    pub fn load_fallback(&self) -> LoadFallback {
        match self {
            DatasetVariant::Insights => LoadFallback::Synthetic,
            DatasetVariant::Interactions => LoadFallback::Empty,
        }
    }

    /// Whether this dashboard notifies a hosting page about user actions
    pub fn emits_events(&self) -> bool {
        matches!(self, DatasetVariant::Insights)
    }
}

impl fmt::Display for DatasetVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DatasetVariant {
    type Err = TrendscopeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            variants::INSIGHTS => Ok(DatasetVariant::Insights),
            variants::INTERACTIONS => Ok(DatasetVariant::Interactions),
            other => Err(TrendscopeError::InvalidArgument(format!(
                "Unknown dataset variant '{other}'. Expected one of: {}.",
                variants::ALL.join(", ")
            ))),
        }
    }
}
