use chrono::NaiveDate;
use rand::Rng;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::core::types::Record;
use crate::data::variant::{insight_columns, interaction_columns};
use crate::data::{Dataset, DatasetVariant};
use crate::pipeline::{
    AggregateView, Dimension, FilterCriteria, KeySpec, aggregate_by, filter, sample_with, top_n,
};
use crate::reporting::logging::log_view;

/// How one view derives its groups from the filtered records
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewKind {
    /// Every non-empty group, ordered by key
    Grouped(KeySpec),
    /// The `n` largest groups of one dimension, largest first
    Top { dimension: Dimension, n: usize },
}

/// A titled view of the dashboard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewSpec {
    pub title: &'static str,
    pub kind: ViewKind,
}

impl ViewSpec {
    pub fn grouped(title: &'static str, key_spec: impl Into<KeySpec>) -> Self {
        Self {
            title,
            kind: ViewKind::Grouped(key_spec.into()),
        }
    }

    pub fn top(title: &'static str, dimension: Dimension, n: usize) -> Self {
        Self {
            title,
            kind: ViewKind::Top { dimension, n },
        }
    }

    pub fn compute(&self, records: &[Record]) -> AggregateView {
        match &self.kind {
            ViewKind::Grouped(key_spec) => aggregate_by(records, key_spec),
            ViewKind::Top { dimension, n } => top_n(records, dimension, *n),
        }
    }
}

/// The views a dashboard shows, in display order, plus the size of the
/// record sample when the dashboard has a text viewer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardPlan {
    pub views: Vec<ViewSpec>,
    pub sample_size: Option<usize>,
}

impl DashboardPlan {
    pub fn for_variant(variant: DatasetVariant, top: usize, sample_size: usize) -> Self {
        match variant {
            DatasetVariant::Insights => Self {
                views: vec![
                    ViewSpec::grouped(
                        "Weekly insight count by region",
                        KeySpec::pair(Dimension::Week, Dimension::field(insight_columns::REGION)),
                    ),
                    ViewSpec::grouped(
                        "Insight count by country",
                        Dimension::field(insight_columns::COUNTRY),
                    ),
                    ViewSpec::grouped(
                        "Insights by stage",
                        Dimension::field(insight_columns::STAGE),
                    ),
                ],
                sample_size: None,
            },
            DatasetVariant::Interactions => Self {
                views: vec![
                    ViewSpec::grouped(
                        "Monthly interactions by type",
                        KeySpec::pair(
                            Dimension::Month,
                            Dimension::field(interaction_columns::INTERACTION_TYPE),
                        ),
                    ),
                    ViewSpec::grouped(
                        "Interactions by country",
                        Dimension::field(interaction_columns::COUNTRY),
                    ),
                    ViewSpec::grouped(
                        "Stakeholder type mix",
                        Dimension::field(interaction_columns::STAKEHOLDER_TYPE),
                    ),
                    ViewSpec::top(
                        "Top MSLs",
                        Dimension::field(interaction_columns::MSL_NAMES),
                        top,
                    ),
                ],
                sample_size: Some(sample_size),
            },
        }
    }
}

/// A computed view with its title
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NamedView {
    pub title: String,
    #[serde(flatten)]
    pub view: AggregateView,
}

/// Everything a renderer needs for one dashboard refresh
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSnapshot {
    pub variant: DatasetVariant,
    pub title: String,
    /// Shown above the views when the data is not what the user asked for
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    /// Active categorical constraints, `All` included
    pub filters: BTreeMap<String, String>,
    pub total_records: usize,
    pub filtered_records: usize,
    #[serde(skip)]
    pub records: Vec<Record>,
    pub views: Vec<NamedView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample: Option<Vec<Record>>,
}

impl DashboardSnapshot {
    pub fn with_notice(mut self, notice: Option<String>) -> Self {
        self.notice = notice;
        self
    }

    /// True when filtering left nothing to show
    pub fn is_empty(&self) -> bool {
        self.filtered_records == 0
    }
}

/// Filter `dataset` once and compute every view of `plan` over the result.
pub fn build_snapshot<R: Rng + ?Sized>(
    dataset: &Dataset,
    criteria: &FilterCriteria,
    plan: &DashboardPlan,
    variant: DatasetVariant,
    rng: &mut R,
) -> DashboardSnapshot {
    let records = filter(dataset.records(), criteria);

    let views = plan
        .views
        .iter()
        .map(|spec| {
            let view = spec.compute(&records);
            log_view(spec.title, &view);
            NamedView {
                title: spec.title.to_string(),
                view,
            }
        })
        .collect();

    let sample = plan.sample_size.map(|k| sample_with(&records, k, rng));

    DashboardSnapshot {
        variant,
        title: variant.title().to_string(),
        notice: None,
        start_date: criteria.start_date(),
        end_date: criteria.end_date(),
        filters: criteria
            .selections()
            .map(|(field, selection)| (field.to_string(), selection.to_string()))
            .collect(),
        total_records: dataset.len(),
        filtered_records: records.len(),
        records,
        views,
        sample,
    }
}
