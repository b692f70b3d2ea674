//! Placeholder insight records used when the real dataset is unavailable.
//!
//! The content is arbitrary; only its shape (the insights schema) and its
//! determinism for a given seed matter.

use chrono::Duration;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use super::Dataset;
use super::variant::{DatasetVariant, insight_columns};
use crate::core::constants::filters;
use crate::core::types::{DateExtent, Record};

const REGIONS: [&str; 4] = ["North America", "Europe", "Asia", "Latin America"];
const COUNTRIES: [&str; 8] = [
    "United States",
    "Canada",
    "Germany",
    "France",
    "China",
    "Japan",
    "Brazil",
    "Mexico",
];
const STAGES: [&str; 3] = ["Early", "Mid", "Late"];

/// Generate `rows` insight records dated uniformly inside `window`.
pub fn generate_insights(rows: usize, window: DateExtent, seed: u64) -> Dataset {
    let mut rng = StdRng::seed_from_u64(seed);
    let (start, end) = if window.start <= window.end {
        (window.start, window.end)
    } else {
        (window.end, window.start)
    };
    let span = (end - start).num_days();
    // Every topic except the "All" sentinel
    let topics: Vec<&str> = filters::TOPICS
        .iter()
        .copied()
        .filter(|t| *t != filters::ALL)
        .collect();

    let records = (1..=rows)
        .map(|id| {
            let date = start + Duration::days(rng.gen_range(0..=span));
            Record::new(Some(date))
                .with_field(insight_columns::ID, id.to_string())
                .with_field(insight_columns::CREATED_AT, date.format("%Y-%m-%d").to_string())
                .with_field(insight_columns::REGION, pick(&mut rng, &REGIONS))
                .with_field(insight_columns::COUNTRY, pick(&mut rng, &COUNTRIES))
                .with_field(insight_columns::STAGE, pick(&mut rng, &STAGES))
                .with_field(insight_columns::TOPIC, pick(&mut rng, &topics))
        })
        .collect();

    let variant = DatasetVariant::Insights;
    Dataset::new(
        variant.columns().iter().map(|c| c.to_string()).collect(),
        variant.date_column(),
        records,
    )
}

fn pick<'a, R: Rng>(rng: &mut R, choices: &[&'a str]) -> &'a str {
    choices.choose(rng).copied().unwrap_or_default()
}
