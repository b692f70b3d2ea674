//! Property-based tests for trendscope using proptest
//!
//! These tests generate random record sets and criteria to check the
//! pipeline invariants across a wide range of inputs.

use chrono::{Duration, NaiveDate};
use proptest::prelude::*;
use trendscope::pipeline::{
    Dimension, FilterCriteria, GroupKey, KeySpec, aggregate_by, filter, sample, top_n,
};
use trendscope::Record;

const COUNTRIES: [&str; 4] = ["US", "FR", "DE", "JP"];
const TYPES: [&str; 3] = ["Call", "Visit", "Email"];

fn base_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
}

/// Records spread over the first 120 days of 2024, some undated and some
/// with missing categorical values
fn record_strategy() -> impl Strategy<Value = Record> {
    (
        prop::option::weighted(0.9, 0..120i64),
        prop::option::weighted(0.85, 0..COUNTRIES.len()),
        prop::option::weighted(0.85, 0..TYPES.len()),
    )
        .prop_map(|(day, country, kind)| {
            let mut record = Record::new(day.map(|d| base_date() + Duration::days(d)));
            if let Some(i) = country {
                record.set_field("country", COUNTRIES[i]);
            }
            if let Some(i) = kind {
                record.set_field("type", TYPES[i]);
            }
            record
        })
}

fn records_strategy() -> impl Strategy<Value = Vec<Record>> {
    prop::collection::vec(record_strategy(), 0..60)
}

fn dimension_strategy() -> impl Strategy<Value = Dimension> {
    prop_oneof![
        Just(Dimension::Week),
        Just(Dimension::Month),
        Just(Dimension::field("country")),
        Just(Dimension::field("type")),
    ]
}

fn selection_strategy() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just("All"), Just("US"), Just("FR"), Just("Atlantis")]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn test_adjacent_ranges_reconstruct_full_span(
        records in records_strategy(),
        split in 0..119i64,
        country in selection_strategy(),
    ) {
        let start = base_date();
        let end = base_date() + Duration::days(119);
        let mid = base_date() + Duration::days(split);

        let full = filter(&records, &FilterCriteria::new().with_date_range(start, end).with_field("country", country));
        let left = filter(&records, &FilterCriteria::new().with_date_range(start, mid).with_field("country", country));
        let right = filter(
            &records,
            &FilterCriteria::new()
                .with_date_range(mid + Duration::days(1), end)
                .with_field("country", country),
        );

        prop_assert_eq!(left.len() + right.len(), full.len());
        for record in &full {
            prop_assert!(left.contains(record) || right.contains(record));
        }
    }

    #[test]
    fn test_single_dimension_counts_sum_to_len(
        records in records_strategy(),
        dimension in dimension_strategy(),
        country in selection_strategy(),
    ) {
        let filtered = filter(&records, &FilterCriteria::new().with_field("country", country));
        let view = aggregate_by(&filtered, &KeySpec::single(dimension));
        prop_assert_eq!(view.total(), filtered.len());
        prop_assert!(view.rows.iter().all(|row| row.count > 0));
    }

    #[test]
    fn test_pair_counts_sum_to_len(records in records_strategy()) {
        let view = aggregate_by(&records, &KeySpec::pair(Dimension::Month, Dimension::field("type")));
        prop_assert_eq!(view.total(), records.len());
        // Rows are strictly ordered by key, so no group repeats
        prop_assert!(view.rows.windows(2).all(|w| w[0].keys < w[1].keys));
    }

    #[test]
    fn test_top_n_is_subset_of_aggregate(
        records in records_strategy(),
        dimension in dimension_strategy(),
        n in 0..12usize,
    ) {
        let all = aggregate_by(&records, &KeySpec::single(dimension.clone()));
        let named = all.rows.iter().filter(|row| row.keys[0] != GroupKey::Missing).count();
        let top = top_n(&records, &dimension, n);

        prop_assert_eq!(top.len(), n.min(named));
        for row in &top.rows {
            prop_assert!(all.rows.contains(row));
        }
        prop_assert!(top.rows.windows(2).all(|w| w[0].count >= w[1].count));
        if n >= named {
            prop_assert_eq!(top.len(), named);
        }
    }

    #[test]
    fn test_constraint_order_does_not_matter(
        records in records_strategy(),
        country in selection_strategy(),
        kind in prop_oneof![Just("All"), Just("Call"), Just("Visit"), Just("Fax")],
        from in 0..120i64,
        span in 0..120i64,
    ) {
        let start = base_date() + Duration::days(from);
        let end = start + Duration::days(span);

        let forward = FilterCriteria::new()
            .with_date_range(start, end)
            .with_field("country", country)
            .with_field("type", kind);
        let backward = FilterCriteria::new()
            .with_field("type", kind)
            .with_field("country", country)
            .with_date_range(start, end);

        let expected: Vec<Record> = records
            .iter()
            .filter(|r| r.date.is_some_and(|d| start <= d && d <= end))
            .filter(|r| country == "All" || r.get("country") == Some(country))
            .filter(|r| kind == "All" || r.get("type") == Some(kind))
            .cloned()
            .collect();

        prop_assert_eq!(filter(&records, &forward), expected.clone());
        prop_assert_eq!(filter(&records, &backward), expected);
    }

    #[test]
    fn test_filter_is_idempotent(
        records in records_strategy(),
        from in 0..120i64,
        span in 0..120i64,
        country in selection_strategy(),
    ) {
        let start = base_date() + Duration::days(from);
        let criteria = FilterCriteria::new()
            .with_date_range(start, start + Duration::days(span))
            .with_field("country", country);

        let once = filter(&records, &criteria);
        let twice = filter(&once, &criteria);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn test_sample_size_is_bounded(records in records_strategy(), k in 0..80usize) {
        let picked = sample(&records, k);
        prop_assert_eq!(picked.len(), k.min(records.len()));
        for record in &picked {
            prop_assert!(records.contains(record));
        }
    }
}

#[test]
fn test_three_record_scenario() {
    let date = |s: &str| NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap();
    let records = vec![
        Record::new(Some(date("2024-01-05"))).with_field("country", "US").with_field("type", "A"),
        Record::new(Some(date("2024-02-10"))).with_field("country", "US").with_field("type", "B"),
        Record::new(Some(date("2024-02-20"))).with_field("country", "FR").with_field("type", "A"),
    ];
    let criteria = FilterCriteria::new()
        .with_date_range(date("2024-02-01"), date("2024-02-28"))
        .with_field("country", "All")
        .with_field("type", "All");

    let filtered = filter(&records, &criteria);
    assert_eq!(filtered, records[1..].to_vec());

    let view = aggregate_by(&filtered, &KeySpec::pair(Dimension::Month, Dimension::field("country")));
    let rows: Vec<(String, String, usize)> = view
        .rows
        .iter()
        .map(|r| (r.keys[0].to_string(), r.keys[1].to_string(), r.count))
        .collect();
    assert_eq!(
        rows,
        vec![
            ("2024-02".to_string(), "FR".to_string(), 1),
            ("2024-02".to_string(), "US".to_string(), 1),
        ]
    );
}

#[test]
fn test_empty_input_everywhere() {
    let criteria = FilterCriteria::new().with_field("country", "US");
    assert!(filter(&[], &criteria).is_empty());
    assert!(aggregate_by(&[], &KeySpec::single(Dimension::Week)).is_empty());
    assert!(top_n(&[], &Dimension::field("country"), 5).is_empty());
    assert!(sample(&[], 5).is_empty());
}
