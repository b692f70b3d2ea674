use super::criteria::FilterCriteria;
use crate::core::types::Record;

/// Records satisfying every constraint of `criteria`, borrowed in input order.
pub fn filter_iter<'a>(
    records: &'a [Record],
    criteria: &'a FilterCriteria,
) -> impl Iterator<Item = &'a Record> + 'a {
    records.iter().filter(move |record| criteria.matches(record))
}

/// The ordered subsequence of `records` that satisfies `criteria`.
///
/// The input is never modified, so the same slice can be filtered any
/// number of times with different criteria.
pub fn filter(records: &[Record], criteria: &FilterCriteria) -> Vec<Record> {
    filter_iter(records, criteria).cloned().collect()
}
