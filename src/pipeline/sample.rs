use rand::Rng;
use rand::seq::index;

use crate::core::types::Record;

/// Up to `k` records picked uniformly at random, for the text viewer.
pub fn sample(records: &[Record], k: usize) -> Vec<Record> {
    sample_with(records, k, &mut rand::thread_rng())
}

/// [`sample`] driven by a caller-supplied generator.
///
/// Returns `min(k, records.len())` distinct records in their original
/// relative order.
pub fn sample_with<R: Rng + ?Sized>(records: &[Record], k: usize, rng: &mut R) -> Vec<Record> {
    let amount = k.min(records.len());
    if amount == 0 {
        return Vec::new();
    }

    let mut picked = index::sample(rng, records.len(), amount).into_vec();
    picked.sort_unstable();
    picked.into_iter().map(|i| records[i].clone()).collect()
}
