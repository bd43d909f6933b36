use log::debug;

use crate::{
    error::{Error, Result},
    vocabulary::VocabularyStore,
};

/// The number of distinct k-mers of length `k` over an alphabet of `alphabet_size` characters.
pub fn normalization_target(alphabet_size: usize, k: usize) -> f64 {
    (alphabet_size as f64).powi(k as i32)
}

/// Rescales the counts in `store` such that they sum up to `alphabet_size^K`.
///
/// Returns the total count before rescaling.
/// If the total count is zero, the counts are left unchanged and [`Error::DegenerateNormalization`] is returned.
pub fn normalize<const K: usize>(
    store: &mut VocabularyStore<K>,
    alphabet_size: usize,
) -> Result<f64> {
    let total = store.total_count();
    if total == 0.0 {
        return Err(Error::DegenerateNormalization);
    }

    let target = normalization_target(alphabet_size, K);
    debug!("Rescaling total count {total} to {target}");

    for entry in store.entries_mut() {
        entry.count = entry.count * target / total;
    }

    Ok(total)
}
