use std::io::BufRead;

use log::info;

use crate::{error::Result, read_stream::SequenceReader, vocabulary::VocabularyStore};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunStatistics {
    pub windows_matched: usize,
    pub windows_evaluated: usize,
    pub reads_accepted: usize,
    pub reads_rejected: usize,
    /// The length of the first accepted read. Later reads may differ.
    pub observed_read_length: Option<usize>,
}

/// Counts every window of length `K` in `record` that is in the vocabulary.
///
/// Overlapping occurrences are counted once per position.
pub fn count<const K: usize>(
    record: &[u8],
    store: &mut VocabularyStore<K>,
    statistics: &mut RunStatistics,
) {
    for window in record.windows(K) {
        statistics.windows_evaluated += 1;
        if let Some(entry) = store.lookup_mut(window) {
            entry.count += 1.0;
            statistics.windows_matched += 1;
        }
    }
}

/// Counts the vocabulary in all reads of `reads`.
///
/// If an error is returned, the counts accumulated so far remain in `store`.
pub fn count_reads<const K: usize>(
    mut reads: SequenceReader<impl BufRead>,
    store: &mut VocabularyStore<K>,
) -> Result<RunStatistics> {
    while let Some(record) = reads.next() {
        let record = record?;
        count(&record, store, reads.statistics_mut());
    }

    let statistics = reads.into_statistics();
    info!(
        "Accepted {} reads, rejected {} reads containing N",
        statistics.reads_accepted, statistics.reads_rejected
    );
    if let Some(read_length) = statistics.observed_read_length {
        info!("Read length (first read): {read_length}");
    }
    info!(
        "Matched {} of {} windows",
        statistics.windows_matched, statistics.windows_evaluated
    );

    Ok(statistics)
}
