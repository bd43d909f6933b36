use std::{
    collections::BTreeMap,
    io::{BufRead, Read},
};

use log::{debug, warn};

use crate::error::Result;

#[derive(Debug, Clone, PartialEq)]
pub struct VocabularyEntry<const K: usize> {
    pub sequence: [u8; K],
    pub count: f64,
}

/// The k-mer vocabulary, sorted by sequence.
///
/// The set of sequences is fixed at construction, only the counts change afterwards.
#[derive(Debug, Clone)]
pub struct VocabularyStore<const K: usize> {
    entries: Vec<VocabularyEntry<K>>,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct VocabularyReport {
    pub accepted: usize,
    pub invalid_length: usize,
    pub duplicates: usize,
}

impl<const K: usize> VocabularyStore<K> {
    /// Parses one k-mer per line.
    ///
    /// Surrounding whitespace and double quotes are removed.
    /// Lines of the wrong length and repeated k-mers are reported and skipped.
    /// The characters of a k-mer are not checked against the alphabet.
    pub fn build(
        mut source: impl BufRead,
        max_line_length: usize,
    ) -> Result<(Self, VocabularyReport)> {
        let mut report = VocabularyReport::default();
        let mut sequences = BTreeMap::<[u8; K], usize>::new();
        let mut line = Vec::new();
        let mut line_number = 0;

        loop {
            line.clear();
            // Room for the longest allowed line plus "\r\n".
            let limit = max_line_length as u64 + 2;
            if (&mut source).take(limit).read_until(b'\n', &mut line)? == 0 {
                break;
            }
            line_number += 1;

            let terminated = line.last() == Some(&b'\n');
            let content_length = if terminated {
                line.len() - 1 - usize::from(line.ends_with(b"\r\n"))
            } else {
                line.len()
            };
            if content_length > max_line_length {
                if !terminated {
                    skip_line(&mut source)?;
                }
                warn!(
                    "Invalid k-mer length in file: line {line_number} exceeds the maximum line length {max_line_length}"
                );
                report.invalid_length += 1;
                continue;
            }

            let kmer = trim_kmer(&line);
            if kmer.is_empty() {
                continue;
            }

            let sequence: [u8; K] = match kmer.try_into() {
                Ok(sequence) => sequence,
                Err(_) => {
                    warn!(
                        "Invalid k-mer length in file: '{}' (length: {})",
                        String::from_utf8_lossy(kmer),
                        kmer.len()
                    );
                    report.invalid_length += 1;
                    continue;
                }
            };

            if let Some(first_line_number) = sequences.get(&sequence) {
                warn!(
                    "Duplicate k-mer in file: '{}' (line {line_number}, first seen on line {first_line_number})",
                    String::from_utf8_lossy(&sequence),
                );
                report.duplicates += 1;
            } else {
                sequences.insert(sequence, line_number);
                report.accepted += 1;
            }
        }

        debug!(
            "Loaded {} k-mers of length {} from {line_number} lines",
            report.accepted, K
        );

        let entries = sequences
            .into_keys()
            .map(|sequence| VocabularyEntry {
                sequence,
                count: 0.0,
            })
            .collect();

        Ok((Self { entries }, report))
    }

    #[cfg(test)]
    pub fn from_sequences(sequences: impl IntoIterator<Item = [u8; K]>) -> Self {
        let mut entries: Vec<_> = sequences
            .into_iter()
            .map(|sequence| VocabularyEntry {
                sequence,
                count: 0.0,
            })
            .collect();
        entries.sort_unstable_by(|a, b| a.sequence.cmp(&b.sequence));
        entries.dedup_by(|a, b| a.sequence == b.sequence);
        Self { entries }
    }

    #[cfg(test)]
    pub fn lookup(&self, candidate: &[u8]) -> Option<&VocabularyEntry<K>> {
        self.position(candidate).map(|index| &self.entries[index])
    }

    /// Binary search for an exact match of `candidate`.
    pub fn lookup_mut(&mut self, candidate: &[u8]) -> Option<&mut VocabularyEntry<K>> {
        self.position(candidate).map(move |index| &mut self.entries[index])
    }

    fn position(&self, candidate: &[u8]) -> Option<usize> {
        if candidate.len() != K {
            return None;
        }

        self.entries
            .binary_search_by(|entry| entry.sequence.as_slice().cmp(candidate))
            .ok()
    }

    pub fn entries(&self) -> &[VocabularyEntry<K>] {
        &self.entries
    }

    pub fn entries_mut(&mut self) -> &mut [VocabularyEntry<K>] {
        &mut self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total_count(&self) -> f64 {
        self.entries.iter().map(|entry| entry.count).sum()
    }
}

/// Consumes the rest of the current line including its terminator.
fn skip_line(source: &mut impl BufRead) -> Result<()> {
    loop {
        let buffer = source.fill_buf()?;
        if buffer.is_empty() {
            return Ok(());
        }

        let newline = buffer.iter().position(|character| *character == b'\n');
        let length = buffer.len();
        match newline {
            Some(index) => {
                source.consume(index + 1);
                return Ok(());
            }
            None => source.consume(length),
        }
    }
}

fn trim_kmer(line: &[u8]) -> &[u8] {
    let is_padding = |character: &u8| character.is_ascii_whitespace() || *character == b'"';
    let start = line
        .iter()
        .position(|character| !is_padding(character))
        .unwrap_or(line.len());
    let end = line
        .iter()
        .rposition(|character| !is_padding(character))
        .map_or(start, |index| index + 1);
    &line[start..end]
}
