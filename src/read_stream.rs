use std::{
    fs::File,
    io::{BufRead, BufReader, Read},
    path::Path,
};

use flate2::read::MultiGzDecoder;
use log::{debug, trace};

use crate::{
    error::{Error, Result},
    window_counter::RunStatistics,
};

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Opens a read file, decompressing it if it starts with the gzip magic bytes.
pub fn open_reads(path: impl AsRef<Path>) -> Result<Box<dyn BufRead>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| Error::OpenReads {
        path: path.to_owned(),
        source,
    })?;
    let mut file = BufReader::new(file);

    let is_gzip = file
        .fill_buf()
        .map_err(|source| Error::OpenReads {
            path: path.to_owned(),
            source,
        })?
        .starts_with(&GZIP_MAGIC);

    if is_gzip {
        debug!("Reading {path:?} as gzip");
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(file))))
    } else {
        debug!("Reading {path:?} as plain text");
        Ok(Box::new(file))
    }
}

/// Yields the sequence line of each four-line FASTQ record.
///
/// Sequences containing `N` are skipped. The other three lines of a record are not inspected.
pub struct SequenceReader<Source> {
    source: Source,
    line: Vec<u8>,
    line_number: usize,
    max_line_length: usize,
    statistics: RunStatistics,
}

impl<Source: BufRead> SequenceReader<Source> {
    pub fn new(source: Source, max_line_length: usize) -> Self {
        Self {
            source,
            line: Vec::new(),
            line_number: 0,
            max_line_length,
            statistics: RunStatistics::default(),
        }
    }

    pub fn statistics_mut(&mut self) -> &mut RunStatistics {
        &mut self.statistics
    }

    pub fn into_statistics(self) -> RunStatistics {
        self.statistics
    }

    /// Reads the next line into `self.line` without its terminator.
    /// Returns `false` at the end of the source.
    fn read_line(&mut self) -> Result<bool> {
        self.line.clear();
        // Room for the longest allowed line plus "\r\n".
        let limit = self.max_line_length as u64 + 2;
        if (&mut self.source)
            .take(limit)
            .read_until(b'\n', &mut self.line)?
            == 0
        {
            return Ok(false);
        }
        self.line_number += 1;

        if self.line.last() == Some(&b'\n') {
            self.line.pop();
            if self.line.last() == Some(&b'\r') {
                self.line.pop();
            }
        }

        if self.line.len() > self.max_line_length {
            return Err(Error::LineTooLong {
                line_number: self.line_number,
                length: self.line.len(),
                maximum: self.max_line_length,
            });
        }

        Ok(true)
    }

    fn next_sequence(&mut self) -> Result<Option<Vec<u8>>> {
        loop {
            if !self.read_line()? {
                return Ok(None);
            }

            if self.line_number % 4 != 2 {
                continue;
            }

            if self.line.contains(&b'N') {
                trace!("Skipping read on line {} containing N", self.line_number);
                self.statistics.reads_rejected += 1;
                continue;
            }

            self.statistics.reads_accepted += 1;
            if self.statistics.observed_read_length.is_none() {
                self.statistics.observed_read_length = Some(self.line.len());
            }

            return Ok(Some(self.line.clone()));
        }
    }
}

impl<Source: BufRead> Iterator for SequenceReader<Source> {
    type Item = Result<Vec<u8>>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_sequence().transpose()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use flate2::{write::GzEncoder, Compression};
    use tempfile::NamedTempFile;

    use super::{open_reads, SequenceReader};
    use crate::error::Error;

    const FASTQ: &str = "@r1\nACGTACGT\n+\nIIIIIIII\n@r2\nACGNACGT\n+\nIIIIIIII\n@r3\nTTT\n+\nIII\n";

    fn sequences(input: &str) -> (Vec<Vec<u8>>, super::RunStatistics) {
        let mut reader = SequenceReader::new(input.as_bytes(), 1024);
        let sequences = reader.by_ref().collect::<Result<Vec<_>, _>>().unwrap();
        (sequences, reader.into_statistics())
    }

    #[test]
    fn reads_second_line_of_each_record() {
        let (sequences, statistics) = sequences(FASTQ);
        assert_eq!(sequences, [b"ACGTACGT".to_vec(), b"TTT".to_vec()]);
        assert_eq!(statistics.reads_accepted, 2);
        assert_eq!(statistics.reads_rejected, 1);
        assert_eq!(statistics.observed_read_length, Some(8));
    }

    #[test]
    fn read_with_n_is_skipped() {
        let (sequences, statistics) = sequences("@r1\nNACGT\n+\nIIIII\n");
        assert!(sequences.is_empty());
        assert_eq!(statistics.reads_accepted, 0);
        assert_eq!(statistics.observed_read_length, None);
    }

    #[test]
    fn only_line_terminator_is_stripped() {
        let (sequences, _) = sequences("@r1\r\n AC GT \r\n+\r\nIIIIII\r\n@r2\nTT");
        assert_eq!(sequences, [b" AC GT ".to_vec(), b"TT".to_vec()]);
    }

    #[test]
    fn quality_line_is_not_inspected() {
        let (sequences, _) = sequences("@N\nACGT\n+N\nNNNN\n");
        assert_eq!(sequences, [b"ACGT".to_vec()]);
    }

    #[test]
    fn empty_source() {
        let (sequences, statistics) = sequences("");
        assert!(sequences.is_empty());
        assert_eq!(statistics.reads_accepted, 0);
    }

    #[test]
    fn overlong_line_is_an_error() {
        let mut reader = SequenceReader::new("@r1\nACGTACGT\n+\nIIIIIIII\n".as_bytes(), 4);
        match reader.next() {
            Some(Err(Error::LineTooLong {
                line_number: 2,
                maximum: 4,
                ..
            })) => {}
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn line_of_maximum_length_is_accepted() {
        let mut reader = SequenceReader::new("@r\r\nACGT\r\n+\r\nIIII\r\n".as_bytes(), 4);
        assert_eq!(reader.next().unwrap().unwrap(), b"ACGT");
        assert!(reader.next().is_none());
    }

    #[test]
    fn open_gzip_and_plain() {
        let mut plain = NamedTempFile::new().unwrap();
        plain.write_all(FASTQ.as_bytes()).unwrap();
        plain.flush().unwrap();

        let mut gzip = NamedTempFile::new().unwrap();
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(FASTQ.as_bytes()).unwrap();
        gzip.write_all(&encoder.finish().unwrap()).unwrap();
        gzip.flush().unwrap();

        for path in [plain.path(), gzip.path()] {
            let reader = SequenceReader::new(open_reads(path).unwrap(), 1024);
            let sequences = reader.collect::<Result<Vec<_>, _>>().unwrap();
            assert_eq!(sequences, [b"ACGTACGT".to_vec(), b"TTT".to_vec()]);
        }
    }

    #[test]
    fn open_missing_file() {
        let directory = tempfile::tempdir().unwrap();
        assert!(matches!(
            open_reads(directory.path().join("missing.fq.gz")),
            Err(Error::OpenReads { .. })
        ));
    }
}
