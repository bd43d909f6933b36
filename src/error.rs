use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    IO(#[from] std::io::Error),

    #[error("error opening k-mer file {path:?}: {source}")]
    OpenVocabulary {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("error opening read file {path:?}: {source}")]
    OpenReads {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("error opening output file {path:?}: {source}")]
    CreateOutput {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("k = {0} is not supported")]
    UnsupportedK(usize),

    #[error("line {line_number} has length {length} which exceeds the maximum line length {maximum}")]
    LineTooLong {
        line_number: usize,
        length: usize,
        maximum: usize,
    },

    #[error("no vocabulary k-mer was found in the reads, the total count is zero and cannot be normalised")]
    DegenerateNormalization,
}
