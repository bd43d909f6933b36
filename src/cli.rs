use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use simplelog::LevelFilter;

#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Cli {
    /// The sequencing reads in FASTQ format, gzip compressed or plain.
    pub reads: PathBuf,

    /// The k-mer vocabulary, one k-mer per line, optionally quoted.
    pub vocabulary: PathBuf,

    /// The file the normalised profile is written to.
    pub output: PathBuf,

    /// The length of the vocabulary k-mers.
    #[arg(short, long = "kmer-length", default_value_t = 8)]
    pub k: usize,

    /// The alphabet of the reads.
    #[arg(long, default_value = "dna")]
    pub alphabet: CliAlphabet,

    /// Also print the profile to standard output.
    #[arg(long)]
    pub echo: bool,

    /// Lines longer than this are rejected.
    #[arg(long, default_value_t = 65536)]
    pub max_line_length: usize,

    #[arg(long, default_value = "info")]
    pub log_level: CliLogLevel,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CliAlphabet {
    Dna,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CliLogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LevelFilter {
    fn from(level: CliLogLevel) -> Self {
        match level {
            CliLogLevel::Off => LevelFilter::Off,
            CliLogLevel::Error => LevelFilter::Error,
            CliLogLevel::Warn => LevelFilter::Warn,
            CliLogLevel::Info => LevelFilter::Info,
            CliLogLevel::Debug => LevelFilter::Debug,
            CliLogLevel::Trace => LevelFilter::Trace,
        }
    }
}
