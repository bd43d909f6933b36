use std::{
    fs::File,
    io::{BufReader, Write},
    path::{Path, PathBuf},
};

use crate::error::Result;
use choose_alphabet_and_k::{call, ChooseAlphabetAndK};
use clap::Parser;
use cli::Cli;
use compact_genome::interface::alphabet::Alphabet;
use error::Error;
use log::{info, warn};
use read_stream::{open_reads, SequenceReader};
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};
use vocabulary::VocabularyStore;

mod choose_alphabet_and_k;
mod cli;
mod error;
mod normalizer;
mod profile_output;
mod read_stream;
mod vocabulary;
mod window_counter;

fn main() {
    let cli = Cli::parse();
    TermLogger::init(
        LevelFilter::from(cli.log_level),
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )
    .unwrap_or_else(|error| eprintln!("Could not initialise logging: {error}"));

    if let Err(error) = call::<ProfileReads>(cli.alphabet, cli.k, cli.into()) {
        report_error(&error, &mut std::io::stderr().lock());
        std::process::exit(1);
    }
}

/// Printed directly, so the message is shown even when logging is disabled.
fn report_error(error: &Error, output: &mut impl Write) {
    // Nothing left to report to if stderr itself fails.
    let _ = writeln!(output, "Error: {error}");
}

struct ProfileArguments {
    reads: PathBuf,
    vocabulary: PathBuf,
    output: PathBuf,
    echo: bool,
    max_line_length: usize,
}

impl From<Cli> for ProfileArguments {
    fn from(cli: Cli) -> Self {
        Self {
            reads: cli.reads,
            vocabulary: cli.vocabulary,
            output: cli.output,
            echo: cli.echo,
            max_line_length: cli.max_line_length,
        }
    }
}

struct ProfileReads;

impl ChooseAlphabetAndK for ProfileReads {
    type Arguments = ProfileArguments;

    type Return = ();

    fn call<const K: usize, AlphabetType: 'static + Alphabet>(
        arguments: Self::Arguments,
    ) -> Result<Self::Return> {
        // Load vocabulary.
        let mut store = load_vocabulary::<K>(&arguments.vocabulary, arguments.max_line_length)?;

        // Count k-mers in reads.
        let reads = SequenceReader::new(open_reads(&arguments.reads)?, arguments.max_line_length);
        window_counter::count_reads(reads, &mut store)?;

        // Normalise and write.
        let total = normalizer::normalize(&mut store, AlphabetType::SIZE)?;
        info!(
            "Rescaled {total} k-mer occurrences to {}",
            normalizer::normalization_target(AlphabetType::SIZE, K)
        );
        profile_output::write_profile_file(&store, &arguments.output, arguments.echo)?;
        info!("Wrote profile to {:?}", arguments.output);

        Ok(())
    }
}

fn load_vocabulary<const K: usize>(
    path: &Path,
    max_line_length: usize,
) -> Result<VocabularyStore<K>> {
    let file = File::open(path).map_err(|source| Error::OpenVocabulary {
        path: path.to_owned(),
        source,
    })?;
    let (store, report) = VocabularyStore::<K>::build(BufReader::new(file), max_line_length)?;

    info!("Loaded {} k-mers of length {} from {path:?}", store.len(), K);
    if report.invalid_length > 0 || report.duplicates > 0 {
        warn!(
            "Skipped {} k-mers of invalid length and {} duplicate k-mers",
            report.invalid_length, report.duplicates
        );
    }
    if store.is_empty() {
        warn!("The vocabulary is empty");
    }

    Ok(store)
}
