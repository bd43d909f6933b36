use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use crate::{
    error::{Error, Result},
    vocabulary::VocabularyStore,
};

/// Writes one `<k-mer>:<count>` line per entry, in the order of the store.
pub fn write_profile<const K: usize>(
    store: &VocabularyStore<K>,
    output: &mut impl Write,
) -> Result<()> {
    for entry in store.entries() {
        output.write_all(&entry.sequence)?;
        writeln!(output, ":{:.6}", entry.count)?;
    }

    Ok(())
}

/// Writes the profile to `path`, and also to standard output if `echo` is set.
pub fn write_profile_file<const K: usize>(
    store: &VocabularyStore<K>,
    path: impl AsRef<Path>,
    echo: bool,
) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|source| Error::CreateOutput {
        path: path.to_owned(),
        source,
    })?;

    let mut output = BufWriter::new(file);
    write_profile(store, &mut output)?;
    output.flush()?;

    if echo {
        let mut stdout = std::io::stdout().lock();
        write_profile(store, &mut stdout)?;
        stdout.flush()?;
    }

    Ok(())
}
