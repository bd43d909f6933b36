use compact_genome::{
    implementation::alphabets::dna_alphabet::DnaAlphabet, interface::alphabet::Alphabet,
};

use crate::{
    cli::CliAlphabet,
    error::{Error, Result},
};

pub const MAX_K: usize = 16;

pub fn call<Function: ChooseAlphabetAndK>(
    alphabet: CliAlphabet,
    k: usize,
    arguments: Function::Arguments,
) -> Result<Function::Return> {
    match alphabet {
        CliAlphabet::Dna => with_alphabet::<DnaAlphabet, Function>(k, arguments),
    }
}

fn with_alphabet<AlphabetType: 'static + Alphabet, Function: ChooseAlphabetAndK>(
    k: usize,
    arguments: Function::Arguments,
) -> Result<Function::Return> {
    match k {
        1 => Function::call::<1, AlphabetType>(arguments),
        2 => Function::call::<2, AlphabetType>(arguments),
        3 => Function::call::<3, AlphabetType>(arguments),
        4 => Function::call::<4, AlphabetType>(arguments),
        5 => Function::call::<5, AlphabetType>(arguments),
        6 => Function::call::<6, AlphabetType>(arguments),
        7 => Function::call::<7, AlphabetType>(arguments),
        8 => Function::call::<8, AlphabetType>(arguments),
        9 => Function::call::<9, AlphabetType>(arguments),
        10 => Function::call::<10, AlphabetType>(arguments),
        11 => Function::call::<11, AlphabetType>(arguments),
        12 => Function::call::<12, AlphabetType>(arguments),
        13 => Function::call::<13, AlphabetType>(arguments),
        14 => Function::call::<14, AlphabetType>(arguments),
        15 => Function::call::<15, AlphabetType>(arguments),
        MAX_K => Function::call::<MAX_K, AlphabetType>(arguments),
        k => Err(Error::UnsupportedK(k)),
    }
}

/// Runs a computation with k-mer length and alphabet fixed at compile time.
pub trait ChooseAlphabetAndK {
    type Arguments;
    type Return;

    fn call<const K: usize, AlphabetType: 'static + Alphabet>(
        arguments: Self::Arguments,
    ) -> Result<Self::Return>;
}
