use crate::error::{MotifError, Result};
use phf::phf_map;
use polars::prelude::DataFrame;

/// Represents a Position Weight Matrix (PWM)
/// Stored as a DataFrame with columns A, C, G, T and one row per motif position
pub type PWM = DataFrame;

/// One k-mer chosen from each searched sequence, all of the same length
pub type MotifSet = Vec<String>;

/// Nucleotides in the fixed order used for matrix rows and consensus tie-breaking
pub const ALPHABET: [u8; 4] = *b"ACGT";

pub const ALPHABET_SIZE: usize = ALPHABET.len();

static SYMBOL_INDEX: phf::Map<u8, usize> = phf_map! {
    b'A' => 0,
    b'C' => 1,
    b'G' => 2,
    b'T' => 3,
};

/// Maps a nucleotide to its row in count and profile matrices.
///
/// `position` is only used to report where an unknown symbol was found.
pub fn symbol_index(symbol: u8, position: usize) -> Result<usize> {
    SYMBOL_INDEX
        .get(&symbol)
        .copied()
        .ok_or_else(|| MotifError::unknown_symbol(position, symbol))
}
