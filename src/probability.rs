use crate::error::{MotifError, Result};
use crate::stats::ProfileMatrix;
use crate::types::{symbol_index, MotifSet};

/// Probability of `kmer` under `profile`, reporting positions relative to `offset`.
pub(crate) fn kmer_probability(kmer: &[u8], profile: &ProfileMatrix, offset: usize) -> Result<f64> {
    kmer.iter()
        .enumerate()
        .try_fold(1.0, |p, (position, &symbol)| {
            let row = symbol_index(symbol, offset + position)?;
            Ok(p * profile.at(row, position))
        })
}

/// Natural log of [`kmer_probability`]; a zero cell gives `f64::NEG_INFINITY`.
pub(crate) fn kmer_log_probability(kmer: &[u8], profile: &ProfileMatrix, offset: usize) -> Result<f64> {
    kmer.iter()
        .enumerate()
        .try_fold(0.0, |lp, (position, &symbol)| {
            let row = symbol_index(symbol, offset + position)?;
            Ok(lp + profile.at(row, position).ln())
        })
}

/// Checks that windows of length `k` can be taken from `text` and scored under `profile`.
pub(crate) fn check_window(text: &str, k: usize, profile: &ProfileMatrix) -> Result<()> {
    if k == 0 {
        return Err(MotifError::invalid_input("k must be at least 1"));
    }
    if k != profile.width() {
        return Err(MotifError::invalid_input(format!(
            "k = {} does not match profile width {}",
            k,
            profile.width()
        )));
    }
    if k > text.len() {
        return Err(MotifError::invalid_input(format!(
            "k = {} exceeds sequence length {}",
            k,
            text.len()
        )));
    }
    Ok(())
}

/// Computes the probability that `profile` generates `text`.
///
/// The result is the product of `profile[text[i]][i]` over every position.
///
/// # Arguments
/// * `text` - A k-mer over A, C, G, T
/// * `profile` - Profile matrix with exactly `text.len()` columns
///
/// # Errors
/// * `MotifError::InvalidInput` - If `text` and `profile` differ in length
/// * `MotifError::UnknownSymbol` - If `text` contains anything other than A, C, G, T
///
/// # Example
/// ```
/// use motif_search_rs::probability::probability;
/// use motif_search_rs::stats::profile;
///
/// let p = profile(&["AC", "AG"]).unwrap();
/// assert_eq!(probability("AC", &p).unwrap(), 0.5);
/// ```
pub fn probability(text: &str, profile: &ProfileMatrix) -> Result<f64> {
    if text.len() != profile.width() {
        return Err(MotifError::invalid_input(format!(
            "text length {} does not match profile width {}",
            text.len(),
            profile.width()
        )));
    }
    kmer_probability(text.as_bytes(), profile, 0)
}

/// Natural log of [`probability`].
///
/// Stays finite for long k-mers whose plain probability underflows to 0.
/// Returns `f64::NEG_INFINITY` when some position has probability 0.
///
/// # Errors
/// Same as [`probability`].
pub fn log_probability(text: &str, profile: &ProfileMatrix) -> Result<f64> {
    if text.len() != profile.width() {
        return Err(MotifError::invalid_input(format!(
            "text length {} does not match profile width {}",
            text.len(),
            profile.width()
        )));
    }
    kmer_log_probability(text.as_bytes(), profile, 0)
}

/// Finds the k-mer of `text` that `profile` is most likely to generate.
///
/// Every start position from left to right is scored and only a strictly
/// greater probability replaces the current best, so ties resolve to the
/// leftmost k-mer. When every k-mer has probability 0 the first one is returned.
///
/// # Arguments
/// * `text` - Sequence to scan
/// * `k` - K-mer length, must equal the profile width
/// * `profile` - Profile matrix to score with
///
/// # Returns
/// * `Result<&str>` - A slice of `text` of length `k`
///
/// # Errors
/// * `MotifError::InvalidInput` - If `k` is 0, differs from the profile width, or exceeds `text.len()`
/// * `MotifError::UnknownSymbol` - If `text` contains anything other than A, C, G, T
pub fn most_probable_kmer<'a>(text: &'a str, k: usize, profile: &ProfileMatrix) -> Result<&'a str> {
    check_window(text, k, profile)?;
    let bytes = text.as_bytes();

    let mut best_probability = -1.0;
    let mut best_start = 0;
    for start in 0..=bytes.len() - k {
        let p = kmer_probability(&bytes[start..start + k], profile, start)?;
        if p > best_probability {
            best_probability = p;
            best_start = start;
        }
    }

    // every byte of the winning window was checked as a nucleotide, so this is a char boundary
    Ok(&text[best_start..best_start + k])
}

/// Profile-most probable k-mer of each sequence in `dna`, with k taken from the profile width.
pub fn profile_most_probable_motifs<S: AsRef<str>>(
    profile: &ProfileMatrix,
    dna: &[S],
) -> Result<MotifSet> {
    dna.iter()
        .map(|seq| most_probable_kmer(seq.as_ref(), profile.width(), profile).map(str::to_owned))
        .collect()
}
