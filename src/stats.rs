use crate::error::{MotifError, Result};
use crate::types::{symbol_index, ALPHABET, ALPHABET_SIZE};
use ndarray::{Array1, Array2, Axis};

/// Allowed drift of a profile column sum away from 1.0
pub const PROFILE_TOLERANCE: f64 = 1e-9;

/// Per-position nucleotide counts of a motif collection
///
/// Rows follow [`ALPHABET`] order and columns are motif positions. Every column
/// sums to [`CountMatrix::total`].
#[derive(Debug, Clone, PartialEq)]
pub struct CountMatrix {
    counts: Array2<usize>,
    total: usize,
}

impl CountMatrix {
    /// Tallies `motifs` of width `k` on top of `pseudocount` in every cell.
    pub(crate) fn tally<S: AsRef<str>>(motifs: &[S], k: usize, pseudocount: usize) -> Result<Self> {
        let mut counts = Array2::from_elem((ALPHABET_SIZE, k), pseudocount);
        for (row, motif) in motifs.iter().enumerate() {
            let motif = motif.as_ref().as_bytes();
            if motif.len() != k {
                return Err(MotifError::invalid_input(format!(
                    "motif {} has length {}, expected {}",
                    row,
                    motif.len(),
                    k
                )));
            }
            for (position, &symbol) in motif.iter().enumerate() {
                counts[[symbol_index(symbol, position)?, position]] += 1;
            }
        }

        Ok(Self {
            counts,
            total: motifs.len() + pseudocount * ALPHABET_SIZE,
        })
    }

    /// Number of motif positions (k)
    pub fn width(&self) -> usize {
        self.counts.ncols()
    }

    /// Sum of every column: number of motifs, plus 4 with pseudocounts
    pub fn total(&self) -> usize {
        self.total
    }

    /// Count of `symbol` at `position`, or `None` when the position is out of range
    pub fn get(&self, symbol: u8, position: usize) -> Result<Option<usize>> {
        let row = symbol_index(symbol, position)?;
        Ok(self.counts.get([row, position]).copied())
    }

    pub fn as_array(&self) -> &Array2<usize> {
        &self.counts
    }

    pub fn column_sums(&self) -> Array1<usize> {
        self.counts.sum_axis(Axis(0))
    }

    /// Row index of the majority symbol in each column.
    ///
    /// Ties go to the first symbol in A, C, G, T order that reaches the maximum.
    fn majority_rows(&self) -> Vec<usize> {
        self.counts
            .axis_iter(Axis(1))
            .map(|column| {
                let mut best = 0;
                for (row, &count) in column.iter().enumerate().skip(1) {
                    if count > column[best] {
                        best = row;
                    }
                }
                best
            })
            .collect()
    }

    /// Majority-vote string over all columns
    pub fn consensus(&self) -> String {
        self.majority_rows()
            .into_iter()
            .map(|row| ALPHABET[row] as char)
            .collect()
    }

    /// Total count of non-consensus symbols across all columns
    pub fn mismatches(&self) -> usize {
        self.counts
            .axis_iter(Axis(1))
            .zip(self.majority_rows())
            .map(|(column, best)| column.sum() - column[best])
            .sum()
    }
}

/// Per-position nucleotide probabilities
///
/// Rows follow [`ALPHABET`] order and every column sums to 1.0.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileMatrix {
    probs: Array2<f64>,
}

impl ProfileMatrix {
    /// Builds a profile from a 4 x k matrix of probabilities.
    ///
    /// # Errors
    /// * `MotifError::InvalidInput` - If the matrix does not have one row per nucleotide,
    ///   holds a value outside [0, 1], or a column does not sum to 1
    pub fn new(probs: Array2<f64>) -> Result<Self> {
        if probs.nrows() != ALPHABET_SIZE {
            return Err(MotifError::invalid_input(format!(
                "profile needs {} rows, got {}",
                ALPHABET_SIZE,
                probs.nrows()
            )));
        }
        if let Some(value) = probs.iter().find(|p| !(0.0..=1.0).contains(*p)) {
            return Err(MotifError::invalid_input(format!(
                "profile value {} is not a probability",
                value
            )));
        }
        for (position, sum) in probs.sum_axis(Axis(0)).iter().enumerate() {
            if (sum - 1.0).abs() > PROFILE_TOLERANCE {
                return Err(MotifError::invalid_input(format!(
                    "profile column {} sums to {}",
                    position, sum
                )));
            }
        }

        Ok(Self { probs })
    }

    /// Builds a profile from rows given in A, C, G, T order.
    pub fn from_rows(rows: [Vec<f64>; 4]) -> Result<Self> {
        let k = rows[0].len();
        if rows.iter().any(|row| row.len() != k) {
            return Err(MotifError::invalid_input("profile rows differ in length"));
        }
        let probs = Array2::from_shape_vec((ALPHABET_SIZE, k), rows.concat())
            .map_err(|e| MotifError::invalid_input(e.to_string()))?;
        Self::new(probs)
    }

    /// Divides every cell of `counts` by its column total.
    pub fn from_counts(counts: &CountMatrix) -> Result<Self> {
        if counts.total() == 0 {
            return Err(MotifError::invalid_input(
                "cannot build a profile from zero observations",
            ));
        }
        let total = counts.total() as f64;
        Ok(Self {
            probs: counts.as_array().mapv(|c| c as f64 / total),
        })
    }

    /// Number of motif positions (k)
    pub fn width(&self) -> usize {
        self.probs.ncols()
    }

    /// Probability of `symbol` at `position`, or `None` when the position is out of range
    pub fn get(&self, symbol: u8, position: usize) -> Result<Option<f64>> {
        let row = symbol_index(symbol, position)?;
        Ok(self.probs.get([row, position]).copied())
    }

    pub(crate) fn at(&self, row: usize, position: usize) -> f64 {
        self.probs[[row, position]]
    }

    pub fn as_array(&self) -> &Array2<f64> {
        &self.probs
    }

    pub fn column_sums(&self) -> Array1<f64> {
        self.probs.sum_axis(Axis(0))
    }
}

/// Returns the shared length of a non-empty motif collection
fn motif_width<S: AsRef<str>>(motifs: &[S]) -> Result<usize> {
    motifs
        .first()
        .map(|m| m.as_ref().len())
        .ok_or_else(|| MotifError::invalid_input("motif collection is empty"))
}

/// Counts each nucleotide at each position of `motifs`.
///
/// # Arguments
/// * `motifs` - Equal-length k-mers over A, C, G, T
///
/// # Returns
/// * `Result<CountMatrix>` - A 4 x k matrix whose columns sum to the number of motifs
///
/// # Errors
/// * `MotifError::InvalidInput` - If `motifs` is empty or the motifs differ in length
/// * `MotifError::UnknownSymbol` - If a motif contains anything other than A, C, G, T
pub fn count<S: AsRef<str>>(motifs: &[S]) -> Result<CountMatrix> {
    CountMatrix::tally(motifs, motif_width(motifs)?, 0)
}

/// Like [`count`], but every cell starts at 1 (Laplace's rule of succession).
///
/// Columns sum to the number of motifs plus 4.
pub fn count_with_pseudocounts<S: AsRef<str>>(motifs: &[S]) -> Result<CountMatrix> {
    CountMatrix::tally(motifs, motif_width(motifs)?, 1)
}

/// Probability of each nucleotide at each position of `motifs`.
///
/// # Errors
/// Same as [`count`].
pub fn profile<S: AsRef<str>>(motifs: &[S]) -> Result<ProfileMatrix> {
    ProfileMatrix::from_counts(&count(motifs)?)
}

/// Profile built from [`count_with_pseudocounts`]; no cell is ever zero.
pub fn profile_with_pseudocounts<S: AsRef<str>>(motifs: &[S]) -> Result<ProfileMatrix> {
    ProfileMatrix::from_counts(&count_with_pseudocounts(motifs)?)
}

/// Most common nucleotide at each position, ties going to the earlier of A, C, G, T.
pub fn consensus<S: AsRef<str>>(motifs: &[S]) -> Result<String> {
    Ok(count(motifs)?.consensus())
}

pub fn consensus_with_pseudocounts<S: AsRef<str>>(motifs: &[S]) -> Result<String> {
    Ok(count_with_pseudocounts(motifs)?.consensus())
}

/// Number of symbols in `motifs` that disagree with the consensus.
///
/// Lower is better; 0 means every motif is identical.
///
/// # Errors
/// Same as [`count`].
pub fn score<S: AsRef<str>>(motifs: &[S]) -> Result<usize> {
    Ok(count(motifs)?.mismatches())
}

/// Mismatch score over pseudocounts.
///
/// The consensus is the same as without pseudocounts, so this is always
/// `score(motifs) + 3 * k` and ranks motif sets identically.
pub fn score_with_pseudocounts<S: AsRef<str>>(motifs: &[S]) -> Result<usize> {
    Ok(count_with_pseudocounts(motifs)?.mismatches())
}

/// The p * log2(p) term of every cell of the plain profile, with 0 * log2(0) = 0.
pub fn entropy_matrix<S: AsRef<str>>(motifs: &[S]) -> Result<Array2<f64>> {
    let profile = profile(motifs)?;
    Ok(profile
        .as_array()
        .mapv(|p| if p > 0.0 { p * p.log2() } else { 0.0 }))
}

/// Sum of the Shannon entropy (in bits) of every column of the profile.
///
/// A fully conserved motif set scores 0 and a column with all four
/// nucleotides equally likely contributes 2.
pub fn entropy_score<S: AsRef<str>>(motifs: &[S]) -> Result<f64> {
    Ok(-entropy_matrix(motifs)?.sum())
}
