use crate::error::{MotifError, Result};
use crate::replication::{approximate_pattern_count, skew_array};
use crate::stats::ProfileMatrix;
use crate::types::{ALPHABET_SIZE, PWM};
use ndarray::Array2;
use polars::prelude::*;

const PWM_COLUMNS: [&str; ALPHABET_SIZE] = ["A", "C", "G", "T"];

impl ProfileMatrix {
    /// Converts the profile into a PWM DataFrame.
    ///
    /// # Returns
    /// * `Result<PWM>` - A DataFrame with columns A, C, G, T and one row per motif position
    ///
    /// # Errors
    /// * Returns `MotifError::DataError` if DataFrame creation fails
    pub fn to_pwm(&self) -> Result<PWM> {
        let columns = PWM_COLUMNS
            .iter()
            .enumerate()
            .map(|(row, &name)| Column::new(name.into(), self.as_array().row(row).to_vec()))
            .collect::<Vec<_>>();

        DataFrame::new(columns).map_err(|e| MotifError::DataError(e.to_string()))
    }

    /// Reads a profile back from a PWM DataFrame.
    ///
    /// # Arguments
    /// * `pwm` - DataFrame with f64 columns A, C, G, T and one row per motif position
    ///
    /// # Errors
    /// * Returns `MotifError::DataError` if a column is missing, not f64, or holds nulls
    /// * Returns `MotifError::InvalidInput` if a row is not a probability distribution
    pub fn from_pwm(pwm: &PWM) -> Result<Self> {
        let mut probs = Array2::zeros((ALPHABET_SIZE, pwm.height()));

        for (row, &name) in PWM_COLUMNS.iter().enumerate() {
            let values = pwm
                .column(name)
                .map_err(|e| MotifError::DataError(e.to_string()))?
                .f64()
                .map_err(|e| MotifError::DataError(e.to_string()))?;

            for (position, value) in values.into_iter().enumerate() {
                probs[[row, position]] = value.ok_or_else(|| {
                    MotifError::DataError(format!("missing {} value at position {}", name, position))
                })?;
            }
        }

        ProfileMatrix::new(probs)
    }
}

/// Counts approximate occurrences of a pattern in each sequence of the input DataFrame.
///
/// # Arguments
/// * `df` - DataFrame containing sequences with "label" and "sequence" columns
/// * `pattern` - Pattern to search for
/// * `d` - Maximum number of mismatches per occurrence
///
/// # Returns
/// * `Result<DataFrame>` - A DataFrame with:
///   - Original labels
///   - "count": Occurrences of `pattern` with at most `d` mismatches
///
/// # Errors
/// * Returns `MotifError::DataError` if required columns are missing, a sequence is null,
///   or DataFrame creation fails
pub fn approximate_pattern_counts(df: &DataFrame, pattern: &str, d: usize) -> Result<DataFrame> {
    let sequences = df
        .column("sequence")
        .map_err(|e| MotifError::DataError(e.to_string()))?
        .str()
        .map_err(|e| MotifError::DataError(e.to_string()))?;

    let counts = sequences
        .into_iter()
        .enumerate()
        .map(|(row, seq)| {
            let seq = seq.ok_or_else(|| MotifError::DataError(format!("null sequence in row {}", row)))?;
            Ok(approximate_pattern_count(pattern, seq, d) as u32)
        })
        .collect::<Result<Vec<u32>>>()?;

    let labels = df
        .column("label")
        .map_err(|e| MotifError::DataError(e.to_string()))?;

    let new_df = DataFrame::new(vec![labels.clone(), Column::new("count".into(), counts)])
        .map_err(|e| MotifError::DataError(e.to_string()))?;

    Ok(new_df)
}

/// Finds where the G - C skew of each sequence is lowest.
///
/// # Arguments
/// * `df` - DataFrame containing sequences with "label" and "sequence" columns
///
/// # Returns
/// * `Result<DataFrame>` - A DataFrame with:
///   - Original labels
///   - "min_skew": Lowest skew value of the sequence
///   - "first_min_position": First skew position reaching that value
///
/// # Errors
/// * Returns `MotifError::UnknownSymbol` if a sequence contains anything other than A, C, G, T
/// * Returns `MotifError::DataError` if required columns are missing, a sequence is null,
///   or DataFrame creation fails
pub fn skew_minima(df: &DataFrame) -> Result<DataFrame> {
    let sequences = df
        .column("sequence")
        .map_err(|e| MotifError::DataError(e.to_string()))?
        .str()
        .map_err(|e| MotifError::DataError(e.to_string()))?;

    let mut min_skews: Vec<i64> = Vec::with_capacity(df.height());
    let mut positions: Vec<u32> = Vec::with_capacity(df.height());
    for (row, seq) in sequences.into_iter().enumerate() {
        let seq = seq.ok_or_else(|| MotifError::DataError(format!("null sequence in row {}", row)))?;
        let skew = skew_array(seq)?;
        // skew always starts with 0, so there is a minimum
        let (position, &value) = skew
            .iter()
            .enumerate()
            .min_by_key(|&(i, &value)| (value, i))
            .unwrap_or((0, &0));
        min_skews.push(value);
        positions.push(position as u32);
    }

    let labels = df
        .column("label")
        .map_err(|e| MotifError::DataError(e.to_string()))?;

    let new_df = DataFrame::new(vec![
        labels.clone(),
        Column::new("min_skew".into(), min_skews),
        Column::new("first_min_position".into(), positions),
    ])
    .map_err(|e| MotifError::DataError(e.to_string()))?;

    Ok(new_df)
}
