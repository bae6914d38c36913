use crate::error::{MotifError, Result};
use crate::probability::{check_window, kmer_log_probability};
use crate::stats::ProfileMatrix;
use rand::Rng;

/// Scales `weights` so that they sum to 1, keeping their order.
///
/// # Errors
/// * `MotifError::InvalidInput` - If a weight is negative or not finite
/// * `MotifError::DegenerateWeights` - If the weights sum to zero
///
/// # Example
/// ```
/// use motif_search_rs::sampling::normalize;
///
/// let normalized = normalize(&[("AA", 2.0), ("BB", 2.0)]).unwrap();
/// assert_eq!(normalized, vec![("AA", 0.5), ("BB", 0.5)]);
/// ```
pub fn normalize<K: Clone>(weights: &[(K, f64)]) -> Result<Vec<(K, f64)>> {
    if let Some((_, w)) = weights.iter().find(|(_, w)| !w.is_finite() || *w < 0.0) {
        return Err(MotifError::invalid_input(format!(
            "weight {} is not a non-negative number",
            w
        )));
    }
    let total: f64 = weights.iter().map(|(_, w)| w).sum();
    if total <= 0.0 || !total.is_finite() {
        return Err(MotifError::DegenerateWeights);
    }

    Ok(weights
        .iter()
        .map(|(candidate, w)| (candidate.clone(), w / total))
        .collect())
}

/// Draws one candidate with the given probabilities.
///
/// A uniform value in [0, 1) is reduced by each probability in slice order
/// and the candidate that brings it to zero or below is returned. If rounding
/// leaves a remainder after the last candidate, the last candidate is returned.
///
/// # Errors
/// * `MotifError::InvalidInput` - If `probabilities` is empty
pub fn weighted_choice<K: Clone, R: Rng + ?Sized>(probabilities: &[(K, f64)], rng: &mut R) -> Result<K> {
    let (last, _) = probabilities
        .last()
        .ok_or_else(|| MotifError::invalid_input("cannot choose from no candidates"))?;

    let mut remainder: f64 = rng.random();
    for (candidate, p) in probabilities {
        remainder -= p;
        if remainder <= 0.0 {
            return Ok(candidate.clone());
        }
    }
    Ok(last.clone())
}

/// Draws a k-mer of `text` at random, weighting each start position by its probability under `profile`.
///
/// # Errors
/// * `MotifError::InvalidInput` - If `k` is 0, differs from the profile width, or exceeds `text.len()`
/// * `MotifError::UnknownSymbol` - If `text` contains anything other than A, C, G, T
/// * `MotifError::DegenerateWeights` - If every k-mer of `text` has probability 0
pub fn profile_generated_kmer<'a, R: Rng + ?Sized>(
    text: &'a str,
    profile: &ProfileMatrix,
    k: usize,
    rng: &mut R,
) -> Result<&'a str> {
    check_window(text, k, profile)?;
    let bytes = text.as_bytes();

    let log_weights = (0..=bytes.len() - k)
        .map(|start| Ok((start, kmer_log_probability(&bytes[start..start + k], profile, start)?)))
        .collect::<Result<Vec<_>>>()?;

    // scale by the most likely window so long k-mers do not underflow
    let max = log_weights
        .iter()
        .map(|&(_, lp)| lp)
        .fold(f64::NEG_INFINITY, f64::max);
    if max == f64::NEG_INFINITY {
        return Err(MotifError::DegenerateWeights);
    }
    let weights = log_weights
        .into_iter()
        .map(|(start, lp)| (start, (lp - max).exp()))
        .collect::<Vec<_>>();
    let start = weighted_choice(&normalize(&weights)?, rng)?;

    Ok(&text[start..start + k])
}
