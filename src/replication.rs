//! Pattern counting and skew analysis for locating replication origins (ori) and termini (ter)

use crate::error::{MotifError, Result};
use phf::phf_map;
use std::collections::HashMap;

static COMPLEMENT: phf::Map<char, char> = phf_map! {
    'A' => 'T',
    'T' => 'A',
    'C' => 'G',
    'G' => 'C',
};

/// Start positions of `pattern` in `text`, overlapping occurrences included.
fn occurrences<'a>(text: &'a [u8], pattern: &'a [u8]) -> impl Iterator<Item = usize> + 'a {
    let last = (text.len() + 1).saturating_sub(pattern.len());
    (0..last).filter(move |&i| &text[i..i + pattern.len()] == pattern)
}

/// Number of times `pattern` occurs in `text`, counting overlaps.
pub fn pattern_count(text: &str, pattern: &str) -> usize {
    occurrences(text.as_bytes(), pattern.as_bytes()).count()
}

/// All start positions of `pattern` in `genome`, counting overlaps.
pub fn pattern_matching(pattern: &str, genome: &str) -> Vec<usize> {
    occurrences(genome.as_bytes(), pattern.as_bytes()).collect()
}

/// Every k-character window of `text`, split on char boundaries.
fn kmers(text: &str, k: usize) -> impl Iterator<Item = &str> {
    let bounds = text
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(text.len()))
        .collect::<Vec<_>>();
    let count = if k == 0 {
        0
    } else {
        bounds.len().saturating_sub(k)
    };
    (0..count).map(move |i| &text[bounds[i]..bounds[i + k]])
}

/// Occurrence count of every k-mer of `text`.
pub fn frequency_map(text: &str, k: usize) -> HashMap<String, usize> {
    let mut freq = HashMap::new();
    for word in kmers(text, k) {
        *freq.entry(word.to_owned()).or_insert(0) += 1;
    }
    freq
}

/// The most frequent k-mers of `text`, in order of first occurrence.
pub fn frequent_words(text: &str, k: usize) -> Vec<String> {
    let freq = frequency_map(text, k);
    let Some(&max) = freq.values().max() else {
        return Vec::new();
    };

    let mut words: Vec<String> = Vec::new();
    for word in kmers(text, k) {
        if freq[word] == max && !words.iter().any(|w| w == word) {
            words.push(word.to_owned());
        }
    }
    words
}

/// Reverse complement of a DNA string.
///
/// # Errors
/// * `MotifError::UnknownSymbol` - If `pattern` contains anything other than A, C, G, T
pub fn reverse_complement(pattern: &str) -> Result<String> {
    pattern
        .char_indices()
        .rev()
        .map(|(position, c)| {
            COMPLEMENT
                .get(&c)
                .copied()
                .ok_or_else(|| MotifError::UnknownSymbol {
                    position,
                    symbol: c,
                })
        })
        .collect()
}

/// Count of `symbol` in each window of length n/2 starting at every position of the
/// circular `genome`. Rescans every window; see [`faster_symbol_array`].
pub fn symbol_array(genome: &str, symbol: u8) -> Vec<usize> {
    let genome = genome.as_bytes();
    let n = genome.len();
    let half = n / 2;
    let extended = [genome, &genome[..half]].concat();

    (0..n)
        .map(|i| {
            extended[i..i + half]
                .iter()
                .filter(|&&b| b == symbol)
                .count()
        })
        .collect()
}

/// Same result as [`symbol_array`], sliding the window one position at a time.
pub fn faster_symbol_array(genome: &str, symbol: u8) -> Vec<usize> {
    let genome = genome.as_bytes();
    let n = genome.len();
    if n == 0 {
        return Vec::new();
    }
    let half = n / 2;
    let extended = [genome, &genome[..half]].concat();

    let mut array = Vec::with_capacity(n);
    array.push(genome[..half].iter().filter(|&&b| b == symbol).count());
    for i in 1..n {
        let mut current = array[i - 1];
        // the window loses extended[i - 1] and gains extended[i + half - 1]
        if extended[i - 1] == symbol {
            current -= 1;
        }
        if extended[i + half - 1] == symbol {
            current += 1;
        }
        array.push(current);
    }
    array
}

/// Running difference between G and C counts over `genome`.
///
/// Entry `i` is #G - #C in the first `i` nucleotides, so the result has
/// `genome.len() + 1` entries and starts at 0.
///
/// # Errors
/// * `MotifError::UnknownSymbol` - If `genome` contains anything other than A, C, G, T
pub fn skew_array(genome: &str) -> Result<Vec<i64>> {
    let mut skew = Vec::with_capacity(genome.len() + 1);
    skew.push(0i64);
    let mut current = 0i64;
    for (position, symbol) in genome.bytes().enumerate() {
        match symbol {
            b'G' => current += 1,
            b'C' => current -= 1,
            b'A' | b'T' => {}
            _ => return Err(MotifError::unknown_symbol(position, symbol)),
        }
        skew.push(current);
    }
    Ok(skew)
}

fn positions_of(skew: &[i64], target: Option<i64>) -> Vec<usize> {
    match target {
        Some(target) => skew
            .iter()
            .enumerate()
            .filter(|&(_, &value)| value == target)
            .map(|(i, _)| i)
            .collect(),
        None => Vec::new(),
    }
}

/// Every position where the skew reaches its minimum, the likely location of ori.
pub fn minimum_skew(genome: &str) -> Result<Vec<usize>> {
    let skew = skew_array(genome)?;
    Ok(positions_of(&skew, skew.iter().copied().min()))
}

/// Every position where the skew reaches its maximum, the likely location of ter.
pub fn maximum_skew(genome: &str) -> Result<Vec<usize>> {
    let skew = skew_array(genome)?;
    Ok(positions_of(&skew, skew.iter().copied().max()))
}

/// Number of mismatching positions between `p` and `q`.
///
/// Only the first `min(p.len(), q.len())` positions are compared.
pub fn hamming_distance(p: &str, q: &str) -> usize {
    p.bytes().zip(q.bytes()).filter(|(a, b)| a != b).count()
}

fn approximate_occurrences<'a>(
    text: &'a str,
    pattern: &'a str,
    d: usize,
) -> impl Iterator<Item = usize> + 'a {
    let text = text.as_bytes();
    let pattern = pattern.as_bytes();
    let last = (text.len() + 1).saturating_sub(pattern.len());
    (0..last).filter(move |&i| {
        let mismatches = text[i..i + pattern.len()]
            .iter()
            .zip(pattern)
            .filter(|(a, b)| a != b)
            .count();
        mismatches <= d
    })
}

/// Start positions where `pattern` occurs in `text` with at most `d` mismatches.
pub fn approximate_pattern_matching(text: &str, pattern: &str, d: usize) -> Vec<usize> {
    approximate_occurrences(text, pattern, d).collect()
}

/// Number of occurrences of `pattern` in `text` with at most `d` mismatches.
pub fn approximate_pattern_count(pattern: &str, text: &str, d: usize) -> usize {
    approximate_occurrences(text, pattern, d).count()
}
