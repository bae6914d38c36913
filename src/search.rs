use crate::config::SearchConfig;
use crate::error::{MotifError, Result};
use crate::probability::{most_probable_kmer, profile_most_probable_motifs};
use crate::sampling::profile_generated_kmer;
use crate::stats::{
    profile, profile_with_pseudocounts, score, score_with_pseudocounts, CountMatrix,
    ProfileMatrix,
};
use crate::types::MotifSet;
use log::{debug, trace};
use rand::Rng;

/// Checks the shared search contract and returns the `t` sequences to search.
fn searched<S: AsRef<str>>(dna: &[S], k: usize, t: usize) -> Result<&[S]> {
    if k == 0 {
        return Err(MotifError::invalid_input("k must be at least 1"));
    }
    if t == 0 || t > dna.len() {
        return Err(MotifError::invalid_input(format!(
            "t = {} must be between 1 and the number of sequences ({})",
            t,
            dna.len()
        )));
    }
    let dna = &dna[..t];
    if let Some((i, seq)) = dna
        .iter()
        .enumerate()
        .find(|(_, seq)| seq.as_ref().len() < k)
    {
        return Err(MotifError::invalid_input(format!(
            "k = {} exceeds length {} of sequence {}",
            k,
            seq.as_ref().len(),
            i
        )));
    }
    Ok(dna)
}

fn kmer_at(seq: &str, start: usize, k: usize) -> Result<&str> {
    seq.get(start..start + k).ok_or_else(|| {
        MotifError::invalid_input(format!("no k-mer of length {} at {}", k, start))
    })
}

fn greedy_search<S: AsRef<str>>(
    dna: &[S],
    k: usize,
    t: usize,
    build_profile: fn(&[String]) -> Result<ProfileMatrix>,
    score_motifs: fn(&[String]) -> Result<usize>,
) -> Result<MotifSet> {
    let dna = searched(dna, k, t)?;

    let mut best_motifs = dna
        .iter()
        .map(|seq| kmer_at(seq.as_ref(), 0, k).map(str::to_owned))
        .collect::<Result<MotifSet>>()?;
    let mut best_score = score_motifs(&best_motifs)?;

    let first = dna[0].as_ref();
    for start in 0..=first.len() - k {
        let mut motifs = Vec::with_capacity(t);
        motifs.push(kmer_at(first, start, k)?.to_owned());
        for seq in &dna[1..] {
            let profile = build_profile(&motifs)?;
            motifs.push(most_probable_kmer(seq.as_ref(), k, &profile)?.to_owned());
        }

        let candidate_score = score_motifs(&motifs)?;
        if candidate_score < best_score {
            trace!(
                "greedy seed at {} improves score {} -> {}",
                start,
                best_score,
                candidate_score
            );
            best_motifs = motifs;
            best_score = candidate_score;
        }
    }

    debug!("greedy search finished with score {}", best_score);
    Ok(best_motifs)
}

/// Greedy motif search with plain (zero-initialized) profiles.
///
/// Each k-mer of the first sequence seeds a motif set, extended one sequence
/// at a time by the most probable k-mer under the profile of the motifs chosen
/// so far. The set with the lowest [`score`] wins; ties keep the earlier seed.
///
/// # Arguments
/// * `dna` - Sequences to search
/// * `k` - Motif length
/// * `t` - Number of leading sequences of `dna` to search
///
/// # Errors
/// * `MotifError::InvalidInput` - If `k` is 0, `t` is 0 or exceeds `dna.len()`,
///   or a searched sequence is shorter than `k`
/// * `MotifError::UnknownSymbol` - If a sequence contains anything other than A, C, G, T
pub fn greedy_motif_search<S: AsRef<str>>(dna: &[S], k: usize, t: usize) -> Result<MotifSet> {
    greedy_search(dna, k, t, profile, score)
}

/// Greedy motif search using pseudocount profiles and [`score_with_pseudocounts`].
///
/// Pseudocounts stop a single zero cell from ruling out every k-mer that
/// differs from the first seed at that position. Deterministic; errors as
/// [`greedy_motif_search`].
pub fn greedy_motif_search_with_pseudocounts<S: AsRef<str>>(
    dna: &[S],
    k: usize,
    t: usize,
) -> Result<MotifSet> {
    greedy_search(dna, k, t, profile_with_pseudocounts, score_with_pseudocounts)
}

/// Picks one k-mer uniformly at random from each of the first `t` sequences.
///
/// Start positions are drawn independently over `0..=len - k` of each sequence.
pub fn random_motifs<S: AsRef<str>, R: Rng + ?Sized>(
    dna: &[S],
    k: usize,
    t: usize,
    rng: &mut R,
) -> Result<MotifSet> {
    searched(dna, k, t)?
        .iter()
        .map(|seq| {
            let seq = seq.as_ref();
            let start = rng.random_range(0..=seq.len() - k);
            kmer_at(seq, start, k).map(str::to_owned)
        })
        .collect()
}

/// One run of randomized motif search.
///
/// Starting from [`random_motifs`], repeatedly replaces the motif set with the
/// profile-most probable k-mers of every sequence under its own pseudocount
/// profile. Stops at the first round that does not strictly lower the score
/// and returns the best set seen. Callers are expected to repeat this from
/// many random starts, see [`run_randomized_search`].
///
/// # Errors
/// Same as [`greedy_motif_search`].
pub fn randomized_motif_search<S: AsRef<str>, R: Rng + ?Sized>(
    dna: &[S],
    k: usize,
    t: usize,
    rng: &mut R,
) -> Result<MotifSet> {
    let dna = searched(dna, k, t)?;
    let mut best_motifs = random_motifs(dna, k, t, rng)?;
    let mut best_score = score(&best_motifs)?;

    let mut round = 0usize;
    loop {
        round += 1;
        let profile = profile_with_pseudocounts(&best_motifs)?;
        let motifs = profile_most_probable_motifs(&profile, dna)?;
        let candidate_score = score(&motifs)?;
        if candidate_score >= best_score {
            trace!(
                "randomized search converged after {} rounds with score {}",
                round,
                best_score
            );
            return Ok(best_motifs);
        }
        best_motifs = motifs;
        best_score = candidate_score;
    }
}

/// Gibbs sampling motif search.
///
/// Starting from [`random_motifs`], each of the `n` rounds picks a sequence at
/// random, builds a pseudocount profile from the motifs of all other
/// sequences, and replaces that sequence's motif with a k-mer drawn in
/// proportion to its probability under the profile. The best-scoring set seen
/// is returned; with `n = 0` that is the random starting set.
///
/// # Errors
/// Same as [`greedy_motif_search`].
pub fn gibbs_sampler<S: AsRef<str>, R: Rng + ?Sized>(
    dna: &[S],
    k: usize,
    t: usize,
    n: usize,
    rng: &mut R,
) -> Result<MotifSet> {
    let dna = searched(dna, k, t)?;
    let mut motifs = random_motifs(dna, k, t, rng)?;
    let mut best_motifs = motifs.clone();
    let mut best_score = score(&best_motifs)?;

    for round in 0..n {
        let i = rng.random_range(0..t);
        let others = motifs
            .iter()
            .enumerate()
            .filter(|&(j, _)| j != i)
            .map(|(_, motif)| motif.as_str())
            .collect::<Vec<_>>();
        // with t = 1 there are no other motifs and the profile is uniform
        let profile = ProfileMatrix::from_counts(&CountMatrix::tally(&others, k, 1)?)?;
        motifs[i] = profile_generated_kmer(dna[i].as_ref(), &profile, k, rng)?.to_owned();

        let candidate_score = score(&motifs)?;
        if candidate_score < best_score {
            trace!(
                "gibbs round {} improves score {} -> {}",
                round,
                best_score,
                candidate_score
            );
            best_motifs.clone_from(&motifs);
            best_score = candidate_score;
        }
    }

    Ok(best_motifs)
}

/// Runs `runs` searches and keeps the lowest-scoring result; ties keep the earlier run.
fn best_of_runs<F>(runs: usize, mut run: F) -> Result<MotifSet>
where
    F: FnMut() -> Result<MotifSet>,
{
    let mut best: Option<(MotifSet, usize)> = None;
    for run_index in 0..runs {
        let motifs = run()?;
        let motifs_score = score(&motifs)?;
        if best
            .as_ref()
            .map_or(true, |(_, best_score)| motifs_score < *best_score)
        {
            debug!("run {} found score {}", run_index, motifs_score);
            best = Some((motifs, motifs_score));
        }
    }

    best.map(|(motifs, _)| motifs)
        .ok_or_else(|| MotifError::invalid_parameter("restarts", runs, "at least one run is required"))
}

/// Repeats [`randomized_motif_search`] `config.restarts` times and returns the best result.
///
/// # Errors
/// * `MotifError::InvalidParameter` - If `config` is invalid
/// * Any error of [`randomized_motif_search`]
pub fn run_randomized_search<S: AsRef<str>, R: Rng + ?Sized>(
    dna: &[S],
    k: usize,
    t: usize,
    config: &SearchConfig,
    rng: &mut R,
) -> Result<MotifSet> {
    config.validate()?;
    best_of_runs(config.restarts, || randomized_motif_search(dna, k, t, &mut *rng))
}

/// Repeats [`gibbs_sampler`] with `config.gibbs_iterations` rounds `config.restarts` times.
pub fn run_gibbs_search<S: AsRef<str>, R: Rng + ?Sized>(
    dna: &[S],
    k: usize,
    t: usize,
    config: &SearchConfig,
    rng: &mut R,
) -> Result<MotifSet> {
    config.validate()?;
    best_of_runs(config.restarts, || {
        gibbs_sampler(dna, k, t, config.gibbs_iterations, &mut *rng)
    })
}
