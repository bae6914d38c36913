use approx::assert_abs_diff_eq;
use motif_search_rs::error::MotifError;
use motif_search_rs::sampling::{normalize, profile_generated_kmer, weighted_choice};
use motif_search_rs::stats::{self, ProfileMatrix};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn test_normalize() {
    let normalized = normalize(&[("AA", 2.0), ("BB", 2.0)]).unwrap();
    assert_eq!(normalized, vec![("AA", 0.5), ("BB", 0.5)]);

    let normalized = normalize(&[("A", 0.22), ("C", 0.54), ("G", 0.36), ("T", 0.3)]).unwrap();
    let total: f64 = normalized.iter().map(|(_, p)| p).sum();
    assert_abs_diff_eq!(total, 1.0, epsilon = 1e-12);
    assert_abs_diff_eq!(normalized[1].1, 0.54 / 1.42, epsilon = 1e-12);
    // order is kept
    let keys: Vec<&str> = normalized.iter().map(|(k, _)| *k).collect();
    assert_eq!(keys, vec!["A", "C", "G", "T"]);
}

#[test]
fn test_normalize_degenerate() {
    assert!(matches!(
        normalize(&[("AA", 0.0), ("BB", 0.0)]),
        Err(MotifError::DegenerateWeights)
    ));
    let empty: [(&str, f64); 0] = [];
    assert!(matches!(normalize(&empty), Err(MotifError::DegenerateWeights)));
    assert!(matches!(
        normalize(&[("AA", -1.0), ("BB", 2.0)]),
        Err(MotifError::InvalidInput(_))
    ));
    assert!(normalize(&[("AA", f64::NAN)]).is_err());
}

#[test]
fn test_weighted_choice_frequencies() {
    let mut rng = StdRng::seed_from_u64(17);
    let probabilities = [("A", 0.1), ("B", 0.6), ("C", 0.3)];

    let draws = 10_000;
    let mut hits = [0usize; 3];
    for _ in 0..draws {
        match weighted_choice(&probabilities, &mut rng).unwrap() {
            "A" => hits[0] += 1,
            "B" => hits[1] += 1,
            _ => hits[2] += 1,
        }
    }

    for (hit, (_, p)) in hits.iter().zip(probabilities) {
        assert_abs_diff_eq!(*hit as f64 / draws as f64, p, epsilon = 0.03);
    }
}

#[test]
fn test_weighted_choice_is_reproducible() {
    let probabilities = [(0usize, 0.25), (1, 0.25), (2, 0.25), (3, 0.25)];
    let mut first = StdRng::seed_from_u64(99);
    let mut second = StdRng::seed_from_u64(99);
    for _ in 0..20 {
        assert_eq!(
            weighted_choice(&probabilities, &mut first).unwrap(),
            weighted_choice(&probabilities, &mut second).unwrap()
        );
    }
}

#[test]
fn test_profile_generated_kmer() {
    let mut rng = StdRng::seed_from_u64(4);

    // only one k-mer has non-zero probability
    let profile = stats::profile(&["GC"]).unwrap();
    for _ in 0..20 {
        assert_eq!(profile_generated_kmer("AAGCTT", &profile, 2, &mut rng).unwrap(), "GC");
    }

    // every k-mer is reachable under a uniform profile
    let uniform = ProfileMatrix::from_rows([vec![0.25; 2], vec![0.25; 2], vec![0.25; 2], vec![0.25; 2]])
        .unwrap();
    let text = "ACGTA";
    let mut starts = [false; 4];
    for _ in 0..400 {
        let kmer = profile_generated_kmer(text, &uniform, 2, &mut rng).unwrap();
        starts[kmer.as_ptr() as usize - text.as_ptr() as usize] = true;
    }
    assert!(starts.iter().all(|&seen| seen));
}

#[test]
fn test_profile_generated_kmer_errors() {
    let mut rng = StdRng::seed_from_u64(4);
    let profile = stats::profile(&["GC"]).unwrap();

    // no k-mer can be generated
    assert!(matches!(
        profile_generated_kmer("AAAA", &profile, 2, &mut rng),
        Err(MotifError::DegenerateWeights)
    ));
    assert!(matches!(
        profile_generated_kmer("AAUA", &profile, 2, &mut rng),
        Err(MotifError::UnknownSymbol { position: 2, .. })
    ));
    assert!(matches!(
        profile_generated_kmer("A", &profile, 2, &mut rng),
        Err(MotifError::InvalidInput(_))
    ));
}
