use approx::assert_abs_diff_eq;
use motif_search_rs::error::MotifError;
use motif_search_rs::stats;

const MOTIFS: [&str; 5] = ["AACGTA", "CCCGTT", "CACCTT", "GGATTA", "TTCCGG"];

#[test]
fn test_count() {
    let counts = stats::count(&MOTIFS).unwrap();
    assert_eq!(counts.width(), 6);
    assert_eq!(counts.total(), 5);
    assert_eq!(counts.get(b'A', 0).unwrap(), Some(1));
    assert_eq!(counts.get(b'C', 2).unwrap(), Some(4));
    assert_eq!(counts.get(b'T', 4).unwrap(), Some(4));
    assert_eq!(counts.get(b'A', 6).unwrap(), None);

    // rows in A, C, G, T order
    let expected = [
        [1, 2, 1, 0, 0, 2],
        [2, 1, 4, 2, 0, 0],
        [1, 1, 0, 2, 1, 1],
        [1, 1, 0, 1, 4, 2],
    ];
    for (row, values) in expected.iter().enumerate() {
        assert_eq!(counts.as_array().row(row).to_vec(), values.to_vec());
    }

    // every column sums to the number of motifs
    assert!(counts.column_sums().iter().all(|&sum| sum == 5));
}

#[test]
fn test_count_with_pseudocounts() {
    let counts = stats::count_with_pseudocounts(&MOTIFS).unwrap();
    assert_eq!(counts.total(), 9);
    assert_eq!(counts.get(b'A', 0).unwrap(), Some(2));
    assert_eq!(counts.get(b'G', 2).unwrap(), Some(1));
    assert!(counts.column_sums().iter().all(|&sum| sum == 9));
}

#[test]
fn test_count_invalid_input() {
    // empty collection
    let empty: [&str; 0] = [];
    assert!(matches!(stats::count(&empty), Err(MotifError::InvalidInput(_))));

    // unequal lengths
    assert!(matches!(
        stats::count(&["ACGT", "ACG"]),
        Err(MotifError::InvalidInput(_))
    ));

    // unknown symbol
    assert!(matches!(
        stats::count(&["ACGT", "ACNT"]),
        Err(MotifError::UnknownSymbol {
            position: 2,
            symbol: 'N'
        })
    ));
}

#[test]
fn test_profile() {
    let profile = stats::profile(&["AC", "AG"]).unwrap();
    assert_eq!(profile.get(b'A', 0).unwrap(), Some(1.0));
    assert_eq!(profile.get(b'C', 1).unwrap(), Some(0.5));
    assert_eq!(profile.get(b'T', 1).unwrap(), Some(0.0));

    let profile = stats::profile_with_pseudocounts(&["AC", "AG"]).unwrap();
    assert_abs_diff_eq!(profile.get(b'A', 0).unwrap().unwrap(), 0.5);
    assert_abs_diff_eq!(profile.get(b'T', 1).unwrap().unwrap(), 1.0 / 6.0);
    assert_abs_diff_eq!(profile.get(b'G', 1).unwrap().unwrap(), 1.0 / 3.0);
}

#[test]
fn test_profile_columns_sum_to_one() {
    for motifs in [
        MOTIFS.to_vec(),
        vec!["ACGTACGT"],
        vec!["AAAA", "CCCC", "GGGG"],
    ] {
        for profile in [
            stats::profile(&motifs).unwrap(),
            stats::profile_with_pseudocounts(&motifs).unwrap(),
        ] {
            for sum in profile.column_sums().iter() {
                assert_abs_diff_eq!(*sum, 1.0, epsilon = 1e-9);
            }
        }
    }
}

#[test]
fn test_consensus() {
    // ties at positions 3 and 5 go to the earlier symbol (C over G, A over T)
    assert_eq!(stats::consensus(&MOTIFS).unwrap(), "CACCTA");
    assert_eq!(stats::consensus_with_pseudocounts(&MOTIFS).unwrap(), "CACCTA");

    // all symbols tied
    assert_eq!(stats::consensus(&["T", "G", "C", "A"]).unwrap(), "A");

    // copies of a single sequence
    let copies = vec!["GATTACA"; 4];
    assert_eq!(stats::consensus(&copies).unwrap(), "GATTACA");
}

#[test]
fn test_score() {
    assert_eq!(stats::score(&["AAA", "AAA", "AAT"]).unwrap(), 1);
    assert_eq!(stats::score(&MOTIFS).unwrap(), 14);

    // pseudocounts add 3 per column
    assert_eq!(stats::score_with_pseudocounts(&MOTIFS).unwrap(), 14 + 3 * 6);
}

#[test]
fn test_score_zero_iff_identical() {
    assert_eq!(stats::score(&["ACGT", "ACGT", "ACGT"]).unwrap(), 0);
    assert!(stats::score(&["ACGT", "ACGT", "ACGA"]).unwrap() > 0);
    assert!(stats::score(&["ACGT", "TCGT"]).unwrap() > 0);
}

#[test]
fn test_entropy() {
    // fully conserved motifs carry no entropy
    assert_abs_diff_eq!(stats::entropy_score(&["ACG", "ACG"]).unwrap(), 0.0);

    // last column is 2/3 A, 1/3 T
    assert_abs_diff_eq!(
        stats::entropy_score(&["AAA", "AAA", "AAT"]).unwrap(),
        0.9182958340544896,
        epsilon = 1e-12
    );

    // a uniform column carries 2 bits
    assert_abs_diff_eq!(
        stats::entropy_score(&["A", "C", "G", "T"]).unwrap(),
        2.0,
        epsilon = 1e-12
    );

    assert_abs_diff_eq!(
        stats::entropy_score(&MOTIFS).unwrap(),
        8.331568569324173,
        epsilon = 1e-9
    );

    let matrix = stats::entropy_matrix(&["AAA", "AAA", "AAT"]).unwrap();
    assert_eq!(matrix.dim(), (4, 3));
    assert_eq!(matrix[[1, 2]], 0.0);
    assert_abs_diff_eq!(matrix[[0, 2]], (2.0f64 / 3.0) * (2.0f64 / 3.0).log2());
}
