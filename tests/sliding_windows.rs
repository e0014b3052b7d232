//! Sliding-window behaviour through the library API.
//!
//! Covers the reference outputs for small inputs plus properties checked
//! against a brute-force scan over seeded random inputs:
//! 1. Every emitted window holds exactly the records that intersect it
//! 2. Window positions start at 0 on each chromosome and advance by `step`
//! 3. Aggregates do not depend on the order of equal-position records

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use slide_genomics::prelude::*;
use slide_genomics::streaming::ActiveSet;

// =============================================================================
// Helper functions
// =============================================================================

fn iv(chrom: &str, left: f64, right: f64, value: f64) -> Interval {
    Interval::new(chrom, left, right, value)
}

fn means(records: Vec<Interval>, size: f64, step: f64) -> Vec<(String, f64, f64, f64)> {
    let engine = WindowingEngine::new(
        VecSource::new(records),
        WindowConfig::new(size, step).unwrap(),
    );
    engine
        .collect_windows(|w| (w.chrom.to_string(), w.left, w.right, Mean.reduce(w.active).value))
        .unwrap()
}

fn unit_records(chrom: &str) -> Vec<Interval> {
    (0..5).map(|i| iv(chrom, i as f64, i as f64 + 1.0, 1.0)).collect()
}

/// Sorted random records on a few chromosomes, some with missing values.
fn random_records(rng: &mut StdRng) -> Vec<Interval> {
    let mut records = Vec::new();
    for chrom in ["chr1", "chr2", "chrX"] {
        let n = rng.gen_range(0..40);
        let mut chrom_records: Vec<Interval> = (0..n)
            .map(|_| {
                let left = rng.gen_range(0..400) as f64;
                let len = rng.gen_range(0..60) as f64;
                let value = if rng.gen_bool(0.1) {
                    f64::NAN
                } else {
                    rng.gen_range(-50.0..50.0)
                };
                iv(chrom, left, left + len, value)
            })
            .collect();
        chrom_records.sort_by(|a, b| a.left.total_cmp(&b.left));
        records.extend(chrom_records);
    }
    records
}

fn brute_force_active(records: &[Interval], chrom: &str, left: f64, right: f64) -> ActiveSet {
    records
        .iter()
        .filter(|r| r.chrom == chrom && r.intersects(left, right))
        .cloned()
        .collect()
}

// =============================================================================
// Reference outputs
// =============================================================================

#[test]
fn test_unit_records_size2_step1() {
    let got = means(unit_records("chr1"), 2.0, 1.0);
    let expected = vec![
        ("chr1".to_string(), 0.0, 2.0, 1.0),
        ("chr1".to_string(), 1.0, 3.0, 1.0),
        ("chr1".to_string(), 2.0, 4.0, 1.0),
        ("chr1".to_string(), 3.0, 5.0, 1.0),
    ];
    assert_eq!(got, expected);
}

#[test]
fn test_second_chromosome_only() {
    let got = means(unit_records("chr2"), 2.0, 1.0);
    assert_eq!(got.len(), 4);
    assert!(got.iter().all(|w| w.0 == "chr2" && w.3 == 1.0));
}

#[test]
fn test_long_first_record() {
    let mut records = vec![iv("chr1", 0.0, 3.0, 4.0)];
    records.extend(unit_records("chr1"));
    let got: Vec<(f64, f64, f64)> = means(records, 2.0, 1.0)
        .into_iter()
        .map(|w| (w.1, w.2, w.3))
        .collect();
    assert_eq!(
        got,
        vec![(0.0, 2.0, 2.0), (1.0, 3.0, 2.0), (2.0, 4.0, 2.0), (3.0, 5.0, 1.0)]
    );
}

#[test]
fn test_size40_step10() {
    let records = vec![
        iv("chr1", 0.0, 10.0, 3.0),
        iv("chr1", 30.0, 45.0, 7.0),
        iv("chr1", 40.0, 50.0, 5.0),
    ];
    let got: Vec<(f64, f64, f64)> = means(records, 40.0, 10.0)
        .into_iter()
        .map(|w| (w.1, w.2, w.3))
        .collect();
    assert_eq!(got, vec![(0.0, 40.0, 5.0), (10.0, 50.0, 6.0)]);
}

#[test]
fn test_two_chromosomes_back_to_back() {
    let mut records = unit_records("chr1");
    records.extend(unit_records("chr2"));
    let got = means(records, 2.0, 1.0);
    assert_eq!(got.len(), 8);
    assert_eq!(got[4].0, "chr2");
    assert_eq!((got[4].1, got[4].2), (0.0, 2.0));
}

#[test]
fn test_empty_input() {
    assert!(means(Vec::new(), 2.0, 1.0).is_empty());
}

// =============================================================================
// Properties over random inputs
// =============================================================================

#[test]
fn test_windows_match_brute_force() {
    let configs = [(10.0, 5.0), (25.0, 25.0), (7.0, 30.0), (3.5, 1.25)];
    let mut rng = StdRng::seed_from_u64(0x5eed);

    for round in 0..25 {
        let records = random_records(&mut rng);
        for &(size, step) in &configs {
            let mut engine = WindowingEngine::new(
                VecSource::new(records.clone()),
                WindowConfig::new(size, step).unwrap(),
            );
            while engine.step().unwrap() {
                let expected = brute_force_active(&records, engine.chrom(), engine.left(), engine.right());
                assert_eq!(
                    engine.active().len(),
                    expected.len(),
                    "round {} size {} step {} window {}:{}-{}",
                    round,
                    size,
                    step,
                    engine.chrom(),
                    engine.left(),
                    engine.right()
                );

                let got = Mean.reduce(engine.active());
                let want = Mean.reduce(&expected);
                assert_eq!(got.defined, want.defined);
                if want.defined {
                    assert_eq!(got.value, want.value);
                }
                assert_eq!(Sum.reduce(engine.active()), Sum.reduce(&expected));
                assert_eq!(Coverage.reduce(engine.active()), Coverage.reduce(&expected));
            }
        }
    }
}

#[test]
fn test_window_positions_step_from_zero() {
    let mut rng = StdRng::seed_from_u64(42);
    let records = random_records(&mut rng);
    let step = 0.7;
    let windows = WindowingEngine::new(
        VecSource::new(records),
        WindowConfig::new(5.0, step).unwrap(),
    )
    .collect_windows(|w| (w.chrom.to_string(), w.left, w.right))
    .unwrap();

    let mut expected_index = 0u64;
    let mut current = String::new();
    for (chrom, left, right) in windows {
        if chrom != current {
            current = chrom;
            expected_index = 0;
        }
        assert_eq!(left, expected_index as f64 * step);
        assert_eq!(right, left + 5.0);
        expected_index += 1;
    }
}

#[test]
fn test_each_chromosome_visited_once() {
    let mut rng = StdRng::seed_from_u64(7);
    let records = random_records(&mut rng);
    let mut expected: Vec<String> = Vec::new();
    for r in &records {
        if expected.last() != Some(&r.chrom) {
            expected.push(r.chrom.clone());
        }
    }

    let windows = WindowingEngine::new(
        VecSource::new(records),
        WindowConfig::new(20.0, 10.0).unwrap(),
    )
    .collect_windows(|w| w.chrom.to_string())
    .unwrap();
    let mut seen: Vec<String> = Vec::new();
    for chrom in windows {
        if seen.last() != Some(&chrom) {
            seen.push(chrom);
        }
    }
    assert_eq!(seen, expected);
}

#[test]
fn test_order_of_equal_records_does_not_matter() {
    let mut rng = StdRng::seed_from_u64(99);
    let mut records: Vec<Interval> = (0..200)
        .map(|_| iv("chr1", 0.0, 10.0, rng.gen_range(-1e6..1e6)))
        .collect();

    let baseline = means(records.clone(), 10.0, 10.0);
    for _ in 0..10 {
        records.shuffle(&mut rng);
        assert_eq!(means(records.clone(), 10.0, 10.0), baseline);
    }
}

#[test]
fn test_lookahead_stays_small_across_gaps() {
    let mut records = vec![iv("chr1", 0.0, 1.0, 1.0)];
    records.extend((0..100).map(|i| iv("chr1", 100_000.0 + i as f64, 100_001.0 + i as f64, 1.0)));
    let mut engine = WindowingEngine::new(
        VecSource::new(records),
        WindowConfig::new(10.0, 10.0).unwrap(),
    );
    while engine.step().unwrap() {
        if engine.right() < 100_000.0 {
            assert!(engine.state().lookahead().len() <= 1);
        }
    }
    let stats = engine.stats();
    assert_eq!(stats.records, 101);
    // One window's worth of records plus the first one beyond it
    assert!(stats.max_lookahead <= 11, "lookahead grew to {}", stats.max_lookahead);
    assert!(stats.max_active <= 10);
}

#[test]
fn test_coverage_of_very_wide_record() {
    let mut engine = WindowingEngine::new(
        VecSource::new(vec![iv("chr1", -5e18, 5e18, 1.0)]),
        WindowConfig::new(10.0, 10.0).unwrap(),
    );
    assert!(engine.step().unwrap());
    assert_eq!(engine.active().len(), 1);
    assert_eq!(Coverage.reduce(engine.active()).value, 1e19);
    assert!(!engine.step().unwrap());
}
