// src/quantize/tests.rs

use super::*;
use test_log::test;

fn rtn(value: f64, margin: u32, min_val: u32) -> u32 {
    round_to_nearest(value, margin, min_val).unwrap()
}

#[test]
fn rounds_half_away_from_zero() {
    assert_eq!(rtn(20.51, 1, 0), 21);
    assert_eq!(rtn(20.5, 1, 0), 21);
    assert_eq!(rtn(20.49, 1, 0), 20);
    assert_eq!(rtn(2.5, 1, 0), 3);
}

#[test]
fn rounds_to_margin() {
    assert_eq!(rtn(20.0, 6, 0), 18);
    assert_eq!(rtn(19.99, 6, 0), 18);
    assert_eq!(rtn(21.0, 6, 0), 24);
    assert_eq!(rtn(22.0, 6, 0), 24);
}

#[test]
fn rounds_small_values_to_six() {
    let expected = [
        (0.0, 0),
        (1.0, 0),
        (2.0, 0),
        (2.99999, 0),
        (3.0, 6),
        (3.11111, 6),
        (4.0, 6),
        (5.0, 6),
        (6.0, 6),
        (7.0, 6),
        (8.0, 6),
        (8.99999, 6),
        (9.0, 12),
    ];
    for (value, rounded) in expected {
        assert_eq!(rtn(value, 6, 0), rounded, "rounding {}", value);
    }
}

#[test]
fn clamps_to_minimum() {
    assert_eq!(rtn(0.0, 2, 6), 6);
    assert_eq!(rtn(12.0, 2, 6), 12);
    for value in [0.0, 1.0, 2.0, 2.99999] {
        assert_eq!(rtn(value, 6, 4), 4);
    }
}

#[test]
fn negative_and_nan_values_fall_to_minimum() {
    assert_eq!(rtn(-7.0, 6, 0), 0);
    assert_eq!(rtn(-7.0, 6, 6), 6);
    assert_eq!(rtn(f64::NAN, 1, 3), 3);
}

#[test]
fn zero_margin_is_rejected() {
    assert!(matches!(
        round_to_nearest(1.0, 0, 0),
        Err(PatternError::InvalidMargin)
    ));
    assert!(round_to_nearest_iter(vec![1.0], 0, 0).is_err());
}

#[test]
fn iter_rounds_every_item() {
    let values = (0..10).map(f64::from);
    let rounded: Vec<u32> = round_to_nearest_iter(values, 2, 4).unwrap().collect();
    assert_eq!(rounded, vec![4, 4, 4, 4, 4, 6, 6, 8, 8, 10]);
}

#[test]
fn iter_preserves_length_and_invariants() {
    let values: Vec<f64> = (0..200).map(|i| f64::from(i) * 0.37 - 5.0).collect();
    for (margin, min_val) in [(1, 0), (6, 6), (6, 0), (4, 8)] {
        let rounded: Vec<u32> = round_to_nearest_iter(values.iter().cloned(), margin, min_val)
            .unwrap()
            .collect();
        assert_eq!(rounded.len(), values.len());
        for count in rounded {
            assert_eq!(count % margin, 0);
            assert!(count >= min_val);
        }
    }
}

#[test]
fn iter_is_lazy_over_unbounded_input() {
    let unbounded = (0u32..).map(f64::from);
    let first: Vec<u32> = Quantizer::new(6, 0)
        .unwrap()
        .quantize(unbounded)
        .take(5)
        .collect();
    assert_eq!(first, vec![0, 0, 0, 6, 6]);
}

#[test]
fn iter_keeps_exact_size() {
    let quantizer = Quantizer::new(PRACTICAL_MARGIN, 6).unwrap();
    assert_eq!(quantizer.margin(), 6);
    assert_eq!(quantizer.min_val(), 6);
    let rounded = quantizer.quantize(vec![1.0, 2.0, 3.0]);
    assert_eq!(rounded.len(), 3);
}
