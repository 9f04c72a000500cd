// src/shapes/tests.rs

use super::*;
use crate::error::PatternError;
use test_log::test;

const EPSILON: f64 = 1e-9;

#[test]
fn sphere_yields_one_value_per_row() {
    for rows in [1, 2, 5, 16, 40] {
        let sphere = Sphere::new(rows).unwrap();
        assert_eq!(sphere.len(), rows as usize);
        assert_eq!(sphere.count(), rows as usize);
    }
}

#[test]
fn sphere_is_unimodal() {
    let values: Vec<f64> = Sphere::new(16).unwrap().collect();
    let peak = values
        .iter()
        .cloned()
        .fold(f64::MIN, f64::max);
    let peak_index = values.iter().position(|v| *v == peak).unwrap();

    for pair in values[..=peak_index].windows(2) {
        assert!(pair[0] <= pair[1] + EPSILON, "not rising: {:?}", pair);
    }
    for pair in values[peak_index..].windows(2) {
        assert!(pair[0] + EPSILON >= pair[1], "not falling: {:?}", pair);
    }
    assert!(values[0] <= values[8]);
    assert!(values[15] <= values[8]);
}

#[test]
fn sphere_poles_match_closed_form() {
    let values: Vec<f64> = Sphere::new(16).unwrap().collect();
    // 2 * (rows + 1) * sin(pi / (rows + 1))
    let pole = 34.0 * (PI / 17.0).sin();
    assert!((values[0] - pole).abs() < EPSILON);
    assert!((values[15] - pole).abs() < EPSILON);
}

#[test]
fn sphere_rejects_zero_rows() {
    assert!(matches!(
        Sphere::new(0),
        Err(PatternError::InvalidRowCount { rows: 0, .. })
    ));
}

#[test]
fn sphere_accepts_the_largest_row_count() {
    let mut sphere = Sphere::new(u32::MAX).unwrap();
    assert_eq!(sphere.len(), u32::MAX as usize);
    let first = sphere.next().unwrap();
    assert!((first - 2.0 * PI).abs() < 1e-6, "{}", first);
}

#[test]
fn torus_starts_at_the_hole() {
    let values: Vec<f64> = Torus::new(18, 16).unwrap().collect();
    assert_eq!(values.len(), 16);
    assert!((values[0] - 18.0).abs() < EPSILON);
    // Halfway round the tube is the outer equator: hole + 2 * rows.
    assert!((values[8] - (18.0 + 32.0)).abs() < EPSILON);
    // The last row climbs back towards the hole's circumference.
    assert!(values[15] < values[14]);
    assert!(values[15] > values[0]);
}

#[test]
fn torus_initial_angle_shifts_the_curve() {
    let shifted: Vec<f64> = Torus::with_initial_angle(18, 16, PI).unwrap().collect();
    assert!((shifted[0] - 50.0).abs() < EPSILON);
}

#[test]
fn torus_rejects_bad_parameters() {
    assert!(matches!(
        Torus::new(18, 0),
        Err(PatternError::InvalidRowCount { rows: 0, .. })
    ));
    assert!(matches!(
        Torus::with_initial_angle(18, 16, f64::NAN),
        Err(PatternError::InvalidParameter { name: "initial_angle", .. })
    ));
}

#[test]
fn cone_runs_from_apex_to_base() {
    let values: Vec<f64> = Cone::new(16, 60).unwrap().collect();
    assert_eq!(values.len(), 16);
    assert_eq!(values[0], 6.0);
    assert_eq!(values[1], 6.0);
    assert!((values[2] - (6.0 + 54.0 / 14.0)).abs() < EPSILON);
    assert_eq!(values[15], 60.0);
}

#[test]
fn cone_with_two_rows_is_apex_and_base() {
    let values: Vec<f64> = Cone::new(2, 30).unwrap().collect();
    assert_eq!(values, vec![6.0, 30.0]);
}

#[test]
fn cone_honours_custom_minimum() {
    let values: Vec<f64> = Cone::with_minimum(4, 20, 8).unwrap().collect();
    assert_eq!(values, vec![8.0, 8.0, 14.0, 20.0]);
}

#[test]
fn cone_rejects_fewer_than_two_rows() {
    for rows in [0, 1] {
        assert!(matches!(
            Cone::new(rows, 60),
            Err(PatternError::InvalidRowCount { min: 2, .. })
        ));
    }
}

#[test]
fn shape_builds_matching_curve() {
    let shape = Shape::Cone { rows: 5, base: 24 };
    let curve = shape.curve().unwrap();
    assert!(matches!(curve, Curve::Cone(_)));
    assert_eq!(curve.len(), 5);
    assert_eq!(shape.rows(), 5);
    assert_eq!(shape.min_stitches(), 6);

    let torus = Shape::Torus {
        hole: 18,
        rows: 16,
        initial_angle: 0.0,
    };
    assert_eq!(torus.min_stitches(), 0);
    assert!(Shape::Sphere { rows: 0 }.curve().is_err());
}

#[test]
fn shape_titles() {
    assert_eq!(Shape::Sphere { rows: 16 }.to_string(), "Ball (16 rows)");
    assert_eq!(
        Shape::Torus {
            hole: 18,
            rows: 16,
            initial_angle: 0.0
        }
        .to_string(),
        "Donut (inner-radius: 18, 16 rows)"
    );
    assert_eq!(
        Shape::Cone { rows: 16, base: 60 }.to_string(),
        "Cone (16 rows, 60 max-circumference)"
    );
}
