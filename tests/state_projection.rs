use bloch_scope::core::state::{from_rotation_angle, project};
use bloch_scope::core::{BlochError, BlochVector};
use num_complex::Complex64 as C64;
use proptest::prelude::*;
use std::f64::consts::{FRAC_1_SQRT_2, FRAC_PI_2};

fn assert_close(v: BlochVector, x: f64, y: f64, z: f64) {
    assert!(
        (v.x - x).abs() < 1e-9 && (v.y - y).abs() < 1e-9 && (v.z - z).abs() < 1e-9,
        "expected ({x}, {y}, {z}), got {v:?}"
    );
}

#[test]
fn canonical_states() {
    assert_close(project(C64::new(1.0, 0.0), C64::new(0.0, 0.0)).unwrap(), 0.0, 0.0, 1.0);
    assert_close(project(C64::new(0.0, 0.0), C64::new(1.0, 0.0)).unwrap(), 0.0, 0.0, -1.0);
    assert_close(
        project(C64::new(FRAC_1_SQRT_2, 0.0), C64::new(FRAC_1_SQRT_2, 0.0)).unwrap(),
        1.0,
        0.0,
        0.0,
    );
}

#[test]
fn rotation_angle_trajectory() {
    assert_close(from_rotation_angle(0.0), 0.0, 0.0, 1.0);
    let eq = from_rotation_angle(FRAC_PI_2);
    assert!((eq.x - 1.0).abs() < 1e-9, "x ≈ 1, got {}", eq.x);
    assert!(eq.y.abs() < 1e-12);
    assert!(eq.z.abs() < 1e-9);
}

#[test]
fn zero_norm_is_rejected() {
    let err = project(C64::new(0.0, 0.0), C64::new(0.0, 0.0)).unwrap_err();
    assert!(matches!(err, BlochError::DegenerateState));
}

proptest! {
    #[test]
    fn pure_states_have_unit_length(
        ar in -10.0f64..10.0, ai in -10.0f64..10.0,
        br in -10.0f64..10.0, bi in -10.0f64..10.0,
    ) {
        let alpha = C64::new(ar, ai);
        let beta = C64::new(br, bi);
        prop_assume!(alpha.norm() > 1e-6 && beta.norm() > 1e-6);
        let v = project(alpha, beta).unwrap();
        let len2 = v.x * v.x + v.y * v.y + v.z * v.z;
        prop_assert!((len2 - 1.0).abs() < 1e-9, "|v|² = {}", len2);
    }

    #[test]
    fn rotation_stays_in_xz_plane(theta in -10.0f64..10.0) {
        let v = from_rotation_angle(theta);
        prop_assert!(v.y.abs() < 1e-12);
        prop_assert!((v.length() - 1.0).abs() < 1e-9);
        prop_assert!((v.z - theta.cos()).abs() < 1e-9);
    }
}
