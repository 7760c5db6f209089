//! Property-based tests for the time distortion transform
//!
//! Covers boundedness, monotonicity in E, the zero-M identity and the
//! unequal-length failure mode.

use proptest::prelude::*;
use ptlx::{PtlxError, TransformParams};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_output_bounded_by_alpha(
        m in -1.0f64..=1.0,
        e in -1.0f64..=1.0,
        r in 0.0f64..=1.0,
        alpha in 0.1f64..5.0,
        beta in 0.01f64..1.0,
        gamma in 0.1f64..1.0,
    ) {
        // Property: with R + gamma > 0 the output stays strictly inside (-alpha, alpha)
        let params = TransformParams::new(alpha, beta, gamma);
        let t = params.time_distortion(m, e, r);
        prop_assert!(t > -alpha && t < alpha, "t={} alpha={}", t, alpha);
    }

    #[test]
    fn prop_monotonic_in_emotional_charge(
        m in 0.0f64..=1.0,
        e_low in 0.0f64..=1.0,
        delta in 0.0f64..=1.0,
        r in 0.0f64..=1.0,
        beta in 0.01f64..2.0,
        gamma in 0.01f64..1.0,
    ) {
        // Property: increasing E never decreases T' when M >= 0 and R + gamma > 0
        let params = TransformParams::new(1.0, beta, gamma);
        let e_high = e_low + delta;
        prop_assert!(params.time_distortion(m, e_high, r) >= params.time_distortion(m, e_low, r));
    }

    #[test]
    fn prop_zero_memory_is_zero(
        e in -10.0f64..10.0,
        r in -1.0f64..1.0,
        gamma in 0.01f64..1.0,
    ) {
        prop_assume!((r + gamma).abs() > 1e-9);
        let params = TransformParams::new(1.0, 0.5, gamma);
        prop_assert_eq!(params.time_distortion(0.0, e, r), 0.0);
    }

    #[test]
    fn prop_apply_matches_scalar(
        values in prop::collection::vec((0.0f64..1.0, 0.0f64..1.0, 0.0f64..1.0), 0..64),
    ) {
        let params = TransformParams::default();
        let m: Vec<f64> = values.iter().map(|v| v.0).collect();
        let e: Vec<f64> = values.iter().map(|v| v.1).collect();
        let r: Vec<f64> = values.iter().map(|v| v.2).collect();

        let out = params.apply(&m, &e, &r).unwrap();
        prop_assert_eq!(out.len(), values.len());
        for (i, t) in out.iter().enumerate() {
            prop_assert_eq!(*t, params.time_distortion(m[i], e[i], r[i]));
        }
    }

    #[test]
    fn prop_unequal_lengths_rejected(
        len_m in 0usize..8,
        len_e in 0usize..8,
        len_r in 0usize..8,
    ) {
        prop_assume!(!(len_m == len_e && len_e == len_r));
        let result = TransformParams::default().apply(
            &vec![0.5; len_m],
            &vec![0.5; len_e],
            &vec![0.5; len_r],
        );
        let is_shape_mismatch = matches!(result, Err(PtlxError::ShapeMismatch { .. }));
        prop_assert!(is_shape_mismatch);
    }
}

#[test]
fn test_reference_example() {
    // M=0.8, E=0.9, R=0.2 -> argument 1.2 -> tanh(1.2)
    let t = TransformParams::default().time_distortion(0.8, 0.9, 0.2);
    assert!((t - 0.8337).abs() < 1e-4);
}

#[test]
fn test_zero_denominator_propagates_without_panic() {
    let params = TransformParams::default();
    let out = params
        .apply(&[0.5, -0.5, 0.0], &[0.5, 0.5, 0.5], &[-0.1, -0.1, -0.1])
        .unwrap();
    assert_eq!(out[0], 1.0);
    assert_eq!(out[1], -1.0);
    assert!(out[2].is_nan());
}
