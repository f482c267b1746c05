mod common;

use approx::assert_relative_eq;
use common::test_camera;
use ndarray::Array2;
use vega_core::signal::SignalRates;
use vega_core::simulate::{gaussian_spot, simulate_frame, simulate_stack};

fn flat_rates(sky: f64, dark: f64) -> SignalRates {
    SignalRates {
        target_e_per_s: 0.0,
        sky_e_per_s: sky,
        dark_e_per_s: dark,
    }
}

#[test]
fn test_frame_dimensions_match_target_map() {
    let camera = test_camera();
    let gain = camera.gain_for(0).unwrap().clone();
    let target = Array2::<f64>::zeros((48, 64));
    let frame =
        simulate_frame(&camera, &gain, &flat_rates(10.0, 0.1), &target, 1.0, 42).unwrap();
    assert_eq!(frame.dim(), (48, 64));
}

#[test]
fn test_same_seed_is_bit_identical() {
    let camera = test_camera();
    let gain = camera.gain_for(0).unwrap().clone();
    let target = gaussian_spot(32, 32, 4.0, 50.0);
    let rates = flat_rates(5.0, 0.05);

    let a = simulate_frame(&camera, &gain, &rates, &target, 2.0, 1234).unwrap();
    let b = simulate_frame(&camera, &gain, &rates, &target, 2.0, 1234).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_different_seeds_differ() {
    let camera = test_camera();
    let gain = camera.gain_for(0).unwrap().clone();
    let target = Array2::<f64>::zeros((32, 32));
    let rates = flat_rates(50.0, 0.0);

    let a = simulate_frame(&camera, &gain, &rates, &target, 1.0, 1).unwrap();
    let b = simulate_frame(&camera, &gain, &rates, &target, 1.0, 2).unwrap();
    assert_ne!(a, b);
}

#[test]
fn test_output_clipped_to_sensor_range() {
    let camera = test_camera();
    let gain = camera.gain_for(0).unwrap().clone();
    // Enormous target rate to force saturation at the center.
    let target = gaussian_spot(32, 32, 6.0, 1e7);
    let frame =
        simulate_frame(&camera, &gain, &flat_rates(10.0, 0.1), &target, 10.0, 99).unwrap();

    for &v in frame.iter() {
        assert!(
            (0.0..=camera.white_level_adu).contains(&v),
            "ADU value {v} outside sensor range"
        );
    }
    // Center pixel should be pinned at white.
    assert_relative_eq!(frame[[15, 15]], camera.white_level_adu);
    assert_relative_eq!(frame[[16, 16]], camera.white_level_adu);
}

#[test]
fn test_mean_level_matches_expectation() {
    let camera = test_camera();
    let gain = camera.gain_for(0).unwrap().clone();
    let target = Array2::<f64>::zeros((128, 128));
    // 400 e- of sky at 1.0 e-/ADU over a 500 ADU pedestal → mean ≈ 900 ADU
    let frame =
        simulate_frame(&camera, &gain, &flat_rates(400.0, 0.0), &target, 1.0, 77).unwrap();

    let mean = frame.mean().unwrap();
    // Standard error of the mean: sqrt(400 + 9)/128 ≈ 0.16 ADU
    assert_relative_eq!(mean, 900.0, epsilon = 2.0);
}

#[test]
fn test_stack_is_deterministic_for_fixed_seed() {
    let camera = test_camera();
    let gain = camera.gain_for(0).unwrap().clone();
    let target = gaussian_spot(32, 32, 4.0, 20.0);
    let rates = flat_rates(5.0, 0.05);

    let a = simulate_stack(&camera, &gain, &rates, &target, 2.0, 8, Some(5)).unwrap();
    let b = simulate_stack(&camera, &gain, &rates, &target, 2.0, 8, Some(5)).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_parallel_stack_is_bit_identical_across_runs() {
    // Enough subframes that rayon splits the generation into several
    // jobs; the summation order must not depend on how they interleave.
    let camera = test_camera();
    let gain = camera.gain_for(0).unwrap().clone();
    let target = gaussian_spot(32, 32, 4.0, 20.0);
    let rates = flat_rates(50.0, 0.1);

    let first = simulate_stack(&camera, &gain, &rates, &target, 1.0, 64, Some(21)).unwrap();
    for _ in 0..5 {
        let again = simulate_stack(&camera, &gain, &rates, &target, 1.0, 64, Some(21)).unwrap();
        assert_eq!(first, again);
    }
}

#[test]
fn test_stacking_reduces_noise() {
    let camera = test_camera();
    let gain = camera.gain_for(0).unwrap().clone();
    let target = Array2::<f64>::zeros((64, 64));
    let rates = flat_rates(200.0, 0.0);

    let single = simulate_stack(&camera, &gain, &rates, &target, 1.0, 1, Some(3)).unwrap();
    let stacked = simulate_stack(&camera, &gain, &rates, &target, 1.0, 16, Some(3)).unwrap();

    let var = |image: &Array2<f64>| {
        let mean = image.mean().unwrap();
        image.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / (image.len() - 1) as f64
    };

    assert!(
        var(&stacked) < var(&single) / 4.0,
        "16-frame stack variance ({}) should be well below single-frame variance ({})",
        var(&stacked),
        var(&single)
    );
}

#[test]
fn test_stack_rejects_zero_subframes() {
    let camera = test_camera();
    let gain = camera.gain_for(0).unwrap().clone();
    let target = Array2::<f64>::zeros((8, 8));
    assert!(
        simulate_stack(&camera, &gain, &flat_rates(1.0, 0.0), &target, 1.0, 0, Some(1)).is_err()
    );
}

#[test]
fn test_gaussian_spot_profile() {
    let spot = gaussian_spot(33, 33, 8.0, 100.0);
    // Peak at the center, falling off monotonically along the row.
    assert_relative_eq!(spot[[16, 16]], 100.0, epsilon = 1e-9);
    assert!(spot[[16, 20]] < spot[[16, 16]]);
    assert!(spot[[16, 24]] < spot[[16, 20]]);
    // Half maximum one half-FWHM from the center.
    assert_relative_eq!(spot[[16, 20]], 50.0, epsilon = 1e-6);
    // Corners are effectively dark.
    assert!(spot[[0, 0]] < 1e-3 * spot[[16, 16]]);
}
