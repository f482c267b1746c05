mod common;

use approx::assert_relative_eq;
use common::test_telescope;
use vega_core::photometry::{electron_rate_from_magnitude, magnitude_from_electron_rate};

const QE: f64 = 0.8;
const SCALE: f64 = 0.78;

#[test]
fn test_magnitude_rate_round_trip() {
    let telescope = test_telescope();
    for mag in [12.0, 18.5, 20.5, 22.0, 25.0] {
        let rate = electron_rate_from_magnitude(mag, &telescope, QE, SCALE);
        let back = magnitude_from_electron_rate(rate, &telescope, QE, SCALE).unwrap();
        assert_relative_eq!(back, mag, epsilon = 1e-9);
    }
}

#[test]
fn test_brighter_sky_gives_more_electrons() {
    let telescope = test_telescope();
    let bright = electron_rate_from_magnitude(18.0, &telescope, QE, SCALE);
    let dark = electron_rate_from_magnitude(21.0, &telescope, QE, SCALE);
    assert!(
        bright > dark,
        "mag 18 sky ({bright}) should outshine mag 21 sky ({dark})"
    );
}

#[test]
fn test_five_magnitudes_is_factor_100() {
    let telescope = test_telescope();
    let rate_m15 = electron_rate_from_magnitude(15.0, &telescope, QE, SCALE);
    let rate_m20 = electron_rate_from_magnitude(20.0, &telescope, QE, SCALE);
    assert_relative_eq!(rate_m15 / rate_m20, 100.0, epsilon = 1e-9);
}

#[test]
fn test_rate_scales_with_aperture_area() {
    let mut telescope = test_telescope();
    let small = electron_rate_from_magnitude(20.0, &telescope, QE, SCALE);
    telescope.aperture_mm *= 2.0;
    let large = electron_rate_from_magnitude(20.0, &telescope, QE, SCALE);
    assert_relative_eq!(large / small, 4.0, epsilon = 1e-12);
}

#[test]
fn test_zero_rate_has_no_magnitude() {
    let telescope = test_telescope();
    assert!(magnitude_from_electron_rate(0.0, &telescope, QE, SCALE).is_none());
    assert!(magnitude_from_electron_rate(-1.0, &telescope, QE, SCALE).is_none());
}
