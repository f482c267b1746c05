use ndarray::Array2;

use vega_core::stretch::{auto_stretch, stretch};

fn make_ramp(h: usize, w: usize, max: f64) -> Array2<f64> {
    Array2::from_shape_fn((h, w), |(row, col)| {
        (row * w + col) as f64 / (h * w) as f64 * max
    })
}

#[test]
fn test_stretch_midpoint() {
    // 250 mapped from [0, 500] → [0, 1] = 0.5
    let image = Array2::from_elem((4, 4), 250.0);
    let stretched = stretch(&image, 0.0, 500.0);
    for v in stretched.iter() {
        assert!((*v - 0.5).abs() < 1e-9, "expected 0.5, got {v}");
    }
}

#[test]
fn test_stretch_clips_below_black_point() {
    let image = Array2::from_elem((4, 4), 100.0);
    let stretched = stretch(&image, 500.0, 1000.0);
    for v in stretched.iter() {
        assert!((*v).abs() < 1e-9);
    }
}

#[test]
fn test_stretch_clips_above_white_point() {
    let image = Array2::from_elem((4, 4), 2000.0);
    let stretched = stretch(&image, 0.0, 1000.0);
    for v in stretched.iter() {
        assert!((*v - 1.0).abs() < 1e-9);
    }
}

#[test]
fn test_stretch_degenerate_range() {
    // black == white must not divide by zero
    let image = Array2::from_elem((4, 4), 100.0);
    let stretched = stretch(&image, 100.0, 100.0);
    for v in stretched.iter() {
        assert!(v.is_finite());
    }
}

#[test]
fn test_auto_stretch_empty_image() {
    let image = Array2::<f64>::zeros((0, 0));
    let stretched = auto_stretch(&image, 0.001, 0.999);
    assert_eq!(stretched.dim(), (0, 0));
}

#[test]
fn test_auto_stretch_full_range() {
    let image = make_ramp(32, 32, 65_535.0);
    let stretched = auto_stretch(&image, 0.0, 1.0);

    let min = stretched.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = stretched.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    assert!(min.abs() < 1e-9, "min should map to 0, got {min}");
    assert!((max - 1.0).abs() < 1e-9, "max should map to 1, got {max}");
}

#[test]
fn test_auto_stretch_saturates_tails() {
    let mut image = make_ramp(32, 32, 1000.0);
    // A hot pixel far above the rest must not crush the stretch.
    image[[0, 0]] = 1e9;
    let stretched = auto_stretch(&image, 0.001, 0.999);
    assert!((stretched[[0, 0]] - 1.0).abs() < 1e-9);

    // The bulk of the ramp should still span most of [0, 1].
    let median = {
        let mut v: Vec<f64> = stretched.iter().copied().collect();
        v.sort_by(|a, b| a.partial_cmp(b).unwrap());
        v[v.len() / 2]
    };
    assert!(median > 0.25 && median < 0.75, "median was {median}");
}
