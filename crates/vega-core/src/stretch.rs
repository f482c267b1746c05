use ndarray::Array2;

use crate::consts::EPSILON;

/// Linear stretch: maps [black_point, white_point] → [0.0, 1.0].
pub fn stretch(image: &Array2<f64>, black_point: f64, white_point: f64) -> Array2<f64> {
    let range = white_point - black_point;
    let range = if range.abs() < EPSILON { 1.0 } else { range };

    image.mapv(|v| ((v - black_point) / range).clamp(0.0, 1.0))
}

/// Automatic stretch using percentile-based black/white points.
///
/// `low_percentile` and `high_percentile` are in [0.0, 1.0].
/// Default: 0.001 (0.1%) and 0.999 (99.9%).
pub fn auto_stretch(image: &Array2<f64>, low_percentile: f64, high_percentile: f64) -> Array2<f64> {
    let mut sorted: Vec<f64> = image.iter().copied().collect();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap());

    let n = sorted.len();
    if n == 0 {
        return image.clone();
    }
    let lo_idx = ((n as f64 * low_percentile) as usize).min(n - 1);
    let hi_idx = ((n as f64 * high_percentile) as usize).min(n - 1);

    let black_point = sorted[lo_idx];
    let white_point = sorted[hi_idx];

    stretch(image, black_point, white_point)
}
