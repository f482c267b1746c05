//! Sensor parameter estimation from calibration frames.
//!
//! The two-point photon-transfer method backs out conversion gain, read
//! noise and full-well capacity from the statistics of a pair of bias
//! frames, a pair of matched flat frames, and one saturated frame. Using
//! difference frames cancels fixed-pattern structure, so plain median/std
//! over a centered crop is enough; no regression is needed.

use ndarray::ArrayView2;
use tracing::debug;

use crate::error::{Result, VegaError};

/// Median and standard deviation over a cropped region.
#[derive(Clone, Copy, Debug)]
pub struct RegionStats {
    pub median: f64,
    pub std_dev: f64,
}

/// Estimated sensor parameters.
#[derive(Clone, Copy, Debug)]
pub struct SensorCalibration {
    /// Conversion gain in electrons per ADU.
    pub gain_e_per_adu: f64,
    /// Read noise RMS in electrons.
    pub read_noise_e: f64,
    /// Full-well capacity in electrons.
    pub saturation_e: f64,
}

/// Centered crop bounds for a fraction of each dimension.
fn crop_bounds(len: usize, fraction: f64) -> (usize, usize) {
    let keep = ((len as f64 * fraction).round() as usize).clamp(1, len);
    let start = (len - keep) / 2;
    (start, start + keep)
}

fn cropped<'a>(image: &'a ArrayView2<'a, f64>, fraction: f64) -> Result<ArrayView2<'a, f64>> {
    if !(fraction > 0.0 && fraction <= 1.0) {
        return Err(VegaError::Calibration(format!(
            "crop fraction must be in (0, 1], got {fraction}"
        )));
    }
    let (h, w) = image.dim();
    if h == 0 || w == 0 {
        return Err(VegaError::EmptyRegion);
    }
    let (r0, r1) = crop_bounds(h, fraction);
    let (c0, c1) = crop_bounds(w, fraction);
    Ok(image.slice(ndarray::s![r0..r1, c0..c1]))
}

fn ensure_same_shape(a: &ArrayView2<f64>, b: &ArrayView2<f64>) -> Result<()> {
    if a.dim() != b.dim() {
        let (a_height, a_width) = a.dim();
        let (b_height, b_width) = b.dim();
        return Err(VegaError::DimensionMismatch {
            a_width,
            a_height,
            b_width,
            b_height,
        });
    }
    Ok(())
}

/// Median and sample standard deviation over a centered crop.
///
/// `crop_fraction` is the fraction of each dimension kept, centered; 1.0
/// uses the whole frame. Cropping avoids vignetted flat edges and
/// amplifier glow corners.
pub fn region_stats(image: &ArrayView2<f64>, crop_fraction: f64) -> Result<RegionStats> {
    let region = cropped(image, crop_fraction)?;

    let mut values: Vec<f64> = region.iter().copied().collect();
    values.sort_by(|a, b| a.partial_cmp(b).unwrap());
    let n = values.len();
    let median = if n % 2 == 1 {
        values[n / 2]
    } else {
        (values[n / 2 - 1] + values[n / 2]) / 2.0
    };

    let mean = values.iter().sum::<f64>() / n as f64;
    let var = if n > 1 {
        values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / (n - 1) as f64
    } else {
        0.0
    };

    Ok(RegionStats {
        median,
        std_dev: var.sqrt(),
    })
}

/// Standard deviation of the pixel-wise difference of two frames over a
/// centered crop. Differencing cancels fixed-pattern noise shared by both
/// frames.
pub fn difference_std(
    a: &ArrayView2<f64>,
    b: &ArrayView2<f64>,
    crop_fraction: f64,
) -> Result<f64> {
    ensure_same_shape(a, b)?;
    let diff = a.to_owned() - b;
    Ok(region_stats(&diff.view(), crop_fraction)?.std_dev)
}

/// Two-point photon-transfer calibration.
///
/// Inputs are raw ADU frames: two bias exposures, two flat exposures at the
/// same (mid-scale) illumination, and one fully saturated flat. Returns the
/// conversion gain, read noise and full-well estimate:
///
/// - gain  = ((F̄₁ + F̄₂) − (B̄₁ + B̄₂)) / (σ²(F₁−F₂) − σ²(B₁−B₂))
/// - read  = gain · σ(B₁−B₂) / √2
/// - well  = gain · (saturated median − bias median)
pub fn photon_transfer(
    bias1: &ArrayView2<f64>,
    bias2: &ArrayView2<f64>,
    flat1: &ArrayView2<f64>,
    flat2: &ArrayView2<f64>,
    saturated: &ArrayView2<f64>,
    crop_fraction: f64,
) -> Result<SensorCalibration> {
    ensure_same_shape(bias1, bias2)?;
    ensure_same_shape(flat1, flat2)?;

    let bias1_stats = region_stats(bias1, crop_fraction)?;
    let bias2_stats = region_stats(bias2, crop_fraction)?;
    let flat1_stats = region_stats(flat1, crop_fraction)?;
    let flat2_stats = region_stats(flat2, crop_fraction)?;
    let saturated_stats = region_stats(saturated, crop_fraction)?;

    let bias_diff_std = difference_std(bias1, bias2, crop_fraction)?;
    let flat_diff_std = difference_std(flat1, flat2, crop_fraction)?;

    let signal_sum = (flat1_stats.median + flat2_stats.median)
        - (bias1_stats.median + bias2_stats.median);
    if signal_sum <= 0.0 {
        return Err(VegaError::Calibration(
            "flat frames are not above the bias level".into(),
        ));
    }

    let var_excess = flat_diff_std * flat_diff_std - bias_diff_std * bias_diff_std;
    if var_excess <= 0.0 {
        return Err(VegaError::Calibration(
            "flat variance does not exceed bias variance; flats may be underexposed".into(),
        ));
    }

    let gain_e_per_adu = signal_sum / var_excess;
    let read_noise_e = gain_e_per_adu * bias_diff_std / std::f64::consts::SQRT_2;

    let bias_median = (bias1_stats.median + bias2_stats.median) / 2.0;
    let saturation_adu = saturated_stats.median - bias_median;
    if saturation_adu <= 0.0 {
        return Err(VegaError::Calibration(
            "saturated frame is not above the bias level".into(),
        ));
    }
    let saturation_e = gain_e_per_adu * saturation_adu;

    debug!(
        gain_e_per_adu,
        read_noise_e, saturation_e, "photon-transfer calibration"
    );

    Ok(SensorCalibration {
        gain_e_per_adu,
        read_noise_e,
        saturation_e,
    })
}
