//! Monte-Carlo synthesis of raw sensor frames.
//!
//! Each pixel draws a Poisson sample of its expected dark + sky + target
//! electrons and a Gaussian read-noise sample, then converts to ADU with
//! the gain-table entry, adds the bias pedestal and clips to the sensor's
//! output range. Stacking averages N independent subframes.

use ndarray::Array2;
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use rand_distr::{Distribution, Normal, Poisson};
use rayon::prelude::*;
use tracing::debug;

use crate::camera::{Camera, GainSetting};
use crate::consts::{PARALLEL_SUBFRAME_THRESHOLD, POISSON_GAUSSIAN_CROSSOVER};
use crate::error::{Result, VegaError};
use crate::signal::SignalRates;

/// Draw one Poisson sample, switching to the Gaussian approximation for
/// large means where the exact sampler is slow and numerically touchy.
fn sample_poisson(mean: f64, rng: &mut StdRng) -> f64 {
    if mean <= 0.0 {
        return 0.0;
    }
    if mean < POISSON_GAUSSIAN_CROSSOVER {
        let poisson = Poisson::new(mean).expect("positive finite Poisson mean");
        poisson.sample(rng)
    } else {
        let normal = Normal::new(mean, mean.sqrt()).expect("positive finite Normal params");
        normal.sample(rng).max(0.0)
    }
}

/// Synthesize a single raw subframe in ADU.
///
/// `target` is a per-pixel target electron rate map (e⁻/s); sky and dark
/// rates from `rates` are uniform across the frame. The target component
/// of `rates` is ignored in favor of the map.
pub fn simulate_frame(
    camera: &Camera,
    gain: &GainSetting,
    rates: &SignalRates,
    target: &Array2<f64>,
    exposure_s: f64,
    seed: u64,
) -> Result<Array2<f64>> {
    camera.validate()?;
    if !(exposure_s > 0.0) {
        return Err(VegaError::Simulation(format!(
            "exposure time must be positive, got {exposure_s}"
        )));
    }
    if rates.sky_e_per_s < 0.0 || rates.dark_e_per_s < 0.0 {
        return Err(VegaError::Simulation(
            "sky and dark rates must be non-negative".into(),
        ));
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let read_noise = Normal::new(0.0, gain.read_noise_e).expect("non-negative read noise");
    let floor_e = (rates.sky_e_per_s + rates.dark_e_per_s) * exposure_s;

    let mut frame = target.clone();
    frame.mapv_inplace(|target_rate| {
        let mean_e = floor_e + target_rate.max(0.0) * exposure_s;
        let electrons = sample_poisson(mean_e, &mut rng) + read_noise.sample(&mut rng);
        let adu = electrons / gain.gain_e_per_adu + camera.black_level_adu;
        adu.clamp(0.0, camera.white_level_adu)
    });
    Ok(frame)
}

/// Synthesize and average `subframes` independent exposures.
///
/// Each subframe gets its own RNG derived from `seed`, so output is
/// deterministic for a fixed seed regardless of thread scheduling.
pub fn simulate_stack(
    camera: &Camera,
    gain: &GainSetting,
    rates: &SignalRates,
    target: &Array2<f64>,
    exposure_s: f64,
    subframes: u32,
    seed: Option<u64>,
) -> Result<Array2<f64>> {
    if subframes == 0 {
        return Err(VegaError::Simulation(
            "subframe count must be at least 1".into(),
        ));
    }
    let seed = seed.unwrap_or_else(|| rand::rng().next_u64());
    debug!(subframes, seed, "simulating stack");

    // Sequential seeds are decorrelated through one StdRng round so
    // neighboring subframes don't share low-bit structure.
    let subframe_seed = |i: u32| {
        let mut rng = StdRng::seed_from_u64(seed.wrapping_add(i as u64));
        rng.random::<u64>()
    };

    // Subframes are generated in parallel but summed sequentially in
    // index order: float addition is not associative, so a parallel
    // reduction would make the output depend on thread scheduling.
    let frames: Vec<Array2<f64>> = if subframes >= PARALLEL_SUBFRAME_THRESHOLD {
        (0..subframes)
            .into_par_iter()
            .map(|i| simulate_frame(camera, gain, rates, target, exposure_s, subframe_seed(i)))
            .collect::<Result<_>>()?
    } else {
        (0..subframes)
            .map(|i| simulate_frame(camera, gain, rates, target, exposure_s, subframe_seed(i)))
            .collect::<Result<_>>()?
    };

    let mut frames = frames.into_iter();
    let mut sum = frames.next().expect("at least one subframe");
    for frame in frames {
        sum += &frame;
    }

    Ok(sum / subframes as f64)
}

/// Build a Gaussian star-like target rate map.
///
/// The spot is centered on the frame with the given FWHM in pixels and a
/// peak rate in e⁻/s at the center.
pub fn gaussian_spot(height: usize, width: usize, fwhm_px: f64, peak_rate: f64) -> Array2<f64> {
    let sigma = fwhm_px / (2.0 * (2.0 * std::f64::consts::LN_2).sqrt());
    let cy = (height as f64 - 1.0) / 2.0;
    let cx = (width as f64 - 1.0) / 2.0;
    Array2::from_shape_fn((height, width), |(row, col)| {
        let dy = row as f64 - cy;
        let dx = col as f64 - cx;
        peak_rate * (-(dx * dx + dy * dy) / (2.0 * sigma * sigma)).exp()
    })
}
