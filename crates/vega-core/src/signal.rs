//! Exposure signal, noise combination, SNR and dynamic range.
//!
//! All quantities are in photoelectrons unless the name says ADU. SNR and
//! dynamic range are `Option<f64>`: `None` means the value is undefined
//! (zero target signal or zero background noise) and is rendered as "-"
//! by front ends.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::camera::{Camera, GainSetting, SensorKind};
use crate::consts::DB_PER_STOP;
use crate::error::{Result, VegaError};
use crate::photometry::electron_rate_from_magnitude;
use crate::telescope::Telescope;

/// Per-component electron rates in e⁻/s/pixel.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SignalRates {
    pub target_e_per_s: f64,
    pub sky_e_per_s: f64,
    pub dark_e_per_s: f64,
}

/// Accumulated electrons for one exposure: rate × time per component.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ExposureSignal {
    pub target_e: f64,
    pub sky_e: f64,
    pub dark_e: f64,
}

impl ExposureSignal {
    pub fn from_rates(rates: &SignalRates, exposure_s: f64) -> Result<Self> {
        if exposure_s < 0.0 {
            return Err(VegaError::InvalidObservation(format!(
                "exposure time must be non-negative, got {exposure_s}"
            )));
        }
        for (name, rate) in [
            ("target", rates.target_e_per_s),
            ("sky", rates.sky_e_per_s),
            ("dark", rates.dark_e_per_s),
        ] {
            if rate < 0.0 {
                return Err(VegaError::InvalidObservation(format!(
                    "{name} rate must be non-negative, got {rate}"
                )));
            }
        }
        Ok(Self {
            target_e: rates.target_e_per_s * exposure_s,
            sky_e: rates.sky_e_per_s * exposure_s,
            dark_e: rates.dark_e_per_s * exposure_s,
        })
    }
}

/// Total background noise for a CCD with separately measured dark current:
/// read noise in quadrature with the dark and sky shot-noise variances.
pub fn background_noise_ccd(read_noise_e: f64, dark_e: f64, sky_e: f64) -> f64 {
    (read_noise_e * read_noise_e + dark_e + sky_e).sqrt()
}

/// Total background noise for a DSLR, where the measured dark-frame noise
/// already contains the read noise and dark-current contribution.
pub fn background_noise_dslr(frame_noise_e: f64, sky_e: f64) -> f64 {
    (frame_noise_e * frame_noise_e + sky_e).sqrt()
}

/// Background noise from a measured background level in ADU.
///
/// The measured level must sit between the camera's black and white levels;
/// its excess over the bias pedestal is converted to electrons and treated
/// as shot-noise variance on top of the read noise.
pub fn background_noise_from_frame(
    camera: &Camera,
    gain: &GainSetting,
    background_level_adu: f64,
    sky_e: f64,
) -> Result<f64> {
    if background_level_adu < camera.black_level_adu
        || background_level_adu > camera.white_level_adu
    {
        return Err(VegaError::InvalidObservation(format!(
            "background level {} ADU outside [{}, {}]",
            background_level_adu, camera.black_level_adu, camera.white_level_adu
        )));
    }
    let background_e = (background_level_adu - camera.black_level_adu) * gain.gain_e_per_adu;
    Ok(background_noise_ccd(gain.read_noise_e, background_e, sky_e))
}

/// Single-frame SNR: target over the quadrature sum of target shot noise
/// and background noise. `None` when there is no target signal or no
/// background noise estimate.
pub fn snr(target_e: f64, background_noise_e: f64) -> Option<f64> {
    if target_e <= 0.0 || background_noise_e <= 0.0 {
        return None;
    }
    Some(target_e / (target_e + background_noise_e * background_noise_e).sqrt())
}

/// SNR after averaging `subframes` statistically identical exposures.
///
/// A subframe count of 0 is treated as 1: a stack has at least the one
/// frame whose SNR was measured. Callers that want 0 rejected outright go
/// through [`Observation::validate`].
pub fn stack_snr(single_frame_snr: f64, subframes: u32) -> f64 {
    single_frame_snr * (subframes.max(1) as f64).sqrt()
}

/// Dynamic range in photographic stops: log2 of full well over background
/// noise. `None` when the background noise is zero.
pub fn dynamic_range_stops(saturation_e: f64, background_noise_e: f64) -> Option<f64> {
    if background_noise_e <= 0.0 {
        return None;
    }
    Some((saturation_e / background_noise_e).log2())
}

/// Convert dynamic range in stops to decibels.
pub fn stops_to_db(stops: f64) -> f64 {
    stops * DB_PER_STOP
}

/// Observing conditions and exposure plan.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Observation {
    /// Single subframe exposure in seconds.
    pub exposure_s: f64,
    /// Number of subframes in the stack.
    pub subframes: u32,
    /// Sky background surface brightness in mag/arcsec².
    pub sky_mag_per_arcsec2: f64,
    /// Target surface brightness in mag/arcsec².
    pub target_mag_per_arcsec2: f64,
    /// Barlow/reducer factor applied to the focal length.
    pub focal_multiplier: f64,
}

impl Observation {
    pub fn validate(&self) -> Result<()> {
        if !(self.exposure_s > 0.0) {
            return Err(VegaError::InvalidObservation(format!(
                "exposure time must be positive, got {}",
                self.exposure_s
            )));
        }
        if self.subframes == 0 {
            return Err(VegaError::InvalidObservation(
                "subframe count must be at least 1".into(),
            ));
        }
        if !(self.focal_multiplier > 0.0) {
            return Err(VegaError::InvalidObservation(format!(
                "focal multiplier must be positive, got {}",
                self.focal_multiplier
            )));
        }
        Ok(())
    }
}

/// Full per-exposure analysis for one camera/telescope/observation combo.
#[derive(Clone, Debug)]
pub struct ExposureReport {
    pub image_scale_arcsec: f64,
    pub signal: ExposureSignal,
    pub background_noise_e: f64,
    pub snr: Option<f64>,
    pub stack_snr: Option<f64>,
    pub dynamic_range_stops: Option<f64>,
    pub dynamic_range_db: Option<f64>,
}

/// Electron rates implied by an observation through a given rig.
pub fn signal_rates(
    camera: &Camera,
    telescope: &Telescope,
    observation: &Observation,
) -> SignalRates {
    let scale = telescope.image_scale(camera.pixel_size_um, observation.focal_multiplier);
    SignalRates {
        target_e_per_s: electron_rate_from_magnitude(
            observation.target_mag_per_arcsec2,
            telescope,
            camera.peak_qe,
            scale,
        ),
        sky_e_per_s: electron_rate_from_magnitude(
            observation.sky_mag_per_arcsec2,
            telescope,
            camera.peak_qe,
            scale,
        ),
        dark_e_per_s: camera.dark_current_e_per_s,
    }
}

/// Run the complete signal/noise analysis for one exposure plan.
pub fn analyze(
    camera: &Camera,
    gain: &GainSetting,
    telescope: &Telescope,
    observation: &Observation,
) -> Result<ExposureReport> {
    camera.validate()?;
    telescope.validate()?;
    observation.validate()?;

    let scale = telescope.image_scale(camera.pixel_size_um, observation.focal_multiplier);
    let rates = signal_rates(camera, telescope, observation);
    let signal = ExposureSignal::from_rates(&rates, observation.exposure_s)?;

    let background_noise_e = match camera.kind {
        SensorKind::Ccd => background_noise_ccd(gain.read_noise_e, signal.dark_e, signal.sky_e),
        // DSLR read noise tables are measured from dark frames, so the
        // dark-current term is already inside them.
        SensorKind::Dslr => background_noise_dslr(gain.read_noise_e, signal.sky_e),
    };

    debug!(
        target_e = signal.target_e,
        sky_e = signal.sky_e,
        dark_e = signal.dark_e,
        background_noise_e,
        "exposure analysis"
    );

    let single = snr(signal.target_e, background_noise_e);
    let stacked = single.map(|s| stack_snr(s, observation.subframes));
    let dr_stops = dynamic_range_stops(camera.saturation_e, background_noise_e);

    Ok(ExposureReport {
        image_scale_arcsec: scale,
        signal,
        background_noise_e,
        snr: single,
        stack_snr: stacked,
        dynamic_range_stops: dr_stops,
        dynamic_range_db: dr_stops.map(stops_to_db),
    })
}
