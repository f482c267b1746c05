use serde::{Deserialize, Serialize};

use crate::error::{Result, VegaError};

/// Sensor family. Determines which background-noise formula applies: CCD
/// cameras have a separately measured dark current, DSLR dark-frame noise
/// already folds in the read noise.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SensorKind {
    Ccd,
    Dslr,
}

/// One row of the per-ISO / per-gain-setting table.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GainSetting {
    /// ISO value (DSLR) or gain index (CCD/CMOS driver units).
    pub setting: u32,
    /// Conversion gain in electrons per ADU.
    pub gain_e_per_adu: f64,
    /// Read noise RMS in electrons at this setting.
    pub read_noise_e: f64,
}

/// Camera sensor parameters.
///
/// ADU quantities are in the sensor's native output units; electron
/// quantities are photoelectrons.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Camera {
    pub name: String,
    pub kind: SensorKind,
    /// Pixel pitch in micrometers.
    pub pixel_size_um: f64,
    /// Peak quantum efficiency, fraction in (0, 1].
    pub peak_qe: f64,
    /// Full-well (saturation) capacity in electrons.
    pub saturation_e: f64,
    /// Bias pedestal in ADU.
    pub black_level_adu: f64,
    /// Maximum representable output in ADU.
    pub white_level_adu: f64,
    /// Dark current in electrons per second per pixel.
    pub dark_current_e_per_s: f64,
    /// Gain and read noise per ISO/gain setting.
    pub gain_table: Vec<GainSetting>,
}

impl Camera {
    pub fn validate(&self) -> Result<()> {
        if !(self.pixel_size_um > 0.0) {
            return Err(VegaError::InvalidCamera(format!(
                "pixel size must be positive, got {}",
                self.pixel_size_um
            )));
        }
        if !(self.peak_qe > 0.0 && self.peak_qe <= 1.0) {
            return Err(VegaError::InvalidCamera(format!(
                "peak QE must be in (0, 1], got {}",
                self.peak_qe
            )));
        }
        if !(self.saturation_e > 0.0) {
            return Err(VegaError::InvalidCamera(format!(
                "full-well capacity must be positive, got {}",
                self.saturation_e
            )));
        }
        if !(self.black_level_adu < self.white_level_adu) {
            return Err(VegaError::InvalidCamera(format!(
                "black level ({}) must be below white level ({})",
                self.black_level_adu, self.white_level_adu
            )));
        }
        if self.black_level_adu < 0.0 {
            return Err(VegaError::InvalidCamera(format!(
                "black level must be non-negative, got {}",
                self.black_level_adu
            )));
        }
        if self.dark_current_e_per_s < 0.0 {
            return Err(VegaError::InvalidCamera(format!(
                "dark current must be non-negative, got {}",
                self.dark_current_e_per_s
            )));
        }
        if self.gain_table.is_empty() {
            return Err(VegaError::InvalidCamera(
                "gain table must have at least one entry".into(),
            ));
        }
        for entry in &self.gain_table {
            if !(entry.gain_e_per_adu > 0.0) {
                return Err(VegaError::InvalidCamera(format!(
                    "gain at setting {} must be positive, got {}",
                    entry.setting, entry.gain_e_per_adu
                )));
            }
            if entry.read_noise_e < 0.0 {
                return Err(VegaError::InvalidCamera(format!(
                    "read noise at setting {} must be non-negative, got {}",
                    entry.setting, entry.read_noise_e
                )));
            }
        }
        Ok(())
    }

    /// Look up the gain table row for an ISO/gain setting.
    pub fn gain_for(&self, setting: u32) -> Result<&GainSetting> {
        self.gain_table
            .iter()
            .find(|g| g.setting == setting)
            .ok_or(VegaError::UnknownGainSetting { setting })
    }

    /// Usable output range in ADU (white minus black level).
    pub fn adu_range(&self) -> f64 {
        self.white_level_adu - self.black_level_adu
    }
}
