use serde::{Deserialize, Serialize};

use crate::consts::ARCSEC_PER_RADIAN;
use crate::error::{Result, VegaError};

/// Telescope optical parameters.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Telescope {
    pub name: String,
    /// Focal length in millimeters.
    pub focal_length_mm: f64,
    /// Clear aperture diameter in millimeters.
    pub aperture_mm: f64,
}

impl Telescope {
    pub fn validate(&self) -> Result<()> {
        if !(self.focal_length_mm > 0.0) {
            return Err(VegaError::InvalidTelescope(format!(
                "focal length must be positive, got {}",
                self.focal_length_mm
            )));
        }
        if !(self.aperture_mm > 0.0) {
            return Err(VegaError::InvalidTelescope(format!(
                "aperture must be positive, got {}",
                self.aperture_mm
            )));
        }
        Ok(())
    }

    /// Focal ratio (f-number).
    pub fn focal_ratio(&self) -> f64 {
        self.focal_length_mm / self.aperture_mm
    }

    /// Light-collecting area in cm².
    pub fn aperture_area_cm2(&self) -> f64 {
        let radius_cm = self.aperture_mm / 20.0;
        std::f64::consts::PI * radius_cm * radius_cm
    }

    /// Image scale in arcsec/pixel for a given pixel pitch and focal
    /// multiplier (barlow > 1, reducer < 1).
    pub fn image_scale(&self, pixel_size_um: f64, focal_multiplier: f64) -> f64 {
        image_scale_arcsec_per_px(pixel_size_um, self.focal_length_mm, focal_multiplier)
    }
}

/// Image scale in arcsec/pixel.
///
/// Small-angle: pixel pitch (µm → mm) over effective focal length (mm),
/// converted from radians to arcseconds.
pub fn image_scale_arcsec_per_px(
    pixel_size_um: f64,
    focal_length_mm: f64,
    focal_multiplier: f64,
) -> f64 {
    let pixel_mm = pixel_size_um * 1e-3;
    pixel_mm / (focal_length_mm * focal_multiplier) * ARCSEC_PER_RADIAN
}
