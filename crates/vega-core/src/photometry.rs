//! Luminance ↔ electron-flux conversion.
//!
//! A surface brightness in mag/arcsec² is turned into a per-pixel
//! photoelectron rate through the telescope aperture area, the pixel's
//! solid angle on the sky, and the sensor's peak quantum efficiency.

use crate::consts::MAG0_PHOTON_FLUX;
use crate::telescope::Telescope;

/// Photoelectron rate (e⁻/s/pixel) for a surface brightness in mag/arcsec².
///
/// `image_scale_arcsec` is the plate scale in arcsec/pixel; each pixel
/// subtends `scale²` square arcseconds of sky.
pub fn electron_rate_from_magnitude(
    mag_per_arcsec2: f64,
    telescope: &Telescope,
    peak_qe: f64,
    image_scale_arcsec: f64,
) -> f64 {
    let photon_flux = MAG0_PHOTON_FLUX * 10f64.powf(-0.4 * mag_per_arcsec2);
    let pixel_solid_angle = image_scale_arcsec * image_scale_arcsec;
    photon_flux * telescope.aperture_area_cm2() * peak_qe * pixel_solid_angle
}

/// Inverse of [`electron_rate_from_magnitude`].
///
/// Returns `None` for a non-positive rate, where the magnitude is
/// undefined.
pub fn magnitude_from_electron_rate(
    rate_e_per_s: f64,
    telescope: &Telescope,
    peak_qe: f64,
    image_scale_arcsec: f64,
) -> Option<f64> {
    if rate_e_per_s <= 0.0 {
        return None;
    }
    let pixel_solid_angle = image_scale_arcsec * image_scale_arcsec;
    let photon_flux =
        rate_e_per_s / (telescope.aperture_area_cm2() * peak_qe * pixel_solid_angle);
    Some(-2.5 * (photon_flux / MAG0_PHOTON_FLUX).log10())
}
