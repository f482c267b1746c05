use vega_core::camera::{Camera, GainSetting, SensorKind};
use vega_core::signal::Observation;
use vega_core::telescope::Telescope;

/// A cooled mono CMOS camera with a two-entry gain table.
pub fn test_camera() -> Camera {
    Camera {
        name: "TestCam".into(),
        kind: SensorKind::Ccd,
        pixel_size_um: 3.76,
        peak_qe: 0.8,
        saturation_e: 50_000.0,
        black_level_adu: 500.0,
        white_level_adu: 65_535.0,
        dark_current_e_per_s: 0.01,
        gain_table: vec![
            GainSetting {
                setting: 0,
                gain_e_per_adu: 1.0,
                read_noise_e: 3.0,
            },
            GainSetting {
                setting: 100,
                gain_e_per_adu: 0.25,
                read_noise_e: 1.5,
            },
        ],
    }
}

/// An 8" f/5 Newtonian.
pub fn test_telescope() -> Telescope {
    Telescope {
        name: "TestScope".into(),
        focal_length_mm: 1000.0,
        aperture_mm: 200.0,
    }
}

pub fn test_observation() -> Observation {
    Observation {
        exposure_s: 120.0,
        subframes: 16,
        sky_mag_per_arcsec2: 20.5,
        target_mag_per_arcsec2: 22.0,
        focal_multiplier: 1.0,
    }
}
