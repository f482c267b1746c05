use serde::{Deserialize, Serialize};

use crate::camera::{Camera, GainSetting, SensorKind};
use crate::error::Result;
use crate::signal::Observation;
use crate::telescope::Telescope;

/// Complete exposure plan: rig plus observing conditions. Serialized as
/// TOML by the CLI.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PlanConfig {
    pub camera: Camera,
    pub telescope: Telescope,
    pub observation: Observation,
}

impl PlanConfig {
    pub fn validate(&self) -> Result<()> {
        self.camera.validate()?;
        self.telescope.validate()?;
        self.observation.validate()?;
        Ok(())
    }
}

impl Default for PlanConfig {
    fn default() -> Self {
        Self {
            camera: Camera {
                name: "Generic 16-bit CMOS".into(),
                kind: SensorKind::Ccd,
                pixel_size_um: 3.76,
                peak_qe: 0.8,
                saturation_e: 51_000.0,
                black_level_adu: 500.0,
                white_level_adu: 65_535.0,
                dark_current_e_per_s: 0.003,
                gain_table: vec![
                    GainSetting {
                        setting: 0,
                        gain_e_per_adu: 0.78,
                        read_noise_e: 3.5,
                    },
                    GainSetting {
                        setting: 100,
                        gain_e_per_adu: 0.25,
                        read_noise_e: 1.5,
                    },
                ],
            },
            telescope: Telescope {
                name: "200/1000 Newtonian".into(),
                focal_length_mm: 1000.0,
                aperture_mm: 200.0,
            },
            observation: Observation {
                exposure_s: 120.0,
                subframes: 30,
                sky_mag_per_arcsec2: 20.5,
                target_mag_per_arcsec2: 22.0,
                focal_multiplier: 1.0,
            },
        }
    }
}
