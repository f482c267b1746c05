use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use vega_core::calibrate::photon_transfer;
use vega_core::consts::DEFAULT_CALIBRATION_CROP;
use vega_core::io::image_io::load_adu;
use vega_core::signal::{dynamic_range_stops, stops_to_db};

use super::fmt_opt;

#[derive(Args)]
pub struct CalibrateArgs {
    /// First bias frame
    pub bias1: PathBuf,

    /// Second bias frame
    pub bias2: PathBuf,

    /// First mid-scale flat frame
    pub flat1: PathBuf,

    /// Second mid-scale flat frame (same illumination)
    pub flat2: PathBuf,

    /// Fully saturated flat frame
    pub saturated: PathBuf,

    /// Centered crop fraction used for frame statistics
    #[arg(long, default_value_t = DEFAULT_CALIBRATION_CROP)]
    pub crop: f64,
}

pub fn run(args: &CalibrateArgs) -> Result<()> {
    let load = |path: &PathBuf| {
        load_adu(path).with_context(|| format!("Failed to load {}", path.display()))
    };
    let bias1 = load(&args.bias1)?;
    let bias2 = load(&args.bias2)?;
    let flat1 = load(&args.flat1)?;
    let flat2 = load(&args.flat2)?;
    let saturated = load(&args.saturated)?;

    let calibration = photon_transfer(
        &bias1.view(),
        &bias2.view(),
        &flat1.view(),
        &flat2.view(),
        &saturated.view(),
        args.crop,
    )?;

    println!("Gain:          {:.4} e-/ADU", calibration.gain_e_per_adu);
    println!("Read noise:    {:.2} e-", calibration.read_noise_e);
    println!("Full well:     {:.0} e-", calibration.saturation_e);

    let stops = dynamic_range_stops(calibration.saturation_e, calibration.read_noise_e);
    println!(
        "Dynamic range: {} stops ({} dB)",
        fmt_opt(stops, 2),
        fmt_opt(stops.map(stops_to_db), 1)
    );

    Ok(())
}
