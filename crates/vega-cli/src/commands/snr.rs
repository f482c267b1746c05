use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use vega_core::signal::analyze;

use super::{fmt_opt, load_plan};

#[derive(Args)]
pub struct SnrArgs {
    /// Plan config (TOML)
    #[arg(short, long)]
    pub config: PathBuf,

    /// ISO/gain setting; defaults to the first gain table entry
    #[arg(long)]
    pub gain: Option<u32>,

    /// Override subframe exposure in seconds
    #[arg(long)]
    pub exposure: Option<f64>,

    /// Override subframe count
    #[arg(long)]
    pub subframes: Option<u32>,

    /// Override sky background in mag/arcsec²
    #[arg(long)]
    pub sky: Option<f64>,

    /// Override target surface brightness in mag/arcsec²
    #[arg(long)]
    pub target: Option<f64>,
}

pub fn run(args: &SnrArgs) -> Result<()> {
    let mut plan = load_plan(&args.config)?;

    if let Some(exposure) = args.exposure {
        plan.observation.exposure_s = exposure;
    }
    if let Some(subframes) = args.subframes {
        plan.observation.subframes = subframes;
    }
    if let Some(sky) = args.sky {
        plan.observation.sky_mag_per_arcsec2 = sky;
    }
    if let Some(target) = args.target {
        plan.observation.target_mag_per_arcsec2 = target;
    }

    let gain = match args.gain {
        Some(setting) => plan.camera.gain_for(setting)?.clone(),
        None => plan.camera.gain_table[0].clone(),
    };

    let report = analyze(&plan.camera, &gain, &plan.telescope, &plan.observation)?;

    crate::summary::print_plan_summary(&plan, &gain);

    println!("Image scale:     {:.3} arcsec/px", report.image_scale_arcsec);
    println!("Target signal:   {:.1} e-", report.signal.target_e);
    println!("Sky signal:      {:.1} e-", report.signal.sky_e);
    println!("Dark signal:     {:.1} e-", report.signal.dark_e);
    println!("Background noise: {:.2} e-", report.background_noise_e);
    println!();
    println!("SNR (single):    {}", fmt_opt(report.snr, 2));
    println!("SNR (stack):     {}", fmt_opt(report.stack_snr, 2));
    println!(
        "Dynamic range:   {} stops ({} dB)",
        fmt_opt(report.dynamic_range_stops, 2),
        fmt_opt(report.dynamic_range_db, 1)
    );

    Ok(())
}
