use console::Style;
use vega_core::camera::{GainSetting, SensorKind};
use vega_core::config::PlanConfig;

struct Styles {
    title: Style,
    header: Style,
    label: Style,
    value: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            header: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
        }
    }
}

pub fn print_plan_summary(config: &PlanConfig, gain: &GainSetting) {
    let s = Styles::new();

    println!();
    println!("  {}", s.title.apply_to("Vega Exposure Plan"));
    println!("  {}", s.title.apply_to("\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}"));
    println!();

    println!("  {}", s.header.apply_to("Camera"));
    println!(
        "    {:<14}{}",
        s.label.apply_to("Name"),
        s.value.apply_to(&config.camera.name)
    );
    let kind = match config.camera.kind {
        SensorKind::Ccd => "CCD/CMOS",
        SensorKind::Dslr => "DSLR",
    };
    println!("    {:<14}{}", s.label.apply_to("Type"), s.value.apply_to(kind));
    println!(
        "    {:<14}{}",
        s.label.apply_to("Pixels"),
        s.value
            .apply_to(format!("{:.2} um, QE {:.0}%", config.camera.pixel_size_um, config.camera.peak_qe * 100.0))
    );
    println!(
        "    {:<14}{}",
        s.label.apply_to("Gain"),
        s.value.apply_to(format!(
            "setting {} ({:.3} e-/ADU, {:.2} e- read)",
            gain.setting, gain.gain_e_per_adu, gain.read_noise_e
        ))
    );
    println!();

    println!("  {}", s.header.apply_to("Telescope"));
    println!(
        "    {:<14}{}",
        s.label.apply_to("Name"),
        s.value.apply_to(&config.telescope.name)
    );
    println!(
        "    {:<14}{}",
        s.label.apply_to("Optics"),
        s.value.apply_to(format!(
            "{:.0}/{:.0} mm (f/{:.1})",
            config.telescope.aperture_mm,
            config.telescope.focal_length_mm,
            config.telescope.focal_ratio()
        ))
    );
    println!();

    println!("  {}", s.header.apply_to("Observation"));
    println!(
        "    {:<14}{}",
        s.label.apply_to("Exposure"),
        s.value.apply_to(format!(
            "{:.0} s x {}",
            config.observation.exposure_s, config.observation.subframes
        ))
    );
    println!(
        "    {:<14}{}",
        s.label.apply_to("Sky"),
        s.value
            .apply_to(format!("{:.1} mag/arcsec2", config.observation.sky_mag_per_arcsec2))
    );
    println!(
        "    {:<14}{}",
        s.label.apply_to("Target"),
        s.value
            .apply_to(format!("{:.1} mag/arcsec2", config.observation.target_mag_per_arcsec2))
    );
    if (config.observation.focal_multiplier - 1.0).abs() > f64::EPSILON {
        println!(
            "    {:<14}{}",
            s.label.apply_to("Focal mult"),
            s.value.apply_to(format!("{:.2}x", config.observation.focal_multiplier))
        );
    }
    println!();
}
