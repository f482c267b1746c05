/// Arcseconds per radian.
pub const ARCSEC_PER_RADIAN: f64 = 206_264.806_247_096_36;

/// Photon flux of a magnitude-0 star over the visual band, in
/// photons s⁻¹ cm⁻² above the atmosphere.
pub const MAG0_PHOTON_FLUX: f64 = 8.79e5;

/// Decibels per photographic stop: 10·ln(2)/ln(10).
pub const DB_PER_STOP: f64 = 3.010_299_956_639_811_7;

/// Poisson mean above which per-pixel sampling switches to the Gaussian
/// approximation.
pub const POISSON_GAUSSIAN_CROSSOVER: f64 = 20.0;

/// Minimum subframe count for rayon subframe-level parallelism.
pub const PARALLEL_SUBFRAME_THRESHOLD: u32 = 4;

/// Default low percentile for the display autostretch (0.1%).
pub const DEFAULT_STRETCH_LOW: f64 = 0.001;

/// Default high percentile for the display autostretch (99.9%).
pub const DEFAULT_STRETCH_HIGH: f64 = 0.999;

/// Default centered crop fraction for calibration frame statistics.
pub const DEFAULT_CALIBRATION_CROP: f64 = 0.5;

/// Small epsilon to avoid division by zero in floating-point comparisons.
pub const EPSILON: f64 = 1e-12;
