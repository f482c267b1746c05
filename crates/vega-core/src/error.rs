use thiserror::Error;

#[derive(Error, Debug)]
pub enum VegaError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid camera: {0}")]
    InvalidCamera(String),

    #[error("Invalid telescope: {0}")]
    InvalidTelescope(String),

    #[error("Invalid observation: {0}")]
    InvalidObservation(String),

    #[error("No gain table entry for setting {setting}")]
    UnknownGainSetting { setting: u32 },

    #[error("Frame dimension mismatch: {a_height}x{a_width} vs {b_height}x{b_width}")]
    DimensionMismatch {
        a_width: usize,
        a_height: usize,
        b_width: usize,
        b_height: usize,
    },

    #[error("Calibration error: {0}")]
    Calibration(String),

    #[error("Simulation error: {0}")]
    Simulation(String),

    #[error("Image format error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("Empty pixel region")]
    EmptyRegion,
}

pub type Result<T> = std::result::Result<T, VegaError>;
