pub mod calibrate;
pub mod camera;
pub mod config;
pub mod consts;
pub mod error;
pub mod io;
pub mod photometry;
pub mod signal;
pub mod simulate;
pub mod stretch;
pub mod telescope;
