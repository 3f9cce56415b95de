// frequency-core/src/lib.rs

//! The core logic for the real-time frequency readout.
//! This crate is responsible for audio capture, windowing, the FFT and
//! dominant-frequency estimation. It is completely headless
//! and contains no GUI code.

pub mod audio;
pub mod config;
pub mod error;
pub mod fft;
pub mod frame;
pub mod monitor;
pub mod params;
pub mod spectrum;
pub mod window;

pub use error::AnalysisError;
pub use params::Parameters;
pub use spectrum::{SpectrumAnalyzer, estimate_frequency};
