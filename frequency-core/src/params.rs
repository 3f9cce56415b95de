//! # Analysis Parameters
//!
//! The immutable configuration shared by every stage of the pipeline:
//! sample rate and frame size. A `Parameters` value can only be obtained
//! through validation, so downstream code never re-checks it.

use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;

/// Default capture rate in Hz.
pub const DEFAULT_SAMPLE_RATE: u32 = 44100;

/// Default number of samples per analysis frame.
pub const DEFAULT_FRAME_SIZE: usize = 1024;

/// Sample rate and frame size for one analyzer instance.
///
/// Invariants: `sample_rate > 0`, `frame_size` is a power of two and `>= 2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawParameters")]
pub struct Parameters {
    sample_rate: u32,
    frame_size: usize,
}

/// Unvalidated shape used by serde before `Parameters::new` runs.
#[derive(Deserialize)]
struct RawParameters {
    sample_rate: u32,
    frame_size: usize,
}

impl TryFrom<RawParameters> for Parameters {
    type Error = AnalysisError;

    fn try_from(raw: RawParameters) -> Result<Self, Self::Error> {
        Parameters::new(raw.sample_rate, raw.frame_size)
    }
}

impl Parameters {
    /// Validates and builds a parameter set.
    ///
    /// # Errors
    /// * `ZeroSampleRate` if `sample_rate` is zero
    /// * `FrameSizeNotPowerOfTwo` if `frame_size` is zero or not a power of two
    /// * `FrameSizeTooSmall` if `frame_size` is 1
    pub fn new(sample_rate: u32, frame_size: usize) -> Result<Self, AnalysisError> {
        if sample_rate == 0 {
            return Err(AnalysisError::ZeroSampleRate(sample_rate));
        }
        if !frame_size.is_power_of_two() {
            return Err(AnalysisError::FrameSizeNotPowerOfTwo(frame_size));
        }
        if frame_size < 2 {
            return Err(AnalysisError::FrameSizeTooSmall(frame_size));
        }
        Ok(Self { sample_rate, frame_size })
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn frame_size(&self) -> usize {
        self.frame_size
    }

    /// Same frame size, different rate. Used once the capture device reports
    /// the rate it actually runs at.
    pub fn with_sample_rate(&self, sample_rate: u32) -> Result<Self, AnalysisError> {
        Self::new(sample_rate, self.frame_size)
    }

    /// Width of one frequency bin in Hz.
    pub fn bin_width(&self) -> f32 {
        self.sample_rate as f32 / self.frame_size as f32
    }

    /// log2 of the frame size.
    pub fn bits(&self) -> u32 {
        self.frame_size.trailing_zeros()
    }
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            frame_size: DEFAULT_FRAME_SIZE,
        }
    }
}
