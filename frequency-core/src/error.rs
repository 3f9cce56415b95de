//! # Error Module
//!
//! Errors produced by the analysis core. Configuration and frame-length
//! problems are precondition failures and stop the pipeline; missing data is
//! the one recoverable case, handled by the driver skipping a tick.

use thiserror::Error;

/// Everything that can go wrong between a capture buffer and a frequency.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    /// The sample rate must be a positive number of Hz.
    #[error("sample rate must be positive, got {0} Hz")]
    ZeroSampleRate(u32),

    /// The frame size must be a power of two (the FFT requires it).
    #[error("frame size must be a power of two, got {0}")]
    FrameSizeNotPowerOfTwo(usize),

    /// The Hamming window divides by N - 1, so at least two samples are needed.
    #[error("frame size must be at least 2, got {0}")]
    FrameSizeTooSmall(usize),

    /// The rolling capture buffer cannot hold a whole frame.
    #[error("capture buffer holds {capacity} samples but a frame needs {frame_size}")]
    BufferTooSmall { capacity: usize, frame_size: usize },

    /// A frame handed to the analyzer has the wrong number of samples.
    #[error("frame has {actual} samples, expected {expected}")]
    FrameLength { expected: usize, actual: usize },

    /// Not enough (new) samples yet. Skip this tick and try again.
    #[error("{available} samples available, {required} required")]
    InsufficientData { available: u64, required: u64 },
}

impl AnalysisError {
    /// True for errors that are fatal to starting or running analysis.
    pub fn is_configuration(&self) -> bool {
        !matches!(self, AnalysisError::InsufficientData { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_missing_data_is_recoverable() {
        assert!(AnalysisError::FrameSizeNotPowerOfTwo(1000).is_configuration());
        assert!(AnalysisError::ZeroSampleRate(0).is_configuration());
        assert!(!AnalysisError::InsufficientData { available: 3, required: 1024 }.is_configuration());
    }

    #[test]
    fn messages_name_the_offending_value() {
        let err = AnalysisError::FrameSizeNotPowerOfTwo(1000);
        assert_eq!(err.to_string(), "frame size must be a power of two, got 1000");
    }
}
