//! # Spectrum Analysis Module
//!
//! Turns one analysis frame into a single dominant-frequency estimate:
//! window, pack into complex values, FFT, magnitudes, peak bin, Hz.
//!
//! The estimate is the centre frequency of the loudest bin. There is no
//! sub-bin interpolation and no noise gate: a silent frame reads 0 Hz.

use crate::error::AnalysisError;
use crate::fft::{Complex, fft_in_place};
use crate::params::Parameters;
use crate::window::apply_hamming_window;

/// Estimates the dominant frequency of audio frames of a fixed size.
///
/// Holds only its immutable configuration, so one analyzer can be shared
/// freely and every call is independent of the previous one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpectrumAnalyzer {
    params: Parameters,
}

impl SpectrumAnalyzer {
    pub fn new(params: Parameters) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &Parameters {
        &self.params
    }

    /// Computes the magnitude spectrum of `frame` over bins `0..N/2`.
    ///
    /// The frame is windowed in place and then dropped, so it is taken by
    /// value.
    ///
    /// # Errors
    /// * `FrameLength` if the frame does not hold exactly `frame_size` samples
    pub fn magnitude_spectrum(&self, mut frame: Vec<f32>) -> Result<Vec<f32>, AnalysisError> {
        let n = self.params.frame_size();
        if frame.len() != n {
            return Err(AnalysisError::FrameLength {
                expected: n,
                actual: frame.len(),
            });
        }

        apply_hamming_window(&mut frame);

        let mut buffer: Vec<Complex<f64>> = frame
            .into_iter()
            .map(|sample| Complex::new(sample as f64, 0.0))
            .collect();

        fft_in_place(&mut buffer)?;

        // Real input: the upper half mirrors the lower half.
        Ok(buffer
            .iter()
            .take(n / 2)
            .map(|c| c.norm_sqr().sqrt() as f32) // sqrt(re^2 + im^2), not hypot
            .collect())
    }

    /// Estimates the dominant frequency of `frame` in Hz.
    ///
    /// Returns `NaN` when the spectrum has no comparable bin, which happens
    /// when the frame carries NaN samples.
    ///
    /// # Errors
    /// * `FrameLength` if the frame does not hold exactly `frame_size` samples
    pub fn estimate_frequency(&self, frame: Vec<f32>) -> Result<f32, AnalysisError> {
        let magnitudes = self.magnitude_spectrum(frame)?;
        let frequency = match peak_bin(&magnitudes) {
            Some(bin) => bin_to_frequency(bin, &self.params),
            None => f32::NAN,
        };
        log::trace!("dominant frequency {frequency:.2} Hz");
        Ok(frequency)
    }
}

/// One-shot form of [`SpectrumAnalyzer::estimate_frequency`].
pub fn estimate_frequency(frame: Vec<f32>, params: &Parameters) -> Result<f32, AnalysisError> {
    SpectrumAnalyzer::new(*params).estimate_frequency(frame)
}

/// Index of the first maximum in `magnitudes`.
///
/// The running maximum starts below any valid magnitude and is only replaced
/// by a strictly greater value, so ties go to the lowest index and an
/// all-zero spectrum selects bin 0. Returns `None` for an empty slice or
/// when every value is NaN.
pub fn peak_bin(magnitudes: &[f32]) -> Option<usize> {
    let mut max_magnitude = -1.0_f32;
    let mut max_index = None;
    for (i, &magnitude) in magnitudes.iter().enumerate() {
        if magnitude > max_magnitude {
            max_magnitude = magnitude;
            max_index = Some(i);
        }
    }
    max_index
}

/// Centre frequency of `bin` in Hz: `bin * sample_rate / frame_size`.
pub fn bin_to_frequency(bin: usize, params: &Parameters) -> f32 {
    bin as f32 * params.bin_width()
}
