//! # Frequency Monitor
//!
//! The per-tick step of a driving loop: grab the next frame from a capture
//! buffer if a full frame of new audio has arrived, and estimate its
//! dominant frequency. The loop itself (timer, render loop, test harness)
//! belongs to the caller.

use crate::audio::CaptureBuffer;
use crate::error::AnalysisError;
use crate::frame::FrameExtractor;
use crate::params::Parameters;
use crate::spectrum::SpectrumAnalyzer;

#[derive(Debug, Clone)]
pub struct FrequencyMonitor {
    analyzer: SpectrumAnalyzer,
    extractor: FrameExtractor,
}

impl FrequencyMonitor {
    pub fn new(params: Parameters) -> Self {
        Self {
            analyzer: SpectrumAnalyzer::new(params),
            extractor: FrameExtractor::new(params.frame_size()),
        }
    }

    /// Builds a monitor for `source`, checking once that the ring can hold
    /// a whole frame.
    ///
    /// # Errors
    /// * `BufferTooSmall` if `source` is shorter than one frame
    pub fn for_source(params: Parameters, source: &CaptureBuffer) -> Result<Self, AnalysisError> {
        let capacity = source.capacity();
        if capacity < params.frame_size() {
            return Err(AnalysisError::BufferTooSmall {
                capacity,
                frame_size: params.frame_size(),
            });
        }
        Ok(Self::new(params))
    }

    pub fn params(&self) -> &Parameters {
        self.analyzer.params()
    }

    /// Runs one tick against `source`.
    ///
    /// # Returns
    /// * `Ok(Some(hz))` - A fresh estimate
    /// * `Ok(None)` - Not enough new audio yet; try again next tick
    /// * `Err(e)` - A configuration problem. Analysis cannot continue.
    pub fn tick(&mut self, source: &CaptureBuffer) -> Result<Option<f32>, AnalysisError> {
        let frame = source.with_samples(|ring, cursor| self.extractor.next_frame(ring, cursor));
        match frame.and_then(|frame| self.analyzer.estimate_frequency(frame)) {
            Ok(frequency) => Ok(Some(frequency)),
            Err(AnalysisError::InsufficientData { available, required }) => {
                log::trace!("Skipping tick: {available}/{required} samples");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Starts counting new samples from scratch.
    pub fn reset(&mut self) {
        self.extractor.reset();
    }
}
