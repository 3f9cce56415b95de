//! # Frame Extraction Module
//!
//! Pulls the most recent `frame_size` contiguous samples out of a rolling
//! capture buffer, given the capture's monotonically increasing write cursor.
//! Sample number `k` (counting from the start of capture) lives at ring index
//! `k % ring.len()`.

use crate::error::AnalysisError;

/// Copies the `frame_size` samples ending at `cursor` out of `ring`.
///
/// The ring is only read. Wraparound at the end of the ring is handled by
/// splitting the copy in two.
///
/// # Errors
/// * `BufferTooSmall` if the ring cannot hold a whole frame
/// * `InsufficientData` if fewer than `frame_size` samples were ever written
pub fn latest_frame(ring: &[f32], cursor: u64, frame_size: usize) -> Result<Vec<f32>, AnalysisError> {
    if ring.len() < frame_size {
        return Err(AnalysisError::BufferTooSmall {
            capacity: ring.len(),
            frame_size,
        });
    }
    if cursor < frame_size as u64 {
        return Err(AnalysisError::InsufficientData {
            available: cursor,
            required: frame_size as u64,
        });
    }

    if frame_size == 0 {
        return Ok(Vec::new());
    }

    let start = ((cursor - frame_size as u64) % ring.len() as u64) as usize;
    let mut frame = Vec::with_capacity(frame_size);
    let first = (ring.len() - start).min(frame_size);
    frame.extend_from_slice(&ring[start..start + first]);
    frame.extend_from_slice(&ring[..frame_size - first]);
    Ok(frame)
}

/// Hands out non-overlapping-in-time frames: a new frame is only produced
/// once the cursor has moved at least a full frame past the last read.
#[derive(Debug, Clone)]
pub struct FrameExtractor {
    frame_size: usize,
    last_read: Option<u64>,
}

impl FrameExtractor {
    pub fn new(frame_size: usize) -> Self {
        Self {
            frame_size,
            last_read: None,
        }
    }

    pub fn frame_size(&self) -> usize {
        self.frame_size
    }

    /// Cursor position of the last successful read, if any.
    pub fn last_read(&self) -> Option<u64> {
        self.last_read
    }

    /// Returns the latest frame if enough new samples have arrived.
    ///
    /// # Errors
    /// * `InsufficientData` if the cursor has not advanced a full frame since
    ///   the last read (or since capture start). Skip the tick.
    /// * `BufferTooSmall` as for [`latest_frame`]
    pub fn next_frame(&mut self, ring: &[f32], cursor: u64) -> Result<Vec<f32>, AnalysisError> {
        let since = self.last_read.unwrap_or(0);
        let fresh = cursor.saturating_sub(since);
        if fresh < self.frame_size as u64 {
            return Err(AnalysisError::InsufficientData {
                available: fresh,
                required: self.frame_size as u64,
            });
        }

        let frame = latest_frame(ring, cursor, self.frame_size)?;
        self.last_read = Some(cursor);
        Ok(frame)
    }

    /// Forgets the last read position, e.g. after a capture restart.
    pub fn reset(&mut self) {
        self.last_read = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ring(len: usize) -> Vec<f32> {
        (0..len).map(|i| i as f32).collect()
    }

    #[test]
    fn contiguous_frame_without_wrap() {
        let frame = latest_frame(&ring(10), 7, 4).unwrap();
        assert_eq!(frame, vec![3.0, 4.0, 5.0, 6.0]);
    }

    #[test]
    fn frame_ending_exactly_at_ring_end() {
        let frame = latest_frame(&ring(8), 8, 4).unwrap();
        assert_eq!(frame, vec![4.0, 5.0, 6.0, 7.0]);
    }

    #[test]
    fn frame_wraps_around_the_ring() {
        // Samples 8..12 were written to indices 0..2 after 6, 7 at the end.
        let mut buffer = ring(8);
        buffer[0] = 8.0;
        buffer[1] = 9.0;
        let frame = latest_frame(&buffer, 10, 4).unwrap();
        assert_eq!(frame, vec![6.0, 7.0, 8.0, 9.0]);
    }

    #[test]
    fn whole_ring_as_one_frame() {
        let frame = latest_frame(&ring(4), 6, 4).unwrap();
        assert_eq!(frame, vec![2.0, 3.0, 0.0, 1.0]);
    }

    #[test]
    fn too_early_in_capture() {
        assert_eq!(
            latest_frame(&ring(16), 3, 4),
            Err(AnalysisError::InsufficientData { available: 3, required: 4 })
        );
    }

    #[test]
    fn ring_shorter_than_frame() {
        assert_eq!(
            latest_frame(&ring(2), 100, 4),
            Err(AnalysisError::BufferTooSmall { capacity: 2, frame_size: 4 })
        );
    }

    #[test]
    fn extractor_waits_for_a_full_frame_of_new_samples() {
        let buffer = ring(16);
        let mut extractor = FrameExtractor::new(4);

        assert!(extractor.next_frame(&buffer, 3).is_err());
        assert_eq!(extractor.next_frame(&buffer, 4).unwrap(), vec![0.0, 1.0, 2.0, 3.0]);
        assert_eq!(extractor.last_read(), Some(4));

        assert_eq!(
            extractor.next_frame(&buffer, 7),
            Err(AnalysisError::InsufficientData { available: 3, required: 4 })
        );
        assert_eq!(extractor.next_frame(&buffer, 9).unwrap(), vec![5.0, 6.0, 7.0, 8.0]);
        assert_eq!(extractor.last_read(), Some(9));

        extractor.reset();
        assert_eq!(extractor.last_read(), None);
    }
}
