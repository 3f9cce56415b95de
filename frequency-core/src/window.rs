//! # Window Module
//!
//! Hamming windowing for analysis frames. Tapering the frame edges before
//! the FFT reduces spectral leakage into neighbouring bins.

use std::f32::consts::PI;

/// Hamming coefficient for sample `i` of an `n`-sample frame.
///
/// `0.54 - 0.46 * cos(2*pi*i / (n - 1))`. Requires `n >= 2`.
#[inline]
pub fn hamming_coefficient(i: usize, n: usize) -> f32 {
    0.54 - 0.46 * (2.0 * PI * i as f32 / (n - 1) as f32).cos()
}

/// Applies a Hamming window to the buffer in place.
///
/// The buffer is consumed by this call: its samples are no longer the raw
/// capture afterwards. Buffers shorter than two samples are left untouched.
///
/// # Arguments
/// * `buffer` - Audio frame to window (modified in-place)
pub fn apply_hamming_window(buffer: &mut [f32]) {
    let n = buffer.len();
    if n < 2 {
        return;
    }
    for (i, sample) in buffer.iter_mut().enumerate() {
        *sample *= hamming_coefficient(i, n);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edges_are_attenuated_to_0_08() {
        let mut frame = vec![1.0_f32; 8];
        apply_hamming_window(&mut frame);
        assert!((frame[0] - 0.08).abs() < 1e-6);
        assert!((frame[7] - 0.08).abs() < 1e-6);
    }

    #[test]
    fn window_is_symmetric_and_peaks_in_the_middle() {
        let mut frame = vec![1.0_f32; 9];
        apply_hamming_window(&mut frame);
        for i in 0..9 {
            assert!((frame[i] - frame[8 - i]).abs() < 1e-6);
        }
        assert!((frame[4] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn scales_existing_samples() {
        let mut frame = vec![2.0_f32, -4.0, 0.0, 6.0];
        apply_hamming_window(&mut frame);
        assert!((frame[0] - 0.16).abs() < 1e-6);
        assert!((frame[1] - (-4.0 * hamming_coefficient(1, 4))).abs() < 1e-6);
        assert_eq!(frame[2], 0.0);
    }

    #[test]
    fn tiny_buffers_are_ignored() {
        let mut single = vec![3.0_f32];
        apply_hamming_window(&mut single);
        assert_eq!(single, vec![3.0]);

        let mut empty: Vec<f32> = Vec::new();
        apply_hamming_window(&mut empty);
        assert!(empty.is_empty());
    }
}
