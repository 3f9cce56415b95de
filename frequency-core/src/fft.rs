//! # Fast Fourier Transform (FFT) Module
//!
//! An iterative radix-2 Cooley-Tukey transform that works in place on a
//! buffer of double-precision complex values. Double precision keeps the
//! accumulated twiddle rotation error small across all stages.
//!
//! ## Steps
//! 1. Bit-reversal permutation of the input
//! 2. `log2 N` butterfly stages, `len = 2, 4, ..., N`
//!
//! The result is in natural frequency order and uses the forward sign
//! convention (`e^{-i 2 pi k n / N}`).

use std::f64::consts::PI;

pub use rustfft::num_complex::Complex;

use crate::error::AnalysisError;

/// Reverses the low `bits` bits of `value`.
///
/// Bits above `bits` are ignored, so the result is always `< 2^bits`.
pub fn reverse_bits(mut value: usize, bits: u32) -> usize {
    let mut result = 0;
    for _ in 0..bits {
        result = (result << 1) | (value & 1);
        value >>= 1;
    }
    result
}

/// Reorders the buffer into bit-reversed index order.
fn bit_reverse_permute(buffer: &mut [Complex<f64>], bits: u32) {
    for i in 0..buffer.len() {
        let j = reverse_bits(i, bits);
        if j > i {
            buffer.swap(i, j);
        }
    }
}

/// Transforms `buffer` into its discrete Fourier transform, in place.
///
/// # Errors
/// * `FrameSizeNotPowerOfTwo` if the buffer length is zero or not a power of
///   two. The buffer is left untouched in that case.
pub fn fft_in_place(buffer: &mut [Complex<f64>]) -> Result<(), AnalysisError> {
    let n = buffer.len();
    if !n.is_power_of_two() {
        return Err(AnalysisError::FrameSizeNotPowerOfTwo(n));
    }

    bit_reverse_permute(buffer, n.trailing_zeros());

    let mut len = 2;
    while len <= n {
        let half = len / 2;
        let angle = -2.0 * PI / len as f64;
        let w_len = Complex::new(angle.cos(), angle.sin());

        for start in (0..n).step_by(len) {
            let mut w = Complex::new(1.0, 0.0);
            for j in 0..half {
                let u = buffer[start + j];
                let v = buffer[start + j + half] * w;
                buffer[start + j] = u + v;
                buffer[start + j + half] = u - v;
                w *= w_len;
            }
        }

        len <<= 1;
    }

    Ok(())
}
