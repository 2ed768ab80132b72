//! Fourier transform engine
//!
//! A reference O(N²) direct transform plus a recursive radix-2 fast
//! transform for the hot path. Both are stateless free functions and safe
//! to call from any thread.

use num_complex::Complex64;
use std::f64::consts::PI;
use thiserror::Error;

use super::windowing::{apply_window, WindowType};

/// One transform result: N complex coefficients, bin k at frequency
/// k * sample_rate / N.
pub type Spectrum = Vec<Complex64>;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum FftError {
    #[error("input length {input} does not match output length {output}")]
    LengthMismatch { input: usize, output: usize },

    #[error("block size {0} is not a power of two >= 2")]
    InvalidBlockSize(usize),

    #[error("{0} is not supported")]
    Unsupported(&'static str),
}

/// Direct discrete Fourier transform: out[k] = sum(in[n] * e^(-2*pi*i*n*k/N)).
///
/// O(N²). Works for any length, including non-powers of two; used as the
/// correctness oracle for [`fft`].
///
/// # Returns
/// The transform length N. On [`FftError::LengthMismatch`] no computation
/// is performed and `output` is left untouched.
pub fn dft(input: &[Complex64], output: &mut [Complex64]) -> Result<usize, FftError> {
    let n = input.len();
    if n != output.len() {
        return Err(FftError::LengthMismatch {
            input: n,
            output: output.len(),
        });
    }

    for (k, out) in output.iter_mut().enumerate() {
        let mut acc = Complex64::new(0.0, 0.0);
        for (i, x) in input.iter().enumerate() {
            let angle = -2.0 * PI * (i * k) as f64 / n as f64;
            acc += x * Complex64::new(angle.cos(), angle.sin());
        }
        *out = acc;
    }

    Ok(n)
}

/// Fast Fourier transform via recursive radix-2 decomposition.
///
/// # Arguments
/// * `input` - Sample block, length must be a power of two >= 2
/// * `output` - Receives the spectrum, must match `input` in length
/// * `window` - Optional window applied to a working copy before the
///   transform; `input` itself is never modified
///
/// # Returns
/// The transform length N, or [`FftError::InvalidBlockSize`] /
/// [`FftError::LengthMismatch`] before any recursion happens.
pub fn fft(
    input: &[Complex64],
    output: &mut [Complex64],
    window: Option<WindowType>,
) -> Result<usize, FftError> {
    let n = input.len();
    if n != output.len() {
        return Err(FftError::LengthMismatch {
            input: n,
            output: output.len(),
        });
    }
    if n < 2 || !n.is_power_of_two() {
        return Err(FftError::InvalidBlockSize(n));
    }

    let spectrum = match window {
        Some(kind) => {
            let mut windowed = input.to_vec();
            apply_window(&mut windowed, kind);
            fft_recurse(&windowed)
        }
        None => fft_recurse(input),
    };
    output.copy_from_slice(&spectrum);

    Ok(n)
}

/// Inverse direct transform. Declared for API symmetry but not provided;
/// always fails rather than returning a zero spectrum that looks computed.
pub fn idft(_input: &[Complex64], _output: &mut [Complex64]) -> Result<usize, FftError> {
    Err(FftError::Unsupported("inverse direct transform"))
}

/// Inverse fast transform. Not provided; see [`idft`].
pub fn ifft(_input: &[Complex64], _output: &mut [Complex64]) -> Result<usize, FftError> {
    Err(FftError::Unsupported("inverse fast transform"))
}

// Length is a power of two >= 2, checked by fft() before the first call.
fn fft_recurse(input: &[Complex64]) -> Spectrum {
    let n = input.len();

    if n == 2 {
        return vec![input[0] + input[1], input[0] - input[1]];
    }

    let even: Vec<Complex64> = input.iter().step_by(2).copied().collect();
    let odd: Vec<Complex64> = input.iter().skip(1).step_by(2).copied().collect();

    let e = fft_recurse(&even);
    let o = fft_recurse(&odd);

    let mut out = vec![Complex64::new(0.0, 0.0); n];
    for k in 0..n / 2 {
        let w = twiddle(k, n);
        out[k] = e[k] + w * o[k];
        out[k + n / 2] = e[k] - w * o[k];
    }

    out
}

/// Twiddle factor e^(-2*pi*i*k/N). Exactly 1 when k is a multiple of N so
/// the zero-frequency term carries no rounding error.
fn twiddle(k: usize, n: usize) -> Complex64 {
    if k % n == 0 {
        return Complex64::new(1.0, 0.0);
    }

    let angle = -2.0 * PI * k as f64 / n as f64;
    Complex64::new(angle.cos(), angle.sin())
}
