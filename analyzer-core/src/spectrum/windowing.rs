//! Window functions for spectral analysis
//!
//! Edge-tapering envelopes applied to a sample block before the transform
//! to reduce spectral leakage. Coefficients are recomputed from the block
//! length and index on every call; nothing is cached.

use num_complex::Complex64;
use std::f64::consts::PI;

/// Window function types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowType {
    /// Hamming window: w[n] = 0.54 - 0.46*cos(2πn/(N-1))
    /// Sidelobe attenuation: ~53 dB
    Hamming,

    /// Blackman window: w[n] = 0.42 - 0.5*cos(2πn/(N-1)) + 0.08*cos(4πn/(N-1))
    /// Sidelobe attenuation: ~74 dB
    Blackman,
}

/// Apply the selected window to a block in place.
pub fn apply_window(block: &mut [Complex64], kind: WindowType) {
    match kind {
        WindowType::Hamming => hamming_window(block),
        WindowType::Blackman => blackman_window(block),
    }
}

/// Multiply element i by 0.54 - 0.46*cos(2πi/(N-1)), in place.
pub fn hamming_window(block: &mut [Complex64]) {
    let n = block.len();
    if n < 2 {
        return;
    }

    let m = (n - 1) as f64;
    for (i, sample) in block.iter_mut().enumerate() {
        let angle = 2.0 * PI * i as f64 / m;
        *sample *= 0.54 - 0.46 * angle.cos();
    }
}

/// Multiply element i by 0.42 - 0.5*cos(2πi/(N-1)) + 0.08*cos(4πi/(N-1)),
/// in place.
pub fn blackman_window(block: &mut [Complex64]) {
    let n = block.len();
    if n < 2 {
        return;
    }

    let m = (n - 1) as f64;
    for (i, sample) in block.iter_mut().enumerate() {
        let angle = 2.0 * PI * i as f64 / m;
        *sample *= 0.42 - 0.5 * angle.cos() + 0.08 * (2.0 * angle).cos();
    }
}
