//! High-level spectrum analyzer
//!
//! Combines the fast transform with windowing and per-bin temporal
//! smoothing to turn raw capture blocks into stable display traces.

use num_complex::Complex64;

use super::fft::{fft, FftError};
use super::windowing::WindowType;
use crate::filters::SmaFilter;

/// Smoothing order of the fast "mean" trace.
pub const MEAN_ORDER: usize = 10;

/// Smoothing order of the slow peak-hold trace.
pub const PEAK_ORDER: usize = 38;

/// Spectrum analyzer configuration
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    /// Transform size in samples; must be a power of two
    pub fft_size: usize,

    /// Window applied before the transform
    pub window: WindowType,

    /// Sample rate in Hz
    pub sample_rate: f64,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            fft_size: 1024,
            window: WindowType::Hamming,
            sample_rate: 48000.0,
        }
    }
}

/// One processed block: smoothed single-sided display traces.
///
/// Display points are in quarter-dB steps above the visualization floor;
/// index k corresponds to frequency `k * sample_rate / fft_size`.
#[derive(Debug, Clone, Default)]
pub struct SpectrumFrame {
    /// Fast running-mean trace, one point per bin
    pub mean: Vec<u16>,

    /// Slow peak-hold trace, one point per bin
    pub peak: Vec<u16>,

    /// Sample rate the block was captured at
    pub sample_rate: f64,

    /// Transform size the frame was produced with
    pub fft_size: usize,
}

impl SpectrumFrame {
    /// Number of single-sided bins (fft_size / 2).
    pub fn num_bins(&self) -> usize {
        self.mean.len()
    }

    /// Center frequency of bin k in Hz.
    pub fn bin_to_hz(&self, bin: usize) -> f64 {
        bin as f64 * self.sample_rate / self.fft_size as f64
    }

    /// Bin indices for a logarithmic display: 1, 2, 4, ... doubling up to
    /// the half-spectrum, with the top slot clamped to the 20 kHz bin so
    /// the rightmost column stays inside the audible range.
    pub fn log_scale_bins(&self) -> Vec<usize> {
        let half = self.num_bins();
        if half == 0 {
            return Vec::new();
        }

        let hz_per_bin = self.sample_rate / self.fft_size as f64;
        let top = if hz_per_bin > 0.0 {
            ((20000.0 / hz_per_bin) as usize).min(half - 1)
        } else {
            half - 1
        };

        let mut bins = Vec::new();
        let mut i = 1usize;
        while i < half {
            bins.push(i);
            i *= 2;
        }
        bins.push(top);
        bins
    }
}

/// Real-time spectrum analyzer
///
/// Owns one mean filter and one peak filter per bin; smoothing state
/// persists across blocks for the whole session.
pub struct SpectrumAnalyzer {
    config: AnalyzerConfig,
    scratch_in: Vec<Complex64>,
    scratch_out: Vec<Complex64>,
    mean_bank: Vec<SmaFilter>,
    peak_bank: Vec<SmaFilter>,
}

impl SpectrumAnalyzer {
    /// Create an analyzer for the configured block size.
    ///
    /// # Returns
    /// [`FftError::InvalidBlockSize`] unless `fft_size` is a power of two
    /// >= 2, so the hot path never revalidates per block.
    pub fn new(config: AnalyzerConfig) -> Result<Self, FftError> {
        let n = config.fft_size;
        if n < 2 || !n.is_power_of_two() {
            return Err(FftError::InvalidBlockSize(n));
        }

        let half = n / 2;
        Ok(Self {
            config,
            scratch_in: vec![Complex64::new(0.0, 0.0); n],
            scratch_out: vec![Complex64::new(0.0, 0.0); n],
            mean_bank: (0..half).map(|_| SmaFilter::new(MEAN_ORDER)).collect(),
            peak_bank: (0..half).map(|_| SmaFilter::new(PEAK_ORDER)).collect(),
        })
    }

    /// Process one capture block into smoothed display traces.
    ///
    /// # Arguments
    /// * `block` - Signed 16-bit samples, exactly `fft_size` of them
    pub fn analyze(&mut self, block: &[i16]) -> Result<SpectrumFrame, FftError> {
        let n = self.config.fft_size;
        if block.len() != n {
            return Err(FftError::LengthMismatch {
                input: block.len(),
                output: n,
            });
        }

        for (slot, &sample) in self.scratch_in.iter_mut().zip(block) {
            *slot = Complex64::new(f64::from(sample), 0.0);
        }
        fft(
            &self.scratch_in,
            &mut self.scratch_out,
            Some(self.config.window),
        )?;

        let half = n / 2;
        let mut mean = Vec::with_capacity(half);
        let mut peak = Vec::with_capacity(half);
        for k in 0..half {
            let point = display_point(self.scratch_out[k].norm(), n);
            mean.push(self.mean_bank[k].feed(point));
            peak.push(self.peak_bank[k].feed_peak(point));
        }

        Ok(SpectrumFrame {
            mean,
            peak,
            sample_rate: self.config.sample_rate,
            fft_size: n,
        })
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Number of single-sided bins produced per frame.
    pub fn num_bins(&self) -> usize {
        self.config.fft_size / 2
    }
}

/// Map one bin magnitude to a display point: normalize by N/2 and
/// full-scale i16, convert to dB with a +60 dB floor offset, clamp at
/// zero, quantize in quarter-dB steps.
fn display_point(magnitude: f64, fft_size: usize) -> u16 {
    let normalized = magnitude / (fft_size as f64 / 2.0) / f64::from(i16::MAX);
    let db = 20.0 * normalized.log10() + 60.0;
    (db.max(0.0) * 4.0) as u16
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn sine_block(n: usize, cycles: f64, amplitude: f64) -> Vec<i16> {
        (0..n)
            .map(|i| (amplitude * (2.0 * PI * cycles * i as f64 / n as f64).sin()) as i16)
            .collect()
    }

    #[test]
    fn test_rejects_bad_fft_size() {
        let config = AnalyzerConfig {
            fft_size: 100,
            ..Default::default()
        };
        assert_eq!(
            SpectrumAnalyzer::new(config).err(),
            Some(FftError::InvalidBlockSize(100))
        );
    }

    #[test]
    fn test_rejects_short_block() {
        let mut analyzer = SpectrumAnalyzer::new(AnalyzerConfig::default()).unwrap();
        let block = vec![0i16; 512];
        assert!(matches!(
            analyzer.analyze(&block),
            Err(FftError::LengthMismatch { input: 512, output: 1024 })
        ));
    }

    #[test]
    fn test_sine_peaks_at_expected_bin() {
        let n = 1024;
        let mut analyzer = SpectrumAnalyzer::new(AnalyzerConfig::default()).unwrap();
        let block = sine_block(n, 64.0, 30000.0);

        // Let the mean trace settle
        let mut frame = SpectrumFrame::default();
        for _ in 0..MEAN_ORDER {
            frame = analyzer.analyze(&block).unwrap();
        }

        let (peak_bin, _) = frame
            .mean
            .iter()
            .enumerate()
            .max_by_key(|&(_, &v)| v)
            .unwrap();
        assert!((peak_bin as i64 - 64).unsigned_abs() <= 1);
    }

    #[test]
    fn test_silence_is_floor() {
        let mut analyzer = SpectrumAnalyzer::new(AnalyzerConfig::default()).unwrap();
        let frame = analyzer.analyze(&vec![0i16; 1024]).unwrap();

        assert_eq!(frame.num_bins(), 512);
        assert!(frame.mean.iter().all(|&v| v == 0));
        assert!(frame.peak.iter().all(|&v| v == 0));
    }

    #[test]
    fn test_peak_trace_holds_after_burst() {
        let n = 1024;
        let mut analyzer = SpectrumAnalyzer::new(AnalyzerConfig::default()).unwrap();
        let loud = sine_block(n, 16.0, 30000.0);
        let quiet = vec![0i16; n];

        let burst = analyzer.analyze(&loud).unwrap();
        let after = analyzer.analyze(&quiet).unwrap();

        // Peak-hold keeps the burst level while the mean starts decaying
        assert_eq!(after.peak[16], burst.peak[16]);
        assert!(after.mean[16] <= burst.mean[16]);
    }

    #[test]
    fn test_bin_to_hz() {
        let frame = SpectrumFrame {
            mean: vec![0; 512],
            peak: vec![0; 512],
            sample_rate: 48000.0,
            fft_size: 1024,
        };
        assert_eq!(frame.bin_to_hz(0), 0.0);
        assert!((frame.bin_to_hz(64) - 3000.0).abs() < 1e-9);
    }

    #[test]
    fn test_log_scale_bins() {
        let frame = SpectrumFrame {
            mean: vec![0; 512],
            peak: vec![0; 512],
            sample_rate: 48000.0,
            fft_size: 1024,
        };
        let bins = frame.log_scale_bins();

        assert_eq!(&bins[..9], &[1, 2, 4, 8, 16, 32, 64, 128, 256]);
        // Top slot is the 20 kHz bin: 20000 / (48000/1024) = 426
        assert_eq!(*bins.last().unwrap(), 426);
        assert!(bins.iter().all(|&b| b < 512));
    }

    #[test]
    fn test_display_point_mapping() {
        // Full-scale DC-normalized magnitude sits 60 dB above the floor
        let full = display_point(512.0 * f64::from(i16::MAX), 1024);
        assert_eq!(full, 240);

        assert_eq!(display_point(0.0, 1024), 0);
    }
}
