//! Spectral analysis: transforms, windowing, and the display pipeline

pub mod analysis;
pub mod fft;
pub mod windowing;

pub use analysis::{AnalyzerConfig, SpectrumAnalyzer, SpectrumFrame};
pub use fft::{dft, fft, FftError, Spectrum};
pub use windowing::{apply_window, WindowType};
