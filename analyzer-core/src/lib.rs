//! Real-time audio spectrum analyzer core
//!
//! Capture delivers fixed-size blocks of signed 16-bit samples; the core
//! transforms each block, maps bin magnitudes to display points, smooths
//! them over time, and publishes the latest frame for a renderer to read.

pub mod audio;
pub mod filters;
pub mod spectrum;

pub use audio::SpectrumProcessor;
pub use filters::SmaFilter;
pub use spectrum::{AnalyzerConfig, SpectrumAnalyzer, SpectrumFrame, WindowType};
