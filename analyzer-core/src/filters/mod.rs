//! Temporal smoothing of per-bin magnitude streams

pub mod sma;

pub use sma::{SmaError, SmaFilter};
