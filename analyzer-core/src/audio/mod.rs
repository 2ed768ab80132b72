//! Audio capture and pipeline wiring with cpal

pub mod buffer;
pub mod input;
pub mod processor;

pub use buffer::SampleRingBuffer;
pub use input::AudioInput;
pub use processor::{LatestFrame, ProcessorError, SpectrumProcessor};
