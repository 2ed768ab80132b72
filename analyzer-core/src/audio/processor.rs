//! Capture-to-spectrum pipeline
//!
//! Runs capture, transform, and smoothing on a worker thread and
//! publishes the newest frame into a last-write-wins snapshot cell that a
//! redraw loop reads on its own cadence.

use log::{debug, warn};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use thiserror::Error;

use super::buffer::SampleRingBuffer;
use super::input::{list_input_devices, AudioInput};
use crate::spectrum::{AnalyzerConfig, FftError, SpectrumAnalyzer, SpectrumFrame};

#[derive(Error, Debug)]
pub enum ProcessorError {
    #[error(transparent)]
    Audio(#[from] super::input::AudioError),

    #[error(transparent)]
    Fft(#[from] FftError),
}

/// Shared latest-frame cell.
///
/// The producer overwrites, the consumer clones the `Arc` and keeps
/// redrawing the same frame until a newer one lands. Neither side ever
/// waits on the other beyond the lock itself.
#[derive(Clone, Default)]
pub struct LatestFrame {
    cell: Arc<Mutex<Arc<SpectrumFrame>>>,
}

impl LatestFrame {
    /// Replace the current frame (last write wins).
    pub fn publish(&self, frame: SpectrumFrame) {
        if let Ok(mut guard) = self.cell.lock() {
            *guard = Arc::new(frame);
        }
    }

    /// Read-only snapshot of the most recent frame. Before the first
    /// block completes this is an empty default frame.
    pub fn snapshot(&self) -> Arc<SpectrumFrame> {
        match self.cell.lock() {
            Ok(guard) => Arc::clone(&guard),
            Err(_) => Arc::default(),
        }
    }
}

/// End-to-end spectrum pipeline
///
/// One producer context (the worker thread, paced by capture) and any
/// number of consumer reads through [`SpectrumProcessor::snapshot`].
pub struct SpectrumProcessor {
    config: AnalyzerConfig,
    latest: LatestFrame,
    running: Arc<AtomicBool>,
    input: Option<AudioInput>,
    worker: Option<std::thread::JoinHandle<()>>,
}

impl SpectrumProcessor {
    pub fn new(config: AnalyzerConfig) -> Self {
        Self {
            config,
            latest: LatestFrame::default(),
            running: Arc::new(AtomicBool::new(false)),
            input: None,
            worker: None,
        }
    }

    /// Start capture and the processing thread.
    ///
    /// # Returns
    /// The capture device name on success.
    pub fn start(&mut self) -> Result<String, ProcessorError> {
        let rb = SampleRingBuffer::new(self.config.fft_size * 16);
        let (producer, mut consumer) = rb.split();

        let input = AudioInput::from_default_device(producer)?;
        let device_name = input.device_info().name.clone();

        // The analyzer follows the device rate rather than demanding one
        self.config.sample_rate = f64::from(input.device_info().sample_rate);
        let mut analyzer = SpectrumAnalyzer::new(self.config.clone())?;
        debug!(
            "starting pipeline: device={device_name}, rate={}, block={}",
            self.config.sample_rate, self.config.fft_size
        );

        input.start()?;
        self.input = Some(input);

        self.running.store(true, Ordering::SeqCst);
        let running = Arc::clone(&self.running);
        let latest = self.latest.clone();
        let block_len = self.config.fft_size;

        let handle = std::thread::spawn(move || {
            let mut block = vec![0i16; block_len];

            while running.load(Ordering::SeqCst) {
                if consumer.pop_block(&mut block) {
                    match analyzer.analyze(&block) {
                        Ok(frame) => latest.publish(frame),
                        // Failed blocks are dropped; the previous
                        // snapshot stays current
                        Err(e) => warn!("dropping block: {e}"),
                    }
                } else {
                    // No full block yet; back off without burning a core
                    std::thread::sleep(std::time::Duration::from_micros(100));
                }
            }
        });
        self.worker = Some(handle);

        Ok(device_name)
    }

    /// Stop capture and join the processing thread.
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);

        if let Some(handle) = self.worker.take() {
            let _ = handle.join();
        }

        if let Some(input) = &self.input {
            let _ = input.pause();
        }
        self.input = None;
    }

    /// Latest processed frame; see [`LatestFrame::snapshot`].
    pub fn snapshot(&self) -> Arc<SpectrumFrame> {
        self.latest.snapshot()
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// List available capture device names.
    pub fn list_devices() -> Result<Vec<String>, ProcessorError> {
        let devices = list_input_devices()?;
        Ok(devices.into_iter().map(|d| d.name).collect())
    }
}

impl Drop for SpectrumProcessor {
    fn drop(&mut self) {
        self.stop();
    }
}
