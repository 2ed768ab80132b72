//! Audio input capture using cpal
//!
//! Delivers signed 16-bit mono samples into the ring buffer at whatever
//! rate the device runs at; block assembly happens downstream.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Device, Stream, StreamConfig};
use log::{trace, warn};
use thiserror::Error;

use super::buffer::SampleProducer;

#[derive(Error, Debug)]
pub enum AudioError {
    #[error("no audio input device found")]
    NoDevice,

    #[error("failed to get device name: {0}")]
    DeviceName(String),

    #[error("failed to get default config: {0}")]
    DefaultConfig(String),

    #[error("failed to build stream: {0}")]
    BuildStream(String),

    #[error("failed to control stream: {0}")]
    StreamControl(String),
}

/// Audio input device information
#[derive(Debug, Clone)]
pub struct AudioDeviceInfo {
    pub name: String,
    pub sample_rate: u32,
    pub channels: u16,
}

/// Audio input stream
pub struct AudioInput {
    stream: Stream,
    device_info: AudioDeviceInfo,
}

impl AudioInput {
    /// Capture from the default input device.
    pub fn from_default_device(producer: SampleProducer) -> Result<Self, AudioError> {
        let host = cpal::default_host();
        let device = host.default_input_device().ok_or(AudioError::NoDevice)?;

        Self::from_device(device, producer)
    }

    /// Capture from a specific device.
    ///
    /// Multi-channel input is downmixed to mono by averaging each frame;
    /// f32 callback samples are rescaled to the full i16 range.
    pub fn from_device(device: Device, mut producer: SampleProducer) -> Result<Self, AudioError> {
        let name = device
            .name()
            .map_err(|e| AudioError::DeviceName(e.to_string()))?;

        let config = device
            .default_input_config()
            .map_err(|e| AudioError::DefaultConfig(e.to_string()))?;

        let device_info = AudioDeviceInfo {
            name,
            sample_rate: config.sample_rate().0,
            channels: config.channels(),
        };
        let channels = usize::from(device_info.channels).max(1);

        let stream_config: StreamConfig = config.into();

        // The data callback is the ring buffer's only writer
        let stream = device
            .build_input_stream(
                &stream_config,
                move |data: &[f32], _: &cpal::InputCallbackInfo| {
                    let samples: Vec<i16> = data
                        .chunks(channels)
                        .map(|frame| {
                            let mono: f32 = frame.iter().sum::<f32>() / channels as f32;
                            (mono.clamp(-1.0, 1.0) * f32::from(i16::MAX)) as i16
                        })
                        .collect();

                    trace!("capture callback: {} frames", samples.len());
                    let written = producer.write(&samples);
                    if written < samples.len() {
                        trace!("ring buffer full, dropped {} samples", samples.len() - written);
                    }
                },
                move |err| {
                    warn!("audio input error: {err}");
                },
                None,
            )
            .map_err(|e| AudioError::BuildStream(e.to_string()))?;

        Ok(Self {
            stream,
            device_info,
        })
    }

    /// Start capturing audio.
    pub fn start(&self) -> Result<(), AudioError> {
        self.stream
            .play()
            .map_err(|e| AudioError::StreamControl(e.to_string()))
    }

    /// Pause audio capture.
    pub fn pause(&self) -> Result<(), AudioError> {
        self.stream
            .pause()
            .map_err(|e| AudioError::StreamControl(e.to_string()))
    }

    /// Get device information.
    pub fn device_info(&self) -> &AudioDeviceInfo {
        &self.device_info
    }
}

/// List available audio input devices.
pub fn list_input_devices() -> Result<Vec<AudioDeviceInfo>, AudioError> {
    let host = cpal::default_host();
    let mut devices = Vec::new();

    let device_iter = host
        .input_devices()
        .map_err(|e| AudioError::DeviceName(e.to_string()))?;

    for device in device_iter {
        if let Ok(name) = device.name() {
            if let Ok(config) = device.default_input_config() {
                devices.push(AudioDeviceInfo {
                    name,
                    sample_rate: config.sample_rate().0,
                    channels: config.channels(),
                });
            }
        }
    }

    Ok(devices)
}
