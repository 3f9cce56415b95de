//! # Audio Capture Module
//!
//! This module handles real-time audio capture using CPAL (Cross-Platform Audio Library).
//! Captured samples land in a [`CaptureBuffer`]: a fixed-size ring plus a
//! write cursor counting every sample written since capture started.
//!
//! ## Features
//! - Default input device selection
//! - f32 stream configuration closest to the requested sample rate
//! - Down-mix to the first channel
//! - Rolling buffer that the analysis side reads without mutating

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use anyhow::{Result, anyhow};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::SupportedStreamConfigRange;

use crate::config::Settings;

/// Ring storage behind a [`CaptureBuffer`].
#[derive(Debug)]
struct Ring {
    samples: Vec<f32>,
    cursor: u64,
}

/// Shared handle to a rolling buffer of mono samples.
///
/// Cloning the handle shares the same ring. The audio callback writes,
/// the driving loop reads.
#[derive(Debug, Clone)]
pub struct CaptureBuffer {
    inner: Arc<Mutex<Ring>>,
}

impl CaptureBuffer {
    /// Creates an empty buffer holding `capacity` samples. A zero capacity is
    /// bumped to one so the ring index stays defined.
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Ring {
                samples: vec![0.0; capacity.max(1)],
                cursor: 0,
            })),
        }
    }

    // The ring only holds plain samples, so a panic mid-write cannot leave
    // it in a state worse than a glitch in the audio.
    fn lock(&self) -> MutexGuard<'_, Ring> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn capacity(&self) -> usize {
        self.lock().samples.len()
    }

    /// Total number of samples written since capture started.
    pub fn write_cursor(&self) -> u64 {
        self.lock().cursor
    }

    /// Appends samples, overwriting the oldest ones once the ring is full.
    pub fn push(&self, data: &[f32]) {
        let mut ring = self.lock();
        let len = ring.samples.len();
        let mut pos = (ring.cursor % len as u64) as usize;
        for &sample in data {
            ring.samples[pos] = sample;
            pos += 1;
            if pos == len {
                pos = 0;
            }
        }
        ring.cursor += data.len() as u64;
    }

    /// Appends every `channels`-th sample starting at the first one.
    pub fn push_first_channel(&self, data: &[f32], channels: usize) {
        if channels <= 1 {
            self.push(data);
            return;
        }
        let mono: Vec<f32> = data.iter().step_by(channels).copied().collect();
        self.push(&mono);
    }

    /// Runs `f` with a consistent view of the ring and its write cursor.
    pub fn with_samples<R>(&self, f: impl FnOnce(&[f32], u64) -> R) -> R {
        let ring = self.lock();
        f(&ring.samples, ring.cursor)
    }
}

/// A running microphone stream and the buffer it fills.
pub struct MicrophoneCapture {
    stream: cpal::Stream,
    buffer: CaptureBuffer,
    sample_rate: u32,
}

impl MicrophoneCapture {
    pub fn buffer(&self) -> &CaptureBuffer {
        &self.buffer
    }

    /// The rate the device actually runs at, which may differ from the
    /// requested one.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Stops capturing. Dropping the capture also releases the device.
    pub fn stop(&self) -> Result<()> {
        self.stream.pause()?;
        Ok(())
    }
}

/// Starts audio capture from the default input device.
///
/// This function:
/// 1. Selects the default audio input device
/// 2. Picks an f32 stream config near `settings.analysis.sample_rate()`
/// 3. Sets up a callback that writes the first channel into a rolling buffer
///
/// # Returns
/// * `Ok(capture)` - Running stream, its buffer and actual sample rate
/// * `Err(e)` - Error if audio setup fails
pub fn start_capture(settings: &Settings) -> Result<MicrophoneCapture> {
    let host = cpal::default_host();
    let device = host.default_input_device()
        .ok_or_else(|| anyhow!("No input device available"))?;

    log::info!("Using audio input device: {}", device.name()?);

    let target_rate = settings.analysis.sample_rate();
    let configs = device.supported_input_configs()?.collect::<Vec<_>>();
    let supported_config = find_supported_config(configs, target_rate)
        .ok_or_else(|| anyhow!("No suitable f32 input format found"))?;

    let sample_rate = cpal::SampleRate(target_rate.clamp(
        supported_config.min_sample_rate().0,
        supported_config.max_sample_rate().0,
    ));
    let config: cpal::StreamConfig = supported_config.with_sample_rate(sample_rate).into();
    let channels = config.channels as usize;

    log::info!("Selected sample rate: {} Hz, {} channel(s)", sample_rate.0, channels);

    // Sized from the actual rate so the ring still spans `capture_seconds`.
    let buffer = CaptureBuffer::new(settings.capture_capacity(sample_rate.0));
    let writer = buffer.clone();

    let err_fn = |err| log::error!("An error occurred on the audio stream: {}", err);

    let stream = device.build_input_stream(
        &config,
        move |data: &[f32], _: &cpal::InputCallbackInfo| {
            writer.push_first_channel(data, channels);
        },
        err_fn,
        None,
    )?;

    stream.play()?;

    Ok(MicrophoneCapture {
        stream,
        buffer,
        sample_rate: sample_rate.0,
    })
}

/// Finds the best supported audio configuration for the target sample rate.
///
/// Only 32-bit float formats qualify. Mono is preferred, then the range
/// closest to `target_rate`.
fn find_supported_config(
    configs: Vec<SupportedStreamConfigRange>,
    target_rate: u32,
) -> Option<SupportedStreamConfigRange> {
    configs
        .into_iter()
        .filter(|c| c.sample_format() == cpal::SampleFormat::F32)
        .min_by_key(|c| {
            let rate_distance = if target_rate < c.min_sample_rate().0 {
                c.min_sample_rate().0 - target_rate
            } else {
                target_rate.saturating_sub(c.max_sample_rate().0)
            };
            (c.channels() != 1, rate_distance)
        })
}
