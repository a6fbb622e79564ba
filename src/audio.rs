//! Audio delivery
//!
//! The engine core treats the host audio device as a queue: push
//! interleaved stereo f32, ask how much is still buffered, pause or resume.
//! [`AudioSink`] captures exactly that surface. [`CpalOutput`] implements
//! it over a real device: a lock-free SPSC ring buffer sits between the
//! engine thread (producer) and the cpal output callback (consumer), and an
//! underrun simply plays zeros until the queue refills.
//!
//! [`MemorySink`] implements the same trait into a plain `Vec` for tests
//! and offline use.

use crate::constants::{BUF_SIZE, SAMPLE_RATE};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use ringbuf::traits::{Consumer, Observer, Producer, Split};
use ringbuf::{HeapCons, HeapProd, HeapRb};
use tracing::{error, info, warn};

/// Queue-mode audio output consumed by the engine loop.
pub trait AudioSink {
    /// Enqueue interleaved stereo samples. Returns how many were accepted;
    /// fewer than `samples.len()` means the queue is full.
    fn queue(&mut self, samples: &[f32]) -> usize;

    /// Bytes currently queued and not yet played.
    fn queued_bytes(&self) -> usize;

    /// Pause or resume playback. Queued data is kept either way.
    fn set_paused(&mut self, paused: bool);
}

/// Real audio output through cpal (ALSA, JACK, CoreAudio, WASAPI, ...).
pub struct CpalOutput {
    producer: HeapProd<f32>,
    stream: cpal::Stream,
}

impl CpalOutput {
    /// Open the default output device for stereo f32 at the engine sample
    /// rate, with room for `queue_capacity_samples` floats between the
    /// engine and the device callback.
    pub fn open(queue_capacity_samples: usize) -> Result<Self, String> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| "no audio output device found".to_string())?;
        info!(
            "audio device: {}",
            device.name().unwrap_or_else(|_| "<unknown>".into())
        );

        let default_config = device
            .default_output_config()
            .map_err(|e| format!("no default output config: {}", e))?;
        let sample_format = default_config.sample_format();

        let config = cpal::StreamConfig {
            channels: 2,
            sample_rate: cpal::SampleRate(SAMPLE_RATE),
            buffer_size: cpal::BufferSize::Default,
        };

        let ring = HeapRb::<f32>::new(queue_capacity_samples.max(BUF_SIZE * 2));
        let (producer, consumer) = ring.split();

        let stream = match sample_format {
            cpal::SampleFormat::F32 => build_stream::<f32>(&device, &config, consumer),
            cpal::SampleFormat::I16 => build_stream::<i16>(&device, &config, consumer),
            cpal::SampleFormat::U16 => build_stream::<u16>(&device, &config, consumer),
            other => Err(format!("unsupported sample format {:?}", other)),
        }?;

        stream.play().map_err(|e| e.to_string())?;
        info!("audio stream started: 2ch {} Hz", SAMPLE_RATE);

        Ok(Self { producer, stream })
    }
}

fn build_stream<T>(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    mut consumer: HeapCons<f32>,
) -> Result<cpal::Stream, String>
where
    T: cpal::SizedSample + cpal::FromSample<f32>,
{
    let mut scratch: Vec<f32> = Vec::new();
    let mut underruns: usize = 0;

    device
        .build_output_stream(
            config,
            move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
                scratch.resize(data.len(), 0.0);
                let read = consumer.pop_slice(&mut scratch);
                if read < data.len() {
                    // Underrun: audible dropout, but state stays sane and
                    // playback recovers once the queue refills
                    scratch[read..].fill(0.0);
                    underruns += 1;
                    if underruns % 100 == 1 {
                        warn!("audio underrun #{}", underruns);
                    }
                }
                for (dst, &src) in data.iter_mut().zip(scratch.iter()) {
                    *dst = T::from_sample(src);
                }
            },
            |err| error!("audio stream error: {}", err),
            None,
        )
        .map_err(|e| e.to_string())
}

impl AudioSink for CpalOutput {
    fn queue(&mut self, samples: &[f32]) -> usize {
        self.producer.push_slice(samples)
    }

    fn queued_bytes(&self) -> usize {
        self.producer.occupied_len() * std::mem::size_of::<f32>()
    }

    fn set_paused(&mut self, paused: bool) {
        let result = if paused {
            self.stream.pause().map_err(|e| e.to_string())
        } else {
            self.stream.play().map_err(|e| e.to_string())
        };
        if let Err(e) = result {
            warn!("pause({}) failed: {}", paused, e);
        }
    }
}

/// Collects queued audio into memory. `drain` simulates the device
/// consuming data, which lets tests exercise the engine loop's queueing
/// discipline deterministically.
#[derive(Debug, Default)]
pub struct MemorySink {
    data: Vec<f32>,
    drained: usize,
    paused: bool,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything ever queued, in order.
    pub fn samples(&self) -> &[f32] {
        &self.data
    }

    /// Pretend the device played `count` samples.
    pub fn drain(&mut self, count: usize) {
        self.drained = (self.drained + count).min(self.data.len());
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }
}

impl AudioSink for MemorySink {
    fn queue(&mut self, samples: &[f32]) -> usize {
        self.data.extend_from_slice(samples);
        samples.len()
    }

    fn queued_bytes(&self) -> usize {
        (self.data.len() - self.drained) * std::mem::size_of::<f32>()
    }

    fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }
}
