//! Runtime loop
//!
//! Couples a [`Mixer`] to an [`AudioSink`] with a pull-on-demand queueing
//! discipline: every iteration tops the sink's queue up to a high-water
//! mark (ticking the mixer as many times as needed), then sleeps for about
//! a millisecond. The mixer never blocks; only the loop sleeps. If the
//! device drains the queue to empty the result is an audible dropout, not
//! corruption, and the next iteration refills it.

use crate::audio::AudioSink;
use crate::constants::BUF_SIZE;
use crate::mixer::Mixer;
use std::time::{Duration, Instant};
use tracing::debug;

/// Loop tuning. The default high-water mark keeps four ticks of audio
/// (~46 ms) queued ahead of the device.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub high_water_bytes: usize,
    pub idle_sleep: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            high_water_bytes: 4 * BUF_SIZE * std::mem::size_of::<f32>(),
            idle_sleep: Duration::from_millis(1),
        }
    }
}

/// Drives a mixer into an audio sink.
pub struct Engine<S: AudioSink> {
    mixer: Mixer,
    sink: S,
    config: EngineConfig,
}

impl<S: AudioSink> Engine<S> {
    pub fn new(mixer: Mixer, sink: S) -> Self {
        Self::with_config(mixer, sink, EngineConfig::default())
    }

    pub fn with_config(mixer: Mixer, sink: S, config: EngineConfig) -> Self {
        Self {
            mixer,
            sink,
            config,
        }
    }

    /// Live access to the mixer between iterations, for firing SFX or
    /// tweaking voices while the loop runs elsewhere.
    pub fn mixer_mut(&mut self) -> &mut Mixer {
        &mut self.mixer
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// One loop iteration without the sleep: tick and enqueue until the
    /// queue reaches the high-water mark. Returns the number of ticks
    /// performed. Callers embedding the engine in their own main loop can
    /// call this once per frame.
    pub fn pump(&mut self) -> usize {
        let mut ticks = 0;
        while self.sink.queued_bytes() < self.config.high_water_bytes {
            let buf = self.mixer.tick();
            let accepted = self.sink.queue(buf);
            ticks += 1;
            if accepted < buf.len() {
                // Sink refused part of a buffer; don't spin against it
                debug!("sink accepted {}/{} samples", accepted, buf.len());
                break;
            }
        }
        ticks
    }

    /// Run the queueing loop for a fixed wall-clock duration.
    pub fn run_for(&mut self, duration: Duration) {
        let started = Instant::now();
        while started.elapsed() < duration {
            self.pump();
            std::thread::sleep(self.config.idle_sleep);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::MemorySink;
    use crate::channel::Channel;
    use crate::envelope::EnvelopeParams;
    use crate::mixer::VoiceSlot;
    use crate::oscillator::WaveformKind;
    use crate::sequencer::{Note, Seq};

    fn tone_mixer() -> Mixer {
        let channel = Channel::new(
            WaveformKind::Sine,
            EnvelopeParams::new(0.0, 0.0, 1.0, 0.0),
            0.5,
        )
        .unwrap();
        let seq = Seq::new(vec![Note::new(440.0, 60_000.0)]);
        Mixer::new(vec![VoiceSlot::new("tone", channel, seq, 0.0)])
    }

    #[test]
    fn test_pump_fills_to_high_water() {
        let mut engine = Engine::new(tone_mixer(), MemorySink::new());
        let ticks = engine.pump();
        // Default high-water mark is four ticks of audio
        assert_eq!(ticks, 4, "Pump should tick until the queue is full");
        assert!(engine.sink().queued_bytes() >= engine.config.high_water_bytes);
    }

    #[test]
    fn test_pump_is_idle_when_queue_full() {
        let mut engine = Engine::new(tone_mixer(), MemorySink::new());
        engine.pump();
        let ticks = engine.pump();
        assert_eq!(ticks, 0, "A full queue needs no new ticks");
    }

    #[test]
    fn test_pump_refills_after_drain() {
        let mut engine = Engine::new(tone_mixer(), MemorySink::new());
        engine.pump();
        engine.sink_mut().drain(BUF_SIZE * 2);
        let ticks = engine.pump();
        assert_eq!(ticks, 2, "Draining two ticks should trigger two refills");
    }

    #[test]
    fn test_queued_audio_is_the_mixer_output() {
        let mut engine = Engine::new(tone_mixer(), MemorySink::new());
        engine.pump();

        let queued = engine.sink().samples();
        assert!(queued.len() >= BUF_SIZE);
        // A live sine through the mixer is non-silent and clamped
        assert!(queued.iter().any(|&s| s.abs() > 0.1));
        assert!(queued.iter().all(|&s| (-1.0..=1.0).contains(&s)));
    }

    #[test]
    fn test_custom_high_water_mark() {
        let config = EngineConfig {
            high_water_bytes: BUF_SIZE * std::mem::size_of::<f32>(),
            idle_sleep: Duration::from_millis(1),
        };
        let mut engine = Engine::with_config(tone_mixer(), MemorySink::new(), config);
        assert_eq!(engine.pump(), 1, "One tick reaches a one-tick high-water mark");
    }
}
