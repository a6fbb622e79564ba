//! A single synthesis voice
//!
//! A channel owns one oscillator, one ADSR envelope, an optional biquad
//! filter, an optional LFO, and a gain. Each tick it renders one mono
//! buffer in a fixed stage order:
//!
//! 1. LFO (Freq target) shifts the oscillator frequency for this tick
//! 2. oscillator fills the buffer
//! 3. envelope multiplies per sample
//! 4. LFO (Amp target) scales the whole buffer
//! 5. filter runs in place
//! 6. gain multiplies
//!
//! The order is observable (filtering after gain would change headroom) and
//! must not be rearranged.
//!
//! Channels are `Clone` so a configured channel can serve as an instrument
//! template for the mixer's SFX pool.

use crate::envelope::{Envelope, EnvelopeParams};
use crate::filter::{Filter, FilterKind};
use crate::lfo::{Lfo, LfoTarget};
use crate::oscillator::{Oscillator, WaveformKind};

/// One monophonic voice: oscillator → envelope → LFO → filter → gain.
#[derive(Debug, Clone)]
pub struct Channel {
    osc: Oscillator,
    env: Envelope,
    filter: Filter,
    lfo: Lfo,
    gain: f32,
    current_freq: f32,
}

impl Channel {
    /// Build a voice. Envelope parameters are validated here; gain is
    /// clamped into [0, 1].
    pub fn new(waveform: WaveformKind, env: EnvelopeParams, gain: f32) -> Result<Self, String> {
        Ok(Self {
            osc: Oscillator::new(waveform),
            env: Envelope::new(env)?,
            filter: Filter::new(),
            lfo: Lfo::new(),
            gain: gain.clamp(0.0, 1.0),
            current_freq: 0.0,
        })
    }

    /// Like [`Channel::new`] but with a seeded noise generator, so noise
    /// voices are reproducible in tests.
    pub fn with_seed(
        waveform: WaveformKind,
        env: EnvelopeParams,
        gain: f32,
        seed: u64,
    ) -> Result<Self, String> {
        let mut channel = Self::new(waveform, env, gain)?;
        channel.osc = Oscillator::with_seed(waveform, seed);
        Ok(channel)
    }

    /// Start a note: store the frequency and open the envelope gate.
    pub fn play(&mut self, freq_hz: f32) {
        self.current_freq = freq_hz.max(0.0);
        self.env.note_on();
    }

    /// Close the envelope gate; the voice fades over the release time.
    pub fn release(&mut self) {
        self.env.note_off();
    }

    pub fn set_filter(&mut self, kind: FilterKind, cutoff_hz: f32, q: f32) -> Result<(), String> {
        self.filter.set(kind, cutoff_hz, q)
    }

    pub fn clear_filter(&mut self) {
        self.filter.clear();
    }

    pub fn set_lfo(&mut self, target: LfoTarget, rate_hz: f32, depth: f32) {
        self.lfo.set(target, rate_hz, depth);
    }

    pub fn clear_lfo(&mut self) {
        self.lfo.clear();
    }

    pub fn set_gain(&mut self, gain: f32) {
        self.gain = gain.clamp(0.0, 1.0);
    }

    pub fn gain(&self) -> f32 {
        self.gain
    }

    pub fn current_freq(&self) -> f32 {
        self.current_freq
    }

    pub fn waveform(&self) -> WaveformKind {
        self.osc.kind()
    }

    pub fn envelope(&self) -> &Envelope {
        &self.env
    }

    /// True while the envelope can still emit something audible.
    pub fn is_active(&self) -> bool {
        !self.env.is_finished()
    }

    /// Render one buffer of this voice into `out`.
    pub fn tick(&mut self, out: &mut [f32]) {
        let lfo_mod = match self.lfo.target() {
            LfoTarget::Off => 0.0,
            _ => self.lfo.next_mod(),
        };

        let freq = match self.lfo.target() {
            LfoTarget::Freq => self.current_freq + lfo_mod,
            _ => self.current_freq,
        };
        self.osc.fill(out, freq);

        for sample in out.iter_mut() {
            *sample *= self.env.next_sample();
        }

        if self.lfo.target() == LfoTarget::Amp {
            let scale = self.lfo.amp_scale(lfo_mod);
            for sample in out.iter_mut() {
                *sample *= scale;
            }
        }

        self.filter.process(out);

        for sample in out.iter_mut() {
            *sample *= self.gain;
        }
    }
}
