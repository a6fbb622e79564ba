//! Instrument presets
//!
//! A small library of ready-made voices. Each function returns a fresh
//! [`Channel`] configured with waveform, envelope, gain and (where it fits
//! the sound) a filter or LFO. Use them directly in a mixer slot, or as
//! templates for [`crate::mixer::Mixer::sfx_at`].

use crate::channel::Channel;
use crate::envelope::EnvelopeParams;
use crate::filter::FilterKind;
use crate::lfo::LfoTarget;
use crate::oscillator::WaveformKind;

fn voice(waveform: WaveformKind, a: f32, d: f32, s: f32, r: f32, gain: f32) -> Channel {
    Channel::new(waveform, EnvelopeParams::new(a, d, s, r), gain)
        .expect("preset parameters are valid")
}

/// Short percussive square: the classic chiptune pluck.
pub fn pluck_square() -> Channel {
    voice(WaveformKind::Square, 1.0, 120.0, 0.0, 40.0, 0.6)
}

/// Brighter pluck on a sawtooth.
pub fn pluck_saw() -> Channel {
    voice(WaveformKind::Saw, 1.0, 100.0, 0.0, 30.0, 0.55)
}

/// Sustained square lead with vibrato.
pub fn chip_lead() -> Channel {
    let mut channel = voice(WaveformKind::Square, 5.0, 40.0, 0.6, 80.0, 0.5);
    channel.set_lfo(LfoTarget::Freq, 6.0, 5.0);
    channel
}

/// Slow triangle pad, mellowed by a low-pass.
pub fn soft_pad() -> Channel {
    let mut channel = voice(WaveformKind::Triangle, 250.0, 200.0, 0.7, 400.0, 0.5);
    channel
        .set_filter(FilterKind::LowPass, 1200.0, 0.707)
        .expect("preset filter parameters are valid");
    channel
}

/// Round saw bass, low-passed to keep the top end out of the way.
pub fn bass_saw() -> Channel {
    let mut channel = voice(WaveformKind::Saw, 2.0, 60.0, 0.8, 60.0, 0.6);
    channel
        .set_filter(FilterKind::LowPass, 500.0, 1.0)
        .expect("preset filter parameters are valid");
    channel
}

/// Noise burst through a high-pass: hats, snares, impacts.
pub fn noise_hit() -> Channel {
    let mut channel = voice(WaveformKind::Noise, 0.0, 90.0, 0.0, 30.0, 0.5);
    channel
        .set_filter(FilterKind::HighPass, 2000.0, 0.707)
        .expect("preset filter parameters are valid");
    channel
}
