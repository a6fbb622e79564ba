//! Polyphonic mixer
//!
//! Owns every voice in the engine and composes them into one interleaved
//! stereo buffer per tick:
//!
//! 1. zero the stereo buffer
//! 2. tick each named voice (sequencer first, then its channel) and sum
//!    the mono result into stereo with that slot's pan
//! 3. tick the SFX pool (sequencer-free one-shot channels, reclaimed when
//!    their envelope finishes)
//! 4. tick the sample players
//! 5. apply master gain, squelch non-finite samples, clamp to [-1, +1]
//!
//! The mixer exclusively owns all channels, sequencers and players; the
//! working mono buffer is loaned to one voice at a time. `tick` is
//! infallible and allocation-free.
//!
//! Pan law is linear: `left = (1 − pan) / 2`, `right = (1 + pan) / 2`, so
//! the left and right contributions of a voice always sum to its mono
//! signal.

use crate::channel::Channel;
use crate::constants::{BUF_FRAMES, BUF_SIZE};
use crate::sample_player::SamplePlayer;
use crate::sequencer::Seq;
use std::sync::Arc;

/// One-shot SFX pool size.
pub const SFX_SLOTS: usize = 4;

/// Sample-player pool size.
pub const SAMPLE_SLOTS: usize = 4;

/// A named voice: a channel driven by its own sequencer, placed in the
/// stereo field.
#[derive(Debug, Clone)]
pub struct VoiceSlot {
    pub name: String,
    pub channel: Channel,
    pub seq: Seq,
    pub pan: f32,
}

impl VoiceSlot {
    pub fn new(name: &str, channel: Channel, seq: Seq, pan: f32) -> Self {
        Self {
            name: name.to_string(),
            channel,
            seq,
            pan: pan.clamp(-1.0, 1.0),
        }
    }
}

#[derive(Debug, Clone)]
struct SfxSlot {
    channel: Option<Channel>,
    pan: f32,
}

#[derive(Debug, Clone)]
struct SampleSlot {
    player: SamplePlayer,
    pan: f32,
}

/// The engine's polyphonic heart. Constructed once with a fixed set of
/// named voices; SFX and sample pools have fixed sizes.
#[derive(Debug)]
pub struct Mixer {
    voices: Vec<VoiceSlot>,
    sfx: Vec<SfxSlot>,
    samples: Vec<SampleSlot>,
    master_gain: f32,
    next_sfx: usize,
    mono: Vec<f32>,
    stereo: Vec<f32>,
}

impl Mixer {
    /// Build a mixer over a fixed set of named voices. Zero voices is a
    /// valid configuration; the SFX and sample pools work regardless.
    pub fn new(voices: Vec<VoiceSlot>) -> Self {
        Self {
            voices,
            sfx: vec![
                SfxSlot {
                    channel: None,
                    pan: 0.0,
                };
                SFX_SLOTS
            ],
            samples: vec![
                SampleSlot {
                    player: SamplePlayer::new(),
                    pan: 0.0,
                };
                SAMPLE_SLOTS
            ],
            master_gain: 1.0,
            next_sfx: 0,
            mono: vec![0.0; BUF_FRAMES],
            stereo: vec![0.0; BUF_SIZE],
        }
    }

    pub fn voice_count(&self) -> usize {
        self.voices.len()
    }

    /// Master gain, clamped into [0, 1]. Defaults to 1.0.
    pub fn set_master_gain(&mut self, gain: f32) {
        self.master_gain = gain.clamp(0.0, 1.0);
    }

    pub fn master_gain(&self) -> f32 {
        self.master_gain
    }

    /// Mutable access to a named voice's channel, for live filter/LFO
    /// tweaks from the embedder.
    pub fn voice_channel_mut(&mut self, name: &str) -> Option<&mut Channel> {
        self.voices
            .iter_mut()
            .find(|v| v.name == name)
            .map(|v| &mut v.channel)
    }

    pub fn voice_seq_mut(&mut self, name: &str) -> Option<&mut Seq> {
        self.voices
            .iter_mut()
            .find(|v| v.name == name)
            .map(|v| &mut v.seq)
    }

    pub fn set_voice_pan(&mut self, name: &str, pan: f32) {
        if let Some(v) = self.voices.iter_mut().find(|v| v.name == name) {
            v.pan = pan.clamp(-1.0, 1.0);
        }
    }

    /// Fire a one-shot SFX: the instrument template is copied into the
    /// next pool slot (round-robin) and played at `freq_hz`. A slot still
    /// sounding is overwritten without ceremony; that cut-off is the
    /// round-robin contract.
    pub fn sfx_at(&mut self, freq_hz: f32, pan: f32, template: &Channel) {
        let slot = &mut self.sfx[self.next_sfx];
        let mut channel = template.clone();
        channel.play(freq_hz);
        slot.channel = Some(channel);
        slot.pan = pan.clamp(-1.0, 1.0);
        self.next_sfx = (self.next_sfx + 1) % SFX_SLOTS;
    }

    /// The pool slot the next [`Mixer::sfx_at`] call will use.
    pub fn next_sfx_slot(&self) -> usize {
        self.next_sfx
    }

    pub fn sfx_channel(&self, slot: usize) -> Option<&Channel> {
        self.sfx.get(slot).and_then(|s| s.channel.as_ref())
    }

    pub fn active_sfx_count(&self) -> usize {
        self.sfx.iter().filter(|s| s.channel.is_some()).count()
    }

    /// Install sample data into a player slot and set its pan. Does not
    /// start playback.
    pub fn set_sample(&mut self, slot: usize, samples: Arc<Vec<f32>>, pan: f32) {
        if let Some(s) = self.samples.get_mut(slot) {
            s.player.set_samples(samples);
            s.pan = pan.clamp(-1.0, 1.0);
        }
    }

    pub fn sample_player_mut(&mut self, slot: usize) -> Option<&mut SamplePlayer> {
        self.samples.get_mut(slot).map(|s| &mut s.player)
    }

    pub fn set_sample_pan(&mut self, slot: usize, pan: f32) {
        if let Some(s) = self.samples.get_mut(slot) {
            s.pan = pan.clamp(-1.0, 1.0);
        }
    }

    /// Produce one tick of interleaved stereo output (`BUF_SIZE` floats,
    /// L,R,L,R,...), clamped to [-1, +1]. Infallible by construction.
    pub fn tick(&mut self) -> &[f32] {
        self.stereo.fill(0.0);

        // Named voices: sequencer events land before the channel renders,
        // within the same tick
        for voice in &mut self.voices {
            voice.seq.tick(&mut voice.channel);
            voice.channel.tick(&mut self.mono);
            mix_into(&mut self.stereo, &self.mono, voice.pan);
        }

        // SFX pool: no sequencer, play until the envelope finishes
        for slot in &mut self.sfx {
            if let Some(channel) = &mut slot.channel {
                channel.tick(&mut self.mono);
                mix_into(&mut self.stereo, &self.mono, slot.pan);
                if !channel.is_active() {
                    slot.channel = None;
                }
            }
        }

        // Sample players
        for slot in &mut self.samples {
            if slot.player.is_active() {
                slot.player.tick(&mut self.mono);
                mix_into(&mut self.stereo, &self.mono, slot.pan);
            }
        }

        // Master gain, then squelch anything non-finite before clamping so
        // one NaN can't poison the output
        for sample in &mut self.stereo {
            let mut v = *sample * self.master_gain;
            if !v.is_finite() {
                v = 0.0;
            }
            *sample = v.clamp(-1.0, 1.0);
        }

        &self.stereo
    }
}

/// Sum a mono buffer into interleaved stereo under the linear pan law.
fn mix_into(stereo: &mut [f32], mono: &[f32], pan: f32) {
    let left = (1.0 - pan) * 0.5;
    let right = (1.0 + pan) * 0.5;
    for (frame, &s) in stereo.chunks_exact_mut(2).zip(mono.iter()) {
        frame[0] += s * left;
        frame[1] += s * right;
    }
}
