//! # Siren - Chiptune and Procedural Audio Engine
//!
//! Siren synthesizes stereo PCM from scratch: oscillators, ADSR envelopes,
//! biquad filters, LFOs, note sequencers and sample playback, composed by a
//! polyphonic mixer into interleaved stereo f32 buffers ready for a
//! queue-mode audio device.
//!
//! ## Core Features
//!
//! - **Five waveforms**: sine, square, saw, triangle, noise (square and saw
//!   deliberately naive for chiptune bite)
//! - **Per-voice DSP**: ADSR envelope, RBJ biquad filter, buffer-rate LFO
//!   (vibrato or tremolo), gain
//! - **Sample-accurate sequencing**: looping note lists clocked by the
//!   output buffer, driving note-on/off per voice
//! - **Polyphonic mixer**: named voices with pan, a round-robin SFX pool,
//!   sample players, master gain and a final clamp
//! - **Real-time delivery**: pull-on-demand queueing against cpal with a
//!   lock-free ring buffer, plus offline WAV rendering
//!
//! ## Quick Start
//!
//! ```
//! use siren::mixer::{Mixer, VoiceSlot};
//! use siren::presets;
//! use siren::sequencer::{Note, Seq};
//! use siren::notes;
//!
//! // One voice playing a looping arpeggio, slightly left of center
//! let seq = Seq::new(vec![
//!     Note::new(notes::C4, 200.0),
//!     Note::new(notes::E4, 200.0),
//!     Note::new(notes::G4, 200.0),
//!     Note::rest(200.0),
//! ]);
//! let mut mixer = Mixer::new(vec![VoiceSlot::new("arp", presets::pluck_square(), seq, -0.3)]);
//!
//! // Each tick yields 1024 interleaved stereo floats in [-1, 1]
//! let buffer = mixer.tick();
//! assert_eq!(buffer.len(), siren::constants::BUF_SIZE);
//! ```
//!
//! ## Architecture
//!
//! One `Mixer::tick` runs the whole graph for 512 frames on the caller's
//! thread: sequencers fire events into their channels, each channel renders
//! oscillator → envelope → LFO → filter → gain into a loaned mono buffer,
//! and the mixer sums everything into stereo under a linear pan law. The
//! runtime loop ([`engine`]) keeps a few ticks queued ahead of the audio
//! device and sleeps in between; underruns are audible but harmless.

pub mod audio;
pub mod bpm;
pub mod channel;
pub mod constants;
pub mod engine;
pub mod envelope;
pub mod filter;
pub mod lfo;
pub mod mixer;
pub mod notes;
pub mod oscillator;
pub mod presets;
pub mod render;
pub mod sample_loader;
pub mod sample_player;
pub mod sequencer;
