//! Note sequencer
//!
//! A `Seq` walks an ordered note list and drives a paired [`Channel`],
//! firing `play` at note starts and `release` at note ends. The walk is
//! clocked by the mixer tick: every call to [`Seq::tick`] accounts for
//! `BUF_FRAMES` samples of time.
//!
//! Events land on tick boundaries, but the overshoot past each note's end
//! is carried into the next note rather than discarded, so the total length
//! of a looped sequence stays sample-accurate however the note durations
//! fall against the tick grid.

use crate::channel::Channel;
use crate::constants::{ms_to_samps, BUF_FRAMES};

/// One sequence step. A frequency of 0 is a rest.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Note {
    pub freq_hz: f32,
    pub duration_ms: f32,
}

impl Note {
    pub fn new(freq_hz: f32, duration_ms: f32) -> Self {
        Self {
            freq_hz,
            duration_ms: duration_ms.max(0.0),
        }
    }

    /// A silent step of the given length.
    pub fn rest(duration_ms: f32) -> Self {
        Self::new(0.0, duration_ms)
    }

    pub fn is_rest(&self) -> bool {
        self.freq_hz <= 0.0
    }
}

/// Looping note-list sequencer. An empty list is a permanent no-op.
#[derive(Debug, Clone)]
pub struct Seq {
    notes: Vec<Note>,
    index: usize,
    samples_into_note: usize,
    triggered: bool,
}

impl Seq {
    pub fn new(notes: Vec<Note>) -> Self {
        Self {
            notes,
            index: 0,
            samples_into_note: 0,
            triggered: false,
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.index
    }

    /// Rewind to the first note without touching the channel.
    pub fn reset(&mut self) {
        self.index = 0;
        self.samples_into_note = 0;
        self.triggered = false;
    }

    /// Advance one tick (`BUF_FRAMES` samples), emitting note-on/off events
    /// to the paired channel. Must be called before the channel's own tick
    /// so the events affect the same buffer.
    pub fn tick(&mut self, channel: &mut Channel) {
        if self.notes.is_empty() {
            return;
        }

        if !self.triggered {
            let note = self.notes[self.index];
            if note.is_rest() {
                // A rest silences whatever was sounding before it
                channel.release();
            } else {
                channel.play(note.freq_hz);
            }
            self.triggered = true;
        }

        self.samples_into_note += BUF_FRAMES;

        // Cross as many note boundaries as this tick covers. Bounded at one
        // full pass so an all-zero-duration list cannot spin forever.
        let mut advances = 0;
        while advances < self.notes.len() {
            let note = self.notes[self.index];
            let dur = ms_to_samps(note.duration_ms);
            if self.samples_into_note < dur {
                break;
            }
            if !note.is_rest() {
                channel.release();
            }
            self.samples_into_note -= dur;
            self.index = (self.index + 1) % self.notes.len();
            self.triggered = false;
            advances += 1;
        }
    }
}
