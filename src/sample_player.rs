//! Preloaded sample playback
//!
//! Streams a mono f32 sample array into tick-sized buffers. Playback is
//! either one-shot (runs to the end of the data, then goes inactive) or
//! looping (wraps from `loop_end` back to `loop_start` forever). Sample
//! data is shared via `Arc` so one decoded WAV can feed several players.

use std::sync::Arc;

/// Streams a preloaded mono sample with an optional loop window.
#[derive(Debug, Clone)]
pub struct SamplePlayer {
    samples: Arc<Vec<f32>>,
    cursor: usize,
    active: bool,
    loop_start: usize,
    loop_end: usize,
}

impl Default for SamplePlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl SamplePlayer {
    /// A player with no data; stays silent until samples are set.
    pub fn new() -> Self {
        Self {
            samples: Arc::new(Vec::new()),
            cursor: 0,
            active: false,
            loop_start: 0,
            loop_end: 0,
        }
    }

    pub fn with_samples(samples: Arc<Vec<f32>>) -> Self {
        let mut player = Self::new();
        player.set_samples(samples);
        player
    }

    /// Swap in new sample data. Stops playback and clears the loop window.
    pub fn set_samples(&mut self, samples: Arc<Vec<f32>>) {
        self.samples = samples;
        self.cursor = 0;
        self.active = false;
        self.loop_start = 0;
        self.loop_end = 0;
    }

    /// Configure a loop window. Looping engages only when
    /// `loop_end > loop_start` and the window fits inside the data;
    /// anything else leaves the player in one-shot mode.
    pub fn set_loop(&mut self, loop_start: usize, loop_end: usize) {
        self.loop_start = loop_start;
        self.loop_end = loop_end;
    }

    pub fn clear_loop(&mut self) {
        self.loop_start = 0;
        self.loop_end = 0;
    }

    /// Restart from the beginning. A player with no data stays inactive.
    pub fn play(&mut self) {
        self.cursor = 0;
        self.active = !self.samples.is_empty();
    }

    pub fn stop(&mut self) {
        self.active = false;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Current read position; always within `[0, samples.len()]`.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    fn looping(&self) -> bool {
        self.loop_end > self.loop_start && self.loop_end <= self.samples.len()
    }

    /// Fill `out` with the next chunk of sample data. Inactive players
    /// emit pure silence; a one-shot player that runs out of data mid-
    /// buffer zero-fills the remainder and goes inactive.
    pub fn tick(&mut self, out: &mut [f32]) {
        if !self.active {
            out.fill(0.0);
            return;
        }

        let looping = self.looping();
        for sample in out.iter_mut() {
            if looping && self.cursor >= self.loop_end {
                self.cursor = self.loop_start;
            }
            if self.cursor >= self.samples.len() {
                self.active = false;
                *sample = 0.0;
                continue;
            }
            *sample = self.samples[self.cursor];
            self.cursor += 1;
        }
    }
}
