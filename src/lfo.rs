//! Low-frequency oscillator for per-buffer modulation
//!
//! The LFO runs at buffer rate, not sample rate: one sine evaluation per
//! tick, with the phase advanced by a whole buffer's worth of time. At the
//! default tick size that is ~86 updates per second, plenty for vibrato and
//! tremolo while costing one `sin` per 512 samples. This engine does not
//! offer sample-rate modulation.

use crate::constants::{BUF_FRAMES, SAMPLE_RATE_F};
use std::f32::consts::TAU;

/// What the modulation value is applied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LfoTarget {
    /// Inert; the LFO holds its phase and contributes nothing.
    Off,
    /// Add the modulation value (in Hz) to the oscillator frequency.
    Freq,
    /// Scale the envelope output by `(1 − depth + m)`, clamped to [0, 1].
    Amp,
}

/// Buffer-rate sine LFO.
#[derive(Debug, Clone)]
pub struct Lfo {
    target: LfoTarget,
    rate_hz: f32,
    depth: f32,
    phase: f32,
}

impl Default for Lfo {
    fn default() -> Self {
        Self::new()
    }
}

impl Lfo {
    pub fn new() -> Self {
        Self {
            target: LfoTarget::Off,
            rate_hz: 0.0,
            depth: 0.0,
            phase: 0.0,
        }
    }

    /// Configure the LFO. Rate is floored at 0; for the `Amp` target depth
    /// beyond 1.0 has no extra effect, so depth is kept non-negative and
    /// otherwise taken as-is (for `Freq` it is the excursion in Hz).
    pub fn set(&mut self, target: LfoTarget, rate_hz: f32, depth: f32) {
        self.target = target;
        self.rate_hz = rate_hz.max(0.0);
        self.depth = depth.max(0.0);
    }

    /// Disable and rewind.
    pub fn clear(&mut self) {
        self.target = LfoTarget::Off;
        self.rate_hz = 0.0;
        self.depth = 0.0;
        self.phase = 0.0;
    }

    pub fn target(&self) -> LfoTarget {
        self.target
    }

    pub fn depth(&self) -> f32 {
        self.depth
    }

    pub fn rate_hz(&self) -> f32 {
        self.rate_hz
    }

    pub fn phase(&self) -> f32 {
        self.phase
    }

    /// Compute this tick's modulation value `depth · sin(phase)` and
    /// advance the phase by one buffer of time.
    pub fn next_mod(&mut self) -> f32 {
        let m = self.depth * self.phase.sin();
        self.phase += TAU * self.rate_hz * BUF_FRAMES as f32 / SAMPLE_RATE_F;
        while self.phase >= TAU {
            self.phase -= TAU;
        }
        m
    }

    /// Tremolo factor for the `Amp` target: oscillates around 1.0 with
    /// excursion ±depth, clamped into [0, 1].
    pub fn amp_scale(&self, m: f32) -> f32 {
        (1.0 - self.depth + m).clamp(0.0, 1.0)
    }
}
