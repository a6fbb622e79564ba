//! Waveform oscillators
//!
//! Fills mono buffers with one of five waveforms from a phase accumulator.
//! Square and saw are deliberately naive (not band-limited); the aliasing is
//! part of the chiptune character.

use crate::constants::SAMPLE_RATE_F;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::{PI, TAU};

/// Waveform types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaveformKind {
    Sine,
    Square,
    Saw,
    Triangle,
    Noise,
}

/// Phase-accumulator oscillator.
///
/// Phase is kept in radians in `[0, 2π)` and persists across buffers, so
/// consecutive `fill` calls join without discontinuities. The per-sample
/// phase step is `2π · freq / SAMPLE_RATE`.
#[derive(Debug, Clone)]
pub struct Oscillator {
    kind: WaveformKind,
    phase: f32,
    rng: StdRng,
}

impl Oscillator {
    pub fn new(kind: WaveformKind) -> Self {
        Self {
            kind,
            phase: 0.0,
            rng: StdRng::from_entropy(),
        }
    }

    /// Create an oscillator with a seeded noise generator (for deterministic
    /// tests; waveforms other than `Noise` ignore the seed).
    pub fn with_seed(kind: WaveformKind, seed: u64) -> Self {
        Self {
            kind,
            phase: 0.0,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Current phase in radians, `[0, 2π)`.
    pub fn phase(&self) -> f32 {
        self.phase
    }

    pub fn reset_phase(&mut self) {
        self.phase = 0.0;
    }

    pub fn kind(&self) -> WaveformKind {
        self.kind
    }

    pub fn set_kind(&mut self, kind: WaveformKind) {
        self.kind = kind;
    }

    /// Fill `out` with one buffer of the waveform at `freq_hz`, advancing
    /// the stored phase. All waveforms produce values in `[-1, 1]`.
    ///
    /// Noise advances the phase like any other waveform so callers see
    /// continuous behavior when switching kinds.
    pub fn fill(&mut self, out: &mut [f32], freq_hz: f32) {
        let step = TAU * freq_hz / SAMPLE_RATE_F;

        // Waveform dispatch is hoisted out of the per-sample loop.
        match self.kind {
            WaveformKind::Sine => {
                for sample in out.iter_mut() {
                    *sample = self.phase.sin();
                    self.advance(step);
                }
            }
            WaveformKind::Square => {
                for sample in out.iter_mut() {
                    *sample = if self.phase < PI { 1.0 } else { -1.0 };
                    self.advance(step);
                }
            }
            WaveformKind::Saw => {
                for sample in out.iter_mut() {
                    *sample = 2.0 * (self.phase / TAU) - 1.0;
                    self.advance(step);
                }
            }
            WaveformKind::Triangle => {
                for sample in out.iter_mut() {
                    let saw = 2.0 * (self.phase / TAU) - 1.0;
                    *sample = 2.0 * saw.abs() - 1.0;
                    self.advance(step);
                }
            }
            WaveformKind::Noise => {
                for sample in out.iter_mut() {
                    *sample = self.rng.gen_range(-1.0..=1.0);
                    self.advance(step);
                }
            }
        }
    }

    #[inline]
    fn advance(&mut self, step: f32) {
        self.phase += step;
        while self.phase >= TAU {
            self.phase -= TAU;
        }
        while self.phase < 0.0 {
            self.phase += TAU;
        }
    }
}
