//! ADSR envelope generator
//!
//! Produces one amplitude multiplier per audio sample, driven by a six-stage
//! state machine (Idle, Attack, Decay, Sustain, Release, Done). All stage
//! lengths are pre-converted to sample counts at construction so the hot
//! path never divides by the sample rate.
//!
//! Two rules keep transitions click-free:
//! - retriggering restarts Attack at the offset whose emitted level equals
//!   the current level, never from zero while still audible;
//! - Release always fades from the actual current level, not from 1.0.

use crate::constants::ms_to_samps_f;

/// Envelope timing and level parameters, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnvelopeParams {
    pub attack_ms: f32,
    pub decay_ms: f32,
    /// Sustain level, 0.0 to 1.0 (a level, not a time).
    pub sustain_level: f32,
    pub release_ms: f32,
}

impl EnvelopeParams {
    pub fn new(attack_ms: f32, decay_ms: f32, sustain_level: f32, release_ms: f32) -> Self {
        Self {
            attack_ms,
            decay_ms,
            sustain_level,
            release_ms,
        }
    }

    /// Validate for construction: times must be non-negative and finite,
    /// sustain must sit in [0, 1].
    pub fn validate(&self) -> Result<(), String> {
        for (name, value) in [
            ("attack_ms", self.attack_ms),
            ("decay_ms", self.decay_ms),
            ("release_ms", self.release_ms),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(format!("invalid envelope {}: {}", name, value));
            }
        }
        if !self.sustain_level.is_finite() || !(0.0..=1.0).contains(&self.sustain_level) {
            return Err(format!(
                "sustain_level must be in [0, 1], got {}",
                self.sustain_level
            ));
        }
        Ok(())
    }
}

/// Envelope stage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvelopeStage {
    Idle,
    Attack,
    Decay,
    Sustain,
    Release,
    Done,
}

/// ADSR envelope state machine.
#[derive(Debug, Clone)]
pub struct Envelope {
    attack_samps: f32,
    decay_samps: f32,
    sustain_level: f32,
    release_samps: f32,

    stage: EnvelopeStage,
    samples_in_stage: f32,
    level: f32,
    release_start_level: f32,
}

impl Envelope {
    pub fn new(params: EnvelopeParams) -> Result<Self, String> {
        params.validate()?;
        Ok(Self {
            attack_samps: ms_to_samps_f(params.attack_ms),
            decay_samps: ms_to_samps_f(params.decay_ms),
            sustain_level: params.sustain_level,
            release_samps: ms_to_samps_f(params.release_ms),
            stage: EnvelopeStage::Idle,
            samples_in_stage: 0.0,
            level: 0.0,
            release_start_level: 0.0,
        })
    }

    pub fn stage(&self) -> EnvelopeStage {
        self.stage
    }

    /// Last emitted level, 0.0 to 1.0.
    pub fn level(&self) -> f32 {
        self.level
    }

    pub fn sustain_level(&self) -> f32 {
        self.sustain_level
    }

    /// True once the envelope can no longer emit anything audible: Idle,
    /// Done, or parked on a zero sustain level. Used by the mixer to
    /// reclaim SFX pool slots.
    pub fn is_finished(&self) -> bool {
        match self.stage {
            EnvelopeStage::Idle | EnvelopeStage::Done => true,
            EnvelopeStage::Sustain => self.sustain_level <= 0.0,
            _ => false,
        }
    }

    /// Note-on. Restarts Attack from the current level: the attack-time
    /// offset is solved so the next emitted sample equals the level the
    /// envelope was at, which keeps retriggers click-free.
    pub fn note_on(&mut self) {
        self.samples_in_stage = if self.level > 0.0 && self.attack_samps > 0.0 {
            self.level.min(1.0) * self.attack_samps
        } else {
            0.0
        };
        self.stage = EnvelopeStage::Attack;
    }

    /// Note-off. Starts Release from the actual current level; a no-op when
    /// already idle, done, or releasing.
    pub fn note_off(&mut self) {
        match self.stage {
            EnvelopeStage::Idle | EnvelopeStage::Done | EnvelopeStage::Release => {}
            _ => {
                self.release_start_level = self.level;
                self.samples_in_stage = 0.0;
                self.stage = EnvelopeStage::Release;
            }
        }
    }

    /// Produce the next amplitude sample. Zero-length stages collapse
    /// within a single call, so an instant-attack envelope emits 1.0 (or
    /// the sustain level) on the very first sample after note-on.
    pub fn next_sample(&mut self) -> f32 {
        loop {
            match self.stage {
                EnvelopeStage::Idle | EnvelopeStage::Done => {
                    self.level = 0.0;
                    return 0.0;
                }
                EnvelopeStage::Attack => {
                    if self.samples_in_stage >= self.attack_samps {
                        self.level = 1.0;
                        self.samples_in_stage = 0.0;
                        self.stage = EnvelopeStage::Decay;
                        continue;
                    }
                    self.level = self.samples_in_stage / self.attack_samps;
                    self.samples_in_stage += 1.0;
                    return self.level;
                }
                EnvelopeStage::Decay => {
                    if self.samples_in_stage >= self.decay_samps {
                        self.level = self.sustain_level;
                        self.samples_in_stage = 0.0;
                        self.stage = EnvelopeStage::Sustain;
                        continue;
                    }
                    let t = self.samples_in_stage / self.decay_samps;
                    self.level = 1.0 + (self.sustain_level - 1.0) * t;
                    self.samples_in_stage += 1.0;
                    return self.level;
                }
                EnvelopeStage::Sustain => {
                    self.level = self.sustain_level;
                    return self.level;
                }
                EnvelopeStage::Release => {
                    if self.samples_in_stage >= self.release_samps {
                        self.level = 0.0;
                        self.stage = EnvelopeStage::Done;
                        continue;
                    }
                    let t = self.samples_in_stage / self.release_samps;
                    self.level = (self.release_start_level * (1.0 - t)).max(0.0);
                    self.samples_in_stage += 1.0;
                    if self.level <= 0.0 {
                        self.stage = EnvelopeStage::Done;
                    }
                    return self.level;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::ms_to_samps;

    fn env(a: f32, d: f32, s: f32, r: f32) -> Envelope {
        Envelope::new(EnvelopeParams::new(a, d, s, r)).unwrap()
    }

    #[test]
    fn test_idle_emits_zero() {
        let mut e = env(10.0, 10.0, 0.5, 10.0);
        for _ in 0..100 {
            assert_eq!(e.next_sample(), 0.0);
        }
        assert_eq!(e.stage(), EnvelopeStage::Idle);
    }

    #[test]
    fn test_attack_is_monotonic_and_reaches_one() {
        let mut e = env(10.0, 100.0, 0.5, 10.0);
        e.note_on();

        // attack_samples + 1 covers the ramp plus the 1.0 peak; one more
        // sample would already be decaying
        let attack_samples = ms_to_samps(10.0);
        let mut prev = -1.0;
        let mut peak = 0.0f32;
        for _ in 0..attack_samples + 1 {
            let v = e.next_sample();
            assert!(v >= prev, "Attack must be non-decreasing: {} then {}", prev, v);
            prev = v;
            peak = peak.max(v);
        }
        assert!(peak >= 1.0 - 1e-3, "Attack should reach 1.0, peaked at {}", peak);
    }

    #[test]
    fn test_decay_lands_on_sustain() {
        let mut e = env(0.0, 10.0, 0.5, 10.0);
        e.note_on();
        for _ in 0..ms_to_samps(10.0) + 2 {
            e.next_sample();
        }
        assert_eq!(e.stage(), EnvelopeStage::Sustain);
        assert!(
            (e.next_sample() - 0.5).abs() < 1e-4,
            "Should hold at sustain level, got {}",
            e.level()
        );
    }

    #[test]
    fn test_instant_envelope_emits_one_immediately() {
        // A=0, D=0, S=1: the very first sample after note-on is full level
        let mut e = env(0.0, 0.0, 1.0, 0.0);
        e.note_on();
        assert_eq!(e.next_sample(), 1.0);
        assert_eq!(e.stage(), EnvelopeStage::Sustain);
    }

    #[test]
    fn test_release_fades_to_done() {
        let mut e = env(0.0, 0.0, 0.8, 10.0);
        e.note_on();
        e.next_sample();
        e.note_off();

        let mut prev = 1.0;
        for _ in 0..ms_to_samps(10.0) + 2 {
            let v = e.next_sample();
            assert!(v <= prev + 1e-6, "Release must be non-increasing");
            prev = v;
        }
        assert_eq!(e.stage(), EnvelopeStage::Done);
        assert_eq!(e.next_sample(), 0.0);
    }

    #[test]
    fn test_release_starts_from_actual_level() {
        // Release mid-attack: the fade starts from the interrupted level,
        // never jumps up toward 1.0
        let mut e = env(100.0, 10.0, 0.5, 50.0);
        e.note_on();
        let mut last = 0.0;
        for _ in 0..ms_to_samps(30.0) {
            last = e.next_sample();
        }
        assert!(last > 0.2 && last < 0.4, "Expected mid-attack level, got {}", last);

        e.note_off();
        for _ in 0..ms_to_samps(50.0) {
            let v = e.next_sample();
            assert!(
                v <= last + 1e-4,
                "Release sample {} exceeds level at note-off {}",
                v,
                last
            );
        }
    }

    #[test]
    fn test_retrigger_resumes_from_current_level() {
        let mut e = env(100.0, 10.0, 0.5, 50.0);
        e.note_on();
        for _ in 0..ms_to_samps(50.0) {
            e.next_sample();
        }
        let mid = e.level();
        assert!(mid > 0.4, "Should be mid-attack, got {}", mid);

        e.note_on();
        assert_eq!(e.stage(), EnvelopeStage::Attack);
        let v = e.next_sample();
        assert!(
            v >= mid - 1e-4,
            "Retrigger must not drop below current level: {} < {}",
            v,
            mid
        );
    }

    #[test]
    fn test_retrigger_from_release() {
        let mut e = env(100.0, 0.0, 1.0, 200.0);
        e.note_on();
        for _ in 0..ms_to_samps(100.0) + 2 {
            e.next_sample();
        }
        e.note_off();
        for _ in 0..ms_to_samps(100.0) {
            e.next_sample();
        }
        let mid_release = e.level();
        assert!(mid_release > 0.1 && mid_release < 0.9);

        e.note_on();
        let v = e.next_sample();
        assert_eq!(e.stage(), EnvelopeStage::Attack);
        assert!(v >= mid_release - 1e-4, "Retrigger from release dropped level");
    }

    #[test]
    fn test_play_release_within_one_sample_ends_done() {
        let mut e = env(10.0, 10.0, 0.5, 5.0);
        e.note_on();
        e.note_off();
        for _ in 0..ms_to_samps(5.0) + 2 {
            e.next_sample();
        }
        assert_eq!(e.stage(), EnvelopeStage::Done);
    }

    #[test]
    fn test_done_is_absorbing_until_note_on() {
        let mut e = env(0.0, 0.0, 1.0, 0.0);
        e.note_on();
        e.next_sample();
        e.note_off();
        e.next_sample();
        assert_eq!(e.stage(), EnvelopeStage::Done);
        for _ in 0..10 {
            assert_eq!(e.next_sample(), 0.0);
        }
        e.note_on();
        assert_eq!(e.next_sample(), 1.0);
    }

    #[test]
    fn test_zero_sustain_counts_as_finished() {
        let mut e = env(0.0, 5.0, 0.0, 10.0);
        e.note_on();
        for _ in 0..ms_to_samps(5.0) + 2 {
            e.next_sample();
        }
        assert!(e.is_finished(), "Decayed-to-zero envelope should read as finished");
    }

    #[test]
    fn test_invalid_params_rejected() {
        assert!(Envelope::new(EnvelopeParams::new(-1.0, 0.0, 0.5, 0.0)).is_err());
        assert!(Envelope::new(EnvelopeParams::new(0.0, -1.0, 0.5, 0.0)).is_err());
        assert!(Envelope::new(EnvelopeParams::new(0.0, 0.0, 1.5, 0.0)).is_err());
        assert!(Envelope::new(EnvelopeParams::new(0.0, 0.0, -0.1, 0.0)).is_err());
        assert!(Envelope::new(EnvelopeParams::new(0.0, 0.0, 0.5, f32::NAN)).is_err());
        assert!(Envelope::new(EnvelopeParams::new(0.0, 0.0, 0.5, 0.0)).is_ok());
    }
}
