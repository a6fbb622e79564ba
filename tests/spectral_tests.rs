//! Spectral verification of the oscillators and filters
//!
//! FFT-based checks of the rendered output: a sine is spectrally pure, the
//! naive square carries the expected odd harmonics (the aliasing is a
//! feature, not a bug), and a low-passed voice loses its top end.

use siren::channel::Channel;
use siren::constants::SAMPLE_RATE_F;
use siren::envelope::EnvelopeParams;
use siren::filter::FilterKind;
use siren::mixer::{Mixer, VoiceSlot};
use siren::oscillator::WaveformKind;
use siren::render::render_to_buffer;
use siren::sequencer::{Note, Seq};
use std::f32::consts::PI;

use audio_test_utils::left_channel;

fn tone_mixer(waveform: WaveformKind, freq: f32) -> Mixer {
    let channel = Channel::new(waveform, EnvelopeParams::new(0.0, 0.0, 1.0, 0.0), 0.8).unwrap();
    let seq = Seq::new(vec![Note::new(freq, 60_000.0)]);
    Mixer::new(vec![VoiceSlot::new("tone", channel, seq, 0.0)])
}

/// Hann-windowed FFT magnitude spectrum.
fn analyze_spectrum(buffer: &[f32], sample_rate: f32) -> (Vec<f32>, Vec<f32>) {
    use rustfft::{num_complex::Complex, FftPlanner};

    let fft_size = 8192.min(buffer.len());
    let mut planner = FftPlanner::new();
    let fft = planner.plan_fft_forward(fft_size);

    let mut input: Vec<Complex<f32>> = buffer[..fft_size]
        .iter()
        .enumerate()
        .map(|(i, &sample)| {
            let window = 0.5 * (1.0 - (2.0 * PI * i as f32 / fft_size as f32).cos());
            Complex::new(sample * window, 0.0)
        })
        .collect();

    fft.process(&mut input);

    let magnitudes: Vec<f32> = input[..fft_size / 2]
        .iter()
        .map(|c| (c.re * c.re + c.im * c.im).sqrt())
        .collect();
    let frequencies: Vec<f32> = (0..fft_size / 2)
        .map(|i| i as f32 * sample_rate / fft_size as f32)
        .collect();

    (frequencies, magnitudes)
}

/// Peak magnitude within ±window Hz of a target frequency.
fn peak_near(frequencies: &[f32], magnitudes: &[f32], target: f32, window: f32) -> f32 {
    frequencies
        .iter()
        .zip(magnitudes)
        .filter(|(f, _)| (**f - target).abs() < window)
        .map(|(_, m)| *m)
        .fold(0.0f32, f32::max)
}

#[test]
fn test_sine_is_spectrally_pure() {
    let mut mixer = tone_mixer(WaveformKind::Sine, 440.0);
    let left = left_channel(&render_to_buffer(&mut mixer, 1.0));
    let (frequencies, magnitudes) = analyze_spectrum(&left, SAMPLE_RATE_F);

    let fundamental = peak_near(&frequencies, &magnitudes, 440.0, 20.0);
    let second_harmonic = peak_near(&frequencies, &magnitudes, 880.0, 20.0);

    assert!(fundamental > 0.1, "Sine needs a strong fundamental, got {}", fundamental);
    let ratio = second_harmonic / fundamental.max(1e-6);
    assert!(
        ratio < 0.05,
        "Sine should have no harmonics, 2nd/1st ratio {}",
        ratio
    );
}

#[test]
fn test_sine_peaks_at_requested_frequency() {
    let mut mixer = tone_mixer(WaveformKind::Sine, 440.0);
    let left = left_channel(&render_to_buffer(&mut mixer, 1.0));
    let (frequencies, magnitudes) = analyze_spectrum(&left, SAMPLE_RATE_F);

    let mut peak_freq = 0.0f32;
    let mut peak_mag = 0.0f32;
    for (i, &f) in frequencies.iter().enumerate() {
        if f > 100.0 && magnitudes[i] > peak_mag {
            peak_mag = magnitudes[i];
            peak_freq = f;
        }
    }
    assert!(
        (peak_freq - 440.0).abs() < 10.0,
        "Spectrum should peak at 440 Hz, got {} Hz",
        peak_freq
    );
}

#[test]
fn test_square_has_odd_harmonics() {
    let mut mixer = tone_mixer(WaveformKind::Square, 440.0);
    let left = left_channel(&render_to_buffer(&mut mixer, 1.0));
    let (frequencies, magnitudes) = analyze_spectrum(&left, SAMPLE_RATE_F);

    let fundamental = peak_near(&frequencies, &magnitudes, 440.0, 20.0);
    let third = peak_near(&frequencies, &magnitudes, 3.0 * 440.0, 30.0);
    let fifth = peak_near(&frequencies, &magnitudes, 5.0 * 440.0, 30.0);
    let second = peak_near(&frequencies, &magnitudes, 2.0 * 440.0, 20.0);

    // Ideal square: 3rd at 1/3, 5th at 1/5 of the fundamental, no evens
    assert!(
        third > fundamental * 0.2,
        "Square needs a 3rd harmonic: {} vs fundamental {}",
        third,
        fundamental
    );
    assert!(
        fifth > fundamental * 0.1,
        "Square needs a 5th harmonic: {} vs fundamental {}",
        fifth,
        fundamental
    );
    assert!(
        second < fundamental * 0.1,
        "Square should lack even harmonics: {} vs fundamental {}",
        second,
        fundamental
    );
}

#[test]
fn test_saw_has_all_harmonics() {
    let mut mixer = tone_mixer(WaveformKind::Saw, 440.0);
    let left = left_channel(&render_to_buffer(&mut mixer, 1.0));
    let (frequencies, magnitudes) = analyze_spectrum(&left, SAMPLE_RATE_F);

    let fundamental = peak_near(&frequencies, &magnitudes, 440.0, 20.0);
    let second = peak_near(&frequencies, &magnitudes, 880.0, 20.0);
    let third = peak_near(&frequencies, &magnitudes, 1320.0, 30.0);

    // Ideal saw: every harmonic at 1/n
    assert!(second > fundamental * 0.25, "Saw needs a 2nd harmonic");
    assert!(third > fundamental * 0.15, "Saw needs a 3rd harmonic");
}

#[test]
fn test_lowpass_removes_saw_top_end() {
    let mut bright = tone_mixer(WaveformKind::Saw, 220.0);
    let bright_left = left_channel(&render_to_buffer(&mut bright, 1.0));

    let channel = {
        let mut c =
            Channel::new(WaveformKind::Saw, EnvelopeParams::new(0.0, 0.0, 1.0, 0.0), 0.8).unwrap();
        c.set_filter(FilterKind::LowPass, 500.0, 0.707).unwrap();
        c
    };
    let seq = Seq::new(vec![Note::new(220.0, 60_000.0)]);
    let mut dull = Mixer::new(vec![VoiceSlot::new("tone", channel, seq, 0.0)]);
    let dull_left = left_channel(&render_to_buffer(&mut dull, 1.0));

    let (frequencies, bright_mags) = analyze_spectrum(&bright_left, SAMPLE_RATE_F);
    let (_, dull_mags) = analyze_spectrum(&dull_left, SAMPLE_RATE_F);

    // Compare energy above 2 kHz
    let high_band = |mags: &[f32]| -> f32 {
        frequencies
            .iter()
            .zip(mags)
            .filter(|(f, _)| **f > 2000.0)
            .map(|(_, m)| m * m)
            .sum::<f32>()
            .sqrt()
    };
    let bright_high = high_band(&bright_mags);
    let dull_high = high_band(&dull_mags);

    assert!(
        dull_high < bright_high * 0.2,
        "Lowpass should strip the saw's top end: {} vs {}",
        dull_high,
        bright_high
    );
}
