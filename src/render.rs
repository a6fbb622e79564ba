//! Offline rendering
//!
//! Drives a mixer for a fixed duration without a device and writes the
//! result to a stereo float WAV file, reporting simple level statistics.
//! A short master fade-out is applied to the tail of the file so renders
//! cut mid-note end without a click.

use crate::constants::{ms_to_samps, BUF_FRAMES, SAMPLE_RATE};
use crate::mixer::Mixer;
use std::path::Path;
use tracing::info;

/// Tail fade applied to rendered files, in milliseconds.
const FADE_OUT_MS: f32 = 10.0;

/// Level statistics over a rendered buffer.
#[derive(Debug, Clone, Copy)]
pub struct RenderStats {
    /// Largest absolute sample value.
    pub peak: f32,
    /// Root mean square over the whole buffer.
    pub rms: f32,
    /// Samples that hit the clamp rails (|s| == 1.0).
    pub clipped: usize,
}

impl RenderStats {
    pub fn from_samples(samples: &[f32]) -> Self {
        if samples.is_empty() {
            return Self {
                peak: 0.0,
                rms: 0.0,
                clipped: 0,
            };
        }
        let peak = samples.iter().map(|s| s.abs()).fold(0.0f32, f32::max);
        let rms =
            (samples.iter().map(|s| s * s).sum::<f32>() / samples.len() as f32).sqrt();
        let clipped = samples.iter().filter(|s| s.abs() >= 1.0).count();
        Self { peak, rms, clipped }
    }
}

/// Tick the mixer until at least `seconds` of audio exist and return the
/// interleaved stereo result.
pub fn render_to_buffer(mixer: &mut Mixer, seconds: f32) -> Vec<f32> {
    let frames_wanted = (seconds.max(0.0) * SAMPLE_RATE as f32) as usize;
    let ticks = frames_wanted.div_ceil(BUF_FRAMES);
    let mut out = Vec::with_capacity(ticks * BUF_FRAMES * 2);
    for _ in 0..ticks {
        out.extend_from_slice(mixer.tick());
    }
    out
}

/// Linear fade-out over the last `FADE_OUT_MS` of an interleaved stereo
/// buffer. Both samples of a frame share one gain so the stereo image
/// holds through the ramp.
fn apply_fade_out(samples: &mut [f32]) {
    let total_frames = samples.len() / 2;
    let fade_frames = ms_to_samps(FADE_OUT_MS).min(total_frames);
    if fade_frames == 0 {
        return;
    }
    let start = total_frames - fade_frames;
    for i in 0..fade_frames {
        let gain = 1.0 - (i as f32 / fade_frames as f32);
        samples[2 * (start + i)] *= gain;
        samples[2 * (start + i) + 1] *= gain;
    }
}

/// Render `seconds` of the mixer's output to a 32-bit float stereo WAV,
/// with the master fade-out applied to the tail.
pub fn render_to_wav<P: AsRef<Path>>(
    mixer: &mut Mixer,
    seconds: f32,
    path: P,
) -> Result<RenderStats, String> {
    let mut samples = render_to_buffer(mixer, seconds);
    apply_fade_out(&mut samples);
    let stats = RenderStats::from_samples(&samples);

    let spec = hound::WavSpec {
        channels: 2,
        sample_rate: SAMPLE_RATE,
        bits_per_sample: 32,
        sample_format: hound::SampleFormat::Float,
    };
    let mut writer = hound::WavWriter::create(path.as_ref(), spec).map_err(|e| e.to_string())?;
    for sample in &samples {
        writer.write_sample(*sample).map_err(|e| e.to_string())?;
    }
    writer.finalize().map_err(|e| e.to_string())?;

    info!(
        "rendered {:.2}s to {}: peak {:.3}, rms {:.3}, {} clipped",
        seconds,
        path.as_ref().display(),
        stats.peak,
        stats.rms,
        stats.clipped
    );
    Ok(stats)
}
