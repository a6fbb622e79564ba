//! WAV sample loading
//!
//! Loads mono 16-bit PCM WAV files at the engine sample rate into
//! normalized f32 arrays. The format requirements are deliberately strict:
//! no resampling, no channel mixing. Anything that doesn't match comes back
//! as an empty array so the caller can fall back to silence without
//! special-casing errors in the audio path.

use crate::constants::SAMPLE_RATE;
use std::path::Path;
use tracing::warn;

/// Load a WAV file as a normalized mono f32 array.
///
/// Accepts only mono, 16-bit integer PCM at 44 100 Hz; samples are scaled
/// by 1/32768. On any IO or format error a warning is logged and an empty
/// vector is returned; check `is_empty()` before use.
pub fn load_wav_mono<P: AsRef<Path>>(path: P) -> Vec<f32> {
    let path = path.as_ref();
    match try_load(path) {
        Ok(samples) => samples,
        Err(err) => {
            warn!("failed to load {}: {}", path.display(), err);
            Vec::new()
        }
    }
}

fn try_load(path: &Path) -> Result<Vec<f32>, String> {
    let mut reader = hound::WavReader::open(path).map_err(|e| e.to_string())?;
    let spec = reader.spec();

    if spec.channels != 1 {
        return Err(format!("expected mono, got {} channels", spec.channels));
    }
    if spec.sample_rate != SAMPLE_RATE {
        return Err(format!(
            "expected {} Hz, got {} Hz",
            SAMPLE_RATE, spec.sample_rate
        ));
    }
    if spec.bits_per_sample != 16 || spec.sample_format != hound::SampleFormat::Int {
        return Err(format!(
            "expected 16-bit integer PCM, got {}-bit {:?}",
            spec.bits_per_sample, spec.sample_format
        ));
    }

    let samples: Result<Vec<i16>, _> = reader.samples::<i16>().collect();
    let samples = samples.map_err(|e| e.to_string())?;
    Ok(samples.into_iter().map(|s| s as f32 / 32768.0).collect())
}
