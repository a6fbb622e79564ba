//! Siren CLI - play or render the built-in demo song

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use siren::audio::CpalOutput;
use siren::bpm::NoteLengths;
use siren::constants::BUF_SIZE;
use siren::engine::Engine;
use siren::mixer::{Mixer, VoiceSlot};
use siren::notes;
use siren::presets;
use siren::render::render_to_wav;
use siren::sequencer::{Note, Seq};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "siren")]
#[command(about = "Chiptune audio engine", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play the demo song through the default audio device
    Play {
        /// Duration in seconds
        #[arg(short, long, default_value = "8.0")]
        duration: f32,

        /// Master gain 0.0-1.0
        #[arg(short, long, default_value = "0.8")]
        gain: f32,
    },

    /// Render the demo song to a WAV file
    Render {
        /// Output WAV path
        output: PathBuf,

        /// Duration in seconds
        #[arg(short, long, default_value = "8.0")]
        duration: f32,

        /// Master gain 0.0-1.0
        #[arg(short, long, default_value = "0.8")]
        gain: f32,
    },
}

/// A small two-voice tune: plucked arpeggio over a walking bass.
fn demo_mixer(master_gain: f32) -> Mixer {
    let t = NoteLengths::new(132.0);

    let melody = Seq::new(vec![
        Note::new(notes::C4, t.eighth),
        Note::new(notes::E4, t.eighth),
        Note::new(notes::G4, t.eighth),
        Note::new(notes::C5, t.eighth),
        Note::new(notes::B4, t.eighth),
        Note::new(notes::G4, t.eighth),
        Note::new(notes::E4, t.eighth),
        Note::rest(t.eighth),
        Note::new(notes::A3, t.eighth),
        Note::new(notes::C4, t.eighth),
        Note::new(notes::E4, t.eighth),
        Note::new(notes::A4, t.eighth),
        Note::new(notes::G4, t.quarter),
        Note::rest(t.quarter),
    ]);

    let bass = Seq::new(vec![
        Note::new(notes::C2, t.quarter),
        Note::new(notes::G2, t.quarter),
        Note::new(notes::A2, t.quarter),
        Note::new(notes::E2, t.quarter),
    ]);

    let mut mixer = Mixer::new(vec![
        VoiceSlot::new("melody", presets::pluck_square(), melody, -0.25),
        VoiceSlot::new("bass", presets::bass_saw(), bass, 0.25),
    ]);
    mixer.set_master_gain(master_gain);
    mixer
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Play { duration, gain } => {
            let mixer = demo_mixer(gain);
            let sink = CpalOutput::open(BUF_SIZE * 8).map_err(|e| anyhow!(e))?;
            let mut engine = Engine::new(mixer, sink);
            println!("Playing for {:.1}s... (RUST_LOG=debug for detail)", duration);
            engine.run_for(Duration::from_secs_f32(duration.max(0.0)));
        }

        Commands::Render {
            output,
            duration,
            gain,
        } => {
            let mut mixer = demo_mixer(gain);
            let stats =
                render_to_wav(&mut mixer, duration.max(0.0), &output).map_err(|e| anyhow!(e))?;
            println!(
                "Wrote {}: peak {:.3}, rms {:.3}, {} clipped samples",
                output.display(),
                stats.peak,
                stats.rms,
                stats.clipped
            );
        }
    }

    Ok(())
}
