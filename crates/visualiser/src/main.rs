//! Visualiser - offline driver for the ring visualiser analysis
//!
//! Plays a WAV file or a generated tone through the analysis pipeline at a
//! fixed frame rate and prints the per-bucket intensities of every frame.

#![warn(missing_docs)]

mod cli;
mod logging_setup;
mod render;
mod report;

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::io::BufWriter;
use tracing::{info, warn};
use visualiser_core::{PlaybackSource, Settings};

use crate::cli::Args;
use crate::render::Renderer;

fn load_settings(args: &Args) -> Result<Settings> {
    let mut settings = match &args.config {
        Some(path) => Settings::load(path)
            .with_context(|| format!("Failed to load settings from {:?}", path))?,
        None => Settings::default(),
    };

    if let Some(frame_rate) = args.frame_rate {
        settings.frame_rate = frame_rate;
    }
    if let Some(level) = &args.log_level {
        settings.log.level = level.clone();
    }

    settings.validate().context("Invalid settings")?;
    Ok(settings)
}

fn open_source(args: &Args) -> Result<PlaybackSource> {
    if let Some(freq) = args.tone {
        info!(
            "Generating {} Hz tone, {:.2}s at {} Hz",
            freq, args.duration, args.sample_rate
        );
        return Ok(PlaybackSource::tone(
            freq,
            0.5,
            args.duration,
            args.sample_rate,
        ));
    }

    match &args.input {
        #[cfg(feature = "wav")]
        Some(path) => PlaybackSource::from_wav(path)
            .with_context(|| format!("Failed to open audio file {:?}", path)),
        #[cfg(not(feature = "wav"))]
        Some(_) => bail!("WAV input requires the 'wav' feature"),
        None => bail!("No input given: pass a WAV file or --tone <HZ>"),
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    if let Some(path) = &args.write_default_config {
        Settings::default()
            .save(path)
            .with_context(|| format!("Failed to write settings to {:?}", path))?;
        eprintln!("Wrote default settings to {:?}", path);
        return Ok(());
    }

    let settings = load_settings(&args)?;
    let _log_guard = logging_setup::init(&settings)?;

    let mut source = open_source(&args)?;
    if source.is_empty() {
        warn!("Audio source is empty, nothing to render");
    }

    let mut renderer = Renderer::new(&settings)?;
    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    let summary = renderer.run(&mut source, &mut out, args.format, args.frames)?;

    match summary.peak_intensity {
        Some(peak) => info!(
            "Rendered {} frames ({:.2}s), peak intensity {:.2}",
            summary.frames, summary.elapsed, peak
        ),
        None => info!("Rendered no frames"),
    }

    Ok(())
}
