//! Command-line argument parsing.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for per-frame reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// One human-readable line per frame
    Text,
    /// One JSON object per line
    Json,
}

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "visualiser")]
#[command(about = "Drive the ring visualiser analysis over an audio file", long_about = None)]
pub struct Args {
    /// WAV file to analyse
    #[arg(value_name = "INPUT", conflicts_with = "tone")]
    pub input: Option<PathBuf>,

    /// Analyse a generated sine tone instead of a file (frequency in Hz)
    #[arg(long, value_name = "HZ")]
    pub tone: Option<f32>,

    /// Tone length in seconds
    #[arg(long, value_name = "SECONDS", default_value = "2.0")]
    pub duration: f32,

    /// Tone sample rate in Hz
    #[arg(long, value_name = "HZ", default_value = "44100")]
    pub sample_rate: u32,

    /// Settings file (.ron, .json or .toml)
    #[arg(long, short, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Override the configured frame rate
    #[arg(long, value_name = "FPS")]
    pub frame_rate: Option<f32>,

    /// Stop after this many frames
    #[arg(long, value_name = "N")]
    pub frames: Option<u64>,

    /// Report format
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,

    /// Override the configured log level
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Write the default settings to PATH and exit
    #[arg(long, value_name = "PATH")]
    pub write_default_config: Option<PathBuf>,
}
