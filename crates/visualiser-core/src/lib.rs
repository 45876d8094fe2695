//! Visualiser Core - Audio analysis for ring-of-bars visualisers
//!
//! This crate turns per-frame audio into visual intensities:
//! - RMS and decibel loudness of the waveform
//! - Spectrum bucketing into N equal-width bands
//! - Attack-instant / release-gradual smoothing per bucket
//! - Windowed FFT spectrum and playback frame sources
//! - Settings and log configuration shared with the renderer binary

#![warn(missing_docs)]

pub mod analyzer;
pub mod bucketing;
pub mod config;
pub mod error;
pub mod logging;
pub mod loudness;
pub mod settings;
pub mod source;
pub mod spectrum;
pub mod spinner;
pub mod visual;

// --- Re-exports grouped by category ---

// Analysis
pub use analyzer::{AudioAnalyzer, TickOutput};
pub use bucketing::{apply_envelope, bucket_average_size, bucket_ranges, fill_bucket_targets};
pub use config::{AnalysisConfig, DEFAULT_BUFFER_SIZE};
pub use loudness::{calculate_rms, to_decibels, Loudness};

// Audio input
pub use source::{FrameSource, PlaybackSource};
pub use spectrum::{blackman_harris, SpectrumAnalyzer};

// Presentation helpers
pub use spinner::{Spinner, SpinnerConfig};
pub use visual::{bar_scale, color_ratio, Layout, LineLayout, RingLayout};

// Settings & Logging
pub use logging::LogConfig;
pub use settings::{Settings, SettingsFormat, MAX_SETTINGS_FILE_SIZE};

// Errors
pub use error::{ConfigError, CoreError, InputError, Result};
