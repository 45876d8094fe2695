//! Error types for the analysis pipeline and its settings IO.
//!
//! Configuration problems are reported once, when a component is built.
//! Per-frame input problems fail only the frame that carried them.

use thiserror::Error;

/// Invalid configuration, detected at construction time
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Bucket count must be at least one
    #[error("Invalid bucket count: {0} (must be > 0)")]
    InvalidBucketCount(usize),

    /// Sample buffer size must be at least one
    #[error("Invalid buffer size: {0} (must be > 0)")]
    InvalidBufferSize(usize),

    /// Usable spectrum fraction must lie in (0, 1]
    #[error("Invalid usable fraction: {0} (must be in (0, 1])")]
    InvalidUsableFraction(f32),

    /// RMS reference level must be positive and finite
    #[error("Invalid RMS reference: {0} (must be finite and > 0)")]
    InvalidRmsReference(f32),

    /// Intensity cap must be finite
    #[error("Invalid max intensity: {0} (must be finite)")]
    InvalidMaxIntensity(f32),

    /// Decay rate must be finite and non-negative
    #[error("Invalid decay rate: {0} (must be finite and >= 0)")]
    InvalidDecayRate(f32),

    /// Intensity modifier must be finite
    #[error("Invalid intensity modifier: {0} (must be finite)")]
    InvalidIntensityModifier(f32),

    /// Frame rate must be positive and finite
    #[error("Invalid frame rate: {0} (must be finite and > 0)")]
    InvalidFrameRate(f32),

    /// Spectrum bin count must be at least one
    #[error("Invalid spectrum size: {0} bins (must be > 0)")]
    InvalidSpectrumSize(usize),
}

/// Malformed per-frame input
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InputError {
    /// A frame buffer has the wrong length
    #[error("{buffer} length mismatch: expected {expected}, got {actual}")]
    LengthMismatch {
        /// Which buffer was rejected
        buffer: &'static str,
        /// Expected length
        expected: usize,
        /// Actual length
        actual: usize,
    },

    /// Delta time is negative or not finite
    #[error("Invalid delta time: {0} (must be finite and >= 0)")]
    InvalidDeltaTime(f32),
}

impl InputError {
    pub(crate) fn check_len(
        buffer: &'static str,
        expected: usize,
        actual: usize,
    ) -> std::result::Result<(), InputError> {
        if expected == actual {
            Ok(())
        } else {
            Err(InputError::LengthMismatch {
                buffer,
                expected,
                actual,
            })
        }
    }
}

/// Core error type
#[derive(Error, Debug)]
pub enum CoreError {
    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Invalid frame input
    #[error("Input error: {0}")]
    Input(#[from] InputError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// RON deserialization error
    #[error("RON parse error: {0}")]
    RonParse(#[from] ron::error::SpannedError),

    /// RON serialization error
    #[error("RON error: {0}")]
    Ron(#[from] ron::Error),

    /// TOML deserialization error
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// TOML serialization error
    #[error("TOML error: {0}")]
    TomlWrite(#[from] toml::ser::Error),

    /// WAV decoding error
    #[cfg(feature = "wav")]
    #[error("WAV error: {0}")]
    Wav(#[from] hound::Error),

    /// File extension not recognised
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// File exceeds the size limit
    #[error("File too large: {size} bytes (limit {limit} bytes)")]
    FileTooLarge {
        /// Actual file size in bytes
        size: u64,
        /// Allowed size in bytes
        limit: u64,
    },
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, CoreError>;
