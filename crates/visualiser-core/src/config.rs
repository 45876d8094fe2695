//! Analysis configuration
//!
//! Defaults mirror the classic ring visualiser: a 1024-sample buffer, ten
//! buckets over the lower half of the spectrum and a 25x scale cap.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Default sample buffer size
pub const DEFAULT_BUFFER_SIZE: usize = 1024;

/// Configuration for [`AudioAnalyzer`](crate::AudioAnalyzer)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Samples per frame, also the spectrum bin count
    pub buffer_size: usize,
    /// RMS value that maps to 0 dB
    pub rms_reference: f32,
    /// Number of spectrum buckets (visual objects)
    pub bucket_count: usize,
    /// Upper bound on any bucket intensity
    pub max_intensity: f32,
    /// Intensity lost per second while the target is lower
    pub decay_rate: f32,
    /// Leading fraction of the spectrum that feeds the buckets, in (0, 1]
    pub usable_fraction: f32,
    /// Scale applied to each bucket's average magnitude
    pub intensity_modifier: f32,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            buffer_size: DEFAULT_BUFFER_SIZE,
            rms_reference: 0.1,
            bucket_count: 10,
            max_intensity: 25.0,
            decay_rate: 10.0,
            usable_fraction: 0.5,
            intensity_modifier: 50.0,
        }
    }
}

impl AnalysisConfig {
    /// Check every field, returning the first violation found
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bucket_count == 0 {
            return Err(ConfigError::InvalidBucketCount(self.bucket_count));
        }
        if self.buffer_size == 0 {
            return Err(ConfigError::InvalidBufferSize(self.buffer_size));
        }
        // NaN fails both comparisons
        if !(self.usable_fraction > 0.0 && self.usable_fraction <= 1.0) {
            return Err(ConfigError::InvalidUsableFraction(self.usable_fraction));
        }
        if !(self.rms_reference.is_finite() && self.rms_reference > 0.0) {
            return Err(ConfigError::InvalidRmsReference(self.rms_reference));
        }
        if !self.max_intensity.is_finite() {
            return Err(ConfigError::InvalidMaxIntensity(self.max_intensity));
        }
        if !(self.decay_rate.is_finite() && self.decay_rate >= 0.0) {
            return Err(ConfigError::InvalidDecayRate(self.decay_rate));
        }
        if !self.intensity_modifier.is_finite() {
            return Err(ConfigError::InvalidIntensityModifier(
                self.intensity_modifier,
            ));
        }
        Ok(())
    }

    /// Number of leading spectrum bins considered for bucketing
    ///
    /// The product is taken in `f32`, so decimal fractions such as `0.7`
    /// cover the whole `buffer_size * fraction` bins.
    pub fn usable_samples(&self) -> usize {
        (self.buffer_size as f32 * self.usable_fraction).floor() as usize
    }

    /// Bins summed per bucket; may be zero for very small buffers
    pub fn average_size(&self) -> usize {
        crate::bucketing::bucket_average_size(self.usable_samples(), self.bucket_count)
    }
}
