//! RMS and decibel loudness

use serde::{Deserialize, Serialize};

/// Loudness of one frame
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Loudness {
    /// Root-mean-square amplitude
    pub rms: f32,
    /// Level relative to the reference RMS; `-inf` for a silent frame
    pub db: f32,
}

impl Loudness {
    /// Measure a frame against a reference RMS level
    pub fn measure(samples: &[f32], rms_reference: f32) -> Self {
        let rms = calculate_rms(samples);
        Self {
            rms,
            db: to_decibels(rms, rms_reference),
        }
    }

    /// Decibel value with the silent-frame singularity replaced by `floor`
    pub fn db_or(&self, floor: f32) -> f32 {
        if self.db.is_finite() {
            self.db.max(floor)
        } else {
            floor
        }
    }
}

/// Root-mean-square of a buffer. Non-finite samples count as silence.
pub fn calculate_rms(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum: f32 = samples
        .iter()
        .map(|&s| if s.is_finite() { s * s } else { 0.0 })
        .sum();
    (sum / samples.len() as f32).sqrt()
}

/// `20 * log10(rms / reference)`; zero RMS yields negative infinity
pub fn to_decibels(rms: f32, reference: f32) -> f32 {
    20.0 * (rms / reference).log10()
}
