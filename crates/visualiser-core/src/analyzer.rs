//! Audio Analyzer - per-frame loudness and bucket intensities
//!
//! The analyzer is driven once per host frame with caller-owned waveform and
//! spectrum buffers. It keeps one intensity per bucket between frames and
//! allocates nothing after construction.

use crate::bucketing::{apply_envelope, fill_bucket_targets};
use crate::config::AnalysisConfig;
use crate::error::{ConfigError, InputError};
use crate::loudness::Loudness;
use tracing::{debug, trace, warn};

/// Result of one [`AudioAnalyzer::tick`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickOutput<'a> {
    /// Loudness of this frame
    pub loudness: Loudness,
    /// Updated intensity of every bucket
    pub intensities: &'a [f32],
}

impl TickOutput<'_> {
    /// RMS amplitude of this frame
    pub fn rms(&self) -> f32 {
        self.loudness.rms
    }

    /// Decibel level of this frame
    pub fn db(&self) -> f32 {
        self.loudness.db
    }
}

/// Stateful spectrum-to-intensity analyzer
#[derive(Debug, Clone)]
pub struct AudioAnalyzer {
    /// Configuration, fixed at construction
    config: AnalysisConfig,

    /// Bins summed per bucket
    average_size: usize,

    /// Current intensity per bucket
    intensities: Vec<f32>,

    /// Scratch buffer for this frame's bucket targets
    targets: Vec<f32>,

    /// Loudness of the last successful tick
    loudness: Loudness,

    /// Successful ticks since construction or reset
    ticks: u64,
}

impl AudioAnalyzer {
    /// Validate `config` and allocate zeroed bucket state
    pub fn new(config: AnalysisConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let average_size = config.average_size();
        if average_size == 0 {
            warn!(
                "AudioAnalyzer: {} usable bins cannot fill {} buckets, all targets will be zero",
                config.usable_samples(),
                config.bucket_count
            );
        }

        debug!(
            "AudioAnalyzer created: buffer_size={}, buckets={}, average_size={}, usable_fraction={}",
            config.buffer_size, config.bucket_count, average_size, config.usable_fraction
        );

        Ok(Self {
            average_size,
            intensities: vec![0.0; config.bucket_count],
            targets: vec![0.0; config.bucket_count],
            loudness: Loudness::default(),
            ticks: 0,
            config,
        })
    }

    /// Analyse one frame
    ///
    /// `samples` and `spectrum` must both hold exactly `buffer_size` values
    /// and `delta_time` is the time in seconds since the previous frame. A
    /// rejected frame leaves every piece of state as it was.
    pub fn tick(
        &mut self,
        samples: &[f32],
        spectrum: &[f32],
        delta_time: f32,
    ) -> Result<TickOutput<'_>, InputError> {
        let buffer_size = self.config.buffer_size;
        InputError::check_len("samples", buffer_size, samples.len())?;
        InputError::check_len("spectrum", buffer_size, spectrum.len())?;
        if !(delta_time.is_finite() && delta_time >= 0.0) {
            return Err(InputError::InvalidDeltaTime(delta_time));
        }

        // 1. Loudness
        self.loudness = Loudness::measure(samples, self.config.rms_reference);

        // 2. Bucket targets
        fill_bucket_targets(
            spectrum,
            self.average_size,
            self.config.intensity_modifier,
            &mut self.targets,
        );

        // 3. Envelope
        let decay_step = self.config.decay_rate * delta_time;
        let max = self.config.max_intensity;
        for (intensity, &target) in self.intensities.iter_mut().zip(&self.targets) {
            *intensity = apply_envelope(*intensity, target, decay_step, max);
        }

        self.ticks += 1;
        if self.ticks % 100 == 0 {
            trace!(
                "Tick #{}: rms={:.4}, db={:.2}, buckets={:?}",
                self.ticks,
                self.loudness.rms,
                self.loudness.db,
                &self.intensities[..self.intensities.len().min(3)]
            );
        }

        Ok(TickOutput {
            loudness: self.loudness,
            intensities: &self.intensities,
        })
    }

    /// The configuration this analyzer was built with
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Current bucket intensities
    pub fn intensities(&self) -> &[f32] {
        &self.intensities
    }

    /// Loudness of the last successful tick
    pub fn loudness(&self) -> Loudness {
        self.loudness
    }

    /// Bins summed per bucket
    pub fn average_size(&self) -> usize {
        self.average_size
    }

    /// Number of successful ticks
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Zero all bucket intensities and loudness
    pub fn reset(&mut self) {
        self.intensities.fill(0.0);
        self.targets.fill(0.0);
        self.loudness = Loudness::default();
        self.ticks = 0;

        debug!("AudioAnalyzer reset");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config() -> AnalysisConfig {
        AnalysisConfig {
            buffer_size: 4,
            bucket_count: 2,
            usable_fraction: 1.0,
            intensity_modifier: 1.0,
            decay_rate: 0.0,
            max_intensity: 100.0,
            rms_reference: 0.1,
        }
    }

    #[test]
    fn test_create_analyzer() {
        let analyzer = AudioAnalyzer::new(AnalysisConfig::default()).unwrap();
        assert_eq!(analyzer.intensities(), &[0.0; 10]);
        assert_eq!(analyzer.average_size(), 51);
        assert_eq!(analyzer.ticks(), 0);
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = AnalysisConfig {
            bucket_count: 0,
            ..Default::default()
        };
        assert!(matches!(
            AudioAnalyzer::new(config),
            Err(ConfigError::InvalidBucketCount(0))
        ));
    }

    #[test]
    fn test_tick_buckets_spectrum() {
        let mut analyzer = AudioAnalyzer::new(small_config()).unwrap();
        let output = analyzer
            .tick(&[1.0, -1.0, 1.0, -1.0], &[2.0, 2.0, 4.0, 4.0], 0.016)
            .unwrap();

        assert_eq!(output.intensities, &[2.0, 4.0]);
        assert!((output.rms() - 1.0).abs() < 1e-6);
        assert!((output.db() - 20.0).abs() < 1e-4);
        assert_eq!(analyzer.ticks(), 1);
    }

    #[test]
    fn test_length_mismatch_preserves_state() {
        let mut analyzer = AudioAnalyzer::new(small_config()).unwrap();
        analyzer
            .tick(&[0.5; 4], &[2.0, 2.0, 4.0, 4.0], 0.016)
            .unwrap();
        let before = analyzer.loudness();

        let err = analyzer.tick(&[0.0; 3], &[9.0; 4], 0.016).unwrap_err();
        assert!(matches!(
            err,
            InputError::LengthMismatch {
                buffer: "samples",
                ..
            }
        ));

        let err = analyzer.tick(&[0.0; 4], &[9.0; 5], 0.016).unwrap_err();
        assert!(matches!(
            err,
            InputError::LengthMismatch {
                buffer: "spectrum",
                ..
            }
        ));

        assert_eq!(analyzer.intensities(), &[2.0, 4.0]);
        assert_eq!(analyzer.loudness(), before);
        assert_eq!(analyzer.ticks(), 1);
    }

    #[test]
    fn test_rejects_bad_delta_time() {
        let mut analyzer = AudioAnalyzer::new(small_config()).unwrap();
        for dt in [-0.1, f32::NAN, f32::INFINITY] {
            assert!(matches!(
                analyzer.tick(&[0.0; 4], &[0.0; 4], dt),
                Err(InputError::InvalidDeltaTime(_))
            ));
        }
        assert_eq!(analyzer.ticks(), 0);
    }

    #[test]
    fn test_zero_average_size_yields_zero_targets() {
        let config = AnalysisConfig {
            buffer_size: 4,
            bucket_count: 8,
            usable_fraction: 1.0,
            ..Default::default()
        };
        let mut analyzer = AudioAnalyzer::new(config).unwrap();
        assert_eq!(analyzer.average_size(), 0);

        let output = analyzer.tick(&[0.1; 4], &[5.0; 4], 0.1).unwrap();
        assert!(output.intensities.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_resilience_to_bad_input() {
        let mut analyzer = AudioAnalyzer::new(small_config()).unwrap();
        let output = analyzer
            .tick(
                &[f32::NAN, f32::INFINITY, f32::NEG_INFINITY, 0.0],
                &[f32::NAN, 2.0, f32::INFINITY, 4.0],
                0.016,
            )
            .unwrap();

        assert_eq!(output.rms(), 0.0);
        assert_eq!(output.intensities, &[1.0, 2.0]);
    }

    #[test]
    fn test_reset() {
        let mut analyzer = AudioAnalyzer::new(small_config()).unwrap();
        analyzer
            .tick(&[1.0; 4], &[2.0, 2.0, 4.0, 4.0], 0.016)
            .unwrap();
        assert!(analyzer.loudness().rms > 0.0);

        analyzer.reset();

        assert_eq!(analyzer.intensities(), &[0.0, 0.0]);
        assert_eq!(analyzer.loudness(), Loudness::default());
        assert_eq!(analyzer.ticks(), 0);
        assert_eq!(analyzer.config(), &small_config());
    }
}
