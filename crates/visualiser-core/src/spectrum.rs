//! Windowed magnitude spectrum
//!
//! Produces `bins` magnitudes from `2 * bins` time-domain samples using a
//! 4-term Blackman-Harris window and a forward FFT. Magnitudes are divided by
//! the window's coherent gain, so a bin-centred sine of amplitude `A` peaks
//! near `A / 2`.

use crate::error::{ConfigError, InputError};
use num_complex::Complex;
use rustfft::{Fft, FftPlanner};
use std::f32::consts::PI;
use std::sync::Arc;
use tracing::debug;

/// 4-term Blackman-Harris coefficient for `index` in a window of `size`
pub fn blackman_harris(index: usize, size: usize) -> f32 {
    const A0: f32 = 0.35875;
    const A1: f32 = 0.48829;
    const A2: f32 = 0.14128;
    const A3: f32 = 0.01168;

    if size < 2 {
        return 1.0;
    }
    let t = 2.0 * PI * index as f32 / (size - 1) as f32;
    A0 - A1 * t.cos() + A2 * (2.0 * t).cos() - A3 * (3.0 * t).cos()
}

/// Reusable FFT state for one spectrum size
pub struct SpectrumAnalyzer {
    /// FFT instance
    fft: Arc<dyn Fft<f32>>,

    /// Output bin count
    bins: usize,

    /// Window coefficients
    window: Vec<f32>,

    /// Sum of window coefficients
    coherent_gain: f32,

    /// FFT complex buffer
    fft_buffer: Vec<Complex<f32>>,

    /// FFT scratch buffer
    scratch_buffer: Vec<Complex<f32>>,
}

impl std::fmt::Debug for SpectrumAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpectrumAnalyzer")
            .field("bins", &self.bins)
            .field("fft_size", &self.fft_size())
            .finish()
    }
}

impl SpectrumAnalyzer {
    /// Plan a spectrum of `bins` magnitudes
    pub fn new(bins: usize) -> Result<Self, ConfigError> {
        if bins == 0 {
            return Err(ConfigError::InvalidSpectrumSize(bins));
        }
        let fft_size = bins * 2;

        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(fft_size);
        let scratch_len = fft.get_inplace_scratch_len();

        let window: Vec<f32> = (0..fft_size)
            .map(|i| blackman_harris(i, fft_size))
            .collect();
        let coherent_gain = window.iter().sum();

        debug!(
            "SpectrumAnalyzer created: bins={}, fft_size={}",
            bins, fft_size
        );

        Ok(Self {
            fft,
            bins,
            window,
            coherent_gain,
            fft_buffer: vec![Complex::new(0.0, 0.0); fft_size],
            scratch_buffer: vec![Complex::new(0.0, 0.0); scratch_len],
        })
    }

    /// Number of output magnitudes
    pub fn bins(&self) -> usize {
        self.bins
    }

    /// Number of input samples per call
    pub fn fft_size(&self) -> usize {
        self.window.len()
    }

    /// Fill `out` with the magnitude spectrum of `window_samples`
    pub fn process(&mut self, window_samples: &[f32], out: &mut [f32]) -> Result<(), InputError> {
        InputError::check_len("window samples", self.fft_size(), window_samples.len())?;
        InputError::check_len("spectrum", self.bins, out.len())?;

        for ((slot, &sample), &w) in self
            .fft_buffer
            .iter_mut()
            .zip(window_samples)
            .zip(&self.window)
        {
            let sample = if sample.is_finite() { sample } else { 0.0 };
            *slot = Complex::new(sample * w, 0.0);
        }

        self.fft
            .process_with_scratch(&mut self.fft_buffer, &mut self.scratch_buffer);

        let norm = 1.0 / self.coherent_gain;
        for (magnitude, bin) in out.iter_mut().zip(&self.fft_buffer) {
            *magnitude = bin.norm() * norm;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blackman_harris_shape() {
        let size = 1024;

        // Near zero at the edges, one at the centre
        assert!(blackman_harris(0, size) < 1e-3);
        assert!(blackman_harris(size - 1, size) < 1e-3);
        let centre = (blackman_harris(size / 2, size) + blackman_harris(size / 2 - 1, size)) / 2.0;
        assert!((centre - 1.0).abs() < 1e-3, "centre was {}", centre);
    }

    #[test]
    fn test_rejects_zero_bins() {
        assert!(matches!(
            SpectrumAnalyzer::new(0),
            Err(ConfigError::InvalidSpectrumSize(0))
        ));
    }

    #[test]
    fn test_silence_has_flat_zero_spectrum() {
        let mut analyzer = SpectrumAnalyzer::new(64).unwrap();
        let mut out = vec![1.0; 64];
        analyzer.process(&[0.0; 128], &mut out).unwrap();
        assert!(out.iter().all(|&m| m == 0.0));
    }

    #[test]
    fn test_sine_peaks_at_its_bin() {
        let bins = 128;
        let fft_size = bins * 2;
        let target_bin = 16;
        let samples: Vec<f32> = (0..fft_size)
            .map(|i| (2.0 * PI * target_bin as f32 * i as f32 / fft_size as f32).sin())
            .collect();

        let mut analyzer = SpectrumAnalyzer::new(bins).unwrap();
        let mut out = vec![0.0; bins];
        analyzer.process(&samples, &mut out).unwrap();

        let (peak_bin, peak) = out
            .iter()
            .copied()
            .enumerate()
            .fold((0, 0.0f32), |best, (i, m)| if m > best.1 { (i, m) } else { best });
        assert_eq!(peak_bin, target_bin);
        assert!((peak - 0.5).abs() < 0.05, "peak magnitude was {}", peak);

        // Far bins carry almost nothing
        assert!(out[64] < 1e-3, "leakage at bin 64 was {}", out[64]);
    }

    #[test]
    fn test_length_checks() {
        let mut analyzer = SpectrumAnalyzer::new(8).unwrap();
        let mut out = vec![0.0; 8];
        assert!(analyzer.process(&[0.0; 8], &mut out).is_err());

        let mut short = vec![0.0; 4];
        assert!(analyzer.process(&[0.0; 16], &mut short).is_err());
        assert!(analyzer.process(&[0.0; 16], &mut out).is_ok());
    }
}
