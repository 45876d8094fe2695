//! Frame sources - playback of decoded audio
//!
//! A frame source stands in for a playing audio source: time advances by
//! the frame's delta time and the analyzer asks for the samples that were
//! most recently played.

#[cfg(feature = "wav")]
use crate::error::Result;
use std::f32::consts::PI;
#[cfg(feature = "wav")]
use std::path::Path;
#[cfg(feature = "wav")]
use tracing::debug;

/// Something that plays audio and can report its latest output
pub trait FrameSource {
    /// Move the play head forward by `delta_time` seconds
    fn advance(&mut self, delta_time: f32);

    /// Fill `out` with the samples that end at the play head
    ///
    /// Positions before the start of playback read as silence.
    fn output_data(&self, out: &mut [f32]);

    /// Whether the play head has reached the end of the audio
    fn is_finished(&self) -> bool;

    /// Sample rate in Hz
    fn sample_rate(&self) -> u32;
}

/// Mono audio buffer played back at its sample rate
#[derive(Debug, Clone)]
pub struct PlaybackSource {
    samples: Vec<f32>,
    sample_rate: u32,
    elapsed: f64,
}

impl PlaybackSource {
    /// Play an in-memory buffer
    pub fn from_samples(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
            elapsed: 0.0,
        }
    }

    /// Pure sine tone
    pub fn tone(freq_hz: f32, amplitude: f32, duration_s: f32, sample_rate: u32) -> Self {
        let len = (duration_s.max(0.0) as f64 * sample_rate as f64) as usize;
        let samples = (0..len)
            .map(|i| (2.0 * PI * freq_hz * i as f32 / sample_rate as f32).sin() * amplitude)
            .collect();
        Self::from_samples(samples, sample_rate)
    }

    /// Decode the first channel of a WAV file
    #[cfg(feature = "wav")]
    pub fn from_wav(path: &Path) -> Result<Self> {
        let mut reader = hound::WavReader::open(path)?;
        let spec = reader.spec();
        let channels = spec.channels.max(1) as usize;

        let interleaved: Vec<f32> = match spec.sample_format {
            hound::SampleFormat::Float => reader
                .samples::<f32>()
                .collect::<std::result::Result<_, _>>()?,
            hound::SampleFormat::Int => {
                let scale = 1.0 / (1u64 << (spec.bits_per_sample.saturating_sub(1))) as f32;
                reader
                    .samples::<i32>()
                    .map(|s| s.map(|v| v as f32 * scale))
                    .collect::<std::result::Result<_, _>>()?
            }
        };

        let samples: Vec<f32> = interleaved.into_iter().step_by(channels).collect();

        debug!(
            "Loaded {:?}: {} frames, {} Hz, {} channel(s), {} bits",
            path,
            samples.len(),
            spec.sample_rate,
            spec.channels,
            spec.bits_per_sample
        );

        Ok(Self::from_samples(samples, spec.sample_rate))
    }

    /// Index of the next sample to be played
    pub fn position(&self) -> usize {
        let pos = (self.elapsed * self.sample_rate as f64).floor() as usize;
        pos.min(self.samples.len())
    }

    /// Seconds played so far
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Length of the buffer in seconds
    pub fn duration(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f64 / self.sample_rate as f64
    }

    /// Number of samples in the buffer
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the buffer holds no audio
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Rewind to the start
    pub fn rewind(&mut self) {
        self.elapsed = 0.0;
    }
}

impl FrameSource for PlaybackSource {
    fn advance(&mut self, delta_time: f32) {
        if delta_time.is_finite() && delta_time > 0.0 {
            self.elapsed += delta_time as f64;
        }
    }

    fn output_data(&self, out: &mut [f32]) {
        let end = self.position();
        let start = end.saturating_sub(out.len());
        let available = &self.samples[start..end];
        let silent = out.len() - available.len();

        out[..silent].fill(0.0);
        out[silent..].copy_from_slice(available);
    }

    fn is_finished(&self) -> bool {
        self.position() >= self.samples.len()
    }

    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }
}
