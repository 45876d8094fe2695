use std::f32::consts::PI;
use visualiser_core::{
    AnalysisConfig, AudioAnalyzer, FrameSource, PlaybackSource, SpectrumAnalyzer,
};

const SAMPLE_RATE: u32 = 44100;

struct Pipeline {
    analyzer: AudioAnalyzer,
    spectrum: SpectrumAnalyzer,
    window: Vec<f32>,
    magnitudes: Vec<f32>,
}

impl Pipeline {
    fn new(config: AnalysisConfig) -> Self {
        let bins = config.buffer_size;
        let spectrum = SpectrumAnalyzer::new(bins).unwrap();
        Self {
            analyzer: AudioAnalyzer::new(config).unwrap(),
            window: vec![0.0; spectrum.fft_size()],
            magnitudes: vec![0.0; bins],
            spectrum,
        }
    }

    fn step(&mut self, source: &mut PlaybackSource, dt: f32) -> Vec<f32> {
        source.advance(dt);
        source.output_data(&mut self.window);
        self.spectrum
            .process(&self.window, &mut self.magnitudes)
            .unwrap();

        let bins = self.magnitudes.len();
        let waveform = &self.window[self.window.len() - bins..];
        let output = self.analyzer.tick(waveform, &self.magnitudes, dt).unwrap();
        output.intensities.to_vec()
    }
}

fn loudest_bucket(intensities: &[f32]) -> usize {
    intensities
        .iter()
        .enumerate()
        .fold((0, f32::NEG_INFINITY), |best, (i, &v)| {
            if v > best.1 {
                (i, v)
            } else {
                best
            }
        })
        .0
}

#[test]
fn test_tone_lights_matching_bucket() {
    // 1024 bins from a 2048-point FFT are ~21.5 Hz wide; the usable 512 bins
    // form 10 buckets of 51, so 3 kHz lands in bin ~139, bucket 2.
    let mut pipeline = Pipeline::new(AnalysisConfig::default());
    let mut source = PlaybackSource::tone(3000.0, 0.8, 1.0, SAMPLE_RATE);

    let mut intensities = Vec::new();
    for _ in 0..10 {
        intensities = pipeline.step(&mut source, 1.0 / 60.0);
    }

    assert_eq!(loudest_bucket(&intensities), 2, "{:?}", intensities);
    assert!(intensities[2] > 0.0);
    assert!(intensities.iter().all(|&v| v <= 25.0));
}

#[test]
fn test_bass_tone_lights_first_bucket() {
    let mut pipeline = Pipeline::new(AnalysisConfig::default());
    let mut source = PlaybackSource::tone(100.0, 0.8, 1.0, SAMPLE_RATE);

    let mut intensities = Vec::new();
    for _ in 0..10 {
        intensities = pipeline.step(&mut source, 1.0 / 60.0);
    }

    assert_eq!(loudest_bucket(&intensities), 0, "{:?}", intensities);
}

#[test]
fn test_silence_after_tone_decays() {
    let config = AnalysisConfig {
        decay_rate: 30.0,
        ..Default::default()
    };
    let mut pipeline = Pipeline::new(config);

    let tone_len = SAMPLE_RATE as usize / 2;
    let mut samples: Vec<f32> = (0..tone_len)
        .map(|i| (2.0 * PI * 400.0 * i as f32 / SAMPLE_RATE as f32).sin() * 0.8)
        .collect();
    samples.extend(std::iter::repeat(0.0).take(SAMPLE_RATE as usize));
    let mut source = PlaybackSource::from_samples(samples, SAMPLE_RATE);

    let dt = 1.0 / 60.0;
    let mut peak: f32 = 0.0;
    for _ in 0..30 {
        let intensities = pipeline.step(&mut source, dt);
        peak = peak.max(intensities[0]);
    }
    assert!(peak > 0.0);

    // Once the window holds only silence the bars fall at decay_rate per second
    let mut last = Vec::new();
    for _ in 0..50 {
        last = pipeline.step(&mut source, dt);
    }
    assert!(last.iter().all(|&v| v.abs() < 1e-3), "{:?}", last);
}

#[test]
fn test_output_data_matches_played_samples() {
    let samples: Vec<f32> = (0..1000).map(|i| i as f32 / 1000.0).collect();
    let mut source = PlaybackSource::from_samples(samples.clone(), 1000);

    source.advance(0.5);
    let mut frame = vec![0.0; 100];
    source.output_data(&mut frame);

    assert_eq!(source.position(), 500);
    assert_eq!(frame.as_slice(), &samples[400..500]);
}
