//! Fixed-rate offline frame loop

use crate::cli::ReportFormat;
use crate::report::{write_layout_header, FrameReport};
use anyhow::Result;
use std::io::Write;
use tracing::{debug, info};
use visualiser_core::{
    bar_scale, color_ratio, AudioAnalyzer, FrameSource, Layout, Settings, SpectrumAnalyzer,
    Spinner,
};

/// Totals of a finished render
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderSummary {
    /// Frames analysed
    pub frames: u64,
    /// Playback seconds covered
    pub elapsed: f64,
    /// Strongest intensity seen in any bucket, `None` when no frame ran
    pub peak_intensity: Option<f32>,
}

/// Everything one frame needs, allocated once
pub struct Renderer {
    analyzer: AudioAnalyzer,
    spectrum: SpectrumAnalyzer,
    spinner: Spinner,
    layout: Layout,
    frame_interval: f32,
    /// Last `2 * buffer_size` played samples; the waveform is its second half
    window_buf: Vec<f32>,
    spectrum_buf: Vec<f32>,
    scale_buf: Vec<f32>,
    color_buf: Vec<f32>,
}

impl Renderer {
    /// Build the pipeline described by `settings`
    pub fn new(settings: &Settings) -> Result<Self> {
        settings.validate()?;

        let buffer_size = settings.analysis.buffer_size;
        let bucket_count = settings.analysis.bucket_count;
        let analyzer = AudioAnalyzer::new(settings.analysis.clone())?;
        let spectrum = SpectrumAnalyzer::new(buffer_size)?;

        Ok(Self {
            analyzer,
            window_buf: vec![0.0; spectrum.fft_size()],
            spectrum_buf: vec![0.0; buffer_size],
            scale_buf: vec![0.0; bucket_count],
            color_buf: vec![0.0; bucket_count],
            spectrum,
            spinner: Spinner::from(settings.spinner),
            layout: settings.layout,
            frame_interval: settings.frame_interval(),
        })
    }

    /// Play `source` to the end (or `max_frames`), writing one report per frame
    pub fn run<S, W>(
        &mut self,
        source: &mut S,
        out: &mut W,
        format: ReportFormat,
        max_frames: Option<u64>,
    ) -> Result<RenderSummary>
    where
        S: FrameSource,
        W: Write,
    {
        let dt = self.frame_interval;
        let buffer_size = self.spectrum_buf.len();
        let max_intensity = self.analyzer.config().max_intensity;

        let mut frame: u64 = 0;
        let mut elapsed = 0.0f64;
        let mut rotation = 0.0f32;
        let mut peak_intensity: Option<f32> = None;

        info!(
            "Rendering at {:.1} fps, {} Hz source",
            1.0 / dt,
            source.sample_rate()
        );

        if format == ReportFormat::Text {
            write_layout_header(out, &self.layout, self.scale_buf.len())?;
        }

        while !source.is_finished() && max_frames.map_or(true, |max| frame < max) {
            source.advance(dt);
            elapsed += dt as f64;

            source.output_data(&mut self.window_buf);
            self.spectrum
                .process(&self.window_buf, &mut self.spectrum_buf)?;

            let waveform = &self.window_buf[self.window_buf.len() - buffer_size..];
            let output = self.analyzer.tick(waveform, &self.spectrum_buf, dt)?;

            for ((scale, color), &intensity) in self
                .scale_buf
                .iter_mut()
                .zip(self.color_buf.iter_mut())
                .zip(output.intensities)
            {
                *scale = bar_scale(intensity);
                *color = color_ratio(intensity, max_intensity);
                peak_intensity = Some(peak_intensity.map_or(intensity, |p| p.max(intensity)));
            }

            rotation = (rotation + self.spinner.tick(dt)) % 360.0;

            FrameReport::new(
                frame,
                elapsed,
                rotation,
                &output,
                &self.scale_buf,
                &self.color_buf,
            )
            .write_to(out, format)?;
            frame += 1;
        }

        out.flush()?;
        debug!("Render finished after {} frames", frame);

        Ok(RenderSummary {
            frames: frame,
            elapsed,
            peak_intensity,
        })
    }
}
