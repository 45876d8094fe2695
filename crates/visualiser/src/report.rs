//! Per-frame reports written to stdout

use crate::cli::ReportFormat;
use serde::Serialize;
use std::io::Write;
use visualiser_core::{Layout, TickOutput};

/// Snapshot of one analysed frame
#[derive(Debug, Clone, Serialize)]
pub struct FrameReport<'a> {
    /// Frame index from zero
    pub frame: u64,
    /// Playback time in seconds
    pub time: f64,
    /// RMS amplitude
    pub rms: f32,
    /// Decibel level; `null` in JSON for silence
    pub db: f32,
    /// Accumulated ring rotation in degrees
    pub rotation: f32,
    /// Bucket intensities
    pub intensities: &'a [f32],
    /// Bar Y scale per bucket
    pub scales: &'a [f32],
    /// Low-to-high color ratio per bucket
    pub colors: &'a [f32],
}

impl<'a> FrameReport<'a> {
    /// Build a report from an analyzer tick and its derived bar values
    pub fn new(
        frame: u64,
        time: f64,
        rotation: f32,
        output: &TickOutput<'a>,
        scales: &'a [f32],
        colors: &'a [f32],
    ) -> Self {
        Self {
            frame,
            time,
            rms: output.rms(),
            db: output.db(),
            rotation,
            intensities: output.intensities,
            scales,
            colors,
        }
    }

    /// Write the report as one line
    ///
    /// Text lines carry the intensities; scales and colors are JSON only.
    pub fn write_to<W: Write>(&self, out: &mut W, format: ReportFormat) -> anyhow::Result<()> {
        match format {
            ReportFormat::Text => {
                write!(
                    out,
                    "{:>6} {:>8.3}s rms={:.4} db={:>7.2} rot={:>7.2} |",
                    self.frame, self.time, self.rms, self.db, self.rotation
                )?;
                for value in self.intensities {
                    write!(out, " {:>6.2}", value)?;
                }
                writeln!(out)?;
            }
            ReportFormat::Json => {
                serde_json::to_writer(&mut *out, self)?;
                writeln!(out)?;
            }
        }
        Ok(())
    }
}

/// Write the object positions as a `#` comment line ahead of text reports
pub fn write_layout_header<W: Write>(
    out: &mut W,
    layout: &Layout,
    count: usize,
) -> anyhow::Result<()> {
    match layout {
        Layout::Ring(ring) => write!(out, "# ring radius={:.2}:", ring.radius)?,
        Layout::Line(line) => write!(out, "# line spacing={:.2}:", line.spacing)?,
    }
    for position in layout.positions(count) {
        write!(out, " ({:.2}, {:.2})", position.x, position.z)?;
    }
    writeln!(out)?;
    Ok(())
}
