//! Mapping from bucket intensity to visual quantities
//!
//! Only the numbers are produced here. Spawning, drawing and color blending
//! belong to the presentation layer.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

/// Vertical scale of a bar for the given intensity
pub fn bar_scale(intensity: f32) -> f32 {
    1.0 + intensity
}

/// Position between the low and high color, `0.0` low and `1.0` high
///
/// Not clamped: negative intensities land below the low color.
pub fn color_ratio(intensity: f32, max_intensity: f32) -> f32 {
    bar_scale(intensity) / max_intensity
}

/// Ring of evenly spaced objects on the XZ plane
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RingLayout {
    /// Distance of each object from the centre
    pub radius: f32,
}

impl Default for RingLayout {
    fn default() -> Self {
        Self { radius: 5.0 }
    }
}

impl RingLayout {
    /// Position of object `index` out of `count`
    pub fn position(&self, index: usize, count: usize) -> Vec3 {
        let angle = index as f32 * (TAU / count as f32);
        Vec3::new(angle.cos(), 0.0, angle.sin()) * self.radius
    }

    /// Positions of `count` objects, starting on the +X axis
    pub fn positions(&self, count: usize) -> Vec<Vec3> {
        (0..count).map(|i| self.position(i, count)).collect()
    }
}

/// Row of objects along +X, the first at the origin
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineLayout {
    /// Distance between neighbouring objects
    pub spacing: f32,
}

impl Default for LineLayout {
    fn default() -> Self {
        Self { spacing: 1.0 }
    }
}

impl LineLayout {
    /// Position of object `index`
    pub fn position(&self, index: usize) -> Vec3 {
        Vec3::X * (index as f32 * self.spacing)
    }

    /// Positions of `count` objects
    pub fn positions(&self, count: usize) -> Vec<Vec3> {
        (0..count).map(|i| self.position(i)).collect()
    }
}

/// Placement of the visual objects
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Layout {
    /// Evenly spaced around a circle
    Ring(RingLayout),
    /// Evenly spaced along a line
    Line(LineLayout),
}

impl Default for Layout {
    fn default() -> Self {
        Self::Ring(RingLayout::default())
    }
}

impl Layout {
    /// Positions of `count` objects in this layout
    pub fn positions(&self, count: usize) -> Vec<Vec3> {
        match self {
            Self::Ring(ring) => ring.positions(count),
            Self::Line(line) => line.positions(count),
        }
    }
}
