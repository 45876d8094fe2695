//! Constant-rate rotation

use serde::{Deserialize, Serialize};

/// Spinner settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpinnerConfig {
    /// Angular speed in degrees per second
    pub rotation_speed: f32,
}

impl Default for SpinnerConfig {
    fn default() -> Self {
        Self {
            rotation_speed: 5.0,
        }
    }
}

/// Turns elapsed time into a rotation about a fixed axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spinner {
    rotation_speed: f32,
}

impl Default for Spinner {
    fn default() -> Self {
        SpinnerConfig::default().into()
    }
}

impl From<SpinnerConfig> for Spinner {
    fn from(config: SpinnerConfig) -> Self {
        Self::new(config.rotation_speed)
    }
}

impl Spinner {
    /// Create a spinner turning at `rotation_speed` degrees per second
    pub fn new(rotation_speed: f32) -> Self {
        Self { rotation_speed }
    }

    /// Angle to rotate by this frame
    pub fn tick(&self, delta_time: f32) -> f32 {
        self.rotation_speed * delta_time
    }

    /// Configured speed
    pub fn rotation_speed(&self) -> f32 {
        self.rotation_speed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_scales_with_time() {
        let spinner = Spinner::new(90.0);
        assert_eq!(spinner.tick(0.5), 45.0);
        assert_eq!(spinner.tick(0.0), 0.0);
    }

    #[test]
    fn test_default_speed() {
        let spinner = Spinner::default();
        assert_eq!(spinner.rotation_speed(), 5.0);
        assert!((spinner.tick(2.0) - 10.0).abs() < f32::EPSILON);
    }
}
