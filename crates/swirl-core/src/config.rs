use glam::Vec4;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid trail preset: {0}")]
    Invalid(String),
    #[error("failed to parse TOML preset: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("failed to parse JSON preset: {0}")]
    Json(#[from] serde_json::Error),
}

/// Tuning preset for one trail effect, fixed for the lifetime of a
/// simulator. The defaults reproduce the stock purple swirl.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrailConfig {
    pub name: String,
    /// Hard ceiling on live particles, enforced oldest-first.
    pub max_particles: usize,
    /// Base lifetime in frames; each particle gets uniform jitter on top.
    pub lifespan_frames: f32,
    pub lifespan_jitter: f32,
    /// Minimum pointer travel before trail points are emitted, and the
    /// spacing between points along a stroke.
    pub segment_length: f32,
    /// Stroke thickness; each dot renders at half this as its radius.
    pub line_width: f32,
    pub color_start: Vec4,
    pub color_end: Vec4,
    /// Fraction of the pointer displacement carried into initial velocity.
    pub swirl_intensity: f32,
    /// Per-frame multiplicative velocity decay.
    pub swirl_damping: f32,
    /// Width of the uniform sideways kick range, centered on zero.
    pub swirl_kick: f32,
}

impl Default for TrailConfig {
    fn default() -> Self {
        Self {
            name: "Swirl".into(),
            max_particles: 300,
            lifespan_frames: 60.0,
            lifespan_jitter: 20.0,
            segment_length: 2.0,
            line_width: 1.5,
            color_start: Vec4::new(200.0, 50.0, 255.0, 255.0) / 255.0,
            color_end: Vec4::new(100.0, 0.0, 150.0, 255.0) / 255.0,
            swirl_intensity: 0.4,
            swirl_damping: 0.9,
            swirl_kick: 4.0,
        }
    }
}

impl TrailConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_particles == 0 {
            return Err(ConfigError::Invalid("max_particles must be at least 1".into()));
        }
        if !(self.segment_length > 0.0) {
            return Err(ConfigError::Invalid("segment_length must be positive".into()));
        }
        if !(self.lifespan_frames > 0.0) {
            return Err(ConfigError::Invalid("lifespan_frames must be positive".into()));
        }
        if self.lifespan_jitter < 0.0 {
            return Err(ConfigError::Invalid("lifespan_jitter must not be negative".into()));
        }
        if !(self.line_width > 0.0) {
            return Err(ConfigError::Invalid("line_width must be positive".into()));
        }
        if !(self.swirl_damping > 0.0 && self.swirl_damping <= 1.0) {
            return Err(ConfigError::Invalid("swirl_damping must be in (0, 1]".into()));
        }
        Ok(())
    }
}
