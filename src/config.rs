//! Renderer and warp transition settings
//!
//! Everything has a default, so an empty JSON object (or no config at all)
//! yields the stock landing-page look.

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

/// Top-level configuration
#[derive(Debug, Default, Deserialize, Clone, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub starfield: StarfieldConfig,

    #[serde(default)]
    pub warp: WarpConfig,
}

/// Star field density, projection and frame pacing
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct StarfieldConfig {
    /// Stars per 10,000 px² divided by 3 (default: 2.0, ~1 star per 1,667 px²)
    #[serde(default = "default_density")]
    pub density: f64,

    /// Hard cap on the star count regardless of viewport area
    #[serde(default = "default_max_stars")]
    pub max_stars: usize,

    /// Perspective scale factor
    #[serde(default = "default_focal_length")]
    pub focal_length: f64,

    /// Largest frame delta in seconds fed to the simulation after a stall
    #[serde(default = "default_max_frame_dt")]
    pub max_frame_dt: f64,

    /// Fixed RNG seed. Unset means entropy-seeded.
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Caller-side warp ramp
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct WarpConfig {
    #[serde(default = "default_start_speed")]
    pub start_speed: f64,

    #[serde(default = "default_target_speed")]
    pub target_speed: f64,

    #[serde(default = "default_duration_secs")]
    pub duration_secs: f64,
}

fn default_density() -> f64 {
    2.0
}
fn default_max_stars() -> usize {
    4500
}
fn default_focal_length() -> f64 {
    200.0
}
fn default_max_frame_dt() -> f64 {
    0.05
}
fn default_start_speed() -> f64 {
    1.01
}
fn default_target_speed() -> f64 {
    500.0
}
fn default_duration_secs() -> f64 {
    3.0
}

impl Default for StarfieldConfig {
    fn default() -> Self {
        Self {
            density: default_density(),
            max_stars: default_max_stars(),
            focal_length: default_focal_length(),
            max_frame_dt: default_max_frame_dt(),
            seed: None,
        }
    }
}

impl Default for WarpConfig {
    fn default() -> Self {
        Self {
            start_speed: default_start_speed(),
            target_speed: default_target_speed(),
            duration_secs: default_duration_secs(),
        }
    }
}

impl Config {
    /// Parse and validate a JSON document
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn validate(&self) -> Result<()> {
        let s = &self.starfield;
        if !(s.density.is_finite() && s.density > 0.0) {
            return Err(Error::InvalidValue(format!("density must be > 0, got {}", s.density)));
        }
        if !(s.focal_length.is_finite() && s.focal_length > 0.0) {
            return Err(Error::InvalidValue(format!(
                "focal_length must be > 0, got {}",
                s.focal_length
            )));
        }
        if !(s.max_frame_dt.is_finite() && s.max_frame_dt > 0.0) {
            return Err(Error::InvalidValue(format!(
                "max_frame_dt must be > 0, got {}",
                s.max_frame_dt
            )));
        }

        let w = &self.warp;
        if !(w.start_speed > 0.0 && w.start_speed < w.target_speed && w.target_speed.is_finite()) {
            return Err(Error::InvalidValue(format!(
                "warp needs 0 < start_speed < target_speed, got {} -> {}",
                w.start_speed, w.target_speed
            )));
        }
        if !(w.duration_secs.is_finite() && w.duration_secs > 0.0) {
            return Err(Error::InvalidValue(format!(
                "duration_secs must be > 0, got {}",
                w.duration_secs
            )));
        }
        Ok(())
    }
}
