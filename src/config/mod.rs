//! Run configuration with YAML loading and validation.
//!
//! Mistakes are caught at load time:
//! - Type-safe configuration structs
//! - Unknown keys rejected by serde
//! - Ranges checked by `validator`

use serde::{Deserialize, Serialize};
use std::path::Path;
use validator::Validate;

use crate::error::{PiError, PiResult};

/// Default number of points per run.
pub const DEFAULT_POINTS: u64 = 1000;
/// Default number of points drawn per frame.
pub const DEFAULT_POINTS_PER_FRAME: u64 = 10;
/// Default side length of the drawing surface.
pub const DEFAULT_CANVAS_SIZE: f64 = 400.0;
/// Default number of points drawn for effect by an instant run.
pub const DEFAULT_INSTANT_SAMPLE_CAP: u64 = 5000;

/// Configuration of a π estimation session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct PiConfig {
    /// Points sampled per run.
    #[validate(range(min = 1))]
    #[serde(default = "default_points")]
    pub points: u64,

    /// Points drawn per animation frame.
    #[validate(range(min = 1))]
    #[serde(default = "default_points_per_frame")]
    pub points_per_frame: u64,

    /// Side length of the square drawing surface.
    #[validate(range(min = 1.0, max = 10_000.0))]
    #[serde(default = "default_canvas_size")]
    pub canvas_size: f64,

    /// Upper bound on points drawn by an instant run.
    #[validate(range(max = 1_000_000))]
    #[serde(default = "default_instant_sample_cap")]
    pub instant_sample_cap: u64,

    /// Master seed; absent means OS entropy.
    #[serde(default)]
    pub seed: Option<u64>,
}

const fn default_points() -> u64 {
    DEFAULT_POINTS
}

const fn default_points_per_frame() -> u64 {
    DEFAULT_POINTS_PER_FRAME
}

const fn default_canvas_size() -> f64 {
    DEFAULT_CANVAS_SIZE
}

const fn default_instant_sample_cap() -> u64 {
    DEFAULT_INSTANT_SAMPLE_CAP
}

impl Default for PiConfig {
    fn default() -> Self {
        Self {
            points: DEFAULT_POINTS,
            points_per_frame: DEFAULT_POINTS_PER_FRAME,
            canvas_size: DEFAULT_CANVAS_SIZE,
            instant_sample_cap: DEFAULT_INSTANT_SAMPLE_CAP,
            seed: None,
        }
    }
}

impl PiConfig {
    /// Load configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File cannot be read
    /// - YAML parsing fails
    /// - Validation fails
    pub fn load<P: AsRef<Path>>(path: P) -> PiResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns error if parsing or validation fails.
    pub fn from_yaml(yaml: &str) -> PiResult<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.check()?;
        Ok(config)
    }

    /// Run all validation.
    ///
    /// # Errors
    ///
    /// Returns `PiError::Validation` for range violations and
    /// `PiError::Config` for non-finite sizes.
    pub fn check(&self) -> PiResult<()> {
        self.validate()?;
        if !self.canvas_size.is_finite() {
            return Err(PiError::config("canvas_size must be finite"));
        }
        Ok(())
    }

    /// Serialize back to YAML.
    ///
    /// # Errors
    ///
    /// Returns error if serialization fails.
    pub fn to_yaml(&self) -> PiResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Create a builder for configuration.
    #[must_use]
    pub fn builder() -> PiConfigBuilder {
        PiConfigBuilder::default()
    }
}

/// Configuration builder for programmatic construction.
#[derive(Debug, Default)]
pub struct PiConfigBuilder {
    points: Option<u64>,
    points_per_frame: Option<u64>,
    canvas_size: Option<f64>,
    instant_sample_cap: Option<u64>,
    seed: Option<u64>,
}

impl PiConfigBuilder {
    /// Set the points per run.
    #[must_use]
    pub const fn points(mut self, points: u64) -> Self {
        self.points = Some(points);
        self
    }

    /// Set the points drawn per frame.
    #[must_use]
    pub const fn points_per_frame(mut self, points_per_frame: u64) -> Self {
        self.points_per_frame = Some(points_per_frame);
        self
    }

    /// Set the drawing surface side length.
    #[must_use]
    pub const fn canvas_size(mut self, size: f64) -> Self {
        self.canvas_size = Some(size);
        self
    }

    /// Set the instant-mode drawing cap.
    #[must_use]
    pub const fn instant_sample_cap(mut self, cap: u64) -> Self {
        self.instant_sample_cap = Some(cap);
        self
    }

    /// Set the random seed.
    #[must_use]
    pub const fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Build the configuration.
    #[must_use]
    pub fn build(self) -> PiConfig {
        let defaults = PiConfig::default();
        PiConfig {
            points: self.points.unwrap_or(defaults.points),
            points_per_frame: self.points_per_frame.unwrap_or(defaults.points_per_frame),
            canvas_size: self.canvas_size.unwrap_or(defaults.canvas_size),
            instant_sample_cap: self
                .instant_sample_cap
                .unwrap_or(defaults.instant_sample_cap),
            seed: self.seed.or(defaults.seed),
        }
    }
}
