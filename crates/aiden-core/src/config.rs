//! Co-pilot configuration
//!
//! Defaults match the demo: 50M attachment, five candidate structures, a 15%
//! ROI benchmark, and strict step ordering. Values can be loaded from a TOML
//! file; every field is optional there.

use crate::error::ConfigError;
use crate::sampler::DEFAULT_STRUCTURE_COUNT;
use crate::types::{AttachmentPoint, DEFAULT_CVAR_PCT, DEFAULT_ROI_BENCHMARK_PCT};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Largest seed a TOML file can hold (TOML integers are signed 64-bit)
pub const MAX_SEED: u64 = i64::MAX.unsigned_abs();

/// How step ordering is enforced
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gating {
    /// Every step must follow the stage machine
    #[default]
    Strict,
    /// Only check that the artifacts a step reads exist
    Lenient,
}

/// Co-pilot configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoPilotConfig {
    /// Attachment the session starts at
    pub default_attachment: AttachmentPoint,
    /// Candidates drawn per optimization or what-if run
    pub structure_count: usize,
    /// ROI separating strong from weak structures
    pub roi_benchmark_pct: f64,
    /// CVaR reported for candidates without one
    pub default_cvar_pct: f64,
    /// Seed for the session random source; OS entropy when absent.
    /// At most [`MAX_SEED`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Step ordering enforcement
    pub gating: Gating,
}

impl CoPilotConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With a fixed random seed
    #[inline]
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// With gating mode
    #[inline]
    #[must_use]
    pub fn with_gating(mut self, gating: Gating) -> Self {
        self.gating = gating;
        self
    }

    /// With candidates per run
    #[inline]
    #[must_use]
    pub fn with_structure_count(mut self, count: usize) -> Self {
        self.structure_count = count;
        self
    }

    /// With starting attachment
    #[inline]
    #[must_use]
    pub fn with_default_attachment(mut self, attachment: AttachmentPoint) -> Self {
        self.default_attachment = attachment;
        self
    }

    /// With ROI benchmark
    #[inline]
    #[must_use]
    pub fn with_roi_benchmark(mut self, benchmark_pct: f64) -> Self {
        self.roi_benchmark_pct = benchmark_pct;
        self
    }

    /// Parse and validate TOML text
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse, and validate a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Render as TOML; fails for a seed above [`MAX_SEED`]
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Invalid(e.to_string()))
    }

    /// Reject values the pipeline cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.structure_count == 0 {
            return Err(ConfigError::Invalid(
                "structure_count must be at least 1".to_string(),
            ));
        }
        if self.seed.is_some_and(|seed| seed > MAX_SEED) {
            return Err(ConfigError::Invalid(format!("seed must be at most {MAX_SEED}")));
        }
        if !self.roi_benchmark_pct.is_finite() {
            return Err(ConfigError::Invalid(
                "roi_benchmark_pct must be finite".to_string(),
            ));
        }
        if !self.default_cvar_pct.is_finite() || self.default_cvar_pct < 0.0 {
            return Err(ConfigError::Invalid(
                "default_cvar_pct must be a non-negative number".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for CoPilotConfig {
    fn default() -> Self {
        Self {
            default_attachment: AttachmentPoint::DEFAULT,
            structure_count: DEFAULT_STRUCTURE_COUNT,
            roi_benchmark_pct: DEFAULT_ROI_BENCHMARK_PCT,
            default_cvar_pct: DEFAULT_CVAR_PCT,
            seed: None,
            gating: Gating::Strict,
        }
    }
}
