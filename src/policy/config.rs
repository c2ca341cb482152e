//! Guidance configuration: thresholds used by collapsing and verbosity reduction.
//!
//! ## Float Normalization for Deterministic Hashing
//!
//! Thresholds are quantized to integers before hashing (multiply by
//! 1,000,000 and round to i64), so the same configuration always yields the
//! same `params_hash` regardless of float formatting.

use serde::{Deserialize, Serialize};
use crate::canonical::canonical_hash_hex;
use crate::DEFAULT_CONFIG_VERSION;

/// Quantization factor for float normalization.
const FLOAT_QUANTIZATION_FACTOR: f64 = 1_000_000.0;

/// Error type for configuration handling.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A threshold is negative, NaN or infinite.
    #[error("Invalid threshold {name}: {value}")]
    InvalidThreshold {
        /// Name of the offending field.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },
    /// The configuration could not be parsed.
    #[error("Malformed configuration: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Quantized parameters for deterministic hashing.
#[derive(Debug, Clone, Serialize)]
struct QuantizedConfigParams {
    version: String,
    max_collapse_distance: i64,
    max_staggered_distance: i64,
    max_link_road_length: i64,
    name_segment_cutoff_length: i64,
    max_uturn_deviation: i64,
}

/// Quantize a float to an i64 for deterministic hashing.
fn quantize_float(value: f64) -> i64 {
    (value * FLOAT_QUANTIZATION_FACTOR).round() as i64
}

/// Thresholds for turn collapsing and verbosity reduction.
///
/// ## Parameters
///
/// - `max_collapse_distance`: Steps up to this length (m) count as short
/// - `max_staggered_distance`: Longest offset (m) of a staggered intersection
/// - `max_link_road_length`: Longest unnamed connector (m) treated as link road
/// - `name_segment_cutoff_length`: Name segments shorter than this (m) are not announced
/// - `max_uturn_deviation`: Tolerance (degrees) around a perfect reversal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuidanceConfig {
    /// Configuration version identifier.
    pub version: String,
    /// Maximum length of a collapsable step in meters.
    pub max_collapse_distance: f64,
    /// Maximum offset of a staggered intersection in meters.
    pub max_staggered_distance: f64,
    /// Maximum length of a link road in meters.
    pub max_link_road_length: f64,
    /// Minimum length for a name segment to be announced, in meters.
    pub name_segment_cutoff_length: f64,
    /// Allowed deviation from a perfect u-turn in degrees.
    pub max_uturn_deviation: f64,
}

impl GuidanceConfig {
    /// Create a configuration with custom thresholds.
    pub fn new(
        max_collapse_distance: f64,
        max_staggered_distance: f64,
        max_link_road_length: f64,
        name_segment_cutoff_length: f64,
        max_uturn_deviation: f64,
    ) -> Self {
        Self {
            version: DEFAULT_CONFIG_VERSION.to_string(),
            max_collapse_distance,
            max_staggered_distance,
            max_link_road_length,
            name_segment_cutoff_length,
            max_uturn_deviation,
        }
    }

    /// Replace the name segment cutoff.
    pub fn with_name_segment_cutoff(mut self, cutoff: f64) -> Self {
        self.name_segment_cutoff_length = cutoff;
        self
    }

    /// Parse and validate a JSON configuration. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject negative or non-finite thresholds.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let thresholds = [
            ("max_collapse_distance", self.max_collapse_distance),
            ("max_staggered_distance", self.max_staggered_distance),
            ("max_link_road_length", self.max_link_road_length),
            ("name_segment_cutoff_length", self.name_segment_cutoff_length),
            ("max_uturn_deviation", self.max_uturn_deviation),
        ];

        match thresholds
            .into_iter()
            .find(|(_, value)| !value.is_finite() || *value < 0.0)
        {
            Some((name, value)) => Err(ConfigError::InvalidThreshold { name, value }),
            None => Ok(()),
        }
    }

    /// Get the configuration ID.
    pub fn config_id(&self) -> &str {
        &self.version
    }

    /// Compute a hash of the configuration parameters.
    pub fn params_hash(&self) -> String {
        canonical_hash_hex(&self.to_quantized())
    }

    fn to_quantized(&self) -> QuantizedConfigParams {
        QuantizedConfigParams {
            version: self.version.clone(),
            max_collapse_distance: quantize_float(self.max_collapse_distance),
            max_staggered_distance: quantize_float(self.max_staggered_distance),
            max_link_road_length: quantize_float(self.max_link_road_length),
            name_segment_cutoff_length: quantize_float(self.name_segment_cutoff_length),
            max_uturn_deviation: quantize_float(self.max_uturn_deviation),
        }
    }
}

impl Default for GuidanceConfig {
    fn default() -> Self {
        Self {
            version: DEFAULT_CONFIG_VERSION.to_string(),
            max_collapse_distance: 30.0,
            max_staggered_distance: 3.0,
            max_link_road_length: 60.0,
            name_segment_cutoff_length: 105.0,
            max_uturn_deviation: 35.0,
        }
    }
}
