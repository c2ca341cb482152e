//! Guidance post-processing pipeline.
//!
//! Runs turn collapsing followed by verbosity reduction over one route leg
//! and reports what changed.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::collapse::collapse_with_count;
use crate::policy::{ConfigError, GuidanceConfig};
use crate::types::RouteStep;
use crate::verbosity::suppress_with_count;

/// Counters describing one processing run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessingSummary {
    /// Steps handed in.
    pub input_steps: usize,
    /// Steps handed out.
    pub output_steps: usize,
    /// Number of steps absorbed into a neighbor.
    pub merges: usize,
    /// Number of name announcements downgraded to suppressed.
    pub suppressed_announcements: usize,
    /// Parameter hash of the configuration used.
    pub config_params_hash: String,
}

/// A processed route leg.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessedRoute {
    /// The resulting steps.
    pub steps: Vec<RouteStep>,
    /// What the run did.
    pub summary: ProcessingSummary,
}

impl ProcessedRoute {
    /// Take the steps.
    pub fn into_steps(self) -> Vec<RouteStep> {
        self.steps
    }
}

/// Applies the guidance post-processing to route legs.
///
/// ## Pipeline
///
/// 1. Collapse turn instructions (merges steps)
/// 2. Suppress short name segments (retypes steps)
///
/// The processor is stateless between legs. Identical input and
/// configuration always produce identical output.
#[derive(Debug, Clone, Default)]
pub struct GuidanceProcessor {
    config: GuidanceConfig,
}

impl GuidanceProcessor {
    /// Create a processor after validating the configuration.
    pub fn new(config: GuidanceConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The configuration in use.
    pub fn config(&self) -> &GuidanceConfig {
        &self.config
    }

    /// Process one route leg.
    ///
    /// # Panics
    ///
    /// Panics when the steps violate the route invariants.
    pub fn process(&self, steps: Vec<RouteStep>) -> ProcessedRoute {
        let input_steps = steps.len();
        let (steps, merges) = collapse_with_count(steps, &self.config);
        let (steps, suppressed_announcements) = suppress_with_count(steps, &self.config);

        let summary = ProcessingSummary {
            input_steps,
            output_steps: steps.len(),
            merges,
            suppressed_announcements,
            config_params_hash: self.config.params_hash(),
        };
        debug!(
            input_steps,
            output_steps = summary.output_steps,
            merges,
            suppressed_announcements,
            config = %self.config.config_id(),
            "processed route guidance"
        );

        ProcessedRoute { steps, summary }
    }
}
