//! # guidance-kernel
//!
//! Deterministic post-processing of route steps into rider-facing turn
//! instructions.
//!
//! A route leg arrives as a sequence of steps, one per maneuver found by
//! the router. Many of them are not perceived as separate maneuvers: a
//! zig-zag across an offset junction, a u-turn split into two left turns,
//! a bridge that briefly carries another name. The kernel merges such
//! steps and silences name announcements that are not worth hearing.
//!
//! ## Architecture
//!
//! ```text
//! RouteStep[] → collapse_turn_instructions → suppress_short_name_segments → RouteStep[]
//!                       ↓                              ↓
//!               scenario detection             name segment lengths
//!               merge strategies
//! ```
//!
//! ## Guarantees
//!
//! - Depart and arrive waypoints stay first and last
//! - Distance, duration and weight are conserved across merges
//! - Roundabout instructions are never merged
//! - Same steps + same configuration → identical output

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod types;
pub mod bearing;
pub mod names;
pub mod policy;
pub mod canonical;
pub mod collapse;
pub mod verbosity;
pub mod processor;

// Re-exports
pub use types::{
    DirectionModifier, Intersection, LaneTuple, NameId, RouteStep, Signage, StepManeuver,
    StepState, TravelMode, TurnInstruction, TurnType, WaypointType, EMPTY_NAMEID,
};
pub use types::{check_route_invariants, InvariantViolation};
pub use policy::{ConfigError, GuidanceConfig};
pub use collapse::{
    classify, collapse_turn_instructions, combine_route_steps, find_total_turn_angle,
    suppress_step, CollapseWindow, DonorPosition, LaneStrategy, Scenario, SignageStrategy,
    TurnStrategy, COLLAPSE_PRIORITY,
};
pub use verbosity::suppress_short_name_segments;
pub use processor::{GuidanceProcessor, ProcessedRoute, ProcessingSummary};
pub use names::requires_name_announced;
pub use canonical::{to_canonical_bytes, canonical_hash, canonical_hash_hex};

/// Default configuration version identifier.
pub const DEFAULT_CONFIG_VERSION: &str = "guidance_config_v1";
