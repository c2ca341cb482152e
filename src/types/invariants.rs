//! Structural invariants of a route step sequence.
//!
//! Upstream collaborators must hand over sequences that pass these checks.
//! A violation is a defect in the producer; the pipelines treat it as fatal.

use super::instruction::{TurnType, WaypointType};
use super::step::RouteStep;

/// A broken structural invariant.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InvariantViolation {
    /// Fewer than two steps.
    #[error("route has {0} steps, at least depart and arrive are required")]
    TooShort(usize),
    /// First or last step is not a waypoint sentinel.
    #[error("step {index} must be a {expected:?} waypoint without turn, found {found:?}/{turn_type:?}")]
    MissingSentinel {
        /// Position of the offending step.
        index: usize,
        /// Expected waypoint type.
        expected: WaypointType,
        /// Waypoint type found.
        found: WaypointType,
        /// Turn type found.
        turn_type: TurnType,
    },
    /// A step without any intersection.
    #[error("step {0} has no intersections")]
    NoIntersections(usize),
    /// `bearings` and `entry` differ in length.
    #[error("step {step} intersection {intersection}: {bearings} bearings but {entries} entry flags")]
    EntryMismatch {
        /// Step index.
        step: usize,
        /// Intersection index within the step.
        intersection: usize,
        /// Number of bearings.
        bearings: usize,
        /// Number of entry flags.
        entries: usize,
    },
    /// `in`/`out` index outside the bearings.
    #[error("step {step} intersection {intersection}: in/out index ({in_index}, {out_index}) outside {bearings} bearings")]
    IndexOutOfRange {
        /// Step index.
        step: usize,
        /// Intersection index within the step.
        intersection: usize,
        /// Incoming index.
        in_index: usize,
        /// Outgoing index.
        out_index: usize,
        /// Number of bearings.
        bearings: usize,
    },
    /// Negative or non-finite distance, duration or weight.
    #[error("step {0} has a negative or non-finite distance, duration or weight")]
    InvalidQuantity(usize),
}

/// Check a step sequence against the structural invariants.
pub fn check_route_invariants(steps: &[RouteStep]) -> Result<(), InvariantViolation> {
    if steps.len() < 2 {
        return Err(InvariantViolation::TooShort(steps.len()));
    }

    let last = steps.len() - 1;
    for (index, expected) in [(0, WaypointType::Depart), (last, WaypointType::Arrive)] {
        let step = &steps[index];
        let is_sentinel = step.maneuver.waypoint_type == expected
            && step.turn_type() == TurnType::NoTurn;
        if !is_sentinel {
            return Err(InvariantViolation::MissingSentinel {
                index,
                expected,
                found: step.maneuver.waypoint_type,
                turn_type: step.turn_type(),
            });
        }
    }

    for (index, step) in steps.iter().enumerate() {
        let quantities = [step.distance, step.duration, step.weight];
        if quantities.iter().any(|q| !q.is_finite() || *q < 0.0) {
            return Err(InvariantViolation::InvalidQuantity(index));
        }

        if step.intersections.is_empty() {
            return Err(InvariantViolation::NoIntersections(index));
        }

        for (position, intersection) in step.intersections.iter().enumerate() {
            let bearings = intersection.bearings.len();
            if intersection.entry.len() != bearings {
                return Err(InvariantViolation::EntryMismatch {
                    step: index,
                    intersection: position,
                    bearings,
                    entries: intersection.entry.len(),
                });
            }
            if intersection.in_index >= bearings || intersection.out_index >= bearings {
                return Err(InvariantViolation::IndexOutOfRange {
                    step: index,
                    intersection: position,
                    in_index: intersection.in_index,
                    out_index: intersection.out_index,
                    bearings,
                });
            }
        }
    }

    Ok(())
}

/// Check the invariants and abort on violation.
///
/// # Panics
/// Panics when the sequence is malformed.
pub(crate) fn assert_route_invariants(steps: &[RouteStep]) {
    if let Err(violation) = check_route_invariants(steps) {
        tracing::error!(
            violation = %violation,
            steps = steps.len(),
            "ROUTE_INVARIANT_VIOLATION: malformed route steps from upstream"
        );
        panic!("malformed route steps: {violation}");
    }
}
