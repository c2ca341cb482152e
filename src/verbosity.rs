//! Verbosity reduction for name announcements.
//!
//! A name change is only worth announcing when the rider stays on the new
//! road for a while. Short name segments between two real maneuvers, and
//! changes to a road with the same name, are downgraded to suppressed
//! steps. Nothing is merged or removed: the step sequence keeps its length
//! and every quantity stays where it was.

use tracing::debug;

use crate::collapse::utility::{
    has_lanes, has_turn_type, has_waypoint_type, have_same_mode, have_same_name, is_turn_type,
};
use crate::policy::GuidanceConfig;
use crate::types::invariants::assert_route_invariants;
use crate::types::{RouteStep, TurnType};

/// Suppress announcements of short name segments.
///
/// A `NewName` step is suppressed when it keeps the name of the last
/// announced step, or when the distance until the next real maneuver (or the
/// arrival) stays below `config.name_segment_cutoff_length`. Steps with lane
/// guidance or a different travel mode are always announced.
///
/// # Panics
///
/// Panics when a non-empty sequence violates the route invariants.
pub fn suppress_short_name_segments(steps: Vec<RouteStep>, config: &GuidanceConfig) -> Vec<RouteStep> {
    suppress_with_count(steps, config).0
}

/// Suppress and report the number of suppressed announcements.
pub(crate) fn suppress_with_count(
    mut steps: Vec<RouteStep>,
    config: &GuidanceConfig,
) -> (Vec<RouteStep>, usize) {
    if steps.is_empty() {
        return (steps, 0);
    }
    assert_route_invariants(&steps);

    let cutoff = config.name_segment_cutoff_length;
    let mut suppressed = 0;
    let mut last_announced = 0;
    let mut index = 1;

    while index < steps.len() {
        let step = &steps[index];
        if !has_turn_type(step) || is_turn_type(step, TurnType::Suppressed) {
            index += 1;
            continue;
        }

        let is_candidate = is_turn_type(step, TurnType::NewName)
            && have_same_mode(&steps[last_announced], step)
            && !has_lanes(step);
        if !is_candidate {
            last_announced = index;
            index += 1;
            continue;
        }

        if have_same_name(&steps[last_announced].signage, &step.signage) {
            steps[index].set_turn_type(TurnType::Suppressed);
            suppressed += 1;
            index += 1;
            continue;
        }

        // accumulate until the next maneuver that will be announced
        let name_step = index;
        let mut distance = steps[index].distance;
        index += 1;
        while index < steps.len()
            && distance < cutoff
            && !has_waypoint_type(&steps[index])
            && (!has_turn_type(&steps[index]) || is_turn_type(&steps[index], TurnType::Suppressed))
        {
            distance += steps[index].distance;
            index += 1;
        }

        if distance < cutoff {
            debug!(step = name_step, distance, cutoff, "suppressing short name segment");
            steps[name_step].set_turn_type(TurnType::Suppressed);
            suppressed += 1;
        } else {
            last_announced = name_step;
        }
    }

    (steps, suppressed)
}
