//! Shared helpers for navigating and comparing route steps.

use crate::bearing::{angle_between, reverse};
use crate::names::requires_name_announced;
use crate::types::{RouteStep, Signage, TurnType, WaypointType};

/// Turn angle of the maneuver at the start of the step.
pub fn turn_angle(step: &RouteStep) -> f64 {
    let intersection = step.front_intersection();
    angle_between(reverse(intersection.in_bearing()), intersection.out_bearing())
}

/// Whether the step carries any turn type at all.
pub fn has_turn_type(step: &RouteStep) -> bool {
    step.turn_type() != TurnType::NoTurn
}

/// Whether the step is a waypoint (depart, arrive, via).
pub fn has_waypoint_type(step: &RouteStep) -> bool {
    step.maneuver.waypoint_type != WaypointType::None
}

/// Whether the step carries the given turn type.
pub fn is_turn_type(step: &RouteStep, turn_type: TurnType) -> bool {
    step.turn_type() == turn_type
}

/// Index of the closest earlier step with a turn or waypoint type.
///
/// The first step must be a waypoint, which bounds the search.
pub fn find_previous_turn(steps: &[RouteStep], current: usize) -> usize {
    debug_assert!(!has_waypoint_type(&steps[current]));
    let mut index = current;
    loop {
        index -= 1;
        if has_turn_type(&steps[index]) || has_waypoint_type(&steps[index]) {
            return index;
        }
    }
}

/// Index of the closest later step with a turn or waypoint type.
///
/// The last step must be a waypoint, which bounds the search.
pub fn find_next_turn(steps: &[RouteStep], current: usize) -> usize {
    debug_assert!(!has_waypoint_type(&steps[current]));
    let mut index = current;
    loop {
        index += 1;
        if has_turn_type(&steps[index]) || has_waypoint_type(&steps[index]) {
            return index;
        }
    }
}

/// Number of roads at the maneuver intersection.
pub fn number_of_available_turns(step: &RouteStep) -> usize {
    step.front_intersection().available_turns()
}

/// Number of roads that may be entered at the maneuver intersection.
pub fn number_of_allowed_turns(step: &RouteStep) -> usize {
    step.front_intersection().allowed_turns()
}

/// A suppressed pause on a road without any alternative, e.g. a traffic light.
pub fn is_traffic_light_step(step: &RouteStep) -> bool {
    is_turn_type(step, TurnType::Suppressed) && number_of_available_turns(step) == 2
}

/// Whether the maneuver intersection has lane guidance.
pub fn has_lanes(step: &RouteStep) -> bool {
    step.front_intersection().has_lanes()
}

/// Whether both steps use the same travel mode.
pub fn have_same_mode(lhs: &RouteStep, rhs: &RouteStep) -> bool {
    lhs.mode == rhs.mode
}

/// Whether two signage records name the same road.
///
/// Unnamed roads never match anything, not even each other.
pub fn have_same_name(lhs: &Signage, rhs: &Signage) -> bool {
    if lhs.is_unnamed() || rhs.is_unnamed() {
        false
    } else if lhs.name_id == rhs.name_id {
        true
    } else {
        !requires_name_announced(lhs, rhs)
    }
}

/// Mutable access to two distinct steps at once.
pub(crate) fn pair_mut(
    steps: &mut [RouteStep],
    first: usize,
    second: usize,
) -> (&mut RouteStep, &mut RouteStep) {
    assert_ne!(first, second, "cannot pair a step with itself");
    if first < second {
        let (head, tail) = steps.split_at_mut(second);
        (&mut head[first], &mut tail[0])
    } else {
        let (head, tail) = steps.split_at_mut(first);
        (&mut tail[0], &mut head[second])
    }
}
