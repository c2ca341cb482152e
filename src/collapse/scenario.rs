//! Detection of collapsable scenarios.
//!
//! Every predicate looks at a small window of active steps around a
//! candidate intersection:
//!
//! ```text
//!   prior ──▶ entering ──▶ leaving
//!             (current)     (next)
//! ```
//!
//! `prior` is the last real turn before the candidate, `entering` the step
//! whose maneuver is the candidate and `leaving` the next real turn. The
//! predicates are pure. The pipeline evaluates them in the order of
//! [`COLLAPSE_PRIORITY`] and acts on the first match.

use std::fmt;

use crate::bearing::{bearings_are_reversed, reverse};
use crate::policy::GuidanceConfig;
use crate::types::{DirectionModifier, RouteStep, TurnType};

use super::utility::{
    has_turn_type, have_same_mode, have_same_name, is_turn_type, number_of_allowed_turns,
    turn_angle,
};

/// The three steps around a candidate intersection.
#[derive(Debug, Clone, Copy)]
pub struct CollapseWindow<'a> {
    /// Last real turn before the candidate.
    pub prior: &'a RouteStep,
    /// Step starting at the candidate intersection.
    pub entering: &'a RouteStep,
    /// Next real turn after the candidate.
    pub leaving: &'a RouteStep,
}

impl<'a> CollapseWindow<'a> {
    /// Create a window.
    pub fn new(prior: &'a RouteStep, entering: &'a RouteStep, leaving: &'a RouteStep) -> Self {
        Self {
            prior,
            entering,
            leaving,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Helper predicates
// ─────────────────────────────────────────────────────────────────────────────

/// No roundabout instruction in the window and a single travel mode.
pub fn basic_preconditions(window: &[&RouteStep]) -> bool {
    let Some(first) = window.first() else {
        return true;
    };
    window.iter().all(|step| {
        !step.turn_type().is_roundabout() && have_same_mode(first, step)
    })
}

/// All intersections after the maneuver offer no choice.
pub fn no_intermediary_choices(step: &RouteStep) -> bool {
    step.intersections
        .iter()
        .skip(1)
        .all(|intersection| intersection.available_turns() == 2)
}

/// A short step without any choice along the way.
pub fn is_collapsable_segment(step: &RouteStep, config: &GuidanceConfig) -> bool {
    step.distance <= config.max_collapse_distance && no_intermediary_choices(step)
}

/// A short unnamed connector road.
pub fn is_link_road(step: &RouteStep, config: &GuidanceConfig) -> bool {
    step.distance <= config.max_link_road_length
        && step.signage.is_unnamed()
        && no_intermediary_choices(step)
}

/// A name change, or a turn that is only a name change in disguise.
pub fn is_name_change_like(step: &RouteStep) -> bool {
    let straight = step.instruction().direction_modifier == DirectionModifier::Straight;
    is_turn_type(step, TurnType::NewName)
        || ((is_turn_type(step, TurnType::Turn) || is_turn_type(step, TurnType::Continue))
            && straight)
}

/// An announced maneuver that changes direction.
pub fn is_announced_maneuver(step: &RouteStep) -> bool {
    has_turn_type(step) && !is_turn_type(step, TurnType::Suppressed) && !is_name_change_like(step)
}

/// Both maneuvers point to the same side of the road.
pub fn keeps_side(lhs: &RouteStep, rhs: &RouteStep) -> bool {
    let lhs = lhs.instruction().direction_modifier;
    let rhs = rhs.instruction().direction_modifier;
    (lhs.is_left() && rhs.is_left()) || (lhs.is_right() && rhs.is_right())
}

fn is_straight(step: &RouteStep) -> bool {
    step.instruction().direction_modifier == DirectionModifier::Straight
}

// ─────────────────────────────────────────────────────────────────────────────
// Scenario predicates
// ─────────────────────────────────────────────────────────────────────────────

/// Two opposite turns of roughly 90° in quick succession.
///
/// ```text
///      * -> b      a -> *
///      |       or       |       becomes  a   ->   b
/// a -> *                * -> b
/// ```
pub fn is_staggered_intersection(window: &CollapseWindow<'_>, config: &GuidanceConfig) -> bool {
    let CollapseWindow { prior, entering, leaving } = *window;
    if !basic_preconditions(&[prior, entering, leaving]) {
        return false;
    }

    // The turn angle is stricter than the modifier: sharp or almost straight
    // turns are not a zig-zag.
    let is_right = |angle: f64| angle > 45.0 && angle < 135.0;
    let is_left = |angle: f64| angle > 225.0 && angle < 315.0;

    let entering_angle = turn_angle(entering);
    let leaving_angle = turn_angle(leaving);
    let zig_zag = (is_left(entering_angle) && is_right(leaving_angle))
        || (is_right(entering_angle) && is_left(leaving_angle));

    let is_short = entering.distance < config.max_staggered_distance;
    let no_intermediary_intersections = entering.intersections.len() == 1;

    is_short && zig_zag && no_intermediary_intersections
}

/// Two turns that bring us back onto the same road in the opposite direction.
///
/// ```text
/// b < - y
///       |      turn around at x instead of turn left at x, turn left at y
/// a - > x
/// ```
pub fn is_u_turn(window: &CollapseWindow<'_>, config: &GuidanceConfig) -> bool {
    let CollapseWindow { prior, entering, leaving } = *window;
    if !basic_preconditions(&[prior, entering, leaving]) {
        return false;
    }

    let arrival_heading = reverse(entering.front_intersection().in_bearing());
    let departure_heading = leaving.front_intersection().out_bearing();
    if !bearings_are_reversed(arrival_heading, departure_heading, config.max_uturn_deviation) {
        return false;
    }

    if !have_same_name(&prior.signage, &leaving.signage) {
        return false;
    }

    let only_allowed_turn =
        number_of_allowed_turns(leaving) == 1 && no_intermediary_choices(entering);

    is_collapsable_segment(entering, config) || is_link_road(entering, config) || only_allowed_turn
}

/// A name switch A → B → A, typical for bridges and tunnels.
pub fn is_name_oscillation(window: &CollapseWindow<'_>) -> bool {
    let CollapseWindow { prior, entering, leaving } = *window;
    if !basic_preconditions(&[prior, entering, leaving]) {
        return false;
    }

    if !is_name_change_like(entering) || !is_name_change_like(leaving) {
        return false;
    }

    have_same_name(&prior.signage, &leaving.signage)
        || (prior.signage.is_unnamed() && leaving.signage.is_unnamed())
}

/// A short name change right before a real maneuver.
///
/// ```text
///  |  e  |
/// a - b - c
///         d
/// ```
///
/// `a-b` may carry one name and `b-c-d` a second one. Announcing the new
/// name at `b` is pointless when the road turns right at `c` anyway.
pub fn maneuver_preceded_by_name_change(
    window: &CollapseWindow<'_>,
    config: &GuidanceConfig,
) -> bool {
    let CollapseWindow { prior, entering, leaving } = *window;
    if !basic_preconditions(&[prior, entering, leaving]) {
        return false;
    }

    let is_collapsable = is_collapsable_segment(entering, config);
    let is_name_change = is_turn_type(entering, TurnType::NewName);
    // the next turn still needs to be heard
    let is_vocal = has_turn_type(leaving) && !is_turn_type(leaving, TurnType::Suppressed);

    is_collapsable && is_name_change && is_vocal
}

/// A real maneuver directly followed by a name change.
pub fn maneuver_succeeded_by_name_change(
    entering: &RouteStep,
    leaving: &RouteStep,
    config: &GuidanceConfig,
) -> bool {
    basic_preconditions(&[entering, leaving])
        && is_collapsable_segment(entering, config)
        && is_announced_maneuver(entering)
        && is_name_change_like(leaving)
}

/// A very short suppressed step directly followed by a name change.
pub fn name_change_immediately_after_suppressed(
    entering: &RouteStep,
    leaving: &RouteStep,
    config: &GuidanceConfig,
) -> bool {
    let very_short = entering.distance < 0.25 * config.max_collapse_distance;
    basic_preconditions(&[entering, leaving])
        && very_short
        && is_turn_type(entering, TurnType::Suppressed)
        && is_turn_type(leaving, TurnType::NewName)
}

/// A real maneuver followed by a suppressed bend towards the same side.
pub fn maneuver_succeeded_by_suppressed_direction(
    entering: &RouteStep,
    leaving: &RouteStep,
    config: &GuidanceConfig,
) -> bool {
    basic_preconditions(&[entering, leaving])
        && is_collapsable_segment(entering, config)
        && is_announced_maneuver(entering)
        && is_turn_type(leaving, TurnType::Suppressed)
        && !is_straight(leaving)
        && keeps_side(entering, leaving)
}

/// A straight, low-salience step whose successor offers no choice.
pub fn straight_turn_followed_by_choiceless(
    entering: &RouteStep,
    leaving: &RouteStep,
    config: &GuidanceConfig,
) -> bool {
    if !basic_preconditions(&[entering, leaving]) {
        return false;
    }

    let is_short = entering.distance <= 2.0 * config.max_collapse_distance;
    let has_correct_type = is_turn_type(entering, TurnType::Suppressed)
        || is_turn_type(entering, TurnType::Continue)
        || is_turn_type(entering, TurnType::Turn);
    let only_choice = number_of_allowed_turns(leaving) == 1;
    let no_intermediary_intersections = entering.intersections.len() == 1;

    is_short && has_correct_type && is_straight(entering) && only_choice && no_intermediary_intersections
}

/// A suppressed bend leading into an announced maneuver towards the same side.
pub fn maneuver_preceded_by_suppressed_direction(
    entering: &RouteStep,
    leaving: &RouteStep,
    config: &GuidanceConfig,
) -> bool {
    basic_preconditions(&[entering, leaving])
        && is_turn_type(entering, TurnType::Suppressed)
        && !is_straight(entering)
        && is_collapsable_segment(entering, config)
        && has_turn_type(leaving)
        && !is_turn_type(leaving, TurnType::Suppressed)
        && keeps_side(entering, leaving)
}

/// A short turn followed by a turn without alternative.
pub fn close_choiceless_turn_after_turn(
    entering: &RouteStep,
    leaving: &RouteStep,
    config: &GuidanceConfig,
) -> bool {
    basic_preconditions(&[entering, leaving])
        && is_collapsable_segment(entering, config)
        && is_announced_maneuver(entering)
        && number_of_allowed_turns(leaving) == 1
        && !is_straight(leaving)
}

/// Two consecutive maneuvers that both offer no alternative.
pub fn double_choiceless(
    entering: &RouteStep,
    leaving: &RouteStep,
    config: &GuidanceConfig,
) -> bool {
    basic_preconditions(&[entering, leaving])
        && is_collapsable_segment(entering, config)
        && number_of_allowed_turns(entering) == 1
        && number_of_allowed_turns(leaving) == 1
}

// ─────────────────────────────────────────────────────────────────────────────
// Scenario table
// ─────────────────────────────────────────────────────────────────────────────

/// A recognized collapse scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scenario {
    /// Zig-zag across an offset junction.
    StaggeredIntersection,
    /// Two turns forming a u-turn.
    UTurn,
    /// Name switching back and forth.
    NameOscillation,
    /// Short name change before a maneuver.
    ManeuverPrecededByNameChange,
    /// Maneuver followed by a short name change.
    ManeuverSucceededByNameChange,
    /// Tiny suppressed step followed by a name change.
    NameChangeImmediatelyAfterSuppressed,
    /// Maneuver followed by a suppressed bend the same way.
    ManeuverSucceededBySuppressedDirection,
    /// Straight step followed by a forced turn.
    StraightTurnFollowedByChoiceless,
    /// Suppressed bend followed by a maneuver the same way.
    ManeuverPrecededBySuppressedDirection,
}

/// Evaluation order of the scenarios. The first match wins.
pub const COLLAPSE_PRIORITY: [Scenario; 9] = [
    Scenario::StaggeredIntersection,
    Scenario::UTurn,
    Scenario::NameOscillation,
    Scenario::ManeuverPrecededByNameChange,
    Scenario::ManeuverSucceededByNameChange,
    Scenario::NameChangeImmediatelyAfterSuppressed,
    Scenario::ManeuverSucceededBySuppressedDirection,
    Scenario::StraightTurnFollowedByChoiceless,
    Scenario::ManeuverPrecededBySuppressedDirection,
];

impl Scenario {
    /// Whether the window matches this scenario.
    pub fn matches(self, window: &CollapseWindow<'_>, config: &GuidanceConfig) -> bool {
        let CollapseWindow { entering, leaving, .. } = *window;
        match self {
            Self::StaggeredIntersection => is_staggered_intersection(window, config),
            Self::UTurn => is_u_turn(window, config),
            Self::NameOscillation => is_name_oscillation(window),
            Self::ManeuverPrecededByNameChange => maneuver_preceded_by_name_change(window, config),
            Self::ManeuverSucceededByNameChange => {
                maneuver_succeeded_by_name_change(entering, leaving, config)
            }
            Self::NameChangeImmediatelyAfterSuppressed => {
                name_change_immediately_after_suppressed(entering, leaving, config)
            }
            Self::ManeuverSucceededBySuppressedDirection => {
                maneuver_succeeded_by_suppressed_direction(entering, leaving, config)
            }
            Self::StraightTurnFollowedByChoiceless => {
                straight_turn_followed_by_choiceless(entering, leaving, config)
            }
            Self::ManeuverPrecededBySuppressedDirection => {
                maneuver_preceded_by_suppressed_direction(entering, leaving, config)
            }
        }
    }

    /// Stable name for logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::StaggeredIntersection => "staggered_intersection",
            Self::UTurn => "u_turn",
            Self::NameOscillation => "name_oscillation",
            Self::ManeuverPrecededByNameChange => "maneuver_preceded_by_name_change",
            Self::ManeuverSucceededByNameChange => "maneuver_succeeded_by_name_change",
            Self::NameChangeImmediatelyAfterSuppressed => "name_change_immediately_after_suppressed",
            Self::ManeuverSucceededBySuppressedDirection => {
                "maneuver_succeeded_by_suppressed_direction"
            }
            Self::StraightTurnFollowedByChoiceless => "straight_turn_followed_by_choiceless",
            Self::ManeuverPrecededBySuppressedDirection => {
                "maneuver_preceded_by_suppressed_direction"
            }
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// First scenario in priority order that matches the window.
pub fn classify(window: &CollapseWindow<'_>, config: &GuidanceConfig) -> Option<Scenario> {
    COLLAPSE_PRIORITY
        .into_iter()
        .find(|scenario| scenario.matches(window, config))
}
