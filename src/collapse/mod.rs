//! Collapsing of turn instructions.
//!
//! Walks the steps of a route leg and merges maneuvers that a rider
//! perceives as a single one: zig-zags across offset junctions, u-turns
//! split into two left turns, names switching back and forth on bridges,
//! short name changes around a real turn and sliproads.
//!
//! ## Pipeline
//!
//! ```text
//! for each candidate step:
//!   roundabout       -> skip to the step after the exit
//!   no turn type     -> skip
//!   sliproad         -> handle_sliproad
//!   otherwise        -> classify(prior, entering, leaving) -> merge
//!                       survivor still active -> classify it again
//! after the walk: drop invalidated steps
//! repeat until a walk changes nothing
//! ```
//!
//! Merged steps are only marked invalid while the walk runs, so indices
//! stay stable. Compaction happens at the end of every walk. A merge can
//! turn an earlier step into a candidate again, which is why walks repeat
//! until the sequence is stable and collapsing its own output is a no-op.

pub mod scenario;
pub mod strategy;
mod sliproad;
pub mod utility;

pub use scenario::{classify, CollapseWindow, Scenario, COLLAPSE_PRIORITY};
pub use strategy::{
    combine_route_steps, find_total_turn_angle, suppress_step, DonorPosition, LaneStrategy,
    SignageStrategy, TurnStrategy,
};

use tracing::{debug, trace};

use crate::policy::GuidanceConfig;
use crate::types::invariants::assert_route_invariants;
use crate::types::{DirectionModifier, RouteStep, TurnInstruction, TurnType};

use sliproad::handle_sliproad;
use utility::{find_next_turn, find_previous_turn, has_turn_type, has_waypoint_type, have_same_mode, pair_mut};

/// Collapse the turn instructions of a route leg.
///
/// The first step must be the depart and the last step the arrive waypoint.
/// Legs with fewer than three steps are returned unchanged.
///
/// # Panics
///
/// Panics when the steps violate the route invariants (missing waypoints,
/// steps without intersections, inconsistent intersection indices).
pub fn collapse_turn_instructions(steps: Vec<RouteStep>, config: &GuidanceConfig) -> Vec<RouteStep> {
    collapse_with_count(steps, config).0
}

/// Collapse and report the number of merges.
pub(crate) fn collapse_with_count(
    mut steps: Vec<RouteStep>,
    config: &GuidanceConfig,
) -> (Vec<RouteStep>, usize) {
    if steps.len() < 3 {
        return (steps, 0);
    }
    assert_route_invariants(&steps);

    let mut merges = 0;
    loop {
        let pass = collapse_in_place(&mut steps, config);
        steps.retain(RouteStep::is_active);
        merges += pass.merges;
        if !pass.changed() {
            break;
        }
        trace!(merges = pass.merges, sliproads = pass.sliproads, "repeating collapse walk");
    }

    debug_assert!(steps.iter().all(|step| !step.intersections.is_empty()));
    (steps, merges)
}

/// What a single walk over the steps did.
#[derive(Debug, Default)]
struct PassOutcome {
    merges: usize,
    sliproads: usize,
}

impl PassOutcome {
    fn changed(&self) -> bool {
        self.merges > 0 || self.sliproads > 0
    }
}

fn collapse_in_place(steps: &mut [RouteStep], config: &GuidanceConfig) -> PassOutcome {
    let mut outcome = PassOutcome::default();
    let mut current = 1;

    while current + 1 < steps.len() {
        let turn_type = steps[current].turn_type();

        if turn_type.enters_roundabout() || turn_type.stays_on_roundabout() {
            while current + 1 < steps.len() && !steps[current].turn_type().leaves_roundabout() {
                current += 1;
            }
            current += 1;
            continue;
        }

        if !has_turn_type(&steps[current]) {
            current += 1;
            continue;
        }

        if turn_type == TurnType::Sliproad {
            outcome.merges += handle_sliproad(steps, current, config);
            outcome.sliproads += 1;
            current += 1;
            continue;
        }

        let next = find_next_turn(steps, current);
        if has_waypoint_type(&steps[next]) {
            break;
        }
        if !have_same_mode(&steps[current], &steps[next]) {
            current += 1;
            continue;
        }

        let previous = find_previous_turn(steps, current);
        let window = CollapseWindow::new(&steps[previous], &steps[current], &steps[next]);
        match classify(&window, config) {
            Some(scenario) => {
                debug!(step = current, %scenario, "collapsing turn instructions");
                outcome.merges += apply_scenario(steps, scenario, previous, current, next, config);
                // the survivor now borders a new next turn
                if steps[current].is_active() {
                    continue;
                }
            }
            None => trace!(step = current, "no collapse scenario"),
        }

        current += 1;
    }

    outcome
}

/// Perform the merge belonging to a scenario. Returns the number of merges.
fn apply_scenario(
    steps: &mut [RouteStep],
    scenario: Scenario,
    previous: usize,
    current: usize,
    next: usize,
    config: &GuidanceConfig,
) -> usize {
    let prior = steps[previous].signage.clone();

    match scenario {
        Scenario::StaggeredIntersection => {
            let (target, donor) = pair_mut(steps, current, next);
            combine_route_steps(
                target,
                donor,
                &TurnStrategy::StaggeredTurn { prior },
                SignageStrategy::TransferSignage,
                LaneStrategy::NoModification,
                config,
            );
            1
        }
        Scenario::UTurn => {
            let (target, donor) = pair_mut(steps, current, next);
            combine_route_steps(
                target,
                donor,
                &TurnStrategy::SetFixedInstruction(TurnInstruction::new(
                    TurnType::Continue,
                    DirectionModifier::UTurn,
                )),
                SignageStrategy::TransferSignage,
                LaneStrategy::NoModification,
                config,
            );
            1
        }
        Scenario::NameOscillation => {
            let (target, donor) = pair_mut(steps, current, next);
            suppress_step(target, donor, config);
            let (target, donor) = pair_mut(steps, previous, current);
            suppress_step(target, donor, config);
            2
        }
        Scenario::ManeuverPrecededByNameChange => {
            // the turn keeps its presentation, seen from the prior road
            let (target, donor) = pair_mut(steps, next, current);
            TurnStrategy::AdjustToCombinedTurn { prior }.apply(
                target,
                donor,
                DonorPosition::Precedes,
                config,
            );
            let (target, donor) = pair_mut(steps, previous, current);
            suppress_step(target, donor, config);
            1
        }
        Scenario::ManeuverSucceededByNameChange
        | Scenario::NameChangeImmediatelyAfterSuppressed
        | Scenario::ManeuverSucceededBySuppressedDirection
        | Scenario::StraightTurnFollowedByChoiceless
        | Scenario::ManeuverPrecededBySuppressedDirection => {
            let (target, donor) = pair_mut(steps, current, next);
            combine_route_steps(
                target,
                donor,
                &TurnStrategy::AdjustToCombinedTurn { prior },
                SignageStrategy::TransferSignage,
                LaneStrategy::NoModification,
                config,
            );
            1
        }
    }
}
