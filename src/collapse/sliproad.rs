//! Sliproad resolution.
//!
//! A sliproad is a short connector that cuts the corner of an
//! intersection. It is never announced on its own: it either merges with
//! the turn at its end or becomes a plain turn.

use tracing::debug;

use crate::policy::GuidanceConfig;
use crate::types::{RouteStep, TurnType};

use super::strategy::{combine_route_steps, suppress_step, LaneStrategy, SignageStrategy, TurnStrategy};
use super::utility::{
    find_next_turn, find_previous_turn, has_waypoint_type, have_same_mode, have_same_name,
    is_traffic_light_step, pair_mut,
};

/// Resolve the sliproad step at `sliproad`. Returns the number of merges.
///
/// Traffic lights along the sliproad are absorbed first. When the next turn
/// is a waypoint, a roundabout or changes the travel mode, the sliproad is
/// only retyped to a turn.
pub(crate) fn handle_sliproad(
    steps: &mut [RouteStep],
    sliproad: usize,
    config: &GuidanceConfig,
) -> usize {
    debug_assert_eq!(steps[sliproad].turn_type(), TurnType::Sliproad);

    let mut merges = 0;
    let mut next = find_next_turn(steps, sliproad);
    while is_traffic_light_step(&steps[next]) && have_same_mode(&steps[sliproad], &steps[next]) {
        let (target, donor) = pair_mut(steps, sliproad, next);
        suppress_step(target, donor, config);
        merges += 1;
        next = find_next_turn(steps, next);
    }

    let next_step = &steps[next];
    if has_waypoint_type(next_step)
        || next_step.turn_type().is_roundabout()
        || !have_same_mode(&steps[sliproad], next_step)
    {
        debug!(step = sliproad, "SLIPROAD_UNRESOLVED: announcing as turn");
        steps[sliproad].set_turn_type(TurnType::Turn);
        return merges;
    }

    let previous = find_previous_turn(steps, sliproad);
    let turn_type = if have_same_name(&steps[previous].signage, &steps[next].signage) {
        TurnType::Continue
    } else {
        TurnType::Turn
    };
    steps[sliproad].set_turn_type(turn_type);

    let (target, donor) = pair_mut(steps, sliproad, next);
    combine_route_steps(
        target,
        donor,
        &TurnStrategy::AdjustToCombinedTurnAngle,
        SignageStrategy::TransferSignage,
        LaneStrategy::TransferLanes,
        config,
    );
    debug!(step = sliproad, absorbed = next, "collapsed sliproad");

    merges + 1
}
