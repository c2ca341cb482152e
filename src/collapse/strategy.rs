//! Strategies for merging two route steps into one.
//!
//! A merge combines three independent decisions:
//!
//! - what the resulting instruction looks like ([`TurnStrategy`])
//! - which signage survives ([`SignageStrategy`])
//! - which lane guidance survives ([`LaneStrategy`])
//!
//! [`combine_route_steps`] applies them and moves the donor's distance,
//! duration, weight and intersections into the target.

use crate::bearing::{angle_between, angular_deviation, reverse, turn_direction};
use crate::policy::GuidanceConfig;
use crate::types::{DirectionModifier, RouteStep, Signage, TurnInstruction, TurnType};

use super::scenario::is_name_change_like;
use super::utility::{have_same_name, is_turn_type};

/// Where the donor step sits relative to the target along the route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DonorPosition {
    /// The donor comes after the target.
    Follows,
    /// The donor comes before the target.
    Precedes,
}

/// How the instruction of the merged step is chosen.
#[derive(Debug, Clone, PartialEq)]
pub enum TurnStrategy {
    /// Keep the target instruction.
    NoModification,
    /// Take over the donor's instruction.
    TransferTurnType,
    /// Replace the modifier with the direction of the combined turn.
    AdjustToCombinedTurnAngle,
    /// Combined direction, retyped against the road we came from.
    AdjustToCombinedTurn {
        /// Signage of the last real turn before the merge.
        prior: Signage,
    },
    /// Zig-zag across an offset junction: straight on.
    StaggeredTurn {
        /// Signage of the last real turn before the merge.
        prior: Signage,
    },
    /// Force a fixed instruction.
    SetFixedInstruction(TurnInstruction),
}

impl TurnStrategy {
    /// Update the instruction of `target` using information from `donor`.
    ///
    /// ## Parameters
    ///
    /// - `target`: Step that survives the merge
    /// - `donor`: Step that is merged into the target
    /// - `position`: Order of the two steps along the route
    /// - `config`: Thresholds for the combined angle
    pub fn apply(
        &self,
        target: &mut RouteStep,
        donor: &RouteStep,
        position: DonorPosition,
        config: &GuidanceConfig,
    ) {
        match self {
            Self::NoModification => {}
            Self::TransferTurnType => {
                target.maneuver.instruction = donor.instruction();
            }
            Self::AdjustToCombinedTurnAngle => {
                let angle = combined_angle(target, donor, position, config);
                target.maneuver.instruction.direction_modifier = turn_direction(angle);
            }
            Self::AdjustToCombinedTurn { prior } => {
                adjust_to_combined_turn(target, donor, position, prior, config);
            }
            Self::StaggeredTurn { prior } => {
                // a -> b -> a is only a road crossing, b -> c a name change
                let turn_type = if have_same_name(prior, &donor.signage) {
                    TurnType::Suppressed
                } else {
                    TurnType::NewName
                };
                target.maneuver.instruction =
                    TurnInstruction::new(turn_type, DirectionModifier::Straight);
            }
            Self::SetFixedInstruction(instruction) => {
                target.maneuver.instruction = *instruction;
            }
        }
    }
}

/// Which signage the merged step shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignageStrategy {
    /// Keep the target signage.
    NoModification,
    /// Take over the donor's signage, including rotary names.
    TransferSignage,
}

impl SignageStrategy {
    /// Update the signage of `target`.
    pub fn apply(&self, target: &mut RouteStep, donor: &RouteStep) {
        match self {
            Self::NoModification => {}
            Self::TransferSignage => {
                target.adapt_signage(donor);
                target.rotary_name = donor.rotary_name.clone();
                target.rotary_pronunciation = donor.rotary_pronunciation.clone();
            }
        }
    }
}

/// Which lane guidance the merged step shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaneStrategy {
    /// Keep the target lanes.
    NoModification,
    /// Take over the donor's lanes at its maneuver intersection.
    TransferLanes,
}

impl LaneStrategy {
    /// Update the lanes at the maneuver intersection of `target`.
    pub fn apply(&self, target: &mut RouteStep, donor: &RouteStep) {
        match self {
            Self::NoModification => {}
            Self::TransferLanes => {
                let source = donor.front_intersection();
                let lanes = source.lanes;
                let lane_description = source.lane_description.clone();
                if let Some(front) = target.intersections.first_mut() {
                    front.lanes = lanes;
                    front.lane_description = lane_description;
                }
            }
        }
    }
}

/// Turn angle of two consecutive maneuvers taken as one.
///
/// Uses the total angle between the heading entering `first` and the heading
/// leaving `second` when both maneuvers form a single turn. Otherwise the
/// angle of `first` alone is kept.
pub fn find_total_turn_angle(first: &RouteStep, second: &RouteStep, config: &GuidanceConfig) -> f64 {
    let entry_intersection = first.front_intersection();
    let exit_intersection = second.front_intersection();

    let entry_step_entry_heading = reverse(entry_intersection.in_bearing());
    let entry_step_exit_heading = entry_intersection.out_bearing();
    let exit_step_entry_heading = reverse(exit_intersection.in_bearing());
    let exit_step_exit_heading = exit_intersection.out_bearing();

    let entry_angle = angle_between(entry_step_entry_heading, entry_step_exit_heading);
    let exit_angle = angle_between(exit_step_entry_heading, exit_step_exit_heading);
    let total_angle = angle_between(entry_step_entry_heading, exit_step_exit_heading);

    let short_and_undisturbed =
        first.distance < config.max_collapse_distance && second.intersections.len() == 1;
    let same_direction = (entry_angle <= 185.0 && exit_angle <= 185.0)
        || (entry_angle >= 175.0 && exit_angle >= 175.0);

    // a combined turn close to straight keeps the direction of the first turn
    if (short_and_undisturbed || same_direction) && angular_deviation(total_angle, 180.0) > 20.0 {
        total_angle
    } else {
        entry_angle
    }
}

fn combined_angle(
    target: &RouteStep,
    donor: &RouteStep,
    position: DonorPosition,
    config: &GuidanceConfig,
) -> f64 {
    match position {
        DonorPosition::Follows => find_total_turn_angle(target, donor, config),
        DonorPosition::Precedes => find_total_turn_angle(donor, target, config),
    }
}

fn adjust_to_combined_turn(
    target: &mut RouteStep,
    donor: &RouteStep,
    position: DonorPosition,
    prior: &Signage,
    config: &GuidanceConfig,
) {
    let modifier = turn_direction(combined_angle(target, donor, position, config));

    // the road we end up on is the later of the two steps
    let resulting_road = match position {
        DonorPosition::Follows => &donor.signage,
        DonorPosition::Precedes => &target.signage,
    };
    let continues_prior_road = have_same_name(prior, resulting_road);

    let target_is_low_salience =
        is_name_change_like(target) || is_turn_type(target, TurnType::Suppressed);
    let instruction = &mut target.maneuver.instruction;

    if !(is_name_change_like(donor) || target_is_low_salience) {
        instruction.direction_modifier = modifier;
        return;
    }

    let turn_type = instruction.turn_type;
    match turn_type {
        TurnType::Suppressed if modifier == DirectionModifier::Straight => {
            *instruction = TurnInstruction::new(TurnType::NewName, modifier);
        }
        TurnType::Suppressed => {
            let turn_type = if continues_prior_road {
                TurnType::Continue
            } else {
                TurnType::Turn
            };
            *instruction = TurnInstruction::new(turn_type, modifier);
        }
        TurnType::Continue if !continues_prior_road => {
            *instruction = TurnInstruction::new(TurnType::Turn, modifier);
        }
        TurnType::Turn if continues_prior_road => {
            *instruction = TurnInstruction::new(TurnType::Continue, modifier);
        }
        _ => instruction.direction_modifier = modifier,
    }
}

/// Merge `donor` into `target`.
///
/// The strategies run first, then the donor's quantities and intersections
/// move into the target and the donor is invalidated.
///
/// ## Parameters
///
/// - `target`: Step that survives
/// - `donor`: Step that is absorbed, must directly follow the target
/// - `turn`, `signage`, `lanes`: How the target presentation changes
/// - `config`: Thresholds for the combined angle
pub fn combine_route_steps(
    target: &mut RouteStep,
    donor: &mut RouteStep,
    turn: &TurnStrategy,
    signage: SignageStrategy,
    lanes: LaneStrategy,
    config: &GuidanceConfig,
) {
    turn.apply(target, donor, DonorPosition::Follows, config);
    signage.apply(target, donor);
    lanes.apply(target, donor);

    target.elongate_by(donor);
    donor.invalidate();
}

/// Silently absorb `donor` into `target`, keeping the target presentation.
pub fn suppress_step(target: &mut RouteStep, donor: &mut RouteStep, config: &GuidanceConfig) {
    combine_route_steps(
        target,
        donor,
        &TurnStrategy::NoModification,
        SignageStrategy::NoModification,
        LaneStrategy::NoModification,
        config,
    );
}
