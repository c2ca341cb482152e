//! Turn instruction types for route steps.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Announced type of a maneuver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnType {
    /// No maneuver at all (waypoints, invalidated steps).
    #[default]
    NoTurn,
    /// A maneuver that exists but is not announced.
    Suppressed,
    /// The road changes its name.
    NewName,
    /// Continue on the same road.
    Continue,
    /// Turn onto a different road.
    Turn,
    /// Merge onto a road.
    Merge,
    /// Take a ramp onto a highway.
    OnRamp,
    /// Take a ramp off a highway.
    OffRamp,
    /// Keep left/right at a fork.
    Fork,
    /// The road ends, turn left/right.
    EndOfRoad,
    /// Informational announcement without a turn.
    Notification,
    /// Short connector road, resolved during collapsing.
    Sliproad,
    /// Enter a roundabout.
    EnterRoundabout,
    /// Enter a rotary (large named roundabout).
    EnterRotary,
    /// Enter and leave a roundabout at the same step.
    EnterAndLeaveRoundabout,
    /// Pass an exit while inside a roundabout.
    StayOnRoundabout,
    /// Leave a roundabout.
    LeaveRoundabout,
    /// Leave a rotary.
    LeaveRotary,
}

impl TurnType {
    /// Whether this type enters a roundabout or rotary.
    pub fn enters_roundabout(&self) -> bool {
        matches!(
            self,
            Self::EnterRoundabout | Self::EnterRotary | Self::EnterAndLeaveRoundabout
        )
    }

    /// Whether this type is an intermediate roundabout exit.
    pub fn stays_on_roundabout(&self) -> bool {
        matches!(self, Self::StayOnRoundabout)
    }

    /// Whether this type leaves a roundabout or rotary.
    pub fn leaves_roundabout(&self) -> bool {
        matches!(
            self,
            Self::LeaveRoundabout | Self::LeaveRotary | Self::EnterAndLeaveRoundabout
        )
    }

    /// Whether this type belongs to any roundabout maneuver.
    pub fn is_roundabout(&self) -> bool {
        self.enters_roundabout() || self.stays_on_roundabout() || self.leaves_roundabout()
    }
}

impl fmt::Display for TurnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::NoTurn => "no turn",
            Self::Suppressed => "suppressed",
            Self::NewName => "new name",
            Self::Continue => "continue",
            Self::Turn => "turn",
            Self::Merge => "merge",
            Self::OnRamp => "on ramp",
            Self::OffRamp => "off ramp",
            Self::Fork => "fork",
            Self::EndOfRoad => "end of road",
            Self::Notification => "notification",
            Self::Sliproad => "sliproad",
            Self::EnterRoundabout => "roundabout",
            Self::EnterRotary => "rotary",
            Self::EnterAndLeaveRoundabout => "roundabout turn",
            Self::StayOnRoundabout => "stay on roundabout",
            Self::LeaveRoundabout => "exit roundabout",
            Self::LeaveRotary => "exit rotary",
        };
        f.write_str(s)
    }
}

/// Direction of a maneuver relative to the direction of travel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DirectionModifier {
    /// Turn around.
    UTurn,
    /// Sharp right.
    SharpRight,
    /// Right.
    Right,
    /// Slight right.
    SlightRight,
    /// Straight on.
    #[default]
    Straight,
    /// Slight left.
    SlightLeft,
    /// Left.
    Left,
    /// Sharp left.
    SharpLeft,
}

impl DirectionModifier {
    /// Whether the modifier points to the left-hand side.
    pub fn is_left(&self) -> bool {
        matches!(self, Self::SlightLeft | Self::Left | Self::SharpLeft)
    }

    /// Whether the modifier points to the right-hand side.
    pub fn is_right(&self) -> bool {
        matches!(self, Self::SlightRight | Self::Right | Self::SharpRight)
    }
}

impl fmt::Display for DirectionModifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::UTurn => "uturn",
            Self::SharpRight => "sharp right",
            Self::Right => "right",
            Self::SlightRight => "slight right",
            Self::Straight => "straight",
            Self::SlightLeft => "slight left",
            Self::Left => "left",
            Self::SharpLeft => "sharp left",
        };
        f.write_str(s)
    }
}

/// Announced instruction: type plus direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct TurnInstruction {
    /// Maneuver type.
    #[serde(rename = "type")]
    pub turn_type: TurnType,
    /// Direction of the maneuver.
    pub direction_modifier: DirectionModifier,
}

impl TurnInstruction {
    /// Create a new instruction.
    pub const fn new(turn_type: TurnType, direction_modifier: DirectionModifier) -> Self {
        Self {
            turn_type,
            direction_modifier,
        }
    }

    /// The instruction carried by waypoints and invalidated steps.
    pub const fn no_turn() -> Self {
        Self::new(TurnType::NoTurn, DirectionModifier::UTurn)
    }
}

impl fmt::Display for TurnInstruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.turn_type, self.direction_modifier)
    }
}

/// Role of a step with respect to the requested waypoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WaypointType {
    /// Regular step.
    #[default]
    None,
    /// Start of the route.
    Depart,
    /// End of the route.
    Arrive,
    /// Intermediate waypoint.
    Via,
}

/// Maneuver at the start of a step.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StepManeuver {
    /// The announced instruction.
    pub instruction: TurnInstruction,
    /// Waypoint role of the maneuver.
    pub waypoint_type: WaypointType,
}

impl StepManeuver {
    /// Maneuver for a regular step.
    pub fn new(instruction: TurnInstruction) -> Self {
        Self {
            instruction,
            waypoint_type: WaypointType::None,
        }
    }

    /// Maneuver for a waypoint step.
    pub fn waypoint(waypoint_type: WaypointType) -> Self {
        Self {
            instruction: TurnInstruction::no_turn(),
            waypoint_type,
        }
    }
}
