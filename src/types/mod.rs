//! Core types for route guidance.

pub mod instruction;
pub mod intersection;
pub mod step;
pub mod invariants;

pub use instruction::{DirectionModifier, StepManeuver, TurnInstruction, TurnType, WaypointType};
pub use intersection::{Intersection, LaneTuple};
pub use step::{NameId, RouteStep, Signage, StepState, TravelMode, EMPTY_NAMEID};
pub use invariants::{check_route_invariants, InvariantViolation};
