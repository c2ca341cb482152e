//! Route step types.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::instruction::{StepManeuver, TurnInstruction, TurnType, WaypointType};
use super::intersection::Intersection;

/// Identifier into the name table.
pub type NameId = u32;

/// Reserved name id for unnamed roads.
pub const EMPTY_NAMEID: NameId = 0;

/// Travel mode of a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TravelMode {
    /// Motor vehicle.
    #[default]
    Driving,
    /// Bicycle.
    Cycling,
    /// On foot.
    Walking,
    /// Pushing a bicycle.
    PushingBike,
    /// On a ferry.
    Ferry,
    /// On a train.
    Train,
}

impl fmt::Display for TravelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Driving => write!(f, "driving"),
            Self::Cycling => write!(f, "cycling"),
            Self::Walking => write!(f, "walking"),
            Self::PushingBike => write!(f, "pushing bike"),
            Self::Ferry => write!(f, "ferry"),
            Self::Train => write!(f, "train"),
        }
    }
}

/// Name and sign information of the road a step travels on.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Signage {
    /// Identifier into the name table.
    pub name_id: NameId,
    /// Road name.
    pub name: String,
    /// Road reference, e.g. `A 1;E 40`.
    #[serde(rename = "ref")]
    pub reference: String,
    /// Pronunciation of the name.
    pub pronunciation: String,
    /// Signposted destinations.
    pub destinations: String,
    /// Exit numbers.
    pub exits: String,
}

impl Signage {
    /// Signage with a name only.
    pub fn named(name_id: NameId, name: impl Into<String>) -> Self {
        Self {
            name_id,
            name: name.into(),
            ..Self::default()
        }
    }

    /// Signage of an unnamed road.
    pub fn unnamed() -> Self {
        Self::default()
    }

    /// Set the reference.
    pub fn with_ref(mut self, reference: impl Into<String>) -> Self {
        self.reference = reference.into();
        self
    }

    /// Set the pronunciation.
    pub fn with_pronunciation(mut self, pronunciation: impl Into<String>) -> Self {
        self.pronunciation = pronunciation.into();
        self
    }

    /// Whether the name id is the empty sentinel.
    pub fn is_unnamed(&self) -> bool {
        self.name_id == EMPTY_NAMEID
    }
}

/// Processing state of a step inside the collapse pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StepState {
    /// Part of the route.
    #[default]
    Active,
    /// Absorbed by another step, pending removal.
    Invalidated,
}

/// One maneuver-to-maneuver segment of a route.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RouteStep {
    /// Length in meters.
    pub distance: f64,
    /// Travel time in seconds.
    pub duration: f64,
    /// Routing weight.
    pub weight: f64,
    /// Travel mode.
    pub mode: TravelMode,
    /// Road name and signs.
    #[serde(flatten)]
    pub signage: Signage,
    /// Name of the rotary entered by this step.
    pub rotary_name: String,
    /// Pronunciation of the rotary name.
    pub rotary_pronunciation: String,
    /// Maneuver at the start of the step.
    pub maneuver: StepManeuver,
    /// Intersections along the step, starting with the maneuver location.
    pub intersections: Vec<Intersection>,
    /// First geometry index of the step.
    pub geometry_begin: usize,
    /// One past the last geometry index of the step.
    pub geometry_end: usize,
    /// Pipeline state, never serialized.
    #[serde(skip)]
    pub state: StepState,
}

impl RouteStep {
    /// Create an active step.
    pub fn new(
        signage: Signage,
        mode: TravelMode,
        instruction: TurnInstruction,
        distance: f64,
        duration: f64,
        intersections: Vec<Intersection>,
    ) -> Self {
        Self {
            distance,
            duration,
            weight: duration,
            mode,
            signage,
            maneuver: StepManeuver::new(instruction),
            intersections,
            ..Self::default()
        }
    }

    /// Create a depart or arrive sentinel.
    pub fn waypoint(
        waypoint_type: WaypointType,
        signage: Signage,
        mode: TravelMode,
        distance: f64,
        duration: f64,
        intersection: Intersection,
    ) -> Self {
        Self {
            distance,
            duration,
            weight: duration,
            mode,
            signage,
            maneuver: StepManeuver::waypoint(waypoint_type),
            intersections: vec![intersection],
            ..Self::default()
        }
    }

    /// Set the geometry range.
    pub fn with_geometry(mut self, begin: usize, end: usize) -> Self {
        self.geometry_begin = begin;
        self.geometry_end = end;
        self
    }

    /// The announced instruction.
    pub fn instruction(&self) -> TurnInstruction {
        self.maneuver.instruction
    }

    /// The announced turn type.
    pub fn turn_type(&self) -> TurnType {
        self.maneuver.instruction.turn_type
    }

    /// Override the turn type, keeping the modifier.
    pub fn set_turn_type(&mut self, turn_type: TurnType) {
        self.maneuver.instruction.turn_type = turn_type;
    }

    /// The intersection at the maneuver location.
    pub fn front_intersection(&self) -> &Intersection {
        &self.intersections[0]
    }

    /// Whether the step is still part of the route.
    pub fn is_active(&self) -> bool {
        self.state == StepState::Active
    }

    /// Copy the signage of another step.
    pub fn adapt_signage(&mut self, origin: &RouteStep) {
        self.signage = origin.signage.clone();
    }

    /// Extend this step by a following step.
    ///
    /// Distance, duration and weight add up and the intersections of the
    /// following step are moved to the end of this step.
    pub fn elongate_by(&mut self, following: &mut RouteStep) {
        debug_assert_eq!(self.mode, following.mode);
        self.distance += following.distance;
        self.duration += following.duration;
        self.weight += following.weight;
        self.geometry_end = self.geometry_end.max(following.geometry_end);
        self.intersections.append(&mut following.intersections);
    }

    /// Mark the step as absorbed.
    ///
    /// Its quantities must already have been moved into another step.
    pub fn invalidate(&mut self) {
        self.distance = 0.0;
        self.duration = 0.0;
        self.weight = 0.0;
        self.maneuver = StepManeuver::waypoint(WaypointType::None);
        self.state = StepState::Invalidated;
    }
}
