//! Intersections passed along a route step.

use serde::{Deserialize, Serialize};

/// Lanes usable for a turn at an intersection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct LaneTuple {
    /// Number of lanes that can be used for the turn.
    pub lanes_in_turn: u8,
    /// Index of the first usable lane, counted from the right.
    pub first_lane_from_the_right: u8,
}

impl LaneTuple {
    /// Create a new lane tuple.
    pub fn new(lanes_in_turn: u8, first_lane_from_the_right: u8) -> Self {
        Self {
            lanes_in_turn,
            first_lane_from_the_right,
        }
    }
}

/// A junction passed along a route step.
///
/// `bearings` are compass angles of all roads at the junction, pointing away
/// from it. `bearings[in_index]` therefore points back along the road we
/// arrived on, and `bearings[out_index]` is the heading we leave with.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Intersection {
    /// Bearings of all roads at the junction.
    pub bearings: Vec<f64>,
    /// Whether the road at the same index can be entered.
    pub entry: Vec<bool>,
    /// Index of the incoming road.
    #[serde(rename = "in")]
    pub in_index: usize,
    /// Index of the outgoing road.
    #[serde(rename = "out")]
    pub out_index: usize,
    /// Lanes usable for the turn.
    pub lanes: LaneTuple,
    /// Per-lane turn indications, ordered left to right.
    pub lane_description: Vec<String>,
}

impl Intersection {
    /// Create an intersection without lane information.
    pub fn new(bearings: Vec<f64>, entry: Vec<bool>, in_index: usize, out_index: usize) -> Self {
        Self {
            bearings,
            entry,
            in_index,
            out_index,
            lanes: LaneTuple::default(),
            lane_description: Vec::new(),
        }
    }

    /// Attach lane information.
    pub fn with_lanes(mut self, lanes: LaneTuple, lane_description: Vec<String>) -> Self {
        self.lanes = lanes;
        self.lane_description = lane_description;
        self
    }

    /// Bearing pointing back along the arriving road.
    pub fn in_bearing(&self) -> f64 {
        self.bearings[self.in_index]
    }

    /// Heading when leaving the intersection.
    pub fn out_bearing(&self) -> f64 {
        self.bearings[self.out_index]
    }

    /// Number of roads at the intersection.
    pub fn available_turns(&self) -> usize {
        self.entry.len()
    }

    /// Number of roads that may legally be entered.
    pub fn allowed_turns(&self) -> usize {
        self.entry.iter().filter(|&&allowed| allowed).count()
    }

    /// Whether lane guidance exists for the turn.
    pub fn has_lanes(&self) -> bool {
        self.lanes.lanes_in_turn > 0
    }
}
