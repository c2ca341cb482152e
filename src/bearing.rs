//! Bearing and turn angle arithmetic.
//!
//! Bearings are compass angles in degrees (0 = north, clockwise).
//! Turn angles describe the maneuver between two headings:
//!
//! ```text
//!   0 = u-turn, 90 = right, 180 = straight, 270 = left
//! ```

use crate::types::DirectionModifier;

/// Opposite compass direction.
pub fn reverse(bearing: f64) -> f64 {
    if bearing >= 180.0 {
        bearing - 180.0
    } else {
        bearing + 180.0
    }
}

/// Turn angle when travelling with `entry_heading` and leaving with `exit_heading`.
pub fn angle_between(entry_heading: f64, exit_heading: f64) -> f64 {
    // rotate so that the entry heading points north
    let offset = 360.0 - entry_heading;
    let rotated_exit = {
        let rotated = exit_heading + offset;
        if rotated > 360.0 {
            rotated - 360.0
        } else {
            rotated
        }
    };

    let angle = 540.0 - rotated_exit;
    if angle >= 360.0 {
        angle - 360.0
    } else {
        angle
    }
}

/// Smallest absolute difference between two angles.
pub fn angular_deviation(lhs: f64, rhs: f64) -> f64 {
    let delta = (lhs - rhs).abs();
    delta.min(360.0 - delta)
}

/// Classify a turn angle into a direction modifier.
pub fn turn_direction(angle: f64) -> DirectionModifier {
    if angle > 0.0 && angle < 60.0 {
        DirectionModifier::SharpRight
    } else if (60.0..140.0).contains(&angle) {
        DirectionModifier::Right
    } else if (140.0..160.0).contains(&angle) {
        DirectionModifier::SlightRight
    } else if (160.0..=200.0).contains(&angle) {
        DirectionModifier::Straight
    } else if angle > 200.0 && angle <= 220.0 {
        DirectionModifier::SlightLeft
    } else if angle > 220.0 && angle <= 300.0 {
        DirectionModifier::Left
    } else if angle > 300.0 && angle < 360.0 {
        DirectionModifier::SharpLeft
    } else {
        DirectionModifier::UTurn
    }
}

/// Whether `bearing_out` points roughly opposite to `bearing_in`.
pub fn bearings_are_reversed(bearing_in: f64, bearing_out: f64, max_deviation: f64) -> bool {
    let left_turn_angle = if 0.0 <= bearing_out && bearing_out <= bearing_in {
        bearing_in - bearing_out
    } else {
        bearing_in + 360.0 - bearing_out
    };
    angular_deviation(left_turn_angle, 180.0) <= max_deviation
}
