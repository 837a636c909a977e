//! Hysteresis decision — on/off control with a deadband.
//!
//! Each actuator reacts to one sensor around a configured threshold. The
//! deviation band on either side of the threshold keeps the actuator from
//! oscillating when the reading hovers near the boundary.

/// Decide the target state for an actuator given the current sensor value.
///
/// Returns `Some(true)` (command ON) when `value <= threshold - deviation`,
/// `Some(false)` (command OFF) when `value > threshold + deviation`, and
/// `None` inside the deadband, where the current state is kept.
///
/// Both boundaries are part of the rule: a value exactly at
/// `threshold - deviation` commands ON, a value exactly at
/// `threshold + deviation` stays in the deadband.
#[must_use]
pub fn decide(value: f64, threshold: f64, deviation: f64) -> Option<bool> {
    if value <= threshold - deviation {
        Some(true)
    } else if value > threshold + deviation {
        Some(false)
    } else {
        None
    }
}
