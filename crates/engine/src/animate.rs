//! Frame-rate independent smoothing helpers.
//!
//! `decay_towards` closes a fixed fraction of the remaining gap per second of
//! simulated time, so two callers stepping the same total `dt` in different
//! slice sizes land on the same value (up to float error).

use crate::math::Vec2;

/// Distance at which a smoothed value snaps onto its target.
pub const DECAY_SNAP_EPSILON: f32 = 0.001;

pub fn almost_equals(a: f32, b: f32, epsilon: f32) -> bool {
    (a - b).abs() <= epsilon
}

/// Moves `value` towards `target` by `1 - 2^(-rate * dt)` of the gap.
///
/// Returns the new value and whether the target was reached. Once within
/// [`DECAY_SNAP_EPSILON`] the value is snapped exactly onto `target`.
/// Negative or non-finite `rate * dt` products are treated as zero (no motion).
pub fn decay_towards(value: f32, target: f32, dt: f32, rate: f32) -> (f32, bool) {
    let exponent = rate * dt;
    let exponent = if exponent.is_finite() { exponent.max(0.0) } else { 0.0 };
    let blend = 1.0 - (-exponent).exp2();
    let next = value + (target - value) * blend;
    if almost_equals(next, target, DECAY_SNAP_EPSILON) {
        (target, true)
    } else {
        (next, false)
    }
}

/// Per-axis [`decay_towards`]; axes never influence each other.
pub fn decay_towards_vec2(value: Vec2, target: Vec2, dt: f32, rate: f32) -> Vec2 {
    let (x, _) = decay_towards(value.x, target.x, dt, rate);
    let (y, _) = decay_towards(value.y, target.y, dt, rate);
    Vec2::new(x, y)
}

/// Periodic oscillator in `[0, 1]`, a pure function of elapsed time.
pub fn breathing(time: f32, rate: f32) -> f32 {
    ((time * rate).sin() + 1.0) * 0.5
}
