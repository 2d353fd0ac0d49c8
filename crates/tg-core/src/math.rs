//! Angle and vector helpers shared by the steering evaluators and integrator.
//!
//! All scalar clamps here tolerate inverted or negative limits instead of
//! panicking like [`f32::clamp`].

use std::f32::consts::{PI, TAU};

use glam::Vec2;

/// Smallest time constant used in place of a non-positive one (seconds).
pub const MIN_TIME_CONSTANT: f32 = 1e-3;

/// Wrap an angle into `(-PI, PI]`.
pub fn wrap_angle(angle: f32) -> f32 {
    let wrapped = (angle + PI).rem_euclid(TAU) - PI;
    if wrapped <= -PI { wrapped + TAU } else { wrapped }
}

/// Heading of a vector in radians, `atan2(y, x)`.
pub fn heading(v: Vec2) -> f32 {
    v.y.atan2(v.x)
}

/// Unit vector pointing along `angle`.
pub fn heading_vector(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

/// Rescale `v` to length `max` if it is longer. A non-positive `max` yields zero.
pub fn clamp_magnitude(v: Vec2, max: f32) -> Vec2 {
    if max <= 0.0 {
        return Vec2::ZERO;
    }
    let len_sq = v.length_squared();
    if len_sq > max * max {
        v * (max / len_sq.sqrt())
    } else {
        v
    }
}

/// Clamp `value` into `[-|limit|, |limit|]`.
pub fn clamp_symmetric(value: f32, limit: f32) -> f32 {
    let limit = limit.abs();
    value.max(-limit).min(limit)
}

/// Clamp `value` into `[lo, hi]`; when `lo > hi` the upper bound wins.
pub fn clamp_range(value: f32, lo: f32, hi: f32) -> f32 {
    value.max(lo).min(hi)
}

/// Replace a non-positive (or NaN) time constant with [`MIN_TIME_CONSTANT`].
pub fn positive_time(t: f32) -> f32 {
    if t > 0.0 { t } else { MIN_TIME_CONSTANT }
}
