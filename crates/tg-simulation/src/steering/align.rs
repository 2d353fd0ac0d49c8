use tg_core::math::{clamp_symmetric, positive_time, wrap_angle};
use tg_core::{AlignSteering, Kinematics, MovementLimits};

/// Angular acceleration that turns an entity toward `target_orientation`.
///
/// Inside the target radius the result only brakes the current rotation and
/// is not clamped. Elsewhere it is clamped to the entity's maximum angular
/// acceleration.
pub fn align(
    target_orientation: f32,
    kinematics: &Kinematics,
    limits: &MovementLimits,
    tuning: &AlignSteering,
) -> f32 {
    let time_to_target = positive_time(tuning.angular_time_to_target);
    let delta = wrap_angle(target_orientation - kinematics.orientation);
    let size = delta.abs();

    if size < tuning.angular_target_radius {
        return -kinematics.rotation / time_to_target;
    }

    let slow_radius = tuning.angular_slow_radius;
    let scale = if size > slow_radius || slow_radius <= 0.0 {
        1.0
    } else {
        size / slow_radius
    };
    let direction = if delta == 0.0 { 0.0 } else { delta.signum() };
    let target_rotation = limits.max_rotation * scale * direction;
    clamp_symmetric(
        (target_rotation - kinematics.rotation) / time_to_target,
        limits.max_angular_acceleration,
    )
}
