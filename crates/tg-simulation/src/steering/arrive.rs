use glam::Vec2;
use tg_core::math::{clamp_magnitude, heading, positive_time};
use tg_core::{ArriveSteering, SteeringContribution, SteeringTag};

use super::Agent;
use super::align::align;

/// Arrive steering toward a resolved target position.
///
/// Desired speed ramps down linearly inside the slow radius and is zero
/// inside the target radius.
pub fn evaluate(agent: &Agent, target: Vec2, tuning: &ArriveSteering) -> SteeringContribution {
    let kin = &agent.kinematics;
    let max_speed = agent.limits.max_speed;

    let to_target = target - agent.position;
    let distance = to_target.length();
    let target_speed = if distance < tuning.target_radius {
        0.0
    } else if distance < tuning.slow_radius {
        max_speed * distance / tuning.slow_radius
    } else {
        max_speed
    };

    let desired = if distance > 0.0 {
        to_target / distance * target_speed
    } else {
        Vec2::ZERO
    };
    let linear = clamp_magnitude(
        (desired - kin.velocity) / positive_time(tuning.time_to_target),
        agent.limits.max_acceleration,
    );

    let facing = if kin.speed() > 1.0 {
        heading(kin.velocity)
    } else if distance > 0.0 {
        heading(to_target)
    } else {
        kin.orientation
    };

    SteeringContribution {
        linear,
        angular: align(facing, kin, &agent.limits, &agent.align),
        weight: tuning.weight,
        priority: tuning.priority,
        tag: SteeringTag::Arrive,
    }
}
