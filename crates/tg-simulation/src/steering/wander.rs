use std::f32::consts::FRAC_PI_3;

use rand::Rng;
use tg_core::math::{clamp_magnitude, clamp_symmetric, heading, heading_vector, positive_time, wrap_angle};
use tg_core::{SteeringContribution, SteeringTag, WanderSteering};

use super::Agent;
use super::align::align;
use crate::bounds::WorldBounds;

/// Largest bend applied to the wander angle toward the inward normal in one tick.
const MAX_WALL_BEND: f32 = FRAC_PI_3;

/// Wander steering: persistent, bounded noise on a circle projected ahead.
///
/// Updates `wander_angle` in place and always produces a contribution whose
/// weight fades as the entity nears a wall.
pub fn evaluate<R: Rng>(
    agent: &Agent,
    wander_angle: &mut f32,
    tuning: &WanderSteering,
    bounds: &WorldBounds,
    buffer: f32,
    dt: f32,
    rng: &mut R,
) -> SteeringContribution {
    let kin = &agent.kinematics;

    let step = tuning.jitter * dt;
    let noise = rng.random::<f32>() - rng.random::<f32>();
    let mut angle = *wander_angle + clamp_symmetric(noise * step, step);
    angle -= angle * tuning.decay_per_sec * dt;
    angle = clamp_symmetric(angle, tuning.max_arc);

    let proximity = bounds.proximity(agent.position, buffer);
    if proximity > 0.0 {
        let inward = bounds.inward_normal(agent.position, buffer);
        let toward_inward = wrap_angle(heading(inward) - kin.orientation);
        let bend = clamp_symmetric(wrap_angle(toward_inward - angle), MAX_WALL_BEND)
            * (proximity * 1.25).min(1.0)
            * 0.6;
        angle = clamp_symmetric(angle + bend, tuning.max_arc);
    }
    *wander_angle = angle;

    let circle = agent.position + heading_vector(kin.orientation) * tuning.distance;
    let mut target = circle + heading_vector(kin.orientation + angle) * tuning.radius;

    let deflect = bounds
        .proximity(circle, buffer)
        .max(bounds.proximity(target, buffer));
    if deflect > 0.0 {
        target += bounds.inward_normal(target, buffer) * tuning.radius * deflect;
        target = bounds.clamp_inside(target, buffer);
    }

    let direction = (target - agent.position).normalize_or_zero();
    let desired = direction * tuning.cruise_speed(agent.limits.max_speed);
    let linear = clamp_magnitude(
        (desired - kin.velocity) / positive_time(tuning.time_to_target),
        agent.limits.max_acceleration,
    );

    let facing = if direction == glam::Vec2::ZERO {
        kin.orientation
    } else {
        heading(direction)
    };

    SteeringContribution {
        linear,
        angular: align(facing, kin, &agent.limits, &agent.align),
        weight: tuning.weight * (1.0 - (proximity * 0.6).min(0.8)),
        priority: tuning.priority,
        tag: SteeringTag::Wander,
    }
}
