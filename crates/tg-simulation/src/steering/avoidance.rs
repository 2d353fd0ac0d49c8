use glam::Vec2;
use tg_core::math::{heading, heading_vector};
use tg_core::{BoundaryAvoidance, SteeringContribution, SteeringTag};

use super::Agent;
use super::align::align;
use crate::bounds::WorldBounds;

/// Proximity at the current position beyond which the entity turns straight inward.
const DEEP_IN_BAND: f32 = 0.8;

/// Boundary avoidance: push away from walls the entity is about to hit.
///
/// Probes a point ahead of the entity; if that point would leave the safe
/// rectangle the push points back into it. Entities already deep in the
/// buffer band are pushed along the inward normal instead. Strength falls
/// off with the square of the proximity.
pub fn evaluate(
    agent: &Agent,
    tuning: &BoundaryAvoidance,
    bounds: &WorldBounds,
) -> Option<SteeringContribution> {
    let kin = &agent.kinematics;
    let speed = kin.speed();
    let look_ahead = tuning.look_ahead(speed, agent.limits.max_speed);
    let forward = if speed > 1.0 {
        kin.velocity / speed
    } else {
        heading_vector(kin.orientation)
    };

    let ahead = agent.position + forward * look_ahead;
    let offset = bounds.clamp_inside(ahead, tuning.buffer) - ahead;
    let here = bounds.proximity(agent.position, tuning.buffer);

    let (direction, proximity) = if here > DEEP_IN_BAND {
        (bounds.inward_normal(agent.position, tuning.buffer), here)
    } else if offset != Vec2::ZERO {
        (
            offset.normalize_or_zero(),
            bounds.proximity(ahead, tuning.buffer),
        )
    } else {
        return None;
    };
    if direction == Vec2::ZERO || proximity <= 0.0 {
        return None;
    }

    let angular = align(heading(direction), kin, &agent.limits, &agent.align) * tuning.angular_scale;
    Some(SteeringContribution {
        linear: direction * tuning.strength * proximity * proximity,
        angular,
        weight: tuning.weight,
        priority: tuning.priority,
        tag: SteeringTag::Avoidance,
    })
}
