use glam::Vec2;
use tg_core::{FleeFromPlayer, SteeringContribution, SteeringTag};

use super::Agent;

/// Flee from the player when closer than the safe distance.
///
/// The push is strongest at contact and fades linearly to nothing at the
/// safe distance. Flee does not turn the entity.
pub fn evaluate(agent: &Agent, player: Vec2, tuning: &FleeFromPlayer) -> Option<SteeringContribution> {
    let away = agent.position - player;
    let distance = away.length();
    if distance <= 0.0 || distance >= tuning.safe_distance {
        return None;
    }
    let strength = (tuning.safe_distance - distance) / tuning.safe_distance;
    Some(SteeringContribution {
        linear: away / distance * agent.limits.max_acceleration * strength,
        angular: 0.0,
        weight: tuning.weight,
        priority: tuning.priority,
        tag: SteeringTag::Flee,
    })
}
