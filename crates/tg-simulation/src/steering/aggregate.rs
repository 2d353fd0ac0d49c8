use glam::Vec2;
use tg_core::math::{clamp_magnitude, clamp_symmetric};
use tg_core::{MovementLimits, SteeringCommand, SteeringContribution, SteeringTag};

use crate::config::{AggregationPolicy, AggregatorConfig};

/// Reduce one entity's contributions to a single clamped command.
///
/// A high-priority avoidance contribution scales down any wander weight
/// before the policy runs. The result never exceeds the entity's linear or
/// angular acceleration caps, whatever the policy.
pub fn aggregate(
    mut contributions: Vec<SteeringContribution>,
    limits: &MovementLimits,
    config: &AggregatorConfig,
) -> SteeringCommand {
    let suppress_wander = contributions.iter().any(|c| {
        c.tag == SteeringTag::Avoidance && c.priority >= config.avoidance_suppression_priority
    });
    if suppress_wander {
        for c in contributions
            .iter_mut()
            .filter(|c| c.tag == SteeringTag::Wander)
        {
            c.weight *= config.wander_suppression;
        }
    }

    let (linear, angular) = match config.policy {
        AggregationPolicy::WeightedBlend => blend(&contributions),
        AggregationPolicy::PriorityDominant { floor } => match dominant(&contributions) {
            Some(c) if c.priority > floor => (c.linear, c.angular),
            _ => blend(&contributions),
        },
    };

    SteeringCommand {
        linear: clamp_magnitude(linear, limits.max_acceleration),
        angular: clamp_symmetric(angular, limits.max_angular_acceleration),
        contributions,
    }
}

/// Weight-normalized sum; zero when the weights sum to nothing.
fn blend(contributions: &[SteeringContribution]) -> (Vec2, f32) {
    let total: f32 = contributions.iter().map(|c| c.weight).sum();
    if total <= 0.0 || !total.is_finite() {
        return (Vec2::ZERO, 0.0);
    }
    let (linear, angular) = contributions
        .iter()
        .fold((Vec2::ZERO, 0.0), |(l, a), c| {
            (l + c.linear * c.weight, a + c.angular * c.weight)
        });
    (linear / total, angular / total)
}

/// Highest priority contribution; the earliest wins ties.
fn dominant(contributions: &[SteeringContribution]) -> Option<&SteeringContribution> {
    contributions.iter().fold(None, |best, c| match best {
        Some(b) if b.priority >= c.priority => Some(b),
        _ => Some(c),
    })
}
