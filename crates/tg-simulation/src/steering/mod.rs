//! Steering evaluators and the system that runs them.
//!
//! Each evaluator is a plain function from an [`Agent`] snapshot plus its
//! tuning to an optional [`SteeringContribution`]. [`SteeringSystem`] gathers
//! the contributions for every steered entity and stores the aggregated
//! [`SteeringCommand`] on it.

/// The shared orientation law.
pub mod align;
/// Contribution aggregation policies.
pub mod aggregate;
/// Arrive at a seek target.
pub mod arrive;
/// Keep away from world edges.
pub mod avoidance;
/// Run from the player.
pub mod flee;
/// Bounded random roaming.
pub mod wander;

use glam::Vec2;
use tg_core::{
    AlignSteering, ArriveSteering, Behaviour, BoundaryAvoidance, FleeFromPlayer, Kinematics,
    MovementLimits, PlayerControl, SteeringCommand, SteeringContribution, WanderSteering,
};

use crate::context::SimContext;
use crate::error::SimResult;
use crate::system::{Stage, System};

pub use aggregate::aggregate;
pub use align::align;

/// Read-only snapshot of the state every evaluator needs.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Agent {
    pub position: Vec2,
    pub kinematics: Kinematics,
    pub limits: MovementLimits,
    pub align: AlignSteering,
}

/// Evaluates wander, arrive, flee and boundary avoidance for every entity
/// with a position and kinematics, then aggregates the results.
///
/// Player-controlled entities are skipped; their command comes from
/// [`crate::control::PlayerControlSystem`].
#[derive(Debug, Default)]
pub struct SteeringSystem;

impl SteeringSystem {
    pub fn new() -> Self {
        Self
    }
}

impl System for SteeringSystem {
    fn name(&self) -> &str {
        "steering"
    }

    fn stage(&self) -> Stage {
        Stage::Steering
    }

    fn tick(&mut self, ctx: &mut SimContext<'_>) -> SimResult<()> {
        let dt = ctx.dt();
        let bounds = ctx.bounds();
        let aggregator = ctx.config.aggregator;
        let default_buffer = ctx.config.default_boundary_buffer;
        let player = ctx
            .world
            .iter::<PlayerControl>()
            .find_map(|(id, _)| ctx.world.position_of(id));

        for id in ctx.world.ids_with::<Kinematics>() {
            if ctx.world.has::<PlayerControl>(id) {
                continue;
            }
            let (Some(position), Some(kinematics)) = (
                ctx.world.position_of(id),
                ctx.world.get::<Kinematics>(id).copied(),
            ) else {
                continue;
            };
            let agent = Agent {
                position,
                kinematics,
                limits: ctx.world.limits_or_default(id),
                align: ctx.world.get::<AlignSteering>(id).copied().unwrap_or_default(),
            };
            let avoidance_tuning = ctx.world.get::<BoundaryAvoidance>(id).copied();
            let mut contributions: Vec<SteeringContribution> = Vec::new();

            if let Some(tuning) = ctx.world.get::<WanderSteering>(id).copied() {
                let buffer = avoidance_tuning.map_or(default_buffer, |a| a.buffer);
                if let Some(Behaviour::Wander { wander_angle }) =
                    ctx.world.get_mut::<Behaviour>(id)
                {
                    contributions.push(wander::evaluate(
                        &agent,
                        wander_angle,
                        &tuning,
                        &bounds,
                        buffer,
                        dt,
                        &mut *ctx.rng,
                    ));
                }
            }

            let seek_target = match ctx.world.get::<Behaviour>(id).and_then(Behaviour::target) {
                Some(target) => {
                    let resolved = ctx.world.position_of(target);
                    if resolved.is_none() {
                        tracing::trace!(entity = %id, %target, "seek target unresolved");
                    }
                    resolved
                }
                None => None,
            };
            if let (Some(tuning), Some(target_pos)) =
                (ctx.world.get::<ArriveSteering>(id).copied(), seek_target)
            {
                contributions.push(arrive::evaluate(&agent, target_pos, &tuning));
            }

            if let (Some(tuning), Some(player_pos)) =
                (ctx.world.get::<FleeFromPlayer>(id).copied(), player)
            {
                contributions.extend(flee::evaluate(&agent, player_pos, &tuning));
            }

            if let Some(tuning) = avoidance_tuning {
                contributions.extend(avoidance::evaluate(&agent, &tuning, &bounds));
            }

            let command: SteeringCommand = aggregate(contributions, &agent.limits, &aggregator);
            tracing::trace!(
                entity = %id,
                linear = ?command.linear,
                angular = command.angular,
                contributions = command.contributions.len(),
                "steering command"
            );
            ctx.world.insert(id, command)?;
        }
        Ok(())
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}
