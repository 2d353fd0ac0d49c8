use tg_core::{Kinematics, PlayerControl, SteeringCommand, SteeringContribution, SteeringTag};

use crate::context::SimContext;
use crate::error::SimResult;
use crate::system::{Stage, System};

/// Priority given to direct player input.
pub const PLAYER_PRIORITY: u32 = 1000;

/// Turns player movement flags into the entity's steering command.
///
/// Runs after [`crate::steering::SteeringSystem`], which leaves
/// player-controlled entities alone, so each entity's command slot has a
/// single writer per tick.
#[derive(Debug, Default)]
pub struct PlayerControlSystem;

impl PlayerControlSystem {
    pub fn new() -> Self {
        Self
    }
}

impl System for PlayerControlSystem {
    fn name(&self) -> &str {
        "player-control"
    }

    fn stage(&self) -> Stage {
        Stage::Control
    }

    fn tick(&mut self, ctx: &mut SimContext<'_>) -> SimResult<()> {
        let players: Vec<_> = ctx
            .world
            .iter::<PlayerControl>()
            .filter(|(id, _)| ctx.world.has::<Kinematics>(*id))
            .map(|(id, control)| (id, control.move_vector()))
            .collect();

        for (id, direction) in players {
            let limits = ctx.world.limits_or_default(id);
            let linear = direction * limits.max_acceleration;
            let mut command = SteeringCommand::new(linear, 0.0);
            command.contributions.push(SteeringContribution {
                linear,
                angular: 0.0,
                weight: 1.0,
                priority: PLAYER_PRIORITY,
                tag: SteeringTag::Player,
            });
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
