use glam::Vec2;
use tg_core::math::{clamp_magnitude, wrap_angle};
use tg_core::{DampingMode, Kinematics, MovementLimits, Position, SteeringCommand};

use crate::context::SimContext;
use crate::error::SimResult;
use crate::system::{Stage, System};

/// Accelerations at or below this magnitude count as "not steering".
pub const STEERING_EPSILON: f32 = 1e-6;

/// Fraction of linear damping applied while steered in hybrid mode.
pub const HYBRID_STEERED_DAMPING: f32 = 0.15;

/// Advance one entity's motion by `dt` under `command`.
///
/// Semi-implicit Euler: velocity first, then position from the new velocity.
/// Speed is hard-capped after integration.
pub fn integrate(
    position: &mut Vec2,
    kinematics: &mut Kinematics,
    command: (Vec2, f32),
    limits: &MovementLimits,
    dt: f32,
) {
    let (linear, angular) = command;
    let damping = limits.linear_damping;
    let steered = linear.length() > STEERING_EPSILON;
    let v = kinematics.velocity;

    kinematics.velocity = match (limits.damping_mode, steered) {
        (DampingMode::Drag, _) => v + (linear - damping * v) * dt,
        (DampingMode::Friction, true) => v + linear * dt,
        (DampingMode::Hybrid, true) => v + (linear - HYBRID_STEERED_DAMPING * damping * v) * dt,
        (DampingMode::Friction | DampingMode::Hybrid, false) => v * (-damping * dt).exp(),
    };

    *position += kinematics.velocity * dt;

    kinematics.rotation += (angular - limits.angular_damping * kinematics.rotation) * dt;
    kinematics.orientation = wrap_angle(kinematics.orientation + kinematics.rotation * dt);

    kinematics.velocity = clamp_magnitude(kinematics.velocity, limits.max_speed);
}

/// Integrates every entity with a position and kinematics from its current
/// steering command. Entities without a command coast.
#[derive(Debug, Default)]
pub struct Integrator;

impl Integrator {
    pub fn new() -> Self {
        Self
    }
}

impl System for Integrator {
    fn name(&self) -> &str {
        "integrator"
    }

    fn stage(&self) -> Stage {
        Stage::Integration
    }

    fn tick(&mut self, ctx: &mut SimContext<'_>) -> SimResult<()> {
        let dt = ctx.dt();
        for id in ctx.world.ids_with::<Kinematics>() {
            let Some(mut position) = ctx.world.position_of(id) else {
                continue;
            };
            let command = ctx
                .world
                .get::<SteeringCommand>(id)
                .map_or((Vec2::ZERO, 0.0), |c| (c.linear, c.angular));
            let limits = ctx.world.limits_or_default(id);
            let Some(kinematics) = ctx.world.get_mut::<Kinematics>(id) else {
                continue;
            };
            integrate(&mut position, kinematics, command, &limits, dt);
            ctx.world.insert(id, Position::from(position))?;
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
