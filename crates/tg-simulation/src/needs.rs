use tg_core::{EntityId, Needs, ResourceKind};

use crate::context::SimContext;
use crate::error::SimResult;
use crate::event::SimEventKind;
use crate::system::{Stage, System};

/// Drains every entity's needs by their loss rate each tick.
#[derive(Debug, Default)]
pub struct NeedsSystem;

impl NeedsSystem {
    pub fn new() -> Self {
        Self
    }
}

impl System for NeedsSystem {
    fn name(&self) -> &str {
        "needs"
    }

    fn stage(&self) -> Stage {
        Stage::Needs
    }

    fn tick(&mut self, ctx: &mut SimContext<'_>) -> SimResult<()> {
        let dt = ctx.dt();
        let mut depleted: Vec<(EntityId, ResourceKind)> = Vec::new();

        for (id, needs) in ctx.world.iter_mut::<Needs>() {
            for need in needs.iter_mut() {
                let prev = need.value;
                need.deplete(dt);
                if prev > need.min && need.value <= need.min {
                    depleted.push((id, need.name.clone()));
                }
            }
        }

        for (entity, need) in depleted {
            tracing::debug!(%entity, %need, "need depleted");
            ctx.emit(
                SimEventKind::NeedDepleted {
                    entity,
                    need: need.clone(),
                },
                format!("{entity} ran out of {need}"),
            );
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
