use glam::Vec2;
use tg_core::{EntityId, Needs, PassiveResourceProvider, ResourceKind};

use crate::context::SimContext;
use crate::error::SimResult;
use crate::event::SimEventKind;
use crate::system::{Stage, System};

/// Replenishes the needs of entities standing inside a provider's radius.
///
/// Providers are applied in ascending id order, so when two overlap the
/// lower id tops up first.
#[derive(Debug, Default)]
pub struct ProvisionSystem;

impl ProvisionSystem {
    pub fn new() -> Self {
        Self
    }
}

impl System for ProvisionSystem {
    fn name(&self) -> &str {
        "provision"
    }

    fn stage(&self) -> Stage {
        Stage::Provision
    }

    fn tick(&mut self, ctx: &mut SimContext<'_>) -> SimResult<()> {
        let dt = ctx.dt();
        let providers: Vec<(EntityId, Vec2, PassiveResourceProvider)> = ctx
            .world
            .iter::<PassiveResourceProvider>()
            .filter_map(|(id, p)| ctx.world.position_of(id).map(|pos| (id, pos, p.clone())))
            .collect();
        if providers.is_empty() {
            return Ok(());
        }

        let needers = ctx.world.ids_with::<Needs>();
        let mut satiated: Vec<(EntityId, ResourceKind, EntityId)> = Vec::new();

        for id in needers {
            let Some(pos) = ctx.world.position_of(id) else {
                continue;
            };
            let Some(needs) = ctx.world.get_mut::<Needs>(id) else {
                continue;
            };
            for (provider_id, provider_pos, provider) in &providers {
                let range_sq = provider.radius * provider.radius;
                if pos.distance_squared(*provider_pos) > range_sq {
                    continue;
                }
                for need in needs.iter_mut() {
                    if !provider.provides(&need.name) || need.is_full() {
                        continue;
                    }
                    let was_satiated = need.is_satiated();
                    need.replenish(provider.provided_per_second * dt);
                    if !was_satiated && need.is_satiated() {
                        satiated.push((id, need.name.clone(), *provider_id));
                    }
                }
            }
        }

        for (entity, need, provider) in satiated {
            tracing::debug!(%entity, %need, %provider, "need satiated");
            ctx.emit(
                SimEventKind::NeedSatiated {
                    entity,
                    need: need.clone(),
                    provider,
                },
                format!("{entity} had its fill of {need} at {provider}"),
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
