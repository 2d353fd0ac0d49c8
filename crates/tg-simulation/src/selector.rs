use glam::Vec2;
use rand::Rng;
use tg_core::{Behaviour, EntityId, Kinematics, Needs, PassiveResourceProvider, ResourceKind};
use tg_core::world::World;

use crate::context::SimContext;
use crate::error::SimResult;
use crate::event::SimEventKind;
use crate::system::{Stage, System};

/// Fraction of velocity kept when an entity gives up seeking.
pub const SEEK_EXIT_VELOCITY_SCALE: f32 = 0.35;

/// Switches entities between wandering and seeking based on their needs.
///
/// Entering and leaving seek use different thresholds: an entity starts
/// seeking once a need falls below its seek threshold, and only stops once
/// the sought need reaches its satiation threshold with no other need
/// pressing.
#[derive(Debug, Default)]
pub struct BehaviorSelector;

impl BehaviorSelector {
    pub fn new() -> Self {
        Self
    }
}

/// The nearest provider of `kind` to `from`. Ties go to the lower id.
pub fn nearest_provider(world: &World, from: Vec2, kind: &ResourceKind) -> Option<EntityId> {
    let mut best: Option<(EntityId, f32)> = None;
    for (id, provider) in world.iter::<PassiveResourceProvider>() {
        if !provider.provides(kind) {
            continue;
        }
        let Some(pos) = world.position_of(id) else {
            continue;
        };
        let dist_sq = pos.distance_squared(from);
        if best.is_none_or(|(_, d)| dist_sq < d) {
            best = Some((id, dist_sq));
        }
    }
    best.map(|(id, _)| id)
}

impl BehaviorSelector {
    fn revert_to_wander(ctx: &mut SimContext<'_>, id: EntityId) -> SimResult<()> {
        let wander_angle = ctx.rng.random_range(-1.0..=1.0);
        ctx.world.insert(id, Behaviour::Wander { wander_angle })?;
        if let Some(kin) = ctx.world.get_mut::<Kinematics>(id) {
            kin.velocity *= SEEK_EXIT_VELOCITY_SCALE;
        }
        Ok(())
    }

    /// Leave seek if the job is done or the target is gone. Returns `true`
    /// when the entity is settled for this tick.
    ///
    /// A sought need that is absent from the entity's list counts as
    /// satiated, so the entity can leave seek. A target counts as gone once
    /// it lacks a position or no longer provides the sought resource.
    fn review_seek(
        ctx: &mut SimContext<'_>,
        id: EntityId,
        pos: Vec2,
        needs: &Needs,
        target: EntityId,
        seeking: &ResourceKind,
    ) -> SimResult<bool> {
        let sought_done = needs.get(seeking).is_none_or(|n| n.is_satiated());
        let others_ok = needs
            .iter()
            .filter(|n| &n.name != seeking)
            .all(|n| !n.needs_seeking());

        if sought_done && others_ok {
            Self::revert_to_wander(ctx, id)?;
            tracing::debug!(entity = %id, need = %seeking, "seek ended");
            ctx.emit(
                SimEventKind::SeekEnded {
                    entity: id,
                    need: seeking.clone(),
                },
                format!("{id} is done seeking {seeking}"),
            );
            return Ok(true);
        }

        let target_valid = ctx.world.position_of(target).is_some()
            && ctx
                .world
                .get::<PassiveResourceProvider>(target)
                .is_some_and(|p| p.provides(seeking));
        if target_valid {
            return Ok(false);
        }

        match nearest_provider(ctx.world, pos, seeking) {
            Some(replacement) => {
                ctx.world.insert(
                    id,
                    Behaviour::Seek {
                        target: replacement,
                        seeking_need: seeking.clone(),
                    },
                )?;
                ctx.emit(
                    SimEventKind::SeekRetargeted {
                        entity: id,
                        from: target,
                        to: replacement,
                    },
                    format!("{id} lost {target}, heading to {replacement} for {seeking}"),
                );
                Ok(false)
            }
            None => {
                Self::revert_to_wander(ctx, id)?;
                tracing::debug!(entity = %id, %target, "seek target lost");
                ctx.emit(
                    SimEventKind::TargetLost { entity: id, target },
                    format!("{id} lost {target} and found no other source of {seeking}"),
                );
                Ok(true)
            }
        }
    }
}

impl System for BehaviorSelector {
    fn name(&self) -> &str {
        "behavior-selector"
    }

    fn stage(&self) -> Stage {
        Stage::Selection
    }

    fn tick(&mut self, ctx: &mut SimContext<'_>) -> SimResult<()> {
        for id in ctx.world.ids_with::<Needs>() {
            let Some(pos) = ctx.world.position_of(id) else {
                continue;
            };
            let (Some(needs), Some(behaviour)) = (
                ctx.world.get::<Needs>(id).cloned(),
                ctx.world.get::<Behaviour>(id).cloned(),
            ) else {
                continue;
            };

            let mut current = behaviour;
            if let Behaviour::Seek {
                target,
                seeking_need,
            } = current.clone()
            {
                if Self::review_seek(ctx, id, pos, &needs, target, &seeking_need)? {
                    continue;
                }
                if let Some(b) = ctx.world.get::<Behaviour>(id) {
                    current = b.clone();
                }
            }

            let Some(wanted) = needs.most_pressing().map(|n| n.name.clone()) else {
                continue;
            };
            let Some(provider) = nearest_provider(ctx.world, pos, &wanted) else {
                continue;
            };

            let next = Behaviour::Seek {
                target: provider,
                seeking_need: wanted.clone(),
            };
            if next == current {
                continue;
            }
            ctx.world.insert(id, next)?;

            match current {
                Behaviour::Seek {
                    target,
                    seeking_need,
                } if seeking_need == wanted => {
                    ctx.emit(
                        SimEventKind::SeekRetargeted {
                            entity: id,
                            from: target,
                            to: provider,
                        },
                        format!("{id} switched from {target} to {provider} for {wanted}"),
                    );
                }
                _ => {
                    tracing::debug!(entity = %id, need = %wanted, %provider, "seek started");
                    ctx.emit(
                        SimEventKind::SeekStarted {
                            entity: id,
                            need: wanted.clone(),
                            target: provider,
                        },
                        format!("{id} is seeking {wanted} at {provider}"),
                    );
                }
            }
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
