use std::collections::BTreeMap;
use std::collections::BTreeSet;

use crate::component::{
    Behaviour, Kinematics, MovementLimits, PlayerControl, Position, SteeringCommand,
};
use crate::entity::EntityId;
use crate::error::{CoreError, CoreResult};
use crate::needs::{Needs, PassiveResourceProvider};
use crate::steering::{
    AlignSteering, ArriveSteering, BoundaryAvoidance, FleeFromPlayer, WanderSteering,
};

/// Sparse storage for one component type, iterated in ascending id order.
#[derive(Debug, Clone)]
pub struct ComponentStore<T> {
    items: BTreeMap<EntityId, T>,
}

impl<T> Default for ComponentStore<T> {
    fn default() -> Self {
        Self {
            items: BTreeMap::new(),
        }
    }
}

impl<T> ComponentStore<T> {
    pub fn get(&self, id: EntityId) -> Option<&T> {
        self.items.get(&id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut T> {
        self.items.get_mut(&id)
    }

    /// Insert or replace, returning the previous value.
    pub fn insert(&mut self, id: EntityId, value: T) -> Option<T> {
        self.items.insert(id, value)
    }

    pub fn remove(&mut self, id: EntityId) -> Option<T> {
        self.items.remove(&id)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.items.contains_key(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &T)> {
        self.items.iter().map(|(id, v)| (*id, v))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (EntityId, &mut T)> {
        self.items.iter_mut().map(|(id, v)| (*id, v))
    }

    pub fn ids(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.items.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// A type that can be stored on an entity.
///
/// Implemented for every component kind; gives [`World`] compile-time checked
/// access to the matching store.
pub trait Component: Sized + 'static {
    /// Human-readable component name for errors and logs.
    const NAME: &'static str;

    fn store(world: &World) -> &ComponentStore<Self>;

    fn store_mut(world: &mut World) -> &mut ComponentStore<Self>;
}

macro_rules! impl_component {
    ($($ty:ty => $field:ident),* $(,)?) => {
        $(
            impl Component for $ty {
                const NAME: &'static str = stringify!($ty);

                fn store(world: &World) -> &ComponentStore<Self> {
                    &world.$field
                }

                fn store_mut(world: &mut World) -> &mut ComponentStore<Self> {
                    &mut world.$field
                }
            }
        )*

        impl World {
            fn strip_components(&mut self, id: EntityId) {
                $(self.$field.remove(id);)*
            }
        }
    };
}

impl_component! {
    Position => positions,
    Kinematics => kinematics,
    MovementLimits => limits,
    Behaviour => behaviours,
    Needs => needs,
    PassiveResourceProvider => providers,
    AlignSteering => align,
    WanderSteering => wander,
    ArriveSteering => arrive,
    BoundaryAvoidance => avoidance,
    FleeFromPlayer => flee,
    PlayerControl => player_controls,
    SteeringCommand => commands,
}

/// The entity store. Owns every entity's components, keyed by id.
///
/// Entities reference each other only by [`EntityId`]; a lookup on a removed
/// id just returns `None`.
#[derive(Debug, Clone, Default)]
pub struct World {
    next_id: u64,
    alive: BTreeSet<EntityId>,

    positions: ComponentStore<Position>,
    kinematics: ComponentStore<Kinematics>,
    limits: ComponentStore<MovementLimits>,
    behaviours: ComponentStore<Behaviour>,
    needs: ComponentStore<Needs>,
    providers: ComponentStore<PassiveResourceProvider>,
    align: ComponentStore<AlignSteering>,
    wander: ComponentStore<WanderSteering>,
    arrive: ComponentStore<ArriveSteering>,
    avoidance: ComponentStore<BoundaryAvoidance>,
    flee: ComponentStore<FleeFromPlayer>,
    player_controls: ComponentStore<PlayerControl>,
    commands: ComponentStore<SteeringCommand>,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    // -----------------------------------------------------------------------
    // Entity lifecycle
    // -----------------------------------------------------------------------

    /// Allocate a new entity and return a builder for attaching components.
    pub fn spawn(&mut self) -> EntityMut<'_> {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        self.alive.insert(id);
        EntityMut { world: self, id }
    }

    /// Remove an entity and every component attached to it.
    pub fn despawn(&mut self, id: EntityId) -> CoreResult<()> {
        if !self.alive.remove(&id) {
            return Err(CoreError::EntityNotFound(id));
        }
        self.strip_components(id);
        Ok(())
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.alive.contains(&id)
    }

    pub fn entity_count(&self) -> usize {
        self.alive.len()
    }

    /// All live entity ids in ascending order.
    pub fn entities(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.alive.iter().copied()
    }

    // -----------------------------------------------------------------------
    // Component access
    // -----------------------------------------------------------------------

    /// Attach (or replace) a component on a live entity.
    pub fn insert<T: Component>(&mut self, id: EntityId, component: T) -> CoreResult<Option<T>> {
        if !self.contains(id) {
            return Err(CoreError::EntityNotFound(id));
        }
        Ok(T::store_mut(self).insert(id, component))
    }

    pub fn remove<T: Component>(&mut self, id: EntityId) -> Option<T> {
        T::store_mut(self).remove(id)
    }

    pub fn get<T: Component>(&self, id: EntityId) -> Option<&T> {
        T::store(self).get(id)
    }

    pub fn get_mut<T: Component>(&mut self, id: EntityId) -> Option<&mut T> {
        T::store_mut(self).get_mut(id)
    }

    pub fn has<T: Component>(&self, id: EntityId) -> bool {
        T::store(self).contains(id)
    }

    /// Iterate one component type in ascending id order.
    pub fn iter<T: Component>(&self) -> impl Iterator<Item = (EntityId, &T)> {
        T::store(self).iter()
    }

    /// Iterate one component type mutably in ascending id order.
    pub fn iter_mut<T: Component>(&mut self) -> impl Iterator<Item = (EntityId, &mut T)> {
        T::store_mut(self).iter_mut()
    }

    /// Ids of entities carrying `T`, collected so the world can be mutated afterwards.
    pub fn ids_with<T: Component>(&self) -> Vec<EntityId> {
        T::store(self).ids().collect()
    }

    /// Convenience lookup of an entity's position as a vector.
    pub fn position_of(&self, id: EntityId) -> Option<glam::Vec2> {
        self.positions.get(id).map(|p| p.as_vec2())
    }

    /// Movement limits of an entity, falling back to the defaults.
    pub fn limits_or_default(&self, id: EntityId) -> MovementLimits {
        self.limits.get(id).copied().unwrap_or_default()
    }
}

/// Builder returned by [`World::spawn`] for attaching components to a fresh entity.
pub struct EntityMut<'w> {
    world: &'w mut World,
    id: EntityId,
}

impl EntityMut<'_> {
    /// Attach a component.
    pub fn with<T: Component>(self, component: T) -> Self {
        T::store_mut(self.world).insert(self.id, component);
        self
    }

    pub fn id(&self) -> EntityId {
        self.id
    }
}
