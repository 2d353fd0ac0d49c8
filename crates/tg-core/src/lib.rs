//! Core types for Tortuga: the entity store and the component data model.
//!
//! This crate holds no behavior beyond small invariant-preserving helpers.
//! Systems live in `tg-simulation`; spawn factories, rendering and input
//! exchange data with the simulation only through the components defined
//! here.

/// Kinematic, behaviour, steering-output and input components.
pub mod component;
/// Entity identifiers.
pub mod entity;
/// Error types used throughout the crate.
pub mod error;
/// Angle and vector helpers.
pub mod math;
/// Needs and passive resource providers.
pub mod needs;
/// Per-behavior steering tuning components.
pub mod steering;
/// The entity store.
pub mod world;

/// Re-export of the component types.
pub use component::{
    Behaviour, BehaviourMode, DampingMode, Kinematics, MovementLimits, PlayerControl, Position,
    SteeringCommand, SteeringContribution, SteeringTag,
};
/// Re-export of [`entity::EntityId`].
pub use entity::EntityId;
/// Re-exports of [`error::CoreError`] and [`error::CoreResult`].
pub use error::{CoreError, CoreResult};
/// Re-export of needs types.
pub use needs::{Need, Needs, PassiveResourceProvider, ResourceKind};
/// Re-export of steering tuning types.
pub use steering::{AlignSteering, ArriveSteering, BoundaryAvoidance, FleeFromPlayer, WanderSteering};
/// Re-export of world types.
pub use world::{Component, ComponentStore, EntityMut, World};

/// Re-export of the vector type used throughout the public API.
pub use glam::Vec2;
