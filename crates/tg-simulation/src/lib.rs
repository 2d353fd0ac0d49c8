//! Tick-based needs and steering simulation for Tortuga.
//!
//! Provides a system-based simulation framework operating on a
//! [`tg_core::World`]. Each tick runs a fixed pipeline: needs drain,
//! providers replenish, the behavior selector picks wander or seek, steering
//! evaluators propose accelerations that are aggregated into one command per
//! entity, and the integrator moves everything. All randomness comes from
//! the simulation's own seeded generator, so runs are reproducible.

/// World rectangle and wall-proximity helpers.
pub mod bounds;
/// Simulation clock for tracking ticks and elapsed time.
pub mod clock;
/// Configuration types for simulation runs.
pub mod config;
/// Mutable context passed to systems each tick.
pub mod context;
/// Player input system: writes steering commands from movement flags.
pub mod control;
/// Error types for the simulation crate.
pub mod error;
/// Simulation event types and the event log.
pub mod event;
/// Kinematic integrator: turns steering commands into motion.
pub mod integrator;
/// Needs system: drains entity needs over time.
pub mod needs;
/// Provision system: replenishes needs near resource providers.
pub mod provision;
/// Behavior selector: hysteresis between wandering and seeking.
pub mod selector;
/// Top-level simulation orchestrator.
pub mod simulation;
/// Steering evaluators, aggregation and the steering system.
pub mod steering;
/// The trait that all simulation systems implement.
pub mod system;

/// Re-export of [`bounds::WorldBounds`].
pub use bounds::WorldBounds;
/// Re-export of [`clock::SimClock`].
pub use clock::SimClock;
/// Re-exports of configuration types.
pub use config::{AggregationPolicy, AggregatorConfig, SimConfig};
/// Re-export of [`context::SimContext`].
pub use context::SimContext;
/// Re-export of [`control::PlayerControlSystem`].
pub use control::PlayerControlSystem;
/// Re-exports of [`error::SimError`] and [`error::SimResult`].
pub use error::{SimError, SimResult};
/// Re-exports of [`event::EventLog`], [`event::SimEvent`], and [`event::SimEventKind`].
pub use event::{EventLog, SimEvent, SimEventKind};
/// Re-export of [`integrator::Integrator`].
pub use integrator::Integrator;
/// Re-export of [`needs::NeedsSystem`].
pub use needs::NeedsSystem;
/// Re-export of [`provision::ProvisionSystem`].
pub use provision::ProvisionSystem;
/// Re-export of [`selector::BehaviorSelector`].
pub use selector::BehaviorSelector;
/// Re-export of [`simulation::Simulation`].
pub use simulation::Simulation;
/// Re-exports of the steering system and evaluator snapshot.
pub use steering::{Agent, SteeringSystem};
/// Re-exports of [`system::System`] and [`system::Stage`].
pub use system::{Stage, System};
