use std::fmt;

use crate::context::SimContext;
use crate::error::SimResult;

/// Where a system runs within a tick.
///
/// Stages run in declaration order; systems sharing a stage keep their
/// registration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stage {
    /// Drain needs over time.
    Needs,
    /// Replenish needs near providers.
    Provision,
    /// Choose the behaviour for the tick.
    Selection,
    /// Evaluate and aggregate steering.
    Steering,
    /// Translate direct input into steering commands.
    Control,
    /// Integrate motion from steering commands.
    Integration,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Needs => write!(f, "needs"),
            Self::Provision => write!(f, "provision"),
            Self::Selection => write!(f, "selection"),
            Self::Steering => write!(f, "steering"),
            Self::Control => write!(f, "control"),
            Self::Integration => write!(f, "integration"),
        }
    }
}

/// A simulation subsystem that runs each tick.
///
/// Systems are executed by [`Stage`], then in registration order. Each system
/// receives a mutable context providing access to the world, clock, RNG,
/// configuration, and event log.
pub trait System: fmt::Debug {
    /// Human-readable name for this system.
    fn name(&self) -> &str;

    /// The stage this system belongs to.
    fn stage(&self) -> Stage;

    /// Called once per tick.
    fn tick(&mut self, ctx: &mut SimContext<'_>) -> SimResult<()>;

    /// Called once before the first tick. Optional setup hook.
    fn init(&mut self, _ctx: &mut SimContext<'_>) -> SimResult<()> {
        Ok(())
    }

    /// Support downcasting to concrete types for cross-system communication.
    fn as_any(&self) -> &dyn std::any::Any;

    /// Support downcasting to concrete types for cross-system communication.
    fn as_any_mut(&mut self) -> &mut dyn std::any::Any;
}
