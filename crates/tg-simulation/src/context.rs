use rand::rngs::StdRng;
use tg_core::world::World;

use crate::bounds::WorldBounds;
use crate::clock::SimClock;
use crate::config::SimConfig;
use crate::event::{EventLog, SimEvent, SimEventKind};

/// Mutable context passed to each system during a tick.
pub struct SimContext<'a> {
    pub world: &'a mut World,
    pub clock: &'a SimClock,
    pub events: &'a mut EventLog,
    pub rng: &'a mut StdRng,
    pub config: &'a SimConfig,
}

impl SimContext<'_> {
    /// Emit a simulation event at the current tick.
    pub fn emit(&mut self, kind: SimEventKind, description: impl Into<String>) {
        self.events
            .push(SimEvent::new(self.clock.tick(), kind, description));
    }

    pub fn tick(&self) -> u64 {
        self.clock.tick()
    }

    /// Length of the current step in seconds.
    pub fn dt(&self) -> f32 {
        self.clock.dt()
    }

    pub fn bounds(&self) -> WorldBounds {
        self.config.bounds()
    }
}
