use tg_core::{EntityId, ResourceKind};

/// What kind of simulation event occurred.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimEventKind {
    // Behaviour
    /// An entity started seeking a provider.
    SeekStarted {
        /// The seeking entity.
        entity: EntityId,
        /// The need being pursued.
        need: ResourceKind,
        /// The chosen provider.
        target: EntityId,
    },
    /// A seeking entity switched to a nearer provider.
    SeekRetargeted {
        /// The seeking entity.
        entity: EntityId,
        /// The previous provider.
        from: EntityId,
        /// The new provider.
        to: EntityId,
    },
    /// An entity stopped seeking and went back to wandering.
    SeekEnded {
        /// The entity that stopped seeking.
        entity: EntityId,
        /// The need that was pursued.
        need: ResourceKind,
    },
    /// A seek target vanished and no replacement provider exists.
    TargetLost {
        /// The seeking entity.
        entity: EntityId,
        /// The provider that no longer resolves.
        target: EntityId,
    },

    // Needs
    /// A provider raised a need across its satiation threshold.
    NeedSatiated {
        /// The entity whose need was satiated.
        entity: EntityId,
        /// The satiated need.
        need: ResourceKind,
        /// The provider that supplied it.
        provider: EntityId,
    },
    /// A need drained down to its minimum.
    NeedDepleted {
        /// The entity whose need was depleted.
        entity: EntityId,
        /// The depleted need.
        need: ResourceKind,
    },

    // Custom
    /// A user-defined event.
    Custom {
        /// A label identifying the custom event type.
        label: String,
        /// The entities involved in this custom event.
        entities: Vec<EntityId>,
    },
}

impl SimEventKind {
    /// Check whether a given entity is involved in this event.
    pub fn involves(&self, id: EntityId) -> bool {
        match self {
            Self::SeekEnded { entity, .. } | Self::NeedDepleted { entity, .. } => *entity == id,
            Self::SeekStarted { entity, target, .. } | Self::TargetLost { entity, target } => {
                *entity == id || *target == id
            }
            Self::SeekRetargeted { entity, from, to } => *entity == id || *from == id || *to == id,
            Self::NeedSatiated {
                entity, provider, ..
            } => *entity == id || *provider == id,
            Self::Custom { entities, .. } => entities.contains(&id),
        }
    }
}

/// A record of something that happened during simulation.
#[derive(Debug, Clone)]
pub struct SimEvent {
    /// The simulation tick when this event occurred.
    pub tick: u64,
    /// The specific kind of event that occurred.
    pub kind: SimEventKind,
    /// A human-readable description of the event.
    pub description: String,
}

impl SimEvent {
    /// Create a new simulation event with the given tick, kind, and description.
    pub fn new(tick: u64, kind: SimEventKind, description: impl Into<String>) -> Self {
        Self {
            tick,
            kind,
            description: description.into(),
        }
    }
}

/// Accumulates events during a simulation run.
#[derive(Debug, Default)]
pub struct EventLog {
    events: Vec<SimEvent>,
    max_events: usize,
}

impl EventLog {
    /// Create a new event log with the given maximum capacity (0 = unlimited).
    pub fn new(max_events: usize) -> Self {
        Self {
            events: Vec::new(),
            max_events,
        }
    }

    /// Append an event, dropping the oldest events if the log exceeds its capacity.
    pub fn push(&mut self, event: SimEvent) {
        self.events.push(event);
        if self.max_events > 0 && self.events.len() > self.max_events {
            let drain_count = self.events.len() - self.max_events;
            self.events.drain(..drain_count);
        }
    }

    /// Return a slice of all recorded events.
    pub fn events(&self) -> &[SimEvent] {
        &self.events
    }

    /// Return all events that occurred at the given tick.
    pub fn events_at_tick(&self, tick: u64) -> Vec<&SimEvent> {
        self.events.iter().filter(|e| e.tick == tick).collect()
    }

    /// Return all events involving the given entity.
    pub fn events_for_entity(&self, id: EntityId) -> Vec<&SimEvent> {
        self.events.iter().filter(|e| e.kind.involves(id)).collect()
    }

    /// Return the number of recorded events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Return `true` if no events have been recorded.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Remove all recorded events.
    pub fn clear(&mut self) {
        self.events.clear();
    }
}
