use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::bounds::WorldBounds;
use crate::error::SimResult;

/// How the aggregator reduces several contributions to one command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AggregationPolicy {
    /// Weight-normalized sum of every contribution.
    #[default]
    WeightedBlend,
    /// Use the highest-priority contribution alone when its priority is
    /// strictly above `floor`; blend otherwise.
    PriorityDominant {
        /// Exclusive control needs a priority above this value.
        floor: u32,
    },
}

/// Tuning for the steering aggregator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregatorConfig {
    pub policy: AggregationPolicy,
    /// An avoidance contribution at or above this priority suppresses wander.
    pub avoidance_suppression_priority: u32,
    /// Factor applied to wander weight while suppressed.
    pub wander_suppression: f32,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            policy: AggregationPolicy::WeightedBlend,
            avoidance_suppression_priority: 100,
            wander_suppression: 0.25,
        }
    }
}

/// Configuration for a simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for deterministic simulation.
    pub seed: u64,
    /// World extent in world units; the world spans `[0, size]` on each axis.
    pub world_size: Vec2,
    /// Buffer band width used by wander for entities without boundary avoidance.
    pub default_boundary_buffer: f32,
    /// Maximum event log size (oldest events dropped when exceeded). 0 = unlimited.
    pub max_events: usize,
    pub aggregator: AggregatorConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            world_size: Vec2::new(1000.0, 1000.0),
            default_boundary_buffer: 30.0,
            max_events: 0,
            aggregator: AggregatorConfig::default(),
        }
    }
}

impl SimConfig {
    /// Parse a configuration from JSON; missing fields take their defaults.
    pub fn from_json_str(json: &str) -> SimResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Set the RNG seed for deterministic simulation.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the world extent.
    pub fn with_world_size(mut self, width: f32, height: f32) -> Self {
        self.world_size = Vec2::new(width, height);
        self
    }

    /// Set the maximum event log size (0 = unlimited).
    pub fn with_max_events(mut self, max: usize) -> Self {
        self.max_events = max;
        self
    }

    /// Select the aggregation policy.
    pub fn with_aggregation_policy(mut self, policy: AggregationPolicy) -> Self {
        self.aggregator.policy = policy;
        self
    }

    /// The world rectangle described by `world_size`.
    pub fn bounds(&self) -> WorldBounds {
        WorldBounds::new(self.world_size.x, self.world_size.y)
    }
}
