//! Per-behavior steering tuning attached at spawn time.

use serde::{Deserialize, Serialize};

/// Parameters of the shared align law that turns an orientation error into
/// angular acceleration. Entities without this component use the defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlignSteering {
    /// Below this error (rad) the entity just brakes its rotation.
    pub angular_target_radius: f32,
    /// Within this error (rad) the target rotation scales down.
    pub angular_slow_radius: f32,
    /// Time constant (s) for reaching the target rotation.
    pub angular_time_to_target: f32,
}

impl Default for AlignSteering {
    fn default() -> Self {
        Self {
            angular_target_radius: 0.05,
            angular_slow_radius: 0.6,
            angular_time_to_target: 0.1,
        }
    }
}

/// Tuning for the wander behavior.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WanderSteering {
    /// Radius of the projected wander circle.
    pub radius: f32,
    /// Distance ahead of the entity to the circle center.
    pub distance: f32,
    /// Maximum rate of wander-angle perturbation (rad/s).
    pub jitter: f32,
    pub time_to_target: f32,
    /// Mean-reversion rate pulling the wander angle back to zero (1/s).
    pub decay_per_sec: f32,
    /// Largest allowed wander angle either side of forward (rad).
    pub max_arc: f32,
    /// Wander speed; falls back to 60% of max speed when unset.
    pub cruise_speed: Option<f32>,
    pub weight: f32,
    pub priority: u32,
}

impl Default for WanderSteering {
    fn default() -> Self {
        Self {
            radius: 108.0,
            distance: 60.0,
            jitter: 4.4,
            time_to_target: 0.25,
            decay_per_sec: 2.0,
            max_arc: 1.2,
            cruise_speed: None,
            weight: 1.0,
            priority: 10,
        }
    }
}

impl WanderSteering {
    /// Effective cruise speed given the entity's speed cap.
    pub fn cruise_speed(&self, max_speed: f32) -> f32 {
        self.cruise_speed.unwrap_or(0.6 * max_speed).min(max_speed)
    }
}

/// Tuning for arriving at a seek target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArriveSteering {
    /// Inside this distance the desired speed is zero.
    pub target_radius: f32,
    /// Inside this distance the desired speed scales with distance.
    pub slow_radius: f32,
    pub time_to_target: f32,
    pub weight: f32,
    pub priority: u32,
}

impl Default for ArriveSteering {
    fn default() -> Self {
        Self {
            target_radius: 6.0,
            slow_radius: 40.0,
            time_to_target: 0.25,
            weight: 1.0,
            priority: 20,
        }
    }
}

/// Tuning for keeping away from the world edges.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoundaryAvoidance {
    /// Probe distance ahead of the entity; speed-scaled when unset.
    pub look_ahead: Option<f32>,
    /// Width of the band along each wall where avoidance is active.
    pub buffer: f32,
    /// Peak avoidance acceleration.
    pub strength: f32,
    /// Multiplier on the align-law angular response.
    pub angular_scale: f32,
    pub weight: f32,
    pub priority: u32,
}

impl Default for BoundaryAvoidance {
    fn default() -> Self {
        Self {
            look_ahead: None,
            buffer: 30.0,
            strength: 4900.0,
            angular_scale: 23.6,
            weight: 1.0,
            priority: 200,
        }
    }
}

impl BoundaryAvoidance {
    /// Look-ahead distance for the given speeds.
    pub fn look_ahead(&self, speed: f32, max_speed: f32) -> f32 {
        self.look_ahead
            .unwrap_or_else(|| (0.8 * speed + 0.2 * max_speed).clamp(60.0, 220.0))
    }
}

/// Run away from player-controlled entities that come too close.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FleeFromPlayer {
    pub safe_distance: f32,
    pub weight: f32,
    pub priority: u32,
}

impl Default for FleeFromPlayer {
    fn default() -> Self {
        Self {
            safe_distance: 120.0,
            weight: 1.0,
            priority: 50,
        }
    }
}
