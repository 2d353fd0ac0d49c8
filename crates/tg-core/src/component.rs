use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::entity::EntityId;
use crate::error::{CoreError, CoreResult};
use crate::needs::ResourceKind;

// ---------------------------------------------------------------------------
// Position & kinematics
// ---------------------------------------------------------------------------

/// World-unit coordinates of an entity. Written only by the integrator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn as_vec2(self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

impl From<Vec2> for Position {
    fn from(v: Vec2) -> Self {
        Self { x: v.x, y: v.y }
    }
}

/// Orientation, linear velocity and angular velocity of a moving entity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Kinematics {
    /// Facing in radians, kept in `(-PI, PI]` by the integrator.
    pub orientation: f32,
    /// Linear velocity in world units per second.
    pub velocity: Vec2,
    /// Angular velocity in radians per second.
    pub rotation: f32,
}

impl Kinematics {
    /// A stationary entity facing `orientation`.
    pub fn facing(orientation: f32) -> Self {
        Self {
            orientation,
            ..Self::default()
        }
    }

    /// A non-rotating entity moving with `velocity`.
    pub fn moving(velocity: Vec2) -> Self {
        Self {
            velocity,
            ..Self::default()
        }
    }

    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }
}

/// How the integrator decays velocity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DampingMode {
    /// Linear drag applied every tick, steered or not.
    Drag,
    /// No damping while steered; exponential decay when coasting.
    Friction,
    /// Light drag while steered; exponential decay when coasting.
    #[default]
    Hybrid,
}

/// Per-entity caps on linear and angular motion.
///
/// All magnitudes are expected to be non-negative; see [`MovementLimits::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementLimits {
    pub max_speed: f32,
    pub max_acceleration: f32,
    pub max_rotation: f32,
    pub max_angular_acceleration: f32,
    pub linear_damping: f32,
    pub angular_damping: f32,
    pub damping_mode: DampingMode,
}

impl Default for MovementLimits {
    fn default() -> Self {
        Self {
            max_speed: 100.0,
            max_acceleration: 800.0,
            max_rotation: 5.0,
            max_angular_acceleration: 10.0,
            linear_damping: 0.8,
            angular_damping: 0.9,
            damping_mode: DampingMode::Hybrid,
        }
    }
}

impl MovementLimits {
    /// Reject negative (or NaN) magnitudes.
    pub fn validate(&self) -> CoreResult<()> {
        let fields = [
            ("max_speed", self.max_speed),
            ("max_acceleration", self.max_acceleration),
            ("max_rotation", self.max_rotation),
            ("max_angular_acceleration", self.max_angular_acceleration),
            ("linear_damping", self.linear_damping),
            ("angular_damping", self.angular_damping),
        ];
        for (name, value) in fields {
            if value.is_nan() || value < 0.0 {
                return Err(CoreError::invalid(
                    "MovementLimits",
                    format!("{name} must be non-negative, got {value}"),
                ));
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Behaviour
// ---------------------------------------------------------------------------

/// What an entity is currently trying to do.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Behaviour {
    /// Stand still; no evaluator contributes.
    #[default]
    Idle,
    /// Roam with persistent steering noise.
    Wander {
        /// Offset from the current facing, kept within the wander arc.
        wander_angle: f32,
    },
    /// Head for a resource provider.
    Seek {
        /// The provider being approached. May no longer exist.
        target: EntityId,
        /// The need that triggered the seek.
        seeking_need: ResourceKind,
    },
}

impl Behaviour {
    /// Start wandering straight ahead.
    pub fn wander() -> Self {
        Self::Wander { wander_angle: 0.0 }
    }

    /// Short name of the current mode.
    pub fn mode(&self) -> BehaviourMode {
        match self {
            Self::Idle => BehaviourMode::Idle,
            Self::Wander { .. } => BehaviourMode::Wander,
            Self::Seek { .. } => BehaviourMode::Seek,
        }
    }

    /// The seek target, if seeking.
    pub fn target(&self) -> Option<EntityId> {
        match self {
            Self::Seek { target, .. } => Some(*target),
            _ => None,
        }
    }

    /// The resource being sought, if seeking.
    pub fn seeking_need(&self) -> Option<&ResourceKind> {
        match self {
            Self::Seek { seeking_need, .. } => Some(seeking_need),
            _ => None,
        }
    }
}

/// Payload-free discriminant of [`Behaviour`], for display and matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BehaviourMode {
    Idle,
    Wander,
    Seek,
}

impl fmt::Display for BehaviourMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Wander => write!(f, "wander"),
            Self::Seek => write!(f, "seek"),
        }
    }
}

// ---------------------------------------------------------------------------
// Steering output
// ---------------------------------------------------------------------------

/// Which producer a steering contribution came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SteeringTag {
    Wander,
    Arrive,
    Avoidance,
    Flee,
    Player,
}

impl fmt::Display for SteeringTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Wander => write!(f, "wander"),
            Self::Arrive => write!(f, "arrive"),
            Self::Avoidance => write!(f, "avoidance"),
            Self::Flee => write!(f, "flee"),
            Self::Player => write!(f, "player"),
        }
    }
}

/// One candidate acceleration proposed for one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SteeringContribution {
    /// Linear acceleration (world units / s^2).
    pub linear: Vec2,
    /// Angular acceleration (rad / s^2).
    pub angular: f32,
    /// Blend weight.
    pub weight: f32,
    /// Priority used by suppression and priority-dominant aggregation.
    pub priority: u32,
    pub tag: SteeringTag,
}

/// The aggregated per-tick command consumed by the integrator.
///
/// Recomputed every tick; `contributions` is kept only so debug overlays can
/// draw the individual vectors.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SteeringCommand {
    pub linear: Vec2,
    pub angular: f32,
    pub contributions: Vec<SteeringContribution>,
}

impl SteeringCommand {
    /// A command with no contributions.
    pub fn new(linear: Vec2, angular: f32) -> Self {
        Self {
            linear,
            angular,
            contributions: Vec::new(),
        }
    }

    /// Whether a contribution with `tag` took part in this command.
    pub fn has_contribution(&self, tag: SteeringTag) -> bool {
        self.contributions.iter().any(|c| c.tag == tag)
    }
}

// ---------------------------------------------------------------------------
// Player input
// ---------------------------------------------------------------------------

/// Eight-way movement flags written by the input collaborator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerControl {
    pub move_up: bool,
    pub move_down: bool,
    pub move_left: bool,
    pub move_right: bool,
}

impl PlayerControl {
    /// Screen-space move direction (y grows downward), unit length on diagonals.
    pub fn move_vector(&self) -> Vec2 {
        let axis = |pos: bool, neg: bool| match (pos, neg) {
            (true, false) => 1.0,
            (false, true) => -1.0,
            _ => 0.0,
        };
        let v = Vec2::new(
            axis(self.move_right, self.move_left),
            axis(self.move_down, self.move_up),
        );
        if v.x != 0.0 && v.y != 0.0 {
            v * std::f32::consts::FRAC_1_SQRT_2
        } else {
            v
        }
    }
}
