use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::math::clamp_range;

/// A kind of resource an entity can need and a provider can supply.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Food,
    Water,
    Custom(String),
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Food => write!(f, "food"),
            Self::Water => write!(f, "water"),
            Self::Custom(s) => write!(f, "{s}"),
        }
    }
}

/// A depleting scalar resource level with seek/satiation thresholds.
///
/// Invariant: `min <= value <= max`. Both thresholds are fractions of `max`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Need {
    pub name: ResourceKind,
    pub value: f32,
    pub min: f32,
    pub max: f32,
    /// Depletion rate; zero means the need never depletes.
    pub loss_per_second: f32,
    /// Start seeking when `value < max * seek_at_fraction`.
    pub seek_at_fraction: f32,
    /// Stop seeking once `value >= max * satiated_at_fraction`.
    pub satiated_at_fraction: f32,
}

impl Need {
    /// A need on a `0..=max` scale with the common 0.3 / 0.9 thresholds.
    pub fn new(name: ResourceKind, value: f32, max: f32) -> Self {
        Self {
            name,
            value: clamp_range(value, 0.0, max),
            min: 0.0,
            max,
            loss_per_second: 0.0,
            seek_at_fraction: 0.3,
            satiated_at_fraction: 0.9,
        }
    }

    /// Set the depletion rate.
    pub fn with_loss_per_second(mut self, loss: f32) -> Self {
        self.loss_per_second = loss;
        self
    }

    /// Set both hysteresis thresholds.
    pub fn with_thresholds(mut self, seek_at: f32, satiated_at: f32) -> Self {
        self.seek_at_fraction = seek_at;
        self.satiated_at_fraction = satiated_at;
        self
    }

    /// Value below which the entity starts seeking.
    pub fn seek_threshold(&self) -> f32 {
        self.max * self.seek_at_fraction
    }

    /// Value at or above which the need counts as satisfied.
    pub fn satiation_threshold(&self) -> f32 {
        self.max * self.satiated_at_fraction
    }

    pub fn needs_seeking(&self) -> bool {
        self.value < self.seek_threshold()
    }

    pub fn is_satiated(&self) -> bool {
        self.value >= self.satiation_threshold()
    }

    pub fn is_full(&self) -> bool {
        self.value >= self.max
    }

    /// Deplete by `loss_per_second * dt`, clamped into `[min, max]`.
    pub fn deplete(&mut self, dt: f32) {
        self.value = clamp_range(self.value - self.loss_per_second * dt, self.min, self.max);
    }

    /// Add `amount`, never exceeding `max`. Returns the value actually added.
    pub fn replenish(&mut self, amount: f32) -> f32 {
        let before = self.value;
        self.value = clamp_range(self.value + amount, self.min, self.max);
        self.value - before
    }

    /// Check the range and threshold invariants.
    pub fn validate(&self) -> CoreResult<()> {
        if self.min > self.max {
            return Err(CoreError::invalid(
                "Need",
                format!("{}: min {} exceeds max {}", self.name, self.min, self.max),
            ));
        }
        if self.value < self.min || self.value > self.max {
            return Err(CoreError::invalid(
                "Need",
                format!(
                    "{}: value {} outside [{}, {}]",
                    self.name, self.value, self.min, self.max
                ),
            ));
        }
        if self.loss_per_second < 0.0 {
            return Err(CoreError::invalid(
                "Need",
                format!("{}: negative loss rate", self.name),
            ));
        }
        for (label, fraction) in [
            ("seek_at_fraction", self.seek_at_fraction),
            ("satiated_at_fraction", self.satiated_at_fraction),
        ] {
            if !(0.0..=1.0).contains(&fraction) {
                return Err(CoreError::invalid(
                    "Need",
                    format!("{}: {label} {fraction} outside [0, 1]", self.name),
                ));
            }
        }
        Ok(())
    }
}

/// Ordered list of an entity's needs. Order is the seek tie-break.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Needs(pub Vec<Need>);

impl Needs {
    pub fn new(needs: Vec<Need>) -> Self {
        Self(needs)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Need> {
        self.0.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Need> {
        self.0.iter_mut()
    }

    /// First need with the given name.
    pub fn get(&self, kind: &ResourceKind) -> Option<&Need> {
        self.0.iter().find(|n| &n.name == kind)
    }

    /// First need with the given name, mutably.
    pub fn get_mut(&mut self, kind: &ResourceKind) -> Option<&mut Need> {
        self.0.iter_mut().find(|n| &n.name == kind)
    }

    /// The first need, in list order, that has dropped below its seek threshold.
    pub fn most_pressing(&self) -> Option<&Need> {
        self.0.iter().find(|n| n.needs_seeking())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Validate every entry.
    pub fn validate(&self) -> CoreResult<()> {
        self.0.iter().try_for_each(Need::validate)
    }
}

impl FromIterator<Need> for Needs {
    fn from_iter<I: IntoIterator<Item = Need>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// A stationary source that replenishes matching needs of anyone in range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PassiveResourceProvider {
    pub provides: BTreeSet<ResourceKind>,
    pub radius: f32,
    pub provided_per_second: f32,
}

impl PassiveResourceProvider {
    /// A provider of a single resource kind.
    pub fn single(kind: ResourceKind, radius: f32, provided_per_second: f32) -> Self {
        Self {
            provides: BTreeSet::from([kind]),
            radius,
            provided_per_second,
        }
    }

    pub fn provides(&self, kind: &ResourceKind) -> bool {
        self.provides.contains(kind)
    }
}
