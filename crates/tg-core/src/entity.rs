use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable identifier for every entity in a [`World`](crate::world::World).
///
/// Ids are allocated monotonically by the world and never reused, so a stale
/// id held by another component simply fails to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u64);

impl EntityId {
    /// Return the raw numeric id.
    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u64> for EntityId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}
