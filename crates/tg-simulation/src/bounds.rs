use glam::Vec2;
use serde::{Deserialize, Serialize};

/// The rectangular world the agents live in, in world units.
///
/// Near each wall lies a buffer band. [`WorldBounds::proximity`] measures how
/// deep a point sits in that band: 0 outside it, rising linearly to 1 at the
/// wall (and beyond).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldBounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl Default for WorldBounds {
    fn default() -> Self {
        Self::new(1000.0, 1000.0)
    }
}

impl WorldBounds {
    /// Bounds spanning `[0, width] x [0, height]`.
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            min: Vec2::ZERO,
            max: Vec2::new(width, height),
        }
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    pub fn contains(&self, point: Vec2) -> bool {
        (self.min.x..=self.max.x).contains(&point.x) && (self.min.y..=self.max.y).contains(&point.y)
    }

    /// Depth of `point` inside the buffer band of the nearest wall, in `[0, 1]`.
    pub fn proximity(&self, point: Vec2, buffer: f32) -> f32 {
        let (px, _) = axis_proximity(point.x, self.min.x, self.max.x, buffer);
        let (py, _) = axis_proximity(point.y, self.min.y, self.max.y, buffer);
        px.max(py)
    }

    /// Unit direction pointing away from the walls whose band contains `point`.
    ///
    /// Near a corner this is the direction to the world center rather than the
    /// sum of the two wall normals. Outside every band it also points at the
    /// center, or is zero at the center itself.
    pub fn inward_normal(&self, point: Vec2, buffer: f32) -> Vec2 {
        let (px, sx) = axis_proximity(point.x, self.min.x, self.max.x, buffer);
        let (py, sy) = axis_proximity(point.y, self.min.y, self.max.y, buffer);
        match (px > 0.0, py > 0.0) {
            (true, false) => Vec2::new(sx, 0.0),
            (false, true) => Vec2::new(0.0, sy),
            (true, true) => {
                let to_center = (self.center() - point).normalize_or_zero();
                if to_center == Vec2::ZERO {
                    Vec2::new(sx, sy).normalize_or_zero()
                } else {
                    to_center
                }
            }
            (false, false) => (self.center() - point).normalize_or_zero(),
        }
    }

    /// Clamp `point` into the safe rectangle `[min + buffer, max - buffer]`.
    ///
    /// When the buffer is wider than half the world the safe range collapses
    /// to the center line of that axis.
    pub fn clamp_inside(&self, point: Vec2, buffer: f32) -> Vec2 {
        Vec2::new(
            clamp_axis(point.x, self.min.x + buffer, self.max.x - buffer),
            clamp_axis(point.y, self.min.y + buffer, self.max.y - buffer),
        )
    }
}

/// Proximity along one axis plus the inward sign of the nearer wall.
fn axis_proximity(coord: f32, lo: f32, hi: f32, buffer: f32) -> (f32, f32) {
    let to_lo = coord - lo;
    let to_hi = hi - coord;
    let (nearest, sign) = if to_lo <= to_hi {
        (to_lo, 1.0)
    } else {
        (to_hi, -1.0)
    };
    let proximity = if buffer > 0.0 {
        ((buffer - nearest) / buffer).clamp(0.0, 1.0)
    } else if nearest <= 0.0 {
        1.0
    } else {
        0.0
    };
    (proximity, sign)
}

fn clamp_axis(value: f32, lo: f32, hi: f32) -> f32 {
    if lo > hi {
        (lo + hi) * 0.5
    } else {
        value.max(lo).min(hi)
    }
}
