//! Card power values and the power model.
//!
//! A card's effective power is always recomputed from scratch:
//!
//! ```text
//! current = clamp_min_0(base + enhancements + sum(active temporary effects))
//! ```
//!
//! Nothing patches `current_power` incrementally, so there is no drift to
//! reconcile after effects expire.

use serde::{Deserialize, Serialize};

use super::effect::TemporaryEffect;
use crate::board::Direction;

/// Per-edge power of a card.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PowerValues {
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
    pub left: i32,
}

impl PowerValues {
    /// Create power values.
    #[must_use]
    pub const fn new(top: i32, right: i32, bottom: i32, left: i32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Same value on every edge.
    #[must_use]
    pub const fn uniform(value: i32) -> Self {
        Self::new(value, value, value, value)
    }

    /// The edge facing `direction`.
    #[must_use]
    pub fn edge(&self, direction: Direction) -> i32 {
        match direction {
            Direction::Up => self.top,
            Direction::Right => self.right,
            Direction::Down => self.bottom,
            Direction::Left => self.left,
        }
    }

    /// Sum of all four edges.
    #[must_use]
    pub fn total(&self) -> i32 {
        self.top + self.right + self.bottom + self.left
    }

    /// Apply a delta edge by edge.
    #[must_use]
    pub fn apply(self, delta: &PowerDelta) -> Self {
        Self {
            top: self.top + delta.top,
            right: self.right + delta.right,
            bottom: self.bottom + delta.bottom,
            left: self.left + delta.left,
        }
    }

    /// Clamp every edge to a minimum of zero.
    #[must_use]
    pub fn clamped(self) -> Self {
        Self {
            top: self.top.max(0),
            right: self.right.max(0),
            bottom: self.bottom.max(0),
            left: self.left.max(0),
        }
    }
}

/// A partial per-edge power change. Missing edges deserialize as zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct PowerDelta {
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
    pub left: i32,
}

impl PowerDelta {
    /// Create a delta.
    #[must_use]
    pub const fn new(top: i32, right: i32, bottom: i32, left: i32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Same change on every edge.
    #[must_use]
    pub const fn uniform(value: i32) -> Self {
        Self::new(value, value, value, value)
    }

    /// Change on a single edge.
    #[must_use]
    pub fn on_edge(direction: Direction, value: i32) -> Self {
        let mut delta = Self::default();
        match direction {
            Direction::Up => delta.top = value,
            Direction::Right => delta.right = value,
            Direction::Down => delta.bottom = value,
            Direction::Left => delta.left = value,
        }
        delta
    }

    /// Check if every edge is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        *self == Self::default()
    }

    /// Sum two deltas.
    #[must_use]
    pub fn plus(self, other: &PowerDelta) -> Self {
        Self {
            top: self.top + other.top,
            right: self.right + other.right,
            bottom: self.bottom + other.bottom,
            left: self.left + other.left,
        }
    }

    /// Negate every edge.
    #[must_use]
    pub fn negated(self) -> Self {
        Self::new(-self.top, -self.right, -self.bottom, -self.left)
    }

    /// Net change across all edges.
    #[must_use]
    pub fn total(&self) -> i32 {
        self.top + self.right + self.bottom + self.left
    }
}

/// Compute a card's effective power.
///
/// Starts from `base`, adds permanent `enhancements`, then every temporary
/// effect's delta. Expired effects (duration 0) contribute nothing.
/// The result is clamped to a minimum of zero per edge.
///
/// ```
/// use mythic_triad::effects::{compute_current_power, PowerDelta, PowerValues, TemporaryEffect};
///
/// let base = PowerValues::new(3, 3, 3, 3);
/// let weaken = TemporaryEffect::debuff(PowerDelta::uniform(-5), 2);
/// let power = compute_current_power(&base, &PowerDelta::default(), &[weaken]);
/// assert_eq!(power, PowerValues::uniform(0));
/// ```
#[must_use]
pub fn compute_current_power(
    base: &PowerValues,
    enhancements: &PowerDelta,
    temporary_effects: &[TemporaryEffect],
) -> PowerValues {
    temporary_effects
        .iter()
        .filter(|effect| effect.is_active())
        .fold(base.apply(enhancements), |power, effect| power.apply(&effect.power))
        .clamped()
}
