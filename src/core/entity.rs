//! Card identification.
//!
//! Two kinds of ids flow through a match:
//!
//! - [`InstanceId`]: one physical copy of a card owned by a user
//!   (`user_card_instance_id`). Hands, decks, the board and the hydration
//!   cache are all keyed by this id.
//! - [`BaseCardId`]: the immutable base definition an instance was printed
//!   from (`base_card_id`). Many instances share one base card.
//!
//! ```
//! use mythic_triad::core::{BaseCardId, InstanceId};
//!
//! let copy = InstanceId::new(7);
//! let base = BaseCardId::new(3);
//! assert_eq!(format!("{copy}"), "Instance(7)");
//! assert_eq!(base.raw(), 3);
//! ```

use serde::{Deserialize, Serialize};

/// Identifier of a single card instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct InstanceId(pub u32);

impl InstanceId {
    /// Create an instance id.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw id value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl From<u32> for InstanceId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for InstanceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Instance({})", self.0)
    }
}

/// Identifier of a base card definition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BaseCardId(pub u32);

impl BaseCardId {
    /// Create a base card id.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw id value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for BaseCardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "BaseCard({})", self.0)
    }
}
