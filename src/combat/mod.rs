//! Combat resolution.
//!
//! - [`resolve_combat`]: the directional scan around a placed card
//! - [`flip_card`]: the flip procedure
//! - [`CombatRequest`] / [`Interception`]: how abilities take part

mod flip;
mod request;
mod resolver;

pub use flip::flip_card;
pub use request::{CombatRequest, Interception};
pub use resolver::resolve_combat;
pub(crate) use resolver::{drain_requests, resolve_combat_queued};
