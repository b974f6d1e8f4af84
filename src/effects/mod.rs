//! Power model and temporary effects.
//!
//! - `PowerValues` / `PowerDelta`: per-edge numbers
//! - `compute_current_power`: the pure power model
//! - `TemporaryEffect`: timed buffs, debuffs and protections
//! - `mutation`: the buff/debuff helpers abilities use to change cards
//!
//! ## Design Philosophy
//!
//! Effects never patch a card's power directly. They are appended to the
//! card's effect list and the power model recomputes the total.

mod effect;
pub mod mutation;
mod power;

pub use effect::{EffectKind, TemporaryEffect};
pub use mutation::{add_status, add_temp_buff, add_temp_debuff, buff, debuff, strip_buffs};
pub use power::{compute_current_power, PowerDelta, PowerValues};
