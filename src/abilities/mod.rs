//! Card abilities.
//!
//! ## Layout
//!
//! - [`AbilityId`] / [`AbilityKey`]: the closed set of built-in abilities
//! - [`AbilityDescriptor`]: what a card definition says about its ability
//! - [`AbilityContext`]: the only way a handler changes the match
//! - [`AbilityTable`]: handler dispatch
//!
//! Handlers live in one file per pantheon and register themselves through
//! [`AbilityTable::standard`].

mod context;
mod descriptor;
mod egyptian;
mod greek;
mod id;
mod japanese;
mod norse;
mod table;

pub use context::AbilityContext;
pub use descriptor::{AbilityDescriptor, RawAbilityDescriptor, RawTriggerMoments};
pub use id::{AbilityId, AbilityKey, UnknownAbility};
pub use table::{AbilityFn, AbilityTable, InterceptFn};
