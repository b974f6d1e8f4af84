//! Trigger moments, display events and the trigger pipeline.
//!
//! ## Components
//!
//! - [`TriggerMoment`] / [`DeclaredTrigger`]: when abilities fire
//! - [`GameEvent`] / [`EventKind`]: what the transport layer animates
//! - [`fire`]: routes a moment to every listening ability, in order

mod event;
mod moment;
mod pipeline;

pub use event::{batch_events, EventKind, GameEvent};
pub use moment::{DeclaredTrigger, TriggerMoment, TriggerScope};
pub use pipeline::{fire, Trigger};
