//! The ability table.
//!
//! Maps each [`AbilityId`] to its handler and, for abilities that can
//! save a card in combat, an interceptor. Dispatch resolves the source
//! card's [`AbilityKey`]; an unknown name is logged and does nothing.

use rustc_hash::FxHashMap;

use super::context::AbilityContext;
use super::id::{AbilityId, AbilityKey};
use super::{egyptian, greek, japanese, norse};
use crate::combat::{CombatRequest, Interception};
use crate::core::{InstanceId, MatchState};
use crate::triggers::{GameEvent, Trigger, TriggerScope};

/// An ability effect. Returns the display events it caused.
pub type AbilityFn = fn(&mut AbilityContext<'_>) -> Vec<GameEvent>;

/// A combat interceptor. `Some` means the defender survives; the returned
/// events describe what happened instead.
pub type InterceptFn = fn(&mut AbilityContext<'_>, &Interception) -> Option<Vec<GameEvent>>;

#[derive(Clone, Copy)]
struct AbilityEntry {
    handler: AbilityFn,
    interceptor: Option<InterceptFn>,
}

/// Registry of ability handlers.
#[derive(Clone, Default)]
pub struct AbilityTable {
    entries: FxHashMap<AbilityId, AbilityEntry>,
}

impl std::fmt::Debug for AbilityTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut ids: Vec<_> = self.entries.keys().collect();
        ids.sort();
        f.debug_struct("AbilityTable").field("abilities", &ids).finish()
    }
}

impl AbilityTable {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a table with every built-in ability.
    #[must_use]
    pub fn standard() -> Self {
        let mut table = Self::new();
        norse::register(&mut table);
        greek::register(&mut table);
        japanese::register(&mut table);
        egyptian::register(&mut table);
        table
    }

    /// Register a handler, replacing any previous one for `id`.
    pub fn register(&mut self, id: AbilityId, handler: AbilityFn) {
        self.entries.insert(
            id,
            AbilityEntry {
                handler,
                interceptor: None,
            },
        );
    }

    /// Register a handler together with a combat interceptor.
    pub fn register_with_interceptor(
        &mut self,
        id: AbilityId,
        handler: AbilityFn,
        interceptor: InterceptFn,
    ) {
        self.entries.insert(
            id,
            AbilityEntry {
                handler,
                interceptor: Some(interceptor),
            },
        );
    }

    #[must_use]
    pub fn contains(&self, id: AbilityId) -> bool {
        self.entries.contains_key(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn resolve(&self, key: &AbilityKey) -> Option<(AbilityId, AbilityEntry)> {
        match key {
            AbilityKey::Known(id) => match self.entries.get(id) {
                Some(entry) => Some((*id, *entry)),
                None => {
                    log::debug!("no handler registered for '{}'", id);
                    None
                }
            },
            AbilityKey::Unknown(name) => {
                log::debug!("unknown ability '{}' ignored", name);
                None
            }
        }
    }

    /// Run the ability of `source` for `trigger`.
    pub fn fire(
        &self,
        state: &mut MatchState,
        trigger: Trigger,
        source: InstanceId,
        scope: TriggerScope,
        requests: &mut Vec<CombatRequest>,
    ) -> Vec<GameEvent> {
        let Some(key) = state
            .card(source)
            .and_then(|card| card.ability())
            .map(|ability| ability.key.clone())
        else {
            return Vec::new();
        };
        let Some((id, entry)) = self.resolve(&key) else {
            return Vec::new();
        };

        log::trace!("{} fires {} ({:?} {:?})", source, id, scope, trigger.moment);
        let mut ctx = AbilityContext::new(state, trigger, id, source, scope, requests);
        (entry.handler)(&mut ctx)
    }

    /// Check if `protector` has an interceptor.
    #[must_use]
    pub fn has_interceptor(&self, state: &MatchState, protector: InstanceId) -> bool {
        state
            .card(protector)
            .and_then(|card| card.ability())
            .and_then(|ability| ability.key.id())
            .and_then(|id| self.entries.get(&id))
            .is_some_and(|entry| entry.interceptor.is_some())
    }

    /// Offer a winning attack to `protector`'s interceptor.
    pub fn intercept(
        &self,
        state: &mut MatchState,
        trigger: Trigger,
        protector: InstanceId,
        interception: &Interception,
        requests: &mut Vec<CombatRequest>,
    ) -> Option<Vec<GameEvent>> {
        let id = state.card(protector)?.ability()?.key.id()?;
        let interceptor = self.entries.get(&id)?.interceptor?;

        let mut ctx = AbilityContext::new(state, trigger, id, protector, TriggerScope::Own, requests);
        let outcome = interceptor(&mut ctx, interception);
        if outcome.is_some() {
            log::debug!("{} ({}) saved {}", protector, id, interception.defender);
        }
        outcome
    }
}
