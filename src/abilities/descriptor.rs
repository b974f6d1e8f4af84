//! Ability descriptors attached to card definitions.
//!
//! Card data arrives in a loose wire format: `trigger_moments` may be a
//! single string or a list. [`AbilityDescriptor`] deserializes through
//! [`RawAbilityDescriptor`] and validates on the way in, so a malformed
//! trigger is a load error instead of an ability that silently never fires.

use serde::{Deserialize, Serialize};

use super::id::{AbilityId, AbilityKey};
use crate::core::CardDataError;
use crate::triggers::DeclaredTrigger;

/// `trigger_moments` as found in card data.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawTriggerMoments {
    One(String),
    Many(Vec<String>),
}

impl Default for RawTriggerMoments {
    fn default() -> Self {
        RawTriggerMoments::Many(Vec::new())
    }
}

impl RawTriggerMoments {
    fn names(&self) -> Vec<&str> {
        match self {
            RawTriggerMoments::One(name) => vec![name.as_str()],
            RawTriggerMoments::Many(names) => names.iter().map(String::as_str).collect(),
        }
    }
}

/// Unvalidated ability descriptor.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawAbilityDescriptor {
    pub name: String,
    #[serde(default)]
    pub trigger_moments: RawTriggerMoments,
    #[serde(default)]
    pub description: String,
}

/// A validated ability descriptor.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawAbilityDescriptor", into = "RawAbilityDescriptor")]
pub struct AbilityDescriptor {
    pub key: AbilityKey,
    pub triggers: Vec<DeclaredTrigger>,
    pub description: String,
}

impl AbilityDescriptor {
    /// Create a descriptor for a known ability.
    #[must_use]
    pub fn new(id: AbilityId, triggers: &[DeclaredTrigger]) -> Self {
        Self {
            key: AbilityKey::Known(id),
            triggers: triggers.to_vec(),
            description: String::new(),
        }
    }

    /// Set the rules text (builder pattern).
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Validate raw card data.
    ///
    /// Unknown trigger names and empty trigger lists are rejected. Unknown
    /// ability names are kept (and logged) so they dispatch as a no-op.
    pub fn parse(raw: RawAbilityDescriptor) -> Result<Self, CardDataError> {
        let names = raw.trigger_moments.names();
        if names.is_empty() {
            return Err(CardDataError::EmptyTriggerList(raw.name));
        }

        let mut triggers = Vec::with_capacity(names.len());
        for name in names {
            let declared =
                DeclaredTrigger::from_name(name).ok_or_else(|| CardDataError::UnknownTrigger {
                    ability: raw.name.clone(),
                    moment: name.to_string(),
                })?;
            if !triggers.contains(&declared) {
                triggers.push(declared);
            }
        }

        let key = AbilityKey::from(raw.name);
        if let AbilityKey::Unknown(name) = &key {
            log::warn!("ability '{}' is not implemented; it will have no effect", name);
        }

        Ok(Self {
            key,
            triggers,
            description: raw.description,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        self.key.name()
    }

    /// Check if the ability listens for `trigger`.
    #[must_use]
    pub fn declares(&self, trigger: DeclaredTrigger) -> bool {
        self.triggers.contains(&trigger)
    }
}

impl TryFrom<RawAbilityDescriptor> for AbilityDescriptor {
    type Error = CardDataError;

    fn try_from(raw: RawAbilityDescriptor) -> Result<Self, Self::Error> {
        Self::parse(raw)
    }
}

impl From<AbilityDescriptor> for RawAbilityDescriptor {
    fn from(descriptor: AbilityDescriptor) -> Self {
        Self {
            name: descriptor.key.name().to_string(),
            trigger_moments: RawTriggerMoments::Many(
                descriptor.triggers.iter().map(|t| t.name().to_string()).collect(),
            ),
            description: descriptor.description,
        }
    }
}
