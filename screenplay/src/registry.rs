//! Per-actor ability registry
//!
//! Maps [`AbilityKey`]s to granted instances. Registration rejects
//! duplicate keys; resolution happens lazily, when an activity asks for an
//! ability while it runs.

use crate::ability::{Ability, AbilityKey, Grant};
use crate::error::{ScreenplayError, ScreenplayResult};
use std::any::Any;
use std::collections::HashMap;

/// Abilities granted to one actor
#[derive(Debug, Default)]
pub struct AbilityRegistry {
    entries: HashMap<AbilityKey, Grant>,
}

impl AbilityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a grant
    ///
    /// Fails with [`ScreenplayError::DuplicateAbility`] if the key is taken;
    /// the existing entry is left untouched.
    pub fn grant(&mut self, grant: Grant) -> ScreenplayResult<()> {
        if self.entries.contains_key(grant.key()) {
            return Err(ScreenplayError::DuplicateAbility {
                key: grant.key().clone(),
            });
        }

        tracing::debug!(key = %grant.key(), type_name = grant.type_name(), "granted ability");
        self.entries.insert(grant.key().clone(), grant);
        Ok(())
    }

    /// Resolve an ability by type and optional alias
    pub fn resolve<A: Ability>(&self, alias: Option<&str>) -> ScreenplayResult<&A> {
        let key = AbilityKey::new(A::NAME, alias);
        let grant = self
            .entries
            .get(&key)
            .ok_or_else(|| ScreenplayError::MissingAbility { key: key.clone() })?;

        grant
            .downcast_ref::<A>()
            .ok_or(ScreenplayError::AbilityMismatch {
                key,
                expected: std::any::type_name::<A>(),
            })
    }

    /// Resolve an ability by tag without knowing its type
    pub fn resolve_untyped(
        &self,
        name: &str,
        alias: Option<&str>,
    ) -> ScreenplayResult<&(dyn Any + Send + Sync)> {
        let key = AbilityKey::new(name, alias);
        self.entries
            .get(&key)
            .map(Grant::instance)
            .ok_or(ScreenplayError::MissingAbility { key })
    }

    pub fn contains(&self, name: &str, alias: Option<&str>) -> bool {
        self.entries.contains_key(&AbilityKey::new(name, alias))
    }

    /// Registered keys, sorted
    pub fn keys(&self) -> Vec<&AbilityKey> {
        let mut keys: Vec<_> = self.entries.keys().collect();
        keys.sort();
        keys
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
