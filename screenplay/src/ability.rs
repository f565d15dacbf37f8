//! Abilities and the grants that register them
//!
//! An ability is whatever an actor needs to interact with the system under
//! test: a browser session, an HTTP client, a database handle. The engine
//! knows nothing about what an ability does; it only stores instances under
//! a key and hands them back to activities.
//!
//! Every concrete ability supplies an explicit capability tag through
//! [`Ability::NAME`]. The tag, plus an optional alias, forms the
//! [`AbilityKey`] the registry uses.

use std::any::Any;
use std::fmt;

/// A capability an actor can be granted
///
/// # Example
///
/// ```
/// use screenplay::{Ability, AbilityExt, Actor};
///
/// struct CallApi {
///     base_url: String,
/// }
///
/// impl Ability for CallApi {
///     const NAME: &'static str = "CallApi";
/// }
///
/// let mut actor = Actor::named("Tester");
/// actor
///     .can(CallApi { base_url: "http://localhost".into() })
///     .unwrap()
///     .can(CallApi { base_url: "http://staging".into() }.with_alias("staging"))
///     .unwrap();
///
/// let api = actor.ability::<CallApi>(Some("staging")).unwrap();
/// assert_eq!(api.base_url, "http://staging");
/// ```
pub trait Ability: Any + Send + Sync {
    /// Capability tag the ability is registered and resolved under
    const NAME: &'static str;
}

/// Registry key: capability tag plus optional alias
///
/// Renders as `name` or `name-alias`. Keys compare structurally, so a tag
/// containing a dash never collides with an aliased key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AbilityKey {
    name: String,
    alias: Option<String>,
}

impl AbilityKey {
    /// Create a key; an empty alias counts as no alias
    pub fn new(name: impl Into<String>, alias: Option<&str>) -> Self {
        Self {
            name: name.into(),
            alias: alias.filter(|a| !a.is_empty()).map(str::to_string),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }
}

impl fmt::Display for AbilityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.alias {
            Some(alias) => write!(f, "{}-{}", self.name, alias),
            None => write!(f, "{}", self.name),
        }
    }
}

/// A type-erased ability ready to be registered on an actor
pub struct Grant {
    key: AbilityKey,
    type_name: &'static str,
    instance: Box<dyn Any + Send + Sync>,
}

impl Grant {
    /// Register the ability under an alias; an empty alias is ignored
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        let alias = alias.into();
        self.key.alias = (!alias.is_empty()).then_some(alias);
        self
    }

    pub fn key(&self) -> &AbilityKey {
        &self.key
    }

    /// Rust type name of the granted instance
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub(crate) fn downcast_ref<A: Ability>(&self) -> Option<&A> {
        self.instance.downcast_ref::<A>()
    }

    pub(crate) fn instance(&self) -> &(dyn Any + Send + Sync) {
        self.instance.as_ref()
    }
}

impl<A: Ability> From<A> for Grant {
    fn from(ability: A) -> Self {
        Self {
            key: AbilityKey::new(A::NAME, None),
            type_name: std::any::type_name::<A>(),
            instance: Box::new(ability),
        }
    }
}

impl fmt::Debug for Grant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Grant")
            .field("key", &self.key)
            .field("type_name", &self.type_name)
            .finish()
    }
}

/// Builder helpers available on every ability
pub trait AbilityExt: Ability + Sized {
    /// Turn the ability into a grant registered under `alias`
    fn with_alias(self, alias: impl Into<String>) -> Grant {
        Grant::from(self).with_alias(alias)
    }
}

impl<A: Ability> AbilityExt for A {}

#[cfg(test)]
mod tests {
    use super::*;

    struct Browse;

    impl Ability for Browse {
        const NAME: &'static str = "Browse";
    }

    #[test]
    fn test_key_rendering() {
        assert_eq!(AbilityKey::new("Browse", None).to_string(), "Browse");
        assert_eq!(AbilityKey::new("Browse", Some("admin")).to_string(), "Browse-admin");
    }

    #[test]
    fn test_keys_compare_structurally() {
        let dashed = AbilityKey::new("Browse-admin", None);
        let aliased = AbilityKey::new("Browse", Some("admin"));
        assert_eq!(dashed.to_string(), aliased.to_string());
        assert_ne!(dashed, aliased);
    }

    #[test]
    fn test_grant_from_ability() {
        let grant = Grant::from(Browse);
        assert_eq!(grant.key(), &AbilityKey::new("Browse", None));
        assert!(grant.downcast_ref::<Browse>().is_some());

        let aliased = Browse.with_alias("admin");
        assert_eq!(aliased.key().alias(), Some("admin"));
        assert!(aliased.type_name().ends_with("Browse"));
    }

    #[test]
    fn test_empty_alias_is_no_alias() {
        assert_eq!(AbilityKey::new("Browse", Some("")), AbilityKey::new("Browse", None));
        assert_eq!(Browse.with_alias("").key(), &AbilityKey::new("Browse", None));
        assert_eq!(AbilityKey::new("Browse", Some("")).to_string(), "Browse");
    }
}
