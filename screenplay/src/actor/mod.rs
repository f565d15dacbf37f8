//! Actors
//!
//! An actor is the subject of a scenario. It owns:
//! - A set of named attributes (always including `name`)
//! - An [`AbilityRegistry`] of granted abilities
//! - Optionally, a private [`EventPipeline`]
//!
//! Activities run through an [`ActorContext`], which adds the execution
//! state (nesting depth, active alias) on top of the actor.

mod context;

pub use context::ActorContext;

use crate::ability::{Ability, AbilityKey, Grant};
use crate::activity::{Performable, Question};
use crate::error::ScreenplayResult;
use crate::events::EventPipeline;
use crate::registry::AbilityRegistry;
use crate::types::Depth;
use serde_json::Value;
use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

/// The execution subject of a scenario
#[derive(Debug)]
pub struct Actor {
    /// Attribute collection, always holding `name`
    attributes: HashMap<String, Value>,
    /// Granted abilities
    abilities: AbilityRegistry,
    /// Private pipeline; the global one is used when absent
    pipeline: Option<Arc<EventPipeline>>,
}

impl Actor {
    /// Create a new actor with the given name
    pub fn named(name: impl Into<String>) -> Self {
        let mut attributes = HashMap::new();
        attributes.insert("name".to_string(), Value::String(name.into()));

        Self {
            attributes,
            abilities: AbilityRegistry::new(),
            pipeline: None,
        }
    }

    /// Store an attribute
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set_attribute(key, value);
        self
    }

    /// Store `username` and `password` attributes
    pub fn with_credentials(self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.with("username", username.into())
            .with("password", password.into())
    }

    /// Route this actor's events to `pipeline`
    pub fn with_pipeline(mut self, pipeline: Arc<EventPipeline>) -> Self {
        self.pipeline = Some(pipeline);
        self
    }

    pub fn set_attribute(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.attributes.insert(key.into(), value.into());
    }

    /// Get an attribute
    pub fn states(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    pub fn attributes(&self) -> &HashMap<String, Value> {
        &self.attributes
    }

    /// The actor's name, empty if the attribute was overwritten with a non-string
    pub fn name(&self) -> &str {
        self.attributes
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    /// Grant an ability
    ///
    /// Fails if an ability with the same name and alias is already granted.
    pub fn can(&mut self, ability: impl Into<Grant>) -> ScreenplayResult<&mut Self> {
        self.abilities.grant(ability.into())?;
        Ok(self)
    }

    /// Grant several abilities, stopping at the first duplicate
    pub fn can_all(
        &mut self,
        abilities: impl IntoIterator<Item = Grant>,
    ) -> ScreenplayResult<&mut Self> {
        for grant in abilities {
            self.abilities.grant(grant)?;
        }
        Ok(self)
    }

    /// Resolve a granted ability
    pub fn ability<A: Ability>(&self, alias: Option<&str>) -> ScreenplayResult<&A> {
        self.abilities.resolve::<A>(alias)
    }

    /// Resolve a granted ability by tag
    pub fn resolve_ability(
        &self,
        name: &str,
        alias: Option<&str>,
    ) -> ScreenplayResult<&(dyn Any + Send + Sync)> {
        self.abilities.resolve_untyped(name, alias)
    }

    pub fn has_ability(&self, name: &str, alias: Option<&str>) -> bool {
        self.abilities.contains(name, alias)
    }

    /// Keys of all granted abilities, sorted
    pub fn abilities(&self) -> Vec<&AbilityKey> {
        self.abilities.keys()
    }

    /// The pipeline receiving this actor's events
    pub fn pipeline(&self) -> &EventPipeline {
        self.pipeline
            .as_deref()
            .unwrap_or_else(|| EventPipeline::global())
    }

    /// A top-level execution context for this actor
    pub fn context(&self) -> ActorContext<'_> {
        ActorContext::new(self, Depth::root(), None)
    }

    /// Perform activities in order
    ///
    /// Resolves with the value of the last activity (`Null` if it was
    /// skipped or the list is empty).
    pub async fn attempts_to(&self, activities: &[&dyn Performable]) -> ScreenplayResult<Value> {
        self.context().attempts_to(activities).await
    }

    /// Answer questions in order, resolving with the last answer
    pub async fn asks(&self, questions: &[&dyn Question]) -> ScreenplayResult<Value> {
        self.context().asks(questions).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ability::AbilityExt;

    struct UseAbility {
        payload: &'static str,
    }

    impl Ability for UseAbility {
        const NAME: &'static str = "UseAbility";
    }

    #[test]
    fn test_actor_states_name_and_attributes() {
        let actor = Actor::named("Test Actor").with("an attribute", 1);
        assert_eq!(actor.name(), "Test Actor");
        assert_eq!(actor.states("name"), Some(&Value::from("Test Actor")));
        assert_eq!(actor.states("an attribute"), Some(&Value::from(1)));
        assert_eq!(actor.states("missing"), None);
    }

    #[test]
    fn test_with_credentials() {
        let actor = Actor::named("Admin").with_credentials("admin", "secret");
        assert_eq!(actor.states("username"), Some(&Value::from("admin")));
        assert_eq!(actor.states("password"), Some(&Value::from("secret")));
        assert_eq!(actor.attributes().len(), 3);
    }

    #[test]
    fn test_can_chains() {
        let mut actor = Actor::named("Tester");
        actor
            .can(UseAbility { payload: "x" })
            .unwrap()
            .can(UseAbility { payload: "y" }.with_alias("alt"))
            .unwrap();

        assert_eq!(actor.ability::<UseAbility>(None).unwrap().payload, "x");
        assert_eq!(actor.ability::<UseAbility>(Some("alt")).unwrap().payload, "y");
        assert!(actor.has_ability("UseAbility", Some("alt")));
        assert_eq!(actor.abilities().len(), 2);
    }

    #[test]
    fn test_duplicate_grant_keeps_first() {
        let mut actor = Actor::named("Tester");
        actor.can(UseAbility { payload: "x" }).unwrap();

        let err = actor.can(UseAbility { payload: "z" }).unwrap_err();
        assert!(err.is_duplicate_ability());
        assert_eq!(actor.ability::<UseAbility>(None).unwrap().payload, "x");
    }

    #[test]
    fn test_can_all_stops_at_duplicate() {
        let mut actor = Actor::named("Tester");
        let result = actor.can_all([
            Grant::from(UseAbility { payload: "a" }),
            UseAbility { payload: "b" }.with_alias("one"),
            Grant::from(UseAbility { payload: "c" }),
        ]);

        assert!(result.is_err());
        assert_eq!(actor.abilities().len(), 2);
    }

    #[test]
    fn test_resolve_by_tag() {
        let mut actor = Actor::named("Tester");
        actor
            .can(UseAbility { payload: "x" })
            .unwrap()
            .can(UseAbility { payload: "y" }.with_alias("alt"))
            .unwrap();

        let found = actor.resolve_ability("UseAbility", Some("alt")).unwrap();
        assert_eq!(found.downcast_ref::<UseAbility>().unwrap().payload, "y");

        let ctx = actor.context();
        let default = ctx.resolve_untyped("UseAbility", None).unwrap();
        assert_eq!(default.downcast_ref::<UseAbility>().unwrap().payload, "x");
        assert_eq!(ctx.resolve_ability::<UseAbility>(Some("alt")).unwrap().payload, "y");

        let err = ctx.resolve_untyped("UseAbility", Some("other")).unwrap_err();
        assert!(err.is_missing_ability());
        assert!(actor.resolve_ability("Browse", None).is_err());
    }

    #[test]
    fn test_private_pipeline() {
        let pipeline = Arc::new(EventPipeline::new());
        let actor = Actor::named("Tester").with_pipeline(Arc::clone(&pipeline));
        assert!(std::ptr::eq(actor.pipeline(), pipeline.as_ref()));
    }
}
