//! Shared fixtures for engine tests

#![allow(dead_code)]

use async_trait::async_trait;
use parking_lot::Mutex;
use screenplay::{
    Ability, Activity, ActivityKind, ActivityMeta, Actor, ActorContext, CollectingSubscriber,
    EventPipeline, Performable, Question, ScreenplayError, ScreenplayResult,
};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

/// Ordering side channel shared between activities of one test
pub type Journal = Arc<Mutex<Vec<String>>>;

pub fn journal() -> Journal {
    Arc::new(Mutex::new(Vec::new()))
}

/// An actor routed to a private pipeline, plus the collector on it
pub fn actor_with_events(name: &str) -> (Actor, CollectingSubscriber) {
    let pipeline = Arc::new(EventPipeline::new());
    let events = CollectingSubscriber::new();
    pipeline.subscribe(events.clone());
    (Actor::named(name).with_pipeline(pipeline), events)
}

macro_rules! impl_activity {
    ($ty:ty) => {
        impl Activity for $ty {
            fn meta(&self) -> &ActivityMeta {
                &self.meta
            }

            fn meta_mut(&mut self) -> &mut ActivityMeta {
                &mut self.meta
            }
        }
    };
}

/// Ability carrying a payload string
pub struct UseAbility {
    payload: String,
}

impl UseAbility {
    pub fn using(payload: impl Into<String>) -> Self {
        Self {
            payload: payload.into(),
        }
    }

    pub fn payload(&self) -> &str {
        &self.payload
    }
}

impl Ability for UseAbility {
    const NAME: &'static str = "UseAbility";
}

/// Action returning the payload of the resolved `UseAbility`
pub struct GetPayload {
    meta: ActivityMeta,
}

impl GetPayload {
    #[track_caller]
    pub fn new() -> Self {
        Self {
            meta: ActivityMeta::with_diagnostics(ActivityKind::Action, "GetPayload", true),
        }
    }
}

impl_activity!(GetPayload);

#[async_trait]
impl Performable for GetPayload {
    async fn perform_as(&self, actor: &ActorContext<'_>) -> ScreenplayResult<Value> {
        let ability = actor.ability::<UseAbility>()?;
        Ok(Value::from(ability.payload()))
    }
}

/// Action recording its label in a journal, optionally after a delay
pub struct Spy {
    meta: ActivityMeta,
    label: String,
    journal: Journal,
    delay: Option<Duration>,
}

impl Spy {
    #[track_caller]
    pub fn new(label: &str, journal: &Journal) -> Self {
        Self {
            meta: ActivityMeta::with_diagnostics(ActivityKind::Action, label, false),
            label: label.to_string(),
            journal: Arc::clone(journal),
            delay: None,
        }
    }

    pub fn after(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

impl_activity!(Spy);

#[async_trait]
impl Performable for Spy {
    async fn perform_as(&self, _actor: &ActorContext<'_>) -> ScreenplayResult<Value> {
        self.journal.lock().push(format!("{}:start", self.label));
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.journal.lock().push(format!("{}:end", self.label));
        Ok(Value::from(self.label.clone()))
    }
}

/// Action that always fails with the given message
pub struct Fail {
    meta: ActivityMeta,
    message: String,
    journal: Journal,
}

impl Fail {
    #[track_caller]
    pub fn with_message(message: &str, journal: &Journal) -> Self {
        Self {
            meta: ActivityMeta::with_diagnostics(ActivityKind::Action, "Fail", true),
            message: message.to_string(),
            journal: Arc::clone(journal),
        }
    }
}

impl_activity!(Fail);

#[async_trait]
impl Performable for Fail {
    async fn perform_as(&self, _actor: &ActorContext<'_>) -> ScreenplayResult<Value> {
        self.journal.lock().push("fail".to_string());
        Err(ScreenplayError::execution(&self.message))
    }
}

/// Task running its children through the nested context
pub struct WrapperTask {
    meta: ActivityMeta,
    activities: Vec<Box<dyn Performable>>,
}

impl WrapperTask {
    #[track_caller]
    pub fn named(name: &str, activities: Vec<Box<dyn Performable>>) -> Self {
        Self {
            meta: ActivityMeta::with_diagnostics(ActivityKind::Task, name, false),
            activities,
        }
    }
}

impl_activity!(WrapperTask);

#[async_trait]
impl Performable for WrapperTask {
    async fn perform_as(&self, actor: &ActorContext<'_>) -> ScreenplayResult<Value> {
        let activities: Vec<&dyn Performable> =
            self.activities.iter().map(|a| a.as_ref()).collect();
        actor.attempts_to(&activities).await
    }
}

/// Question answering a fixed value, or failing
pub struct SampleQuestion {
    meta: ActivityMeta,
    answer: Result<Value, String>,
}

impl SampleQuestion {
    #[track_caller]
    pub fn answering(answer: impl Into<Value>) -> Self {
        Self {
            meta: ActivityMeta::with_diagnostics(ActivityKind::Question, "SampleQuestion", false),
            answer: Ok(answer.into()),
        }
    }

    #[track_caller]
    pub fn failing(message: &str) -> Self {
        Self {
            meta: ActivityMeta::with_diagnostics(ActivityKind::Question, "SampleQuestion", false),
            answer: Err(message.to_string()),
        }
    }
}

impl_activity!(SampleQuestion);

#[async_trait]
impl Question for SampleQuestion {
    async fn answered_by(&self, _actor: &ActorContext<'_>) -> ScreenplayResult<Value> {
        match &self.answer {
            Ok(value) => Ok(value.clone()),
            Err(message) => Err(ScreenplayError::execution(message)),
        }
    }
}

/// Question answering with an actor attribute
pub struct Attribute {
    meta: ActivityMeta,
    key: String,
}

impl Attribute {
    #[track_caller]
    pub fn of(key: &str) -> Self {
        Self {
            meta: ActivityMeta::with_diagnostics(ActivityKind::Question, "Attribute", false),
            key: key.to_string(),
        }
    }
}

impl_activity!(Attribute);

#[async_trait]
impl Question for Attribute {
    async fn answered_by(&self, actor: &ActorContext<'_>) -> ScreenplayResult<Value> {
        actor
            .states(&self.key)
            .cloned()
            .ok_or_else(|| ScreenplayError::execution(format!("no attribute '{}'", self.key)))
    }
}
