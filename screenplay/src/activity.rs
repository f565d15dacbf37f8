//! The activity contract shared by actions, tasks and questions
//!
//! Concrete activities are user plugins. They embed an [`ActivityMeta`]
//! (kind tag, alias slot, call-stack log, failure policy) and implement
//! either [`Performable`] (actions and tasks) or [`Question`].
//!
//! # Example
//!
//! ```
//! use screenplay::{Activity, ActivityMeta, ActorContext, Performable, ScreenplayResult};
//! use serde_json::Value;
//!
//! struct Navigate {
//!     meta: ActivityMeta,
//!     url: String,
//! }
//!
//! impl Navigate {
//!     #[track_caller]
//!     fn to(url: &str) -> Self {
//!         Self {
//!             meta: ActivityMeta::action("to"),
//!             url: url.to_string(),
//!         }
//!     }
//! }
//!
//! impl Activity for Navigate {
//!     fn meta(&self) -> &ActivityMeta {
//!         &self.meta
//!     }
//!
//!     fn meta_mut(&mut self) -> &mut ActivityMeta {
//!         &mut self.meta
//!     }
//! }
//!
//! #[async_trait::async_trait]
//! impl Performable for Navigate {
//!     async fn perform_as(&self, _actor: &ActorContext<'_>) -> ScreenplayResult<Value> {
//!         Ok(Value::from(self.url.clone()))
//!     }
//! }
//! ```

use crate::actor::ActorContext;
use crate::call_site;
use crate::config;
use crate::error::ScreenplayResult;
use async_trait::async_trait;
use screenplay_types::{ActivityKind, CallStackEntry, SourceLocation};
use serde_json::{Map, Value};

/// What the engine does when an activity fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Re-raise the error and abort the remaining activities
    #[default]
    Propagate,
    /// Record the failure, mark the activity skipped and continue
    SkipOnFail,
    /// Answer `false` instead of failing (questions only)
    FailAsFalse,
}

/// Metadata every activity carries
#[derive(Debug, Clone)]
pub struct ActivityMeta {
    kind: ActivityKind,
    name: String,
    ability_alias: Option<String>,
    call_stack: Option<Vec<CallStackEntry>>,
    policy: FailurePolicy,
}

impl ActivityMeta {
    #[track_caller]
    pub fn action(name: impl Into<String>) -> Self {
        Self::new(ActivityKind::Action, name)
    }

    #[track_caller]
    pub fn task(name: impl Into<String>) -> Self {
        Self::new(ActivityKind::Task, name)
    }

    #[track_caller]
    pub fn question(name: impl Into<String>) -> Self {
        Self::new(ActivityKind::Question, name)
    }

    /// Create metadata, recording the call site if diagnostics are enabled
    #[track_caller]
    pub fn new(kind: ActivityKind, name: impl Into<String>) -> Self {
        Self::with_diagnostics(kind, name, config::current().diagnostics)
    }

    /// Create metadata with an explicit diagnostics switch
    #[track_caller]
    pub fn with_diagnostics(kind: ActivityKind, name: impl Into<String>, enabled: bool) -> Self {
        let name = name.into();
        let call_stack = call_site::capture(enabled, &name);
        Self {
            kind,
            name,
            ability_alias: None,
            call_stack,
            policy: FailurePolicy::Propagate,
        }
    }

    pub fn kind(&self) -> ActivityKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Alias forwarded to ability resolution
    pub fn ability_alias(&self) -> Option<&str> {
        self.ability_alias.as_deref()
    }

    /// Set or clear the alias; an empty alias clears it
    pub fn set_ability_alias(&mut self, alias: Option<String>) {
        self.ability_alias = alias.filter(|a| !a.is_empty());
    }

    /// The call-stack log, absent when diagnostics are disabled
    pub fn call_stack(&self) -> Option<&[CallStackEntry]> {
        self.call_stack.as_deref()
    }

    /// Attach arguments to the factory entry of the call-stack log
    pub fn set_called_with(&mut self, called_with: Map<String, Value>) {
        if let Some(first) = self.call_stack.as_mut().and_then(|stack| stack.first_mut()) {
            first.called_with = Some(called_with);
        }
    }

    /// Append to the call-stack log; no-op when diagnostics are disabled
    pub fn add_to_call_stack(&mut self, entry: CallStackEntry) {
        if let Some(stack) = self.call_stack.as_mut() {
            stack.push(entry);
        }
    }

    pub fn policy(&self) -> FailurePolicy {
        self.policy
    }

    pub fn set_policy(&mut self, policy: FailurePolicy) {
        self.policy = policy;
    }

    pub fn can_skip_on_fail(&self) -> bool {
        self.policy == FailurePolicy::SkipOnFail
    }

    pub fn is_fail_as_false(&self) -> bool {
        self.policy == FailurePolicy::FailAsFalse
    }

    /// Where the activity was created
    pub fn location(&self) -> Option<&SourceLocation> {
        self.call_stack
            .as_ref()
            .and_then(|stack| stack.first())
            .and_then(|entry| entry.location.as_ref())
    }

    /// Human-readable trail, empty without a call-stack log
    pub fn trail(&self) -> String {
        self.call_stack
            .as_deref()
            .map(call_site::activity_trail)
            .unwrap_or_default()
    }
}

/// Capabilities shared by all activities
pub trait Activity: Send + Sync {
    fn meta(&self) -> &ActivityMeta;

    fn meta_mut(&mut self) -> &mut ActivityMeta;
}

/// An action or task an actor can perform
#[async_trait]
pub trait Performable: Activity {
    /// Run the activity as the given actor
    ///
    /// The returned value becomes the result of `attempts_to` when this is
    /// the last activity in the call.
    async fn perform_as(&self, actor: &ActorContext<'_>) -> ScreenplayResult<Value>;
}

/// A query an actor can answer
#[async_trait]
pub trait Question: Activity {
    async fn answered_by(&self, actor: &ActorContext<'_>) -> ScreenplayResult<Value>;
}

/// Builder helpers available on every activity
pub trait ActivityExt: Activity + Sized {
    /// Resolve abilities under `alias` while this activity runs
    fn with_ability_alias(mut self, alias: impl Into<String>) -> Self {
        self.meta_mut().set_ability_alias(Some(alias.into()));
        self
    }

    /// Resolve abilities under their default key again
    fn without_ability_alias(mut self) -> Self {
        self.meta_mut().set_ability_alias(None);
        self
    }

    /// Record the factory arguments in the call-stack log
    fn called_with(mut self, called_with: Map<String, Value>) -> Self {
        self.meta_mut().set_called_with(called_with);
        self
    }

    /// Record a builder call in the call-stack log
    fn add_to_call_stack(mut self, entry: CallStackEntry) -> Self {
        self.meta_mut().add_to_call_stack(entry);
        self
    }
}

impl<T: Activity + Sized> ActivityExt for T {}

/// Builder helpers for actions and tasks
pub trait PerformableExt: Performable + Sized {
    /// Downgrade a failure of this activity to a skip
    fn or_skip_on_fail(mut self) -> Self {
        let meta = self.meta_mut();
        meta.set_policy(FailurePolicy::SkipOnFail);
        meta.add_to_call_stack(CallStackEntry::new("orSkipOnFail"));
        self
    }
}

impl<T: Performable + Sized> PerformableExt for T {}

/// Builder helpers for questions
pub trait QuestionExt: Question + Sized {
    /// Answer `false` instead of failing
    fn fail_as_false(mut self) -> Self {
        let meta = self.meta_mut();
        meta.set_policy(FailurePolicy::FailAsFalse);
        meta.add_to_call_stack(CallStackEntry::new("failAsFalse"));
        self
    }
}

impl<T: Question + Sized> QuestionExt for T {}
