//! Execution engine
//!
//! [`ActorContext`] drives activities for one actor. Each activity fully
//! settles before the next one starts:
//!
//! ```text
//!            emit started
//!                 │
//!          perform_as(child ctx)      child ctx = depth.enter(kind, skip)
//!          ┌──────┴───────┐
//!         Ok             Err
//!          │        ┌─────┴──────┐
//!     emit passed  skip-on-fail  otherwise
//!          │        │            │
//!          │   emit failed    emit failed
//!          │   emit skipped   return Err
//!          │   value = Null
//!          ▼        ▼
//!        next activity
//! ```
//!
//! Depth is a value owned by each context, so the increments made for a
//! task or a skip-on-fail activity vanish with the child context on every
//! exit path.

use crate::ability::Ability;
use crate::activity::{ActivityMeta, Performable, Question};
use crate::actor::Actor;
use crate::error::{ScreenplayError, ScreenplayResult};
use crate::types::Depth;
use screenplay_types::{ActivityKind, ExecStatus, LogEvent};
use serde_json::Value;
use std::any::Any;

/// An actor plus the state of the activity currently executing
///
/// Activities receive a context in `perform_as` / `answered_by` and use it
/// to resolve abilities, read attributes and run nested activities.
#[derive(Debug, Clone, Copy)]
pub struct ActorContext<'a> {
    actor: &'a Actor,
    depth: Depth,
    ability_alias: Option<&'a str>,
}

impl<'a> ActorContext<'a> {
    pub(crate) fn new(actor: &'a Actor, depth: Depth, ability_alias: Option<&'a str>) -> Self {
        Self {
            actor,
            depth,
            ability_alias,
        }
    }

    pub fn actor(&self) -> &'a Actor {
        self.actor
    }

    pub fn depth(&self) -> Depth {
        self.depth
    }

    /// Alias declared by the activity currently executing
    pub fn ability_alias(&self) -> Option<&'a str> {
        self.ability_alias
    }

    pub fn states(&self, key: &str) -> Option<&'a Value> {
        self.actor.states(key)
    }

    /// Resolve an ability using the running activity's alias
    pub fn ability<A: Ability>(&self) -> ScreenplayResult<&'a A> {
        self.actor.ability::<A>(self.ability_alias)
    }

    /// Resolve an ability under an explicit alias
    pub fn resolve_ability<A: Ability>(&self, alias: Option<&str>) -> ScreenplayResult<&'a A> {
        self.actor.ability::<A>(alias)
    }

    /// Resolve an ability by tag without knowing its type
    pub fn resolve_untyped(
        &self,
        name: &str,
        alias: Option<&str>,
    ) -> ScreenplayResult<&'a (dyn Any + Send + Sync)> {
        self.actor.resolve_ability(name, alias)
    }

    /// Perform activities in order, nested under the current depth
    pub async fn attempts_to(&self, activities: &[&dyn Performable]) -> ScreenplayResult<Value> {
        let mut last = Value::Null;
        for activity in activities {
            last = self.perform(*activity).await?;
        }
        Ok(last)
    }

    /// Answer questions in order, resolving with the last answer
    pub async fn asks(&self, questions: &[&dyn Question]) -> ScreenplayResult<Value> {
        let mut answer = Value::Null;
        for question in questions {
            answer = self.answer(*question).await?;
        }
        Ok(answer)
    }

    async fn perform(&self, activity: &dyn Performable) -> ScreenplayResult<Value> {
        let meta = activity.meta();
        let kind = match meta.kind() {
            ActivityKind::Task => ActivityKind::Task,
            _ => ActivityKind::Action,
        };
        let skip_on_fail = meta.can_skip_on_fail();

        self.record(meta, kind, ExecStatus::Started, self.depth, None);

        let inner = self.depth.enter(kind, skip_on_fail);
        let child = ActorContext::new(self.actor, inner, meta.ability_alias());

        match activity.perform_as(&child).await {
            Ok(value) => {
                self.record(meta, kind, ExecStatus::Passed, self.depth, None);
                Ok(value)
            }
            Err(err) if skip_on_fail => {
                tracing::warn!(
                    actor = %self.actor.name(),
                    activity = meta.name(),
                    "skipping failed activity: {}",
                    err
                );
                // Still counted inside its own skip scope
                let failed_depth = Depth {
                    indentation: self.depth.indentation,
                    skip_nesting: inner.skip_nesting,
                };
                self.record(meta, kind, ExecStatus::Failed, failed_depth, Some(&err));
                self.record(meta, kind, ExecStatus::Skipped, self.depth, None);
                Ok(Value::Null)
            }
            Err(err) => {
                self.record(meta, kind, ExecStatus::Failed, self.depth, Some(&err));
                Err(err)
            }
        }
    }

    async fn answer(&self, question: &dyn Question) -> ScreenplayResult<Value> {
        let meta = question.meta();
        let kind = ActivityKind::Question;

        self.record(meta, kind, ExecStatus::Started, self.depth, None);

        let scoped = ActorContext::new(self.actor, self.depth, meta.ability_alias());
        match question.answered_by(&scoped).await {
            Ok(answer) => {
                self.record(meta, kind, ExecStatus::Passed, self.depth, None);
                Ok(answer)
            }
            Err(err) if meta.is_fail_as_false() => {
                tracing::debug!(
                    actor = %self.actor.name(),
                    question = meta.name(),
                    "answering false: {}",
                    err
                );
                self.record(meta, kind, ExecStatus::Passed, self.depth, Some(&err));
                Ok(Value::Bool(false))
            }
            Err(err) => {
                self.record(meta, kind, ExecStatus::Failed, self.depth, Some(&err));
                Err(err)
            }
        }
    }

    fn record(
        &self,
        meta: &ActivityMeta,
        kind: ActivityKind,
        status: ExecStatus,
        depth: Depth,
        error: Option<&ScreenplayError>,
    ) {
        tracing::debug!(
            actor = %self.actor.name(),
            activity = meta.name(),
            %status,
            %depth,
            "activity transition"
        );

        let mut event = LogEvent::new(kind, meta.name(), self.actor.name(), status)
            .with_text(meta.trail())
            .with_location(meta.location().cloned())
            .with_levels(depth.indentation, depth.skip_nesting);
        if let Some(err) = error {
            event = event.with_error(err.to_string());
        }

        self.actor.pipeline().emit(&event);
    }
}
