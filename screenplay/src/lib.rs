//! Screenplay - actor-centric orchestration engine for test scenarios
//!
//! Scenarios are written as actors performing activities. The engine runs
//! activities strictly in order, resolves the abilities they need, applies
//! their failure policy and publishes a structured event for every status
//! transition.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                           Actor                              │
//! │   attributes        AbilityRegistry        EventPipeline     │
//! │  (name, ...)     (tag[-alias] → Grant)    (private/global)   │
//! └──────────────┬───────────────────────────────────┬───────────┘
//!                │ attempts_to / asks                 │ emit
//!                ▼                                    ▼
//! ┌──────────────────────────────┐      ┌─────────────────────────┐
//! │        ActorContext          │      │      Subscribers        │
//! │  depth (wrap, skip nesting)  │─────▶│  PrettyPrinter          │
//! │  active ability alias        │      │  JsonLinesSubscriber    │
//! └──────────────┬───────────────┘      │  TracingSubscriber      │
//!                │                      │  CollectingSubscriber   │
//!                │ perform_as /         └─────────────────────────┘
//!                │ answered_by
//!                ▼
//! ┌──────────────────────────────┐
//! │  Activities (user plugins)   │
//! │  Action · Task · Question    │
//! │  ActivityMeta: alias, policy │
//! │  and call-stack log          │
//! └──────────────────────────────┘
//! ```
//!
//! # Core Concepts
//!
//! ## Abilities
//!
//! An **ability** is an opaque capability (browser, API client, ...) stored
//! under its tag and an optional alias. Activities resolve abilities through
//! the context they run in.
//!
//! ## Activities
//!
//! - **Actions** do one thing with an ability
//! - **Tasks** compose other activities and indent their children
//! - **Questions** query state and answer with a value
//!
//! ## Failure policies
//!
//! - `or_skip_on_fail`: a failing action or task is recorded and skipped
//! - `fail_as_false`: a failing question answers `false`
//!
//! # Example
//!
//! ```rust
//! use screenplay::{Ability, Activity, ActivityMeta, Actor, ActorContext, Performable};
//! use screenplay::{CollectingSubscriber, EventPipeline, ScreenplayResult};
//! use serde_json::Value;
//! use std::sync::Arc;
//!
//! struct Greeter {
//!     greeting: &'static str,
//! }
//!
//! impl Ability for Greeter {
//!     const NAME: &'static str = "Greeter";
//! }
//!
//! struct Greet {
//!     meta: ActivityMeta,
//! }
//!
//! impl Activity for Greet {
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
//! impl Performable for Greet {
//!     async fn perform_as(&self, actor: &ActorContext<'_>) -> ScreenplayResult<Value> {
//!         let greeter = actor.ability::<Greeter>()?;
//!         Ok(Value::from(format!("{}, {}", greeter.greeting, actor.actor().name())))
//!     }
//! }
//!
//! # tokio_test_block(async {
//! let pipeline = Arc::new(EventPipeline::new());
//! let events = CollectingSubscriber::new();
//! pipeline.subscribe(events.clone());
//!
//! let mut actor = Actor::named("Ada").with_pipeline(pipeline);
//! actor.can(Greeter { greeting: "Hello" }).unwrap();
//!
//! let greet = Greet { meta: ActivityMeta::action("greet") };
//! let value = actor.attempts_to(&[&greet]).await.unwrap();
//!
//! assert_eq!(value, Value::from("Hello, Ada"));
//! assert_eq!(events.len(), 2);
//! # });
//! # fn tokio_test_block<F: std::future::Future>(f: F) -> F::Output {
//! #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f)
//! # }
//! ```

// Modules
pub mod ability;
pub mod activity;
pub mod actor;
pub mod call_site;
pub mod config;
pub mod error;
pub mod events;
pub mod registry;
pub mod types;

// Re-exports for convenience
pub use ability::{Ability, AbilityExt, AbilityKey, Grant};
pub use activity::{
    Activity, ActivityExt, ActivityMeta, FailurePolicy, Performable, PerformableExt, Question,
    QuestionExt,
};
pub use actor::{Actor, ActorContext};
pub use config::{ConfigError, ScreenplayConfig};
pub use error::{ScreenplayError, ScreenplayResult};
pub use events::{
    format_event, CollectingSubscriber, EventPipeline, JsonLinesSubscriber, PrettyPrinter,
    Subscriber, TracingSubscriber,
};
pub use registry::AbilityRegistry;
pub use types::{Depth, SubscriptionId};

pub use screenplay_types::{ActivityKind, CallStackEntry, ExecStatus, LogEvent, SourceLocation};
