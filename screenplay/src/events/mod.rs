//! Event emission pipeline
//!
//! Every status transition of an activity becomes a [`LogEvent`] published
//! through an [`EventPipeline`]. Delivery is synchronous, in subscription
//! order, with no queueing: `emit` returns once every subscriber has seen
//! the event. A pipeline with no subscribers is a valid no-op.
//!
//! A process-wide pipeline is available through [`EventPipeline::global`].
//! On first use it registers at most one default subscriber chosen from the
//! ambient configuration. Actors can be pointed at a private pipeline with
//! [`Actor::with_pipeline`](crate::Actor::with_pipeline).

mod printer;
mod subscriber;

pub use printer::{format_event, PrettyPrinter};
pub use subscriber::{CollectingSubscriber, JsonLinesSubscriber, TracingSubscriber};

use crate::config::{self, ScreenplayConfig};
use crate::types::SubscriptionId;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use screenplay_types::LogEvent;
use std::sync::Arc;

/// Receives events from a pipeline
///
/// Implemented for any `Fn(&LogEvent) + Send + Sync` closure.
pub trait Subscriber: Send + Sync {
    fn on_event(&self, event: &LogEvent);
}

impl<F> Subscriber for F
where
    F: Fn(&LogEvent) + Send + Sync,
{
    fn on_event(&self, event: &LogEvent) {
        self(event)
    }
}

/// Publish point distributing events to subscribers
#[derive(Default)]
pub struct EventPipeline {
    subscribers: RwLock<Vec<(SubscriptionId, Arc<dyn Subscriber>)>>,
}

static GLOBAL: Lazy<EventPipeline> = Lazy::new(|| EventPipeline::from_config(config::current()));

impl EventPipeline {
    /// Create a pipeline with no subscribers
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a pipeline with the default subscriber for `config`
    ///
    /// Structured logging writes JSON lines to stdout; otherwise enabled
    /// diagnostics pretty-print to stdout; otherwise nothing is registered.
    pub fn from_config(config: &ScreenplayConfig) -> Self {
        let pipeline = Self::new();
        if config.structured_logging {
            pipeline.subscribe(JsonLinesSubscriber::stdout());
        } else if config.diagnostics {
            pipeline.subscribe(PrettyPrinter::stdout());
        }
        pipeline
    }

    /// The process-wide pipeline
    pub fn global() -> &'static EventPipeline {
        &GLOBAL
    }

    /// Register a subscriber
    pub fn subscribe(&self, subscriber: impl Subscriber + 'static) -> SubscriptionId {
        self.subscribe_shared(Arc::new(subscriber))
    }

    /// Register a subscriber that is shared with other owners
    pub fn subscribe_shared(&self, subscriber: Arc<dyn Subscriber>) -> SubscriptionId {
        let id = SubscriptionId::new();
        self.subscribers.write().push((id, subscriber));
        tracing::trace!(%id, "event subscriber registered");
        id
    }

    /// Remove a subscriber; returns whether it was registered
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscribers = self.subscribers.write();
        let before = subscribers.len();
        subscribers.retain(|(sub_id, _)| *sub_id != id);
        subscribers.len() != before
    }

    /// Deliver an event to every subscriber
    ///
    /// The subscriber list is snapshotted first, so subscribers may
    /// (un)subscribe from inside their callback.
    pub fn emit(&self, event: &LogEvent) {
        let subscribers: Vec<Arc<dyn Subscriber>> = self
            .subscribers
            .read()
            .iter()
            .map(|(_, subscriber)| Arc::clone(subscriber))
            .collect();

        for subscriber in subscribers {
            subscriber.on_event(event);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.read().len()
    }

    /// Remove all subscribers
    pub fn clear(&self) {
        self.subscribers.write().clear();
    }
}

impl std::fmt::Debug for EventPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventPipeline")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use screenplay_types::{ActivityKind, ExecStatus};

    fn event(status: ExecStatus) -> LogEvent {
        LogEvent::new(ActivityKind::Action, "Click", "Tester", status)
    }

    #[test]
    fn test_emit_without_subscribers() {
        let pipeline = EventPipeline::new();
        pipeline.emit(&event(ExecStatus::Started));
        assert_eq!(pipeline.subscriber_count(), 0);
    }

    #[test]
    fn test_delivery_in_subscription_order() {
        let pipeline = EventPipeline::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let first = Arc::clone(&seen);
        pipeline.subscribe(move |e: &LogEvent| first.lock().push(format!("a:{}", e.status)));
        let second = Arc::clone(&seen);
        pipeline.subscribe(move |e: &LogEvent| second.lock().push(format!("b:{}", e.status)));

        pipeline.emit(&event(ExecStatus::Started));
        pipeline.emit(&event(ExecStatus::Passed));

        assert_eq!(
            *seen.lock(),
            vec!["a:started", "b:started", "a:passed", "b:passed"]
        );
    }

    #[test]
    fn test_unsubscribe() {
        let pipeline = EventPipeline::new();
        let collector = CollectingSubscriber::new();
        let id = pipeline.subscribe(collector.clone());

        pipeline.emit(&event(ExecStatus::Started));
        assert!(pipeline.unsubscribe(id));
        assert!(!pipeline.unsubscribe(id));
        pipeline.emit(&event(ExecStatus::Passed));

        assert_eq!(collector.statuses(), vec![ExecStatus::Started]);
    }

    #[test]
    fn test_default_subscriber_selection() {
        let none = EventPipeline::from_config(&ScreenplayConfig::default());
        assert_eq!(none.subscriber_count(), 0);

        let diagnostics =
            EventPipeline::from_config(&ScreenplayConfig::default().with_diagnostics(true));
        assert_eq!(diagnostics.subscriber_count(), 1);

        let both = EventPipeline::from_config(
            &ScreenplayConfig::default()
                .with_diagnostics(true)
                .with_structured_logging(true),
        );
        assert_eq!(both.subscriber_count(), 1);
    }

    #[test]
    fn test_subscribe_from_callback() {
        let pipeline = Arc::new(EventPipeline::new());
        let inner = Arc::clone(&pipeline);
        pipeline.subscribe(move |_: &LogEvent| {
            inner.subscribe(|_: &LogEvent| {});
        });

        pipeline.emit(&event(ExecStatus::Started));
        assert_eq!(pipeline.subscriber_count(), 2);
    }
}
