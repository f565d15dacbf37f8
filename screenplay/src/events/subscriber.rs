//! Built-in event subscribers

use super::Subscriber;
use parking_lot::Mutex;
use screenplay_types::{ExecStatus, LogEvent};
use std::io::{self, Write};
use std::sync::Arc;

/// A subscriber that collects events for inspection
///
/// Clones share the same buffer, so one clone can be handed to a pipeline
/// while another is kept for assertions.
#[derive(Debug, Clone, Default)]
pub struct CollectingSubscriber {
    events: Arc<Mutex<Vec<LogEvent>>>,
}

impl CollectingSubscriber {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the collected events
    pub fn events(&self) -> Vec<LogEvent> {
        self.events.lock().clone()
    }

    pub fn statuses(&self) -> Vec<ExecStatus> {
        self.events.lock().iter().map(|e| e.status).collect()
    }

    /// Events recorded for one activity name
    pub fn for_activity(&self, activity: &str) -> Vec<LogEvent> {
        self.events
            .lock()
            .iter()
            .filter(|e| e.activity == activity)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }

    pub fn clear(&self) {
        self.events.lock().clear();
    }
}

impl Subscriber for CollectingSubscriber {
    fn on_event(&self, event: &LogEvent) {
        self.events.lock().push(event.clone());
    }
}

/// A subscriber that forwards events to `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSubscriber;

impl Subscriber for TracingSubscriber {
    fn on_event(&self, event: &LogEvent) {
        if event.is_fatal_failure() {
            tracing::warn!(
                actor = %event.actor,
                kind = %event.activity_type,
                wrap = event.wrap_level,
                error = event.error.as_deref().unwrap_or_default(),
                "{} failed",
                event.activity
            );
        } else {
            tracing::info!(
                actor = %event.actor,
                kind = %event.activity_type,
                status = %event.status,
                wrap = event.wrap_level,
                skip = event.skip_on_fail_level,
                "{}",
                event.activity
            );
        }
    }
}

/// A subscriber writing one JSON object per line
pub struct JsonLinesSubscriber<W: Write + Send> {
    writer: Mutex<W>,
}

impl JsonLinesSubscriber<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> JsonLinesSubscriber<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}

impl<W: Write + Send> Subscriber for JsonLinesSubscriber<W> {
    fn on_event(&self, event: &LogEvent) {
        let line = match event.to_json_line() {
            Ok(line) => line,
            Err(err) => {
                tracing::warn!("failed to serialize event: {}", err);
                return;
            }
        };

        let mut writer = self.writer.lock();
        if let Err(err) = writeln!(writer, "{}", line).and_then(|_| writer.flush()) {
            tracing::warn!("failed to write event: {}", err);
        }
    }
}
