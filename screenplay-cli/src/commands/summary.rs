//! Summarize a structured event stream.

use super::open_input;
use anyhow::{bail, Context, Result};
use screenplay_types::{is_log_event_line, LogEvent, SourceLocation};
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::BufRead;
use std::path::Path;

#[derive(Debug, Default, Serialize)]
struct EventSummary {
    events: usize,
    /// Event lines that could not be parsed
    malformed: usize,
    statuses: BTreeMap<String, usize>,
    actors: BTreeMap<String, usize>,
    failures: Vec<Failure>,
}

/// A failure no enclosing skip-on-fail activity swallowed
#[derive(Debug, Serialize)]
struct Failure {
    actor: String,
    activity: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    location: Option<SourceLocation>,
}

impl EventSummary {
    fn record(&mut self, event: LogEvent) {
        self.events += 1;
        *self
            .statuses
            .entry(event.status.as_str().to_string())
            .or_default() += 1;
        *self.actors.entry(event.actor.clone()).or_default() += 1;

        if event.is_fatal_failure() {
            self.failures.push(Failure {
                actor: event.actor,
                activity: event.activity,
                error: event.error,
                location: event.location,
            });
        }
    }
}

/// Print event counts; fails when the stream holds unskipped failures.
pub fn summarize_events(input: Option<&Path>, json: bool) -> Result<()> {
    let reader = open_input(input)?;
    let summary = collect(reader)?;

    if json {
        let payload = serde_json::to_string_pretty(&summary)?;
        println!("{}", payload);
    } else {
        print_text(&summary);
    }

    if !summary.failures.is_empty() {
        bail!("{} unskipped failure(s)", summary.failures.len());
    }
    Ok(())
}

fn collect(reader: impl BufRead) -> Result<EventSummary> {
    let mut summary = EventSummary::default();
    for (index, line) in reader.lines().enumerate() {
        let line = line.context("Failed to read input")?;
        if !is_log_event_line(&line) {
            continue;
        }

        match LogEvent::from_json_line(&line) {
            Ok(event) => summary.record(event),
            Err(err) => {
                tracing::warn!(line = index + 1, "malformed event: {}", err);
                summary.malformed += 1;
            }
        }
    }
    Ok(summary)
}

fn print_text(summary: &EventSummary) {
    println!(
        "{} events, {} failures, {} malformed",
        summary.events,
        summary.failures.len(),
        summary.malformed
    );
    for (status, count) in &summary.statuses {
        println!("  {:<8} {}", status, count);
    }
    for (actor, count) in &summary.actors {
        println!("- {}: {} events", actor, count);
    }
    for failure in &summary.failures {
        let error = failure
            .error
            .as_deref()
            .map(|e| format!(": {}", e))
            .unwrap_or_default();
        let location = failure
            .location
            .as_ref()
            .map(|l| format!(" ({})", l))
            .unwrap_or_default();
        println!(
            "FAILED {} {}{}{}",
            failure.actor, failure.activity, error, location
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use screenplay_types::{ActivityKind, ExecStatus};

    fn line(event: LogEvent) -> String {
        event.to_json_line().unwrap()
    }

    #[test]
    fn test_collect_counts_and_failures() {
        let input = [
            "noise".to_string(),
            line(LogEvent::new(ActivityKind::Task, "Login", "Ada", ExecStatus::Started)),
            line(
                LogEvent::new(ActivityKind::Action, "Click", "Ada", ExecStatus::Failed)
                    .with_levels(1, 1)
                    .with_error("swallowed"),
            ),
            line(
                LogEvent::new(ActivityKind::Task, "Login", "Ada", ExecStatus::Failed)
                    .with_error("boom"),
            ),
            line(LogEvent::new(ActivityKind::Question, "Title", "Bob", ExecStatus::Passed)),
            "{\"activityType\":42}".to_string(),
        ]
        .join("\n");

        let summary = collect(input.as_bytes()).unwrap();
        assert_eq!(summary.events, 4);
        assert_eq!(summary.malformed, 1);
        assert_eq!(summary.statuses["failed"], 2);
        assert_eq!(summary.actors["Ada"], 3);
        assert_eq!(summary.failures.len(), 1);
        assert_eq!(summary.failures[0].activity, "Login");
        assert_eq!(summary.failures[0].error.as_deref(), Some("boom"));
    }
}
