//! Shared types for screenplay
//!
//! This crate provides the serializable records exchanged between the
//! execution engine and whoever observes it: activity kinds, execution
//! statuses, call-site metadata and the event record itself.
//!
//! Events travel as JSON lines. Every line produced by
//! [`LogEvent::to_json_line`] starts with [`LOG_EVENT_PREFIX`], which lets
//! consumers pick event lines out of mixed process output.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Prefix shared by every serialized [`LogEvent`] line
pub const LOG_EVENT_PREFIX: &str = "{\"activityType\":";

/// Kind of activity an event refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    Action,
    Task,
    Question,
}

impl ActivityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityKind::Action => "action",
            ActivityKind::Task => "task",
            ActivityKind::Question => "question",
        }
    }
}

impl fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Execution status of an activity
///
/// Each activity produces `Started` followed by one terminal status.
/// A failure swallowed by skip-on-fail yields `Failed` and then `Skipped`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecStatus {
    Started,
    Passed,
    Failed,
    Skipped,
}

impl ExecStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExecStatus::Started => "started",
            ExecStatus::Passed => "passed",
            ExecStatus::Failed => "failed",
            ExecStatus::Skipped => "skipped",
        }
    }

    /// Whether this status settles the activity
    pub fn is_terminal(&self) -> bool {
        !matches!(self, ExecStatus::Started)
    }
}

impl fmt::Display for ExecStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Source position an activity was created at
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceLocation {
    pub file: String,
    pub line: u32,
    pub column: u32,
}

impl SourceLocation {
    pub fn new(file: impl Into<String>, line: u32, column: u32) -> Self {
        Self {
            file: file.into(),
            line,
            column,
        }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

/// One step of an activity's construction trail
///
/// The first entry names the factory that created the activity, later
/// entries record builder calls such as `orSkipOnFail`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallStackEntry {
    pub caller: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub called_with: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<SourceLocation>,
}

impl CallStackEntry {
    pub fn new(caller: impl Into<String>) -> Self {
        Self {
            caller: caller.into(),
            called_with: None,
            location: None,
        }
    }

    pub fn with_called_with(mut self, called_with: Map<String, Value>) -> Self {
        self.called_with = Some(called_with);
        self
    }

    pub fn with_location(mut self, location: SourceLocation) -> Self {
        self.location = Some(location);
        self
    }
}

impl fmt::Display for CallStackEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.called_with {
            Some(args) if !args.is_empty() => {
                write!(f, "{}({})", self.caller, Value::Object(args.clone()))
            }
            _ => write!(f, "{}()", self.caller),
        }
    }
}

/// Immutable snapshot of one activity status transition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEvent {
    pub activity_type: ActivityKind,
    /// Name of the activity
    pub activity: String,
    /// Human-readable trail of the call stack
    pub activity_text: String,
    pub status: ExecStatus,
    pub actor: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<SourceLocation>,
    /// Number of enclosing skip-on-fail activities
    pub skip_on_fail_level: u32,
    /// Number of enclosing tasks
    pub wrap_level: u32,
    pub time: DateTime<Utc>,
    /// Failure cause, set on `failed` records and on coerced question answers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl LogEvent {
    /// Create an event stamped with the current time
    pub fn new(
        activity_type: ActivityKind,
        activity: impl Into<String>,
        actor: impl Into<String>,
        status: ExecStatus,
    ) -> Self {
        Self {
            activity_type,
            activity: activity.into(),
            activity_text: String::new(),
            status,
            actor: actor.into(),
            location: None,
            skip_on_fail_level: 0,
            wrap_level: 0,
            time: Utc::now(),
            error: None,
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.activity_text = text.into();
        self
    }

    pub fn with_location(mut self, location: Option<SourceLocation>) -> Self {
        self.location = location;
        self
    }

    pub fn with_levels(mut self, wrap_level: u32, skip_on_fail_level: u32) -> Self {
        self.wrap_level = wrap_level;
        self.skip_on_fail_level = skip_on_fail_level;
        self
    }

    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    pub fn with_time(mut self, time: DateTime<Utc>) -> Self {
        self.time = time;
        self
    }

    /// Whether this is a failure nobody above will swallow
    pub fn is_fatal_failure(&self) -> bool {
        self.status == ExecStatus::Failed && self.skip_on_fail_level == 0
    }

    /// Serialize to a single JSON line (no trailing newline)
    pub fn to_json_line(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Parse a line produced by [`LogEvent::to_json_line`]
    pub fn from_json_line(line: &str) -> serde_json::Result<Self> {
        serde_json::from_str(line.trim())
    }
}

/// Check whether a line of output carries a serialized [`LogEvent`]
pub fn is_log_event_line(line: &str) -> bool {
    line.trim_start().starts_with(LOG_EVENT_PREFIX)
}
