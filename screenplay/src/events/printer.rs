//! Console rendering of events
//!
//! One line per event:
//!
//! ```text
//!   screenplay 03:04:05.000  EXEC ↪ Tester Login login()  tests/login.rs:12:5
//!   screenplay 03:04:05.120  EXEC     ↪ Tester Fill fill({"field":"user"})
//! ```
//!
//! Nested activities are indented four blanks per enclosing task.

use super::Subscriber;
use parking_lot::Mutex;
use screenplay_types::{ActivityKind, ExecStatus, LogEvent};
use std::io::{self, Write};

const BASE_INDENTATION: &str = "  ";
const BLANKS_PER_LEVEL: usize = 4;
const PREFIX: &str = "screenplay";

const GRAY: &str = "\x1B[90m";
const BLUE: &str = "\x1B[94m";
const RED: &str = "\x1B[31m";
const RED_BG: &str = "\x1B[41m";
const RESET: &str = "\x1B[0m";

fn badge(status: ExecStatus) -> &'static str {
    match status {
        ExecStatus::Started => "EXEC",
        ExecStatus::Passed => "DONE",
        ExecStatus::Failed => "FAIL",
        ExecStatus::Skipped => "SKIP",
    }
}

fn icon(event: &LogEvent) -> &'static str {
    match (event.status, event.activity_type) {
        (ExecStatus::Failed, _) => "✗",
        (_, ActivityKind::Question) => "✔",
        _ => "↪",
    }
}

/// Render one event as a console line (no trailing newline)
pub fn format_event(event: &LogEvent, color: bool) -> String {
    let paint = |code: &'static str| if color { code } else { "" };
    let fatal = event.is_fatal_failure();

    let mut message = format!("{} {} {}", icon(event), event.actor, event.activity);
    if !event.activity_text.is_empty() && event.activity_text != event.activity {
        message.push(' ');
        message.push_str(&event.activity_text);
    }
    if let Some(error) = &event.error {
        message.push_str(&format!(" ({})", error));
    }
    if let Some(location) = &event.location {
        message.push_str(&format!("  {}{}{}", paint(GRAY), location, paint(RESET)));
    }

    format!(
        "{}{}{}{} {}  {}{}{}{} {}{}{}",
        BASE_INDENTATION,
        paint(BLUE),
        PREFIX,
        paint(GRAY),
        event.time.format("%H:%M:%S%.3f"),
        if fatal { paint(RED_BG) } else { "" },
        badge(event.status),
        paint(RESET),
        if fatal { paint(RED) } else { "" },
        " ".repeat(event.wrap_level as usize * BLANKS_PER_LEVEL),
        message,
        if fatal { paint(RESET) } else { "" },
    )
}

/// A subscriber printing human-readable lines
pub struct PrettyPrinter<W: Write + Send> {
    writer: Mutex<W>,
    color: bool,
}

impl PrettyPrinter<io::Stdout> {
    /// Print to stdout with colors
    pub fn stdout() -> Self {
        Self::new(io::stdout()).with_color(true)
    }
}

impl<W: Write + Send> PrettyPrinter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
            color: false,
        }
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}

impl<W: Write + Send> Subscriber for PrettyPrinter<W> {
    fn on_event(&self, event: &LogEvent) {
        let line = format_event(event, self.color);
        let mut writer = self.writer.lock();
        if let Err(err) = writeln!(writer, "{}", line) {
            tracing::warn!("failed to print event: {}", err);
        }
    }
}
