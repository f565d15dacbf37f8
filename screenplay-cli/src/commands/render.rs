//! Render structured event lines as console output.

use super::open_input;
use anyhow::{Context, Result};
use screenplay::format_event;
use screenplay_types::{is_log_event_line, LogEvent};
use std::io::{self, BufRead, BufWriter, Write};
use std::path::Path;

/// Pretty-print every event line; other lines are copied unchanged.
pub fn render_events(input: Option<&Path>, color: bool) -> Result<()> {
    let reader = open_input(input)?;
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    render_lines(reader, &mut out, color)?;
    out.flush().context("Failed to flush output")?;
    Ok(())
}

fn render_lines(reader: impl BufRead, out: &mut impl Write, color: bool) -> Result<()> {
    for (index, line) in reader.lines().enumerate() {
        let line = line.context("Failed to read input")?;
        writeln!(out, "{}", render_line(&line, color, index + 1))?;
    }
    Ok(())
}

fn render_line(line: &str, color: bool, line_number: usize) -> String {
    if !is_log_event_line(line) {
        return line.to_string();
    }

    match LogEvent::from_json_line(line) {
        Ok(event) => format_event(&event, color),
        Err(err) => {
            tracing::warn!(line = line_number, "malformed event: {}", err);
            line.to_string()
        }
    }
}
