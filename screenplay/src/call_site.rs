//! Call-site identification for activity diagnostics
//!
//! Activities record who created them so failures can be attributed to a
//! line of scenario code. The caller name is passed in explicitly by the
//! activity's factory; the source position comes from `#[track_caller]`.
//! Every function on the capture path carries the attribute, so the
//! recorded position is that of the first caller outside this crate that
//! does not itself opt into `#[track_caller]`.

use screenplay_types::{CallStackEntry, SourceLocation};
use std::panic::Location;

/// Caller name used when none was supplied
pub const UNKNOWN_CALLER: &str = "unknown";

/// Build a call-stack entry for `name` at the caller's position
#[track_caller]
pub fn identify_caller(name: &str) -> CallStackEntry {
    let location = Location::caller();
    let caller = if name.trim().is_empty() {
        UNKNOWN_CALLER
    } else {
        name
    };

    CallStackEntry::new(caller).with_location(SourceLocation::new(
        location.file(),
        location.line(),
        location.column(),
    ))
}

/// Start a call-stack log, or nothing when diagnostics are disabled
#[track_caller]
pub fn capture(enabled: bool, name: &str) -> Option<Vec<CallStackEntry>> {
    if enabled {
        Some(vec![identify_caller(name)])
    } else {
        None
    }
}

/// Render a call-stack log as `caller(args).caller(args)`
pub fn activity_trail(entries: &[CallStackEntry]) -> String {
    entries
        .iter()
        .map(CallStackEntry::to_string)
        .collect::<Vec<_>>()
        .join(".")
}
