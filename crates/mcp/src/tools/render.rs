// Shared result shaping for entry- and session-bearing tools

use crate::protocol::CallToolResult;
use anyhow::Result;
use early_client::notes;
use early_client::{TimeEntry, TrackingSession};
use serde::Serialize;

/// Serialize a value as a pretty-printed JSON text result.
pub fn json_result<T: Serialize>(value: &T) -> Result<CallToolResult> {
    Ok(CallToolResult::text(serde_json::to_string_pretty(value)?))
}

/// Shape a time entry for display. `note` is the decoded readable form;
/// `note_raw` is the verbatim wire note object so a later update can
/// round-trip the marker syntax bit-for-bit.
pub fn entry_json(entry: &TimeEntry) -> serde_json::Value {
    serde_json::json!({
        "id": entry.id,
        "activity_id": entry.activity_id,
        "activity_name": entry.activity.as_ref().map(|a| a.name.as_str()).unwrap_or(""),
        "started_at": entry.duration.started_at,
        "stopped_at": entry.duration.stopped_at,
        "note": entry.note.as_ref().map(notes::decode_note).unwrap_or_default(),
        "note_raw": entry.note,
    })
}

/// Shape the running session for display, same note convention as
/// [`entry_json`].
pub fn tracking_json(session: &TrackingSession) -> serde_json::Value {
    serde_json::json!({
        "activity_id": session.activity_id,
        "activity_name": session.activity.as_ref().map(|a| a.name.as_str()).unwrap_or(""),
        "started_at": session.started_at,
        "note": session.note.as_ref().map(notes::decode_note).unwrap_or_default(),
        "note_raw": session.note,
    })
}

/// Hosts commonly send optional string parameters as `""`; treat those
/// as absent.
pub fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Parse tool arguments, accepting a missing/null arguments object for
/// tools whose parameters are all optional.
pub fn parse_args<T: serde::de::DeserializeOwned>(
    arguments: serde_json::Value,
    tool: &str,
) -> Result<T> {
    use anyhow::Context;
    let arguments = if arguments.is_null() {
        serde_json::json!({})
    } else {
        arguments
    };
    serde_json::from_value(arguments).with_context(|| format!("Invalid arguments for {tool}"))
}
