//! Wire types for the Early API.
//!
//! All entities are owned by the remote service; these structs mirror its
//! JSON shapes. Unknown fields are ignored on deserialization so upstream
//! additions don't break parsing.

use serde::{Deserialize, Serialize};

/// A user-defined category time is tracked against. Read-only here;
/// created and destroyed in the upstream service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub color: String,
}

/// Abbreviated activity object nested inside entries and sessions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityRef {
    #[serde(default)]
    pub name: String,
}

/// A tag referenced from note text via the `<{{|t|ID|}}>` marker.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    pub id: i64,
    pub key: String,
    #[serde(default)]
    pub label: String,
}

/// A mention referenced from note text via the `<{{|m|ID|}}>` marker.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mention {
    pub id: i64,
    pub key: String,
    #[serde(default)]
    pub label: String,
}

/// Note object attached to entries and tracking sessions. `text` carries
/// the raw marker syntax; `tags`/`mentions` list the referenced objects.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub mentions: Vec<Mention>,
}

/// Closed (start, stop) interval attributed to an activity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeEntry {
    pub id: String,
    #[serde(default)]
    pub activity_id: String,
    #[serde(default)]
    pub activity: Option<ActivityRef>,
    pub duration: EntryDuration,
    #[serde(default)]
    pub note: Option<Note>,
}

/// The (startedAt, stoppedAt) pair nested inside a time entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryDuration {
    #[serde(default)]
    pub started_at: String,
    #[serde(default)]
    pub stopped_at: String,
}

/// The single currently-running, unclosed interval for the account.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackingSession {
    #[serde(default)]
    pub activity_id: String,
    #[serde(default)]
    pub activity: Option<ActivityRef>,
    #[serde(default)]
    pub started_at: String,
    #[serde(default)]
    pub note: Option<Note>,
}

// Request bodies

/// Write shape for notes: the API accepts `{"text": ...}` with raw markers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoteText {
    pub text: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StartTrackingRequest {
    pub started_at: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StopTrackingRequest {
    pub stopped_at: String,
}

/// Partial update for the running tracking session. Absent fields are
/// left untouched upstream.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackingPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<NoteText>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activity_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_at: Option<String>,
}

impl TrackingPatch {
    /// True when no field is set; the API rejects empty patches.
    pub fn is_empty(&self) -> bool {
        self.note.is_none() && self.activity_id.is_none() && self.started_at.is_none()
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTimeEntryRequest {
    pub activity_id: String,
    pub started_at: String,
    pub stopped_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<NoteText>,
}

/// Partial update for an existing time entry.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeEntryPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activity_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stopped_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<NoteText>,
}

impl TimeEntryPatch {
    pub fn is_empty(&self) -> bool {
        self.activity_id.is_none()
            && self.started_at.is_none()
            && self.stopped_at.is_none()
            && self.note.is_none()
    }
}

/// Body for tag creation. `scope` and `space_id` are fixed values the
/// upstream API requires; field names follow its mixed conventions.
#[derive(Debug, Clone, Serialize)]
pub struct CreateTagRequest {
    pub key: String,
    pub label: String,
    pub scope: String,
    pub space_id: i64,
}

impl CreateTagRequest {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            scope: "timeular".to_string(),
            space_id: 0,
        }
    }
}

// Response envelopes

#[derive(Debug, Clone, Deserialize)]
pub struct ActivitiesResponse {
    #[serde(default)]
    pub activities: Vec<Activity>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackingResponse {
    #[serde(default)]
    pub current_tracking: Option<TrackingSession>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StopTrackingResponse {
    pub created_time_entry: TimeEntry,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeEntriesResponse {
    #[serde(default)]
    pub time_entries: Vec<TimeEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TagsAndMentions {
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub mentions: Vec<Mention>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_entry_parses_api_shape() {
        let json = serde_json::json!({
            "id": "987",
            "activityId": "123",
            "activity": {"name": "Development", "color": "#a1b2c3"},
            "duration": {"startedAt": "2025-01-15T09:00:00.000", "stoppedAt": "2025-01-15T10:30:00.000"},
            "note": {
                "text": "refactor <{{|t|55|}}>",
                "tags": [{"id": 55, "key": "WEB-3343", "label": "WEB-3343"}],
                "mentions": []
            }
        });

        let entry: TimeEntry = serde_json::from_value(json).unwrap();
        assert_eq!(entry.id, "987");
        assert_eq!(entry.activity_id, "123");
        assert_eq!(entry.activity.unwrap().name, "Development");
        assert_eq!(entry.duration.started_at, "2025-01-15T09:00:00.000");
        let note = entry.note.unwrap();
        assert_eq!(note.tags[0].key, "WEB-3343");
    }

    #[test]
    fn test_tracking_response_with_null_session() {
        let parsed: TrackingResponse =
            serde_json::from_str(r#"{"currentTracking": null}"#).unwrap();
        assert!(parsed.current_tracking.is_none());
    }

    #[test]
    fn test_tracking_patch_skips_unset_fields() {
        let patch = TrackingPatch {
            note: Some(NoteText { text: "standup".to_string() }),
            ..Default::default()
        };
        let json = serde_json::to_value(&patch).unwrap();
        assert_eq!(json, serde_json::json!({"note": {"text": "standup"}}));
    }

    #[test]
    fn test_create_tag_request_fixed_fields() {
        let json = serde_json::to_value(CreateTagRequest::new("WEB-1", "WEB-1")).unwrap();
        assert_eq!(json["scope"], "timeular");
        assert_eq!(json["space_id"], 0);
    }
}
