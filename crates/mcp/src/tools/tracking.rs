// Tracking session tools

use crate::protocol::{CallToolResult, ToolSchema};
use crate::tools::render::{entry_json, json_result, non_empty, parse_args, tracking_json};
use crate::tools::{json_schema_object, json_schema_string, Tool};
use anyhow::Result;
use early_client::timestamp::to_api_timestamp;
use early_client::{EarlyClient, NoteText, TrackingPatch};
use serde::Deserialize;

/// Tool to fetch the currently running tracking session.
pub struct GetCurrentTrackingTool {
    client: EarlyClient,
}

impl GetCurrentTrackingTool {
    pub fn new(client: EarlyClient) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl Tool for GetCurrentTrackingTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "get_current_tracking".to_string(),
            description: "Get the currently running time tracking session, including \
                          activity, start time, and note/tags. Reports when nothing is \
                          being tracked."
                .to_string(),
            input_schema: json_schema_object(serde_json::json!({}), vec![]),
        }
    }

    async fn execute(&self, _arguments: serde_json::Value) -> Result<CallToolResult> {
        match self.client.current_tracking().await {
            Ok(Some(session)) => json_result(&tracking_json(&session)),
            Ok(None) => json_result(&serde_json::json!({
                "tracking": null,
                "message": "Nothing currently being tracked"
            })),
            Err(err) => Ok(CallToolResult::error(err)),
        }
    }
}

/// Tool to start tracking an activity.
pub struct StartTrackingTool {
    client: EarlyClient,
}

impl StartTrackingTool {
    pub fn new(client: EarlyClient) -> Self {
        Self { client }
    }
}

#[derive(Debug, Deserialize)]
struct StartTrackingArgs {
    activity_id: String,
    #[serde(default)]
    started_at: Option<String>,
}

#[async_trait::async_trait]
impl Tool for StartTrackingTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "start_tracking".to_string(),
            description: "Start tracking time on an activity. Fails if a session is \
                          already running."
                .to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "activity_id": json_schema_string(
                        "The activity ID to track (use get_activities to find IDs)"
                    ),
                    "started_at": json_schema_string(
                        "Optional start time (YYYY-MM-DD or YYYY-MM-DDTHH:MM:SS). Defaults to now."
                    )
                }),
                vec!["activity_id"],
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: StartTrackingArgs = parse_args(arguments, "start_tracking")?;
        if args.activity_id.trim().is_empty() {
            return Ok(CallToolResult::error("activity_id is required"));
        }

        let started_at = non_empty(args.started_at);
        match self
            .client
            .start_tracking(&args.activity_id, started_at.as_deref())
            .await
        {
            Ok(Some(session)) => json_result(&tracking_json(&session)),
            Ok(None) => json_result(&serde_json::json!({
                "status": "started",
                "activity_id": args.activity_id,
            })),
            Err(err) => Ok(CallToolResult::error(err)),
        }
    }
}

/// Tool to stop the running session, closing it into a time entry.
pub struct StopTrackingTool {
    client: EarlyClient,
}

impl StopTrackingTool {
    pub fn new(client: EarlyClient) -> Self {
        Self { client }
    }
}

#[derive(Debug, Deserialize)]
struct StopTrackingArgs {
    #[serde(default)]
    stopped_at: Option<String>,
}

#[async_trait::async_trait]
impl Tool for StopTrackingTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "stop_tracking".to_string(),
            description: "Stop the currently running time tracker. The closed interval \
                          is returned as a time entry. Fails if nothing is being tracked."
                .to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "stopped_at": json_schema_string(
                        "Optional stop time (YYYY-MM-DD or YYYY-MM-DDTHH:MM:SS). Defaults to now."
                    )
                }),
                vec![],
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: StopTrackingArgs = parse_args(arguments, "stop_tracking")?;
        let stopped_at = non_empty(args.stopped_at);

        match self.client.stop_tracking(stopped_at.as_deref()).await {
            Ok(entry) => json_result(&entry_json(&entry)),
            Err(err) => Ok(CallToolResult::error(err)),
        }
    }
}

/// Tool to edit the running session's note, activity, or start time.
pub struct EditCurrentTrackingTool {
    client: EarlyClient,
}

impl EditCurrentTrackingTool {
    pub fn new(client: EarlyClient) -> Self {
        Self { client }
    }
}

#[derive(Debug, Deserialize)]
struct EditCurrentTrackingArgs {
    #[serde(default)]
    note: Option<String>,
    #[serde(default)]
    activity_id: Option<String>,
    #[serde(default)]
    started_at: Option<String>,
}

#[async_trait::async_trait]
impl Tool for EditCurrentTrackingTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "edit_current_tracking".to_string(),
            description: "Edit the currently running tracking session. Tags in the note \
                          use the raw format <{{|t|TAG_ID|}}> (use get_tags to find tag \
                          IDs). Fails if nothing is being tracked."
                .to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "note": json_schema_string(
                        "New note text. Include tags as <{{|t|TAG_ID|}}>; raw format is stored verbatim."
                    ),
                    "activity_id": json_schema_string("Change the activity being tracked"),
                    "started_at": json_schema_string("Change the start time"),
                }),
                vec![],
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: EditCurrentTrackingArgs = parse_args(arguments, "edit_current_tracking")?;

        let started_at = match non_empty(args.started_at) {
            Some(ts) => match to_api_timestamp(&ts) {
                Ok(ts) => Some(ts),
                Err(err) => return Ok(CallToolResult::error(err)),
            },
            None => None,
        };

        let patch = TrackingPatch {
            note: non_empty(args.note).map(|text| NoteText { text }),
            activity_id: non_empty(args.activity_id),
            started_at,
        };

        match self.client.edit_tracking(patch).await {
            Ok(Some(session)) => json_result(&tracking_json(&session)),
            Ok(None) => json_result(&serde_json::json!({"status": "updated"})),
            Err(err) => Ok(CallToolResult::error(err)),
        }
    }
}
