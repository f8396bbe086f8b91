// Time entry tools

use crate::protocol::{CallToolResult, ToolSchema};
use crate::tools::render::{entry_json, json_result, non_empty, parse_args};
use crate::tools::{json_schema_object, json_schema_string, Tool};
use anyhow::Result;
use early_client::timestamp::to_api_timestamp;
use early_client::{CreateTimeEntryRequest, EarlyClient, NoteText, TimeEntryPatch};
use serde::Deserialize;

/// Tool to list time entries in a date range.
pub struct GetTimeEntriesTool {
    client: EarlyClient,
}

impl GetTimeEntriesTool {
    pub fn new(client: EarlyClient) -> Self {
        Self { client }
    }
}

#[derive(Debug, Deserialize)]
struct GetTimeEntriesArgs {
    from_date: String,
    to_date: String,
}

#[async_trait::async_trait]
impl Tool for GetTimeEntriesTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "get_time_entries".to_string(),
            description: "List time entries whose interval intersects a date range, with \
                          activity, duration, and decoded notes/tags."
                .to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "from_date": json_schema_string("Start date (YYYY-MM-DD)"),
                    "to_date": json_schema_string("End date (YYYY-MM-DD), inclusive"),
                }),
                vec!["from_date", "to_date"],
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: GetTimeEntriesArgs = parse_args(arguments, "get_time_entries")?;

        match self.client.time_entries(&args.from_date, &args.to_date).await {
            Ok(entries) => {
                let shaped: Vec<_> = entries.iter().map(entry_json).collect();
                json_result(&shaped)
            }
            Err(err) => Ok(CallToolResult::error(err)),
        }
    }
}

/// Tool to create a closed time entry directly.
pub struct CreateTimeEntryTool {
    client: EarlyClient,
}

impl CreateTimeEntryTool {
    pub fn new(client: EarlyClient) -> Self {
        Self { client }
    }
}

#[derive(Debug, Deserialize)]
struct CreateTimeEntryArgs {
    activity_id: String,
    started_at: String,
    stopped_at: String,
    #[serde(default)]
    note: Option<String>,
}

#[async_trait::async_trait]
impl Tool for CreateTimeEntryTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "create_time_entry".to_string(),
            description: "Create a new closed time entry. No active session is required."
                .to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "activity_id": json_schema_string("The activity ID"),
                    "started_at": json_schema_string("Start time (YYYY-MM-DD or YYYY-MM-DDTHH:MM:SS)"),
                    "stopped_at": json_schema_string("Stop time (YYYY-MM-DD or YYYY-MM-DDTHH:MM:SS)"),
                    "note": json_schema_string("Optional note text. Include tags as <{{|t|TAG_ID|}}>."),
                }),
                vec!["activity_id", "started_at", "stopped_at"],
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: CreateTimeEntryArgs = parse_args(arguments, "create_time_entry")?;
        if args.activity_id.trim().is_empty() {
            return Ok(CallToolResult::error("activity_id is required"));
        }

        let (started_at, stopped_at) = match (
            to_api_timestamp(&args.started_at),
            to_api_timestamp(&args.stopped_at),
        ) {
            (Ok(start), Ok(stop)) => (start, stop),
            (Err(err), _) | (_, Err(err)) => return Ok(CallToolResult::error(err)),
        };

        let request = CreateTimeEntryRequest {
            activity_id: args.activity_id,
            started_at,
            stopped_at,
            note: non_empty(args.note).map(|text| NoteText { text }),
        };

        match self.client.create_time_entry(request).await {
            Ok(entry) => json_result(&entry_json(&entry)),
            Err(err) => Ok(CallToolResult::error(err)),
        }
    }
}

/// Tool to update fields of an existing time entry.
pub struct UpdateTimeEntryTool {
    client: EarlyClient,
}

impl UpdateTimeEntryTool {
    pub fn new(client: EarlyClient) -> Self {
        Self { client }
    }
}

#[derive(Debug, Deserialize)]
struct UpdateTimeEntryArgs {
    time_entry_id: String,
    #[serde(default)]
    activity_id: Option<String>,
    #[serde(default)]
    started_at: Option<String>,
    #[serde(default)]
    stopped_at: Option<String>,
    #[serde(default)]
    note: Option<String>,
}

#[async_trait::async_trait]
impl Tool for UpdateTimeEntryTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "update_time_entry".to_string(),
            description: "Update an existing time entry. Only the supplied fields change. \
                          When updating the note, provide the complete text including any \
                          existing content; tags use the raw format <{{|t|TAG_ID|}}>."
                .to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "time_entry_id": json_schema_string("The time entry ID to update"),
                    "activity_id": json_schema_string("New activity ID"),
                    "started_at": json_schema_string("New start time"),
                    "stopped_at": json_schema_string("New stop time"),
                    "note": json_schema_string(
                        "New note text, replacing the existing note. Include tags as <{{|t|TAG_ID|}}>."
                    ),
                }),
                vec!["time_entry_id"],
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: UpdateTimeEntryArgs = parse_args(arguments, "update_time_entry")?;
        if args.time_entry_id.trim().is_empty() {
            return Ok(CallToolResult::error("time_entry_id is required"));
        }

        let started_at = match non_empty(args.started_at).map(|ts| to_api_timestamp(&ts)) {
            Some(Ok(ts)) => Some(ts),
            Some(Err(err)) => return Ok(CallToolResult::error(err)),
            None => None,
        };
        let stopped_at = match non_empty(args.stopped_at).map(|ts| to_api_timestamp(&ts)) {
            Some(Ok(ts)) => Some(ts),
            Some(Err(err)) => return Ok(CallToolResult::error(err)),
            None => None,
        };

        let patch = TimeEntryPatch {
            activity_id: non_empty(args.activity_id),
            started_at,
            stopped_at,
            note: non_empty(args.note).map(|text| NoteText { text }),
        };

        match self.client.update_time_entry(&args.time_entry_id, patch).await {
            Ok(entry) => json_result(&entry_json(&entry)),
            Err(err) => Ok(CallToolResult::error(err)),
        }
    }
}

/// Tool to delete a time entry.
pub struct DeleteTimeEntryTool {
    client: EarlyClient,
}

impl DeleteTimeEntryTool {
    pub fn new(client: EarlyClient) -> Self {
        Self { client }
    }
}

#[derive(Debug, Deserialize)]
struct DeleteTimeEntryArgs {
    time_entry_id: String,
}

#[async_trait::async_trait]
impl Tool for DeleteTimeEntryTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "delete_time_entry".to_string(),
            description: "Delete a time entry by ID. Fails if the entry does not exist."
                .to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "time_entry_id": json_schema_string("The time entry ID to delete"),
                }),
                vec!["time_entry_id"],
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: DeleteTimeEntryArgs = parse_args(arguments, "delete_time_entry")?;
        if args.time_entry_id.trim().is_empty() {
            return Ok(CallToolResult::error("time_entry_id is required"));
        }

        match self.client.delete_time_entry(&args.time_entry_id).await {
            Ok(()) => json_result(&serde_json::json!({
                "deleted": true,
                "time_entry_id": args.time_entry_id,
            })),
            Err(err) => Ok(CallToolResult::error(err)),
        }
    }
}
