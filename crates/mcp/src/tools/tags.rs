// Tag tools

use crate::protocol::{CallToolResult, ToolSchema};
use crate::tools::render::{json_result, parse_args};
use crate::tools::{json_schema_object, json_schema_string, Tool};
use anyhow::Result;
use early_client::EarlyClient;
use serde::Deserialize;

/// Tool to list all tags and mentions.
pub struct GetTagsTool {
    client: EarlyClient,
}

impl GetTagsTool {
    pub fn new(client: EarlyClient) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl Tool for GetTagsTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "get_tags".to_string(),
            description: "List all tags and mentions. Tag IDs are needed for the \
                          <{{|t|TAG_ID|}}> note format; check here whether a tag key \
                          exists before referencing it."
                .to_string(),
            input_schema: json_schema_object(serde_json::json!({}), vec![]),
        }
    }

    async fn execute(&self, _arguments: serde_json::Value) -> Result<CallToolResult> {
        match self.client.tags_and_mentions().await {
            Ok(listing) => json_result(&serde_json::json!({
                "tags": listing.tags,
                "mentions": listing.mentions,
            })),
            Err(err) => Ok(CallToolResult::error(err)),
        }
    }
}

/// Tool to create a tag.
pub struct CreateTagTool {
    client: EarlyClient,
}

impl CreateTagTool {
    pub fn new(client: EarlyClient) -> Self {
        Self { client }
    }
}

#[derive(Debug, Deserialize)]
struct CreateTagArgs {
    key: String,
    label: String,
}

#[async_trait::async_trait]
impl Tool for CreateTagTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "create_tag".to_string(),
            description: "Create a new tag. Key uniqueness is enforced by the service. \
                          After creating, reference the returned tag ID in notes as \
                          <{{|t|TAG_ID|}}>."
                .to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "key": json_schema_string("Unique key for the tag (e.g. 'WEB-3343'). Shown as #key in notes."),
                    "label": json_schema_string("Display label for the tag (e.g. 'WEB-3343')"),
                }),
                vec!["key", "label"],
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: CreateTagArgs = parse_args(arguments, "create_tag")?;
        if args.key.trim().is_empty() || args.label.trim().is_empty() {
            return Ok(CallToolResult::error("key and label are required"));
        }

        match self.client.create_tag(&args.key, &args.label).await {
            Ok(tag) => json_result(&tag),
            Err(err) => Ok(CallToolResult::error(err)),
        }
    }
}
