// Activity tools

use crate::protocol::{CallToolResult, ToolSchema};
use crate::tools::render::json_result;
use crate::tools::{json_schema_object, Tool};
use anyhow::Result;
use early_client::EarlyClient;

/// Tool to list all activities (name, id, color).
pub struct GetActivitiesTool {
    client: EarlyClient,
}

impl GetActivitiesTool {
    pub fn new(client: EarlyClient) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl Tool for GetActivitiesTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "get_activities".to_string(),
            description: "List all activities (name, id, color). Use this to find the \
                          activity ID for time tracking (e.g. 'Development')."
                .to_string(),
            input_schema: json_schema_object(serde_json::json!({}), vec![]),
        }
    }

    async fn execute(&self, _arguments: serde_json::Value) -> Result<CallToolResult> {
        match self.client.activities().await {
            Ok(activities) => json_result(&activities),
            Err(err) => Ok(CallToolResult::error(err)),
        }
    }
}
