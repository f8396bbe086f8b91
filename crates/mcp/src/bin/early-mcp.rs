// Standalone MCP server binary

use anyhow::Result;
use early_client::{EarlyClient, EarlyConfig};
use early_mcp::server::McpServer;
use early_mcp::tools::*;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing to stderr; stdout carries the protocol.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    tracing::info!("Early MCP server starting");

    // Credentials are required up front; fail fast before serving.
    let config = EarlyConfig::from_env()?;
    let client = EarlyClient::connect(config).await?;
    tracing::info!("signed in to Early API");

    let mut registry = ToolRegistry::new();

    // Activities
    registry.register(Arc::new(GetActivitiesTool::new(client.clone())));

    // Tracking session
    registry.register(Arc::new(GetCurrentTrackingTool::new(client.clone())));
    registry.register(Arc::new(StartTrackingTool::new(client.clone())));
    registry.register(Arc::new(StopTrackingTool::new(client.clone())));
    registry.register(Arc::new(EditCurrentTrackingTool::new(client.clone())));

    // Time entries
    registry.register(Arc::new(GetTimeEntriesTool::new(client.clone())));
    registry.register(Arc::new(CreateTimeEntryTool::new(client.clone())));
    registry.register(Arc::new(UpdateTimeEntryTool::new(client.clone())));
    registry.register(Arc::new(DeleteTimeEntryTool::new(client.clone())));

    // Tags
    registry.register(Arc::new(GetTagsTool::new(client.clone())));
    registry.register(Arc::new(CreateTagTool::new(client)));

    tracing::info!("Registered {} tools", registry.len());

    let server = McpServer::new(registry);
    server.serve().await?;

    Ok(())
}
