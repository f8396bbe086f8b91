// MCP (Model Context Protocol) server for the Early time tracking API.
// Exposes the eleven tracking tools to agent clients (Claude Code, etc.)

pub mod protocol;
pub mod server;
pub mod tools;

pub use server::McpServer;
