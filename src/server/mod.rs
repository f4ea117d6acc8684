//! MCP server implementation for the ChatSherlock demo.
//!
//! This module provides the MCP protocol server that exposes the demo's
//! persona picker, search session and mailing-list signup as tools.

pub mod handlers;

pub use handlers::DemoMcpServer;

use anyhow::Result;
use rmcp::transport::io::stdio;
use rmcp::ServiceExt;

/// Run the demo MCP server with stdio transport.
///
/// This function starts the MCP server and runs it until completion.
/// It communicates via stdin/stdout using the MCP protocol.
pub async fn run_server(server: DemoMcpServer) -> Result<()> {
    let service = server.serve(stdio()).await?;
    service.waiting().await?;
    Ok(())
}
