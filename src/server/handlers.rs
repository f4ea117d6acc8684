//! MCP tool handlers for the ChatSherlock demo server.
//!
//! This module implements all the MCP tools using the rmcp SDK's tool_router pattern.

use crate::client::SubscriptionStatus;
use crate::domain::Persona;
use crate::error::MailingListError;
use crate::services::{DemoService, SignupService};
use crate::signup::SUCCESS_MESSAGE;
use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::*;
use rmcp::{tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::sync::Arc;

/// Signup source reported when none is given.
const DEFAULT_SIGNUP_SOURCE: &str = "chatsherlock-demo";

/// The MCP server that exposes the search demo as tools.
#[derive(Clone)]
pub struct DemoMcpServer {
    demo_service: Arc<dyn DemoService>,
    // None when no mailing-list credentials are configured
    signup_service: Option<Arc<dyn SignupService>>,
    tool_router: ToolRouter<Self>,
}

// Implement ServerHandler using the tool_handler macro
#[tool_handler]
impl ServerHandler for DemoMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities {
                tools: Some(Default::default()),
                ..Default::default()
            },
            server_info: Implementation {
                name: "chatsherlock-demo".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                icons: None,
                title: None,
                website_url: None,
            },
            instructions: Some("ChatSherlock demo - pick a persona, search its chat history, open and collapse conversations, and join the mailing list.".into()),
        }
    }
}

// Helper structs for tool parameters
#[derive(Debug, Deserialize, JsonSchema)]
struct SelectPersonaParams {
    /// researcher, consultant or creator
    persona: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct SearchConversationsParams {
    /// Query text; empty or whitespace clears the search
    query: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct ConversationIdParams {
    conversation_id: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct BrowseConversationsParams {
    #[serde(default)]
    filter: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct SubscribeParams {
    email: String,
    #[serde(default)]
    source: Option<String>,
}

#[derive(Debug, Serialize)]
struct SubscribeResponse {
    success: bool,
    message: &'static str,
    already_subscribed: bool,
}

// Helper function to convert errors to MCP errors
fn to_mcp_error(e: impl std::fmt::Display) -> McpError {
    McpError {
        code: ErrorCode::INTERNAL_ERROR,
        message: Cow::from(e.to_string()),
        data: None,
    }
}

fn json_result(value: &impl Serialize) -> Result<CallToolResult, McpError> {
    Ok(CallToolResult::success(vec![Content::text(
        serde_json::to_string_pretty(value).map_err(to_mcp_error)?,
    )]))
}

// Tool router implementation
#[tool_router]
impl DemoMcpServer {
    /// Create a new demo MCP server.
    pub fn new(
        demo_service: Arc<dyn DemoService>,
        signup_service: Option<Arc<dyn SignupService>>,
    ) -> Self {
        Self {
            demo_service,
            signup_service,
            tool_router: Self::tool_router(),
        }
    }

    #[tool(
        description = "List the demo personas (researcher, consultant, creator) with their description and a suggested first query."
    )]
    async fn list_personas(&self) -> Result<CallToolResult, McpError> {
        json_result(&self.demo_service.list_personas())
    }

    #[tool(
        description = "Load a persona's chat history and reset the search. Must be called before searching."
    )]
    async fn select_persona(
        &self,
        params: Parameters<SelectPersonaParams>,
    ) -> Result<CallToolResult, McpError> {
        let persona: Persona = params.0.persona.parse().map_err(to_mcp_error)?;

        let snapshot = self
            .demo_service
            .select_persona(persona)
            .await
            .map_err(to_mcp_error)?;

        json_result(&snapshot)
    }

    #[tool(
        description = "Search the active persona's conversations for a literal, case-insensitive phrase. Returns results ranked by number of occurrences, each with a snippet where matches are wrapped in <mark> tags."
    )]
    async fn search_conversations(
        &self,
        params: Parameters<SearchConversationsParams>,
    ) -> Result<CallToolResult, McpError> {
        let snapshot = self
            .demo_service
            .search(&params.0.query)
            .await
            .map_err(to_mcp_error)?;

        json_result(&snapshot)
    }

    #[tool(
        description = "Open a conversation from the current search results. Every message is returned with the query highlighted."
    )]
    async fn open_conversation(
        &self,
        params: Parameters<ConversationIdParams>,
    ) -> Result<CallToolResult, McpError> {
        let view = self
            .demo_service
            .open_conversation(&params.0.conversation_id)
            .await
            .map_err(to_mcp_error)?;

        json_result(&view)
    }

    #[tool(description = "Close the open conversation and return to the result list.")]
    async fn collapse_conversation(&self) -> Result<CallToolResult, McpError> {
        let snapshot = self
            .demo_service
            .collapse_conversation()
            .await
            .map_err(to_mcp_error)?;

        json_result(&snapshot)
    }

    #[tool(
        description = "List every conversation of the active persona, optionally filtered by a phrase found in the title or any message. No ranking."
    )]
    async fn browse_conversations(
        &self,
        params: Parameters<BrowseConversationsParams>,
    ) -> Result<CallToolResult, McpError> {
        let filter = params.0.filter.unwrap_or_default();
        let conversations = self
            .demo_service
            .browse(&filter)
            .await
            .map_err(to_mcp_error)?;

        json_result(&serde_json::json!({
            "filter": filter,
            "count": conversations.len(),
            "conversations": conversations,
        }))
    }

    #[tool(description = "Join the ChatSherlock mailing list.")]
    async fn subscribe(
        &self,
        params: Parameters<SubscribeParams>,
    ) -> Result<CallToolResult, McpError> {
        let service = self
            .signup_service
            .as_ref()
            .ok_or_else(|| to_mcp_error(MailingListError::NotConfigured))?;

        let params = params.0;
        let source = params
            .source
            .unwrap_or_else(|| DEFAULT_SIGNUP_SOURCE.to_string());

        let status = service
            .subscribe(&params.email, &source)
            .await
            .map_err(to_mcp_error)?;

        json_result(&SubscribeResponse {
            success: true,
            message: SUCCESS_MESSAGE,
            already_subscribed: status == SubscriptionStatus::AlreadySubscribed,
        })
    }
}
