//! MCP server implementation.
//!
//! This module contains the main server setup using rmcp.

use std::path::Path;
use std::sync::Arc;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::transport::stdio;
use rmcp::{
    handler::server::ServerHandler, tool, tool_handler, tool_router, ErrorData as McpError,
    ServiceExt,
};
use tokio::sync::RwLock;
use tracing::info;

// The crate's one-parameter `Result` alias must not be imported here: the
// tool_router/tool_handler expansions spell `Result<CallToolResult, McpError>`
// unqualified and need it to resolve to `std::result::Result`.
use crate::error::Error;
use crate::models::{
    CreateSprintParams, CreateTicketParams, CreateUserParams, DeleteTicketParams,
    ListSprintsParams, ListTicketsParams, UpdateSprintStatusParams, UpdateTicketStatusParams,
};
use crate::tools::{SharedStore, Tools};
use trak::store::{create_store, StoreBackend};
use trak::workspace::{self, TrakConfig, CONFIG_FILE_NAME, TRAK_DIR_NAME};

/// Convert a tool-layer error into an MCP protocol error.
///
/// Validation and argument-parse failures are the caller's fault and map to
/// invalid params; everything else is internal.
fn to_mcp_error(e: Error) -> McpError {
    match &e {
        Error::InvalidArgument { .. } | Error::Trak(trak::Error::Validation(_)) => {
            McpError::invalid_params(e.to_string(), None)
        }
        _ => McpError::internal_error(e.to_string(), None),
    }
}

/// The trak MCP server.
///
/// Provides MCP protocol handling over stdio transport. The workspace is
/// discovered once at startup; every tool call operates against it.
#[derive(Clone)]
pub struct TrakMcpServer {
    /// Tool implementations.
    tools: Arc<Tools>,
    /// Tool router for MCP dispatch.
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl TrakMcpServer {
    /// List tickets of one type with optional filters.
    #[tool(
        description = "List tickets of a given type (task or bug) with optional filters (status, assignee, sprint, text search). Sorted by most recently updated."
    )]
    async fn list_tickets(
        &self,
        Parameters(params): Parameters<ListTicketsParams>,
    ) -> Result<CallToolResult, McpError> {
        match self.tools.list_tickets(params).await {
            Ok(tickets) => Ok(CallToolResult::success(vec![Content::json(tickets)?])),
            Err(e) => Err(to_mcp_error(e)),
        }
    }

    /// Create a new ticket.
    #[tool(
        description = "Create a new ticket (task or bug) with optional description, assignee, sprint, estimate, labels, and priority."
    )]
    async fn create_ticket(
        &self,
        Parameters(params): Parameters<CreateTicketParams>,
    ) -> Result<CallToolResult, McpError> {
        match self.tools.create_ticket(params).await {
            Ok(ticket) => Ok(CallToolResult::success(vec![Content::json(ticket)?])),
            Err(e) => Err(to_mcp_error(e)),
        }
    }

    /// Update a ticket's status.
    #[tool(description = "Update a ticket's status to todo, progress, or done.")]
    async fn update_ticket_status(
        &self,
        Parameters(params): Parameters<UpdateTicketStatusParams>,
    ) -> Result<CallToolResult, McpError> {
        match self.tools.update_ticket_status(params).await {
            Ok(ticket) => Ok(CallToolResult::success(vec![Content::json(ticket)?])),
            Err(e) => Err(to_mcp_error(e)),
        }
    }

    /// Delete a ticket.
    #[tool(description = "Delete a ticket by id. Fails if the ticket does not exist.")]
    async fn delete_ticket(
        &self,
        Parameters(params): Parameters<DeleteTicketParams>,
    ) -> Result<CallToolResult, McpError> {
        match self.tools.delete_ticket(params).await {
            Ok(response) => Ok(CallToolResult::success(vec![Content::json(response)?])),
            Err(e) => Err(to_mcp_error(e)),
        }
    }

    /// List all users.
    #[tool(description = "List all users in the workspace.")]
    async fn list_users(&self) -> Result<CallToolResult, McpError> {
        match self.tools.list_users().await {
            Ok(users) => Ok(CallToolResult::success(vec![Content::json(users)?])),
            Err(e) => Err(to_mcp_error(e)),
        }
    }

    /// Create a new user.
    #[tool(
        description = "Create a new user with a unique username, a display name, and an optional email."
    )]
    async fn create_user(
        &self,
        Parameters(params): Parameters<CreateUserParams>,
    ) -> Result<CallToolResult, McpError> {
        match self.tools.create_user(params).await {
            Ok(user) => Ok(CallToolResult::success(vec![Content::json(user)?])),
            Err(e) => Err(to_mcp_error(e)),
        }
    }

    /// List sprints with an optional status filter.
    #[tool(description = "List sprints, optionally filtered by status (planning, active, completed).")]
    async fn list_sprints(
        &self,
        Parameters(params): Parameters<ListSprintsParams>,
    ) -> Result<CallToolResult, McpError> {
        match self.tools.list_sprints(params).await {
            Ok(sprints) => Ok(CallToolResult::success(vec![Content::json(sprints)?])),
            Err(e) => Err(to_mcp_error(e)),
        }
    }

    /// Create a new sprint.
    #[tool(
        description = "Create a new sprint with optional description, status, start/end dates (RFC 3339), and goal. New sprints default to planning."
    )]
    async fn create_sprint(
        &self,
        Parameters(params): Parameters<CreateSprintParams>,
    ) -> Result<CallToolResult, McpError> {
        match self.tools.create_sprint(params).await {
            Ok(sprint) => Ok(CallToolResult::success(vec![Content::json(sprint)?])),
            Err(e) => Err(to_mcp_error(e)),
        }
    }

    /// Update a sprint's status.
    #[tool(description = "Update a sprint's status to planning, active, or completed.")]
    async fn update_sprint_status(
        &self,
        Parameters(params): Parameters<UpdateSprintStatusParams>,
    ) -> Result<CallToolResult, McpError> {
        match self.tools.update_sprint_status(params).await {
            Ok(sprint) => Ok(CallToolResult::success(vec![Content::json(sprint)?])),
            Err(e) => Err(to_mcp_error(e)),
        }
    }
}

impl TrakMcpServer {
    /// Create a server over an already constructed store.
    #[must_use]
    pub fn new(store: SharedStore) -> Self {
        Self {
            tools: Arc::new(Tools::new(store)),
            tool_router: Self::tool_router(),
        }
    }

    /// Create a server by discovering the workspace at or above `start_dir`.
    ///
    /// # Errors
    ///
    /// `Error::NoTrakDirectory` when no `.trak/` is found; storage errors
    /// when the data files are unreadable or corrupt.
    pub async fn from_directory(start_dir: &Path) -> crate::error::Result<Self> {
        let root = workspace::find_trak_root(start_dir)
            .ok_or_else(|| Error::NoTrakDirectory(start_dir.display().to_string()))?;
        let trak_dir = root.join(TRAK_DIR_NAME);
        let config = TrakConfig::load(&trak_dir.join(CONFIG_FILE_NAME)).await?;

        info!("serving workspace at {}", root.display());
        let store = create_store(StoreBackend::Jsonl(trak_dir), config.ticket_prefix).await?;
        Ok(Self::new(Arc::new(RwLock::new(store))))
    }

    /// Serve MCP over stdio until the client disconnects.
    pub async fn run(self) -> crate::error::Result<()> {
        let service = self
            .serve(stdio())
            .await
            .map_err(|e| Error::Mcp(e.to_string()))?;
        service
            .waiting()
            .await
            .map_err(|e| Error::Mcp(e.to_string()))?;
        Ok(())
    }
}

#[tool_handler]
impl ServerHandler for TrakMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "trak-mcp".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                title: None,
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Trak MCP server for ticket tracking. Tickets, sprints, and users live in the \
                 .trak/ directory of the discovered workspace."
                    .into(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn memory_server() -> TrakMcpServer {
        let store = create_store(StoreBackend::InMemory, "test".to_string())
            .await
            .unwrap();
        TrakMcpServer::new(Arc::new(RwLock::new(store)))
    }

    #[tokio::test]
    async fn server_info_advertises_tools() {
        let server = memory_server().await;
        let info = server.get_info();
        assert_eq!(info.server_info.name, "trak-mcp");
        assert!(!info.server_info.version.is_empty());
        assert!(info.instructions.is_some());
    }

    #[tokio::test]
    async fn tool_router_has_all_tools() {
        let server = memory_server().await;
        let tools = server.tool_router.list_all();
        let tool_names: Vec<&str> = tools.iter().map(|t| &*t.name).collect();

        assert!(tool_names.contains(&"list_tickets"));
        assert!(tool_names.contains(&"create_ticket"));
        assert!(tool_names.contains(&"update_ticket_status"));
        assert!(tool_names.contains(&"delete_ticket"));
        assert!(tool_names.contains(&"list_users"));
        assert!(tool_names.contains(&"create_user"));
        assert!(tool_names.contains(&"list_sprints"));
        assert!(tool_names.contains(&"create_sprint"));
        assert!(tool_names.contains(&"update_sprint_status"));
        assert_eq!(tools.len(), 9);
    }

    #[tokio::test]
    async fn from_directory_requires_a_workspace() {
        let temp_dir = TempDir::new().unwrap();
        let result = TrakMcpServer::from_directory(temp_dir.path()).await;
        let err = result.err().unwrap().to_string();
        assert!(err.contains("No .trak directory"));
    }

    #[tokio::test]
    async fn from_directory_discovers_an_initialized_workspace() {
        let temp_dir = TempDir::new().unwrap();
        workspace::init(temp_dir.path(), Some("myteam")).await.unwrap();

        let nested = temp_dir.path().join("src").join("deep");
        std::fs::create_dir_all(&nested).unwrap();

        let server = TrakMcpServer::from_directory(&nested).await.unwrap();
        let created = server
            .tools
            .create_ticket(crate::models::CreateTicketParams {
                ticket_type: None,
                title: "Persisted through the server".to_string(),
                description: None,
                assignee: None,
                sprint: None,
                estimate: None,
                labels: None,
                priority: None,
            })
            .await
            .unwrap();
        assert!(created.id.starts_with("myteam-"));

        // The create must have hit disk before returning
        let content = std::fs::read_to_string(
            temp_dir.path().join(TRAK_DIR_NAME).join("tickets.jsonl"),
        )
        .unwrap();
        assert!(content.contains("Persisted through the server"));
    }

    #[tokio::test]
    async fn validation_failures_map_to_invalid_params() {
        let server = memory_server().await;
        let result = server
            .create_ticket(Parameters(crate::models::CreateTicketParams {
                ticket_type: None,
                title: "".to_string(),
                description: None,
                assignee: None,
                sprint: None,
                estimate: None,
                labels: None,
                priority: None,
            }))
            .await;
        let err = result.err().unwrap();
        assert_eq!(err.code, rmcp::model::ErrorCode::INVALID_PARAMS);
    }
}
