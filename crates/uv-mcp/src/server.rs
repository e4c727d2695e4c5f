//! MCP Server implementation
//!
//! The main server struct that coordinates MCP protocol handling with
//! the uv tool registry and process executor.

use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

use serde_json::{Value, json};

use crate::executor::{CommandRunner, UvRunner};
use crate::handlers::handle_tool_call;
use crate::protocol::{
    InitializeParams, InitializeResult, JsonRpcRequest, JsonRpcResponse, ServerCapabilities,
    ServerInfo, ToolCallParams, ToolsCapability,
};
use crate::registry::ToolRegistry;
use crate::tools::ToolDefinition;
use crate::{Error, Result};

/// MCP Server for the uv package manager
///
/// Exposes uv project, dependency, and toolchain operations via the
/// Model Context Protocol so agentic IDEs can drive Python workflows.
///
/// # Example
///
/// ```ignore
/// use uv_mcp::UvMcpServer;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let mut server = UvMcpServer::new(None);
///     server.run().await?;
///     Ok(())
/// }
/// ```
pub struct UvMcpServer {
    /// Workspace directory used as the cwd fallback; write-once
    workspace: Option<PathBuf>,

    /// Tool catalog and translation rules
    registry: ToolRegistry,

    /// Executor for translated invocations
    runner: Arc<dyn CommandRunner>,
}

impl UvMcpServer {
    /// Create a new MCP server instance
    ///
    /// # Arguments
    ///
    /// * `workspace` - Optional workspace root supplied at startup; when
    ///   absent, the host may still provide one via the initialize
    ///   handshake.
    pub fn new(workspace: Option<PathBuf>) -> Self {
        Self::with_runner(workspace, Arc::new(UvRunner::new()))
    }

    /// Create a server with a custom runner (used by tests)
    pub fn with_runner(workspace: Option<PathBuf>, runner: Arc<dyn CommandRunner>) -> Self {
        Self {
            workspace,
            registry: ToolRegistry::new(),
            runner,
        }
    }

    /// Run the MCP server
    ///
    /// Processes newline-delimited JSON-RPC messages over stdin/stdout,
    /// one message to completion before the next.
    pub async fn run(&mut self) -> Result<()> {
        let stdin = std::io::stdin();
        let mut stdout = std::io::stdout();

        tracing::info!(workspace = ?self.workspace, "MCP server ready, listening on stdio");

        for line in stdin.lock().lines() {
            let line = line?;
            if line.is_empty() {
                continue;
            }

            tracing::debug!(request = %line, "Received message");

            match self.handle_message(&line).await {
                Ok(response) if !response.is_empty() => {
                    writeln!(stdout, "{}", response)?;
                    stdout.flush()?;
                }
                Ok(_) => {} // No response needed (notifications)
                Err(e) => {
                    let error_response =
                        JsonRpcResponse::error(None, -32603, format!("Internal error: {}", e));
                    let json_str = serde_json::to_string(&error_response)?;
                    writeln!(stdout, "{}", json_str)?;
                    stdout.flush()?;
                }
            }
        }

        Ok(())
    }

    /// Handle a single MCP message
    ///
    /// Parses the JSON-RPC request and dispatches to the appropriate
    /// handler. Returns the response as a string, or an empty string for
    /// notifications.
    pub async fn handle_message(&mut self, message: &str) -> Result<String> {
        let request: JsonRpcRequest = serde_json::from_str(message)?;

        let response = match request.method.as_str() {
            "initialize" => self.handle_initialize(request.id, request.params)?,
            "initialized" => return Ok(String::new()),
            "notifications/initialized" => return Ok(String::new()),
            "tools/list" => self.handle_tools_list(request.id)?,
            "tools/call" => self.handle_tools_call(request.id, request.params).await?,
            _ => JsonRpcResponse::error(
                request.id,
                -32601,
                format!("Method not found: {}", request.method),
            ),
        };

        serde_json::to_string(&response).map_err(Error::from)
    }

    /// Handle the initialize request
    ///
    /// Returns server capabilities and info. If the host supplies a
    /// workspace root and none was set at startup, it is adopted here;
    /// the first value wins for the process lifetime.
    fn handle_initialize(&mut self, id: Option<Value>, params: Value) -> Result<JsonRpcResponse> {
        let params: InitializeParams = serde_json::from_value(params).unwrap_or_default();

        if self.workspace.is_none() {
            if let Some(root) = params.root_path.filter(|s| !s.is_empty()) {
                tracing::info!(workspace = %root, "Adopted workspace from initialize params");
                self.workspace = Some(PathBuf::from(root));
            }
        }

        let result = InitializeResult {
            protocol_version: "2024-11-05".to_string(),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability {
                    list_changed: Some(false),
                }),
            },
            server_info: ServerInfo {
                name: "uv-mcp".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        };

        Ok(JsonRpcResponse::success(id, serde_json::to_value(result)?))
    }

    /// Handle tools/list request
    ///
    /// Returns the full static catalog in declaration order.
    fn handle_tools_list(&self, id: Option<Value>) -> Result<JsonRpcResponse> {
        let tools_value: Vec<Value> = self
            .registry
            .definitions()
            .iter()
            .map(|t| {
                json!({
                    "name": t.name,
                    "description": t.description,
                    "inputSchema": t.input_schema
                })
            })
            .collect();

        Ok(JsonRpcResponse::success(id, json!({ "tools": tools_value })))
    }

    /// Handle tools/call request
    ///
    /// Executes the requested tool and returns the formatted result. Tool
    /// failures of every kind come back as successful JSON-RPC responses
    /// carrying descriptive text.
    async fn handle_tools_call(&self, id: Option<Value>, params: Value) -> Result<JsonRpcResponse> {
        let tool_params: ToolCallParams = serde_json::from_value(params)?;

        let result = handle_tool_call(
            &self.registry,
            self.runner.as_ref(),
            self.workspace.as_deref(),
            &tool_params.name,
            &tool_params.arguments,
        )
        .await;

        Ok(JsonRpcResponse::success(id, serde_json::to_value(result)?))
    }

    /// The workspace directory, if one has been set
    pub fn workspace(&self) -> Option<&PathBuf> {
        self.workspace.as_ref()
    }

    /// The tool catalog
    pub fn tools(&self) -> &[ToolDefinition] {
        self.registry.definitions()
    }
}
