//! MCP Server for the uv Python package manager
//!
//! This crate exposes uv's command-line surface via the Model Context
//! Protocol (MCP), allowing agentic IDEs (like Claude Desktop, Windsurf,
//! Cursor) to drive Python project setup, dependency management, and
//! environment operations without shelling out directly.
//!
//! # Architecture
//!
//! ```text
//! [ MCP Client (Claude/IDE) ]
//!        | (JSON-RPC over stdio)
//!        v
//! [ UvMcpServer (protocol dispatch) ]
//!        |
//!        +--> [ ToolRegistry (catalog + argv translation) ]
//!        +--> [ workspace (cwd precedence resolution) ]
//!        +--> [ CommandRunner (bounded-time uv subprocess) ]
//!        +--> [ format (uniform text response) ]
//! ```
//!
//! # Tools
//!
//! The server exposes tools for:
//! - Project lifecycle (init, sync, lock)
//! - Dependency management (add, remove, pip list)
//! - Running commands in the project environment
//! - Python toolchain management (install, list, uv version)
//!
//! Every external-process condition (non-zero exit, missing binary,
//! timeout) is absorbed into a uniform result and rendered as text; the
//! transport layer only ever sees completed responses.

pub mod error;
pub mod executor;
pub mod format;
pub mod handlers;
pub mod protocol;
pub mod registry;
pub mod server;
pub mod tools;
pub mod workspace;

pub use error::{Error, Result};
pub use executor::{CommandInvocation, CommandRunner, ExecutionResult, UvRunner};
pub use registry::ToolRegistry;
pub use server::UvMcpServer;
pub use tools::{ToolContent, ToolDefinition, ToolResult, get_tool_definitions};
