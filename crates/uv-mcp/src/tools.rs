//! MCP Tool definitions
//!
//! The static catalog of uv operations exposed over MCP, together with
//! the result shapes the protocol expects.
//!
//! # Tool Categories
//!
//! ## Project Lifecycle
//! - `uv_init` - Initialize a new Python project
//! - `uv_add` - Add dependencies (regular or dev)
//! - `uv_remove` - Remove dependencies
//! - `uv_sync` - Sync the environment with pyproject.toml
//!
//! ## Execution
//! - `uv_run` - Run a command in the project environment
//!
//! ## Dependency Inspection
//! - `uv_pip_list` - List installed packages
//! - `uv_lock` - Generate or update the lock file
//!
//! ## Toolchain Management
//! - `uv_python_install` - Install a Python version
//! - `uv_python_list` - List available Python versions
//! - `uv_version` - Report the installed uv version

use serde::{Deserialize, Serialize};

/// Tool definition for MCP protocol
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub input_schema: serde_json::Value,
}

/// Result from a tool invocation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResult {
    pub content: Vec<ToolContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_error: Option<bool>,
}

/// Content types for tool results
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ToolContent {
    #[serde(rename = "text")]
    Text { text: String },
}

impl ToolResult {
    /// Create a successful text result
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: vec![ToolContent::Text {
                text: content.into(),
            }],
            is_error: None,
        }
    }

    /// Create an error result
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            content: vec![ToolContent::Text {
                text: message.into(),
            }],
            is_error: Some(true),
        }
    }
}

/// Get all available tool definitions, in stable declaration order
pub fn get_tool_definitions() -> Vec<ToolDefinition> {
    vec![
        // Project Lifecycle
        ToolDefinition {
            name: "uv_init".to_string(),
            description: "Initialize a new Python project with uv. Creates pyproject.toml and sets up the project structure. IMPORTANT: Always specify cwd to target the user's workspace.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "name": {
                        "type": "string",
                        "description": "Project name (optional, uses directory name if not specified)"
                    },
                    "python": {
                        "type": "string",
                        "description": "Python version to use (e.g., '3.11', '3.12')"
                    },
                    "cwd": {
                        "type": "string",
                        "description": "Working directory (user's project path). Required to avoid operating on wrong directory."
                    }
                },
                "required": ["cwd"]
            }),
        },
        ToolDefinition {
            name: "uv_add".to_string(),
            description: "Add dependencies to the project. Supports regular and development dependencies. IMPORTANT: Always specify cwd.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "packages": {
                        "type": "array",
                        "items": { "type": "string" },
                        "description": "List of packages to add (e.g., ['requests', 'httpx>=0.25'])"
                    },
                    "dev": {
                        "type": "boolean",
                        "description": "Add as development dependency",
                        "default": false
                    },
                    "cwd": {
                        "type": "string",
                        "description": "Working directory (user's project path). Required."
                    }
                },
                "required": ["packages", "cwd"]
            }),
        },
        ToolDefinition {
            name: "uv_remove".to_string(),
            description: "Remove dependencies from the project. IMPORTANT: Always specify cwd.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "packages": {
                        "type": "array",
                        "items": { "type": "string" },
                        "description": "List of packages to remove"
                    },
                    "cwd": {
                        "type": "string",
                        "description": "Working directory (user's project path). Required."
                    }
                },
                "required": ["packages", "cwd"]
            }),
        },
        ToolDefinition {
            name: "uv_sync".to_string(),
            description: "Sync the project environment with dependencies defined in pyproject.toml. IMPORTANT: Always specify cwd.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "frozen": {
                        "type": "boolean",
                        "description": "Sync without updating the lock file",
                        "default": false
                    },
                    "cwd": {
                        "type": "string",
                        "description": "Working directory (user's project path). Required."
                    }
                },
                "required": ["cwd"]
            }),
        },
        // Execution
        ToolDefinition {
            name: "uv_run".to_string(),
            description: "Run a command in the project environment. IMPORTANT: Always specify cwd.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "command": {
                        "type": "array",
                        "items": { "type": "string" },
                        "description": "Command and arguments to run (e.g., ['python', 'main.py'] or ['pytest', '-v'])"
                    },
                    "cwd": {
                        "type": "string",
                        "description": "Working directory (user's project path). Required."
                    }
                },
                "required": ["command", "cwd"]
            }),
        },
        // Dependency Inspection
        ToolDefinition {
            name: "uv_pip_list".to_string(),
            description: "List installed packages in the project environment. IMPORTANT: Always specify cwd.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "format": {
                        "type": "string",
                        "enum": ["columns", "json"],
                        "description": "Output format",
                        "default": "columns"
                    },
                    "cwd": {
                        "type": "string",
                        "description": "Working directory (user's project path). Required."
                    }
                },
                "required": ["cwd"]
            }),
        },
        ToolDefinition {
            name: "uv_lock".to_string(),
            description: "Generate or update the lock file (uv.lock). IMPORTANT: Always specify cwd.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "check": {
                        "type": "boolean",
                        "description": "Check if lock file is up to date without modifying it",
                        "default": false
                    },
                    "cwd": {
                        "type": "string",
                        "description": "Working directory (user's project path). Required."
                    }
                },
                "required": ["cwd"]
            }),
        },
        // Toolchain Management
        ToolDefinition {
            name: "uv_python_install".to_string(),
            description: "Install a specific Python version.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "version": {
                        "type": "string",
                        "description": "Python version to install (e.g., '3.11', '3.12.1')"
                    }
                },
                "required": ["version"]
            }),
        },
        ToolDefinition {
            name: "uv_python_list".to_string(),
            description: "List available and installed Python versions.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "installed_only": {
                        "type": "boolean",
                        "description": "Only show installed versions",
                        "default": false
                    }
                }
            }),
        },
        ToolDefinition {
            name: "uv_version".to_string(),
            description: "Get the installed uv version.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {}
            }),
        },
    ]
}
