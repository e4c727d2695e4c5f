//! uv MCP Server
//!
//! A Model Context Protocol server that exposes the uv Python package
//! manager to agentic IDEs like Claude Desktop, Windsurf, and Cursor.
//!
//! # Usage
//!
//! ```bash
//! uv-mcp [--workspace <path>]
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Control log verbosity (default: `uv_mcp=info`)
//! - `PWD`: Lowest-precedence working-directory fallback for tool calls
//!
//! # Protocol
//!
//! The server communicates via JSON-RPC 2.0 over stdio:
//! - Requests/responses go through stdout
//! - Logs go to stderr (to avoid interfering with the protocol)

use std::path::PathBuf;

use clap::Parser;
use uv_mcp::UvMcpServer;

/// MCP server for the uv Python package manager
#[derive(Parser)]
#[command(name = "uv-mcp")]
#[command(about = "MCP server for the uv Python package manager")]
#[command(version)]
struct Args {
    /// Workspace root used as the working-directory fallback for tool
    /// calls that omit an explicit cwd
    #[arg(short, long)]
    workspace: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging to stderr (stdout is reserved for MCP protocol)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("uv_mcp=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    tracing::info!(workspace = ?args.workspace, "Starting uv-mcp server");

    let mut server = UvMcpServer::new(args.workspace);
    server.run().await?;

    Ok(())
}
