//! Tool call dispatch
//!
//! Glue between the protocol layer and the registry/executor pair:
//! resolve the working directory, translate the call, run it, and render
//! the outcome. Validation failures and unknown tools surface as text;
//! nothing here returns an error to the transport.

use std::path::Path;

use serde_json::Value;

use crate::error::Error;
use crate::executor::CommandRunner;
use crate::format::format_response;
use crate::registry::ToolRegistry;
use crate::tools::ToolResult;
use crate::workspace;

/// Handle one tools/call request end to end.
///
/// The working directory is resolved before translation so that every
/// invocation reaching the runner carries one (see [`workspace::resolve`]
/// for the precedence chain).
pub async fn handle_tool_call(
    registry: &ToolRegistry,
    runner: &dyn CommandRunner,
    workspace: Option<&Path>,
    name: &str,
    arguments: &Value,
) -> ToolResult {
    let cwd = workspace::resolve_for_call(arguments, workspace);

    let invocation = match registry.translate(name, arguments, cwd) {
        Ok(invocation) => invocation,
        Err(Error::UnknownTool(name)) => {
            return ToolResult::text(format!("Unknown tool: {}", name));
        }
        Err(e) => {
            tracing::debug!(tool = name, error = %e, "Rejected tool call");
            return ToolResult::error(e.to_string());
        }
    };

    tracing::info!(tool = name, argv = ?invocation.argv, "Executing tool");
    let result = runner.run(&invocation).await;
    ToolResult::text(format_response(&result))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::{CommandInvocation, ExecutionResult};
    use crate::tools::ToolContent;
    use async_trait::async_trait;
    use serde_json::json;
    use std::path::PathBuf;
    use std::sync::Mutex;

    /// Runner that records invocations instead of spawning anything
    struct StubRunner {
        launched: Mutex<Vec<CommandInvocation>>,
        result: ExecutionResult,
    }

    impl StubRunner {
        fn new(result: ExecutionResult) -> Self {
            Self {
                launched: Mutex::new(Vec::new()),
                result,
            }
        }

        fn succeeding(stdout: &str) -> Self {
            Self::new(ExecutionResult {
                success: true,
                stdout: stdout.to_string(),
                stderr: String::new(),
                returncode: 0,
            })
        }

        fn launches(&self) -> Vec<CommandInvocation> {
            self.launched.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl CommandRunner for StubRunner {
        async fn run(&self, invocation: &CommandInvocation) -> ExecutionResult {
            self.launched.lock().unwrap().push(invocation.clone());
            self.result.clone()
        }
    }

    fn text_of(result: &ToolResult) -> &str {
        match &result.content[0] {
            ToolContent::Text { text } => text,
        }
    }

    #[tokio::test]
    async fn test_add_end_to_end() {
        let registry = ToolRegistry::new();
        let runner = StubRunner::succeeding("Resolved 2 packages\n");

        let result = handle_tool_call(
            &registry,
            &runner,
            None,
            "uv_add",
            &json!({"packages": ["requests", "httpx>=0.25"], "dev": true, "cwd": "/proj"}),
        )
        .await;

        assert!(result.is_error.is_none());
        assert!(text_of(&result).starts_with("[Success]"));
        assert!(text_of(&result).contains("Output:\nResolved 2 packages"));

        let launches = runner.launches();
        assert_eq!(launches.len(), 1);
        assert_eq!(
            launches[0].argv,
            vec!["uv", "add", "--dev", "requests", "httpx>=0.25"]
        );
        assert_eq!(launches[0].cwd, PathBuf::from("/proj"));
    }

    #[tokio::test]
    async fn test_version_with_empty_arguments() {
        let registry = ToolRegistry::new();
        let runner = StubRunner::succeeding("uv 0.5.0\n");

        let result = handle_tool_call(&registry, &runner, None, "uv_version", &json!({})).await;

        assert!(text_of(&result).starts_with("[Success]"));
        let launches = runner.launches();
        assert_eq!(launches[0].argv, vec!["uv", "--version"]);
    }

    #[tokio::test]
    async fn test_workspace_used_when_cwd_omitted() {
        let registry = ToolRegistry::new();
        let runner = StubRunner::succeeding("");

        handle_tool_call(
            &registry,
            &runner,
            Some(Path::new("/workspace")),
            "uv_python_install",
            &json!({"version": "3.12"}),
        )
        .await;

        assert_eq!(runner.launches()[0].cwd, PathBuf::from("/workspace"));
    }

    #[tokio::test]
    async fn test_explicit_cwd_overrides_workspace() {
        let registry = ToolRegistry::new();
        let runner = StubRunner::succeeding("");

        handle_tool_call(
            &registry,
            &runner,
            Some(Path::new("/workspace")),
            "uv_sync",
            &json!({"cwd": "/proj"}),
        )
        .await;

        assert_eq!(runner.launches()[0].cwd, PathBuf::from("/proj"));
    }

    #[tokio::test]
    async fn test_unknown_tool_is_plain_text_and_no_launch() {
        let registry = ToolRegistry::new();
        let runner = StubRunner::succeeding("");

        let result = handle_tool_call(&registry, &runner, None, "uv_publish", &json!({})).await;

        assert!(result.is_error.is_none());
        assert_eq!(text_of(&result), "Unknown tool: uv_publish");
        assert!(runner.launches().is_empty());
    }

    #[tokio::test]
    async fn test_missing_required_argument_spawns_nothing() {
        let registry = ToolRegistry::new();
        let runner = StubRunner::succeeding("");

        let result =
            handle_tool_call(&registry, &runner, None, "uv_add", &json!({"cwd": "/proj"})).await;

        assert_eq!(result.is_error, Some(true));
        assert!(text_of(&result).contains("packages"));
        assert!(runner.launches().is_empty());
    }

    #[tokio::test]
    async fn test_failed_execution_renders_errors_section() {
        let registry = ToolRegistry::new();
        let runner = StubRunner::new(ExecutionResult {
            success: false,
            stdout: String::new(),
            stderr: "error: nothing to remove\n".to_string(),
            returncode: 2,
        });

        let result = handle_tool_call(
            &registry,
            &runner,
            None,
            "uv_remove",
            &json!({"packages": ["requests"], "cwd": "/proj"}),
        )
        .await;

        // Process failure is still a normal tool result, not a protocol error
        assert!(result.is_error.is_none());
        assert!(text_of(&result).starts_with("[Failed]"));
        assert!(text_of(&result).contains("Errors:\nerror: nothing to remove"));
    }
}
