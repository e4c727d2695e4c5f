//! Working-directory resolution
//!
//! Every invocation targets the user's project directory, never the
//! server's own installation directory. The precedence chain is strict:
//! an explicit `cwd` argument wins, then the workspace adopted at
//! initialization, then the host's `PWD`, and only then the server
//! process's own current directory.

use std::path::{Path, PathBuf};

use serde_json::Value;

/// Environment variable consulted as the lowest-precedence directory hint
pub const PWD_ENV: &str = "PWD";

/// Resolve the working directory for one tool call.
///
/// Pure over its inputs; first non-empty match wins.
pub fn resolve(
    explicit_cwd: Option<&str>,
    workspace: Option<&Path>,
    env_pwd: Option<&str>,
    fallback: PathBuf,
) -> PathBuf {
    if let Some(cwd) = explicit_cwd.filter(|s| !s.is_empty()) {
        return PathBuf::from(cwd);
    }
    if let Some(workspace) = workspace {
        return workspace.to_path_buf();
    }
    if let Some(pwd) = env_pwd.filter(|s| !s.is_empty()) {
        return PathBuf::from(pwd);
    }
    fallback
}

/// Resolve the working directory from call arguments and process state.
///
/// Reads `PWD` from the environment and uses the server's own current
/// directory as the last resort.
pub fn resolve_for_call(arguments: &Value, workspace: Option<&Path>) -> PathBuf {
    let explicit = arguments.get("cwd").and_then(|v| v.as_str());
    let env_pwd = std::env::var(PWD_ENV).ok();
    let fallback = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    resolve(explicit, workspace, env_pwd.as_deref(), fallback)
}
