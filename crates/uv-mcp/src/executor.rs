//! Bounded-time execution of uv invocations
//!
//! Runs one [`CommandInvocation`] as a child process and normalizes every
//! outcome (success, non-zero exit, missing binary, timeout, other launch
//! faults) into an [`ExecutionResult`]. No external-process condition is
//! allowed to propagate past this boundary as an error.

use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;

/// Wall-clock bound on a single child process
pub const COMMAND_TIMEOUT: Duration = Duration::from_secs(300);

/// Message reported when the timeout bound expires
pub const TIMEOUT_MESSAGE: &str = "Command timed out after 5 minutes";

/// Message reported when the uv binary cannot be located
pub const INSTALL_HINT: &str =
    "uv is not installed. Install it with: curl -LsSf https://astral.sh/uv/install.sh | sh";

/// A concrete subprocess argument vector plus its resolved working directory.
///
/// The first argv token is the uv binary name; the rest are the translated
/// subcommand tokens. Exists only for the duration of one tool call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandInvocation {
    pub argv: Vec<String>,
    pub cwd: PathBuf,
}

/// Observable outcome of one invocation.
///
/// `returncode == -1` is reserved for invocations that never produced an
/// exit status (timeout, missing binary, unspawnable); a process that ran
/// and exited non-zero keeps its real exit code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionResult {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
    pub returncode: i32,
}

/// Tagged internal outcome, collapsed into [`ExecutionResult`] for callers.
#[derive(Debug)]
pub enum ExecOutcome {
    /// The process launched and exited with a status
    Exited {
        code: i32,
        stdout: String,
        stderr: String,
    },
    /// The process exceeded [`COMMAND_TIMEOUT`] and was terminated
    TimedOut,
    /// The uv binary could not be located
    BinaryMissing,
    /// Any other launch-time failure (permissions, invalid cwd, ...)
    LaunchFailed { message: String },
}

impl ExecOutcome {
    /// Collapse the tagged outcome into the four observable fields
    pub fn into_result(self) -> ExecutionResult {
        match self {
            ExecOutcome::Exited {
                code,
                stdout,
                stderr,
            } => ExecutionResult {
                success: code == 0,
                stdout,
                stderr,
                returncode: code,
            },
            ExecOutcome::TimedOut => ExecutionResult {
                success: false,
                stdout: String::new(),
                stderr: TIMEOUT_MESSAGE.to_string(),
                returncode: -1,
            },
            ExecOutcome::BinaryMissing => ExecutionResult {
                success: false,
                stdout: String::new(),
                stderr: INSTALL_HINT.to_string(),
                returncode: -1,
            },
            ExecOutcome::LaunchFailed { message } => ExecutionResult {
                success: false,
                stdout: String::new(),
                stderr: message,
                returncode: -1,
            },
        }
    }
}

/// Seam for executing invocations, so tests can substitute a stub
#[async_trait]
pub trait CommandRunner: Send + Sync {
    async fn run(&self, invocation: &CommandInvocation) -> ExecutionResult;
}

/// Runner that spawns the real uv binary via tokio
pub struct UvRunner;

impl UvRunner {
    pub fn new() -> Self {
        Self
    }

    async fn execute(&self, invocation: &CommandInvocation) -> ExecOutcome {
        let Some((program, args)) = invocation.argv.split_first() else {
            return ExecOutcome::LaunchFailed {
                message: "empty argument vector".to_string(),
            };
        };

        let mut cmd = Command::new(program);
        cmd.args(args)
            .current_dir(&invocation.cwd)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        tracing::debug!(argv = ?invocation.argv, cwd = %invocation.cwd.display(), "Spawning uv");

        let child = match cmd.spawn() {
            Ok(child) => child,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return ExecOutcome::BinaryMissing;
            }
            Err(e) => {
                return ExecOutcome::LaunchFailed {
                    message: e.to_string(),
                };
            }
        };

        // kill_on_drop terminates the child when the timeout wins the race
        match tokio::time::timeout(COMMAND_TIMEOUT, child.wait_with_output()).await {
            Ok(Ok(output)) => ExecOutcome::Exited {
                code: output.status.code().unwrap_or(-1),
                stdout: String::from_utf8_lossy(&output.stdout).to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            },
            Ok(Err(e)) => ExecOutcome::LaunchFailed {
                message: e.to_string(),
            },
            Err(_) => {
                tracing::warn!(argv = ?invocation.argv, "Command timed out");
                ExecOutcome::TimedOut
            }
        }
    }
}

impl Default for UvRunner {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CommandRunner for UvRunner {
    async fn run(&self, invocation: &CommandInvocation) -> ExecutionResult {
        self.execute(invocation).await.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_exited_zero_is_success() {
        let result = ExecOutcome::Exited {
            code: 0,
            stdout: "ok\n".to_string(),
            stderr: String::new(),
        }
        .into_result();
        assert!(result.success);
        assert_eq!(result.returncode, 0);
        assert_eq!(result.stdout, "ok\n");
    }

    #[test]
    fn test_exited_nonzero_keeps_real_code() {
        let result = ExecOutcome::Exited {
            code: 2,
            stdout: String::new(),
            stderr: "error: no pyproject.toml\n".to_string(),
        }
        .into_result();
        assert!(!result.success);
        assert_eq!(result.returncode, 2);
        assert_eq!(result.stderr, "error: no pyproject.toml\n");
    }

    #[test]
    fn test_timeout_shape() {
        let result = ExecOutcome::TimedOut.into_result();
        assert!(!result.success);
        assert_eq!(result.returncode, -1);
        assert_eq!(result.stdout, "");
        assert_eq!(result.stderr, TIMEOUT_MESSAGE);
    }

    #[test]
    fn test_binary_missing_shape() {
        let result = ExecOutcome::BinaryMissing.into_result();
        assert!(!result.success);
        assert_eq!(result.returncode, -1);
        assert_eq!(result.stdout, "");
        assert_eq!(result.stderr, INSTALL_HINT);
    }

    #[test]
    fn test_launch_failure_carries_message() {
        let result = ExecOutcome::LaunchFailed {
            message: "Permission denied (os error 13)".to_string(),
        }
        .into_result();
        assert!(!result.success);
        assert_eq!(result.returncode, -1);
        assert!(result.stderr.contains("Permission denied"));
    }

    #[tokio::test]
    async fn test_missing_binary_reported_not_raised() {
        let temp = TempDir::new().unwrap();
        let runner = UvRunner::new();
        let invocation = CommandInvocation {
            argv: vec![
                "definitely-not-a-real-binary-uv-mcp".to_string(),
                "--version".to_string(),
            ],
            cwd: temp.path().to_path_buf(),
        };

        let result = runner.run(&invocation).await;
        assert!(!result.success);
        assert_eq!(result.returncode, -1);
        assert_eq!(result.stderr, INSTALL_HINT);
    }

    #[tokio::test]
    async fn test_real_process_success() {
        // `true` is POSIX; exits 0 with no output
        let temp = TempDir::new().unwrap();
        let runner = UvRunner::new();
        let invocation = CommandInvocation {
            argv: vec!["true".to_string()],
            cwd: temp.path().to_path_buf(),
        };

        let result = runner.run(&invocation).await;
        assert!(result.success);
        assert_eq!(result.returncode, 0);
    }

    #[tokio::test]
    async fn test_real_process_nonzero_exit() {
        let temp = TempDir::new().unwrap();
        let runner = UvRunner::new();
        let invocation = CommandInvocation {
            argv: vec!["false".to_string()],
            cwd: temp.path().to_path_buf(),
        };

        let result = runner.run(&invocation).await;
        assert!(!result.success);
        assert_eq!(result.returncode, 1);
    }

    #[tokio::test]
    async fn test_invalid_cwd_is_absorbed() {
        // The directory no longer exists once the TempDir is dropped
        let temp = TempDir::new().unwrap();
        let gone = temp.path().to_path_buf();
        drop(temp);

        let runner = UvRunner::new();
        let invocation = CommandInvocation {
            argv: vec!["true".to_string()],
            cwd: gone,
        };

        let result = runner.run(&invocation).await;
        assert!(!result.success);
        assert_eq!(result.returncode, -1);
        assert!(!result.stderr.is_empty());
    }

    #[tokio::test]
    async fn test_empty_argv_is_launch_failure() {
        let runner = UvRunner::new();
        let invocation = CommandInvocation {
            argv: vec![],
            cwd: std::env::temp_dir(),
        };

        let result = runner.run(&invocation).await;
        assert!(!result.success);
        assert_eq!(result.returncode, -1);
    }
}
