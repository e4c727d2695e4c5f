//! Response formatting
//!
//! Renders an [`ExecutionResult`] into the single text block returned to
//! the calling assistant.

use crate::executor::ExecutionResult;

/// Notice substituted when a command produced no output on either stream
pub const NO_OUTPUT_NOTICE: &str = "Command completed with no output.";

/// Format an execution result as a user-facing text block.
///
/// An `Output:` section appears iff stdout is non-empty and an `Errors:`
/// section iff stderr is non-empty, in that order; when both are empty a
/// fixed notice stands in. The block is prefixed with `[Success]` or
/// `[Failed]` according to the success flag.
pub fn format_response(result: &ExecutionResult) -> String {
    let mut parts = Vec::new();
    if !result.stdout.is_empty() {
        parts.push(format!("Output:\n{}", result.stdout));
    }
    if !result.stderr.is_empty() {
        parts.push(format!("Errors:\n{}", result.stderr));
    }
    if parts.is_empty() {
        parts.push(NO_OUTPUT_NOTICE.to_string());
    }

    let status = if result.success { "Success" } else { "Failed" };
    format!("[{}]\n{}", status, parts.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(success: bool, stdout: &str, stderr: &str) -> ExecutionResult {
        ExecutionResult {
            success,
            stdout: stdout.to_string(),
            stderr: stderr.to_string(),
            returncode: if success { 0 } else { 1 },
        }
    }

    #[test]
    fn test_success_with_stdout_only() {
        let text = format_response(&result(true, "X", ""));
        assert!(text.starts_with("[Success]"));
        assert!(text.contains("Output:\nX"));
        assert!(!text.contains("Errors:"));
    }

    #[test]
    fn test_failure_with_stderr_only() {
        let text = format_response(&result(false, "", "E"));
        assert!(text.starts_with("[Failed]"));
        assert!(text.contains("Errors:\nE"));
        assert!(!text.contains("Output:"));
    }

    #[test]
    fn test_both_streams_output_before_errors() {
        let text = format_response(&result(false, "partial", "broke"));
        let output_at = text.find("Output:").unwrap();
        let errors_at = text.find("Errors:").unwrap();
        assert!(output_at < errors_at);
    }

    #[test]
    fn test_no_output_notice() {
        let text = format_response(&result(true, "", ""));
        assert_eq!(text, format!("[Success]\n{}", NO_OUTPUT_NOTICE));
    }

    #[test]
    fn test_failed_no_output_notice() {
        let text = format_response(&result(false, "", ""));
        assert_eq!(text, format!("[Failed]\n{}", NO_OUTPUT_NOTICE));
    }
}
