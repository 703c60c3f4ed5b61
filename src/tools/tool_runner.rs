use crate::error::ToolError;
use crate::tools::platform::Platform;
use log::debug;
use std::process::{Command, Output, Stdio};

/// Run a tool to completion, capturing its output. A non-zero exit becomes
/// [`ToolError::Failed`] carrying stderr (or stdout when stderr is empty).
pub fn run_tool(tool: &str, mut cmd: Command, platform: &dyn Platform) -> Result<Output, ToolError> {
    platform.prepare_command(&mut cmd);
    cmd.stdin(Stdio::null());
    debug!("Running {tool}: {cmd:?}");

    let output = cmd.output().map_err(|source| ToolError::Spawn {
        tool: tool.to_string(),
        source,
    })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        let message = if stderr.is_empty() {
            String::from_utf8_lossy(&output.stdout).trim().to_string()
        } else {
            stderr
        };
        return Err(ToolError::Failed {
            tool: tool.to_string(),
            status: output.status,
            message,
        });
    }

    Ok(output)
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::tools::platform::UnixPlatform;

    #[test]
    fn test_success_returns_output() {
        let mut cmd = Command::new("sh");
        cmd.args(["-c", "echo hello"]);
        let output = run_tool("sh", cmd, &UnixPlatform).unwrap();
        assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "hello");
    }

    #[test]
    fn test_failure_prefers_stderr() {
        let mut cmd = Command::new("sh");
        cmd.args(["-c", "echo out; echo broken >&2; exit 3"]);
        match run_tool("sh", cmd, &UnixPlatform) {
            Err(ToolError::Failed { message, status, .. }) => {
                assert_eq!(message, "broken");
                assert_eq!(status.code(), Some(3));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_failure_falls_back_to_stdout() {
        let mut cmd = Command::new("sh");
        cmd.args(["-c", "echo only-stdout; exit 1"]);
        match run_tool("sh", cmd, &UnixPlatform) {
            Err(ToolError::Failed { message, .. }) => assert_eq!(message, "only-stdout"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_missing_program_is_spawn_error() {
        let cmd = Command::new("/nonexistent/niclean-tool");
        assert!(matches!(
            run_tool("niclean-tool", cmd, &UnixPlatform),
            Err(ToolError::Spawn { .. })
        ));
    }
}
