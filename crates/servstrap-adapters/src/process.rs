//! Shared plumbing for shelling out to external tools.
//!
//! Every adapter that spawns a process goes through this module so the
//! command line is logged once, blocking semantics are uniform (wait for
//! exit, no timeout), and failures carry the tool name plus a stderr tail.

use std::ffi::OsStr;
use std::process::Command;

use servstrap_core::{application::ApplicationError, error::ServstrapResult};
use tracing::debug;

/// What a finished invocation produced.
pub(crate) struct Captured {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

/// Run `program args...`, capturing output. Spawn failures (program not on
/// the path, permission refused) surface as `ToolCommandFailed`.
pub(crate) fn capture<I, S>(tool: &str, program: &str, args: I) -> ServstrapResult<Captured>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let mut cmd = Command::new(program);
    cmd.args(args);
    debug!(tool, command = ?cmd, "Invoking external tool");

    let output = cmd.output().map_err(|e| ApplicationError::ToolCommandFailed {
        tool: tool.to_string(),
        detail: format!("failed to launch '{program}': {e}"),
    })?;

    Ok(Captured {
        success: output.status.success(),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    })
}

/// Run `program args...` and require a zero exit status.
pub(crate) fn run_checked<I, S>(tool: &str, program: &str, args: I) -> ServstrapResult<()>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let captured = capture(tool, program, args)?;
    if captured.success {
        return Ok(());
    }
    Err(ApplicationError::ToolCommandFailed {
        tool: tool.to_string(),
        detail: failure_detail(&captured),
    }
    .into())
}

/// Whether `program` can be launched at all. Exit status is irrelevant —
/// resolving and spawning is the availability test.
pub(crate) fn launchable<I, S>(program: &str, args: I) -> bool
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    Command::new(program).args(args).output().is_ok()
}

/// Prefer stderr, fall back to stdout, keep it to one line of context.
fn failure_detail(captured: &Captured) -> String {
    let text = if captured.stderr.trim().is_empty() {
        captured.stdout.trim()
    } else {
        captured.stderr.trim()
    };
    match text.lines().last() {
        Some(line) if !line.is_empty() => format!("exited unsuccessfully: {line}"),
        _ => "exited unsuccessfully".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn launch_failure_is_tool_command_failed() {
        let err = capture("ghost", "servstrap-definitely-not-a-real-binary", ["--x"]);
        assert!(err.is_err());
    }

    #[test]
    fn unlaunchable_program_reports_false() {
        assert!(!launchable("servstrap-definitely-not-a-real-binary", ["--x"]));
    }

    #[test]
    fn failure_detail_prefers_stderr() {
        let captured = Captured {
            success: false,
            stdout: "ignored".into(),
            stderr: "boom\nlast line".into(),
        };
        assert_eq!(failure_detail(&captured), "exited unsuccessfully: last line");
    }

    #[test]
    fn failure_detail_falls_back_to_stdout() {
        let captured = Captured {
            success: false,
            stdout: "only stdout".into(),
            stderr: "   ".into(),
        };
        assert_eq!(
            failure_detail(&captured),
            "exited unsuccessfully: only stdout"
        );
    }
}
