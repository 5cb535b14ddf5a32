//! Synchronous subprocess primitives.
//!
//! Every external tool the pipeline touches (go, windres, signtool, codesign,
//! file, the freshly built butler itself) goes through these two functions.
//! The orchestrator blocks until the subprocess exits; a non-zero exit status
//! is always surfaced to the caller, never swallowed.

use std::ffi::OsStr;
use std::process::{Command, Stdio};

use tracing::{debug, info};

use crate::context::BuildContext;
use crate::error::{BuildError, Result};

/// Run a command, streaming its output to ours
///
/// The subprocess inherits nothing from the orchestrator's real environment:
/// it sees exactly the context's table, so PATH prepension and cross
/// compilation variables take effect and tests stay hermetic.
pub fn run(ctx: &BuildContext, program: impl AsRef<OsStr>, args: &[&str]) -> Result<()> {
    let rendered = render(program.as_ref(), args);
    info!(cmd = %rendered, "running");

    let status = Command::new(program.as_ref())
        .args(args)
        .current_dir(&ctx.cwd)
        .env_clear()
        .envs(ctx.envs())
        .status()
        .map_err(|source| BuildError::Spawn {
            command: rendered.clone(),
            source,
        })?;

    if !status.success() {
        return Err(BuildError::Toolchain {
            command: rendered,
            status,
        });
    }

    Ok(())
}

/// Run a command and capture its trimmed stdout
pub fn run_captured(ctx: &BuildContext, program: impl AsRef<OsStr>, args: &[&str]) -> Result<String> {
    let rendered = render(program.as_ref(), args);
    info!(cmd = %rendered, "running (captured)");

    let output = Command::new(program.as_ref())
        .args(args)
        .current_dir(&ctx.cwd)
        .env_clear()
        .envs(ctx.envs())
        .stdin(Stdio::null())
        .output()
        .map_err(|source| BuildError::Spawn {
            command: rendered.clone(),
            source,
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        if !stderr.is_empty() {
            debug!(stderr = %stderr, "command stderr");
        }
        return Err(BuildError::Toolchain {
            command: rendered,
            status: output.status,
        });
    }

    let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
    debug!(stdout = %stdout, "captured output");
    Ok(stdout)
}

/// Render a command line for logs and error messages
fn render(program: &OsStr, args: &[&str]) -> String {
    let mut out = program.to_string_lossy().into_owned();
    for arg in args {
        out.push(' ');
        if arg.contains(' ') {
            out.push('"');
            out.push_str(arg);
            out.push('"');
        } else {
            out.push_str(arg);
        }
    }
    out
}
