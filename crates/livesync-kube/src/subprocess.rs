//! Subprocess execution for kubectl and docker
//!
//! Wraps external tool invocations and captures their output.

use std::process::Command;

use crate::error::{KubeError, Result};

/// Render a program and its arguments as one shell-like line.
pub fn render(program: &str, args: &[String]) -> String {
    std::iter::once(program)
        .chain(args.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Run `program` with `args` and return its stdout.
///
/// A non-zero exit status becomes [`KubeError::CommandFailed`] carrying the
/// captured stderr.
pub fn run(program: &str, args: &[String]) -> Result<String> {
    let command = render(program, args);
    tracing::debug!(%command, "Running command");

    let output = Command::new(program)
        .args(args)
        .output()
        .map_err(|source| KubeError::Spawn {
            program: program.to_string(),
            source,
        })?;

    if output.status.success() {
        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    } else {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        let code = output.status.code().unwrap_or(-1);
        Err(KubeError::CommandFailed {
            command,
            code,
            stderr,
        })
    }
}
