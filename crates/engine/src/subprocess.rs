// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Child processes with a deadline

use std::process::Output;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// Default limit for `jobcontrol.builtins:shell` commands
pub const SHELL_COMMAND_TIMEOUT: Duration = Duration::from_secs(60 * 60);

/// Limit for rendering a dependency graph
pub const RENDER_TIMEOUT: Duration = Duration::from_secs(30);

/// Run `cmd` to completion, feeding it `stdin`, killing it after `timeout`.
pub async fn run_with_timeout(
    mut cmd: Command,
    stdin: Option<&[u8]>,
    timeout: Duration,
    label: &str,
) -> Result<Output, String> {
    cmd.kill_on_drop(true)
        .stdin(if stdin.is_some() { std::process::Stdio::piped() } else { std::process::Stdio::null() })
        .stdout(std::process::Stdio::piped())
        .stderr(std::process::Stdio::piped());

    let mut child = cmd.spawn().map_err(|e| format!("{label}: failed to spawn: {e}"))?;
    if let (Some(input), Some(mut pipe)) = (stdin, child.stdin.take()) {
        // Written from a separate task so a chatty child cannot fill stdout while we block on stdin
        let input = input.to_vec();
        let label = label.to_string();
        tokio::spawn(async move {
            if let Err(e) = pipe.write_all(&input).await {
                tracing::warn!(error = %e, label = %label, "failed to write child stdin");
            }
        });
    }

    match tokio::time::timeout(timeout, child.wait_with_output()).await {
        Ok(Ok(output)) => Ok(output),
        Ok(Err(e)) => Err(format!("{label}: {e}")),
        Err(_) => Err(format!("{label}: timed out after {}s", timeout.as_secs())),
    }
}

#[cfg(test)]
#[path = "subprocess_tests.rs"]
mod tests;
