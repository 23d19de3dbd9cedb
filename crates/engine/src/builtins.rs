// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Functions shipped under the `jobcontrol.builtins` module

use crate::context::BuildContext;
use crate::registry::{FunctionCall, FunctionRegistry, JobFailure, JobFunction};
use crate::subprocess::{run_with_timeout, SHELL_COMMAND_TIMEOUT};
use async_trait::async_trait;
use jc_core::{ArgValue, FunctionSignature};
use std::time::Duration;

pub const NOOP: &str = "jobcontrol.builtins:noop";
pub const FAIL: &str = "jobcontrol.builtins:fail";
pub const SKIP: &str = "jobcontrol.builtins:skip";
pub const SHELL: &str = "jobcontrol.builtins:shell";

pub(crate) fn register(registry: &mut FunctionRegistry) {
    registry.register(NOOP, Noop);
    registry.register(FAIL, Fail);
    registry.register(SKIP, Skip);
    registry.register(SHELL, Shell);
}

pub struct Noop;

#[async_trait]
impl JobFunction for Noop {
    fn signature(&self) -> FunctionSignature {
        FunctionSignature::new().with_varargs("args").with_kwargs("kwargs")
    }

    fn doc(&self) -> &str {
        "Do nothing; return the keyword arguments."
    }

    async fn call(&self, _ctx: &BuildContext, call: FunctionCall) -> Result<ArgValue, JobFailure> {
        Ok(ArgValue::Map(call.kwargs))
    }
}

pub struct Fail;

#[async_trait]
impl JobFunction for Fail {
    fn signature(&self) -> FunctionSignature {
        FunctionSignature::new().with_optional("message", "failed on purpose")
    }

    fn doc(&self) -> &str {
        "Always fail with the given message."
    }

    async fn call(&self, _ctx: &BuildContext, call: FunctionCall) -> Result<ArgValue, JobFailure> {
        let message = call.str_arg(0, "message").unwrap_or("failed on purpose");
        Err(JobFailure::failed(message))
    }
}

pub struct Skip;

#[async_trait]
impl JobFunction for Skip {
    fn signature(&self) -> FunctionSignature {
        FunctionSignature::new().with_optional("reason", ArgValue::Null)
    }

    fn doc(&self) -> &str {
        "Finish the build as skipped."
    }

    async fn call(&self, _ctx: &BuildContext, call: FunctionCall) -> Result<ArgValue, JobFailure> {
        Err(JobFailure::Skip(call.str_arg(0, "reason").map(str::to_string)))
    }
}

pub struct Shell;

#[async_trait]
impl JobFunction for Shell {
    fn signature(&self) -> FunctionSignature {
        FunctionSignature::new()
            .with_required("command")
            .with_optional("timeout", SHELL_COMMAND_TIMEOUT.as_secs() as i64)
    }

    fn doc(&self) -> &str {
        "Run a shell command and return its standard output.\n\n\
         A non-zero exit status fails the build; standard error is logged."
    }

    async fn call(&self, ctx: &BuildContext, call: FunctionCall) -> Result<ArgValue, JobFailure> {
        let command = call
            .str_arg(0, "command")
            .ok_or_else(|| JobFailure::failed("missing shell command"))?;
        let timeout = call
            .arg(1, "timeout")
            .and_then(ArgValue::as_i64)
            .and_then(|secs| u64::try_from(secs).ok())
            .map_or(SHELL_COMMAND_TIMEOUT, Duration::from_secs);

        ctx.info(format!("running: {command}"));
        let mut cmd = tokio::process::Command::new("sh");
        cmd.arg("-c").arg(format!("set -eu\n{command}"));
        let output = run_with_timeout(cmd, None, timeout, "shell command")
            .await
            .map_err(JobFailure::Failed)?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        if !stderr.is_empty() {
            ctx.warn(stderr.trim_end().to_string());
        }
        if !output.status.success() {
            let code = output.status.code().unwrap_or(-1);
            return Err(JobFailure::Failed(format!("command exited with status {code}")));
        }
        Ok(ArgValue::Str(stdout))
    }
}

#[cfg(test)]
#[path = "builtins_tests.rs"]
mod tests;
