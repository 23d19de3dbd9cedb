// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI command implementations

pub mod build;
pub mod job;
pub mod logs;
pub mod serve;

use std::path::Path;

use jc_engine::JobControl;

use crate::exit_error::ExitError;

/// Open the job control for a config file.
pub fn load(config: &Path) -> Result<JobControl, ExitError> {
    tracing::debug!(path = %config.display(), "loading configuration");
    JobControl::from_config_file(config).map_err(|e| {
        ExitError::new(
            crate::exit_error::code_for(e.kind()),
            format!("{}: {e}", config.display()),
        )
    })
}
