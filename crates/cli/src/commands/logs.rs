// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `jc logs` - Build log maintenance

use std::time::Duration;

use anyhow::Result;
use clap::{Args, Subcommand};
use jc_core::{LogLevel, RetentionPolicy, RetentionRule};
use jc_engine::JobControl;
use serde_json::json;

use crate::exit_error::ExitError;
use crate::output::{format_or_json, OutputFormat};

const DAY_SECS: u64 = 24 * 60 * 60;

#[derive(Args)]
pub struct LogsArgs {
    #[command(subcommand)]
    pub command: LogsCommand,
}

#[derive(Subcommand)]
pub enum LogsCommand {
    /// Delete old build log messages
    ///
    /// By default debug messages are kept 15 days, info a month, warnings
    /// three months, errors six months and anything else a year.
    Prune {
        /// Delete every message older than this many days instead
        #[arg(long, value_name = "DAYS")]
        older_than: Option<u32>,
    },
}

/// Retention policy for `logs prune`.
pub fn policy(older_than_days: Option<u32>) -> RetentionPolicy {
    match older_than_days {
        Some(days) => RetentionPolicy {
            rules: vec![RetentionRule {
                level: LogLevel::Critical,
                max_age: Duration::from_secs(u64::from(days) * DAY_SECS),
            }],
        },
        None => RetentionPolicy::default(),
    }
}

pub fn handle(command: LogsCommand, control: &JobControl, format: OutputFormat) -> Result<()> {
    match command {
        LogsCommand::Prune { older_than } => {
            let removed = control.prune_logs(&policy(older_than)).map_err(ExitError::from)?;
            let data = json!({ "removed": removed });
            format_or_json(format, &data, || println!("Removed {removed} log message(s)"))?;
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "logs_tests.rs"]
mod tests;
