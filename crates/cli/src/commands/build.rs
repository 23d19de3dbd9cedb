// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `jc build` - Build history, execution and removal

use std::io::Write;
use std::time::Duration;

use anyhow::Result;
use clap::{Args, Subcommand, ValueEnum};
use jc_core::{BuildFilter, BuildId, BuildStatus, LogLevel, Order, SystemClock};
use jc_engine::{BuildInfo, JobControl};
use jc_wire::format::{format_duration, humanize_timestamp, progress_bar};
use jc_wire::{BuildDetail, BuildRow, LogEntry, DEFAULT_BUILD_LIMIT};
use serde_json::json;

use crate::color;
use crate::exit_error::{codes, ExitError};
use crate::output::{field, format_or_json, handle_list, now_ms, OutputFormat};
use crate::table::{Column, Table};

#[derive(Args)]
pub struct BuildArgs {
    #[command(subcommand)]
    pub command: BuildCommand,
}

#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl From<SortOrder> for Order {
    fn from(order: SortOrder) -> Self {
        match order {
            SortOrder::Asc => Order::Asc,
            SortOrder::Desc => Order::Desc,
        }
    }
}

/// Build listing filters; each flag takes `true` or `false`
#[derive(Args, Debug, Default)]
pub struct FilterArgs {
    #[arg(long)]
    pub started: Option<bool>,
    #[arg(long)]
    pub finished: Option<bool>,
    #[arg(long)]
    pub success: Option<bool>,
    #[arg(long)]
    pub skipped: Option<bool>,
}

impl From<&FilterArgs> for BuildFilter {
    fn from(args: &FilterArgs) -> Self {
        BuildFilter {
            started: args.started,
            finished: args.finished,
            success: args.success,
            skipped: args.skipped,
            ..BuildFilter::default()
        }
    }
}

#[derive(Subcommand)]
pub enum BuildCommand {
    /// List the builds of a job
    List {
        /// Job ID
        job: String,

        #[command(flatten)]
        filter: FilterArgs,

        /// Sort by build id
        #[arg(long, value_enum, default_value_t = SortOrder::Desc)]
        order: SortOrder,

        /// Maximum number of builds to show
        #[arg(short = 'n', long, default_value_t = DEFAULT_BUILD_LIMIT)]
        limit: usize,
    },
    /// Show details of a build
    Show {
        /// Build ID (e.g. 12 or #12)
        id: BuildId,
    },
    /// Create a build of a job and run it to completion
    Run {
        /// Job ID
        job: String,
    },
    /// Delete a build, running the job's cleanup function first
    Delete {
        /// Build ID (e.g. 12 or #12)
        id: BuildId,

        /// Skip the cleanup function
        #[arg(long)]
        no_cleanup: bool,
    },
    /// Show the log messages of a build
    Logs {
        /// Build ID (e.g. 12 or #12)
        id: BuildId,

        /// Minimum level (debug, info, warning, error, critical)
        #[arg(long)]
        level: Option<LogLevel>,
    },
}

fn print_rows(rows: &[BuildRow], out: &mut dyn Write) {
    let mut table = Table::new(vec![
        Column::muted("ID"),
        Column::left("STARTED"),
        Column::left("DURATION"),
        Column::status("STATUS"),
    ]);
    for row in rows {
        table.row(vec![
            row.id.to_string(),
            row.started.clone().unwrap_or_else(|| "-".to_string()),
            row.duration.clone().unwrap_or_else(|| "-".to_string()),
            row.status.clone(),
        ]);
    }
    table.render(out);
}

fn print_detail(build: &BuildDetail, out: &mut dyn Write) {
    let now = Some(now_ms());
    let _ = writeln!(out, "{}", color::header(&format!("Build #{} of {}", build.id, build.job_id)));
    field(out, "status:", color::status(&build.descriptive_status));
    field(out, "created:", humanize_timestamp(build.created_at_ms, now));
    if let Some(start) = build.start_time_ms {
        field(out, "started:", humanize_timestamp(start, now));
    }
    if let Some(end) = build.end_time_ms {
        field(out, "ended:", humanize_timestamp(end, now));
    }
    if let Some(ms) = build.duration_ms {
        field(out, "duration:", format_duration(Duration::from_millis(ms)));
    }
    field(out, "progress:", progress_bar(&build.progress.info(), 20));
    for (job, dep) in &build.dependency_builds {
        field(out, "uses:", format!("#{dep} ({job})"));
    }
    if let Some(repr) = &build.retval_repr {
        let _ = writeln!(out, "\n{repr}");
    }
    if let Some(exception) = &build.exception {
        let _ = writeln!(out, "\n{}", color::status("failed"));
        let _ = writeln!(out, "{exception}");
    }
}

async fn detail(info: &BuildInfo<'_, SystemClock>) -> BuildDetail {
    BuildDetail::new(info.build(), info.retval_repr().await)
}

fn print_logs(entries: &[LogEntry], out: &mut dyn Write) {
    for entry in entries {
        let level = format!("{:<8}", entry.level.to_string());
        let _ = writeln!(out, "{} {} {}", color::muted(&entry.created), level, entry.message);
    }
}

pub async fn handle(
    command: BuildCommand,
    control: &JobControl,
    format: OutputFormat,
) -> Result<()> {
    match command {
        BuildCommand::List { job, filter, order, limit } => {
            let info = control.get_job(&job).map_err(ExitError::from)?;
            let builds = info
                .iter_builds(&BuildFilter::from(&filter), order.into(), Some(limit))
                .map_err(ExitError::from)?;
            let now = now_ms();
            let rows: Vec<BuildRow> = builds.iter().map(|b| BuildRow::new(b.build(), now)).collect();
            handle_list(format, &rows, &format!("No builds of {job}"), print_rows)?;
        }
        BuildCommand::Show { id } => {
            let info = control.get_build(id).map_err(ExitError::from)?;
            let detail = detail(&info).await;
            format_or_json(format, &detail, || print_detail(&detail, &mut std::io::stdout()))?;
        }
        BuildCommand::Run { job } => {
            let info = control.build_job(&job).await.map_err(ExitError::from)?;
            let detail = detail(&info).await;
            format_or_json(format, &detail, || print_detail(&detail, &mut std::io::stdout()))?;
            if info.status() == BuildStatus::Failed {
                return Err(ExitError::new(
                    codes::FAILURE,
                    format!("build #{} of {job} failed", info.id()),
                )
                .into());
            }
        }
        BuildCommand::Delete { id, no_cleanup } => {
            control.delete_build(id, !no_cleanup).await.map_err(ExitError::from)?;
            let data = json!({ "deleted": id });
            format_or_json(format, &data, || println!("Deleted build #{id}"))?;
        }
        BuildCommand::Logs { id, level } => {
            let info = control.get_build(id).map_err(ExitError::from)?;
            let entries: Vec<LogEntry> = info
                .iter_log_messages(level)
                .map_err(ExitError::from)?
                .into_iter()
                .map(LogEntry::from)
                .collect();
            handle_list(format, &entries, &format!("No log messages for build #{id}"), print_logs)?;
        }
    }
    Ok(())
}
