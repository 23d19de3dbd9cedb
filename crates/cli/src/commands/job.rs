// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `jc job` - Job inspection commands

use std::io::Write;

use anyhow::Result;
use clap::{Args, Subcommand};
use jc_core::SystemClock;
use jc_daemon::http::views;
use jc_engine::{EngineError, JobControl, JobInfo};
use jc_wire::format::jobs_list;
use jc_wire::{JobDetail, JobSummary};
use serde_json::json;

use crate::color;
use crate::exit_error::ExitError;
use crate::output::{field, format_or_json, handle_list, OutputFormat};
use crate::table::{Column, Table};

#[derive(Args)]
pub struct JobArgs {
    #[command(subcommand)]
    pub command: JobCommand,
}

#[derive(Subcommand)]
pub enum JobCommand {
    /// List configured jobs
    List,
    /// Show details of a job
    Show {
        /// Job ID
        id: String,
    },
    /// List the jobs a job depends on
    Deps {
        /// Job ID
        id: String,
    },
    /// List the jobs depending on a job
    Revdeps {
        /// Job ID
        id: String,
    },
    /// Print a job's configuration as YAML
    Conf {
        /// Job ID
        id: String,
    },
    /// Print a job's status
    Status {
        /// Job ID
        id: String,
    },
    /// Print a dependency graph in Graphviz DOT format
    Depgraph {
        /// Job ID; the whole configuration when omitted
        id: Option<String>,

        /// Also include the jobs depending on it
        #[arg(long)]
        complete: bool,
    },
}

fn summaries(jobs: &[JobInfo<'_, SystemClock>]) -> Result<Vec<JobSummary>, EngineError> {
    jobs.iter().map(views::job_summary).collect()
}

pub fn print_summaries(jobs: &[JobSummary], out: &mut dyn Write) {
    let mut table = Table::new(vec![
        Column::muted("ID"),
        Column::left("TITLE"),
        Column::left("DEPENDS ON"),
        Column::status("STATUS"),
    ]);
    for job in jobs {
        table.row(vec![
            job.id.to_string(),
            job.title.clone(),
            jobs_list(&job.dependencies),
            job.status.to_string(),
        ]);
    }
    table.render(out);
}

fn print_detail(job: &JobDetail, out: &mut dyn Write) {
    let _ = writeln!(out, "{}", color::header(&format!("Job {}", job.id)));
    field(out, "title:", &job.title);
    field(out, "function:", job.function.as_deref().unwrap_or("-"));
    field(out, "depends on:", jobs_list(&job.dependencies));
    field(out, "needed by:", jobs_list(&job.revdeps));
    field(out, "status:", color::status(&job.status.to_string()));
    let outdated = match job.outdated {
        Some(true) => "yes",
        Some(false) => "no",
        None => "unknown",
    };
    field(out, "outdated:", outdated);
    field(out, "buildable:", if job.can_be_built { "yes" } else { "no" });
    let latest = job.latest_successful_build.map(|id| id.to_string());
    field(out, "last good:", latest.as_deref().unwrap_or("-"));
    if job.protected {
        field(out, "protected:", "yes");
    }
    if let Some(notes) = &job.notes {
        let _ = writeln!(out, "\n{notes}");
    }
    if job.docs.is_sentinel() {
        let _ = writeln!(out, "\n{}", color::muted(&job.docs.function_doc));
    } else {
        let docs = &job.docs;
        let _ = writeln!(
            out,
            "\n{}::{}{}",
            docs.function_module, docs.function_name, docs.function_argspec
        );
        if !docs.function_doc.is_empty() {
            let _ = writeln!(out, "{}", color::context(&docs.function_doc));
        }
        let _ = writeln!(out, "\n{}", docs.call_code);
    }
}

pub fn handle(command: JobCommand, control: &JobControl, format: OutputFormat) -> Result<()> {
    match command {
        JobCommand::List => {
            let jobs: Vec<JobInfo<'_, SystemClock>> = control.iter_jobs().collect();
            let summaries = summaries(&jobs).map_err(ExitError::from)?;
            handle_list(format, &summaries, "No jobs configured", print_summaries)?;
        }
        JobCommand::Show { id } => {
            let job = control.get_job(&id).map_err(ExitError::from)?;
            let detail = views::job_detail(&job).map_err(ExitError::from)?;
            format_or_json(format, &detail, || print_detail(&detail, &mut std::io::stdout()))?;
        }
        JobCommand::Deps { id } => {
            let job = control.get_job(&id).map_err(ExitError::from)?;
            let deps = summaries(&job.get_deps()).map_err(ExitError::from)?;
            handle_list(format, &deps, &format!("{id} has no dependencies"), print_summaries)?;
        }
        JobCommand::Revdeps { id } => {
            let job = control.get_job(&id).map_err(ExitError::from)?;
            let revdeps = summaries(&job.get_revdeps()).map_err(ExitError::from)?;
            handle_list(format, &revdeps, &format!("No job depends on {id}"), print_summaries)?;
        }
        JobCommand::Conf { id } => {
            let job = control.get_job(&id).map_err(ExitError::from)?;
            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(job.config())?),
                OutputFormat::Text => {
                    print!("{}", job.get_conf_as_yaml().map_err(ExitError::from)?)
                }
            }
        }
        JobCommand::Status { id } => {
            let job = control.get_job(&id).map_err(ExitError::from)?;
            let status = job.get_status().map_err(ExitError::from)?;
            let data = json!({ "id": job.id(), "status": status });
            format_or_json(format, &data, || println!("{}", color::status(&status.to_string())))?;
        }
        JobCommand::Depgraph { id, complete } => {
            let graph = match &id {
                Some(id) => control.job_depgraph(id, complete).map_err(ExitError::from)?,
                None => control.full_depgraph(),
            };
            let dot = control.depgraph_dot(&graph, id.as_deref()).map_err(ExitError::from)?;
            let data = json!({ "format": "dot", "graph": dot });
            format_or_json(format, &data, || print!("{dot}"))?;
        }
    }
    Ok(())
}
