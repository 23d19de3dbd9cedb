// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! jc: command-line interface to jobcontrol

mod color;
mod commands;
mod exit_error;
mod output;
mod table;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use jc_daemon::env::DEFAULT_CONFIG_FILE;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use commands::build::BuildArgs;
use commands::job::JobArgs;
use commands::logs::LogsArgs;
use commands::serve::ServeArgs;
use exit_error::ExitError;
use output::OutputFormat;

#[derive(Parser)]
#[command(
    name = "jc",
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("BUILD_GIT_HASH"), ")"),
    about = "Inspect, build and serve jobcontrol jobs",
    styles = color::styles(),
)]
struct Cli {
    /// Configuration file
    #[arg(short, long, global = true, env = "JC_CONFIG", default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Output format
    #[arg(short = 'o', long = "output", global = true, value_enum, default_value_t = OutputFormat::Text)]
    output: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect configured jobs
    Job(JobArgs),
    /// Inspect, run and delete builds
    Build(BuildArgs),
    /// Build log maintenance
    Logs(LogsArgs),
    /// Run the HTTP server
    Serve(ServeArgs),
}

/// The server logs at `info` (plus the rolling file when configured);
/// every other command only reports warnings on stderr.
fn init_logging(command: &Commands) -> Option<WorkerGuard> {
    if matches!(command, Commands::Serve(_)) {
        return jc_daemon::logging::init(
            &jc_daemon::env::log_filter(),
            jc_daemon::env::log_dir().as_deref(),
        );
    }
    let filter = EnvFilter::try_from_env("JC_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).try_init();
    None
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let format = cli.output;
    match cli.command {
        Commands::Job(args) => {
            let control = commands::load(&cli.config)?;
            commands::job::handle(args.command, &control, format)
        }
        Commands::Build(args) => {
            let control = commands::load(&cli.config)?;
            commands::build::handle(args.command, &control, format).await
        }
        Commands::Logs(args) => {
            let control = commands::load(&cli.config)?;
            commands::logs::handle(args.command, &control, format)
        }
        Commands::Serve(args) => commands::serve::handle(args, &cli.config).await,
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let guard = init_logging(&cli.command);

    let code = match run(cli).await {
        Ok(()) => 0,
        Err(e) => {
            let code = e.downcast_ref::<ExitError>().map_or(exit_error::codes::FAILURE, |e| e.code);
            eprintln!("error: {e:#}");
            code
        }
    };
    drop(guard);
    std::process::exit(code);
}
