// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Server startup and initialization logic.

use std::io::Write;
use std::time::Instant;

use fs2::FileExt;
use jc_engine::{DotRenderer, JobControl};
use tokio::net::TcpListener;
use tracing::info;

use super::{Config, DaemonState, LifecycleError, StartupResult};
use crate::http::AppState;

/// Start the server: take the lock, load the configuration, bind.
pub async fn startup(config: &Config) -> Result<StartupResult, LifecycleError> {
    std::fs::create_dir_all(&config.state_dir)?;

    // Use OpenOptions to avoid truncating the file before we hold the lock,
    // which would wipe the running server's PID.
    let lock_file = std::fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(false)
        .open(&config.lock_path)?;
    lock_file.try_lock_exclusive().map_err(LifecycleError::LockFailed)?;

    let mut lock_file = lock_file;
    lock_file.set_len(0)?;
    writeln!(lock_file, "{}", std::process::id())?;
    let lock_file = lock_file;

    let control = JobControl::from_config_file(&config.config_path)?;
    info!(
        config = %config.config_path.display(),
        jobs = control.config().jobs().count(),
        storage = %control.config().storage,
        "loaded configuration"
    );

    let addr = config.bind.clone().unwrap_or_else(|| control.config().webapp.bind_addr());
    let listener =
        TcpListener::bind(&addr).await.map_err(|e| LifecycleError::BindFailed(addr.clone(), e))?;
    let addr = listener.local_addr()?;

    let app = AppState::new(control, DotRenderer::new(&config.dot_binary));
    let daemon = DaemonState { config: config.clone(), lock_file, app, addr, start_time: Instant::now() };
    Ok(StartupResult { daemon, listener })
}
