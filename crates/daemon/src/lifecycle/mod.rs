// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Server lifecycle management: startup, serving, shutdown.

mod startup;
pub use startup::startup;

use std::fs::File;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Instant;

use jc_engine::EngineError;
use thiserror::Error;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::env;
use crate::http::{router, AppState};

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// jobcontrol configuration file
    pub config_path: PathBuf,
    /// Listen address; the config file's `webapp` section when unset
    pub bind: Option<String>,
    /// Root state directory (e.g. ~/.local/state/jobcontrol)
    pub state_dir: PathBuf,
    /// Path to lock/PID file
    pub lock_path: PathBuf,
    /// Graphviz binary
    pub dot_binary: PathBuf,
}

impl Config {
    /// Configuration from the environment.
    pub fn load() -> Result<Self, LifecycleError> {
        Ok(Self::new(env::config_path(), env::state_dir()?))
    }

    pub fn new(config_path: PathBuf, state_dir: PathBuf) -> Self {
        Self {
            config_path,
            bind: env::bind_addr(),
            lock_path: state_dir.join("jcd.pid"),
            state_dir,
            dot_binary: env::dot_binary(),
        }
    }
}

/// Server state during operation.
pub struct DaemonState {
    pub config: Config,
    // NOTE(lifetime): Held to maintain exclusive file lock; released on drop
    #[allow(dead_code)]
    lock_file: File,
    pub app: AppState,
    /// Address actually bound
    pub addr: SocketAddr,
    pub start_time: Instant,
}

impl DaemonState {
    /// Remove the lock file; the lock itself is released when `self` drops.
    pub fn shutdown(self) {
        if let Err(e) = std::fs::remove_file(&self.config.lock_path) {
            warn!(path = %self.config.lock_path.display(), error = %e, "failed to remove lock file");
        }
        info!(uptime_secs = self.start_time.elapsed().as_secs(), "server stopped");
    }
}

/// Result of startup: the server state and its bound listener.
pub struct StartupResult {
    pub daemon: DaemonState,
    pub listener: TcpListener,
}

/// Serve until ctrl-c, then shut down.
pub async fn serve(result: StartupResult) -> Result<(), LifecycleError> {
    let StartupResult { daemon, listener } = result;
    info!(addr = %daemon.addr, "listening");
    axum::serve(listener, router(daemon.app.clone()))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    daemon.shutdown();
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}

/// Server lifecycle errors
#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("Could not determine state directory")]
    NoStateDir,

    #[error("Failed to acquire lock: server already running?")]
    LockFailed(#[source] std::io::Error),

    #[error("Failed to bind {0}: {1}")]
    BindFailed(String, std::io::Error),

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
