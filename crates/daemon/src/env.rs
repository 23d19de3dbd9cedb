// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the daemon crate.

use std::path::PathBuf;

use crate::lifecycle::LifecycleError;

/// Server version (from Cargo.toml)
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Config file used when neither `--config` nor `JC_CONFIG` is given
pub const DEFAULT_CONFIG_FILE: &str = "jobcontrol.yml";

/// Resolve the config file: JC_CONFIG > ./jobcontrol.yml
pub fn config_path() -> PathBuf {
    std::env::var("JC_CONFIG")
        .ok()
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
}

/// Listen address overriding the config file's `webapp` section
pub fn bind_addr() -> Option<String> {
    std::env::var("JC_BIND").ok().filter(|s| !s.is_empty())
}

/// Log filter directives: JC_LOG > RUST_LOG > `info`
pub fn log_filter() -> String {
    std::env::var("JC_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .ok()
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "info".to_string())
}

/// Directory for daily-rotated log files; file logging is off when unset
pub fn log_dir() -> Option<PathBuf> {
    std::env::var("JC_LOG_DIR").ok().filter(|s| !s.is_empty()).map(PathBuf::from)
}

/// Graphviz binary used to render dependency graphs
pub fn dot_binary() -> PathBuf {
    std::env::var("JC_DOT_BIN")
        .ok()
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("dot"))
}

/// Resolve state directory: JC_STATE_DIR > XDG_STATE_HOME/jobcontrol > ~/.local/state/jobcontrol
pub fn state_dir() -> Result<PathBuf, LifecycleError> {
    if let Ok(dir) = std::env::var("JC_STATE_DIR") {
        return Ok(PathBuf::from(dir));
    }
    if let Ok(xdg) = std::env::var("XDG_STATE_HOME") {
        return Ok(PathBuf::from(xdg).join("jobcontrol"));
    }
    let home = std::env::var("HOME").map_err(|_| LifecycleError::NoStateDir)?;
    Ok(PathBuf::from(home).join(".local/state/jobcontrol"))
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
