// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! What a running function can see and do

use jc_core::{BuildId, JobId, LogLevel, LogRecord, ProgressEntry};
use jc_storage::Storage;
use std::fmt;
use std::sync::Arc;

type EpochFn = Arc<dyn Fn() -> u64 + Send + Sync>;

/// Handle passed to every function call, bound to one build.
///
/// Progress reports and log records go to the build's storage record;
/// log records are mirrored to `tracing`. Failures to store either are
/// logged and otherwise ignored, so reporting never fails a build.
#[derive(Clone)]
pub struct BuildContext {
    build_id: BuildId,
    job_id: JobId,
    storage: Arc<dyn Storage>,
    epoch_ms: EpochFn,
}

impl BuildContext {
    pub fn new(
        build_id: BuildId,
        job_id: JobId,
        storage: Arc<dyn Storage>,
        epoch_ms: impl Fn() -> u64 + Send + Sync + 'static,
    ) -> Self {
        Self { build_id, job_id, storage, epoch_ms: Arc::new(epoch_ms) }
    }

    pub fn build_id(&self) -> BuildId {
        self.build_id
    }

    pub fn job_id(&self) -> &JobId {
        &self.job_id
    }

    /// Report progress for a group path (`&[]` for the whole build).
    pub fn report_progress(
        &self,
        group: &[&str],
        current: u64,
        total: Option<u64>,
        status_line: Option<&str>,
    ) {
        let mut entry = ProgressEntry::new(group.iter().map(|s| s.to_string()).collect(), current, total);
        if let Some(line) = status_line {
            entry = entry.with_status_line(line);
        }
        if let Err(e) = self.storage.report_build_progress(self.build_id, entry) {
            tracing::warn!(build_id = %self.build_id, error = %e, "dropped progress report");
        }
    }

    pub fn log(&self, level: LogLevel, message: impl Into<String>) {
        let message = message.into();
        let (build_id, job_id) = (self.build_id, &self.job_id);
        match level {
            LogLevel::Debug => tracing::debug!(%build_id, %job_id, "{message}"),
            LogLevel::Info => tracing::info!(%build_id, %job_id, "{message}"),
            LogLevel::Warning => tracing::warn!(%build_id, %job_id, "{message}"),
            LogLevel::Error | LogLevel::Critical => tracing::error!(%build_id, %job_id, "{message}"),
        }
        let record = LogRecord {
            build_id,
            created_ms: (self.epoch_ms)(),
            level,
            target: job_id.to_string(),
            message,
        };
        if let Err(e) = self.storage.log_message(record) {
            tracing::warn!(%build_id, error = %e, "dropped log record");
        }
    }

    pub fn info(&self, message: impl Into<String>) {
        self.log(LogLevel::Info, message);
    }

    pub fn warn(&self, message: impl Into<String>) {
        self.log(LogLevel::Warning, message);
    }
}

impl fmt::Debug for BuildContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BuildContext")
            .field("build_id", &self.build_id)
            .field("job_id", &self.job_id)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;
