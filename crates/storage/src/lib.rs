// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! jc-storage: Build and log record storage for jobcontrol

mod error;
mod file;
mod memory;
pub mod snapshot;
mod state;
mod url;

pub use error::StorageError;
pub use file::FileStorage;
pub use memory::MemoryStorage;
pub use snapshot::{Snapshot, SnapshotError, CURRENT_SNAPSHOT_VERSION};
pub use state::StorageState;
pub use url::open_storage;

use jc_core::{
    Build, BuildFilter, BuildId, BuildOutcome, LogLevel, LogRecord, NewBuild, Order, ProgressEntry,
    ProgressInfo, ProgressReport, RetentionRule,
};

/// Persistence of builds, their progress and their log records.
///
/// Implementations are shared between the HTTP handlers and the build
/// executor, so every method takes `&self` and is safe to call
/// concurrently.
pub trait Storage: Send + Sync {
    /// Allocate a new, not yet started build.
    fn create_build(&self, new: NewBuild) -> Result<Build, StorageError>;

    fn get_build(&self, id: BuildId) -> Result<Build, StorageError>;

    /// Remove a build together with its log records.
    fn delete_build(&self, id: BuildId) -> Result<Build, StorageError>;

    fn start_build(&self, id: BuildId, at_ms: u64) -> Result<(), StorageError>;

    /// Record the outcome of a build. A build can only finish once.
    fn finish_build(&self, id: BuildId, outcome: BuildOutcome, at_ms: u64) -> Result<(), StorageError>;

    /// Store the latest progress report for a group of a running build.
    fn report_build_progress(&self, id: BuildId, entry: ProgressEntry) -> Result<(), StorageError>;

    /// Builds of a job matching `filter`, ordered by id.
    fn get_job_builds(
        &self,
        job: &str,
        filter: &BuildFilter,
        order: Order,
        limit: Option<usize>,
    ) -> Result<Vec<Build>, StorageError>;

    /// Successful, non-skipped build of `job` with the latest start time.
    fn get_latest_successful_build(&self, job: &str) -> Result<Option<Build>, StorageError>;

    fn log_message(&self, record: LogRecord) -> Result<(), StorageError>;

    /// Log records of a build, oldest first, at or above `min_level`.
    fn iter_log_messages(
        &self,
        id: BuildId,
        min_level: Option<LogLevel>,
    ) -> Result<Vec<LogRecord>, StorageError>;

    /// Remove records (of one build, or of all builds) matched by `rule`.
    ///
    /// Returns the number of records removed.
    fn prune_log_messages(
        &self,
        id: Option<BuildId>,
        rule: RetentionRule,
        now_ms: u64,
    ) -> Result<usize, StorageError>;

    fn get_build_progress(&self, id: BuildId) -> Result<ProgressReport, StorageError> {
        let build = self.get_build(id)?;
        Ok(ProgressReport::from_table(&build.progress))
    }

    /// Normalized progress snapshot, recomputed from the current record.
    fn get_build_progress_info(&self, id: BuildId) -> Result<ProgressInfo, StorageError> {
        let build = self.get_build(id)?;
        let report = ProgressReport::from_table(&build.progress);
        Ok(ProgressInfo::compute(build.status(), &report))
    }
}
