// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-process storage

use crate::error::StorageError;
use crate::state::StorageState;
use crate::Storage;
use jc_core::{
    Build, BuildFilter, BuildId, BuildOutcome, LogLevel, LogRecord, NewBuild, Order, ProgressEntry,
    RetentionRule,
};
use parking_lot::Mutex;

/// Storage keeping everything in memory; lost on restart.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    state: Mutex<StorageState>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_state(state: StorageState) -> Self {
        Self { state: Mutex::new(state) }
    }

    /// Apply `change` to a copy of the state, and keep the copy only once
    /// `commit` accepts it. The lock is held throughout, so commits are
    /// serialized.
    pub(crate) fn transact<T>(
        &self,
        change: impl FnOnce(&mut StorageState) -> Result<T, StorageError>,
        commit: impl FnOnce(&StorageState, &T) -> Result<(), StorageError>,
    ) -> Result<T, StorageError> {
        let mut state = self.state.lock();
        let mut draft = state.clone();
        let value = change(&mut draft)?;
        commit(&draft, &value)?;
        *state = draft;
        Ok(value)
    }
}

impl Storage for MemoryStorage {
    fn create_build(&self, new: NewBuild) -> Result<Build, StorageError> {
        let build = self.state.lock().create_build(new);
        tracing::debug!(build_id = %build.id, job_id = %build.job_id, "build created");
        Ok(build)
    }

    fn get_build(&self, id: BuildId) -> Result<Build, StorageError> {
        self.state.lock().build(id).cloned()
    }

    fn delete_build(&self, id: BuildId) -> Result<Build, StorageError> {
        self.state.lock().delete_build(id)
    }

    fn start_build(&self, id: BuildId, at_ms: u64) -> Result<(), StorageError> {
        self.state.lock().start_build(id, at_ms)
    }

    fn finish_build(&self, id: BuildId, outcome: BuildOutcome, at_ms: u64) -> Result<(), StorageError> {
        self.state.lock().finish_build(id, outcome, at_ms)
    }

    fn report_build_progress(&self, id: BuildId, entry: ProgressEntry) -> Result<(), StorageError> {
        self.state.lock().report_progress(id, entry)
    }

    fn get_job_builds(
        &self,
        job: &str,
        filter: &BuildFilter,
        order: Order,
        limit: Option<usize>,
    ) -> Result<Vec<Build>, StorageError> {
        Ok(self.state.lock().job_builds(job, filter, order, limit))
    }

    fn get_latest_successful_build(&self, job: &str) -> Result<Option<Build>, StorageError> {
        Ok(self.state.lock().latest_successful_build(job).cloned())
    }

    fn log_message(&self, record: LogRecord) -> Result<(), StorageError> {
        self.state.lock().log_message(record)
    }

    fn iter_log_messages(
        &self,
        id: BuildId,
        min_level: Option<LogLevel>,
    ) -> Result<Vec<LogRecord>, StorageError> {
        let state = self.state.lock();
        state.build(id)?;
        Ok(state.log_messages(id, min_level))
    }

    fn prune_log_messages(
        &self,
        id: Option<BuildId>,
        rule: RetentionRule,
        now_ms: u64,
    ) -> Result<usize, StorageError> {
        let removed = self.state.lock().prune_logs(id, rule, now_ms);
        if removed > 0 {
            tracing::info!(removed, level = %rule.level, "pruned log records");
        }
        Ok(removed)
    }
}

#[cfg(test)]
#[path = "memory_tests.rs"]
mod tests;
