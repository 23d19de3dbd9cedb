// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Storage persisted to a snapshot file after every change

use crate::error::StorageError;
use crate::memory::MemoryStorage;
use crate::snapshot::{rotate_bak_path, Snapshot};
use crate::state::StorageState;
use crate::Storage;
use jc_core::{
    Build, BuildFilter, BuildId, BuildOutcome, LogLevel, LogRecord, NewBuild, Order, ProgressEntry,
    RetentionRule,
};
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub struct FileStorage {
    memory: MemoryStorage,
    path: PathBuf,
}

impl FileStorage {
    /// Open the snapshot at `path`, starting empty when it does not exist.
    ///
    /// An unreadable snapshot is moved aside to a `.bak` file and storage
    /// starts empty.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let state = match Snapshot::load(&path) {
            Ok(Some(snapshot)) => {
                tracing::info!(
                    path = %path.display(),
                    builds = snapshot.state.builds.len(),
                    created_at = %snapshot.created_at,
                    "loaded storage snapshot"
                );
                snapshot.state
            }
            Ok(None) => StorageState::default(),
            Err(e) => {
                let bak = rotate_bak_path(&path);
                tracing::warn!(
                    error = %e,
                    path = %path.display(),
                    backup = %bak.display(),
                    "unreadable storage snapshot, starting empty"
                );
                std::fs::rename(&path, &bak).map_err(|e| StorageError::Snapshot(e.into()))?;
                StorageState::default()
            }
        };
        Ok(Self { memory: MemoryStorage::from_state(state), path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self, state: &StorageState) -> Result<(), StorageError> {
        Snapshot::new(state.clone()).save(&self.path)?;
        Ok(())
    }

    /// Apply a change in memory only once its snapshot is on disk.
    fn persisted<T>(
        &self,
        change: impl FnOnce(&mut StorageState) -> Result<T, StorageError>,
    ) -> Result<T, StorageError> {
        self.memory.transact(change, |state, _| self.save(state))
    }
}

impl Storage for FileStorage {
    fn create_build(&self, new: NewBuild) -> Result<Build, StorageError> {
        let build = self.persisted(|state| Ok(state.create_build(new)))?;
        tracing::debug!(build_id = %build.id, job_id = %build.job_id, "build created");
        Ok(build)
    }

    fn get_build(&self, id: BuildId) -> Result<Build, StorageError> {
        self.memory.get_build(id)
    }

    fn delete_build(&self, id: BuildId) -> Result<Build, StorageError> {
        self.persisted(|state| state.delete_build(id))
    }

    fn start_build(&self, id: BuildId, at_ms: u64) -> Result<(), StorageError> {
        self.persisted(|state| state.start_build(id, at_ms))
    }

    fn finish_build(&self, id: BuildId, outcome: BuildOutcome, at_ms: u64) -> Result<(), StorageError> {
        self.persisted(|state| state.finish_build(id, outcome, at_ms))
    }

    fn report_build_progress(&self, id: BuildId, entry: ProgressEntry) -> Result<(), StorageError> {
        self.persisted(|state| state.report_progress(id, entry))
    }

    fn get_job_builds(
        &self,
        job: &str,
        filter: &BuildFilter,
        order: Order,
        limit: Option<usize>,
    ) -> Result<Vec<Build>, StorageError> {
        self.memory.get_job_builds(job, filter, order, limit)
    }

    fn get_latest_successful_build(&self, job: &str) -> Result<Option<Build>, StorageError> {
        self.memory.get_latest_successful_build(job)
    }

    fn log_message(&self, record: LogRecord) -> Result<(), StorageError> {
        self.persisted(|state| state.log_message(record))
    }

    fn iter_log_messages(
        &self,
        id: BuildId,
        min_level: Option<LogLevel>,
    ) -> Result<Vec<LogRecord>, StorageError> {
        self.memory.iter_log_messages(id, min_level)
    }

    fn prune_log_messages(
        &self,
        id: Option<BuildId>,
        rule: RetentionRule,
        now_ms: u64,
    ) -> Result<usize, StorageError> {
        let removed = self.memory.transact(
            |state| Ok(state.prune_logs(id, rule, now_ms)),
            |state, removed| if *removed > 0 { self.save(state) } else { Ok(()) },
        )?;
        if removed > 0 {
            tracing::info!(removed, level = %rule.level, "pruned log records");
        }
        Ok(removed)
    }
}

#[cfg(test)]
#[path = "file_tests.rs"]
mod tests;
