// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory state shared by every storage backend

use crate::error::StorageError;
use jc_core::{
    Build, BuildFilter, BuildId, BuildOutcome, LogLevel, LogRecord, NewBuild, Order, ProgressEntry,
    RetentionRule,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// All builds and log records.
///
/// Build ids are allocated sequentially starting at 1 and never reused,
/// even after a build is deleted.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageState {
    #[serde(default)]
    pub last_build_id: BuildId,
    #[serde(default)]
    pub builds: BTreeMap<BuildId, Build>,
    #[serde(default)]
    pub logs: Vec<LogRecord>,
}

impl StorageState {
    pub fn create_build(&mut self, new: NewBuild) -> Build {
        self.last_build_id = self.last_build_id.next();
        let build = Build::from_new(self.last_build_id, new);
        self.builds.insert(build.id, build.clone());
        build
    }

    pub fn build(&self, id: BuildId) -> Result<&Build, StorageError> {
        self.builds.get(&id).ok_or(StorageError::BuildNotFound(id))
    }

    fn build_mut(&mut self, id: BuildId) -> Result<&mut Build, StorageError> {
        self.builds.get_mut(&id).ok_or(StorageError::BuildNotFound(id))
    }

    pub fn delete_build(&mut self, id: BuildId) -> Result<Build, StorageError> {
        let build = self.builds.remove(&id).ok_or(StorageError::BuildNotFound(id))?;
        self.logs.retain(|record| record.build_id != id);
        Ok(build)
    }

    pub fn start_build(&mut self, id: BuildId, at_ms: u64) -> Result<(), StorageError> {
        let build = self.build_mut(id)?;
        if build.finished {
            return Err(StorageError::AlreadyFinished(id));
        }
        if build.started() {
            return Err(StorageError::AlreadyStarted(id));
        }
        build.start_time_ms = Some(at_ms);
        Ok(())
    }

    pub fn finish_build(
        &mut self,
        id: BuildId,
        outcome: BuildOutcome,
        at_ms: u64,
    ) -> Result<(), StorageError> {
        let build = self.build_mut(id)?;
        if build.finished {
            return Err(StorageError::AlreadyFinished(id));
        }
        build.apply_outcome(outcome, at_ms);
        Ok(())
    }

    pub fn report_progress(&mut self, id: BuildId, entry: ProgressEntry) -> Result<(), StorageError> {
        let build = self.build_mut(id)?;
        if build.finished {
            return Err(StorageError::AlreadyFinished(id));
        }
        build.set_progress(entry);
        Ok(())
    }

    pub fn job_builds(
        &self,
        job: &str,
        filter: &BuildFilter,
        order: Order,
        limit: Option<usize>,
    ) -> Vec<Build> {
        let matching = self.builds.values().filter(|b| b.job_id == job && filter.matches(b));
        let ordered: Box<dyn Iterator<Item = &Build>> = match order {
            Order::Asc => Box::new(matching),
            Order::Desc => Box::new(matching.rev()),
        };
        ordered.take(limit.unwrap_or(usize::MAX)).cloned().collect()
    }

    /// Latest start time wins; ties go to the higher build id.
    pub fn latest_successful_build(&self, job: &str) -> Option<&Build> {
        self.builds
            .values()
            .filter(|b| b.job_id == job && b.is_successful())
            .max_by_key(|b| (b.start_time_ms, b.id))
    }

    pub fn log_message(&mut self, record: LogRecord) -> Result<(), StorageError> {
        self.build(record.build_id)?;
        self.logs.push(record);
        Ok(())
    }

    pub fn log_messages(&self, id: BuildId, min_level: Option<LogLevel>) -> Vec<LogRecord> {
        let mut records: Vec<LogRecord> = self
            .logs
            .iter()
            .filter(|r| r.build_id == id && min_level.is_none_or(|min| r.level >= min))
            .cloned()
            .collect();
        records.sort_by_key(|r| r.created_ms);
        records
    }

    pub fn prune_logs(&mut self, id: Option<BuildId>, rule: RetentionRule, now_ms: u64) -> usize {
        let before = self.logs.len();
        self.logs.retain(|r| {
            let in_scope = id.is_none_or(|id| r.build_id == id);
            !(in_scope && rule.matches(r, now_ms))
        });
        before - self.logs.len()
    }
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod tests;
