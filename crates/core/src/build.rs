// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Build record and its derived lifecycle status.
//!
//! A build moves through `not-started → running → {succeeded, failed, skipped}`.
//! The state is never stored as such; it is derived from the timestamps and
//! the three outcome flags every time it is asked for.

use crate::args::ArgValue;
use crate::id::{BuildId, JobId};
use crate::job::JobConfig;
use crate::progress::ProgressEntry;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

/// Derived lifecycle state of a build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BuildStatus {
    NotStarted,
    Running,
    Succeeded,
    Failed,
    Skipped,
}

impl BuildStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, BuildStatus::Succeeded | BuildStatus::Failed | BuildStatus::Skipped)
    }
}

crate::simple_display! {
    BuildStatus {
        NotStarted => "not-started",
        Running => "running",
        Succeeded => "succeeded",
        Failed => "failed",
        Skipped => "skipped",
    }
}

/// How a finished build ended, as reported by the executor.
#[derive(Debug, Clone, PartialEq)]
pub enum BuildOutcome {
    Succeeded { retval: ArgValue },
    Failed { error: String },
    Skipped { reason: Option<String> },
}

/// Everything the storage needs to allocate a new build.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBuild {
    pub job_id: JobId,
    pub config: JobConfig,
    pub config_hash: String,
    pub dependency_builds: BTreeMap<JobId, BuildId>,
    pub created_at_ms: u64,
}

/// One execution of a job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Build {
    pub id: BuildId,
    pub job_id: JobId,
    pub created_at_ms: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time_ms: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time_ms: Option<u64>,
    #[serde(default)]
    pub finished: bool,
    /// Only meaningful once `finished` is set
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub skipped: bool,
    /// Job configuration frozen at creation time
    pub config: JobConfig,
    /// sha256 of the frozen configuration, to spot config drift
    #[serde(default)]
    pub config_hash: String,
    /// Dependency job → build whose return value this build consumes
    #[serde(default)]
    pub dependency_builds: BTreeMap<JobId, BuildId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retval: Option<ArgValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exception: Option<String>,
    /// Latest progress report per group path
    #[serde(default)]
    pub progress: Vec<ProgressEntry>,
}

impl Build {
    pub fn from_new(id: BuildId, new: NewBuild) -> Self {
        Self {
            id,
            job_id: new.job_id,
            created_at_ms: new.created_at_ms,
            start_time_ms: None,
            end_time_ms: None,
            finished: false,
            success: false,
            skipped: false,
            config: new.config,
            config_hash: new.config_hash,
            dependency_builds: new.dependency_builds,
            retval: None,
            exception: None,
            progress: Vec::new(),
        }
    }

    pub fn started(&self) -> bool {
        self.start_time_ms.is_some()
    }

    /// Lifecycle state, with precedence skipped > failed > succeeded > running > not-started.
    ///
    /// An unfinished build is never reported as succeeded or failed.
    pub fn status(&self) -> BuildStatus {
        if self.skipped {
            BuildStatus::Skipped
        } else if self.finished {
            if self.success {
                BuildStatus::Succeeded
            } else {
                BuildStatus::Failed
            }
        } else if self.started() {
            BuildStatus::Running
        } else {
            BuildStatus::NotStarted
        }
    }

    pub fn descriptive_status(&self) -> String {
        self.status().to_string()
    }

    /// Wall time between start and end; `None` unless both are known.
    pub fn duration(&self) -> Option<Duration> {
        match (self.start_time_ms, self.end_time_ms) {
            (Some(start), Some(end)) => Some(Duration::from_millis(end.saturating_sub(start))),
            _ => None,
        }
    }

    /// A build counts as successful for dependency purposes only when it
    /// finished with success and was not skipped.
    pub fn is_successful(&self) -> bool {
        self.finished && self.success && !self.skipped
    }

    /// Apply a terminal outcome. Callers check `finished` first.
    pub fn apply_outcome(&mut self, outcome: BuildOutcome, at_ms: u64) {
        self.finished = true;
        self.end_time_ms = Some(at_ms);
        match outcome {
            BuildOutcome::Succeeded { retval } => {
                self.success = true;
                self.skipped = false;
                self.retval = Some(retval);
                self.exception = None;
            }
            BuildOutcome::Failed { error } => {
                self.success = false;
                self.skipped = false;
                self.retval = None;
                self.exception = Some(error);
            }
            BuildOutcome::Skipped { reason } => {
                self.success = false;
                self.skipped = true;
                self.retval = None;
                self.exception = reason;
            }
        }
    }

    /// Record the latest report for a progress group, replacing any previous one.
    pub fn set_progress(&mut self, entry: ProgressEntry) {
        match self.progress.iter_mut().find(|e| e.group == entry.group) {
            Some(existing) => *existing = entry,
            None => self.progress.push(entry),
        }
    }
}

crate::builder! {
    pub struct BuildBuilder => Build {
        into {
            job_id: JobId = "job",
            config_hash: String = "",
        }
        set {
            id: BuildId = BuildId(1),
            created_at_ms: u64 = 1_000_000,
            finished: bool = false,
            success: bool = false,
            skipped: bool = false,
            config: JobConfig = JobConfig::new("job"),
            dependency_builds: BTreeMap<JobId, BuildId> = BTreeMap::new(),
            progress: Vec<ProgressEntry> = Vec::new(),
        }
        option {
            start_time_ms: u64 = None,
            end_time_ms: u64 = None,
            retval: ArgValue = None,
            exception: String = None,
        }
    }
}

#[cfg(test)]
#[path = "build_tests.rs"]
mod tests;
