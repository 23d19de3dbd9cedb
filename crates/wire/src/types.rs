// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! JSON bodies returned by the HTTP server.

use crate::format::rfc3339;
use jc_core::{
    ArgValue, Build, BuildId, BuildStatus, ErrorKind, JobDocs, JobId, JobStatus, LogLevel,
    LogRecord, ProgressInfo, ProgressReport,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One line of the job listing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JobSummary {
    pub id: JobId,
    pub title: String,
    pub status: JobStatus,
    #[serde(default)]
    pub protected: bool,
    #[serde(default)]
    pub dependencies: Vec<JobId>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JobDetail {
    pub id: JobId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default)]
    pub protected: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function: Option<String>,
    pub dependencies: Vec<JobId>,
    pub revdeps: Vec<JobId>,
    pub status: JobStatus,
    /// `None` when this job or one of its dependencies was never built
    pub outdated: Option<bool>,
    pub can_be_built: bool,
    pub latest_successful_build: Option<BuildId>,
    /// Sentinel docs when the function cannot be introspected
    pub docs: JobDocs,
    /// Where the dependency graph image can be fetched
    pub depgraph_url: String,
}

/// Build record as exposed over HTTP.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BuildDetail {
    pub id: BuildId,
    pub job_id: JobId,
    pub created_at_ms: u64,
    pub start_time_ms: Option<u64>,
    pub end_time_ms: Option<u64>,
    pub finished: bool,
    pub success: bool,
    pub skipped: bool,
    pub status: BuildStatus,
    pub descriptive_status: String,
    /// Absent unless both start and end time are known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
    pub progress: ProgressDto,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retval: Option<ArgValue>,
    /// Human-readable return value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retval_repr: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exception: Option<String>,
    pub config_hash: String,
    #[serde(default)]
    pub dependency_builds: BTreeMap<JobId, BuildId>,
}

impl BuildDetail {
    pub fn new(build: &Build, retval_repr: Option<String>) -> Self {
        Self {
            id: build.id,
            job_id: build.job_id.clone(),
            created_at_ms: build.created_at_ms,
            start_time_ms: build.start_time_ms,
            end_time_ms: build.end_time_ms,
            finished: build.finished,
            success: build.success,
            skipped: build.skipped,
            status: build.status(),
            descriptive_status: build.descriptive_status(),
            duration_ms: build.duration().map(|d| d.as_millis() as u64),
            progress: ProgressDto::for_build(build),
            retval: build.retval.clone(),
            retval_repr,
            exception: build.exception.clone(),
            config_hash: build.config_hash.clone(),
            dependency_builds: build.dependency_builds.clone(),
        }
    }
}

/// Progress snapshot plus the per-group tree it was computed from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProgressDto {
    pub current: u64,
    /// Absent when the progress is indeterminate
    pub total: Option<u64>,
    pub in_progress: bool,
    pub color: String,
    pub tree: ProgressNode,
}

impl ProgressDto {
    pub fn new(info: ProgressInfo, report: &ProgressReport) -> Self {
        Self {
            current: info.current,
            total: info.total,
            in_progress: info.in_progress,
            color: info.color,
            tree: ProgressNode::from(report),
        }
    }

    pub fn for_build(build: &Build) -> Self {
        let report = ProgressReport::from_table(&build.progress);
        Self::new(ProgressInfo::compute(build.status(), &report), &report)
    }

    pub fn info(&self) -> ProgressInfo {
        ProgressInfo {
            current: self.current,
            total: self.total,
            in_progress: self.in_progress,
            color: self.color.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProgressNode {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub current: u64,
    pub total: Option<u64>,
    /// e.g. `"60%"`, or `"?"`
    pub percent: String,
    pub label: String,
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_line: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ProgressNode>,
}

impl From<&ProgressReport> for ProgressNode {
    fn from(report: &ProgressReport) -> Self {
        Self {
            name: report.name.clone(),
            current: report.current(),
            total: report.total(),
            percent: report.percent_human(),
            label: report.label(),
            color: report.color_css_rgb(),
            status_line: report.status_line.clone(),
            children: report.children.iter().map(ProgressNode::from).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LogEntry {
    pub build_id: BuildId,
    pub created_ms: u64,
    /// RFC 3339, UTC
    pub created: String,
    pub level: LogLevel,
    pub target: String,
    pub message: String,
}

impl From<LogRecord> for LogEntry {
    fn from(record: LogRecord) -> Self {
        Self {
            build_id: record.build_id,
            created_ms: record.created_ms,
            created: rfc3339(record.created_ms),
            level: record.level,
            target: record.target,
            message: record.message,
        }
    }
}

/// Body of every non-2xx response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub error: String,
    pub kind: ErrorKind,
}

impl ErrorBody {
    pub fn new(kind: ErrorKind, error: impl Into<String>) -> Self {
        Self { error: error.into(), kind }
    }
}

#[cfg(test)]
#[path = "types_tests.rs"]
mod tests;
