// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job configuration and job-level status.

use crate::args::ArgValue;
use crate::id::{BuildId, JobId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Configuration of one job, as declared in the configuration file.
///
/// A copy of this struct is frozen into every build so that later edits to
/// the configuration never rewrite history.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct JobConfig {
    pub id: JobId,
    /// Function to run, as `"module:name"`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function: Option<String>,
    #[serde(default)]
    pub args: Vec<ArgValue>,
    #[serde(default)]
    pub kwargs: BTreeMap<String, ArgValue>,
    #[serde(default)]
    pub dependencies: Vec<JobId>,
    /// Dependency job → build to use instead of its latest successful one
    #[serde(default)]
    pub pinned_builds: BTreeMap<JobId, BuildId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Extra care should be taken before running this job
    #[serde(default)]
    pub protected: bool,
    /// Function called with the build when the build is deleted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cleanup_function: Option<String>,
    /// Function used to render the build's return value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repr_function: Option<String>,
}

impl JobConfig {
    pub fn new(id: impl Into<JobId>) -> Self {
        Self { id: id.into(), ..Self::default() }
    }

    pub fn with_function(mut self, function: impl Into<String>) -> Self {
        self.function = Some(function.into());
        self
    }

    pub fn with_dependencies<I, S>(mut self, deps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<JobId>,
    {
        self.dependencies = deps.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_args(mut self, args: Vec<ArgValue>) -> Self {
        self.args = args;
        self
    }

    pub fn with_kwarg(mut self, key: impl Into<String>, value: impl Into<ArgValue>) -> Self {
        self.kwargs.insert(key.into(), value.into());
        self
    }

    pub fn depends_on(&self, job: &str) -> bool {
        self.dependencies.iter().any(|d| d == job)
    }

    /// Display title, falling back to the id.
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or(self.id.as_str())
    }

    /// Dependencies referenced through `!retval` placeholders in args/kwargs.
    pub fn retval_refs(&self) -> Vec<&JobId> {
        self.args
            .iter()
            .chain(self.kwargs.values())
            .flat_map(ArgValue::retval_refs)
            .collect()
    }
}

/// Summary status of a job, derived from its build history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    /// No finished builds
    NotBuilt,
    /// Has a successful build, older than one of its dependencies' builds
    Outdated,
    /// Has at least one successful build
    Success,
    /// Only failed builds
    Failed,
}

crate::simple_display! {
    JobStatus {
        NotBuilt => "not_built",
        Outdated => "outdated",
        Success => "success",
        Failed => "failed",
    }
}

#[cfg(test)]
#[path = "job_tests.rs"]
mod tests;
