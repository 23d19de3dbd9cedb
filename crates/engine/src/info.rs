// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Read-side accessors over jobs and builds

use crate::control::JobControl;
use crate::error::EngineError;
use jc_config::job_to_yaml;
use jc_core::{
    Build, BuildFilter, BuildId, BuildStatus, Clock, JobConfig, JobDocs, JobId, JobStatus,
    LogLevel, LogRecord, Order, ProgressInfo, ProgressReport,
};
use std::time::Duration;

/// A configured job, bound to the control it belongs to.
pub struct JobInfo<'a, C: Clock> {
    control: &'a JobControl<C>,
    config: &'a JobConfig,
}

impl<'a, C: Clock> JobInfo<'a, C> {
    pub(crate) fn new(control: &'a JobControl<C>, config: &'a JobConfig) -> Self {
        Self { control, config }
    }

    pub fn id(&self) -> &'a JobId {
        &self.config.id
    }

    pub fn config(&self) -> &'a JobConfig {
        self.config
    }

    /// Direct dependencies, in configuration order.
    pub fn get_deps(&self) -> Vec<JobInfo<'a, C>> {
        self.related(self.control.config().get_job_deps(&self.config.id))
    }

    /// Jobs depending directly on this one, in configuration order.
    pub fn get_revdeps(&self) -> Vec<JobInfo<'a, C>> {
        self.related(self.control.config().get_job_revdeps(&self.config.id))
    }

    fn related(&self, ids: Vec<&'a JobId>) -> Vec<JobInfo<'a, C>> {
        let config = self.control.config();
        ids.into_iter()
            .filter_map(|id| config.get_job(id))
            .map(|job| JobInfo::new(self.control, job))
            .collect()
    }

    pub fn get_docs(&self) -> JobDocs {
        self.control.job_docs(self.config)
    }

    pub fn get_conf_as_yaml(&self) -> Result<String, EngineError> {
        Ok(job_to_yaml(self.config)?)
    }

    pub fn get_latest_successful_build(&self) -> Result<Option<BuildInfo<'a, C>>, EngineError> {
        let build = self.control.storage().get_latest_successful_build(&self.config.id)?;
        Ok(build.map(|b| BuildInfo::new(self.control, b)))
    }

    pub fn iter_builds(
        &self,
        filter: &BuildFilter,
        order: Order,
        limit: Option<usize>,
    ) -> Result<Vec<BuildInfo<'a, C>>, EngineError> {
        let builds = self.control.storage().get_job_builds(&self.config.id, filter, order, limit)?;
        Ok(builds.into_iter().map(|b| BuildInfo::new(self.control, b)).collect())
    }

    fn any_build(&self, filter: BuildFilter) -> Result<bool, EngineError> {
        Ok(!self.iter_builds(&filter, Order::Asc, Some(1))?.is_empty())
    }

    /// Any build that ran to completion, whatever its outcome.
    pub fn has_builds(&self) -> Result<bool, EngineError> {
        self.any_build(BuildFilter { started: Some(true), finished: Some(true), ..Default::default() })
    }

    pub fn has_successful_builds(&self) -> Result<bool, EngineError> {
        Ok(self.get_latest_successful_build()?.is_some())
    }

    pub fn has_running_builds(&self) -> Result<bool, EngineError> {
        self.any_build(BuildFilter { started: Some(true), finished: Some(false), ..Default::default() })
    }

    /// Whether a dependency was rebuilt after this job's latest successful
    /// build. `None` when this job or any dependency has no successful build.
    pub fn is_outdated(&self) -> Result<Option<bool>, EngineError> {
        let Some(latest) = self.get_latest_successful_build()? else {
            return Ok(None);
        };
        let Some(built_at) = latest.build().end_time_ms else {
            return Ok(None);
        };
        let mut outdated = false;
        for dep in self.get_deps() {
            let Some(dep_build) = dep.get_latest_successful_build()? else {
                return Ok(None);
            };
            match dep_build.build().end_time_ms {
                Some(end) if end > built_at => outdated = true,
                Some(_) => {}
                None => return Ok(None),
            }
        }
        Ok(Some(outdated))
    }

    /// Every dependency has a build a new build could use.
    pub fn can_be_built(&self) -> Result<bool, EngineError> {
        for dep in &self.config.dependencies {
            if self.control.select_dependency_build(self.config, dep)?.is_none() {
                return Ok(false);
            }
        }
        Ok(true)
    }

    pub fn get_status(&self) -> Result<JobStatus, EngineError> {
        if !self.has_builds()? {
            return Ok(JobStatus::NotBuilt);
        }
        if self.is_outdated()? == Some(true) {
            return Ok(JobStatus::Outdated);
        }
        if self.has_successful_builds()? {
            Ok(JobStatus::Success)
        } else {
            Ok(JobStatus::Failed)
        }
    }
}

impl<C: Clock> Clone for JobInfo<'_, C> {
    fn clone(&self) -> Self {
        Self { control: self.control, config: self.config }
    }
}

impl<C: Clock> std::fmt::Debug for JobInfo<'_, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JobInfo").field("id", &self.config.id).finish_non_exhaustive()
    }
}

/// A build record, bound to the control it belongs to.
///
/// Holds a copy of the record as it was when loaded; [`BuildInfo::refresh`]
/// reloads it.
pub struct BuildInfo<'a, C: Clock> {
    control: &'a JobControl<C>,
    build: Build,
}

impl<'a, C: Clock> BuildInfo<'a, C> {
    pub(crate) fn new(control: &'a JobControl<C>, build: Build) -> Self {
        Self { control, build }
    }

    pub fn id(&self) -> BuildId {
        self.build.id
    }

    pub fn job_id(&self) -> &JobId {
        &self.build.job_id
    }

    pub fn build(&self) -> &Build {
        &self.build
    }

    pub fn into_build(self) -> Build {
        self.build
    }

    pub fn status(&self) -> BuildStatus {
        self.build.status()
    }

    pub fn descriptive_status(&self) -> String {
        self.build.descriptive_status()
    }

    pub fn duration(&self) -> Option<Duration> {
        self.build.duration()
    }

    pub fn get_progress_report(&self) -> ProgressReport {
        ProgressReport::from_table(&self.build.progress)
    }

    /// Progress snapshot, with the color recomputed from the current status.
    pub fn get_progress_info(&self) -> ProgressInfo {
        ProgressInfo::compute(self.build.status(), &self.get_progress_report())
    }

    /// The job as currently configured; fails when it was removed from the
    /// configuration since the build was created.
    pub fn get_job(&self) -> Result<JobInfo<'a, C>, EngineError> {
        self.control.get_job(&self.build.job_id)
    }

    pub fn refresh(&mut self) -> Result<(), EngineError> {
        self.build = self.control.storage().get_build(self.build.id)?;
        Ok(())
    }

    pub async fn delete(self, cleanup: bool) -> Result<(), EngineError> {
        self.control.delete_build(self.build.id, cleanup).await
    }

    pub fn iter_log_messages(&self, min_level: Option<LogLevel>) -> Result<Vec<LogRecord>, EngineError> {
        Ok(self.control.storage().iter_log_messages(self.build.id, min_level)?)
    }

    /// The dependency build whose return value this build consumed.
    pub fn get_dependency_build(&self, job: &str) -> Result<BuildInfo<'a, C>, EngineError> {
        let id = self.build.dependency_builds.get(job).copied().ok_or_else(|| {
            EngineError::NotADependency { build: self.build.id, job: JobId::new(job) }
        })?;
        self.control.get_build(id)
    }

    pub async fn retval_repr(&self) -> Option<String> {
        self.control.render_retval(&self.build).await
    }
}

impl<C: Clock> std::fmt::Debug for BuildInfo<'_, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BuildInfo").field("build", &self.build).finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "info_tests.rs"]
mod tests;
