// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Engine accessors → response bodies

use jc_core::{Clock, JobId};
use jc_engine::{EngineError, JobInfo};
use jc_wire::{JobDetail, JobSummary};

pub fn ids<C: Clock>(jobs: &[JobInfo<'_, C>]) -> Vec<JobId> {
    jobs.iter().map(|j| j.id().clone()).collect()
}

pub fn job_summary<C: Clock>(job: &JobInfo<'_, C>) -> Result<JobSummary, EngineError> {
    let config = job.config();
    Ok(JobSummary {
        id: config.id.clone(),
        title: config.display_title().to_string(),
        status: job.get_status()?,
        protected: config.protected,
        dependencies: config.dependencies.clone(),
    })
}

pub fn job_detail<C: Clock>(job: &JobInfo<'_, C>) -> Result<JobDetail, EngineError> {
    let config = job.config();
    Ok(JobDetail {
        id: config.id.clone(),
        title: config.display_title().to_string(),
        notes: config.notes.clone(),
        protected: config.protected,
        function: config.function.clone(),
        dependencies: ids(&job.get_deps()),
        revdeps: ids(&job.get_revdeps()),
        status: job.get_status()?,
        outdated: job.is_outdated()?,
        can_be_built: job.can_be_built()?,
        latest_successful_build: job.get_latest_successful_build()?.map(|b| b.id()),
        docs: job.get_docs(),
        depgraph_url: format!("/jobs/{}/depgraph?fmt=svg", config.id),
    })
}
