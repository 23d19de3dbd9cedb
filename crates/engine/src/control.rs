// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job control: the entry point tying configuration, storage and
//! registered functions together.

use crate::context::BuildContext;
use crate::depgraph::{self, DepGraph};
use crate::error::EngineError;
use crate::info::{BuildInfo, JobInfo};
use crate::registry::{FunctionCall, FunctionRegistry, JobFailure};
use crate::render::{to_dot, NodeStyle};
use jc_config::{interpolate_secrets, ControlConfig};
use jc_core::{
    call_code, split_function_name, ArgValue, Build, BuildId, BuildOutcome, Clock, JobConfig,
    JobDocs, JobId, NewBuild, RetentionPolicy, SystemClock,
};
use jc_storage::Storage;
use sha2::{Digest, Sha256};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::sync::Arc;

pub struct JobControl<C: Clock = SystemClock> {
    config: Arc<ControlConfig>,
    storage: Arc<dyn Storage>,
    registry: Arc<FunctionRegistry>,
    clock: C,
}

impl JobControl<SystemClock> {
    /// Load configuration from a file and open the storage it names.
    pub fn from_config_file(path: &Path) -> Result<Self, EngineError> {
        let config = ControlConfig::load(path)?;
        let storage = jc_storage::open_storage(&config.storage)?;
        Ok(Self::new(config, storage, FunctionRegistry::with_builtins(), SystemClock))
    }
}

impl<C: Clock> JobControl<C> {
    pub fn new(
        config: ControlConfig,
        storage: Arc<dyn Storage>,
        registry: FunctionRegistry,
        clock: C,
    ) -> Self {
        Self { config: Arc::new(config), storage, registry: Arc::new(registry), clock }
    }

    pub fn config(&self) -> &ControlConfig {
        &self.config
    }

    pub fn storage(&self) -> &Arc<dyn Storage> {
        &self.storage
    }

    pub fn registry(&self) -> &FunctionRegistry {
        &self.registry
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn get_job(&self, id: &str) -> Result<JobInfo<'_, C>, EngineError> {
        self.config
            .get_job(id)
            .map(|config| JobInfo::new(self, config))
            .ok_or_else(|| EngineError::JobNotFound(JobId::new(id)))
    }

    /// Every configured job, in configuration order.
    pub fn iter_jobs(&self) -> impl Iterator<Item = JobInfo<'_, C>> {
        self.config.jobs().map(move |config| JobInfo::new(self, config))
    }

    pub fn get_build(&self, id: BuildId) -> Result<BuildInfo<'_, C>, EngineError> {
        Ok(BuildInfo::new(self, self.storage.get_build(id)?))
    }

    /// Create a build of `job`, freezing its configuration and the
    /// dependency builds whose return values it will consume.
    ///
    /// Every dependency needs a successful build: the pinned one when the
    /// job pins it, its latest successful one otherwise.
    pub fn create_build(&self, job: &str) -> Result<BuildInfo<'_, C>, EngineError> {
        let info = self.get_job(job)?;
        let config = info.config();

        let mut dependency_builds = BTreeMap::new();
        let mut missing = Vec::new();
        for dep in &config.dependencies {
            match self.select_dependency_build(config, dep)? {
                Some(build) => {
                    dependency_builds.insert(dep.clone(), build.id);
                }
                None => missing.push(dep.clone()),
            }
        }
        if !missing.is_empty() {
            return Err(EngineError::MissingDependencies { job: config.id.clone(), missing });
        }

        let build = self.storage.create_build(NewBuild {
            job_id: config.id.clone(),
            config: config.clone(),
            config_hash: config_hash(config),
            dependency_builds,
            created_at_ms: self.clock.epoch_ms(),
        })?;
        tracing::info!(job_id = %build.job_id, build_id = %build.id, "created build");
        Ok(BuildInfo::new(self, build))
    }

    /// Successful build of `dep` that a build of `job` would use.
    pub(crate) fn select_dependency_build(
        &self,
        job: &JobConfig,
        dep: &JobId,
    ) -> Result<Option<Build>, EngineError> {
        if let Some(pinned) = job.pinned_builds.get(dep) {
            return match self.storage.get_build(*pinned) {
                Ok(build) if build.is_successful() && build.job_id == *dep => Ok(Some(build)),
                Ok(_) => Ok(None),
                Err(e) if e.kind() == jc_core::ErrorKind::NotFound => Ok(None),
                Err(e) => Err(e.into()),
            };
        }
        Ok(self.storage.get_latest_successful_build(dep)?)
    }

    /// Run a created build to completion.
    ///
    /// Errors are only returned for storage failures or when the build was
    /// already started; a failing function finishes the build as failed.
    pub async fn run_build(&self, id: BuildId) -> Result<BuildInfo<'_, C>, EngineError> {
        let build = self.storage.get_build(id)?;
        self.storage.start_build(id, self.clock.epoch_ms())?;
        tracing::info!(job_id = %build.job_id, build_id = %id, "starting build");

        let ctx = self.context_for(&build);
        let outcome = match self.execute(&ctx, &build).await {
            Ok(retval) => {
                tracing::info!(job_id = %build.job_id, build_id = %id, "build succeeded");
                BuildOutcome::Succeeded { retval }
            }
            Err(JobFailure::Skip(reason)) => {
                tracing::info!(job_id = %build.job_id, build_id = %id, ?reason, "build skipped");
                BuildOutcome::Skipped { reason }
            }
            Err(JobFailure::Failed(error)) => {
                ctx.log(jc_core::LogLevel::Error, format!("build failed: {error}"));
                BuildOutcome::Failed { error }
            }
        };
        self.storage.finish_build(id, outcome, self.clock.epoch_ms())?;
        self.get_build(id)
    }

    async fn execute(&self, ctx: &BuildContext, build: &Build) -> Result<ArgValue, JobFailure> {
        let name = build
            .config
            .function
            .as_deref()
            .ok_or_else(|| JobFailure::failed("job has no function configured"))?;
        let function = self.registry.get(name).map_err(JobFailure::failed)?;

        let retvals = self.dependency_retvals(build)?;
        let secrets = self.config.secrets();
        let call = FunctionCall {
            args: build
                .config
                .args
                .iter()
                .map(|v| substitute(v, &retvals, secrets))
                .collect::<Result<_, _>>()?,
            kwargs: build
                .config
                .kwargs
                .iter()
                .map(|(k, v)| substitute(v, &retvals, secrets).map(|v| (k.clone(), v)))
                .collect::<Result<_, _>>()?,
        };
        tracing::debug!(build_id = %build.id, function = name, "calling function");
        function.call(ctx, call).await
    }

    /// Return values of the dependency builds frozen into `build`.
    fn dependency_retvals(&self, build: &Build) -> Result<HashMap<JobId, ArgValue>, JobFailure> {
        let mut retvals = HashMap::new();
        for job in build.config.retval_refs() {
            if retvals.contains_key(job) {
                continue;
            }
            let dep_id = build
                .dependency_builds
                .get(job)
                .ok_or_else(|| JobFailure::Failed(format!("no build of {job} selected")))?;
            let dep = self
                .storage
                .get_build(*dep_id)
                .map_err(|e| JobFailure::Failed(format!("dependency {job}: {e}")))?;
            retvals.insert(job.clone(), dep.retval.unwrap_or_default());
        }
        Ok(retvals)
    }

    fn context_for(&self, build: &Build) -> BuildContext {
        let clock = self.clock.clone();
        BuildContext::new(build.id, build.job_id.clone(), Arc::clone(&self.storage), move || {
            clock.epoch_ms()
        })
    }

    pub async fn build_job(&self, job: &str) -> Result<BuildInfo<'_, C>, EngineError> {
        let id = self.create_build(job)?.id();
        self.run_build(id).await
    }

    /// Delete a build; with `cleanup`, then call the job's cleanup function
    /// with the deleted build record.
    pub async fn delete_build(&self, id: BuildId, cleanup: bool) -> Result<(), EngineError> {
        let build = self.storage.delete_build(id)?;
        tracing::info!(job_id = %build.job_id, build_id = %id, "deleted build");
        let Some(name) = build.config.cleanup_function.as_deref().filter(|_| cleanup) else {
            return Ok(());
        };
        let cleanup_error = |message: String| EngineError::Cleanup { build: id, message };
        let function = self.registry.get(name).map_err(|e| cleanup_error(e.to_string()))?;
        let record = serde_json::to_value(&build).map_err(|e| cleanup_error(e.to_string()))?;
        let call = FunctionCall { args: vec![ArgValue::from(record)], kwargs: BTreeMap::new() };
        function.call(&self.context_for(&build), call).await.map_err(|e| cleanup_error(e.to_string()))?;
        Ok(())
    }

    /// Apply a retention policy to the logs of every build.
    pub fn prune_logs(&self, policy: &RetentionPolicy) -> Result<usize, EngineError> {
        let now = self.clock.epoch_ms();
        let mut removed = 0;
        for rule in &policy.rules {
            removed += self.storage.prune_log_messages(None, *rule, now)?;
        }
        Ok(removed)
    }

    /// Documentation of the function a job runs; sentinel docs when the
    /// function cannot be resolved.
    pub fn job_docs(&self, job: &JobConfig) -> JobDocs {
        let Some(name) = job.function.as_deref() else {
            return JobDocs::sentinel("no function configured");
        };
        let function = match self.registry.get(name) {
            Ok(function) => function,
            Err(e) => return JobDocs::sentinel(e),
        };
        let Some((module, function_name)) = split_function_name(name) else {
            return JobDocs::sentinel(format!("malformed function name {name:?}"));
        };
        JobDocs {
            call_code: call_code(name, &job.args, &job.kwargs).unwrap_or_default(),
            function_module: module.to_string(),
            function_name: function_name.to_string(),
            function_doc: function.doc().to_string(),
            function_argspec: function.signature().argspec_human(),
        }
    }

    /// Human-readable return value, through the job's `repr_function` when set.
    pub async fn render_retval(&self, build: &Build) -> Option<String> {
        let retval = build.retval.as_ref()?;
        if let Some(name) = build.config.repr_function.as_deref() {
            if let Ok(function) = self.registry.get(name) {
                let call = FunctionCall { args: vec![retval.clone()], kwargs: BTreeMap::new() };
                match function.call(&self.context_for(build), call).await {
                    Ok(ArgValue::Str(s)) => return Some(s),
                    Ok(other) => return Some(other.literal()),
                    Err(e) => {
                        tracing::warn!(build_id = %build.id, function = name, error = %e, "repr function failed")
                    }
                }
            }
        }
        Some(retval.literal())
    }

    pub fn job_depgraph(&self, job: &str, complete: bool) -> Result<DepGraph, EngineError> {
        self.get_job(job)?;
        Ok(depgraph::job_depgraph(&self.config, job, complete))
    }

    pub fn full_depgraph(&self) -> DepGraph {
        depgraph::full_depgraph(&self.config)
    }

    /// DOT source for a graph, nodes colored by job status and labeled by title.
    pub fn depgraph_dot(&self, graph: &DepGraph, highlight: Option<&str>) -> Result<String, EngineError> {
        let mut styles = HashMap::new();
        for id in graph.keys() {
            let job = self.get_job(id)?;
            styles.insert(
                id.clone(),
                NodeStyle {
                    label: Some(job.config().display_title().to_string()),
                    status: Some(job.get_status()?),
                    highlight: highlight == Some(id.as_str()),
                },
            );
        }
        Ok(to_dot(graph, &styles))
    }
}

/// sha256 of the canonical JSON form of a job configuration.
pub fn config_hash(config: &JobConfig) -> String {
    let canonical = serde_json::to_string(config).unwrap_or_default();
    format!("{:x}", Sha256::digest(canonical.as_bytes()))
}

fn substitute(
    value: &ArgValue,
    retvals: &HashMap<JobId, ArgValue>,
    secrets: &BTreeMap<String, String>,
) -> Result<ArgValue, JobFailure> {
    Ok(match value {
        ArgValue::Retval(job) => retvals
            .get(job)
            .cloned()
            .ok_or_else(|| JobFailure::Failed(format!("no return value for {job}")))?,
        ArgValue::Str(s) => ArgValue::Str(interpolate_secrets(s, secrets)),
        ArgValue::List(items) => ArgValue::List(
            items.iter().map(|v| substitute(v, retvals, secrets)).collect::<Result<_, _>>()?,
        ),
        ArgValue::Map(map) => ArgValue::Map(
            map.iter()
                .map(|(k, v)| substitute(v, retvals, secrets).map(|v| (k.clone(), v)))
                .collect::<Result<_, _>>()?,
        ),
        other => other.clone(),
    })
}

#[cfg(test)]
#[path = "control_tests.rs"]
mod tests;
