// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Validated configuration

use crate::error::ConfigError;
use crate::parser::RawConfig;
use crate::template::expand_env;
use indexmap::IndexMap;
use jc_core::{JobConfig, JobId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

pub const DEFAULT_STORAGE_URL: &str = "memory://";

/// Settings for the HTTP server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WebappConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5050
}

impl Default for WebappConfig {
    fn default() -> Self {
        Self { host: default_host(), port: default_port() }
    }
}

impl WebappConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// The whole configuration file, validated.
///
/// Jobs keep the order they were declared in, which is the order every
/// listing (jobs, deps, revdeps) follows.
#[derive(Debug, Clone, Default)]
pub struct ControlConfig {
    pub storage: String,
    pub webapp: WebappConfig,
    jobs: IndexMap<JobId, JobConfig>,
    secrets: BTreeMap<String, String>,
}

impl ControlConfig {
    /// Parse and validate configuration text.
    ///
    /// `${VAR:-default}` placeholders are expanded from the environment first.
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let expanded = expand_env(text);
        let raw: RawConfig = if expanded.trim().is_empty() {
            RawConfig::default()
        } else {
            serde_yaml::from_str(&expanded)?
        };
        if raw.celery.is_some() {
            tracing::warn!("ignoring `celery` section, builds run in-process");
        }

        let mut jobs = IndexMap::new();
        for (index, raw_job) in raw.jobs.into_iter().enumerate() {
            let job = raw_job.into_job(index)?;
            if jobs.contains_key(&job.id) {
                return Err(ConfigError::DuplicateJob(job.id));
            }
            jobs.insert(job.id.clone(), job);
        }
        validate(&jobs)?;

        Ok(Self {
            storage: raw.storage.unwrap_or_else(|| DEFAULT_STORAGE_URL.to_string()),
            webapp: raw.webapp.unwrap_or_default(),
            jobs,
            secrets: raw.secret,
        })
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
        let config = Self::parse(&text)?;
        tracing::debug!(path = %path.display(), jobs = config.jobs.len(), "loaded configuration");
        Ok(config)
    }

    /// Build a configuration directly from job definitions.
    pub fn from_jobs(jobs: impl IntoIterator<Item = JobConfig>) -> Result<Self, ConfigError> {
        let mut map = IndexMap::new();
        for job in jobs {
            if map.contains_key(&job.id) {
                return Err(ConfigError::DuplicateJob(job.id));
            }
            map.insert(job.id.clone(), job);
        }
        validate(&map)?;
        Ok(Self { storage: DEFAULT_STORAGE_URL.to_string(), jobs: map, ..Self::default() })
    }

    pub fn get_job(&self, id: &str) -> Option<&JobConfig> {
        self.jobs.get(id)
    }

    pub fn jobs(&self) -> impl Iterator<Item = &JobConfig> {
        self.jobs.values()
    }

    pub fn job_ids(&self) -> impl Iterator<Item = &JobId> {
        self.jobs.keys()
    }

    pub fn has_job(&self, id: &str) -> bool {
        self.jobs.contains_key(id)
    }

    /// Direct dependencies of `id`, in declaration order.
    pub fn get_job_deps(&self, id: &str) -> Vec<&JobId> {
        self.jobs.get(id).map(|job| job.dependencies.iter().collect()).unwrap_or_default()
    }

    /// Jobs that depend directly on `id`, in configuration order.
    pub fn get_job_revdeps(&self, id: &str) -> Vec<&JobId> {
        self.jobs.values().filter(|job| job.depends_on(id)).map(|job| &job.id).collect()
    }

    pub fn secrets(&self) -> &BTreeMap<String, String> {
        &self.secrets
    }

    pub fn with_secret(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.secrets.insert(name.into(), value.into());
        self
    }
}

fn validate(jobs: &IndexMap<JobId, JobConfig>) -> Result<(), ConfigError> {
    for job in jobs.values() {
        if let Some(dep) = job.dependencies.iter().find(|dep| !jobs.contains_key(*dep)) {
            return Err(ConfigError::UnknownDependency { job: job.id.clone(), dependency: dep.clone() });
        }
        if let Some(pinned) = job.pinned_builds.keys().find(|dep| !job.dependencies.contains(*dep)) {
            return Err(ConfigError::PinnedNotDependency {
                job: job.id.clone(),
                dependency: pinned.clone(),
            });
        }
        if let Some(target) = job.retval_refs().into_iter().find(|t| !job.dependencies.contains(*t)) {
            return Err(ConfigError::RetvalNotDependency { job: job.id.clone(), target: target.clone() });
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
