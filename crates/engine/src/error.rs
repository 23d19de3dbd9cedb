// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use crate::render::RenderError;
use jc_config::ConfigError;
use jc_core::{BuildId, ErrorKind, JobId};
use jc_storage::StorageError;
use thiserror::Error;

/// Errors from job control operations
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("job not found: {0}")]
    JobNotFound(JobId),
    #[error("job {job} has dependencies without a successful build: {}", join(.missing))]
    MissingDependencies { job: JobId, missing: Vec<JobId> },
    #[error("dependency cycle: {}", join(.0))]
    DependencyCycle(Vec<JobId>),
    #[error("job {job} is not a dependency of build {build}")]
    NotADependency { build: BuildId, job: JobId },
    #[error("cleanup of build {build} failed: {message}")]
    Cleanup { build: BuildId, message: String },
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Render(#[from] RenderError),
}

fn join(ids: &[JobId]) -> String {
    ids.iter().map(JobId::as_str).collect::<Vec<_>>().join(", ")
}

impl EngineError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            EngineError::JobNotFound(_) => ErrorKind::NotFound,
            EngineError::MissingDependencies { .. } => ErrorKind::Conflict,
            EngineError::DependencyCycle(_) | EngineError::NotADependency { .. } => {
                ErrorKind::Malformed
            }
            EngineError::Cleanup { .. } => ErrorKind::Internal,
            EngineError::Storage(e) => e.kind(),
            EngineError::Config(e) => e.kind(),
            EngineError::Render(_) => ErrorKind::Unavailable,
        }
    }
}
