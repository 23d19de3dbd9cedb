// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use jc_core::{ErrorKind, JobId};
use std::path::PathBuf;
use thiserror::Error;

/// Errors from loading, validating or serializing configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("job #{index} has no id")]
    MissingJobId { index: usize },
    #[error("duplicate job id: {0}")]
    DuplicateJob(JobId),
    #[error("job {job}: unknown dependency {dependency}")]
    UnknownDependency { job: JobId, dependency: JobId },
    #[error("job {job}: pinned build for {dependency}, which is not a dependency")]
    PinnedNotDependency { job: JobId, dependency: JobId },
    #[error("job {job}: !retval {target} does not name a dependency")]
    RetvalNotDependency { job: JobId, target: JobId },
    #[error("job {job}: {message}")]
    InvalidValue { job: JobId, message: String },
}

impl ConfigError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ConfigError::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound => {
                ErrorKind::NotFound
            }
            ConfigError::Io { .. } => ErrorKind::Internal,
            _ => ErrorKind::Malformed,
        }
    }
}
