// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use crate::snapshot::SnapshotError;
use jc_core::{BuildId, ErrorKind};
use thiserror::Error;

/// Errors from storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("build not found: {0}")]
    BuildNotFound(BuildId),
    #[error("build {0} has already started")]
    AlreadyStarted(BuildId),
    #[error("build {0} has already finished")]
    AlreadyFinished(BuildId),
    #[error("unsupported storage url: {0}")]
    UnsupportedUrl(String),
    #[error("snapshot error: {0}")]
    Snapshot(#[from] SnapshotError),
}

impl StorageError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            StorageError::BuildNotFound(_) => ErrorKind::NotFound,
            StorageError::AlreadyStarted(_) | StorageError::AlreadyFinished(_) => ErrorKind::Conflict,
            StorageError::UnsupportedUrl(_) => ErrorKind::Malformed,
            StorageError::Snapshot(_) => ErrorKind::Internal,
        }
    }
}
