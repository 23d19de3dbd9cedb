// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use crate::error::StorageError;
use crate::file::FileStorage;
use crate::memory::MemoryStorage;
use crate::Storage;
use std::sync::Arc;

/// Open the storage named by a URL: `memory://` or `file:///abs/path`.
pub fn open_storage(url: &str) -> Result<Arc<dyn Storage>, StorageError> {
    if url == "memory://" {
        return Ok(Arc::new(MemoryStorage::new()));
    }
    if let Some(path) = url.strip_prefix("file://") {
        if !path.starts_with('/') {
            return Err(StorageError::UnsupportedUrl(url.to_string()));
        }
        return Ok(Arc::new(FileStorage::open(path)?));
    }
    Err(StorageError::UnsupportedUrl(url.to_string()))
}

#[cfg(test)]
#[path = "url_tests.rs"]
mod tests;
