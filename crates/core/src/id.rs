// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job and build identifiers

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use std::borrow::Borrow;
use std::fmt;
use std::ops::Deref;
use std::num::ParseIntError;
use std::str::FromStr;

/// Identifier of a configured job.
///
/// Job ids come from the configuration file and are stable across
/// restarts, so they double as the key for build history. Ordering follows
/// the string so ids can key sorted maps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(SmolStr);

impl JobId {
    pub fn new(id: impl Into<SmolStr>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for JobId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for JobId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl PartialEq<str> for JobId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for JobId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

// Lets `BTreeMap<JobId, _>` and `IndexMap<JobId, _>` be queried by `&str`
impl Borrow<str> for JobId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl Deref for JobId {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

/// Identifier of a single build.
///
/// Build ids are allocated sequentially by the storage, starting at 1,
/// so ordering by id is ordering by creation.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct BuildId(pub u64);

impl BuildId {
    pub fn get(self) -> u64 {
        self.0
    }

    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for BuildId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for BuildId {
    fn from(n: u64) -> Self {
        Self(n)
    }
}

impl FromStr for BuildId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim_start_matches('#').parse().map(Self)
    }
}

/// Split a `"module:name"` function reference into its two halves.
///
/// Returns `None` unless there is exactly one colon and both halves are
/// non-empty.
pub fn split_function_name(name: &str) -> Option<(&str, &str)> {
    let (module, function) = name.split_once(':')?;
    if module.is_empty() || function.is_empty() || function.contains(':') {
        return None;
    }
    Some((module, function))
}

#[cfg(test)]
#[path = "id_tests.rs"]
mod tests;
