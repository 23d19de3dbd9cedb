// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Build listing filters.

use crate::build::Build;
use serde::{Deserialize, Serialize};

/// Optional, independently combinable criteria for listing builds.
///
/// Every field left as `None` matches everything; the provided fields are
/// combined with logical AND. Time ranges use an inclusive lower bound and
/// an exclusive upper bound, and never match a build missing that
/// timestamp.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildFilter {
    pub started: Option<bool>,
    pub finished: Option<bool>,
    pub success: Option<bool>,
    pub skipped: Option<bool>,
    pub started_after: Option<u64>,
    pub started_before: Option<u64>,
    pub ended_after: Option<u64>,
    pub ended_before: Option<u64>,
}

impl BuildFilter {
    pub fn is_empty(&self) -> bool {
        *self == BuildFilter::default()
    }

    pub fn matches(&self, build: &Build) -> bool {
        flag_matches(self.started, build.started())
            && flag_matches(self.finished, build.finished)
            && flag_matches(self.success, build.success)
            && flag_matches(self.skipped, build.skipped)
            && in_range(build.start_time_ms, self.started_after, self.started_before)
            && in_range(build.end_time_ms, self.ended_after, self.ended_before)
    }
}

fn flag_matches(wanted: Option<bool>, actual: bool) -> bool {
    wanted.is_none_or(|w| w == actual)
}

fn in_range(value: Option<u64>, after: Option<u64>, before: Option<u64>) -> bool {
    if after.is_none() && before.is_none() {
        return true;
    }
    let Some(value) = value else {
        return false;
    };
    after.is_none_or(|a| value >= a) && before.is_none_or(|b| value < b)
}

/// Sort order of a build listing, by build id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Order {
    #[default]
    Asc,
    Desc,
}

crate::simple_display! {
    Order {
        Asc => "asc",
        Desc => "desc",
    }
}

#[cfg(test)]
#[path = "filter_tests.rs"]
mod tests;
