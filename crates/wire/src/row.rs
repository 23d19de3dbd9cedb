// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! One row of a build history table.

use crate::format::{format_duration, humanize_timestamp};
use jc_core::{Build, BuildId};
use serde::{Deserialize, Serialize};

/// Emphasis of a build row: `success`, `danger`, `warning` or `default`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowClass {
    Success,
    Danger,
    Warning,
    Default,
}

jc_core::simple_display! {
    RowClass {
        Success => "success",
        Danger => "danger",
        Warning => "warning",
        Default => "default",
    }
}

impl RowClass {
    /// Skipped builds are a warning whatever their success flag; unfinished
    /// builds get no emphasis.
    pub fn for_build(build: &Build) -> Self {
        if !build.finished {
            RowClass::Default
        } else if build.skipped {
            RowClass::Warning
        } else if build.success {
            RowClass::Success
        } else {
            RowClass::Danger
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BuildRow {
    pub id: BuildId,
    pub status: String,
    pub class: RowClass,
    pub started: Option<String>,
    pub ended: Option<String>,
    /// Omitted unless both timestamps are known
    pub duration: Option<String>,
}

impl BuildRow {
    pub fn new(build: &Build, now_ms: u64) -> Self {
        Self {
            id: build.id,
            status: build.descriptive_status(),
            class: RowClass::for_build(build),
            started: build.start_time_ms.map(|ms| humanize_timestamp(ms, Some(now_ms))),
            ended: build.end_time_ms.map(|ms| humanize_timestamp(ms, Some(now_ms))),
            duration: build.duration().map(format_duration),
        }
    }
}

#[cfg(test)]
#[path = "row_tests.rs"]
mod tests;
