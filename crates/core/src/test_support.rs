// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use crate::{ArgValue, Build, BuildId, JobConfig, JobId, NewBuild};
use std::collections::BTreeMap;

// ── Proptest strategies ─────────────────────────────────────────────────

/// Proptest strategies for build records.
pub mod strategies {
    use crate::build::{Build, BuildStatus};
    use proptest::prelude::*;

    pub fn arb_build_status() -> impl Strategy<Value = BuildStatus> {
        prop_oneof![
            Just(BuildStatus::NotStarted),
            Just(BuildStatus::Running),
            Just(BuildStatus::Succeeded),
            Just(BuildStatus::Failed),
            Just(BuildStatus::Skipped),
        ]
    }

    /// Arbitrary flag combinations; the end time, when present, never
    /// precedes the start time.
    pub fn arb_build() -> impl Strategy<Value = Build> {
        (
            any::<bool>(),
            any::<bool>(),
            any::<bool>(),
            proptest::option::of(0u64..1_000_000),
            proptest::option::of(0u64..1_000_000),
        )
            .prop_map(|(finished, success, skipped, start, span)| {
                let mut builder = Build::builder().finished(finished).success(success).skipped(skipped);
                if let Some(start) = start {
                    builder = builder.start_time_ms(start);
                }
                if let Some(span) = span {
                    builder = builder.end_time_ms(start.unwrap_or(0) + span);
                }
                builder.build()
            })
    }
}

// ── Factories ───────────────────────────────────────────────────────────────

/// A job running the built-in no-op function.
pub fn noop_job(id: &str, deps: &[&str]) -> JobConfig {
    JobConfig::new(id)
        .with_function("jobcontrol.builtins:noop")
        .with_dependencies(deps.iter().copied())
}

pub fn new_build(job: &JobConfig, created_at_ms: u64) -> NewBuild {
    NewBuild {
        job_id: job.id.clone(),
        config: job.clone(),
        config_hash: "testhash".to_string(),
        dependency_builds: BTreeMap::new(),
        created_at_ms,
    }
}

pub fn succeeded_build(id: u64, job: &str, start_ms: u64, end_ms: u64) -> Build {
    Build::builder()
        .id(BuildId(id))
        .job_id(JobId::new(job))
        .config(JobConfig::new(job))
        .start_time_ms(start_ms)
        .end_time_ms(end_ms)
        .finished(true)
        .success(true)
        .retval(ArgValue::Null)
        .build()
}
