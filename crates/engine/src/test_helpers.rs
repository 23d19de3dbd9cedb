// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for the engine crate.

use crate::context::BuildContext;
use crate::registry::{FunctionCall, FunctionRegistry, JobFailure, JobFunction};
use crate::JobControl;
use async_trait::async_trait;
use jc_config::ControlConfig;
use jc_core::{ArgValue, FakeClock, JobConfig};
use jc_storage::{MemoryStorage, Storage};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;

pub(crate) const PROGRESS: &str = "tests.steps:progress";
pub(crate) const RECORD: &str = "tests.steps:record";
pub(crate) const SHOUT: &str = "tests.steps:shout";

pub(crate) type TestControl = JobControl<FakeClock>;

/// Reports `steps` progress updates on the root group, then returns `steps`.
pub(crate) struct Progress;

#[async_trait]
impl JobFunction for Progress {
    fn doc(&self) -> &str {
        "Count to the given number of steps."
    }

    async fn call(&self, ctx: &BuildContext, call: FunctionCall) -> Result<ArgValue, JobFailure> {
        let steps = call.arg(0, "steps").and_then(ArgValue::as_i64).unwrap_or(1) as u64;
        for step in 1..=steps {
            ctx.report_progress(&[], step, Some(steps), Some(&format!("step {step}")));
        }
        Ok(ArgValue::Int(steps as i64))
    }
}

/// Records every call it receives.
#[derive(Clone, Default)]
pub(crate) struct Record {
    pub calls: Arc<Mutex<Vec<FunctionCall>>>,
}

#[async_trait]
impl JobFunction for Record {
    async fn call(&self, _ctx: &BuildContext, call: FunctionCall) -> Result<ArgValue, JobFailure> {
        self.calls.lock().push(call);
        Ok(ArgValue::Null)
    }
}

/// Upper-cases its first argument's literal.
pub(crate) struct Shout;

#[async_trait]
impl JobFunction for Shout {
    async fn call(&self, _ctx: &BuildContext, call: FunctionCall) -> Result<ArgValue, JobFailure> {
        let value = call.args.first().cloned().unwrap_or_default();
        Ok(ArgValue::Str(value.literal().to_uppercase()))
    }
}

pub(crate) struct TestContext {
    pub control: TestControl,
    pub clock: FakeClock,
    pub storage: Arc<dyn Storage>,
    pub recorder: Record,
}

impl TestContext {
    pub fn tick(&self) {
        self.clock.advance(Duration::from_secs(1));
    }
}

pub(crate) fn setup(jobs: Vec<JobConfig>) -> TestContext {
    setup_with_config(ControlConfig::from_jobs(jobs).unwrap())
}

pub(crate) fn setup_with_config(config: ControlConfig) -> TestContext {
    let clock = FakeClock::new();
    let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());
    let recorder = Record::default();
    let mut registry = FunctionRegistry::with_builtins();
    registry.register(PROGRESS, Progress);
    registry.register(RECORD, recorder.clone());
    registry.register(SHOUT, Shout);
    let control = JobControl::new(config, Arc::clone(&storage), registry, clock.clone());
    TestContext { control, clock, storage, recorder }
}

/// Build `job`, advancing the clock around it so start and end times differ.
pub(crate) async fn build(ctx: &TestContext, job: &str) -> jc_core::Build {
    ctx.tick();
    let id = ctx.control.create_build(job).unwrap().id();
    ctx.tick();
    let info = ctx.control.run_build(id).await.unwrap();
    ctx.tick();
    info.into_build()
}
