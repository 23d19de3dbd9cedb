// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::builtins::{FAIL, SKIP};
use crate::test_helpers::{build, setup, setup_with_config, PROGRESS, RECORD, SHOUT};
use jc_core::test_support::noop_job;
use jc_core::{BuildStatus, ErrorKind, JobStatus, LogLevel, RetentionRule};
use std::time::Duration;

fn etl_jobs() -> Vec<JobConfig> {
    vec![
        noop_job("extract", &[]).with_kwarg("rows", 3i64),
        noop_job("load", &["extract"]).with_kwarg("input", ArgValue::Retval(JobId::new("extract"))),
    ]
}

#[test]
fn create_build_requires_successful_dependencies() {
    let ctx = setup(etl_jobs());
    let err = ctx.control.create_build("load").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conflict);
    assert!(matches!(err, EngineError::MissingDependencies { ref missing, .. } if missing == &[JobId::new("extract")]));
}

#[test]
fn create_build_of_unknown_job_is_not_found() {
    let ctx = setup(etl_jobs());
    assert_eq!(ctx.control.create_build("nope").unwrap_err().kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn retvals_of_dependencies_are_substituted() {
    let ctx = setup(etl_jobs());
    let extract = build(&ctx, "extract").await;
    let load = build(&ctx, "load").await;

    assert_eq!(load.status(), BuildStatus::Succeeded);
    assert_eq!(load.dependency_builds.get("extract"), Some(&extract.id));
    let mut expected = BTreeMap::new();
    expected.insert("input".to_string(), extract.retval.clone().unwrap());
    assert_eq!(load.retval, Some(ArgValue::Map(expected)));
}

#[tokio::test]
async fn created_build_freezes_config_and_hash() {
    let ctx = setup(etl_jobs());
    let created = ctx.control.create_build("extract").unwrap();
    let build = created.build();
    assert_eq!(build.config, *ctx.control.config().get_job("extract").unwrap());
    assert_eq!(build.config_hash, config_hash(&build.config));
    assert_eq!(build.config_hash.len(), 64);
    assert_eq!(build.created_at_ms, 1_000_000);
    assert_eq!(build.status(), BuildStatus::NotStarted);
}

#[test]
fn config_hash_tracks_changes() {
    let job = noop_job("extract", &[]);
    assert_eq!(config_hash(&job), config_hash(&job.clone()));
    assert_ne!(config_hash(&job), config_hash(&job.clone().with_kwarg("rows", 1i64)));
}

#[tokio::test]
async fn pinned_build_wins_over_latest() {
    let mut jobs = etl_jobs();
    jobs[1].pinned_builds.insert(JobId::new("extract"), BuildId(1));
    let ctx = setup(jobs);
    let first = build(&ctx, "extract").await;
    build(&ctx, "extract").await;

    let load = ctx.control.create_build("load").unwrap();
    assert_eq!(load.build().dependency_builds.get("extract"), Some(&first.id));
}

#[tokio::test]
async fn unsuccessful_pinned_build_blocks_creation() {
    let mut jobs = etl_jobs();
    jobs[0] = JobConfig::new("extract").with_function(FAIL);
    jobs[1].pinned_builds.insert(JobId::new("extract"), BuildId(1));
    let ctx = setup(jobs);
    build(&ctx, "extract").await;
    let err = ctx.control.create_build("load").unwrap_err();
    assert!(matches!(err, EngineError::MissingDependencies { .. }));
}

#[tokio::test]
async fn failing_function_finishes_build_as_failed() {
    let ctx = setup(vec![JobConfig::new("broken").with_function(FAIL).with_args(vec!["boom".into()])]);
    let failed = build(&ctx, "broken").await;
    assert_eq!(failed.status(), BuildStatus::Failed);
    assert_eq!(failed.exception.as_deref(), Some("boom"));
    assert!(failed.retval.is_none());

    let errors = ctx.storage.iter_log_messages(failed.id, Some(LogLevel::Error)).unwrap();
    assert_eq!(errors[0].message, "build failed: boom");
}

#[tokio::test]
async fn skipping_function_finishes_build_as_skipped() {
    let ctx = setup(vec![JobConfig::new("idle").with_function(SKIP).with_kwarg("reason", "nothing new")]);
    let skipped = build(&ctx, "idle").await;
    assert_eq!(skipped.status(), BuildStatus::Skipped);
    assert!(skipped.finished);
    assert_eq!(skipped.exception.as_deref(), Some("nothing new"));
}

#[yare::parameterized(
    unregistered = { Some("etl.steps:missing"), "function not registered: etl.steps:missing" },
    no_function  = { None,                      "job has no function configured" },
)]
fn unresolvable_function_fails_the_build(function: Option<&str>, error: &str) {
    let mut job = JobConfig::new("ghost");
    job.function = function.map(str::to_string);
    let ctx = setup(vec![job]);
    let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap();
    let failed = runtime.block_on(build(&ctx, "ghost"));
    assert_eq!(failed.status(), BuildStatus::Failed);
    assert_eq!(failed.exception.as_deref(), Some(error));
}

#[tokio::test]
async fn running_a_build_twice_is_a_conflict() {
    let ctx = setup(etl_jobs());
    let done = build(&ctx, "extract").await;
    let err = ctx.control.run_build(done.id).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conflict);
}

#[tokio::test]
async fn secrets_are_interpolated_into_arguments_only_at_run_time() {
    let config = ControlConfig::from_jobs([noop_job("deploy", &[]).with_kwarg("token", "Bearer ${secret.API_TOKEN}")])
        .unwrap()
        .with_secret("API_TOKEN", "s3cr3t");
    let ctx = setup_with_config(config);
    let deployed = build(&ctx, "deploy").await;

    assert_eq!(deployed.config.kwargs["token"], ArgValue::from("Bearer ${secret.API_TOKEN}"));
    let ArgValue::Map(retval) = deployed.retval.unwrap() else { panic!("expected a map") };
    assert_eq!(retval["token"], ArgValue::from("Bearer s3cr3t"));
}

#[tokio::test]
async fn progress_reported_during_run_is_stored() {
    let ctx = setup(vec![JobConfig::new("count").with_function(PROGRESS).with_args(vec![4i64.into()])]);
    let counted = build(&ctx, "count").await;
    let info = ctx.control.get_build(counted.id).unwrap().get_progress_info();
    assert_eq!((info.current, info.total), (4, Some(4)));
    assert!(!info.in_progress);
}

#[tokio::test]
async fn delete_with_cleanup_calls_cleanup_function_with_the_record() {
    let mut job = noop_job("tmp", &[]);
    job.cleanup_function = Some(RECORD.to_string());
    let ctx = setup(vec![job]);
    let done = build(&ctx, "tmp").await;

    ctx.control.delete_build(done.id, true).await.unwrap();
    assert_eq!(ctx.control.get_build(done.id).unwrap_err().kind(), ErrorKind::NotFound);

    let calls = ctx.recorder.calls.lock();
    assert_eq!(calls.len(), 1);
    let ArgValue::Map(record) = &calls[0].args[0] else { panic!("expected a map") };
    assert_eq!(record["id"], ArgValue::Int(done.id.get() as i64));
    assert_eq!(record["job_id"], ArgValue::from("tmp"));
}

#[tokio::test]
async fn delete_without_cleanup_skips_cleanup_function() {
    let mut job = noop_job("tmp", &[]);
    job.cleanup_function = Some(RECORD.to_string());
    let ctx = setup(vec![job]);
    let done = build(&ctx, "tmp").await;
    ctx.control.delete_build(done.id, false).await.unwrap();
    assert!(ctx.recorder.calls.lock().is_empty());
}

#[tokio::test]
async fn failing_cleanup_still_deletes_the_build() {
    let mut job = noop_job("tmp", &[]);
    job.cleanup_function = Some(FAIL.to_string());
    let ctx = setup(vec![job]);
    let done = build(&ctx, "tmp").await;

    let err = ctx.control.delete_build(done.id, true).await.unwrap_err();
    assert!(matches!(err, EngineError::Cleanup { .. }));
    assert!(ctx.control.get_build(done.id).is_err());
}

#[tokio::test]
async fn prune_logs_applies_every_rule() {
    let ctx = setup(vec![JobConfig::new("broken").with_function(FAIL)]);
    let failed = build(&ctx, "broken").await;
    let context = ctx.control.context_for(&failed);
    context.log(LogLevel::Debug, "noise");

    ctx.clock.advance(Duration::from_secs(20 * 24 * 3600));
    assert_eq!(ctx.control.prune_logs(&RetentionPolicy::default()).unwrap(), 1);
    let left = ctx.storage.iter_log_messages(failed.id, None).unwrap();
    assert!(left.iter().all(|r| r.level == LogLevel::Error));

    let policy = RetentionPolicy { rules: vec![RetentionRule { level: LogLevel::Critical, max_age: Duration::ZERO }] };
    assert_eq!(ctx.control.prune_logs(&policy).unwrap(), left.len());
}

#[test]
fn docs_describe_registered_function() {
    let ctx = setup(etl_jobs());
    let docs = ctx.control.job_docs(ctx.control.config().get_job("extract").unwrap());
    assert!(!docs.is_sentinel());
    assert_eq!(docs.function_module, "jobcontrol.builtins");
    assert_eq!(docs.function_name, "noop");
    assert_eq!(docs.function_argspec, "(*args, **kwargs)");
    assert_eq!(docs.call_code, "use jobcontrol::builtins::noop;\n\nnoop(rows = 3)");
}

#[yare::parameterized(
    unregistered = { Some("etl.steps:missing") },
    malformed    = { Some("missing") },
    no_function  = { None },
)]
fn docs_degrade_to_sentinel(function: Option<&str>) {
    let mut job = JobConfig::new("ghost");
    job.function = function.map(str::to_string);
    let ctx = setup(vec![job.clone()]);
    let docs = ctx.control.job_docs(&job);
    assert!(docs.is_sentinel());
    assert!(docs.function_doc.starts_with("Error: "));
}

#[tokio::test]
async fn retval_is_rendered_through_repr_function() {
    let mut job = noop_job("extract", &[]).with_kwarg("rows", 3i64);
    let plain = build(&setup(vec![job.clone()]), "extract").await;
    let ctx = setup(vec![]);
    assert_eq!(ctx.control.render_retval(&plain).await.as_deref(), Some("{\"rows\": 3}"));

    job.repr_function = Some(SHOUT.to_string());
    let ctx = setup(vec![job]);
    let shouted = build(&ctx, "extract").await;
    assert_eq!(ctx.control.render_retval(&shouted).await.as_deref(), Some("{\"ROWS\": 3}"));
}

#[tokio::test]
async fn depgraph_dot_colors_nodes_by_status() {
    let ctx = setup(etl_jobs());
    build(&ctx, "extract").await;
    let graph = ctx.control.job_depgraph("load", false).unwrap();
    let dot = ctx.control.depgraph_dot(&graph, Some("load")).unwrap();
    assert!(dot.contains("\"extract\" [label=\"extract\", fillcolor=\"#dff0d8\"]"), "{dot}");
    assert!(dot.contains("\"extract\" -> \"load\""));
    assert_eq!(ctx.control.get_job("load").unwrap().get_status().unwrap(), JobStatus::NotBuilt);
}

#[test]
fn depgraph_of_unknown_job_is_not_found() {
    let ctx = setup(etl_jobs());
    assert_eq!(ctx.control.job_depgraph("nope", true).unwrap_err().kind(), ErrorKind::NotFound);
}

#[test]
fn iter_jobs_follows_configuration_order() {
    let ctx = setup(etl_jobs());
    let ids: Vec<&str> = ctx.control.iter_jobs().map(|j| j.id().as_str()).collect();
    assert_eq!(ids, vec!["extract", "load"]);
}
