// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use jc_core::test_support::{new_build, noop_job};
use jc_core::{ArgValue, BuildStatus, JobId};
use std::time::Duration;

fn state_with_builds(job: &str, count: usize) -> StorageState {
    let mut state = StorageState::default();
    for i in 0..count {
        state.create_build(new_build(&noop_job(job, &[]), 1_000 + i as u64));
    }
    state
}

fn succeed(state: &mut StorageState, id: u64, start: u64) {
    state.start_build(BuildId(id), start).unwrap();
    state
        .finish_build(BuildId(id), BuildOutcome::Succeeded { retval: ArgValue::Null }, start + 10)
        .unwrap();
}

fn log(build: u64, level: LogLevel, created_ms: u64) -> LogRecord {
    LogRecord {
        build_id: BuildId(build),
        created_ms,
        level,
        target: "t".into(),
        message: format!("{level} at {created_ms}"),
    }
}

#[test]
fn ids_are_sequential_and_never_reused() {
    let mut state = state_with_builds("a", 2);
    assert_eq!(state.builds.keys().copied().collect::<Vec<_>>(), vec![BuildId(1), BuildId(2)]);
    state.delete_build(BuildId(2)).unwrap();
    let next = state.create_build(new_build(&noop_job("a", &[]), 5_000));
    assert_eq!(next.id, BuildId(3));
}

#[test]
fn lifecycle_transitions() {
    let mut state = state_with_builds("a", 1);
    let id = BuildId(1);
    assert_eq!(state.build(id).unwrap().status(), BuildStatus::NotStarted);

    state.start_build(id, 2_000).unwrap();
    assert_eq!(state.build(id).unwrap().status(), BuildStatus::Running);
    assert!(matches!(state.start_build(id, 2_001), Err(StorageError::AlreadyStarted(_))));

    state.report_progress(id, ProgressEntry::new(vec![], 3, Some(4))).unwrap();
    state.finish_build(id, BuildOutcome::Failed { error: "boom".into() }, 2_500).unwrap();
    assert_eq!(state.build(id).unwrap().status(), BuildStatus::Failed);
}

#[yare::parameterized(
    finish_twice   = { true },
    progress_after = { false },
)]
fn finished_builds_are_immutable(finish_again: bool) {
    let mut state = state_with_builds("a", 1);
    succeed(&mut state, 1, 2_000);
    let err = if finish_again {
        state.finish_build(BuildId(1), BuildOutcome::Skipped { reason: None }, 3_000).unwrap_err()
    } else {
        state.report_progress(BuildId(1), ProgressEntry::new(vec![], 1, Some(1))).unwrap_err()
    };
    assert!(matches!(err, StorageError::AlreadyFinished(_)));
    assert_eq!(state.build(BuildId(1)).unwrap().status(), BuildStatus::Succeeded);
}

#[test]
fn unknown_build_is_not_found() {
    let mut state = StorageState::default();
    assert!(matches!(state.build(BuildId(9)), Err(StorageError::BuildNotFound(BuildId(9)))));
    assert!(state.start_build(BuildId(9), 1).is_err());
    assert!(state.log_message(log(9, LogLevel::Info, 1)).is_err());
}

#[test]
fn job_builds_filter_order_and_limit() {
    let mut state = state_with_builds("a", 4);
    state.create_build(new_build(&noop_job("b", &[]), 9_000));
    succeed(&mut state, 2, 2_000);
    succeed(&mut state, 3, 3_000);

    let all = state.job_builds("a", &BuildFilter::default(), Order::Asc, None);
    assert_eq!(all.iter().map(|b| b.id.get()).collect::<Vec<_>>(), vec![1, 2, 3, 4]);

    let newest = state.job_builds("a", &BuildFilter::default(), Order::Desc, Some(2));
    assert_eq!(newest.iter().map(|b| b.id.get()).collect::<Vec<_>>(), vec![4, 3]);

    let filter = BuildFilter { success: Some(true), ..Default::default() };
    let ok = state.job_builds("a", &filter, Order::Desc, None);
    assert_eq!(ok.iter().map(|b| b.id.get()).collect::<Vec<_>>(), vec![3, 2]);
    assert!(ok.iter().all(|b| b.job_id == JobId::new("a")));
}

#[test]
fn latest_successful_build_uses_start_time() {
    let mut state = state_with_builds("a", 3);
    succeed(&mut state, 1, 5_000);
    succeed(&mut state, 2, 4_000);
    state.start_build(BuildId(3), 6_000).unwrap();
    state.finish_build(BuildId(3), BuildOutcome::Skipped { reason: None }, 6_001).unwrap();

    assert_eq!(state.latest_successful_build("a").map(|b| b.id), Some(BuildId(1)));
    assert!(state.latest_successful_build("b").is_none());
}

#[test]
fn deleting_a_build_drops_its_logs() {
    let mut state = state_with_builds("a", 2);
    state.log_message(log(1, LogLevel::Info, 10)).unwrap();
    state.log_message(log(2, LogLevel::Info, 10)).unwrap();
    state.delete_build(BuildId(1)).unwrap();
    assert_eq!(state.logs.len(), 1);
    assert_eq!(state.logs[0].build_id, BuildId(2));
}

#[test]
fn log_messages_sorted_and_filtered_by_level() {
    let mut state = state_with_builds("a", 1);
    state.log_message(log(1, LogLevel::Error, 30)).unwrap();
    state.log_message(log(1, LogLevel::Debug, 10)).unwrap();
    state.log_message(log(1, LogLevel::Warning, 20)).unwrap();

    let all: Vec<u64> = state.log_messages(BuildId(1), None).iter().map(|r| r.created_ms).collect();
    assert_eq!(all, vec![10, 20, 30]);
    let warn: Vec<LogLevel> =
        state.log_messages(BuildId(1), Some(LogLevel::Warning)).iter().map(|r| r.level).collect();
    assert_eq!(warn, vec![LogLevel::Warning, LogLevel::Error]);
}

#[test]
fn prune_removes_old_records_at_or_below_level() {
    let mut state = state_with_builds("a", 2);
    for level in [LogLevel::Debug, LogLevel::Info, LogLevel::Error] {
        state.log_message(log(1, level, 0)).unwrap();
        state.log_message(log(2, level, 0)).unwrap();
    }
    state.log_message(log(1, LogLevel::Debug, 9_500)).unwrap();

    let rule = RetentionRule { level: LogLevel::Info, max_age: Duration::from_secs(1) };
    let removed = state.prune_logs(Some(BuildId(1)), rule, 10_000);
    assert_eq!(removed, 2);
    assert_eq!(state.log_messages(BuildId(1), None).len(), 2);
    assert_eq!(state.log_messages(BuildId(2), None).len(), 3);

    assert_eq!(state.prune_logs(None, rule, 10_000), 2);
}
