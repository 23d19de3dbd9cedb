// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

fn record(level: LogLevel, created_ms: u64) -> LogRecord {
    LogRecord {
        build_id: BuildId(1),
        created_ms,
        level,
        target: "test".into(),
        message: "hello".into(),
    }
}

#[yare::parameterized(
    debug    = { "debug",    LogLevel::Debug },
    warn     = { "WARN",     LogLevel::Warning },
    warning  = { "warning",  LogLevel::Warning },
    critical = { "Critical", LogLevel::Critical },
)]
fn parse_levels(input: &str, expected: LogLevel) {
    assert_eq!(input.parse::<LogLevel>().unwrap(), expected);
}

#[test]
fn unknown_level_is_rejected() {
    let err = "loud".parse::<LogLevel>().unwrap_err();
    assert_eq!(err.to_string(), "unknown log level: loud");
}

#[test]
fn levels_are_ordered_by_severity() {
    assert!(LogLevel::Debug < LogLevel::Info);
    assert!(LogLevel::Error < LogLevel::Critical);
}

#[test]
fn default_policy_prunes_by_level_and_age() {
    let policy = RetentionPolicy::default();
    let prunes = |record: &LogRecord, now| policy.rules.iter().any(|rule| rule.matches(record, now));
    let now = DAY.as_millis() as u64 * 400;
    let days_ago = |d: u64| now - DAY.as_millis() as u64 * d;

    assert!(prunes(&record(LogLevel::Debug, days_ago(16)), now));
    assert!(!prunes(&record(LogLevel::Debug, days_ago(14)), now));
    assert!(!prunes(&record(LogLevel::Warning, days_ago(60)), now));
    assert!(prunes(&record(LogLevel::Warning, days_ago(91)), now));
    assert!(!prunes(&record(LogLevel::Critical, days_ago(300)), now));
    assert!(prunes(&record(LogLevel::Critical, days_ago(366)), now));
}

#[test]
fn records_from_the_future_are_kept() {
    let rule = RetentionRule { level: LogLevel::Critical, max_age: Duration::ZERO };
    assert!(!rule.matches(&record(LogLevel::Debug, 10_000), 5_000));
}
