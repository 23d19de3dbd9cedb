// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-build log records and their retention policy.

use crate::id::BuildId;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;

const DAY: Duration = Duration::from_secs(24 * 60 * 60);

/// Severity of a build log record, ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
    Critical,
}

crate::simple_display! {
    LogLevel {
        Debug => "debug",
        Info => "info",
        Warning => "warning",
        Error => "error",
        Critical => "critical",
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown log level: {0}")]
pub struct UnknownLogLevel(pub String);

impl FromStr for LogLevel {
    type Err = UnknownLogLevel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warning),
            "error" => Ok(LogLevel::Error),
            "critical" | "fatal" => Ok(LogLevel::Critical),
            _ => Err(UnknownLogLevel(s.to_string())),
        }
    }
}

/// One log line emitted while a build was running.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogRecord {
    pub build_id: BuildId,
    pub created_ms: u64,
    pub level: LogLevel,
    /// Logger name, e.g. the function being run
    #[serde(default)]
    pub target: String,
    pub message: String,
}

impl LogRecord {
    pub fn age(&self, now_ms: u64) -> Duration {
        Duration::from_millis(now_ms.saturating_sub(self.created_ms))
    }
}

/// Records at or below `level` and older than `max_age` are pruned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetentionRule {
    pub level: LogLevel,
    pub max_age: Duration,
}

impl RetentionRule {
    pub fn matches(&self, record: &LogRecord, now_ms: u64) -> bool {
        record.level <= self.level && record.age(now_ms) > self.max_age
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetentionPolicy {
    pub rules: Vec<RetentionRule>,
}

impl Default for RetentionPolicy {
    /// Debug 15 days, info a month, warning 3 months, error 6 months,
    /// anything a year.
    fn default() -> Self {
        let rule = |level, days: u32| RetentionRule { level, max_age: DAY * days };
        Self {
            rules: vec![
                rule(LogLevel::Debug, 15),
                rule(LogLevel::Info, 30),
                rule(LogLevel::Warning, 90),
                rule(LogLevel::Error, 180),
                rule(LogLevel::Critical, 365),
            ],
        }
    }
}

#[cfg(test)]
#[path = "log_tests.rs"]
mod tests;
