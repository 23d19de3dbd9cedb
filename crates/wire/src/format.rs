// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pure text formatting helpers.
//!
//! Every helper takes the values it formats explicitly, including "now",
//! so output never depends on ambient state.

use chrono::{DateTime, SecondsFormat, Utc};
use jc_core::{ArgValue, JobId, ProgressInfo};
use std::fmt::Write as _;

pub use jc_core::{format_duration, format_elapsed, format_elapsed_ms};

const ELLIPSIS: &str = "...";

fn datetime(ms: u64) -> Option<DateTime<Utc>> {
    i64::try_from(ms).ok().and_then(DateTime::from_timestamp_millis)
}

/// RFC 3339 timestamp in UTC, with millisecond precision.
pub fn rfc3339(ms: u64) -> String {
    datetime(ms)
        .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true))
        .unwrap_or_else(|| ms.to_string())
}

/// `2026-10-19 12:00:00 UTC`, followed by the distance to `now_ms` when
/// given: `(5m ago)` or `(in 5m)`.
pub fn humanize_timestamp(ms: u64, now_ms: Option<u64>) -> String {
    let Some(dt) = datetime(ms) else {
        return ms.to_string();
    };
    let absolute = dt.format("%Y-%m-%d %H:%M:%S UTC").to_string();
    match now_ms {
        Some(now) if now >= ms => format!("{absolute} ({} ago)", format_elapsed_ms(now - ms)),
        Some(now) => format!("{absolute} (in {})", format_elapsed_ms(ms - now)),
        None => absolute,
    }
}

/// Cut `s` to at most `maxlen` characters, ending in `...` when cut and
/// there is room for it.
pub fn trim_string(s: &str, maxlen: usize) -> String {
    if s.chars().count() <= maxlen {
        return s.to_string();
    }
    if maxlen < ELLIPSIS.len() {
        return s.chars().take(maxlen).collect();
    }
    let keep = maxlen.saturating_sub(ELLIPSIS.len());
    let mut out: String = s.chars().take(keep).collect();
    out.push_str(ELLIPSIS);
    out
}

/// Literal of `value` limited to `maxlen` characters, cut in the middle.
pub fn short_repr(value: &ArgValue, maxlen: usize) -> String {
    let literal = value.literal();
    let chars: Vec<char> = literal.chars().collect();
    if chars.len() <= maxlen {
        return literal;
    }
    if maxlen < ELLIPSIS.len() {
        return chars[..maxlen].iter().collect();
    }
    let cut = maxlen.saturating_sub(ELLIPSIS.len());
    let head = cut.div_ceil(2);
    let tail = cut / 2;
    let mut out: String = chars[..head].iter().collect();
    out.push_str(ELLIPSIS);
    out.extend(&chars[chars.len() - tail..]);
    out
}

/// Indented JSON rendering of a value.
pub fn pprint(value: &ArgValue) -> String {
    let json = serde_json::Value::from(value.clone());
    serde_json::to_string_pretty(&json).unwrap_or_else(|_| value.literal())
}

/// Source listing with right-aligned line numbers.
pub fn highlight(code: &str) -> String {
    let lines: Vec<&str> = code.lines().collect();
    let width = lines.len().to_string().len();
    let mut out = String::new();
    for (n, line) in lines.iter().enumerate() {
        let _ = writeln!(out, "{:>width$} | {line}", n + 1);
    }
    out
}

/// Text progress bar: `[#####-----] 5/10 (50%)`, or `[?????] 7/?` when
/// indeterminate.
pub fn progress_bar(info: &ProgressInfo, width: usize) -> String {
    match info.total {
        Some(total) => {
            let (current, whole) = (u128::from(info.current), u128::from(total.max(1)));
            let filled = (current * width as u128 / whole).min(width as u128) as usize;
            let percent = current * 100 / whole;
            format!(
                "[{}{}] {}/{} ({percent}%)",
                "#".repeat(filled),
                "-".repeat(width - filled),
                info.current,
                total
            )
        }
        None => format!("[{}] {}/?", "?".repeat(width), info.current),
    }
}

/// Comma-separated job ids, `-` for none.
pub fn jobs_list(jobs: &[JobId]) -> String {
    if jobs.is_empty() {
        return "-".to_string();
    }
    jobs.iter().map(JobId::as_str).collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
#[path = "format_tests.rs"]
mod tests;
