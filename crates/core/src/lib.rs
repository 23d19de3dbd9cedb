// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! jc-core: Core data model for the jobcontrol service

pub mod macros;

pub mod args;
pub mod build;
pub mod clock;
pub mod docs;
pub mod error;
pub mod filter;
pub mod id;
pub mod job;
pub mod log;
pub mod progress;
pub mod time_fmt;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use args::{ArgValue, RETVAL_KEY};
#[cfg(any(test, feature = "test-support"))]
pub use build::BuildBuilder;
pub use build::{Build, BuildOutcome, BuildStatus, NewBuild};
pub use clock::{Clock, FakeClock, SystemClock};
pub use docs::{call_code, FunctionSignature, JobDocs};
pub use error::ErrorKind;
pub use filter::{BuildFilter, Order};
pub use id::{split_function_name, BuildId, JobId};
pub use job::{JobConfig, JobStatus};
pub use log::{LogLevel, LogRecord, RetentionPolicy, RetentionRule, UnknownLogLevel};
pub use progress::{hue_color, ProgressEntry, ProgressInfo, ProgressReport, NEUTRAL_COLOR};
pub use time_fmt::{format_duration, format_elapsed, format_elapsed_ms};
