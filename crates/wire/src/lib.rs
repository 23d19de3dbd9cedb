// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Response bodies, query parameters and text formatting shared by the
//! HTTP server and the CLI.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod format;
mod query;
mod row;
mod types;

pub use query::{BuildListQuery, DepgraphQuery, GraphFormat, LogQuery, DEFAULT_BUILD_LIMIT};
pub use row::{BuildRow, RowClass};
pub use types::{
    BuildDetail, ErrorBody, JobDetail, JobSummary, LogEntry, ProgressDto, ProgressNode,
};
