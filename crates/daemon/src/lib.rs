// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! jobcontrol server library
//!
//! Serves read-only JSON views over jobs and builds; exposed as a library
//! so the router can be mounted in tests and by the CLI's `serve` command.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod env;
pub mod http;
pub mod lifecycle;
pub mod logging;

pub use http::{router, ApiError, AppState};
pub use lifecycle::{serve, startup, Config, LifecycleError};
