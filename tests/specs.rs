// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

//! Workspace-level specs: a config file on disk, file-backed storage, and
//! the HTTP router on top.

#[path = "specs/prelude.rs"]
mod prelude;

#[path = "specs/builds.rs"]
mod builds;
#[path = "specs/jobs.rs"]
mod jobs;
#[path = "specs/server.rs"]
mod server;
