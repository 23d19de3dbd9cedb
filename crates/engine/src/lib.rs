// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! jc-engine: Job control, build execution and dependency graphs

pub mod builtins;
mod context;
mod control;
pub mod depgraph;
mod error;
mod info;
pub mod registry;
pub mod render;
mod subprocess;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use context::BuildContext;
pub use control::JobControl;
pub use depgraph::{resolve_deps, DepGraph};
pub use error::EngineError;
pub use info::{BuildInfo, JobInfo};
pub use registry::{FunctionCall, FunctionRegistry, JobFailure, JobFunction};
pub use render::{placeholder_svg, DotRenderer, GraphRenderer, RenderError};
