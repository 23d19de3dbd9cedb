// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! jc-config: Loading and validating the jobcontrol configuration file

mod config;
mod error;
mod parser;
pub mod template;
pub mod yaml;

pub use config::{ControlConfig, WebappConfig, DEFAULT_STORAGE_URL};
pub use error::ConfigError;
pub use template::{expand_env, interpolate_secrets};
pub use yaml::job_to_yaml;
