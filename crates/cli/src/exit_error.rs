// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Custom error type that carries a process exit code.
//!
//! Commands return `ExitError` instead of calling `std::process::exit()`
//! directly, allowing `main()` to handle process termination.

use jc_core::ErrorKind;
use jc_engine::EngineError;
use std::fmt;

/// Exit codes by error category
pub mod codes {
    /// Generic failure, including a build that ran and failed
    pub const FAILURE: i32 = 1;
    pub const NOT_FOUND: i32 = 2;
    pub const CONFLICT: i32 = 3;
    pub const MALFORMED: i32 = 4;
    pub const UNAVAILABLE: i32 = 5;
}

#[derive(Debug)]
pub struct ExitError {
    pub code: i32,
    pub message: String,
}

impl ExitError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self { code, message: message.into() }
    }
}

pub fn code_for(kind: ErrorKind) -> i32 {
    match kind {
        ErrorKind::NotFound => codes::NOT_FOUND,
        ErrorKind::Conflict => codes::CONFLICT,
        ErrorKind::Malformed => codes::MALFORMED,
        ErrorKind::Unavailable => codes::UNAVAILABLE,
        ErrorKind::Internal => codes::FAILURE,
    }
}

impl From<EngineError> for ExitError {
    fn from(e: EngineError) -> Self {
        Self::new(code_for(e.kind()), e.to_string())
    }
}

impl fmt::Display for ExitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ExitError {}

#[cfg(test)]
#[path = "exit_error_tests.rs"]
mod tests;
