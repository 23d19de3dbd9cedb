// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Functions that jobs can run.
//!
//! Jobs name their function as `"module:name"`. Functions are registered
//! under that name up front; there is no dynamic loading.

use crate::context::BuildContext;
use async_trait::async_trait;
use jc_core::{split_function_name, ArgValue, FunctionSignature};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

/// Arguments for one call, with `!retval` placeholders already resolved.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FunctionCall {
    pub args: Vec<ArgValue>,
    pub kwargs: BTreeMap<String, ArgValue>,
}

impl FunctionCall {
    /// First positional argument, or the named keyword argument.
    pub fn arg(&self, position: usize, name: &str) -> Option<&ArgValue> {
        self.args.get(position).or_else(|| self.kwargs.get(name))
    }

    pub fn str_arg(&self, position: usize, name: &str) -> Option<&str> {
        self.arg(position, name).and_then(ArgValue::as_str)
    }
}

/// Why a function did not return a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobFailure {
    /// Nothing to do; the build finishes as skipped
    Skip(Option<String>),
    Failed(String),
}

impl JobFailure {
    pub fn failed(message: impl fmt::Display) -> Self {
        JobFailure::Failed(message.to_string())
    }
}

impl fmt::Display for JobFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobFailure::Skip(Some(reason)) => write!(f, "skipped: {reason}"),
            JobFailure::Skip(None) => f.write_str("skipped"),
            JobFailure::Failed(message) => f.write_str(message),
        }
    }
}

#[async_trait]
pub trait JobFunction: Send + Sync {
    /// Parameters, as shown in the job documentation.
    fn signature(&self) -> FunctionSignature {
        FunctionSignature::default()
    }

    fn doc(&self) -> &str {
        ""
    }

    async fn call(&self, ctx: &BuildContext, call: FunctionCall) -> Result<ArgValue, JobFailure>;
}

/// Lookup failure, reported in docs and as the error of a failed build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    Malformed(String),
    NotRegistered(String),
}

impl fmt::Display for LookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupError::Malformed(name) => {
                write!(f, "malformed function name {name:?}, expected \"module:name\"")
            }
            LookupError::NotRegistered(name) => write!(f, "function not registered: {name}"),
        }
    }
}

#[derive(Clone, Default)]
pub struct FunctionRegistry {
    functions: HashMap<String, Arc<dyn JobFunction>>,
}

impl FunctionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the `jobcontrol.builtins` functions.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        crate::builtins::register(&mut registry);
        registry
    }

    /// Register a function, replacing any previous one with the same name.
    pub fn register(&mut self, name: impl Into<String>, function: impl JobFunction + 'static) {
        self.functions.insert(name.into(), Arc::new(function));
    }

    pub fn get(&self, name: &str) -> Result<Arc<dyn JobFunction>, LookupError> {
        if split_function_name(name).is_none() {
            return Err(LookupError::Malformed(name.to_string()));
        }
        self.functions
            .get(name)
            .cloned()
            .ok_or_else(|| LookupError::NotRegistered(name.to_string()))
    }

    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.functions.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl fmt::Debug for FunctionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionRegistry").field("functions", &self.names()).finish()
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
