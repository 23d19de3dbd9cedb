// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Documentation bundle shown for a job: what function it runs and how.

use crate::args::ArgValue;
use crate::id::split_function_name;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Placeholder for module and function names that could not be resolved.
pub const UNKNOWN: &str = "???";

const MAX_CALL_WIDTH: usize = 79;

/// Parameters a registered function accepts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FunctionSignature {
    #[serde(default)]
    pub required: Vec<String>,
    /// Parameters with their default values
    #[serde(default)]
    pub optional: Vec<(String, ArgValue)>,
    /// Name collecting extra positional arguments
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub varargs: Option<String>,
    /// Name collecting extra keyword arguments
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kwargs: Option<String>,
}

impl FunctionSignature {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_required(mut self, name: impl Into<String>) -> Self {
        self.required.push(name.into());
        self
    }

    pub fn with_optional(mut self, name: impl Into<String>, default: impl Into<ArgValue>) -> Self {
        self.optional.push((name.into(), default.into()));
        self
    }

    pub fn with_varargs(mut self, name: impl Into<String>) -> Self {
        self.varargs = Some(name.into());
        self
    }

    pub fn with_kwargs(mut self, name: impl Into<String>) -> Self {
        self.kwargs = Some(name.into());
        self
    }

    /// Human-readable parameter list, e.g. `(path, limit = 10, *rest, **options)`.
    pub fn argspec_human(&self) -> String {
        let parts: Vec<String> = self
            .required
            .iter()
            .cloned()
            .chain(self.optional.iter().map(|(name, default)| format!("{name} = {}", default.literal())))
            .chain(self.varargs.iter().map(|name| format!("*{name}")))
            .chain(self.kwargs.iter().map(|name| format!("**{name}")))
            .collect();
        format!("({})", parts.join(", "))
    }
}

/// Everything a job page shows about the function behind a job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobDocs {
    pub call_code: String,
    pub function_module: String,
    pub function_name: String,
    pub function_doc: String,
    pub function_argspec: String,
}

impl JobDocs {
    /// Docs standing in for a function that could not be inspected.
    pub fn sentinel(reason: impl fmt::Display) -> Self {
        Self {
            call_code: String::new(),
            function_module: UNKNOWN.to_string(),
            function_name: UNKNOWN.to_string(),
            function_doc: format!("Error: {reason}"),
            function_argspec: String::new(),
        }
    }

    pub fn is_sentinel(&self) -> bool {
        self.function_module == UNKNOWN
    }
}

/// Snippet showing how a job calls its function.
///
/// Returns `None` when `function` is not a `module:name` reference. Keyword
/// arguments are listed in key order; the call is split one argument per
/// line when it does not fit on a single line.
pub fn call_code(
    function: &str,
    args: &[ArgValue],
    kwargs: &BTreeMap<String, ArgValue>,
) -> Option<String> {
    let (module, name) = split_function_name(function)?;
    let module_path = module.replace('.', "::");

    let rendered: Vec<String> = args
        .iter()
        .map(ArgValue::literal)
        .chain(kwargs.iter().map(|(key, value)| format!("{key} = {}", value.literal())))
        .collect();

    let one_line = format!("{name}({})", rendered.join(", "));
    let call = if one_line.len() <= MAX_CALL_WIDTH {
        one_line
    } else {
        let mut call = format!("{name}(\n");
        for arg in &rendered {
            call.push_str("    ");
            call.push_str(arg);
            call.push_str(",\n");
        }
        call.push(')');
        call
    };
    Some(format!("use {module_path}::{name};\n\n{call}"))
}

#[cfg(test)]
#[path = "docs_tests.rs"]
mod tests;
