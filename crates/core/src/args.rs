// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Argument values passed to job functions.
//!
//! Values are a JSON-like tree plus one extra leaf, [`ArgValue::Retval`],
//! which stands for "the return value of this dependency's selected build"
//! and is substituted right before the function is called.

use crate::id::JobId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Write as _;

/// JSON object key used to encode [`ArgValue::Retval`] in storage.
pub const RETVAL_KEY: &str = "$retval";

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "serde_json::Value", into = "serde_json::Value")]
pub enum ArgValue {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<ArgValue>),
    Map(BTreeMap<String, ArgValue>),
    /// Placeholder for a dependency's return value.
    Retval(JobId),
}

impl ArgValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ArgValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ArgValue::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Job ids referenced through `Retval` placeholders anywhere in the tree.
    pub fn retval_refs(&self) -> Vec<&JobId> {
        let mut out = Vec::new();
        self.collect_retvals(&mut out);
        out
    }

    fn collect_retvals<'a>(&'a self, out: &mut Vec<&'a JobId>) {
        match self {
            ArgValue::Retval(id) => out.push(id),
            ArgValue::List(items) => items.iter().for_each(|v| v.collect_retvals(out)),
            ArgValue::Map(map) => map.values().for_each(|v| v.collect_retvals(out)),
            _ => {}
        }
    }

    /// Source-like literal used when generating call-site snippets.
    pub fn literal(&self) -> String {
        let mut out = String::new();
        self.write_literal(&mut out);
        out
    }

    fn write_literal(&self, out: &mut String) {
        match self {
            ArgValue::Null => out.push_str("null"),
            ArgValue::Bool(b) => {
                let _ = write!(out, "{b}");
            }
            ArgValue::Int(n) => {
                let _ = write!(out, "{n}");
            }
            ArgValue::Float(f) => {
                let _ = write!(out, "{f:?}");
            }
            ArgValue::Str(s) => {
                let _ = write!(out, "{s:?}");
            }
            ArgValue::List(items) => {
                out.push('[');
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    item.write_literal(out);
                }
                out.push(']');
            }
            ArgValue::Map(map) => {
                out.push('{');
                for (i, (k, v)) in map.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    let _ = write!(out, "{k:?}: ");
                    v.write_literal(out);
                }
                out.push('}');
            }
            ArgValue::Retval(job) => {
                let _ = write!(out, "retval({:?})", job.as_str());
            }
        }
    }
}

impl From<serde_json::Value> for ArgValue {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;
        match value {
            Value::Null => ArgValue::Null,
            Value::Bool(b) => ArgValue::Bool(b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => ArgValue::Int(i),
                None => ArgValue::Float(n.as_f64().unwrap_or_default()),
            },
            Value::String(s) => ArgValue::Str(s),
            Value::Array(items) => ArgValue::List(items.into_iter().map(ArgValue::from).collect()),
            Value::Object(map) => {
                if map.len() == 1 {
                    if let Some(Value::String(job)) = map.get(RETVAL_KEY) {
                        return ArgValue::Retval(JobId::new(job.as_str()));
                    }
                }
                ArgValue::Map(map.into_iter().map(|(k, v)| (k, ArgValue::from(v))).collect())
            }
        }
    }
}

impl From<ArgValue> for serde_json::Value {
    fn from(value: ArgValue) -> Self {
        use serde_json::Value;
        match value {
            ArgValue::Null => Value::Null,
            ArgValue::Bool(b) => Value::Bool(b),
            ArgValue::Int(n) => Value::from(n),
            ArgValue::Float(f) => serde_json::Number::from_f64(f).map(Value::Number).unwrap_or(Value::Null),
            ArgValue::Str(s) => Value::String(s),
            ArgValue::List(items) => Value::Array(items.into_iter().map(Value::from).collect()),
            ArgValue::Map(map) => {
                Value::Object(map.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
            ArgValue::Retval(job) => {
                let mut obj = serde_json::Map::new();
                obj.insert(RETVAL_KEY.to_string(), Value::String(job.to_string()));
                Value::Object(obj)
            }
        }
    }
}

impl From<&str> for ArgValue {
    fn from(s: &str) -> Self {
        ArgValue::Str(s.to_string())
    }
}

impl From<String> for ArgValue {
    fn from(s: String) -> Self {
        ArgValue::Str(s)
    }
}

impl From<i64> for ArgValue {
    fn from(n: i64) -> Self {
        ArgValue::Int(n)
    }
}

impl From<bool> for ArgValue {
    fn from(b: bool) -> Self {
        ArgValue::Bool(b)
    }
}

#[cfg(test)]
#[path = "args_tests.rs"]
mod tests;
