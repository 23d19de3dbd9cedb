// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Deterministic YAML rendering of a job configuration.

use crate::error::ConfigError;
use crate::parser::RETVAL_TAG;
use jc_core::{ArgValue, JobConfig};
use serde_yaml::value::{Tag, TaggedValue};
use serde_yaml::{Mapping, Value};

/// Render a job configuration as YAML with keys in sorted order.
///
/// `!retval` placeholders are written back as tags, so the output parses
/// into the same job again.
pub fn job_to_yaml(job: &JobConfig) -> Result<String, ConfigError> {
    let mut entries: Vec<(&str, Value)> = vec![
        ("id", Value::String(job.id.to_string())),
        ("args", Value::Sequence(job.args.iter().map(arg_to_yaml).collect())),
        (
            "kwargs",
            Value::Mapping(
                job.kwargs.iter().map(|(k, v)| (Value::String(k.clone()), arg_to_yaml(v))).collect(),
            ),
        ),
        (
            "dependencies",
            Value::Sequence(job.dependencies.iter().map(|d| Value::String(d.to_string())).collect()),
        ),
        ("protected", Value::Bool(job.protected)),
    ];
    let optional = [
        ("function", &job.function),
        ("title", &job.title),
        ("notes", &job.notes),
        ("cleanup_function", &job.cleanup_function),
        ("repr_function", &job.repr_function),
    ];
    for (key, value) in optional {
        if let Some(value) = value {
            entries.push((key, Value::String(value.clone())));
        }
    }
    if !job.pinned_builds.is_empty() {
        let pinned: Mapping = job
            .pinned_builds
            .iter()
            .map(|(dep, build)| (Value::String(dep.to_string()), Value::Number(build.get().into())))
            .collect();
        entries.push(("pinned_builds", Value::Mapping(pinned)));
    }
    entries.sort_by(|a, b| a.0.cmp(b.0));

    let doc: Mapping = entries.into_iter().map(|(k, v)| (Value::String(k.to_string()), v)).collect();
    serde_yaml::to_string(&Value::Mapping(doc)).map_err(ConfigError::from)
}

fn arg_to_yaml(value: &ArgValue) -> Value {
    match value {
        ArgValue::Null => Value::Null,
        ArgValue::Bool(b) => Value::Bool(*b),
        ArgValue::Int(n) => Value::Number((*n).into()),
        ArgValue::Float(f) => Value::Number((*f).into()),
        ArgValue::Str(s) => Value::String(s.clone()),
        ArgValue::List(items) => Value::Sequence(items.iter().map(arg_to_yaml).collect()),
        ArgValue::Map(map) => Value::Mapping(
            map.iter().map(|(k, v)| (Value::String(k.clone()), arg_to_yaml(v))).collect(),
        ),
        ArgValue::Retval(job) => Value::Tagged(Box::new(TaggedValue {
            tag: Tag::new(RETVAL_TAG),
            value: Value::String(job.to_string()),
        })),
    }
}

#[cfg(test)]
#[path = "yaml_tests.rs"]
mod tests;
