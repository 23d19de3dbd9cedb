// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Raw YAML document shape and conversion into core types

use crate::config::WebappConfig;
use crate::error::ConfigError;
use jc_core::{ArgValue, BuildId, JobConfig, JobId};
use serde::Deserialize;
use serde_yaml::Value;
use std::collections::BTreeMap;

/// YAML tag marking a dependency's return value.
pub(crate) const RETVAL_TAG: &str = "retval";

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct RawConfig {
    #[serde(default)]
    pub storage: Option<String>,
    #[serde(default)]
    pub webapp: Option<WebappConfig>,
    #[serde(default)]
    pub jobs: Vec<RawJob>,
    #[serde(default)]
    pub secret: BTreeMap<String, String>,
    /// Task queue settings of older deployments; accepted and ignored
    #[serde(default)]
    pub celery: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct RawJob {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub function: Option<String>,
    #[serde(default)]
    pub args: Vec<Value>,
    #[serde(default)]
    pub kwargs: BTreeMap<String, Value>,
    #[serde(default)]
    pub dependencies: Vec<String>,
    #[serde(default)]
    pub pinned_builds: BTreeMap<String, u64>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub protected: bool,
    #[serde(default)]
    pub cleanup_function: Option<String>,
    #[serde(default)]
    pub repr_function: Option<String>,
}

impl RawJob {
    pub fn into_job(self, index: usize) -> Result<JobConfig, ConfigError> {
        let id = match self.id {
            Some(id) if !id.trim().is_empty() => JobId::new(id),
            _ => return Err(ConfigError::MissingJobId { index }),
        };
        let convert = |value: Value| {
            yaml_to_arg(value).map_err(|message| ConfigError::InvalidValue { job: id.clone(), message })
        };
        let args = self.args.into_iter().map(convert).collect::<Result<Vec<_>, _>>()?;
        let kwargs = self
            .kwargs
            .into_iter()
            .map(|(k, v)| convert(v).map(|v| (k, v)))
            .collect::<Result<BTreeMap<_, _>, _>>()?;

        Ok(JobConfig {
            function: self.function,
            args,
            kwargs,
            dependencies: self.dependencies.into_iter().map(JobId::new).collect(),
            pinned_builds: self
                .pinned_builds
                .into_iter()
                .map(|(job, build)| (JobId::new(job), BuildId(build)))
                .collect(),
            title: self.title,
            notes: self.notes,
            protected: self.protected,
            cleanup_function: self.cleanup_function,
            repr_function: self.repr_function,
            id,
        })
    }
}

/// Convert a YAML value into an argument, resolving `!retval` tags.
pub(crate) fn yaml_to_arg(value: Value) -> Result<ArgValue, String> {
    Ok(match value {
        Value::Null => ArgValue::Null,
        Value::Bool(b) => ArgValue::Bool(b),
        Value::Number(n) => match n.as_i64() {
            Some(i) => ArgValue::Int(i),
            None => ArgValue::Float(n.as_f64().unwrap_or_default()),
        },
        Value::String(s) => ArgValue::Str(s),
        Value::Sequence(items) => {
            ArgValue::List(items.into_iter().map(yaml_to_arg).collect::<Result<_, _>>()?)
        }
        Value::Mapping(map) => {
            let mut out = BTreeMap::new();
            for (key, value) in map {
                out.insert(scalar_key(key)?, yaml_to_arg(value)?);
            }
            ArgValue::Map(out)
        }
        Value::Tagged(tagged) => {
            if tagged.tag != RETVAL_TAG {
                return Err(format!("unsupported tag {}", tagged.tag));
            }
            match tagged.value {
                Value::String(job) if !job.is_empty() => ArgValue::Retval(JobId::new(job)),
                _ => return Err("!retval expects a job id".to_string()),
            }
        }
    })
}

fn scalar_key(key: Value) -> Result<String, String> {
    match key {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(format!("mapping keys must be scalars, got {other:?}")),
    }
}

#[cfg(test)]
#[path = "parser_tests.rs"]
mod tests;
