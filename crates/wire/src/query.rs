// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Query-string parameters of the HTTP routes.

use jc_core::{BuildFilter, LogLevel, Order};
use serde::{Deserialize, Deserializer, Serialize};

/// Builds listed when no `limit` is given.
pub const DEFAULT_BUILD_LIMIT: usize = 50;

/// `GET /jobs/{id}/builds` parameters.
///
/// Flags are tri-state: `true`/`false` filter, absent or `any` does not.
/// Every given filter must match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildListQuery {
    #[serde(default, deserialize_with = "tri_state", skip_serializing_if = "Option::is_none")]
    pub started: Option<bool>,
    #[serde(default, deserialize_with = "tri_state", skip_serializing_if = "Option::is_none")]
    pub finished: Option<bool>,
    #[serde(default, deserialize_with = "tri_state", skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    #[serde(default, deserialize_with = "tri_state", skip_serializing_if = "Option::is_none")]
    pub skipped: Option<bool>,
    /// Epoch ms, inclusive
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_after: Option<u64>,
    /// Epoch ms, exclusive
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_before: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ended_after: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ended_before: Option<u64>,
    /// Newest first unless given
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<Order>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
}

impl BuildListQuery {
    pub fn filter(&self) -> BuildFilter {
        BuildFilter {
            started: self.started,
            finished: self.finished,
            success: self.success,
            skipped: self.skipped,
            started_after: self.started_after,
            started_before: self.started_before,
            ended_after: self.ended_after,
            ended_before: self.ended_before,
        }
    }

    pub fn order(&self) -> Order {
        self.order.unwrap_or(Order::Desc)
    }

    pub fn limit(&self) -> usize {
        self.limit.unwrap_or(DEFAULT_BUILD_LIMIT)
    }
}

/// Accepts booleans as well as their query-string spellings.
fn tri_state<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<bool>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Bool(bool),
        Text(String),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Raw::Bool(b)) => Ok(Some(b)),
        Some(Raw::Text(text)) => match text.to_ascii_lowercase().as_str() {
            "" | "any" | "all" => Ok(None),
            "true" | "1" | "yes" | "y" => Ok(Some(true)),
            "false" | "0" | "no" | "n" => Ok(Some(false)),
            other => Err(serde::de::Error::custom(format!(
                "expected true, false or any, got {other:?}"
            ))),
        },
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GraphFormat {
    #[default]
    Svg,
    Dot,
}

/// `GET /jobs/{id}/depgraph` parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepgraphQuery {
    #[serde(default)]
    pub fmt: GraphFormat,
    /// Also include the jobs depending on this one
    #[serde(default, deserialize_with = "tri_state")]
    pub complete: Option<bool>,
}

/// `GET /builds/{id}/logs` parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<LogLevel>,
}

#[cfg(test)]
#[path = "query_tests.rs"]
mod tests;
