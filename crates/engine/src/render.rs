// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Dependency graph rendering.
//!
//! [`to_dot`] is pure and deterministic; turning DOT into SVG goes through
//! a [`GraphRenderer`], by default the Graphviz `dot` binary.

use crate::depgraph::DepGraph;
use crate::subprocess::{run_with_timeout, RENDER_TIMEOUT};
use async_trait::async_trait;
use jc_core::{JobId, JobStatus};
use std::collections::HashMap;
use std::fmt::Write as _;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("graph renderer unavailable: {0}")]
    Unavailable(String),
    #[error("graph renderer failed: {0}")]
    Failed(String),
}

/// Per-node decoration of a rendered graph.
#[derive(Debug, Clone, Default)]
pub struct NodeStyle {
    pub label: Option<String>,
    pub status: Option<JobStatus>,
    /// Drawn with a thicker border
    pub highlight: bool,
}

fn fill_color(status: Option<JobStatus>) -> &'static str {
    match status {
        Some(JobStatus::Success) => "#dff0d8",
        Some(JobStatus::Failed) => "#f2dede",
        Some(JobStatus::Outdated) => "#fcf8e3",
        Some(JobStatus::NotBuilt) | None => "#ffffff",
    }
}

fn quote(s: &str) -> String {
    format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""))
}

/// Render a graph as DOT, edges pointing from a dependency to its dependent.
pub fn to_dot(graph: &DepGraph, styles: &HashMap<JobId, NodeStyle>) -> String {
    let mut out = String::from("digraph depgraph {\n");
    out.push_str("    rankdir=LR;\n");
    out.push_str("    node [shape=box, style=\"rounded,filled\", fontname=\"sans-serif\"];\n");

    for job in graph.keys() {
        let style = styles.get(job).cloned().unwrap_or_default();
        let label = style.label.as_deref().unwrap_or(job.as_str());
        let _ = write!(
            out,
            "    {} [label={}, fillcolor=\"{}\"",
            quote(job),
            quote(label),
            fill_color(style.status)
        );
        if style.highlight {
            out.push_str(", penwidth=2");
        }
        out.push_str("];\n");
    }
    for (job, deps) in graph {
        for dep in deps {
            let _ = writeln!(out, "    {} -> {};", quote(dep), quote(job));
        }
    }
    out.push_str("}\n");
    out
}

#[async_trait]
pub trait GraphRenderer: Send + Sync {
    async fn render_svg(&self, dot: &str) -> Result<Vec<u8>, RenderError>;
}

/// Renders through the Graphviz `dot` binary.
#[derive(Debug, Clone)]
pub struct DotRenderer {
    binary: PathBuf,
}

impl DotRenderer {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self { binary: binary.into() }
    }
}

impl Default for DotRenderer {
    fn default() -> Self {
        Self::new("dot")
    }
}

#[async_trait]
impl GraphRenderer for DotRenderer {
    async fn render_svg(&self, dot: &str) -> Result<Vec<u8>, RenderError> {
        let mut cmd = tokio::process::Command::new(&self.binary);
        cmd.arg("-Tsvg");
        let output = run_with_timeout(cmd, Some(dot.as_bytes()), RENDER_TIMEOUT, "dot")
            .await
            .map_err(RenderError::Unavailable)?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(RenderError::Failed(stderr.trim().to_string()));
        }
        Ok(output.stdout)
    }
}

/// Small SVG standing in for a graph that could not be rendered.
pub fn placeholder_svg(message: &str) -> String {
    let escaped = message
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;");
    format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"400\" height=\"60\" viewBox=\"0 0 400 60\">\
         <rect width=\"400\" height=\"60\" fill=\"#f5f5f5\" stroke=\"#999999\"/>\
         <text x=\"200\" y=\"35\" text-anchor=\"middle\" font-family=\"sans-serif\" font-size=\"12\" fill=\"#666666\">{escaped}</text>\
         </svg>"
    )
}

#[cfg(test)]
#[path = "render_tests.rs"]
mod tests;
