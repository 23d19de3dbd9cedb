// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Build progress reporting.
//!
//! Functions report progress per *group path* (e.g. `[]` for the whole
//! build, `["load", "users"]` for a nested step). Reports are stored as a
//! flat table and folded into a tree on read; a node without its own
//! numbers sums up its children.

use crate::build::BuildStatus;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Color used whenever the ratio is unknown.
pub const NEUTRAL_COLOR: &str = "#999999";

/// A single stored progress report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressEntry {
    /// Group path; empty for the build as a whole
    #[serde(default)]
    pub group: Vec<String>,
    pub current: u64,
    /// `None` when the amount of work is not known yet
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_line: Option<String>,
}

impl ProgressEntry {
    pub fn new(group: Vec<String>, current: u64, total: Option<u64>) -> Self {
        Self { group, current, total, status_line: None }
    }

    pub fn with_status_line(mut self, line: impl Into<String>) -> Self {
        self.status_line = Some(line.into());
        self
    }
}

/// Tree view over a build's progress table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressReport {
    pub name: Option<String>,
    own_current: Option<u64>,
    own_total: Option<u64>,
    pub status_line: Option<String>,
    pub children: Vec<ProgressReport>,
}

impl ProgressReport {
    /// Fold a flat table into a tree, keeping first-seen order of groups.
    pub fn from_table(entries: &[ProgressEntry]) -> Self {
        let rows: Vec<(&[String], &ProgressEntry)> =
            entries.iter().map(|e| (e.group.as_slice(), e)).collect();
        Self::fold(None, &rows)
    }

    fn fold(name: Option<String>, rows: &[(&[String], &ProgressEntry)]) -> Self {
        let mut node = ProgressReport {
            name,
            own_current: None,
            own_total: None,
            status_line: None,
            children: Vec::new(),
        };
        let mut sub_tables: IndexMap<&str, Vec<(&[String], &ProgressEntry)>> = IndexMap::new();

        for (path, entry) in rows {
            match path.split_first() {
                None => {
                    node.own_current = Some(entry.current);
                    node.own_total = entry.total;
                    node.status_line = entry.status_line.clone();
                }
                Some((head, rest)) => {
                    sub_tables.entry(head.as_str()).or_default().push((rest, *entry));
                }
            }
        }

        node.children = sub_tables
            .into_iter()
            .map(|(prefix, rows)| Self::fold(Some(prefix.to_string()), &rows))
            .collect();
        node
    }

    pub fn current(&self) -> u64 {
        match self.own_current {
            Some(current) => current,
            None => self.children.iter().map(ProgressReport::current).fold(0, u64::saturating_add),
        }
    }

    /// Total amount of work, unknown if this node or any summed child is
    /// unknown, or if the sum does not fit in a `u64`.
    pub fn total(&self) -> Option<u64> {
        if self.own_current.is_some() {
            return self.own_total;
        }
        if self.children.is_empty() {
            return None;
        }
        self.children.iter().try_fold(0u64, |sum, child| sum.checked_add(child.total()?))
    }

    /// Completed fraction in `[0, 1]`, when the total is known and non-zero.
    pub fn ratio(&self) -> Option<f64> {
        match self.total() {
            Some(total) if total > 0 => Some(self.current().min(total) as f64 / total as f64),
            _ => None,
        }
    }

    pub fn percent_human(&self) -> String {
        match self.ratio() {
            Some(r) => format!("{:.0}%", r * 100.0),
            None => "?".to_string(),
        }
    }

    pub fn label(&self) -> String {
        match self.total() {
            Some(total) => format!("{}/{} ({})", self.current(), total, self.percent_human()),
            None => format!("{}/?", self.current()),
        }
    }

    /// Red-to-green color following the completed fraction.
    pub fn color_css_rgb(&self) -> String {
        match self.ratio() {
            Some(r) => hue_color(r * 120.0),
            None => NEUTRAL_COLOR.to_string(),
        }
    }
}

/// Normalized progress snapshot: `(current, total, color)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressInfo {
    pub current: u64,
    /// `None` for indeterminate progress
    pub total: Option<u64>,
    /// True while the build is running
    pub in_progress: bool,
    pub color: String,
}

impl ProgressInfo {
    /// Compute the snapshot for a build in `status` with the given report.
    ///
    /// `current` is clamped to `total`. A zero or unknown total is reported
    /// as indeterminate with the neutral color.
    pub fn compute(status: BuildStatus, report: &ProgressReport) -> Self {
        let in_progress = status == BuildStatus::Running;
        let current = report.current();
        match report.total() {
            Some(total) if total > 0 => {
                let current = current.min(total);
                let color = match status {
                    BuildStatus::Succeeded => hue_color(120.0),
                    BuildStatus::Failed => hue_color(0.0),
                    BuildStatus::Skipped => hue_color(60.0),
                    BuildStatus::Running | BuildStatus::NotStarted => {
                        hue_color(current as f64 / total as f64 * 120.0)
                    }
                };
                ProgressInfo { current, total: Some(total), in_progress, color }
            }
            _ => ProgressInfo {
                current,
                total: None,
                in_progress,
                color: NEUTRAL_COLOR.to_string(),
            },
        }
    }

    pub fn is_indeterminate(&self) -> bool {
        self.total.is_none()
    }
}

/// `#RRGGBB` for the given hue (degrees) at 80% saturation and value.
pub fn hue_color(hue_deg: f64) -> String {
    let (r, g, b) = hsv_to_rgb(hue_deg.clamp(0.0, 360.0), 0.8, 0.8);
    format!("#{:02X}{:02X}{:02X}", channel(r), channel(g), channel(b))
}

fn channel(x: f64) -> u8 {
    (x * 255.0) as u8
}

fn hsv_to_rgb(hue_deg: f64, s: f64, v: f64) -> (f64, f64, f64) {
    let h6 = (hue_deg / 60.0) % 6.0;
    let i = h6.floor();
    let f = h6 - i;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));
    match i as u8 {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    }
}

#[cfg(test)]
#[path = "progress_tests.rs"]
mod tests;
