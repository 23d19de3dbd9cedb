// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use proptest::prelude::*;

fn entry(group: &[&str], current: u64, total: Option<u64>) -> ProgressEntry {
    ProgressEntry::new(group.iter().map(|s| s.to_string()).collect(), current, total)
}

#[test]
fn empty_table_is_indeterminate() {
    let report = ProgressReport::from_table(&[]);
    assert_eq!(report.current(), 0);
    assert_eq!(report.total(), None);
    assert_eq!(report.label(), "0/?");
    assert_eq!(report.color_css_rgb(), NEUTRAL_COLOR);
}

#[test]
fn root_entry_wins_over_children() {
    let report = ProgressReport::from_table(&[
        entry(&["a"], 5, Some(10)),
        entry(&[], 1, Some(4)),
    ]);
    assert_eq!(report.current(), 1);
    assert_eq!(report.total(), Some(4));
    assert_eq!(report.children.len(), 1);
}

#[test]
fn children_are_summed_in_first_seen_order() {
    let report = ProgressReport::from_table(&[
        entry(&["load"], 2, Some(4)),
        entry(&["extract", "users"], 3, Some(3)),
        entry(&["extract", "orders"], 1, Some(3)),
    ]);
    let names: Vec<_> = report.children.iter().map(|c| c.name.as_deref()).collect();
    assert_eq!(names, vec![Some("load"), Some("extract")]);
    assert_eq!(report.current(), 6);
    assert_eq!(report.total(), Some(10));
    assert_eq!(report.children[1].children.len(), 2);
    assert_eq!(report.label(), "6/10 (60%)");
}

#[test]
fn unknown_child_total_makes_parent_unknown() {
    let report = ProgressReport::from_table(&[
        entry(&["a"], 2, Some(4)),
        entry(&["b"], 1, None),
    ]);
    assert_eq!(report.total(), None);
    assert_eq!(report.percent_human(), "?");
}

#[test]
fn oversized_child_totals_degrade_to_indeterminate() {
    let report = ProgressReport::from_table(&[
        entry(&["a"], u64::MAX, Some(u64::MAX)),
        entry(&["b"], u64::MAX, Some(u64::MAX)),
    ]);
    assert_eq!(report.current(), u64::MAX);
    assert_eq!(report.total(), None);

    let info = ProgressInfo::compute(BuildStatus::Running, &report);
    assert!(info.is_indeterminate());
    assert_eq!(info.color, NEUTRAL_COLOR);
}

#[yare::parameterized(
    red    = { 0.0,   "#CC2828" },
    yellow = { 60.0,  "#CCCC28" },
    green  = { 120.0, "#28CC28" },
)]
fn hue_colors(hue: f64, expected: &str) {
    assert_eq!(hue_color(hue), expected);
}

#[yare::parameterized(
    running_half = { BuildStatus::Running,   5,  Some(10), "#CCCC28", true },
    succeeded    = { BuildStatus::Succeeded, 10, Some(10), "#28CC28", false },
    failed       = { BuildStatus::Failed,    3,  Some(10), "#CC2828", false },
    skipped      = { BuildStatus::Skipped,   0,  Some(10), "#CCCC28", false },
    indeterminate = { BuildStatus::Running,  7,  None,     NEUTRAL_COLOR, true },
    zero_total   = { BuildStatus::Succeeded, 0,  Some(0),  NEUTRAL_COLOR, false },
)]
fn progress_info_color_follows_status(
    status: BuildStatus,
    current: u64,
    total: Option<u64>,
    color: &str,
    in_progress: bool,
) {
    let report = ProgressReport::from_table(&[entry(&[], current, total)]);
    let info = ProgressInfo::compute(status, &report);
    assert_eq!(info.color, color);
    assert_eq!(info.in_progress, in_progress);
}

#[test]
fn zero_total_is_reported_as_indeterminate() {
    let report = ProgressReport::from_table(&[entry(&[], 0, Some(0))]);
    assert!(ProgressInfo::compute(BuildStatus::Running, &report).is_indeterminate());
}

proptest! {
    #[test]
    fn current_never_exceeds_known_total(
        rows in proptest::collection::vec((0usize..3, any::<u64>(), proptest::option::of(any::<u64>())), 0..8),
    ) {
        let groups = ["a", "b", "c"];
        let table: Vec<ProgressEntry> = rows
            .into_iter()
            .map(|(g, current, total)| entry(&[groups[g]], current, total))
            .collect();
        let report = ProgressReport::from_table(&table);
        let info = ProgressInfo::compute(BuildStatus::Running, &report);
        if let Some(total) = info.total {
            prop_assert!(total > 0);
            prop_assert!(info.current <= total);
        }
    }
}
