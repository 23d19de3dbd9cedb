// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serde_json::json;

fn parse(value: serde_json::Value) -> Result<BuildListQuery, serde_json::Error> {
    serde_json::from_value(value)
}

#[test]
fn empty_query_lists_newest_first_without_filters() {
    let query = parse(json!({})).unwrap();
    assert!(query.filter().is_empty());
    assert_eq!(query.order(), Order::Desc);
    assert_eq!(query.limit(), DEFAULT_BUILD_LIMIT);
}

#[yare::parameterized(
    bool_true  = { json!(true),    Some(true) },
    text_true  = { json!("true"),  Some(true) },
    text_yes   = { json!("Yes"),   Some(true) },
    text_zero  = { json!("0"),     Some(false) },
    any        = { json!("any"),   None },
    blank      = { json!(""),      None },
    null       = { json!(null),    None },
)]
fn tri_state_spellings(value: serde_json::Value, expected: Option<bool>) {
    let query = parse(json!({ "finished": value })).unwrap();
    assert_eq!(query.finished, expected);
}

#[test]
fn unknown_tri_state_is_rejected() {
    let err = parse(json!({ "success": "maybe" })).unwrap_err();
    assert!(err.to_string().contains("expected true, false or any"));
}

#[test]
fn filters_are_carried_over() {
    let query = parse(json!({
        "started": "true",
        "skipped": "false",
        "started_after": 10,
        "ended_before": 20,
        "order": "asc",
        "limit": 5,
    }))
    .unwrap();
    let filter = query.filter();
    assert_eq!(filter.started, Some(true));
    assert_eq!(filter.skipped, Some(false));
    assert_eq!(filter.started_after, Some(10));
    assert_eq!(filter.ended_before, Some(20));
    assert_eq!(query.order(), Order::Asc);
    assert_eq!(query.limit(), 5);
}

#[test]
fn depgraph_defaults_to_svg() {
    let query: DepgraphQuery = serde_json::from_value(json!({})).unwrap();
    assert_eq!(query.fmt, GraphFormat::Svg);
    let query: DepgraphQuery = serde_json::from_value(json!({ "fmt": "dot", "complete": "1" })).unwrap();
    assert_eq!(query.fmt, GraphFormat::Dot);
    assert_eq!(query.complete, Some(true));
}

#[test]
fn log_query_parses_level() {
    let query: LogQuery = serde_json::from_value(json!({ "level": "error" })).unwrap();
    assert_eq!(query.level, Some(LogLevel::Error));
}
