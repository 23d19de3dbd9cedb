// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serial_test::serial;

#[test]
fn json_list_renders_without_text_callback() {
    let items = vec!["a", "b"];
    let result = handle_list(OutputFormat::Json, &items, "none", |_, _| {
        panic!("text renderer called for json output")
    });
    assert!(result.is_ok());
}

#[test]
fn text_list_skips_renderer_when_empty() {
    let items: Vec<String> = Vec::new();
    let mut called = false;
    handle_list(OutputFormat::Text, &items, "No jobs", |_, _| called = true).unwrap();
    assert!(!called);
}

#[test]
fn format_or_json_calls_text_fn_for_text() {
    let mut called = false;
    format_or_json(OutputFormat::Text, &1, || called = true).unwrap();
    assert!(called);
}

#[test]
#[serial]
fn field_pads_label() {
    std::env::set_var("NO_COLOR", "1");
    let mut out = Vec::new();
    field(&mut out, "status:", "success");
    assert_eq!(String::from_utf8(out).unwrap(), "status:      success\n");
}

#[test]
fn now_is_after_2020() {
    assert!(now_ms() > 1_577_836_800_000);
}
