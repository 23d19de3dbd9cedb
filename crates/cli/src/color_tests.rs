// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serial_test::serial;

fn force_color() {
    std::env::set_var("COLOR", "1");
    std::env::remove_var("NO_COLOR");
}

fn disable_color() {
    std::env::set_var("NO_COLOR", "1");
    std::env::remove_var("COLOR");
}

#[test]
#[serial]
fn styles_returns_plain_when_no_color() {
    disable_color();
    assert_eq!(
        format!("{:?}", styles()),
        format!("{:?}", clap::builder::styling::Styles::plain())
    );
}

#[test]
#[serial]
fn styles_returns_styled_when_color_forced() {
    force_color();
    assert_ne!(
        format!("{:?}", styles()),
        format!("{:?}", clap::builder::styling::Styles::plain())
    );
}

#[test]
#[serial]
fn header_produces_ansi_when_color_forced() {
    force_color();
    let result = header("foo");
    assert!(result.starts_with("\x1b[38;5;74m"));
    assert!(result.ends_with("foo\x1b[0m"));
}

#[test]
#[serial]
fn no_color_leaves_text_untouched() {
    disable_color();
    assert_eq!(header("foo"), "foo");
    assert_eq!(status("failed"), "failed");
    assert_eq!(muted("bar"), "bar");
}

#[test]
#[serial]
fn status_words_map_to_palette() {
    force_color();
    for (word, code) in [
        ("success", codes::GOOD),
        ("succeeded", codes::GOOD),
        ("failed", codes::BAD),
        ("skipped", codes::WARN),
        ("outdated", codes::WARN),
        ("not_built", codes::MUTED),
    ] {
        assert!(status(word).starts_with(&format!("\x1b[38;5;{code}m")), "{word}");
    }
}

#[test]
#[serial]
fn running_is_not_colored() {
    force_color();
    assert_eq!(status("running"), "running");
}
