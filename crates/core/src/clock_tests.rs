// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn system_clock_is_after_2020() {
    assert!(SystemClock.epoch_ms() > 1_577_836_800_000);
}

#[test]
fn fake_clock_stands_still_until_advanced() {
    let clock = FakeClock::new();
    assert_eq!(clock.epoch_ms(), FakeClock::START_MS);
    assert_eq!(clock.epoch_ms(), FakeClock::START_MS);
    clock.advance(Duration::from_secs(90));
    assert_eq!(clock.epoch_ms(), FakeClock::START_MS + 90_000);
}

#[test]
fn clones_share_time() {
    let clock = FakeClock::at(42);
    let other = clock.clone();
    other.advance(Duration::from_millis(8));
    assert_eq!(clock.epoch_ms(), 50);
}
