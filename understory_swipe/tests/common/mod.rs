// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared helpers for swipe integration tests.

#![allow(
    missing_docs,
    reason = "Integration-test helper module; not part of the public API."
)]
#![allow(
    dead_code,
    reason = "Each integration test binary uses a different subset of the helpers."
)]

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use kurbo::Size;
use understory_swipe::{
    FeedbackPattern, OffsetSet, RowController, RowHost, SwipeBounds, SwipeConfig,
};

/// Everything a row asked its host to do.
#[derive(Debug, Default)]
pub(crate) struct Journal {
    pub(crate) active_subscriptions: i32,
    pub(crate) subscribe_calls: u32,
    pub(crate) haptics: Vec<FeedbackPattern>,
    pub(crate) applied: Vec<OffsetSet>,
    pub(crate) frame_requests: u32,
}

/// Host that records into a shared [`Journal`], so tests can inspect it after the row is gone.
#[derive(Debug, Clone, Default)]
pub(crate) struct RecordingHost {
    pub(crate) journal: Rc<RefCell<Journal>>,
}

impl RowHost for RecordingHost {
    fn subscribe(&mut self) {
        let mut journal = self.journal.borrow_mut();
        journal.active_subscriptions += 1;
        journal.subscribe_calls += 1;
    }

    fn unsubscribe(&mut self) {
        self.journal.borrow_mut().active_subscriptions -= 1;
    }

    fn apply_offsets(&mut self, _bounds: &SwipeBounds, offsets: &OffsetSet) {
        self.journal.borrow_mut().applied.push(offsets.clone());
    }

    fn play_haptic(&mut self, pattern: FeedbackPattern) {
        self.journal.borrow_mut().haptics.push(pattern);
    }

    fn request_frame(&mut self) {
        self.journal.borrow_mut().frame_requests += 1;
    }
}

pub(crate) const ROW_WIDTH: f64 = 320.0;

/// A measured, hovered row of width [`ROW_WIDTH`].
pub(crate) fn hovered_row(config: SwipeConfig) -> RowController<RecordingHost> {
    let mut row = RowController::new(config, RecordingHost::default()).unwrap();
    row.layout(Size::new(ROW_WIDTH, 44.0), Size::new(ROW_WIDTH, 44.0));
    row.pointer_entered();
    row
}

/// Ticks the row at 16 ms intervals from `start` until no animation remains.
///
/// Returns the time of the last tick.
pub(crate) fn settle<H: RowHost>(row: &mut RowController<H>, start: Duration) -> Duration {
    let mut now = start;
    for _ in 0..1_000 {
        if !row.tick(now) {
            return now;
        }
        now += Duration::from_millis(16);
    }
    panic!("animation did not settle");
}
