// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_swipe --heading-base-level=0

//! Understory Swipe: swipe-to-reveal actions for list rows.
//!
//! This crate models the interaction where dragging (or scroll-gesturing)
//! horizontally over a list row progressively reveals an action panel behind
//! the row's content. Offsets are rubber-banded to the row's measured width,
//! crossing a configurable *full swipe* threshold commits the action with a
//! short snap-open animation, and releasing early springs the row back to
//! rest.
//!
//! It does **not** render anything, route platform input, or own a list.
//! Callers are expected to:
//! - Report layout passes (content and container sizes).
//! - Feed pointer enter/exit and horizontal gesture deltas, in arrival order.
//! - Drive animation frames with a monotonic clock.
//! - Apply the resulting offsets to their views, play feedback, and react to
//!   the full-swipe callback.
//!
//! The pieces, from the bottom up:
//!
//! - [`compute_bounds`] / [`SwipeBounds`]: centering padding and travel bounds.
//! - [`OffsetSet`]: the coupled offsets of a row for a given [`AnchoringMode`],
//!   each clamped to its own bounds.
//! - [`SwipeState`]: a value-type state machine. [`SwipeState::apply`] turns a
//!   [`SwipeEvent`] into a list of [`Effect`]s.
//! - [`AnimationSequencer`]: single-flight, host-clocked animation of offset groups.
//! - [`RowController`]: the composition root that wires these to a [`RowHost`]
//!   and owns the `on_full_swipe` callback.
//!
//! ## Minimal example
//!
//! Using the state machine directly, without a controller:
//!
//! ```rust
//! use kurbo::Size;
//! use understory_swipe::{Effect, GestureDelta, Phase, SwipeConfig, SwipeEvent, SwipeState};
//!
//! let config = SwipeConfig::default();
//! let mut row = SwipeState::new();
//!
//! row.apply(&config, SwipeEvent::LayoutMeasured {
//!     content: Size::new(320.0, 44.0),
//!     container: Size::new(320.0, 44.0),
//! });
//! row.apply(&config, SwipeEvent::PointerEntered);
//!
//! // Partial swipe: offsets follow the delta.
//! row.apply(&config, SwipeEvent::Delta(GestureDelta::changed(-120.0)));
//! assert_eq!(row.reveal(), 120.0);
//!
//! // Crossing the threshold commits and asks for an animation plus feedback.
//! let effects = row.apply(&config, SwipeEvent::Delta(GestureDelta::changed(-120.0)));
//! assert_eq!(row.phase(), Phase::Committing);
//! assert!(effects.iter().any(|e| matches!(e, Effect::StartAnimation(_))));
//! assert!(effects.iter().any(|e| matches!(e, Effect::PlayHaptic(_))));
//! ```
//!
//! ## Anchoring modes
//!
//! - [`AnchoringMode::GrowingPanel`]: the panel's width grows from `0` to the
//!   row width as the content's leading and trailing offsets shrink toward
//!   `-width`.
//! - [`AnchoringMode::SlidingPanel`]: the panel's leading offset slides from
//!   `spacing` down to `-width` together with the content.
//!
//! Both are expressed as the same [`OffsetSet`] of bounded values, so the
//! state machine has no mode-specific branches.
//!
//! ## Threading
//!
//! Everything here is single-threaded and intended to run on the UI thread.
//! Each row owns its own state; nothing is shared between rows.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod animation;
mod config;
mod controller;
mod geometry;
mod machine;
mod offsets;

pub use animation::{
    AnimationBusy, AnimationFrame, AnimationId, AnimationKind, AnimationRequest,
    AnimationSequencer, Easing, Track,
};
pub use config::{AfterCommit, AnchoringMode, ConfigError, FeedbackPattern, SwipeConfig};
pub use controller::{RowController, RowHost};
pub use geometry::{SwipeBounds, centering_padding, compute_bounds};
pub use machine::{Effect, Effects, GestureDelta, GesturePhase, Phase, SwipeEvent, SwipeState};
pub use offsets::{CoupledOffset, OffsetId, OffsetSet};
