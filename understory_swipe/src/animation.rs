// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host-agnostic animation sequencing for a row's coupled offsets.
//!
//! [`AnimationSequencer`] runs at most one animation at a time. All tracks of
//! a request share one duration and one easing curve, so they settle together.
//! The host drives time by calling [`AnimationSequencer::tick`] once per frame
//! with a monotonic timestamp; the first tick after [`AnimationSequencer::start`]
//! fixes the start time.
//!
//! ## Overlap rules
//!
//! - A running [`AnimationKind::Commit`] cannot be replaced: `start` returns
//!   [`AnimationBusy`] until it finishes or is cancelled.
//! - A running [`AnimationKind::SpringBack`] may be superseded. Tracks of the
//!   new request that share an [`OffsetId`] with the running one start from
//!   the running animation's current value, so offsets never jump. The
//!   superseded animation never reports completion.
//!
//! ## Minimal example
//!
//! ```
//! use core::time::Duration;
//! use understory_swipe::{
//!     AnimationId, AnimationKind, AnimationRequest, AnimationSequencer, Easing, OffsetId, Track,
//! };
//!
//! let mut sequencer = AnimationSequencer::new();
//! let request = AnimationRequest {
//!     id: AnimationId(1),
//!     kind: AnimationKind::SpringBack,
//!     tracks: [Track::new(OffsetId::HostLeading, -100.0, 0.0)].into_iter().collect(),
//!     duration: Duration::from_millis(100),
//!     easing: Easing::Linear,
//! };
//! sequencer.start(request).unwrap();
//!
//! let first = sequencer.tick(Duration::from_millis(1_000)).unwrap();
//! assert_eq!(first.value(OffsetId::HostLeading), Some(-100.0));
//!
//! let half = sequencer.tick(Duration::from_millis(1_050)).unwrap();
//! assert_eq!(half.value(OffsetId::HostLeading), Some(-50.0));
//!
//! let done = sequencer.tick(Duration::from_millis(1_100)).unwrap();
//! assert!(done.finished);
//! assert!(sequencer.tick(Duration::from_millis(1_200)).is_none());
//! ```

use core::fmt;
use core::time::Duration;

use smallvec::SmallVec;

use crate::offsets::OffsetId;

/// Easing curve applied to an animation's linear progress.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Easing {
    /// No easing.
    Linear,
    /// Cubic ease-in.
    EaseIn,
    /// Cubic ease-out.
    EaseOut,
    /// Cubic ease-in-out.
    #[default]
    EaseInOut,
}

impl Easing {
    /// Maps a linear fraction in `[0, 1]` onto the curve.
    #[must_use]
    pub fn transform(self, fraction: f64) -> f64 {
        let t = if fraction.is_nan() {
            1.0
        } else {
            fraction.clamp(0.0, 1.0)
        };
        match self {
            Self::Linear => t,
            Self::EaseIn => t * t * t,
            Self::EaseOut => {
                let inv = 1.0 - t;
                1.0 - inv * inv * inv
            }
            Self::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let inv = 2.0 - 2.0 * t;
                    1.0 - inv * inv * inv * 0.5
                }
            }
        }
    }
}

/// Identifies one animation started by a row's state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnimationId(pub u64);

/// Which transition an animation belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnimationKind {
    /// Snap fully open after a full swipe.
    Commit,
    /// Return to rest.
    SpringBack,
}

/// One animated offset.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Track {
    /// Offset being animated.
    pub id: OffsetId,
    /// Start value.
    pub from: f64,
    /// Target value.
    pub to: f64,
}

impl Track {
    /// Creates a track.
    #[must_use]
    pub const fn new(id: OffsetId, from: f64, to: f64) -> Self {
        Self { id, from, to }
    }

    fn sample(&self, eased: f64) -> f64 {
        self.from + (self.to - self.from) * eased
    }
}

/// A request to animate a group of offsets together.
#[derive(Clone, Debug, PartialEq)]
pub struct AnimationRequest {
    /// Identifier reported back on completion.
    pub id: AnimationId,
    /// Which transition this animates.
    pub kind: AnimationKind,
    /// Offsets to animate.
    pub tracks: SmallVec<[Track; 4]>,
    /// Shared duration.
    pub duration: Duration,
    /// Shared easing curve.
    pub easing: Easing,
}

/// Sampled values for one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct AnimationFrame {
    /// Animation the values belong to.
    pub id: AnimationId,
    /// Which transition this animates.
    pub kind: AnimationKind,
    /// Current value of each animated offset.
    pub values: SmallVec<[(OffsetId, f64); 4]>,
    /// `true` on the single frame where every track reached its target.
    pub finished: bool,
}

impl AnimationFrame {
    /// Returns the sampled value for `id`, if it is animated.
    #[must_use]
    pub fn value(&self, id: OffsetId) -> Option<f64> {
        self.values.iter().find(|(k, _)| *k == id).map(|(_, v)| *v)
    }
}

/// Returned by [`AnimationSequencer::start`] while a commit animation is running.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AnimationBusy {
    /// The running commit animation.
    pub active: AnimationId,
}

impl fmt::Display for AnimationBusy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "commit animation {:?} is still running and cannot be replaced",
            self.active
        )
    }
}

impl core::error::Error for AnimationBusy {}

#[derive(Clone, Debug)]
struct Running {
    request: AnimationRequest,
    started_at: Option<Duration>,
    eased: f64,
}

impl Running {
    fn current(&self, id: OffsetId) -> Option<f64> {
        self.request
            .tracks
            .iter()
            .find(|t| t.id == id)
            .map(|t| t.sample(self.eased))
    }
}

/// Single-flight animation driver.
///
/// Runs at most one request at a time; a running commit cannot be replaced,
/// a running spring-back can.
#[derive(Clone, Debug, Default)]
pub struct AnimationSequencer {
    running: Option<Running>,
}

impl AnimationSequencer {
    /// Creates an idle sequencer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` while an animation is running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running.is_some()
    }

    /// Returns the id and kind of the running animation.
    #[must_use]
    pub fn active(&self) -> Option<(AnimationId, AnimationKind)> {
        self.running
            .as_ref()
            .map(|r| (r.request.id, r.request.kind))
    }

    /// Starts `request`, superseding a running spring-back.
    pub fn start(&mut self, mut request: AnimationRequest) -> Result<AnimationId, AnimationBusy> {
        if let Some(running) = &self.running {
            if running.request.kind == AnimationKind::Commit {
                return Err(AnimationBusy {
                    active: running.request.id,
                });
            }
            for track in &mut request.tracks {
                if let Some(current) = running.current(track.id) {
                    track.from = current;
                }
            }
            log::debug!(
                "animation {:?} supersedes {:?}",
                request.id,
                running.request.id
            );
        }
        let id = request.id;
        self.running = Some(Running {
            request,
            started_at: None,
            eased: 0.0,
        });
        Ok(id)
    }

    /// Stops the running animation without reporting completion.
    pub fn cancel(&mut self) -> Option<AnimationId> {
        self.running.take().map(|r| r.request.id)
    }

    /// Samples the running animation at `now`.
    ///
    /// Returns `None` when idle. The frame whose `finished` flag is set is
    /// returned exactly once; the sequencer is idle afterwards.
    pub fn tick(&mut self, now: Duration) -> Option<AnimationFrame> {
        let running = self.running.as_mut()?;
        let started_at = *running.started_at.get_or_insert(now);
        let duration = running.request.duration;
        let linear = if duration.is_zero() {
            1.0
        } else {
            now.saturating_sub(started_at).as_secs_f64() / duration.as_secs_f64()
        };
        let finished = linear >= 1.0;
        running.eased = if finished {
            1.0
        } else {
            running.request.easing.transform(linear)
        };

        let values = running
            .request
            .tracks
            .iter()
            .map(|t| (t.id, if finished { t.to } else { t.sample(running.eased) }))
            .collect();
        let frame = AnimationFrame {
            id: running.request.id,
            kind: running.request.kind,
            values,
            finished,
        };
        if finished {
            self.running = None;
        }
        Some(frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(id: u64, kind: AnimationKind, from: f64, to: f64, millis: u64) -> AnimationRequest {
        AnimationRequest {
            id: AnimationId(id),
            kind,
            tracks: [
                Track::new(OffsetId::HostLeading, from, to),
                Track::new(OffsetId::HostTrailing, from, to),
            ]
            .into_iter()
            .collect(),
            duration: Duration::from_millis(millis),
            easing: Easing::Linear,
        }
    }

    #[test]
    fn easing_endpoints_are_fixed() {
        for easing in [Easing::Linear, Easing::EaseIn, Easing::EaseOut, Easing::EaseInOut] {
            assert_eq!(easing.transform(0.0), 0.0);
            assert_eq!(easing.transform(1.0), 1.0);
            assert_eq!(easing.transform(2.0), 1.0);
            assert_eq!(easing.transform(-1.0), 0.0);
        }
        assert_eq!(Easing::EaseInOut.transform(0.5), 0.5);
        assert!(Easing::EaseIn.transform(0.25) < 0.25);
        assert!(Easing::EaseOut.transform(0.25) > 0.25);
    }

    #[test]
    fn tracks_settle_together() {
        let mut seq = AnimationSequencer::new();
        seq.start(request(1, AnimationKind::SpringBack, -80.0, 0.0, 100))
            .unwrap();

        seq.tick(Duration::from_millis(0)).unwrap();
        let mid = seq.tick(Duration::from_millis(25)).unwrap();
        assert_eq!(mid.value(OffsetId::HostLeading), Some(-60.0));
        assert_eq!(mid.value(OffsetId::HostLeading), mid.value(OffsetId::HostTrailing));
        assert!(!mid.finished);

        let end = seq.tick(Duration::from_millis(100)).unwrap();
        assert!(end.finished);
        assert_eq!(end.value(OffsetId::HostLeading), Some(0.0));
        assert_eq!(end.value(OffsetId::HostTrailing), Some(0.0));
    }

    #[test]
    fn completion_is_reported_once() {
        let mut seq = AnimationSequencer::new();
        seq.start(request(7, AnimationKind::Commit, 0.0, 320.0, 50))
            .unwrap();

        let mut finished = 0;
        for ms in (0..200).step_by(10) {
            if let Some(frame) = seq.tick(Duration::from_millis(ms)) {
                if frame.finished {
                    finished += 1;
                }
            }
        }
        assert_eq!(finished, 1);
        assert!(!seq.is_running());
    }

    #[test]
    fn zero_duration_finishes_on_first_tick() {
        let mut seq = AnimationSequencer::new();
        seq.start(request(2, AnimationKind::SpringBack, -10.0, 0.0, 0))
            .unwrap();
        let frame = seq.tick(Duration::from_secs(3)).unwrap();
        assert!(frame.finished);
        assert_eq!(frame.value(OffsetId::HostLeading), Some(0.0));
    }

    #[test]
    fn commit_cannot_be_replaced() {
        let mut seq = AnimationSequencer::new();
        seq.start(request(1, AnimationKind::Commit, 0.0, 320.0, 50))
            .unwrap();

        let err = seq
            .start(request(2, AnimationKind::SpringBack, 320.0, 0.0, 100))
            .unwrap_err();
        assert_eq!(err.active, AnimationId(1));
        assert_eq!(seq.active(), Some((AnimationId(1), AnimationKind::Commit)));
    }

    #[test]
    fn spring_back_supersedes_from_current_value() {
        let mut seq = AnimationSequencer::new();
        seq.start(request(1, AnimationKind::SpringBack, -100.0, 0.0, 100))
            .unwrap();
        seq.tick(Duration::from_millis(0));
        seq.tick(Duration::from_millis(50));

        seq.start(request(2, AnimationKind::SpringBack, -100.0, 0.0, 100))
            .unwrap();
        let first = seq.tick(Duration::from_millis(50)).unwrap();
        assert_eq!(first.id, AnimationId(2));
        assert_eq!(first.value(OffsetId::HostLeading), Some(-50.0));
    }

    #[test]
    fn cancel_drops_completion() {
        let mut seq = AnimationSequencer::new();
        seq.start(request(3, AnimationKind::Commit, 0.0, 320.0, 50))
            .unwrap();
        assert_eq!(seq.cancel(), Some(AnimationId(3)));
        assert!(seq.tick(Duration::from_millis(100)).is_none());
        assert_eq!(seq.cancel(), None);
    }
}
