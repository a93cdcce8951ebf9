// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The swipe gesture state machine.
//!
//! [`SwipeState`] is a value type. [`SwipeState::apply`] consumes one
//! [`SwipeEvent`], updates the state in place and returns the [`Effects`] the
//! host must perform; [`SwipeState::step`] is the same transition without
//! mutating the input. Nothing here touches rendering, timers, or event
//! subscriptions directly.
//!
//! ## Phases
//!
//! ```text
//! Idle ──enter──▶ Tracking ──reveal > threshold──▶ Committing ──done──▶ Committed
//!                    │                                                    │
//!               ended / exit                                    exit (CloseOnExit)
//!                    ▼                                                    │
//!              SpringingBack ◀────────────────────────────────────────────┘
//!                    │
//!                  done ──▶ Idle
//! ```
//!
//! Geometry must be measured ([`SwipeEvent::LayoutMeasured`] with a positive
//! container width) before a row can leave `Idle`. An `Idle` row that still
//! holds its subscription re-enters `Tracking` on the next non-zero `Changed`
//! delta. Deltas are only applied in `Tracking`; every other phase drops them,
//! which is what makes a second commit impossible while one is in flight.

use kurbo::Size;
use smallvec::SmallVec;

use crate::animation::{AnimationId, AnimationKind, AnimationRequest};
use crate::config::{AfterCommit, FeedbackPattern, SwipeConfig};
use crate::geometry::{SwipeBounds, compute_bounds};
use crate::offsets::OffsetSet;

/// Phase of a row's swipe interaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Phase {
    /// At rest. A hovered, measured row leaves this phase on the next gesture.
    #[default]
    Idle,
    /// Pointer inside and geometry known; deltas move the offsets.
    Tracking,
    /// Threshold crossed; the snap-open animation is running.
    Committing,
    /// Snap-open finished; the panel is fully open.
    Committed,
    /// Returning to rest.
    SpringingBack,
}

/// Phase marker carried by a gesture delta.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GesturePhase {
    /// The gesture is in progress.
    Changed,
    /// The gesture was released.
    Ended,
}

/// One horizontal delta from the gesture source.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureDelta {
    /// Horizontal movement since the previous event. Negative values open the row.
    pub dx: f64,
    /// Whether the gesture continues or was released.
    pub phase: GesturePhase,
}

impl GestureDelta {
    /// A `Changed` delta.
    #[must_use]
    pub const fn changed(dx: f64) -> Self {
        Self {
            dx,
            phase: GesturePhase::Changed,
        }
    }

    /// An `Ended` delta.
    #[must_use]
    pub const fn ended(dx: f64) -> Self {
        Self {
            dx,
            phase: GesturePhase::Ended,
        }
    }
}

/// Input to [`SwipeState::apply`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SwipeEvent {
    /// A layout pass measured the wrapped content and the row container.
    LayoutMeasured {
        /// Fitted size of the wrapped content.
        content: Size,
        /// Size available to the row.
        container: Size,
    },
    /// The pointer entered the row.
    PointerEntered,
    /// The pointer left the row.
    PointerExited,
    /// A gesture delta arrived.
    Delta(GestureDelta),
    /// An animation started by this row settled.
    AnimationFinished(AnimationId),
    /// Animate an open or tracked row back to rest.
    Close,
    /// Snap to rest immediately and cancel any animation, e.g. on row reuse.
    Reset,
    /// The row is being destroyed: release the subscription and stop animating.
    Teardown,
}

/// Side effect requested by a transition.
#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    /// Start listening for gesture deltas.
    Subscribe,
    /// Stop listening for gesture deltas.
    Unsubscribe,
    /// The offsets (or bounds) changed outside an animation; apply them as-is.
    ApplyOffsets,
    /// Start an animation.
    StartAnimation(AnimationRequest),
    /// Cancel the running animation without completing it.
    CancelAnimation,
    /// Fire-and-forget feedback.
    PlayHaptic(FeedbackPattern),
    /// The commit completed; call the host's full-swipe callback.
    InvokeFullSwipe,
}

/// Effects produced by one transition.
pub type Effects = SmallVec<[Effect; 4]>;

/// Per-row swipe state.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SwipeState {
    phase: Phase,
    bounds: Option<SwipeBounds>,
    offsets: OffsetSet,
    listening: bool,
    animation: Option<AnimationId>,
    next_animation: u64,
    close_after_commit: bool,
}

impl SwipeState {
    /// Creates an unmeasured row at rest.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Measured bounds, or `None` before the first usable layout pass.
    #[must_use]
    pub fn bounds(&self) -> Option<&SwipeBounds> {
        self.bounds.as_ref()
    }

    /// Row width captured at the first layout pass, or `0` before it.
    #[must_use]
    pub fn host_init_width(&self) -> f64 {
        self.bounds.map_or(0.0, |b| b.host_init_width)
    }

    /// Model values of the coupled offsets.
    ///
    /// While an animation runs these already hold its targets.
    #[must_use]
    pub fn offsets(&self) -> &OffsetSet {
        &self.offsets
    }

    /// Current reveal magnitude.
    #[must_use]
    pub fn reveal(&self) -> f64 {
        self.offsets.reveal()
    }

    /// Whether the row currently holds a delta subscription.
    #[must_use]
    pub fn is_listening(&self) -> bool {
        self.listening
    }

    /// The animation the row is waiting on, if any.
    #[must_use]
    pub fn pending_animation(&self) -> Option<AnimationId> {
        self.animation
    }

    /// Returns the next state and its effects without mutating `self`.
    #[must_use]
    pub fn step(&self, config: &SwipeConfig, event: SwipeEvent) -> (Self, Effects) {
        let mut next = self.clone();
        let effects = next.apply(config, event);
        (next, effects)
    }

    /// Applies one event in place and returns the effects to perform.
    pub fn apply(&mut self, config: &SwipeConfig, event: SwipeEvent) -> Effects {
        let mut fx = Effects::new();
        match event {
            SwipeEvent::LayoutMeasured { content, container } => {
                self.on_layout(config, content, container, &mut fx);
            }
            SwipeEvent::PointerEntered => self.on_enter(&mut fx),
            SwipeEvent::PointerExited => self.on_exit(config, &mut fx),
            SwipeEvent::Delta(delta) => self.on_delta(config, delta, &mut fx),
            SwipeEvent::AnimationFinished(id) => self.on_animation_finished(config, id, &mut fx),
            SwipeEvent::Close => {
                if matches!(self.phase, Phase::Tracking | Phase::Committed) {
                    self.spring_back(config, "close", &mut fx);
                }
            }
            SwipeEvent::Reset => self.on_reset(&mut fx),
            SwipeEvent::Teardown => {
                if self.listening {
                    self.listening = false;
                    fx.push(Effect::Unsubscribe);
                }
                self.on_reset(&mut fx);
            }
        }
        fx
    }

    fn on_layout(&mut self, config: &SwipeConfig, content: Size, container: Size, fx: &mut Effects) {
        match self.bounds {
            Some(bounds) => {
                let relaid = bounds.relayout(content, container);
                if relaid != bounds {
                    self.bounds = Some(relaid);
                    fx.push(Effect::ApplyOffsets);
                }
            }
            None => {
                let bounds = compute_bounds(content, container, config.spacing);
                if !bounds.is_measured() {
                    return;
                }
                log::debug!(
                    "row measured: width {} padding {}",
                    bounds.host_init_width,
                    bounds.padding
                );
                self.offsets = OffsetSet::for_mode(config.anchoring, &bounds);
                self.bounds = Some(bounds);
                fx.push(Effect::ApplyOffsets);
            }
        }
    }

    fn on_enter(&mut self, fx: &mut Effects) {
        if !self.listening {
            self.listening = true;
            log::debug!("subscribing to gesture deltas");
            fx.push(Effect::Subscribe);
        }
        match self.phase {
            Phase::Idle if self.bounds.is_some() => self.set_phase(Phase::Tracking, "enter"),
            // Back inside before the commit settled: the row stays open.
            Phase::Committing => self.close_after_commit = false,
            _ => {}
        }
    }

    fn on_exit(&mut self, config: &SwipeConfig, fx: &mut Effects) {
        if self.listening {
            self.listening = false;
            log::debug!("unsubscribing from gesture deltas");
            fx.push(Effect::Unsubscribe);
        }
        match self.phase {
            Phase::Tracking => self.spring_back(config, "exit", fx),
            Phase::Committing => {
                // The commit animation always runs to completion.
                self.close_after_commit = config.after_commit == AfterCommit::CloseOnExit;
            }
            Phase::Committed => {
                if config.after_commit == AfterCommit::CloseOnExit {
                    self.spring_back(config, "exit", fx);
                }
            }
            Phase::Idle | Phase::SpringingBack => {}
        }
    }

    fn on_delta(&mut self, config: &SwipeConfig, delta: GestureDelta, fx: &mut Effects) {
        let dx = if delta.dx.is_finite() { delta.dx } else { 0.0 };
        if self.phase == Phase::Idle
            && self.listening
            && self.bounds.is_some()
            && delta.phase == GesturePhase::Changed
            && dx != 0.0
        {
            // A new gesture over a row that is still hovered.
            self.set_phase(Phase::Tracking, "gesture began");
        }
        if self.phase != Phase::Tracking {
            return;
        }

        // Clamp first, then compare the clamped reveal.
        let provisional = self.offsets.with_delta(dx);
        if provisional.reveal() > config.full_swipe_threshold {
            self.commit(config, fx);
            return;
        }
        if delta.phase == GesturePhase::Ended {
            self.spring_back(config, "release", fx);
            return;
        }
        if provisional == self.offsets {
            return;
        }
        self.offsets = provisional;
        log::trace!("delta {dx}: reveal {}", self.offsets.reveal());
        fx.push(Effect::ApplyOffsets);
    }

    fn on_animation_finished(&mut self, config: &SwipeConfig, id: AnimationId, fx: &mut Effects) {
        if self.animation != Some(id) {
            log::warn!("ignoring completion of unknown animation {id:?}");
            return;
        }
        self.animation = None;
        match self.phase {
            Phase::Committing => {
                self.set_phase(Phase::Committed, "commit finished");
                fx.push(Effect::InvokeFullSwipe);
                if core::mem::take(&mut self.close_after_commit) {
                    self.spring_back(config, "deferred exit", fx);
                }
            }
            Phase::SpringingBack => self.set_phase(Phase::Idle, "spring-back finished"),
            Phase::Idle | Phase::Tracking | Phase::Committed => {}
        }
    }

    fn on_reset(&mut self, fx: &mut Effects) {
        if self.animation.take().is_some() {
            fx.push(Effect::CancelAnimation);
        }
        self.close_after_commit = false;
        if !self.offsets.is_at_rest() {
            self.offsets.settle_at_rest();
            fx.push(Effect::ApplyOffsets);
        }
        self.set_phase(Phase::Idle, "reset");
    }

    fn commit(&mut self, config: &SwipeConfig, fx: &mut Effects) {
        let tracks = self.offsets.tracks_to_open();
        self.offsets.settle_open();
        let id = self.next_animation_id();
        self.set_phase(Phase::Committing, "threshold crossed");
        fx.push(Effect::StartAnimation(AnimationRequest {
            id,
            kind: AnimationKind::Commit,
            tracks,
            duration: config.commit_duration,
            easing: config.easing,
        }));
        fx.push(Effect::PlayHaptic(config.feedback));
    }

    fn spring_back(&mut self, config: &SwipeConfig, cause: &'static str, fx: &mut Effects) {
        let tracks = self.offsets.tracks_to_rest();
        self.offsets.settle_at_rest();
        let id = self.next_animation_id();
        self.set_phase(Phase::SpringingBack, cause);
        fx.push(Effect::StartAnimation(AnimationRequest {
            id,
            kind: AnimationKind::SpringBack,
            tracks,
            duration: config.spring_back_duration,
            easing: config.easing,
        }));
    }

    fn next_animation_id(&mut self) -> AnimationId {
        self.next_animation += 1;
        let id = AnimationId(self.next_animation);
        self.animation = Some(id);
        id
    }

    fn set_phase(&mut self, next: Phase, cause: &'static str) {
        if self.phase != next {
            log::debug!("swipe phase {:?} -> {:?} ({cause})", self.phase, next);
            self.phase = next;
        }
    }
}
