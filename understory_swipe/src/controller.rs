// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Row controller: wires gesture input, the state machine, and the animation sequencer to a host.

use alloc::boxed::Box;
use core::fmt;
use core::time::Duration;

use kurbo::Size;

use crate::animation::AnimationSequencer;
use crate::config::{AfterCommit, ConfigError, FeedbackPattern, SwipeConfig};
use crate::geometry::SwipeBounds;
use crate::machine::{Effect, GestureDelta, Phase, SwipeEvent, SwipeState};
use crate::offsets::OffsetSet;

/// Services a row needs from its host.
///
/// Implementations typically wrap a handle to the platform's scroll/trackpad
/// event monitor and to the view that renders the row.
pub trait RowHost {
    /// Start delivering gesture deltas for this row.
    ///
    /// Called at most once between two [`RowHost::unsubscribe`] calls.
    fn subscribe(&mut self);

    /// Stop delivering gesture deltas for this row.
    fn unsubscribe(&mut self);

    /// Position the row's content and panel.
    ///
    /// `offsets` are presentation values: during an animation they are the
    /// sampled values for the current frame.
    fn apply_offsets(&mut self, bounds: &SwipeBounds, offsets: &OffsetSet);

    /// Play commit feedback. Fire-and-forget.
    fn play_haptic(&mut self, pattern: FeedbackPattern);

    /// An animation is running; call [`RowController::tick`] on the next frame.
    fn request_frame(&mut self) {}
}

/// Composition root for one swipeable row.
///
/// Owns the row's [`SwipeState`], its [`AnimationSequencer`], the host
/// services and the optional full-swipe callback. Dropping the controller
/// tears it down, so a row destroyed while hovered never leaks its delta
/// subscription.
///
/// ```
/// use core::time::Duration;
/// use kurbo::Size;
/// use understory_swipe::{
///     FeedbackPattern, GestureDelta, OffsetSet, Phase, RowController, RowHost, SwipeBounds,
///     SwipeConfig,
/// };
///
/// #[derive(Default)]
/// struct Host {
///     subscribed: bool,
/// }
///
/// impl RowHost for Host {
///     fn subscribe(&mut self) { self.subscribed = true; }
///     fn unsubscribe(&mut self) { self.subscribed = false; }
///     fn apply_offsets(&mut self, _: &SwipeBounds, _: &OffsetSet) {}
///     fn play_haptic(&mut self, _: FeedbackPattern) {}
/// }
///
/// let mut row = RowController::new(SwipeConfig::default(), Host::default()).unwrap();
/// row.layout(Size::new(320.0, 44.0), Size::new(320.0, 44.0));
/// row.pointer_entered();
/// assert!(row.host().subscribed);
///
/// row.delta(GestureDelta::changed(-240.0));
/// assert_eq!(row.phase(), Phase::Committing);
///
/// row.tick(Duration::ZERO);
/// row.tick(Duration::from_millis(50));
/// assert_eq!(row.phase(), Phase::Committed);
/// ```
pub struct RowController<H: RowHost> {
    config: SwipeConfig,
    state: SwipeState,
    sequencer: AnimationSequencer,
    presentation: OffsetSet,
    host: H,
    on_full_swipe: Option<Box<dyn FnMut()>>,
    content: Size,
    container: Size,
    torn_down: bool,
}

impl<H: RowHost> RowController<H> {
    /// Creates a controller, rejecting invalid configuration.
    pub fn new(config: SwipeConfig, host: H) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            state: SwipeState::new(),
            sequencer: AnimationSequencer::new(),
            presentation: OffsetSet::new(),
            host,
            on_full_swipe: None,
            content: Size::ZERO,
            container: Size::ZERO,
            torn_down: false,
        })
    }

    /// Registers the callback invoked once per completed commit.
    ///
    /// A row with a callback keeps its panel open after the commit until the
    /// host removes or resets it: the configured
    /// [`after_commit`](SwipeConfig::after_commit) is overwritten with
    /// [`AfterCommit::AwaitHost`], even if it was set explicitly.
    #[must_use]
    pub fn on_full_swipe(mut self, callback: impl FnMut() + 'static) -> Self {
        self.on_full_swipe = Some(Box::new(callback));
        self.config.after_commit = AfterCommit::AwaitHost;
        self
    }

    /// The effective configuration.
    #[must_use]
    pub fn config(&self) -> &SwipeConfig {
        &self.config
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    /// The underlying state machine.
    #[must_use]
    pub fn state(&self) -> &SwipeState {
        &self.state
    }

    /// Measured bounds, once known.
    #[must_use]
    pub fn bounds(&self) -> Option<&SwipeBounds> {
        self.state.bounds()
    }

    /// Presentation values of the offsets, as last handed to the host.
    #[must_use]
    pub fn offsets(&self) -> &OffsetSet {
        &self.presentation
    }

    /// Cosmetic corner radius for the view glue.
    #[must_use]
    pub fn corner_radius(&self) -> f64 {
        self.config.corner_radius
    }

    /// Shared access to the host.
    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Exclusive access to the host.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Reports a layout pass: the wrapped content's fitted size and the row's container size.
    pub fn layout(&mut self, content: Size, container: Size) {
        self.content = content;
        self.container = container;
        self.dispatch(SwipeEvent::LayoutMeasured { content, container });
    }

    /// The wrapped content changed size; re-derives the centering padding.
    pub fn set_content_size(&mut self, content: Size) {
        self.layout(content, self.container);
    }

    /// The row's container was relaid out.
    ///
    /// Only the padding follows the new width; the travel distance stays
    /// fixed at the width captured by the first measurement.
    pub fn set_container_size(&mut self, container: Size) {
        self.layout(self.content, container);
    }

    /// The pointer entered the row.
    pub fn pointer_entered(&mut self) {
        self.dispatch(SwipeEvent::PointerEntered);
    }

    /// The pointer left the row.
    pub fn pointer_exited(&mut self) {
        self.dispatch(SwipeEvent::PointerExited);
    }

    /// Feeds one gesture delta, in arrival order.
    pub fn delta(&mut self, delta: GestureDelta) {
        self.dispatch(SwipeEvent::Delta(delta));
    }

    /// Animates an open or tracked row back to rest.
    pub fn close(&mut self) {
        self.dispatch(SwipeEvent::Close);
    }

    /// Snaps the row to rest, e.g. when it is reused for another item.
    pub fn reset(&mut self) {
        self.dispatch(SwipeEvent::Reset);
    }

    /// Releases the delta subscription and stops any animation.
    ///
    /// Called automatically on drop. Safe to call more than once.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;
        self.dispatch(SwipeEvent::Teardown);
    }

    /// Advances the running animation to `now`.
    ///
    /// Returns `true` if an animation produced a frame.
    pub fn tick(&mut self, now: Duration) -> bool {
        let Some(frame) = self.sequencer.tick(now) else {
            return false;
        };
        for (id, value) in &frame.values {
            self.presentation.set(*id, *value);
        }
        self.push_offsets();
        if frame.finished {
            self.dispatch(SwipeEvent::AnimationFinished(frame.id));
        } else {
            self.host.request_frame();
        }
        true
    }

    fn dispatch(&mut self, event: SwipeEvent) {
        if self.torn_down && event != SwipeEvent::Teardown {
            return;
        }
        let effects = self.state.apply(&self.config, event);
        for effect in effects {
            match effect {
                Effect::Subscribe => self.host.subscribe(),
                Effect::Unsubscribe => self.host.unsubscribe(),
                Effect::ApplyOffsets => {
                    if !self.sequencer.is_running() {
                        self.presentation = self.state.offsets().clone();
                    }
                    self.push_offsets();
                }
                Effect::StartAnimation(request) => {
                    if self.presentation.is_empty() {
                        self.presentation = self.state.offsets().clone();
                    }
                    match self.sequencer.start(request) {
                        Ok(_) => self.host.request_frame(),
                        Err(busy) => log::warn!("{busy}"),
                    }
                }
                Effect::CancelAnimation => {
                    self.sequencer.cancel();
                    self.presentation = self.state.offsets().clone();
                }
                Effect::PlayHaptic(pattern) => self.host.play_haptic(pattern),
                Effect::InvokeFullSwipe => {
                    if let Some(callback) = self.on_full_swipe.as_mut() {
                        callback();
                    }
                }
            }
        }
    }

    fn push_offsets(&mut self) {
        if let Some(bounds) = self.state.bounds() {
            self.host.apply_offsets(bounds, &self.presentation);
        }
    }
}

impl<H: RowHost> Drop for RowController<H> {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl<H: RowHost + fmt::Debug> fmt::Debug for RowController<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RowController")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("sequencer", &self.sequencer)
            .field("presentation", &self.presentation)
            .field("host", &self.host)
            .field("on_full_swipe", &self.on_full_swipe.is_some())
            .field("content", &self.content)
            .field("container", &self.container)
            .field("torn_down", &self.torn_down)
            .finish()
    }
}
