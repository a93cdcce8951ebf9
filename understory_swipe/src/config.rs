// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Row configuration and construction-time validation.

use core::fmt;
use core::time::Duration;

use crate::animation::Easing;

/// Which coupled-offset convention a row uses to reveal its action panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum AnchoringMode {
    /// The panel is attached to the content's trailing edge and grows in
    /// width from `0` to the measured row width while the content shifts
    /// toward the leading edge.
    #[default]
    GrowingPanel,
    /// The panel is a fixed-width sibling with its own leading offset, which
    /// slides from `spacing` down to `-host_init_width` alongside the content.
    SlidingPanel,
}

/// What happens to a row once its commit animation has completed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum AfterCommit {
    /// The panel stays open until the pointer leaves the row, then springs back.
    ///
    /// This is the behavior of a row with no full-swipe callback.
    #[default]
    CloseOnExit,
    /// The panel stays open until the host removes or resets the row.
    ///
    /// [`RowController::on_full_swipe`](crate::RowController::on_full_swipe)
    /// selects this mode.
    AwaitHost,
}

/// Feedback pattern requested from the host when a full swipe commits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum FeedbackPattern {
    /// A short tick signalling that something snapped into place.
    #[default]
    Alignment,
    /// Feedback for crossing a discrete level or step.
    LevelChange,
    /// Unspecified, platform-chosen feedback.
    Generic,
}

/// Configuration for one swipeable row.
///
/// All values are fixed when the row is constructed. Use
/// [`SwipeConfig::validate`] (called by [`RowController::new`](crate::RowController::new))
/// to reject values that would make clamping undefined.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SwipeConfig {
    /// Gap between the content and the action panel at rest. Must be `>= 0`.
    pub spacing: f64,
    /// Cosmetic corner radius applied by the view glue. Must be `>= 0`.
    pub corner_radius: f64,
    /// Reveal magnitude that, once exceeded, commits the full swipe. Must be `> 0`.
    pub full_swipe_threshold: f64,
    /// Duration of the snap-open animation that follows a commit.
    pub commit_duration: Duration,
    /// Duration of the animated return to rest.
    pub spring_back_duration: Duration,
    /// Coupled-offset convention for the row.
    pub anchoring: AnchoringMode,
    /// Easing curve shared by both animations.
    pub easing: Easing,
    /// Feedback requested from the host on commit.
    pub feedback: FeedbackPattern,
    /// Behavior of the row once a commit has completed.
    ///
    /// [`RowController::on_full_swipe`](crate::RowController::on_full_swipe)
    /// replaces this with [`AfterCommit::AwaitHost`], whatever was set here.
    pub after_commit: AfterCommit,
}

impl SwipeConfig {
    /// Default reveal magnitude for a full swipe.
    pub const DEFAULT_FULL_SWIPE_THRESHOLD: f64 = 200.0;
    /// Default commit animation duration (50 ms).
    pub const DEFAULT_COMMIT_DURATION: Duration = Duration::from_millis(50);
    /// Default spring-back animation duration (100 ms).
    pub const DEFAULT_SPRING_BACK_DURATION: Duration = Duration::from_millis(100);

    /// Creates a configuration with the default values.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            spacing: 0.0,
            corner_radius: 0.0,
            full_swipe_threshold: Self::DEFAULT_FULL_SWIPE_THRESHOLD,
            commit_duration: Self::DEFAULT_COMMIT_DURATION,
            spring_back_duration: Self::DEFAULT_SPRING_BACK_DURATION,
            anchoring: AnchoringMode::GrowingPanel,
            easing: Easing::EaseInOut,
            feedback: FeedbackPattern::Alignment,
            after_commit: AfterCommit::CloseOnExit,
        }
    }

    /// Sets the gap between content and panel.
    #[must_use]
    pub const fn with_spacing(mut self, spacing: f64) -> Self {
        self.spacing = spacing;
        self
    }

    /// Sets the cosmetic corner radius.
    #[must_use]
    pub const fn with_corner_radius(mut self, corner_radius: f64) -> Self {
        self.corner_radius = corner_radius;
        self
    }

    /// Sets the full-swipe threshold.
    #[must_use]
    pub const fn with_full_swipe_threshold(mut self, threshold: f64) -> Self {
        self.full_swipe_threshold = threshold;
        self
    }

    /// Sets the commit animation duration.
    #[must_use]
    pub const fn with_commit_duration(mut self, duration: Duration) -> Self {
        self.commit_duration = duration;
        self
    }

    /// Sets the spring-back animation duration.
    #[must_use]
    pub const fn with_spring_back_duration(mut self, duration: Duration) -> Self {
        self.spring_back_duration = duration;
        self
    }

    /// Sets the anchoring mode.
    #[must_use]
    pub const fn with_anchoring(mut self, anchoring: AnchoringMode) -> Self {
        self.anchoring = anchoring;
        self
    }

    /// Sets the easing curve.
    #[must_use]
    pub const fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Sets the commit feedback pattern.
    #[must_use]
    pub const fn with_feedback(mut self, feedback: FeedbackPattern) -> Self {
        self.feedback = feedback;
        self
    }

    /// Sets the post-commit behavior.
    #[must_use]
    pub const fn with_after_commit(mut self, after_commit: AfterCommit) -> Self {
        self.after_commit = after_commit;
        self
    }

    /// Checks that every numeric field is finite and within its allowed range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.spacing.is_finite() {
            return Err(ConfigError::NonFinite("spacing"));
        }
        if !self.corner_radius.is_finite() {
            return Err(ConfigError::NonFinite("corner_radius"));
        }
        if !self.full_swipe_threshold.is_finite() {
            return Err(ConfigError::NonFinite("full_swipe_threshold"));
        }
        if self.spacing < 0.0 {
            return Err(ConfigError::NegativeSpacing(self.spacing));
        }
        if self.corner_radius < 0.0 {
            return Err(ConfigError::NegativeCornerRadius(self.corner_radius));
        }
        if self.full_swipe_threshold <= 0.0 {
            return Err(ConfigError::NonPositiveThreshold(self.full_swipe_threshold));
        }
        Ok(())
    }
}

impl Default for SwipeConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// A [`SwipeConfig`] value that was rejected at construction time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ConfigError {
    /// `spacing` was negative.
    NegativeSpacing(f64),
    /// `corner_radius` was negative.
    NegativeCornerRadius(f64),
    /// `full_swipe_threshold` was zero or negative.
    NonPositiveThreshold(f64),
    /// The named field was NaN or infinite.
    NonFinite(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativeSpacing(v) => write!(f, "spacing must be >= 0, got {v}"),
            Self::NegativeCornerRadius(v) => write!(f, "corner radius must be >= 0, got {v}"),
            Self::NonPositiveThreshold(v) => {
                write!(f, "full swipe threshold must be > 0, got {v}")
            }
            Self::NonFinite(field) => write!(f, "{field} must be finite"),
        }
    }
}

impl core::error::Error for ConfigError {}
