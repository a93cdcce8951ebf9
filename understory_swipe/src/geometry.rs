// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layout bounds derived from the row's measured content and container sizes.
//!
//! Bounds are unknown when a row is constructed. The first layout pass with a
//! positive container width fixes [`SwipeBounds::host_init_width`] for the
//! lifetime of the row; later passes only refresh the centering padding via
//! [`SwipeBounds::relayout`].

use kurbo::Size;

/// Travel bounds for a measured row.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SwipeBounds {
    /// Inset that compensates for centering applied by the content layout.
    ///
    /// Used both as the leading inset and as the vertical inset of the content.
    pub padding: f64,
    /// Row width captured at the first layout pass.
    pub host_init_width: f64,
    /// Lowest value any content offset may take (`-host_init_width`).
    pub min_offset: f64,
    /// Highest value any content offset may take (always `0`).
    pub max_offset: f64,
    /// Gap between content and panel at rest.
    pub spacing: f64,
}

/// Computes travel bounds for a row whose content measures `content` inside a
/// container of size `container`.
///
/// Non-finite or negative widths are treated as zero; a zero-width result is
/// reported by [`SwipeBounds::is_measured`] returning `false`.
#[must_use]
pub fn compute_bounds(content: Size, container: Size, spacing: f64) -> SwipeBounds {
    let host_init_width = sanitize(container.width);
    SwipeBounds {
        padding: centering_padding(content.width, container.width),
        host_init_width,
        min_offset: -host_init_width,
        max_offset: 0.0,
        spacing: sanitize(spacing),
    }
}

/// `max((container_width - content_width) / 2, 0)`.
#[must_use]
pub fn centering_padding(content_width: f64, container_width: f64) -> f64 {
    let padding = (sanitize(container_width) - sanitize(content_width)) * 0.5;
    if padding > 0.0 { padding } else { 0.0 }
}

impl SwipeBounds {
    /// Returns `true` once a positive row width has been captured.
    #[must_use]
    pub fn is_measured(&self) -> bool {
        self.host_init_width > 0.0
    }

    /// Range of the panel's reveal amount: `[0, host_init_width]`.
    #[must_use]
    pub fn reveal_range(&self) -> (f64, f64) {
        (0.0, self.host_init_width)
    }

    /// Recomputes the padding for a new layout pass, keeping the captured width.
    #[must_use]
    pub fn relayout(&self, content: Size, container: Size) -> Self {
        Self {
            padding: centering_padding(content.width, container.width),
            ..*self
        }
    }
}

fn sanitize(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}
