// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Coupled offsets: N values updated by the same signed delta, clamped independently.
//!
//! Both anchoring modes reduce to a small [`OffsetSet`]. Each [`CoupledOffset`]
//! carries its own `[min, max]` bounds, a rest value, an open value, and a
//! `gain` that maps the gesture's `dx` onto the offset (`+1`, `-1`, or `0` for
//! offsets that only move during animations). One offset is the *primary*
//! offset; its displacement from rest is the row's reveal magnitude.

use smallvec::SmallVec;

use crate::animation::Track;
use crate::config::AnchoringMode;
use crate::geometry::SwipeBounds;

/// Identifies one of the coupled offsets of a row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OffsetId {
    /// Leading edge of the host content.
    HostLeading,
    /// Trailing edge of the host content.
    HostTrailing,
    /// Width of a panel that grows from the content's trailing edge.
    PanelWidth,
    /// Leading offset of a sliding panel.
    PanelLeading,
    /// Gap between the content's trailing edge and a growing panel.
    PanelGap,
}

/// One bounded offset of a row.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CoupledOffset {
    /// Which offset this is.
    pub id: OffsetId,
    /// Current value, always within `[min, max]`.
    pub value: f64,
    /// Value when the row is closed.
    pub rest: f64,
    /// Value when the row is fully open.
    pub open: f64,
    /// Lower bound.
    pub min: f64,
    /// Upper bound.
    pub max: f64,
    /// Multiplier applied to a gesture delta before clamping.
    pub gain: f64,
}

impl CoupledOffset {
    fn new(id: OffsetId, rest: f64, open: f64, bounds: (f64, f64), gain: f64) -> Self {
        Self {
            id,
            value: rest,
            rest,
            open,
            min: bounds.0,
            max: bounds.1,
            gain,
        }
    }

    /// Value this offset would take after applying `dx`, clamped to its bounds.
    #[must_use]
    pub fn displaced(&self, dx: f64) -> f64 {
        self.clamp(self.value + self.gain * dx)
    }

    /// Distance of the current value from rest.
    #[must_use]
    pub fn reveal(&self) -> f64 {
        magnitude(self.value - self.rest)
    }

    /// Clamps `value` into `[min, max]`; NaN maps to the rest value.
    #[must_use]
    pub fn clamp(&self, value: f64) -> f64 {
        if value.is_nan() {
            return self.rest;
        }
        value.clamp(self.min, self.max)
    }
}

/// The coupled offsets of one row.
///
/// An empty set stands for a row whose geometry has not been measured yet.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OffsetSet {
    entries: SmallVec<[CoupledOffset; 4]>,
    primary: Option<OffsetId>,
}

impl OffsetSet {
    /// Creates an empty (unmeasured) set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the offsets for `mode` from measured bounds, all at rest.
    #[must_use]
    pub fn for_mode(mode: AnchoringMode, bounds: &SwipeBounds) -> Self {
        let width = bounds.host_init_width;
        let content = (bounds.min_offset, bounds.max_offset);
        let mut entries = SmallVec::new();
        let primary = match mode {
            AnchoringMode::GrowingPanel => {
                entries.push(CoupledOffset::new(
                    OffsetId::PanelWidth,
                    0.0,
                    width,
                    bounds.reveal_range(),
                    -1.0,
                ));
                entries.push(CoupledOffset::new(
                    OffsetId::PanelGap,
                    bounds.spacing,
                    0.0,
                    (0.0, bounds.spacing),
                    0.0,
                ));
                OffsetId::PanelWidth
            }
            AnchoringMode::SlidingPanel => {
                entries.push(CoupledOffset::new(
                    OffsetId::PanelLeading,
                    bounds.spacing,
                    -width,
                    (-width, bounds.spacing),
                    1.0,
                ));
                OffsetId::PanelLeading
            }
        };
        entries.push(CoupledOffset::new(OffsetId::HostLeading, 0.0, -width, content, 1.0));
        entries.push(CoupledOffset::new(OffsetId::HostTrailing, 0.0, -width, content, 1.0));
        Self {
            entries,
            primary: Some(primary),
        }
    }

    /// Returns `true` if the row has not been measured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of coupled offsets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Iterates over the offsets.
    pub fn iter(&self) -> impl Iterator<Item = &CoupledOffset> {
        self.entries.iter()
    }

    /// Returns the offset with the given id.
    #[must_use]
    pub fn offset(&self, id: OffsetId) -> Option<&CoupledOffset> {
        self.entries.iter().find(|o| o.id == id)
    }

    /// Returns the current value of the offset with the given id.
    #[must_use]
    pub fn get(&self, id: OffsetId) -> Option<f64> {
        self.offset(id).map(|o| o.value)
    }

    /// Returns the primary (reveal-defining) offset.
    #[must_use]
    pub fn primary(&self) -> Option<&CoupledOffset> {
        self.primary.and_then(|id| self.offset(id))
    }

    /// Reveal magnitude: how far the primary offset is from rest.
    #[must_use]
    pub fn reveal(&self) -> f64 {
        self.primary().map_or(0.0, CoupledOffset::reveal)
    }

    /// Returns a copy with `dx` applied to every offset and each clamped to its own bounds.
    #[must_use]
    pub fn with_delta(&self, dx: f64) -> Self {
        let mut next = self.clone();
        for entry in &mut next.entries {
            entry.value = entry.displaced(dx);
        }
        next
    }

    /// Sets one offset, clamped to its bounds. Returns `false` if the id is absent.
    pub fn set(&mut self, id: OffsetId, value: f64) -> bool {
        match self.entries.iter_mut().find(|o| o.id == id) {
            Some(entry) => {
                entry.value = entry.clamp(value);
                true
            }
            None => false,
        }
    }

    /// Moves every offset to its rest value.
    pub fn settle_at_rest(&mut self) {
        for entry in &mut self.entries {
            entry.value = entry.rest;
        }
    }

    /// Moves every offset to its fully open value.
    pub fn settle_open(&mut self) {
        for entry in &mut self.entries {
            entry.value = entry.open;
        }
    }

    /// Returns `true` if every offset sits at its rest value.
    #[must_use]
    pub fn is_at_rest(&self) -> bool {
        self.entries.iter().all(|o| o.value == o.rest)
    }

    /// Animation tracks from the current values to rest.
    #[must_use]
    pub fn tracks_to_rest(&self) -> SmallVec<[Track; 4]> {
        self.entries
            .iter()
            .map(|o| Track::new(o.id, o.value, o.rest))
            .collect()
    }

    /// Animation tracks from the current values to fully open.
    #[must_use]
    pub fn tracks_to_open(&self) -> SmallVec<[Track; 4]> {
        self.entries
            .iter()
            .map(|o| Track::new(o.id, o.value, o.open))
            .collect()
    }
}

pub(crate) fn magnitude(value: f64) -> f64 {
    if value < 0.0 { -value } else { value }
}
