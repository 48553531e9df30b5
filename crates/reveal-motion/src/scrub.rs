//! Scroll-scrubbed regions and pinning.
//!
//! A scrubbed timeline takes its position from scroll offset instead of from
//! elapsed time. The range is anchored to an element:
//!
//! ```text
//! start = anchor.top - start_fraction * viewport.height
//! end   = start + distance
//! progress = clamp((scroll_y - start) / (end - start), 0, 1)
//! ```
//!
//! With `pin` set, the anchor is held in place while `start <= scroll_y < end`
//! and the pinning timeline owns scroll for that stretch. Layout supplied by
//! the rendering layer is expected to already include the pin spacing.

use serde::{Deserialize, Serialize};

use crate::geometry::{Rect, Viewport};
use crate::types::TargetId;

/// Length of a scrubbed range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "unit", content = "value", rename_all = "snake_case")]
pub enum PinDistance {
    Px(f64),
    /// Multiple of the viewport height (`+=130%` is 1.3).
    ViewportHeights(f64),
}

impl PinDistance {
    pub fn resolve(&self, viewport: &Viewport) -> f64 {
        match *self {
            Self::Px(px) => px,
            Self::ViewportHeights(f) => f * viewport.height,
        }
    }
}

/// Scroll range driving a scrubbed timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PinnedRange {
    pub anchor: TargetId,
    /// Viewport line the anchor's top must reach to start (0.0 is `top top`).
    pub start_fraction: f32,
    pub distance: PinDistance,
    pub pin: bool,
    /// Time the displayed position takes to catch up with scroll.
    pub scrub_lag_ms: Option<f32>,
}

impl PinnedRange {
    /// Pinned range starting when the anchor reaches the viewport top.
    pub fn new(anchor: impl Into<TargetId>, distance: PinDistance) -> Self {
        Self {
            anchor: anchor.into(),
            start_fraction: 0.0,
            distance,
            pin: true,
            scrub_lag_ms: None,
        }
    }

    pub fn start_fraction(mut self, fraction: f32) -> Self {
        self.start_fraction = fraction;
        self
    }

    /// Scrub without holding the anchor in place.
    pub fn unpinned(mut self) -> Self {
        self.pin = false;
        self
    }

    pub fn scrub_lag_ms(mut self, lag: f32) -> Self {
        self.scrub_lag_ms = (lag.is_finite() && lag > 0.0).then_some(lag);
        self
    }

    /// Resolve against the anchor's current bounds.
    pub fn resolve(&self, anchor: Rect, viewport: &Viewport) -> ResolvedRange {
        let start = anchor.top - self.start_fraction as f64 * viewport.height;
        let distance = self.distance.resolve(viewport).max(0.0);
        ResolvedRange {
            start,
            end: start + distance,
        }
    }
}

/// Scroll offsets bounding a scrubbed range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResolvedRange {
    pub start: f64,
    pub end: f64,
}

impl ResolvedRange {
    pub fn len(&self) -> f64 {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.len() <= 0.0
    }

    /// Normalized progress at `scroll_y`; monotonic in scroll.
    pub fn progress(&self, scroll_y: f64) -> f32 {
        if self.is_empty() {
            return if scroll_y >= self.start { 1.0 } else { 0.0 };
        }
        ((scroll_y - self.start) / self.len()).clamp(0.0, 1.0) as f32
    }

    /// Whether a pin on this range is engaged at `scroll_y`.
    pub fn contains(&self, scroll_y: f64) -> bool {
        !self.is_empty() && scroll_y >= self.start && scroll_y < self.end
    }

    /// Translation keeping a pinned anchor fixed in the viewport.
    pub fn pin_offset(&self, scroll_y: f64) -> f64 {
        (scroll_y - self.start).clamp(0.0, self.len().max(0.0))
    }
}

/// Live binding of a player to a scroll range.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollBinding {
    pub range: PinnedRange,
    /// Range as resolved at the last scroll event.
    pub resolved: Option<ResolvedRange>,
    /// Position dictated by scroll; the displayed position trails it by lag.
    pub target: f32,
    pub(crate) catch_up_ms: f32,
}

impl ScrollBinding {
    pub fn new(range: PinnedRange) -> Self {
        Self {
            range,
            resolved: None,
            target: 0.0,
            catch_up_ms: 0.0,
        }
    }

    /// Whether this binding currently holds the page.
    pub fn is_pinning(&self, scroll_y: f64) -> bool {
        self.range.pin && self.resolved.is_some_and(|r| r.contains(scroll_y))
    }
}
