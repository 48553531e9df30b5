//! Viewport and element geometry.
//!
//! All rectangles are in document coordinates (pixels from the top of the
//! page). The viewport is the window onto the document at the current scroll
//! offset.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::types::TargetId;

/// Snapshot of the visible window onto the document.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Viewport {
    /// Vertical scroll offset of the viewport's top edge.
    pub scroll_y: f64,
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(scroll_y: f64, width: f64, height: f64) -> Self {
        Self {
            scroll_y,
            width,
            height,
        }
    }

    /// Same viewport dimensions scrolled to `scroll_y`.
    pub fn scrolled_to(&self, scroll_y: f64) -> Self {
        Self { scroll_y, ..*self }
    }

    pub fn bottom(&self) -> f64 {
        self.scroll_y + self.height
    }
}

/// Axis-aligned element bounds in document coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Top edge relative to the viewport's top edge.
    pub fn top_in(&self, viewport: &Viewport) -> f64 {
        self.top - viewport.scroll_y
    }

    /// Fraction of this rect's height currently inside the viewport.
    ///
    /// Zero-height rects count as fully visible while their top edge lies
    /// within the viewport.
    pub fn visible_fraction(&self, viewport: &Viewport) -> f32 {
        if self.height <= 0.0 {
            let inside = self.top >= viewport.scroll_y && self.top <= viewport.bottom();
            return if inside { 1.0 } else { 0.0 };
        }
        let overlap = self.bottom().min(viewport.bottom()) - self.top.max(viewport.scroll_y);
        (overlap.max(0.0) / self.height).clamp(0.0, 1.0) as f32
    }

    /// Whether the top edge sits at or above the horizontal line at
    /// `fraction` of the viewport height.
    pub fn top_reached_line(&self, viewport: &Viewport, fraction: f32) -> bool {
        self.top_in(viewport) <= fraction as f64 * viewport.height
    }
}

/// Bounding-box query offered by the rendering layer.
///
/// Returning `None` means the element is no longer part of the document.
pub trait LayoutSource {
    fn bounds(&self, target: &TargetId) -> Option<Rect>;
}

impl LayoutSource for HashMap<TargetId, Rect> {
    fn bounds(&self, target: &TargetId) -> Option<Rect> {
        self.get(target).copied()
    }
}

impl<L: LayoutSource + ?Sized> LayoutSource for &L {
    fn bounds(&self, target: &TargetId) -> Option<Rect> {
        (**self).bounds(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 0.0001;

    #[test]
    fn test_visible_fraction() {
        let viewport = Viewport::new(1000.0, 1280.0, 800.0);

        // Entirely below
        let below = Rect::new(0.0, 1900.0, 100.0, 200.0);
        assert_eq!(below.visible_fraction(&viewport), 0.0);

        // Half visible at the bottom edge
        let half = Rect::new(0.0, 1700.0, 100.0, 200.0);
        assert!((half.visible_fraction(&viewport) - 0.5).abs() < EPSILON);

        // Fully inside
        let inside = Rect::new(0.0, 1200.0, 100.0, 200.0);
        assert!((inside.visible_fraction(&viewport) - 1.0).abs() < EPSILON);

        // Taller than viewport
        let tall = Rect::new(0.0, 900.0, 100.0, 1600.0);
        assert!((tall.visible_fraction(&viewport) - 0.5).abs() < EPSILON);
    }

    #[test]
    fn test_zero_height_visibility() {
        let viewport = Viewport::new(0.0, 800.0, 600.0);
        assert_eq!(Rect::new(0.0, 300.0, 10.0, 0.0).visible_fraction(&viewport), 1.0);
        assert_eq!(Rect::new(0.0, 900.0, 10.0, 0.0).visible_fraction(&viewport), 0.0);
    }

    #[test]
    fn test_top_reached_line() {
        let viewport = Viewport::new(1200.0, 1280.0, 1000.0);
        let rect = Rect::new(0.0, 2050.0, 100.0, 300.0);
        assert!(rect.top_reached_line(&viewport, 0.85));
        assert!(!rect.top_reached_line(&viewport.scrolled_to(1199.0), 0.85));
    }

    #[test]
    fn test_map_layout_source() {
        let mut layout = HashMap::new();
        layout.insert(TargetId::new("a"), Rect::new(0.0, 10.0, 5.0, 5.0));
        assert_eq!(layout.bounds(&TargetId::new("a")).map(|r| r.top), Some(10.0));
        assert!(layout.bounds(&TargetId::new("b")).is_none());
    }
}
