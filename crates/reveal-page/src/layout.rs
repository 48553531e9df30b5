//! Precomputed element bounds.
//!
//! The page has no renderer, so every section places its elements into a
//! `StaticLayout` up front. Sections stack top to bottom; a pinned section
//! adds spacer height after itself so the document is long enough to scroll
//! through the pin.

use std::collections::HashMap;

use reveal_motion::{LayoutSource, Rect, TargetId, Viewport};

/// Element bounds in document coordinates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StaticLayout {
    bounds: HashMap<TargetId, Rect>,
    document_height: f64,
}

impl StaticLayout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, target: impl Into<TargetId>, rect: Rect) {
        let rect_bottom = rect.bottom();
        self.bounds.insert(target.into(), rect);
        self.document_height = self.document_height.max(rect_bottom);
    }

    /// Take an element out of the document.
    pub fn remove(&mut self, target: &TargetId) -> Option<Rect> {
        self.bounds.remove(target)
    }

    pub fn get(&self, target: &TargetId) -> Option<Rect> {
        self.bounds.get(target).copied()
    }

    pub fn len(&self) -> usize {
        self.bounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bounds.is_empty()
    }

    pub fn document_height(&self) -> f64 {
        self.document_height
    }

    /// Largest valid scroll offset for `viewport`.
    pub fn max_scroll(&self, viewport: &Viewport) -> f64 {
        (self.document_height - viewport.height).max(0.0)
    }
}

impl LayoutSource for StaticLayout {
    fn bounds(&self, target: &TargetId) -> Option<Rect> {
        self.get(target)
    }
}

/// Stacks sections vertically.
#[derive(Debug)]
pub struct LayoutBuilder {
    viewport: Viewport,
    cursor: f64,
    layout: StaticLayout,
}

impl LayoutBuilder {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            cursor: 0.0,
            layout: StaticLayout::new(),
        }
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Place a full-width section at the cursor and return its top.
    pub fn section(&mut self, id: &str, height: f64) -> f64 {
        let top = self.cursor;
        self.layout
            .insert(id, Rect::new(0.0, top, self.viewport.width, height));
        self.cursor += height;
        top
    }

    /// Extra scroll distance below the last section.
    pub fn spacer(&mut self, height: f64) {
        self.cursor += height.max(0.0);
        self.layout.document_height = self.layout.document_height.max(self.cursor);
    }

    /// Full-width element at an absolute top.
    pub fn element(&mut self, id: &str, top: f64, height: f64) {
        self.layout
            .insert(id, Rect::new(0.0, top, self.viewport.width, height));
    }

    /// Element in column `column` of a `columns`-wide grid.
    pub fn grid_cell(&mut self, id: &str, column: usize, columns: usize, top: f64, height: f64) {
        let width = self.viewport.width / columns.max(1) as f64;
        self.layout
            .insert(id, Rect::new(width * column as f64, top, width, height));
    }

    pub fn finish(self) -> StaticLayout {
        self.layout
    }
}
