//! Landing page composition.
//!
//! `LandingPage` owns everything the page needs at runtime: the explicit
//! `PageState`, one `MotionManager`, the mounted section scopes and the
//! static layout the sections placed themselves into. A driver feeds it
//! actions, scroll deltas and frame ticks, and reads styles and events back.

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use reveal_config::RevealConfig;
use reveal_motion::{ElementStyle, MotionEvent, MotionManager, Scope, TargetId, Viewport};
use tracing::{debug, info, warn};

use crate::anchors::SectionId;
use crate::layout::{LayoutBuilder, StaticLayout};
use crate::sections::{MotionSettings, Section, SectionContext, landing_sections};
use crate::state::{PageAction, PageEffect, PageState};

pub struct LandingPage {
    state: PageState,
    motion: MotionManager,
    layout: StaticLayout,
    viewport: Viewport,
    settings: MotionSettings,
    sections: Vec<Box<dyn Section>>,
    scopes: Vec<(SectionId, Scope)>,
}

fn place_all(sections: &[Box<dyn Section>], viewport: Viewport, settings: &MotionSettings) -> StaticLayout {
    let mut builder = LayoutBuilder::new(viewport);
    for section in sections {
        section.place(&mut builder, settings);
    }
    builder.finish()
}

impl LandingPage {
    /// Lay out and mount the landing sections at the top of the page.
    pub fn new(config: &RevealConfig) -> Result<Self> {
        Self::with_sections(config, landing_sections())
    }

    /// Same as `new` with a custom section list.
    pub fn with_sections(config: &RevealConfig, sections: Vec<Box<dyn Section>>) -> Result<Self> {
        let settings =
            MotionSettings::from_config(&config.motion).context("invalid motion settings")?;
        let viewport = Viewport::new(0.0, config.viewport.width, config.viewport.height);
        let layout = place_all(&sections, viewport, &settings);

        let mut page = Self {
            state: PageState::new(config.navigation.scrolled_threshold_px),
            motion: MotionManager::with_viewport(viewport),
            layout,
            viewport,
            settings,
            sections,
            scopes: Vec::new(),
        };

        for index in 0..page.sections.len() {
            page.mount_section(index)?;
        }
        page.motion.on_scroll(page.viewport, &page.layout);

        info!(
            sections = page.scopes.len(),
            document_height = page.layout.document_height(),
            "landing page mounted"
        );
        Ok(page)
    }

    fn mount_section(&mut self, index: usize) -> Result<()> {
        let section = &self.sections[index];
        let ctx = SectionContext {
            settings: &self.settings,
            page: &self.state,
            viewport: self.viewport,
        };
        let scope = section
            .mount(&mut self.motion, &ctx)
            .with_context(|| format!("mounting section {}", section.id()))?;
        self.scopes.push((section.id(), scope));
        Ok(())
    }

    /// Apply a user action and perform the effects it produces.
    pub fn dispatch(&mut self, action: PageAction) -> Vec<PageEffect> {
        let effects = self.state.reduce(action);
        for effect in &effects {
            match *effect {
                PageEffect::ScrollTo(section) => {
                    self.scroll_to(section);
                }
                PageEffect::LockScroll => debug!("page scroll locked"),
                PageEffect::UnlockScroll => debug!("page scroll unlocked"),
            }
        }
        effects
    }

    /// Jump to a section anchor. Returns the new scroll offset, or `None`
    /// when scroll is locked or the anchor is not on the page.
    pub fn scroll_to(&mut self, section: SectionId) -> Option<f64> {
        if self.state.scroll_locked() {
            debug!(%section, "scroll_to ignored while scroll is locked");
            return None;
        }
        let Some(bounds) = self.layout.get(&section.target()) else {
            warn!(%section, "no anchor for section");
            return None;
        };
        let y = bounds.top.clamp(0.0, self.layout.max_scroll(&self.viewport));
        self.set_scroll(y);
        Some(y)
    }

    /// Scroll by `dy` pixels, clamped to the document. Ignored while the
    /// contact modal locks scroll.
    pub fn scroll_by(&mut self, dy: f64) -> bool {
        if self.state.scroll_locked() {
            debug!(dy, "scroll ignored while scroll is locked");
            return false;
        }
        let max = self.layout.max_scroll(&self.viewport);
        let y = (self.viewport.scroll_y + dy).clamp(0.0, max);
        if y == self.viewport.scroll_y {
            return false;
        }
        self.set_scroll(y);
        true
    }

    fn set_scroll(&mut self, y: f64) {
        self.viewport = self.viewport.scrolled_to(y);
        self.motion.on_scroll(self.viewport, &self.layout);
        self.state.reduce(PageAction::Scrolled(y));
    }

    /// New viewport size. Sections are laid out again, since their heights
    /// depend on the viewport, and every trigger and scrub range re-evaluates.
    pub fn resize(&mut self, width: f64, height: f64) {
        let resized = Viewport::new(0.0, width, height);
        self.layout = place_all(&self.sections, resized, &self.settings);
        let y = self.viewport.scroll_y.clamp(0.0, self.layout.max_scroll(&resized));
        self.viewport = resized.scrolled_to(y);
        debug!(width, height, scroll_y = y, "page resized");
        self.motion.on_scroll(self.viewport, &self.layout);
    }

    /// Advance animations by one frame. Returns whether anything is still
    /// animating.
    pub fn frame(&mut self, delta_ms: f32) -> bool {
        self.motion.tick(delta_ms)
    }

    /// Tear down one section's timelines and triggers, last registered first.
    pub fn unmount(&mut self, section: SectionId) -> bool {
        let Some(index) = self.scopes.iter().position(|(id, _)| *id == section) else {
            return false;
        };
        let (_, scope) = self.scopes.remove(index);
        scope.close(&mut self.motion);
        info!(%section, "section unmounted");
        true
    }

    /// Sections currently mounted, top to bottom.
    pub fn mounted(&self) -> Vec<SectionId> {
        self.scopes.iter().map(|(id, _)| *id).collect()
    }

    pub fn styles(&self) -> BTreeMap<TargetId, ElementStyle> {
        self.motion.styles()
    }

    pub fn style_of(&self, target: &str) -> Option<ElementStyle> {
        self.motion.style_of(&TargetId::new(target))
    }

    pub fn drain_events(&mut self) -> Vec<MotionEvent> {
        self.motion.drain_events().collect()
    }

    pub fn state(&self) -> &PageState {
        &self.state
    }

    pub fn motion(&self) -> &MotionManager {
        &self.motion
    }

    pub fn motion_mut(&mut self) -> &mut MotionManager {
        &mut self.motion
    }

    pub fn layout(&self) -> &StaticLayout {
        &self.layout
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn settings(&self) -> &MotionSettings {
        &self.settings
    }
}
