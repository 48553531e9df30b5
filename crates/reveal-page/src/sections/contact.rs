//! Contact: header, main card and the row of info cards.
//!
//! The contact modal itself is page state, not motion; see `PageState`.

use anyhow::Result;
use reveal_motion::{
    AnimatableProperty::{Opacity, Y},
    MotionManager, Placement, Scope, Tween, px,
};
use tracing::info;

use super::{MotionSettings, Section, SectionContext, reveal};
use crate::anchors::SectionId;
use crate::layout::LayoutBuilder;

pub const HEADER: &str = "contact-header";
pub const MAIN_CARD: &str = "contact-card-main";
pub const INFO_GRID: &str = "contact-info-grid";
pub const INFO_CARDS: [&str; 3] = ["contact-info-card-1", "contact-info-card-2", "contact-info-card-3"];

#[derive(Debug, Clone, Copy, Default)]
pub struct Contact;

impl Section for Contact {
    fn id(&self) -> SectionId {
        SectionId::Contact
    }

    fn place(&self, layout: &mut LayoutBuilder, _settings: &MotionSettings) {
        let top = layout.section(SectionId::Contact.anchor(), 1100.0);
        layout.element(HEADER, top + 80.0, 160.0);
        layout.element(MAIN_CARD, top + 300.0, 360.0);
        layout.element(INFO_GRID, top + 720.0, 220.0);
        for (i, card) in INFO_CARDS.iter().enumerate() {
            layout.grid_cell(card, i, INFO_CARDS.len(), top + 720.0, 220.0);
        }
    }

    fn mount(&self, manager: &mut MotionManager, ctx: &SectionContext<'_>) -> Result<Scope> {
        let mut scope = manager.scope("contact");
        let threshold = ctx.settings.reveal_threshold;

        let header = Tween::new(HEADER)
            .from_to(Y, px(30.0), px(0.0))
            .from_to(Opacity, 0.0.into(), 1.0.into())
            .duration_ms(600.0);
        let card = Tween::new(MAIN_CARD)
            .from_to(Y, px(40.0), px(0.0))
            .from_to(Opacity, 0.0.into(), 1.0.into())
            .duration_ms(500.0);
        let info_cards = Tween::each(INFO_CARDS)
            .from_to(Y, px(30.0), px(0.0))
            .from_to(Opacity, 0.0.into(), 1.0.into())
            .duration_ms(500.0)
            .stagger_ms(100.0);

        reveal(manager, &mut scope, ctx, HEADER, threshold, header, Placement::Sequential)?;
        reveal(manager, &mut scope, ctx, MAIN_CARD, threshold, card, Placement::Sequential)?;
        // Cards are revealed together off their shared grid.
        reveal(manager, &mut scope, ctx, INFO_GRID, threshold, info_cards, Placement::Sequential)?;

        info!(section = "contact", registrations = scope.len(), "mounted");
        Ok(scope)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::PageState;
    use reveal_motion::Viewport;

    #[test]
    fn test_info_cards_stagger() {
        let mut manager = MotionManager::new();
        let settings = MotionSettings::default();
        let page = PageState::default();
        let ctx = SectionContext {
            settings: &settings,
            page: &page,
            viewport: Viewport::new(0.0, 1440.0, 900.0),
        };
        let scope = Contact.mount(&mut manager, &ctx).unwrap();
        assert_eq!(manager.trigger_count(), 3);

        let grid = manager
            .registry()
            .iter()
            .find(|(_, t)| t.target().as_str() == INFO_GRID)
            .map(|(_, t)| t.timeline())
            .unwrap();
        let timeline = manager.player(grid).unwrap().timeline();
        let offsets: Vec<f32> = timeline.steps().iter().map(|s| s.offset_ms).collect();
        assert_eq!(offsets, vec![0.0, 100.0, 200.0]);
        assert_eq!(timeline.duration_ms(), 700.0);
        assert_eq!(timeline.name(), "contact:contact-info-grid");
        drop(scope);
    }
}
