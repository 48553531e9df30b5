//! Services: header, service cards, then the work block with testimonials
//! and demos. Each group reveals on its own trigger.

use anyhow::Result;
use reveal_motion::{
    AnimatableProperty::{Opacity, Y},
    MotionManager, Placement, Scope, Tween, px,
};
use tracing::info;

use super::{MotionSettings, Section, SectionContext, reveal};
use crate::anchors::SectionId;
use crate::layout::LayoutBuilder;

pub const HEADER: &str = "services-header";
pub const GRID: &str = "services-grid";
pub const CARDS: [&str; 4] = ["service-card-1", "service-card-2", "service-card-3", "service-card-4"];
pub const TESTIMONIALS_GRID: &str = "testimonials-grid";
pub const TESTIMONIALS: [&str; 2] = ["testimonial-card-1", "testimonial-card-2"];
pub const DEMOS_GRID: &str = "demos-grid";
pub const DEMOS: [&str; 2] = ["demo-card-1", "demo-card-2"];

#[derive(Debug, Clone, Copy, Default)]
pub struct Services;

fn slide_up(targets: &[&str], distance: f64, duration_ms: f32, stagger_ms: f32) -> Tween {
    Tween::each(targets.iter().copied())
        .from_to(Y, px(distance), px(0.0))
        .from_to(Opacity, 0.0.into(), 1.0.into())
        .duration_ms(duration_ms)
        .stagger_ms(stagger_ms)
}

impl Section for Services {
    fn id(&self) -> SectionId {
        SectionId::Services
    }

    fn place(&self, layout: &mut LayoutBuilder, _settings: &MotionSettings) {
        let top = layout.section(SectionId::Services.anchor(), 1800.0);
        layout.element(HEADER, top + 80.0, 140.0);

        layout.element(GRID, top + 300.0, 420.0);
        for (i, card) in CARDS.iter().enumerate() {
            layout.grid_cell(card, i, CARDS.len(), top + 300.0, 420.0);
        }

        layout.element(SectionId::Work.anchor(), top + 820.0, 900.0);
        layout.element(TESTIMONIALS_GRID, top + 900.0, 260.0);
        for (i, card) in TESTIMONIALS.iter().enumerate() {
            layout.grid_cell(card, i, TESTIMONIALS.len(), top + 900.0, 260.0);
        }
        layout.element(DEMOS_GRID, top + 1260.0, 360.0);
        for (i, card) in DEMOS.iter().enumerate() {
            layout.grid_cell(card, i, DEMOS.len(), top + 1260.0, 360.0);
        }
    }

    fn mount(&self, manager: &mut MotionManager, ctx: &SectionContext<'_>) -> Result<Scope> {
        let mut scope = manager.scope("services");
        let threshold = ctx.settings.reveal_threshold;

        let groups = [
            (HEADER, slide_up(&[HEADER], 30.0, 600.0, 0.0)),
            (GRID, slide_up(&CARDS, 40.0, 500.0, 100.0)),
            (TESTIMONIALS_GRID, slide_up(&TESTIMONIALS, 30.0, 500.0, 150.0)),
            (DEMOS_GRID, slide_up(&DEMOS, 30.0, 500.0, 100.0)),
        ];
        for (trigger, tween) in groups {
            reveal(manager, &mut scope, ctx, trigger, threshold, tween, Placement::Sequential)?;
        }

        info!(section = "services", registrations = scope.len(), "mounted");
        Ok(scope)
    }
}
