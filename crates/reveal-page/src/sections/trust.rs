//! Trust: metric, headline and testimonials slide in from alternating sides
//! once they are a little further up the viewport than the rest of the page;
//! the demo embeds use the regular reveal line.

use anyhow::Result;
use reveal_motion::{
    AnimatableProperty::{self, Opacity, X, Y},
    AnimatableValue, MotionManager, Placement, Scope, Tween, vh, vw,
};
use tracing::info;

use super::{MotionSettings, Section, SectionContext, reveal};
use crate::anchors::SectionId;
use crate::layout::LayoutBuilder;

pub const METRIC: &str = "trust-metric";
pub const HEADLINE: &str = "trust-headline";
pub const TESTIMONIAL_LEFT: &str = "trust-testimonial-1";
pub const TESTIMONIAL_RIGHT: &str = "trust-testimonial-2";
pub const DEMO_LEFT: &str = "trust-demo-1";
pub const DEMO_RIGHT: &str = "trust-demo-2";

const DURATION_MS: f32 = 800.0;

#[derive(Debug, Clone, Copy, Default)]
pub struct Trust;

fn fade_from(target: &str, property: AnimatableProperty, from: AnimatableValue) -> Tween {
    Tween::new(target)
        .from_to(property, from, 0.0.into())
        .from_to(Opacity, 0.0.into(), 1.0.into())
        .duration_ms(DURATION_MS)
}

impl Section for Trust {
    fn id(&self) -> SectionId {
        SectionId::Trust
    }

    fn place(&self, layout: &mut LayoutBuilder, _settings: &MotionSettings) {
        let top = layout.section(SectionId::Trust.anchor(), 1400.0);
        layout.grid_cell(METRIC, 0, 3, top + 120.0, 240.0);
        layout.grid_cell(HEADLINE, 1, 3, top + 150.0, 240.0);
        layout.grid_cell(TESTIMONIAL_LEFT, 0, 2, top + 520.0, 280.0);
        layout.grid_cell(TESTIMONIAL_RIGHT, 1, 2, top + 520.0, 280.0);
        layout.grid_cell(DEMO_LEFT, 0, 2, top + 900.0, 360.0);
        layout.grid_cell(DEMO_RIGHT, 1, 2, top + 900.0, 360.0);
    }

    fn mount(&self, manager: &mut MotionManager, ctx: &SectionContext<'_>) -> Result<Scope> {
        let mut scope = manager.scope("trust");
        let early = ctx.settings.trust_threshold;
        let regular = ctx.settings.reveal_threshold;

        let reveals = [
            (METRIC, early, fade_from(METRIC, Y, vh(6.0)), Placement::Sequential),
            (HEADLINE, early, fade_from(HEADLINE, X, vw(6.0)), Placement::Sequential),
            (TESTIMONIAL_LEFT, early, fade_from(TESTIMONIAL_LEFT, X, vw(-8.0)), Placement::Sequential),
            (TESTIMONIAL_RIGHT, early, fade_from(TESTIMONIAL_RIGHT, X, vw(8.0)), Placement::Sequential),
            (DEMO_LEFT, regular, fade_from(DEMO_LEFT, Y, vh(8.0)), Placement::Sequential),
            // Second embed trails the first.
            (DEMO_RIGHT, regular, fade_from(DEMO_RIGHT, Y, vh(8.0)), Placement::At(100.0)),
        ];
        for (trigger, threshold, tween, placement) in reveals {
            reveal(manager, &mut scope, ctx, trigger, threshold, tween, placement)?;
        }

        info!(section = "trust", registrations = scope.len(), "mounted");
        Ok(scope)
    }
}
