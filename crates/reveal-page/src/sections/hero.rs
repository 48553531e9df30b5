//! Hero: intro timeline that plays once the page mounts at the top.

use anyhow::{Context, Result};
use reveal_motion::{
    AnimatableProperty::{Opacity, Scale, Y},
    Direction, MotionManager, Placement, Scope, Timeline, Tween, px,
};
use tracing::info;

use super::{MotionSettings, Section, SectionContext};
use crate::anchors::SectionId;
use crate::layout::LayoutBuilder;

pub const HEADLINE: &str = "hero-headline";
pub const SUBHEADLINE: &str = "hero-subheadline";
pub const CTA: &str = "hero-cta";
pub const CARD: &str = "hero-card";
pub const IMAGE: &str = "hero-image";

#[derive(Debug, Clone, Copy, Default)]
pub struct Hero;

/// Headline first, copy and buttons overlapping it, card last; the image
/// fades in underneath from the very start.
pub fn intro_timeline(settings: &MotionSettings) -> Result<Timeline> {
    let timeline = Timeline::builder("hero:intro")
        .default_easing(settings.default_easing)
        .add(
            Tween::new(HEADLINE)
                .from_to(Y, px(30.0), px(0.0))
                .from_to(Opacity, 0.0.into(), 1.0.into())
                .duration_ms(800.0),
            Placement::Sequential,
        )
        .add(
            Tween::new(SUBHEADLINE)
                .from_to(Y, px(20.0), px(0.0))
                .from_to(Opacity, 0.0.into(), 1.0.into())
                .duration_ms(600.0),
            Placement::FromEnd(-400.0),
        )
        .add(
            Tween::new(CTA)
                .from_to(Y, px(20.0), px(0.0))
                .from_to(Opacity, 0.0.into(), 1.0.into())
                .duration_ms(500.0),
            Placement::FromEnd(-300.0),
        )
        .add(
            Tween::new(CARD)
                .from_to(Y, px(40.0), px(0.0))
                .from_to(Opacity, 0.0.into(), 1.0.into())
                .from_to(Scale, 0.95.into(), 1.0.into())
                .duration_ms(600.0),
            Placement::FromEnd(-300.0),
        )
        .add(
            Tween::new(IMAGE)
                .from_to(Scale, 1.1.into(), 1.0.into())
                .from_to(Opacity, 0.0.into(), 1.0.into())
                .duration_ms(1000.0),
            Placement::At(0.0),
        )
        .build()?;
    Ok(timeline)
}

impl Section for Hero {
    fn id(&self) -> SectionId {
        SectionId::Hero
    }

    fn place(&self, layout: &mut LayoutBuilder, _settings: &MotionSettings) {
        let vh = layout.viewport().height;
        let top = layout.section(SectionId::Hero.anchor(), vh);
        layout.grid_cell(HEADLINE, 0, 2, top + 0.30 * vh, 120.0);
        layout.grid_cell(SUBHEADLINE, 0, 2, top + 0.30 * vh + 140.0, 80.0);
        layout.grid_cell(CTA, 0, 2, top + 0.30 * vh + 240.0, 56.0);
        layout.grid_cell(IMAGE, 1, 2, top + 0.10 * vh, 0.80 * vh);
        layout.grid_cell(CARD, 0, 2, top + 0.30 * vh + 340.0, 200.0);
    }

    fn mount(&self, manager: &mut MotionManager, ctx: &SectionContext<'_>) -> Result<Scope> {
        let mut scope = manager.scope("hero");
        let intro = intro_timeline(ctx.settings).context("building hero intro")?;
        let id = scope.add_timeline(manager, intro);
        // Mounted below the top of the page: show the settled hero.
        if ctx.page.nav_scrolled() {
            manager.seek(id, 1.0)?;
            info!(section = "hero", "mounted scrolled; intro skipped");
        } else {
            manager.play(id, Direction::Forward)?;
            info!(section = "hero", "mounted; intro playing");
        }
        Ok(scope)
    }
}
