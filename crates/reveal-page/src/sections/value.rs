//! Value proposition: a pinned, scroll-scrubbed section.
//!
//! While the section is pinned the page scroll drives one timeline. The first
//! stretch brings portrait, copy and card in from the sides; the last stretch
//! pushes them back out before the pin lets go.

use anyhow::{Context, Result};
use reveal_motion::{
    AnimatableProperty::{Opacity, Rotation, Scale, X, Y},
    EaseMode, EasingFunction, MotionManager, PinDistance, PinnedRange, Placement, Scope, Timeline,
    Tween, deg, vh, vw,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::{MotionSettings, Section, SectionContext};
use crate::anchors::SectionId;
use crate::layout::LayoutBuilder;

pub const PORTRAIT: &str = "value-portrait";
pub const HEADLINE: &str = "value-headline";
pub const SUBHEADLINE: &str = "value-subheadline";
pub const CTA: &str = "value-cta";
pub const CARD: &str = "value-card";

/// Which message the value card carries. The card tilts away from the
/// viewer on its way out, in a direction that depends on the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueCard {
    #[default]
    Time,
    Errors,
    Costs,
    Custom,
}

impl ValueCard {
    /// Exit rotation in degrees.
    pub fn rotation(&self) -> f64 {
        match self {
            Self::Errors | Self::Custom => -2.0,
            Self::Time | Self::Costs => 2.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Value {
    pub card: ValueCard,
}

impl Value {
    pub fn new(card: ValueCard) -> Self {
        Self { card }
    }

    /// Scrub timeline for the pinned stretch. Offsets are in the same
    /// millisecond units as any timeline; scroll maps them onto the range.
    pub fn scrub_timeline(&self) -> Result<Timeline> {
        let exit = EasingFunction::power(2, EaseMode::In);
        let timeline = Timeline::builder("value:scrub")
            .default_easing(EasingFunction::Linear)
            // Entrance
            .add(
                Tween::new(PORTRAIT)
                    .from_to(X, vw(-50.0), vw(0.0))
                    .from_to(Opacity, 0.0.into(), 1.0.into()),
                Placement::At(0.0),
            )
            .add(
                Tween::new(HEADLINE)
                    .from_to(X, vw(55.0), vw(0.0))
                    .from_to(Opacity, 0.0.into(), 1.0.into()),
                Placement::At(0.0),
            )
            .add(
                Tween::each([SUBHEADLINE, CTA])
                    .from_to(Y, vh(10.0), vh(0.0))
                    .from_to(Opacity, 0.0.into(), 1.0.into()),
                Placement::At(50.0),
            )
            .add(
                Tween::new(CARD)
                    .from_to(X, vw(60.0), vw(0.0))
                    .from_to(Scale, 0.96.into(), 1.0.into())
                    .from_to(Opacity, 0.0.into(), 1.0.into()),
                Placement::At(80.0),
            )
            // Exit
            .add(
                Tween::new(HEADLINE)
                    .from_to(X, vw(0.0), vw(-18.0))
                    .from_to(Opacity, 1.0.into(), 0.0.into())
                    .ease(exit),
                Placement::At(700.0),
            )
            .add(
                Tween::each([SUBHEADLINE, CTA])
                    .from_to(Y, vh(0.0), vh(-6.0))
                    .from_to(Opacity, 1.0.into(), 0.0.into())
                    .ease(exit),
                Placement::At(720.0),
            )
            .add(
                Tween::new(CARD)
                    .from_to(Y, vh(0.0), vh(18.0))
                    .from_to(Rotation, deg(0.0), deg(self.card.rotation()))
                    .from_to(Opacity, 1.0.into(), 0.0.into())
                    .ease(exit),
                Placement::At(740.0),
            )
            .add(
                Tween::new(PORTRAIT)
                    .from_to(X, vw(0.0), vw(-10.0))
                    .from_to(Opacity, 1.0.into(), 0.0.into())
                    .ease(exit),
                Placement::At(760.0),
            )
            .build()?;
        Ok(timeline)
    }

    fn range(settings: &MotionSettings) -> PinnedRange {
        PinnedRange::new(
            SectionId::Value.anchor(),
            PinDistance::ViewportHeights(settings.pin_distance),
        )
        .scrub_lag_ms(settings.scrub_lag_ms)
    }
}

impl Section for Value {
    fn id(&self) -> SectionId {
        SectionId::Value
    }

    fn place(&self, layout: &mut LayoutBuilder, settings: &MotionSettings) {
        let vh = layout.viewport().height;
        let top = layout.section(SectionId::Value.anchor(), vh);
        layout.grid_cell(PORTRAIT, 0, 2, top + 0.10 * vh, 0.80 * vh);
        layout.grid_cell(HEADLINE, 1, 2, top + 0.20 * vh, 120.0);
        layout.grid_cell(SUBHEADLINE, 1, 2, top + 0.20 * vh + 140.0, 80.0);
        layout.grid_cell(CTA, 1, 2, top + 0.20 * vh + 240.0, 56.0);
        layout.grid_cell(CARD, 1, 2, top + 0.20 * vh + 330.0, 180.0);
        // Room to scroll through while pinned.
        layout.spacer(settings.pin_distance * vh);
    }

    fn mount(&self, manager: &mut MotionManager, ctx: &SectionContext<'_>) -> Result<Scope> {
        let mut scope = manager.scope("value");
        let timeline = self.scrub_timeline().context("building value scrub")?;
        scope.add_scroll_timeline(manager, timeline, Self::range(ctx.settings))?;
        info!(
            section = "value",
            card = ?self.card,
            pin_px = ctx.settings.pin_distance * ctx.viewport.height,
            "mounted; scrubbed by scroll"
        );
        Ok(scope)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::PageState;
    use reveal_motion::{ScrollOwner, TargetId, Viewport};

    #[test]
    fn test_scrub_timeline_layout() {
        let timeline = Value::default().scrub_timeline().unwrap();
        let offsets: Vec<f32> = timeline.steps().iter().map(|s| s.offset_ms).collect();
        assert_eq!(
            offsets,
            vec![0.0, 0.0, 50.0, 50.0, 80.0, 700.0, 720.0, 720.0, 740.0, 760.0]
        );
        assert_eq!(timeline.duration_ms(), 1260.0);
    }

    #[test]
    fn test_card_rotation_depends_on_message() {
        assert_eq!(ValueCard::Time.rotation(), 2.0);
        assert_eq!(ValueCard::Costs.rotation(), 2.0);
        assert_eq!(ValueCard::Errors.rotation(), -2.0);
        assert_eq!(ValueCard::Custom.rotation(), -2.0);
    }

    #[test]
    fn test_section_pins_while_scrolling_through() {
        let settings = MotionSettings {
            scrub_lag_ms: 0.0,
            ..MotionSettings::default()
        };
        let viewport = Viewport::new(0.0, 1000.0, 1000.0);
        let section = Value::new(ValueCard::Errors);

        let mut builder = LayoutBuilder::new(viewport);
        builder.section("above", 500.0);
        section.place(&mut builder, &settings);
        let layout = builder.finish();
        assert_eq!(layout.document_height(), 500.0 + 1000.0 + 1300.0);

        let mut manager = MotionManager::new();
        let page = PageState::default();
        let ctx = SectionContext {
            settings: &settings,
            page: &page,
            viewport,
        };
        let _scope = section.mount(&mut manager, &ctx).unwrap();

        manager.on_scroll(viewport.scrolled_to(400.0), &layout);
        assert_eq!(manager.scroll_owner(), &ScrollOwner::Page);

        // Halfway through the 1300px pin.
        manager.on_scroll(viewport.scrolled_to(1150.0), &layout);
        assert!(manager.scroll_owner().is_pinned());
        let anchor = manager.style_of(&TargetId::new("value")).unwrap();
        assert_eq!(anchor.pin_offset, Some(650.0));

        // End of range: everything has left, card tilted the Errors way.
        manager.on_scroll(viewport.scrolled_to(1800.0), &layout);
        assert_eq!(manager.scroll_owner(), &ScrollOwner::Page);
        let card = manager.style_of(&TargetId::new(CARD)).unwrap();
        assert!((card.value(Rotation) + 2.0).abs() < 1e-9);
        assert!((card.value(Y) - 180.0).abs() < 1e-9);
        for id in [PORTRAIT, HEADLINE, SUBHEADLINE, CTA, CARD] {
            let style = manager.style_of(&TargetId::new(id)).unwrap();
            assert_eq!(style.value(Opacity), 0.0, "{id} still visible after exit");
        }

        // Scrolling back into the settled stretch brings them back.
        manager.on_scroll(viewport.scrolled_to(1150.0), &layout);
        let headline = manager.style_of(&TargetId::new(HEADLINE)).unwrap();
        assert!((headline.value(Opacity) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_exit_fades_everything_out() {
        let timeline = Value::default().scrub_timeline().unwrap();
        let viewport = Viewport::new(0.0, 1000.0, 1000.0);
        let end = timeline.sample(1.0, &viewport);
        for id in [PORTRAIT, HEADLINE, SUBHEADLINE, CTA, CARD] {
            assert_eq!(end[&TargetId::new(id)].value(Opacity), 0.0);
        }
        // Settled between entrance and exit.
        let settled = timeline.sample(650.0 / 1260.0, &viewport);
        assert!((settled[&TargetId::new(CARD)].value(Opacity) - 1.0).abs() < 1e-6);
    }
}
