//! Landing page driven the way a host would drive it: actions, scroll deltas
//! and frames.
//!
//! With the default 1440x900 viewport the sections stack as:
//! hero 0, value 900 (pinned until 2070, spacer to 2970), services 2970,
//! trust 4770, contact 6170; document height 7270.

use anyhow::{Context, Result};
use reveal_config::RevealConfig;
use reveal_motion::{AnimatableProperty, MotionEvent, ScrollOwner};
use reveal_page::{Key, LandingPage, PageAction, PageEffect, SectionId};
use reveal_page::sections::services;

const FRAME_MS: f32 = 16.67;

fn settle(page: &mut LandingPage) {
    for _ in 0..1000 {
        if !page.frame(FRAME_MS) {
            break;
        }
    }
}

fn opacity(page: &LandingPage, target: &str) -> f64 {
    page.style_of(target)
        .map(|s| s.value(AnimatableProperty::Opacity))
        .unwrap_or(1.0)
}

#[test]
fn hero_intro_plays_on_mount_and_completes() -> Result<()> {
    let mut page = LandingPage::new(&RevealConfig::default())?;
    assert_eq!(page.layout().document_height(), 7270.0);

    settle(&mut page);
    let completed = page.drain_events().into_iter().any(|e| {
        matches!(e, MotionEvent::TimelineCompleted { ref name, .. } if name == "hero:intro")
    });
    assert!(completed);
    assert!((opacity(&page, "hero-card") - 1.0).abs() < 1e-6);
    Ok(())
}

#[test]
fn navigation_scrolls_to_anchor_and_reveals_it() -> Result<()> {
    let mut page = LandingPage::new(&RevealConfig::default())?;
    page.dispatch(PageAction::ToggleMenu);
    assert!(page.state().menu_open());
    assert_eq!(opacity(&page, services::HEADER), 0.0);

    let effects = page.dispatch(PageAction::NavigateTo(SectionId::Services));
    assert_eq!(effects, vec![PageEffect::ScrollTo(SectionId::Services)]);
    assert_eq!(page.viewport().scroll_y, 2970.0);
    assert!(!page.state().menu_open());
    assert!(page.state().nav_scrolled());

    settle(&mut page);
    assert!((opacity(&page, services::HEADER) - 1.0).abs() < 1e-6);
    // Testimonials at 3870 are below the 85% line (2970 + 765).
    assert_eq!(opacity(&page, services::TESTIMONIALS[0]), 0.0);
    Ok(())
}

#[test]
fn contact_modal_blocks_scroll_until_escape() -> Result<()> {
    let mut page = LandingPage::new(&RevealConfig::default())?;

    assert_eq!(page.dispatch(PageAction::OpenContact), vec![PageEffect::LockScroll]);
    assert!(!page.scroll_by(500.0));
    assert!(page.dispatch(PageAction::NavigateTo(SectionId::Trust)).is_empty());
    assert_eq!(page.scroll_to(SectionId::Trust), None);
    assert_eq!(page.viewport().scroll_y, 0.0);

    // Other keys leave the modal open.
    assert!(page.dispatch(PageAction::KeyPressed(Key::Other)).is_empty());
    assert_eq!(
        page.dispatch(PageAction::KeyPressed(Key::Escape)),
        vec![PageEffect::UnlockScroll]
    );
    assert!(page.scroll_by(500.0));
    assert_eq!(page.viewport().scroll_y, 500.0);
    Ok(())
}

#[test]
fn nav_bar_turns_scrolled_past_fifty_pixels() -> Result<()> {
    let mut page = LandingPage::new(&RevealConfig::default())?;
    page.scroll_by(50.0);
    assert!(!page.state().nav_scrolled());
    page.scroll_by(1.0);
    assert!(page.state().nav_scrolled());
    page.scroll_by(-51.0);
    assert!(!page.state().nav_scrolled());
    Ok(())
}

#[test]
fn value_section_pins_for_its_range() -> Result<()> {
    let mut page = LandingPage::new(&RevealConfig::default())?;
    page.drain_events();

    page.scroll_to(SectionId::Value).context("value anchor")?;
    assert!(page.motion().scroll_owner().is_pinned());
    assert!(
        page.drain_events()
            .iter()
            .any(|e| matches!(e, MotionEvent::PinEngaged { .. }))
    );

    page.scroll_by(585.0);
    let anchor = page.style_of("value").context("value anchor style")?;
    assert_eq!(anchor.pin_offset, Some(585.0));

    // 900 + 1.3 * 900 = 2070 ends the range.
    page.scroll_by(585.0);
    assert_eq!(page.viewport().scroll_y, 2070.0);
    assert_eq!(page.motion().scroll_owner(), &ScrollOwner::Page);
    assert!(
        page.drain_events()
            .iter()
            .any(|e| matches!(e, MotionEvent::PinReleased { .. }))
    );
    Ok(())
}

#[test]
fn unmounting_a_section_releases_its_triggers() -> Result<()> {
    let mut page = LandingPage::new(&RevealConfig::default())?;
    assert_eq!(page.motion().trigger_count(), 13);
    page.drain_events();

    assert!(page.unmount(SectionId::Services));
    assert!(!page.unmount(SectionId::Services));
    assert_eq!(page.motion().trigger_count(), 9);
    assert!(!page.mounted().contains(&SectionId::Services));

    let released = page
        .drain_events()
        .into_iter()
        .filter(|e| matches!(e, MotionEvent::TriggerReleased { .. }))
        .count();
    assert_eq!(released, 4);
    assert!(page.style_of(services::CARDS[0]).is_none());

    // Scrolling over the empty spot is harmless.
    page.scroll_to(SectionId::Services);
    assert!(page.drain_events().is_empty());
    Ok(())
}

#[test]
fn resize_relays_out_pinned_range() -> Result<()> {
    let mut page = LandingPage::new(&RevealConfig::default())?;
    page.resize(1000.0, 800.0);

    // value at 800, pinned for 1040.
    page.scroll_to(SectionId::Value).context("value anchor")?;
    assert_eq!(page.viewport().scroll_y, 800.0);
    assert!(page.motion().scroll_owner().is_pinned());
    page.scroll_by(1040.0);
    assert!(!page.motion().scroll_owner().is_pinned());
    Ok(())
}
