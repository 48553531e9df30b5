use anyhow::Result;
use reveal_motion::{
    AnimatableProperty, Direction, EaseMode, EasingFunction, MotionEvent, MotionManager,
    PinDistance, PinnedRange, Placement, Rect, RepeatPolicy, ScrollOwner, TargetId, Timeline,
    Trigger, Tween, Viewport, deg, vh, vw,
};
use std::collections::HashMap;

const VIEWPORT_WIDTH: f64 = 1440.0;
const VIEWPORT_HEIGHT: f64 = 1000.0;

fn viewport(scroll_y: f64) -> Viewport {
    Viewport::new(scroll_y, VIEWPORT_WIDTH, VIEWPORT_HEIGHT)
}

fn card_layout() -> HashMap<TargetId, Rect> {
    let mut layout = HashMap::new();
    layout.insert(TargetId::new("card"), Rect::new(0.0, 2050.0, 600.0, 400.0));
    layout.insert(TargetId::new("value"), Rect::new(0.0, 4000.0, VIEWPORT_WIDTH, 1000.0));
    layout
}

fn card_reveal(duration_ms: f32) -> Result<Timeline> {
    Ok(Timeline::builder("card-reveal")
        .add(
            Tween::new("card")
                .from_to(AnimatableProperty::Opacity, 0.0.into(), 1.0.into())
                .duration_ms(duration_ms)
                .ease(EasingFunction::Linear),
            Placement::Sequential,
        )
        .build()?)
}

fn value_scrub() -> Result<Timeline> {
    let ease_in = EasingFunction::power(2, EaseMode::In);
    Ok(Timeline::builder("value-scrub")
        .default_easing(EasingFunction::Linear)
        .add(
            Tween::new("value-image")
                .from_to(AnimatableProperty::X, vw(-60.0), vw(0.0))
                .from_to(AnimatableProperty::Rotation, deg(-2.0), deg(0.0))
                .duration_ms(300.0),
            Placement::At(0.0),
        )
        .add(
            Tween::new("value-card")
                .from_to(AnimatableProperty::Y, vh(40.0), vh(0.0))
                .from_to(AnimatableProperty::Opacity, 0.0.into(), 1.0.into())
                .duration_ms(250.0),
            Placement::At(80.0),
        )
        .add(
            Tween::new("value-image")
                .from_to(AnimatableProperty::X, vw(0.0), vw(-18.0))
                .duration_ms(300.0)
                .ease(ease_in),
            Placement::At(700.0),
        )
        .build()?)
}

fn opacity(manager: &MotionManager, target: &str) -> f64 {
    manager
        .style_of(&TargetId::new(target))
        .map(|style| style.value(AnimatableProperty::Opacity))
        .unwrap_or(1.0)
}

#[test]
fn reveal_fires_exactly_once_when_crossing_the_85_percent_line() -> Result<()> {
    let mut manager = MotionManager::new();
    let timeline = manager.add_timeline(card_reveal(600.0)?);
    let _handle = manager.register(Trigger::new(
        "card",
        0.85,
        RepeatPolicy::PlayReverseOnExit,
        timeline,
    ))?;
    let layout = card_layout();

    let mut first_enter_at = None;
    let mut enters = 0;
    for step in 0..=60 {
        let scroll = step as f64 * 50.0;
        manager.on_scroll(viewport(scroll), &layout);
        for event in manager.drain_events() {
            if matches!(event, MotionEvent::TriggerEntered { .. }) {
                enters += 1;
                first_enter_at.get_or_insert(scroll);
            }
        }
    }

    assert_eq!(enters, 1);
    assert_eq!(first_enter_at, Some(1200.0));
    Ok(())
}

#[test]
fn unregister_mid_animation_freezes_the_timeline() -> Result<()> {
    let mut manager = MotionManager::new();
    let timeline = manager.add_timeline(card_reveal(800.0)?);
    let handle = manager.register(Trigger::new(
        "card",
        0.85,
        RepeatPolicy::PlayReverseOnExit,
        timeline,
    ))?;
    let layout = card_layout();

    manager.on_scroll(viewport(1200.0), &layout);
    manager.tick(200.0);
    let frozen = opacity(&manager, "card");
    assert!((frozen - 0.25).abs() < 1e-6);
    manager.clear_events();

    assert!(handle.release(&mut manager));
    for scroll in [1300.0, 800.0, 1600.0] {
        manager.on_scroll(viewport(scroll), &layout);
        manager.tick(100.0);
    }

    assert_eq!(opacity(&manager, "card"), frozen);
    assert!(!manager.has_active_animations());
    assert!(
        manager
            .drain_events()
            .all(|e| !matches!(e, MotionEvent::TriggerEntered { .. } | MotionEvent::TriggerExited { .. }))
    );
    Ok(())
}

#[test]
fn exit_at_forty_percent_reverses_from_current_position() -> Result<()> {
    let mut manager = MotionManager::new();
    let timeline = manager.add_timeline(card_reveal(1000.0)?);
    let _handle = manager.register(Trigger::new(
        "card",
        0.85,
        RepeatPolicy::PlayReverseOnExit,
        timeline,
    ))?;
    let layout = card_layout();

    manager.on_scroll(viewport(1200.0), &layout);
    manager.tick(400.0);
    manager.on_scroll(viewport(1000.0), &layout);
    manager.tick(100.0);

    let player = manager.player(timeline).expect("timeline is registered");
    assert_eq!(player.state().direction, Direction::Reverse);
    assert!((player.position() - 0.3).abs() < 1e-6);
    assert!((opacity(&manager, "card") - 0.3).abs() < 1e-6);

    let reversed = manager
        .drain_events()
        .filter(|e| matches!(e, MotionEvent::TimelineReversed { .. }))
        .count();
    assert_eq!(reversed, 1);
    Ok(())
}

#[test]
fn play_once_ignores_every_later_crossing() -> Result<()> {
    let mut manager = MotionManager::new();
    let timeline = manager.add_timeline(card_reveal(300.0)?);
    let _handle = manager.register(Trigger::new("card", 0.85, RepeatPolicy::PlayOnce, timeline))?;
    let layout = card_layout();

    manager.on_scroll(viewport(1200.0), &layout);
    manager.tick(300.0);
    manager.on_scroll(viewport(0.0), &layout);
    manager.on_scroll(viewport(1500.0), &layout);
    manager.tick(300.0);

    let started = manager
        .drain_events()
        .filter(|e| matches!(e, MotionEvent::TimelineStarted { .. }))
        .count();
    assert_eq!(started, 1);
    assert_eq!(opacity(&manager, "card"), 1.0);
    Ok(())
}

#[test]
fn scrubbed_region_is_exactly_reversible() -> Result<()> {
    let mut manager = MotionManager::new();
    let timeline = manager.add_timeline(value_scrub()?);
    manager.bind_to_scroll(
        timeline,
        PinnedRange::new("value", PinDistance::ViewportHeights(1.3)),
    )?;
    let layout = card_layout();

    manager.on_scroll(viewport(4390.0), &layout);
    let at_a = manager.styles();

    manager.on_scroll(viewport(5100.0), &layout);
    assert_ne!(manager.styles(), at_a);

    manager.on_scroll(viewport(4390.0), &layout);
    assert_eq!(manager.styles(), at_a);

    // Ticks never move an unlagged scrubbed timeline.
    manager.tick(500.0);
    assert_eq!(manager.styles(), at_a);
    Ok(())
}

#[test]
fn scrub_positions_are_monotonic_in_scroll() -> Result<()> {
    let mut manager = MotionManager::new();
    let timeline = manager.add_timeline(value_scrub()?);
    manager.bind_to_scroll(
        timeline,
        PinnedRange::new("value", PinDistance::ViewportHeights(1.3)),
    )?;
    let layout = card_layout();

    let mut last = 0.0;
    for step in 0..100 {
        manager.on_scroll(viewport(3800.0 + step as f64 * 20.0), &layout);
        let position = manager.player(timeline).expect("timeline is registered").position();
        assert!((0.0..=1.0).contains(&position));
        assert!(position >= last);
        last = position;
    }
    assert_eq!(last, 1.0);
    Ok(())
}

#[test]
fn pin_owns_scroll_only_inside_its_range() -> Result<()> {
    let mut manager = MotionManager::new();
    let mut scope = manager.scope("value");
    let timeline = scope.add_scroll_timeline(
        &mut manager,
        value_scrub()?,
        PinnedRange::new("value", PinDistance::ViewportHeights(1.3)).scrub_lag_ms(600.0),
    )?;
    let layout = card_layout();

    manager.on_scroll(viewport(3999.0), &layout);
    assert_eq!(manager.scroll_owner(), &ScrollOwner::Page);

    manager.on_scroll(viewport(4650.0), &layout);
    assert_eq!(
        manager.scroll_owner(),
        &ScrollOwner::Pinned {
            timeline,
            anchor: TargetId::new("value"),
        }
    );
    // The anchor is translated down by exactly the distance scrolled.
    let pinned = manager.style_of(&TargetId::new("value")).expect("anchor style");
    assert_eq!(pinned.pin_offset, Some(650.0));

    // With lag the displayed position trails the scroll target, then lands on it.
    assert_eq!(manager.player(timeline).expect("registered").position(), 0.0);
    manager.tick(300.0);
    manager.tick(300.0);
    assert_eq!(manager.player(timeline).expect("registered").position(), 0.5);

    // Tearing the section down mid-pin hands scroll back to the page.
    scope.close(&mut manager);
    assert_eq!(manager.scroll_owner(), &ScrollOwner::Page);
    let released = manager
        .drain_events()
        .filter(|e| matches!(e, MotionEvent::PinReleased { .. }))
        .count();
    assert_eq!(released, 1);
    Ok(())
}

#[test]
fn stale_target_is_dropped_without_touching_its_timeline() -> Result<()> {
    let mut manager = MotionManager::new();
    let timeline = manager.add_timeline(card_reveal(1000.0)?);
    let _handle = manager.register(Trigger::new(
        "card",
        0.85,
        RepeatPolicy::PlayReverseOnExit,
        timeline,
    ))?;
    let mut layout = card_layout();

    manager.on_scroll(viewport(1200.0), &layout);
    manager.tick(100.0);
    manager.clear_events();

    layout.remove(&TargetId::new("card"));
    manager.on_scroll(viewport(1300.0), &layout);

    let events: Vec<_> = manager.drain_events().collect();
    assert!(matches!(
        events.as_slice(),
        [MotionEvent::TriggerDropped { target, .. }] if target.as_str() == "card"
    ));
    assert_eq!(manager.trigger_count(), 0);
    assert!(manager.player(timeline).expect("registered").is_running());
    Ok(())
}

#[test]
fn section_scopes_tear_down_in_reverse_order() -> Result<()> {
    let mut manager = MotionManager::new();
    let mut scope = manager.scope("services");
    let timeline = scope.add_timeline(&mut manager, card_reveal(500.0)?);
    let first = scope.register(
        &mut manager,
        Trigger::new("card", 0.85, RepeatPolicy::PlayReverseOnExit, timeline),
    )?;
    let second = scope.register(
        &mut manager,
        Trigger::new("value", 0.85, RepeatPolicy::PlayReverseOnExit, timeline),
    )?;

    drop(scope);
    manager.on_scroll(viewport(0.0), &card_layout());

    let released: Vec<_> = manager
        .drain_events()
        .filter_map(|e| match e {
            MotionEvent::TriggerReleased { trigger, .. } => Some(trigger),
            _ => None,
        })
        .collect();
    assert_eq!(released, vec![second, first]);
    assert_eq!(manager.timeline_count(), 0);
    Ok(())
}

#[test]
fn repeated_play_matches_single_play() -> Result<()> {
    let mut once = MotionManager::new();
    let a = once.add_timeline(card_reveal(700.0)?);
    once.play(a, Direction::Forward)?;

    let mut thrice = MotionManager::new();
    let b = thrice.add_timeline(card_reveal(700.0)?);
    for _ in 0..3 {
        thrice.play(b, Direction::Forward)?;
    }

    for delta in [16.0, 33.0, 120.0, 400.0] {
        once.tick(delta);
        thrice.tick(delta);
        assert_eq!(
            once.player(a).map(|p| p.state()),
            thrice.player(b).map(|p| p.state())
        );
    }
    Ok(())
}

#[test]
fn position_stays_in_unit_range_under_mixed_input() -> Result<()> {
    let mut manager = MotionManager::new();
    let timeline = manager.add_timeline(card_reveal(250.0)?);
    let _handle = manager.register(Trigger::new(
        "card",
        0.85,
        RepeatPolicy::PlayReverseOnExit,
        timeline,
    ))?;
    let layout = card_layout();

    let scrolls = [0.0, 1300.0, 900.0, 1250.0, 1199.0, 2000.0, 0.0, 1200.0];
    let ticks = [5.0, 400.0, 16.67, 0.0, 1000.0, 33.0, 90.0, 7.5];
    for (scroll, tick) in scrolls.iter().zip(ticks) {
        manager.on_scroll(viewport(*scroll), &layout);
        manager.tick(tick);
        let position = manager.player(timeline).expect("registered").position();
        assert!((0.0..=1.0).contains(&position), "position {position}");
    }
    Ok(())
}
