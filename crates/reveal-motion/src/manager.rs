//! Central owner of timelines, triggers and scroll ownership.
//!
//! The manager glues the registry to the players: trigger enters play their
//! timeline forward, exits play it in reverse. It also keeps scroll-scrubbed
//! timelines in step with the viewport and decides which pinned range, if
//! any, owns scroll.
//!
//! # Usage
//!
//! ```
//! use std::collections::HashMap;
//! use reveal_motion::{
//!     AnimatableProperty, MotionManager, Placement, Rect, RepeatPolicy, TargetId, Timeline,
//!     Trigger, Tween, Viewport,
//! };
//!
//! let mut manager = MotionManager::new();
//! let fade = Timeline::builder("fade")
//!     .add(
//!         Tween::new("card").from_to(AnimatableProperty::Opacity, 0.0.into(), 1.0.into()),
//!         Placement::Sequential,
//!     )
//!     .build()?;
//! let timeline = manager.add_timeline(fade);
//! let handle = manager.register(Trigger::new("card", 0.85, RepeatPolicy::PlayReverseOnExit, timeline))?;
//!
//! let mut layout = HashMap::new();
//! layout.insert(TargetId::new("card"), Rect::new(0.0, 2050.0, 800.0, 300.0));
//! manager.on_scroll(Viewport::new(1200.0, 1280.0, 1000.0), &layout);
//! assert!(manager.player(timeline).is_some_and(|p| p.is_running()));
//!
//! handle.release(&mut manager);
//! # Ok::<(), reveal_motion::MotionError>(())
//! ```

use std::collections::BTreeMap;
use std::sync::mpsc::{self, Receiver, Sender};

use tracing::{debug, info, warn};

use crate::error::{MotionError, Result};
use crate::events::{EventQueue, MotionEvent};
use crate::geometry::{LayoutSource, Viewport};
use crate::player::{PlayOutcome, TickOutcome, TimelinePlayer};
use crate::registry::{TriggerRegistry, TriggerTransition};
use crate::scope::{Scope, TriggerHandle};
use crate::scrub::PinnedRange;
use crate::timeline::Timeline;
use crate::trigger::Trigger;
use crate::types::{Direction, ElementStyle, TargetId, TimelineId, TriggerId};

/// Deferred teardown queued by dropped handles and scopes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Release {
    Trigger(TriggerId),
    Timeline(TimelineId),
}

/// Who currently controls the page's scroll position.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ScrollOwner {
    /// Normal document scrolling.
    #[default]
    Page,
    /// A pinned range holds its anchor in place and consumes scroll.
    Pinned {
        timeline: TimelineId,
        anchor: TargetId,
    },
}

impl ScrollOwner {
    pub fn is_pinned(&self) -> bool {
        matches!(self, Self::Pinned { .. })
    }
}

/// Owns every player and trigger of a page.
///
/// Thread safety: `Send`, so an embedding can move it to another thread. It
/// is never shared.
#[derive(Debug)]
pub struct MotionManager {
    /// Players keyed by timeline; key order is creation order.
    players: BTreeMap<TimelineId, TimelinePlayer>,

    registry: TriggerRegistry,

    scroll_owner: ScrollOwner,

    /// Viewport as of the last scroll event.
    viewport: Viewport,

    events: EventQueue,

    release_tx: Sender<Release>,
    release_rx: Receiver<Release>,

    /// Set whenever rendered values may have changed.
    dirty: bool,
}

impl Default for MotionManager {
    fn default() -> Self {
        let (release_tx, release_rx) = mpsc::channel();
        Self {
            players: BTreeMap::new(),
            registry: TriggerRegistry::new(),
            scroll_owner: ScrollOwner::Page,
            viewport: Viewport::default(),
            events: EventQueue::new(),
            release_tx,
            release_rx,
            dirty: false,
        }
    }
}

impl MotionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Manager whose styles resolve against `viewport` before the first scroll.
    pub fn with_viewport(viewport: Viewport) -> Self {
        Self {
            viewport,
            ..Self::default()
        }
    }

    /// Open a scope that releases everything registered through it.
    pub fn scope(&self, name: impl Into<String>) -> Scope {
        Scope::new(name, self.release_tx.clone())
    }

    /// Take ownership of a timeline. It starts idle at position 0.
    pub fn add_timeline(&mut self, timeline: Timeline) -> TimelineId {
        let id = TimelineId::new();
        debug!(timeline = id.0, name = timeline.name(), "timeline added");
        self.players.insert(id, TimelinePlayer::new(timeline));
        self.dirty = true;
        id
    }

    /// Drop a timeline together with every trigger bound to it.
    ///
    /// A pin held by the timeline is released first.
    pub fn remove_timeline(&mut self, id: TimelineId) -> Option<Timeline> {
        for trigger in self.registry.bound_to(id) {
            if self.registry.unregister(trigger).is_some() {
                self.events.push(MotionEvent::TriggerReleased {
                    trigger,
                    timeline: id,
                });
            }
        }
        self.release_pin_of(id);

        let mut player = self.players.remove(&id)?;
        if let Some(event) = halt(id, &mut player) {
            self.events.push(event);
        }
        debug!(timeline = id.0, name = player.timeline().name(), "timeline removed");
        self.dirty = true;
        Some(player.timeline().clone())
    }

    /// Register a trigger against a timeline this manager owns.
    ///
    /// The returned handle unregisters the trigger when released or dropped.
    pub fn register(&mut self, trigger: Trigger) -> Result<TriggerHandle> {
        if !self.players.contains_key(&trigger.timeline()) {
            return Err(MotionError::UnknownTimeline(trigger.timeline()));
        }
        let id = self.registry.register(trigger)?;
        Ok(TriggerHandle::new(id, self.release_tx.clone()))
    }

    /// Remove a trigger and halt its timeline where it stands.
    ///
    /// Returns `false` if the trigger was already gone.
    pub fn unregister(&mut self, id: TriggerId) -> bool {
        let Some(trigger) = self.registry.unregister(id) else {
            return false;
        };
        let timeline = trigger.timeline();
        debug!(trigger = id.0, timeline = timeline.0, "trigger unregistered");
        self.events.push(MotionEvent::TriggerReleased {
            trigger: id,
            timeline,
        });

        if let Some(event) = self.players.get_mut(&timeline).and_then(|p| halt(timeline, p)) {
            self.events.push(event);
            self.dirty = true;
        }
        true
    }

    /// Play a timeline in `direction`.
    pub fn play(&mut self, id: TimelineId, direction: Direction) -> Result<PlayOutcome> {
        let player = self
            .players
            .get_mut(&id)
            .ok_or(MotionError::UnknownTimeline(id))?;
        let outcome = player.play(direction);
        let name = player.timeline().name().to_string();

        match outcome {
            PlayOutcome::Started => self.events.push(MotionEvent::TimelineStarted {
                timeline: id,
                name,
                direction,
            }),
            PlayOutcome::Reversed => self.events.push(MotionEvent::TimelineReversed {
                timeline: id,
                name,
                direction,
            }),
            PlayOutcome::Unchanged => return Ok(outcome),
        }
        self.dirty = true;
        Ok(outcome)
    }

    /// Jump a timeline to `position` without playing it.
    pub fn seek(&mut self, id: TimelineId, position: f32) -> Result<()> {
        let player = self
            .players
            .get_mut(&id)
            .ok_or(MotionError::UnknownTimeline(id))?;
        player.seek(position);
        self.dirty = true;
        Ok(())
    }

    /// Drive a timeline from scroll instead of time.
    ///
    /// Takes effect on the next `on_scroll`.
    pub fn bind_to_scroll(&mut self, id: TimelineId, range: PinnedRange) -> Result<()> {
        let player = self
            .players
            .get_mut(&id)
            .ok_or(MotionError::UnknownTimeline(id))?;
        debug!(timeline = id.0, anchor = %range.anchor, pin = range.pin, "timeline bound to scroll");
        player.bind_to_scroll(range);
        Ok(())
    }

    /// React to a scroll or resize.
    ///
    /// Applies pending releases, evaluates triggers in registration order,
    /// recomputes scrubbed positions and settles scroll ownership.
    pub fn on_scroll(&mut self, viewport: Viewport, layout: &dyn LayoutSource) {
        self.apply_releases();
        self.viewport = viewport;

        for transition in self.registry.on_scroll(&viewport, layout) {
            match transition {
                TriggerTransition::Enter { trigger, timeline } => {
                    self.events.push(MotionEvent::TriggerEntered { trigger, timeline });
                    self.play_bound(timeline, Direction::Forward);
                }
                TriggerTransition::Exit { trigger, timeline } => {
                    self.events.push(MotionEvent::TriggerExited { trigger, timeline });
                    self.play_bound(timeline, Direction::Reverse);
                }
                TriggerTransition::Dropped {
                    trigger,
                    timeline,
                    target,
                } => {
                    self.events.push(MotionEvent::TriggerDropped {
                        trigger,
                        timeline,
                        target,
                    });
                }
            }
        }

        let mut pinning = Vec::new();
        for (id, player) in self.players.iter_mut() {
            let Some(binding) = player.scroll_binding() else {
                continue;
            };
            let anchor = binding.range.anchor.clone();
            let Some(bounds) = layout.bounds(&anchor) else {
                debug!(timeline = id.0, anchor = %anchor, "scroll anchor missing from layout");
                continue;
            };
            let resolved = binding.range.resolve(bounds, &viewport);
            player.apply_scroll(resolved, viewport.scroll_y);
            if player
                .scroll_binding()
                .is_some_and(|b| b.is_pinning(viewport.scroll_y))
            {
                pinning.push((*id, anchor));
            }
        }
        self.settle_scroll_owner(pinning);
        self.dirty = true;
    }

    /// Advance every running player by `delta_ms`.
    ///
    /// Returns whether any player is still running.
    pub fn tick(&mut self, delta_ms: f32) -> bool {
        self.apply_releases();

        let mut completed = Vec::new();
        let mut moved = false;
        for (id, player) in self.players.iter_mut() {
            match player.tick(delta_ms) {
                TickOutcome::Idle => {}
                TickOutcome::Advanced => moved = true,
                TickOutcome::Completed(direction) => {
                    moved = true;
                    completed.push(MotionEvent::TimelineCompleted {
                        timeline: *id,
                        name: player.timeline().name().to_string(),
                        direction,
                    });
                }
            }
        }
        for event in completed {
            debug!(timeline = event.timeline().0, "timeline completed");
            self.events.push(event);
        }
        if moved {
            self.dirty = true;
        }
        self.has_active_animations()
    }

    /// Apply releases queued by dropped handles and scopes.
    ///
    /// `on_scroll` and `tick` call this first; call it directly to tear down
    /// without waiting for the next event.
    pub fn flush_releases(&mut self) {
        self.apply_releases();
    }

    /// Resolved style of one element across all timelines.
    pub fn style_of(&self, target: &TargetId) -> Option<ElementStyle> {
        let mut styles = self.styles();
        styles.remove(target)
    }

    /// Resolved styles of every animated element.
    ///
    /// Timelines are layered in creation order, so a later timeline wins on a
    /// shared property. Pinned anchors carry their `pin_offset`.
    pub fn styles(&self) -> BTreeMap<TargetId, ElementStyle> {
        let mut styles: BTreeMap<TargetId, ElementStyle> = BTreeMap::new();
        for player in self.players.values() {
            for (target, style) in player.values(&self.viewport) {
                styles.entry(target).or_default().merge(&style);
            }
            let Some(binding) = player.scroll_binding() else {
                continue;
            };
            if let (true, Some(resolved)) = (binding.range.pin, binding.resolved) {
                styles.entry(binding.range.anchor.clone()).or_default().pin_offset =
                    Some(resolved.pin_offset(self.viewport.scroll_y));
            }
        }
        styles
    }

    pub fn scroll_owner(&self) -> &ScrollOwner {
        &self.scroll_owner
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn player(&self, id: TimelineId) -> Option<&TimelinePlayer> {
        self.players.get(&id)
    }

    pub fn registry(&self) -> &TriggerRegistry {
        &self.registry
    }

    pub fn timeline_count(&self) -> usize {
        self.players.len()
    }

    pub fn trigger_count(&self) -> usize {
        self.registry.len()
    }

    /// Whether any player is advancing.
    pub fn has_active_animations(&self) -> bool {
        self.players.values().any(TimelinePlayer::is_running)
    }

    /// Whether rendered values may have changed since `clear_dirty`.
    pub fn needs_redraw(&self) -> bool {
        self.dirty
    }

    /// Clear the dirty flag (call after redraw).
    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    /// Drain all pending events, oldest first.
    pub fn drain_events(&mut self) -> impl Iterator<Item = MotionEvent> + '_ {
        self.events.drain()
    }

    pub fn has_pending_events(&self) -> bool {
        !self.events.is_empty()
    }

    pub fn pending_event_count(&self) -> usize {
        self.events.len()
    }

    pub fn peek_event(&self) -> Option<&MotionEvent> {
        self.events.peek()
    }

    pub fn pop_event(&mut self) -> Option<MotionEvent> {
        self.events.pop()
    }

    /// Pending events for one timeline (without removing them).
    pub fn events_for_timeline(&self, timeline: TimelineId) -> Vec<&MotionEvent> {
        self.events.events_for_timeline(timeline)
    }

    pub fn clear_events(&mut self) {
        self.events.clear();
    }

    fn apply_releases(&mut self) {
        while let Ok(release) = self.release_rx.try_recv() {
            match release {
                Release::Trigger(id) => {
                    self.unregister(id);
                }
                Release::Timeline(id) => {
                    self.remove_timeline(id);
                }
            }
        }
    }

    /// Play a trigger-bound timeline; the trigger already checked it exists.
    fn play_bound(&mut self, id: TimelineId, direction: Direction) {
        if let Err(err) = self.play(id, direction) {
            warn!(timeline = id.0, error = %err, "trigger fired for a missing timeline");
        }
    }

    fn settle_scroll_owner(&mut self, pinning: Vec<(TimelineId, TargetId)>) {
        if let ScrollOwner::Pinned { timeline, .. } = &self.scroll_owner {
            if pinning.iter().any(|(id, _)| id == timeline) {
                return;
            }
        }

        let mut candidates = pinning.into_iter();
        let next = match candidates.next() {
            Some((timeline, anchor)) => {
                for (other, _) in candidates {
                    warn!(
                        timeline = other.0,
                        owner = timeline.0,
                        "overlapping pinned ranges; scroll stays with the first"
                    );
                }
                ScrollOwner::Pinned { timeline, anchor }
            }
            None => ScrollOwner::Page,
        };
        if next == self.scroll_owner {
            return;
        }

        let previous = std::mem::replace(&mut self.scroll_owner, next);
        if let ScrollOwner::Pinned { timeline, anchor } = previous {
            info!(timeline = timeline.0, anchor = %anchor, "pin released");
            self.events.push(MotionEvent::PinReleased { timeline, anchor });
        }
        if let ScrollOwner::Pinned { timeline, anchor } = &self.scroll_owner {
            info!(timeline = timeline.0, anchor = %anchor, "pin engaged");
            self.events.push(MotionEvent::PinEngaged {
                timeline: *timeline,
                anchor: anchor.clone(),
            });
        }
    }

    fn release_pin_of(&mut self, id: TimelineId) {
        let owns = matches!(&self.scroll_owner, ScrollOwner::Pinned { timeline, .. } if *timeline == id);
        if !owns {
            return;
        }
        if let ScrollOwner::Pinned { timeline, anchor } =
            std::mem::replace(&mut self.scroll_owner, ScrollOwner::Page)
        {
            info!(timeline = timeline.0, anchor = %anchor, "pin released on removal");
            self.events.push(MotionEvent::PinReleased { timeline, anchor });
        }
    }
}

/// Halt `player`, reporting it if it was running.
fn halt(id: TimelineId, player: &mut TimelinePlayer) -> Option<MotionEvent> {
    player.halt().then(|| MotionEvent::TimelineHalted {
        timeline: id,
        name: player.timeline().name().to_string(),
        position: player.position(),
    })
}

// Ensure MotionManager is Send for embedding in async runtimes
static_assertions::assert_impl_all!(MotionManager: Send);
