//! Motion lifecycle events.
//!
//! The manager queues an event for every trigger transition, every playback
//! state change and every pin hand-off. Poll them after `on_scroll` or `tick`:
//!
//! ```ignore
//! manager.on_scroll(viewport, &layout);
//! manager.tick(16.67);
//! for event in manager.drain_events() {
//!     if let MotionEvent::TimelineCompleted { name, direction, .. } = event {
//!         println!("{name} finished {direction:?}");
//!     }
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::types::{Direction, TargetId, TimelineId, TriggerId};

/// Something observable happened in the motion engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MotionEvent {
    /// A trigger's target crossed into activation.
    TriggerEntered {
        trigger: TriggerId,
        timeline: TimelineId,
    },
    /// A trigger's target fell back out of activation.
    TriggerExited {
        trigger: TriggerId,
        timeline: TimelineId,
    },
    /// The target left the document and the trigger was removed.
    TriggerDropped {
        trigger: TriggerId,
        timeline: TimelineId,
        target: TargetId,
    },
    /// The trigger was unregistered by its owner.
    TriggerReleased {
        trigger: TriggerId,
        timeline: TimelineId,
    },
    TimelineStarted {
        timeline: TimelineId,
        name: String,
        direction: Direction,
    },
    /// Running timeline turned around in place.
    TimelineReversed {
        timeline: TimelineId,
        name: String,
        direction: Direction,
    },
    TimelineCompleted {
        timeline: TimelineId,
        name: String,
        direction: Direction,
    },
    /// Stopped before reaching an endpoint.
    TimelineHalted {
        timeline: TimelineId,
        name: String,
        position: f32,
    },
    /// A pinned range took ownership of scroll.
    PinEngaged {
        timeline: TimelineId,
        anchor: TargetId,
    },
    /// A pinned range gave scroll back to the page.
    PinReleased {
        timeline: TimelineId,
        anchor: TargetId,
    },
}

impl MotionEvent {
    /// The timeline this event concerns.
    pub fn timeline(&self) -> TimelineId {
        match self {
            Self::TriggerEntered { timeline, .. }
            | Self::TriggerExited { timeline, .. }
            | Self::TriggerDropped { timeline, .. }
            | Self::TriggerReleased { timeline, .. }
            | Self::TimelineStarted { timeline, .. }
            | Self::TimelineReversed { timeline, .. }
            | Self::TimelineCompleted { timeline, .. }
            | Self::TimelineHalted { timeline, .. }
            | Self::PinEngaged { timeline, .. }
            | Self::PinReleased { timeline, .. } => *timeline,
        }
    }

    /// The trigger this event concerns, if any.
    pub fn trigger(&self) -> Option<TriggerId> {
        match self {
            Self::TriggerEntered { trigger, .. }
            | Self::TriggerExited { trigger, .. }
            | Self::TriggerDropped { trigger, .. }
            | Self::TriggerReleased { trigger, .. } => Some(*trigger),
            _ => None,
        }
    }
}

/// FIFO of pending motion events.
#[derive(Debug, Default)]
pub struct EventQueue {
    events: VecDeque<MotionEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: MotionEvent) {
        self.events.push_back(event);
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn pop(&mut self) -> Option<MotionEvent> {
        self.events.pop_front()
    }

    /// Peek at the next event without removing it.
    pub fn peek(&self) -> Option<&MotionEvent> {
        self.events.front()
    }

    /// Drain all events, oldest first.
    pub fn drain(&mut self) -> impl Iterator<Item = MotionEvent> + '_ {
        self.events.drain(..)
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Pending events for one timeline, without removing them.
    pub fn events_for_timeline(&self, timeline: TimelineId) -> Vec<&MotionEvent> {
        self.events
            .iter()
            .filter(|e| e.timeline() == timeline)
            .collect()
    }
}
