//! Viewport trigger registry.
//!
//! The registry decides, on every scroll or resize, whether each trigger's
//! target crossed its activation boundary. It emits at most one transition
//! per crossing:
//!
//! ```text
//!            active, armed
//!   Armed ───────────────────▶ Fired      (enter)
//!     ▲                          │
//!     └──────────────────────────┘        (exit, reverse policies only)
//!            inactive, fired
//! ```
//!
//! Everything else is a no-op, which is what keeps timelines from restarting
//! on every scroll event. Triggers are evaluated in registration order.

use tracing::debug;

use crate::error::Result;
use crate::geometry::{LayoutSource, Viewport};
use crate::trigger::Trigger;
use crate::types::{TargetId, TimelineId, TriggerId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ArmState {
    Armed,
    Fired,
}

#[derive(Debug, Clone)]
struct Registered {
    id: TriggerId,
    trigger: Trigger,
    state: ArmState,
}

/// A state change produced by `on_scroll`.
#[derive(Debug, Clone, PartialEq)]
pub enum TriggerTransition {
    /// Target crossed into activation; play the timeline forward.
    Enter { trigger: TriggerId, timeline: TimelineId },
    /// Target fell back out; play the timeline in reverse.
    Exit { trigger: TriggerId, timeline: TimelineId },
    /// Target left the document; the trigger was removed.
    Dropped {
        trigger: TriggerId,
        timeline: TimelineId,
        target: TargetId,
    },
}

/// Registered triggers in registration order.
#[derive(Debug, Default)]
pub struct TriggerRegistry {
    triggers: Vec<Registered>,
}

impl TriggerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a trigger, armed.
    ///
    /// Fails with `InvalidThreshold` when the threshold is outside `[0, 1]`.
    pub fn register(&mut self, trigger: Trigger) -> Result<TriggerId> {
        trigger.validate()?;
        let id = TriggerId::new();
        debug!(
            trigger = id.0,
            target = %trigger.target(),
            threshold = trigger.threshold(),
            "trigger registered"
        );
        self.triggers.push(Registered {
            id,
            trigger,
            state: ArmState::Armed,
        });
        Ok(id)
    }

    /// Remove a trigger. Unknown or already removed ids return `None`.
    pub fn unregister(&mut self, id: TriggerId) -> Option<Trigger> {
        let index = self.triggers.iter().position(|r| r.id == id)?;
        Some(self.triggers.remove(index).trigger)
    }

    pub fn get(&self, id: TriggerId) -> Option<&Trigger> {
        self.triggers.iter().find(|r| r.id == id).map(|r| &r.trigger)
    }

    /// Whether the trigger has entered and not exited since.
    pub fn has_fired(&self, id: TriggerId) -> bool {
        self.triggers
            .iter()
            .any(|r| r.id == id && r.state == ArmState::Fired)
    }

    /// Triggers bound to `timeline`, in registration order.
    pub fn bound_to(&self, timeline: TimelineId) -> Vec<TriggerId> {
        self.triggers
            .iter()
            .filter(|r| r.trigger.timeline() == timeline)
            .map(|r| r.id)
            .collect()
    }

    /// Triggers in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (TriggerId, &Trigger)> {
        self.triggers.iter().map(|r| (r.id, &r.trigger))
    }

    pub fn len(&self) -> usize {
        self.triggers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triggers.is_empty()
    }

    /// Re-evaluate every trigger against the viewport.
    pub fn on_scroll(
        &mut self,
        viewport: &Viewport,
        layout: &dyn LayoutSource,
    ) -> Vec<TriggerTransition> {
        let mut transitions = Vec::new();

        self.triggers.retain_mut(|registered| {
            let trigger = &registered.trigger;
            let Some(bounds) = layout.bounds(trigger.target()) else {
                debug!(trigger = registered.id.0, target = %trigger.target(), "dropping stale trigger");
                transitions.push(TriggerTransition::Dropped {
                    trigger: registered.id,
                    timeline: trigger.timeline(),
                    target: trigger.target().clone(),
                });
                return false;
            };

            let active = trigger.is_active(&bounds, viewport);
            match (registered.state, active) {
                (ArmState::Armed, true) => {
                    registered.state = ArmState::Fired;
                    transitions.push(TriggerTransition::Enter {
                        trigger: registered.id,
                        timeline: trigger.timeline(),
                    });
                }
                (ArmState::Fired, false) if trigger.policy().reverses_on_exit() => {
                    registered.state = ArmState::Armed;
                    transitions.push(TriggerTransition::Exit {
                        trigger: registered.id,
                        timeline: trigger.timeline(),
                    });
                }
                _ => {}
            }
            true
        });

        transitions
    }
}
