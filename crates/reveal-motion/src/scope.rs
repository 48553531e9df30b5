//! Scoped ownership of triggers and timelines.
//!
//! A `Scope` stands for one mounted section. Whatever is registered through
//! it is released exactly once, in reverse registration order, either
//! synchronously with `close` or, when the scope is simply dropped, at the
//! start of the manager's next event.

use std::sync::mpsc::Sender;

use tracing::debug;

use crate::error::Result;
use crate::manager::{MotionManager, Release};
use crate::scrub::PinnedRange;
use crate::timeline::Timeline;
use crate::trigger::Trigger;
use crate::types::{TimelineId, TriggerId};

/// Registration of one trigger.
///
/// `release` unregisters synchronously; dropping the handle queues the same
/// release for the manager to apply.
#[derive(Debug)]
#[must_use = "dropping a TriggerHandle unregisters its trigger"]
pub struct TriggerHandle {
    id: TriggerId,
    releases: Sender<Release>,
    released: bool,
}

impl TriggerHandle {
    pub(crate) fn new(id: TriggerId, releases: Sender<Release>) -> Self {
        Self {
            id,
            releases,
            released: false,
        }
    }

    pub fn id(&self) -> TriggerId {
        self.id
    }

    /// Unregister now. Returns `false` if the trigger was already gone.
    pub fn release(mut self, manager: &mut MotionManager) -> bool {
        self.released = true;
        manager.unregister(self.id)
    }

    /// Keep the trigger registered for the manager's lifetime.
    pub fn detach(mut self) -> TriggerId {
        self.released = true;
        self.id
    }
}

impl Drop for TriggerHandle {
    fn drop(&mut self) {
        if !self.released {
            // The manager may be gone already; nothing left to release then.
            let _ = self.releases.send(Release::Trigger(self.id));
        }
    }
}

#[derive(Debug)]
enum Owned {
    Timeline(TimelineId),
    Trigger(TriggerHandle),
}

/// Everything one section registered.
#[derive(Debug)]
pub struct Scope {
    name: String,
    releases: Sender<Release>,
    owned: Vec<Owned>,
}

impl Scope {
    pub(crate) fn new(name: impl Into<String>, releases: Sender<Release>) -> Self {
        Self {
            name: name.into(),
            releases,
            owned: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of timelines and triggers still held.
    pub fn len(&self) -> usize {
        self.owned.len()
    }

    pub fn is_empty(&self) -> bool {
        self.owned.is_empty()
    }

    pub fn add_timeline(&mut self, manager: &mut MotionManager, timeline: Timeline) -> TimelineId {
        let id = manager.add_timeline(timeline);
        self.owned.push(Owned::Timeline(id));
        id
    }

    /// Add a timeline already bound to a scroll range.
    pub fn add_scroll_timeline(
        &mut self,
        manager: &mut MotionManager,
        timeline: Timeline,
        range: PinnedRange,
    ) -> Result<TimelineId> {
        let id = self.add_timeline(manager, timeline);
        manager.bind_to_scroll(id, range)?;
        Ok(id)
    }

    pub fn register(&mut self, manager: &mut MotionManager, trigger: Trigger) -> Result<TriggerId> {
        let handle = manager.register(trigger)?;
        let id = handle.id();
        self.owned.push(Owned::Trigger(handle));
        Ok(id)
    }

    /// Release everything now, last registered first.
    pub fn close(mut self, manager: &mut MotionManager) {
        debug!(scope = %self.name, held = self.owned.len(), "closing scope");
        while let Some(owned) = self.owned.pop() {
            match owned {
                Owned::Trigger(handle) => {
                    handle.release(manager);
                }
                Owned::Timeline(id) => {
                    manager.remove_timeline(id);
                }
            }
        }
    }
}

impl Drop for Scope {
    fn drop(&mut self) {
        while let Some(owned) = self.owned.pop() {
            match owned {
                // The handle's own drop queues its release.
                Owned::Trigger(handle) => drop(handle),
                Owned::Timeline(id) => {
                    let _ = self.releases.send(Release::Timeline(id));
                }
            }
        }
    }
}
