//! Timeline playback.
//!
//! A `TimelinePlayer` owns one `Timeline` and its `PlaybackState`. It runs in
//! one of two modes:
//! - **time-driven**: `play` picks a direction and `tick` advances position by
//!   `elapsed / duration` until an endpoint is reached
//! - **scroll-driven**: after `bind_to_scroll`, position is set from scroll
//!   offset and `tick` only serves the optional scrub lag

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

use crate::geometry::Viewport;
use crate::interpolate::Interpolate;
use crate::scrub::{PinnedRange, ResolvedRange, ScrollBinding};
use crate::timeline::Timeline;
use crate::types::{Direction, ElementStyle, PlaybackStatus, TargetId};

/// Progress, direction and running status of a timeline.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PlaybackState {
    /// Position within the timeline's logical span, in `[0, 1]`.
    pub position: f32,
    pub direction: Direction,
    pub status: PlaybackStatus,
}

impl PlaybackState {
    pub fn is_running(&self) -> bool {
        self.status == PlaybackStatus::Running
    }
}

/// Result of a `play` request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayOutcome {
    /// Was idle, now running.
    Started,
    /// Was running the other way; continues from the current position.
    Reversed,
    /// Already running that way, already at that endpoint, or scroll-driven.
    Unchanged,
}

/// Result of a `tick`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Nothing moved.
    Idle,
    /// Position changed and playback continues.
    Advanced,
    /// Reached the endpoint of the given direction and went idle.
    Completed(Direction),
}

/// Runs a single timeline.
#[derive(Debug, Clone)]
pub struct TimelinePlayer {
    timeline: Timeline,
    state: PlaybackState,
    scroll: Option<ScrollBinding>,
}

impl TimelinePlayer {
    pub fn new(timeline: Timeline) -> Self {
        Self {
            timeline,
            state: PlaybackState::default(),
            scroll: None,
        }
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn position(&self) -> f32 {
        self.state.position
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    pub fn scroll_binding(&self) -> Option<&ScrollBinding> {
        self.scroll.as_ref()
    }

    /// Start or redirect playback.
    ///
    /// Playing in the direction already running is a no-op. Playing against
    /// the running direction turns around at the current position rather than
    /// restarting, so a quick scroll reversal never snaps.
    pub fn play(&mut self, direction: Direction) -> PlayOutcome {
        if self.scroll.is_some() {
            debug!(timeline = self.timeline.name(), "play ignored for scroll-driven timeline");
            return PlayOutcome::Unchanged;
        }

        match self.state.status {
            PlaybackStatus::Running if self.state.direction == direction => PlayOutcome::Unchanged,
            PlaybackStatus::Running => {
                self.state.direction = direction;
                PlayOutcome::Reversed
            }
            PlaybackStatus::Idle => {
                self.state.direction = direction;
                if self.state.position == direction.endpoint() {
                    PlayOutcome::Unchanged
                } else {
                    self.state.status = PlaybackStatus::Running;
                    PlayOutcome::Started
                }
            }
        }
    }

    /// Advance by `elapsed_ms`.
    pub fn tick(&mut self, elapsed_ms: f32) -> TickOutcome {
        if self.scroll.is_some() {
            return self.tick_scrub(elapsed_ms);
        }
        if !self.state.is_running() {
            return TickOutcome::Idle;
        }
        if !elapsed_ms.is_finite() || elapsed_ms <= 0.0 {
            return TickOutcome::Idle;
        }

        let direction = self.state.direction;
        let delta = elapsed_ms / self.timeline.duration_ms();
        let position = (self.state.position + direction.sign() * delta).clamp(0.0, 1.0);
        self.state.position = position;

        if position == direction.endpoint() {
            self.state.status = PlaybackStatus::Idle;
            TickOutcome::Completed(direction)
        } else {
            TickOutcome::Advanced
        }
    }

    /// Stop advancing, keeping the current position.
    ///
    /// Returns whether the player was running.
    pub fn halt(&mut self) -> bool {
        let was_running = self.state.is_running();
        self.state.status = PlaybackStatus::Idle;
        if let Some(binding) = self.scroll.as_mut() {
            binding.catch_up_ms = 0.0;
        }
        was_running
    }

    /// Jump to a position without playing.
    pub fn seek(&mut self, position: f32) {
        self.state.position = position.clamp(0.0, 1.0);
        self.state.status = PlaybackStatus::Idle;
    }

    /// Switch to scroll-driven mode.
    ///
    /// Any time-driven playback stops; position follows scroll from the next
    /// scroll event on.
    pub fn bind_to_scroll(&mut self, range: PinnedRange) {
        self.state.status = PlaybackStatus::Idle;
        self.scroll = Some(ScrollBinding::new(range));
    }

    /// Return to time-driven mode, keeping the current position.
    pub fn unbind_scroll(&mut self) -> Option<PinnedRange> {
        self.state.status = PlaybackStatus::Idle;
        self.scroll.take().map(|binding| binding.range)
    }

    /// Recompute position from a scroll offset inside the bound range.
    ///
    /// Without scrub lag the position is set immediately, so scrolling back
    /// by the same distance restores exactly the same state.
    pub fn apply_scroll(&mut self, resolved: ResolvedRange, scroll_y: f64) {
        let Some(binding) = self.scroll.as_mut() else {
            return;
        };
        let target = resolved.progress(scroll_y);
        binding.resolved = Some(resolved);
        if target != binding.target {
            self.state.direction = if target > binding.target {
                Direction::Forward
            } else {
                Direction::Reverse
            };
        }
        binding.target = target;

        match binding.range.scrub_lag_ms {
            Some(lag) if target != self.state.position => {
                binding.catch_up_ms = lag;
                self.state.status = PlaybackStatus::Running;
            }
            _ => {
                binding.catch_up_ms = 0.0;
                self.state.position = target;
                self.state.status = PlaybackStatus::Idle;
            }
        }
    }

    /// Move the displayed position toward the scroll target, arriving exactly
    /// when the remaining catch-up time runs out.
    fn tick_scrub(&mut self, elapsed_ms: f32) -> TickOutcome {
        let Some(binding) = self.scroll.as_mut() else {
            return TickOutcome::Idle;
        };
        if !self.state.is_running() || !elapsed_ms.is_finite() || elapsed_ms <= 0.0 {
            return TickOutcome::Idle;
        }

        if elapsed_ms >= binding.catch_up_ms {
            self.state.position = binding.target;
            binding.catch_up_ms = 0.0;
            self.state.status = PlaybackStatus::Idle;
        } else {
            let t = elapsed_ms / binding.catch_up_ms;
            self.state.position = self.state.position.interpolate(&binding.target, t);
            binding.catch_up_ms -= elapsed_ms;
        }
        TickOutcome::Advanced
    }

    /// Animated values at the current position.
    pub fn values(&self, viewport: &Viewport) -> BTreeMap<TargetId, ElementStyle> {
        self.timeline.sample(self.state.position, viewport)
    }
}
