//! Scroll triggers.
//!
//! A `Trigger` binds a visibility condition on one element to an existing
//! timeline. The timeline is chosen at construction and cannot be changed
//! afterwards; build the timeline first, then the trigger that plays it.

use serde::{Deserialize, Serialize};

use crate::error::{MotionError, Result};
use crate::geometry::{Rect, Viewport};
use crate::types::{TargetId, TimelineId};

/// What happens once a trigger has fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepeatPolicy {
    /// Play forward on the first entry and never react again.
    PlayOnce,
    /// Play forward on entry, reverse when the target falls back out.
    #[default]
    PlayReverseOnExit,
}

impl RepeatPolicy {
    pub fn reverses_on_exit(&self) -> bool {
        matches!(self, Self::PlayReverseOnExit)
    }
}

/// How the threshold is measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Activation {
    /// Active once the target's top edge is at or above the line at
    /// `threshold` of the viewport height, measured from the viewport top.
    #[default]
    ViewportLine,
    /// Active while at least `threshold` of the target's height is visible.
    Visibility,
}

/// Binding between a scroll-visibility condition and a timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trigger {
    target: TargetId,
    threshold: f32,
    activation: Activation,
    policy: RepeatPolicy,
    timeline: TimelineId,
}

impl Trigger {
    pub fn new(
        target: impl Into<TargetId>,
        threshold: f32,
        policy: RepeatPolicy,
        timeline: TimelineId,
    ) -> Self {
        Self {
            target: target.into(),
            threshold,
            activation: Activation::default(),
            policy,
            timeline,
        }
    }

    pub fn with_activation(mut self, activation: Activation) -> Self {
        self.activation = activation;
        self
    }

    pub fn target(&self) -> &TargetId {
        &self.target
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    pub fn activation(&self) -> Activation {
        self.activation
    }

    pub fn policy(&self) -> RepeatPolicy {
        self.policy
    }

    /// The timeline this trigger plays.
    pub fn timeline(&self) -> TimelineId {
        self.timeline
    }

    /// Reject thresholds outside `[0, 1]`, including NaN.
    pub fn validate(&self) -> Result<()> {
        if (0.0..=1.0).contains(&self.threshold) {
            Ok(())
        } else {
            Err(MotionError::InvalidThreshold(self.threshold))
        }
    }

    /// Whether the target satisfies the activation condition.
    pub fn is_active(&self, bounds: &Rect, viewport: &Viewport) -> bool {
        match self.activation {
            Activation::ViewportLine => bounds.top_reached_line(viewport, self.threshold),
            Activation::Visibility => bounds.visible_fraction(viewport) >= self.threshold,
        }
    }
}
