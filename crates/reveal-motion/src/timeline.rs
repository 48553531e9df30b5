//! Declarative timelines of keyframe steps.
//!
//! This module provides:
//! - `KeyframeStep`: one interpolation of a property set on one target
//! - `Tween`: a step template that may fan out over several staggered targets
//! - `Placement`: where a tween lands relative to what is already on the timeline
//! - `Timeline`: the validated, immutable sequence a player runs
//!
//! # Example
//!
//! ```
//! use reveal_motion::easing::{EaseMode, EasingFunction};
//! use reveal_motion::timeline::{Placement, Timeline, Tween};
//! use reveal_motion::types::{px, AnimatableProperty};
//!
//! let intro = Timeline::builder("hero-intro")
//!     .default_easing(EasingFunction::power(2, EaseMode::Out))
//!     .add(
//!         Tween::new("hero-headline")
//!             .from_to(AnimatableProperty::Y, px(30.0), px(0.0))
//!             .from_to(AnimatableProperty::Opacity, 0.0.into(), 1.0.into())
//!             .duration_ms(800.0),
//!         Placement::Sequential,
//!     )
//!     .add(
//!         Tween::new("hero-subheadline")
//!             .from_to(AnimatableProperty::Opacity, 0.0.into(), 1.0.into())
//!             .duration_ms(600.0),
//!         Placement::FromEnd(-400.0),
//!     )
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(intro.duration_ms(), 1000.0);
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::easing::EasingFunction;
use crate::error::{MotionError, Result};
use crate::geometry::Viewport;
use crate::interpolate::Interpolate;
use crate::types::{AnimatableProperty, AnimatableValue, ElementStyle, TargetId};

/// Duration used by tweens that do not set one.
pub const DEFAULT_DURATION_MS: f32 = 500.0;

/// Start and end value of one property within a step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PropertyTween {
    pub property: AnimatableProperty,
    pub from: AnimatableValue,
    pub to: AnimatableValue,
}

/// A single interpolation on one target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyframeStep {
    pub target: TargetId,
    pub properties: Vec<PropertyTween>,
    /// Start of the step within the timeline, in milliseconds.
    pub offset_ms: f32,
    pub duration_ms: f32,
    pub easing: EasingFunction,
}

impl KeyframeStep {
    pub fn end_ms(&self) -> f32 {
        self.offset_ms + self.duration_ms
    }

    /// Eased progress of this step at timeline time `time_ms`.
    pub fn progress_at(&self, time_ms: f32) -> f32 {
        let local = ((time_ms - self.offset_ms) / self.duration_ms).clamp(0.0, 1.0);
        self.easing.evaluate(local)
    }

    fn tween_for(&self, property: AnimatableProperty) -> Option<&PropertyTween> {
        self.properties.iter().find(|p| p.property == property)
    }
}

/// Where a tween is placed on the timeline.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", content = "ms", rename_all = "snake_case")]
pub enum Placement {
    /// At an absolute offset.
    At(f32),
    /// Appended at the current end of the timeline.
    #[default]
    Sequential,
    /// Relative to the current end; negative values overlap (`-=400`).
    FromEnd(f32),
    /// Relative to the start of the previously added tween (`<`).
    WithPrevious(f32),
}

/// Step template added through `TimelineBuilder`.
///
/// A tween with several targets expands into one step per target, each
/// shifted by `stagger_ms` from the previous one.
#[derive(Debug, Clone, PartialEq)]
pub struct Tween {
    targets: Vec<TargetId>,
    properties: Vec<PropertyTween>,
    duration_ms: Option<f32>,
    easing: Option<EasingFunction>,
    stagger_ms: f32,
}

impl Tween {
    pub fn new(target: impl Into<TargetId>) -> Self {
        Self::each([target.into()])
    }

    /// Tween applied to every target in order.
    pub fn each<I>(targets: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<TargetId>,
    {
        Self {
            targets: targets.into_iter().map(Into::into).collect(),
            properties: Vec::new(),
            duration_ms: None,
            easing: None,
            stagger_ms: 0.0,
        }
    }

    pub fn from_to(
        mut self,
        property: AnimatableProperty,
        from: AnimatableValue,
        to: AnimatableValue,
    ) -> Self {
        self.properties.retain(|p| p.property != property);
        self.properties.push(PropertyTween { property, from, to });
        self
    }

    pub fn duration_ms(mut self, duration: f32) -> Self {
        self.duration_ms = Some(duration);
        self
    }

    pub fn ease(mut self, easing: EasingFunction) -> Self {
        self.easing = Some(easing);
        self
    }

    pub fn stagger_ms(mut self, stagger: f32) -> Self {
        self.stagger_ms = stagger;
        self
    }
}

/// Builder that resolves placements and validates the result.
#[derive(Debug, Clone)]
pub struct TimelineBuilder {
    name: String,
    default_easing: EasingFunction,
    default_duration_ms: f32,
    entries: Vec<(Tween, Placement)>,
}

impl TimelineBuilder {
    pub fn default_easing(mut self, easing: EasingFunction) -> Self {
        self.default_easing = easing;
        self
    }

    pub fn default_duration_ms(mut self, duration: f32) -> Self {
        self.default_duration_ms = duration;
        self
    }

    pub fn add(mut self, tween: Tween, placement: Placement) -> Self {
        self.entries.push((tween, placement));
        self
    }

    /// Resolve every placement into concrete steps and validate them.
    pub fn build(self) -> Result<Timeline> {
        let mut steps = Vec::new();
        let mut end: f32 = 0.0;
        let mut previous_start: f32 = 0.0;

        for (index, (tween, placement)) in self.entries.into_iter().enumerate() {
            let start = match placement {
                Placement::At(ms) => ms,
                Placement::Sequential => end,
                Placement::FromEnd(delta) => end + delta,
                Placement::WithPrevious(delta) => previous_start + delta,
            };
            if tween.targets.is_empty() {
                return Err(MotionError::timeline(&self.name, format!("tween {index} has no targets")));
            }
            if tween.properties.is_empty() {
                return Err(MotionError::timeline(&self.name, format!("tween {index} animates nothing")));
            }
            if !tween.stagger_ms.is_finite() || tween.stagger_ms < 0.0 {
                return Err(MotionError::timeline(
                    &self.name,
                    format!("tween {index} has invalid stagger {}", tween.stagger_ms),
                ));
            }

            let duration = tween.duration_ms.unwrap_or(self.default_duration_ms);
            let easing = tween.easing.unwrap_or(self.default_easing);
            for (i, target) in tween.targets.into_iter().enumerate() {
                let step = KeyframeStep {
                    target,
                    properties: tween.properties.clone(),
                    offset_ms: start + i as f32 * tween.stagger_ms,
                    duration_ms: duration,
                    easing,
                };
                end = end.max(step.end_ms());
                steps.push(step);
            }
            previous_start = start;
        }

        Timeline::from_steps(self.name, steps)
    }
}

/// A validated sequence of keyframe steps.
///
/// Steps may overlap. For every (target, property) pair the step that most
/// recently started wins; before any step on that pair has started, the first
/// step's start value applies.
#[derive(Debug, Clone, PartialEq)]
pub struct Timeline {
    name: String,
    steps: Vec<KeyframeStep>,
    duration_ms: f32,
    tracks: BTreeMap<(TargetId, AnimatableProperty), Vec<usize>>,
}

impl Timeline {
    pub fn builder(name: impl Into<String>) -> TimelineBuilder {
        TimelineBuilder {
            name: name.into(),
            default_easing: EasingFunction::default(),
            default_duration_ms: DEFAULT_DURATION_MS,
            entries: Vec::new(),
        }
    }

    /// Build a timeline from already-placed steps.
    ///
    /// Fails with `InvalidTimeline` if any step has a non-positive duration, a
    /// negative or non-finite offset, a non-finite value, or if the total
    /// duration is not positive.
    pub fn from_steps(name: impl Into<String>, steps: Vec<KeyframeStep>) -> Result<Self> {
        let name = name.into();
        let mut duration_ms: f32 = 0.0;

        for (index, step) in steps.iter().enumerate() {
            if !step.offset_ms.is_finite() || step.offset_ms < 0.0 {
                return Err(MotionError::timeline(
                    &name,
                    format!("step {index} starts at {}ms", step.offset_ms),
                ));
            }
            if !step.duration_ms.is_finite() || step.duration_ms <= 0.0 {
                return Err(MotionError::timeline(
                    &name,
                    format!("step {index} has non-positive duration {}ms", step.duration_ms),
                ));
            }
            if step
                .properties
                .iter()
                .any(|p| !p.from.is_finite() || !p.to.is_finite())
            {
                return Err(MotionError::timeline(&name, format!("step {index} has a non-finite value")));
            }
            duration_ms = duration_ms.max(step.end_ms());
        }

        if duration_ms <= 0.0 {
            return Err(MotionError::timeline(&name, "total duration must be positive"));
        }

        let mut tracks: BTreeMap<(TargetId, AnimatableProperty), Vec<usize>> = BTreeMap::new();
        for (index, step) in steps.iter().enumerate() {
            for tween in &step.properties {
                tracks
                    .entry((step.target.clone(), tween.property))
                    .or_default()
                    .push(index);
            }
        }
        // Stable sort keeps insertion order for steps starting together.
        for track in tracks.values_mut() {
            track.sort_by(|a, b| {
                steps[*a]
                    .offset_ms
                    .partial_cmp(&steps[*b].offset_ms)
                    .unwrap_or(std::cmp::Ordering::Equal)
            });
        }

        Ok(Self {
            name,
            steps,
            duration_ms,
            tracks,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn steps(&self) -> &[KeyframeStep] {
        &self.steps
    }

    /// Total logical span, from 0 to the end of the last step.
    pub fn duration_ms(&self) -> f32 {
        self.duration_ms
    }

    /// Distinct targets animated by this timeline, in sorted order.
    pub fn targets(&self) -> Vec<&TargetId> {
        let mut targets: Vec<&TargetId> = self.tracks.keys().map(|(t, _)| t).collect();
        targets.dedup();
        targets
    }

    /// Compute every animated value at `position` (0.0 to 1.0).
    pub fn sample(&self, position: f32, viewport: &Viewport) -> BTreeMap<TargetId, ElementStyle> {
        let time_ms = position.clamp(0.0, 1.0) * self.duration_ms;
        let mut styles: BTreeMap<TargetId, ElementStyle> = BTreeMap::new();

        for ((target, property), track) in &self.tracks {
            let Some(index) = track
                .iter()
                .rev()
                .find(|i| self.steps[**i].offset_ms <= time_ms)
                .or_else(|| track.first())
            else {
                continue;
            };
            let step = &self.steps[*index];
            let Some(tween) = step.tween_for(*property) else {
                continue;
            };

            let eased = step.progress_at(time_ms);
            let from = tween.from.resolve(viewport);
            let to = tween.to.resolve(viewport);
            styles
                .entry(target.clone())
                .or_default()
                .set(*property, from.interpolate(&to, eased));
        }

        styles
    }
}
