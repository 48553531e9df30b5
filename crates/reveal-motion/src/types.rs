//! Core motion types and data structures.
//!
//! This module defines the fundamental types shared by the registry and the
//! player:
//! - `TargetId`, `TimelineId`, `TriggerId`: identifiers
//! - `AnimatableProperty` / `AnimatableValue`: what a step animates, with units
//! - `Direction` / `PlaybackStatus`: playback bookkeeping
//! - `ElementStyle`: resolved per-element output of all timelines

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::geometry::Viewport;

/// Reference to an element owned by the rendering layer.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TargetId(String);

impl TargetId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TargetId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for TargetId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Unique identifier for a timeline owned by a `MotionManager`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TimelineId(pub u64);

impl TimelineId {
    /// Generate a new unique timeline ID.
    pub fn new() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for TimelineId {
    fn default() -> Self {
        Self::new()
    }
}

/// Unique identifier for a registered trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TriggerId(pub u64);

impl TriggerId {
    /// Generate a new unique trigger ID.
    pub fn new() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for TriggerId {
    fn default() -> Self {
        Self::new()
    }
}

/// Direction of playback along a timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    #[default]
    Forward,
    Reverse,
}

impl Direction {
    pub fn opposite(self) -> Self {
        match self {
            Self::Forward => Self::Reverse,
            Self::Reverse => Self::Forward,
        }
    }

    /// Position this direction converges on.
    pub fn endpoint(self) -> f32 {
        match self {
            Self::Forward => 1.0,
            Self::Reverse => 0.0,
        }
    }

    pub(crate) fn sign(self) -> f32 {
        match self {
            Self::Forward => 1.0,
            Self::Reverse => -1.0,
        }
    }
}

/// Whether a player is currently advancing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackStatus {
    #[default]
    Idle,
    Running,
}

/// Visual properties a keyframe step can drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimatableProperty {
    /// Horizontal translation in pixels.
    X,
    /// Vertical translation in pixels.
    Y,
    Opacity,
    Scale,
    /// Rotation in degrees.
    Rotation,
}

impl AnimatableProperty {
    /// Value an element shows when no timeline touches this property.
    pub fn identity(&self) -> f64 {
        match self {
            Self::Opacity | Self::Scale => 1.0,
            Self::X | Self::Y | Self::Rotation => 0.0,
        }
    }
}

/// A property value with its unit.
///
/// Viewport-relative units are resolved at sampling time so a resize changes
/// where an in-flight animation is heading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "unit", content = "value", rename_all = "snake_case")]
pub enum AnimatableValue {
    /// Unitless number (opacity, scale).
    Number(f64),
    /// Absolute pixels.
    Px(f64),
    /// Percent of viewport width (`-50vw`).
    Vw(f64),
    /// Percent of viewport height (`10vh`).
    Vh(f64),
    /// Degrees of rotation.
    Deg(f64),
}

impl AnimatableValue {
    /// Resolve to a plain number against the given viewport.
    pub fn resolve(&self, viewport: &Viewport) -> f64 {
        match *self {
            Self::Number(v) | Self::Px(v) | Self::Deg(v) => v,
            Self::Vw(v) => v * viewport.width / 100.0,
            Self::Vh(v) => v * viewport.height / 100.0,
        }
    }

    pub fn is_finite(&self) -> bool {
        match *self {
            Self::Number(v) | Self::Px(v) | Self::Vw(v) | Self::Vh(v) | Self::Deg(v) => {
                v.is_finite()
            }
        }
    }
}

impl From<f64> for AnimatableValue {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

/// Shorthand for a pixel value.
pub fn px(v: f64) -> AnimatableValue {
    AnimatableValue::Px(v)
}

/// Shorthand for a viewport-width value.
pub fn vw(v: f64) -> AnimatableValue {
    AnimatableValue::Vw(v)
}

/// Shorthand for a viewport-height value.
pub fn vh(v: f64) -> AnimatableValue {
    AnimatableValue::Vh(v)
}

/// Shorthand for a rotation in degrees.
pub fn deg(v: f64) -> AnimatableValue {
    AnimatableValue::Deg(v)
}

/// Resolved visual state of one element.
///
/// Only properties touched by some timeline are present; `value` falls back
/// to the property's identity for the rest.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ElementStyle {
    pub values: BTreeMap<AnimatableProperty, f64>,
    /// Translation applied while the element is pinned.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pin_offset: Option<f64>,
}

impl ElementStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, property: AnimatableProperty, value: f64) {
        self.values.insert(property, value);
    }

    /// Value that was explicitly animated, if any.
    pub fn get(&self, property: AnimatableProperty) -> Option<f64> {
        self.values.get(&property).copied()
    }

    /// Value to render, defaulting to the property's identity.
    pub fn value(&self, property: AnimatableProperty) -> f64 {
        self.get(property).unwrap_or_else(|| property.identity())
    }

    /// Overlay `other` on top of `self`; values from `other` win.
    pub fn merge(&mut self, other: &ElementStyle) {
        for (property, value) in &other.values {
            self.values.insert(*property, *value);
        }
        if other.pin_offset.is_some() {
            self.pin_offset = other.pin_offset;
        }
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty() && self.pin_offset.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_uniqueness() {
        let a = TimelineId::new();
        let b = TimelineId::new();
        assert_ne!(a, b);
        assert!(a < b);

        let t1 = TriggerId::new();
        let t2 = TriggerId::new();
        assert_ne!(t1, t2);
    }

    #[test]
    fn test_direction() {
        assert_eq!(Direction::Forward.opposite(), Direction::Reverse);
        assert_eq!(Direction::Reverse.endpoint(), 0.0);
        assert_eq!(Direction::Forward.endpoint(), 1.0);
    }

    #[test]
    fn test_value_resolution() {
        let viewport = Viewport::new(0.0, 1440.0, 900.0);
        assert_eq!(vw(-50.0).resolve(&viewport), -720.0);
        assert_eq!(vh(10.0).resolve(&viewport), 90.0);
        assert_eq!(px(30.0).resolve(&viewport), 30.0);
        assert_eq!(AnimatableValue::from(0.5).resolve(&viewport), 0.5);
    }

    #[test]
    fn test_style_defaults_and_merge() {
        let mut base = ElementStyle::new();
        assert_eq!(base.value(AnimatableProperty::Opacity), 1.0);
        assert_eq!(base.value(AnimatableProperty::X), 0.0);

        base.set(AnimatableProperty::Opacity, 0.2);
        let mut top = ElementStyle::new();
        top.set(AnimatableProperty::Opacity, 0.8);
        top.pin_offset = Some(12.0);
        base.merge(&top);

        assert_eq!(base.get(AnimatableProperty::Opacity), Some(0.8));
        assert_eq!(base.pin_offset, Some(12.0));
    }

    #[test]
    fn test_target_id_serializes_as_string() {
        let id = TargetId::new("hero-card");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"hero-card\"");
    }
}
