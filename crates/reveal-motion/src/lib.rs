//! Scroll-synchronized reveal animations.
//!
//! This crate provides:
//! - **Triggers**: fire `enter` / `exit` when an element crosses a viewport
//!   threshold, once per crossing
//! - **Timelines**: declarative keyframe steps with easing, offsets and stagger
//! - **Players**: time-driven or scroll-scrubbed playback with in-place reversal
//! - **Pinning**: a scrubbed range that holds its anchor and owns scroll
//! - **Scopes**: exactly-once, reverse-order teardown of a section's registrations
//!
//! # Architecture
//!
//! ```text
//! MotionManager
//!   ├── TriggerRegistry (target bounds → enter / exit)
//!   ├── TimelinePlayer per timeline (position, direction, status)
//!   ├── ScrollOwner (page or pinned timeline)
//!   └── EventQueue (lifecycle events for the host)
//!
//! LayoutSource
//!   └── Supplied by the rendering layer; answers element bounds
//! ```

pub mod easing;
pub mod error;
pub mod events;
pub mod geometry;
pub mod interpolate;
pub mod manager;
pub mod player;
pub mod registry;
pub mod scope;
pub mod scrub;
pub mod timeline;
pub mod trigger;
pub mod types;

pub use easing::{EaseMode, EasingFunction, StepPosition};
pub use error::{MotionError, Result};
pub use events::{EventQueue, MotionEvent};
pub use geometry::{LayoutSource, Rect, Viewport};
pub use interpolate::Interpolate;
pub use manager::{MotionManager, ScrollOwner};
pub use player::{PlayOutcome, PlaybackState, TickOutcome, TimelinePlayer};
pub use registry::{TriggerRegistry, TriggerTransition};
pub use scope::{Scope, TriggerHandle};
pub use scrub::{PinDistance, PinnedRange, ResolvedRange, ScrollBinding};
pub use timeline::{KeyframeStep, Placement, PropertyTween, Timeline, TimelineBuilder, Tween};
pub use trigger::{Activation, RepeatPolicy, Trigger};
pub use types::{
    AnimatableProperty, AnimatableValue, Direction, ElementStyle, PlaybackStatus, TargetId,
    TimelineId, TriggerId, deg, px, vh, vw,
};
