//! Error types for timeline and trigger construction.

use thiserror::Error;

use crate::types::TimelineId;

/// Result type for motion operations.
pub type Result<T> = std::result::Result<T, MotionError>;

/// Errors raised while building timelines or registering triggers.
///
/// All of these are construction-time failures. Scroll-time problems (a
/// target that left the document, a pin anchor that vanished) are handled
/// by silently skipping the affected work.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MotionError {
    /// Trigger threshold outside `[0, 1]` (or NaN).
    #[error("activation threshold {0} is outside [0, 1]")]
    InvalidThreshold(f32),

    /// Timeline failed validation.
    #[error("invalid timeline `{name}`: {reason}")]
    InvalidTimeline { name: String, reason: String },

    /// A trigger or binding referenced a timeline the manager does not own.
    #[error("unknown timeline {0:?}")]
    UnknownTimeline(TimelineId),

    /// Easing name could not be parsed.
    #[error("unknown easing `{0}`")]
    UnknownEasing(String),
}

impl MotionError {
    pub(crate) fn timeline(name: &str, reason: impl Into<String>) -> Self {
        Self::InvalidTimeline {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}
