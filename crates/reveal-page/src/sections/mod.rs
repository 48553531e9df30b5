//! Landing page sections.
//!
//! Each section knows where its elements sit (`place`) and which timelines
//! and triggers animate them (`mount`). Mounting returns the `Scope` that
//! owns those registrations, so unmounting a section is dropping or closing
//! its scope.

use anyhow::{Context, Result};
use reveal_config::MotionConfig;
use reveal_motion::{
    EasingFunction, MotionManager, Placement, RepeatPolicy, Scope, Timeline, TimelineId, Trigger,
    Tween, Viewport,
};

use crate::anchors::SectionId;
use crate::layout::LayoutBuilder;
use crate::state::PageState;

pub mod contact;
pub mod hero;
pub mod services;
pub mod trust;
pub mod value;

/// Motion tuning shared by every section.
#[derive(Debug, Clone, PartialEq)]
pub struct MotionSettings {
    pub default_easing: EasingFunction,
    pub reveal_threshold: f32,
    pub trust_threshold: f32,
    /// Pinned value section length, in viewport heights.
    pub pin_distance: f64,
    pub scrub_lag_ms: f32,
}

impl MotionSettings {
    pub fn from_config(config: &MotionConfig) -> Result<Self> {
        let default_easing = config
            .default_easing
            .parse::<EasingFunction>()
            .with_context(|| format!("motion.default_easing = {:?}", config.default_easing))?;
        Ok(Self {
            default_easing,
            reveal_threshold: config.reveal_threshold,
            trust_threshold: config.trust_threshold,
            pin_distance: config.pin_distance,
            scrub_lag_ms: config.scrub_lag_ms,
        })
    }
}

impl Default for MotionSettings {
    fn default() -> Self {
        Self {
            default_easing: EasingFunction::power(2, reveal_motion::EaseMode::Out),
            reveal_threshold: 0.85,
            trust_threshold: 0.80,
            pin_distance: 1.3,
            scrub_lag_ms: 600.0,
        }
    }
}

/// Read-only view handed to sections while they mount.
#[derive(Debug, Clone, Copy)]
pub struct SectionContext<'a> {
    pub settings: &'a MotionSettings,
    pub page: &'a PageState,
    pub viewport: Viewport,
}

pub trait Section {
    fn id(&self) -> SectionId;

    /// Add this section's elements below what is already placed.
    fn place(&self, layout: &mut LayoutBuilder, settings: &MotionSettings);

    /// Create this section's timelines and triggers.
    fn mount(&self, manager: &mut MotionManager, ctx: &SectionContext<'_>) -> Result<Scope>;
}

/// Sections of the landing page, top to bottom.
pub fn landing_sections() -> Vec<Box<dyn Section>> {
    vec![
        Box::new(hero::Hero),
        Box::new(value::Value::default()),
        Box::new(services::Services),
        Box::new(trust::Trust),
        Box::new(contact::Contact),
    ]
}

/// One fade-and-slide reveal: a single-tween timeline played forward when
/// `trigger` crosses `threshold` and reversed when it falls back.
pub(crate) fn reveal(
    manager: &mut MotionManager,
    scope: &mut Scope,
    ctx: &SectionContext<'_>,
    trigger: &str,
    threshold: f32,
    tween: Tween,
    placement: Placement,
) -> Result<TimelineId> {
    let name = format!("{}:{trigger}", scope.name());
    let timeline = Timeline::builder(name.as_str())
        .default_easing(ctx.settings.default_easing)
        .add(tween, placement)
        .build()
        .with_context(|| format!("building {name}"))?;
    let id = scope.add_timeline(manager, timeline);
    scope
        .register(
            manager,
            Trigger::new(trigger, threshold, RepeatPolicy::PlayReverseOnExit, id),
        )
        .with_context(|| format!("registering trigger for {name}"))?;
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_from_default_config() {
        let settings = MotionSettings::from_config(&MotionConfig::default()).unwrap();
        assert_eq!(settings, MotionSettings::default());
    }

    #[test]
    fn test_unknown_easing_is_reported() {
        let config = MotionConfig {
            default_easing: "wobble".to_string(),
            ..MotionConfig::default()
        };
        let err = MotionSettings::from_config(&config).unwrap_err();
        assert!(format!("{err:#}").contains("wobble"));
    }

    #[test]
    fn test_landing_order() {
        let ids: Vec<SectionId> = landing_sections().iter().map(|s| s.id()).collect();
        assert_eq!(
            ids,
            vec![
                SectionId::Hero,
                SectionId::Value,
                SectionId::Services,
                SectionId::Trust,
                SectionId::Contact
            ]
        );
    }
}
