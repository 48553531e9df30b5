//! The landing page built on `reveal-motion`.
//!
//! Sections place their elements into a static layout and mount their
//! timelines and triggers into one shared `MotionManager`. Page flags (contact
//! modal, mobile menu, scrolled navigation) live in an explicit `PageState`
//! changed only through actions.

pub mod anchors;
pub mod layout;
pub mod page;
pub mod sections;
pub mod state;

pub use anchors::{NAV_LINKS, SectionId};
pub use layout::{LayoutBuilder, StaticLayout};
pub use page::LandingPage;
pub use sections::{MotionSettings, Section, SectionContext, landing_sections};
pub use state::{Key, PageAction, PageEffect, PageState};
