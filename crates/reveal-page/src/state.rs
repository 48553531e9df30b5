//! Page-level UI state.
//!
//! The composition owns a single `PageState` and changes it only through
//! `reduce`. Sections get a read-only `PageState` reference; the effects the
//! reducer returns are applied by whoever drives the page.

use serde::{Deserialize, Serialize};

use crate::anchors::SectionId;

/// Keys the page reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Key {
    Escape,
    Other,
}

/// User intent delivered to the page.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", content = "value", rename_all = "snake_case")]
pub enum PageAction {
    OpenContact,
    CloseContact,
    KeyPressed(Key),
    ToggleMenu,
    /// Navigation link or logo click.
    NavigateTo(SectionId),
    /// The document scrolled to this offset.
    Scrolled(f64),
}

/// Side effect the driver must perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "effect", content = "value", rename_all = "snake_case")]
pub enum PageEffect {
    ScrollTo(SectionId),
    LockScroll,
    UnlockScroll,
}

/// Explicit page flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageState {
    contact_open: bool,
    menu_open: bool,
    nav_scrolled: bool,
    scrolled_threshold_px: f64,
}

impl Default for PageState {
    fn default() -> Self {
        Self::new(50.0)
    }
}

impl PageState {
    pub fn new(scrolled_threshold_px: f64) -> Self {
        Self {
            contact_open: false,
            menu_open: false,
            nav_scrolled: false,
            scrolled_threshold_px,
        }
    }

    pub fn contact_open(&self) -> bool {
        self.contact_open
    }

    pub fn menu_open(&self) -> bool {
        self.menu_open
    }

    /// Whether the navigation bar shows its scrolled style.
    pub fn nav_scrolled(&self) -> bool {
        self.nav_scrolled
    }

    /// Page scroll is locked while the contact modal is open.
    pub fn scroll_locked(&self) -> bool {
        self.contact_open
    }

    /// Apply an action and return the effects it requires.
    pub fn reduce(&mut self, action: PageAction) -> Vec<PageEffect> {
        match action {
            PageAction::OpenContact if !self.contact_open => {
                self.contact_open = true;
                self.menu_open = false;
                vec![PageEffect::LockScroll]
            }
            PageAction::CloseContact | PageAction::KeyPressed(Key::Escape) if self.contact_open => {
                self.contact_open = false;
                vec![PageEffect::UnlockScroll]
            }
            PageAction::ToggleMenu => {
                self.menu_open = !self.menu_open;
                Vec::new()
            }
            PageAction::NavigateTo(section) if !self.contact_open => {
                self.menu_open = false;
                vec![PageEffect::ScrollTo(section)]
            }
            PageAction::Scrolled(y) if !self.contact_open => {
                self.nav_scrolled = y > self.scrolled_threshold_px;
                Vec::new()
            }
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contact_modal_locks_scroll() {
        let mut state = PageState::default();
        assert_eq!(state.reduce(PageAction::OpenContact), vec![PageEffect::LockScroll]);
        assert!(state.contact_open());
        assert!(state.scroll_locked());

        // Opening twice does not lock twice.
        assert!(state.reduce(PageAction::OpenContact).is_empty());

        assert_eq!(state.reduce(PageAction::CloseContact), vec![PageEffect::UnlockScroll]);
        assert!(!state.scroll_locked());
        assert!(state.reduce(PageAction::CloseContact).is_empty());
    }

    #[test]
    fn test_escape_only_closes_open_modal() {
        let mut state = PageState::default();
        assert!(state.reduce(PageAction::KeyPressed(Key::Escape)).is_empty());

        state.reduce(PageAction::OpenContact);
        assert!(state.reduce(PageAction::KeyPressed(Key::Other)).is_empty());
        assert!(state.contact_open());
        assert_eq!(
            state.reduce(PageAction::KeyPressed(Key::Escape)),
            vec![PageEffect::UnlockScroll]
        );
        assert!(!state.contact_open());
    }

    #[test]
    fn test_navigation_closes_menu() {
        let mut state = PageState::default();
        state.reduce(PageAction::ToggleMenu);
        assert!(state.menu_open());

        assert_eq!(
            state.reduce(PageAction::NavigateTo(SectionId::Services)),
            vec![PageEffect::ScrollTo(SectionId::Services)]
        );
        assert!(!state.menu_open());
    }

    #[test]
    fn test_nav_scrolled_threshold() {
        let mut state = PageState::new(50.0);
        state.reduce(PageAction::Scrolled(50.0));
        assert!(!state.nav_scrolled());
        state.reduce(PageAction::Scrolled(51.0));
        assert!(state.nav_scrolled());
        state.reduce(PageAction::Scrolled(0.0));
        assert!(!state.nav_scrolled());
    }

    #[test]
    fn test_modal_swallows_scroll_and_navigation() {
        let mut state = PageState::default();
        state.reduce(PageAction::OpenContact);
        state.reduce(PageAction::Scrolled(400.0));
        assert!(!state.nav_scrolled());
        assert!(state.reduce(PageAction::NavigateTo(SectionId::Contact)).is_empty());
    }

    #[test]
    fn test_actions_and_effects_json_shape() {
        let json = serde_json::to_value(PageAction::NavigateTo(SectionId::Work)).unwrap();
        assert_eq!(json, serde_json::json!({"action": "navigate_to", "value": "work"}));
        assert_eq!(
            serde_json::to_value(PageAction::OpenContact).unwrap(),
            serde_json::json!({"action": "open_contact"})
        );

        let scrolled: PageAction =
            serde_json::from_str(r#"{"action": "scrolled", "value": 120.0}"#).unwrap();
        assert_eq!(scrolled, PageAction::Scrolled(120.0));
        let escape: PageAction =
            serde_json::from_str(r#"{"action": "key_pressed", "value": "escape"}"#).unwrap();
        assert_eq!(escape, PageAction::KeyPressed(Key::Escape));

        assert_eq!(
            serde_json::to_value(PageEffect::ScrollTo(SectionId::Services)).unwrap(),
            serde_json::json!({"effect": "scroll_to", "value": "services"})
        );
        assert_eq!(
            serde_json::to_value(PageEffect::LockScroll).unwrap(),
            serde_json::json!({"effect": "lock_scroll"})
        );
    }
}
