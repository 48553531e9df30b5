//! Section anchors addressable by navigation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use reveal_motion::TargetId;

/// A navigable place on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionId {
    Hero,
    Value,
    Services,
    /// Testimonials and demos inside the services section.
    Work,
    Trust,
    Contact,
}

/// Links shown in the navigation bar, in display order.
pub const NAV_LINKS: [(&str, SectionId); 3] = [
    ("Services", SectionId::Services),
    ("Work", SectionId::Work),
    ("Contact", SectionId::Contact),
];

impl SectionId {
    pub const ALL: [SectionId; 6] = [
        SectionId::Hero,
        SectionId::Value,
        SectionId::Services,
        SectionId::Work,
        SectionId::Trust,
        SectionId::Contact,
    ];

    /// Element id of the anchor.
    pub fn anchor(&self) -> &'static str {
        match self {
            Self::Hero => "hero",
            Self::Value => "value",
            Self::Services => "services",
            Self::Work => "work",
            Self::Trust => "trust",
            Self::Contact => "contact",
        }
    }

    pub fn target(&self) -> TargetId {
        TargetId::new(self.anchor())
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.anchor())
    }
}

impl FromStr for SectionId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().trim_start_matches('#');
        Self::ALL
            .into_iter()
            .find(|section| section.anchor().eq_ignore_ascii_case(needle))
            .ok_or_else(|| format!("unknown section `{s}`"))
    }
}
