//! Reveal configuration system
//!
//! Settings for the landing page's motion come from `reveal.toml`, fall back
//! to built-in defaults, and can be overridden with `REVEAL_*` environment
//! variables.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

/// File looked up in the current directory by `load_or_default`.
pub const DEFAULT_CONFIG_FILE: &str = "reveal.toml";

/// Errors raised while loading a configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RevealConfig {
    /// Initial viewport size
    pub viewport: ViewportConfig,
    /// Trigger and timeline tuning
    pub motion: MotionConfig,
    /// Navigation bar behaviour
    pub navigation: NavigationConfig,
    /// Headless demo driver settings
    pub demo: DemoConfig,
}

/// Viewport dimensions in CSS pixels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    pub width: f64,
    pub height: f64,
}

/// Motion tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    /// Easing name for steps that do not pick one (e.g. "power2.out")
    pub default_easing: String,
    /// Viewport line, as a fraction of its height, at which sections reveal
    pub reveal_threshold: f32,
    /// Reveal line for the trust section
    pub trust_threshold: f32,
    /// Length of the pinned value section, in viewport heights
    pub pin_distance: f64,
    /// Time the scrubbed value section trails scroll; 0 disables lag
    pub scrub_lag_ms: f32,
}

/// Navigation bar configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    /// Scroll offset past which the bar switches to its scrolled style
    pub scrolled_threshold_px: f64,
}

/// Demo driver configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Simulated frame interval
    pub frame_ms: f32,
    /// Distance scrolled per simulated wheel step
    pub scroll_step_px: f64,
    /// Print events as JSON lines instead of text
    pub json_events: bool,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: 1440.0,
            height: 900.0,
        }
    }
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            default_easing: "power2.out".to_string(),
            reveal_threshold: 0.85,
            trust_threshold: 0.80,
            pin_distance: 1.3,
            scrub_lag_ms: 600.0,
        }
    }
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            scrolled_threshold_px: 50.0,
        }
    }
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            frame_ms: 16.67,
            scroll_step_px: 120.0,
            json_events: false,
        }
    }
}

impl RevealConfig {
    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load `reveal.toml` from the current directory, or defaults if it is
    /// missing or malformed
    pub fn load_or_default() -> Self {
        Self::load_from_path_or_default(DEFAULT_CONFIG_FILE)
    }

    /// Like `load_or_default` for an explicit path
    pub fn load_from_path_or_default<P: AsRef<Path>>(path: P) -> Self {
        match Self::load_from_file(path) {
            Ok(config) => config,
            Err(ConfigError::Read { source, .. })
                if source.kind() == std::io::ErrorKind::NotFound =>
            {
                Self::default()
            }
            Err(err) => {
                warn!(error = %err, "using default configuration");
                Self::default()
            }
        }
    }

    /// Merge configuration with environment variables
    ///
    /// Environment variables take precedence over configuration file values.
    /// Values that fail to parse are ignored.
    pub fn merge_with_env(&mut self) {
        // Viewport
        if let Some(width) = env_parse("REVEAL_VIEWPORT_WIDTH") {
            self.viewport.width = width;
        }
        if let Some(height) = env_parse("REVEAL_VIEWPORT_HEIGHT") {
            self.viewport.height = height;
        }

        // Motion
        if let Ok(easing) = std::env::var("REVEAL_DEFAULT_EASING") {
            self.motion.default_easing = easing;
        }
        if let Some(threshold) = env_parse("REVEAL_THRESHOLD") {
            self.motion.reveal_threshold = threshold;
        }
        if let Some(distance) = env_parse("REVEAL_PIN_DISTANCE") {
            self.motion.pin_distance = distance;
        }
        if let Some(lag) = env_parse("REVEAL_SCRUB_LAG_MS") {
            self.motion.scrub_lag_ms = lag;
        }

        // Navigation
        if let Some(px) = env_parse("REVEAL_NAV_THRESHOLD") {
            self.navigation.scrolled_threshold_px = px;
        }

        // Demo
        if let Ok(val) = std::env::var("REVEAL_JSON_EVENTS") {
            self.demo.json_events = val == "1" || val.eq_ignore_ascii_case("true");
        }
    }

    /// Load configuration with environment variable overrides
    ///
    /// 1. Load from reveal.toml (or use defaults if not found)
    /// 2. Override with environment variables if present
    pub fn load() -> Self {
        let mut config = Self::load_or_default();
        config.merge_with_env();
        config
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    let raw = std::env::var(key).ok()?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(key, value = %raw, "ignoring unparsable environment override");
            None
        }
    }
}
