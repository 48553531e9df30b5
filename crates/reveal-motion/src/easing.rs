//! Easing functions for animation timing.
//!
//! This module implements the timing curves used by reveal timelines:
//! - Linear (`none`)
//! - Ease, EaseIn, EaseOut, EaseInOut (standard CSS curves)
//! - CubicBezier (custom bezier curves)
//! - Power curves (`power1` .. `power4`, in / out / in-out)
//! - Back (overshooting) curves
//! - Steps (stepped animations)
//!
//! # Usage
//!
//! ```
//! use reveal_motion::easing::{EaseMode, EasingFunction};
//!
//! let ease = EasingFunction::power(2, EaseMode::Out);
//! let progress = ease.evaluate(0.5);
//!
//! let parsed: EasingFunction = "back.out(1.7)".parse().unwrap();
//! assert!(parsed.evaluate(0.6) > 1.0); // overshoots
//! ```

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::MotionError;

/// Position for stepped animations.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepPosition {
    /// Jump at the start of each interval (CSS `jump-start` / `start`).
    Start,
    /// Jump at the end of each interval (CSS `jump-end` / `end`).
    #[default]
    End,
}

/// Which end of the curve the acceleration applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EaseMode {
    In,
    Out,
    InOut,
}

/// Easing function for animation timing.
///
/// Easing functions map a linear progress value (0.0 to 1.0) to an eased
/// output value. The output may leave `[0, 1]` for overshooting curves.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EasingFunction {
    /// Linear interpolation (no easing).
    Linear,

    /// CSS `ease` - Slow start, fast middle, slow end.
    /// Equivalent to `cubic-bezier(0.25, 0.1, 0.25, 1.0)`.
    #[default]
    Ease,

    /// CSS `ease-in`, equivalent to `cubic-bezier(0.42, 0, 1, 1)`.
    EaseIn,

    /// CSS `ease-out`, equivalent to `cubic-bezier(0, 0, 0.58, 1)`.
    EaseOut,

    /// CSS `ease-in-out`, equivalent to `cubic-bezier(0.42, 0, 0.58, 1)`.
    EaseInOut,

    /// Custom cubic bezier curve.
    /// x values must be in [0, 1], y values can be any float.
    CubicBezier { x1: f32, y1: f32, x2: f32, y2: f32 },

    /// Polynomial curve `t^exponent` (power1 is exponent 2).
    Power { exponent: i32, mode: EaseMode },

    /// Curve that pulls back past the start or overshoots the end.
    Back { overshoot: f32, mode: EaseMode },

    /// Stepped animation with discrete jumps.
    Steps { count: u32, position: StepPosition },
}

/// Overshoot used by `back` curves when none is given.
pub const DEFAULT_OVERSHOOT: f32 = 1.70158;

impl EasingFunction {
    /// Evaluate the easing function at the given progress.
    ///
    /// Input is clamped to `[0, 1]`; output is not.
    pub fn evaluate(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);

        match self {
            Self::Linear => t,
            Self::Ease => cubic_bezier(0.25, 0.1, 0.25, 1.0, t),
            Self::EaseIn => cubic_bezier(0.42, 0.0, 1.0, 1.0, t),
            Self::EaseOut => cubic_bezier(0.0, 0.0, 0.58, 1.0, t),
            Self::EaseInOut => cubic_bezier(0.42, 0.0, 0.58, 1.0, t),
            Self::CubicBezier { x1, y1, x2, y2 } => cubic_bezier(*x1, *y1, *x2, *y2, t),
            Self::Power { exponent, mode } => with_mode(*mode, t, |x| x.powi(*exponent)),
            Self::Back { overshoot, mode } => {
                let s = *overshoot;
                with_mode(*mode, t, |x| x * x * ((s + 1.0) * x - s))
            }
            Self::Steps { count, position } => stepped(*count, *position, t),
        }
    }

    /// Create a custom cubic bezier easing function.
    ///
    /// # Panics
    /// Panics if x1 or x2 are outside [0, 1].
    pub fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        assert!(
            (0.0..=1.0).contains(&x1) && (0.0..=1.0).contains(&x2),
            "Bezier x values must be in [0, 1]"
        );
        Self::CubicBezier { x1, y1, x2, y2 }
    }

    /// Power curve by its conventional strength (`power2` is cubic).
    pub fn power(strength: u8, mode: EaseMode) -> Self {
        Self::Power {
            exponent: i32::from(strength) + 1,
            mode,
        }
    }

    pub fn back(overshoot: f32, mode: EaseMode) -> Self {
        Self::Back { overshoot, mode }
    }

    /// Create a stepped easing function.
    ///
    /// # Panics
    /// Panics if steps is 0.
    pub fn steps(steps: u32, position: StepPosition) -> Self {
        assert!(steps >= 1, "Steps must be at least 1");
        Self::Steps {
            count: steps,
            position,
        }
    }
}

impl FromStr for EasingFunction {
    type Err = MotionError;

    /// Parse the names used in timeline definitions and config files:
    /// `none`, `linear`, CSS keywords, `powerN.in|out|inOut`,
    /// `back.in|out|inOut(overshoot)` and `steps(n)`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        let unknown = || MotionError::UnknownEasing(s.to_string());

        match name {
            "none" | "linear" => return Ok(Self::Linear),
            "ease" => return Ok(Self::Ease),
            "ease-in" => return Ok(Self::EaseIn),
            "ease-out" => return Ok(Self::EaseOut),
            "ease-in-out" => return Ok(Self::EaseInOut),
            _ => {}
        }

        let (head, arg) = match name.split_once('(') {
            Some((head, rest)) => {
                let arg = rest.strip_suffix(')').ok_or_else(unknown)?;
                let value = arg.trim().parse::<f32>().map_err(|_| unknown())?;
                (head, Some(value))
            }
            None => (name, None),
        };

        if head == "steps" {
            return match arg {
                Some(n) if n >= 1.0 && n.fract() == 0.0 => Ok(Self::Steps {
                    count: n as u32,
                    position: StepPosition::End,
                }),
                _ => Err(unknown()),
            };
        }

        let (family, mode) = match head.split_once('.') {
            Some((family, mode)) => (family, parse_mode(mode).ok_or_else(unknown)?),
            None => (head, EaseMode::Out),
        };

        match family {
            "back" => Ok(Self::back(arg.unwrap_or(DEFAULT_OVERSHOOT), mode)),
            "power0" => Ok(Self::Linear),
            "power1" | "power2" | "power3" | "power4" if arg.is_none() => {
                let strength = family[5..].parse::<u8>().map_err(|_| unknown())?;
                Ok(Self::power(strength, mode))
            }
            _ => Err(unknown()),
        }
    }
}

fn parse_mode(mode: &str) -> Option<EaseMode> {
    match mode {
        "in" => Some(EaseMode::In),
        "out" => Some(EaseMode::Out),
        "inOut" | "in-out" | "in_out" => Some(EaseMode::InOut),
        _ => None,
    }
}

/// Derive out / in-out variants from an ease-in curve.
fn with_mode(mode: EaseMode, t: f32, ease_in: impl Fn(f32) -> f32) -> f32 {
    match mode {
        EaseMode::In => ease_in(t),
        EaseMode::Out => 1.0 - ease_in(1.0 - t),
        EaseMode::InOut => {
            if t < 0.5 {
                ease_in(t * 2.0) / 2.0
            } else {
                1.0 - ease_in((1.0 - t) * 2.0) / 2.0
            }
        }
    }
}

/// Evaluate a cubic bezier curve at time t.
///
/// Uses Newton-Raphson iteration to find the curve parameter for the input
/// progress, then evaluates the y coordinate at that parameter.
fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32, progress: f32) -> f32 {
    if progress <= 0.0 {
        return 0.0;
    }
    if progress >= 1.0 {
        return 1.0;
    }

    let t = solve_bezier_x(x1, x2, progress);
    bezier_y(y1, y2, t)
}

fn solve_bezier_x(x1: f32, x2: f32, target_x: f32) -> f32 {
    let mut t = target_x;

    for _ in 0..8 {
        let x = bezier_x(x1, x2, t) - target_x;
        if x.abs() < 1e-6 {
            break;
        }

        let dx = bezier_x_derivative(x1, x2, t);
        if dx.abs() < 1e-6 {
            break;
        }

        t -= x / dx;
        t = t.clamp(0.0, 1.0);
    }

    t
}

/// x(t) = 3(1-t)²t·x1 + 3(1-t)t²·x2 + t³
#[inline]
fn bezier_x(x1: f32, x2: f32, t: f32) -> f32 {
    let t2 = t * t;
    let t3 = t2 * t;
    let mt = 1.0 - t;
    let mt2 = mt * mt;

    3.0 * mt2 * t * x1 + 3.0 * mt * t2 * x2 + t3
}

#[inline]
fn bezier_y(y1: f32, y2: f32, t: f32) -> f32 {
    let t2 = t * t;
    let t3 = t2 * t;
    let mt = 1.0 - t;
    let mt2 = mt * mt;

    3.0 * mt2 * t * y1 + 3.0 * mt * t2 * y2 + t3
}

/// dx/dt = 3(1-t)²·x1 + 6(1-t)t·(x2-x1) + 3t²·(1-x2)
#[inline]
fn bezier_x_derivative(x1: f32, x2: f32, t: f32) -> f32 {
    let mt = 1.0 - t;
    3.0 * mt * mt * x1 + 6.0 * mt * t * (x2 - x1) + 3.0 * t * t * (1.0 - x2)
}

fn stepped(steps: u32, position: StepPosition, t: f32) -> f32 {
    if steps == 0 {
        return t;
    }

    let steps_f = steps as f32;

    match position {
        StepPosition::Start => (t * steps_f).ceil() / steps_f,
        StepPosition::End => (t * steps_f).floor() / steps_f,
    }
}
