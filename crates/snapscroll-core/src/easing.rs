//! Easing presets for snap animations
//!
//! Each preset maps `(elapsed, start, delta, duration)` to a scroll position.
//! All presets start exactly at `start` and end exactly at `start + delta`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::Error;

/// Timing curve applied to a snap animation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum EasingPreset {
    /// Quadratic ease-in-out (default)
    #[default]
    #[serde(rename = "easeInOutQuad")]
    EaseInOutQuad,
    /// Cubic ease-in
    #[serde(rename = "easeInCubic")]
    EaseInCubic,
    /// Quintic ease-in-out (smootherstep)
    #[serde(rename = "inOutQuintic")]
    InOutQuintic,
}

impl EasingPreset {
    /// Every known preset, in display order
    pub const ALL: [EasingPreset; 3] = [
        EasingPreset::EaseInOutQuad,
        EasingPreset::EaseInCubic,
        EasingPreset::InOutQuintic,
    ];

    /// Preset name as used in configuration files
    pub fn name(&self) -> &'static str {
        match self {
            EasingPreset::EaseInOutQuad => "easeInOutQuad",
            EasingPreset::EaseInCubic => "easeInCubic",
            EasingPreset::InOutQuintic => "inOutQuintic",
        }
    }

    /// Resolve a preset name, falling back to the default on unknown names
    ///
    /// Unknown names are not an error: a warning is logged and
    /// [`EasingPreset::EaseInOutQuad`] is used instead.
    pub fn parse_or_default(name: &str) -> Self {
        match name.parse() {
            Ok(preset) => preset,
            Err(_) => {
                warn!(
                    "Easing preset '{}' is invalid, falling back to '{}'",
                    name,
                    Self::default().name()
                );
                Self::default()
            }
        }
    }

    /// The preset after this one, wrapping around
    pub fn next(&self) -> Self {
        let idx = Self::ALL.iter().position(|p| p == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// Compute the position at `elapsed` ms into an animation
    ///
    /// # Arguments
    /// * `elapsed` - Time since animation start, clamped to `[0, duration]`
    /// * `start` - Scroll offset at animation start
    /// * `delta` - Target offset minus start offset
    /// * `duration` - Planned animation length
    pub fn apply(&self, elapsed: f64, start: f64, delta: f64, duration: f64) -> f64 {
        if duration <= 0.0 {
            return start + delta;
        }
        let t = elapsed.clamp(0.0, duration);
        match self {
            EasingPreset::EaseInOutQuad => ease_in_out_quad(t, start, delta, duration),
            EasingPreset::EaseInCubic => ease_in_cubic(t, start, delta, duration),
            EasingPreset::InOutQuintic => in_out_quintic(t, start, delta, duration),
        }
    }
}

impl fmt::Display for EasingPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EasingPreset {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|preset| preset.name() == s)
            .ok_or_else(|| Error::UnknownEasing(s.to_string()))
    }
}

#[inline]
fn ease_in_out_quad(t: f64, b: f64, c: f64, d: f64) -> f64 {
    let t = t / (d / 2.0);
    if t < 1.0 {
        return c / 2.0 * t * t + b;
    }
    let t = t - 1.0;
    -c / 2.0 * (t * (t - 2.0) - 1.0) + b
}

#[inline]
fn ease_in_cubic(t: f64, b: f64, c: f64, d: f64) -> f64 {
    let t = t / d;
    b + c * t * t * t
}

/// f(t) = 6t⁵ - 15t⁴ + 10t³
#[inline]
fn in_out_quintic(t: f64, b: f64, c: f64, d: f64) -> f64 {
    let t = t / d;
    let ts = t * t;
    let tc = ts * t;
    b + c * (6.0 * tc * ts - 15.0 * ts * ts + 10.0 * tc)
}
