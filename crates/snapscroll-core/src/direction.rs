//! Scroll direction detection with a dead-zone margin

use std::fmt;

use serde::Serialize;

/// Default dead-zone margin, in scroll units
///
/// Consecutive offsets closer than this are treated as jitter. Must stay
/// below 5 or slow scrolling stops registering.
pub const DEFAULT_DIRECTION_MARGIN: f64 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScrollDirection {
    TopToBottom,
    BottomToTop,
    #[default]
    None,
}

impl ScrollDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScrollDirection::TopToBottom => "top-to-bottom",
            ScrollDirection::BottomToTop => "bottom-to-top",
            ScrollDirection::None => "none",
        }
    }
}

impl fmt::Display for ScrollDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Direction of travel from `last` to `current`
///
/// Movement of exactly `margin` or less in either direction is `None`.
#[inline]
pub fn detect_direction(last: f64, current: f64, margin: f64) -> ScrollDirection {
    let delta = current - last;
    if delta > margin {
        ScrollDirection::TopToBottom
    } else if delta < -margin {
        ScrollDirection::BottomToTop
    } else {
        ScrollDirection::None
    }
}
