//! Time calculation utilities for snap animations
//!
//! Timestamps are milliseconds as `f64`, the unit hosts report frame times in.

use tokio::time::Instant;

/// Milliseconds elapsed between two timestamps, never negative
#[inline]
pub fn elapsed_ms(start: f64, now: f64) -> f64 {
    (now - start).max(0.0)
}

/// Check if an animation of `duration` ms is over after `elapsed` ms
#[inline]
pub fn is_complete(elapsed: f64, duration: f64) -> bool {
    elapsed >= duration
}

/// Animation progress clamped to [0.0, 1.0]
///
/// A zero duration is always complete.
#[inline]
pub fn progress(elapsed: f64, duration: f64) -> f64 {
    if duration <= 0.0 {
        return 1.0;
    }
    (elapsed / duration).clamp(0.0, 1.0)
}

/// Source of frame timestamps for a host
#[derive(Debug, Clone)]
pub enum Clock {
    /// Time only moves when advanced explicitly
    Manual(f64),
    /// Milliseconds since the given origin (follows paused tokio time in tests)
    Monotonic(Instant),
}

impl Clock {
    /// A manual clock starting at zero
    pub fn manual() -> Self {
        Clock::Manual(0.0)
    }

    /// A monotonic clock starting now
    pub fn monotonic() -> Self {
        Clock::Monotonic(Instant::now())
    }

    /// Current timestamp in milliseconds
    pub fn now_ms(&self) -> f64 {
        match self {
            Clock::Manual(now) => *now,
            Clock::Monotonic(origin) => origin.elapsed().as_secs_f64() * 1000.0,
        }
    }

    /// Move a manual clock forward; monotonic clocks ignore this
    pub fn advance(&mut self, ms: f64) {
        if let Clock::Manual(now) = self {
            *now += ms.max(0.0);
        }
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::manual()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_progress_zero_duration() {
        assert!((progress(0.0, 0.0) - 1.0).abs() < 0.001);
        assert!((progress(50.0, 200.0) - 0.25).abs() < 0.001);
        assert!((progress(500.0, 200.0) - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_elapsed_never_negative() {
        assert_eq!(elapsed_ms(100.0, 40.0), 0.0);
        assert_eq!(elapsed_ms(100.0, 140.0), 40.0);
        assert!(is_complete(200.0, 200.0));
        assert!(!is_complete(199.9, 200.0));
    }

    #[test]
    fn test_manual_clock() {
        let mut clock = Clock::manual();
        assert_eq!(clock.now_ms(), 0.0);
        clock.advance(16.0);
        clock.advance(-5.0);
        assert_eq!(clock.now_ms(), 16.0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_monotonic_clock_follows_tokio_time() {
        let clock = Clock::monotonic();
        tokio::time::advance(Duration::from_millis(250)).await;
        assert!((clock.now_ms() - 250.0).abs() < 1.0);
    }
}
