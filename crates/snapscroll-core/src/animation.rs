//! Snap animation driver
//!
//! Moves the host's scroll offset toward a target one frame at a time using
//! an easing preset. Start an animation with `start()`, then call `tick()`
//! from every frame callback until it reports completion.

use tracing::{debug, trace};

use crate::easing::EasingPreset;
use crate::host::ScrollHost;
use crate::timing::{elapsed_ms, is_complete, progress};

/// Result of advancing the animator by one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrameOutcome {
    /// No animation in flight
    Idle,
    /// Animation still running, another frame was requested
    Pending,
    /// Animation finished; the offset now equals `target`
    Complete { target: f64 },
}

/// Active snap animation state
#[derive(Debug, Clone)]
struct ActiveAnimation {
    /// Host timestamp at start
    start_time: f64,
    /// Scroll offset at start
    from: f64,
    /// Target scroll offset
    to: f64,
    /// Planned duration in milliseconds
    duration: f64,
    easing: EasingPreset,
}

/// Single-flight scroll animator
#[derive(Debug, Clone, Default)]
pub struct ScrollAnimator {
    animation: Option<ActiveAnimation>,
}

impl ScrollAnimator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if an animation is currently in flight
    #[inline]
    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Target of the animation in flight
    pub fn target(&self) -> Option<f64> {
        self.animation.as_ref().map(|a| a.to)
    }

    /// Fraction of the planned duration already elapsed, if animating
    pub fn progress(&self, now: f64) -> Option<f64> {
        self.animation
            .as_ref()
            .map(|a| progress(elapsed_ms(a.start_time, now), a.duration))
    }

    /// Begin animating toward `target`
    ///
    /// Captures the current offset and time from the host and requests the
    /// first frame. An animation already in flight is replaced, starting from
    /// wherever the offset is now. Returns `true` if one was replaced.
    pub fn start<H: ScrollHost + ?Sized>(
        &mut self,
        host: &mut H,
        target: f64,
        duration_ms: u64,
        easing: EasingPreset,
    ) -> bool {
        let replaced = self.animation.is_some();
        let from = host.scroll_offset();
        debug!(from, target, duration_ms, easing = %easing, replaced, "Starting snap animation");

        self.animation = Some(ActiveAnimation {
            start_time: host.now_ms(),
            from,
            to: target,
            duration: duration_ms as f64,
            easing,
        });
        host.request_frame();
        replaced
    }

    /// Advance the animation by one frame
    ///
    /// While the planned duration has not elapsed, writes the eased offset and
    /// requests another frame. Once it has, corrects any residual drift so the
    /// offset lands exactly on the target, and completes.
    pub fn tick<H: ScrollHost + ?Sized>(&mut self, host: &mut H) -> FrameOutcome {
        let Some(anim) = self.animation.as_ref() else {
            return FrameOutcome::Idle;
        };

        let elapsed = elapsed_ms(anim.start_time, host.now_ms());
        if !is_complete(elapsed, anim.duration) {
            let position = anim.easing.apply(elapsed, anim.from, anim.to - anim.from, anim.duration);
            trace!(elapsed, position, "Snap animation frame");
            host.set_scroll_offset(position);
            host.request_frame();
            return FrameOutcome::Pending;
        }

        let target = anim.to;
        self.animation = None;

        // Rounding in the host or the easing math can leave the offset a
        // fraction away from the target, which would read as fresh scroll
        // intent on the next signal.
        let residual = target - host.scroll_offset();
        if residual != 0.0 {
            trace!(residual, "Correcting snap animation drift");
            host.scroll_by(residual);
        }

        FrameOutcome::Complete { target }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::MemoryHost;

    fn page() -> MemoryHost {
        MemoryHost::new("page", 100.0)
            .with_sections([("a", 100.0), ("b", 100.0), ("c", 100.0), ("d", 100.0)])
            .with_rounding(true)
    }

    /// Run frames 16ms apart until the animation completes
    fn run_to_completion(animator: &mut ScrollAnimator, host: &mut MemoryHost) -> (FrameOutcome, usize) {
        let mut frames = 0;
        while host.take_frame_request() {
            host.advance_clock(16.0);
            frames += 1;
            match animator.tick(host) {
                FrameOutcome::Pending => continue,
                outcome => return (outcome, frames),
            }
        }
        (FrameOutcome::Idle, frames)
    }

    #[test]
    fn test_lands_exactly_on_target() {
        for easing in EasingPreset::ALL {
            for duration in [0, 1, 1000] {
                for (from, target) in [(0.0, 200.0), (300.0, 100.0), (37.0, 263.0)] {
                    let mut host = page();
                    host.set_scroll_offset(from);
                    let mut animator = ScrollAnimator::new();
                    animator.start(&mut host, target, duration, easing);
                    assert!(animator.is_animating());

                    let (outcome, _) = run_to_completion(&mut animator, &mut host);
                    assert_eq!(outcome, FrameOutcome::Complete { target }, "{:?} {}ms", easing, duration);
                    assert_eq!(host.scroll_offset(), target, "{:?} {}ms {}->{}", easing, duration, from, target);
                    assert!(!animator.is_animating());
                }
            }
        }
    }

    #[test]
    fn test_zero_duration_completes_on_first_frame() {
        let mut host = page();
        let mut animator = ScrollAnimator::new();
        animator.start(&mut host, 300.0, 0, EasingPreset::default());
        let (outcome, frames) = run_to_completion(&mut animator, &mut host);
        assert_eq!(outcome, FrameOutcome::Complete { target: 300.0 });
        assert_eq!(frames, 1);
    }

    #[test]
    fn test_intermediate_frames_move_toward_target() {
        let mut host = page();
        let mut animator = ScrollAnimator::new();
        animator.start(&mut host, 300.0, 160, EasingPreset::InOutQuintic);

        let mut last = host.scroll_offset();
        for _ in 0..5 {
            assert!(host.take_frame_request());
            host.advance_clock(16.0);
            assert_eq!(animator.tick(&mut host), FrameOutcome::Pending);
            assert!(host.scroll_offset() >= last);
            last = host.scroll_offset();
        }
        assert!(last > 0.0 && last < 300.0);
        assert!((animator.progress(host.now_ms()).unwrap() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_drift_is_corrected() {
        // The user nudging the page on the final frame leaves a residual the
        // completion step must remove.
        let mut host = page();
        let mut animator = ScrollAnimator::new();
        animator.start(&mut host, 100.0, 32, EasingPreset::EaseInCubic);
        host.take_frame_request();
        host.advance_clock(16.0);
        animator.tick(&mut host);
        host.take_frame_request();
        host.set_scroll_offset(99.0);
        host.advance_clock(40.0);
        assert_eq!(animator.tick(&mut host), FrameOutcome::Complete { target: 100.0 });
        assert_eq!(host.scroll_offset(), 100.0);

        animator.start(&mut host, 0.0, 32, EasingPreset::EaseInCubic);
        host.take_frame_request();
        host.set_scroll_offset(1.0);
        host.advance_clock(40.0);
        assert_eq!(animator.tick(&mut host), FrameOutcome::Complete { target: 0.0 });
        assert_eq!(host.scroll_offset(), 0.0);
    }

    #[test]
    fn test_tick_when_idle() {
        let mut host = page();
        let mut animator = ScrollAnimator::new();
        assert_eq!(animator.tick(&mut host), FrameOutcome::Idle);
        assert!(animator.progress(0.0).is_none());
        assert!(animator.target().is_none());
    }

    #[test]
    fn test_restart_replaces_animation() {
        let mut host = page();
        let mut animator = ScrollAnimator::new();
        assert!(!animator.start(&mut host, 300.0, 100, EasingPreset::default()));
        assert!(animator.start(&mut host, 100.0, 100, EasingPreset::default()));
        assert_eq!(animator.target(), Some(100.0));
        let (outcome, _) = run_to_completion(&mut animator, &mut host);
        assert_eq!(outcome, FrameOutcome::Complete { target: 100.0 });
    }
}
