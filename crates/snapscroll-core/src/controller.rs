//! Snap controller: the scroll signal state machine
//!
//! Every scroll signal recomputes the direction of travel and decides whether
//! to snap to the neighbouring section. Snaps run through the
//! [`ScrollAnimator`]; while one is in flight scroll signals are ignored and
//! no state is touched, so the offset written by the animation is never read
//! back as user intent.
//!
//! The host calls [`SnapController::on_scroll`] from its scroll listener and
//! [`SnapController::on_frame`] from every frame callback it was asked for.

use tracing::{debug, info, warn};

use crate::animation::{FrameOutcome, ScrollAnimator};
use crate::config::{SnapConfig, DEFAULT_SNAP_DURATION_MS};
use crate::direction::{detect_direction, ScrollDirection};
use crate::easing::EasingPreset;
use crate::host::ScrollHost;
use crate::section::{Section, SectionAccessor, SectionHandle};
use crate::{Error, Result};

/// Callback run before and after a snap with the section index and handle
pub type SnapHook = Box<dyn FnMut(usize, Option<&SectionHandle>) + Send>;

/// Whether a snap animation is in flight
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationState {
    Idle,
    Running,
}

/// What a scroll signal resulted in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalOutcome {
    /// Not registered, or a snap is running: the signal was dropped
    Suppressed,
    /// Processed, no snap needed
    Idle,
    /// A snap from `from` to `to` was started
    Snap { from: usize, to: usize },
}

/// Mutable controller state
#[derive(Debug, Clone, PartialEq)]
pub struct ControllerState {
    /// Index of the section the controller is aligned to
    pub current_section_index: usize,
    /// Offset seen by the last processed signal (or the last snap target)
    pub last_scroll_position: f64,
    pub easing_preset: EasingPreset,
    pub snap_duration_ms: u64,
    pub scroll_direction: ScrollDirection,
}

pub struct SnapController<H: ScrollHost> {
    host: H,
    config: SnapConfig,
    sections: SectionAccessor,
    animator: ScrollAnimator,
    state: ControllerState,
    registered: bool,
    has_registered: bool,
    before_snap: SnapHook,
    after_snap: SnapHook,
}

impl<H: ScrollHost> std::fmt::Debug for SnapController<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SnapController")
            .field("config", &self.config)
            .field("sections", &self.sections)
            .field("state", &self.state)
            .field("registered", &self.registered)
            .field("animating", &self.animator.is_animating())
            .finish_non_exhaustive()
    }
}

impl<H: ScrollHost> SnapController<H> {
    /// Create a controller for the container named in `config`
    ///
    /// Fails if the container id is empty or the host cannot resolve it. An
    /// unknown easing preset is not an error; it falls back to the default.
    pub fn new(config: SnapConfig, mut host: H) -> Result<Self> {
        config.validate()?;
        let sections = SectionAccessor::resolve(&host, &config.container_id, &config.normal_scroll_element_ids)?;
        debug!(
            container = %config.container_id,
            sections = sections.len(),
            "Resolved snap sections"
        );

        if config.hide_scrollbar {
            host.set_scrollbar_visible(false);
        }

        let state = ControllerState {
            current_section_index: 0,
            last_scroll_position: 0.0,
            easing_preset: EasingPreset::parse_or_default(&config.easing_preset),
            snap_duration_ms: config.snap_duration_ms,
            scroll_direction: ScrollDirection::None,
        };

        Ok(Self {
            host,
            config,
            sections,
            animator: ScrollAnimator::new(),
            state,
            registered: false,
            has_registered: false,
            before_snap: Box::new(|_, _| {}),
            after_snap: Box::new(|_, _| {}),
        })
    }

    /// Set the hook called just before a snap starts
    pub fn with_before_snap<F>(mut self, hook: F) -> Self
    where
        F: FnMut(usize, Option<&SectionHandle>) + Send + 'static,
    {
        self.before_snap = Box::new(hook);
        self
    }

    /// Set the hook called once a snap has finished
    pub fn with_after_snap<F>(mut self, hook: F) -> Self
    where
        F: FnMut(usize, Option<&SectionHandle>) + Send + 'static,
    {
        self.after_snap = Box::new(hook);
        self
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn state(&self) -> &ControllerState {
        &self.state
    }

    pub fn sections(&self) -> &[Section] {
        self.sections.sections()
    }

    pub fn current_section_index(&self) -> usize {
        self.state.current_section_index
    }

    pub fn scroll_direction(&self) -> ScrollDirection {
        self.state.scroll_direction
    }

    pub fn easing_preset(&self) -> EasingPreset {
        self.state.easing_preset
    }

    pub fn snap_duration_ms(&self) -> u64 {
        self.state.snap_duration_ms
    }

    pub fn is_registered(&self) -> bool {
        self.registered
    }

    pub fn animation_state(&self) -> AnimationState {
        if self.animator.is_animating() {
            AnimationState::Running
        } else {
            AnimationState::Idle
        }
    }

    /// Progress of the running snap, 0.0..=1.0
    pub fn animation_progress(&self) -> Option<f64> {
        self.animator.progress(self.host.now_ms())
    }

    /// Switch easing preset by name; unknown names fall back to the default
    pub fn set_easing_preset(&mut self, name: &str) {
        self.state.easing_preset = EasingPreset::parse_or_default(name);
    }

    pub fn set_easing(&mut self, preset: EasingPreset) {
        self.state.easing_preset = preset;
    }

    /// Set the snap duration; `None` restores the 1000ms default
    pub fn set_snap_duration(&mut self, duration_ms: Option<u64>) {
        self.state.snap_duration_ms = duration_ms.unwrap_or(DEFAULT_SNAP_DURATION_MS);
    }

    pub fn hide_scrollbar(&mut self) {
        self.host.set_scrollbar_visible(false);
    }

    pub fn show_scrollbar(&mut self) {
        self.host.set_scrollbar_visible(true);
    }

    /// Attach the scroll listener
    ///
    /// The first registration snaps to the first section. Registering again
    /// after `unregister()` re-aligns to the section the controller was on.
    pub fn register(&mut self) -> Result<()> {
        if self.registered {
            return Err(Error::AlreadyRegistered);
        }
        self.registered = true;
        self.host.set_scroll_listener(true);

        let index = if self.has_registered {
            self.state.current_section_index
        } else {
            0
        };
        self.has_registered = true;
        info!(container = %self.config.container_id, section = index, "Snap scrolling registered");

        if !self.sections.is_empty() && !self.animator.is_animating() {
            self.snap_to(index, self.config.initial_snap_duration_ms);
        }
        Ok(())
    }

    /// Detach the scroll listener, keeping all state
    pub fn unregister(&mut self) -> Result<()> {
        if !self.registered {
            return Err(Error::NotRegistered);
        }
        self.registered = false;
        self.host.set_scroll_listener(false);
        info!(container = %self.config.container_id, "Snap scrolling unregistered");
        Ok(())
    }

    /// Animate to the section at `index` over `duration_ms`
    ///
    /// Runs the same before/after hooks as a scroll-triggered snap. A section
    /// whose layout cannot be resolved is skipped with a warning.
    pub fn scroll_to_section_by_index(&mut self, index: usize, duration_ms: u64) -> Result<()> {
        if index >= self.sections.len() {
            return Err(Error::SectionOutOfRange {
                index,
                len: self.sections.len(),
            });
        }
        self.snap_to(index, duration_ms);
        Ok(())
    }

    /// Process one scroll-position-changed signal
    pub fn on_scroll(&mut self) -> SignalOutcome {
        if !self.registered || self.animator.is_animating() {
            return SignalOutcome::Suppressed;
        }
        if self.sections.is_empty() {
            return SignalOutcome::Idle;
        }

        let offset = self.host.scroll_offset();
        let direction = detect_direction(self.state.last_scroll_position, offset, self.config.direction_margin);
        self.state.scroll_direction = direction;
        self.state.last_scroll_position = offset;

        let current = self.state.current_section_index;
        let target = if self.sections.is_normal(current) {
            self.normal_section_target(current, offset, direction)
        } else {
            self.snap_section_target(current, direction)
        };

        match target {
            Some(to) if self.snap_to(to, self.state.snap_duration_ms) => {
                SignalOutcome::Snap { from: current, to }
            }
            _ => SignalOutcome::Idle,
        }
    }

    /// Advance a running snap by one frame
    pub fn on_frame(&mut self) -> FrameOutcome {
        let outcome = self.animator.tick(&mut self.host);
        if let FrameOutcome::Complete { target } = outcome {
            // The host may clamp a target near the page end; track where the
            // offset actually landed so the next signal sees no movement.
            self.state.last_scroll_position = self.host.scroll_offset();
            self.host.set_scroll_input_enabled(true);
            let index = self.state.current_section_index;
            debug!(section = index, offset = target, "Snap complete");
            let handle = self.sections.handle(index, &self.host);
            (self.after_snap)(index, handle.as_ref());
        }
        outcome
    }

    /// Inside a free-scroll section, snap only once the viewport edge
    /// crosses the section boundary in the direction of travel
    fn normal_section_target(&self, current: usize, offset: f64, direction: ScrollDirection) -> Option<usize> {
        let Some(bounds) = self.sections.bounds_of(current, &self.host) else {
            warn!(section = current, "Normal section layout could not be resolved");
            return None;
        };
        let epsilon = self.config.boundary_epsilon;
        let viewport_bottom = offset + self.host.viewport_height();

        let past_bottom = viewport_bottom - bounds.bottom() > epsilon;
        let past_top = offset - bounds.top < -epsilon;

        match direction {
            ScrollDirection::TopToBottom if past_bottom && self.sections.can_advance(current) => Some(current + 1),
            ScrollDirection::BottomToTop if past_top && self.sections.can_retreat(current) => Some(current - 1),
            _ => None,
        }
    }

    fn snap_section_target(&self, current: usize, direction: ScrollDirection) -> Option<usize> {
        match direction {
            ScrollDirection::TopToBottom if self.sections.can_advance(current) => Some(current + 1),
            ScrollDirection::BottomToTop if self.sections.can_retreat(current) => Some(current - 1),
            _ => None,
        }
    }

    /// Start a snap to `index`; returns `false` if its layout did not resolve
    fn snap_to(&mut self, index: usize, duration_ms: u64) -> bool {
        let Some(bounds) = self.sections.bounds_of(index, &self.host) else {
            warn!(section = index, "Snap target layout could not be resolved, skipping");
            return false;
        };

        let from = self.state.current_section_index;
        let handle = self.sections.handle(from, &self.host);
        (self.before_snap)(from, handle.as_ref());

        debug!(from, to = index, top = bounds.top, duration_ms, "Snapping to section");
        self.state.current_section_index = index;
        self.state.last_scroll_position = bounds.top;

        self.host.set_scroll_input_enabled(false);
        if self.animator.start(&mut self.host, bounds.top, duration_ms, self.state.easing_preset) {
            debug!(to = index, "Replaced snap animation in flight");
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::host::{MemoryHost, ScrollInput};

    type HookLog = Arc<Mutex<Vec<(&'static str, usize, Option<String>)>>>;

    fn snap_page() -> MemoryHost {
        MemoryHost::new("container", 100.0)
            .with_sections([("s0", 100.0), ("s1", 100.0), ("s2", 100.0)])
            .with_rounding(true)
    }

    /// a is taller than the viewport so there is room to scroll freely
    fn mixed_page() -> MemoryHost {
        MemoryHost::new("container", 100.0)
            .with_sections([("a", 300.0), ("b", 100.0), ("c", 100.0)])
            .with_rounding(true)
    }

    fn controller(host: MemoryHost, normal: &[&str]) -> SnapController<MemoryHost> {
        let config = SnapConfig {
            normal_scroll_element_ids: normal.iter().map(|s| s.to_string()).collect(),
            snap_duration_ms: 200,
            ..SnapConfig::for_container("container")
        };
        SnapController::new(config, host).unwrap()
    }

    fn with_log(controller: SnapController<MemoryHost>) -> (SnapController<MemoryHost>, HookLog) {
        let log: HookLog = Arc::new(Mutex::new(Vec::new()));
        let before = log.clone();
        let after = log.clone();
        let controller = controller
            .with_before_snap(move |i, s| before.lock().unwrap().push(("before", i, s.map(|s| s.id.clone()))))
            .with_after_snap(move |i, s| after.lock().unwrap().push(("after", i, s.map(|s| s.id.clone()))));
        (controller, log)
    }

    /// Pump frames 16ms apart until the running snap completes
    fn settle(controller: &mut SnapController<MemoryHost>) -> usize {
        let mut frames = 0;
        while controller.host_mut().take_frame_request() {
            controller.host_mut().advance_clock(16.0);
            frames += 1;
            if let FrameOutcome::Complete { .. } = controller.on_frame() {
                break;
            }
        }
        frames
    }

    fn user_scroll(controller: &mut SnapController<MemoryHost>, delta: f64) -> SignalOutcome {
        if controller.host_mut().apply_input(ScrollInput::Wheel { delta }) {
            controller.on_scroll()
        } else {
            SignalOutcome::Suppressed
        }
    }

    fn registered(host: MemoryHost, normal: &[&str]) -> (SnapController<MemoryHost>, HookLog) {
        let (mut controller, log) = with_log(controller(host, normal));
        controller.register().unwrap();
        settle(&mut controller);
        log.lock().unwrap().clear();
        (controller, log)
    }

    #[test]
    fn test_new_requires_container() {
        let err = SnapController::new(SnapConfig::for_container(""), snap_page()).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        let err = SnapController::new(SnapConfig::for_container("elsewhere"), snap_page()).unwrap_err();
        assert!(matches!(err, Error::ContainerNotFound(_)));
    }

    #[test]
    fn test_unknown_easing_falls_back() {
        let config = SnapConfig {
            easing_preset: "doesNotExist".to_string(),
            ..SnapConfig::for_container("container")
        };
        let mut controller = SnapController::new(config, snap_page()).unwrap();
        assert_eq!(controller.easing_preset(), EasingPreset::EaseInOutQuad);

        controller.set_easing_preset("inOutQuintic");
        assert_eq!(controller.easing_preset(), EasingPreset::InOutQuintic);
        controller.set_easing_preset("bogus");
        assert_eq!(controller.easing_preset(), EasingPreset::EaseInOutQuad);
    }

    #[test]
    fn test_hide_scrollbar_option() {
        let config = SnapConfig {
            hide_scrollbar: true,
            ..SnapConfig::for_container("container")
        };
        let mut controller = SnapController::new(config, snap_page()).unwrap();
        assert!(!controller.host().scrollbar_visible());
        controller.show_scrollbar();
        assert!(controller.host().scrollbar_visible());
        controller.hide_scrollbar();
        assert!(!controller.host().scrollbar_visible());
    }

    #[test]
    fn test_snap_duration_setter() {
        let mut controller = controller(snap_page(), &[]);
        controller.set_snap_duration(Some(350));
        assert_eq!(controller.snap_duration_ms(), 350);
        controller.set_snap_duration(None);
        assert_eq!(controller.snap_duration_ms(), 1000);
    }

    #[test]
    fn test_register_twice_fails() {
        let mut controller = controller(snap_page(), &[]);
        assert!(matches!(controller.unregister(), Err(Error::NotRegistered)));
        controller.register().unwrap();
        assert!(controller.host().listener_attached());
        assert!(matches!(controller.register(), Err(Error::AlreadyRegistered)));
        controller.unregister().unwrap();
        assert!(!controller.host().listener_attached());
        assert!(matches!(controller.unregister(), Err(Error::NotRegistered)));
    }

    #[test]
    fn test_register_snaps_to_first_section() {
        let mut host = snap_page();
        host.set_scroll_offset(150.0);
        let (mut controller, log) = with_log(controller(host, &[]));
        controller.register().unwrap();
        assert_eq!(controller.animation_state(), AnimationState::Running);
        settle(&mut controller);

        assert_eq!(controller.host().scroll_offset(), 0.0);
        assert_eq!(controller.current_section_index(), 0);
        assert_eq!(controller.animation_state(), AnimationState::Idle);
        let log = log.lock().unwrap();
        assert_eq!(
            *log,
            vec![("before", 0, Some("s0".to_string())), ("after", 0, Some("s0".to_string()))]
        );
    }

    #[test]
    fn test_unregistered_signals_are_suppressed() {
        let mut controller = controller(snap_page(), &[]);
        controller.host_mut().set_scroll_offset(50.0);
        assert_eq!(controller.on_scroll(), SignalOutcome::Suppressed);
        assert_eq!(controller.state().last_scroll_position, 0.0);
    }

    #[test]
    fn test_snap_section_snaps_on_any_intent() {
        let (mut controller, log) = registered(snap_page(), &[]);

        assert_eq!(user_scroll(&mut controller, 10.0), SignalOutcome::Snap { from: 0, to: 1 });
        assert_eq!(controller.scroll_direction(), ScrollDirection::TopToBottom);
        assert_eq!(controller.current_section_index(), 1);
        assert!(!controller.host().input_enabled());
        settle(&mut controller);
        assert_eq!(controller.host().scroll_offset(), 100.0);
        assert!(controller.host().input_enabled());

        assert_eq!(user_scroll(&mut controller, -10.0), SignalOutcome::Snap { from: 1, to: 0 });
        settle(&mut controller);
        assert_eq!(controller.host().scroll_offset(), 0.0);

        let log = log.lock().unwrap();
        assert_eq!(log.len(), 4);
        assert_eq!(log[0], ("before", 0, Some("s0".to_string())));
        assert_eq!(log[1], ("after", 1, Some("s1".to_string())));
    }

    #[test]
    fn test_jitter_inside_margin_does_nothing() {
        let (mut controller, _) = registered(snap_page(), &[]);
        assert_eq!(user_scroll(&mut controller, 3.0), SignalOutcome::Idle);
        assert_eq!(controller.scroll_direction(), ScrollDirection::None);
        assert_eq!(controller.current_section_index(), 0);
    }

    #[test]
    fn test_no_snap_past_the_ends() {
        let (mut controller, _) = registered(snap_page(), &[]);
        // Already at the top: upward input cannot move the page at all
        assert_eq!(user_scroll(&mut controller, -10.0), SignalOutcome::Suppressed);

        controller.scroll_to_section_by_index(2, 0).unwrap();
        settle(&mut controller);
        controller.host_mut().set_viewport_height(50.0);
        assert_eq!(user_scroll(&mut controller, 10.0), SignalOutcome::Idle);
        assert_eq!(controller.scroll_direction(), ScrollDirection::TopToBottom);
        assert_eq!(controller.current_section_index(), 2);
    }

    #[test]
    fn test_normal_section_scrolls_freely() {
        let (mut controller, _) = registered(mixed_page(), &["a"]);

        // Inside a: viewport bottom 110..200 stays inside a's bottom edge (300)
        for _ in 0..10 {
            assert_eq!(user_scroll(&mut controller, 10.0), SignalOutcome::Idle);
        }
        assert_eq!(controller.current_section_index(), 0);
        assert_eq!(controller.host().scroll_offset(), 100.0);

        // Up to exactly 2 units past a's bottom: still free
        controller.host_mut().set_scroll_offset(202.0);
        assert_eq!(controller.on_scroll(), SignalOutcome::Idle);
        assert_eq!(controller.current_section_index(), 0);

        // Crossing into b by more than 2 units while moving down snaps
        controller.host_mut().set_scroll_offset(206.0);
        assert_eq!(controller.on_scroll(), SignalOutcome::Snap { from: 0, to: 1 });
        settle(&mut controller);
        assert_eq!(controller.host().scroll_offset(), 300.0);
    }

    #[test]
    fn test_normal_section_no_direction_no_snap() {
        let (mut controller, _) = registered(mixed_page(), &["a"]);

        // Past a's bottom edge, but barely moving since the last signal
        controller.state.last_scroll_position = 205.0;
        controller.host_mut().set_scroll_offset(206.0);
        assert_eq!(controller.on_scroll(), SignalOutcome::Idle);
        assert_eq!(controller.scroll_direction(), ScrollDirection::None);
        assert_eq!(controller.current_section_index(), 0);

        controller.host_mut().set_scroll_offset(50.0);
        controller.state.last_scroll_position = 49.0;
        assert_eq!(controller.on_scroll(), SignalOutcome::Idle);
        assert_eq!(controller.current_section_index(), 0);
    }

    #[test]
    fn test_normal_section_snaps_back_above_top() {
        let host = MemoryHost::new("container", 100.0)
            .with_sections([("a", 100.0), ("b", 300.0), ("c", 100.0)])
            .with_rounding(true);
        let (mut controller, _) = registered(host, &["b"]);

        assert_eq!(user_scroll(&mut controller, 10.0), SignalOutcome::Snap { from: 0, to: 1 });
        settle(&mut controller);
        assert_eq!(controller.host().scroll_offset(), 100.0);

        // Scrolling up inside b: within 2 units of its top is still free
        controller.host_mut().set_scroll_offset(150.0);
        assert_eq!(controller.on_scroll(), SignalOutcome::Idle);
        controller.host_mut().set_scroll_offset(98.0);
        assert_eq!(controller.on_scroll(), SignalOutcome::Idle);
        controller.host_mut().set_scroll_offset(94.0);
        assert_eq!(controller.on_scroll(), SignalOutcome::Snap { from: 1, to: 0 });
        settle(&mut controller);
        assert_eq!(controller.host().scroll_offset(), 0.0);
    }

    #[test]
    fn test_signals_ignored_while_running() {
        let (mut controller, _) = registered(snap_page(), &[]);
        assert_eq!(user_scroll(&mut controller, 10.0), SignalOutcome::Snap { from: 0, to: 1 });

        let before = controller.state().clone();
        controller.host_mut().take_frame_request();
        controller.host_mut().advance_clock(16.0);
        controller.on_frame();
        assert_eq!(controller.on_scroll(), SignalOutcome::Suppressed);
        assert_eq!(*controller.state(), before);
        // The host blocks user input during the snap as well
        assert!(!controller.host_mut().apply_input(ScrollInput::Wheel { delta: 50.0 }));
    }

    #[test]
    fn test_no_bounce_after_snap() {
        // Odd section heights make the eased offsets fractional
        let host = MemoryHost::new("container", 97.0)
            .with_sections([("s0", 97.0), ("s1", 97.0), ("s2", 97.0)])
            .with_rounding(true);
        let (mut controller, _) = registered(host, &[]);
        for easing in EasingPreset::ALL {
            controller.set_easing(easing);
            controller.scroll_to_section_by_index(1, 133).unwrap();
            settle(&mut controller);
            assert_eq!(controller.host().scroll_offset(), 97.0);
            // The first signal after settling sees no movement
            assert_eq!(controller.on_scroll(), SignalOutcome::Idle);
            assert_eq!(controller.scroll_direction(), ScrollDirection::None);
            controller.scroll_to_section_by_index(0, 133).unwrap();
            settle(&mut controller);
        }
    }

    #[test]
    fn test_no_bounce_when_last_section_is_clamped() {
        // The last top (200) is past max_scroll (150)
        let host = MemoryHost::new("container", 150.0)
            .with_sections([("s0", 100.0), ("s1", 100.0), ("s2", 100.0)])
            .with_rounding(true);
        let (mut controller, log) = registered(host, &[]);

        controller.scroll_to_section_by_index(2, 200).unwrap();
        settle(&mut controller);
        assert_eq!(controller.host().scroll_offset(), 150.0);
        assert_eq!(controller.state().last_scroll_position, 150.0);

        assert_eq!(controller.on_scroll(), SignalOutcome::Idle);
        assert_eq!(controller.scroll_direction(), ScrollDirection::None);
        assert_eq!(controller.current_section_index(), 2);
        assert_eq!(log.lock().unwrap().len(), 2);

        // Real upward intent from the clamped offset still snaps back
        assert_eq!(user_scroll(&mut controller, -10.0), SignalOutcome::Snap { from: 2, to: 1 });
    }

    #[test]
    fn test_scroll_to_section_end_to_end() {
        let (mut controller, log) = registered(snap_page(), &[]);

        controller.scroll_to_section_by_index(2, 200).unwrap();
        assert_eq!(controller.animation_state(), AnimationState::Running);
        assert_eq!(log.lock().unwrap().clone(), vec![("before", 0, Some("s0".to_string()))]);

        let mut frames = 0;
        while controller.host_mut().take_frame_request() {
            controller.host_mut().advance_clock(16.0);
            frames += 1;
            // Signals between start and completion are not processed
            assert_eq!(controller.on_scroll(), SignalOutcome::Suppressed);
            if let FrameOutcome::Complete { target } = controller.on_frame() {
                assert_eq!(target, 200.0);
                break;
            }
        }

        assert!(frames >= 12);
        assert_eq!(controller.host().scroll_offset(), 200.0);
        assert_eq!(controller.current_section_index(), 2);
        assert_eq!(controller.animation_state(), AnimationState::Idle);
        assert_eq!(
            log.lock().unwrap().clone(),
            vec![("before", 0, Some("s0".to_string())), ("after", 2, Some("s2".to_string()))]
        );
    }

    #[test]
    fn test_scroll_to_out_of_range() {
        let mut controller = controller(snap_page(), &[]);
        let err = controller.scroll_to_section_by_index(3, 100).unwrap_err();
        assert!(matches!(err, Error::SectionOutOfRange { index: 3, len: 3 }));
    }

    #[test]
    fn test_unresolved_target_is_noop() {
        let (mut controller, log) = registered(snap_page(), &[]);
        controller.host_mut().detach_layout("s1");

        assert_eq!(user_scroll(&mut controller, 10.0), SignalOutcome::Idle);
        assert_eq!(controller.current_section_index(), 0);
        assert_eq!(controller.animation_state(), AnimationState::Idle);
        assert!(controller.host().input_enabled());

        controller.scroll_to_section_by_index(1, 100).unwrap();
        assert_eq!(controller.current_section_index(), 0);
        assert!(log.lock().unwrap().is_empty());
    }

    #[test]
    fn test_reregister_resumes() {
        let (mut controller, _) = registered(snap_page(), &[]);
        controller.scroll_to_section_by_index(1, 100).unwrap();
        settle(&mut controller);
        controller.unregister().unwrap();

        // Free scrolling while unregistered
        assert_eq!(user_scroll(&mut controller, 60.0), SignalOutcome::Suppressed);
        assert_eq!(controller.host().scroll_offset(), 160.0);

        controller.register().unwrap();
        settle(&mut controller);
        assert_eq!(controller.current_section_index(), 1);
        assert_eq!(controller.host().scroll_offset(), 100.0);
    }

    #[test]
    fn test_programmatic_snap_while_running_retargets() {
        let (mut controller, log) = registered(snap_page(), &[]);
        controller.scroll_to_section_by_index(2, 200).unwrap();
        controller.host_mut().take_frame_request();
        controller.host_mut().advance_clock(16.0);
        controller.on_frame();

        controller.scroll_to_section_by_index(1, 200).unwrap();
        settle(&mut controller);
        assert_eq!(controller.host().scroll_offset(), 100.0);
        assert_eq!(controller.current_section_index(), 1);

        let log = log.lock().unwrap();
        let afters: Vec<_> = log.iter().filter(|(kind, _, _)| *kind == "after").collect();
        assert_eq!(afters.len(), 1);
        assert_eq!(afters[0].1, 1);
    }

    #[test]
    fn test_empty_container() {
        let host = MemoryHost::new("container", 100.0);
        let mut controller = controller(host, &[]);
        controller.register().unwrap();
        assert_eq!(controller.animation_state(), AnimationState::Idle);
        assert_eq!(controller.on_scroll(), SignalOutcome::Idle);
    }
}
