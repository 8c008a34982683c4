use std::collections::VecDeque;

use anyhow::Result;
use tokio::sync::mpsc;
use tracing::debug;

use snapscroll_core::timing::Clock;
use snapscroll_core::{
    AppConfig, MemoryHost, ScrollHost, ScrollInput, SectionHandle, SignalOutcome, SnapController,
};

use crate::input::Action;
use crate::theme::Theme;

/// Entries kept in the hook log panel
const HOOK_LOG_CAPACITY: usize = 64;
/// Duration keys step and ceiling, in milliseconds
const DURATION_STEP_MS: u64 = 100;
const MAX_DURATION_MS: u64 = 5000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookPhase {
    Before,
    After,
}

/// One before/after snap callback invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookEntry {
    pub phase: HookPhase,
    pub index: usize,
    pub section_id: Option<String>,
}

impl HookEntry {
    fn new(phase: HookPhase, index: usize, handle: Option<&SectionHandle>) -> Self {
        Self {
            phase,
            index,
            section_id: handle.map(|h| h.id.clone()),
        }
    }
}

/// Demo application state
pub struct App {
    pub controller: SnapController<MemoryHost>,
    pub theme: Theme,
    /// Rows moved per scroll step
    pub scroll_step: f64,
    /// Most recent hook invocations, newest last
    pub hook_log: VecDeque<HookEntry>,
    hook_rx: mpsc::UnboundedReceiver<HookEntry>,
    pub status_message: Option<String>,
    pub should_quit: bool,
}

impl App {
    /// Build the demo page from `config` and register snapping
    pub fn new(config: &AppConfig, viewport_rows: u16) -> Result<Self> {
        Self::with_clock(config, viewport_rows, Clock::monotonic())
    }

    pub fn with_clock(config: &AppConfig, viewport_rows: u16, clock: Clock) -> Result<Self> {
        let host = MemoryHost::from_config(config, viewport_rows as f64).with_clock(clock);

        let (hook_tx, hook_rx) = mpsc::unbounded_channel();
        let before_tx = hook_tx.clone();
        let mut controller = SnapController::new(config.demo_snap_config(), host)?
            .with_before_snap(move |index, handle| {
                let _ = before_tx.send(HookEntry::new(HookPhase::Before, index, handle));
            })
            .with_after_snap(move |index, handle| {
                let _ = hook_tx.send(HookEntry::new(HookPhase::After, index, handle));
            });
        controller.register()?;

        Ok(Self {
            controller,
            theme: Theme::default(),
            scroll_step: config.ui.scroll_step.max(1.0),
            hook_log: VecDeque::with_capacity(HOOK_LOG_CAPACITY),
            hook_rx,
            status_message: None,
            should_quit: false,
        })
    }

    pub fn is_animating(&self) -> bool {
        self.controller.host().frame_pending()
    }

    /// Run the frame callback if one was requested, then collect hook calls
    pub fn update(&mut self) {
        if self.controller.host_mut().take_frame_request() {
            self.controller.on_frame();
        }
        self.drain_hooks();
    }

    fn drain_hooks(&mut self) {
        while let Ok(entry) = self.hook_rx.try_recv() {
            if self.hook_log.len() == HOOK_LOG_CAPACITY {
                self.hook_log.pop_front();
            }
            self.hook_log.push_back(entry);
        }
    }

    pub fn resize(&mut self, viewport_rows: u16) {
        self.controller.host_mut().set_viewport_height(viewport_rows as f64);
    }

    /// Feed user scroll input through the host, then notify the controller
    pub fn scroll_rows(&mut self, rows: f64) {
        if !self.controller.host_mut().apply_input(ScrollInput::Key { delta: rows }) {
            return;
        }
        if let SignalOutcome::Snap { from, to } = self.controller.on_scroll() {
            debug!(from, to, "User scroll triggered snap");
            self.set_status(format!(
                "Snap {} -> {} ({})",
                from,
                to,
                self.controller.scroll_direction()
            ));
        }
    }

    pub fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::ScrollDown => self.scroll_rows(self.scroll_step),
            Action::ScrollUp => self.scroll_rows(-self.scroll_step),
            Action::ScrollHalfPageDown => self.scroll_rows(self.half_page()),
            Action::ScrollHalfPageUp => self.scroll_rows(-self.half_page()),
            Action::SnapTo(index) => {
                let duration = self.controller.snap_duration_ms();
                match self.controller.scroll_to_section_by_index(index, duration) {
                    Ok(()) => self.set_status(format!("Scrolling to section {}", index)),
                    Err(e) => self.set_status(e.to_string()),
                }
            }
            Action::CycleEasing => {
                let next = self.controller.easing_preset().next();
                self.controller.set_easing(next);
                self.set_status(format!("Easing: {}", next));
            }
            Action::IncreaseDuration => {
                let duration = (self.controller.snap_duration_ms() + DURATION_STEP_MS).min(MAX_DURATION_MS);
                self.controller.set_snap_duration(Some(duration));
                self.set_status(format!("Snap duration: {}ms", duration));
            }
            Action::DecreaseDuration => {
                let duration = self.controller.snap_duration_ms().saturating_sub(DURATION_STEP_MS);
                self.controller.set_snap_duration(Some(duration));
                self.set_status(format!("Snap duration: {}ms", duration));
            }
            Action::ToggleScrollbar => {
                if self.controller.host().scrollbar_visible() {
                    self.controller.hide_scrollbar();
                } else {
                    self.controller.show_scrollbar();
                }
            }
            Action::ToggleRegistration => {
                let result = if self.controller.is_registered() {
                    self.controller.unregister()
                } else {
                    self.controller.register()
                };
                match result {
                    Ok(()) if self.controller.is_registered() => self.set_status("Snapping enabled"),
                    Ok(()) => self.set_status("Snapping disabled"),
                    Err(e) => self.set_status(e.to_string()),
                }
            }
            Action::None => {}
        }
    }

    fn half_page(&self) -> f64 {
        (self.controller.host().viewport_height() / 2.0).floor().max(1.0)
    }

    /// Set a status message
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    /// Clear the status message
    pub fn clear_status(&mut self) {
        self.status_message = None;
    }
}
