//! Cooperative task that runs a snap controller
//!
//! The driver owns a [`SnapController`] and feeds it from a channel of host
//! signals. While a snap is in flight it also ticks a frame interval, which
//! plays the part of the host's next-frame primitive. Everything runs on one
//! task, so scroll signals and frames never interleave mid-step.

use std::time::Duration;

use serde::Serialize;
use tokio::sync::{mpsc, watch};
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::animation::FrameOutcome;
use crate::controller::{AnimationState, SignalOutcome, SnapController};
use crate::direction::ScrollDirection;
use crate::host::{ScrollHost, ScrollInput};

/// Default spacing between animation frames (~60fps)
pub const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Signals delivered to the driver by the host
#[derive(Debug, Clone)]
pub enum HostSignal {
    /// Raw user input; the host applies it unless input is suppressed
    Input(ScrollInput),
    /// The host's offset changed on its own
    Scrolled,
    /// A call on the controller's public surface
    Command(SnapCommand),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SnapCommand {
    Register,
    Unregister,
    /// Snap to a section; `None` uses the configured snap duration
    ScrollToSection { index: usize, duration_ms: Option<u64> },
    SetEasingPreset(String),
    SetSnapDuration(Option<u64>),
    HideScrollbar,
    ShowScrollbar,
}

/// Events emitted by the driver to notify observers of snaps
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum DriverEvent {
    /// A snap animation started
    Snapped {
        from: usize,
        to: usize,
        direction: ScrollDirection,
    },
    /// A snap animation finished and the offset is aligned
    Settled { index: usize, offset: f64 },
    /// A command was rejected by the controller
    CommandFailed { command: String, message: String },
}

pub struct SnapDriver<H: ScrollHost> {
    controller: SnapController<H>,
    frame_interval: Duration,
    event_tx: Option<mpsc::UnboundedSender<DriverEvent>>,
}

impl<H: ScrollHost> SnapDriver<H> {
    pub fn new(controller: SnapController<H>) -> Self {
        Self {
            controller,
            frame_interval: DEFAULT_FRAME_INTERVAL,
            event_tx: None,
        }
    }

    /// Set the spacing between animation frames
    pub fn with_frame_interval(mut self, interval: Duration) -> Self {
        self.frame_interval = interval.max(Duration::from_millis(1));
        self
    }

    /// Set the event sender for snap notifications
    pub fn with_event_sender(mut self, tx: mpsc::UnboundedSender<DriverEvent>) -> Self {
        self.event_tx = Some(tx);
        self
    }

    pub fn controller(&self) -> &SnapController<H> {
        &self.controller
    }

    /// Send an event to the observer (if an event channel is configured)
    fn send_event(&self, event: DriverEvent) {
        if let Some(ref tx) = self.event_tx {
            if tx.send(event).is_err() {
                warn!("Failed to send snap event: receiver dropped");
            }
        }
    }

    /// Process signals until shutdown or until the signal channel closes
    ///
    /// Returns the controller so its final state can be inspected or reused.
    pub async fn run(
        mut self,
        mut signals: mpsc::UnboundedReceiver<HostSignal>,
        mut shutdown: watch::Receiver<bool>,
    ) -> SnapController<H> {
        let mut frames = tokio::time::interval(self.frame_interval);
        frames.set_missed_tick_behavior(MissedTickBehavior::Delay);

        info!(frame_ms = self.frame_interval.as_millis() as u64, "Snap driver started");

        loop {
            let animating = self.controller.animation_state() == AnimationState::Running;

            tokio::select! {
                // Handle shutdown signal
                result = shutdown.changed() => {
                    if result.is_err() || *shutdown.borrow() {
                        info!("Snap driver received shutdown signal");
                        break;
                    }
                }

                signal = signals.recv() => {
                    match signal {
                        Some(signal) => self.handle_signal(signal),
                        None => {
                            debug!("Signal channel closed");
                            break;
                        }
                    }
                }

                // Frames only while a snap is in flight
                _ = frames.tick(), if animating => {
                    self.handle_frame();
                }
            }
        }

        info!("Snap driver stopped");
        self.controller
    }

    fn handle_signal(&mut self, signal: HostSignal) {
        match signal {
            HostSignal::Input(input) => {
                if self.controller.host_mut().apply_input(input) {
                    self.handle_scroll();
                }
            }
            HostSignal::Scrolled => self.handle_scroll(),
            HostSignal::Command(command) => self.handle_command(command),
        }
    }

    fn handle_scroll(&mut self) {
        if let SignalOutcome::Snap { from, to } = self.controller.on_scroll() {
            let direction = self.controller.scroll_direction();
            self.send_event(DriverEvent::Snapped { from, to, direction });
        }
    }

    fn handle_frame(&mut self) {
        if let FrameOutcome::Complete { target } = self.controller.on_frame() {
            let index = self.controller.current_section_index();
            self.send_event(DriverEvent::Settled { index, offset: target });
        }
    }

    fn handle_command(&mut self, command: SnapCommand) {
        debug!(?command, "Snap command");
        let result = match &command {
            SnapCommand::Register => self.controller.register(),
            SnapCommand::Unregister => self.controller.unregister(),
            SnapCommand::ScrollToSection { index, duration_ms } => {
                let from = self.controller.current_section_index();
                let duration = duration_ms.unwrap_or_else(|| self.controller.snap_duration_ms());
                let result = self.controller.scroll_to_section_by_index(*index, duration);
                if result.is_ok() && self.controller.animation_state() == AnimationState::Running {
                    self.send_event(DriverEvent::Snapped {
                        from,
                        to: *index,
                        direction: ScrollDirection::None,
                    });
                }
                result
            }
            SnapCommand::SetEasingPreset(name) => {
                self.controller.set_easing_preset(name);
                Ok(())
            }
            SnapCommand::SetSnapDuration(duration_ms) => {
                self.controller.set_snap_duration(*duration_ms);
                Ok(())
            }
            SnapCommand::HideScrollbar => {
                self.controller.hide_scrollbar();
                Ok(())
            }
            SnapCommand::ShowScrollbar => {
                self.controller.show_scrollbar();
                Ok(())
            }
        };

        if let Err(e) = result {
            warn!("Snap command {:?} failed: {}", command, e);
            self.send_event(DriverEvent::CommandFailed {
                command: format!("{:?}", command),
                message: e.to_string(),
            });
        }
    }
}
