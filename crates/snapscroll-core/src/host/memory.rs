//! In-memory host with a fixed page of stacked sections
//!
//! Sections are laid out top to bottom in insertion order. Offsets are
//! clamped to the scrollable range and, when rounding is enabled, snapped
//! to whole units the way a browser reports `scrollY`.

use std::collections::HashSet;

use super::{ScrollHost, ScrollInput, SectionBounds};
use crate::config::AppConfig;
use crate::timing::Clock;

#[derive(Debug, Clone)]
pub struct MemoryHost {
    container_id: String,
    /// (id, height) in page order
    sections: Vec<(String, f64)>,
    /// Children whose layout lookup fails
    detached: HashSet<String>,
    viewport_height: f64,
    offset: f64,
    round_offsets: bool,
    clock: Clock,
    frame_pending: bool,
    frames_requested: usize,
    listener_attached: bool,
    input_enabled: bool,
    scrollbar_visible: bool,
}

impl MemoryHost {
    /// Create an empty page for `container_id` with the given viewport height
    pub fn new(container_id: impl Into<String>, viewport_height: f64) -> Self {
        Self {
            container_id: container_id.into(),
            sections: Vec::new(),
            detached: HashSet::new(),
            viewport_height: viewport_height.max(0.0),
            offset: 0.0,
            round_offsets: false,
            clock: Clock::manual(),
            frame_pending: false,
            frames_requested: 0,
            listener_attached: false,
            input_enabled: true,
            scrollbar_visible: true,
        }
    }

    /// The configured demo page, with offsets rounded to whole rows
    pub fn from_config(config: &AppConfig, viewport_height: f64) -> Self {
        Self::new(config.snap.container_id.clone(), viewport_height)
            .with_sections(config.demo.sections.iter().map(|s| (s.id.clone(), s.height)))
            .with_rounding(true)
    }

    /// Append a section to the bottom of the page
    pub fn with_section(mut self, id: impl Into<String>, height: f64) -> Self {
        self.sections.push((id.into(), height.max(0.0)));
        self
    }

    /// Append several sections
    pub fn with_sections<I, S>(mut self, sections: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        for (id, height) in sections {
            self.sections.push((id.into(), height.max(0.0)));
        }
        self
    }

    /// Round every written offset to a whole unit
    pub fn with_rounding(mut self, round: bool) -> Self {
        self.round_offsets = round;
        self
    }

    /// Use a specific clock
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Keep `id` as a child of the container but make its layout unresolvable
    pub fn detach_layout(&mut self, id: &str) {
        self.detached.insert(id.to_string());
    }

    /// Resize the viewport, re-clamping the current offset
    pub fn set_viewport_height(&mut self, height: f64) {
        self.viewport_height = height.max(0.0);
        let offset = self.offset;
        self.write_offset(offset);
    }

    /// Advance a manual clock
    pub fn advance_clock(&mut self, ms: f64) {
        self.clock.advance(ms);
    }

    /// Consume a pending frame request, returning whether one was pending
    pub fn take_frame_request(&mut self) -> bool {
        std::mem::take(&mut self.frame_pending)
    }

    /// Whether a frame has been requested and not yet consumed
    pub fn frame_pending(&self) -> bool {
        self.frame_pending
    }

    /// Total number of frame requests made so far
    pub fn frames_requested(&self) -> usize {
        self.frames_requested
    }

    pub fn listener_attached(&self) -> bool {
        self.listener_attached
    }

    pub fn input_enabled(&self) -> bool {
        self.input_enabled
    }

    pub fn scrollbar_visible(&self) -> bool {
        self.scrollbar_visible
    }

    /// Sum of all section heights
    pub fn page_height(&self) -> f64 {
        self.sections.iter().map(|(_, h)| h).sum()
    }

    /// Largest reachable scroll offset
    pub fn max_scroll(&self) -> f64 {
        (self.page_height() - self.viewport_height).max(0.0)
    }

    /// Section ids with their computed bounds, in page order
    pub fn layout(&self) -> Vec<(&str, SectionBounds)> {
        let mut top = 0.0;
        self.sections
            .iter()
            .map(|(id, height)| {
                let bounds = SectionBounds::new(top, *height);
                top += height;
                (id.as_str(), bounds)
            })
            .collect()
    }

    fn write_offset(&mut self, offset: f64) {
        if !offset.is_finite() {
            return;
        }
        let mut offset = offset.clamp(0.0, self.max_scroll());
        if self.round_offsets {
            offset = offset.round();
        }
        self.offset = offset;
    }
}

impl ScrollHost for MemoryHost {
    fn now_ms(&self) -> f64 {
        self.clock.now_ms()
    }

    fn scroll_offset(&self) -> f64 {
        self.offset
    }

    fn set_scroll_offset(&mut self, offset: f64) {
        self.write_offset(offset);
    }

    fn viewport_height(&self) -> f64 {
        self.viewport_height
    }

    fn container_children(&self, container_id: &str) -> Option<Vec<String>> {
        if container_id != self.container_id {
            return None;
        }
        Some(self.sections.iter().map(|(id, _)| id.clone()).collect())
    }

    fn layout_of(&self, id: &str) -> Option<SectionBounds> {
        if self.detached.contains(id) {
            return None;
        }
        self.layout()
            .into_iter()
            .find(|(section_id, _)| *section_id == id)
            .map(|(_, bounds)| bounds)
    }

    fn request_frame(&mut self) {
        self.frame_pending = true;
        self.frames_requested += 1;
    }

    fn set_scroll_listener(&mut self, attached: bool) {
        self.listener_attached = attached;
    }

    fn set_scroll_input_enabled(&mut self, enabled: bool) {
        self.input_enabled = enabled;
    }

    fn set_scrollbar_visible(&mut self, visible: bool) {
        self.scrollbar_visible = visible;
    }

    fn apply_input(&mut self, input: ScrollInput) -> bool {
        if !self.input_enabled {
            return false;
        }
        let delta = input.delta();
        if !delta.is_finite() {
            return false;
        }
        let before = self.offset;
        self.write_offset(before + delta);
        self.offset != before
    }
}
