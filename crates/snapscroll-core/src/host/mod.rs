//! Environment capabilities consumed by the snap controller
//!
//! The controller never touches a real page. Everything it needs from its
//! environment (scroll position, layout, frame scheduling, listener and
//! input control) goes through [`ScrollHost`].

mod memory;

pub use memory::MemoryHost;

/// Layout extent of a section, relative to the top of the scrollable area
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionBounds {
    pub top: f64,
    pub height: f64,
}

impl SectionBounds {
    pub fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }

    /// Offset of the section's bottom edge
    #[inline]
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// Raw user scroll input, before the host applies it
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScrollInput {
    /// Mouse wheel or trackpad
    Wheel { delta: f64 },
    /// Touch drag
    Touch { delta: f64 },
    /// Key driven scrolling (arrows, page keys)
    Key { delta: f64 },
}

impl ScrollInput {
    /// Requested change in scroll offset (positive = down)
    pub fn delta(&self) -> f64 {
        match *self {
            ScrollInput::Wheel { delta } | ScrollInput::Touch { delta } | ScrollInput::Key { delta } => {
                delta
            }
        }
    }
}

/// Capabilities a host environment provides to the snap controller
pub trait ScrollHost {
    /// Current time in milliseconds, the same clock frame timestamps use
    fn now_ms(&self) -> f64;

    /// Current vertical scroll offset
    fn scroll_offset(&self) -> f64;

    /// Set the vertical scroll offset
    fn set_scroll_offset(&mut self, offset: f64);

    /// Adjust the vertical scroll offset by `delta`
    fn scroll_by(&mut self, delta: f64) {
        let offset = self.scroll_offset();
        self.set_scroll_offset(offset + delta);
    }

    /// Height of the visible viewport
    fn viewport_height(&self) -> f64;

    /// Identifiers of the container's children, in document order
    ///
    /// Returns `None` when the container cannot be resolved.
    fn container_children(&self, container_id: &str) -> Option<Vec<String>>;

    /// Live layout of an element, or `None` if it cannot be resolved
    fn layout_of(&self, id: &str) -> Option<SectionBounds>;

    /// Ask for a frame callback at the next display refresh
    fn request_frame(&mut self);

    /// Attach or detach the scroll-position-changed listener
    fn set_scroll_listener(&mut self, attached: bool);

    /// Allow or suppress wheel, touch and key driven scroll input
    fn set_scroll_input_enabled(&mut self, enabled: bool);

    /// Show or hide the scrollbar (cosmetic)
    fn set_scrollbar_visible(&mut self, visible: bool);

    /// Apply user input to the scroll offset
    ///
    /// Returns `true` if the offset moved. Suppressed input returns `false`.
    fn apply_input(&mut self, input: ScrollInput) -> bool;
}
