use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};

/// Input action that can be performed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    ScrollDown,
    ScrollUp,
    ScrollHalfPageDown,
    ScrollHalfPageUp,
    /// Programmatic snap to a section (zero-based)
    SnapTo(usize),
    CycleEasing,
    IncreaseDuration,
    DecreaseDuration,
    ToggleScrollbar,
    ToggleRegistration,
    None,
}

/// Handle a key event and return the corresponding action
pub fn handle_key_event(key: KeyEvent) -> Action {
    match (key.code, key.modifiers) {
        // Quit
        (KeyCode::Char('q'), KeyModifiers::NONE) => Action::Quit,
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Action::Quit,

        // Row scrolling, the way a browser turns arrow keys into scroll input
        (KeyCode::Char('j'), KeyModifiers::NONE) => Action::ScrollDown,
        (KeyCode::Char('k'), KeyModifiers::NONE) => Action::ScrollUp,
        (KeyCode::Down, KeyModifiers::NONE) => Action::ScrollDown,
        (KeyCode::Up, KeyModifiers::NONE) => Action::ScrollUp,
        (KeyCode::Char('d'), KeyModifiers::CONTROL) => Action::ScrollHalfPageDown,
        (KeyCode::Char('u'), KeyModifiers::CONTROL) => Action::ScrollHalfPageUp,

        // 1-9 snap to a section
        (KeyCode::Char(c @ '1'..='9'), KeyModifiers::NONE) => {
            Action::SnapTo(c as usize - '1' as usize)
        }

        // Snap settings
        (KeyCode::Char('e'), KeyModifiers::NONE) => Action::CycleEasing,
        (KeyCode::Char('+'), _) | (KeyCode::Char('='), KeyModifiers::NONE) => {
            Action::IncreaseDuration
        }
        (KeyCode::Char('-'), KeyModifiers::NONE) => Action::DecreaseDuration,
        (KeyCode::Char('s'), KeyModifiers::NONE) => Action::ToggleScrollbar,
        (KeyCode::Char('r'), KeyModifiers::NONE) => Action::ToggleRegistration,

        _ => Action::None,
    }
}

/// Map mouse wheel events to row scrolling
pub fn handle_mouse_event(mouse: MouseEvent) -> Action {
    match mouse.kind {
        MouseEventKind::ScrollDown => Action::ScrollDown,
        MouseEventKind::ScrollUp => Action::ScrollUp,
        _ => Action::None,
    }
}
