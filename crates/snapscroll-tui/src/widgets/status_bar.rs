use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use snapscroll_core::AnimationState;

use crate::app::App;

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let mode_str = match app.controller.animation_state() {
            AnimationState::Running => "SNAPPING",
            AnimationState::Idle if app.controller.is_registered() => "SNAP",
            AnimationState::Idle => "FREE",
        };

        let status_text = if let Some(msg) = &app.status_message {
            format!(" {} | {}", mode_str, msg)
        } else {
            format!(
                " {} | {} | {}ms",
                mode_str,
                app.controller.easing_preset(),
                app.controller.snap_duration_ms()
            )
        };

        let help_hint = " q:quit j/k:scroll 1-9:snap e:easing +/-:duration s:scrollbar r:listener ";
        let padding_len = area
            .width
            .saturating_sub(status_text.len() as u16 + help_hint.len() as u16) as usize;

        let line = Line::from(vec![
            Span::styled(status_text, Style::default().fg(theme.fg0).bg(theme.bg2)),
            Span::styled(" ".repeat(padding_len), Style::default().bg(theme.bg2)),
            Span::styled(help_hint, Style::default().fg(theme.grey2).bg(theme.bg2)),
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }
}
