use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem, Paragraph},
    Frame,
};

use snapscroll_core::{AnimationState, ScrollHost, SectionKind};

use crate::app::{App, HookPhase};

/// Side panel with controller state, snap progress and the hook log
pub struct PanelWidget;

impl PanelWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let block = Block::default()
            .title(" snapscroll ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.grey1))
            .style(Style::default().bg(theme.bg1));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(8),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(inner);

        Self::render_state(frame, chunks[0], app);
        Self::render_progress(frame, chunks[1], app);
        Self::render_hook_log(frame, chunks[3], app);
    }

    fn render_state(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let controller = &app.controller;
        let host = controller.host();
        let index = controller.current_section_index();
        let section = controller.sections().get(index);

        let label = Style::default().fg(theme.grey2);
        let value = Style::default().fg(theme.fg0);
        let row = |name: &'static str, text: String, style: Style| {
            Line::from(vec![Span::styled(format!("{:<10}", name), label), Span::styled(text, style)])
        };

        let (state_text, state_style) = match controller.animation_state() {
            AnimationState::Running => ("RUNNING", value.fg(theme.warning).add_modifier(Modifier::BOLD)),
            AnimationState::Idle => ("IDLE", value.fg(theme.success)),
        };
        let listener = if controller.is_registered() { "on" } else { "off" };
        let kind = match section.map(|s| s.kind) {
            Some(SectionKind::Normal) => "free scroll",
            Some(SectionKind::Snap) => "snap",
            None => "-",
        };

        let lines = vec![
            row(
                "Section",
                format!(
                    "{}/{} ({})",
                    index + 1,
                    controller.sections().len(),
                    section.map(|s| s.id.as_str()).unwrap_or("-")
                ),
                value,
            ),
            row("Kind", kind.to_string(), value),
            row(
                "Offset",
                format!("{} / {}", host.scroll_offset(), host.max_scroll()),
                value,
            ),
            row("Direction", controller.scroll_direction().to_string(), value),
            row("Easing", controller.easing_preset().to_string(), value.fg(theme.accent)),
            row("Duration", format!("{}ms", controller.snap_duration_ms()), value),
            row("State", state_text.to_string(), state_style),
            row("Listener", listener.to_string(), value),
        ];

        frame.render_widget(Paragraph::new(lines), area);
    }

    fn render_progress(frame: &mut Frame, area: Rect, app: &App) {
        let progress = app.controller.animation_progress().unwrap_or(0.0).clamp(0.0, 1.0);
        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(app.theme.accent).bg(app.theme.bg2))
            .ratio(progress)
            .label(format!("{:>3.0}%", progress * 100.0));
        frame.render_widget(gauge, area);
    }

    fn render_hook_log(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let items: Vec<ListItem> = app
            .hook_log
            .iter()
            .rev()
            .take(area.height as usize)
            .map(|entry| {
                let (phase, color) = match entry.phase {
                    HookPhase::Before => ("before", theme.warning),
                    HookPhase::After => ("after ", theme.success),
                };
                ListItem::new(Line::from(vec![
                    Span::styled(phase, Style::default().fg(color)),
                    Span::styled(
                        format!(" {} ({})", entry.index, entry.section_id.as_deref().unwrap_or("?")),
                        Style::default().fg(theme.fg0),
                    ),
                ]))
            })
            .collect();

        frame.render_widget(List::new(items), area);
    }
}
