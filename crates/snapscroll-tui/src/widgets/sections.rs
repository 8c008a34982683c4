use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
    Frame,
};

use snapscroll_core::{ScrollHost, SectionKind};

use crate::app::App;

/// Renders the visible slice of the page, one terminal row per scroll unit
pub struct SectionsWidget;

impl SectionsWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let host = app.controller.host();
        let theme = &app.theme;
        let offset = host.scroll_offset();
        let layout = host.layout();
        let sections = app.controller.sections();
        let current = app.controller.current_section_index();
        let width = area.width as usize;

        let lines: Vec<Line> = (0..area.height)
            .map(|row| {
                let page_row = offset + row as f64;
                let Some((index, (id, bounds))) = layout
                    .iter()
                    .enumerate()
                    .find(|(_, (_, b))| page_row >= b.top && page_row < b.bottom())
                else {
                    return Line::from(Span::styled(
                        " ".repeat(width),
                        Style::default().bg(theme.bg0),
                    ));
                };

                let normal = sections
                    .get(index)
                    .is_some_and(|s| s.kind == SectionKind::Normal);
                let mut style = Style::default().fg(theme.bg0).bg(theme.section_color(index, normal));

                let text = if page_row == bounds.top {
                    if index == current {
                        style = style.add_modifier(Modifier::BOLD);
                    }
                    let kind = if normal { "free scroll" } else { "snap" };
                    format!(
                        " {} {}  [{}]  rows {}-{}",
                        if index == current { ">" } else { " " },
                        id,
                        kind,
                        bounds.top,
                        bounds.bottom()
                    )
                } else if page_row == (bounds.top + bounds.height / 2.0).floor() {
                    format!("{:^width$}", id.to_uppercase(), width = width)
                } else {
                    String::new()
                };

                Line::from(Span::styled(format!("{:<width$}", text, width = width), style))
            })
            .collect();

        frame.render_widget(Paragraph::new(lines), area);

        if host.scrollbar_visible() {
            let mut state = ScrollbarState::new(host.max_scroll() as usize)
                .position(offset as usize)
                .viewport_content_length(area.height as usize);
            frame.render_stateful_widget(
                Scrollbar::new(ScrollbarOrientation::VerticalRight)
                    .thumb_style(Style::default().fg(theme.fg0))
                    .track_style(Style::default().fg(theme.grey1)),
                area,
                &mut state,
            );
        }
    }
}
