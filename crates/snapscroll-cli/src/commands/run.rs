use std::io::{self, Stdout};

use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Terminal,
};
use tracing::info;

use snapscroll_core::AppConfig;
use snapscroll_tui::{
    app::App,
    event::{AppEvent, EventHandler},
    input::{handle_key_event, handle_mouse_event},
    widgets::{PanelWidget, SectionsWidget, StatusBarWidget},
};

/// Width of the side panel in columns
const PANEL_WIDTH: u16 = 34;

pub fn run(config: &AppConfig) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, SetTitle("snapscroll"))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, config);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, config: &AppConfig) -> Result<()> {
    let viewport_rows = page_rows(config, terminal.size()?.height);
    let mut app = App::new(config, viewport_rows)?;
    info!(viewport_rows, sections = app.controller.sections().len(), "Demo started");

    // Fast ticks while a snap animation runs
    let event_handler = EventHandler::new(config.ui.tick_duration(), config.ui.animation_tick_duration());

    // Main loop
    loop {
        // Advance a running snap and collect hook calls
        app.update();

        // Draw UI
        terminal.draw(|frame| {
            // Main layout: content + status bar
            let main_layout = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(1), Constraint::Length(1)])
                .split(frame.area());

            let columns = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Min(20), Constraint::Length(PANEL_WIDTH)])
                .split(main_layout[0]);

            SectionsWidget::render(frame, columns[0], &app);
            PanelWidget::render(frame, columns[1], &app);
            StatusBarWidget::render(frame, main_layout[1], &app);
        })?;

        if let Some(event) = event_handler.next(app.is_animating())? {
            match event {
                AppEvent::Key(key) => {
                    app.clear_status();
                    app.handle_action(handle_key_event(key));
                }
                AppEvent::Mouse(mouse) => app.handle_action(handle_mouse_event(mouse)),
                AppEvent::Resize(_, height) => {
                    if config.ui.viewport_rows == 0 {
                        app.resize(page_rows(config, height));
                    }
                }
                AppEvent::Tick => {}
            }
        }

        if app.should_quit {
            break;
        }
    }

    info!("Demo stopped");
    Ok(())
}

/// Page viewport height: configured rows, or the terminal minus the status bar
fn page_rows(config: &AppConfig, terminal_height: u16) -> u16 {
    if config.ui.viewport_rows > 0 {
        config.ui.viewport_rows
    } else {
        terminal_height.saturating_sub(1).max(1)
    }
}
