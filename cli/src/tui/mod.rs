pub mod app;
pub mod ui;

use std::io::{self, Stdout};
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use taskboard_core::{Clock, TaskRepository};
use tracing::{error, info};

use crate::tui::app::{App, InputMode};

const POLL_INTERVAL: Duration = Duration::from_millis(250);

pub fn run<R: TaskRepository, C: Clock>(mut app: App<R, C>) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    info!("tui started");
    let res = run_app(&mut terminal, &mut app);
    finish(&mut app, res, || restore_terminal(&mut terminal))
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    Ok(())
}

/// Saves pending changes, then restores the terminal. The save happens even
/// when the loop or the restore fails.
fn finish<R: TaskRepository, C: Clock>(
    app: &mut App<R, C>,
    res: io::Result<()>,
    restore: impl FnOnce() -> Result<()>,
) -> Result<()> {
    if let Err(err) = &res {
        error!(error = %err, "tui loop failed");
    }
    let saved = app.save();
    let restored = restore();
    saved?;
    restored?;
    Ok(res?)
}

fn run_app<B: Backend, R: TaskRepository, C: Clock>(
    terminal: &mut Terminal<B>,
    app: &mut App<R, C>,
) -> io::Result<()> {
    loop {
        terminal
            .draw(|f| ui::draw(f, app))
            .map_err(|e| io::Error::other(e.to_string()))?;

        if !event::poll(POLL_INTERVAL)? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match app.input_mode {
            InputMode::Normal => match key.code {
                KeyCode::Char('q') => return Ok(()),
                KeyCode::Down | KeyCode::Char('j') => app.next(),
                KeyCode::Up | KeyCode::Char('k') => app.previous(),
                KeyCode::Char(' ') | KeyCode::Enter => app.toggle_selected(),
                KeyCode::Char('d') | KeyCode::Delete => app.delete_selected(),
                KeyCode::Char('a') => app.enter_add_mode(),
                KeyCode::Char('/') => app.enter_search_mode(),
                KeyCode::Char('u') => app.enter_assignee_mode(),
                KeyCode::Char('s') => app.cycle_status(),
                KeyCode::Char('p') => app.cycle_priority(),
                KeyCode::Char('c') => app.cycle_category(),
                KeyCode::Char('w') => app.cycle_due(),
                KeyCode::Char('r') => app.reset_filters(),
                _ => {}
            },
            InputMode::Adding | InputMode::Searching | InputMode::Assignee => match key.code {
                KeyCode::Enter => app.submit_command(),
                KeyCode::Esc => app.cancel_input(),
                KeyCode::Char(c) => app.input_char(c),
                KeyCode::Backspace => app.delete_char(),
                KeyCode::Left => app.move_cursor_left(),
                KeyCode::Right => app.move_cursor_right(),
                _ => {}
            },
        }
    }
}
