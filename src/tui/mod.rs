//! Terminal search modal
//!
//! Owns terminal setup/teardown (raw mode, alternate screen, panic hook) and
//! the event loop. Searches and saves are awaited inline: one logical thread
//! of control per user action, with no cancellation of in-flight requests.

use std::io;
use std::panic;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::{self as crossterm_event, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

mod app;
pub mod event;
mod ui;

pub use app::{App, Focus, Mode};
pub use event::Action;

use crate::notes::NoteSaver;
use crate::notify::NoticeBoard;
use crate::search::SearchClient;

/// A note the user picked out of the modal
#[derive(Debug, Clone)]
pub struct SavedNote {
    pub title: String,
    pub path: String,
    pub content: String,
    pub already_existed: bool,
}

/// Initializes the terminal for TUI rendering.
fn init_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("failed to create terminal")?;
    Ok(terminal)
}

/// Restores the terminal to its original state.
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode().context("failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;
    terminal.show_cursor().context("failed to show cursor")?;
    Ok(())
}

/// Minimal restoration for the panic hook, where no Terminal is available.
fn restore_terminal_panic() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen);
}

/// Restores the terminal before panicking, preserving the original hook.
fn init_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        restore_terminal_panic();
        original_hook(panic_info);
    }));
}

/// Run the search modal until the user saves a note or closes it.
///
/// Returns the saved (or reopened) note, or `None` when the modal was closed
/// without a selection.
pub async fn run(
    search: &SearchClient,
    saver: &NoteSaver,
    board: &NoticeBoard,
) -> Result<Option<SavedNote>> {
    init_panic_hook();
    let mut terminal = init_terminal()?;

    let mut app = App::new();
    let result = run_event_loop(&mut app, &mut terminal, search, saver, board).await;

    if let Err(e) = restore_terminal(&mut terminal) {
        eprintln!("Error restoring terminal: {e}");
    }

    result
}

async fn run_event_loop(
    app: &mut App,
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    search: &SearchClient,
    saver: &NoteSaver,
    board: &NoticeBoard,
) -> Result<Option<SavedNote>> {
    loop {
        terminal.draw(|frame| {
            ui::draw(frame, app, &board.active());
        })?;

        if !crossterm_event::poll(Duration::from_millis(100))? {
            continue;
        }
        let Event::Key(key) = crossterm_event::read()? else {
            continue;
        };

        match event::handle_key_event(app, key) {
            Action::None => {}
            Action::Quit => return Ok(None),
            Action::Submit(query) => {
                // The modal stays frozen while the search is in flight;
                // a subsequent keystroke cannot abort it.
                let results = search.search(&query, true).await;
                let has_results = !results.is_empty();
                app.set_results(results);
                if has_results {
                    app.focus_results();
                }
            }
            Action::Select(index) => {
                if let Some(saved) = save_selection(app, index, saver, board) {
                    return Ok(Some(saved));
                }
            }
        }
    }
}

/// Persist the selected result; `None` keeps the modal open (save failed).
fn save_selection(
    app: &App,
    index: usize,
    saver: &NoteSaver,
    board: &NoticeBoard,
) -> Option<SavedNote> {
    use crate::notify::Notify;

    let result = app.results().get(index)?;
    match saver.save(result) {
        Ok(outcome) => {
            let path = outcome.path().to_string();
            let content = saver.read(&path).unwrap_or_default();
            Some(SavedNote {
                title: result.title.clone(),
                path,
                content,
                already_existed: matches!(outcome, crate::notes::SaveOutcome::AlreadyExists(_)),
            })
        }
        Err(e) => {
            board.error(&format!("Failed to save note: {e}"));
            None
        }
    }
}
