//! Keyboard event handling for the search modal
//!
//! Key events map to pure `Action`s; the event loop performs any work that
//! needs I/O (searching, saving). This keeps the mapping testable without a
//! terminal or a network.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::{App, Focus};

/// What the event loop should do after a key event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Nothing beyond the state change already applied
    None,
    /// Close the modal without selecting anything
    Quit,
    /// Run a search for the committed input
    Submit(String),
    /// Save the result at this index
    Select(usize),
}

/// Handle a keyboard event, updating app state and returning the follow-up
/// action for the event loop.
pub fn handle_key_event(app: &mut App, key: KeyEvent) -> Action {
    // Global close keys
    if key.code == KeyCode::Esc {
        return Action::Quit;
    }
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Action::Quit;
    }

    // Panel cycling
    if key.code == KeyCode::Tab || key.code == KeyCode::BackTab {
        app.next_focus();
        return Action::None;
    }

    match app.focus() {
        Focus::Input => handle_input(app, key),
        Focus::Results => handle_results(app, key),
    }
}

/// Input-field keys: editing plus the commit action.
///
/// Committing an empty input clears any rendered results instead of
/// searching.
fn handle_input(app: &mut App, key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Char(c) if key.modifiers.is_empty() || key.modifiers == KeyModifiers::SHIFT => {
            app.push_input_char(c);
            Action::None
        }
        KeyCode::Backspace => {
            app.pop_input_char();
            Action::None
        }
        KeyCode::Enter => {
            let query = app.input().trim().to_string();
            if query.is_empty() {
                app.clear_results();
                Action::None
            } else {
                Action::Submit(query)
            }
        }
        _ => Action::None,
    }
}

/// Result-list keys: navigation and selection
fn handle_results(app: &mut App, key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Down | KeyCode::Char('j') => {
            app.select_next();
            Action::None
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.select_previous();
            Action::None
        }
        KeyCode::Enter => match app.selected_index() {
            Some(index) => Action::Select(index),
            None => Action::None,
        },
        _ => Action::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::SearchResult;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn esc_closes_the_modal_from_any_focus() {
        let mut app = App::new();
        assert_eq!(handle_key_event(&mut app, key(KeyCode::Esc)), Action::Quit);

        app.next_focus();
        assert_eq!(handle_key_event(&mut app, key(KeyCode::Esc)), Action::Quit);
    }

    #[test]
    fn ctrl_c_closes_the_modal() {
        let mut app = App::new();
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handle_key_event(&mut app, ctrl_c), Action::Quit);
    }

    #[test]
    fn typing_edits_the_input_buffer() {
        let mut app = App::new();
        handle_key_event(&mut app, key(KeyCode::Char('t')));
        handle_key_event(&mut app, key(KeyCode::Char('x')));
        handle_key_event(&mut app, key(KeyCode::Backspace));
        assert_eq!(app.input(), "t");
    }

    #[test]
    fn committing_nonempty_input_submits_the_trimmed_query() {
        let mut app = App::new();
        for c in " turing ".chars() {
            handle_key_event(&mut app, key(KeyCode::Char(c)));
        }
        assert_eq!(
            handle_key_event(&mut app, key(KeyCode::Enter)),
            Action::Submit("turing".to_string())
        );
    }

    #[test]
    fn committing_empty_input_clears_results_instead_of_searching() {
        let mut app = App::new();
        app.set_results(vec![SearchResult::new("A", "a", "")]);

        let action = handle_key_event(&mut app, key(KeyCode::Enter));
        assert_eq!(action, Action::None);
        assert!(app.results().is_empty());
        assert_eq!(app.mode(), crate::tui::Mode::Idle);
    }

    #[test]
    fn tab_cycles_panels() {
        let mut app = App::new();
        assert_eq!(app.focus(), Focus::Input);
        handle_key_event(&mut app, key(KeyCode::Tab));
        assert_eq!(app.focus(), Focus::Results);
        handle_key_event(&mut app, key(KeyCode::Tab));
        assert_eq!(app.focus(), Focus::Input);
    }

    #[test]
    fn enter_on_a_selected_result_selects_it() {
        let mut app = App::new();
        app.set_results(vec![
            SearchResult::new("A", "a", ""),
            SearchResult::new("B", "b", ""),
        ]);
        app.focus_results();

        // No selection yet: Enter is a no-op
        assert_eq!(handle_key_event(&mut app, key(KeyCode::Enter)), Action::None);

        handle_key_event(&mut app, key(KeyCode::Down));
        handle_key_event(&mut app, key(KeyCode::Down));
        assert_eq!(
            handle_key_event(&mut app, key(KeyCode::Enter)),
            Action::Select(1)
        );
    }

    #[test]
    fn arrow_and_vim_keys_both_navigate() {
        let mut app = App::new();
        app.set_results(vec![
            SearchResult::new("A", "a", ""),
            SearchResult::new("B", "b", ""),
        ]);
        app.focus_results();

        handle_key_event(&mut app, key(KeyCode::Char('j')));
        assert_eq!(app.selected_index(), Some(0));
        handle_key_event(&mut app, key(KeyCode::Down));
        assert_eq!(app.selected_index(), Some(1));
        handle_key_event(&mut app, key(KeyCode::Char('k')));
        assert_eq!(app.selected_index(), Some(0));
        handle_key_event(&mut app, key(KeyCode::Up));
        assert_eq!(app.selected_index(), Some(1));
    }
}
