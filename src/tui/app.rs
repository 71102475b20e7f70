//! Presenter state for the search modal
//!
//! The modal has two observable modes: Idle (no results rendered) and
//! Displaying (a committed search's results are on screen). All state here is
//! plain data so the transitions can be tested without a terminal.

use crate::search::SearchResult;

/// Which panel receives keyboard input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Input,
    Results,
}

/// Observable presenter mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Idle,
    Displaying,
}

/// Search modal state
pub struct App {
    input: String,
    results: Vec<SearchResult>,
    selected: Option<usize>,
    focus: Focus,
    mode: Mode,
}

impl App {
    pub fn new() -> Self {
        Self {
            input: String::new(),
            results: Vec::new(),
            selected: None,
            focus: Focus::Input,
            mode: Mode::Idle,
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn push_input_char(&mut self, c: char) {
        self.input.push(c);
    }

    pub fn pop_input_char(&mut self) {
        self.input.pop();
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    /// Toggle between the input field and the result list
    pub fn next_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Input => Focus::Results,
            Focus::Results => Focus::Input,
        };
    }

    pub fn focus_results(&mut self) {
        self.focus = Focus::Results;
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn results(&self) -> &[SearchResult] {
        &self.results
    }

    /// Install a committed search's results; enters Displaying
    pub fn set_results(&mut self, results: Vec<SearchResult>) {
        self.results = results;
        self.selected = None;
        self.mode = Mode::Displaying;
    }

    /// Drop any rendered results; returns to Idle
    pub fn clear_results(&mut self) {
        self.results.clear();
        self.selected = None;
        self.mode = Mode::Idle;
        self.focus = Focus::Input;
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_result(&self) -> Option<&SearchResult> {
        self.selected.and_then(|i| self.results.get(i))
    }

    /// Move the selection down, wrapping past the end
    pub fn select_next(&mut self) {
        if self.results.is_empty() {
            return;
        }
        self.selected = Some(match self.selected {
            Some(i) => (i + 1) % self.results.len(),
            None => 0,
        });
    }

    /// Move the selection up, wrapping past the start
    pub fn select_previous(&mut self) {
        if self.results.is_empty() {
            return;
        }
        self.selected = Some(match self.selected {
            Some(0) | None => self.results.len() - 1,
            Some(i) => i - 1,
        });
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
