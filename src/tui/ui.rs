//! UI rendering for the search modal
//!
//! A quick-switcher style layout: search input on top, result list below,
//! a transient notice line and a shortcut bar at the bottom.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use super::app::{App, Focus, Mode};
use crate::notify::{Notice, Severity};

/// Main rendering function for the modal
pub fn draw(frame: &mut Frame, app: &App, notices: &[Notice]) {
    let size = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Search input
            Constraint::Min(0),    // Result list
            Constraint::Length(1), // Notice line
            Constraint::Length(1), // Shortcut bar
        ])
        .split(size);

    render_search_input(frame, app, chunks[0]);
    render_results(frame, app, chunks[1]);
    render_notice_line(frame, notices, chunks[2]);
    render_shortcut_bar(frame, app, chunks[3]);
}

/// Search input with a cursor indicator when focused
fn render_search_input(frame: &mut Frame, app: &App, area: Rect) {
    let is_focused = matches!(app.focus(), Focus::Input);

    let border_style = if is_focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title("Find or create a note")
        .border_style(border_style);

    let mut content = app.input().to_string();
    if is_focused {
        content.push('█');
    }

    frame.render_widget(Paragraph::new(content).block(block), area);
}

/// Result list: title plus a dimmed one-line summary per entry
fn render_results(frame: &mut Frame, app: &App, area: Rect) {
    let is_focused = matches!(app.focus(), Focus::Results);

    let border_style = if is_focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    let title = match app.mode() {
        Mode::Idle => "Results".to_string(),
        Mode::Displaying => format!("Results ({})", app.results().len()),
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(border_style);

    if app.mode() == Mode::Displaying && app.results().is_empty() {
        let empty = Paragraph::new(Text::from("No results."))
            .block(block)
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = app
        .results()
        .iter()
        .map(|result| {
            let preview: String = result.summary.chars().take(100).collect();
            let lines = vec![
                Line::from(Span::styled(
                    result.title.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    preview,
                    Style::default().fg(Color::DarkGray),
                )),
            ];
            ListItem::new(Text::from(lines))
        })
        .collect();

    let list = List::new(items).block(block).highlight_style(
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::REVERSED),
    );

    let mut list_state = ListState::default();
    list_state.select(app.selected_index());

    frame.render_stateful_widget(list, area, &mut list_state);
}

/// Most recent live notice, colored by severity
fn render_notice_line(frame: &mut Frame, notices: &[Notice], area: Rect) {
    let Some(notice) = notices.last() else {
        return;
    };

    let style = match notice.severity {
        Severity::Info => Style::default().fg(Color::Yellow),
        Severity::Error => Style::default().fg(Color::Red),
    };

    // Notices may be multi-line; the status line shows the first line.
    let first_line = notice.text.lines().next().unwrap_or_default().to_string();
    frame.render_widget(Paragraph::new(first_line).style(style), area);
}

/// Context-aware keyboard shortcuts
fn render_shortcut_bar(frame: &mut Frame, app: &App, area: Rect) {
    let key_style = Style::default().fg(Color::Cyan);
    let sep_style = Style::default().fg(Color::DarkGray);

    let mut spans = vec![
        Span::styled("Esc", key_style),
        Span::raw(": close"),
        Span::styled(" | ", sep_style),
        Span::styled("Tab", key_style),
        Span::raw(": switch panel"),
    ];

    match app.focus() {
        Focus::Input => {
            spans.push(Span::styled(" | ", sep_style));
            spans.push(Span::styled("Enter", key_style));
            spans.push(Span::raw(": search"));
        }
        Focus::Results => {
            spans.push(Span::styled(" | ", sep_style));
            spans.push(Span::styled("↑/↓", key_style));
            spans.push(Span::raw(": navigate"));
            spans.push(Span::styled(" | ", sep_style));
            spans.push(Span::styled("Enter", key_style));
            spans.push(Span::raw(": save note"));
        }
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modal_layout_reserves_input_notice_and_shortcut_rows() {
        let area = Rect::new(0, 0, 80, 24);
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(area);

        assert_eq!(chunks[0].height, 3);
        assert_eq!(chunks[1].height, 19);
        assert_eq!(chunks[2].height, 1);
        assert_eq!(chunks[3].height, 1);
    }

    #[test]
    fn summary_preview_is_char_truncated() {
        let summary = "é".repeat(150);
        let preview: String = summary.chars().take(100).collect();
        assert_eq!(preview.chars().count(), 100);
    }
}
