use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::helpers::{input_spans, push_right_aligned};
use crate::model::TITLE_MAX_CHARS;
use crate::tui::app::{App, Focus};
use crate::util::unicode;

const PLACEHOLDER: &str = "Add a new task...";
const PREFIX: &str = " + ";

/// Render the new-task editor with its character counter
pub fn render_editor_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;
    let focused = app.focus == Focus::Editor;
    let input = &app.editor.input;

    let count = input.char_count();
    let max = input.max_chars().unwrap_or(TITLE_MAX_CHARS);
    let counter = format!("{}/{} ", count, max);
    let counter_color = if count >= max {
        app.theme.yellow
    } else {
        app.theme.dim
    };

    let prefix_color = if focused {
        app.theme.highlight
    } else {
        app.theme.dim
    };
    let mut spans = vec![Span::styled(
        PREFIX,
        Style::default()
            .fg(prefix_color)
            .bg(bg)
            .add_modifier(Modifier::BOLD),
    )];

    let room = width.saturating_sub(PREFIX.len() + counter.len() + 1);
    if focused {
        spans.extend(input_spans(input, room, app.theme.text_bright, bg));
    } else {
        spans.push(Span::styled(
            unicode::truncate_to_width(input.text(), room),
            Style::default().fg(app.theme.text_bright).bg(bg),
        ));
    }
    if input.is_empty() {
        spans.push(Span::styled(
            PLACEHOLDER,
            Style::default().fg(app.theme.dim).bg(bg),
        ));
    }

    push_right_aligned(
        &mut spans,
        Span::styled(counter, Style::default().fg(counter_color).bg(bg)),
        width,
        bg,
    );

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}
