use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::helpers::{input_spans, spans_width};
use crate::model::Task;
use crate::tui::app::{App, Focus};
use crate::tui::theme::Theme;
use crate::util::unicode;

/// Render the task list, its loading state, or its empty state
pub fn render_task_list(frame: &mut Frame, app: &mut App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    if app.controller.is_loading() {
        let line = Line::from(Span::styled(
            " Loading tasks...",
            Style::default().fg(app.theme.dim).bg(bg),
        ));
        frame.render_widget(Paragraph::new(line).style(Style::default().bg(bg)), area);
        return;
    }

    if app.controller.tasks().is_empty() {
        let lines = vec![
            Line::from(Span::styled(
                " No tasks yet!",
                Style::default().fg(app.theme.text).bg(bg),
            )),
            Line::from(Span::styled(
                " Add your first task above to get started.",
                Style::default().fg(app.theme.dim).bg(bg),
            )),
        ];
        frame.render_widget(Paragraph::new(lines).style(Style::default().bg(bg)), area);
        return;
    }

    let height = area.height as usize;
    app.list.ensure_visible(height);

    let list_focused = app.focus == Focus::List;
    let tasks = app.controller.tasks();
    let mut lines: Vec<Line> = Vec::new();
    for (i, task) in tasks.iter().enumerate().skip(app.list.scroll).take(height) {
        let selected = list_focused && i == app.list.cursor;
        let row_bg = if selected { app.theme.selection_bg } else { bg };
        let mut spans = row_prefix(&app.theme, task, selected, row_bg);

        let room = width.saturating_sub(spans_width(&spans));
        match app.list.editing() {
            Some(edit) if edit.id == task.id => {
                spans.extend(input_spans(
                    &edit.input,
                    room,
                    app.theme.text_bright,
                    row_bg,
                ));
            }
            _ => spans.push(title_span(&app.theme, task, room, row_bg)),
        }

        // Fill the rest of the row so the selection background spans it
        let used = spans_width(&spans);
        if selected && used < width {
            spans.push(Span::styled(
                " ".repeat(width - used),
                Style::default().bg(row_bg),
            ));
        }
        lines.push(Line::from(spans));
    }

    frame.render_widget(Paragraph::new(lines).style(Style::default().bg(bg)), area);
}

fn row_prefix(theme: &Theme, task: &Task, selected: bool, row_bg: Color) -> Vec<Span<'static>> {
    let marker = if selected { " > " } else { "   " };
    let checkbox = if task.completed { "[x]" } else { "[ ]" };
    vec![
        Span::styled(marker, Style::default().fg(theme.highlight).bg(row_bg)),
        Span::styled(
            checkbox,
            Style::default()
                .fg(theme.completion_color(task.completed))
                .bg(row_bg),
        ),
        Span::styled(" ", Style::default().bg(row_bg)),
    ]
}

fn title_span(theme: &Theme, task: &Task, room: usize, row_bg: Color) -> Span<'static> {
    let style = if task.completed {
        Style::default()
            .fg(theme.dim)
            .bg(row_bg)
            .add_modifier(Modifier::CROSSED_OUT)
    } else {
        Style::default().fg(theme.text_bright).bg(row_bg)
    };
    Span::styled(unicode::truncate_to_width(&task.title, room), style)
}
