use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::helpers::push_right_aligned;
use crate::tui::app::App;

/// Render the header: app name, server address, request activity and counts
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let mut spans = vec![
        Span::styled(
            " taskdeck",
            Style::default()
                .fg(app.theme.highlight)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  {}", app.base_url),
            Style::default().fg(app.theme.dim).bg(bg),
        ),
    ];

    let tasks = app.controller.tasks();
    let done = tasks.iter().filter(|t| t.completed).count();
    let activity = if app.controller.is_loading() {
        "loading  "
    } else if app.dispatcher.in_flight() > 0 {
        "saving  "
    } else {
        ""
    };
    let right = format!("{}{} open  {} done ", activity, tasks.len() - done, done);
    push_right_aligned(
        &mut spans,
        Span::styled(right, Style::default().fg(app.theme.text).bg(bg)),
        width,
        bg,
    );

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}
