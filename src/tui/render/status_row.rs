use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Focus};
use crate::util::unicode;

/// Key hints for the current input context
fn hints(app: &App) -> &'static str {
    if app.list.is_editing() {
        " Enter save  Esc cancel"
    } else {
        match app.focus {
            Focus::Editor => " Enter add  Esc list  Ctrl-C quit",
            Focus::List => " Space toggle  e edit  d delete  a add  r reload  q quit",
        }
    }
}

/// Render the status row (bottom of screen)
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let line = if app.show_key_hints {
        Line::from(Span::styled(
            unicode::truncate_to_width(hints(app), width),
            Style::default().fg(app.theme.dim).bg(bg),
        ))
    } else {
        Line::from(Span::styled(" ".repeat(width), Style::default().bg(bg)))
    };

    let paragraph = Paragraph::new(line).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::render::test_helpers::*;

    #[tokio::test]
    async fn hints_follow_focus() {
        let mut app = app_with_tasks(vec![task(1, "A", false)]);
        let list = render_to_string(80, 1, |frame, area| render_status_row(frame, &app, area));
        assert!(list.contains("Space toggle"));

        app.focus = Focus::Editor;
        let editor = render_to_string(80, 1, |frame, area| render_status_row(frame, &app, area));
        assert_eq!(editor, " Enter add  Esc list  Ctrl-C quit");
    }

    #[tokio::test]
    async fn hints_can_be_hidden() {
        let mut app = app_with_tasks(vec![]);
        app.show_key_hints = false;
        let output = render_to_string(80, 1, |frame, area| render_status_row(frame, &app, area));
        assert_eq!(output, "");
    }
}
