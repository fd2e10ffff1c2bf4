pub mod editor_row;
pub mod header;
mod helpers;
pub mod status_row;
pub mod task_list;

#[cfg(test)]
pub mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use super::app::App;
use crate::util::unicode;

/// Main render function: lays out the screen and dispatches to sub-renderers
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Background fill
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    let banner_height = u16::from(app.controller.error().is_some());

    // Layout: header | error banner | editor | separator | list | status row
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(banner_height),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(area);

    header::render_header(frame, app, chunks[0]);
    if let Some(message) = app.controller.error() {
        render_error_banner(frame, app, message, chunks[1]);
    }
    editor_row::render_editor_row(frame, app, chunks[2]);
    render_separator(frame, app, chunks[3]);
    task_list::render_task_list(frame, app, chunks[4]);
    status_row::render_status_row(frame, app, chunks[5]);
}

fn render_error_banner(frame: &mut Frame, app: &App, message: &str, area: Rect) {
    let bg = app.theme.background;
    let text = unicode::truncate_to_width(&format!(" ! {}", message), area.width as usize);
    let line = Line::from(Span::styled(
        text,
        Style::default()
            .fg(app.theme.red)
            .bg(bg)
            .add_modifier(Modifier::BOLD),
    ));
    frame.render_widget(Paragraph::new(line).style(Style::default().bg(bg)), area);
}

fn render_separator(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let line = Line::from(Span::styled(
        "\u{2500}".repeat(area.width as usize),
        Style::default().fg(app.theme.dim).bg(bg),
    ));
    frame.render_widget(Paragraph::new(line), area);
}
