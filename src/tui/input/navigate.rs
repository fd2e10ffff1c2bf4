use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::{App, Focus};

/// Keys while the task list has focus
pub(super) fn handle_navigate(app: &mut App, key: KeyEvent) {
    let len = app.controller.tasks().len();
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('j') | KeyCode::Down => app.list.move_cursor(1, len),
        KeyCode::Char('k') | KeyCode::Up => app.list.move_cursor(-1, len),
        KeyCode::Char('g') | KeyCode::Home => app.list.jump_top(),
        KeyCode::Char('G') | KeyCode::End => app.list.jump_bottom(len),
        KeyCode::Char('a') | KeyCode::Char('i') | KeyCode::Tab => app.focus = Focus::Editor,
        KeyCode::Char('r') => app.reload(),
        KeyCode::Char(' ') | KeyCode::Char('x') => {
            if let Some(intent) = app.list.toggle_selected(app.controller.tasks()) {
                app.handle_list_intent(intent);
            }
        }
        KeyCode::Char('d') | KeyCode::Delete => {
            if let Some(intent) = app.list.delete_selected(app.controller.tasks()) {
                app.handle_list_intent(intent);
            }
        }
        KeyCode::Char('e') | KeyCode::Enter => {
            if let Some(task) = app.list.selected(app.controller.tasks()) {
                let task = task.clone();
                app.list.begin_edit(&task);
            }
        }
        _ => {}
    }
}
