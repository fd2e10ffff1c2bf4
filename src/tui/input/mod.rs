mod edit;
mod navigate;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::{App, Focus};

use edit::{handle_editor, handle_row_edit};
use navigate::handle_navigate;

/// Handle a key event for whichever widget has focus
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    // An open row edit captures all input
    if app.list.is_editing() {
        handle_row_edit(app, key);
        return;
    }

    match app.focus {
        Focus::Editor => handle_editor(app, key),
        Focus::List => handle_navigate(app, key),
    }
}

/// Handle a bracketed paste event. Goes to the row being edited, else to
/// the editor (switching focus to it).
pub fn handle_paste(app: &mut App, text: &str) {
    if text.is_empty() {
        return;
    }
    if let Some(edit) = app.list.editing_mut() {
        edit.input.insert_str(text);
        return;
    }
    app.focus = Focus::Editor;
    app.editor.input.insert_str(text);
}
