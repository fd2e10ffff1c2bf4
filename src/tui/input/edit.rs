use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::{App, Focus};
use crate::tui::line_input::LineInput;

/// Apply a text-editing key to `input`. Returns false if the key is not a
/// text-editing key.
pub(super) fn apply_text_key(input: &mut LineInput, key: KeyEvent) -> bool {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('a') if ctrl => input.home(),
        KeyCode::Char('e') if ctrl => input.end(),
        KeyCode::Char('w') if ctrl => input.delete_word_left(),
        KeyCode::Char('u') if ctrl => input.clear(),
        KeyCode::Char(_) if ctrl => return false,
        KeyCode::Char(c) => {
            input.insert_char(c);
        }
        KeyCode::Backspace if key.modifiers.contains(KeyModifiers::ALT) => {
            input.delete_word_left()
        }
        KeyCode::Backspace => input.backspace(),
        KeyCode::Delete => input.delete(),
        KeyCode::Left => input.move_left(),
        KeyCode::Right => input.move_right(),
        KeyCode::Home => input.home(),
        KeyCode::End => input.end(),
        _ => return false,
    }
    true
}

/// Keys while the new-task editor has focus
pub(super) fn handle_editor(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => app.submit_editor(),
        KeyCode::Esc | KeyCode::Tab | KeyCode::Down => app.focus = Focus::List,
        _ => {
            apply_text_key(&mut app.editor.input, key);
        }
    }
}

/// Keys while a list row is being edited in place
pub(super) fn handle_row_edit(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => {
            if let Some(intent) = app.list.commit_current() {
                app.handle_list_intent(intent);
            }
        }
        KeyCode::Esc => app.list.cancel_edit(),
        _ => {
            if let Some(edit) = app.list.editing_mut() {
                apply_text_key(&mut edit.input, key);
            }
        }
    }
}
