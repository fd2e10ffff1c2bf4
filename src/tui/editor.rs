use crate::model::TITLE_MAX_CHARS;

use super::line_input::LineInput;

/// Input row for new task titles
#[derive(Debug, Clone)]
pub struct TaskEditor {
    pub input: LineInput,
}

impl Default for TaskEditor {
    fn default() -> Self {
        TaskEditor {
            input: LineInput::bounded(TITLE_MAX_CHARS),
        }
    }
}

impl TaskEditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the trimmed title out of the editor, clearing it.
    ///
    /// Blank input yields `None` and is left in place, without complaint.
    pub fn submit(&mut self) -> Option<String> {
        let title = self.input.text().trim();
        if title.is_empty() {
            return None;
        }
        let title = title.to_string();
        self.input.clear();
        Some(title)
    }
}
