use crate::model::{TITLE_MAX_CHARS, Task, TaskId};

use super::line_input::LineInput;

/// What the list asks the controller to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListIntent {
    Toggle(TaskId),
    Save { id: TaskId, title: String },
    Delete(TaskId),
}

/// The row currently being edited in place
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowEdit {
    pub id: TaskId,
    pub input: LineInput,
}

/// Cursor, scroll and inline-edit state for the task list.
///
/// Holds no task data: every method takes the controller's slice.
#[derive(Debug, Clone, Default)]
pub struct ListView {
    pub cursor: usize,
    pub scroll: usize,
    editing: Option<RowEdit>,
}

impl ListView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected<'a>(&self, tasks: &'a [Task]) -> Option<&'a Task> {
        tasks.get(self.cursor)
    }

    pub fn move_cursor(&mut self, delta: isize, len: usize) {
        if len == 0 {
            self.cursor = 0;
            return;
        }
        self.cursor = self.cursor.saturating_add_signed(delta).min(len - 1);
    }

    pub fn jump_top(&mut self) {
        self.cursor = 0;
    }

    pub fn jump_bottom(&mut self, len: usize) {
        self.cursor = len.saturating_sub(1);
    }

    /// Keep the cursor in range after the list changed underneath it, and
    /// drop edit mode if the edited task is gone.
    pub fn clamp(&mut self, tasks: &[Task]) {
        self.cursor = self.cursor.min(tasks.len().saturating_sub(1));
        if let Some(edit) = &self.editing
            && !tasks.iter().any(|t| t.id == edit.id)
        {
            self.editing = None;
        }
    }

    /// Adjust `scroll` so the cursor row is inside a window of `height` rows
    pub fn ensure_visible(&mut self, height: usize) {
        if height == 0 {
            return;
        }
        if self.cursor < self.scroll {
            self.scroll = self.cursor;
        } else if self.cursor >= self.scroll + height {
            self.scroll = self.cursor + 1 - height;
        }
    }

    // -----------------------------------------------------------------------
    // Edit mode
    // -----------------------------------------------------------------------

    pub fn editing(&self) -> Option<&RowEdit> {
        self.editing.as_ref()
    }

    pub fn editing_mut(&mut self) -> Option<&mut RowEdit> {
        self.editing.as_mut()
    }

    pub fn editing_id(&self) -> Option<TaskId> {
        self.editing.as_ref().map(|e| e.id)
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    /// Put `task` in edit mode, replacing any row already being edited
    pub fn begin_edit(&mut self, task: &Task) {
        self.editing = Some(RowEdit {
            id: task.id,
            input: LineInput::with_text(&task.title, Some(TITLE_MAX_CHARS)),
        });
    }

    /// Save `new_title` for `id` and leave edit mode
    pub fn commit_edit(&mut self, id: TaskId, new_title: &str) -> ListIntent {
        self.editing = None;
        ListIntent::Save {
            id,
            title: new_title.to_string(),
        }
    }

    /// Commit the row being edited. A blank title cancels instead.
    pub fn commit_current(&mut self) -> Option<ListIntent> {
        let edit = self.editing.take()?;
        let title = edit.input.text().trim();
        if title.is_empty() {
            return None;
        }
        Some(self.commit_edit(edit.id, title))
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    // -----------------------------------------------------------------------
    // Row intents
    // -----------------------------------------------------------------------

    pub fn toggle_selected(&self, tasks: &[Task]) -> Option<ListIntent> {
        self.selected(tasks).map(|t| ListIntent::Toggle(t.id))
    }

    pub fn delete_selected(&self, tasks: &[Task]) -> Option<ListIntent> {
        self.selected(tasks).map(|t| ListIntent::Delete(t.id))
    }
}
