use crate::util::unicode;

/// Single-line text buffer with a grapheme-aware cursor and an optional
/// character limit.
///
/// The limit only stops input from growing: text that is already longer
/// (e.g. a title set through the CLI) is left as-is and can still be edited
/// down.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineInput {
    buffer: String,
    /// Byte offset into `buffer`, always on a grapheme boundary
    cursor: usize,
    max_chars: Option<usize>,
}

impl LineInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bounded(max_chars: usize) -> Self {
        LineInput {
            max_chars: Some(max_chars),
            ..Default::default()
        }
    }

    /// Buffer preloaded with `text`, cursor at the end
    pub fn with_text(text: &str, max_chars: Option<usize>) -> Self {
        LineInput {
            buffer: text.to_string(),
            cursor: text.len(),
            max_chars,
        }
    }

    pub fn text(&self) -> &str {
        &self.buffer
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn max_chars(&self) -> Option<usize> {
        self.max_chars
    }

    pub fn char_count(&self) -> usize {
        self.buffer.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    fn remaining(&self) -> usize {
        self.max_chars
            .map_or(usize::MAX, |max| max.saturating_sub(self.char_count()))
    }

    /// Insert at the cursor. Returns false when the limit is reached.
    pub fn insert_char(&mut self, c: char) -> bool {
        if c.is_control() || self.remaining() == 0 {
            return false;
        }
        self.buffer.insert(self.cursor, c);
        self.cursor += c.len_utf8();
        true
    }

    /// Insert pasted text, flattening newlines and cutting at the limit
    pub fn insert_str(&mut self, text: &str) {
        let clean: String = text
            .chars()
            .map(|c| if c == '\n' || c == '\t' { ' ' } else { c })
            .filter(|c| !c.is_control())
            .collect();
        let room = self.remaining();
        let clipped = unicode::prefix_chars(&clean, room);
        self.buffer.insert_str(self.cursor, clipped);
        self.cursor += clipped.len();
    }

    pub fn backspace(&mut self) {
        if let Some(prev) = unicode::prev_grapheme_boundary(&self.buffer, self.cursor) {
            self.buffer.replace_range(prev..self.cursor, "");
            self.cursor = prev;
        }
    }

    pub fn delete(&mut self) {
        if let Some(next) = unicode::next_grapheme_boundary(&self.buffer, self.cursor) {
            self.buffer.replace_range(self.cursor..next, "");
        }
    }

    pub fn delete_word_left(&mut self) {
        let start = unicode::word_boundary_left(&self.buffer, self.cursor);
        self.buffer.replace_range(start..self.cursor, "");
        self.cursor = start;
    }

    pub fn move_left(&mut self) {
        if let Some(prev) = unicode::prev_grapheme_boundary(&self.buffer, self.cursor) {
            self.cursor = prev;
        }
    }

    pub fn move_right(&mut self) {
        if let Some(next) = unicode::next_grapheme_boundary(&self.buffer, self.cursor) {
            self.cursor = next;
        }
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.buffer.len();
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor = 0;
    }
}
