use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;

use crate::tui::line_input::LineInput;
use crate::util::unicode;

/// Compute total display width of a slice of spans
pub(super) fn spans_width(spans: &[Span]) -> usize {
    spans
        .iter()
        .map(|s| unicode::display_width(&s.content))
        .sum()
}

/// Spans for a single-line input, scrolled horizontally so the cursor stays
/// inside `width` cells. The cursor cell is drawn reversed.
pub(super) fn input_spans(
    input: &LineInput,
    width: usize,
    fg: Color,
    bg: Color,
) -> Vec<Span<'static>> {
    if width == 0 {
        return Vec::new();
    }
    let text = input.text();
    let cursor = input.cursor();
    let cursor_col = unicode::byte_offset_to_display_col(text, cursor);

    // Leave one cell for the cursor itself
    let first_col = (cursor_col + 1).saturating_sub(width);
    let start = unicode::display_col_to_byte_offset(text, first_col).min(cursor);

    let style = Style::default().fg(fg).bg(bg);
    let before = &text[start..cursor];
    let (at, after) = match unicode::next_grapheme_boundary(text, cursor) {
        Some(next) => (&text[cursor..next], &text[next..]),
        None => (" ", ""),
    };

    let before_width = unicode::display_width(before);
    let at_width = unicode::display_width(at).max(1);
    let after_room = width.saturating_sub(before_width + at_width);

    let mut spans = vec![
        Span::styled(before.to_string(), style),
        Span::styled(at.to_string(), style.add_modifier(Modifier::REVERSED)),
    ];
    if after_room > 0 && !after.is_empty() {
        spans.push(Span::styled(
            unicode::truncate_to_width(after, after_room),
            style,
        ));
    }
    spans
}

/// Right-align `right` after `left` within `width` cells, padding between.
/// Drops `right` if it does not fit.
pub(super) fn push_right_aligned(
    spans: &mut Vec<Span<'static>>,
    right: Span<'static>,
    width: usize,
    bg: Color,
) {
    let used = spans_width(spans);
    let right_width = unicode::display_width(&right.content);
    if used + right_width + 1 > width {
        return;
    }
    spans.push(Span::styled(
        " ".repeat(width - used - right_width),
        Style::default().bg(bg),
    ));
    spans.push(right);
}
