use ratatui::style::Style;
use ratatui::text::Span;

use crate::util::unicode;

/// Checkbox symbol for a note (markdown checkbox style)
pub(super) fn check_symbol(completed: bool) -> &'static str {
    if completed { "[x]" } else { "[ ]" }
}

/// Spans for an edit buffer with a block cursor at byte offset `cursor`
pub(super) fn cursor_spans(
    text: &str,
    cursor: usize,
    text_style: Style,
    cursor_style: Style,
) -> Vec<Span<'static>> {
    let (before, after) = text.split_at(cursor.min(text.len()));
    vec![
        Span::styled(before.to_string(), text_style),
        Span::styled("\u{258C}", cursor_style), // ▌ cursor
        Span::styled(after.to_string(), text_style),
    ]
}

/// Compute total display width of a slice of spans
pub(super) fn spans_width(spans: &[Span]) -> usize {
    spans
        .iter()
        .map(|s| unicode::display_width(&s.content))
        .sum()
}
