use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Mode};

use super::helpers::cursor_spans;

/// Render the add-note input line
pub fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let prompt = Style::default().fg(app.theme.highlight).bg(bg);

    let line = if app.mode == Mode::Add {
        let mut spans = vec![Span::styled(" + ", prompt)];
        spans.extend(cursor_spans(
            app.input.text(),
            app.input.cursor(),
            Style::default().fg(app.theme.text_bright).bg(bg),
            prompt,
        ));
        Line::from(spans)
    } else {
        Line::from(vec![
            Span::styled(" + ", Style::default().fg(app.theme.dim).bg(bg)),
            Span::styled("Add a note", Style::default().fg(app.theme.dim).bg(bg)),
        ])
    };

    let paragraph = Paragraph::new(line).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}
