use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Mode};

/// Render the status row (bottom of screen)
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;

    let line = if let Some(message) = &app.status {
        Line::from(Span::styled(
            format!(" {}", message),
            Style::default().fg(app.theme.red).bg(bg),
        ))
    } else {
        Line::from(Span::styled(
            format!(" {}", hint(app)),
            Style::default().fg(app.theme.dim).bg(bg),
        ))
    };

    let paragraph = Paragraph::new(line).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

fn hint(app: &App) -> &'static str {
    if app.board.is_dragging() {
        return "release to drop  hold near an edge to scroll";
    }
    match app.mode {
        Mode::Navigate => "a add  e title  space toggle  d delete  q quit",
        Mode::Add => "Enter add  Esc done",
        Mode::EditTitle => "Enter save  Esc revert",
    }
}
