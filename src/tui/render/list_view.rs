use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::Note;
use crate::tui::app::{App, Mode};
use crate::util::unicode;

use super::helpers::check_symbol;

/// Columns taken by the marker, checkbox and delete control
const CHROME_COLS: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RowRole {
    Plain,
    Selected,
    Dragged,
    DropTarget,
}

/// Render the note list, in preview order while a drag is active
pub fn render_list_view(frame: &mut Frame, app: &App, area: Rect) {
    let notes = app.board.display_notes();
    if notes.is_empty() {
        render_empty(frame, app, area);
        return;
    }

    let dragged = app.board.dragged_note();
    let target = app.board.preview_target();
    let selected = if dragged.is_none() && app.mode == Mode::Navigate {
        app.selected_note()
    } else {
        None
    };

    let lines: Vec<Line> = notes
        .iter()
        .skip(app.surface.first_visible())
        .take(area.height as usize)
        .map(|note| {
            let role = if Some(note.id) == dragged {
                RowRole::Dragged
            } else if Some(note.id) == target {
                RowRole::DropTarget
            } else if Some(note.id) == selected {
                RowRole::Selected
            } else {
                RowRole::Plain
            };
            note_line(app, note, role, area.width as usize)
        })
        .collect();

    let paragraph = Paragraph::new(lines).style(Style::default().bg(app.theme.background));
    frame.render_widget(paragraph, area);
}

fn note_line(app: &App, note: &Note, role: RowRole, width: usize) -> Line<'static> {
    let theme = &app.theme;
    let bg = match role {
        RowRole::DropTarget => theme.drop_target_bg,
        RowRole::Selected => theme.selection_bg,
        RowRole::Plain | RowRole::Dragged => theme.background,
    };
    let base = Style::default().bg(bg);

    let marker = match role {
        RowRole::Dragged => Span::styled("\u{2503}", base.fg(theme.highlight)), // ┃
        RowRole::Selected => Span::styled("\u{203A}", base.fg(theme.highlight)), // ›
        RowRole::Plain | RowRole::DropTarget => Span::styled(" ", base),
    };

    let mut text_style = base.fg(theme.text);
    if note.completed {
        text_style = base.fg(theme.dim).add_modifier(Modifier::CROSSED_OUT);
    }
    if role == RowRole::Dragged {
        text_style = text_style.fg(theme.highlight).add_modifier(Modifier::BOLD);
    }

    let room = width.saturating_sub(CHROME_COLS);
    let text = unicode::truncate_to_width(&note.text.replace('\n', " "), room);
    let pad = room.saturating_sub(unicode::display_width(&text));
    let delete_fg = if role == RowRole::Selected {
        theme.red
    } else {
        theme.dim
    };

    Line::from(vec![
        marker,
        Span::styled(
            check_symbol(note.completed),
            base.fg(theme.check_color(note.completed)),
        ),
        Span::styled(" ", base),
        Span::styled(text, text_style),
        Span::styled(" ".repeat(pad), base),
        Span::styled(" \u{00D7} ", base.fg(delete_fg)), // ×
    ])
}

fn render_empty(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let top = area.height.saturating_sub(2) / 2;
    let rect = Rect {
        y: area.y + top,
        height: area.height.min(2),
        ..area
    };
    let lines = vec![
        Line::from(Span::styled(
            "No notes yet.",
            Style::default().fg(app.theme.text).bg(bg),
        )),
        Line::from(Span::styled(
            "Add your first note below!",
            Style::default().fg(app.theme.dim).bg(bg),
        )),
    ];
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), rect);
}
