pub mod footer;
pub mod header;
mod helpers;
pub mod list_view;
pub mod status_row;

#[cfg(test)]
pub mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Style;
use ratatui::widgets::Block;

use super::app::App;

/// Main render function: lays out the screen and records the list geometry
/// so pointer input can be hit-tested against this frame.
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Background fill
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    // Layout: header (2 rows) | note list | input (1 row) | status row (1 row)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // title + separator
            Constraint::Min(1),    // note list
            Constraint::Length(1), // add-note input
            Constraint::Length(1), // status row
        ])
        .split(area);

    app.surface.set_layout(area, chunks[0], chunks[1]);

    header::render_header(frame, app, chunks[0]);
    list_view::render_list_view(frame, app, chunks[1]);
    footer::render_footer(frame, app, chunks[2]);
    status_row::render_status_row(frame, app, chunks[3]);
}

#[cfg(test)]
mod tests {
    use super::test_helpers::*;
    use insta::assert_snapshot;

    #[test]
    fn full_screen() {
        let mut app = app_with_notes(&["Buy milk", "Call mom"]);
        let output = render_to_string(36, 7, |frame, _| {
            super::render(frame, &mut app);
        });
        assert_snapshot!(output, @r"
         My Notes           2 open · 0 done
        ────────────────────────────────────
        ›[ ] Buy milk                     ×
         [ ] Call mom                     ×

         + Add a note
         a add  e title  space toggle  d del
        ");
    }
}
