use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::{App, Mode};

use super::edit::begin_title_edit;

pub(super) fn handle_navigate(app: &mut App, key: KeyEvent) {
    app.status = None;
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('a') => app.mode = Mode::Add,
        KeyCode::Char('e') => begin_title_edit(app),
        KeyCode::Char('j') | KeyCode::Down => app.move_cursor(1),
        KeyCode::Char('k') | KeyCode::Up => app.move_cursor(-1),
        KeyCode::Char('g') | KeyCode::Home => app.move_cursor(isize::MIN),
        KeyCode::Char('G') | KeyCode::End => app.move_cursor(isize::MAX),
        KeyCode::Char(' ') | KeyCode::Char('x') => toggle_selected(app),
        KeyCode::Char('d') | KeyCode::Delete => delete_selected(app),
        _ => {}
    }
}

fn toggle_selected(app: &mut App) {
    if let Some(id) = app.selected_note() {
        app.board.toggle(id);
        app.sync_rows();
        app.collect_persist_error();
    }
}

fn delete_selected(app: &mut App) {
    if let Some(id) = app.selected_note() {
        app.board.delete(id);
        app.sync_rows();
        app.collect_persist_error();
    }
}
