mod edit;
mod mouse;
mod navigate;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::{App, Mode};

pub use edit::{EditBuffer, begin_title_edit, commit_title_edit};
pub use mouse::handle_mouse;

/// Handle a key event in the current mode
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }
    match app.mode {
        Mode::Navigate => navigate::handle_navigate(app, key),
        Mode::Add => edit::handle_add(app, key),
        Mode::EditTitle => edit::handle_edit_title(app, key),
    }
}

/// The terminal lost focus: no gesture survives that
pub fn handle_focus_lost(app: &mut App) {
    app.cancel_gesture();
}
