use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::{App, Mode};
use crate::util::unicode;

/// Single-line text buffer with a grapheme-aware cursor
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditBuffer {
    text: String,
    /// Byte offset, always on a grapheme boundary
    cursor: usize,
}

impl EditBuffer {
    pub fn with_text(text: &str) -> Self {
        EditBuffer {
            text: text.to_string(),
            cursor: text.len(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    pub fn insert_char(&mut self, c: char) {
        self.text.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn backspace(&mut self) {
        if let Some(prev) = unicode::prev_grapheme_boundary(&self.text, self.cursor) {
            self.text.replace_range(prev..self.cursor, "");
            self.cursor = prev;
        }
    }

    pub fn delete_forward(&mut self) {
        if let Some(next) = unicode::next_grapheme_boundary(&self.text, self.cursor) {
            self.text.replace_range(self.cursor..next, "");
        }
    }

    pub fn move_left(&mut self) {
        if let Some(prev) = unicode::prev_grapheme_boundary(&self.text, self.cursor) {
            self.cursor = prev;
        }
    }

    pub fn move_right(&mut self) {
        if let Some(next) = unicode::next_grapheme_boundary(&self.text, self.cursor) {
            self.cursor = next;
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.text.len();
    }

    /// Apply an editing key. Returns false if the key is not an edit.
    pub fn apply_key(&mut self, key: KeyEvent) -> bool {
        match (key.modifiers, key.code) {
            (_, KeyCode::Backspace) => self.backspace(),
            (_, KeyCode::Delete) => self.delete_forward(),
            (_, KeyCode::Left) => self.move_left(),
            (_, KeyCode::Right) => self.move_right(),
            (_, KeyCode::Home) | (KeyModifiers::CONTROL, KeyCode::Char('a')) => self.move_home(),
            (_, KeyCode::End) | (KeyModifiers::CONTROL, KeyCode::Char('e')) => self.move_end(),
            (KeyModifiers::CONTROL, KeyCode::Char('u')) => self.clear(),
            (m, KeyCode::Char(c)) if !m.contains(KeyModifiers::CONTROL) => self.insert_char(c),
            _ => return false,
        }
        true
    }
}

/// Keys while the add-note input has focus
pub(super) fn handle_add(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.input.clear();
            app.mode = Mode::Navigate;
        }
        KeyCode::Enter => submit_note(app),
        _ => {
            app.input.apply_key(key);
        }
    }
}

/// Keys while the title is being edited
pub(super) fn handle_edit_title(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => cancel_title_edit(app),
        KeyCode::Enter => commit_title_edit(app),
        _ => {
            app.input.apply_key(key);
        }
    }
}

/// Add the typed note; the input stays open for the next one
pub(super) fn submit_note(app: &mut App) {
    let text = app.input.text().to_string();
    if let Some(id) = app.board.add_note(&text) {
        app.input.clear();
        app.sync_rows();
        if let Some(idx) = app.display_index_of(id) {
            app.cursor = idx;
            app.surface.ensure_visible(idx);
        }
    }
    app.collect_persist_error();
}

pub fn begin_title_edit(app: &mut App) {
    app.input = EditBuffer::with_text(app.board.title());
    app.mode = Mode::EditTitle;
}

/// Save the edited title. Blank input keeps the previous title.
pub fn commit_title_edit(app: &mut App) {
    let text = app.input.text().to_string();
    if !app.board.rename(&text) {
        app.status = Some("Title can't be empty".into());
    }
    app.collect_persist_error();
    app.input.clear();
    app.mode = Mode::Navigate;
}

pub(super) fn cancel_title_edit(app: &mut App) {
    app.input.clear();
    app.mode = Mode::Navigate;
}
