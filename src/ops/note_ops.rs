use chrono::Utc;

use crate::io::note_io;
use crate::io::storage::Storage;
use crate::model::note::{self, Note, NoteId, NoteStats};

/// The ordered note collection plus the list title, mirrored into
/// persistent storage after every change.
///
/// `notes` is kept in storage order with `order == index`.
pub struct NoteStore {
    notes: Vec<Note>,
    title: String,
    storage: Box<dyn Storage>,
    persist_empty: bool,
    last_id: u64,
    persist_error: Option<String>,
}

impl NoteStore {
    /// Load notes and title from `storage`, falling back to an empty list
    /// and the default title.
    pub fn load(storage: Box<dyn Storage>, persist_empty: bool) -> Self {
        let mut notes = note_io::load_notes(&*storage);
        renumber(&mut notes);
        let title = note_io::load_title(&*storage);
        let last_id = notes.iter().map(|n| n.id.0).max().unwrap_or(0);
        log::info!(
            "event=notes_loaded count={} title_len={}",
            notes.len(),
            title.chars().count()
        );
        NoteStore {
            notes,
            title,
            storage,
            persist_empty,
            last_id,
            persist_error: None,
        }
    }

    /// Notes in storage order
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// Notes in display order (open first, then completed)
    pub fn display(&self) -> Vec<&Note> {
        note::display_order(&self.notes)
    }

    pub fn get(&self, id: NoteId) -> Option<&Note> {
        self.notes.iter().find(|n| n.id == id)
    }

    pub fn contains(&self, id: NoteId) -> bool {
        self.get(id).is_some()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn stats(&self) -> NoteStats {
        note::stats(&self.notes)
    }

    /// Take the most recent persistence failure, if any
    pub fn take_persist_error(&mut self) -> Option<String> {
        self.persist_error.take()
    }

    /// Append a new open note. Text that is blank after trimming is rejected.
    pub fn add_note(&mut self, text: &str) -> Option<NoteId> {
        if text.trim().is_empty() {
            return None;
        }
        let id = self.next_id();
        let order = self.notes.len() as u32;
        self.notes.push(Note::new(id, text.to_string(), order));
        log::info!("event=note_added id={} count={}", id, self.notes.len());
        self.persist_notes();
        Some(id)
    }

    /// Flip a note's completion state
    pub fn toggle(&mut self, id: NoteId) -> bool {
        let Some(note) = self.notes.iter_mut().find(|n| n.id == id) else {
            return false;
        };
        note.completed = !note.completed;
        log::info!("event=note_toggled id={} completed={}", id, note.completed);
        self.persist_notes();
        true
    }

    /// Remove a note and close the gap in `order`
    pub fn delete(&mut self, id: NoteId) -> bool {
        let Some(idx) = self.notes.iter().position(|n| n.id == id) else {
            return false;
        };
        self.notes.remove(idx);
        assign_positions(&mut self.notes);
        log::info!("event=note_deleted id={} count={}", id, self.notes.len());
        self.persist_notes();
        true
    }

    /// Set the list title. Blank titles are rejected and the old one kept.
    pub fn rename(&mut self, title: &str) -> bool {
        let trimmed = title.trim();
        if trimmed.is_empty() {
            return false;
        }
        self.title = trimmed.to_string();
        log::info!("event=title_renamed len={}", self.title.chars().count());
        if let Err(e) = note_io::save_title(&mut *self.storage, &self.title) {
            self.record_persist_error(e.to_string());
        }
        true
    }

    /// Move `source` into `target`'s slot and persist. Returns false (and
    /// changes nothing) when either note is missing or they are the same.
    pub fn move_to_slot(&mut self, source: NoteId, target: NoteId) -> bool {
        if !relocate(&mut self.notes, source, target) {
            return false;
        }
        log::info!("event=notes_reordered source={} target={}", source, target);
        self.persist_notes();
        true
    }

    fn next_id(&mut self) -> NoteId {
        let now = u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0);
        let id = now.max(self.last_id + 1);
        self.last_id = id;
        NoteId(id)
    }

    fn persist_notes(&mut self) {
        if let Err(e) = note_io::save_notes(&mut *self.storage, &self.notes, self.persist_empty)
        {
            self.record_persist_error(e.to_string());
        }
    }

    fn record_persist_error(&mut self, message: String) {
        log::error!("event=storage_write status=failed error={}", message);
        self.persist_error = Some(message);
    }
}

/// Remove `source` from its position and reinsert it at `target`'s
/// position (measured before removal). `order` then follows the new positions.
pub fn relocate(notes: &mut Vec<Note>, source: NoteId, target: NoteId) -> bool {
    if source == target {
        return false;
    }
    let (Some(from), Some(to)) = (
        notes.iter().position(|n| n.id == source),
        notes.iter().position(|n| n.id == target),
    ) else {
        return false;
    };
    let moved = notes.remove(from);
    notes.insert(to, moved);
    assign_positions(notes);
    true
}

/// Normalize loaded order: stable sort by `order`, then assign 0..N-1
pub fn renumber(notes: &mut [Note]) {
    notes.sort_by_key(|n| n.order);
    assign_positions(notes);
}

fn assign_positions(notes: &mut [Note]) {
    for (i, note) in notes.iter_mut().enumerate() {
        note.order = i as u32;
    }
}
