use crate::io::storage::{Storage, StorageError};
use crate::model::note::Note;

/// Storage key holding the JSON-encoded note array
pub const NOTES_KEY: &str = "notes";
/// Storage key holding the list title (stored verbatim)
pub const TITLE_KEY: &str = "title";
/// Title shown when none has been stored yet
pub const DEFAULT_TITLE: &str = "My Notes";

/// Load the stored notes, sorted by `order`. Absent or unparsable data
/// yields an empty collection.
pub fn load_notes(storage: &dyn Storage) -> Vec<Note> {
    let raw = match storage.get(NOTES_KEY) {
        Some(raw) => raw,
        None => return Vec::new(),
    };
    match serde_json::from_str::<Vec<Note>>(&raw) {
        Ok(mut notes) => {
            notes.sort_by_key(|n| n.order);
            notes
        }
        Err(e) => {
            log::warn!("event=notes_load status=fallback error={}", e);
            Vec::new()
        }
    }
}

/// Load the stored title, falling back to [`DEFAULT_TITLE`] when it is
/// missing or blank
pub fn load_title(storage: &dyn Storage) -> String {
    storage
        .get(TITLE_KEY)
        .filter(|t| !t.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_TITLE.to_string())
}

/// Persist the notes. An empty collection is skipped unless `persist_empty`
/// is set, so a stored list is never overwritten by an empty one.
/// Returns whether anything was written.
pub fn save_notes(
    storage: &mut dyn Storage,
    notes: &[Note],
    persist_empty: bool,
) -> Result<bool, StorageError> {
    if notes.is_empty() && !persist_empty {
        return Ok(false);
    }
    let content = serde_json::to_string(notes)?;
    storage.set(NOTES_KEY, &content)?;
    Ok(true)
}

pub fn save_title(storage: &mut dyn Storage, title: &str) -> Result<(), StorageError> {
    storage.set(TITLE_KEY, title)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::storage::MemoryStorage;
    use crate::model::note::NoteId;

    fn sample() -> Vec<Note> {
        vec![
            Note::new(NoteId(10), "Milk".into(), 0),
            Note::new(NoteId(11), "Eggs".into(), 1),
        ]
    }

    #[test]
    fn test_load_missing_keys_uses_defaults() {
        let storage = MemoryStorage::new();
        assert!(load_notes(&storage).is_empty());
        assert_eq!(load_title(&storage), DEFAULT_TITLE);
    }

    #[test]
    fn test_load_malformed_notes_is_empty() {
        let mut storage = MemoryStorage::new();
        storage.insert(NOTES_KEY, "{not an array");
        assert!(load_notes(&storage).is_empty());
    }

    #[test]
    fn test_load_sorts_by_order() {
        let mut storage = MemoryStorage::new();
        storage.insert(
            NOTES_KEY,
            r#"[{"id":2,"text":"b","completed":false,"order":1},
                {"id":1,"text":"a","completed":true,"order":0}]"#,
        );
        let notes = load_notes(&storage);
        assert_eq!(notes[0].id, NoteId(1));
        assert_eq!(notes[1].id, NoteId(2));
    }

    #[test]
    fn test_save_then_load() {
        let mut storage = MemoryStorage::new();
        assert!(save_notes(&mut storage, &sample(), false).unwrap());
        assert_eq!(load_notes(&storage), sample());
    }

    #[test]
    fn test_empty_list_does_not_overwrite_stored_list() {
        let mut storage = MemoryStorage::new();
        save_notes(&mut storage, &sample(), false).unwrap();
        assert!(!save_notes(&mut storage, &[], false).unwrap());
        assert_eq!(load_notes(&storage).len(), 2);
    }

    #[test]
    fn test_persist_empty_overwrites_stored_list() {
        let mut storage = MemoryStorage::new();
        save_notes(&mut storage, &sample(), false).unwrap();
        assert!(save_notes(&mut storage, &[], true).unwrap());
        assert!(load_notes(&storage).is_empty());
    }

    #[test]
    fn test_title_is_stored_verbatim() {
        let mut storage = MemoryStorage::new();
        save_title(&mut storage, "Week \"plan\"").unwrap();
        assert_eq!(load_title(&storage), "Week \"plan\"");
    }

    #[test]
    fn test_blank_stored_title_uses_default() {
        let mut storage = MemoryStorage::new();
        storage.insert(TITLE_KEY, "");
        assert_eq!(load_title(&storage), DEFAULT_TITLE);
        storage.insert(TITLE_KEY, "   ");
        assert_eq!(load_title(&storage), DEFAULT_TITLE);
    }
}
