use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque note identifier. Derived from the creation time in milliseconds
/// and never reused within a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(pub u64);

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single checklist entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    pub text: String,
    #[serde(default)]
    pub completed: bool,
    /// Position in storage order (dense 0..N-1 after every structural change)
    #[serde(default)]
    pub order: u32,
}

impl Note {
    pub fn new(id: NoteId, text: String, order: u32) -> Self {
        Note {
            id,
            text,
            completed: false,
            order,
        }
    }
}

/// Open/done counts shown in the header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NoteStats {
    pub open: usize,
    pub done: usize,
}

/// Build the display list: open notes before completed ones, ascending
/// `order` within each group. Recomputed on every read.
pub fn display_order<'a, I>(notes: I) -> Vec<&'a Note>
where
    I: IntoIterator<Item = &'a Note>,
{
    let mut sorted: Vec<&Note> = notes.into_iter().collect();
    sorted.sort_by(|a, b| {
        a.completed
            .cmp(&b.completed)
            .then_with(|| a.order.cmp(&b.order))
    });
    sorted
}

/// Count open and completed notes
pub fn stats<'a, I>(notes: I) -> NoteStats
where
    I: IntoIterator<Item = &'a Note>,
{
    notes.into_iter().fold(NoteStats::default(), |mut acc, note| {
        if note.completed {
            acc.done += 1;
        } else {
            acc.open += 1;
        }
        acc
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(id: u64, order: u32, completed: bool) -> Note {
        Note {
            id: NoteId(id),
            text: format!("note {}", id),
            completed,
            order,
        }
    }

    #[test]
    fn test_display_order_partitions_completed_last() {
        let notes = vec![
            note(1, 0, true),
            note(2, 1, false),
            note(3, 2, true),
            note(4, 3, false),
        ];
        let ids: Vec<u64> = display_order(&notes).iter().map(|n| n.id.0).collect();
        assert_eq!(ids, vec![2, 4, 1, 3]);
    }

    #[test]
    fn test_display_order_uses_order_not_storage_position() {
        let notes = vec![note(1, 2, false), note(2, 0, false), note(3, 1, false)];
        let ids: Vec<u64> = display_order(&notes).iter().map(|n| n.id.0).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn test_stats() {
        let notes = vec![note(1, 0, true), note(2, 1, false), note(3, 2, false)];
        assert_eq!(stats(&notes), NoteStats { open: 2, done: 1 });
    }

    #[test]
    fn test_serde_defaults_for_missing_fields() {
        let note: Note = serde_json::from_str(r#"{"id":42,"text":"milk"}"#).unwrap();
        assert_eq!(note.id, NoteId(42));
        assert!(!note.completed);
        assert_eq!(note.order, 0);
    }
}
