use crate::model::note::{self, Note, NoteId};
use crate::ops::note_ops::{self, NoteStore};

use super::pointer::{Point, RowLocator};

/// State of one press-and-drag on a note row
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    pub source: NoteId,
    pub pointer_start_y: f32,
    pub current_pointer: Point,
    pub preview_target: Option<NoteId>,
    /// Set once the gesture is confirmed as a drag
    pub active: bool,
}

/// Result of releasing a drag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    /// The source moved into the target's slot
    Moved { source: NoteId, target: NoteId },
    /// Nothing to do: no session, no target, self-drop, or a note vanished
    Unchanged,
}

/// Owns the drag session, tracks the hovered row and applies the move on
/// release. `commit` is the only path that changes persisted order.
#[derive(Debug, Clone, Default)]
pub struct ReorderEngine {
    session: Option<DragSession>,
}

impl ReorderEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    /// Open a session for `source`. Replaces any previous session.
    pub fn begin(&mut self, source: NoteId, start: Point) {
        log::debug!("event=drag_begin source={} y={}", source, start.y);
        self.session = Some(DragSession {
            source,
            pointer_start_y: start.y,
            current_pointer: start,
            preview_target: None,
            active: false,
        });
    }

    /// Mark the session as a confirmed drag
    pub fn activate(&mut self) {
        if let Some(session) = &mut self.session {
            session.active = true;
            log::debug!("event=drag_active source={}", session.source);
        }
    }

    pub fn is_active(&self) -> bool {
        self.session.as_ref().is_some_and(|s| s.active)
    }

    /// The note being dragged, once the drag is confirmed
    pub fn dragged_note(&self) -> Option<NoteId> {
        self.session
            .as_ref()
            .filter(|s| s.active)
            .map(|s| s.source)
    }

    pub fn preview_target(&self) -> Option<NoteId> {
        self.session.as_ref().and_then(|s| s.preview_target)
    }

    /// Re-resolve the hovered row for `position`. A miss leaves the target
    /// as it was; hovering the source row clears it. Ignored until the
    /// session is active.
    pub fn update_target(&mut self, position: Point, locator: &dyn RowLocator) -> Option<NoteId> {
        let session = self.session.as_mut().filter(|s| s.active)?;
        session.current_pointer = position;
        match locator.locate_row_at(position) {
            Some(id) if id == session.source => session.preview_target = None,
            Some(id) => session.preview_target = Some(id),
            None => {}
        }
        session.preview_target
    }

    /// Close the session and, if it has a target other than the source,
    /// move the source into the target's slot.
    pub fn commit(&mut self, store: &mut NoteStore) -> CommitOutcome {
        let Some(session) = self.session.take() else {
            return CommitOutcome::Unchanged;
        };
        let Some(target) = session.preview_target else {
            log::debug!("event=drag_commit source={} status=no_target", session.source);
            return CommitOutcome::Unchanged;
        };
        if store.move_to_slot(session.source, target) {
            CommitOutcome::Moved {
                source: session.source,
                target,
            }
        } else {
            log::debug!(
                "event=drag_commit source={} target={} status=noop",
                session.source,
                target
            );
            CommitOutcome::Unchanged
        }
    }

    /// Drop the session without touching the store. Safe to call repeatedly.
    pub fn cancel(&mut self) {
        if let Some(session) = self.session.take() {
            log::debug!("event=drag_cancel source={}", session.source);
        }
    }

    /// The display list as it would be if the current target were committed
    pub fn preview_order(&self, store: &NoteStore) -> Vec<Note> {
        let mut notes = store.notes().to_vec();
        if let Some(session) = &self.session
            && let Some(target) = session.preview_target
        {
            note_ops::relocate(&mut notes, session.source, target);
        }
        note::display_order(&notes).into_iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::storage::MemoryStorage;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    /// Rows of fixed height stacked from y = 0 in display order
    struct Rows {
        height: f32,
        ids: Vec<NoteId>,
    }

    impl Rows {
        fn of(store: &NoteStore) -> Self {
            Rows {
                height: 20.0,
                ids: store.display().iter().map(|n| n.id).collect(),
            }
        }

        fn center(&self, id: NoteId) -> Point {
            let idx = self.ids.iter().position(|i| *i == id).unwrap();
            Point::new(5.0, idx as f32 * self.height + self.height / 2.0)
        }
    }

    impl RowLocator for Rows {
        fn locate_row_at(&self, position: Point) -> Option<NoteId> {
            if position.y < 0.0 {
                return None;
            }
            self.ids.get((position.y / self.height) as usize).copied()
        }
    }

    fn store_abc() -> (NoteStore, HashMap<&'static str, NoteId>) {
        let mut store = NoteStore::load(Box::new(MemoryStorage::new()), false);
        let mut ids = HashMap::new();
        for text in ["A", "B", "C"] {
            ids.insert(text, store.add_note(text).unwrap());
        }
        (store, ids)
    }

    fn snapshot(store: &NoteStore) -> Vec<(String, u32, bool)> {
        store
            .display()
            .iter()
            .map(|n| (n.text.clone(), n.order, n.completed))
            .collect()
    }

    #[test]
    fn test_drag_a_onto_b_with_completed_c() {
        let (mut store, ids) = store_abc();
        store.toggle(ids["C"]);
        let rows = Rows::of(&store);
        let mut engine = ReorderEngine::new();

        engine.begin(ids["A"], rows.center(ids["A"]));
        engine.activate();
        assert_eq!(
            engine.update_target(rows.center(ids["B"]), &rows),
            Some(ids["B"])
        );
        assert_eq!(
            engine.commit(&mut store),
            CommitOutcome::Moved {
                source: ids["A"],
                target: ids["B"]
            }
        );
        assert_eq!(
            snapshot(&store),
            vec![
                ("B".to_string(), 0, false),
                ("A".to_string(), 1, false),
                ("C".to_string(), 2, true),
            ]
        );
        assert!(engine.session().is_none());
    }

    #[test]
    fn test_commit_without_target_is_noop() {
        let (mut store, ids) = store_abc();
        let before = snapshot(&store);
        let rows = Rows::of(&store);
        let mut engine = ReorderEngine::new();
        engine.begin(ids["B"], rows.center(ids["B"]));
        engine.activate();
        engine.update_target(rows.center(ids["B"]), &rows);
        assert_eq!(engine.commit(&mut store), CommitOutcome::Unchanged);
        assert_eq!(snapshot(&store), before);
    }

    #[test]
    fn test_hovering_back_over_source_clears_target() {
        let (mut store, ids) = store_abc();
        let before = snapshot(&store);
        let rows = Rows::of(&store);
        let mut engine = ReorderEngine::new();
        engine.begin(ids["A"], rows.center(ids["A"]));
        engine.activate();
        engine.update_target(rows.center(ids["C"]), &rows);
        assert_eq!(engine.preview_target(), Some(ids["C"]));
        engine.update_target(rows.center(ids["A"]), &rows);
        assert_eq!(engine.preview_target(), None);
        assert_eq!(engine.commit(&mut store), CommitOutcome::Unchanged);
        assert_eq!(snapshot(&store), before);
    }

    #[test]
    fn test_miss_keeps_previous_target() {
        let (store, ids) = store_abc();
        let rows = Rows::of(&store);
        let mut engine = ReorderEngine::new();
        engine.begin(ids["A"], rows.center(ids["A"]));
        engine.activate();
        engine.update_target(rows.center(ids["B"]), &rows);
        assert_eq!(
            engine.update_target(Point::new(5.0, 500.0), &rows),
            Some(ids["B"])
        );
        assert_eq!(
            engine.update_target(Point::new(5.0, -4.0), &rows),
            Some(ids["B"])
        );
        assert_eq!(engine.session().unwrap().current_pointer, Point::new(5.0, -4.0));
    }

    #[test]
    fn test_update_ignored_until_active() {
        let (store, ids) = store_abc();
        let rows = Rows::of(&store);
        let mut engine = ReorderEngine::new();
        engine.begin(ids["A"], rows.center(ids["A"]));
        assert_eq!(engine.update_target(rows.center(ids["C"]), &rows), None);
        assert_eq!(engine.dragged_note(), None);
        engine.activate();
        assert_eq!(engine.dragged_note(), Some(ids["A"]));
    }

    #[test]
    fn test_preview_order_matches_committed_order() {
        let (mut store, ids) = store_abc();
        let rows = Rows::of(&store);
        let mut engine = ReorderEngine::new();
        engine.begin(ids["C"], rows.center(ids["C"]));
        engine.activate();
        engine.update_target(rows.center(ids["A"]), &rows);

        let preview: Vec<String> = engine
            .preview_order(&store)
            .into_iter()
            .map(|n| n.text)
            .collect();
        assert_eq!(preview, vec!["C", "A", "B"]);
        // Store untouched until release
        assert_eq!(store.notes()[0].text, "A");

        engine.commit(&mut store);
        let committed: Vec<String> = store.display().iter().map(|n| n.text.clone()).collect();
        assert_eq!(committed, preview);
    }

    #[test]
    fn test_source_deleted_mid_drag_commits_as_noop() {
        let (mut store, ids) = store_abc();
        let rows = Rows::of(&store);
        let mut engine = ReorderEngine::new();
        engine.begin(ids["A"], rows.center(ids["A"]));
        engine.activate();
        engine.update_target(rows.center(ids["C"]), &rows);
        store.delete(ids["A"]);
        assert_eq!(engine.commit(&mut store), CommitOutcome::Unchanged);
        let texts: Vec<&str> = store.notes().iter().map(|n| n.text.as_str()).collect();
        assert_eq!(texts, vec!["B", "C"]);
    }

    #[test]
    fn test_cancel_is_idempotent() {
        let (mut store, ids) = store_abc();
        let rows = Rows::of(&store);
        let before = snapshot(&store);
        let mut engine = ReorderEngine::new();
        engine.begin(ids["A"], rows.center(ids["A"]));
        engine.activate();
        engine.update_target(rows.center(ids["C"]), &rows);
        engine.cancel();
        engine.cancel();
        assert!(engine.session().is_none());
        assert_eq!(engine.commit(&mut store), CommitOutcome::Unchanged);
        assert_eq!(snapshot(&store), before);
    }

    #[test]
    fn test_every_drop_is_a_single_relocation() {
        let texts = ["A", "B", "C", "D", "E"];
        for from in 0..texts.len() {
            for to in 0..texts.len() {
                let mut store = NoteStore::load(Box::new(MemoryStorage::new()), false);
                let ids: Vec<NoteId> = texts.iter().map(|t| store.add_note(t).unwrap()).collect();
                let rows = Rows::of(&store);
                let mut engine = ReorderEngine::new();
                engine.begin(ids[from], rows.center(ids[from]));
                engine.activate();
                engine.update_target(rows.center(ids[to]), &rows);
                engine.commit(&mut store);

                let mut expected: Vec<&str> = texts.to_vec();
                let moved = expected.remove(from);
                expected.insert(to, moved);
                let actual: Vec<&str> = store.notes().iter().map(|n| n.text.as_str()).collect();
                assert_eq!(actual, expected, "drag {} onto {}", from, to);

                let orders: Vec<u32> = store.notes().iter().map(|n| n.order).collect();
                assert_eq!(orders, (0..texts.len() as u32).collect::<Vec<_>>());
            }
        }
    }
}
