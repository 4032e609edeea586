use crate::model::config::{AutoScrollConfig, Config, DragConfig};
use crate::model::note::{Note, NoteId, NoteStats};
use crate::ops::note_ops::NoteStore;

use super::autoscroll::{AutoScroller, ScrollHost, TickOutcome};
use super::gesture::{Gesture, GestureClassifier};
use super::pointer::{ControlKind, Point, PointerEvent, PointerPhase, PressTarget, RowLocator};
use super::reorder::{CommitOutcome, ReorderEngine};
use super::tick::{TickHandle, TickScheduler};

/// What a dispatched pointer event did
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DispatchOutcome {
    Ignored,
    /// A press on a completion toggle
    Toggled(NoteId),
    /// A press on a delete control
    Deleted(NoteId),
    /// A press on a row; not yet a drag
    Pressed(NoteId),
    DragStarted(NoteId),
    /// Pointer moved during a drag; carries the current preview target
    TargetChanged(Option<NoteId>),
    /// Released without dragging
    Tapped(NoteId),
    Committed(CommitOutcome),
    Cancelled,
}

/// Application state: the note store plus the drag machinery.
///
/// Everything mutates through the named operations here; the view only
/// forwards events and ticks and reads the output accessors.
pub struct Board {
    store: NoteStore,
    classifier: GestureClassifier,
    engine: ReorderEngine,
    scroller: AutoScroller,
    latest_pointer: Option<Point>,
}

impl Board {
    pub fn new(store: NoteStore, drag: &DragConfig, autoscroll: &AutoScrollConfig) -> Self {
        Board {
            store,
            classifier: GestureClassifier::new(drag.threshold),
            engine: ReorderEngine::new(),
            scroller: AutoScroller::new(autoscroll.clone()),
            latest_pointer: None,
        }
    }

    pub fn from_config(store: NoteStore, config: &Config) -> Self {
        Self::new(store, &config.drag, &config.autoscroll)
    }

    // --- note operations ---

    pub fn add_note(&mut self, text: &str) -> Option<NoteId> {
        self.store.add_note(text)
    }

    pub fn toggle(&mut self, id: NoteId) -> bool {
        self.store.toggle(id)
    }

    pub fn delete(&mut self, id: NoteId) -> bool {
        self.store.delete(id)
    }

    pub fn rename(&mut self, title: &str) -> bool {
        self.store.rename(title)
    }

    // --- output surface ---

    pub fn store(&self) -> &NoteStore {
        &self.store
    }

    pub fn title(&self) -> &str {
        self.store.title()
    }

    pub fn stats(&self) -> NoteStats {
        self.store.stats()
    }

    /// Notes in display order, reflecting the preview while dragging
    pub fn display_notes(&self) -> Vec<Note> {
        self.engine.preview_order(&self.store)
    }

    pub fn dragged_note(&self) -> Option<NoteId> {
        self.engine.dragged_note()
    }

    pub fn preview_target(&self) -> Option<NoteId> {
        self.engine.preview_target()
    }

    pub fn is_dragging(&self) -> bool {
        self.engine.is_active()
    }

    /// Whether the view must suppress native touch scrolling right now
    pub fn suppresses_native_scroll(&self) -> bool {
        self.classifier.suppresses_native_scroll()
    }

    pub fn is_autoscrolling(&self) -> bool {
        self.scroller.is_running()
    }

    pub fn latest_pointer(&self) -> Option<Point> {
        self.latest_pointer
    }

    pub fn take_persist_error(&mut self) -> Option<String> {
        self.store.take_persist_error()
    }

    // --- input ---

    /// Route one pointer event through the classifier and the engine.
    pub fn dispatch<V>(
        &mut self,
        event: PointerEvent,
        view: &mut V,
        scheduler: &mut dyn TickScheduler,
    ) -> DispatchOutcome
    where
        V: RowLocator + ScrollHost,
    {
        // A fresh press from the tracked device means its release was lost
        if event.phase == PointerPhase::Down
            && self.classifier.tracked_kind() == Some(event.kind)
        {
            log::info!("event=pointer_lost kind={:?}", event.kind);
            self.teardown(scheduler);
        }

        if event.phase == PointerPhase::Down
            && let PressTarget::Control(control, id) = event.target
        {
            return self.press_control(control, id);
        }

        match self.classifier.handle(&event) {
            Gesture::None => DispatchOutcome::Ignored,
            Gesture::Press { note, position } => {
                self.latest_pointer = Some(position);
                self.engine.begin(note, position);
                DispatchOutcome::Pressed(note)
            }
            Gesture::DragStart { note, position } => {
                self.latest_pointer = Some(position);
                self.engine.activate();
                self.engine.update_target(position, &*view);
                self.scroller.start(&*view, scheduler);
                log::info!("event=drag_start source={}", note);
                DispatchOutcome::DragStarted(note)
            }
            Gesture::DragMove { position } => {
                self.latest_pointer = Some(position);
                DispatchOutcome::TargetChanged(self.engine.update_target(position, &*view))
            }
            Gesture::Tap { note } => {
                self.end_session(scheduler);
                DispatchOutcome::Tapped(note)
            }
            Gesture::Drop { position, .. } => {
                self.engine.update_target(position, &*view);
                let outcome = self.engine.commit(&mut self.store);
                log::info!("event=drag_drop outcome={:?}", outcome);
                self.end_session(scheduler);
                DispatchOutcome::Committed(outcome)
            }
            Gesture::Cancel => {
                self.teardown(scheduler);
                DispatchOutcome::Cancelled
            }
        }
    }

    /// Run an auto-scroll tick, then re-resolve the target since rows have
    /// moved under a stationary pointer.
    pub fn on_tick<V>(
        &mut self,
        handle: TickHandle,
        view: &mut V,
        scheduler: &mut dyn TickScheduler,
    ) -> TickOutcome
    where
        V: RowLocator + ScrollHost,
    {
        let outcome = self
            .scroller
            .on_tick(handle, self.latest_pointer, &mut *view, scheduler);
        if let TickOutcome::Scrolled { .. } = outcome
            && let Some(pointer) = self.latest_pointer
        {
            self.engine.update_target(pointer, &*view);
        }
        outcome
    }

    /// End any gesture without changing the list: pointer cancel, lost
    /// capture, or the view going away. Idempotent.
    pub fn teardown(&mut self, scheduler: &mut dyn TickScheduler) {
        if self.classifier.is_tracking() || self.engine.session().is_some() {
            log::info!("event=drag_teardown");
        }
        self.classifier.reset();
        self.engine.cancel();
        self.end_session(scheduler);
    }

    fn end_session(&mut self, scheduler: &mut dyn TickScheduler) {
        self.engine.cancel();
        self.scroller.stop(scheduler);
        self.latest_pointer = None;
    }

    fn press_control(&mut self, control: ControlKind, id: NoteId) -> DispatchOutcome {
        if self.classifier.is_tracking() {
            return DispatchOutcome::Ignored;
        }
        match control {
            ControlKind::Toggle if self.store.toggle(id) => DispatchOutcome::Toggled(id),
            ControlKind::Delete if self.store.delete(id) => DispatchOutcome::Deleted(id),
            _ => DispatchOutcome::Ignored,
        }
    }
}
