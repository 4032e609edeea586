use crate::model::note::NoteId;

use super::pointer::{Point, PointerEvent, PointerKind, PointerPhase, PressTarget};

/// Classified intent produced from a raw pointer event
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gesture {
    /// Event carries no intent (untracked pointer, sub-threshold jitter)
    None,
    /// A press landed on a note row; could still become a tap or a drag
    Press { note: NoteId, position: Point },
    /// The press has been confirmed as a drag
    DragStart { note: NoteId, position: Point },
    DragMove { position: Point },
    /// Released before the gesture became a drag
    Tap { note: NoteId },
    /// Released after dragging
    Drop { note: NoteId, position: Point },
    /// The tracked pointer was cancelled or lost
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum State {
    Idle,
    Pending {
        kind: PointerKind,
        note: NoteId,
        start: Point,
    },
    Dragging {
        kind: PointerKind,
        note: NoteId,
    },
}

/// Turns a pointer event stream into tap/drag intents.
///
/// Mouse input is trusted as already classified: the first motion with the
/// button held is a drag. Touch input has to travel strictly more than
/// `threshold` vertically before it becomes a drag; until then native
/// scrolling stays enabled.
#[derive(Debug, Clone)]
pub struct GestureClassifier {
    threshold: f32,
    state: State,
}

impl GestureClassifier {
    pub fn new(threshold: f32) -> Self {
        GestureClassifier {
            threshold: threshold.max(0.0),
            state: State::Idle,
        }
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Whether a press is currently being tracked (pending or dragging)
    pub fn is_tracking(&self) -> bool {
        self.state != State::Idle
    }

    /// Device of the tracked press, if any
    pub fn tracked_kind(&self) -> Option<PointerKind> {
        match self.state {
            State::Idle => None,
            State::Pending { kind, .. } | State::Dragging { kind, .. } => Some(kind),
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, State::Dragging { .. })
    }

    /// True once a touch gesture is a confirmed drag: the platform's
    /// default touch scrolling must be suppressed until it ends.
    pub fn suppresses_native_scroll(&self) -> bool {
        matches!(
            self.state,
            State::Dragging {
                kind: PointerKind::Touch,
                ..
            }
        )
    }

    /// Forget any tracked gesture
    pub fn reset(&mut self) {
        self.state = State::Idle;
    }

    pub fn handle(&mut self, event: &PointerEvent) -> Gesture {
        match event.phase {
            PointerPhase::Down => self.on_down(event),
            PointerPhase::Move => self.on_move(event),
            PointerPhase::Up => self.on_up(event),
            PointerPhase::Cancel => self.on_cancel(event),
        }
    }

    fn on_down(&mut self, event: &PointerEvent) -> Gesture {
        if self.is_tracking() {
            // A second contact while one is tracked carries no intent
            return Gesture::None;
        }
        match event.target {
            PressTarget::Row(note) => {
                self.state = State::Pending {
                    kind: event.kind,
                    note,
                    start: event.position,
                };
                Gesture::Press {
                    note,
                    position: event.position,
                }
            }
            PressTarget::Control(..) | PressTarget::Empty => Gesture::None,
        }
    }

    fn on_move(&mut self, event: &PointerEvent) -> Gesture {
        match self.state {
            State::Pending { kind, note, start } if kind == event.kind => {
                if self.passes_threshold(kind, start, event.position) {
                    self.state = State::Dragging { kind, note };
                    Gesture::DragStart {
                        note,
                        position: event.position,
                    }
                } else {
                    Gesture::None
                }
            }
            State::Dragging { kind, .. } if kind == event.kind => Gesture::DragMove {
                position: event.position,
            },
            _ => Gesture::None,
        }
    }

    fn on_up(&mut self, event: &PointerEvent) -> Gesture {
        match self.state {
            State::Pending { kind, note, .. } if kind == event.kind => {
                self.state = State::Idle;
                Gesture::Tap { note }
            }
            State::Dragging { kind, note } if kind == event.kind => {
                self.state = State::Idle;
                Gesture::Drop {
                    note,
                    position: event.position,
                }
            }
            _ => Gesture::None,
        }
    }

    fn on_cancel(&mut self, event: &PointerEvent) -> Gesture {
        match self.state {
            State::Pending { kind, .. } | State::Dragging { kind, .. } if kind == event.kind => {
                self.state = State::Idle;
                Gesture::Cancel
            }
            _ => Gesture::None,
        }
    }

    fn passes_threshold(&self, kind: PointerKind, start: Point, current: Point) -> bool {
        match kind {
            PointerKind::Mouse => true,
            PointerKind::Touch => (current.y - start.y).abs() > self.threshold,
        }
    }
}
