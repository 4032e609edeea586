use crate::model::note::NoteId;

/// A position in view space (pixels, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Point { x, y }
    }
}

/// Which input device produced an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Mouse,
    Touch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    Down,
    Move,
    Up,
    Cancel,
}

/// Sub-controls of a note row that consume presses themselves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlKind {
    Toggle,
    Delete,
}

/// What lies under the initial contact point of a press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressTarget {
    /// The body of a note row
    Row(NoteId),
    /// A control inside a note row
    Control(ControlKind, NoteId),
    /// Anything else (gaps, header, footer)
    Empty,
}

/// A raw pointer event as forwarded by the view layer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub phase: PointerPhase,
    pub position: Point,
    /// Only meaningful for `Down`
    pub target: PressTarget,
}

impl PointerEvent {
    pub fn down(kind: PointerKind, position: Point, target: PressTarget) -> Self {
        PointerEvent {
            kind,
            phase: PointerPhase::Down,
            position,
            target,
        }
    }

    pub fn moved(kind: PointerKind, position: Point) -> Self {
        Self::with_phase(kind, PointerPhase::Move, position)
    }

    pub fn up(kind: PointerKind, position: Point) -> Self {
        Self::with_phase(kind, PointerPhase::Up, position)
    }

    pub fn cancel(kind: PointerKind, position: Point) -> Self {
        Self::with_phase(kind, PointerPhase::Cancel, position)
    }

    fn with_phase(kind: PointerKind, phase: PointerPhase, position: Point) -> Self {
        PointerEvent {
            kind,
            phase,
            position,
            target: PressTarget::Empty,
        }
    }
}

/// Hit-testing capability provided by the view: which rendered note row,
/// if any, contains a point.
pub trait RowLocator {
    fn locate_row_at(&self, position: Point) -> Option<NoteId>;
}
