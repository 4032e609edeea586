pub mod autoscroll;
pub mod board;
pub mod gesture;
pub mod pointer;
pub mod reorder;
pub mod tick;

pub use autoscroll::{AutoScroller, ContainerKind, ContainerMetrics, ScrollHost, TickOutcome};
pub use board::{Board, DispatchOutcome};
pub use gesture::{Gesture, GestureClassifier};
pub use pointer::{ControlKind, Point, PointerEvent, PointerKind, PointerPhase, PressTarget, RowLocator};
pub use reorder::{CommitOutcome, DragSession, ReorderEngine};
pub use tick::{TickHandle, TickQueue, TickScheduler};
