use std::time::Instant;

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

use crate::drag::{Point, PointerEvent};
use crate::tui::app::{App, Mode};

use super::edit::{begin_title_edit, commit_title_edit};

/// Rows scrolled per wheel notch
const WHEEL_ROWS: i32 = 3;

/// Map terminal mouse input onto pointer events
pub fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    let point = app.surface.cell().center_of(mouse.column, mouse.row);
    let kind = app.pointer_kind;
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => press(app, point, Instant::now()),
        MouseEventKind::Drag(MouseButton::Left) => {
            app.dispatch(PointerEvent::moved(kind, point));
        }
        MouseEventKind::Up(MouseButton::Left) => {
            app.dispatch(PointerEvent::up(kind, point));
        }
        MouseEventKind::ScrollUp => wheel(app, -WHEEL_ROWS),
        MouseEventKind::ScrollDown => wheel(app, WHEEL_ROWS),
        _ => {}
    }
}

fn press(app: &mut App, point: Point, at: Instant) {
    let on_header = app.surface.in_header(point);
    if app.mode == Mode::EditTitle {
        if on_header {
            return;
        }
        // Clicking away saves the title
        commit_title_edit(app);
    }
    if on_header {
        // Any drag still tracked here lost its release
        app.cancel_gesture();
        if app.register_header_click(at) {
            begin_title_edit(app);
        }
        return;
    }

    app.status = None;
    if let Some(idx) = app.surface.row_index_at(point) {
        app.cursor = idx;
    }
    let target = app.surface.press_target(point);
    app.dispatch(PointerEvent::down(app.pointer_kind, point, target));
}

fn wheel(app: &mut App, rows: i32) {
    // The drag owns scrolling while it runs
    if app.board.is_dragging() || app.board.suppresses_native_scroll() {
        return;
    }
    app.surface.scroll_by_rows(rows);
}
