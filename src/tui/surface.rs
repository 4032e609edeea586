use ratatui::layout::{Position, Rect};

use crate::drag::{
    ContainerKind, ContainerMetrics, ControlKind, Point, PressTarget, RowLocator, ScrollHost,
};
use crate::model::{NoteId, UiConfig};

/// Columns of the toggle control, relative to the list area
const TOGGLE_COLS: std::ops::RangeInclusive<u16> = 1..=3;
/// Width of the delete hit zone at the right edge of a row
const DELETE_COLS: u16 = 3;

/// Size of one terminal cell in view pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellSize {
    pub width: f32,
    pub height: f32,
}

impl CellSize {
    pub fn from_config(ui: &UiConfig) -> Self {
        CellSize {
            width: ui.cell_width.max(1.0),
            height: ui.cell_height.max(1.0),
        }
    }

    /// Pixel point at the center of a terminal cell
    pub fn center_of(&self, col: u16, row: u16) -> Point {
        Point::new(
            col as f32 * self.width + self.width / 2.0,
            row as f32 * self.height + self.height / 2.0,
        )
    }

    /// Terminal cell containing a pixel point
    pub fn cell_at(&self, point: Point) -> Position {
        Position::new(
            (point.x / self.width).floor().max(0.0) as u16,
            (point.y / self.height).floor().max(0.0) as u16,
        )
    }
}

/// The rendered note list as seen by the drag machinery.
///
/// Rows are hit-tested against the committed display order, so while a
/// preview is shown the dragged note sits exactly in the slot under the
/// pointer. Scrolling is tracked in pixels; rendering and hit-testing both
/// snap to whole rows.
#[derive(Debug, Clone)]
pub struct ListSurface {
    cell: CellSize,
    screen: Rect,
    header: Rect,
    list: Rect,
    ids: Vec<NoteId>,
    scroll_offset: f32,
}

impl ListSurface {
    pub fn new(cell: CellSize) -> Self {
        ListSurface {
            cell,
            screen: Rect::default(),
            header: Rect::default(),
            list: Rect::default(),
            ids: Vec::new(),
            scroll_offset: 0.0,
        }
    }

    pub fn cell(&self) -> CellSize {
        self.cell
    }

    /// Record where the last frame placed the header and list
    pub fn set_layout(&mut self, screen: Rect, header: Rect, list: Rect) {
        self.screen = screen;
        self.header = header;
        self.list = list;
        self.clamp_offset();
    }

    /// Replace the committed row order
    pub fn set_rows(&mut self, ids: Vec<NoteId>) {
        self.ids = ids;
        self.clamp_offset();
    }

    pub fn list_area(&self) -> Rect {
        self.list
    }

    pub fn header_area(&self) -> Rect {
        self.header
    }

    pub fn scroll_offset(&self) -> f32 {
        self.scroll_offset
    }

    /// Index of the first row drawn at the top of the list area
    pub fn first_visible(&self) -> usize {
        (self.scroll_offset / self.cell.height).floor() as usize
    }

    pub fn visible_rows(&self) -> usize {
        self.list.height as usize
    }

    /// Scroll by whole rows (wheel input)
    pub fn scroll_by_rows(&mut self, rows: i32) {
        self.scroll_offset = (self.snapped_offset() + rows as f32 * self.cell.height)
            .clamp(0.0, self.max_offset());
    }

    /// Scroll the minimum amount that brings row `idx` into view
    pub fn ensure_visible(&mut self, idx: usize) {
        let first = self.first_visible();
        let rows = self.visible_rows().max(1);
        let new_first = if idx < first {
            idx
        } else if idx >= first + rows {
            idx + 1 - rows
        } else {
            return;
        };
        self.scroll_offset = (new_first as f32 * self.cell.height).clamp(0.0, self.max_offset());
    }

    /// Display index of the row under a point, if any
    pub fn row_index_at(&self, point: Point) -> Option<usize> {
        let cell = self.cell.cell_at(point);
        if !self.list.contains(cell) {
            return None;
        }
        let idx = (cell.y - self.list.y) as usize + self.first_visible();
        (idx < self.ids.len()).then_some(idx)
    }

    pub fn in_header(&self, point: Point) -> bool {
        self.header.contains(self.cell.cell_at(point))
    }

    /// Classify what a press at `point` landed on
    pub fn press_target(&self, point: Point) -> PressTarget {
        let Some(idx) = self.row_index_at(point) else {
            return PressTarget::Empty;
        };
        let id = self.ids[idx];
        let col = self.cell.cell_at(point).x - self.list.x;
        if TOGGLE_COLS.contains(&col) {
            PressTarget::Control(ControlKind::Toggle, id)
        } else if col + DELETE_COLS >= self.list.width {
            PressTarget::Control(ControlKind::Delete, id)
        } else {
            PressTarget::Row(id)
        }
    }

    fn snapped_offset(&self) -> f32 {
        self.first_visible() as f32 * self.cell.height
    }

    fn content_height(&self) -> f32 {
        self.ids.len() as f32 * self.cell.height
    }

    fn max_offset(&self) -> f32 {
        (self.content_height() - self.visible_rows() as f32 * self.cell.height).max(0.0)
    }

    fn clamp_offset(&mut self) {
        self.scroll_offset = self.scroll_offset.clamp(0.0, self.max_offset());
    }
}

impl RowLocator for ListSurface {
    fn locate_row_at(&self, position: Point) -> Option<NoteId> {
        self.row_index_at(position).map(|idx| self.ids[idx])
    }
}

impl ScrollHost for ListSurface {
    fn metrics(&self, kind: ContainerKind) -> Option<ContainerMetrics> {
        match kind {
            ContainerKind::Inner => (self.list.height > 0).then(|| ContainerMetrics {
                viewport_top: self.list.y as f32 * self.cell.height,
                viewport_height: self.list.height as f32 * self.cell.height,
                content_height: self.content_height(),
                scroll_offset: self.scroll_offset,
            }),
            // The terminal page itself never scrolls
            ContainerKind::Page => {
                let height = self.screen.height as f32 * self.cell.height;
                Some(ContainerMetrics {
                    viewport_top: 0.0,
                    viewport_height: height,
                    content_height: height,
                    scroll_offset: 0.0,
                })
            }
        }
    }

    fn set_scroll_offset(&mut self, kind: ContainerKind, offset: f32) {
        if kind == ContainerKind::Inner {
            self.scroll_offset = offset.clamp(0.0, self.max_offset());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn surface(rows: u64, list_height: u16) -> ListSurface {
        let mut s = ListSurface::new(CellSize {
            width: 8.0,
            height: 16.0,
        });
        s.set_rows((1..=rows).map(NoteId).collect());
        s.set_layout(
            Rect::new(0, 0, 40, list_height + 4),
            Rect::new(0, 0, 40, 2),
            Rect::new(0, 2, 40, list_height),
        );
        s
    }

    #[test]
    fn test_cell_center_round_trips() {
        let cell = CellSize {
            width: 8.0,
            height: 16.0,
        };
        let p = cell.center_of(5, 3);
        assert_eq!(p, Point::new(44.0, 56.0));
        assert_eq!(cell.cell_at(p), Position::new(5, 3));
    }

    #[test]
    fn test_locate_row_respects_scroll() {
        let mut s = surface(10, 4);
        let cell = s.cell();
        assert_eq!(s.locate_row_at(cell.center_of(10, 2)), Some(NoteId(1)));
        assert_eq!(s.locate_row_at(cell.center_of(10, 5)), Some(NoteId(4)));
        // Header and footer rows are misses
        assert_eq!(s.locate_row_at(cell.center_of(10, 1)), None);
        assert_eq!(s.locate_row_at(cell.center_of(10, 6)), None);

        // Partial scroll snaps down to whole rows
        s.set_scroll_offset(ContainerKind::Inner, 40.0);
        assert_eq!(s.first_visible(), 2);
        assert_eq!(s.locate_row_at(cell.center_of(10, 2)), Some(NoteId(3)));
    }

    #[test]
    fn test_rows_past_the_end_are_misses() {
        let s = surface(2, 5);
        let cell = s.cell();
        assert_eq!(s.locate_row_at(cell.center_of(10, 3)), Some(NoteId(2)));
        assert_eq!(s.locate_row_at(cell.center_of(10, 4)), None);
    }

    #[test]
    fn test_press_target_controls() {
        let s = surface(3, 4);
        let cell = s.cell();
        assert_eq!(
            s.press_target(cell.center_of(2, 2)),
            PressTarget::Control(ControlKind::Toggle, NoteId(1))
        );
        assert_eq!(
            s.press_target(cell.center_of(38, 3)),
            PressTarget::Control(ControlKind::Delete, NoteId(2))
        );
        assert_eq!(s.press_target(cell.center_of(10, 4)), PressTarget::Row(NoteId(3)));
        assert_eq!(s.press_target(cell.center_of(10, 0)), PressTarget::Empty);
    }

    #[test]
    fn test_inner_metrics_and_clamping() {
        let mut s = surface(10, 4);
        let m = s.metrics(ContainerKind::Inner).unwrap();
        assert_eq!(m.viewport_top, 32.0);
        assert_eq!(m.viewport_height, 64.0);
        assert_eq!(m.content_height, 160.0);
        assert!(m.overflows());

        s.set_scroll_offset(ContainerKind::Inner, 1000.0);
        assert_eq!(s.scroll_offset(), 96.0);
        // Fewer rows shrink the offset
        s.set_rows(vec![NoteId(1), NoteId(2)]);
        assert_eq!(s.scroll_offset(), 0.0);

        let page = s.metrics(ContainerKind::Page).unwrap();
        assert!(!page.overflows());
    }

    #[test]
    fn test_ensure_visible() {
        let mut s = surface(10, 4);
        s.ensure_visible(6);
        assert_eq!(s.first_visible(), 3);
        s.ensure_visible(4);
        assert_eq!(s.first_visible(), 3);
        s.ensure_visible(0);
        assert_eq!(s.first_visible(), 0);
        s.scroll_by_rows(3);
        assert_eq!(s.first_visible(), 3);
        s.scroll_by_rows(-10);
        assert_eq!(s.first_visible(), 0);
    }
}
