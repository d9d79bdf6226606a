//! Input normalization: keyboard/tap events, click targets and hit-testing.

use ratzilla::ratatui::layout::Rect;

/// Input events, normalized from keyboard, mouse and touch sources.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// A key press from keyboard.
    Key(char),
    /// A tap on a registered target, identified by its action ID
    /// (see `meat::actions`).
    Click(u16),
}

/// A region on screen that triggers an action when tapped.
#[derive(Debug, Clone)]
pub struct ClickTarget {
    /// Hit region in terminal cell coordinates.
    pub rect: Rect,
    pub action_id: u16,
}

/// Shared state between the render loop and the mouse handler.
/// Targets are rebuilt on every frame.
pub struct ClickState {
    pub targets: Vec<ClickTarget>,
    pub terminal_cols: u16,
    pub terminal_rows: u16,
}

impl ClickState {
    pub fn new() -> Self {
        Self {
            targets: Vec::new(),
            terminal_cols: 0,
            terminal_rows: 0,
        }
    }

    pub fn clear_targets(&mut self) {
        self.targets.clear();
    }

    pub fn add_click_target(&mut self, rect: Rect, action_id: u16) {
        self.targets.push(ClickTarget { rect, action_id });
    }

    /// Register a full-width target on `row`, ignored if outside `area`.
    pub fn add_row_target(&mut self, area: Rect, row: u16, action_id: u16) {
        if row >= area.y && row < area.y + area.height {
            self.add_click_target(Rect::new(area.x, row, area.width, 1), action_id);
        }
    }

    /// Action under the cell, if any. Later targets sit on top of earlier ones.
    pub fn hit_test(&self, col: u16, row: u16) -> Option<u16> {
        self.targets.iter().rev().find_map(|t| {
            let r = &t.rect;
            let inside = col >= r.x && col < r.x + r.width && row >= r.y && row < r.y + r.height;
            inside.then_some(t.action_id)
        })
    }
}

/// Narrow screens (phones) stack panels vertically and hide the log.
pub fn is_narrow_layout(width: u16) -> bool {
    width < 60
}

/// Convert a pixel position relative to the grid container into a cell.
///
/// `grid_width`/`grid_height` are the container's pixel size. Returns `None`
/// outside the grid or before the terminal has been laid out.
pub fn pixel_to_cell(
    click_x: f64,
    click_y: f64,
    grid_width: f64,
    grid_height: f64,
    terminal_cols: u16,
    terminal_rows: u16,
) -> Option<(u16, u16)> {
    let col = pixel_to_index(click_x, grid_width, terminal_cols)?;
    let row = pixel_to_index(click_y, grid_height, terminal_rows)?;
    Some((col, row))
}

fn pixel_to_index(pos: f64, extent: f64, cells: u16) -> Option<u16> {
    if extent <= 0.0 || cells == 0 || pos < 0.0 {
        return None;
    }
    let idx = (pos / (extent / cells as f64)) as u16;
    (idx < cells).then_some(idx)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_test_rows() {
        let mut cs = ClickState::new();
        cs.add_click_target(Rect::new(0, 3, 40, 1), 1);
        cs.add_click_target(Rect::new(0, 4, 40, 2), 2);

        assert_eq!(cs.hit_test(0, 2), None);
        assert_eq!(cs.hit_test(0, 3), Some(1));
        assert_eq!(cs.hit_test(39, 4), Some(2));
        assert_eq!(cs.hit_test(10, 5), Some(2));
        assert_eq!(cs.hit_test(40, 4), None);
        assert_eq!(cs.hit_test(0, 6), None);
    }

    #[test]
    fn later_target_wins_on_overlap() {
        let mut cs = ClickState::new();
        cs.add_click_target(Rect::new(0, 0, 60, 3), 7);
        cs.add_click_target(Rect::new(20, 1, 10, 1), 8);

        assert_eq!(cs.hit_test(25, 1), Some(8));
        assert_eq!(cs.hit_test(5, 1), Some(7));
    }

    #[test]
    fn row_target_respects_area() {
        let mut cs = ClickState::new();
        let area = Rect::new(2, 10, 30, 4);
        cs.add_row_target(area, 9, 1);
        cs.add_row_target(area, 14, 2);
        assert!(cs.targets.is_empty());

        cs.add_row_target(area, 13, 3);
        assert_eq!(cs.hit_test(2, 13), Some(3));
        assert_eq!(cs.hit_test(1, 13), None);
    }

    #[test]
    fn clear_removes_all_targets() {
        let mut cs = ClickState::new();
        cs.add_click_target(Rect::new(0, 0, 10, 10), 1);
        cs.clear_targets();
        assert_eq!(cs.hit_test(1, 1), None);
    }

    #[test]
    fn narrow_layout_threshold() {
        assert!(is_narrow_layout(40));
        assert!(!is_narrow_layout(60));
    }

    #[test]
    fn pixel_to_cell_maps_into_grid() {
        // 80x30 grid of 10x15 px cells
        assert_eq!(pixel_to_cell(0.0, 0.0, 800.0, 450.0, 80, 30), Some((0, 0)));
        assert_eq!(pixel_to_cell(15.0, 16.0, 800.0, 450.0, 80, 30), Some((1, 1)));
        assert_eq!(pixel_to_cell(799.0, 449.0, 800.0, 450.0, 80, 30), Some((79, 29)));
    }

    #[test]
    fn pixel_to_cell_rejects_outside() {
        assert_eq!(pixel_to_cell(800.0, 10.0, 800.0, 450.0, 80, 30), None);
        assert_eq!(pixel_to_cell(10.0, -1.0, 800.0, 450.0, 80, 30), None);
        assert_eq!(pixel_to_cell(10.0, 10.0, 0.0, 450.0, 80, 30), None);
        assert_eq!(pixel_to_cell(10.0, 10.0, 800.0, 450.0, 80, 0), None);
    }

    #[test]
    fn tap_on_row_center_hits_target() {
        let mut cs = ClickState::new();
        cs.terminal_cols = 37;
        cs.terminal_rows = 50;
        cs.add_click_target(Rect::new(0, 12, 37, 1), 42);

        let (w, h) = (37.0 * 9.0, 50.0 * 15.0);
        let (col, row) = pixel_to_cell(100.0, 12.0 * 15.0 + 7.5, w, h, 37, 50).unwrap();
        assert_eq!(row, 12);
        assert_eq!(cs.hit_test(col, row), Some(42));
    }
}
