//! Clickable UI components: rendering and click registration in one place.
//!
//! - [`TabBar`]: one row of equally wide tabs.
//! - [`ClickableList`]: lines, some of which are tap targets.

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::style::Style;
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Paragraph};
use ratzilla::ratatui::Frame;

use crate::input::ClickState;

// ── TabBar ─────────────────────────────────────────────────────

/// Horizontal tab bar. Each tab gets an equal share of the inner width and
/// the full height of the bar as its tap area.
pub struct TabBar<'a> {
    tabs: Vec<(String, Style, u16)>,
    block: Option<Block<'a>>,
}

impl<'a> TabBar<'a> {
    pub fn new() -> Self {
        Self {
            tabs: Vec::new(),
            block: None,
        }
    }

    pub fn tab(mut self, label: impl Into<String>, style: Style, action_id: u16) -> Self {
        self.tabs.push((label.into(), style, action_id));
        self
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    /// Render the tabs and register their targets.
    pub fn render(self, f: &mut Frame, area: Rect, cs: &mut ClickState) {
        let inner = match &self.block {
            Some(block) => block.inner(area),
            None => area,
        };
        for (rect, action_id) in tab_rects(inner, area, self.tabs.len())
            .into_iter()
            .zip(self.tabs.iter().map(|t| t.2))
        {
            cs.add_click_target(rect, action_id);
        }

        let slot = tab_width(inner.width, self.tabs.len()) as usize;
        let spans: Vec<Span> = self
            .tabs
            .into_iter()
            .map(|(label, style, _)| Span::styled(center(&label, slot), style))
            .collect();
        let paragraph = Paragraph::new(Line::from(spans));
        let paragraph = match self.block {
            Some(block) => paragraph.block(block),
            None => paragraph,
        };
        f.render_widget(paragraph, area);
    }
}

fn tab_width(total: u16, count: usize) -> u16 {
    if count == 0 {
        0
    } else {
        total / count as u16
    }
}

/// Tap rectangles: inner columns, outer rows (borders included for tolerance).
/// The last tab absorbs the rounding remainder.
fn tab_rects(inner: Rect, outer: Rect, count: usize) -> Vec<Rect> {
    let w = tab_width(inner.width, count);
    if w == 0 {
        return Vec::new();
    }
    (0..count as u16)
        .map(|i| {
            let x = inner.x + i * w;
            let width = if i as usize == count - 1 {
                inner.x + inner.width - x
            } else {
                w
            };
            Rect::new(x, outer.y, width, outer.height.max(1))
        })
        .collect()
}

fn center(label: &str, width: usize) -> String {
    let len = Line::from(label).width();
    if len >= width {
        return label.to_string();
    }
    let left = (width - len) / 2;
    format!("{}{}{}", " ".repeat(left), label, " ".repeat(width - len - left))
}

// ── ClickableList ──────────────────────────────────────────────

/// Lines paired with tap actions. Targets follow their line, so inserting a
/// header above an item moves its target with it.
pub struct ClickableList<'a> {
    lines: Vec<Line<'a>>,
    /// `(line_index, action_id)`
    actions: Vec<(u16, u16)>,
}

impl<'a> ClickableList<'a> {
    pub fn new() -> Self {
        Self {
            lines: Vec::new(),
            actions: Vec::new(),
        }
    }

    /// Add a non-clickable line.
    pub fn push(&mut self, line: Line<'a>) {
        self.lines.push(line);
    }

    pub fn push_clickable(&mut self, line: Line<'a>, action_id: u16) {
        self.actions.push((self.lines.len() as u16, action_id));
        self.lines.push(line);
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn into_lines(self) -> Vec<Line<'a>> {
        self.lines
    }

    /// Register targets for the clickable lines inside `area`.
    /// `top`/`bottom` are border rows; lines past the bottom are clipped.
    /// One line per row: do not combine with `Wrap`.
    pub fn register_targets(&self, area: Rect, cs: &mut ClickState, top: u16, bottom: u16) {
        let first = area.y + top;
        let end = area.y + area.height.saturating_sub(bottom);
        for &(idx, action_id) in &self.actions {
            let row = first + idx;
            if row < end {
                cs.add_row_target(area, row, action_id);
            }
        }
    }
}
