//! Sheet Packer
//!
//! Lays pieces out in rows on a vertical stack of laser sheets. Sheet `i`
//! covers `y` in `[i * sheet_height, (i + 1) * sheet_height)`. Walls share a
//! common baseline per row; floor patches continue after the last wall row
//! and use the tallest patch of a row as the row height.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use wallkit_core::constants::{LASER_HEIGHT, LASER_WIDTH};

use crate::error::ParameterError;

/// Sheet size and spacing rules
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetLayout {
    pub sheet_width: f64,
    pub sheet_height: f64,
    /// Left margin of every row; the same amount is kept free on the right
    pub side_margin: f64,
    /// Free space above the first row of a sheet
    pub top_padding: f64,
    /// Vertical gap between rows
    pub row_gap: f64,
    /// A wall row whose baseline comes this close to the sheet bottom moves on
    pub bottom_guard: f64,
    /// Smallest horizontal gap between walls; the material thickness wins if larger
    pub min_wall_gap: f64,
    /// Horizontal gap between floor patches
    pub floor_gap: f64,
}

impl Default for SheetLayout {
    fn default() -> Self {
        Self {
            sheet_width: LASER_WIDTH,
            sheet_height: LASER_HEIGHT,
            side_margin: 10.0,
            top_padding: 10.0,
            row_gap: 8.0,
            bottom_guard: 5.0,
            min_wall_gap: 5.0,
            floor_gap: 5.0,
        }
    }
}

impl SheetLayout {
    /// Right-hand limit a row may not cross.
    pub fn max_row_width(&self) -> f64 {
        self.sheet_width - 2.0 * self.side_margin
    }

    pub fn sheet_top(&self, index: usize) -> f64 {
        index as f64 * self.sheet_height
    }

    /// Sheet containing `y`.
    pub fn sheet_index_at(&self, y: f64) -> usize {
        if !y.is_finite() || y <= 0.0 {
            return 0;
        }
        (y / self.sheet_height).floor() as usize
    }

    pub fn wall_gap(&self, thickness: f64) -> f64 {
        self.min_wall_gap.max(thickness)
    }

    pub fn validate(&self) -> Result<(), ParameterError> {
        if !(self.sheet_width.is_finite() && self.sheet_height.is_finite())
            || self.sheet_width <= 0.0
            || self.sheet_height <= 0.0
        {
            return Err(ParameterError::InvalidDimensions(format!(
                "sheet {}x{}",
                self.sheet_width, self.sheet_height
            )));
        }
        if self.max_row_width() <= 0.0 {
            return Err(ParameterError::InvalidDimensions(format!(
                "margins of {} leave no room on a {} wide sheet",
                self.side_margin, self.sheet_width
            )));
        }
        let spacings = [
            ("side_margin", self.side_margin),
            ("top_padding", self.top_padding),
            ("row_gap", self.row_gap),
            ("bottom_guard", self.bottom_guard),
            ("min_wall_gap", self.min_wall_gap),
            ("floor_gap", self.floor_gap),
        ];
        for (name, value) in spacings {
            if !value.is_finite() || value < 0.0 {
                return Err(ParameterError::InvalidValue {
                    name: name.to_string(),
                    reason: format!("must be a non-negative number, got {}", value),
                });
            }
        }
        Ok(())
    }
}

/// Set of sheet indices that received at least one piece
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SheetUsage(BTreeSet<usize>);

impl SheetUsage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark(&mut self, index: usize) {
        self.0.insert(index);
    }

    pub fn contains(&self, index: usize) -> bool {
        self.0.contains(&index)
    }

    /// Number of sheets in use, never less than one.
    pub fn sheet_count(&self) -> usize {
        self.0.len().max(1)
    }
}

/// Row cursor for wall panels
#[derive(Debug, Clone)]
pub struct WallPacker {
    layout: SheetLayout,
    wall_height: f64,
    gap: f64,
    row_start: f64,
    sheet_index: usize,
    cursor_x: f64,
    baseline_y: f64,
}

impl WallPacker {
    /// Start at the first row of sheet 0 and mark it used.
    pub fn new(layout: SheetLayout, wall_height: f64, gap: f64, usage: &mut SheetUsage) -> Self {
        usage.mark(0);
        Self {
            layout,
            wall_height,
            gap,
            row_start: layout.side_margin,
            sheet_index: 0,
            cursor_x: layout.side_margin,
            baseline_y: layout.top_padding + wall_height,
        }
    }

    /// Start rows far enough right that tabs reaching `reach` to the left of
    /// a panel stay on the sheet.
    pub fn with_tab_reach(mut self, reach: f64) -> Self {
        if reach.is_finite() && reach > self.row_start {
            self.row_start = reach;
            self.cursor_x = reach;
        }
        self
    }

    /// Bottom edge of the current row.
    pub fn baseline(&self) -> f64 {
        self.baseline_y
    }

    pub fn sheet_index(&self) -> usize {
        self.sheet_index
    }

    fn at_row_start(&self) -> bool {
        self.cursor_x <= self.row_start
    }

    /// Top-left corner for a panel `width` wide, wrapping first if it would
    /// cross the right limit. A panel wider than a whole row is placed alone
    /// at the start of a row.
    pub fn place(&mut self, width: f64, usage: &mut SheetUsage) -> (f64, f64) {
        if self.cursor_x + width + self.gap > self.layout.max_row_width() && !self.at_row_start() {
            self.next_row(usage);
        }
        let position = (self.cursor_x, self.baseline_y - self.wall_height);
        self.cursor_x += width + self.gap;
        position
    }

    /// Move to the next row, or to the next sheet when the row would not fit.
    pub fn next_row(&mut self, usage: &mut SheetUsage) {
        self.cursor_x = self.row_start;
        self.baseline_y += self.wall_height + self.layout.row_gap;

        let sheet_top = self.layout.sheet_top(self.sheet_index);
        if self.baseline_y + self.layout.bottom_guard > sheet_top + self.layout.sheet_height {
            self.sheet_index += 1;
            usage.mark(self.sheet_index);
            self.baseline_y =
                self.layout.sheet_top(self.sheet_index) + self.layout.top_padding + self.wall_height;
        }
    }
}

/// Row cursor for floor patches
#[derive(Debug, Clone)]
pub struct FloorPacker {
    layout: SheetLayout,
    sheet_index: usize,
    cursor_x: f64,
    current_y: f64,
    row_height: f64,
}

impl FloorPacker {
    /// Continue below the wall row whose baseline is `last_baseline`.
    pub fn after_walls(layout: SheetLayout, last_baseline: f64, usage: &mut SheetUsage) -> Self {
        let sheet_index = layout.sheet_index_at(last_baseline);
        usage.mark(sheet_index);
        let sheet_top = layout.sheet_top(sheet_index);
        Self {
            layout,
            sheet_index,
            cursor_x: layout.side_margin,
            current_y: (last_baseline + layout.row_gap).max(sheet_top + layout.top_padding),
            row_height: 0.0,
        }
    }

    pub fn sheet_index(&self) -> usize {
        self.sheet_index
    }

    /// Top-left corner for a `width` by `height` patch.
    pub fn place(&mut self, width: f64, height: f64, usage: &mut SheetUsage) -> (f64, f64) {
        let layout = self.layout;
        if self.cursor_x + width + layout.floor_gap > layout.max_row_width()
            && self.cursor_x > layout.side_margin
        {
            self.cursor_x = layout.side_margin;
            self.current_y += self.row_height + layout.row_gap;
            self.row_height = 0.0;
        }

        let sheet_top = layout.sheet_top(self.sheet_index);
        if self.current_y + height + layout.top_padding > sheet_top + layout.sheet_height {
            self.sheet_index += 1;
            usage.mark(self.sheet_index);
            self.current_y = layout.sheet_top(self.sheet_index) + layout.top_padding;
            self.cursor_x = layout.side_margin;
            self.row_height = 0.0;
        }

        let position = (self.cursor_x, self.current_y);
        self.cursor_x += width + layout.floor_gap;
        self.row_height = self.row_height.max(height);
        position
    }
}
