//! Editable text grid backing the data sheets.
//!
//! Cells are plain strings until extraction parses them, so partially typed
//! or invalid values never block editing. Column meaning is derived from the
//! sheet layout: a `Shared` grid is `Label, X1, Y1, X2, Y2, X3, Y3` and a
//! `PerSeries` grid is `Label1, X1, Y1, Label2, X2, Y2, ...` with a
//! configurable group count.

use serde::{Deserialize, Serialize};

use crate::domain::SheetLayout;

/// Rectangular grid of text cells. Every row always has exactly `width()`
/// cells; mutators keep that invariant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    layout: SheetLayout,
    groups: usize,
    rows: Vec<Vec<String>>,
}

impl Grid {
    pub fn new(layout: SheetLayout, groups: usize, rows: usize) -> Self {
        let mut grid = Self {
            layout,
            groups: 0,
            rows: Vec::new(),
        };
        grid.groups = grid.clamp_groups(groups);
        grid.rows = vec![vec![String::new(); grid.width()]; rows];
        grid
    }

    pub fn layout(&self) -> SheetLayout {
        self.layout
    }

    pub fn groups(&self) -> usize {
        self.groups
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn width(&self) -> usize {
        match self.layout {
            SheetLayout::Shared => 1 + 2 * self.groups,
            SheetLayout::PerSeries => 3 * self.groups,
        }
    }

    /// Column holding the label for group `k`.
    ///
    /// In the shared layout all groups read the single leading label column.
    pub fn label_col(&self, k: usize) -> usize {
        match self.layout {
            SheetLayout::Shared => 0,
            SheetLayout::PerSeries => 3 * k,
        }
    }

    pub fn x_col(&self, k: usize) -> usize {
        match self.layout {
            SheetLayout::Shared => 1 + 2 * k,
            SheetLayout::PerSeries => 3 * k + 1,
        }
    }

    pub fn y_col(&self, k: usize) -> usize {
        self.x_col(k) + 1
    }

    pub fn headers(&self) -> Vec<String> {
        let mut out = Vec::with_capacity(self.width());
        match self.layout {
            SheetLayout::Shared => {
                out.push("Label".to_string());
                for k in 1..=self.groups {
                    out.push(format!("X{k}"));
                    out.push(format!("Y{k}"));
                }
            }
            SheetLayout::PerSeries => {
                for k in 1..=self.groups {
                    out.push(format!("Label{k}"));
                    out.push(format!("X{k}"));
                    out.push(format!("Y{k}"));
                }
            }
        }
        out
    }

    fn clamp_groups(&self, groups: usize) -> usize {
        match self.layout.fixed_groups() {
            Some(fixed) => fixed,
            None => groups.max(1),
        }
    }

    /// Switch layouts in place. Existing rows are resized to the new width.
    pub fn set_layout(&mut self, layout: SheetLayout) {
        if self.layout == layout {
            self.resize_rows();
            return;
        }
        self.layout = layout;
        self.groups = self.clamp_groups(self.groups);
        self.resize_rows();
    }

    /// Grow or shrink the column-group count, preserving cell data in the
    /// groups that survive.
    pub fn ensure_groups(&mut self, groups: usize) {
        self.groups = self.clamp_groups(groups);
        self.resize_rows();
    }

    fn resize_rows(&mut self) {
        let width = self.width();
        for row in &mut self.rows {
            row.resize(width, String::new());
        }
    }

    pub fn add_row(&mut self) {
        self.rows.push(vec![String::new(); self.width()]);
    }

    /// Blank every cell, keeping the grid's shape.
    pub fn clear(&mut self) {
        for row in &mut self.rows {
            for cell in row {
                cell.clear();
            }
        }
    }

    pub fn is_blank(&self) -> bool {
        self.rows
            .iter()
            .all(|row| row.iter().all(|cell| cell.trim().is_empty()))
    }

    pub fn cell(&self, row: usize, col: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Write a cell, ignoring out-of-range coordinates.
    pub fn set_cell(&mut self, row: usize, col: usize, value: impl Into<String>) {
        if col >= self.width() {
            return;
        }
        if let Some(r) = self.rows.get_mut(row) {
            r[col] = value.into();
        }
    }

    pub fn row(&self, row: usize) -> Option<&[String]> {
        self.rows.get(row).map(Vec::as_slice)
    }

    /// Paste a block of tabular text with its top-left corner at `(row, col)`.
    ///
    /// Each line becomes one row; cells split on tabs when the line has any,
    /// otherwise on commas, otherwise the whole line is one cell. The grid
    /// grows rows as needed; columns past the grid width are dropped. Returns
    /// `(rows, cols)` actually written.
    pub fn paste_block(&mut self, row: usize, col: usize, text: &str) -> (usize, usize) {
        let width = self.width();
        if col >= width {
            return (0, 0);
        }
        let mut rows_written = 0;
        let mut cols_written = 0;
        for (i, line) in text.lines().enumerate() {
            let line = line.trim_end_matches('\r');
            if line.trim().is_empty() {
                continue;
            }
            let cells: Vec<&str> = if line.contains('\t') {
                line.split('\t').collect()
            } else if line.contains(',') {
                line.split(',').collect()
            } else {
                vec![line]
            };
            let target_row = row + i;
            while self.rows.len() <= target_row {
                self.add_row();
            }
            let mut written_this_row = 0;
            for (j, cell) in cells.iter().enumerate() {
                let target_col = col + j;
                if target_col >= width {
                    break;
                }
                self.rows[target_row][target_col] = cell.trim().to_string();
                written_this_row += 1;
            }
            if written_this_row > 0 {
                rows_written = rows_written.max(i + 1);
                cols_written = cols_written.max(written_this_row);
            }
        }
        (rows_written, cols_written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shared_layout_has_single_label_column() {
        let grid = Grid::new(SheetLayout::Shared, 7, 2);
        assert_eq!(grid.groups(), 3);
        assert_eq!(grid.width(), 7);
        assert_eq!(grid.label_col(2), 0);
        assert_eq!(grid.x_col(0), 1);
        assert_eq!(grid.y_col(2), 6);
        assert_eq!(
            grid.headers(),
            vec!["Label", "X1", "Y1", "X2", "Y2", "X3", "Y3"]
        );
    }

    #[test]
    fn per_series_layout_headers_track_group_count() {
        let mut grid = Grid::new(SheetLayout::PerSeries, 2, 1);
        assert_eq!(grid.width(), 6);
        assert_eq!(
            grid.headers(),
            vec!["Label1", "X1", "Y1", "Label2", "X2", "Y2"]
        );
        grid.set_cell(0, 3, "keep");
        grid.ensure_groups(3);
        assert_eq!(grid.width(), 9);
        assert_eq!(grid.cell(0, 3), "keep");
        grid.ensure_groups(1);
        assert_eq!(grid.width(), 3);
    }

    #[test]
    fn paste_splits_on_tabs_then_commas() {
        let mut grid = Grid::new(SheetLayout::Shared, 3, 1);
        let (rows, cols) = grid.paste_block(0, 0, "A\t1\t2\nB,3,4\nsolo");
        assert_eq!((rows, cols), (3, 3));
        assert_eq!(grid.cell(0, 0), "A");
        assert_eq!(grid.cell(0, 2), "2");
        assert_eq!(grid.cell(1, 1), "3");
        assert_eq!(grid.cell(2, 0), "solo");
        assert_eq!(grid.row_count(), 3);
    }

    #[test]
    fn paste_grows_rows_and_clips_columns() {
        let mut grid = Grid::new(SheetLayout::PerSeries, 1, 1);
        let (rows, cols) = grid.paste_block(0, 1, "1,2,3,4\n5,6");
        assert_eq!(rows, 2);
        assert_eq!(cols, 2);
        assert_eq!(grid.cell(0, 1), "1");
        assert_eq!(grid.cell(0, 2), "2");
        assert_eq!(grid.cell(1, 2), "6");
        assert_eq!(grid.row_count(), 2);
    }

    #[test]
    fn paste_skips_blank_lines_and_trims_cells() {
        let mut grid = Grid::new(SheetLayout::Shared, 3, 0);
        grid.paste_block(0, 0, "Exp1 , 1 , 10\n\n");
        assert_eq!(grid.cell(0, 0), "Exp1");
        assert_eq!(grid.cell(0, 1), "1");
        assert_eq!(grid.cell(0, 2), "10");
        assert_eq!(grid.row_count(), 1);
    }

    #[test]
    fn clear_keeps_shape() {
        let mut grid = Grid::new(SheetLayout::Shared, 3, 2);
        grid.set_cell(1, 4, "x");
        assert!(!grid.is_blank());
        grid.clear();
        assert!(grid.is_blank());
        assert_eq!(grid.row_count(), 2);
        assert_eq!(grid.width(), 7);
    }
}
