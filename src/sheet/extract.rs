//! Series extraction from sheet grids.
//!
//! Extraction never fails: unusable cells become warnings and the scan
//! continues. A series reaches the output only when it has at least one
//! fully parsed (x, y) pair, so downstream code can rely on extracted
//! series being non-empty with equal-length coordinate vectors.

use std::fmt;

use crate::domain::{SeriesData, SheetLayout};
use crate::sheet::Grid;

/// One skipped or suspicious cell, reported against the sheet row (1-based)
/// and column header it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellWarning {
    pub line: usize,
    pub column: String,
    pub message: String,
}

impl fmt::Display for CellWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "row {}, {}: {}", self.line, self.column, self.message)
    }
}

/// Result of scanning one grid: the labeled series plus any cell warnings.
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    pub series: Vec<SeriesData>,
    pub warnings: Vec<CellWarning>,
}

impl Extraction {
    pub fn point_count(&self) -> usize {
        self.series.iter().map(SeriesData::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

enum Cell {
    Blank,
    Number(f64),
    Bad(String),
}

fn read_cell(grid: &Grid, row: usize, col: usize) -> Cell {
    let raw = grid.cell(row, col).trim();
    if raw.is_empty() {
        return Cell::Blank;
    }
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() => Cell::Number(v),
        _ => Cell::Bad(raw.to_string()),
    }
}

/// Read the (x, y) pair of group `k` on `row`. Both cells blank means the
/// group is simply unused on that row; anything else must parse as a full
/// finite pair or it is warned about and skipped.
fn read_pair(
    grid: &Grid,
    row: usize,
    k: usize,
    headers: &[String],
    warnings: &mut Vec<CellWarning>,
) -> Option<(f64, f64)> {
    let x = read_cell(grid, row, grid.x_col(k));
    let y = read_cell(grid, row, grid.y_col(k));
    if matches!(x, Cell::Blank) && matches!(y, Cell::Blank) {
        return None;
    }
    let mut warn = |col: usize, message: String| {
        warnings.push(CellWarning {
            line: row + 1,
            column: headers[col].clone(),
            message,
        });
    };
    let mut usable = true;
    match &x {
        Cell::Number(_) => {}
        Cell::Blank => {
            warn(grid.x_col(k), "X is blank but Y has a value".to_string());
            usable = false;
        }
        Cell::Bad(raw) => {
            warn(grid.x_col(k), format!("not a number: '{raw}'"));
            usable = false;
        }
    }
    match &y {
        Cell::Number(_) => {}
        Cell::Blank => {
            warn(grid.y_col(k), "Y is blank but X has a value".to_string());
            usable = false;
        }
        Cell::Bad(raw) => {
            warn(grid.y_col(k), format!("not a number: '{raw}'"));
            usable = false;
        }
    }
    if !usable {
        return None;
    }
    match (x, y) {
        (Cell::Number(x), Cell::Number(y)) => Some((x, y)),
        _ => None,
    }
}

/// Scan a grid into labeled series according to its layout.
pub fn extract_series(grid: &Grid) -> Extraction {
    match grid.layout() {
        SheetLayout::Shared => extract_shared(grid),
        SheetLayout::PerSeries => extract_per_series(grid),
    }
}

/// Shared layout: one label column governs every column group. A label names
/// all rows down to the next label; repeating a label appends to the series
/// it already created. Group 1 keeps the bare label, later groups get a
/// `_2`, `_3`, ... suffix.
fn extract_shared(grid: &Grid) -> Extraction {
    let headers = grid.headers();
    let groups = grid.groups();
    let mut warnings = Vec::new();
    // Label order of first appearance, each holding one point list per group.
    let mut collected: Vec<(String, Vec<Vec<(f64, f64)>>)> = Vec::new();
    let mut current: Option<usize> = None;

    for row in 0..grid.row_count() {
        let label = grid.cell(row, grid.label_col(0)).trim().to_string();
        if !label.is_empty() {
            let idx = collected
                .iter()
                .position(|(l, _)| *l == label)
                .unwrap_or_else(|| {
                    collected.push((label.clone(), vec![Vec::new(); groups]));
                    collected.len() - 1
                });
            current = Some(idx);
        }
        for k in 0..groups {
            let Some(pair) = read_pair(grid, row, k, &headers, &mut warnings) else {
                continue;
            };
            match current {
                Some(idx) => collected[idx].1[k].push(pair),
                None => warnings.push(CellWarning {
                    line: row + 1,
                    column: headers[grid.label_col(0)].clone(),
                    message: "values before any label; point skipped".to_string(),
                }),
            }
        }
    }

    let mut series = Vec::new();
    for (label, per_group) in collected {
        for (k, points) in per_group.into_iter().enumerate() {
            if points.is_empty() {
                continue;
            }
            let name = if k == 0 {
                label.clone()
            } else {
                format!("{label}_{}", k + 1)
            };
            series.push(to_series(name, points));
        }
    }
    Extraction { series, warnings }
}

struct Segment {
    label: String,
    start_row: usize,
    points: Vec<(f64, f64)>,
}

/// Per-series layout: every column group has its own label column and is
/// scanned independently. A new (different) label starts a fresh segment;
/// blank or repeated labels extend the current one. Output is group-major,
/// segments in row order within each group.
fn extract_per_series(grid: &Grid) -> Extraction {
    let headers = grid.headers();
    let mut warnings = Vec::new();
    let mut series = Vec::new();

    for k in 0..grid.groups() {
        let mut current: Option<Segment> = None;
        for row in 0..grid.row_count() {
            let label = grid.cell(row, grid.label_col(k)).trim().to_string();
            if !label.is_empty() && current.as_ref().map(|s| s.label != label).unwrap_or(true) {
                flush(current.take(), &headers, grid.label_col(k), &mut series, &mut warnings);
                current = Some(Segment {
                    label,
                    start_row: row,
                    points: Vec::new(),
                });
            }
            let Some(pair) = read_pair(grid, row, k, &headers, &mut warnings) else {
                continue;
            };
            match current.as_mut() {
                Some(segment) => segment.points.push(pair),
                None => warnings.push(CellWarning {
                    line: row + 1,
                    column: headers[grid.label_col(k)].clone(),
                    message: "values before any label; point skipped".to_string(),
                }),
            }
        }
        flush(current, &headers, grid.label_col(k), &mut series, &mut warnings);
    }
    Extraction { series, warnings }
}

fn flush(
    segment: Option<Segment>,
    headers: &[String],
    label_col: usize,
    series: &mut Vec<SeriesData>,
    warnings: &mut Vec<CellWarning>,
) {
    let Some(segment) = segment else {
        return;
    };
    if segment.points.is_empty() {
        warnings.push(CellWarning {
            line: segment.start_row + 1,
            column: headers[label_col].clone(),
            message: format!("series '{}' has no data points", segment.label),
        });
        return;
    }
    series.push(to_series(segment.label, segment.points));
}

fn to_series(label: String, points: Vec<(f64, f64)>) -> SeriesData {
    let mut x = Vec::with_capacity(points.len());
    let mut y = Vec::with_capacity(points.len());
    for (px, py) in points {
        x.push(px);
        y.push(py);
    }
    SeriesData { label, x, y }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shared_grid(rows: &[&[&str]]) -> Grid {
        let mut grid = Grid::new(SheetLayout::Shared, 3, rows.len());
        fill(&mut grid, rows);
        grid
    }

    fn per_series_grid(groups: usize, rows: &[&[&str]]) -> Grid {
        let mut grid = Grid::new(SheetLayout::PerSeries, groups, rows.len());
        fill(&mut grid, rows);
        grid
    }

    fn fill(grid: &mut Grid, rows: &[&[&str]]) {
        for (r, row) in rows.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                grid.set_cell(r, c, *cell);
            }
        }
    }

    #[test]
    fn shared_label_covers_following_blank_rows() {
        let grid = shared_grid(&[
            &["Exp1", "1", "10"],
            &["", "2", "15"],
            &["", "3", "13"],
            &["Model1", "1", "9"],
            &["", "2", "14"],
        ]);
        let out = extract_series(&grid);
        assert!(out.warnings.is_empty());
        assert_eq!(out.series.len(), 2);
        assert_eq!(out.series[0].label, "Exp1");
        assert_eq!(out.series[0].x, vec![1.0, 2.0, 3.0]);
        assert_eq!(out.series[0].y, vec![10.0, 15.0, 13.0]);
        assert_eq!(out.series[1].label, "Model1");
        assert_eq!(out.series[1].len(), 2);
    }

    #[test]
    fn shared_extra_groups_get_numbered_suffixes() {
        let grid = shared_grid(&[
            &["A", "1", "10", "5", "50"],
            &["", "2", "20", "6", "60"],
        ]);
        let out = extract_series(&grid);
        let labels: Vec<&str> = out.series.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["A", "A_2"]);
        assert_eq!(out.series[1].x, vec![5.0, 6.0]);
    }

    #[test]
    fn shared_repeated_label_appends_to_existing_series() {
        let grid = shared_grid(&[
            &["A", "1", "1"],
            &["B", "2", "2"],
            &["A", "3", "3"],
        ]);
        let out = extract_series(&grid);
        let labels: Vec<&str> = out.series.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["A", "B"]);
        assert_eq!(out.series[0].x, vec![1.0, 3.0]);
    }

    #[test]
    fn shared_values_before_any_label_warn_and_skip() {
        let grid = shared_grid(&[&["", "1", "10"], &["A", "2", "20"]]);
        let out = extract_series(&grid);
        assert_eq!(out.series.len(), 1);
        assert_eq!(out.series[0].len(), 1);
        assert_eq!(out.warnings.len(), 1);
        assert_eq!(out.warnings[0].line, 1);
        assert_eq!(out.warnings[0].column, "Label");
    }

    #[test]
    fn per_series_new_label_starts_a_segment() {
        let grid = per_series_grid(1, &[
            &["s1", "1", "10"],
            &["", "2", "20"],
            &["s2", "3", "30"],
        ]);
        let out = extract_series(&grid);
        assert_eq!(out.series.len(), 2);
        assert_eq!(out.series[0].label, "s1");
        assert_eq!(out.series[0].len(), 2);
        assert_eq!(out.series[1].label, "s2");
        assert_eq!(out.series[1].x, vec![3.0]);
    }

    #[test]
    fn per_series_repeating_the_label_continues_the_segment() {
        let grid = per_series_grid(1, &[&["s1", "1", "10"], &["s1", "2", "20"]]);
        let out = extract_series(&grid);
        assert_eq!(out.series.len(), 1);
        assert_eq!(out.series[0].len(), 2);
    }

    #[test]
    fn per_series_output_is_group_major() {
        let grid = per_series_grid(2, &[
            &["a", "1", "1", "c", "3", "3"],
            &["b", "2", "2", "", "4", "4"],
        ]);
        let out = extract_series(&grid);
        let labels: Vec<&str> = out.series.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["a", "b", "c"]);
        assert_eq!(out.series[2].x, vec![3.0, 4.0]);
    }

    #[test]
    fn per_series_label_without_points_warns() {
        let grid = per_series_grid(1, &[&["lonely", "", ""]]);
        let out = extract_series(&grid);
        assert!(out.series.is_empty());
        assert_eq!(out.warnings.len(), 1);
        assert!(out.warnings[0].message.contains("lonely"));
    }

    #[test]
    fn unparseable_and_half_pairs_warn_without_killing_the_series() {
        let grid = shared_grid(&[
            &["A", "1", "10"],
            &["", "abc", "20"],
            &["", "3", ""],
            &["", "4", "40"],
        ]);
        let out = extract_series(&grid);
        assert_eq!(out.series.len(), 1);
        assert_eq!(out.series[0].x, vec![1.0, 4.0]);
        assert_eq!(out.warnings.len(), 2);
        assert!(out.warnings[0].message.contains("abc"));
        assert_eq!(out.warnings[1].column, "Y1");
    }

    #[test]
    fn extracted_series_always_pair_up() {
        let grid = shared_grid(&[
            &["A", "1", "10", "bad", "7"],
            &["", "2", "", "5", "50"],
        ]);
        let out = extract_series(&grid);
        for s in &out.series {
            assert_eq!(s.x.len(), s.y.len());
            assert!(!s.is_empty());
        }
    }
}
