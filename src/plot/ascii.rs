//! ASCII plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - series lines: `-`
//! - series points: the marker's text glyph (`o`, `#`, `*`, ...)

use crate::chart::{ascii_glyph, padded_bounds, ChartSpec, StyledSeries};
use crate::domain::LineKind;

/// Render every series of a chart spec into a text grid.
pub fn render_text_chart(spec: &ChartSpec, width: usize, height: usize) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let ((x_min, x_max), (y_min, y_max)) = padded_bounds(spec.all_series());
    let mut grid = vec![vec![' '; width]; height];

    // Lines first so markers can overlay.
    for s in spec.all_series() {
        if s.line != LineKind::None {
            draw_polyline(&mut grid, s, x_min, x_max, y_min, y_max);
        }
    }
    for s in spec.all_series() {
        let Some(glyph) = ascii_glyph(s.marker) else {
            continue;
        };
        for &(x, y) in &s.points {
            let col = map_x(x, x_min, x_max, width);
            let row = map_y(y, y_min, y_max, height);
            grid[row][col] = glyph;
        }
    }

    let mut out = String::new();
    out.push_str(&format!(
        "Plot: x=[{x_min:.2}, {x_max:.2}] | y=[{y_min:.2}, {y_max:.2}]\n"
    ));
    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }
    out
}

fn map_x(x: f64, x_min: f64, x_max: f64, width: usize) -> usize {
    let width = width.max(2);
    let u = ((x - x_min) / (x_max - x_min)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // y grows upward, rows grow downward
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

fn draw_polyline(
    grid: &mut [Vec<char>],
    s: &StyledSeries,
    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
) {
    let height = grid.len();
    let width = grid[0].len();
    let cells: Vec<(usize, usize)> = s
        .points
        .iter()
        .map(|&(x, y)| (map_x(x, x_min, x_max, width), map_y(y, y_min, y_max, height)))
        .collect();
    if cells.len() == 1 {
        let (x, y) = cells[0];
        if grid[y][x] == ' ' {
            grid[y][x] = '-';
        }
        return;
    }
    for pair in cells.windows(2) {
        draw_line(grid, pair[0].0, pair[0].1, pair[1].0, pair[1].1, '-');
    }
}

/// Integer line drawing (Bresenham-ish). Only blank cells are written so
/// earlier marks survive crossings.
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0
            && (y0 as usize) < grid.len()
            && x0 >= 0
            && (x0 as usize) < grid[0].len()
            && grid[y0 as usize][x0 as usize] == ' '
        {
            grid[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::build_spec;
    use crate::domain::{ChartOptions, DatasetStyle, SeriesData};

    #[test]
    fn plot_golden_snapshot_small() {
        let experiment = vec![SeriesData {
            label: "E".to_string(),
            x: vec![1.0, 10.0],
            y: vec![100.0, 110.0],
        }];
        let model = vec![SeriesData {
            label: "M".to_string(),
            x: vec![1.0, 10.0],
            y: vec![100.0, 110.0],
        }];
        let spec = build_spec(
            &ChartOptions::default(),
            &experiment,
            &model,
            DatasetStyle::experiment_default(),
            DatasetStyle::model_default(),
        );

        let txt = render_text_chart(&spec, 10, 5);
        let expected = concat!(
            "Plot: x=[0.55, 10.45] | y=[99.50, 110.50]\n",
            "        -o\n",
            "      --  \n",
            "    --    \n",
            "  --      \n",
            "o-        \n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn empty_spec_renders_blank_grid() {
        let spec = build_spec(
            &ChartOptions::default(),
            &[],
            &[],
            DatasetStyle::experiment_default(),
            DatasetStyle::model_default(),
        );
        let txt = render_text_chart(&spec, 12, 5);
        assert!(txt.starts_with("Plot: x=[0.00, 1.00] | y=[0.00, 1.00]\n"));
        assert_eq!(txt.lines().count(), 6);
        assert!(txt.lines().skip(1).all(|l| l.trim().is_empty()));
    }
}
