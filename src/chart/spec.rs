//! Render-ready chart description.
//!
//! A `ChartSpec` is fully resolved: series carry their final colors, marker
//! geometry, and point lists, and the pixel dimensions are already computed
//! from the figure size. Every renderer (PNG, SVG, terminal preview, text
//! plot) consumes this one structure, so they cannot disagree about styling.

use plotters::style::RGBColor;

use crate::chart::style::series_color;
use crate::domain::{
    ChartMode, ChartOptions, DatasetKind, DatasetStyle, LegendSpot, LineKind, MarkerKind,
    SeriesData,
};

#[derive(Debug, Clone)]
pub struct StyledSeries {
    pub label: String,
    pub points: Vec<(f64, f64)>,
    pub color: RGBColor,
    pub marker: MarkerKind,
    pub marker_px: i32,
    pub line: LineKind,
}

#[derive(Debug, Clone)]
pub struct ChartSpec {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub legend: LegendSpot,
    pub show_grid: bool,
    pub mode: ChartMode,
    pub width: u32,
    pub height: u32,
    pub experiment: Vec<StyledSeries>,
    pub model: Vec<StyledSeries>,
}

impl ChartSpec {
    pub fn all_series(&self) -> impl Iterator<Item = &StyledSeries> {
        self.experiment.iter().chain(self.model.iter())
    }

    pub fn is_empty(&self) -> bool {
        self.experiment.is_empty() && self.model.is_empty()
    }

    pub fn series_count(&self) -> usize {
        self.experiment.len() + self.model.len()
    }
}

/// Chart pixel dimensions for a figure size.
///
/// Overlay charts are wider than tall; split charts stretch further to give
/// each pane a sensible aspect ratio.
pub fn pixel_dims(fig_size: u32, mode: ChartMode) -> (u32, u32) {
    match mode {
        ChartMode::Overlay => (100 * fig_size, 60 * fig_size),
        ChartMode::Split => (150 * fig_size, 50 * fig_size),
    }
}

pub fn build_spec(
    options: &ChartOptions,
    experiment: &[SeriesData],
    model: &[SeriesData],
    experiment_style: DatasetStyle,
    model_style: DatasetStyle,
) -> ChartSpec {
    let (width, height) = pixel_dims(options.fig_size, options.mode);
    ChartSpec {
        title: options.title.clone(),
        x_label: options.x_label.clone(),
        y_label: options.y_label.clone(),
        legend: options.legend,
        show_grid: options.show_grid,
        mode: options.mode,
        width,
        height,
        experiment: style_series(experiment, experiment_style, DatasetKind::Experiment),
        model: style_series(model, model_style, DatasetKind::Model),
    }
}

fn style_series(list: &[SeriesData], style: DatasetStyle, kind: DatasetKind) -> Vec<StyledSeries> {
    list.iter()
        .enumerate()
        .map(|(i, s)| StyledSeries {
            label: s.label.clone(),
            points: s.points().collect(),
            color: series_color(style.palette, i),
            marker: style.marker,
            marker_px: kind.marker_px(),
            line: style.line,
        })
        .collect()
}

/// Axis bounds covering every point of `series`, padded by 5% on each end.
/// Degenerate extents widen by 0.5 per side; no finite data at all falls
/// back to the unit range.
pub fn padded_bounds<'a>(
    series: impl Iterator<Item = &'a StyledSeries>,
) -> ((f64, f64), (f64, f64)) {
    let mut x_min = f64::INFINITY;
    let mut x_max = f64::NEG_INFINITY;
    let mut y_min = f64::INFINITY;
    let mut y_max = f64::NEG_INFINITY;
    for s in series {
        for &(x, y) in &s.points {
            x_min = x_min.min(x);
            x_max = x_max.max(x);
            y_min = y_min.min(y);
            y_max = y_max.max(y);
        }
    }
    (pad_axis(x_min, x_max), pad_axis(y_min, y_max))
}

fn pad_axis(min: f64, max: f64) -> (f64, f64) {
    if !min.is_finite() || !max.is_finite() {
        return (0.0, 1.0);
    }
    let (min, max) = if min == max {
        (min - 0.5, max + 0.5)
    } else {
        (min, max)
    };
    let pad = (max - min) * 0.05;
    (min - pad, max + pad)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PaletteKind;

    fn series(label: &str, points: &[(f64, f64)]) -> SeriesData {
        SeriesData {
            label: label.to_string(),
            x: points.iter().map(|p| p.0).collect(),
            y: points.iter().map(|p| p.1).collect(),
        }
    }

    #[test]
    fn build_spec_assigns_palette_colors_in_order() {
        let exp = vec![
            series("a", &[(1.0, 2.0)]),
            series("b", &[(2.0, 3.0)]),
        ];
        let spec = build_spec(
            &ChartOptions::default(),
            &exp,
            &[],
            DatasetStyle::experiment_default(),
            DatasetStyle::model_default(),
        );
        assert_eq!(spec.series_count(), 2);
        let c0 = series_color(PaletteKind::Warm, 0);
        let c1 = series_color(PaletteKind::Warm, 1);
        assert_eq!(spec.experiment[0].color.0, c0.0);
        assert_eq!(spec.experiment[1].color.1, c1.1);
        assert_eq!(spec.experiment[0].marker_px, 8);
    }

    #[test]
    fn pixel_dims_scale_with_fig_size_and_mode() {
        assert_eq!(pixel_dims(10, ChartMode::Overlay), (1000, 600));
        assert_eq!(pixel_dims(10, ChartMode::Split), (1500, 500));
        assert_eq!(pixel_dims(6, ChartMode::Overlay), (600, 360));
    }

    #[test]
    fn bounds_pad_five_percent() {
        let spec = build_spec(
            &ChartOptions::default(),
            &[series("a", &[(0.0, 0.0), (10.0, 100.0)])],
            &[],
            DatasetStyle::experiment_default(),
            DatasetStyle::model_default(),
        );
        let ((x0, x1), (y0, y1)) = padded_bounds(spec.all_series());
        assert!((x0 - -0.5).abs() < 1e-9);
        assert!((x1 - 10.5).abs() < 1e-9);
        assert!((y0 - -5.0).abs() < 1e-9);
        assert!((y1 - 105.0).abs() < 1e-9);
    }

    #[test]
    fn single_point_widens_instead_of_collapsing() {
        let spec = build_spec(
            &ChartOptions::default(),
            &[series("a", &[(3.0, 7.0)])],
            &[],
            DatasetStyle::experiment_default(),
            DatasetStyle::model_default(),
        );
        let ((x0, x1), (y0, y1)) = padded_bounds(spec.all_series());
        assert!(x0 < 3.0 && x1 > 3.0);
        assert!(y0 < 7.0 && y1 > 7.0);
        assert!(x1 - x0 >= 1.0);
    }

    #[test]
    fn no_data_falls_back_to_unit_bounds() {
        let ((x0, x1), (y0, y1)) = padded_bounds(std::iter::empty());
        assert_eq!((x0, x1), (0.0, 1.0));
        assert_eq!((y0, y1), (0.0, 1.0));
    }
}
