//! Chart rendering to PNG and SVG via plotters.
//!
//! Drawing is generic over the backend so the bitmap and SVG paths share one
//! code path (and tests can render into memory). Text uses a bundled font
//! registered with plotters' `ab_glyph` backend, which keeps rendering
//! independent of system font libraries.

use std::path::Path;
use std::sync::OnceLock;

use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;
use plotters::style::{register_font, FontStyle};

use crate::chart::spec::{padded_bounds, ChartSpec, StyledSeries};
use crate::chart::style::{dash_pattern, polygon_offsets};
use crate::domain::{ChartMode, LegendSpot, LineKind, MarkerKind};
use crate::error::AppError;

static BUNDLED_FONT: OnceLock<bool> = OnceLock::new();

/// Register the bundled sans-serif font. Idempotent; must run before any
/// text is laid out, including the terminal preview.
pub fn ensure_fonts() -> Result<(), AppError> {
    let ok = *BUNDLED_FONT.get_or_init(|| {
        register_font(
            "sans-serif",
            FontStyle::Normal,
            include_bytes!("../../assets/DejaVuSans.ttf"),
        )
        .is_ok()
    });
    if ok {
        Ok(())
    } else {
        Err(AppError::new(4, "Failed to register bundled chart font."))
    }
}

pub fn write_png(path: &Path, spec: &ChartSpec) -> Result<(), AppError> {
    ensure_fonts()?;
    let root = BitMapBackend::new(path, (spec.width, spec.height)).into_drawing_area();
    draw_chart(&root, spec).map_err(draw_error)?;
    root.present()
        .map_err(|err| AppError::new(2, format!("Cannot write {}: {err}", path.display())))
}

pub fn write_svg(path: &Path, spec: &ChartSpec) -> Result<(), AppError> {
    ensure_fonts()?;
    let root = SVGBackend::new(path, (spec.width, spec.height)).into_drawing_area();
    draw_chart(&root, spec).map_err(draw_error)?;
    root.present()
        .map_err(|err| AppError::new(2, format!("Cannot write {}: {err}", path.display())))
}

fn draw_error<E: std::error::Error>(err: DrawingAreaErrorKind<E>) -> AppError {
    AppError::new(4, format!("Chart rendering failed: {err}"))
}

/// Draw a full chart onto `root`. The caller presents the area.
pub fn draw_chart<DB>(
    root: &DrawingArea<DB, Shift>,
    spec: &ChartSpec,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>>
where
    DB: DrawingBackend,
{
    root.fill(&WHITE)?;
    match spec.mode {
        ChartMode::Overlay => {
            let series: Vec<&StyledSeries> = spec.all_series().collect();
            draw_pane(root, spec, &spec.title, 24, &series)?;
        }
        ChartMode::Split => {
            let panes = root.split_evenly((1, 2));
            let experiment: Vec<&StyledSeries> = spec.experiment.iter().collect();
            let model: Vec<&StyledSeries> = spec.model.iter().collect();
            draw_pane(
                &panes[0],
                spec,
                &format!("{} - Experiment", spec.title),
                18,
                &experiment,
            )?;
            draw_pane(
                &panes[1],
                spec,
                &format!("{} - Model", spec.title),
                18,
                &model,
            )?;
        }
    }
    Ok(())
}

/// One cartesian pane: axes, mesh, series, and (when anything is labeled)
/// the legend box. An empty pane still gets axes so split charts keep their
/// shape when one side has no data.
fn draw_pane<DB>(
    area: &DrawingArea<DB, Shift>,
    spec: &ChartSpec,
    caption: &str,
    caption_px: i32,
    series: &[&StyledSeries],
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>>
where
    DB: DrawingBackend,
{
    let ((x0, x1), (y0, y1)) = padded_bounds(series.iter().copied());
    let mut chart = ChartBuilder::on(area)
        .caption(caption, ("sans-serif", caption_px))
        .margin(20)
        .set_label_area_size(LabelAreaPosition::Left, 70)
        .set_label_area_size(LabelAreaPosition::Bottom, 50)
        .build_cartesian_2d(x0..x1, y0..y1)?;

    let mut mesh = chart.configure_mesh();
    mesh.x_desc(&spec.x_label)
        .y_desc(&spec.y_label)
        .axis_desc_style(("sans-serif", 16))
        .label_style(("sans-serif", 13));
    if spec.show_grid {
        mesh.bold_line_style(&BLACK.mix(0.2))
            .light_line_style(&BLACK.mix(0.08));
    } else {
        mesh.disable_mesh();
    }
    mesh.draw()?;

    let mut labeled = 0usize;
    for s in series {
        draw_styled(&mut chart, s, &mut labeled)?;
    }

    if labeled > 0 {
        chart
            .configure_series_labels()
            .position(legend_position(spec.legend))
            .background_style(&WHITE.mix(0.7))
            .border_style(&BLACK.mix(0.3))
            .label_font(("sans-serif", 14))
            .draw()?;
    }
    Ok(())
}

fn draw_styled<DB>(
    chart: &mut ChartContext<'_, DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>,
    s: &StyledSeries,
    labeled: &mut usize,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>>
where
    DB: DrawingBackend,
{
    let stroke = s.color.mix(0.8).stroke_width(2);
    let mut has_label = false;

    if s.line == LineKind::Solid {
        let anno = chart.draw_series(LineSeries::new(s.points.iter().copied(), stroke))?;
        anno.label(s.label.clone())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], stroke));
        has_label = true;
    } else if let Some((dash, gap)) = dash_pattern(s.line) {
        let anno = chart.draw_series(DashedLineSeries::new(
            s.points.iter().copied(),
            dash,
            gap,
            stroke,
        ))?;
        anno.label(s.label.clone())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], stroke));
        has_label = true;
    }

    let fill = s.color.mix(0.8).filled();
    if s.marker == MarkerKind::Circle {
        let r = s.marker_px;
        let anno = chart.draw_series(s.points.iter().map(|&(x, y)| Circle::new((x, y), r, fill)))?;
        if !has_label {
            anno.label(s.label.clone())
                .legend(move |(x, y)| Circle::new((x + 10, y), 4, fill));
            has_label = true;
        }
    } else if let Some(offsets) = polygon_offsets(s.marker, s.marker_px) {
        let anno = chart.draw_series(
            s.points
                .iter()
                .map(|&(x, y)| EmptyElement::at((x, y)) + Polygon::new(offsets.clone(), fill)),
        )?;
        if !has_label {
            anno.label(s.label.clone())
                .legend(move |(x, y)| Circle::new((x + 10, y), 4, fill));
            has_label = true;
        }
    }

    if has_label {
        *labeled += 1;
    }
    Ok(())
}

fn legend_position(spot: LegendSpot) -> SeriesLabelPosition {
    match spot {
        LegendSpot::Best | LegendSpot::UpperRight => SeriesLabelPosition::UpperRight,
        LegendSpot::UpperLeft => SeriesLabelPosition::UpperLeft,
        LegendSpot::LowerRight => SeriesLabelPosition::LowerRight,
        LegendSpot::LowerLeft => SeriesLabelPosition::LowerLeft,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::spec::build_spec;
    use crate::domain::{ChartOptions, DatasetStyle, SeriesData};

    fn sample_spec(mode: ChartMode) -> ChartSpec {
        let exp = vec![SeriesData {
            label: "Exp1".to_string(),
            x: vec![1.0, 2.0, 3.0],
            y: vec![10.0, 15.0, 13.0],
        }];
        let model = vec![SeriesData {
            label: "Model1".to_string(),
            x: vec![1.0, 2.0, 3.0],
            y: vec![9.0, 14.0, 13.5],
        }];
        let mut options = ChartOptions::default();
        options.mode = mode;
        let mut spec = build_spec(
            &options,
            &exp,
            &model,
            DatasetStyle::experiment_default(),
            DatasetStyle::model_default(),
        );
        spec.width = 400;
        spec.height = 300;
        spec
    }

    fn render_svg(spec: &ChartSpec) -> String {
        ensure_fonts().unwrap();
        let mut out = String::new();
        {
            let root = SVGBackend::with_string(&mut out, (spec.width, spec.height))
                .into_drawing_area();
            draw_chart(&root, spec).unwrap();
            root.present().unwrap();
        }
        out
    }

    #[test]
    fn overlay_bitmap_paints_non_background_pixels() {
        let spec = sample_spec(ChartMode::Overlay);
        ensure_fonts().unwrap();
        let mut buf = vec![0u8; (spec.width * spec.height * 3) as usize];
        {
            let root = BitMapBackend::with_buffer(&mut buf, (spec.width, spec.height))
                .into_drawing_area();
            draw_chart(&root, &spec).unwrap();
            root.present().unwrap();
        }
        assert!(buf.iter().any(|&b| b == 255));
        assert!(buf.iter().any(|&b| b != 255));
    }

    #[test]
    fn overlay_svg_contains_title_and_palette_color() {
        let spec = sample_spec(ChartMode::Overlay);
        let out = render_svg(&spec).to_lowercase();
        assert!(out.contains("<svg"));
        assert!(out.contains("data comparison"));
        assert!(out.contains("#ff6b6b"));
        assert!(out.contains("#6c5ce7"));
    }

    #[test]
    fn split_svg_captions_both_panes() {
        let spec = sample_spec(ChartMode::Split);
        let out = render_svg(&spec);
        assert!(out.contains("Experiment"));
        assert!(out.contains("Model"));
    }

    #[test]
    fn empty_spec_still_renders_axes() {
        let mut spec = sample_spec(ChartMode::Overlay);
        spec.experiment.clear();
        spec.model.clear();
        let out = render_svg(&spec);
        assert!(out.contains("<svg"));
    }

    #[test]
    fn dashed_and_marker_styles_render() {
        let mut spec = sample_spec(ChartMode::Overlay);
        spec.experiment[0].marker = MarkerKind::Star;
        spec.model[0].line = LineKind::Dashed;
        let out = render_svg(&spec);
        assert!(out.contains("polygon"));
    }
}
