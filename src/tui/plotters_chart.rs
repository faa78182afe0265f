//! Plotters-powered chart preview widget for Ratatui.
//!
//! Why Plotters instead of Ratatui's built-in `Chart` widget?
//! - nicer axis + mesh rendering
//! - less manual work for ticks/labels
//! - the preview consumes the same resolved spec as the PNG/SVG exports, so
//!   what you see tracks what you save
//!
//! We render Plotters output into the Ratatui buffer using `plotters-ratatui-backend`.

use plotters::prelude::*;
use plotters_ratatui_backend::widget_fn;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

use crate::chart::{padded_bounds, ChartSpec, StyledSeries};
use crate::domain::{ChartMode, LineKind, MarkerKind};

/// Terminal preview of a chart spec.
///
/// The widget is render-only: series, colors, and bounds are already resolved
/// in the spec, so `render()` stays focused on drawing.
pub struct PreviewChart<'a> {
    pub spec: &'a ChartSpec,
}

impl Widget for PreviewChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // When the available area is too small, Plotters may fail to build a chart.
        // In that case, we render a small hint rather than panicking.
        if area.width < 20 || area.height < 8 {
            buf.set_string(
                area.x,
                area.y,
                "Chart area too small (resize terminal).",
                Style::default().fg(Color::Yellow),
            );
            return;
        }

        let x_desc = self.spec.x_label.as_str();
        let y_desc = self.spec.y_label.as_str();
        match self.spec.mode {
            ChartMode::Overlay => {
                render_pane(
                    area,
                    buf,
                    None,
                    x_desc,
                    y_desc,
                    &self.spec.experiment,
                    &self.spec.model,
                );
            }
            ChartMode::Split => {
                let half = area.width / 2;
                let left = Rect { width: half, ..area };
                let right = Rect {
                    x: area.x + half,
                    width: area.width - half,
                    ..area
                };
                render_pane(
                    left,
                    buf,
                    Some("Experiment"),
                    x_desc,
                    y_desc,
                    &self.spec.experiment,
                    &[],
                );
                render_pane(right, buf, Some("Model"), x_desc, y_desc, &self.spec.model, &[]);
            }
        }
    }
}

fn render_pane<'a>(
    area: Rect,
    buf: &mut Buffer,
    caption: Option<&'a str>,
    x_desc: &'a str,
    y_desc: &'a str,
    a: &'a [StyledSeries],
    b: &'a [StyledSeries],
) {
    let ((x0, x1), (y0, y1)) = padded_bounds(a.iter().chain(b.iter()));

    // `plotters-ratatui-backend` draws Plotters primitives via Ratatui's
    // `Canvas` widget, which ultimately writes to the terminal buffer.
    let widget = widget_fn(move |root| {
        let mut builder = ChartBuilder::on(&root);
        builder
            // Small margins keep the chart readable without wasting space.
            .margin(1)
            // Terminal cells are low-res, so keep label areas compact.
            .set_label_area_size(LabelAreaPosition::Left, 6)
            .set_label_area_size(LabelAreaPosition::Bottom, 3);
        if let Some(text) = caption {
            builder.caption(text, ("sans-serif", 12).into_font().color(&WHITE));
        }
        let mut chart = builder.build_cartesian_2d(x0..x1, y0..y1)?;

        // Axes + tick labels. Mesh lines stay off regardless of the grid
        // option; they turn into visual clutter at terminal resolution.
        chart
            .configure_mesh()
            .disable_x_mesh()
            .disable_y_mesh()
            .x_desc(x_desc)
            .y_desc(y_desc)
            .x_labels(5)
            .y_labels(5)
            .x_label_formatter(&|v| format!("{v:.1}"))
            .y_label_formatter(&|v| format!("{v:.1}"))
            .label_style(("sans-serif", 10).into_font().color(&WHITE))
            .axis_style(&WHITE)
            .bold_line_style(&WHITE)
            .draw()?;

        for s in a.iter().chain(b.iter()) {
            if s.line != LineKind::None {
                chart.draw_series(LineSeries::new(s.points.iter().copied(), &s.color))?;
            }
            if s.marker != MarkerKind::None {
                // We intentionally avoid `Circle` markers here. The underlying
                // `plotters-ratatui-backend` currently maps circle radii
                // incorrectly (pixel radius -> normalized canvas units),
                // producing huge circles. A `Pixel` gives a clean dot that
                // looks right in terminals.
                chart.draw_series(s.points.iter().map(|&(x, y)| Pixel::new((x, y), s.color)))?;
            }
        }

        Ok(())
    });

    widget.render(area, buf);
}
