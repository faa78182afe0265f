//! Debug bundle writer for inspecting sheet contents and extraction results.

use std::fs::{create_dir_all, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::Local;

use crate::app::pipeline::RenderOutput;
use crate::chart::build_spec;
use crate::domain::{DatasetKind, Project, SeriesData};
use crate::error::AppError;
use crate::plot::render_text_chart;
use crate::sheet::{CellWarning, Grid};

/// Write a markdown bundle holding the raw sheets, what the extractor made
/// of them, and a text preview of the chart. Returns the bundle path.
pub fn write_debug_bundle(
    project: &Project,
    output: &RenderOutput,
    dir: &Path,
) -> Result<PathBuf, AppError> {
    create_dir_all(dir)
        .map_err(|e| AppError::new(4, format!("Failed to create debug dir: {e}")))?;

    let ts = Local::now().format("%Y%m%d_%H%M%S");
    let path = dir.join(format!("plotpad_debug_{ts}.md"));

    let mut file = File::create(&path)
        .map_err(|e| AppError::new(4, format!("Failed to create debug file: {e}")))?;
    write_bundle(&mut file, project, output)
        .map_err(|e| AppError::new(4, format!("Failed to write debug bundle: {e}")))?;

    Ok(path)
}

fn write_bundle<W: Write>(w: &mut W, project: &Project, output: &RenderOutput) -> io::Result<()> {
    let o = &project.options;
    writeln!(w, "# plotpad debug bundle")?;
    writeln!(w, "- generated: {}", Local::now().to_rfc3339())?;
    writeln!(w, "- layout: {}", project.layout.display_name())?;
    writeln!(w, "- title: {} (x: {}, y: {})", o.title, o.x_label, o.y_label)?;
    writeln!(
        w,
        "- chart: {}, fig_size={}, grid={}, legend={}",
        o.mode.display_name(),
        o.fig_size,
        o.show_grid,
        o.legend.display_name()
    )?;
    for kind in [DatasetKind::Experiment, DatasetKind::Model] {
        let style = project.style(kind);
        let shown = match kind {
            DatasetKind::Experiment => o.show_experiment,
            DatasetKind::Model => o.show_model,
        };
        writeln!(
            w,
            "- {}: shown={}, palette={}, marker={}, line={}",
            kind.display_name(),
            shown,
            style.palette.display_name(),
            style.marker.display_name(),
            style.line.display_name()
        )?;
    }

    write_sheet_section(
        w,
        "Experiment sheet",
        project.grid(DatasetKind::Experiment),
        &output.experiment,
        &output.experiment_warnings,
    )?;
    write_sheet_section(
        w,
        "Model sheet",
        project.grid(DatasetKind::Model),
        &output.model,
        &output.model_warnings,
    )?;

    writeln!(w, "\n## Chart preview")?;
    let spec = build_spec(
        &project.options,
        &output.experiment,
        &output.model,
        project.experiment_style,
        project.model_style,
    );
    writeln!(w, "```")?;
    write!(w, "{}", render_text_chart(&spec, 100, 30))?;
    writeln!(w, "```")?;

    if !output.written.is_empty() {
        writeln!(w, "\n## Outputs")?;
        for p in &output.written {
            writeln!(w, "- {}", p.display())?;
        }
    }

    Ok(())
}

fn write_sheet_section<W: Write>(
    w: &mut W,
    title: &str,
    grid: &Grid,
    series: &[SeriesData],
    warnings: &[CellWarning],
) -> io::Result<()> {
    writeln!(w, "\n## {title}")?;
    writeln!(w, "| {} |", grid.headers().join(" | "))?;
    writeln!(w, "| {} |", vec!["-"; grid.width()].join(" | "))?;
    for r in 0..grid.row_count() {
        if let Some(cells) = grid.row(r) {
            writeln!(w, "| {} |", cells.join(" | "))?;
        }
    }

    writeln!(w, "\n### Extracted series")?;
    if series.is_empty() {
        writeln!(w, "(none)")?;
    } else {
        writeln!(w, "| label | points | x range | y range |")?;
        writeln!(w, "| - | - | - | - |")?;
        for s in series {
            writeln!(
                w,
                "| {} | {} | {} | {} |",
                s.label,
                s.len(),
                fmt_range(s.x_range()),
                fmt_range(s.y_range())
            )?;
        }
    }
    for warning in warnings {
        writeln!(w, "- warning: {warning}")?;
    }
    Ok(())
}

fn fmt_range(range: Option<(f64, f64)>) -> String {
    match range {
        Some((lo, hi)) => format!("[{lo:.2}, {hi:.2}]"),
        None => "-".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{demo_project, DemoConfig};
    use crate::domain::SheetLayout;
    use crate::sheet::extract_series;

    #[test]
    fn bundle_lists_sheets_extraction_and_preview() {
        let project = demo_project(&DemoConfig {
            layout: SheetLayout::Shared,
            ..DemoConfig::default()
        })
        .unwrap();
        let output = RenderOutput {
            experiment: extract_series(&project.experiment).series,
            model: extract_series(&project.model).series,
            experiment_warnings: Vec::new(),
            model_warnings: Vec::new(),
            written: vec![PathBuf::from("out/demo.png")],
        };

        let mut buf = Vec::new();
        write_bundle(&mut buf, &project, &output).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert!(text.starts_with("# plotpad debug bundle\n"));
        assert!(text.contains("| Label | X1 | Y1 | X2 | Y2 | X3 | Y3 |"));
        assert!(text.contains("| Exp1 | 1 | 10 |"));
        assert!(text.contains("### Extracted series"));
        assert!(text.contains("| Model1 | 5 | [1.00, 5.00] | [9.00, 19.50] |"));
        assert!(text.contains("## Chart preview"));
        assert!(text.contains("```"));
        assert!(text.contains("- out/demo.png"));
    }

    #[test]
    fn bundle_reports_warnings_and_empty_extraction() {
        let project = Project::empty(SheetLayout::PerSeries, 3);
        let output = RenderOutput {
            experiment: Vec::new(),
            model: Vec::new(),
            experiment_warnings: vec![CellWarning {
                line: 2,
                column: "X1".to_string(),
                message: "not a number: 'abc'".to_string(),
            }],
            model_warnings: Vec::new(),
            written: Vec::new(),
        };

        let mut buf = Vec::new();
        write_bundle(&mut buf, &project, &output).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert!(text.contains("(none)"));
        assert!(text.contains("- warning: row 2, X1: not a number: 'abc'"));
        assert!(!text.contains("## Outputs"));
    }
}
