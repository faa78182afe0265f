//! Formatted terminal output for headless runs.
//!
//! We keep formatting code in one place so:
//! - the extraction/render code stays clean and testable
//! - output changes are localized (important for future snapshot tests)

use crate::app::pipeline::RenderOutput;
use crate::domain::{DatasetKind, Project, SeriesData};
use crate::sheet::CellWarning;

const MAX_WARNINGS_SHOWN: usize = 12;

/// Format the full render summary (options + extracted series + warnings +
/// written outputs).
pub fn format_render_summary(project: &Project, outcome: &RenderOutput) -> String {
    let mut out = String::new();

    out.push_str("=== plotpad - Chart Render ===\n");
    out.push_str(&format!("Title: {}\n", project.options.title));
    out.push_str(&format!(
        "Layout: {} | mode: {} | legend: {} | fig-size: {}\n",
        project.layout.display_name(),
        project.options.mode.display_name(),
        project.options.legend.display_name(),
        project.options.fig_size,
    ));
    out.push_str(&format!(
        "Experiment: {} series, {} points | Model: {} series, {} points\n",
        outcome.experiment.len(),
        total_points(&outcome.experiment),
        outcome.model.len(),
        total_points(&outcome.model),
    ));

    out.push_str("\nSeries:\n");
    out.push_str(&format_series_table(&outcome.experiment, &outcome.model));

    let warnings: Vec<&CellWarning> = outcome
        .experiment_warnings
        .iter()
        .chain(outcome.model_warnings.iter())
        .collect();
    if !warnings.is_empty() {
        out.push_str(&format!("\nWarnings ({}):\n", warnings.len()));
        for w in warnings.iter().take(MAX_WARNINGS_SHOWN) {
            out.push_str(&format!("- {w}\n"));
        }
        if warnings.len() > MAX_WARNINGS_SHOWN {
            out.push_str(&format!(
                "- ... and {} more\n",
                warnings.len() - MAX_WARNINGS_SHOWN
            ));
        }
    }

    if !outcome.written.is_empty() {
        out.push_str("\nOutputs:\n");
        for path in &outcome.written {
            out.push_str(&format!("- {}\n", path.display()));
        }
    }
    out.push('\n');

    out
}

pub fn format_series_table(experiment: &[SeriesData], model: &[SeriesData]) -> String {
    let mut out = String::new();
    out.push_str(
        format!(
            "{:<10} {:<20} {:>7} {:>18} {:>18}\n",
            "dataset", "label", "points", "x-range", "y-range"
        )
        .trim_end(),
    );
    out.push('\n');
    out.push_str(
        format!(
            "{:-<10} {:-<20} {:-<7} {:-<18} {:-<18}\n",
            "", "", "", "", ""
        )
        .trim_end(),
    );
    out.push('\n');

    let rows = experiment
        .iter()
        .map(|s| (DatasetKind::Experiment, s))
        .chain(model.iter().map(|s| (DatasetKind::Model, s)));
    for (kind, s) in rows {
        out.push_str(
            format!(
                "{:<10} {:<20} {:>7} {:>18} {:>18}\n",
                kind.display_name(),
                truncate(&s.label, 20),
                s.len(),
                fmt_range(s.x_range()),
                fmt_range(s.y_range()),
            )
            .trim_end(),
        );
        out.push('\n');
    }

    out
}

fn total_points(series: &[SeriesData]) -> usize {
    series.iter().map(SeriesData::len).sum()
}

fn fmt_range(range: Option<(f64, f64)>) -> String {
    match range {
        Some((min, max)) => format!("[{min:.2}, {max:.2}]"),
        None => "-".to_string(),
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for (i, ch) in s.chars().enumerate() {
        if i + 1 >= max {
            break;
        }
        out.push(ch);
    }
    out.push('.');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(label: &str, x: &[f64], y: &[f64]) -> SeriesData {
        SeriesData {
            label: label.to_string(),
            x: x.to_vec(),
            y: y.to_vec(),
        }
    }

    #[test]
    fn series_table_lists_both_datasets() {
        let table = format_series_table(
            &[series("Exp1", &[1.0, 2.0], &[10.0, 15.0])],
            &[series("Model1", &[1.0], &[9.0])],
        );
        assert!(table.contains("experiment"));
        assert!(table.contains("Exp1"));
        assert!(table.contains("model"));
        assert!(table.contains("[1.00, 2.00]"));
        assert!(table.contains("[10.00, 15.00]"));
    }

    #[test]
    fn long_labels_are_truncated() {
        let t = truncate("a-very-long-series-label-indeed", 20);
        assert_eq!(t.chars().count(), 20);
        assert!(t.ends_with('.'));
    }

    #[test]
    fn missing_ranges_render_as_dash() {
        assert_eq!(fmt_range(None), "-");
        assert_eq!(fmt_range(Some((1.0, 2.5))), "[1.00, 2.50]");
    }
}
