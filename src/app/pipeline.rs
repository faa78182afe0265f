//! Shared render pipeline used by both CLI and studio front-ends.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! extract sheets -> build chart spec -> render/export
//!
//! The CLI and the studio can then focus on presentation.

use std::path::PathBuf;

use crate::chart::{build_spec, write_png, write_svg, ChartSpec};
use crate::domain::{Project, SeriesData};
use crate::error::AppError;
use crate::io::write_series_csv;
use crate::sheet::{extract_series, CellWarning};

/// Shown when a render is requested without a single plottable point.
pub const EMPTY_DATA_WARNING: &str =
    "Enter valid data: X and Y values must pair up and labels must not be empty.";

/// Where a render run should land on disk. Unset targets are skipped.
#[derive(Debug, Clone, Default)]
pub struct OutputTargets {
    pub png: Option<PathBuf>,
    pub svg: Option<PathBuf>,
    pub csv: Option<PathBuf>,
}

impl OutputTargets {
    pub fn is_empty(&self) -> bool {
        self.png.is_none() && self.svg.is_none() && self.csv.is_none()
    }
}

/// Everything a render run produced, for the summary and the debug bundle.
#[derive(Debug, Clone, Default)]
pub struct RenderOutput {
    pub experiment: Vec<SeriesData>,
    pub model: Vec<SeriesData>,
    pub experiment_warnings: Vec<CellWarning>,
    pub model_warnings: Vec<CellWarning>,
    pub written: Vec<PathBuf>,
}

impl RenderOutput {
    pub fn warning_count(&self) -> usize {
        self.experiment_warnings.len() + self.model_warnings.len()
    }

    pub fn all_series(&self) -> Vec<SeriesData> {
        self.experiment
            .iter()
            .chain(self.model.iter())
            .cloned()
            .collect()
    }
}

/// Extract both sheets, honoring the per-dataset visibility toggles. A hidden
/// dataset contributes no series and no warnings.
pub fn extract_project(project: &Project) -> RenderOutput {
    let mut output = RenderOutput::default();
    if project.options.show_experiment {
        let extraction = extract_series(&project.experiment);
        output.experiment = extraction.series;
        output.experiment_warnings = extraction.warnings;
    }
    if project.options.show_model {
        let extraction = extract_series(&project.model);
        output.model = extraction.series;
        output.model_warnings = extraction.warnings;
    }
    output
}

/// Resolve the render-ready chart spec for a project's current data.
pub fn project_spec(project: &Project, output: &RenderOutput) -> ChartSpec {
    build_spec(
        &project.options,
        &output.experiment,
        &output.model,
        project.experiment_style,
        project.model_style,
    )
}

/// Extract, render, and export in one pass.
///
/// Fails with exit code 3 when no visible series has a single valid point;
/// partially bad cells only warn.
pub fn run_render(project: &Project, targets: &OutputTargets) -> Result<RenderOutput, AppError> {
    project.validate()?;

    let mut output = extract_project(project);
    if output.experiment.is_empty() && output.model.is_empty() {
        return Err(AppError::new(3, EMPTY_DATA_WARNING));
    }

    let spec = project_spec(project, &output);
    if let Some(path) = &targets.png {
        write_png(path, &spec)?;
        output.written.push(path.clone());
    }
    if let Some(path) = &targets.svg {
        write_svg(path, &spec)?;
        output.written.push(path.clone());
    }
    if let Some(path) = &targets.csv {
        write_series_csv(path, &output.all_series())?;
        output.written.push(path.clone());
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{demo_project, DemoConfig};
    use crate::domain::SheetLayout;

    #[test]
    fn render_without_data_fails_with_exit_3() {
        let project = Project::empty(SheetLayout::Shared, 5);
        let err = run_render(&project, &OutputTargets::default()).unwrap_err();
        assert_eq!(err.exit_code(), 3);
        assert_eq!(err.to_string(), EMPTY_DATA_WARNING);
    }

    #[test]
    fn hiding_both_datasets_counts_as_no_data() {
        let mut project = demo_project(&DemoConfig::default()).unwrap();
        project.options.show_experiment = false;
        project.options.show_model = false;
        let err = run_render(&project, &OutputTargets::default()).unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn hidden_dataset_is_left_out_of_extraction() {
        let mut project = demo_project(&DemoConfig::default()).unwrap();
        project.options.show_model = false;
        let output = extract_project(&project);
        assert_eq!(output.experiment.len(), 2);
        assert!(output.model.is_empty());
        assert!(output.model_warnings.is_empty());
    }

    #[test]
    fn render_with_no_targets_extracts_but_writes_nothing() {
        let project = demo_project(&DemoConfig::default()).unwrap();
        let output = run_render(&project, &OutputTargets::default()).unwrap();
        assert_eq!(output.experiment.len(), 2);
        assert_eq!(output.model.len(), 2);
        assert!(output.written.is_empty());
        assert_eq!(output.warning_count(), 0);
    }

    #[test]
    fn spec_dimensions_follow_project_options() {
        let mut project = demo_project(&DemoConfig::default()).unwrap();
        project.options.fig_size = 8;
        let output = extract_project(&project);
        let spec = project_spec(&project, &output);
        assert_eq!((spec.width, spec.height), (800, 480));
        assert_eq!(spec.series_count(), 4);
    }
}
