//! Project persistence (JSON).
//!
//! A project file captures everything the studio edits: both grids, the
//! per-dataset styles, and the chart options. Loading normalizes the grids
//! so hand-edited files cannot break layout invariants.

use std::fs::File;
use std::path::Path;

use crate::domain::{Project, ProjectFile};
use crate::error::AppError;

pub fn save_project(path: &Path, project: &Project) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create '{}': {e}", path.display())))?;
    let payload = ProjectFile::new(project.clone());
    serde_json::to_writer_pretty(file, &payload)
        .map_err(|e| AppError::new(2, format!("Failed to write project JSON: {e}")))?;
    Ok(())
}

pub fn load_project(path: &Path) -> Result<Project, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open '{}': {e}", path.display())))?;
    let payload: ProjectFile = serde_json::from_reader(file)
        .map_err(|e| AppError::new(2, format!("Invalid project JSON '{}': {e}", path.display())))?;
    let mut project = payload.project;
    project.normalize();
    project.validate()?;
    Ok(project)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Project, ProjectFile, SheetLayout};

    #[test]
    fn loaded_json_is_normalized_and_validated() {
        let mut project = Project::empty(SheetLayout::PerSeries, 0);
        project.options.fig_size = 12;
        let text = serde_json::to_string(&ProjectFile::new(project)).unwrap();
        let payload: ProjectFile = serde_json::from_str(&text).unwrap();
        let mut loaded = payload.project;
        loaded.normalize();
        assert!(loaded.validate().is_ok());
        assert!(loaded.experiment.row_count() >= 1);
        assert_eq!(loaded.options.fig_size, 12);
    }

    #[test]
    fn bad_fig_size_in_file_is_rejected() {
        let mut project = Project::empty(SheetLayout::Shared, 1);
        project.options.fig_size = 99;
        assert!(project.validate().is_err());
    }
}
