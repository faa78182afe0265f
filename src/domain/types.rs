//! Shared domain types.
//!
//! These types are intentionally lightweight and serializable so they can be:
//!
//! - edited in-memory by the studio
//! - saved/reloaded as a project JSON
//! - resolved into chart specs for rendering/export

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::sheet::Grid;

/// Smallest accepted figure size (chart scale factor).
pub const FIG_SIZE_MIN: u32 = 6;
/// Largest accepted figure size.
pub const FIG_SIZE_MAX: u32 = 15;

/// How grid columns map to labeled series.
///
/// `Shared` is the classic wide table: one `Label` column applies to all
/// three (X, Y) column groups on the same row. `PerSeries` gives each column
/// group its own `Label{k}` column and allows any number of groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum SheetLayout {
    Shared,
    PerSeries,
}

impl SheetLayout {
    pub fn display_name(self) -> &'static str {
        match self {
            SheetLayout::Shared => "shared",
            SheetLayout::PerSeries => "per-series",
        }
    }

    /// `Shared` always carries exactly three column groups.
    pub fn fixed_groups(self) -> Option<usize> {
        match self {
            SheetLayout::Shared => Some(3),
            SheetLayout::PerSeries => None,
        }
    }
}

/// The two datasets of a comparison project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DatasetKind {
    Experiment,
    Model,
}

impl DatasetKind {
    pub const ALL: [DatasetKind; 2] = [DatasetKind::Experiment, DatasetKind::Model];

    pub fn display_name(self) -> &'static str {
        match self {
            DatasetKind::Experiment => "experiment",
            DatasetKind::Model => "model",
        }
    }

    /// Marker radius in pixels for exported charts. Experiment points render
    /// slightly larger than model points so overlapping datasets stay legible.
    pub fn marker_px(self) -> i32 {
        match self {
            DatasetKind::Experiment => 8,
            DatasetKind::Model => 6,
        }
    }
}

/// Named 5-color palette used to color a dataset's series in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PaletteKind {
    Warm,
    Cool,
    Rainbow,
    Mono,
}

impl PaletteKind {
    pub const ALL: [PaletteKind; 4] = [
        PaletteKind::Warm,
        PaletteKind::Cool,
        PaletteKind::Rainbow,
        PaletteKind::Mono,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            PaletteKind::Warm => "warm",
            PaletteKind::Cool => "cool",
            PaletteKind::Rainbow => "rainbow",
            PaletteKind::Mono => "mono",
        }
    }

    pub fn next(self) -> Self {
        cycle(&Self::ALL, self, 1)
    }

    pub fn prev(self) -> Self {
        cycle(&Self::ALL, self, -1)
    }
}

/// Point marker glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum MarkerKind {
    Circle,
    Square,
    TriangleUp,
    TriangleDown,
    Diamond,
    Pentagon,
    Star,
    Hexagon,
    None,
}

impl MarkerKind {
    pub const ALL: [MarkerKind; 9] = [
        MarkerKind::Circle,
        MarkerKind::Square,
        MarkerKind::TriangleUp,
        MarkerKind::TriangleDown,
        MarkerKind::Diamond,
        MarkerKind::Pentagon,
        MarkerKind::Star,
        MarkerKind::Hexagon,
        MarkerKind::None,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            MarkerKind::Circle => "circle",
            MarkerKind::Square => "square",
            MarkerKind::TriangleUp => "triangle-up",
            MarkerKind::TriangleDown => "triangle-down",
            MarkerKind::Diamond => "diamond",
            MarkerKind::Pentagon => "pentagon",
            MarkerKind::Star => "star",
            MarkerKind::Hexagon => "hexagon",
            MarkerKind::None => "none",
        }
    }

    pub fn next(self) -> Self {
        cycle(&Self::ALL, self, 1)
    }

    pub fn prev(self) -> Self {
        cycle(&Self::ALL, self, -1)
    }
}

/// Line style connecting a series' points (`None` = markers only).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum LineKind {
    Solid,
    Dashed,
    DashDot,
    Dotted,
    None,
}

impl LineKind {
    pub const ALL: [LineKind; 5] = [
        LineKind::Solid,
        LineKind::Dashed,
        LineKind::DashDot,
        LineKind::Dotted,
        LineKind::None,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            LineKind::Solid => "solid",
            LineKind::Dashed => "dashed",
            LineKind::DashDot => "dash-dot",
            LineKind::Dotted => "dotted",
            LineKind::None => "none",
        }
    }

    pub fn next(self) -> Self {
        cycle(&Self::ALL, self, 1)
    }

    pub fn prev(self) -> Self {
        cycle(&Self::ALL, self, -1)
    }
}

/// Legend placement.
///
/// `Best` has no auto-placement equivalent in the rendering layer and maps
/// to the upper-right corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum LegendSpot {
    Best,
    UpperRight,
    UpperLeft,
    LowerRight,
    LowerLeft,
}

impl LegendSpot {
    pub const ALL: [LegendSpot; 5] = [
        LegendSpot::Best,
        LegendSpot::UpperRight,
        LegendSpot::UpperLeft,
        LegendSpot::LowerRight,
        LegendSpot::LowerLeft,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            LegendSpot::Best => "best",
            LegendSpot::UpperRight => "upper right",
            LegendSpot::UpperLeft => "upper left",
            LegendSpot::LowerRight => "lower right",
            LegendSpot::LowerLeft => "lower left",
        }
    }

    pub fn next(self) -> Self {
        cycle(&Self::ALL, self, 1)
    }

    pub fn prev(self) -> Self {
        cycle(&Self::ALL, self, -1)
    }
}

/// Whether both datasets share one plane or get side-by-side panes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ChartMode {
    Overlay,
    Split,
}

impl ChartMode {
    pub fn display_name(self) -> &'static str {
        match self {
            ChartMode::Overlay => "overlay",
            ChartMode::Split => "split",
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            ChartMode::Overlay => ChartMode::Split,
            ChartMode::Split => ChartMode::Overlay,
        }
    }
}

fn cycle<T: Copy + PartialEq>(all: &[T], cur: T, delta: isize) -> T {
    let idx = all.iter().position(|&v| v == cur).unwrap_or(0) as isize;
    let n = all.len() as isize;
    all[((idx + delta).rem_euclid(n)) as usize]
}

/// Per-dataset cosmetics: which palette, marker, and line style its series use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetStyle {
    pub palette: PaletteKind,
    pub marker: MarkerKind,
    pub line: LineKind,
}

impl DatasetStyle {
    /// Experiment default: warm scatter points, no connecting line.
    pub fn experiment_default() -> Self {
        Self {
            palette: PaletteKind::Warm,
            marker: MarkerKind::Circle,
            line: LineKind::None,
        }
    }

    /// Model default: cool solid line, no markers.
    pub fn model_default() -> Self {
        Self {
            palette: PaletteKind::Cool,
            marker: MarkerKind::None,
            line: LineKind::Solid,
        }
    }
}

/// Chart-wide options (titles, legend, size, toggles).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartOptions {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub legend: LegendSpot,
    /// Scale factor mapped to pixel dimensions by the chart layer.
    pub fig_size: u32,
    pub show_grid: bool,
    pub show_experiment: bool,
    pub show_model: bool,
    pub mode: ChartMode,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            title: "Data Comparison".to_string(),
            x_label: "X".to_string(),
            y_label: "Y".to_string(),
            legend: LegendSpot::Best,
            fig_size: 10,
            show_grid: true,
            show_experiment: true,
            show_model: true,
            mode: ChartMode::Overlay,
        }
    }
}

impl ChartOptions {
    pub fn validate(&self) -> Result<(), AppError> {
        if !(FIG_SIZE_MIN..=FIG_SIZE_MAX).contains(&self.fig_size) {
            return Err(AppError::new(
                2,
                format!(
                    "Figure size must be between {FIG_SIZE_MIN} and {FIG_SIZE_MAX} (got {}).",
                    self.fig_size
                ),
            ));
        }
        Ok(())
    }
}

/// One extracted series: a label plus paired coordinate sequences.
///
/// `x` and `y` always have the same length (points are only ever appended in
/// pairs) and are non-empty by the time extraction emits the series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesData {
    pub label: String,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

impl SeriesData {
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.x.iter().copied().zip(self.y.iter().copied())
    }

    pub fn x_range(&self) -> Option<(f64, f64)> {
        value_range(&self.x)
    }

    pub fn y_range(&self) -> Option<(f64, f64)> {
        value_range(&self.y)
    }
}

fn value_range(values: &[f64]) -> Option<(f64, f64)> {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for &v in values {
        min = min.min(v);
        max = max.max(v);
    }
    if min.is_finite() && max.is_finite() {
        Some((min, max))
    } else {
        None
    }
}

/// Everything the studio edits and the pipeline renders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub layout: SheetLayout,
    pub experiment: Grid,
    pub model: Grid,
    pub experiment_style: DatasetStyle,
    pub model_style: DatasetStyle,
    pub options: ChartOptions,
}

impl Project {
    /// An empty project for the given layout (grids start blank).
    pub fn empty(layout: SheetLayout, rows: usize) -> Self {
        let groups = layout.fixed_groups().unwrap_or(3);
        Self {
            layout,
            experiment: Grid::new(layout, groups, rows),
            model: Grid::new(layout, groups, rows),
            experiment_style: DatasetStyle::experiment_default(),
            model_style: DatasetStyle::model_default(),
            options: ChartOptions::default(),
        }
    }

    pub fn grid(&self, kind: DatasetKind) -> &Grid {
        match kind {
            DatasetKind::Experiment => &self.experiment,
            DatasetKind::Model => &self.model,
        }
    }

    pub fn grid_mut(&mut self, kind: DatasetKind) -> &mut Grid {
        match kind {
            DatasetKind::Experiment => &mut self.experiment,
            DatasetKind::Model => &mut self.model,
        }
    }

    pub fn style(&self, kind: DatasetKind) -> DatasetStyle {
        match kind {
            DatasetKind::Experiment => self.experiment_style,
            DatasetKind::Model => self.model_style,
        }
    }

    /// Current column-group count (both grids are kept in lockstep).
    pub fn groups(&self) -> usize {
        self.experiment.groups()
    }

    /// Resize the column groups of both grids, preserving cell data.
    pub fn set_groups(&mut self, groups: usize) {
        self.experiment.ensure_groups(groups);
        self.model.ensure_groups(groups);
    }

    /// Repair invariants after deserialization: grids must agree on layout
    /// and group count, and each grid needs at least one row to edit.
    pub fn normalize(&mut self) {
        let groups = self
            .layout
            .fixed_groups()
            .unwrap_or_else(|| self.experiment.groups().max(self.model.groups()).max(1));
        self.experiment.set_layout(self.layout);
        self.model.set_layout(self.layout);
        self.set_groups(groups);
        if self.experiment.row_count() == 0 {
            self.experiment.add_row();
        }
        if self.model.row_count() == 0 {
            self.model.add_row();
        }
    }

    pub fn validate(&self) -> Result<(), AppError> {
        self.options.validate()
    }
}

/// On-disk project schema (JSON).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectFile {
    pub tool: String,
    pub project: Project,
}

impl ProjectFile {
    pub fn new(project: Project) -> Self {
        Self {
            tool: "plotpad".to_string(),
            project,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_default_matches_documented_values() {
        let opts = ChartOptions::default();
        assert_eq!(opts.title, "Data Comparison");
        assert_eq!(opts.fig_size, 10);
        assert!(opts.show_grid);
        assert!(opts.show_experiment);
        assert!(opts.show_model);
        assert_eq!(opts.mode, ChartMode::Overlay);
        assert!(opts.validate().is_ok());
    }

    #[test]
    fn options_validate_rejects_out_of_range_fig_size() {
        let mut opts = ChartOptions::default();
        opts.fig_size = 5;
        assert!(opts.validate().is_err());
        opts.fig_size = 16;
        assert!(opts.validate().is_err());
        opts.fig_size = 15;
        assert!(opts.validate().is_ok());
    }

    #[test]
    fn enum_cycling_wraps_both_directions() {
        assert_eq!(PaletteKind::Mono.next(), PaletteKind::Warm);
        assert_eq!(PaletteKind::Warm.prev(), PaletteKind::Mono);
        assert_eq!(MarkerKind::None.next(), MarkerKind::Circle);
        assert_eq!(LineKind::Solid.prev(), LineKind::None);
        assert_eq!(LegendSpot::Best.prev(), LegendSpot::LowerLeft);
    }

    #[test]
    fn series_ranges_ignore_nothing_and_report_min_max() {
        let s = SeriesData {
            label: "a".to_string(),
            x: vec![2.0, 1.0, 3.0],
            y: vec![-1.0, 5.0, 0.0],
        };
        assert_eq!(s.len(), 3);
        assert_eq!(s.x_range(), Some((1.0, 3.0)));
        assert_eq!(s.y_range(), Some((-1.0, 5.0)));
    }

    #[test]
    fn project_file_round_trips_through_json() {
        let project = Project::empty(SheetLayout::PerSeries, 2);
        let file = ProjectFile::new(project.clone());
        let text = serde_json::to_string(&file).unwrap();
        let back: ProjectFile = serde_json::from_str(&text).unwrap();
        assert_eq!(back.tool, "plotpad");
        assert_eq!(back.project, project);
    }

    #[test]
    fn normalize_syncs_groups_and_guarantees_a_row() {
        let mut project = Project::empty(SheetLayout::PerSeries, 0);
        project.model.ensure_groups(5);
        project.normalize();
        assert_eq!(project.experiment.groups(), 5);
        assert_eq!(project.model.groups(), 5);
        assert!(project.experiment.row_count() >= 1);
        assert!(project.model.row_count() >= 1);
    }
}
