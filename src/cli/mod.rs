//! Command-line parsing for the plotpad chart builder.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the sheet/chart code.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

use crate::domain::{LegendSpot, LineKind, MarkerKind, PaletteKind, SheetLayout};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "plotpad",
    version,
    about = "Spreadsheet-style experiment vs model chart builder"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Launch the interactive studio (sheet editor + live chart preview).
    ///
    /// This is the default when the binary is run without a subcommand.
    Studio(StudioArgs),
    /// Render a chart headlessly from a project file or sheet CSVs.
    Render(RenderArgs),
    /// Print the extracted series and a text chart without writing images.
    Inspect(InspectArgs),
    /// Write the built-in demo data as sheet CSVs (handy paste fodder).
    Demo(DemoArgs),
}

/// Options for the interactive studio.
#[derive(Debug, Parser, Clone)]
pub struct StudioArgs {
    /// Project JSON file to open. A fresh demo project is used otherwise.
    #[arg(short = 'p', long, value_name = "JSON")]
    pub project: Option<PathBuf>,

    /// Sheet layout for a fresh project.
    #[arg(long, value_enum, default_value_t = SheetLayout::PerSeries)]
    pub layout: SheetLayout,

    /// Directory the export key writes into (overrides PLOTPAD_EXPORT_DIR).
    #[arg(long, value_name = "DIR")]
    pub export_dir: Option<PathBuf>,
}

/// Inputs, style overrides, and outputs for a headless render.
#[derive(Debug, Parser, Clone)]
pub struct RenderArgs {
    /// Project JSON file saved from the studio.
    #[arg(short = 'p', long, value_name = "JSON")]
    pub project: Option<PathBuf>,

    /// Experiment sheet CSV (alternative to --project).
    #[arg(long, value_name = "CSV")]
    pub experiment: Option<PathBuf>,

    /// Model sheet CSV (alternative to --project).
    #[arg(long, value_name = "CSV")]
    pub model: Option<PathBuf>,

    /// Sheet layout the CSVs use.
    #[arg(long, value_enum, default_value_t = SheetLayout::PerSeries)]
    pub layout: SheetLayout,

    /// Chart title.
    #[arg(short = 't', long)]
    pub title: Option<String>,

    /// X axis label.
    #[arg(long)]
    pub x_label: Option<String>,

    /// Y axis label.
    #[arg(long)]
    pub y_label: Option<String>,

    /// Legend position.
    #[arg(long, value_enum)]
    pub legend: Option<LegendSpot>,

    /// Figure size, 6-15 (scales the pixel dimensions).
    #[arg(long)]
    pub fig_size: Option<u32>,

    /// Render side-by-side panes instead of one overlay.
    #[arg(long, action = ArgAction::SetTrue)]
    pub split: bool,

    /// Disable grid lines.
    #[arg(long, action = ArgAction::SetTrue)]
    pub no_grid: bool,

    /// Leave the experiment data out of the chart.
    #[arg(long, action = ArgAction::SetTrue)]
    pub hide_experiment: bool,

    /// Leave the model data out of the chart.
    #[arg(long, action = ArgAction::SetTrue)]
    pub hide_model: bool,

    /// Experiment color palette.
    #[arg(long, value_enum)]
    pub exp_palette: Option<PaletteKind>,

    /// Experiment marker shape.
    #[arg(long, value_enum)]
    pub exp_marker: Option<MarkerKind>,

    /// Experiment line style.
    #[arg(long, value_enum)]
    pub exp_line: Option<LineKind>,

    /// Model color palette.
    #[arg(long, value_enum)]
    pub model_palette: Option<PaletteKind>,

    /// Model marker shape.
    #[arg(long, value_enum)]
    pub model_marker: Option<MarkerKind>,

    /// Model line style.
    #[arg(long, value_enum)]
    pub model_line: Option<LineKind>,

    /// Write the chart PNG here (the default output when none is requested).
    #[arg(long, value_name = "PNG")]
    pub png: Option<PathBuf>,

    /// Write the chart SVG here.
    #[arg(long, value_name = "SVG")]
    pub svg: Option<PathBuf>,

    /// Write the plotted series as a wide CSV here.
    #[arg(long, value_name = "CSV")]
    pub csv: Option<PathBuf>,

    /// Directory for default-named outputs (overrides PLOTPAD_EXPORT_DIR).
    #[arg(long, value_name = "DIR")]
    pub export_dir: Option<PathBuf>,

    /// Also write a markdown debug bundle into this directory.
    #[arg(long, value_name = "DIR")]
    pub debug_dir: Option<PathBuf>,

    /// Verbose logging
    #[arg(long, action = ArgAction::SetTrue)]
    pub verbose: bool,
}

/// Options for inspecting sheets in the terminal.
#[derive(Debug, Parser)]
pub struct InspectArgs {
    /// Project JSON file saved from the studio.
    #[arg(short = 'p', long, value_name = "JSON")]
    pub project: Option<PathBuf>,

    /// Experiment sheet CSV (alternative to --project).
    #[arg(long, value_name = "CSV")]
    pub experiment: Option<PathBuf>,

    /// Model sheet CSV (alternative to --project).
    #[arg(long, value_name = "CSV")]
    pub model: Option<PathBuf>,

    /// Sheet layout the CSVs use.
    #[arg(long, value_enum, default_value_t = SheetLayout::PerSeries)]
    pub layout: SheetLayout,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,

    /// Verbose logging
    #[arg(long, action = ArgAction::SetTrue)]
    pub verbose: bool,
}

/// Options for writing the demo sheets.
#[derive(Debug, Parser)]
pub struct DemoArgs {
    /// Output directory for the demo CSVs.
    #[arg(long, value_name = "DIR", default_value = "demo")]
    pub dir: PathBuf,

    /// Sheet layout to generate.
    #[arg(long, value_enum, default_value_t = SheetLayout::PerSeries)]
    pub layout: SheetLayout,

    /// Grid rows to emit (blank rows pad the tail).
    #[arg(long, default_value_t = 10)]
    pub rows: usize,

    /// Gaussian noise sigma added to the y values (0 keeps the exact values).
    #[arg(long, default_value_t = 0.0)]
    pub noise: f64,

    /// Random seed for noise.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Verbose logging
    #[arg(long, action = ArgAction::SetTrue)]
    pub verbose: bool,
}
