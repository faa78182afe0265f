//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - loads projects or sheet CSVs
//! - extracts series and renders/exports charts
//! - prints summaries and text plots
//! - launches the interactive studio

use std::fs::create_dir_all;
use std::io;
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Command, DemoArgs, InspectArgs, RenderArgs, StudioArgs};
use crate::data::{demo_project, DemoConfig};
use crate::domain::{ChartMode, DatasetKind, Project, SheetLayout};
use crate::error::AppError;
use crate::sheet::CellWarning;

pub mod pipeline;

/// Entry point for the `plotpad` binary.
pub fn run() -> Result<(), AppError> {
    // We want `plotpad` and `plotpad -p my.json` to behave like `plotpad studio ...`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of the
    // argv list before parsing. This preserves a clean clap structure while
    // retaining the requested UX.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Studio(args) => handle_studio(args),
        Command::Render(args) => handle_render(args),
        Command::Inspect(args) => handle_inspect(args),
        Command::Demo(args) => handle_demo(args),
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn handle_studio(args: StudioArgs) -> Result<(), AppError> {
    let (project, path) = match &args.project {
        Some(path) => (crate::io::load_project(path)?, Some(path.clone())),
        None => {
            let config = DemoConfig {
                layout: args.layout,
                ..DemoConfig::default()
            };
            (demo_project(&config)?, None)
        }
    };
    crate::tui::run(project, path, args.export_dir)
}

fn handle_render(args: RenderArgs) -> Result<(), AppError> {
    init_tracing(args.verbose);

    let mut loaded = load_input_project(&args.project, &args.experiment, &args.model, args.layout)?;
    apply_overrides(&mut loaded.project, &args);
    let targets = resolve_targets(&args, &loaded.project)?;

    let mut output = pipeline::run_render(&loaded.project, &targets)?;
    merge_load_warnings(&mut output, loaded.experiment_warnings, loaded.model_warnings);

    if let Some(dir) = &args.debug_dir {
        let bundle = crate::debug::write_debug_bundle(&loaded.project, &output, dir)?;
        output.written.push(bundle);
    }

    println!(
        "{}",
        crate::report::format_render_summary(&loaded.project, &output)
    );
    Ok(())
}

fn handle_inspect(args: InspectArgs) -> Result<(), AppError> {
    init_tracing(args.verbose);

    let loaded = load_input_project(&args.project, &args.experiment, &args.model, args.layout)?;
    loaded.project.validate()?;

    let mut output = pipeline::extract_project(&loaded.project);
    merge_load_warnings(&mut output, loaded.experiment_warnings, loaded.model_warnings);
    if output.experiment.is_empty() && output.model.is_empty() {
        return Err(AppError::new(3, pipeline::EMPTY_DATA_WARNING));
    }

    println!(
        "{}",
        crate::report::format_render_summary(&loaded.project, &output)
    );
    let spec = pipeline::project_spec(&loaded.project, &output);
    println!(
        "{}",
        crate::plot::render_text_chart(&spec, args.width, args.height)
    );
    Ok(())
}

fn handle_demo(args: DemoArgs) -> Result<(), AppError> {
    init_tracing(args.verbose);

    let config = DemoConfig {
        layout: args.layout,
        rows: args.rows,
        noise: args.noise,
        seed: args.seed,
    };
    let project = demo_project(&config)?;

    create_dir_all(&args.dir).map_err(|e| {
        AppError::new(
            2,
            format!("Cannot create demo dir '{}': {e}", args.dir.display()),
        )
    })?;

    for kind in DatasetKind::ALL {
        let path = args.dir.join(format!("{}.csv", kind.display_name()));
        crate::io::write_sheet_csv(&path, project.grid(kind))?;
        println!("Wrote {}", path.display());
    }

    let path = args.dir.join("demo_project.json");
    crate::io::save_project(&path, &project)?;
    println!("Wrote {}", path.display());
    Ok(())
}

/// A project plus any warnings its sheet CSVs produced while loading.
struct LoadedProject {
    project: Project,
    experiment_warnings: Vec<CellWarning>,
    model_warnings: Vec<CellWarning>,
}

fn load_input_project(
    project: &Option<PathBuf>,
    experiment: &Option<PathBuf>,
    model: &Option<PathBuf>,
    layout: SheetLayout,
) -> Result<LoadedProject, AppError> {
    if let Some(path) = project {
        if experiment.is_some() || model.is_some() {
            return Err(AppError::new(
                2,
                "Use either --project or --experiment/--model, not both.",
            ));
        }
        return Ok(LoadedProject {
            project: crate::io::load_project(path)?,
            experiment_warnings: Vec::new(),
            model_warnings: Vec::new(),
        });
    }
    if experiment.is_none() && model.is_none() {
        return Err(AppError::new(
            2,
            "Provide --project or at least one of --experiment/--model.",
        ));
    }

    let mut out = Project::empty(layout, 1);
    let mut experiment_warnings = Vec::new();
    let mut model_warnings = Vec::new();
    if let Some(path) = experiment {
        let (grid, warnings) = crate::io::read_sheet_csv(path, layout)?;
        out.experiment = grid;
        experiment_warnings = warnings;
    }
    if let Some(path) = model {
        let (grid, warnings) = crate::io::read_sheet_csv(path, layout)?;
        out.model = grid;
        model_warnings = warnings;
    }
    out.normalize();
    Ok(LoadedProject {
        project: out,
        experiment_warnings,
        model_warnings,
    })
}

fn merge_load_warnings(
    output: &mut pipeline::RenderOutput,
    experiment: Vec<CellWarning>,
    model: Vec<CellWarning>,
) {
    output.experiment_warnings = prepend(experiment, std::mem::take(&mut output.experiment_warnings));
    output.model_warnings = prepend(model, std::mem::take(&mut output.model_warnings));
}

fn prepend(mut head: Vec<CellWarning>, tail: Vec<CellWarning>) -> Vec<CellWarning> {
    head.extend(tail);
    head
}

fn apply_overrides(project: &mut Project, args: &RenderArgs) {
    let o = &mut project.options;
    if let Some(title) = &args.title {
        o.title = title.clone();
    }
    if let Some(label) = &args.x_label {
        o.x_label = label.clone();
    }
    if let Some(label) = &args.y_label {
        o.y_label = label.clone();
    }
    if let Some(legend) = args.legend {
        o.legend = legend;
    }
    if let Some(size) = args.fig_size {
        o.fig_size = size;
    }
    if args.split {
        o.mode = ChartMode::Split;
    }
    if args.no_grid {
        o.show_grid = false;
    }
    if args.hide_experiment {
        o.show_experiment = false;
    }
    if args.hide_model {
        o.show_model = false;
    }

    if let Some(palette) = args.exp_palette {
        project.experiment_style.palette = palette;
    }
    if let Some(marker) = args.exp_marker {
        project.experiment_style.marker = marker;
    }
    if let Some(line) = args.exp_line {
        project.experiment_style.line = line;
    }
    if let Some(palette) = args.model_palette {
        project.model_style.palette = palette;
    }
    if let Some(marker) = args.model_marker {
        project.model_style.marker = marker;
    }
    if let Some(line) = args.model_line {
        project.model_style.line = line;
    }
}

/// Pick the files a render should write. Explicit paths win; with none given,
/// a PNG named after the title lands in the export directory.
fn resolve_targets(
    args: &RenderArgs,
    project: &Project,
) -> Result<pipeline::OutputTargets, AppError> {
    let mut targets = pipeline::OutputTargets {
        png: args.png.clone(),
        svg: args.svg.clone(),
        csv: args.csv.clone(),
    };
    if targets.is_empty() {
        let dir = resolve_export_dir(&args.export_dir);
        create_dir_all(&dir).map_err(|e| {
            AppError::new(
                2,
                format!("Cannot create export dir '{}': {e}", dir.display()),
            )
        })?;
        targets.png = Some(dir.join(default_png_name(project)));
    }
    Ok(targets)
}

/// Export directory precedence: `--export-dir`, then `PLOTPAD_EXPORT_DIR`
/// (a `.env` file works), then the working directory.
pub(crate) fn resolve_export_dir(flag: &Option<PathBuf>) -> PathBuf {
    if let Some(dir) = flag {
        return dir.clone();
    }
    dotenvy::dotenv().ok();
    match std::env::var("PLOTPAD_EXPORT_DIR") {
        Ok(dir) if !dir.trim().is_empty() => PathBuf::from(dir),
        _ => PathBuf::from("."),
    }
}

/// Default-named export targets (PNG + SVG + CSV) inside `dir`.
pub(crate) fn default_export_targets(
    project: &Project,
    dir: &std::path::Path,
) -> pipeline::OutputTargets {
    let stem = default_file_stem(project);
    pipeline::OutputTargets {
        png: Some(dir.join(default_png_name(project))),
        svg: Some(dir.join(format!("{stem}.svg"))),
        csv: Some(dir.join(format!("{stem}_data.csv"))),
    }
}

fn default_png_name(project: &Project) -> String {
    let stem = default_file_stem(project);
    match project.options.mode {
        ChartMode::Overlay => format!("{stem}.png"),
        ChartMode::Split => format!("{stem}_separated.png"),
    }
}

/// Filename stem from the chart title, with path-hostile characters replaced.
fn default_file_stem(project: &Project) -> String {
    let stem: String = project
        .options
        .title
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c => c,
        })
        .collect();
    let stem = stem.trim().to_string();
    if stem.is_empty() {
        "chart".to_string()
    } else {
        stem
    }
}

/// Rewrite argv so `plotpad` defaults to `plotpad studio`.
///
/// Rules:
/// - `plotpad`                     -> `plotpad studio`
/// - `plotpad -p my.json ...`      -> `plotpad studio -p my.json ...`
/// - `plotpad --help/--version/-h` -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("studio".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "studio" | "render" | "inspect" | "demo");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "studio flags".
    if arg1.starts_with('-') {
        argv.insert(1, "studio".to_string());
        return argv;
    }

    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_defaults_to_studio() {
        assert_eq!(rewrite_args(argv(&["plotpad"])), argv(&["plotpad", "studio"]));
        assert_eq!(
            rewrite_args(argv(&["plotpad", "-p", "my.json"])),
            argv(&["plotpad", "studio", "-p", "my.json"])
        );
    }

    #[test]
    fn subcommands_and_help_pass_through() {
        assert_eq!(
            rewrite_args(argv(&["plotpad", "render", "-p", "my.json"])),
            argv(&["plotpad", "render", "-p", "my.json"])
        );
        assert_eq!(
            rewrite_args(argv(&["plotpad", "--help"])),
            argv(&["plotpad", "--help"])
        );
    }

    #[test]
    fn default_png_name_follows_title_and_mode() {
        let mut project = Project::empty(SheetLayout::Shared, 1);
        assert_eq!(default_png_name(&project), "Data Comparison.png");
        project.options.mode = ChartMode::Split;
        assert_eq!(default_png_name(&project), "Data Comparison_separated.png");
        project.options.title = "a/b:c".to_string();
        assert_eq!(default_png_name(&project), "a_b_c_separated.png");
        project.options.title = "   ".to_string();
        assert_eq!(default_png_name(&project), "chart_separated.png");
    }

    #[test]
    fn overrides_only_touch_given_options() {
        let mut project = Project::empty(SheetLayout::Shared, 1);
        let args = RenderArgs::parse_from([
            "render",
            "--experiment",
            "exp.csv",
            "--title",
            "Run 7",
            "--split",
            "--no-grid",
            "--model-line",
            "dashed",
        ]);
        apply_overrides(&mut project, &args);
        assert_eq!(project.options.title, "Run 7");
        assert_eq!(project.options.mode, ChartMode::Split);
        assert!(!project.options.show_grid);
        assert_eq!(project.options.x_label, "X");
        assert_eq!(
            project.model_style.line,
            crate::domain::LineKind::Dashed
        );
        assert_eq!(
            project.experiment_style.line,
            crate::domain::LineKind::None
        );
    }
}
