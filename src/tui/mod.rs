//! Ratatui-based interactive studio.
//!
//! The studio shows both data sheets next to a live chart preview and a style
//! panel. Cells are edited in place (or pasted in bulk from a spreadsheet);
//! every change re-extracts the series so the preview always matches what a
//! render would produce.

use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crossterm::{
    event::{self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{
        Block, Borders, Cell, Clear, List, ListItem, ListState, Paragraph, Row, Table, Wrap,
    },
    Terminal,
};

use crate::app::pipeline::{self, RenderOutput};
use crate::chart::ChartSpec;
use crate::domain::{DatasetKind, Project, SheetLayout, FIG_SIZE_MAX, FIG_SIZE_MIN};
use crate::error::AppError;

mod plotters_chart;

use plotters_chart::PreviewChart;

const MAX_GROUPS: usize = 6;

/// Start the studio with a project (loaded or freshly seeded).
///
/// `save_path` is where `s` writes the project; pass `None` for a default
/// file in the working directory. `export_dir` overrides the usual export
/// directory resolution for the `e` key.
pub fn run(
    project: Project,
    save_path: Option<PathBuf>,
    export_dir: Option<PathBuf>,
) -> Result<(), AppError> {
    // Register the bundled font before the alternate screen grabs stdout,
    // so a failure prints normally.
    crate::chart::ensure_fonts()?;

    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::new(4, format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(project, save_path, export_dir);
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen, paste mode)
/// on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::new(4, format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen, EnableBracketedPaste) {
            let _ = disable_raw_mode();
            return Err(AppError::new(4, format!("Failed to enter alternate screen: {e}")));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), DisableBracketedPaste, LeaveAlternateScreen);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Experiment,
    Model,
    Style,
}

impl Focus {
    fn next(self) -> Self {
        match self {
            Focus::Experiment => Focus::Model,
            Focus::Model => Focus::Style,
            Focus::Style => Focus::Experiment,
        }
    }

    fn grid_kind(self) -> Option<DatasetKind> {
        match self {
            Focus::Experiment => Some(DatasetKind::Experiment),
            Focus::Model => Some(DatasetKind::Model),
            Focus::Style => None,
        }
    }

    fn title(self) -> &'static str {
        match self {
            Focus::Experiment => "experiment sheet",
            Focus::Model => "model sheet",
            Focus::Style => "style panel",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StyleRow {
    Title,
    XLabel,
    YLabel,
    Legend,
    FigSize,
    Mode,
    GridLines,
    Layout,
    ShowExperiment,
    ExpPalette,
    ExpMarker,
    ExpLine,
    ShowModel,
    ModelPalette,
    ModelMarker,
    ModelLine,
}

impl StyleRow {
    const ALL: [StyleRow; 16] = [
        StyleRow::Title,
        StyleRow::XLabel,
        StyleRow::YLabel,
        StyleRow::Legend,
        StyleRow::FigSize,
        StyleRow::Mode,
        StyleRow::GridLines,
        StyleRow::Layout,
        StyleRow::ShowExperiment,
        StyleRow::ExpPalette,
        StyleRow::ExpMarker,
        StyleRow::ExpLine,
        StyleRow::ShowModel,
        StyleRow::ModelPalette,
        StyleRow::ModelMarker,
        StyleRow::ModelLine,
    ];

    fn label(self) -> &'static str {
        match self {
            StyleRow::Title => "Title",
            StyleRow::XLabel => "X label",
            StyleRow::YLabel => "Y label",
            StyleRow::Legend => "Legend",
            StyleRow::FigSize => "Figure size",
            StyleRow::Mode => "Chart mode",
            StyleRow::GridLines => "Grid lines",
            StyleRow::Layout => "Sheet layout",
            StyleRow::ShowExperiment => "Show experiment",
            StyleRow::ExpPalette => "Experiment palette",
            StyleRow::ExpMarker => "Experiment marker",
            StyleRow::ExpLine => "Experiment line",
            StyleRow::ShowModel => "Show model",
            StyleRow::ModelPalette => "Model palette",
            StyleRow::ModelMarker => "Model marker",
            StyleRow::ModelLine => "Model line",
        }
    }

    /// Text rows open an edit buffer on Enter; the rest cycle in place.
    fn is_text(self) -> bool {
        matches!(self, StyleRow::Title | StyleRow::XLabel | StyleRow::YLabel)
    }
}

struct App {
    project: Project,
    save_path: PathBuf,
    export_dir: Option<PathBuf>,
    focus: Focus,
    exp_cursor: (usize, usize),
    model_cursor: (usize, usize),
    style_row: usize,
    edit: Option<String>,
    status: String,
}

impl App {
    fn new(mut project: Project, save_path: Option<PathBuf>, export_dir: Option<PathBuf>) -> Self {
        project.normalize();
        Self {
            project,
            save_path: save_path.unwrap_or_else(|| PathBuf::from("plotpad_project.json")),
            export_dir,
            focus: Focus::Experiment,
            exp_cursor: (0, 0),
            model_cursor: (0, 0),
            style_row: 0,
            edit: None,
            status: "Ready. Tab cycles focus, Enter edits a cell, q quits.".to_string(),
        }
    }

    fn event_loop<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::new(4, format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::new(4, format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| AppError::new(4, format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code) {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Paste(data) => {
                    self.handle_paste(&data);
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Returns true when the studio should quit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        if self.edit.is_some() {
            self.handle_edit_key(code);
            return false;
        }

        match code {
            KeyCode::Char('q') => return true,
            KeyCode::Tab => {
                self.focus = self.focus.next();
                self.status = format!("Focus: {}", self.focus.title());
            }
            KeyCode::Up => self.handle_arrow(-1, 0),
            KeyCode::Down => self.handle_arrow(1, 0),
            KeyCode::Left => self.handle_arrow(0, -1),
            KeyCode::Right => self.handle_arrow(0, 1),
            KeyCode::Enter => self.begin_edit(),
            KeyCode::Char('a') => self.add_row(),
            KeyCode::Char('+') | KeyCode::Char('=') => self.change_groups(1),
            KeyCode::Char('-') => self.change_groups(-1),
            KeyCode::Delete | KeyCode::Char('x') => self.clear_cell(),
            KeyCode::Char('c') => self.clear_sheet(),
            KeyCode::Char('g') => {
                let o = &mut self.project.options;
                o.show_grid = !o.show_grid;
                self.status = format!("Grid lines: {}", on_off(o.show_grid));
            }
            KeyCode::Char('m') => {
                let o = &mut self.project.options;
                o.mode = o.mode.toggle();
                self.status = format!("Chart mode: {}", o.mode.display_name());
            }
            KeyCode::Char('s') => self.save(),
            KeyCode::Char('e') => self.export(),
            KeyCode::Char('d') => self.write_debug(),
            _ => {}
        }

        false
    }

    fn handle_edit_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc => {
                self.edit = None;
                self.status = "Edit canceled.".to_string();
            }
            KeyCode::Enter => self.commit_edit(),
            KeyCode::Backspace => {
                if let Some(buffer) = &mut self.edit {
                    buffer.pop();
                }
            }
            KeyCode::Char(c) => {
                if let Some(buffer) = &mut self.edit {
                    if !c.is_control() {
                        buffer.push(c);
                    }
                }
            }
            _ => {}
        }
    }

    fn handle_arrow(&mut self, dr: i32, dc: i32) {
        match self.focus {
            Focus::Style => {
                if dr < 0 {
                    self.style_row = self.style_row.saturating_sub(1);
                } else if dr > 0 {
                    self.style_row = (self.style_row + 1).min(StyleRow::ALL.len() - 1);
                } else {
                    self.adjust_style(dc);
                }
            }
            Focus::Experiment | Focus::Model => {
                let kind = match self.focus {
                    Focus::Experiment => DatasetKind::Experiment,
                    _ => DatasetKind::Model,
                };
                let (rows, cols) = {
                    let grid = self.project.grid(kind);
                    (grid.row_count(), grid.width())
                };
                let cursor = self.cursor_mut(kind);
                if dr < 0 {
                    cursor.0 = cursor.0.saturating_sub(1);
                } else if dr > 0 {
                    cursor.0 = (cursor.0 + 1).min(rows.saturating_sub(1));
                }
                if dc < 0 {
                    cursor.1 = cursor.1.saturating_sub(1);
                } else if dc > 0 {
                    cursor.1 = (cursor.1 + 1).min(cols.saturating_sub(1));
                }
            }
        }
    }

    fn begin_edit(&mut self) {
        match self.focus {
            Focus::Experiment | Focus::Model => {
                let kind = match self.focus {
                    Focus::Experiment => DatasetKind::Experiment,
                    _ => DatasetKind::Model,
                };
                let (row, col) = self.cursor(kind);
                self.edit = Some(self.project.grid(kind).cell(row, col).to_string());
                self.status = "Editing cell. Enter applies, Esc cancels.".to_string();
            }
            Focus::Style => {
                let row = StyleRow::ALL[self.style_row];
                if row.is_text() {
                    self.edit = Some(self.style_value(row));
                    self.status = "Editing text. Enter applies, Esc cancels.".to_string();
                } else {
                    self.adjust_style(1);
                }
            }
        }
    }

    fn commit_edit(&mut self) {
        let Some(buffer) = self.edit.take() else {
            return;
        };
        match self.focus {
            Focus::Experiment | Focus::Model => {
                let kind = match self.focus {
                    Focus::Experiment => DatasetKind::Experiment,
                    _ => DatasetKind::Model,
                };
                let (row, col) = self.cursor(kind);
                self.project.grid_mut(kind).set_cell(row, col, buffer.trim());
                self.status = "Cell updated.".to_string();
            }
            Focus::Style => {
                let text = buffer.trim().to_string();
                let o = &mut self.project.options;
                match StyleRow::ALL[self.style_row] {
                    StyleRow::Title => o.title = text,
                    StyleRow::XLabel => o.x_label = text,
                    StyleRow::YLabel => o.y_label = text,
                    _ => {}
                }
                self.status = "Applied.".to_string();
            }
        }
    }

    fn adjust_style(&mut self, delta: i32) {
        let row = StyleRow::ALL[self.style_row];
        match row {
            StyleRow::Title | StyleRow::XLabel | StyleRow::YLabel => {
                self.status = "Press Enter to edit text.".to_string();
                return;
            }
            StyleRow::Legend => {
                let o = &mut self.project.options;
                o.legend = if delta >= 0 {
                    o.legend.next()
                } else {
                    o.legend.prev()
                };
            }
            StyleRow::FigSize => {
                let o = &mut self.project.options;
                let next = o.fig_size as i64 + delta as i64;
                o.fig_size = next.clamp(FIG_SIZE_MIN as i64, FIG_SIZE_MAX as i64) as u32;
            }
            StyleRow::Mode => {
                let o = &mut self.project.options;
                o.mode = o.mode.toggle();
            }
            StyleRow::GridLines => {
                let o = &mut self.project.options;
                o.show_grid = !o.show_grid;
            }
            StyleRow::Layout => {
                self.project.layout = match self.project.layout {
                    SheetLayout::Shared => SheetLayout::PerSeries,
                    SheetLayout::PerSeries => SheetLayout::Shared,
                };
                self.project.normalize();
                self.clamp_cursors();
            }
            StyleRow::ShowExperiment => {
                let o = &mut self.project.options;
                o.show_experiment = !o.show_experiment;
            }
            StyleRow::ExpPalette => {
                let s = &mut self.project.experiment_style;
                s.palette = if delta >= 0 { s.palette.next() } else { s.palette.prev() };
            }
            StyleRow::ExpMarker => {
                let s = &mut self.project.experiment_style;
                s.marker = if delta >= 0 { s.marker.next() } else { s.marker.prev() };
            }
            StyleRow::ExpLine => {
                let s = &mut self.project.experiment_style;
                s.line = if delta >= 0 { s.line.next() } else { s.line.prev() };
            }
            StyleRow::ShowModel => {
                let o = &mut self.project.options;
                o.show_model = !o.show_model;
            }
            StyleRow::ModelPalette => {
                let s = &mut self.project.model_style;
                s.palette = if delta >= 0 { s.palette.next() } else { s.palette.prev() };
            }
            StyleRow::ModelMarker => {
                let s = &mut self.project.model_style;
                s.marker = if delta >= 0 { s.marker.next() } else { s.marker.prev() };
            }
            StyleRow::ModelLine => {
                let s = &mut self.project.model_style;
                s.line = if delta >= 0 { s.line.next() } else { s.line.prev() };
            }
        }
        self.status = format!("{}: {}", row.label(), self.style_value(row));
    }

    fn add_row(&mut self) {
        let Some(kind) = self.focus.grid_kind() else {
            self.status = "Row ops apply to a sheet; Tab to one first.".to_string();
            return;
        };
        self.project.grid_mut(kind).add_row();
        self.status = format!("Added row to {} sheet.", kind.display_name());
    }

    fn change_groups(&mut self, delta: i32) {
        if self.project.layout == SheetLayout::Shared {
            self.status = "Shared layout always has 3 column groups.".to_string();
            return;
        }
        let groups = (self.project.groups() as i64 + delta as i64).clamp(1, MAX_GROUPS as i64);
        self.project.set_groups(groups as usize);
        self.clamp_cursors();
        self.status = format!("Column groups: {groups}");
    }

    fn clear_cell(&mut self) {
        let Some(kind) = self.focus.grid_kind() else {
            self.status = "Cell ops apply to a sheet; Tab to one first.".to_string();
            return;
        };
        let (row, col) = self.cursor(kind);
        self.project.grid_mut(kind).set_cell(row, col, "");
        self.status = "Cleared cell.".to_string();
    }

    fn clear_sheet(&mut self) {
        let Some(kind) = self.focus.grid_kind() else {
            self.status = "Sheet ops apply to a sheet; Tab to one first.".to_string();
            return;
        };
        self.project.grid_mut(kind).clear();
        self.status = format!("Cleared {} sheet.", kind.display_name());
    }

    fn handle_paste(&mut self, data: &str) {
        let Some(kind) = self.focus.grid_kind() else {
            self.status = "Paste targets a sheet; Tab to one first.".to_string();
            return;
        };
        let (row, col) = self.cursor(kind);
        let (rows, cols) = self.project.grid_mut(kind).paste_block(row, col, data);
        if rows == 0 {
            self.status = "Clipboard block was empty.".to_string();
        } else {
            self.status = format!("Pasted {rows}x{cols} block at row {}.", row + 1);
        }
    }

    fn save(&mut self) {
        match crate::io::save_project(&self.save_path, &self.project) {
            Ok(()) => self.status = format!("Saved {}", self.save_path.display()),
            Err(err) => self.status = format!("Save failed: {err}"),
        }
    }

    fn export(&mut self) {
        let dir = crate::app::resolve_export_dir(&self.export_dir);
        if let Err(e) = std::fs::create_dir_all(&dir) {
            self.status = format!("Export failed: {e}");
            return;
        }
        let targets = crate::app::default_export_targets(&self.project, &dir);
        match pipeline::run_render(&self.project, &targets) {
            Ok(output) => {
                self.status = format!(
                    "Exported {} file(s) to {}",
                    output.written.len(),
                    dir.display()
                );
            }
            Err(err) => self.status = format!("Export failed: {err}"),
        }
    }

    fn write_debug(&mut self) {
        let output = pipeline::extract_project(&self.project);
        match crate::debug::write_debug_bundle(&self.project, &output, Path::new("debug")) {
            Ok(path) => self.status = format!("Wrote debug bundle: {}", path.display()),
            Err(err) => self.status = format!("Debug write failed: {err}"),
        }
    }

    fn cursor(&self, kind: DatasetKind) -> (usize, usize) {
        match kind {
            DatasetKind::Experiment => self.exp_cursor,
            DatasetKind::Model => self.model_cursor,
        }
    }

    fn cursor_mut(&mut self, kind: DatasetKind) -> &mut (usize, usize) {
        match kind {
            DatasetKind::Experiment => &mut self.exp_cursor,
            DatasetKind::Model => &mut self.model_cursor,
        }
    }

    /// Keep cursors inside the grids after layout or group changes.
    fn clamp_cursors(&mut self) {
        for kind in DatasetKind::ALL {
            let (rows, cols) = {
                let grid = self.project.grid(kind);
                (grid.row_count(), grid.width())
            };
            let cursor = self.cursor_mut(kind);
            cursor.0 = cursor.0.min(rows.saturating_sub(1));
            cursor.1 = cursor.1.min(cols.saturating_sub(1));
        }
    }

    fn style_value(&self, row: StyleRow) -> String {
        let o = &self.project.options;
        match row {
            StyleRow::Title => o.title.clone(),
            StyleRow::XLabel => o.x_label.clone(),
            StyleRow::YLabel => o.y_label.clone(),
            StyleRow::Legend => o.legend.display_name().to_string(),
            StyleRow::FigSize => o.fig_size.to_string(),
            StyleRow::Mode => o.mode.display_name().to_string(),
            StyleRow::GridLines => on_off(o.show_grid),
            StyleRow::Layout => self.project.layout.display_name().to_string(),
            StyleRow::ShowExperiment => on_off(o.show_experiment),
            StyleRow::ExpPalette => self.project.experiment_style.palette.display_name().to_string(),
            StyleRow::ExpMarker => self.project.experiment_style.marker.display_name().to_string(),
            StyleRow::ExpLine => self.project.experiment_style.line.display_name().to_string(),
            StyleRow::ShowModel => on_off(o.show_model),
            StyleRow::ModelPalette => self.project.model_style.palette.display_name().to_string(),
            StyleRow::ModelMarker => self.project.model_style.marker.display_name().to_string(),
            StyleRow::ModelLine => self.project.model_style.line.display_name().to_string(),
        }
    }

    fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
        let output = pipeline::extract_project(&self.project);
        let spec = pipeline::project_spec(&self.project, &output);

        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Min(0),
                Constraint::Length(3),
            ])
            .split(size);

        self.draw_header(frame, chunks[0], &output);
        self.draw_body(frame, chunks[1], &spec);
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect, output: &RenderOutput) {
        let mut lines: Vec<Line> = Vec::new();
        lines.push(Line::from(vec![
            Span::styled("plotpad", Style::default().fg(Color::Cyan)),
            Span::raw(" — experiment vs model charts"),
        ]));

        let exp_points: usize = output.experiment.iter().map(|s| s.len()).sum();
        let model_points: usize = output.model.iter().map(|s| s.len()).sum();
        lines.push(Line::from(Span::styled(
            format!(
                "layout: {} | groups: {} | mode: {} | fig: {} | experiment: {} series / {} pts | model: {} series / {} pts | warnings: {}",
                self.project.layout.display_name(),
                self.project.groups(),
                self.project.options.mode.display_name(),
                self.project.options.fig_size,
                output.experiment.len(),
                exp_points,
                output.model.len(),
                model_points,
                output.warning_count(),
            ),
            Style::default().fg(Color::Gray),
        )));

        let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_body(&self, frame: &mut ratatui::Frame<'_>, area: Rect, spec: &ChartSpec) {
        let halves = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
            .split(area);

        let sheets = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(halves[0]);
        self.draw_sheet(frame, sheets[0], DatasetKind::Experiment);
        self.draw_sheet(frame, sheets[1], DatasetKind::Model);

        let right = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(18)])
            .split(halves[1]);
        self.draw_preview(frame, right[0], spec);
        self.draw_style_panel(frame, right[1]);
    }

    fn draw_sheet(&self, frame: &mut ratatui::Frame<'_>, area: Rect, kind: DatasetKind) {
        let grid = self.project.grid(kind);
        let focused = self.focus.grid_kind() == Some(kind);
        let cursor = self.cursor(kind);

        let title = match kind {
            DatasetKind::Experiment => "Experiment",
            DatasetKind::Model => "Model",
        };
        let mut block = Block::default().title(title).borders(Borders::ALL);
        if focused {
            block = block.border_style(Style::default().fg(Color::Cyan));
        }
        let inner = block.inner(area);
        frame.render_widget(block, area);

        // One line goes to the header row.
        let visible = inner.height.saturating_sub(1) as usize;
        let (start, end) = window(grid.row_count(), visible, cursor.0);

        let mut header_cells = vec![Cell::from("#")];
        header_cells.extend(grid.headers().into_iter().map(Cell::from));
        let header =
            Row::new(header_cells).style(Style::default().add_modifier(Modifier::BOLD));

        let rows = (start..end).map(|r| {
            let mut cells = vec![
                Cell::from(format!("{}", r + 1)).style(Style::default().fg(Color::DarkGray)),
            ];
            for c in 0..grid.width() {
                let on_cursor = focused && (r, c) == cursor;
                let cell = if on_cursor {
                    if let Some(buffer) = &self.edit {
                        Cell::from(format!("{buffer}_")).style(
                            Style::default()
                                .fg(Color::Yellow)
                                .add_modifier(Modifier::REVERSED),
                        )
                    } else {
                        Cell::from(grid.cell(r, c).to_string())
                            .style(Style::default().add_modifier(Modifier::REVERSED))
                    }
                } else {
                    Cell::from(grid.cell(r, c).to_string())
                };
                cells.push(cell);
            }
            Row::new(cells)
        });

        let mut widths = vec![Constraint::Length(4)];
        for c in 0..grid.width() {
            let is_label = match grid.layout() {
                SheetLayout::Shared => c == 0,
                SheetLayout::PerSeries => c % 3 == 0,
            };
            widths.push(if is_label {
                Constraint::Length(12)
            } else {
                Constraint::Length(9)
            });
        }

        let table = Table::new(rows, widths).header(header).column_spacing(1);
        frame.render_widget(table, inner);
    }

    fn draw_preview(&self, frame: &mut ratatui::Frame<'_>, area: Rect, spec: &ChartSpec) {
        let block = Block::default().title("Preview").borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        if spec.is_empty() {
            let msg = Paragraph::new(pipeline::EMPTY_DATA_WARNING)
                .style(Style::default().fg(Color::Yellow))
                .wrap(Wrap { trim: true });
            frame.render_widget(msg, inner);
            return;
        }

        frame.render_widget(PreviewChart { spec }, inner);
    }

    fn draw_style_panel(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let focused = self.focus == Focus::Style;

        let mut items = Vec::new();
        for (i, row) in StyleRow::ALL.iter().enumerate() {
            let value = if focused && i == self.style_row && self.edit.is_some() {
                format!("{}_", self.edit.as_deref().unwrap_or(""))
            } else {
                self.style_value(*row)
            };
            items.push(ListItem::new(format!("{}: {}", row.label(), value)));
        }

        let mut block = Block::default().title("Style").borders(Borders::ALL);
        if focused {
            block = block.border_style(Style::default().fg(Color::Cyan));
        }
        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().fg(Color::Black).bg(Color::White))
            .highlight_symbol("» ");

        let mut state = ListState::default();
        state.select(focused.then_some(self.style_row));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "Tab focus  arrows move/adjust  Enter edit  a row  +/- groups  x clear  c clear sheet  g grid  m mode  s save  e export  d debug  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

fn on_off(value: bool) -> String {
    if value { "on" } else { "off" }.to_string()
}

/// Visible row window: keeps the cursor centered once the grid outgrows the
/// viewport, pinned at the edges.
fn window(total: usize, visible: usize, cursor: usize) -> (usize, usize) {
    if visible == 0 || total <= visible {
        return (0, total);
    }
    let half = visible / 2;
    let start = cursor.saturating_sub(half).min(total - visible);
    (start, start + visible)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_window_tracks_cursor() {
        assert_eq!(window(5, 10, 0), (0, 5));
        assert_eq!(window(20, 10, 0), (0, 10));
        assert_eq!(window(20, 10, 10), (5, 15));
        assert_eq!(window(20, 10, 19), (10, 20));
        assert_eq!(window(20, 0, 3), (0, 20));
    }

    #[test]
    fn style_panel_covers_every_option() {
        assert_eq!(StyleRow::ALL.len(), 16);
        assert!(StyleRow::Title.is_text());
        assert!(StyleRow::XLabel.is_text());
        assert!(!StyleRow::Legend.is_text());
        assert!(!StyleRow::ModelLine.is_text());
    }
}
