//! CSV loading and saving of sheet grids.
//!
//! Loading is schema-checked but cell-tolerant: the required columns for the
//! layout must exist (clear errors + exit code 2), while cell contents are
//! copied in as raw text for the extraction scan to judge later. Only
//! malformed CSV records produce warnings here.

use std::collections::HashMap;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use csv::StringRecord;

use crate::domain::SheetLayout;
use crate::error::AppError;
use crate::sheet::{CellWarning, Grid};

/// Load a sheet CSV into a grid of the given layout.
pub fn read_sheet_csv(path: &Path, layout: SheetLayout) -> Result<(Grid, Vec<CellWarning>), AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open CSV '{}': {e}", path.display())))?;
    read_sheet_records(file, layout)
}

/// Reader-generic core of [`read_sheet_csv`].
pub fn read_sheet_records<R: Read>(
    reader: R,
    layout: SheetLayout,
) -> Result<(Grid, Vec<CellWarning>), AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|e| AppError::new(2, format!("Failed to read CSV headers: {e}")))?
        .clone();
    let header_map = build_header_map(&headers);

    let (mut grid, columns) = match layout {
        SheetLayout::Shared => shared_columns(&header_map)?,
        SheetLayout::PerSeries => per_series_columns(&header_map)?,
    };

    let mut warnings = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        // +2: records() starts after the header row and CSV lines are 1-based.
        let line = idx + 2;
        let record = match result {
            Ok(r) => r,
            Err(e) => {
                warnings.push(CellWarning {
                    line,
                    column: "row".to_string(),
                    message: format!("CSV parse error: {e}"),
                });
                continue;
            }
        };
        let row = grid.row_count();
        grid.add_row();
        for (grid_col, file_col) in columns.iter().enumerate() {
            let Some(file_col) = file_col else { continue };
            if let Some(value) = record.get(*file_col) {
                grid.set_cell(row, grid_col, value.trim());
            }
        }
    }

    if grid.row_count() == 0 {
        return Err(AppError::new(3, "No data rows found in CSV."));
    }
    Ok((grid, warnings))
}

/// Write a grid back out as CSV, headers first.
pub fn write_sheet_csv(path: &Path, grid: &Grid) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create '{}': {e}", path.display())))?;
    let mut writer = csv::Writer::from_writer(file);
    write_sheet_records(&mut writer, grid)
        .map_err(|e| AppError::new(2, format!("Failed to write '{}': {e}", path.display())))
}

pub fn write_sheet_records<W: Write>(
    writer: &mut csv::Writer<W>,
    grid: &Grid,
) -> Result<(), csv::Error> {
    writer.write_record(grid.headers())?;
    for row in 0..grid.row_count() {
        if let Some(cells) = grid.row(row) {
            writer.write_record(cells)?;
        }
    }
    writer.flush()?;
    Ok(())
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect()
}

fn normalize_header_name(name: &str) -> String {
    // Spreadsheet exports sometimes prefix the first header with a UTF-8 BOM;
    // without stripping it the schema check would report `label` as missing.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase()
}

/// Grid-column to file-column mapping for the shared layout. Only the label
/// and first (X, Y) group are required; later groups fill in when present.
fn shared_columns(
    header_map: &HashMap<String, usize>,
) -> Result<(Grid, Vec<Option<usize>>), AppError> {
    for required in ["label", "x1", "y1"] {
        if !header_map.contains_key(required) {
            return Err(AppError::new(
                2,
                format!("Missing required column: `{required}`"),
            ));
        }
    }
    let grid = Grid::new(SheetLayout::Shared, 3, 0);
    let mut columns = vec![header_map.get("label").copied()];
    for k in 1..=grid.groups() {
        columns.push(header_map.get(&format!("x{k}")).copied());
        columns.push(header_map.get(&format!("y{k}")).copied());
    }
    Ok((grid, columns))
}

/// Per-series grids take their group count from the file: groups are read
/// while `label{k}`, `x{k}`, `y{k}` stay contiguous from 1.
fn per_series_columns(
    header_map: &HashMap<String, usize>,
) -> Result<(Grid, Vec<Option<usize>>), AppError> {
    let mut groups = 0usize;
    loop {
        let k = groups + 1;
        let complete = header_map.contains_key(&format!("label{k}"))
            && header_map.contains_key(&format!("x{k}"))
            && header_map.contains_key(&format!("y{k}"));
        if !complete {
            break;
        }
        groups = k;
    }
    if groups == 0 {
        return Err(AppError::new(
            2,
            "Missing required columns: `label1`, `x1`, `y1`.",
        ));
    }
    let grid = Grid::new(SheetLayout::PerSeries, groups, 0);
    let mut columns = Vec::with_capacity(grid.width());
    for k in 1..=groups {
        columns.push(header_map.get(&format!("label{k}")).copied());
        columns.push(header_map.get(&format!("x{k}")).copied());
        columns.push(header_map.get(&format!("y{k}")).copied());
    }
    Ok((grid, columns))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shared_csv_loads_with_bom_and_odd_case_headers() {
        let csv = "\u{feff}Label,X1,Y1\nExp1,1,10\n,2,15\n";
        let (grid, warnings) = read_sheet_records(csv.as_bytes(), SheetLayout::Shared).unwrap();
        assert!(warnings.is_empty());
        assert_eq!(grid.row_count(), 2);
        assert_eq!(grid.groups(), 3);
        assert_eq!(grid.cell(0, 0), "Exp1");
        assert_eq!(grid.cell(1, 2), "15");
        assert_eq!(grid.cell(0, 3), "");
    }

    #[test]
    fn shared_csv_missing_schema_is_a_config_error() {
        let csv = "Label,X1\nA,1\n";
        let err = read_sheet_records(csv.as_bytes(), SheetLayout::Shared).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("y1"));
    }

    #[test]
    fn per_series_csv_detects_group_count() {
        let csv = "Label1,X1,Y1,Label2,X2,Y2\ns1,1,10,t1,5,50\n";
        let (grid, _) = read_sheet_records(csv.as_bytes(), SheetLayout::PerSeries).unwrap();
        assert_eq!(grid.groups(), 2);
        assert_eq!(grid.cell(0, 3), "t1");
    }

    #[test]
    fn per_series_csv_without_group_one_fails() {
        let csv = "Label2,X2,Y2\ns,1,1\n";
        let err = read_sheet_records(csv.as_bytes(), SheetLayout::PerSeries).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn empty_csv_reports_no_data() {
        let csv = "Label,X1,Y1\n";
        let err = read_sheet_records(csv.as_bytes(), SheetLayout::Shared).unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn grid_round_trips_through_csv_text() {
        let mut grid = Grid::new(SheetLayout::Shared, 3, 1);
        grid.set_cell(0, 0, "label, with comma");
        grid.set_cell(0, 1, "1");
        grid.set_cell(0, 2, "10");
        let mut writer = csv::Writer::from_writer(Vec::new());
        write_sheet_records(&mut writer, &grid).unwrap();
        let bytes = writer.into_inner().unwrap();
        let (back, _) = read_sheet_records(bytes.as_slice(), SheetLayout::Shared).unwrap();
        assert_eq!(back.cell(0, 0), "label, with comma");
        assert_eq!(back.cell(0, 2), "10");
    }
}
