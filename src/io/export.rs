//! Data export for rendered charts.
//!
//! The CSV is wide: every series contributes an `{label}_X` and `{label}_Y`
//! column pair, and shorter series are padded with empty cells so each row
//! has the full width.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::domain::SeriesData;
use crate::error::AppError;

pub fn write_series_csv(path: &Path, series: &[SeriesData]) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create '{}': {e}", path.display())))?;
    let mut writer = csv::Writer::from_writer(file);
    write_series_records(&mut writer, series)
        .map_err(|e| AppError::new(2, format!("Failed to write '{}': {e}", path.display())))
}

pub fn write_series_records<W: Write>(
    writer: &mut csv::Writer<W>,
    series: &[SeriesData],
) -> Result<(), csv::Error> {
    if series.is_empty() {
        return writer.flush().map_err(csv::Error::from);
    }

    let mut header = Vec::with_capacity(series.len() * 2);
    for s in series {
        header.push(format!("{}_X", s.label));
        header.push(format!("{}_Y", s.label));
    }
    writer.write_record(&header)?;

    let rows = series.iter().map(SeriesData::len).max().unwrap_or(0);
    for row in 0..rows {
        let mut record = Vec::with_capacity(series.len() * 2);
        for s in series {
            if row < s.len() {
                record.push(s.x[row].to_string());
                record.push(s.y[row].to_string());
            } else {
                record.push(String::new());
                record.push(String::new());
            }
        }
        writer.write_record(&record)?;
    }
    writer.flush()?;
    Ok(())
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

    fn render(series: &[SeriesData]) -> String {
        let mut writer = csv::Writer::from_writer(Vec::new());
        write_series_records(&mut writer, series).unwrap();
        String::from_utf8(writer.into_inner().unwrap()).unwrap()
    }

    #[test]
    fn wide_layout_pads_short_series() {
        let out = render(&[
            series("Exp1", &[1.0, 2.0, 3.0], &[10.0, 15.0, 13.0]),
            series("Model1", &[1.0], &[9.0]),
        ]);
        let mut lines = out.lines();
        assert_eq!(lines.next(), Some("Exp1_X,Exp1_Y,Model1_X,Model1_Y"));
        assert_eq!(lines.next(), Some("1,10,1,9"));
        assert_eq!(lines.next(), Some("2,15,,"));
        assert_eq!(lines.next(), Some("3,13,,"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn fractional_values_keep_their_precision() {
        let out = render(&[series("a", &[1.5], &[13.5])]);
        assert!(out.contains("1.5,13.5"));
    }

    #[test]
    fn no_series_produces_no_rows() {
        assert_eq!(render(&[]), "");
    }
}
