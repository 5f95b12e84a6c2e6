//! xlsx workbook backend
//!
//! Only compiled with the `xlsx` feature. Without it every workbook path
//! fails with [`SinkError::CapabilityMissing`].
//!
//! The header row is written whenever the target sheet is empty. That
//! covers a brand-new file as well as a sheet freshly added to an existing
//! workbook, so every sheet this backend creates starts with a header.

use std::path::Path;

use crate::{LogRow, SinkError, SinkResult};

#[cfg(not(feature = "xlsx"))]
pub fn append_row(path: &Path, _sheet: &str, _row: &LogRow) -> SinkResult<()> {
    Err(SinkError::CapabilityMissing {
        path: path.to_path_buf(),
    })
}

#[cfg(not(feature = "xlsx"))]
pub fn read_rows(path: &Path, _sheet: &str) -> SinkResult<Vec<Vec<String>>> {
    Err(SinkError::CapabilityMissing {
        path: path.to_path_buf(),
    })
}

#[cfg(feature = "xlsx")]
pub use enabled::*;

#[cfg(feature = "xlsx")]
mod enabled {
    use super::*;
    use crate::HEADER;
    use umya_spreadsheet::{reader, writer, Spreadsheet, Worksheet};

    fn workbook_err(e: impl std::fmt::Display) -> SinkError {
        SinkError::Workbook(e.to_string())
    }

    fn open_or_create(path: &Path) -> SinkResult<Spreadsheet> {
        if path.exists() {
            reader::xlsx::read(path).map_err(workbook_err)
        } else {
            tracing::debug!(path = %path.display(), "creating workbook");
            Ok(umya_spreadsheet::new_file_empty_worksheet())
        }
    }

    fn sheet_mut<'a>(book: &'a mut Spreadsheet, name: &str) -> SinkResult<&'a mut Worksheet> {
        if book.get_sheet_by_name(name).is_none() {
            tracing::debug!(sheet = name, "adding sheet");
            book.new_sheet(name).map_err(workbook_err)?;
        }
        book.get_sheet_by_name_mut(name)
            .ok_or_else(|| SinkError::Workbook(format!("sheet {name} missing after creation")))
    }

    fn write_text(ws: &mut Worksheet, col: u32, row: u32, value: &str) {
        ws.get_cell_mut((col, row)).set_value(value);
    }

    fn write_number(ws: &mut Worksheet, col: u32, row: u32, value: Option<f64>) {
        if let Some(v) = value {
            ws.get_cell_mut((col, row)).set_value_number(v);
        }
    }

    pub fn append_row(path: &Path, sheet: &str, row: &LogRow) -> SinkResult<()> {
        let mut book = open_or_create(path)?;
        let ws = sheet_mut(&mut book, sheet)?;

        if ws.get_highest_row() == 0 {
            for (i, title) in HEADER.iter().enumerate() {
                write_text(ws, i as u32 + 1, 1, title);
            }
        }

        let r = ws.get_highest_row() + 1;
        write_text(ws, 1, r, &row.observed);
        write_text(ws, 2, r, &row.location);
        write_number(ws, 3, r, row.temperature_c);
        write_number(ws, 4, r, row.wind_kph);
        write_number(ws, 5, r, row.humidity_percent);
        if let Some(condition) = row.condition.as_deref() {
            write_text(ws, 6, r, condition);
        }
        write_text(ws, 7, r, row.risk.as_str());

        writer::xlsx::write(&book, path).map_err(workbook_err)
    }

    /// Cell text of every row in `sheet`, header included
    pub fn read_rows(path: &Path, sheet: &str) -> SinkResult<Vec<Vec<String>>> {
        let book = reader::xlsx::read(path).map_err(workbook_err)?;
        let ws = book
            .get_sheet_by_name(sheet)
            .ok_or_else(|| SinkError::Workbook(format!("no sheet named {sheet}")))?;

        let rows = (1..=ws.get_highest_row())
            .map(|r| {
                (1..=HEADER.len() as u32)
                    .map(|c| ws.get_value((c, r)))
                    .collect()
            })
            .collect();
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::metrics;
    use meister_core::RiskLevel;

    #[cfg(not(feature = "xlsx"))]
    #[test]
    fn missing_capability_points_at_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("weather.xlsx");
        let row = LogRow::new(&metrics("ORD", Some(1.0)), RiskLevel::Green);

        let err = append_row(&path, "Weather", &row).unwrap_err();
        assert!(matches!(err, SinkError::CapabilityMissing { .. }));
        assert!(err.to_string().contains(".csv"));
        assert!(!path.exists());
    }

    #[cfg(feature = "xlsx")]
    #[test]
    fn new_workbook_has_header_then_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("weather.xlsx");

        append_row(&path, "Weather", &LogRow::new(&metrics("ORD", Some(19.4)), RiskLevel::Green))
            .unwrap();
        append_row(&path, "Weather", &LogRow::new(&metrics("JFK", None), RiskLevel::Red)).unwrap();

        let rows = read_rows(&path, "Weather").unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], crate::HEADER.map(String::from).to_vec());
        assert_eq!(rows[1][1], "ORD");
        assert_eq!(rows[1][2], "19.4");
        assert_eq!(rows[1][6], "green");
        assert_eq!(rows[2][2], "");
        assert_eq!(rows[2][4], "");
        assert_eq!(rows[2][6], "red");
    }

    #[cfg(feature = "xlsx")]
    #[test]
    fn new_sheet_in_existing_workbook_gets_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("weather.xlsx");
        let row = LogRow::new(&metrics("ORD", Some(5.0)), RiskLevel::Amber);

        append_row(&path, "Weather", &row).unwrap();
        append_row(&path, "Night", &row).unwrap();

        let night = read_rows(&path, "Night").unwrap();
        assert_eq!(night.len(), 2);
        assert_eq!(night[0][0], "Observed (Eastern)");
        assert_eq!(night[1][6], "amber");

        // the original sheet is untouched
        assert_eq!(read_rows(&path, "Weather").unwrap().len(), 2);
    }
}
