//! Delimited-text backend

use std::fs::OpenOptions;
use std::path::Path;

use csv::{ReaderBuilder, WriterBuilder};

use crate::{LogRow, SinkResult, HEADER};

/// Append `row`; the header goes in only when the file did not exist yet.
/// An existing file's header is not re-validated.
pub fn append_row(path: &Path, row: &LogRow) -> SinkResult<()> {
    let is_new = !path.exists();
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    let mut wtr = WriterBuilder::new().has_headers(false).from_writer(file);
    if is_new {
        tracing::debug!(path = %path.display(), "new CSV log, writing header");
        wtr.write_record(HEADER)?;
    }
    wtr.serialize(row)?;
    wtr.flush()?;
    Ok(())
}

/// Read every data row back
pub fn read_rows(path: &Path) -> SinkResult<Vec<LogRow>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let rows = rdr.deserialize().collect::<Result<Vec<LogRow>, _>>()?;
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::metrics;
    use meister_core::RiskLevel;

    #[test]
    fn header_written_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("weather.csv");

        for _ in 0..3 {
            append_row(&path, &LogRow::new(&metrics("ORD", Some(1.0)), RiskLevel::Green)).unwrap();
        }

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(
            lines[0],
            "Observed (Eastern),Location,Temp (C),Wind (kph),Humidity (%),Condition,Risk"
        );
        assert_eq!(text.matches("Observed (Eastern)").count(), 1);
    }

    #[test]
    fn existing_file_gets_no_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("legacy.csv");
        std::fs::write(&path, "when,where\n").unwrap();

        append_row(&path, &LogRow::new(&metrics("JFK", None), RiskLevel::Amber)).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            text,
            "when,where\n2024-02-01T07:00:00-05:00,JFK,,12.0,,\"Fog, patchy\",amber\n"
        );
    }

    #[test]
    fn unknowns_are_empty_cells() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("w.csv");
        let mut m = metrics("SEA", None);
        m.wind_kph = None;
        m.condition = None;

        append_row(&path, &LogRow::new(&m, RiskLevel::Green)).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let data = text.lines().nth(1).unwrap();
        assert_eq!(data, "2024-02-01T07:00:00-05:00,SEA,,,,,green");
        assert!(!text.contains("None"));
    }

    #[test]
    fn rows_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("w.csv");
        let written = LogRow::new(&metrics("ORD", Some(-3.25)), RiskLevel::Red);
        append_row(&path, &written).unwrap();

        let rows = read_rows(&path).unwrap();
        assert_eq!(rows, vec![written]);
    }
}
