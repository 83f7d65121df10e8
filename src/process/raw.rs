// src/process/raw.rs

use csv::ReaderBuilder;
use std::{fs::File, io::Read, path::Path};
use tracing::{debug, instrument, warn};

use crate::error::{Error, Result};

/// One input channel list, exactly as read from disk.
#[derive(Debug, Clone, PartialEq)]
pub struct RawTable {
    /// Source name, taken from the file stem (`airports.csv` → `airports`).
    pub name: String,
    /// Header row, whitespace-trimmed.
    pub headers: Vec<String>,
    /// Data rows in file order, one `String` per cell.
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn new(name: impl Into<String>, headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self {
            name: name.into(),
            headers,
            rows,
        }
    }

    /// Position of `header` in the header row (exact match).
    pub fn column(&self, header: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == header)
    }

    /// Cell text; short rows read as empty cells.
    pub fn cell<'a>(row: &'a [String], idx: usize) -> &'a str {
        row.get(idx).map(String::as_str).unwrap_or("")
    }
}

/// Source name for an input path: its file stem.
pub fn source_name<P: AsRef<Path>>(path: P) -> String {
    path.as_ref()
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default()
}

/// Parse CSV text with a header row into a [`RawTable`] named `name`.
pub fn parse_raw_table<R: Read>(name: &str, reader: R, origin: &Path) -> Result<RawTable> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true) // ragged rows are kept short; `RawTable::cell` reads missing cells as empty
        .from_reader(reader);

    let headers: Vec<String> = rdr
        .headers()
        .map_err(|e| Error::csv(origin, e))?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result.map_err(|e| Error::csv(origin, e))?;
        if record.len() > headers.len() {
            warn!(
                source = name,
                line = record.position().map(|p| p.line()),
                "row has more cells than headers; extra cells ignored"
            );
        }
        rows.push(record.iter().map(|s| s.to_string()).collect());
    }

    Ok(RawTable::new(name, headers, rows))
}

/// Read one input file. The source name is the file stem.
#[instrument(level = "debug", skip(path), fields(path = %path.as_ref().display()))]
pub fn load_raw_table<P: AsRef<Path>>(path: P) -> Result<RawTable> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| Error::io(path, e))?;
    let table = parse_raw_table(&source_name(path), file, path)?;
    debug!(
        columns = table.headers.len(),
        rows = table.rows.len(),
        "loaded raw table"
    );
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use std::io::Cursor;

    #[test]
    fn parses_headers_and_rows_in_order() -> Result<()> {
        let text = "Frequency, Description ,Extra\n146.52,Tower A,x\n\n147.00,\"Hill, B\"\n";
        let table = parse_raw_table("repeaters", Cursor::new(text), Path::new("repeaters.csv"))?;

        assert_eq!(table.name, "repeaters");
        assert_eq!(table.headers, vec!["Frequency", "Description", "Extra"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0], vec!["146.52", "Tower A", "x"]);
        assert_eq!(RawTable::cell(&table.rows[1], 1), "Hill, B");
        assert_eq!(RawTable::cell(&table.rows[1], 2), "");
        assert_eq!(table.column("Description"), Some(1));
        assert_eq!(table.column("description"), None);
        Ok(())
    }

    #[test]
    fn source_name_is_file_stem() {
        assert_eq!(source_name("raw_data/airports.csv"), "airports");
        assert_eq!(source_name(Path::new("gmrs.csv")), "gmrs");
    }

    #[test]
    fn load_from_disk() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("marine.csv");
        std::fs::write(&path, "Frequency,Description\n156.8,Ch 16\n")?;
        let table = load_raw_table(&path)?;
        assert_eq!(table.name, "marine");
        assert_eq!(table.rows, vec![vec!["156.8".to_string(), "Ch 16".to_string()]]);
        Ok(())
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_raw_table("/nonexistent/nowhere.csv").unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}
