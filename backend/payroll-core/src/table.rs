// src/table.rs
use csv::{ReaderBuilder, Trim};
use std::{fs::File, io, io::Read, path::Path};
use tracing::{debug, error, info};

use crate::error::PayrollError;

/// A CSV file held fully in memory: a header row plus string cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    /// Name used in diagnostics, usually the source file path
    pub label: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(label: impl Into<String>, headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self {
            label: label.into(),
            headers,
            rows,
        }
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }
}

// Short rows are tolerated; a missing trailing cell reads as empty.
pub fn cell(row: &[String], column: usize) -> &str {
    row.get(column).map(String::as_str).unwrap_or("")
}

/// Parses CSV text with a header row into a [`Table`].
pub fn read_csv<R: Read>(label: &str, reader: R) -> Result<Table, csv::Error> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let headers: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();
    let mut rows = Vec::new();
    for record in rdr.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_string).collect());
    }
    debug!("Parsed {} columns and {} rows from {}", headers.len(), rows.len(), label);

    Ok(Table::new(label, headers, rows))
}

/// Loads a CSV file from disk.
///
/// A file that does not exist is a `MissingInput`; anything else that stops
/// the file from being read or parsed is `UnreadableInput`.
pub fn load_csv(path: &Path) -> Result<Table, PayrollError> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            error!("Input file {} not found", path.display());
            return Err(PayrollError::MissingInput {
                path: path.to_path_buf(),
            });
        }
        Err(e) => {
            error!("Failed to open {}: {}", path.display(), e);
            return Err(PayrollError::unreadable(path, e));
        }
    };

    let label = path.display().to_string();
    let table = read_csv(&label, file).map_err(|e| {
        error!("Failed to parse {}: {}", label, e);
        PayrollError::unreadable(path, e)
    })?;

    if table.headers.iter().all(|h| h.is_empty()) {
        error!("{} has no header row", label);
        return Err(PayrollError::unreadable(path, "No columns to parse from file"));
    }

    info!("Loaded {} ({} records)", label, table.len());
    Ok(table)
}
