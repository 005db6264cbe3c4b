//! Column-oriented access to the CSV tables the pipeline reads and rewrites.
//!
//! Cells are kept as the raw text read from disk so that columns the
//! pipeline never touches are written back unchanged. Numeric access parses
//! on demand; an empty cell, `NaN` or an infinity is a missing value.
//! Header names are unique within a table.

use crate::error::{EcoError, Result};
use csv::{ReaderBuilder, WriterBuilder};
use serde::Serialize;
use std::collections::HashSet;
use std::io::{Read, Write};
use std::path::Path;

/// A named table of text cells with a header row.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    name: String,
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

/// Parse a cell as a number; empty, non-numeric, NaN and infinite cells are
/// missing.
pub fn parse_number(cell: &str) -> Option<f64> {
    let cell = cell.trim();
    if cell.is_empty() {
        return None;
    }
    cell.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Write a number with the shortest round-trip representation; missing
/// values become empty cells.
pub fn format_number(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{v:?}"),
        _ => String::new(),
    }
}

impl Table {
    pub fn new(name: &str, headers: Vec<String>, rows: Vec<Vec<String>>) -> Result<Table> {
        let mut seen = HashSet::with_capacity(headers.len());
        if let Some(duplicate) = headers.iter().find(|h| !seen.insert(h.as_str())) {
            return Err(EcoError::DuplicateColumn {
                table: name.to_string(),
                column: duplicate.clone(),
            });
        }
        for (index, row) in rows.iter().enumerate() {
            if row.len() != headers.len() {
                return Err(EcoError::RaggedRow {
                    table: name.to_string(),
                    row: index,
                    found: row.len(),
                    expected: headers.len(),
                });
            }
        }
        Ok(Table {
            name: name.to_string(),
            headers,
            rows,
        })
    }

    /// Read a CSV with a header row from any reader.
    pub fn from_reader<R: Read>(name: &str, reader: R) -> Result<Table> {
        let mut rdr = ReaderBuilder::new().has_headers(true).from_reader(reader);
        let headers = rdr.headers()?.iter().map(String::from).collect::<Vec<_>>();
        let mut rows = Vec::new();
        for result in rdr.records() {
            let record = result?;
            rows.push(record.iter().map(String::from).collect::<Vec<_>>());
        }
        Table::new(name, headers, rows)
    }

    /// Read a CSV file; the table is named after the file.
    pub fn read_csv(path: &Path) -> Result<Table> {
        let file = std::fs::File::open(path).map_err(|source| EcoError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let table = Table::from_reader(&name, file)?;
        log::debug!(
            "Loaded {} ({} rows, {} columns)",
            table.name,
            table.len(),
            table.headers.len()
        );
        Ok(table)
    }

    /// Build a table from serializable records, one record per row.
    ///
    /// `headers` names the record fields in order; it is passed explicitly
    /// so that an empty record list still yields the expected columns.
    pub fn from_records<T: Serialize>(name: &str, headers: &[&str], records: &[T]) -> Result<Table> {
        let mut writer = WriterBuilder::new()
            .has_headers(false)
            .from_writer(Vec::new());
        for record in records {
            writer.serialize(record)?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| csv::Error::from(e.into_error()))?;
        let mut rows = Vec::with_capacity(records.len());
        let mut rdr = ReaderBuilder::new()
            .has_headers(false)
            .from_reader(bytes.as_slice());
        for result in rdr.records() {
            rows.push(result?.iter().map(String::from).collect::<Vec<_>>());
        }
        Table::new(name, headers.iter().map(|h| h.to_string()).collect(), rows)
    }

    /// Write the table, header first, to any writer.
    pub fn write_to<W: Write>(&self, writer: W) -> Result<()> {
        let mut wtr = WriterBuilder::new().from_writer(writer);
        wtr.write_record(&self.headers)?;
        for row in &self.rows {
            wtr.write_record(row)?;
        }
        wtr.flush().map_err(csv::Error::from)?;
        Ok(())
    }

    /// Write the table to a CSV file, replacing any existing file.
    pub fn write_csv(&self, path: &Path) -> Result<()> {
        let file = std::fs::File::create(path).map_err(|source| EcoError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.write_to(file)?;
        log::debug!("Wrote {} rows to {}", self.len(), path.display());
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.headers.iter().any(|h| h == column)
    }

    pub fn column_index(&self, column: &str) -> Result<usize> {
        self.headers
            .iter()
            .position(|h| h == column)
            .ok_or_else(|| EcoError::MissingColumn {
                table: self.name.clone(),
                column: column.to_string(),
            })
    }

    /// Fail on the first column in `columns` the table lacks.
    pub fn require_columns(&self, columns: &[&str]) -> Result<()> {
        for column in columns {
            self.column_index(column)?;
        }
        Ok(())
    }

    pub fn text_column(&self, column: &str) -> Result<Vec<&str>> {
        let index = self.column_index(column)?;
        Ok(self.rows.iter().map(|row| row[index].as_str()).collect())
    }

    pub fn numeric_column(&self, column: &str) -> Result<Vec<Option<f64>>> {
        let index = self.column_index(column)?;
        Ok(self.rows.iter().map(|row| parse_number(&row[index])).collect())
    }

    /// Copy of the table with `column` set to `values`: replaced in place when
    /// the column exists, appended otherwise.
    pub fn with_column(&self, column: &str, values: Vec<String>) -> Result<Table> {
        if values.len() != self.rows.len() {
            return Err(EcoError::ColumnLength {
                table: self.name.clone(),
                column: column.to_string(),
                found: values.len(),
                expected: self.rows.len(),
            });
        }
        let mut table = self.clone();
        match table.headers.iter().position(|h| h == column) {
            Some(index) => {
                for (row, value) in table.rows.iter_mut().zip(values) {
                    row[index] = value;
                }
            }
            None => {
                table.headers.push(column.to_string());
                for (row, value) in table.rows.iter_mut().zip(values) {
                    row.push(value);
                }
            }
        }
        Ok(table)
    }

    pub fn with_numeric_column(&self, column: &str, values: &[Option<f64>]) -> Result<Table> {
        self.with_column(column, values.iter().map(|v| format_number(*v)).collect())
    }

    /// Copy of the table with a column renamed; `to` must not name another
    /// column.
    pub fn with_renamed_column(&self, from: &str, to: &str) -> Result<Table> {
        let index = self.column_index(from)?;
        if from != to && self.has_column(to) {
            return Err(EcoError::DuplicateColumn {
                table: self.name.clone(),
                column: to.to_string(),
            });
        }
        let mut table = self.clone();
        table.headers[index] = to.to_string();
        Ok(table)
    }

    /// Copy of the table without any of `columns`; absent names are ignored.
    pub fn without_columns(&self, columns: &[&str]) -> Table {
        let keep = self
            .headers
            .iter()
            .enumerate()
            .filter(|(_, h)| !columns.contains(&h.as_str()))
            .map(|(i, _)| i)
            .collect::<Vec<_>>();
        Table {
            name: self.name.clone(),
            headers: keep.iter().map(|&i| self.headers[i].clone()).collect(),
            rows: self
                .rows
                .iter()
                .map(|row| keep.iter().map(|&i| row[i].clone()).collect())
                .collect(),
        }
    }

    /// Copy of the table with rows taken in `order` (indices into this table).
    pub fn with_row_order(&self, order: &[usize]) -> Table {
        Table {
            name: self.name.clone(),
            headers: self.headers.clone(),
            rows: order.iter().map(|&i| self.rows[i].clone()).collect(),
        }
    }

    /// Copy of the table under a different name, for output files.
    pub fn renamed(&self, name: &str) -> Table {
        Table {
            name: name.to_string(),
            ..self.clone()
        }
    }
}
