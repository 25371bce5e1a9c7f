//! Quoted CSV files used as the hand-off between pipeline stages.
//!
//! Every file starts with one header row. The header and the column count
//! are a fixed contract per record type: a file whose header differs, or
//! whose rows carry a different number of fields, is rejected rather than
//! read partially.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use csv::{QuoteStyle, ReaderBuilder, StringRecord, WriterBuilder};

use crate::error::CoreError;
use crate::records::{Engine, Game, NormalizedGame};

/// A record type with a fixed column layout.
pub trait Row: Sized {
    /// Header row, also defining the column count.
    const HEADER: &'static [&'static str];

    /// Build a row from a record already checked to have `HEADER.len()` fields.
    fn from_fields(record: &StringRecord) -> Self;

    /// Field values in `HEADER` order.
    fn fields(&self) -> Vec<&str>;
}

impl Row for Engine {
    const HEADER: &'static [&'static str] = &["id", "title"];

    fn from_fields(record: &StringRecord) -> Self {
        Self {
            id: record[0].to_string(),
            title: record[1].to_string(),
        }
    }

    fn fields(&self) -> Vec<&str> {
        vec![&self.id, &self.title]
    }
}

impl Row for Game {
    const HEADER: &'static [&'static str] = &["title", "engine", "engine_build", "release_dates"];

    fn from_fields(record: &StringRecord) -> Self {
        let build = &record[2];
        Self {
            title: record[0].to_string(),
            engine: record[1].to_string(),
            engine_build: (!build.is_empty()).then(|| build.to_string()),
            release_year: record[3].to_string(),
        }
    }

    fn fields(&self) -> Vec<&str> {
        vec![
            &self.title,
            &self.engine,
            self.engine_build.as_deref().unwrap_or(""),
            &self.release_year,
        ]
    }
}

impl Row for NormalizedGame {
    const HEADER: &'static [&'static str] = &["title", "engine", "release_dates"];

    fn from_fields(record: &StringRecord) -> Self {
        Self {
            title: record[0].to_string(),
            engine: record[1].to_string(),
            release_year: record[2].to_string(),
        }
    }

    fn fields(&self) -> Vec<&str> {
        vec![&self.title, &self.engine, &self.release_year]
    }
}

/// Write `rows` with a header, quoting every field. Returns the row count.
pub fn write_rows_to<W: Write, T: Row>(writer: W, rows: &[T]) -> Result<usize, CoreError> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .from_writer(writer);

    writer.write_record(T::HEADER)?;
    for row in rows {
        writer.write_record(row.fields())?;
    }
    writer.flush()?;

    Ok(rows.len())
}

/// Create or truncate `path` and write all `rows` to it.
pub fn write_rows<T: Row>(path: &Path, rows: &[T]) -> Result<usize, CoreError> {
    let file = File::create(path)?;
    let count = write_rows_to(file, rows)?;
    log::debug!("Wrote {count} rows to {}", path.display());
    Ok(count)
}

/// Read rows after validating the header against `T::HEADER`.
pub fn read_rows_from<R: Read, T: Row>(reader: R) -> Result<Vec<T>, CoreError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);
    let mut records = reader.records();

    let header = match records.next() {
        Some(result) => result?,
        None => return Err(CoreError::schema("missing header row")),
    };
    if !header.iter().eq(T::HEADER.iter().copied()) {
        return Err(CoreError::schema(format!(
            "expected header {:?}, found {:?}",
            T::HEADER,
            header.iter().collect::<Vec<_>>()
        )));
    }

    let mut rows = Vec::new();
    for result in records {
        let record = result?;
        if record.len() != T::HEADER.len() {
            let line = record.position().map(|p| p.line()).unwrap_or(0);
            return Err(CoreError::schema(format!(
                "line {line} has {} fields, expected {}",
                record.len(),
                T::HEADER.len()
            )));
        }
        rows.push(T::from_fields(&record));
    }

    Ok(rows)
}

/// Read all rows of `path`.
pub fn read_rows<T: Row>(path: &Path) -> Result<Vec<T>, CoreError> {
    let file = File::open(path)?;
    read_rows_from(file).map_err(|e| match e {
        CoreError::Schema(msg) => CoreError::schema(format!("{}: {msg}", path.display())),
        other => other,
    })
}

#[cfg(test)]
#[path = "tests/tabular_tests.rs"]
mod tests;
