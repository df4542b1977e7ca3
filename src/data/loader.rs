use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use csv::{ReaderBuilder, Trim};
use thiserror::Error;

use super::model::{CarRecord, Dataset, REQUIRED_COLUMNS};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),

    #[error("opening file")]
    Io(#[from] std::io::Error),

    #[error("reading header row")]
    Header(#[source] csv::Error),

    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),

    /// `row` is 1-based and counts data rows only.
    #[error("row {row}: {source}")]
    Csv {
        row: usize,
        #[source]
        source: csv::Error,
    },

    #[error("row {row}: '{column}' is not a finite number")]
    NonFinite { row: usize, column: &'static str },

    #[error("file contains no data rows")]
    Empty,

    #[error("column '{0}' has no values")]
    NoValues(&'static str),
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load the listings table from a delimited file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv` (or no extension) – comma separated
/// * `.tsv` / `.tab`          – tab separated
pub fn load_file(path: &Path) -> Result<Dataset> {
    let delimiter = delimiter_for(path)?;
    let file = File::open(path)
        .map_err(LoadError::from)
        .with_context(|| format!("loading {}", path.display()))?;
    let dataset = load_reader(file, delimiter)
        .with_context(|| format!("loading {}", path.display()))?;
    log::info!(
        "Loaded {} cars from {} ({} manufacturers)",
        dataset.len(),
        path.display(),
        dataset.manufacturers().len()
    );
    Ok(dataset)
}

fn delimiter_for(path: &Path) -> Result<u8, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "" | "csv" | "txt" => Ok(b','),
        "tsv" | "tab" => Ok(b'\t'),
        other => Err(LoadError::UnsupportedExtension(other.to_string())),
    }
}

/// Parse a table from any reader. The header row must name every column in
/// [`REQUIRED_COLUMNS`]; other columns are ignored. Blank numeric cells load
/// as missing values, anything else that is not a number is an error.
pub fn load_reader<R: Read>(reader: R, delimiter: u8) -> Result<Dataset, LoadError> {
    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .trim(Trim::All)
        .from_reader(reader);

    let headers = reader.headers().map_err(LoadError::Header)?.clone();
    if let Some(missing) = REQUIRED_COLUMNS
        .iter()
        .find(|col| !headers.iter().any(|h| h == **col))
    {
        return Err(LoadError::MissingColumn(*missing));
    }

    let mut rows = Vec::new();
    for (i, result) in reader.deserialize::<CarRecord>().enumerate() {
        let row = i + 1;
        let record = result.map_err(|source| LoadError::Csv { row, source })?;
        check_finite(&record, row)?;
        rows.push(record);
    }

    if rows.is_empty() {
        return Err(LoadError::Empty);
    }
    if rows.iter().all(|r| r.engine_size.is_none()) {
        return Err(LoadError::NoValues("Engine Size"));
    }
    Dataset::from_rows(rows).ok_or(LoadError::NoValues("Price In Thousands"))
}

fn check_finite(record: &CarRecord, row: usize) -> Result<(), LoadError> {
    let numeric = [
        ("Price In Thousands", record.price),
        ("Sales In Thousands", record.sales),
        ("Engine Size", record.engine_size),
        ("Horsepower", record.horsepower),
        ("Fuel Efficiency", record.fuel_efficiency),
    ];
    match numeric
        .iter()
        .find(|(_, v)| v.is_some_and(|v| !v.is_finite()))
    {
        Some(&(column, _)) => Err(LoadError::NonFinite { row, column }),
        None => Ok(()),
    }
}
