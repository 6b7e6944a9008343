//! Itinerary file ingest.
//!
//! Reads a delimited itinerary export into the raw row matrix the
//! calculation engine consumes. The header stays in the output as row 0 —
//! the engine skips it itself — and short rows are kept here too, since
//! row-level validation belongs to the engine, not the reader.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("failed to read itinerary file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse itinerary row: {0}")]
    Csv(#[from] csv::Error),
}

/// Read delimited rows from any reader, preserving row and cell order.
pub fn read_rows<R: Read>(reader: R, delimiter: u8) -> Result<Vec<Vec<String>>, IngestError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut rows = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    debug!("Read {} itinerary rows", rows.len());
    Ok(rows)
}

/// Load an itinerary file from disk.
pub fn load_rows(path: &Path, delimiter: u8) -> Result<Vec<Vec<String>>, IngestError> {
    let file = File::open(path)?;
    read_rows(file, delimiter)
}
