//! Reads raw location rows from a header-having CSV source.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::Result;
use csv::ReaderBuilder;
use flate2::read::GzDecoder;
use tracing::{debug, info};

use crate::error::InputError;
use crate::record::RawRecord;

/// Minimum number of fields per row: device id, latitude, longitude, timestamp.
pub const REQUIRED_FIELDS: usize = 4;

/// Reads every row of `path`, transparently decompressing `.gz` files.
///
/// # Errors
///
/// Fails before returning any row if the file cannot be opened or any row has
/// fewer than [`REQUIRED_FIELDS`] fields.
#[tracing::instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn read_records(path: impl AsRef<Path>) -> Result<Vec<RawRecord>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| InputError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let gzipped = path.extension().and_then(|e| e.to_str()) == Some("gz");
    debug!(gzipped, "Opened input");

    let records = if gzipped {
        read_records_from(GzDecoder::new(file))?
    } else {
        read_records_from(file)?
    };

    info!(rows = records.len(), "Input read");
    Ok(records)
}

/// Reads CSV rows from any reader. The first row is the header.
pub fn read_records_from<R: Read>(reader: R) -> Result<Vec<RawRecord>, InputError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut rows = rdr.records();
    match rows.next() {
        Some(header) => {
            header?;
        }
        None => return Err(InputError::MissingHeader),
    }

    let mut records = Vec::new();
    for row in rows {
        let row = row?;
        let line = row.position().map(|p| p.line()).unwrap_or_default();

        if row.len() < REQUIRED_FIELDS {
            return Err(InputError::MalformedRecord {
                line,
                fields: row.len(),
            });
        }

        records.push(RawRecord::new(line, &row[0], &row[1], &row[2], &row[3]));
    }

    Ok(records)
}
