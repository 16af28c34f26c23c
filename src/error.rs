//! Fatal input errors. Per-record problems are [`crate::validate::RejectReason`]s instead.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("cannot open input {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed record at line {line}: expected at least 4 fields, found {fields}")]
    MalformedRecord { line: u64, fields: usize },

    #[error("input has no header row")]
    MissingHeader,

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
