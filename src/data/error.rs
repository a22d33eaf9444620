use std::path::PathBuf;

use thiserror::Error;

/// Failure to read one of the two input files. Fatal at startup.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("data file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("failed to load {}: {reason}", path.display())]
    Malformed { path: PathBuf, reason: String },
}

/// An expected column is absent. Non-fatal: the dependent feature is skipped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("the '{column}' column is missing from the {dataset} data")]
pub struct SchemaGap {
    pub column: String,
    pub dataset: String,
}

/// Why an aggregate could not be produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AggregateError {
    #[error(transparent)]
    MissingColumn(#[from] SchemaGap),

    #[error("computation failed: {0}")]
    Computation(String),

    #[error("no common players between regular season and playoffs")]
    NoCommonPlayers,

    #[error("'{0}' does not appear in both datasets")]
    NotCommon(String),
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("spreadsheet export failed: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("writing export file failed: {0}")]
    Io(#[from] std::io::Error),
}
