use std::path::PathBuf;
use thiserror::Error;

/// Failures at the I/O edge. The derivation engines themselves never fail.
#[derive(Error, Debug)]
pub enum FlotaError {
    #[error("cannot read sheet '{sheet}' from {path}: {source}")]
    SourceRead {
        sheet: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("sheet '{0}' returned an HTML page instead of CSV (check sharing permissions)")]
    NotCsv(&'static str),

    #[error("sheet '{0}' is empty")]
    EmptySheet(&'static str),

    #[error("cannot read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON export failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, FlotaError>;
