//! Error handling for capgains
//!
//! Structural failures (missing columns, bad configuration) are typed with
//! `thiserror`; everything else travels as `anyhow::Error` with context.
//! Per-row data problems are not errors: see [`crate::tax::Anomaly`].

use thiserror::Error;

/// Structural errors that stop a run
#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("missing column: {0}")]
    MissingColumn(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("io error")]
    Io(#[from] std::io::Error),
}

/// Result type alias for ledger operations
pub type Result<T> = anyhow::Result<T>;
