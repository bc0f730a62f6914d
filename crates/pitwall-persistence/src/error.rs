//! Persistence layer error types

use thiserror::Error;

/// Persistence layer errors
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error in table {table}: {message}")]
    Csv { table: String, message: String },

    #[error("Table {table} is missing required column '{column}'")]
    MissingColumn { table: String, column: String },

    #[error("Duplicate key in table {table}: {key}")]
    DuplicateKey { table: String, key: String },
}

impl PersistenceError {
    pub(crate) fn csv(table: &str, err: &csv::Error) -> Self {
        Self::Csv {
            table: table.to_string(),
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PersistenceError>;
