use std::path::PathBuf;

use thiserror::Error;

use crate::ingestion::tokenizer::UnterminatedQuote;
use crate::referencing::FactoryError;

/// Convenience result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;

/// Error type returned by the table stages and the document assembler.
///
/// Every variant is fatal: recoverable row problems (unsupported features, unresolved references,
/// unknown projection methods, duplicate keys) never surface here, they are reported to a
/// [`crate::ingestion::PipelineObserver`] instead.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Underlying I/O error (e.g. file not found, permission denied).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV reader error.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// Configuration file could not be decoded.
    #[error("config error: {0}")]
    ConfigFormat(#[from] serde_json::Error),

    /// Configuration is structurally valid but unusable (missing directory, missing table...).
    #[error("invalid configuration: {message}")]
    Config { message: String },

    /// A configured input table does not exist.
    #[error("missing {table} table: {}", .path.display())]
    MissingTable { table: &'static str, path: PathBuf },

    /// The referencing model rejected a definition.
    #[error("{table} line {line}: {source}")]
    Factory {
        table: &'static str,
        line: usize,
        #[source]
        source: FactoryError,
    },

    /// A quoted field was opened but never closed on the same line.
    #[error("{table} line {line}: {source}")]
    Tokenize {
        table: &'static str,
        line: usize,
        #[source]
        source: UnterminatedQuote,
    },

    /// A token outside a closed vocabulary (axis direction, coordinate system type).
    #[error("{table} line {line}: unrecognized {column} '{value}' (expected {expected})")]
    MalformedEnumeration {
        table: &'static str,
        line: usize,
        column: &'static str,
        value: String,
        expected: &'static str,
    },

    /// The base CRS of a projection has a longitude axis that is neither east nor west.
    #[error("{table} line {line}: unexpected axis direction '{direction}' in base CRS '{base}'")]
    UnexpectedAxisDirection {
        table: &'static str,
        line: usize,
        base: String,
        direction: String,
    },

    /// A numeric cell could not be parsed.
    #[error("{table} line {line}: failed to parse value in column '{column}': {message} (raw='{raw}')")]
    ParseError {
        table: &'static str,
        line: usize,
        column: String,
        raw: String,
        message: String,
    },
}
