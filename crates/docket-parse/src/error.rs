use docket_core::NormalizeError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("table {table:?} has {found} row(s), expected at least {expected}")]
    MissingRows {
        table: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("table {table:?} row {row}: {found} cell(s), expected {expected}")]
    MalformedRow {
        table: &'static str,
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error(transparent)]
    Normalize(#[from] NormalizeError),
}
