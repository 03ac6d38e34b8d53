use thiserror::Error;

/// Errors returned while reading a lookup source.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Reasons a single lookup row is left out of the table.
///
/// # Examples
/// ```
/// use flowtag_core::RowRejection;
///
/// let rejection = RowRejection::InvalidPort {
///     port: "http".to_string(),
/// };
/// assert!(rejection.to_string().contains("invalid port"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RowRejection {
    #[error("expected 3 fields, got {found}")]
    FieldCount { found: usize },
    #[error("empty field")]
    EmptyField,
    #[error("invalid port: {port}")]
    InvalidPort { port: String },
}
