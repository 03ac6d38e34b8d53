mod file;

pub use file::{FlowLogFileSource, FlowLogReaderSource};

use thiserror::Error;

/// Line-oriented input for the aggregation pass.
pub trait LineSource {
    /// Next raw line without its line terminator, or `None` at end of input.
    fn next_line(&mut self) -> Result<Option<String>, SourceError>;
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("read error at line {line}: {source}")]
    Read {
        line: u64,
        #[source]
        source: std::io::Error,
    },
}
