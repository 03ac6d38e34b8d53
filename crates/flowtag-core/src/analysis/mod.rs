use std::path::Path;

use thiserror::Error;
use tracing::debug;

use crate::lookup::LookupTable;
use crate::registry::ProtocolRegistry;
use crate::source::{FlowLogFileSource, LineSource, SourceError};

mod aggregator;
mod counts;

pub use aggregator::Aggregator;
pub use counts::{PortProtocolCounts, TagCounts};

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Source error: {0}")]
    Source(#[from] SourceError),
}

/// Run the aggregation pass over a flow-log file.
///
/// # Errors
/// Returns `AnalysisError` when the file cannot be opened or read. Counts
/// accumulated before a read failure remain in `aggregator`.
pub fn analyze_flow_log_file(
    path: &Path,
    registry: &ProtocolRegistry,
    lookup: &LookupTable,
    aggregator: &mut Aggregator,
) -> Result<(), AnalysisError> {
    let source = FlowLogFileSource::open(path)?;
    analyze_source(source, registry, lookup, aggregator)
}

/// Run the aggregation pass over any line source, in order, once.
pub fn analyze_source<S: LineSource>(
    mut source: S,
    registry: &ProtocolRegistry,
    lookup: &LookupTable,
    aggregator: &mut Aggregator,
) -> Result<(), AnalysisError> {
    let mut lines = 0u64;
    let mut accepted = 0u64;
    while let Some(line) = source.next_line()? {
        lines += 1;
        if aggregator.ingest_line(&line, registry, lookup) {
            accepted += 1;
        }
    }
    debug!(lines, accepted, "flow log processed");
    Ok(())
}
