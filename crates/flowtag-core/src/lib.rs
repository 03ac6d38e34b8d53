//! FlowTag core library for flow-log classification.
//!
//! This crate implements the single-pass pipeline used by the CLI: a line
//! source feeds the flow-log decoder (layout/reader/parser), accepted records
//! are classified against a user-supplied lookup table, and the aggregator
//! accumulates per-tag and per-port/protocol counts into an ordered report.
//! Decoding is side-effect free; file access is isolated in `source`,
//! `lookup` and `report`.
//!
//! Invariants:
//! - Malformed or unsupported lines never abort a run; they are skipped.
//! - Report rows keep first-seen order from the aggregation pass.
//! - Accumulators are caller-owned, so partial results survive I/O failures.
//!
//! # Examples
//! ```no_run
//! use std::path::Path;
//!
//! use flowtag_core::{
//!     Aggregator, LookupTable, ProtocolRegistry, analyze_flow_log_file, load_lookup_file,
//!     write_report_file,
//! };
//!
//! let registry = ProtocolRegistry::new();
//! let mut lookup = LookupTable::new();
//! load_lookup_file(Some(Path::new("lookup_table.csv")), &mut lookup)?;
//!
//! let mut aggregator = Aggregator::new();
//! analyze_flow_log_file(Path::new("flow_logs.txt"), &registry, &lookup, &mut aggregator)?;
//! write_report_file(Path::new("output_results.txt"), &aggregator.into_report())?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use serde::{Deserialize, Serialize};

mod analysis;
mod flowlog;
mod lookup;
mod registry;
mod report;
mod source;

pub use analysis::{
    AnalysisError, Aggregator, PortProtocolCounts, TagCounts, analyze_flow_log_file,
    analyze_source,
};
pub use flowlog::{FlowLogError, FlowRecord, parse_flow_line};
pub use lookup::{
    LookupError, LookupKey, LookupLoad, LookupTable, RowRejection, load_lookup_file,
    load_lookup_reader,
};
pub use registry::{DEFAULT_PROTOCOL_NAMES, ProtocolRegistry, UNKNOWN_PROTOCOL};
pub use report::{
    ReportError, render_report, write_report, write_report_file, write_report_json,
    write_report_json_file,
};
pub use source::{FlowLogFileSource, FlowLogReaderSource, LineSource, SourceError};

/// Tag assigned to records whose (port, protocol) pair has no lookup entry.
pub const UNTAGGED: &str = "Untagged";

/// Final counts of one run, in first-seen order.
///
/// # Examples
/// ```
/// use flowtag_core::{Report, TagCount};
///
/// let report = Report {
///     tag_counts: vec![TagCount {
///         tag: "sv_P2".to_string(),
///         count: 1,
///     }],
///     port_protocol_counts: Vec::new(),
/// };
/// assert_eq!(report.total_records(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    /// Occurrences per tag (including `Untagged`).
    pub tag_counts: Vec<TagCount>,
    /// Occurrences per destination port and protocol name.
    pub port_protocol_counts: Vec<PortProtocolCount>,
}

impl Report {
    /// Number of accepted records the report accounts for.
    pub fn total_records(&self) -> u64 {
        self.tag_counts.iter().map(|entry| entry.count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.tag_counts.is_empty() && self.port_protocol_counts.is_empty()
    }
}

/// Count for a single tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagCount {
    pub tag: String,
    pub count: u64,
}

/// Count for a single (port, protocol) combination.
///
/// # Examples
/// ```
/// use flowtag_core::PortProtocolCount;
///
/// let entry = PortProtocolCount {
///     port: "443".to_string(),
///     protocol: "tcp".to_string(),
///     count: 2,
/// };
/// assert_eq!(entry.protocol, "tcp");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortProtocolCount {
    /// Destination port exactly as it appeared in the log (`-` allowed).
    pub port: String,
    /// Lowercase protocol name from the registry.
    pub protocol: String,
    pub count: u64,
}
