use crate::Report;
use crate::flowlog::{FlowRecord, parse_flow_line};
use crate::lookup::LookupTable;
use crate::registry::ProtocolRegistry;

use super::counts::{PortProtocolCounts, TagCounts};

/// Caller-owned accumulator for one aggregation pass.
///
/// Both counters are bumped exactly once per accepted record; rejected lines
/// leave them untouched.
///
/// # Examples
/// ```
/// use flowtag_core::{Aggregator, LookupTable, ProtocolRegistry};
///
/// let registry = ProtocolRegistry::new();
/// let lookup = LookupTable::new();
/// let mut aggregator = Aggregator::new();
///
/// let line = "2 123456789012 eni-abc123 10.0.0.1 10.0.0.2 443 49154 6 10 1500 1620000000 1620000060 ACCEPT OK";
/// assert!(aggregator.ingest_line(line, &registry, &lookup));
/// assert!(!aggregator.ingest_line("garbage", &registry, &lookup));
/// assert_eq!(aggregator.tag_counts().get("Untagged"), Some(1));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Aggregator {
    tag_counts: TagCounts,
    port_protocol_counts: PortProtocolCounts,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode and count one raw line. Returns `false` when the line was skipped.
    pub fn ingest_line(
        &mut self,
        line: &str,
        registry: &ProtocolRegistry,
        lookup: &LookupTable,
    ) -> bool {
        match parse_flow_line(line, registry) {
            Ok(record) => {
                self.record(record, lookup);
                true
            }
            Err(_) => false,
        }
    }

    /// Classify an accepted record and bump both counters.
    pub fn record(&mut self, record: FlowRecord, lookup: &LookupTable) {
        let tag = lookup.tag_for(&record.dst_port, &record.protocol);
        self.tag_counts.increment(tag);
        self.port_protocol_counts
            .increment(record.dst_port, record.protocol);
    }

    pub fn tag_counts(&self) -> &TagCounts {
        &self.tag_counts
    }

    pub fn port_protocol_counts(&self) -> &PortProtocolCounts {
        &self.port_protocol_counts
    }

    pub fn into_report(self) -> Report {
        Report {
            tag_counts: self.tag_counts.into_rows(),
            port_protocol_counts: self.port_protocol_counts.into_rows(),
        }
    }
}
