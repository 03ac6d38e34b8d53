use crate::registry::ProtocolRegistry;

use super::error::FlowLogError;
use super::layout;
use super::reader::FlowLogReader;

/// Decoded flow-log record: the classification key of one accepted line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowRecord {
    /// Destination port token, verbatim (digits or `-`).
    pub dst_port: String,
    /// Lowercase protocol name resolved through the registry.
    pub protocol: String,
}

/// Decode one raw flow-log line.
///
/// The line must match the full version 2 grammar, carry at least the
/// expected number of fields, start with version `2`, and use a protocol
/// number known to `registry`.
///
/// # Examples
/// ```
/// use flowtag_core::{FlowLogError, ProtocolRegistry, parse_flow_line};
///
/// let registry = ProtocolRegistry::new();
/// let line = "2 123456789012 eni-abc123 10.0.0.1 10.0.0.2 443 49154 6 10 1500 1620000000 1620000060 ACCEPT OK";
/// let record = parse_flow_line(line, &registry)?;
/// assert_eq!(record.dst_port, "49154");
/// assert_eq!(record.protocol, "tcp");
/// # Ok::<(), FlowLogError>(())
/// ```
///
/// # Errors
/// Returns `FlowLogError` describing why the line was rejected.
pub fn parse_flow_line(line: &str, registry: &ProtocolRegistry) -> Result<FlowRecord, FlowLogError> {
    let reader = FlowLogReader::new(line);
    reader.require_grammar()?;
    reader.require_fields(layout::MIN_FIELD_COUNT)?;

    let version = reader.field(layout::VERSION_INDEX)?;
    if version != layout::VERSION {
        return Err(FlowLogError::UnsupportedVersion {
            version: version.to_string(),
        });
    }

    let dst_port = reader.field(layout::DST_PORT_INDEX)?;
    let number = reader.field(layout::PROTOCOL_INDEX)?;
    let protocol = registry
        .lookup(number)
        .ok_or_else(|| FlowLogError::UnsupportedProtocol {
            number: number.to_string(),
        })?;

    Ok(FlowRecord {
        dst_port: dst_port.to_string(),
        protocol: protocol.to_lowercase(),
    })
}
