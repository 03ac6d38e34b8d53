pub const VERSION: &str = "2";

pub const FIELD_COUNT: usize = 14;
pub const MIN_FIELD_COUNT: usize = 13;

pub const VERSION_INDEX: usize = 0;
pub const DST_PORT_INDEX: usize = 6;
pub const PROTOCOL_INDEX: usize = 7;

/// Whole-record grammar, applied to the trimmed line. Fields in order:
/// version, account id, interface id, source and destination address,
/// source and destination port, protocol, packets, bytes, start, end,
/// action, log status.
pub const RECORD_PATTERN: &str = concat!(
    r"^2\s+",
    r"[0-9]{12}\s+",
    r"eni-[a-z0-9]+\s+",
    r"[0-9.]+\s+",
    r"[0-9.]+\s+",
    r"(?:[0-9]+|-)\s+",
    r"(?:[0-9]+|-)\s+",
    r"[0-9]+\s+",
    r"[0-9]+\s+",
    r"[0-9]+\s+",
    r"[0-9]+\s+",
    r"[0-9]+\s+",
    r"(?:ACCEPT|REJECT)\s+",
    r"(?:OK|NODATA|SKIPDATA)$",
);
