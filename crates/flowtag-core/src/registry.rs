//! Static IP protocol registry.
//!
//! Maps the decimal protocol number found in flow-log records to a lowercase
//! protocol name. Numbers come from an embedded copy of the IANA "Assigned
//! Internet Protocol Numbers" table; only the names listed in
//! `DEFAULT_PROTOCOL_NAMES` are registered by default, so records carrying
//! any other protocol (e.g. HOPOPT, 0) are treated as unsupported.

use std::collections::HashMap;

/// Name returned by [`ProtocolRegistry::name_or_unknown`] for unregistered numbers.
pub const UNKNOWN_PROTOCOL: &str = "unknown";

/// Protocol names registered by [`ProtocolRegistry::new`].
pub const DEFAULT_PROTOCOL_NAMES: &[&str] = &[
    "tcp",
    "udp",
    "icmp",
    "igmp",
    "ggp",
    "ipv4",
    "st",
    "egp",
    "pup",
    "hmp",
    "xns-idp",
    "rdp",
    "iso-tp4",
    "dccp",
    "xtp",
    "ddp",
    "idpr-cmtp",
    "ipv6",
    "ipv6-route",
    "ipv6-frag",
    "gre",
    "esp",
    "ah",
    "skip",
    "ipv6-icmp",
    "ipv6-nonxt",
    "ipv6-opts",
    "rspf",
    "vmtp",
    "ospf",
    "ipip",
    "encap",
    "pim",
    "comp",
    "sctp",
];

// IANA protocol numbers, keyed by the lowercase keyword used in protocol
// databases. Kept sorted by number.
const IANA_PROTOCOLS: &[(&str, u8)] = &[
    ("hopopt", 0),
    ("icmp", 1),
    ("igmp", 2),
    ("ggp", 3),
    ("ipv4", 4),
    ("st", 5),
    ("tcp", 6),
    ("egp", 8),
    ("igp", 9),
    ("pup", 12),
    ("udp", 17),
    ("hmp", 20),
    ("xns-idp", 22),
    ("rdp", 27),
    ("iso-tp4", 29),
    ("dccp", 33),
    ("xtp", 36),
    ("ddp", 37),
    ("idpr-cmtp", 38),
    ("ipv6", 41),
    ("ipv6-route", 43),
    ("ipv6-frag", 44),
    ("idrp", 45),
    ("rsvp", 46),
    ("gre", 47),
    ("esp", 50),
    ("ah", 51),
    ("skip", 57),
    ("ipv6-icmp", 58),
    ("ipv6-nonxt", 59),
    ("ipv6-opts", 60),
    ("rspf", 73),
    ("vmtp", 81),
    ("eigrp", 88),
    ("ospf", 89),
    ("ax.25", 93),
    ("ipip", 94),
    ("etherip", 97),
    ("encap", 98),
    ("pim", 103),
    ("comp", 108),
    ("vrrp", 112),
    ("l2tp", 115),
    ("isis", 124),
    ("sctp", 132),
    ("fc", 133),
    ("udplite", 136),
];

/// Immutable protocol-number to protocol-name mapping.
///
/// Keys are the decimal string form of the number and are compared exactly,
/// so `"06"` does not resolve even though `"6"` does.
///
/// # Examples
/// ```
/// use flowtag_core::ProtocolRegistry;
///
/// let registry = ProtocolRegistry::new();
/// assert_eq!(registry.lookup("6"), Some("tcp"));
/// assert_eq!(registry.lookup("0"), None);
/// assert_eq!(registry.name_or_unknown("0"), "unknown");
/// ```
#[derive(Debug, Clone)]
pub struct ProtocolRegistry {
    by_number: HashMap<String, &'static str>,
}

impl ProtocolRegistry {
    /// Registry covering `DEFAULT_PROTOCOL_NAMES`.
    pub fn new() -> Self {
        Self::from_names(DEFAULT_PROTOCOL_NAMES)
    }

    /// Build a registry from protocol names, resolving each through the
    /// embedded IANA table. Names that do not resolve are skipped.
    pub fn from_names(names: &[&str]) -> Self {
        let by_number = names
            .iter()
            .filter_map(|name| resolve_protocol_number(name))
            .map(|(name, number)| (number.to_string(), name))
            .collect();
        Self { by_number }
    }

    pub fn lookup(&self, number: &str) -> Option<&'static str> {
        self.by_number.get(number).copied()
    }

    pub fn name_or_unknown(&self, number: &str) -> &'static str {
        self.lookup(number).unwrap_or(UNKNOWN_PROTOCOL)
    }

    pub fn contains(&self, number: &str) -> bool {
        self.by_number.contains_key(number)
    }

    pub fn len(&self) -> usize {
        self.by_number.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_number.is_empty()
    }

    /// Registered `(number, name)` pairs in ascending number order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &'static str)> + '_ {
        IANA_PROTOCOLS
            .iter()
            .copied()
            .filter(|(name, number)| self.lookup(&number.to_string()) == Some(*name))
            .map(|(name, number)| (number, name))
    }
}

impl Default for ProtocolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn resolve_protocol_number(name: &str) -> Option<(&'static str, u8)> {
    let wanted = name.to_ascii_lowercase();
    IANA_PROTOCOLS
        .iter()
        .find(|(keyword, _)| *keyword == wanted)
        .copied()
}

#[cfg(test)]
mod tests {
    use super::{DEFAULT_PROTOCOL_NAMES, ProtocolRegistry, UNKNOWN_PROTOCOL};

    #[test]
    fn well_known_numbers_resolve() {
        let registry = ProtocolRegistry::new();
        assert_eq!(registry.lookup("6"), Some("tcp"));
        assert_eq!(registry.lookup("17"), Some("udp"));
        assert_eq!(registry.lookup("1"), Some("icmp"));
        assert_eq!(registry.lookup("132"), Some("sctp"));
    }

    #[test]
    fn every_default_name_is_registered() {
        let registry = ProtocolRegistry::new();
        assert_eq!(registry.len(), DEFAULT_PROTOCOL_NAMES.len());
    }

    #[test]
    fn hopopt_is_not_registered_by_default() {
        let registry = ProtocolRegistry::new();
        assert!(!registry.contains("0"));
        assert_eq!(registry.name_or_unknown("0"), UNKNOWN_PROTOCOL);
    }

    #[test]
    fn numbers_are_matched_as_exact_strings() {
        let registry = ProtocolRegistry::new();
        assert_eq!(registry.lookup("06"), None);
        assert_eq!(registry.lookup(" 6"), None);
    }

    #[test]
    fn unresolvable_names_are_skipped() {
        let registry = ProtocolRegistry::from_names(&["tcp", "not-a-protocol", "udp"]);
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.lookup("17"), Some("udp"));
    }

    #[test]
    fn iter_is_ascending_by_number() {
        let registry = ProtocolRegistry::from_names(&["udp", "tcp", "icmp"]);
        let numbers: Vec<u8> = registry.iter().map(|(number, _)| number).collect();
        assert_eq!(numbers, vec![1, 6, 17]);
    }
}
