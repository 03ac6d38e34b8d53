use std::collections::HashMap;

use crate::UNTAGGED;

use super::error::RowRejection;

/// Lookup key: destination port and lowercase protocol name.
///
/// Both parts compare as exact strings; `"025"` and `"25"` are different keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LookupKey {
    pub port: String,
    pub protocol: String,
}

impl LookupKey {
    pub fn new(port: impl Into<String>, protocol: impl Into<String>) -> Self {
        Self {
            port: port.into(),
            protocol: protocol.into(),
        }
    }
}

/// Mapping from `LookupKey` to tag.
///
/// # Examples
/// ```
/// use flowtag_core::LookupTable;
///
/// let mut table = LookupTable::new();
/// table.insert_row(&["443", "TCP", "sv_P2"])?;
/// assert_eq!(table.tag_for("443", "tcp"), "sv_P2");
/// assert_eq!(table.tag_for("80", "tcp"), "Untagged");
/// # Ok::<(), flowtag_core::RowRejection>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LookupTable {
    entries: HashMap<LookupKey, String>,
}

impl LookupTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate one data row (`port, protocol, tag`) and insert it.
    ///
    /// Fields are trimmed and the protocol is lowercased. A later row with
    /// the same key replaces the earlier tag.
    ///
    /// # Errors
    /// Returns `RowRejection` when the row has the wrong number of fields,
    /// an empty field, or a port that is not all digits.
    pub fn insert_row<S: AsRef<str>>(&mut self, fields: &[S]) -> Result<(), RowRejection> {
        let (key, tag) = parse_row(fields)?;
        self.entries.insert(key, tag);
        Ok(())
    }

    pub fn insert(&mut self, key: LookupKey, tag: impl Into<String>) -> Option<String> {
        self.entries.insert(key, tag.into())
    }

    pub fn get(&self, port: &str, protocol: &str) -> Option<&str> {
        self.entries
            .get(&LookupKey::new(port, protocol))
            .map(String::as_str)
    }

    /// Tag for a (port, protocol) pair, `Untagged` when there is no entry.
    pub fn tag_for(&self, port: &str, protocol: &str) -> &str {
        self.get(port, protocol).unwrap_or(UNTAGGED)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn parse_row<S: AsRef<str>>(fields: &[S]) -> Result<(LookupKey, String), RowRejection> {
    let [port, protocol, tag] = fields else {
        return Err(RowRejection::FieldCount {
            found: fields.len(),
        });
    };

    let port = port.as_ref().trim();
    let protocol = protocol.as_ref().trim();
    let tag = tag.as_ref().trim();
    if port.is_empty() || protocol.is_empty() || tag.is_empty() {
        return Err(RowRejection::EmptyField);
    }
    if !is_port(port) {
        return Err(RowRejection::InvalidPort {
            port: port.to_string(),
        });
    }

    Ok((
        LookupKey::new(port, protocol.to_lowercase()),
        tag.to_string(),
    ))
}

fn is_port(value: &str) -> bool {
    value == "0" || value.bytes().all(|b| b.is_ascii_digit())
}
