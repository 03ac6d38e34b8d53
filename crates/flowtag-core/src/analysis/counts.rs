use indexmap::IndexMap;

use crate::{PortProtocolCount, TagCount};

/// Occurrences per tag, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagCounts {
    counts: IndexMap<String, u64>,
}

impl TagCounts {
    pub fn increment(&mut self, tag: &str) {
        match self.counts.get_mut(tag) {
            Some(count) => *count += 1,
            None => {
                self.counts.insert(tag.to_string(), 1);
            }
        }
    }

    pub fn get(&self, tag: &str) -> Option<u64> {
        self.counts.get(tag).copied()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(tag, count)| (tag.as_str(), *count))
    }

    pub(crate) fn into_rows(self) -> Vec<TagCount> {
        self.counts
            .into_iter()
            .map(|(tag, count)| TagCount { tag, count })
            .collect()
    }
}

/// Occurrences per (destination port, protocol) pair, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PortProtocolCounts {
    counts: IndexMap<(String, String), u64>,
}

impl PortProtocolCounts {
    pub fn increment(&mut self, port: String, protocol: String) {
        *self.counts.entry((port, protocol)).or_insert(0) += 1;
    }

    pub fn get(&self, port: &str, protocol: &str) -> Option<u64> {
        self.counts
            .get(&(port.to_string(), protocol.to_string()))
            .copied()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, u64)> {
        self.counts
            .iter()
            .map(|((port, protocol), count)| (port.as_str(), protocol.as_str(), *count))
    }

    pub(crate) fn into_rows(self) -> Vec<PortProtocolCount> {
        self.counts
            .into_iter()
            .map(|((port, protocol), count)| PortProtocolCount {
                port,
                protocol,
                count,
            })
            .collect()
    }
}
