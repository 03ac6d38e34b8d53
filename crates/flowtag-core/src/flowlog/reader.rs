use std::sync::LazyLock;

use regex::Regex;

use super::error::FlowLogError;
use super::layout;

static RECORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(layout::RECORD_PATTERN).expect("valid flow log record pattern"));

/// Token-level view of one trimmed flow-log line.
pub struct FlowLogReader<'a> {
    line: &'a str,
    fields: Vec<&'a str>,
}

impl<'a> FlowLogReader<'a> {
    pub fn new(line: &'a str) -> Self {
        let line = line.trim();
        let mut fields = Vec::with_capacity(layout::FIELD_COUNT);
        fields.extend(line.split_whitespace());
        Self { line, fields }
    }

    /// Check the trimmed line against the full record grammar.
    pub fn require_grammar(&self) -> Result<(), FlowLogError> {
        if RECORD_RE.is_match(self.line) {
            Ok(())
        } else {
            Err(FlowLogError::Malformed)
        }
    }

    pub fn require_fields(&self, needed: usize) -> Result<(), FlowLogError> {
        if self.fields.len() < needed {
            return Err(FlowLogError::TooFewFields {
                needed,
                found: self.fields.len(),
            });
        }
        Ok(())
    }

    pub fn field(&self, index: usize) -> Result<&'a str, FlowLogError> {
        self.fields
            .get(index)
            .copied()
            .ok_or(FlowLogError::TooFewFields {
                needed: index + 1,
                found: self.fields.len(),
            })
    }
}
