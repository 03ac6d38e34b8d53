//! Flow-log (version 2) record decoding.
//!
//! The module follows the same layering as the other decoders in this crate:
//! - `layout`: field positions and token vocabularies (source of truth)
//! - `reader`: trimming, tokenizing and grammar checks
//! - `parser`: domain-level decoding into a `FlowRecord`
//! - `error`: explicit rejection reasons
//!
//! Only the destination port and protocol survive decoding. The remaining
//! fields are validated by the grammar and then discarded.

pub mod error;
pub mod layout;
pub mod parser;
pub mod reader;

pub use error::FlowLogError;
pub use parser::{FlowRecord, parse_flow_line};
